use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use relay_integration::{RelayConfig, DEFAULT_RELAY_ENDPOINT};

pub const DEFAULT_CONFIG_FILE: &str = "contact.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub endpoint: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            endpoint: DEFAULT_RELAY_ENDPOINT.into(),
        }
    }
}

impl Settings {
    /// Overlays keys from a flat `key = "value"` TOML table. Unknown keys are
    /// ignored.
    pub fn apply_file(&mut self, raw: &str) -> anyhow::Result<()> {
        let file_cfg: HashMap<String, String> =
            toml::from_str(raw).context("config file must be a flat table of strings")?;

        if let Some(v) = file_cfg.get("service_id") {
            self.service_id = v.clone();
        }
        if let Some(v) = file_cfg.get("template_id") {
            self.template_id = v.clone();
        }
        if let Some(v) = file_cfg.get("public_key") {
            self.public_key = v.clone();
        }
        if let Some(v) = file_cfg.get("endpoint") {
            self.endpoint = v.clone();
        }
        Ok(())
    }

    /// `APP__*` names win over the `EMAILJS_*` ones.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let pairs: [(&str, &str, &mut String); 4] = [
            ("EMAILJS_SERVICE_ID", "APP__SERVICE_ID", &mut self.service_id),
            ("EMAILJS_TEMPLATE_ID", "APP__TEMPLATE_ID", &mut self.template_id),
            ("EMAILJS_PUBLIC_KEY", "APP__PUBLIC_KEY", &mut self.public_key),
            ("EMAILJS_ENDPOINT", "APP__ENDPOINT", &mut self.endpoint),
        ];

        for (plain, prefixed, slot) in pairs {
            if let Some(v) = lookup(plain) {
                *slot = v;
            }
            if let Some(v) = lookup(prefixed) {
                *slot = v;
            }
        }
    }

    pub fn relay_config(&self) -> anyhow::Result<RelayConfig> {
        RelayConfig::new(
            &self.service_id,
            &self.template_id,
            &self.public_key,
            &self.endpoint,
        )
        .context("incomplete relay settings; set them in contact.toml or EMAILJS_* variables")
    }
}

/// Defaults, then the config file (an explicit path must exist; the default
/// one is optional), then environment variables.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config '{}'", path.display()))?;
            settings
                .apply_file(&raw)
                .with_context(|| format!("failed to parse config '{}'", path.display()))?;
        }
        None => {
            if let Ok(raw) = fs::read_to_string(DEFAULT_CONFIG_FILE) {
                settings
                    .apply_file(&raw)
                    .with_context(|| format!("failed to parse config '{DEFAULT_CONFIG_FILE}'"))?;
            }
        }
    }

    settings.apply_env(|name| std::env::var(name).ok());
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
