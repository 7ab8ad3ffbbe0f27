use super::*;

use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let pairs: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| pairs.get(name).cloned()
}

#[test]
fn defaults_point_at_public_relay_without_identifiers() {
    let settings = Settings::default();
    assert_eq!(settings.endpoint, "https://api.emailjs.com");
    assert!(settings.relay_config().is_err());
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    settings
        .apply_file(
            r#"
service_id = "service_file"
template_id = "template_file"
public_key = "key_file"
unrelated = "ignored"
"#,
        )
        .expect("apply file");

    let config = settings.relay_config().expect("complete config");
    assert_eq!(config.credentials.service_id, "service_file");
    assert_eq!(config.credentials.template_id, "template_file");
    assert_eq!(config.credentials.public_key, "key_file");
    assert_eq!(config.endpoint.as_str(), "https://api.emailjs.com/");
}

#[test]
fn non_string_file_values_are_rejected() {
    let mut settings = Settings::default();
    assert!(settings.apply_file("service_id = 42").is_err());
}

#[test]
fn prefixed_env_wins_over_plain_env() {
    let mut settings = Settings::default();
    settings.service_id = "service_file".into();

    settings.apply_env(env_from(&[
        ("EMAILJS_SERVICE_ID", "service_plain"),
        ("APP__SERVICE_ID", "service_prefixed"),
        ("EMAILJS_PUBLIC_KEY", "key_plain"),
        ("APP__ENDPOINT", "http://127.0.0.1:9000"),
    ]));

    assert_eq!(settings.service_id, "service_prefixed");
    assert_eq!(settings.public_key, "key_plain");
    assert_eq!(settings.template_id, "");
    assert_eq!(settings.endpoint, "http://127.0.0.1:9000");
}

#[test]
fn load_settings_reads_explicit_path() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("contact_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("contact.toml");
    fs::write(
        &path,
        "service_id = \"s\"\ntemplate_id = \"t\"\npublic_key = \"k\"\n",
    )
    .expect("write config");

    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.template_id, "t");

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn load_settings_fails_for_missing_explicit_path() {
    let missing = env::temp_dir().join("contact_config_test_missing/contact.toml");
    let err = load_settings(Some(&missing)).unwrap_err();
    assert!(err.to_string().contains("failed to read config"));
}
