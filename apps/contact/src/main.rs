use std::{io::Write, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{ContactFormController, RelayGateway, SubmissionGateway, SubmitOutcome};
use relay_integration::{DryRunRelay, RelayCredentials};
use shared::domain::FieldName;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

/// Send a message through the contact form relay.
#[derive(Parser, Debug)]
struct Args {
    /// Reply-to address of the sender.
    #[arg(long)]
    email: String,
    /// Message body; read from stdin when omitted.
    #[arg(long)]
    message: Option<String>,
    /// Relay settings file (defaults to ./contact.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Run the whole flow but do not contact the relay.
    #[arg(long)]
    dry_run: bool,
}

fn build_gateway(args: &Args) -> Result<Box<dyn SubmissionGateway>> {
    if args.dry_run {
        info!("dry run: the relay will not be contacted");
        return Ok(Box::new(RelayGateway::new(
            DryRunRelay,
            RelayCredentials {
                service_id: "dry-run".into(),
                template_id: "dry-run".into(),
                public_key: "dry-run".into(),
            },
        )));
    }

    let settings = load_settings(args.config.as_deref())?;
    Ok(Box::new(RelayGateway::emailjs(settings.relay_config()?)))
}

/// Fills a fresh form the way bounded input controls would.
fn fill_form(email: &str, message: &str) -> ContactFormController {
    let mut controller = ContactFormController::new();
    controller.set_field(FieldName::Email, FieldName::Email.clamp(email));
    controller.set_field(FieldName::Message, FieldName::Message.clamp(message));
    controller
}

fn exit_status(outcome: SubmitOutcome) -> u8 {
    match outcome {
        SubmitOutcome::Sent => 0,
        _ => 1,
    }
}

async fn run<R, W>(args: Args, mut stdin: R, out: &mut W) -> Result<SubmitOutcome>
where
    R: AsyncRead + Unpin,
    W: Write,
{
    let message = match &args.message {
        Some(message) => message.clone(),
        None => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .await
                .context("failed to read message from stdin")?;
            buf
        }
    };

    let gateway = build_gateway(&args)?;
    let mut controller = fill_form(&args.email, &message);

    let outcome = controller.submit(gateway.as_ref()).await;
    writeln!(out, "{}", controller.view()).context("failed to write view")?;
    Ok(outcome)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let outcome = run(args, tokio::io::stdin(), &mut std::io::stdout()).await?;
    Ok(ExitCode::from(exit_status(outcome)))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
