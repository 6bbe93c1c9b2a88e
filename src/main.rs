//! Relnote CLI entrypoint: reconciles release-note labels for one webhook
//! event.

use std::io::{self, Write};
use std::process::ExitCode;

use camino::Utf8Path;
use ortho_config::OrthoConfig;
use relnote::{
    OctocrabTracker, PersonalAccessToken, ReleaseNoteError, ReleaseNoteReconciler,
    RelnoteConfig, TrackerError, WebhookEvent,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    ReleaseNote(#[from] ReleaseNoteError),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run() -> Result<(), RunError> {
    let config = load_config()?;

    let event_name = config.resolve_event_name()?;
    let event_path = config.resolve_event_path()?;
    let event = WebhookEvent::from_file(&event_name, Utf8Path::new(&event_path))?;

    if let WebhookEvent::Ignored { name } = &event {
        tracing::debug!("ignoring {name} event");
        return Ok(());
    }

    let token = PersonalAccessToken::new(config.resolve_token()?)?;
    let tracker = match config.bot_name() {
        Some(name) => {
            OctocrabTracker::for_token(&token, config.api_base())?.with_bot_name(name.to_owned())
        }
        None => OctocrabTracker::for_token(&token, config.api_base())?,
    };
    let reconciler = ReleaseNoteReconciler::new(&tracker, config.settings());

    match event {
        WebhookEvent::IssueComment(comment) => reconciler.handle_comment(&comment).await?,
        WebhookEvent::PullRequest(pull_request) => {
            reconciler.handle_pull_request(&pull_request).await?;
        }
        WebhookEvent::Ignored { .. } => {}
    }
    Ok(())
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`TrackerError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<RelnoteConfig, TrackerError> {
    RelnoteConfig::load().map_err(|error| TrackerError::Configuration {
        message: error.to_string(),
    })
}
