//! Labeller configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in defaults (`api_url`, `trunk_branch`)
//! 2. **Configuration file** – `.relnote.toml` in the current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `RELNOTE_*`, with the GitHub Actions
//!    variables `GITHUB_TOKEN`, `GITHUB_EVENT_NAME`, and `GITHUB_EVENT_PATH`
//!    as fallbacks
//! 4. **Command-line arguments** – `--token`/`-t`, `--event-name`/`-e`,
//!    `--event-path`/`-p`, and friends
//!
//! # Configuration File
//!
//! ```toml
//! api_url = "https://github.example.com/api/v3"
//! trunk_branch = "main"
//! bot_name = "release-bot"
//! ```

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::TrackerError;
use crate::releasenote::reconcile::{DEFAULT_TRUNK_BRANCH, ReleaseNoteSettings};

/// Public GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Labeller configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use relnote::RelnoteConfig;
///
/// let config = RelnoteConfig::load().expect("failed to load configuration");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "RELNOTE",
    discovery(
        dotfile_name = ".relnote.toml",
        config_file_name = "relnote.toml",
        app_name = "relnote"
    )
)]
pub struct RelnoteConfig {
    /// Token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `RELNOTE_TOKEN` or `GITHUB_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Base URL of the GitHub REST API.
    ///
    /// GitHub Enterprise installs use `https://<host>/api/v3`.
    #[ortho_config()]
    pub api_url: String,

    /// Name of the webhook event being processed.
    ///
    /// Falls back to `GITHUB_EVENT_NAME`.
    #[ortho_config(cli_short = 'e')]
    pub event_name: Option<String>,

    /// Path of the JSON event payload.
    ///
    /// Falls back to `GITHUB_EVENT_PATH`.
    #[ortho_config(cli_short = 'p')]
    pub event_path: Option<String>,

    /// Base branch whose pull requests always need a release note decision.
    #[ortho_config()]
    pub trunk_branch: String,

    /// Login the bot posts as. When unset the login is fetched from
    /// `GET /user`, which installation tokens cannot call.
    #[ortho_config()]
    pub bot_name: Option<String>,
}

impl Default for RelnoteConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: DEFAULT_API_URL.to_owned(),
            event_name: None,
            event_path: None,
            trunk_branch: DEFAULT_TRUNK_BRANCH.to_owned(),
            bot_name: None,
        }
    }
}

impl RelnoteConfig {
    /// Resolves the token from configuration or `GITHUB_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::MissingToken`] when no source provides a
    /// value.
    pub fn resolve_token(&self) -> Result<String, TrackerError> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(TrackerError::MissingToken)
    }

    /// Resolves the event name from configuration or `GITHUB_EVENT_NAME`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Configuration`] when no source provides a
    /// value.
    pub fn resolve_event_name(&self) -> Result<String, TrackerError> {
        self.event_name
            .clone()
            .or_else(|| env::var("GITHUB_EVENT_NAME").ok())
            .ok_or_else(|| TrackerError::Configuration {
                message: "event name is required (use --event-name or GITHUB_EVENT_NAME)"
                    .to_owned(),
            })
    }

    /// Resolves the payload path from configuration or `GITHUB_EVENT_PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Configuration`] when no source provides a
    /// value.
    pub fn resolve_event_path(&self) -> Result<String, TrackerError> {
        self.event_path
            .clone()
            .or_else(|| env::var("GITHUB_EVENT_PATH").ok())
            .ok_or_else(|| TrackerError::Configuration {
                message: "event path is required (use --event-path or GITHUB_EVENT_PATH)"
                    .to_owned(),
            })
    }

    /// Returns the configured bot login, if any.
    #[must_use]
    pub fn bot_name(&self) -> Option<&str> {
        self.bot_name.as_deref().filter(|name| !name.trim().is_empty())
    }

    /// API base URL with any trailing slash removed.
    #[must_use]
    pub fn api_base(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// Reconciler settings derived from this configuration.
    #[must_use]
    pub fn settings(&self) -> ReleaseNoteSettings {
        ReleaseNoteSettings {
            trunk_branch: self.trunk_branch.clone(),
        }
    }
}

#[cfg(test)]
mod tests;
