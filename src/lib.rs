//! Relnote library crate keeping release-note labels consistent on GitHub
//! pull requests.
//!
//! The core in [`releasenote`] extracts and classifies the release note in a
//! pull request description, honours `/release-note-none` commands, and
//! exempts cherry-picks whose parents already carry a note. It talks to
//! GitHub only through the [`IssueTracker`] trait, which [`github`]
//! implements over Octocrab alongside webhook payload decoding.

pub mod config;
pub mod github;
pub mod releasenote;

pub use config::RelnoteConfig;
pub use github::{
    IssueLocator, IssueTracker, OctocrabTracker, PersonalAccessToken, TrackerError, WebhookEvent,
};
pub use releasenote::{ReleaseNoteError, ReleaseNoteReconciler, ReleaseNoteSettings};
