//! GitHub plumbing for the release-note labeller.
//!
//! This module defines the [`IssueTracker`] capability, wraps Octocrab to
//! implement it over the REST API, and decodes the webhook payloads that
//! trigger a run. Octocrab errors are mapped into [`TrackerError`] variants
//! so callers can report precise failures without exposing Octocrab
//! internals.

pub mod error;
pub mod events;
pub mod gateway;
pub mod locator;
pub mod models;

pub use error::TrackerError;
pub use events::WebhookEvent;
pub use gateway::{IssueTracker, OctocrabTracker};
pub use locator::{IssueLocator, IssueNumber, PersonalAccessToken, RepositoryName, RepositoryOwner};
pub use models::{IssueComment, Label, StaleCommentPredicate};

#[cfg(test)]
pub use gateway::MockIssueTracker;
