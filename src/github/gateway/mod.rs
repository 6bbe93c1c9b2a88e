//! The issue tracker capability consumed by the release-note reconciler.
//!
//! The trait is the seam between labelling decisions and GitHub: the
//! Octocrab implementation issues real REST calls while tests substitute a
//! mock or the in-memory recording tracker.

mod client;
mod comments;
mod error_mapping;
mod http_utils;
mod tracker;

pub use tracker::OctocrabTracker;

use async_trait::async_trait;

use crate::github::error::TrackerError;
use crate::github::locator::IssueLocator;
use crate::github::models::{IssueComment, Label, StaleCommentPredicate};

/// Label, comment, and membership operations on an issue tracker.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Reports whether `user` belongs to the organisation `org`.
    async fn is_org_member(&self, org: &str, user: &str) -> Result<bool, TrackerError>;

    /// Posts a new comment on the issue.
    async fn create_comment(&self, issue: &IssueLocator, body: &str) -> Result<(), TrackerError>;

    /// Adds a label to the issue.
    async fn add_label(&self, issue: &IssueLocator, label: &str) -> Result<(), TrackerError>;

    /// Removes a label from the issue.
    async fn remove_label(&self, issue: &IssueLocator, label: &str) -> Result<(), TrackerError>;

    /// Fetches every label currently on the issue.
    async fn labels(&self, issue: &IssueLocator) -> Result<Vec<Label>, TrackerError>;

    /// Fetches every comment on the issue.
    async fn comments(&self, issue: &IssueLocator) -> Result<Vec<IssueComment>, TrackerError>;

    /// Deletes each of `comments` that `is_stale` matches.
    async fn delete_stale_comments(
        &self,
        issue: &IssueLocator,
        comments: &[IssueComment],
        is_stale: &StaleCommentPredicate,
    ) -> Result<(), TrackerError>;

    /// Login of the account the tracker acts as.
    async fn bot_name(&self) -> Result<String, TrackerError>;
}
