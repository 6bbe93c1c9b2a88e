//! Per-event views of pull requests and comments.
//!
//! Every value here is built fresh from one webhook payload and dropped when
//! the handler returns.

use serde::Deserialize;

use crate::github::locator::IssueLocator;
use crate::github::models::Label;

/// Read-only projection of a pull request as delivered by a
/// `pull_request` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestView {
    /// Where the pull request lives.
    pub issue: IssueLocator,
    /// Login of the pull request author.
    pub author: String,
    /// Pull request description.
    pub body: String,
    /// Name of the branch the pull request targets.
    pub base_ref: String,
}

/// Issue (or pull request) that a comment was left on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueView {
    /// Where the issue lives.
    pub issue: IssueLocator,
    /// Login of the issue author.
    pub author: String,
    /// Issue description.
    pub body: String,
    /// Labels reported in the payload.
    pub labels: Vec<Label>,
    /// Whether the issue is a pull request.
    pub is_pull_request: bool,
}

impl IssueView {
    /// Whether `login` opened the issue. Logins compare case-insensitively
    /// and ignore a leading `@`.
    #[must_use]
    pub fn is_author(&self, login: &str) -> bool {
        normalize_login(&self.author).eq_ignore_ascii_case(normalize_login(login))
    }
}

fn normalize_login(login: &str) -> &str {
    login.strip_prefix('@').unwrap_or(login)
}

/// What happened to a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentAction {
    /// A new comment was posted.
    Created,
    /// Any edit, deletion, or future action.
    #[serde(other)]
    Other,
}

/// What happened to a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestAction {
    /// The pull request was opened.
    Opened,
    /// The title or body was edited.
    Edited,
    /// Synchronise, label, close, and every other action.
    #[serde(other)]
    Other,
}

/// A comment as delivered by an `issue_comment` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEvent {
    /// What happened to the comment.
    pub action: CommentAction,
    /// Login of the commenter.
    pub author: String,
    /// Comment text.
    pub body: String,
    /// Link to the comment, quoted in replies.
    pub html_url: Option<String>,
}

/// An `issue_comment` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueCommentEvent {
    /// The issue the comment belongs to.
    pub issue: IssueView,
    /// The comment itself.
    pub comment: CommentEvent,
}

/// A `pull_request` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    /// What happened to the pull request.
    pub action: PullRequestAction,
    /// The pull request after the change.
    pub pull_request: PullRequestView,
}
