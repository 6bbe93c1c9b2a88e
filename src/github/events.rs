//! Webhook payload decoding.
//!
//! GitHub delivers one JSON document per event; Actions exposes its name and
//! the path of the payload file through `GITHUB_EVENT_NAME` and
//! `GITHUB_EVENT_PATH`. Only the fields the labeller reads are decoded.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::releasenote::model::{
    CommentAction, CommentEvent, IssueCommentEvent, IssueView, PullRequestAction,
    PullRequestEvent, PullRequestView,
};

use super::error::TrackerError;
use super::locator::IssueLocator;
use super::models::{ApiLabel, ApiUser, Label};

const ISSUE_COMMENT: &str = "issue_comment";
const PULL_REQUEST: &str = "pull_request";

/// An inbound event, decoded by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    /// A comment on an issue or pull request.
    IssueComment(IssueCommentEvent),
    /// A pull request change.
    PullRequest(PullRequestEvent),
    /// Any event the labeller does not handle.
    Ignored {
        /// Event name as delivered.
        name: String,
    },
}

impl WebhookEvent {
    /// Decodes `payload` according to the event `name`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidPayload`] when a handled event's JSON
    /// does not match its schema, or [`TrackerError::InvalidIssueReference`]
    /// when the repository or number is blank.
    pub fn parse(name: &str, payload: &str) -> Result<Self, TrackerError> {
        match name {
            ISSUE_COMMENT => decode::<IssueCommentPayload>(name, payload)?
                .into_event()
                .map(Self::IssueComment),
            PULL_REQUEST => decode::<PullRequestPayload>(name, payload)?
                .into_event()
                .map(Self::PullRequest),
            other => Ok(Self::Ignored {
                name: other.to_owned(),
            }),
        }
    }

    /// Reads the payload file at `path` and decodes it as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Io`] when the file cannot be read, otherwise
    /// the errors of [`WebhookEvent::parse`].
    pub fn from_file(name: &str, path: &Utf8Path) -> Result<Self, TrackerError> {
        let payload = read_payload(path)?;
        Self::parse(name, &payload)
    }
}

fn decode<T: DeserializeOwned>(event: &str, payload: &str) -> Result<T, TrackerError> {
    serde_json::from_str(payload).map_err(|error| TrackerError::InvalidPayload {
        event: event.to_owned(),
        message: error.to_string(),
    })
}

fn read_payload(path: &Utf8Path) -> Result<String, TrackerError> {
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| TrackerError::Io {
        message: format!("invalid event path '{path}': no file name"),
    })?;

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        TrackerError::Io {
            message: format!("failed to open event directory '{parent}': {error}"),
        }
    })?;
    dir.read_to_string(file_name)
        .map_err(|error| TrackerError::Io {
            message: format!("failed to read event payload '{path}': {error}"),
        })
}

#[derive(Debug, Deserialize)]
struct ApiRepository {
    name: String,
    owner: ApiUser,
}

impl ApiRepository {
    fn locator(&self, number: u64) -> Result<IssueLocator, TrackerError> {
        let owner = self.owner.login.as_deref().unwrap_or_default();
        IssueLocator::new(owner, &self.name, number)
    }
}

fn into_labels(labels: Vec<ApiLabel>) -> Vec<Label> {
    labels.into_iter().map(Label::from).collect()
}

#[derive(Debug, Deserialize)]
struct IssueCommentPayload {
    action: CommentAction,
    issue: ApiIssue,
    comment: ApiEventComment,
    repository: ApiRepository,
}

#[derive(Debug, Deserialize)]
struct ApiIssue {
    number: u64,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    user: Option<ApiUser>,
    #[serde(default)]
    labels: Vec<ApiLabel>,
    #[serde(default)]
    pull_request: Option<IgnoredAny>,
}

#[derive(Debug, Deserialize)]
struct ApiEventComment {
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    user: Option<ApiUser>,
    #[serde(default)]
    html_url: Option<String>,
}

impl IssueCommentPayload {
    fn into_event(self) -> Result<IssueCommentEvent, TrackerError> {
        let issue = IssueView {
            issue: self.repository.locator(self.issue.number)?,
            author: ApiUser::into_login(self.issue.user),
            body: self.issue.body.unwrap_or_default(),
            labels: into_labels(self.issue.labels),
            is_pull_request: self.issue.pull_request.is_some(),
        };
        let comment = CommentEvent {
            action: self.action,
            author: ApiUser::into_login(self.comment.user),
            body: self.comment.body.unwrap_or_default(),
            html_url: self.comment.html_url,
        };
        Ok(IssueCommentEvent { issue, comment })
    }
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    action: PullRequestAction,
    number: u64,
    pull_request: ApiPullRequest,
    repository: ApiRepository,
}

#[derive(Debug, Deserialize)]
struct ApiPullRequest {
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    user: Option<ApiUser>,
    base: ApiBase,
}

#[derive(Debug, Deserialize)]
struct ApiBase {
    #[serde(rename = "ref")]
    branch: String,
}

impl PullRequestPayload {
    fn into_event(self) -> Result<PullRequestEvent, TrackerError> {
        let pull_request = PullRequestView {
            issue: self.repository.locator(self.number)?,
            author: ApiUser::into_login(self.pull_request.user),
            body: self.pull_request.body.unwrap_or_default(),
            base_ref: self.pull_request.base.branch,
        };
        Ok(PullRequestEvent {
            action: self.action,
            pull_request,
        })
    }
}
