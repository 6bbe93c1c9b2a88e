//! Octocrab implementation of the issue tracker.

use std::sync::OnceLock;

use async_trait::async_trait;
use http::StatusCode;
use octocrab::Octocrab;
use serde_json::json;

use crate::github::error::TrackerError;
use crate::github::locator::{IssueLocator, PersonalAccessToken};
use crate::github::models::{
    ApiComment, ApiLabel, ApiUser, IssueComment, Label, StaleCommentPredicate,
};

use super::IssueTracker;
use super::client::{build_octocrab_client, request_uri};
use super::comments::fetch_all_pages;
use super::error_mapping::{map_http_error, map_octocrab_error};
use super::http_utils::extract_github_message;

/// Octocrab-backed tracker talking to the GitHub REST API.
pub struct OctocrabTracker {
    client: Octocrab,
    bot_name: OnceLock<String>,
}

impl OctocrabTracker {
    /// Creates a tracker from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self {
            client,
            bot_name: OnceLock::new(),
        }
    }

    /// Builds an authenticated tracker against the given API base URL.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidUrl` when the base URI cannot be parsed or
    /// `TrackerError::Api` when Octocrab fails to construct a client.
    pub fn for_token(token: &PersonalAccessToken, api_base: &str) -> Result<Self, TrackerError> {
        let octocrab = build_octocrab_client(token, api_base)?;
        Ok(Self::new(octocrab))
    }

    /// Uses `name` as the bot login instead of asking GitHub for it.
    ///
    /// Installation tokens cannot call `GET /user`, so GitHub App and
    /// Actions deployments configure the login explicitly.
    #[must_use]
    pub fn with_bot_name(self, name: String) -> Self {
        Self {
            client: self.client,
            bot_name: OnceLock::from(name),
        }
    }

    async fn delete(
        &self,
        path: &str,
        operation: &str,
        missing_ok: bool,
    ) -> Result<(), TrackerError> {
        let response = self
            .client
            ._delete(request_uri(path)?, None::<&()>)
            .await
            .map_err(|error| map_octocrab_error(operation, &error))?;

        let status = response.status();
        if status.is_success() || (missing_ok && status == StatusCode::NOT_FOUND) {
            return Ok(());
        }

        let body = self
            .client
            .body_to_string(response)
            .await
            .unwrap_or_else(|_| String::new());
        Err(map_http_error(operation, status, extract_github_message(&body)))
    }
}

#[async_trait]
impl IssueTracker for OctocrabTracker {
    async fn is_org_member(&self, org: &str, user: &str) -> Result<bool, TrackerError> {
        let path = format!(
            "/orgs/{}/members/{}",
            urlencoding::encode(org),
            urlencoding::encode(user)
        );
        let response = self
            .client
            ._get(request_uri(&path)?)
            .await
            .map_err(|error| map_octocrab_error("organisation membership", &error))?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => {
                let body = self
                    .client
                    .body_to_string(response)
                    .await
                    .unwrap_or_else(|_| String::new());
                Err(map_http_error(
                    "organisation membership",
                    status,
                    extract_github_message(&body),
                ))
            }
        }
    }

    async fn create_comment(&self, issue: &IssueLocator, body: &str) -> Result<(), TrackerError> {
        self.client
            .post::<_, ApiComment>(issue.comments_path(), Some(&json!({ "body": body })))
            .await
            .map(|_| ())
            .map_err(|error| map_octocrab_error("create comment", &error))
    }

    async fn add_label(&self, issue: &IssueLocator, label: &str) -> Result<(), TrackerError> {
        self.client
            .post::<_, Vec<ApiLabel>>(issue.labels_path(), Some(&json!({ "labels": [label] })))
            .await
            .map(|_| ())
            .map_err(|error| map_octocrab_error("add label", &error))
    }

    async fn remove_label(&self, issue: &IssueLocator, label: &str) -> Result<(), TrackerError> {
        self.delete(&issue.label_path(label), "remove label", true)
            .await
    }

    async fn labels(&self, issue: &IssueLocator) -> Result<Vec<Label>, TrackerError> {
        fetch_all_pages::<ApiLabel>(&self.client, &issue.labels_path(), "issue labels")
            .await
            .map(|labels| labels.into_iter().map(ApiLabel::into).collect())
    }

    async fn comments(&self, issue: &IssueLocator) -> Result<Vec<IssueComment>, TrackerError> {
        fetch_all_pages::<ApiComment>(&self.client, &issue.comments_path(), "issue comments")
            .await
            .map(|comments| comments.into_iter().map(ApiComment::into).collect())
    }

    async fn delete_stale_comments(
        &self,
        issue: &IssueLocator,
        comments: &[IssueComment],
        is_stale: &StaleCommentPredicate,
    ) -> Result<(), TrackerError> {
        let mut first_error = None;
        for comment in comments.iter().filter(|comment| is_stale.is_stale(comment)) {
            tracing::debug!("deleting stale comment {} on {issue}", comment.id);
            if let Err(error) = self
                .delete(&issue.comment_path(comment.id), "delete comment", true)
                .await
            {
                tracing::warn!("failed to delete comment {} on {issue}: {error}", comment.id);
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    async fn bot_name(&self) -> Result<String, TrackerError> {
        if let Some(name) = self.bot_name.get() {
            return Ok(name.clone());
        }

        let user = self
            .client
            .get::<ApiUser, _, _>("/user", None::<&()>)
            .await
            .map_err(|error| map_octocrab_error("authenticated user", &error))?;
        let login = ApiUser::into_login(Some(user));
        if login.is_empty() {
            return Err(TrackerError::Api {
                message: "authenticated user has no login".to_owned(),
            });
        }
        Ok(self.bot_name.get_or_init(|| login).clone())
    }
}
