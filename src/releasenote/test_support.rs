//! In-memory issue tracker that records every call.
//!
//! Holds labels and comments for issues in a single repository, keyed by
//! number, and applies writes so a scenario can observe the resulting state.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::github::error::TrackerError;
use crate::github::gateway::IssueTracker;
use crate::github::locator::IssueLocator;
use crate::github::models::{IssueComment, Label, StaleCommentPredicate};

/// One call made against the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCall {
    /// Membership lookup.
    IsOrgMember {
        /// Organisation queried.
        org: String,
        /// User queried.
        user: String,
    },
    /// Comment posted.
    CreateComment {
        /// Issue number.
        issue: u64,
        /// Comment text.
        body: String,
    },
    /// Label added.
    AddLabel {
        /// Issue number.
        issue: u64,
        /// Label name.
        label: String,
    },
    /// Label removed.
    RemoveLabel {
        /// Issue number.
        issue: u64,
        /// Label name.
        label: String,
    },
    /// Labels listed.
    Labels {
        /// Issue number.
        issue: u64,
    },
    /// Comments listed.
    Comments {
        /// Issue number.
        issue: u64,
    },
    /// Comment deleted as stale.
    DeleteComment {
        /// Issue number.
        issue: u64,
        /// Comment identifier.
        id: u64,
    },
    /// Bot login requested.
    BotName,
}

/// Operations that can be made to fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FailurePoint {
    /// Listing labels on the given issue.
    Labels(u64),
    /// Listing comments on any issue.
    Comments,
    /// Posting any comment.
    CreateComment,
    /// Adding any label.
    AddLabel,
    /// Removing the named label.
    RemoveLabel(String),
    /// Deleting the comment with this identifier.
    DeleteComment(u64),
    /// Membership lookups.
    IsOrgMember,
    /// Fetching the bot login.
    BotName,
}

#[derive(Debug, Default)]
struct TrackerState {
    labels: HashMap<u64, Vec<Label>>,
    comments: HashMap<u64, Vec<IssueComment>>,
    members: HashSet<String>,
    failures: HashSet<FailurePoint>,
    calls: Vec<TrackerCall>,
    next_comment_id: u64,
}

/// Recording tracker for scenario tests.
#[derive(Debug)]
pub struct RecordingTracker {
    bot_name: String,
    state: Mutex<TrackerState>,
}

impl Default for RecordingTracker {
    fn default() -> Self {
        Self::new("release-bot")
    }
}

impl RecordingTracker {
    /// Creates an empty tracker acting as `bot_name`.
    #[must_use]
    pub fn new(bot_name: &str) -> Self {
        Self {
            bot_name: bot_name.to_owned(),
            state: Mutex::new(TrackerState {
                next_comment_id: 1,
                ..TrackerState::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds the labels on an issue.
    #[must_use]
    pub fn with_labels(self, issue: u64, names: &[&str]) -> Self {
        self.state()
            .labels
            .insert(issue, names.iter().copied().map(Label::new).collect());
        self
    }

    /// Seeds a comment on an issue, returning the tracker.
    #[must_use]
    pub fn with_comment(self, issue: u64, author: &str, body: &str) -> Self {
        {
            let mut state = self.state();
            let id = state.next_comment_id;
            state.next_comment_id += 1;
            state.comments.entry(issue).or_default().push(IssueComment {
                id,
                body: body.to_owned(),
                author: author.to_owned(),
                html_url: None,
            });
        }
        self
    }

    /// Makes `user` an organisation member.
    #[must_use]
    pub fn with_member(self, user: &str) -> Self {
        self.state().members.insert(user.to_owned());
        self
    }

    /// Makes an operation fail from now on.
    #[must_use]
    pub fn failing(self, point: FailurePoint) -> Self {
        self.state().failures.insert(point);
        self
    }

    /// Current label names on an issue.
    #[must_use]
    pub fn label_names(&self, issue: u64) -> Vec<String> {
        self.state()
            .labels
            .get(&issue)
            .map(|labels| labels.iter().map(|label| label.name.clone()).collect())
            .unwrap_or_default()
    }

    /// Current comments on an issue.
    #[must_use]
    pub fn comments_on(&self, issue: u64) -> Vec<IssueComment> {
        self.state()
            .comments
            .get(&issue)
            .cloned()
            .unwrap_or_default()
    }

    /// Every call made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<TrackerCall> {
        self.state().calls.clone()
    }

    /// Bodies of comments posted during the run, in order.
    #[must_use]
    pub fn posted_comments(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                TrackerCall::CreateComment { body, .. } => Some(body),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: TrackerCall, point: Option<FailurePoint>) -> Result<(), TrackerError> {
        let mut state = self.state();
        state.calls.push(call);
        match point {
            Some(failure) if state.failures.contains(&failure) => Err(TrackerError::Api {
                message: format!("injected failure: {failure:?}"),
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl IssueTracker for RecordingTracker {
    async fn is_org_member(&self, org: &str, user: &str) -> Result<bool, TrackerError> {
        self.record(
            TrackerCall::IsOrgMember {
                org: org.to_owned(),
                user: user.to_owned(),
            },
            Some(FailurePoint::IsOrgMember),
        )?;
        Ok(self.state().members.contains(user))
    }

    async fn create_comment(&self, issue: &IssueLocator, body: &str) -> Result<(), TrackerError> {
        let number = issue.number().get();
        self.record(
            TrackerCall::CreateComment {
                issue: number,
                body: body.to_owned(),
            },
            Some(FailurePoint::CreateComment),
        )?;
        let mut state = self.state();
        let id = state.next_comment_id;
        state.next_comment_id += 1;
        state.comments.entry(number).or_default().push(IssueComment {
            id,
            body: body.to_owned(),
            author: self.bot_name.clone(),
            html_url: None,
        });
        Ok(())
    }

    async fn add_label(&self, issue: &IssueLocator, label: &str) -> Result<(), TrackerError> {
        let number = issue.number().get();
        self.record(
            TrackerCall::AddLabel {
                issue: number,
                label: label.to_owned(),
            },
            Some(FailurePoint::AddLabel),
        )?;
        let mut state = self.state();
        let labels = state.labels.entry(number).or_default();
        if !labels.iter().any(|existing| existing.is(label)) {
            labels.push(Label::new(label));
        }
        Ok(())
    }

    async fn remove_label(&self, issue: &IssueLocator, label: &str) -> Result<(), TrackerError> {
        let number = issue.number().get();
        self.record(
            TrackerCall::RemoveLabel {
                issue: number,
                label: label.to_owned(),
            },
            Some(FailurePoint::RemoveLabel(label.to_owned())),
        )?;
        if let Some(labels) = self.state().labels.get_mut(&number) {
            labels.retain(|existing| !existing.is(label));
        }
        Ok(())
    }

    async fn labels(&self, issue: &IssueLocator) -> Result<Vec<Label>, TrackerError> {
        let number = issue.number().get();
        self.record(
            TrackerCall::Labels { issue: number },
            Some(FailurePoint::Labels(number)),
        )?;
        Ok(self.state().labels.get(&number).cloned().unwrap_or_default())
    }

    async fn comments(&self, issue: &IssueLocator) -> Result<Vec<IssueComment>, TrackerError> {
        let number = issue.number().get();
        self.record(
            TrackerCall::Comments { issue: number },
            Some(FailurePoint::Comments),
        )?;
        Ok(self.comments_on(number))
    }

    async fn delete_stale_comments(
        &self,
        issue: &IssueLocator,
        comments: &[IssueComment],
        is_stale: &StaleCommentPredicate,
    ) -> Result<(), TrackerError> {
        let number = issue.number().get();
        let mut first_error = None;
        for comment in comments.iter().filter(|comment| is_stale.is_stale(comment)) {
            let outcome = self.record(
                TrackerCall::DeleteComment {
                    issue: number,
                    id: comment.id,
                },
                Some(FailurePoint::DeleteComment(comment.id)),
            );
            if let Err(error) = outcome {
                first_error.get_or_insert(error);
                continue;
            }
            if let Some(stored) = self.state().comments.get_mut(&number) {
                stored.retain(|existing| existing.id != comment.id);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    async fn bot_name(&self) -> Result<String, TrackerError> {
        self.record(TrackerCall::BotName, Some(FailurePoint::BotName))?;
        Ok(self.bot_name.clone())
    }
}
