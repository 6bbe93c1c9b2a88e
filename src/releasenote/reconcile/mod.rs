//! Keeps release-note labels and advisory comments in step with each event.
//!
//! Both entry points re-derive the wanted label from scratch, so running
//! either twice against the same state changes nothing the second time.

use crate::github::gateway::IssueTracker;
use crate::github::locator::IssueLocator;
use crate::github::models::{IssueComment, Label, StaleCommentPredicate};

use super::command::{NoteCommand, contains_none_command};
use super::error::{LabelRemovalError, ReleaseNoteError};
use super::labels::{ReleaseNoteLabel, release_note_settled};
use super::lineage::LineagePolicy;
use super::model::{
    CommentAction, IssueCommentEvent, IssueView, PullRequestAction, PullRequestEvent,
    PullRequestView,
};
use super::note::ReleaseNoteOutcome;
use super::response::{format_comment_response, format_response};
use super::templates::{
    DEPRECATED_COMMAND_NOTICE, NEEDED_GUIDANCE, NEEDED_NOTICE, NONE_REQUIRES_EMPTY_BLOCK,
    NONE_REQUIRES_MEMBERSHIP, stale_markers,
};

/// Default development branch name.
pub const DEFAULT_TRUNK_BRANCH: &str = "master";

/// Repository policy knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseNoteSettings {
    /// Pull requests into this branch always need a release note decision.
    pub trunk_branch: String,
}

impl Default for ReleaseNoteSettings {
    fn default() -> Self {
        Self {
            trunk_branch: DEFAULT_TRUNK_BRANCH.to_owned(),
        }
    }
}

/// Applies release-note decisions through an [`IssueTracker`].
pub struct ReleaseNoteReconciler<'client, Tracker>
where
    Tracker: IssueTracker,
{
    tracker: &'client Tracker,
    settings: ReleaseNoteSettings,
}

impl<'client, Tracker> ReleaseNoteReconciler<'client, Tracker>
where
    Tracker: IssueTracker,
{
    /// Creates a reconciler using the provided tracker.
    #[must_use]
    pub const fn new(tracker: &'client Tracker, settings: ReleaseNoteSettings) -> Self {
        Self { tracker, settings }
    }

    fn lineage(&self) -> LineagePolicy<'_, Tracker> {
        LineagePolicy::new(self.tracker, &self.settings.trunk_branch)
    }

    /// Handles a comment on a pull request.
    ///
    /// `/release-note-none` from the author or an organisation member sets
    /// the none label when the body carries no release note. Retired
    /// commands get a deprecation notice. Other comments are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseNoteError::Tracker`] when the membership check, a
    /// reply, or adding the none label fails.
    pub async fn handle_comment(&self, event: &IssueCommentEvent) -> Result<(), ReleaseNoteError> {
        let IssueCommentEvent { issue, comment } = event;
        if !issue.is_pull_request || comment.action != CommentAction::Created {
            return Ok(());
        }

        let Some(command) = NoteCommand::parse(&comment.body) else {
            return Ok(());
        };

        if command.is_deprecated() {
            tracing::info!("{} used a retired release-note command", issue.issue);
            return self.reply(event, &DEPRECATED_COMMAND_NOTICE).await;
        }

        let is_member = self
            .tracker
            .is_org_member(issue.issue.owner().as_str(), &comment.author)
            .await
            .map_err(ReleaseNoteError::tracker(
                "check organisation membership",
                &issue.issue,
            ))?;

        if !is_member && !issue.is_author(&comment.author) {
            return self.reply(event, &NONE_REQUIRES_MEMBERSHIP).await;
        }

        if ReleaseNoteOutcome::from_body(&issue.body).has_note() {
            return self.reply(event, &NONE_REQUIRES_EMPTY_BLOCK).await;
        }

        self.settle_none(issue).await
    }

    async fn settle_none(&self, issue: &IssueView) -> Result<(), ReleaseNoteError> {
        let label = ReleaseNoteLabel::None;
        if !label.is_present(&issue.labels) {
            tracing::info!("adding {label} to {}", issue.issue);
            self.tracker
                .add_label(&issue.issue, label.as_str())
                .await
                .map_err(ReleaseNoteError::tracker("add label", &issue.issue))?;
        }

        if let Err(error) = self
            .remove_other_labels(&issue.issue, label, &issue.labels)
            .await
        {
            tracing::error!("{}: {error}", issue.issue);
        }
        Ok(())
    }

    async fn reply(&self, event: &IssueCommentEvent, text: &str) -> Result<(), ReleaseNoteError> {
        let comment = &event.comment;
        let body = format_comment_response(
            &comment.author,
            &comment.body,
            comment.html_url.as_deref(),
            text,
        );
        self.tracker
            .create_comment(&event.issue.issue, &body)
            .await
            .map_err(ReleaseNoteError::tracker("reply to comment", &event.issue.issue))
    }

    /// Handles a pull request being opened or having its body edited.
    ///
    /// Classifies the body's release note, applies the matching label,
    /// strips the rest of the family, and retracts earlier advisories once
    /// they no longer apply.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseNoteError::Tracker`] when listing labels or comments,
    /// adding the target label, looking up the bot login, or deleting stale
    /// comments fails. Failures removing other labels are logged instead.
    pub async fn handle_pull_request(
        &self,
        event: &PullRequestEvent,
    ) -> Result<(), ReleaseNoteError> {
        if !matches!(
            event.action,
            PullRequestAction::Opened | PullRequestAction::Edited
        ) {
            return Ok(());
        }
        let pr = &event.pull_request;

        let labels = self
            .tracker
            .labels(&pr.issue)
            .await
            .map_err(ReleaseNoteError::tracker("list labels", &pr.issue))?;

        let mut comments = None;
        let mut target = ReleaseNoteOutcome::from_body(&pr.body).label();
        if target == ReleaseNoteLabel::Needed {
            if !self.lineage().must_follow_process(pr, &labels, true).await {
                self.strip_needed_labels(&pr.issue, &labels).await;
                return self.clear_stale_comments(pr, &labels, comments).await;
            }

            let fetched = self
                .tracker
                .comments(&pr.issue)
                .await
                .map_err(ReleaseNoteError::tracker("list comments", &pr.issue))?;
            if contains_none_command(fetched.iter().map(|comment| comment.body.as_str())) {
                target = ReleaseNoteLabel::None;
            }
            comments = Some(fetched);
        }

        let current = if target == ReleaseNoteLabel::Needed {
            if !target.is_present(&labels) {
                self.post_needed_notice(pr).await;
            }
            labels.clone()
        } else {
            self.strip_needed_labels(&pr.issue, &labels).await
        };

        if !target.is_present(&current) {
            tracing::info!("adding {target} to {}", pr.issue);
            self.tracker
                .add_label(&pr.issue, target.as_str())
                .await
                .map_err(ReleaseNoteError::tracker("add label", &pr.issue))?;
        }

        if let Err(error) = self.remove_other_labels(&pr.issue, target, &current).await {
            tracing::error!("{}: {error}", pr.issue);
        }

        self.clear_stale_comments(pr, &labels, comments).await
    }

    async fn post_needed_notice(&self, pr: &PullRequestView) {
        let comment = format_response(&pr.author, &NEEDED_NOTICE, &NEEDED_GUIDANCE);
        if let Err(error) = self.tracker.create_comment(&pr.issue, &comment).await {
            tracing::error!("failed to comment on {} with {comment:?}: {error}", pr.issue);
        }
    }

    /// Removes both spellings of the needed label, returning the labels
    /// believed to remain.
    async fn strip_needed_labels(&self, issue: &IssueLocator, labels: &[Label]) -> Vec<Label> {
        let mut remaining = labels.to_vec();
        for needed in [ReleaseNoteLabel::Needed, ReleaseNoteLabel::DeprecatedNeeded] {
            if !needed.is_present(labels) {
                continue;
            }
            match self.tracker.remove_label(issue, needed.as_str()).await {
                Ok(()) => remaining.retain(|label| !label.is(needed.as_str())),
                Err(error) => {
                    tracing::error!("failed to remove the label \"{needed}\" from {issue}: {error}");
                }
            }
        }
        remaining
    }

    /// Removes every family label except `keep`, attempting each removal
    /// even after a failure.
    async fn remove_other_labels(
        &self,
        issue: &IssueLocator,
        keep: ReleaseNoteLabel,
        labels: &[Label],
    ) -> Result<(), LabelRemovalError> {
        let mut failures = Vec::new();
        for label in ReleaseNoteLabel::ALL {
            if label == keep || !label.is_present(labels) {
                continue;
            }
            tracing::info!("removing {label} from {issue}");
            if let Err(error) = self.tracker.remove_label(issue, label.as_str()).await {
                failures.push(error);
            }
        }
        LabelRemovalError::from_failures(failures).map_or(Ok(()), Err)
    }

    /// Deletes earlier advisories once the pull request no longer needs them.
    ///
    /// Advisories stay while the process still applies and no settled label
    /// was on the pull request when the event arrived.
    async fn clear_stale_comments(
        &self,
        pr: &PullRequestView,
        labels: &[Label],
        comments: Option<Vec<IssueComment>>,
    ) -> Result<(), ReleaseNoteError> {
        if self.lineage().must_follow_process(pr, labels, false).await
            && !release_note_settled(labels)
        {
            tracing::debug!("{} has not settled its release note; keeping advisories", pr.issue);
            return Ok(());
        }

        let bot_name = self
            .tracker
            .bot_name()
            .await
            .map_err(ReleaseNoteError::tracker("look up bot name", &pr.issue))?;

        let candidates = match comments {
            Some(fetched) => fetched,
            None => self
                .tracker
                .comments(&pr.issue)
                .await
                .map_err(ReleaseNoteError::tracker("list comments", &pr.issue))?,
        };

        let predicate = StaleCommentPredicate::new(bot_name, stale_markers());
        self.tracker
            .delete_stale_comments(&pr.issue, &candidates, &predicate)
            .await
            .map_err(ReleaseNoteError::tracker("delete stale comments", &pr.issue))
    }
}
