//! Whether a pull request must follow the release note process.
//!
//! Pull requests into the trunk always do. A cherry-pick onto a release
//! branch is exempt when every parent it names already carries a release
//! note.

use crate::github::gateway::IssueTracker;
use crate::github::locator::IssueNumber;
use crate::github::models::Label;

use super::command::cherrypick_references;
use super::labels::ReleaseNoteLabel;
use super::model::PullRequestView;
use super::response::format_response;
use super::templates::{PARENT_NOTICE, noteless_parents_detail};

/// Evaluates cherry-pick lineage against parent pull request labels.
pub struct LineagePolicy<'client, Tracker>
where
    Tracker: IssueTracker,
{
    tracker: &'client Tracker,
    trunk_branch: &'client str,
}

impl<'client, Tracker> LineagePolicy<'client, Tracker>
where
    Tracker: IssueTracker,
{
    /// Creates a policy treating `trunk_branch` as the development branch.
    #[must_use]
    pub const fn new(tracker: &'client Tracker, trunk_branch: &'client str) -> Self {
        Self {
            tracker,
            trunk_branch,
        }
    }

    /// Returns true unless the pull request is a cherry-pick whose parents
    /// all carry a release note.
    ///
    /// Parent lookups are best-effort: a parent whose labels cannot be
    /// fetched is logged and left out of the decision. With `may_comment`
    /// set, and no needed label on the pull request yet, the author is told
    /// which parents lack a note.
    pub async fn must_follow_process(
        &self,
        pr: &PullRequestView,
        labels: &[Label],
        may_comment: bool,
    ) -> bool {
        if pr.base_ref == self.trunk_branch {
            return true;
        }

        let references = cherrypick_references(&pr.body);
        if references.is_empty() {
            return true;
        }

        let mut noteless: Vec<IssueNumber> = Vec::new();
        for reference in &references {
            let parent = pr.issue.with_number(reference.parent);
            match self.tracker.labels(&parent).await {
                Ok(parent_labels) => {
                    if !has_release_note(&parent_labels) {
                        noteless.push(reference.parent);
                    }
                }
                Err(error) => {
                    tracing::error!(
                        "failed to list labels on {parent} (parent of {}): {error}",
                        pr.issue
                    );
                }
            }
        }

        if noteless.is_empty() {
            tracing::debug!("{} is a cherry-pick of noted parents; exempt", pr.issue);
            return false;
        }

        if may_comment && !ReleaseNoteLabel::Needed.is_present(labels) {
            let comment = format_response(
                &pr.author,
                &PARENT_NOTICE,
                &noteless_parents_detail(&noteless),
            );
            if let Err(error) = self.tracker.create_comment(&pr.issue, &comment).await {
                tracing::error!("failed to comment on {} about parents: {error}", pr.issue);
            }
        }
        true
    }
}

fn has_release_note(labels: &[Label]) -> bool {
    ReleaseNoteLabel::Note.is_present(labels) || ReleaseNoteLabel::ActionRequired.is_present(labels)
}
