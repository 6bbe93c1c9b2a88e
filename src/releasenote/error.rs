//! Errors raised while reconciling release-note labels.

use thiserror::Error;

use crate::github::error::TrackerError;
use crate::github::locator::IssueLocator;

/// Failures that abort a reconciliation run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReleaseNoteError {
    /// A call the run cannot continue without failed.
    #[error("failed to {operation} on {issue}: {source}")]
    Tracker {
        /// What the reconciler was doing.
        operation: &'static str,
        /// Issue the call targeted, rendered as `owner/repo#number`.
        issue: String,
        /// Underlying tracker failure.
        source: TrackerError,
    },
}

impl ReleaseNoteError {
    pub(crate) fn tracker(
        operation: &'static str,
        issue: &IssueLocator,
    ) -> impl FnOnce(TrackerError) -> Self {
        let rendered = issue.to_string();
        move |source| Self::Tracker {
            operation,
            issue: rendered,
            source,
        }
    }
}

/// Every failure from one pass of removing stale labels. Logged by the
/// reconciler rather than returned.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error(
    "encountered {} errors setting labels: [{}]",
    .failures.len(),
    join_causes(.failures)
)]
pub struct LabelRemovalError {
    failures: Vec<TrackerError>,
}

impl LabelRemovalError {
    /// Wraps the collected failures; `None` when nothing failed.
    #[must_use]
    pub fn from_failures(failures: Vec<TrackerError>) -> Option<Self> {
        if failures.is_empty() {
            None
        } else {
            Some(Self { failures })
        }
    }
}

fn join_causes(failures: &[TrackerError]) -> String {
    let causes: Vec<String> = failures.iter().map(ToString::to_string).collect();
    causes.join("; ")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::LabelRemovalError;
    use crate::github::error::TrackerError;

    #[rstest]
    fn no_failures_is_not_an_error() {
        assert!(LabelRemovalError::from_failures(Vec::new()).is_none());
    }

    #[rstest]
    fn display_counts_and_lists_causes() {
        let error = LabelRemovalError::from_failures(vec![
            TrackerError::Network {
                message: "reset".to_owned(),
            },
            TrackerError::Api {
                message: "boom".to_owned(),
            },
        ])
        .expect("two failures");
        assert_eq!(
            error.to_string(),
            "encountered 2 errors setting labels: [network error talking to GitHub: reset; GitHub API error: boom]"
        );
    }
}
