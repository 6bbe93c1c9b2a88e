//! Release-note labelling.
//!
//! Pure helpers extract and classify the note block, parse slash commands,
//! and format replies. [`LineagePolicy`] decides whether a cherry-pick is
//! exempt from the process, and [`ReleaseNoteReconciler`] applies the
//! resulting label decisions through an
//! [`IssueTracker`](crate::github::IssueTracker).

pub mod command;
pub mod error;
pub mod labels;
pub mod lineage;
pub mod model;
pub mod note;
pub mod reconcile;
pub mod response;
pub mod templates;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use command::{CherrypickReference, NoteCommand, cherrypick_references, contains_none_command};
pub use error::{LabelRemovalError, ReleaseNoteError};
pub use labels::{ReleaseNoteLabel, release_note_settled};
pub use lineage::LineagePolicy;
pub use model::{
    CommentAction, CommentEvent, IssueCommentEvent, IssueView, PullRequestAction,
    PullRequestEvent, PullRequestView,
};
pub use note::{ReleaseNoteOutcome, extract_release_note};
pub use reconcile::{DEFAULT_TRUNK_BRANCH, ReleaseNoteReconciler, ReleaseNoteSettings};
pub use response::{format_comment_response, format_response};
