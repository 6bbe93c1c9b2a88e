//! The release-note label family.

use std::fmt;

use crate::github::models::Label;

/// Labels the reconciler manages on a pull request.
///
/// At most one of them should be present once a run completes; the
/// deprecated spelling of the needed label is only ever removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseNoteLabel {
    /// The pull request carries a user-facing release note.
    Note,
    /// The pull request needs no release note.
    None,
    /// The release note asks users to take action.
    ActionRequired,
    /// The release note process has not been followed yet.
    Needed,
    /// Older spelling of [`Self::Needed`].
    DeprecatedNeeded,
}

impl ReleaseNoteLabel {
    /// Every label in the family, in removal order.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::ActionRequired,
        Self::DeprecatedNeeded,
        Self::Needed,
        Self::Note,
    ];

    /// The GitHub label name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Note => "release-note",
            Self::None => "release-note-none",
            Self::ActionRequired => "release-note-action-required",
            Self::Needed => "do-not-merge/release-note-label-needed",
            Self::DeprecatedNeeded => "release-note-label-needed",
        }
    }

    /// Whether the label records a completed release note decision.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Note | Self::None | Self::ActionRequired)
    }

    /// Whether the label appears in `labels`, ignoring case.
    #[must_use]
    pub fn is_present(self, labels: &[Label]) -> bool {
        labels.iter().any(|label| label.is(self.as_str()))
    }
}

impl fmt::Display for ReleaseNoteLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether any settled label is already on the pull request.
#[must_use]
pub fn release_note_settled(labels: &[Label]) -> bool {
    ReleaseNoteLabel::ALL
        .into_iter()
        .filter(|label| label.is_settled())
        .any(|label| label.is_present(labels))
}
