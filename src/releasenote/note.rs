//! Release-note block extraction and classification.

use std::sync::LazyLock;

use regex::Regex;

use super::labels::ReleaseNoteLabel;

/// Matches the first release-note fence, either the bare fence following a
/// `Release note**:` heading (optionally after an HTML comment) or a fence
/// tagged `release-note`.
#[expect(clippy::expect_used, reason = "pattern is a literal")]
static NOTE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)(?:Release note\*\*:\s*(?:<!--[^<>]*-->\s*)?```(?:release-note)?|```release-note)(.+?)```",
    )
    .expect("release note pattern should compile")
});

/// What a pull request's release note block asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseNoteOutcome {
    /// No block, or an empty one.
    Needed,
    /// The block says `none`.
    None,
    /// The block mentions `action required`.
    ActionRequired,
    /// Any other note.
    Standard,
}

impl ReleaseNoteOutcome {
    /// Classifies extracted note text. Total over all inputs.
    #[must_use]
    pub fn classify(note: &str) -> Self {
        let normalised = note.trim().to_lowercase();
        match normalised.as_str() {
            "" => Self::Needed,
            "none" => Self::None,
            text if text.contains("action required") => Self::ActionRequired,
            _ => Self::Standard,
        }
    }

    /// Classifies the release note found in a pull request body.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        Self::classify(&extract_release_note(body))
    }

    /// The label this outcome maps to.
    #[must_use]
    pub const fn label(self) -> ReleaseNoteLabel {
        match self {
            Self::Needed => ReleaseNoteLabel::Needed,
            Self::None => ReleaseNoteLabel::None,
            Self::ActionRequired => ReleaseNoteLabel::ActionRequired,
            Self::Standard => ReleaseNoteLabel::Note,
        }
    }

    /// Whether the outcome carries a real release note.
    #[must_use]
    pub const fn has_note(self) -> bool {
        matches!(self, Self::Standard | Self::ActionRequired)
    }
}

/// Returns the trimmed contents of the first release-note block, or an empty
/// string when the body has none.
#[must_use]
pub fn extract_release_note(body: &str) -> String {
    NOTE_BLOCK
        .captures(body)
        .and_then(|captures| captures.get(1))
        .map(|note| note.as_str().trim().to_owned())
        .unwrap_or_default()
}
