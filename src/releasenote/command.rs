//! Comment commands and cherry-pick references.

use std::sync::LazyLock;

use regex::Regex;

use crate::github::locator::IssueNumber;

#[expect(clippy::expect_used, reason = "command names are literals")]
fn command_line(command: &str) -> Regex {
    Regex::new(&format!(r"(?mi)^/{command}\s*$")).expect("command pattern should compile")
}

static NOTE_COMMAND: LazyLock<Regex> = LazyLock::new(|| command_line("release-note"));
static NONE_COMMAND: LazyLock<Regex> = LazyLock::new(|| command_line("release-note-none"));
static ACTION_REQUIRED_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| command_line("release-note-action-required"));

#[expect(clippy::expect_used, reason = "pattern is a literal")]
static CHERRY_PICK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Cherry pick of #([[:digit:]]+) on release-([[:digit:]]+\.[[:digit:]]+).")
        .expect("cherry-pick pattern should compile")
});

/// A release-note command found on its own line in a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteCommand {
    /// `/release-note-none`.
    None,
    /// `/release-note`, retired in favour of the body block.
    DeprecatedNote,
    /// `/release-note-action-required`, retired in favour of the body block.
    DeprecatedActionRequired,
}

impl NoteCommand {
    /// Finds the command in a comment body. When several commands appear the
    /// note command wins, then none, then action-required.
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        [
            (&*NOTE_COMMAND, Self::DeprecatedNote),
            (&*NONE_COMMAND, Self::None),
            (&*ACTION_REQUIRED_COMMAND, Self::DeprecatedActionRequired),
        ]
        .into_iter()
        .find(|(pattern, _)| pattern.is_match(body))
        .map(|(_, command)| command)
    }

    /// Whether the command has been retired.
    #[must_use]
    pub const fn is_deprecated(self) -> bool {
        matches!(self, Self::DeprecatedNote | Self::DeprecatedActionRequired)
    }
}

/// Whether any comment issues `/release-note-none`.
#[must_use]
pub fn contains_none_command<'a>(bodies: impl IntoIterator<Item = &'a str>) -> bool {
    bodies.into_iter().any(|body| NONE_COMMAND.is_match(body))
}

/// A `Cherry pick of #N on release-X.Y` line in a pull request body. Any
/// one character must follow the version, usually a period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CherrypickReference {
    /// The pull request being cherry-picked.
    pub parent: IssueNumber,
    /// The release branch version, such as `1.4`.
    pub release: String,
}

/// Collects every cherry-pick reference in body order, one per matching
/// line. Lines whose number does not parse are skipped.
#[must_use]
pub fn cherrypick_references(body: &str) -> Vec<CherrypickReference> {
    body.split('\n')
        .filter_map(|line| CHERRY_PICK.captures(line))
        .filter_map(|captures| {
            let parent = captures
                .get(1)?
                .as_str()
                .parse::<u64>()
                .ok()
                .and_then(|number| IssueNumber::new(number).ok())?;
            let release = captures.get(2)?.as_str().to_owned();
            Some(CherrypickReference { parent, release })
        })
        .collect()
}
