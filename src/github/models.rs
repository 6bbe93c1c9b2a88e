//! Data models for labels and issue comments.

use serde::Deserialize;

/// A label attached to an issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Label name as GitHub reports it.
    pub name: String,
}

impl Label {
    /// Creates a label with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Compares the label name case-insensitively, as GitHub does.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Issue comment details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueComment {
    /// Comment identifier.
    pub id: u64,
    /// Comment body; empty when GitHub omits it.
    pub body: String,
    /// Author login; empty when the account was deleted.
    pub author: String,
    /// HTML URL for linking back to the comment.
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiLabel {
    pub(crate) name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiComment {
    pub(crate) id: u64,
    pub(crate) body: Option<String>,
    pub(crate) user: Option<ApiUser>,
    pub(crate) html_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUser {
    pub(crate) login: Option<String>,
}

impl ApiUser {
    pub(crate) fn into_login(user: Option<Self>) -> String {
        user.and_then(|value| value.login).unwrap_or_default()
    }
}

impl From<ApiLabel> for Label {
    fn from(value: ApiLabel) -> Self {
        Self { name: value.name }
    }
}

impl From<ApiComment> for IssueComment {
    fn from(value: ApiComment) -> Self {
        Self {
            id: value.id,
            body: value.body.unwrap_or_default(),
            author: ApiUser::into_login(value.user),
            html_url: value.html_url,
        }
    }
}

/// Identifies comments a bot previously posted that are safe to retract.
///
/// A comment is stale when the bot authored it and its body contains one of
/// the marker texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleCommentPredicate {
    author: String,
    markers: Vec<String>,
}

impl StaleCommentPredicate {
    /// Creates a predicate matching comments by `author` containing any of
    /// `markers`.
    #[must_use]
    pub const fn new(author: String, markers: Vec<String>) -> Self {
        Self { author, markers }
    }

    /// Returns true when the comment should be deleted.
    #[must_use]
    pub fn is_stale(&self, comment: &IssueComment) -> bool {
        comment.author == self.author
            && self
                .markers
                .iter()
                .any(|marker| comment.body.contains(marker.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{IssueComment, Label, StaleCommentPredicate};

    fn comment(author: &str, body: &str) -> IssueComment {
        IssueComment {
            id: 1,
            body: body.to_owned(),
            author: author.to_owned(),
            html_url: None,
        }
    }

    #[rstest]
    fn label_comparison_ignores_case() {
        assert!(Label::new("Release-Note").is("release-note"));
        assert!(!Label::new("release-note-none").is("release-note"));
    }

    #[rstest]
    #[case::bot_with_marker("bot", "prefix MARKER suffix", true)]
    #[case::bot_without_marker("bot", "/retest", false)]
    #[case::human_with_marker("alice", "MARKER", false)]
    #[case::other_marker("bot", "SECOND", true)]
    fn staleness_needs_author_and_marker(
        #[case] author: &str,
        #[case] body: &str,
        #[case] expected: bool,
    ) {
        let predicate = StaleCommentPredicate::new(
            "bot".to_owned(),
            vec!["MARKER".to_owned(), "SECOND".to_owned()],
        );

        assert_eq!(predicate.is_stale(&comment(author, body)), expected);
    }
}
