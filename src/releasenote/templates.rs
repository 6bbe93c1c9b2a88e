//! Advisory comment texts.
//!
//! Stale-comment cleanup finds earlier advisories by substring, so these
//! texts must not change between releases. Label names are interpolated from
//! [`ReleaseNoteLabel`] to keep the wording in step with the label family.

use std::sync::LazyLock;

use crate::github::locator::IssueNumber;

use super::labels::ReleaseNoteLabel;

const GUIDE_URL: &str = "https://github.com/kubernetes/community/blob/master/contributors/devel/pull-requests.md#write-release-notes-if-needed";

/// Posted when a pull request lacks a release note.
pub static NEEDED_NOTICE: LazyLock<String> = LazyLock::new(|| {
    format!(
        "Adding {} because the release note process has not been followed.",
        ReleaseNoteLabel::Needed
    )
});

/// Detail accompanying [`NEEDED_NOTICE`].
pub static NEEDED_GUIDANCE: LazyLock<String> = LazyLock::new(|| {
    format!(
        "One of the following labels is required \"{}\", \"{}\", or \"{}\".\nPlease see: {GUIDE_URL}.",
        ReleaseNoteLabel::Note,
        ReleaseNoteLabel::ActionRequired,
        ReleaseNoteLabel::None
    )
});

/// Reply to the retired `/release-note` and `/release-note-action-required`
/// commands.
pub static DEPRECATED_COMMAND_NOTICE: LazyLock<String> = LazyLock::new(|| {
    format!(
        "the `/{}` and `/{}` commands have been deprecated.\nPlease edit the `{}` block in the PR body text to include the release note. If the release note requires additional action include the string `action required` in the release note. For example:\n````\n```{}\nSome release note with action required.\n```\n````",
        ReleaseNoteLabel::Note,
        ReleaseNoteLabel::ActionRequired,
        ReleaseNoteLabel::Note,
        ReleaseNoteLabel::Note
    )
});

/// Posted on a cherry-pick whose parents carry no release note.
pub static PARENT_NOTICE: LazyLock<String> = LazyLock::new(|| {
    format!(
        "All 'parent' PRs of a cherry-pick PR must have one of the \"{}\" or \"{}\" labels, or this PR must follow the standard/parent release note labeling requirement.",
        ReleaseNoteLabel::Note,
        ReleaseNoteLabel::ActionRequired
    )
});

/// Reply when someone other than the author or an org member asks for
/// the none label.
pub static NONE_REQUIRES_MEMBERSHIP: LazyLock<String> = LazyLock::new(|| {
    format!(
        "you can only set the release note label to {} if you are the PR author or an org member.",
        ReleaseNoteLabel::None
    )
});

/// Reply when the body still holds a release note.
pub static NONE_REQUIRES_EMPTY_BLOCK: LazyLock<String> = LazyLock::new(|| {
    format!(
        "you can only set the release note label to {} if the {} block in the PR body text is empty or \"none\".",
        ReleaseNoteLabel::None,
        ReleaseNoteLabel::Note
    )
});

/// Names the cherry-pick parents that lack a release note.
#[must_use]
pub fn noteless_parents_detail(parents: &[IssueNumber]) -> String {
    let listed: Vec<String> = parents.iter().map(ToString::to_string).collect();
    format!(
        "The following parent PRs have neither the \"{}\" nor the \"{}\" labels: {}.",
        ReleaseNoteLabel::Note,
        ReleaseNoteLabel::ActionRequired,
        listed.join(", ")
    )
}

/// Advisory texts whose comments are retracted once the release note
/// settles.
#[must_use]
pub fn stale_markers() -> Vec<String> {
    vec![
        NEEDED_NOTICE.clone(),
        DEPRECATED_COMMAND_NOTICE.clone(),
        PARENT_NOTICE.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn needed_notice_names_the_needed_label() {
        assert_eq!(
            NEEDED_NOTICE.as_str(),
            "Adding do-not-merge/release-note-label-needed because the release note process has not been followed."
        );
    }

    #[rstest]
    fn parent_detail_lists_numbers_in_order() {
        let parents = [
            IssueNumber::new(12).expect("positive"),
            IssueNumber::new(7).expect("positive"),
        ];
        assert_eq!(
            noteless_parents_detail(&parents),
            "The following parent PRs have neither the \"release-note\" nor the \"release-note-action-required\" labels: #12, #7."
        );
    }

    #[rstest]
    fn deprecated_notice_names_both_commands() {
        assert!(
            DEPRECATED_COMMAND_NOTICE
                .starts_with("the `/release-note` and `/release-note-action-required` commands")
        );
        assert!(DEPRECATED_COMMAND_NOTICE.contains("```release-note\n"));
    }

    #[rstest]
    fn three_markers_are_retractable() {
        let markers = stale_markers();
        assert_eq!(markers.len(), 3);
        assert!(markers.contains(&*PARENT_NOTICE));
    }
}
