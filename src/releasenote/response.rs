//! Layout of the comments the bot posts.

const ABOUT_THIS_BOT: &str = "I manage release-note labels from the `release-note` block in the PR description. If you have questions or suggestions related to my behavior, please file an issue against this repository.";

/// Addresses `message` to `login`, folding `reason` into a details block.
#[must_use]
pub fn format_response(login: &str, message: &str, reason: &str) -> String {
    format!("@{login}: {message}\n\n<details>\n\n{reason}\n\n{ABOUT_THIS_BOT}\n</details>")
}

/// Replies to a comment, quoting it so readers see what triggered the reply.
#[must_use]
pub fn format_comment_response(
    login: &str,
    comment_body: &str,
    comment_url: Option<&str>,
    reply: &str,
) -> String {
    let quoted: Vec<String> = comment_body.split('\n').map(|line| format!(">{line}")).collect();
    let reason = format!(
        "In response to [this]({}):\n\n{}\n",
        comment_url.unwrap_or_default(),
        quoted.join("\n")
    );
    format_response(login, reply, &reason)
}
