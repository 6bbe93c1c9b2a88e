//! Shared HTTP utilities for the tracker implementation.

/// Reads the `message` field GitHub puts in JSON error bodies.
pub(super) fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}
