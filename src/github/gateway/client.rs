//! Octocrab client construction for the tracker implementation.

use http::Uri;
use octocrab::Octocrab;
use url::Url;

use crate::github::error::TrackerError;
use crate::github::locator::PersonalAccessToken;

use super::error_mapping::map_octocrab_error;

/// Builds an Octocrab client for the given token and API base URL.
///
/// # Errors
///
/// Returns `TrackerError::InvalidUrl` when the base URL is not an absolute
/// HTTP(S) URL or `TrackerError::Api` when Octocrab fails to construct a
/// client.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &str,
) -> Result<Octocrab, TrackerError> {
    let parsed = Url::parse(api_base)
        .map_err(|error| TrackerError::InvalidUrl(format!("{api_base}: {error}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(TrackerError::InvalidUrl(format!(
            "{api_base}: expected an http or https URL"
        )));
    }

    let base_uri: Uri = parsed
        .as_str()
        .trim_end_matches('/')
        .parse::<Uri>()
        .map_err(|error| TrackerError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(token.as_ref())
        .base_uri(base_uri)
        .map_err(|error| TrackerError::Api {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}

/// Parses a request path into a URI for the raw Octocrab helpers.
pub(super) fn request_uri(path: &str) -> Result<Uri, TrackerError> {
    path.parse::<Uri>()
        .map_err(|error| TrackerError::InvalidUrl(format!("{path}: {error}")))
}
