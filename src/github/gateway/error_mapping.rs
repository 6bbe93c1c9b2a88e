//! Error mapping helpers for the Octocrab tracker implementation.

use http::StatusCode;

use crate::github::error::TrackerError;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> TrackerError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return map_http_error(operation, source.status_code, Some(source.message.clone()));
    }

    if is_network_error(error) {
        return TrackerError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    TrackerError::Api {
        message: format!("{operation} failed: {error}"),
    }
}

pub(super) fn map_http_error(
    operation: &str,
    status: StatusCode,
    maybe_message: Option<String>,
) -> TrackerError {
    let message = maybe_message.unwrap_or_else(|| "unknown error".to_owned());
    if is_auth_failure(status) {
        TrackerError::Authentication {
            message: format!("{operation} failed: GitHub returned {status} {message}"),
        }
    } else {
        TrackerError::Api {
            message: format!("{operation} failed with status {status}: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use rstest::rstest;

    use super::map_http_error;
    use crate::github::error::TrackerError;

    #[rstest]
    #[case::unauthorised(StatusCode::UNAUTHORIZED)]
    #[case::forbidden(StatusCode::FORBIDDEN)]
    fn auth_statuses_map_to_authentication(#[case] status: StatusCode) {
        let error = map_http_error("add label", status, Some("Bad credentials".to_owned()));

        assert!(
            matches!(error, TrackerError::Authentication { ref message } if message.contains("Bad credentials")),
            "got {error:?}"
        );
    }

    #[rstest]
    fn other_statuses_map_to_api_errors() {
        let error = map_http_error("list labels", StatusCode::UNPROCESSABLE_ENTITY, None);

        assert_eq!(
            error,
            TrackerError::Api {
                message: "list labels failed with status 422 Unprocessable Entity: unknown error"
                    .to_owned(),
            }
        );
    }
}
