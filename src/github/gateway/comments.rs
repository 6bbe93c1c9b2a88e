//! Paginated listing helpers shared by the tracker operations.

use octocrab::{Octocrab, Page};
use serde::de::DeserializeOwned;

use crate::github::error::TrackerError;

use super::error_mapping::map_octocrab_error;

/// Fetches the first page at `path` and follows every subsequent page.
pub(super) async fn fetch_all_pages<T>(
    client: &Octocrab,
    path: &str,
    operation: &str,
) -> Result<Vec<T>, TrackerError>
where
    T: DeserializeOwned,
{
    let page = client
        .get::<Page<T>, _, _>(path, None::<&()>)
        .await
        .map_err(|error| map_octocrab_error(operation, &error))?;

    client
        .all_pages(page)
        .await
        .map_err(|error| map_octocrab_error(operation, &error))
}
