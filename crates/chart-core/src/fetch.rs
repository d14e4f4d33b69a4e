// File: crates/chart-core/src/fetch.rs
// Summary: The single GET that loads the GDP feed.

use tracing::{debug, info};

use crate::dataset::Dataset;
use crate::error::DataLoadError;

/// Public freeCodeCamp GDP feed.
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/GDP-data.json";

/// Issue one GET to `url` and transform the body into a dataset.
/// No retry: the first failure is returned as-is.
pub async fn fetch_dataset(client: &reqwest::Client, url: &str) -> Result<Dataset, DataLoadError> {
    info!(%url, "fetching dataset");
    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(DataLoadError::Status(status));
    }
    let body = resp.bytes().await?;
    debug!(bytes = body.len(), "response received");

    let dataset = Dataset::from_json(&body)?;
    info!(
        records = dataset.len(),
        name = dataset.meta().name.as_deref().unwrap_or("-"),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Same as [`fetch_dataset`] with a default client.
pub async fn fetch_default(url: &str) -> Result<Dataset, DataLoadError> {
    fetch_dataset(&reqwest::Client::new(), url).await
}
