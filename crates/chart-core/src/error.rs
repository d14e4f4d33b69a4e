// File: crates/chart-core/src/error.rs
// Summary: Error types for loading the feed and for mounting/rasterizing the chart.

use thiserror::Error;

/// Any failure between issuing the GET and holding a typed dataset.
/// Callers treat every variant the same way: log it and show the error message.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("record {index}: invalid date {raw:?} (expected YYYY-MM-DD)")]
    InvalidDate { index: usize, raw: String },
    #[error("record {index}: invalid value {raw:?}")]
    InvalidValue { index: usize, raw: String },
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("mount element #{0} not found")]
    MountMissing(String),
    #[error("no bar at index {index} (chart has {len})")]
    BarIndex { index: usize, len: usize },
    #[error("raster output failed: {0}")]
    Raster(String),
}
