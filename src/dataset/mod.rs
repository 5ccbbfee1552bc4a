//! Dataset loading.
//!
//! A dataset is one JSON document shaped as a [`RawNode`] tree. Loading is a
//! single read or GET with no retry: failures surface as
//! [`TreemapError::DatasetFetch`], [`TreemapError::DatasetRead`] or
//! [`TreemapError::DatasetParse`] and nothing downstream runs.

use std::fmt;
use std::path::PathBuf;

use tracing::debug;

use crate::core::RawNode;
use crate::error::{TreemapError, TreemapResult};

/// Published movie-sales dataset.
pub const DEFAULT_DATASET_URL: &str =
    "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/movie-data.json";

/// Where a dataset document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Url(String),
    File(PathBuf),
    Inline(String),
}

impl Default for DatasetSource {
    fn default() -> Self {
        Self::Url(DEFAULT_DATASET_URL.to_owned())
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "url:{url}"),
            Self::File(path) => write!(f, "file:{}", path.display()),
            Self::Inline(body) => write!(f, "inline:{} bytes", body.len()),
        }
    }
}

/// Parses a dataset document.
pub fn parse_dataset(body: &str) -> TreemapResult<RawNode> {
    serde_json::from_str(body).map_err(|err| TreemapError::DatasetParse(err.to_string()))
}

/// Reads or fetches `source` and parses it into a raw tree.
pub fn load_dataset(source: &DatasetSource) -> TreemapResult<RawNode> {
    let body = match source {
        DatasetSource::Url(url) => fetch_text(url)?,
        DatasetSource::File(path) => {
            std::fs::read_to_string(path).map_err(|source| TreemapError::DatasetRead {
                path: path.clone(),
                source,
            })?
        }
        DatasetSource::Inline(body) => body.clone(),
    };
    debug!(source = %source, bytes = body.len(), "dataset loaded");
    parse_dataset(&body)
}

#[cfg(feature = "fetch")]
fn fetch_text(url: &str) -> TreemapResult<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(None::<std::time::Duration>)
        .build()
        .map_err(|err| TreemapError::DatasetFetch(format!("client setup: {err}")))?;
    client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(|err| TreemapError::DatasetFetch(format!("GET {url}: {err}")))
}

#[cfg(not(feature = "fetch"))]
fn fetch_text(url: &str) -> TreemapResult<String> {
    Err(TreemapError::DatasetFetch(format!(
        "cannot fetch {url}: built without the `fetch` feature"
    )))
}
