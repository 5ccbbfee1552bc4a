use std::path::PathBuf;

use thiserror::Error;

pub type TreemapResult<T> = Result<T, TreemapError>;

#[derive(Debug, Error)]
pub enum TreemapError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("dataset fetch failed: {0}")]
    DatasetFetch(String),

    #[error("dataset parse failed: {0}")]
    DatasetParse(String),

    #[error("failed to read dataset `{}`: {source}", path.display())]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
