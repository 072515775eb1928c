// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Any failure while fetching a single page. The collector treats every
/// variant the same way: stop paginating this indicator.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("malformed JSON body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Problems loading a user supplied indicator catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("reading catalog {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("catalog contains no indicators")]
    Empty,

    #[error("catalog entry #{index} has an empty {field}")]
    BlankField { index: usize, field: &'static str },

    #[error("catalog entry #{index} reuses the label {label:?}")]
    DuplicateLabel { index: usize, label: String },
}
