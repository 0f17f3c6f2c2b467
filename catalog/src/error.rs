use reqwest::{StatusCode, Url};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Catalog base URL {0} must be an absolute http(s) URL")]
    InvalidBaseUrl(String),

    #[error("Invalid identifier {0:?}")]
    InvalidIdentifier(String),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: Url, status: StatusCode },

    #[error("Response from {url} was not valid JSON: {source}")]
    Decode {
        url: Url,
        #[source]
        source: serde_json::Error,
    },

    #[error("Building HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
