use reqwest::{StatusCode, Url};
use serde_json::Value;
use tracing::{event, instrument, Level};

use crate::{
    error::{Error, Result},
    identifier::{check_segment, Identifier},
    normalize::is_empty_document,
};

pub const DEFAULT_CATALOG_URL: &str = "https://pokeapi.co/api/v2";

const USER_AGENT: &str = concat!("pokedex-proxy/", env!("CARGO_PKG_VERSION"));

/// Talks to the upstream catalog. Every call is a single GET; nothing is
/// retried or cached.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Result<CatalogClient> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<CatalogClient> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https") && !u.cannot_be_a_base())
            .ok_or_else(|| Error::InvalidBaseUrl(base_url.to_string()))?;

        Ok(CatalogClient { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Fetch one page of the species index. The body is returned as-is.
    #[instrument(skip(self))]
    pub async fn fetch_list(&self, limit: u64, offset: u64) -> Result<Option<Value>> {
        let mut url = self.endpoint(&["pokemon"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());

        self.get_document(url).await
    }

    #[instrument(skip(self, identifier), fields(identifier = %identifier))]
    pub async fn fetch_entry(&self, identifier: &Identifier) -> Result<Option<Value>> {
        let url = self.endpoint(&["pokemon", identifier.path_segment()])?;
        self.get_document(url).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_ability(&self, name: &str) -> Result<Option<Value>> {
        check_segment(name)?;
        let name = name.to_ascii_lowercase();
        let url = self.endpoint(&["ability", name.as_str()])?;
        self.get_document(url).await
    }

    /// `Ok(None)` means the catalog answered but had nothing for us: a 404, an
    /// empty body, or an empty JSON document.
    async fn get_document(&self, url: Url) -> Result<Option<Value>> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| Error::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            event!(Level::DEBUG, %url, "catalog has no record");
            return Ok(None);
        }

        if !status.is_success() {
            return Err(Error::Status { url, status });
        }

        let body = response.bytes().await.map_err(|source| Error::Transport {
            url: url.clone(),
            source,
        })?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let document: Value =
            serde_json::from_slice(&body).map_err(|source| Error::Decode { url, source })?;

        if is_empty_document(&document) {
            Ok(None)
        } else {
            Ok(Some(document))
        }
    }
}
