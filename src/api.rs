//! PokeAPI client

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error};

use crate::state::{ItemDetail, ListingEntry, NamedResource};

pub const API_BASE: &str = "https://pokeapi.co/api/v2";

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    results: Vec<T>,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("could not decode {url}: {message}")]
    Decode { url: String, message: String },
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    base: String,
    http: reqwest::Client,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(API_BASE)
    }
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self {
            base,
            http: reqwest::Client::new(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn listing_url(&self, limit: u32, offset: u32) -> String {
        format!("{}/pokemon?limit={limit}&offset={offset}", self.base)
    }

    /// Full urls pass through untouched; anything else is treated as an id
    /// or name under `/pokemon`.
    pub fn item_url(&self, id_or_url: &str) -> String {
        if id_or_url.starts_with("http") {
            id_or_url.to_string()
        } else {
            format!("{}/pokemon/{id_or_url}", self.base)
        }
    }

    pub fn species_url(&self, id: &str) -> String {
        format!("{}/pokemon-species/{id}", self.base)
    }

    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
            });
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        })
    }

    pub async fn try_fetch_listing(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<ListingEntry>, ApiError> {
        let url = self.listing_url(limit, offset);
        let response: ListResponse<NamedResource> = self.fetch_json(&url).await?;
        Ok(response
            .results
            .into_iter()
            .take(limit as usize)
            .map(ListingEntry::from)
            .collect())
    }

    pub async fn try_fetch_item_detail(&self, id_or_url: &str) -> Result<ItemDetail, ApiError> {
        let url = self.item_url(id_or_url);
        self.fetch_json(&url).await
    }

    pub async fn try_fetch_all_type_names(&self) -> Result<Vec<NamedResource>, ApiError> {
        let url = format!("{}/type", self.base);
        let response: ListResponse<NamedResource> = self.fetch_json(&url).await?;
        Ok(response.results)
    }

    /// Empty on any failure. An empty page can mean either the end of the
    /// listing or a failed request.
    pub async fn fetch_listing(&self, limit: u32, offset: u32) -> Vec<ListingEntry> {
        match self.try_fetch_listing(limit, offset).await {
            Ok(entries) => entries,
            Err(err) => {
                error!(error = %err, "error fetching listing");
                Vec::new()
            }
        }
    }

    pub async fn fetch_item_detail(&self, id_or_url: &str) -> Option<ItemDetail> {
        match self.try_fetch_item_detail(id_or_url).await {
            Ok(detail) => Some(detail),
            Err(err) => {
                error!(error = %err, "error fetching item detail");
                None
            }
        }
    }

    pub async fn fetch_all_type_names(&self) -> Vec<NamedResource> {
        match self.try_fetch_all_type_names().await {
            Ok(types) => types,
            Err(err) => {
                error!(error = %err, "error fetching types");
                Vec::new()
            }
        }
    }
}
