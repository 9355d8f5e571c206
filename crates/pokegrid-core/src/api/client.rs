//! API client for PokeAPI.
//!
//! Raw fetches only: there is no retry logic here. Retrying and caching are
//! handled by the query layer.

use std::time::Duration;

use anyhow::{Context, Result};
use futures::future::try_join_all;
use reqwest::{header, Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{Identifier, Pokemon, PokemonDetails, PokemonListResponse};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Number of pokemon requested from the index endpoint.
/// Matches the size of the card grid.
pub const PAGE_LIMIT: usize = 12;

/// API client for PokeAPI.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone, Debug)]
pub struct PokeApiClient {
    client: Client,
    base_url: String,
}

impl PokeApiClient {
    /// Create a client for the public API with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Result<Self> {
        Self::build(config.api_base_url(), config.request_timeout())
    }

    /// Create a client against another base URL (mirrors, mock servers)
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::build(base_url, Config::default().request_timeout())
    }

    fn build(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url = url, "GET");

        let response = self.client.get(url).send().await.map_err(ApiError::from)?;
        let response = Self::check_response(response).await?;
        let text = response.text().await.map_err(ApiError::from)?;

        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    // ===== Data Fetching Methods =====

    /// Fetch the first page of pokemon, resolving every entry's detail
    /// record concurrently. Any failed request fails the whole call.
    /// Results keep the order of the index listing.
    pub async fn fetch_list(&self) -> Result<Vec<Pokemon>> {
        let result = self.fetch_list_inner().await;
        if let Err(ref e) = result {
            warn!(error = %e, "Error fetching pokemon list");
        }
        result
    }

    async fn fetch_list_inner(&self) -> Result<Vec<Pokemon>> {
        let url = format!("{}/pokemon?limit={}", self.base_url, PAGE_LIMIT);
        let list: PokemonListResponse = self.get(&url).await?;

        if list.results.len() != PAGE_LIMIT {
            warn!(
                expected = PAGE_LIMIT,
                received = list.results.len(),
                "Unexpected number of pokemon in listing"
            );
        }

        let detail_futures = list
            .results
            .iter()
            .take(PAGE_LIMIT)
            .map(|entry| self.get::<PokemonDetails>(&entry.url));

        let details = try_join_all(detail_futures).await?;
        debug!(count = details.len(), "Resolved pokemon details");

        Ok(details.into_iter().map(PokemonDetails::into_pokemon).collect())
    }

    /// Fetch a single pokemon by id or name
    pub async fn fetch_one(&self, identifier: &Identifier) -> Result<Pokemon> {
        let result = self.fetch_one_inner(identifier).await;
        if let Err(ref e) = result {
            warn!(identifier = %identifier, error = %e, "Error fetching pokemon");
        }
        result
    }

    async fn fetch_one_inner(&self, identifier: &Identifier) -> Result<Pokemon> {
        let url = self.pokemon_url(identifier)?;
        let details: PokemonDetails = self.get(url.as_str()).await?;
        Ok(details.into_pokemon())
    }

    /// `{base}/pokemon/{identifier}`, with the identifier percent-encoded
    fn pokemon_url(&self, identifier: &Identifier) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid API base URL: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("API base URL cannot have a path: {}", self.base_url))?
            .pop_if_empty()
            .push("pokemon")
            .push(&identifier.to_string());
        Ok(url)
    }
}
