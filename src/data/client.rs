//! Upstream inventory API client
//!
//! This module provides the client that talks to the hosting provider's order
//! endpoint. Both listings (regions, per-region products) come from the same
//! GET endpoint, selected by query parameters, authenticated with a session
//! cookie captured from a logged-in browser.
//!
//! The public fetch surface deliberately never fails: transport errors, non-2xx
//! statuses and unexpected response shapes are logged and collapsed into an
//! empty listing. Combined with the cache rule that an empty payload is never
//! valid, an upstream hiccup simply means the next read tries again.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{error, warn};

use super::{Product, Region};
use crate::config::Config;

/// Query parameters selecting the region listing
const REGION_QUERY: [(&str, &str); 4] =
    [("c", "ajax"), ("dt", "pglist"), ("rt", "json"), ("p1", "6")];

/// Errors that can occur when fetching upstream listings
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (transport error or non-2xx status)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body was not the expected JSON array of records
    #[error("upstream returned a non-array response; the session cookie may have expired")]
    UnexpectedShape,
}

/// Source of region and product listings
///
/// The cache facade and the refresh scheduler depend on this trait rather than
/// on [`UpstreamClient`] directly, so tests can substitute a scripted source.
/// Implementations own their failure handling: a fetch that cannot produce
/// data returns an empty vec.
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Fetches the full region list
    async fn fetch_regions(&self) -> Vec<Region>;

    /// Fetches the product list for one region
    async fn fetch_products(&self, region_id: &str) -> Vec<Product>;
}

/// Client for the hosting provider's inventory/pricing endpoint
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
    cookie: String,
}

impl UpstreamClient {
    /// Creates a new client for the given endpoint and session cookie
    ///
    /// An empty cookie is accepted: requests are still attempted and a warning
    /// is logged per fetch, since the provider will most likely answer with a
    /// login page instead of JSON.
    pub fn new(base_url: impl Into<String>, cookie: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            cookie: cookie.into(),
        }
    }

    /// Creates a client from the application configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_url.clone(), config.cookie.clone())
    }

    /// Creates a client with a custom reqwest client (e.g. custom timeouts)
    #[allow(dead_code)]
    pub fn with_client(client: Client, base_url: impl Into<String>, cookie: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            cookie: cookie.into(),
        }
    }

    /// Returns true if a session cookie is configured
    pub fn has_credential(&self) -> bool {
        !self.cookie.is_empty()
    }

    /// Issues the listing request and parses the JSON array body
    ///
    /// # Arguments
    /// * `query` - Query parameters selecting the listing
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The parsed records
    /// * `Err(FetchError)` - On transport failure, non-2xx status, or a body
    ///   that is not a JSON array
    async fn request_listing<T: DeserializeOwned>(
        &self,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, FetchError> {
        if !self.has_credential() {
            warn!("no session cookie configured; the upstream request will likely be rejected");
        }

        let mut request = self
            .client
            .get(&self.base_url)
            .query(query)
            .header("accept", "application/json, text/javascript, */*; q=0.01")
            .header("x-requested-with", "XMLHttpRequest")
            .header("referer", format!("{}?c=order&ptype=6", self.base_url));

        if self.has_credential() {
            request = request.header("cookie", &self.cookie);
        }

        let response = request.send().await?.error_for_status()?;
        let body = response.text().await?;

        parse_listing(&body)
    }
}

/// Parses a response body expected to be a JSON array of records
///
/// The provider answers with an HTML login page (or a JSON object carrying an
/// error) once the session cookie goes stale; both collapse into
/// [`FetchError::UnexpectedShape`].
pub fn parse_listing<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, FetchError> {
    serde_json::from_str::<Vec<T>>(body).map_err(|_| FetchError::UnexpectedShape)
}

#[async_trait]
impl<S: InventorySource + ?Sized> InventorySource for std::sync::Arc<S> {
    async fn fetch_regions(&self) -> Vec<Region> {
        (**self).fetch_regions().await
    }

    async fn fetch_products(&self, region_id: &str) -> Vec<Product> {
        (**self).fetch_products(region_id).await
    }
}

#[async_trait]
impl InventorySource for UpstreamClient {
    async fn fetch_regions(&self) -> Vec<Region> {
        match self.request_listing(&REGION_QUERY).await {
            Ok(regions) => regions,
            Err(err) => {
                error!("failed to fetch region list: {err}");
                Vec::new()
            }
        }
    }

    async fn fetch_products(&self, region_id: &str) -> Vec<Product> {
        if region_id.is_empty() {
            warn!("product fetch requested without a region id");
            return Vec::new();
        }

        let query = [
            ("c", "ajax"),
            ("dt", "product"),
            ("id", "-1"),
            ("p1", region_id),
            ("p2", "all"),
            ("rt", "json"),
        ];

        match self.request_listing(&query).await {
            Ok(products) => products,
            Err(err) => {
                error!("failed to fetch products for region {region_id}: {err}");
                Vec::new()
            }
        }
    }
}
