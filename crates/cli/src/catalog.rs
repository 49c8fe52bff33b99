//! Product catalog API client.
//!
//! Talks to the catalog service's REST endpoints:
//! - `GET {api_url}/products?limit=N` - one page of products in relevance order
//! - `GET {api_url}/products/{id}` - a single product
//!
//! Responses are cached in memory via `moka` (5 minute TTL). The cache lives
//! only as long as the process, so each `cartwheel` invocation starts cold.

use std::sync::Arc;
use std::time::Duration;

use cartwheel_core::{CatalogPage, Product, ProductId};
use moka::future::Cache;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CACHE_TTL: Duration = Duration::from_mins(5);

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The service answered with a non-success status.
    #[error("Catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The configured base URL cannot have path segments appended.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

/// Cache key for catalog responses.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Page { limit: usize },
    Product(ProductId),
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Page(CatalogPage),
    Product(Box<Product>),
}

/// Client for the product catalog service.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: Url) -> Result<Self, CatalogError> {
        let cache = Cache::builder()
            .max_capacity(256)
            .time_to_live(CACHE_TTL)
            .build();

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url,
                cache,
            }),
        })
    }

    /// Fetch the first page of products, at most `limit` long.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn fetch_page(&self, limit: usize) -> Result<CatalogPage, CatalogError> {
        let key = CacheKey::Page { limit };
        if let Some(CacheValue::Page(page)) = self.inner.cache.get(&key).await {
            debug!("Catalog page cache hit");
            return Ok(page);
        }

        let mut url = self.endpoint(&["products"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());

        let page: CatalogPage = self.get_json(url, "products").await?;
        debug!(products = page.products.len(), "Fetched catalog page");

        self.inner
            .cache
            .insert(key, CacheValue::Page(page.clone()))
            .await;
        Ok(page)
    }

    /// Fetch one product snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown products, or another
    /// error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn fetch_product(&self, id: &ProductId) -> Result<Product, CatalogError> {
        let key = CacheKey::Product(id.clone());
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!("Product cache hit");
            return Ok(*product);
        }

        let url = self.endpoint(&["products", id.as_str()])?;
        let product: Product = self.get_json(url, &format!("product {id}")).await?;

        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// Build an endpoint URL under the configured base.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T, CatalogError> {
        let response = self
            .inner
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;
        decode(status, &body, what)
    }
}

/// Turn a catalog response into a value or a typed error.
fn decode<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
    what: &str,
) -> Result<T, CatalogError> {
    if status == StatusCode::NOT_FOUND {
        return Err(CatalogError::NotFound(what.to_string()));
    }

    if !status.is_success() {
        tracing::error!(
            status = %status,
            body = %body.chars().take(500).collect::<String>(),
            "Catalog API returned non-success status"
        );
        return Err(CatalogError::Status {
            status: status.as_u16(),
            body: body.chars().take(200).collect(),
        });
    }

    serde_json::from_str(body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %body.chars().take(500).collect::<String>(),
            "Failed to parse catalog response"
        );
        CatalogError::Parse(e)
    })
}
