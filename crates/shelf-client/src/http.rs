//! [`Catalog`] over HTTP with reqwest.

use crate::error::{FetchError, Result};
use crate::product::{Product, ProductPage};
use crate::{Catalog, FetchFuture};
use reqwest::Url;

/// Public demo catalog the browser points at unless configured otherwise.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Catalog client for a `dummyjson`-style product service.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCatalog {
    /// Creates a client for the service rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client reusing an existing reqwest client.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self> {
        let invalid = |reason: String| FetchError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {:?}", parsed.scheme())));
        }
        if parsed.cannot_be_a_base() {
            return Err(invalid("URL cannot carry a path".to_string()));
        }
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// The base URL requests are built from.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET {base}/products?skip={offset}&limit={limit}`
    pub fn page_url(&self, offset: usize, limit: usize) -> Url {
        let mut url = self.endpoint(&["products"]);
        url.query_pairs_mut()
            .append_pair("skip", &offset.to_string())
            .append_pair("limit", &limit.to_string());
        url
    }

    /// `GET {base}/products/search?q={text}`, with `text` URL-encoded.
    pub fn search_url(&self, text: &str) -> Url {
        let mut url = self.endpoint(&["products", "search"]);
        url.query_pairs_mut().append_pair("q", text);
        url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        // Checked in the constructor: the base URL can carry a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Issues one GET and returns the `products` array.
async fn get_products(client: reqwest::Client, url: Url) -> Result<Vec<Product>> {
    tracing::debug!(%url, "fetching products");

    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.bytes().await?;
    let page: ProductPage = serde_json::from_slice(&body)?;
    tracing::debug!(%url, count = page.products.len(), "products received");
    Ok(page.products)
}

impl Catalog for HttpCatalog {
    fn fetch_page(&self, offset: usize, limit: usize) -> FetchFuture {
        Box::pin(get_products(self.client.clone(), self.page_url(offset, limit)))
    }

    fn search(&self, text: &str) -> FetchFuture {
        Box::pin(get_products(self.client.clone(), self.search_url(text)))
    }
}
