//! Client for the remote product catalog.
//!
//! Two read-only queries are supported, each a single HTTP GET with no
//! caching, retry or timeout:
//!
//! | Query | Request |
//! |-------|---------|
//! | [`Catalog::fetch_page`] | `GET {base}/products?skip={offset}&limit={limit}` |
//! | [`Catalog::search`] | `GET {base}/products/search?q={text}` |
//!
//! Both return the `products` array of the response body. The [`Catalog`]
//! trait is the seam the UI depends on; [`HttpCatalog`] is the real
//! implementation.

pub mod error;
pub mod http;
pub mod product;

pub use error::{FetchError, Result};
pub use http::{HttpCatalog, DEFAULT_BASE_URL};
pub use product::{Product, ProductPage};

use futures::future::BoxFuture;

/// Future returned by every [`Catalog`] query.
///
/// `'static` so it can be handed straight to the runtime and spawned.
pub type FetchFuture = BoxFuture<'static, Result<Vec<Product>>>;

/// A source of product records.
pub trait Catalog: Send + Sync + 'static {
    /// Fetch `limit` products starting after the first `offset`.
    fn fetch_page(&self, offset: usize, limit: usize) -> FetchFuture;

    /// Full-text search. Callers never pass an empty string.
    fn search(&self, text: &str) -> FetchFuture;
}
