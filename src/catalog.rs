//! Product catalog client.
//!
//! Thin blocking wrapper over the DummyJSON-style catalog REST API. The
//! pipeline only consumes product titles from it, to mark which aggregated
//! products were enriched; a failed call is reported to the caller and the
//! aggregation results stand on their own.

use crate::error::Errors;

use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://dummyjson.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One catalog entry as returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogProduct {
    pub id: u64,
    pub title: String,
    pub price: f64,
}

#[derive(Debug, Deserialize)]
struct ProductPage {
    products: Vec<CatalogProduct>,
    total: u64,
}

#[derive(Debug, Deserialize)]
struct SearchResults {
    products: Vec<CatalogProduct>,
}

pub struct CatalogClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new() -> Result<Self, Errors> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Points the client at a different catalog host, used by tests.
    pub fn with_base_url(base_url: &str) -> Result<Self, Errors> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches one page of the catalog. Returns the page plus the total
    /// number of products the service holds.
    pub fn fetch_products(
        &self,
        limit: u32,
        skip: u32,
    ) -> Result<(Vec<CatalogProduct>, u64), Errors> {
        let page: ProductPage = self
            .http
            .get(format!("{}/products", self.base_url))
            .query(&[("limit", limit), ("skip", skip)])
            .send()?
            .error_for_status()?
            .json()?;
        Ok((page.products, page.total))
    }

    /// Fetches a single product by its catalog id.
    pub fn fetch_product_by_id(&self, id: u64) -> Result<CatalogProduct, Errors> {
        let product = self
            .http
            .get(format!("{}/products/{}", self.base_url, id))
            .send()?
            .error_for_status()?
            .json()?;
        Ok(product)
    }

    /// Free-text search over the catalog.
    pub fn search_products(&self, query: &str) -> Result<Vec<CatalogProduct>, Errors> {
        let results: SearchResults = self
            .http
            .get(format!("{}/products/search", self.base_url))
            .query(&[("q", query)])
            .send()?
            .error_for_status()?
            .json()?;
        Ok(results.products)
    }
}
