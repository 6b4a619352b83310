//! Access to the affiliate marketplace API.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::types::{CategoryKey, ListingUrl};
use crate::dto::flipkart::FeedError;

pub mod flipkart;
#[cfg(test)]
pub mod test;

/// Errors raised while talking to the marketplace.
#[derive(Debug, Error)]
pub enum MarketplaceError {
    #[error("http client setup failed: {0}")]
    Client(String),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
    #[error("unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid categories document: {0}")]
    Feed(#[from] FeedError),
}

/// Convenient alias for marketplace results.
pub type MarketplaceResult<T> = Result<T, MarketplaceError>;

/// Read operations of the marketplace API used by the importer.
pub trait AffiliateApi {
    /// Fetch every category together with its product listing URL.
    fn fetch_categories(&self) -> MarketplaceResult<BTreeMap<CategoryKey, ListingUrl>>;
    /// Fetch the raw product entries of one category listing.
    fn fetch_products(&self, listing_url: &ListingUrl)
    -> MarketplaceResult<Vec<serde_json::Value>>;
}
