use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use crate::domain::types::{CategoryKey, ListingUrl};
use crate::marketplace::{AffiliateApi, MarketplaceError, MarketplaceResult};

/// In-memory marketplace used for unit tests.
///
/// Listings registered with [`StubMarketplace::with_failing_category`] answer
/// with HTTP 503.
#[derive(Default)]
pub struct StubMarketplace {
    categories: BTreeMap<CategoryKey, ListingUrl>,
    listings: HashMap<String, Vec<serde_json::Value>>,
    categories_unavailable: bool,
    requested: RefCell<Vec<String>>,
}

impl StubMarketplace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, key: &str, products: Vec<serde_json::Value>) -> Self {
        let url = Self::listing_url(key);
        self.categories.insert(
            CategoryKey::new(key).unwrap(),
            ListingUrl::new(url.clone()).unwrap(),
        );
        self.listings.insert(url, products);
        self
    }

    pub fn with_failing_category(mut self, key: &str) -> Self {
        self.categories.insert(
            CategoryKey::new(key).unwrap(),
            ListingUrl::new(Self::listing_url(key)).unwrap(),
        );
        self
    }

    pub fn without_categories_endpoint(mut self) -> Self {
        self.categories_unavailable = true;
        self
    }

    /// Listing URLs requested so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }

    fn listing_url(key: &str) -> String {
        format!("https://affiliate-api.example.com/feeds/{key}.json")
    }
}

impl AffiliateApi for StubMarketplace {
    fn fetch_categories(&self) -> MarketplaceResult<BTreeMap<CategoryKey, ListingUrl>> {
        if self.categories_unavailable {
            return Err(MarketplaceError::Status {
                url: "https://affiliate-api.example.com/categories.json".into(),
                status: 401,
            });
        }
        Ok(self.categories.clone())
    }

    fn fetch_products(
        &self,
        listing_url: &ListingUrl,
    ) -> MarketplaceResult<Vec<serde_json::Value>> {
        self.requested.borrow_mut().push(listing_url.to_string());
        self.listings
            .get(listing_url.as_str())
            .cloned()
            .ok_or_else(|| MarketplaceError::Status {
                url: listing_url.to_string(),
                status: 503,
            })
    }
}
