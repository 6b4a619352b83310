use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;

use crate::domain::settings::AffiliateCredentials;
use crate::domain::types::{AffiliateId, CategoryKey, ListingUrl};
use crate::dto::flipkart::{CategoriesResponse, ProductsResponse};
use crate::marketplace::{AffiliateApi, MarketplaceError, MarketplaceResult};

const AFFILIATE_ID_HEADER: HeaderName = HeaderName::from_static("fk-affiliate-id");
const AFFILIATE_TOKEN_HEADER: HeaderName = HeaderName::from_static("fk-affiliate-token");

/// URL of the categories directory for `affiliate_id`.
pub fn categories_url(api_base_url: &str, affiliate_id: &AffiliateId) -> String {
    format!(
        "{}/affiliate/api/{}.json",
        api_base_url.trim_end_matches('/'),
        affiliate_id
    )
}

/// Blocking client for the Flipkart affiliate API.
///
/// Credentials are attached to every request as default headers. Calls are
/// never retried.
pub struct FlipkartClient {
    http: Client,
    categories_url: String,
}

impl FlipkartClient {
    pub fn new(
        credentials: &AffiliateCredentials,
        api_base_url: &str,
        timeout: Duration,
    ) -> MarketplaceResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AFFILIATE_ID_HEADER,
            HeaderValue::from_str(credentials.affiliate_id.as_str())
                .map_err(|e| MarketplaceError::Client(format!("affiliate id header: {e}")))?,
        );
        let mut token = HeaderValue::from_str(credentials.token.expose())
            .map_err(|e| MarketplaceError::Client(format!("affiliate token header: {e}")))?;
        token.set_sensitive(true);
        headers.insert(AFFILIATE_TOKEN_HEADER, token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| MarketplaceError::Client(e.to_string()))?;

        Ok(Self {
            http,
            categories_url: categories_url(api_base_url, &credentials.affiliate_id),
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> MarketplaceResult<T> {
        log::debug!("GET {url}");

        let response =
            self.http
                .get(url)
                .send()
                .map_err(|source| MarketplaceError::Transport {
                    url: url.to_string(),
                    source,
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketplaceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|source| MarketplaceError::Transport {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_str(&body).map_err(|source| MarketplaceError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

impl AffiliateApi for FlipkartClient {
    fn fetch_categories(&self) -> MarketplaceResult<BTreeMap<CategoryKey, ListingUrl>> {
        let response: CategoriesResponse = self.get_json(&self.categories_url)?;
        let listings = response.into_listings()?;
        log::info!("Fetched {} categories from flipkart", listings.len());
        Ok(listings)
    }

    fn fetch_products(
        &self,
        listing_url: &ListingUrl,
    ) -> MarketplaceResult<Vec<serde_json::Value>> {
        let response: ProductsResponse = self.get_json(listing_url.as_str())?;
        Ok(response.products)
    }
}
