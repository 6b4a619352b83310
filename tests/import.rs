use std::collections::BTreeMap;
use std::ops::ControlFlow;

use affiliates_flipkart::domain::types::{CategoryKey, ExternalProductId, ListingUrl, UserId};
use affiliates_flipkart::domain::update_policy::{UpdateToggle, UpdateToggles};
use affiliates_flipkart::marketplace::{AffiliateApi, MarketplaceError, MarketplaceResult};
use affiliates_flipkart::repository::{AffiliateProductReader, DieselRepository, ProductListQuery};
use affiliates_flipkart::services::import::run_import;
use serde_json::json;

mod common;

/// Marketplace serving fixed listings keyed by listing URL.
struct FixtureApi {
    listings: BTreeMap<String, Vec<serde_json::Value>>,
}

impl FixtureApi {
    fn new(listings: &[(&str, Vec<serde_json::Value>)]) -> Self {
        Self {
            listings: listings
                .iter()
                .map(|(key, products)| (Self::url(key), products.clone()))
                .collect(),
        }
    }

    fn url(key: &str) -> String {
        format!("https://affiliate-api.example.com/feeds/{key}.json")
    }
}

impl AffiliateApi for FixtureApi {
    fn fetch_categories(&self) -> MarketplaceResult<BTreeMap<CategoryKey, ListingUrl>> {
        Ok(self
            .listings
            .keys()
            .map(|url| {
                let key = url
                    .trim_start_matches("https://affiliate-api.example.com/feeds/")
                    .trim_end_matches(".json");
                (
                    CategoryKey::new(key).unwrap(),
                    ListingUrl::new(url.as_str()).unwrap(),
                )
            })
            .collect())
    }

    fn fetch_products(
        &self,
        listing_url: &ListingUrl,
    ) -> MarketplaceResult<Vec<serde_json::Value>> {
        self.listings
            .get(listing_url.as_str())
            .cloned()
            .ok_or_else(|| MarketplaceError::Status {
                url: listing_url.to_string(),
                status: 404,
            })
    }
}

fn product(id: &str, title: &str, in_stock: bool) -> serde_json::Value {
    json!({
        "productBaseInfoV1": {
            "productId": id,
            "title": title,
            "maximumRetailPrice": { "amount": 999.0, "currency": "INR" },
            "inStock": in_stock,
            "codAvailable": true,
            "offers": ["Bank offer", "Exchange"],
            "attributes": { "size": "M", "color": "Blue" }
        },
        "productShippingInfoV1": { "sellerName": "RetailNet" }
    })
}

fn import(api: &FixtureApi, repo: &DieselRepository, toggles: UpdateToggles) {
    let report = run_import(
        None,
        &toggles,
        UserId::new(1).unwrap(),
        api,
        repo,
        |_| ControlFlow::Continue(()),
    )
    .expect("import should run");
    assert!(report.is_success());
}

#[test]
fn repeated_import_does_not_duplicate_products() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let api = FixtureApi::new(&[
        ("bags", vec![product("BAG1", "Tote", true)]),
        (
            "shirts",
            vec![product("SHIRT1", "Oxford", true), product("SHIRT2", "Polo", false)],
        ),
    ]);

    import(&api, &repo, UpdateToggles::only(UpdateToggle::FullContent));
    import(&api, &repo, UpdateToggles::only(UpdateToggle::FullContent));

    let (total, products) = repo
        .list_products(ProductListQuery::default())
        .expect("should list products");
    assert_eq!(total, 3);
    assert!(products.iter().all(|p| p.offers == "Bank offer,Exchange"));
}

#[test]
fn availability_update_reaches_the_database() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let before = FixtureApi::new(&[("shirts", vec![product("SHIRT1", "Oxford", true)])]);
    import(&before, &repo, UpdateToggles::default());

    let after = FixtureApi::new(&[("shirts", vec![product("SHIRT1", "Oxford Renamed", false)])]);
    import(&after, &repo, UpdateToggles::only(UpdateToggle::Available));

    let stored = repo
        .find_product_by_external_id(&ExternalProductId::new("SHIRT1").unwrap())
        .expect("lookup should succeed")
        .expect("product should exist");
    assert!(!stored.in_stock);
    assert_eq!(stored.title.as_str(), "Oxford");
    assert_eq!(stored.seller_name.as_deref(), Some("RetailNet"));
}
