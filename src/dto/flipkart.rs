//! Wire format of the Flipkart affiliate API.
//!
//! Only the fields the importer consumes are modelled; unknown keys are
//! ignored. Optional fields stay optional here and are validated when a
//! [`ProductEntry`] is turned into a [`ListedProduct`].

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::listing::{ListedProduct, join_offers};
use crate::domain::types::{
    CategoryKey, DiscountPercentage, ExternalProductId, ImageUrl, ListingUrl, ProductPrice,
    ProductTitle, ProductUrl, SellerRating, TypeConstraintError,
};

/// API version whose listing URLs are used.
pub const LISTING_API_VERSION: &str = "v1.1.0";
/// Image size variant stored locally.
pub const IMAGE_VARIANT: &str = "400x400";

/// Problems turning a decoded categories document into listing URLs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("category `{0}` has no v1.1.0 get url")]
    MissingVariant(String),
    #[error(transparent)]
    Invalid(#[from] TypeConstraintError),
}

/// Body of the categories endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesResponse {
    pub api_groups: ApiGroups,
}

#[derive(Debug, Deserialize)]
pub struct ApiGroups {
    pub affiliate: AffiliateApiGroup,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateApiGroup {
    pub api_listings: BTreeMap<String, ApiListing>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiListing {
    pub available_variants: BTreeMap<String, ApiVariant>,
}

#[derive(Debug, Deserialize)]
pub struct ApiVariant {
    pub get: Option<String>,
}

impl CategoriesResponse {
    /// Map every category to its listing URL.
    ///
    /// A single category without a usable URL invalidates the whole document.
    pub fn into_listings(self) -> Result<BTreeMap<CategoryKey, ListingUrl>, FeedError> {
        let mut listings = BTreeMap::new();
        for (key, listing) in self.api_groups.affiliate.api_listings {
            let url = listing
                .available_variants
                .get(LISTING_API_VERSION)
                .and_then(|variant| variant.get.clone())
                .ok_or_else(|| FeedError::MissingVariant(key.clone()))?;
            listings.insert(CategoryKey::new(key)?, ListingUrl::new(url)?);
        }
        Ok(listings)
    }
}

/// Body of a per-category listing.
///
/// Products are kept as raw JSON so that one malformed entry does not fail
/// the whole listing.
#[derive(Debug, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<serde_json::Value>,
}

/// One product of a listing.
#[derive(Debug, Deserialize)]
pub struct ProductEntry {
    #[serde(rename = "productBaseInfoV1")]
    pub base_info: ProductBaseInfo,
    #[serde(rename = "productShippingInfoV1", default)]
    pub shipping_info: Option<ProductShippingInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBaseInfo {
    pub product_id: Option<String>,
    pub title: Option<String>,
    pub product_description: Option<String>,
    #[serde(default)]
    pub image_urls: BTreeMap<String, String>,
    pub category_path: Option<String>,
    pub maximum_retail_price: Option<Price>,
    pub flipkart_selling_price: Option<Price>,
    pub flipkart_special_price: Option<Price>,
    pub product_url: Option<String>,
    pub product_brand: Option<String>,
    pub in_stock: Option<bool>,
    pub cod_available: Option<bool>,
    pub discount_percentage: Option<f64>,
    pub offers: Option<Vec<String>>,
    pub attributes: Option<ProductAttributes>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Price {
    pub amount: Option<f64>,
    pub currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductAttributes {
    pub size: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductShippingInfo {
    pub seller_name: Option<String>,
    pub seller_average_rating: Option<f64>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn price_amount(price: Option<&Price>) -> Result<Option<ProductPrice>, TypeConstraintError> {
    price
        .and_then(|p| p.amount)
        .map(ProductPrice::new)
        .transpose()
}

impl TryFrom<ProductEntry> for ListedProduct {
    type Error = TypeConstraintError;

    fn try_from(entry: ProductEntry) -> Result<Self, Self::Error> {
        let mut base = entry.base_info;
        let shipping = entry.shipping_info.unwrap_or_default();
        let attributes = base.attributes.take().unwrap_or_default();

        let image_url = non_blank(base.image_urls.remove(IMAGE_VARIANT))
            .map(ImageUrl::new)
            .transpose()?;
        let product_url = non_blank(base.product_url)
            .map(ProductUrl::new)
            .transpose()?;

        Ok(Self {
            external_id: ExternalProductId::new(base.product_id.unwrap_or_default())?,
            title: ProductTitle::new(base.title.unwrap_or_default())?,
            description: base.product_description,
            image_url,
            category_path: base.category_path,
            currency: base
                .maximum_retail_price
                .as_ref()
                .and_then(|p| p.currency.clone()),
            maximum_retail_price: price_amount(base.maximum_retail_price.as_ref())?,
            selling_price: price_amount(base.flipkart_selling_price.as_ref())?,
            special_price: price_amount(base.flipkart_special_price.as_ref())?,
            product_url,
            brand: base.product_brand,
            in_stock: base.in_stock,
            cod_available: base.cod_available,
            discount_percentage: base
                .discount_percentage
                .map(DiscountPercentage::new)
                .transpose()?,
            offers: base.offers.as_deref().map(join_offers),
            size: attributes.size,
            color: attributes.color,
            seller_name: shipping.seller_name,
            seller_rating: shipping
                .seller_average_rating
                .map(SellerRating::new)
                .transpose()?,
        })
    }
}
