//! Validated view of a single product from a marketplace listing.

use chrono::NaiveDateTime;

use crate::domain::product::NewAffiliateProduct;
use crate::domain::types::{
    DiscountPercentage, ExternalProductId, ImageUrl, ProductPrice, ProductStatus, ProductTitle,
    ProductUrl, SellerRating, UserId,
};

/// Product as reported by the marketplace, after validation.
///
/// Only the external id and title are mandatory. Every other field is `None`
/// when the marketplace omitted it, so updates can skip it instead of
/// blanking the stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct ListedProduct {
    pub external_id: ExternalProductId,
    pub title: ProductTitle,
    pub description: Option<String>,
    pub image_url: Option<ImageUrl>,
    pub category_path: Option<String>,
    pub currency: Option<String>,
    pub maximum_retail_price: Option<ProductPrice>,
    pub selling_price: Option<ProductPrice>,
    pub special_price: Option<ProductPrice>,
    pub product_url: Option<ProductUrl>,
    pub brand: Option<String>,
    pub in_stock: Option<bool>,
    pub cod_available: Option<bool>,
    pub discount_percentage: Option<DiscountPercentage>,
    /// Offers joined with `,`.
    pub offers: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub seller_name: Option<String>,
    pub seller_rating: Option<SellerRating>,
}

impl ListedProduct {
    /// Build an active record owned by `owner_id` with every field mapped.
    pub fn into_new_product(self, owner_id: UserId, now: NaiveDateTime) -> NewAffiliateProduct {
        NewAffiliateProduct {
            owner_id,
            external_id: self.external_id,
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            category_path: self.category_path,
            currency: self.currency,
            maximum_retail_price: self.maximum_retail_price,
            selling_price: self.selling_price,
            special_price: self.special_price,
            product_url: self.product_url,
            brand: self.brand,
            in_stock: self.in_stock.unwrap_or(false),
            cod_available: self.cod_available.unwrap_or(false),
            discount_percentage: self.discount_percentage,
            offers: self.offers.unwrap_or_default(),
            size: self.size,
            color: self.color,
            seller_name: self.seller_name,
            seller_rating: self.seller_rating,
            status: ProductStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Join marketplace offers the way they are stored locally.
pub fn join_offers<S: AsRef<str>>(offers: &[S]) -> String {
    offers
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}
