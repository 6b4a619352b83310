use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    AffiliateProduct as DomainAffiliateProduct, NewAffiliateProduct as DomainNewAffiliateProduct,
};
use crate::domain::types::{
    DiscountPercentage, ExternalProductId, ImageUrl, ProductPrice, ProductStatus, ProductTitle,
    ProductUrl, SellerRating, TypeConstraintError,
};
use crate::domain::update_policy::ProductChanges;

/// Diesel model representing the `affiliates_products` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::affiliates_products)]
pub struct AffiliateProduct {
    pub id: i32,
    pub owner_id: i32,
    pub external_id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_path: Option<String>,
    pub currency: Option<String>,
    pub maximum_retail_price: Option<f64>,
    pub selling_price: Option<f64>,
    pub special_price: Option<f64>,
    pub product_url: Option<String>,
    pub brand: Option<String>,
    pub in_stock: bool,
    pub cod_available: bool,
    pub discount_percentage: Option<f64>,
    pub offers: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub seller_name: Option<String>,
    pub seller_rating: Option<f64>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`AffiliateProduct`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::affiliates_products)]
pub struct NewAffiliateProduct {
    pub owner_id: i32,
    pub external_id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category_path: Option<String>,
    pub currency: Option<String>,
    pub maximum_retail_price: Option<f64>,
    pub selling_price: Option<f64>,
    pub special_price: Option<f64>,
    pub product_url: Option<String>,
    pub brand: Option<String>,
    pub in_stock: bool,
    pub cod_available: bool,
    pub discount_percentage: Option<f64>,
    pub offers: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub seller_name: Option<String>,
    pub seller_rating: Option<f64>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update of an [`AffiliateProduct`]; `None` columns are left as they are.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::affiliates_products)]
pub struct AffiliateProductChangeset {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub currency: Option<String>,
    pub maximum_retail_price: Option<f64>,
    pub selling_price: Option<f64>,
    pub special_price: Option<f64>,
    pub product_url: Option<String>,
    pub in_stock: Option<bool>,
    pub cod_available: Option<bool>,
    pub discount_percentage: Option<f64>,
    pub offers: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub seller_name: Option<String>,
    pub seller_rating: Option<f64>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<AffiliateProduct> for DomainAffiliateProduct {
    type Error = TypeConstraintError;

    fn try_from(product: AffiliateProduct) -> Result<Self, Self::Error> {
        Ok(Self {
            id: product.id.try_into()?,
            owner_id: product.owner_id.try_into()?,
            external_id: ExternalProductId::new(product.external_id)?,
            title: ProductTitle::new(product.title)?,
            description: product.description,
            image_url: product.image_url.map(ImageUrl::new).transpose()?,
            category_path: product.category_path,
            currency: product.currency,
            maximum_retail_price: product
                .maximum_retail_price
                .map(ProductPrice::new)
                .transpose()?,
            selling_price: product.selling_price.map(ProductPrice::new).transpose()?,
            special_price: product.special_price.map(ProductPrice::new).transpose()?,
            product_url: product.product_url.map(ProductUrl::new).transpose()?,
            brand: product.brand,
            in_stock: product.in_stock,
            cod_available: product.cod_available,
            discount_percentage: product
                .discount_percentage
                .map(DiscountPercentage::new)
                .transpose()?,
            offers: product.offers,
            size: product.size,
            color: product.color,
            seller_name: product.seller_name,
            seller_rating: product.seller_rating.map(SellerRating::new).transpose()?,
            status: ProductStatus::try_from(product.status)?,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}

impl From<DomainNewAffiliateProduct> for NewAffiliateProduct {
    fn from(product: DomainNewAffiliateProduct) -> Self {
        Self {
            owner_id: product.owner_id.get(),
            external_id: product.external_id.into_inner(),
            title: product.title.into_inner(),
            description: product.description,
            image_url: product.image_url.map(ImageUrl::into_inner),
            category_path: product.category_path,
            currency: product.currency,
            maximum_retail_price: product.maximum_retail_price.map(ProductPrice::get),
            selling_price: product.selling_price.map(ProductPrice::get),
            special_price: product.special_price.map(ProductPrice::get),
            product_url: product.product_url.map(ProductUrl::into_inner),
            brand: product.brand,
            in_stock: product.in_stock,
            cod_available: product.cod_available,
            discount_percentage: product.discount_percentage.map(DiscountPercentage::get),
            offers: product.offers,
            size: product.size,
            color: product.color,
            seller_name: product.seller_name,
            seller_rating: product.seller_rating.map(SellerRating::get),
            status: product.status.into(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl AffiliateProductChangeset {
    /// Build the changeset for `changes`, stamping `updated_at` with `now`.
    pub fn new(changes: &ProductChanges, now: NaiveDateTime) -> Self {
        Self {
            title: changes.title.as_ref().map(|t| t.as_str().to_string()),
            description: changes.description.clone(),
            image_url: changes.image_url.as_ref().map(|u| u.as_str().to_string()),
            currency: changes.currency.clone(),
            maximum_retail_price: changes.maximum_retail_price.map(ProductPrice::get),
            selling_price: changes.selling_price.map(ProductPrice::get),
            special_price: changes.special_price.map(ProductPrice::get),
            product_url: changes.product_url.as_ref().map(|u| u.as_str().to_string()),
            in_stock: changes.in_stock,
            cod_available: changes.cod_available,
            discount_percentage: changes.discount_percentage.map(DiscountPercentage::get),
            offers: changes.offers.clone(),
            size: changes.size.clone(),
            color: changes.color.clone(),
            seller_name: changes.seller_name.clone(),
            seller_rating: changes.seller_rating.map(SellerRating::get),
            updated_at: now,
        }
    }
}
