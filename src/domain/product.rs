use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    DiscountPercentage, ExternalProductId, ImageUrl, ProductId, ProductPrice, ProductStatus,
    ProductTitle, ProductUrl, SellerRating, UserId,
};
use crate::domain::update_policy::ProductChanges;

/// A marketplace product mirrored into the local store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AffiliateProduct {
    pub id: ProductId,
    pub owner_id: UserId,
    pub external_id: ExternalProductId,
    pub title: ProductTitle,
    pub description: Option<String>,
    pub image_url: Option<ImageUrl>,
    /// Marketplace category path; written once on creation.
    pub category_path: Option<String>,
    pub currency: Option<String>,
    pub maximum_retail_price: Option<ProductPrice>,
    pub selling_price: Option<ProductPrice>,
    pub special_price: Option<ProductPrice>,
    pub product_url: Option<ProductUrl>,
    /// Brand as reported on creation.
    pub brand: Option<String>,
    pub in_stock: bool,
    pub cod_available: bool,
    pub discount_percentage: Option<DiscountPercentage>,
    /// Offers joined with `,`.
    pub offers: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub seller_name: Option<String>,
    pub seller_rating: Option<SellerRating>,
    pub status: ProductStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl AffiliateProduct {
    /// Overwrite every field present in `changes`, leaving the rest intact.
    pub fn apply_changes(&mut self, changes: &ProductChanges) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(description) = &changes.description {
            self.description = Some(description.clone());
        }
        if let Some(image_url) = &changes.image_url {
            self.image_url = Some(image_url.clone());
        }
        if let Some(currency) = &changes.currency {
            self.currency = Some(currency.clone());
        }
        if let Some(price) = changes.maximum_retail_price {
            self.maximum_retail_price = Some(price);
        }
        if let Some(price) = changes.selling_price {
            self.selling_price = Some(price);
        }
        if let Some(price) = changes.special_price {
            self.special_price = Some(price);
        }
        if let Some(product_url) = &changes.product_url {
            self.product_url = Some(product_url.clone());
        }
        if let Some(in_stock) = changes.in_stock {
            self.in_stock = in_stock;
        }
        if let Some(cod_available) = changes.cod_available {
            self.cod_available = cod_available;
        }
        if let Some(discount) = changes.discount_percentage {
            self.discount_percentage = Some(discount);
        }
        if let Some(offers) = &changes.offers {
            self.offers = offers.clone();
        }
        if let Some(size) = &changes.size {
            self.size = Some(size.clone());
        }
        if let Some(color) = &changes.color {
            self.color = Some(color.clone());
        }
        if let Some(seller_name) = &changes.seller_name {
            self.seller_name = Some(seller_name.clone());
        }
        if let Some(rating) = changes.seller_rating {
            self.seller_rating = Some(rating);
        }
    }
}

/// Information required to create a new [`AffiliateProduct`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewAffiliateProduct {
    pub owner_id: UserId,
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
    pub in_stock: bool,
    pub cod_available: bool,
    pub discount_percentage: Option<DiscountPercentage>,
    pub offers: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub seller_name: Option<String>,
    pub seller_rating: Option<SellerRating>,
    pub status: ProductStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn sample_product() -> AffiliateProduct {
        let epoch = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        AffiliateProduct {
            id: ProductId::new(1).unwrap(),
            owner_id: UserId::new(1).unwrap(),
            external_id: ExternalProductId::new("MOBF123").unwrap(),
            title: ProductTitle::new("Phone").unwrap(),
            description: Some("old".into()),
            image_url: None,
            category_path: Some("Mobiles>Phones".into()),
            currency: Some("INR".into()),
            maximum_retail_price: Some(ProductPrice::new(100.0).unwrap()),
            selling_price: None,
            special_price: None,
            product_url: None,
            brand: Some("Acme".into()),
            in_stock: false,
            cod_available: true,
            discount_percentage: None,
            offers: String::new(),
            size: Some("M".into()),
            color: Some("Red".into()),
            seller_name: None,
            seller_rating: None,
            status: ProductStatus::Active,
            created_at: epoch,
            updated_at: epoch,
        }
    }

    #[test]
    fn empty_changes_leave_product_untouched() {
        let mut product = sample_product();
        product.apply_changes(&ProductChanges::default());
        assert_eq!(product, sample_product());
    }

    #[test]
    fn applies_only_present_fields() {
        let mut product = sample_product();
        let changes = ProductChanges {
            in_stock: Some(true),
            color: Some("Blue".into()),
            ..ProductChanges::default()
        };

        product.apply_changes(&changes);

        assert!(product.in_stock);
        assert_eq!(product.color.as_deref(), Some("Blue"));
        assert_eq!(product.size.as_deref(), Some("M"));
        assert_eq!(product.description.as_deref(), Some("old"));
    }
}
