//! Which stored fields an import may overwrite on an existing product.
//!
//! Each [`UpdateToggle`] maps to a fixed list of [`ProductField`]s. Enabled
//! toggles combine as a union; the resulting fields are copied from the
//! listed product into a single [`ProductChanges`] set that is persisted once.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::listing::ListedProduct;
use crate::domain::types::{
    DiscountPercentage, ImageUrl, ProductPrice, ProductTitle, ProductUrl, SellerRating,
};

/// Product fields that may be refreshed after creation.
///
/// External id, category path and brand are absent on purpose: they are
/// written once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductField {
    Title,
    Description,
    ImageUrl,
    Currency,
    MaximumRetailPrice,
    SellingPrice,
    SpecialPrice,
    ProductUrl,
    InStock,
    CodAvailable,
    DiscountPercentage,
    Offers,
    Size,
    Color,
    SellerName,
    SellerRating,
}

/// Administrator switch enabling a group of field overwrites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateToggle {
    FullContent,
    Price,
    Available,
    Size,
    Color,
    Offers,
}

impl UpdateToggle {
    pub const ALL: [UpdateToggle; 6] = [
        Self::FullContent,
        Self::Price,
        Self::Available,
        Self::Size,
        Self::Color,
        Self::Offers,
    ];

    /// Fields overwritten when this toggle is enabled.
    pub const fn fields(self) -> &'static [ProductField] {
        match self {
            Self::FullContent => &[
                ProductField::Title,
                ProductField::Description,
                ProductField::ImageUrl,
                ProductField::Currency,
                ProductField::MaximumRetailPrice,
                ProductField::SellingPrice,
                ProductField::SpecialPrice,
                ProductField::ProductUrl,
                ProductField::InStock,
                ProductField::CodAvailable,
                ProductField::DiscountPercentage,
                ProductField::Offers,
                ProductField::Size,
                ProductField::Color,
                ProductField::SellerName,
                ProductField::SellerRating,
            ],
            Self::Price => &[
                ProductField::Currency,
                ProductField::MaximumRetailPrice,
                ProductField::SellingPrice,
                ProductField::SpecialPrice,
                ProductField::DiscountPercentage,
            ],
            Self::Available => &[ProductField::InStock],
            Self::Size => &[ProductField::Size],
            Self::Color => &[ProductField::Color],
            Self::Offers => &[ProductField::Offers],
        }
    }

    /// Configuration key of the toggle.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullContent => "full_content",
            Self::Price => "price",
            Self::Available => "available",
            Self::Size => "size",
            Self::Color => "color",
            Self::Offers => "offers",
        }
    }
}

/// Set of enabled update toggles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateToggles {
    #[serde(default)]
    pub full_content: bool,
    #[serde(default)]
    pub price: bool,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub size: bool,
    #[serde(default)]
    pub color: bool,
    #[serde(default)]
    pub offers: bool,
}

impl UpdateToggles {
    /// Toggles with only `toggle` switched on.
    pub fn only(toggle: UpdateToggle) -> Self {
        let mut toggles = Self::default();
        toggles.set(toggle, true);
        toggles
    }

    pub fn is_enabled(&self, toggle: UpdateToggle) -> bool {
        match toggle {
            UpdateToggle::FullContent => self.full_content,
            UpdateToggle::Price => self.price,
            UpdateToggle::Available => self.available,
            UpdateToggle::Size => self.size,
            UpdateToggle::Color => self.color,
            UpdateToggle::Offers => self.offers,
        }
    }

    pub fn set(&mut self, toggle: UpdateToggle, enabled: bool) {
        let slot = match toggle {
            UpdateToggle::FullContent => &mut self.full_content,
            UpdateToggle::Price => &mut self.price,
            UpdateToggle::Available => &mut self.available,
            UpdateToggle::Size => &mut self.size,
            UpdateToggle::Color => &mut self.color,
            UpdateToggle::Offers => &mut self.offers,
        };
        *slot = enabled;
    }

    /// Iterate over the enabled toggles.
    pub fn enabled(&self) -> impl Iterator<Item = UpdateToggle> + '_ {
        UpdateToggle::ALL
            .into_iter()
            .filter(|toggle| self.is_enabled(*toggle))
    }

    /// Union of the fields of every enabled toggle.
    pub fn fields(&self) -> BTreeSet<ProductField> {
        self.enabled()
            .flat_map(|toggle| toggle.fields().iter().copied())
            .collect()
    }
}

/// Field overwrites to persist on an existing product. `None` keeps the
/// stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub title: Option<ProductTitle>,
    pub description: Option<String>,
    pub image_url: Option<ImageUrl>,
    pub currency: Option<String>,
    pub maximum_retail_price: Option<ProductPrice>,
    pub selling_price: Option<ProductPrice>,
    pub special_price: Option<ProductPrice>,
    pub product_url: Option<ProductUrl>,
    pub in_stock: Option<bool>,
    pub cod_available: Option<bool>,
    pub discount_percentage: Option<DiscountPercentage>,
    pub offers: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub seller_name: Option<String>,
    pub seller_rating: Option<SellerRating>,
}

impl ProductChanges {
    /// Collect the fields selected by `toggles` from `listed`.
    ///
    /// Fields the marketplace omitted stay `None` and are not overwritten.
    pub fn collect(toggles: &UpdateToggles, listed: &ListedProduct) -> Self {
        let mut changes = Self::default();
        for field in toggles.fields() {
            changes.copy_field(field, listed);
        }
        changes
    }

    fn copy_field(&mut self, field: ProductField, listed: &ListedProduct) {
        match field {
            ProductField::Title => self.title = Some(listed.title.clone()),
            ProductField::Description => self.description = listed.description.clone(),
            ProductField::ImageUrl => self.image_url = listed.image_url.clone(),
            ProductField::Currency => self.currency = listed.currency.clone(),
            ProductField::MaximumRetailPrice => {
                self.maximum_retail_price = listed.maximum_retail_price
            }
            ProductField::SellingPrice => self.selling_price = listed.selling_price,
            ProductField::SpecialPrice => self.special_price = listed.special_price,
            ProductField::ProductUrl => self.product_url = listed.product_url.clone(),
            ProductField::InStock => self.in_stock = listed.in_stock,
            ProductField::CodAvailable => self.cod_available = listed.cod_available,
            ProductField::DiscountPercentage => {
                self.discount_percentage = listed.discount_percentage
            }
            ProductField::Offers => self.offers = listed.offers.clone(),
            ProductField::Size => self.size = listed.size.clone(),
            ProductField::Color => self.color = listed.color.clone(),
            ProductField::SellerName => self.seller_name = listed.seller_name.clone(),
            ProductField::SellerRating => self.seller_rating = listed.seller_rating,
        }
    }

    /// `true` when nothing would be written.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
