//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and numeric constraints are enforced at the
//! boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateUrl;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A numeric value required to be non-negative was negative or not finite.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// URL validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Positive `i32` identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

/// Trimmed, non-empty strings. The `url` form also validates the URL format.
macro_rules! string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        string_newtype!(@define $name, $doc, $field, |_value: &str| true);
    };
    (url $name:ident, $doc:expr, $field:expr) => {
        string_newtype!(@define $name, $doc, $field, |value: &str| value.validate_url());
    };
    (@define $name:ident, $doc:expr, $field:expr, $check:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                if !($check)(trimmed.as_str()) {
                    return Err(TypeConstraintError::InvalidUrl($field));
                }
                Ok(Self(trimmed))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

macro_rules! non_negative_f64_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
        #[serde(transparent)]
        pub struct $name(f64);

        impl $name {
            /// Constructs a finite numeric value that is zero or greater.
            pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
                if value.is_finite() && value >= 0.0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NegativeNumber($field))
                }
            }

            /// Returns the raw `f64` value.
            pub const fn get(self) -> f64 {
                self.0
            }
        }
    };
}

id_newtype!(ProductId, "Local identifier of an imported product.", "product_id");
id_newtype!(UserId, "Identifier of the user owning imported records.", "user_id");

string_newtype!(
    ExternalProductId,
    "Marketplace product identifier, the deduplication key of imported products.",
    "product id"
);
string_newtype!(
    ProductTitle,
    "Product title enforcing non-empty values.",
    "title"
);
string_newtype!(
    CategoryKey,
    "Marketplace category key such as `mobiles` or `bags_wallets_belts`.",
    "category"
);
string_newtype!(
    AffiliateId,
    "Affiliate tracking id sent as `Fk-Affiliate-Id`.",
    "affiliate id"
);

string_newtype!(url ListingUrl, "Per-category product listing URL.", "listing url");
string_newtype!(url ProductUrl, "Canonical product URL.", "product url");
string_newtype!(url ImageUrl, "Product image URL.", "image url");

non_negative_f64_newtype!(
    ProductPrice,
    "Non-negative price value in standard currency units.",
    "price"
);
non_negative_f64_newtype!(
    DiscountPercentage,
    "Non-negative discount percentage.",
    "discount percentage"
);
non_negative_f64_newtype!(
    SellerRating,
    "Non-negative average seller rating.",
    "seller rating"
);

/// Affiliate API token sent as `Fk-Affiliate-Token`.
///
/// The value is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct AffiliateToken(String);

impl AffiliateToken {
    /// Constructs a trimmed, non-empty token.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        trim_and_require_non_empty(value, "affiliate token").map(Self)
    }

    /// Borrow the raw token for use in request headers.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AffiliateToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("AffiliateToken(***)")
    }
}

/// Publication status of an imported product. Imports only ever publish.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Active,
}

impl ProductStatus {
    /// String representation used in persistence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
        }
    }
}

impl TryFrom<String> for ProductStatus {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim() {
            "active" => Ok(Self::Active),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "product status: {other}"
            ))),
        }
    }
}

impl From<ProductStatus> for String {
    fn from(value: ProductStatus) -> Self {
        value.as_str().to_string()
    }
}
