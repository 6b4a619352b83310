use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{CategoryKey, TypeConstraintError};

/// Form submitted to start a marketplace import.
///
/// A blank category imports every category of the directory.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ImportForm {
    #[validate(length(max = 128))]
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportFormPayload {
    pub category: Option<CategoryKey>,
}

#[derive(Debug, Error)]
pub enum ImportFormError {
    #[error("Import form validation failed: {0}")]
    Validation(String),
    #[error("Import form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ImportFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ImportFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<ImportForm> for ImportFormPayload {
    type Error = ImportFormError;

    fn try_from(value: ImportForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let category = value
            .category
            .filter(|c| !c.trim().is_empty())
            .map(CategoryKey::new)
            .transpose()?;

        Ok(Self { category })
    }
}
