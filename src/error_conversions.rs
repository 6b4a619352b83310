//! Error conversion glue between layers.
//!
//! The domain layer must not depend on repository or service error types, so
//! the `From` impls connecting them live here.

use pushkind_common::repository::errors::RepositoryError;

use crate::domain::types::TypeConstraintError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod server {
    use crate::domain::types::TypeConstraintError;
    use crate::forms::import::ImportFormError;
    use crate::marketplace::MarketplaceError;
    use crate::services::errors::ServiceError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::TypeConstraint(val.to_string())
        }
    }

    impl From<MarketplaceError> for ServiceError {
        fn from(val: MarketplaceError) -> Self {
            ServiceError::Upstream(val.to_string())
        }
    }

    impl From<ImportFormError> for ServiceError {
        fn from(val: ImportFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }
}
