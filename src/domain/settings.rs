use crate::domain::types::{AffiliateId, AffiliateToken};
use crate::domain::update_policy::UpdateToggles;

/// Credentials sent with every marketplace request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliateCredentials {
    pub affiliate_id: AffiliateId,
    pub token: AffiliateToken,
}

/// Administrator settings governing an import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSettings {
    /// Whether the native marketplace API is enabled at all.
    pub native_api: bool,
    pub credentials: Option<AffiliateCredentials>,
    pub toggles: UpdateToggles,
}

impl ImportSettings {
    /// Credentials to use, or `None` when the import is not set up.
    pub fn active_credentials(&self) -> Option<&AffiliateCredentials> {
        if self.native_api {
            self.credentials.as_ref()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> AffiliateCredentials {
        AffiliateCredentials {
            affiliate_id: AffiliateId::new("tracker").unwrap(),
            token: AffiliateToken::new("token").unwrap(),
        }
    }

    #[test]
    fn disabled_api_hides_credentials() {
        let settings = ImportSettings {
            native_api: false,
            credentials: Some(credentials()),
            toggles: UpdateToggles::default(),
        };
        assert!(settings.active_credentials().is_none());
    }

    #[test]
    fn enabled_api_exposes_credentials() {
        let settings = ImportSettings {
            native_api: true,
            credentials: Some(credentials()),
            toggles: UpdateToggles::default(),
        };
        assert_eq!(settings.active_credentials(), Some(&credentials()));
    }
}
