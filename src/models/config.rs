use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::settings::{AffiliateCredentials, ImportSettings};
use crate::domain::types::{AffiliateId, AffiliateToken};
use crate::domain::update_policy::UpdateToggles;

/// Default marketplace API host.
pub const DEFAULT_API_BASE_URL: &str = "https://affiliate-api.flipkart.net";
/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration options of the importer service.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Key material for session and flash cookies, at least 64 bytes.
    pub secret: String,
    pub templates_dir: String,
    #[serde(default)]
    pub flipkart: FlipkartConfig,
}

/// Marketplace settings as edited by administrators.
#[derive(Clone, Deserialize)]
pub struct FlipkartConfig {
    #[serde(default)]
    pub native_api: bool,
    #[serde(default)]
    pub tracking_id: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Field groups refreshed on products that already exist locally.
    #[serde(default)]
    pub update: UpdateToggles,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for FlipkartConfig {
    fn default() -> Self {
        Self {
            native_api: false,
            tracking_id: String::new(),
            token: String::new(),
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            update: UpdateToggles::default(),
        }
    }
}

impl fmt::Debug for FlipkartConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlipkartConfig")
            .field("native_api", &self.native_api)
            .field("tracking_id", &self.tracking_id)
            .field("token", &"***")
            .field("api_base_url", &self.api_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("update", &self.update)
            .finish()
    }
}

impl FlipkartConfig {
    /// Per-request timeout. Zero falls back to [`DEFAULT_TIMEOUT_SECS`].
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }

    /// Validated import settings. Blank credentials count as not configured.
    pub fn import_settings(&self) -> ImportSettings {
        let credentials = match (
            AffiliateId::new(self.tracking_id.as_str()),
            AffiliateToken::new(self.token.as_str()),
        ) {
            (Ok(affiliate_id), Ok(token)) => Some(AffiliateCredentials {
                affiliate_id,
                token,
            }),
            _ => None,
        };

        ImportSettings {
            native_api: self.native_api,
            credentials,
            toggles: self.update,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::update_policy::UpdateToggle;

    #[test]
    fn blank_credentials_are_not_configured() {
        let config = FlipkartConfig {
            native_api: true,
            tracking_id: "tracker".into(),
            ..FlipkartConfig::default()
        };

        let settings = config.import_settings();
        assert!(settings.active_credentials().is_none());
    }

    #[test]
    fn deserializes_update_toggles() {
        let config: FlipkartConfig = serde_json::from_value(serde_json::json!({
            "native_api": true,
            "tracking_id": "tracker",
            "token": "secret",
            "update": { "price": true, "available": true }
        }))
        .unwrap();

        let settings = config.import_settings();
        assert!(settings.active_credentials().is_some());
        assert!(settings.toggles.is_enabled(UpdateToggle::Price));
        assert!(settings.toggles.is_enabled(UpdateToggle::Available));
        assert!(!settings.toggles.is_enabled(UpdateToggle::FullContent));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let config = FlipkartConfig {
            timeout_secs: 0,
            ..FlipkartConfig::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let config = FlipkartConfig {
            timeout_secs: 5,
            ..FlipkartConfig::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn debug_output_hides_token() {
        let config = FlipkartConfig {
            tracking_id: "tracker".into(),
            token: "very-secret-token".into(),
            ..FlipkartConfig::default()
        };

        let output = format!("{config:?}");
        assert!(output.contains("tracker"));
        assert!(!output.contains("very-secret-token"));
    }
}
