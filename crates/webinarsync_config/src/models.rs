// --- File: crates/webinarsync_config/src/models.rs ---

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. WEBINARSYNC__DATABASE__URL
    /// Create the participant/email/event tables on startup. Only meant for
    /// development databases; the CRM owns the schema in production.
    #[serde(default)]
    pub init_schema: bool,
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LoggingConfig {
    /// Minimum level for the webinarsync crates ("trace" .. "error").
    pub level: Option<String>,
    /// When set, logs are additionally written to a daily rolling file here.
    pub directory: Option<String>,
}

// --- Zoom Account Config ---
// One set of API credentials. The secret is normally "secret_from_env".
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ZoomAccountConfig {
    pub api_key: String,
    pub secret_key: String,
    pub base_url: String, // e.g. https://api.zoom.us/v2
}

// --- Zoom Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ZoomConfig {
    /// Token Zoom sends along with every event notification.
    pub verification_token: Option<String>,
    /// Custom field on the CRM event holding the webinar id (e.g. "custom_12").
    pub webinar_custom_field: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    /// Named credential sets.
    #[serde(default)]
    pub accounts: HashMap<String, ZoomAccountConfig>,
    /// CRM event id -> account name.
    #[serde(default)]
    pub event_accounts: HashMap<String, String>,
    /// Account used for events without an explicit mapping.
    pub default_account: Option<String>,
}

impl ZoomConfig {
    /// Resolves the credential set for a CRM event id.
    ///
    /// Explicit `event_accounts` entries win over `default_account`.
    pub fn account_for_event(&self, event_id: &str) -> Option<&ZoomAccountConfig> {
        let name = self
            .event_accounts
            .get(event_id)
            .or(self.default_account.as_ref())?;
        self.accounts.get(name)
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_zoom: bool,

    // --- Optional Sections ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub zoom: Option<ZoomConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(key: &str) -> ZoomAccountConfig {
        ZoomAccountConfig {
            api_key: key.to_string(),
            secret_key: format!("{key}-secret"),
            base_url: "https://api.zoom.us/v2".to_string(),
        }
    }

    #[test]
    fn test_account_for_event_prefers_explicit_mapping() {
        let mut zoom = ZoomConfig {
            default_account: Some("main".to_string()),
            ..Default::default()
        };
        zoom.accounts.insert("main".to_string(), account("main-key"));
        zoom.accounts.insert("partner".to_string(), account("partner-key"));
        zoom.event_accounts
            .insert("42".to_string(), "partner".to_string());

        assert_eq!(zoom.account_for_event("42").unwrap().api_key, "partner-key");
        assert_eq!(zoom.account_for_event("7").unwrap().api_key, "main-key");
    }

    #[test]
    fn test_account_for_event_without_default() {
        let mut zoom = ZoomConfig::default();
        zoom.accounts.insert("main".to_string(), account("main-key"));
        assert!(zoom.account_for_event("7").is_none());

        // A mapping to an unknown account name resolves to nothing.
        zoom.event_accounts.insert("7".to_string(), "gone".to_string());
        assert!(zoom.account_for_event("7").is_none());
    }

    #[test]
    fn test_app_config_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "server": { "host": "127.0.0.1", "port": 8086 } }"#,
        )
        .unwrap();
        assert!(!config.use_zoom);
        assert!(config.zoom.is_none());
        assert!(config.database.is_none());
        assert!(config.logging.directory.is_none());
    }
}
