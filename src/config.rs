//! Access Configuration
//!
//! Base URL, table name and per-level API keys, injected by the host page as
//! `window.TASKBOARD_CONFIG` before the bundle loads.

use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::level::AccessLevel;

/// Global object the host page defines
pub const CONFIG_GLOBAL: &str = "TASKBOARD_CONFIG";

/// REST path segment in front of the table name
pub const REST_PATH: &str = "/rest/v1/";

const DEFAULT_TABLE: &str = "tasks";

/// Markers left behind by deployment templates
const PLACEHOLDER_MARKERS: &[&str] = &["your_", "your-", "changeme", "placeholder"];

/// Credentials and endpoint for the remote table
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_table")]
    pub table_name: String,
    /// Public anon key, bound to the guest level
    #[serde(default)]
    pub anon_key: String,
    #[serde(default)]
    pub user_key: Option<String>,
    #[serde(default)]
    pub admin_key: Option<String>,
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() || (trimmed.starts_with('<') && trimmed.ends_with('>')) {
        return true;
    }
    let lower = trimmed.to_ascii_lowercase();
    PLACEHOLDER_MARKERS.iter().any(|marker| lower.contains(marker))
}

impl AccessConfig {
    pub fn new(url: impl Into<String>, table_name: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            table_name: table_name.into(),
            anon_key: anon_key.into(),
            user_key: None,
            admin_key: None,
        }
    }

    pub fn with_user_key(mut self, key: impl Into<String>) -> Self {
        self.user_key = Some(key.into());
        self
    }

    pub fn with_admin_key(mut self, key: impl Into<String>) -> Self {
        self.admin_key = Some(key.into());
        self
    }

    /// Read the injected global; a missing or malformed object yields an
    /// unconfigured default so the UI can surface the problem.
    pub fn from_window() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let raw = match js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) {
            Ok(value) if !value.is_undefined() && !value.is_null() => value,
            _ => {
                tracing::warn!(global = CONFIG_GLOBAL, "no configuration object on window");
                return Self::default();
            }
        };
        match serde_wasm_bindgen::from_value::<AccessConfig>(raw) {
            Ok(config) => {
                tracing::info!(url = %config.url, table = %config.table_name, configured = config.is_configured(), "configuration loaded");
                config
            }
            Err(err) => {
                tracing::error!(error = %err, "malformed configuration object");
                Self::default()
            }
        }
    }

    /// Key bound to `level`; roles without their own key use the anon key
    pub fn resolve_api_key(&self, level: Option<AccessLevel>) -> &str {
        let role_key = match level {
            Some(AccessLevel::User) => self.user_key.as_deref(),
            Some(AccessLevel::Admin) => self.admin_key.as_deref(),
            Some(AccessLevel::Guest) | None => None,
        };
        role_key
            .filter(|key| !is_placeholder(key))
            .unwrap_or(self.anon_key.as_str())
    }

    /// Fixed header set for one request, rebuilt per call
    pub fn build_headers(&self, level: Option<AccessLevel>) -> Vec<(String, String)> {
        let key = self.resolve_api_key(level);
        vec![
            ("apikey".to_string(), key.to_string()),
            ("Authorization".to_string(), format!("Bearer {}", key)),
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Prefer".to_string(), "return=representation".to_string()),
        ]
    }

    /// `{url}/rest/v1/{table}{query}`; `query` includes its leading `?`
    pub fn build_url(&self, query: &str) -> String {
        format!("{}{}{}{}", self.url.trim_end_matches('/'), REST_PATH, self.table_name, query)
    }

    pub fn is_configured(&self) -> bool {
        !is_placeholder(&self.url) && !is_placeholder(&self.anon_key) && !self.table_name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> AccessConfig {
        AccessConfig::new("https://db.example.com/", "tasks", "anon-123")
            .with_user_key("user-456")
            .with_admin_key("admin-789")
    }

    #[test]
    fn test_resolve_key_per_level() {
        let config = configured();
        assert_eq!(config.resolve_api_key(None), "anon-123");
        assert_eq!(config.resolve_api_key(Some(AccessLevel::Guest)), "anon-123");
        assert_eq!(config.resolve_api_key(Some(AccessLevel::User)), "user-456");
        assert_eq!(config.resolve_api_key(Some(AccessLevel::Admin)), "admin-789");
    }

    #[test]
    fn test_missing_role_key_falls_back_to_anon() {
        let config = AccessConfig::new("https://db.example.com", "tasks", "anon-123")
            .with_admin_key("YOUR_ADMIN_KEY");
        assert_eq!(config.resolve_api_key(Some(AccessLevel::User)), "anon-123");
        assert_eq!(config.resolve_api_key(Some(AccessLevel::Admin)), "anon-123");
    }

    #[test]
    fn test_headers_follow_level() {
        let config = configured();
        let headers = config.build_headers(Some(AccessLevel::User));
        let get = |name: &str| headers.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str());
        assert_eq!(get("apikey"), Some("user-456"));
        assert_eq!(get("Authorization"), Some("Bearer user-456"));
        assert_eq!(get("Content-Type"), Some("application/json"));
        assert_eq!(get("Prefer"), Some("return=representation"));

        let guest = config.build_headers(None);
        assert_eq!(guest[0].1, "anon-123");
    }

    #[test]
    fn test_build_url() {
        let config = configured();
        assert_eq!(config.build_url(""), "https://db.example.com/rest/v1/tasks");
        assert_eq!(config.build_url("?id=eq.4"), "https://db.example.com/rest/v1/tasks?id=eq.4");
    }

    #[test]
    fn test_is_configured() {
        assert!(configured().is_configured());
        assert!(!AccessConfig::default().is_configured());
        assert!(!AccessConfig::new("https://db.example.com", "tasks", "").is_configured());
        assert!(!AccessConfig::new("", "tasks", "anon").is_configured());
        assert!(!AccessConfig::new("<SUPABASE_URL>", "tasks", "anon").is_configured());
        assert!(!AccessConfig::new("https://db.example.com", "tasks", "your-anon-key").is_configured());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let config: AccessConfig = serde_json::from_str(r#"{"url":"https://x.io","anonKey":"k","adminKey":"a"}"#).unwrap();
        assert_eq!(config.table_name, "tasks");
        assert_eq!(config.anon_key, "k");
        assert_eq!(config.admin_key.as_deref(), Some("a"));
        assert!(config.user_key.is_none());
    }
}
