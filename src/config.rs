//!
//! pgmirror configuration
//! ----------------------
//! Startup settings for the virtual catalog layer. Values come from defaults,
//! then an optional JSON file, then `PGMIRROR_*` environment variables.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

pub const ENV_PRIMARY_KEY_NAME: &str = "PGMIRROR_PRIMARY_KEY_NAME";
pub const ENV_OWNER_OID: &str = "PGMIRROR_OWNER_OID";
pub const ENV_OWNER_NAME: &str = "PGMIRROR_OWNER_NAME";
pub const ENV_INFORMATION_SCHEMA: &str = "PGMIRROR_INFORMATION_SCHEMA";
pub const ENV_SEARCH_PATH: &str = "PGMIRROR_SEARCH_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Reserved index identifier marking a primary key (compared case-insensitively).
    pub primary_key_name: String,
    /// Owner OID reported for every live relation and namespace.
    pub default_owner_oid: u32,
    /// Owner role name paired with `default_owner_oid` in the name-typed views.
    pub owner_name: String,
    /// Register the information_schema handlers alongside pg_catalog.
    pub include_information_schema: bool,
    /// Schemas consulted, in order, for unqualified relation names.
    pub search_path: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            primary_key_name: "PRIMARY".to_string(),
            default_owner_oid: 10,
            owner_name: "postgres".to_string(),
            include_information_schema: true,
            search_path: vec!["public".to_string()],
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> CatalogResult<Self> {
        Self::default().with_env_overrides()
    }

    pub fn from_json_str(text: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str::<CatalogConfig>(text)?)
    }

    pub fn from_json_file(path: &Path) -> CatalogResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Apply any `PGMIRROR_*` variables present in the environment on top of `self`.
    pub fn with_env_overrides(self) -> CatalogResult<Self> {
        self.with_overrides(|name| env::var(name).ok())
    }

    fn with_overrides<F: Fn(&str) -> Option<String>>(mut self, lookup: F) -> CatalogResult<Self> {
        if let Some(v) = lookup(ENV_PRIMARY_KEY_NAME) {
            let v = v.trim();
            if v.is_empty() {
                return Err(CatalogError::config("invalid_setting".to_string(), format!("{} must not be empty", ENV_PRIMARY_KEY_NAME)));
            }
            self.primary_key_name = v.to_string();
        }
        if let Some(v) = lookup(ENV_OWNER_OID) {
            self.default_owner_oid = v.trim().parse::<u32>().map_err(|e| {
                CatalogError::config("invalid_setting".to_string(), format!("{}='{}': {}", ENV_OWNER_OID, v, e))
            })?;
        }
        if let Some(v) = lookup(ENV_OWNER_NAME) {
            if !v.trim().is_empty() { self.owner_name = v.trim().to_string(); }
        }
        if let Some(v) = lookup(ENV_INFORMATION_SCHEMA) {
            self.include_information_schema = parse_bool_word(&v).ok_or_else(|| {
                CatalogError::config("invalid_setting".to_string(), format!("{}='{}' is not a boolean", ENV_INFORMATION_SCHEMA, v))
            })?;
        }
        if let Some(v) = lookup(ENV_SEARCH_PATH) {
            self.search_path = v
                .split(',')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect();
        }
        Ok(self)
    }
}

pub fn parse_bool_word(v: &str) -> Option<bool> {
    match v.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let m: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| m.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let c = CatalogConfig::default();
        assert_eq!(c.primary_key_name, "PRIMARY");
        assert_eq!(c.default_owner_oid, 10);
        assert!(c.include_information_schema);
        assert_eq!(c.search_path, vec!["public".to_string()]);
    }

    #[test]
    fn overrides_apply() {
        let c = CatalogConfig::default()
            .with_overrides(lookup_from(&[
                (ENV_PRIMARY_KEY_NAME, "pk"),
                (ENV_OWNER_OID, "42"),
                (ENV_OWNER_NAME, "admin"),
                (ENV_INFORMATION_SCHEMA, "off"),
                (ENV_SEARCH_PATH, "app, public ,"),
            ]))
            .unwrap();
        assert_eq!(c.primary_key_name, "pk");
        assert_eq!(c.default_owner_oid, 42);
        assert_eq!(c.owner_name, "admin");
        assert!(!c.include_information_schema);
        assert_eq!(c.search_path, vec!["app".to_string(), "public".to_string()]);
    }

    #[test]
    fn bad_values_are_config_errors() {
        let err = CatalogConfig::default().with_overrides(lookup_from(&[(ENV_OWNER_OID, "ten")])).unwrap_err();
        assert!(matches!(err, CatalogError::Config { .. }));
        let err = CatalogConfig::default().with_overrides(lookup_from(&[(ENV_INFORMATION_SCHEMA, "maybe")])).unwrap_err();
        assert!(matches!(err, CatalogError::Config { .. }));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c = CatalogConfig::from_json_str(r#"{ "primary_key_name": "pkey" }"#).unwrap();
        assert_eq!(c.primary_key_name, "pkey");
        assert_eq!(c.default_owner_oid, 10);
    }
}
