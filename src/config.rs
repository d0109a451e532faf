//! Environment-driven settings for the quote gateway

use std::path::PathBuf;

use crate::error::{AppError, Result};

/// Partner API token accepted by the gateway
pub const API_TOKEN_VAR: &str = "GNET_API_TOKEN";
/// Whether the shared development token is accepted ("true"/"false")
pub const ALLOW_DEV_TOKEN_VAR: &str = "TNT_ALLOW_DEV_TOKEN";
/// Optional path to a rate file replacing the built-in catalog
pub const RATE_CATALOG_VAR: &str = "TNT_RATE_CATALOG";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_token: Option<String>,
    pub allow_dev_token: bool,
    pub rate_catalog_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: None,
            allow_dev_token: true,
            rate_catalog_path: None,
        }
    }
}

impl Config {
    /// Load `.env` if present, then read settings from the environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup (environment, test fixtures).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let allow_dev_token = match non_empty(ALLOW_DEV_TOKEN_VAR) {
            Some(value) => parse_bool(&value).ok_or_else(|| {
                AppError::Config(format!(
                    "{} must be true or false, got '{}'",
                    ALLOW_DEV_TOKEN_VAR, value
                ))
            })?,
            None => true,
        };

        Ok(Self {
            api_token: non_empty(API_TOKEN_VAR),
            allow_dev_token,
            rate_catalog_path: non_empty(RATE_CATALOG_VAR).map(PathBuf::from),
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_reads_all_settings() {
        let config = Config::from_lookup(lookup(&[
            (API_TOKEN_VAR, "partner-123"),
            (ALLOW_DEV_TOKEN_VAR, "false"),
            (RATE_CATALOG_VAR, "/etc/tnt/rates.json"),
        ]))
        .unwrap();

        assert_eq!(config.api_token.as_deref(), Some("partner-123"));
        assert!(!config.allow_dev_token);
        assert_eq!(config.rate_catalog_path, Some(PathBuf::from("/etc/tnt/rates.json")));
    }

    #[test]
    fn test_blank_token_is_absent() {
        let config = Config::from_lookup(lookup(&[(API_TOKEN_VAR, "  ")])).unwrap();
        assert_eq!(config.api_token, None);
    }

    #[test]
    fn test_invalid_bool() {
        let err = Config::from_lookup(lookup(&[(ALLOW_DEV_TOKEN_VAR, "maybe")])).unwrap_err();
        assert!(err.to_string().contains(ALLOW_DEV_TOKEN_VAR));
    }
}
