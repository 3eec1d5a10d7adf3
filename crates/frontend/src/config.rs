//! Client configuration.
//!
//! The defaults are embedded as TOML and parsed once on first access. A
//! broken document falls back to the compiled defaults with a warning, so
//! the console always starts.

use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub table: TableConfig,
    pub permissions: PermissionsConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Port of the REST backend on the host serving the console
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TableConfig {
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
    /// Inclusive bounds on distinct values for an inferred facet
    pub dynamic_filter_min: usize,
    pub dynamic_filter_max: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PermissionsConfig {
    /// localStorage key holding the serialized permission map
    pub storage_key: String,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000

[table]
default_page_size = 25
page_size_options = [10, 25, 50, 100]
dynamic_filter_min = 2
dynamic_filter_max = 10

[permissions]
storage_key = "menuPermissions"
"#;

static CONFIG: Lazy<AppConfig> = Lazy::new(|| load_config(DEFAULT_CONFIG));

impl AppConfig {
    pub fn get() -> &'static AppConfig {
        &CONFIG
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig { port: 3000 },
            table: TableConfig {
                default_page_size: 25,
                page_size_options: vec![10, 25, 50, 100],
                dynamic_filter_min: 2,
                dynamic_filter_max: 10,
            },
            permissions: PermissionsConfig {
                storage_key: "menuPermissions".to_string(),
            },
        }
    }
}

/// Parses a configuration document, falling back to defaults on error
pub fn load_config(source: &str) -> AppConfig {
    match toml::from_str::<AppConfig>(source) {
        Ok(config) => {
            log::debug!("Loaded client configuration");
            config
        }
        Err(e) => {
            log::warn!("Invalid client configuration, using defaults: {}", e);
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<AppConfig, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        assert_eq!(config.unwrap(), AppConfig::default());
    }

    #[test]
    fn test_broken_config_falls_back() {
        let config = load_config("[table]\ndefault_page_size = \"many\"");
        assert_eq!(config, AppConfig::default());
    }
}
