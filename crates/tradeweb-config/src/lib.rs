//! Configuration management for tradeweb
//!
//! This module handles loading, validation, and management of
//! tradeweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Form instance settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormsConfig {
    /// Maximum number of open form instances held in memory
    #[serde(default = "default_max_open_forms")]
    pub max_open_forms: usize,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            max_open_forms: default_max_open_forms(),
        }
    }
}

fn default_max_open_forms() -> usize {
    256
}

/// Currency display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Symbol printed before amounts
    #[serde(default = "default_currency_symbol")]
    pub symbol: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_currency_symbol(),
        }
    }
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

/// Display settings for one transaction page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Heading shown above the form
    pub title: String,
    /// Background accent of the form panel
    pub background_color: String,
    /// Color of the heading
    pub title_color: String,
}

/// Per-page display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesConfig {
    #[serde(default = "default_sales_page")]
    pub sales: PageConfig,
    #[serde(default = "default_purchase_page")]
    pub purchase: PageConfig,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            sales: default_sales_page(),
            purchase: default_purchase_page(),
        }
    }
}

fn default_sales_page() -> PageConfig {
    PageConfig {
        title: "Sales Transaction".to_string(),
        background_color: "#f0fdfa".to_string(),
        title_color: "#55c1ee".to_string(),
    }
}

fn default_purchase_page() -> PageConfig {
    PageConfig {
        title: "Purchase Transaction".to_string(),
        background_color: "#FFA78A".to_string(),
        title_color: "#FF855C".to_string(),
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Form instance settings
    #[serde(default)]
    pub forms: FormsConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Page display settings
    #[serde(default)]
    pub pages: PagesConfig,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of {}", LOG_LEVELS.join(", ")),
            });
        }

        if self.forms.max_open_forms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "forms.max_open_forms".to_string(),
                reason: "At least one form instance must be allowed".to_string(),
            });
        }

        validate_page("pages.sales", &self.pages.sales)?;
        validate_page("pages.purchase", &self.pages.purchase)?;

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn validate_page(prefix: &str, page: &PageConfig) -> ConfigResult<()> {
    if page.title.trim().is_empty() {
        return Err(ConfigError::MissingField {
            field: format!("{}.title", prefix),
        });
    }
    for (name, value) in [
        ("background_color", &page.background_color),
        ("title_color", &page.title_color),
    ] {
        if !is_hex_color(value) {
            return Err(ConfigError::InvalidValue {
                field: format!("{}.{}", prefix, name),
                reason: format!("'{}' is not a #rgb or #rrggbb color", value),
            });
        }
    }
    Ok(())
}

/// `#rgb` or `#rrggbb`
fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
