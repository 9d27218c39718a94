//! Adapter configuration
//!
//! Configuration is read from TOML, with a couple of environment overrides
//! applied on top. Every field has a default, so an empty file is valid.
//!
//! ```rust
//! use embeddable_adapter::config::AdapterConfig;
//!
//! let config = AdapterConfig::from_toml_str(r#"
//!     prefix = "acme-phone"
//!     styles_uri = "https://cdn.example.com/phone.css"
//! "#).unwrap();
//!
//! assert_eq!(config.prefix, "acme-phone");
//! assert_eq!(config.target_origin, "*");
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::AdapterResult;

/// Default page opened by the calendar invite button
pub const DEFAULT_CALENDAR_URL: &str = "https://outlook.office365.com/owa/?path=/calendar/view/WorkWeek";

/// Environment variable overriding [`AdapterConfig::styles_uri`]
pub const ENV_STYLES_URI: &str = "ADAPTER_STYLES_URI";

/// Environment variable overriding [`AdapterConfig::target_origin`]
pub const ENV_TARGET_ORIGIN: &str = "ADAPTER_TARGET_ORIGIN";

/// Main adapter configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Widget prefix, used to scope log output
    pub prefix: String,
    /// Origin passed along with every message posted to the parent frame
    pub target_origin: String,
    /// Extra stylesheet inserted into the host page on initialization
    pub styles_uri: Option<String>,
    /// Page opened by the calendar invite button
    pub calendar_url: String,
    /// Locale the widget starts in
    pub locale: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            prefix: "rc-widget".to_string(),
            target_origin: "*".to_string(),
            styles_uri: None,
            calendar_url: DEFAULT_CALENDAR_URL.to_string(),
            locale: "en-US".to_string(),
        }
    }
}

impl AdapterConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from a TOML document
    pub fn from_toml_str(source: &str) -> AdapterResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load a configuration file, then apply environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> AdapterResult<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&source)?;
        Ok(config.with_env_overrides())
    }

    /// Apply `ADAPTER_*` environment variables on top of this configuration
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(uri) = std::env::var(ENV_STYLES_URI) {
            self.styles_uri = Some(uri).filter(|u| !u.is_empty());
        }
        if let Ok(origin) = std::env::var(ENV_TARGET_ORIGIN) {
            if !origin.is_empty() {
                self.target_origin = origin;
            }
        }
        self
    }

    /// Set the widget prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the origin used when posting to the parent frame
    pub fn with_target_origin(mut self, origin: impl Into<String>) -> Self {
        self.target_origin = origin.into();
        self
    }

    /// Set the extra stylesheet to insert on initialization
    pub fn with_styles_uri(mut self, uri: impl Into<String>) -> Self {
        self.styles_uri = Some(uri.into());
        self
    }

    /// Set the calendar page opened by invite buttons
    pub fn with_calendar_url(mut self, url: impl Into<String>) -> Self {
        self.calendar_url = url.into();
        self
    }

    /// Set the starting locale
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}
