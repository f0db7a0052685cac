//! Catalog configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a user file overrides only the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! artist = "Grant Ward"                  # Creator name in structured data
//! base_url = "https://grantward.art"     # Canonical origin for detail URLs
//! currency = "USD"                       # ISO 4217 code for prices
//!
//! [facets]
//! media = ["Oil", "Gouache", "Charcoal", "Watercolor"]  # Medium filter buttons
//!
//! [gallery]
//! max_thumbnails = 4                     # Thumbnails under the detail image
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse; override just the values you want:
//!
//! ```toml
//! [facets]
//! media = ["Oil", "Ink"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Catalog configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Site identity used in links and structured data.
    pub site: SiteConfig,
    /// Filter bar options.
    pub facets: FacetsConfig,
    /// Detail view presentation.
    pub gallery: GalleryConfig,
}

impl CatalogConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let currency = &self.site.currency;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::Validation(format!(
                "site.currency must be a 3-letter uppercase code, got {currency:?}"
            )));
        }
        if self.site.base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.base_url must not end with '/'".into(),
            ));
        }
        let mut seen = Vec::new();
        for medium in &self.facets.media {
            if medium.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "facets.media entries must not be empty".into(),
                ));
            }
            if seen.contains(&medium) {
                return Err(ConfigError::Validation(format!(
                    "facets.media lists {medium:?} twice"
                )));
            }
            seen.push(medium);
        }
        if self.gallery.max_thumbnails == 0 {
            return Err(ConfigError::Validation(
                "gallery.max_thumbnails must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Artist name, used as the creator in structured data.
    pub artist: String,
    /// Canonical origin, without trailing slash.
    pub base_url: String,
    /// ISO 4217 currency code for all prices.
    pub currency: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            artist: "Grant Ward".to_string(),
            base_url: "https://grantward.art".to_string(),
            currency: "USD".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FacetsConfig {
    /// Media offered as filter buttons, in display order. Any medium still
    /// decodes from a URL.
    pub media: Vec<String>,
}

impl Default for FacetsConfig {
    fn default() -> Self {
        Self {
            media: ["Oil", "Gouache", "Charcoal", "Watercolor"]
                .map(String::from)
                .to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Thumbnails shown under the main detail image.
    pub max_thumbnails: usize,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self { max_thumbnails: 4 }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// [`CatalogConfig::default`] as a TOML table: the bottom layer every
/// `config.toml` is laid over.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(CatalogConfig::default()).expect("default config must serialize")
}

/// Lay `overlay` over `base`.
///
/// Where both sides hold a table the two are combined per key, recursing into
/// nested tables. Anywhere else the overlay value wins outright, so a
/// user-supplied `media` list replaces the stock list instead of extending it.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut merged), toml::Value::Table(overrides)) => {
            for (key, value) in overrides {
                let combined = match merged.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                merged.insert(key, combined);
            }
            toml::Value::Table(merged)
        }
        (_, replacement) => replacement,
    }
}

/// Parse the TOML file at `path`, or `Ok(None)` when there is no such file.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(toml::from_str(&content)?))
}

/// Build the effective config: `base`, with `overlay` laid over it when
/// present, deserialized into [`CatalogConfig`] and checked by
/// [`CatalogConfig::validate`].
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<CatalogConfig, ConfigError> {
    let config: CatalogConfig = overlay.into_iter().fold(base, merge_toml).try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<CatalogConfig, ConfigError> {
    load_config_file(&dir.join("config.toml"))
}

/// Load config from an explicit file path; a missing file yields the defaults.
pub fn load_config_file(path: &Path) -> Result<CatalogConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(path)?)
}

/// The stock `config.toml`, every key present with its default and a comment.
/// `easel gen-config` prints this.
pub fn stock_config_toml() -> &'static str {
    r##"# Easel Catalog Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Artist name, used as the creator in structured data.
artist = "Grant Ward"

# Canonical origin for artwork detail URLs (no trailing slash).
base_url = "https://grantward.art"

# ISO 4217 currency code for all prices.
currency = "USD"

# ---------------------------------------------------------------------------
# Filter bar
# ---------------------------------------------------------------------------
[facets]
# Media offered as filter buttons, in display order.
# Any medium value in a URL still filters, listed here or not.
media = ["Oil", "Gouache", "Charcoal", "Watercolor"]

# ---------------------------------------------------------------------------
# Artwork detail view
# ---------------------------------------------------------------------------
[gallery]
# Thumbnails shown under the main image.
max_thumbnails = 4
"##
}
