//! # Site Settings
//!
//! Loads the one [`SiteConfig`] the whole run uses.
//!
//! Sources, lowest precedence first:
//! 1. `SiteConfig::default()`
//! 2. The TOML file given by `--config` (skipped when it does not exist)
//! 3. `SAFARI_LD_BASE_URL`, overriding `base_url`
//!
//! The merged value is validated once before any command sees it.

use safari_ld_core::{SchemaError, SiteConfig};
use std::path::Path;

/// Default location of the settings file.
pub const DEFAULT_CONFIG_PATH: &str = "safari-ld.toml";

/// Environment variable overriding the canonical base URL.
pub const BASE_URL_ENV: &str = "SAFARI_LD_BASE_URL";

/// Maximum settings file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Load settings from `path`, applying the environment override.
pub fn load_settings(path: &Path) -> Result<SiteConfig, SchemaError> {
    load_settings_with(path, std::env::var(BASE_URL_ENV).ok())
}

/// Load settings from `path` with an explicit base URL override.
pub fn load_settings_with(
    path: &Path,
    base_url_override: Option<String>,
) -> Result<SiteConfig, SchemaError> {
    let mut config = if path.exists() {
        read_settings_file(path)?
    } else {
        tracing::debug!(path = %path.display(), "settings file not found, using defaults");
        SiteConfig::default()
    };

    if let Some(base_url) = base_url_override.filter(|url| !url.trim().is_empty()) {
        tracing::debug!(%base_url, "base URL overridden from {}", BASE_URL_ENV);
        config.base_url = base_url;
    }

    config.validated()
}

fn read_settings_file(path: &Path) -> Result<SiteConfig, SchemaError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| SchemaError::IoError(format!("Cannot read '{}': {}", path.display(), e)))?;
    if metadata.len() > MAX_CONFIG_FILE_SIZE {
        return Err(SchemaError::InvalidConfig(format!(
            "Settings file {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_CONFIG_FILE_SIZE
        )));
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| SchemaError::IoError(format!("Cannot read '{}': {}", path.display(), e)))?;
    toml::from_str(&contents).map_err(|e| {
        SchemaError::InvalidConfig(format!("Cannot parse '{}': {}", path.display(), e))
    })
}
