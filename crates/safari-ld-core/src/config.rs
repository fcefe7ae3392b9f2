//! # Site Configuration
//!
//! The single deployment-wide value the engine reads: canonical base URL,
//! organization profile, and defaults for language and currency.
//!
//! Loading it (file, environment) is the binary's job. The engine only
//! validates and normalizes it, once, before any document is built.

use crate::SchemaError;
use crate::primitives::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};

/// Organization facts repeated across every document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationProfile {
    pub name: String,
    pub legal_name: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub founding_year: Option<u16>,
    /// Social profiles, emitted as `sameAs`.
    pub same_as: Vec<String>,
}

impl Default for OrganizationProfile {
    fn default() -> Self {
        Self {
            name: "Savannah Trails Safaris".to_string(),
            legal_name: None,
            description: None,
            logo: None,
            email: None,
            telephone: None,
            founding_year: None,
            same_as: Vec::new(),
        }
    }
}

/// Deployment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Canonical base URL, without trailing slash once validated.
    pub base_url: String,
    pub site_name: String,
    /// BCP 47 language tag for `inLanguage`.
    pub language: String,
    /// ISO 4217 code used when a price carries none.
    pub price_currency: String,
    pub organization: OrganizationProfile,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            site_name: "Savannah Trails".to_string(),
            language: "en".to_string(),
            price_currency: "USD".to_string(),
            organization: OrganizationProfile::default(),
        }
    }
}

impl SiteConfig {
    /// Validate and normalize the configuration.
    ///
    /// - `base_url` must be `http://` or `https://` with a non-empty host;
    ///   trailing slashes are removed
    /// - organization name, language and currency must be non-blank
    pub fn validated(mut self) -> Result<Self, SchemaError> {
        let base = self.base_url.trim().trim_end_matches('/').to_string();
        let host = base
            .strip_prefix("https://")
            .or_else(|| base.strip_prefix("http://"))
            .ok_or_else(|| {
                SchemaError::InvalidConfig(format!(
                    "base_url '{}' must start with http:// or https://",
                    self.base_url
                ))
            })?;
        if host.is_empty() || host.contains(['/', '?', '#', ' ']) {
            return Err(SchemaError::InvalidConfig(format!(
                "base_url '{}' must be a bare origin",
                self.base_url
            )));
        }
        self.base_url = base;

        for (field, value) in [
            ("organization.name", &self.organization.name),
            ("language", &self.language),
            ("price_currency", &self.price_currency),
        ] {
            if value.trim().is_empty() {
                return Err(SchemaError::InvalidConfig(format!("{} is empty", field)));
            }
        }

        Ok(self)
    }
}
