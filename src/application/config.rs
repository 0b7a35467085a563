/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Site configuration for Gazelle trackers
//!
//! The configuration source is a TOML document with one table per site:
//!
//! ```toml
//! [redacted]
//! url = "https://redacted.site"
//! api_token = "YOUR_TOKEN_HERE"
//!
//! [orpheus]
//! url = "https://orpheus.network"
//! username = "me"
//! password = "secret"
//! ```
//!
//! When `api_token` is present the username/password keys are ignored.

use crate::constants::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use crate::error::{AppError, GazelleResult};
use crate::utils::config::get_env_or_default;
use dotenv::dotenv;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// How the client proves its identity to the tracker
///
/// Resolved once from the configuration; the request path never has to
/// check flags to know which mode it runs in.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// Static API token sent raw in the `Authorization` header
    Token(String),
    /// Legacy username/password POST to `login.php`
    Form {
        /// Account name
        username: String,
        /// Account password
        password: String,
    },
}

impl AuthMode {
    /// Checks if this mode uses the API token header
    #[must_use]
    pub fn is_token(&self) -> bool {
        matches!(self, AuthMode::Token(_))
    }
}

impl fmt::Debug for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::Token(_) => f.write_str("Token(<redacted>)"),
            AuthMode::Form { username, .. } => f
                .debug_struct("Form")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// Validated settings for a single tracker site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Base URL of the site without trailing slash
    pub site_url: String,
    /// Authentication mode derived from the available credentials
    pub auth: AuthMode,
}

impl SiteConfig {
    /// Builds a token-authenticated site configuration
    pub fn with_token(url: &str, token: impl Into<String>) -> GazelleResult<Self> {
        SiteSection {
            url: Some(url.to_string()),
            api_token: Some(token.into()),
            ..SiteSection::default()
        }
        .resolve("<inline>")
    }

    /// Builds a form-login site configuration
    pub fn with_login(
        url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> GazelleResult<Self> {
        SiteSection {
            url: Some(url.to_string()),
            username: Some(username.into()),
            password: Some(password.into()),
            ..SiteSection::default()
        }
        .resolve("<inline>")
    }

    /// Joins a path onto the site URL
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.site_url, path.trim_start_matches('/'))
    }
}

/// Raw keys of one site table, before validation
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSection {
    /// Base URL of the site
    #[serde(default)]
    pub url: Option<String>,
    /// API token, preferred over username/password
    #[serde(default)]
    pub api_token: Option<String>,
    /// Legacy login name
    #[serde(default)]
    pub username: Option<String>,
    /// Legacy login password
    #[serde(default)]
    pub password: Option<String>,
}

impl fmt::Debug for SiteSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteSection")
            .field("url", &self.url)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl SiteSection {
    /// Validates the table and picks the authentication mode
    pub fn resolve(&self, site: &str) -> GazelleResult<SiteConfig> {
        let raw_url = non_empty(&self.url)
            .ok_or_else(|| AppError::configuration(format!("site '{site}' has no 'url'")))?;
        let parsed = Url::parse(raw_url).map_err(|e| {
            AppError::configuration(format!("site '{site}' has an invalid url '{raw_url}': {e}"))
        })?;
        if parsed.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "site '{site}' url '{raw_url}' is not a base url"
            )));
        }
        let site_url = raw_url.trim_end_matches('/').to_string();

        let auth = if let Some(token) = non_empty(&self.api_token) {
            AuthMode::Token(token.to_string())
        } else {
            // passwords are sent exactly as configured, without trimming
            let password = self.password.as_deref().filter(|p| !p.is_empty());
            match (non_empty(&self.username), password) {
                (Some(username), Some(password)) => AuthMode::Form {
                    username: username.to_string(),
                    password: password.to_string(),
                },
                _ => {
                    return Err(AppError::configuration(format!(
                        "site '{site}' has no 'api_token' and username/password are missing"
                    )));
                }
            }
        };

        Ok(SiteConfig { site_url, auth })
    }
}

/// Configuration source keyed by site identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GazelleConfig {
    sites: BTreeMap<String, SiteSection>,
}

impl GazelleConfig {
    /// Parses a TOML document with one table per site
    pub fn from_toml_str(content: &str) -> GazelleResult<Self> {
        toml::from_str(content)
            .map_err(|e| AppError::configuration(format!("invalid site configuration: {e}")))
    }

    /// Reads and parses a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> GazelleResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::configuration(format!(
                "unable to read configuration file {}: {e}",
                path.display()
            ))
        })?;
        debug!("Loaded site configuration from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Loads the file named by `GAZELLE_CONFIG`, after reading `.env`
    pub fn from_env() -> GazelleResult<Self> {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }
        let path = get_env_or_default(CONFIG_PATH_ENV, String::from(DEFAULT_CONFIG_PATH));
        Self::from_file(path)
    }

    /// Adds or replaces a site table
    pub fn insert(&mut self, site: impl Into<String>, section: SiteSection) {
        self.sites.insert(site.into(), section);
    }

    /// Names of all configured sites
    pub fn site_names(&self) -> impl Iterator<Item = &str> {
        self.sites.keys().map(String::as_str)
    }

    /// Resolves the settings of one site
    ///
    /// # Errors
    /// `AppError::Configuration` when the site is absent, has no usable url
    /// or has neither a token nor a complete username/password pair.
    pub fn site(&self, site: &str) -> GazelleResult<SiteConfig> {
        self.sites
            .get(site)
            .ok_or_else(|| {
                AppError::configuration(format!("site '{site}' missing from configuration"))
            })?
            .resolve(site)
    }
}
