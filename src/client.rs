/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Client for the Gazelle JSON API
//!
//! This module provides a small client that handles:
//! - Token authentication through the `Authorization` header
//! - Legacy username/password login with cookie session and authkey
//! - One generic call primitive for every `ajax.php` action
//!
//! # Example
//! ```ignore
//! use gazelle_client::prelude::*;
//!
//! let config = GazelleConfig::from_env()?;
//! let client = GazelleClient::from_config(&config, "redacted").await?;
//!
//! let torrent = client.request("torrent", &[("id", "42")]).await?;
//! ```

use crate::application::auth::{Authenticator, Session};
use crate::application::config::{GazelleConfig, SiteConfig};
use crate::application::interfaces::tracker::TrackerApi;
use crate::constants::{AJAX_PATH, INDEX_ACTION};
use crate::error::{AppError, GazelleResult};
use crate::model::http::{Transport, fetch_ajax};
use crate::model::requests::AjaxQuery;
use crate::model::responses::IndexInfo;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

/// Authenticated client for one Gazelle site
///
/// Construction performs the whole handshake, so a value of this type is
/// always ready for requests. The HTTP session and its cookies are released
/// when the client is dropped.
pub struct GazelleClient {
    site: SiteConfig,
    ajax_url: String,
    transport: Transport,
    session: Session,
}

impl GazelleClient {
    /// Creates a client and authenticates against the site
    ///
    /// # Arguments
    /// * `site` - Validated site settings
    ///
    /// # Returns
    /// * `Ok(GazelleClient)` - Client ready to use
    /// * `Err(AppError)` - Configuration, authentication or bootstrap failure
    pub async fn connect(site: SiteConfig) -> GazelleResult<Self> {
        let transport = Transport::new(&site.auth)?;
        let session = Authenticator::new(&site, &transport).authenticate().await?;
        info!(
            "Connected to {} using {} auth",
            site.site_url,
            if session.is_token() { "token" } else { "form" }
        );

        Ok(Self {
            ajax_url: site.endpoint(AJAX_PATH),
            site,
            transport,
            session,
        })
    }

    /// Creates a client for a site of a configuration source
    ///
    /// # Errors
    /// `AppError::Configuration` when the site is missing or has no usable
    /// credentials, then anything [`GazelleClient::connect`] returns.
    pub async fn from_config(config: &GazelleConfig, site: &str) -> GazelleResult<Self> {
        Self::connect(config.site(site)?).await
    }

    /// Calls an `ajax.php` action
    ///
    /// # Arguments
    /// * `action` - Action name, passed through untouched
    /// * `params` - Extra query parameters
    ///
    /// # Returns
    /// * `Ok(Value)` - The `response` field of the reply, uninterpreted
    /// * `Err(AppError::Protocol)` - Transport failure, invalid JSON or a
    ///   status other than `"success"`
    pub async fn request(&self, action: &str, params: &[(&str, &str)]) -> GazelleResult<Value> {
        let query = AjaxQuery {
            action,
            params,
            authkey: self.session.authkey(),
        };
        fetch_ajax(&self.transport.api, &self.ajax_url, &query).await
    }

    /// Calls an action and decodes its payload into `T`
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        action: &str,
        params: &[(&str, &str)],
    ) -> GazelleResult<T> {
        let payload = self.request(action, params).await?;
        serde_json::from_value(payload).map_err(|e| {
            AppError::protocol(format!("unexpected '{action}' response: {e}"))
        })
    }

    /// Fetches the account summary of the authenticated user
    pub async fn index(&self) -> GazelleResult<IndexInfo> {
        self.request_as(INDEX_ACTION, &[]).await
    }

    /// Session derived during construction
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Base URL of the site
    pub fn site_url(&self) -> &str {
        &self.site.site_url
    }
}

#[async_trait]
impl TrackerApi for GazelleClient {
    async fn request(&self, action: &str, params: &[(&str, &str)]) -> GazelleResult<Value> {
        GazelleClient::request(self, action, params).await
    }

    fn site_url(&self) -> &str {
        GazelleClient::site_url(self)
    }
}
