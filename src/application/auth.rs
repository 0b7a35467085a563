/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Authentication for Gazelle sites
//!
//! This module resolves a [`SiteConfig`] into a ready [`Session`]:
//! - Token mode needs no handshake, the header is already on the transport
//! - Form mode POSTs to `login.php`, then calls `index` for the authkey

use crate::application::config::{AuthMode, SiteConfig};
use crate::constants::{AJAX_PATH, INDEX_ACTION, LOGIN_PATH};
use crate::error::{AppError, GazelleResult};
use crate::model::http::{Transport, fetch_ajax};
use crate::model::requests::{AjaxQuery, LoginForm};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use std::fmt;
use tracing::{debug, error, info, warn};

/// Construction stages of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// Transport built, nothing sent yet
    Unauthenticated,
    /// Login POST or bootstrap call in flight
    Authenticating,
    /// Requests may be issued
    Ready,
}

/// Credentials derived during authentication
///
/// Lives as long as the client that owns it and is never persisted.
#[derive(Clone, PartialEq, Eq)]
pub enum Session {
    /// The token header authenticates every call
    Token,
    /// Cookie session from a form login plus the bootstrapped authkey
    Form {
        /// User id reported by `index`, when the site sends one
        user_id: Option<u64>,
        /// Key appended as `auth` to every call
        authkey: String,
    },
}

impl Session {
    /// Checks if this session uses the token header
    #[must_use]
    pub fn is_token(&self) -> bool {
        matches!(self, Session::Token)
    }

    /// Authkey to append to requests, legacy mode only
    #[must_use]
    pub fn authkey(&self) -> Option<&str> {
        match self {
            Session::Token => None,
            Session::Form { authkey, .. } => Some(authkey),
        }
    }

    /// User id obtained after a form login
    #[must_use]
    pub fn user_id(&self) -> Option<u64> {
        match self {
            Session::Token => None,
            Session::Form { user_id, .. } => *user_id,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Session::Token => f.write_str("Token"),
            Session::Form { user_id, .. } => f
                .debug_struct("Form")
                .field("user_id", user_id)
                .field("authkey", &"<redacted>")
                .finish(),
        }
    }
}

/// Drives the construction state machine for one site
pub struct Authenticator<'a> {
    site: &'a SiteConfig,
    transport: &'a Transport,
    state: AuthState,
}

impl<'a> Authenticator<'a> {
    /// Creates an authenticator in the `Unauthenticated` state
    pub fn new(site: &'a SiteConfig, transport: &'a Transport) -> Self {
        Self {
            site,
            transport,
            state: AuthState::Unauthenticated,
        }
    }

    /// Current stage
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state
    }

    fn transition(&mut self, next: AuthState) {
        debug!("{}: {:?} -> {:?}", self.site.site_url, self.state, next);
        self.state = next;
    }

    /// Establishes the session according to the configured mode
    ///
    /// # Returns
    /// * `Ok(Session)` - Session ready for requests
    /// * `Err(AppError::Authentication)` - Login rejected or failed
    /// * `Err(AppError::Protocol)` - Bootstrap `index` call failed
    pub async fn authenticate(&mut self) -> GazelleResult<Session> {
        let site = self.site;
        let session = match &site.auth {
            AuthMode::Token(_) => {
                debug!("Using API token for {}", site.site_url);
                Session::Token
            }
            AuthMode::Form { username, password } => {
                self.transition(AuthState::Authenticating);
                self.login_with_form(username, password).await?;
                self.bootstrap().await?
            }
        };
        self.transition(AuthState::Ready);
        Ok(session)
    }

    /// Performs the classic POST login
    async fn login_with_form(&self, username: &str, password: &str) -> GazelleResult<()> {
        let login_url = self.site.endpoint(LOGIN_PATH);
        info!("Logging in to {} as {}", self.site.site_url, username);

        let response = self
            .transport
            .login
            .post(&login_url)
            .form(&LoginForm { username, password })
            .send()
            .await
            .map_err(|e| {
                error!("Login request to {} failed: {}", login_url, e);
                AppError::authentication(format!("login request failed: {e}"))
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Login to {} answered HTTP {}", self.site.site_url, status);
            return Err(AppError::authentication(format!(
                "HTTP {} during login",
                status.as_u16()
            )));
        }

        if is_login_page(response.url(), &login_url) {
            warn!("Login page re-served for {}", username);
            return Err(AppError::authentication(
                "invalid username/password combination",
            ));
        }

        info!("✓ Login successful on {}", self.site.site_url);
        Ok(())
    }

    /// Fetches `index` to learn the user id and authkey
    async fn bootstrap(&self) -> GazelleResult<Session> {
        let url = self.site.endpoint(AJAX_PATH);
        let query = AjaxQuery {
            action: INDEX_ACTION,
            params: &[],
            authkey: None,
        };
        let payload = fetch_ajax(&self.transport.api, &url, &query).await?;
        let session = session_from_index(&payload)?;
        debug!("Bootstrapped session for user {:?}", session.user_id());
        Ok(session)
    }
}

/// Reads the user id and authkey out of an `index` payload
///
/// Only `authkey` is required. `id` may come as a number or a numeric
/// string; every other field is ignored whatever its type.
pub fn session_from_index(payload: &Value) -> GazelleResult<Session> {
    let authkey = payload
        .get("authkey")
        .and_then(Value::as_str)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| AppError::protocol(format!("'{INDEX_ACTION}' response has no authkey")))?;

    let user_id = payload.get("id").and_then(|id| {
        id.as_u64()
            .or_else(|| id.as_str().and_then(|s| s.trim().parse().ok()))
    });

    Ok(Session::Form {
        user_id,
        authkey: authkey.to_string(),
    })
}

/// Checks whether the final URL of the login POST is the login page again
///
/// Compares the whole URL with trailing slashes removed, and also rejects a
/// final URL on the same origin whose path is still the login script, with
/// or without a query.
#[must_use]
pub fn is_login_page(final_url: &Url, login_url: &str) -> bool {
    if final_url.as_str().trim_end_matches('/') == login_url.trim_end_matches('/') {
        return true;
    }
    match Url::parse(login_url) {
        Ok(login) => {
            final_url.origin() == login.origin()
                && final_url.path().trim_end_matches('/') == login.path().trim_end_matches('/')
        }
        Err(_) => false,
    }
}
