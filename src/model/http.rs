/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! HTTP transport for Gazelle sites
//!
//! Two `reqwest` clients share one cookie jar: the login client follows
//! redirects so the final URL of the login POST can be inspected, the API
//! client never does so a redirect to the login page shows up as a bad
//! response instead of an HTML page silently fetched.

use crate::application::config::AuthMode;
use crate::constants::{
    ACCEPT, ACCEPT_CHARSET, ACCEPT_LANGUAGE, CACHE_CONTROL, HTTP_TIMEOUT_SECS,
    LOGIN_MAX_REDIRECTS, USER_AGENT,
};
use crate::error::{AppError, GazelleResult};
use crate::model::requests::AjaxQuery;
use crate::model::responses::ApiResponse;
use reqwest::cookie::Jar;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Pair of HTTP clients sharing the session cookies
#[derive(Debug, Clone)]
pub struct Transport {
    /// Client used for `login.php`, follows redirects
    pub login: Client,
    /// Client used for `ajax.php`, does not follow redirects
    pub api: Client,
}

impl Transport {
    /// Builds both clients with the static headers of `auth`
    ///
    /// # Errors
    /// `AppError::Configuration` if the token cannot be used as a header
    /// value or the TLS backend fails to initialise.
    pub fn new(auth: &AuthMode) -> GazelleResult<Self> {
        let headers = default_headers(auth)?;
        let jar = Arc::new(Jar::default());
        let timeout = Duration::from_secs(HTTP_TIMEOUT_SECS);

        let build = |policy: Policy| {
            Client::builder()
                .user_agent(USER_AGENT)
                .default_headers(headers.clone())
                .cookie_provider(jar.clone())
                .redirect(policy)
                .timeout(timeout)
                .build()
                .map_err(|e| AppError::configuration(format!("unable to build HTTP client: {e}")))
        };

        Ok(Self {
            login: build(Policy::limited(LOGIN_MAX_REDIRECTS))?,
            api: build(Policy::none())?,
        })
    }
}

/// Static headers sent on every request, plus the token in token mode
///
/// Gazelle expects the raw token, without a scheme such as `Bearer`.
pub fn default_headers(auth: &AuthMode) -> GazelleResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE));
    headers.insert(header::ACCEPT_CHARSET, HeaderValue::from_static(ACCEPT_CHARSET));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL));

    if let AuthMode::Token(token) = auth {
        let mut value = HeaderValue::from_str(token).map_err(|_| {
            AppError::configuration("api_token contains characters not allowed in a header")
        })?;
        value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, value);
    }
    Ok(headers)
}

/// Performs one `ajax.php` GET and unwraps the response envelope
///
/// # Arguments
/// * `client` - API client of the session
/// * `url` - Full URL of `ajax.php`
/// * `query` - Action, caller parameters and optional authkey
///
/// # Returns
/// * `Ok(Value)` - The `response` field of a successful call
/// * `Err(AppError::Protocol)` - Transport failure, invalid JSON or a
///   status other than `"success"`
pub async fn fetch_ajax(client: &Client, url: &str, query: &AjaxQuery<'_>) -> GazelleResult<Value> {
    let action = query.action;
    debug!("GET {} action={}", url, action);

    let response = client
        .get(url)
        .query(&query.pairs())
        .send()
        .await
        .map_err(|e| {
            error!("Gazelle API call '{}' could not be sent: {}", action, e);
            AppError::protocol(format!("Gazelle API call '{action}' failed to send: {e}"))
        })?;

    let status = response.status();
    debug!("Response status: {}", status);

    let body = response.bytes().await.map_err(|e| {
        AppError::protocol(format!(
            "Gazelle API call '{action}' body could not be read (HTTP {status}): {e}"
        ))
    })?;

    let value: Value = serde_json::from_slice(&body).map_err(|e| {
        error!("Invalid JSON in ajax response for '{}' (HTTP {})", action, status);
        AppError::protocol(format!(
            "invalid JSON in ajax response for '{action}' (HTTP {status}): {e}"
        ))
    })?;

    ApiResponse::from_value(value).into_payload(action)
}
