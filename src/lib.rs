/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # Gazelle Client
//!
//! Client for the JSON API (`ajax.php`) of Gazelle-family tracker sites.
//!
//! ## Features
//!
//! - **Two authentication modes**: API token header, or legacy
//!   username/password form login with cookie session and authkey
//! - **Generic calls**: one `request(action, params)` primitive returning the
//!   uninterpreted `response` payload
//! - **Site configuration**: TOML source keyed by site identifier
//! - **Preference store**: small per-user mapping persisted to disk with an
//!   explicit flush
//!
//! ## Quick start
//!
//! ```ignore
//! use gazelle_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     setup_logger();
//!     let site = SiteConfig::with_token("https://redacted.site", "TOKEN")?;
//!     let client = GazelleClient::connect(site).await?;
//!     let me = client.index().await?;
//!     println!("{me}");
//!     Ok(())
//! }
//! ```

/// Application layer: configuration, authentication and interfaces
pub mod application;
/// Authenticated client for one site
pub mod client;
/// Crate wide constants
pub mod constants;
/// Error types
pub mod error;
/// HTTP transport and wire models
pub mod model;
/// Commonly used re-exports
pub mod prelude;
/// On-disk preference store
pub mod storage;
/// Environment and logging helpers
pub mod utils;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
