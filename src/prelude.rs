/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # Gazelle Client Prelude
//!
//! Brings the commonly used types into scope with one import:
//!
//! ```rust
//! use gazelle_client::prelude::*;
//! ```

// ============================================================================
// CONFIGURATION
// ============================================================================

pub use crate::application::config::{AuthMode, GazelleConfig, SiteConfig, SiteSection};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

pub use crate::error::{AppError, ErrorKind, GazelleResult};

// ============================================================================
// CLIENT AND SESSION
// ============================================================================

pub use crate::application::auth::{AuthState, Session};
pub use crate::application::interfaces::tracker::TrackerApi;
pub use crate::client::GazelleClient;
pub use crate::model::responses::{ApiResponse, IndexInfo};

// ============================================================================
// STORAGE AND UTILITIES
// ============================================================================

pub use crate::storage::preferences::{PreferenceStore, user_key};
pub use crate::utils::config::{get_env_or_default, get_env_or_none};
pub use crate::utils::logger::setup_logger;
