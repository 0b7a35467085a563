/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use std::env;
use std::fmt::Debug;
use std::str::FromStr;
use tracing::warn;

/// Reads and parses an environment variable, falling back to `default`
///
/// A variable that is set but cannot be parsed is logged and replaced by the
/// default, so a typo never aborts start-up.
///
/// # Arguments
/// * `env_var` - Name of the environment variable
/// * `default` - Value used when the variable is missing, empty or invalid
pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match get_env_or_none::<String>(env_var) {
        Some(raw) => raw.parse::<T>().unwrap_or_else(|e| {
            warn!("Ignoring {}={:?}: {:?}", env_var, raw, e);
            default
        }),
        None => default,
    }
}

/// Reads and parses an environment variable
///
/// Returns `None` when the variable is missing, blank or cannot be parsed.
pub fn get_env_or_none<T: FromStr>(env_var: &str) -> Option<T>
where
    <T as FromStr>::Err: Debug,
{
    let raw = env::var(env_var).ok()?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<T>().ok()
}
