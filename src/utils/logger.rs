/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::utils::config::get_env_or_default;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

static INIT: Once = Once::new();

/// Environment variable holding the log level (`TRACE` to `ERROR`)
pub const LOG_LEVEL_ENV: &str = "LOGLEVEL";

/// Installs the global `tracing` subscriber
///
/// Safe to call many times; only the first call has an effect. The level is
/// read from `LOGLEVEL` and defaults to `INFO`.
pub fn setup_logger() {
    INIT.call_once(|| {
        let level = parse_level(&get_env_or_default(LOG_LEVEL_ENV, String::from("INFO")));

        let subscriber = FmtSubscriber::builder().with_max_level(level).finish();

        if tracing::subscriber::set_global_default(subscriber).is_err() {
            tracing::debug!("Global tracing subscriber already installed");
        }
    });
}

fn parse_level(raw: &str) -> Level {
    match raw.to_uppercase().as_str() {
        "TRACE" => Level::TRACE,
        "DEBUG" => Level::DEBUG,
        "WARN" | "WARNING" => Level::WARN,
        "ERROR" => Level::ERROR,
        _ => Level::INFO,
    }
}
