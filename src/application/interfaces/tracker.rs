use crate::error::GazelleResult;
use async_trait::async_trait;
use serde_json::Value;

/// Interface for anything that answers Gazelle `ajax.php` actions
///
/// Plugins depend on this trait rather than on [`GazelleClient`] so a fake
/// tracker can stand in for the real one.
///
/// [`GazelleClient`]: crate::client::GazelleClient
#[async_trait]
pub trait TrackerApi: Send + Sync {
    /// Calls an action and returns its uninterpreted payload
    async fn request(&self, action: &str, params: &[(&str, &str)]) -> GazelleResult<Value>;

    /// Base URL of the tracker, used to build links for users
    fn site_url(&self) -> &str;
}
