/// Per-user preference store persisted to disk
pub mod preferences;

pub use preferences::{PreferenceStore, user_key};
