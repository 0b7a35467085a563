/// Authentication and session handling
pub mod auth;
/// Site configuration source
pub mod config;
/// Traits at the seams of the client
pub mod interfaces;
