/// Tracker API interface
pub mod tracker;
