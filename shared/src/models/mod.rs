//! Data models
//!
//! Shared between lobo-cloud and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64`; timestamps are UTC milliseconds.

pub mod achievement;
pub mod activity;

// Re-exports
pub use achievement::*;
pub use activity::*;
