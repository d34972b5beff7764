//! Shared types for LoboHub
//!
//! Error codes and the API envelope, data models exchanged with the clients,
//! and the pure family achievement engine.

pub mod achievement;
pub mod error;
pub mod models;
pub mod util;
