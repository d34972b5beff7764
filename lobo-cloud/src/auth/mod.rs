//! Authentication middleware for family members

pub mod family_auth;

pub use family_auth::FamilyIdentity;
