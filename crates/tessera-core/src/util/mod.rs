//! Utility modules for common text helpers.
//!
//! # Modules
//!
//! - [`slug`]: Header and key normalization for authored labels

pub mod slug;
