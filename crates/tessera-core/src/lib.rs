//! Tessera Core: shared types, errors, and rendering primitives.
//!
//! This crate provides the foundational types used across all Tessera crates.
//! It has no internal Tessera dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`block`]: Authored block structure (rows of cells)
//! - [`dom`]: Element tree and HTML serialization
//! - [`util`]: Slug normalization

#![doc = include_str!("../README.md")]

pub mod block;
pub mod dom;
pub mod error;
pub mod util;

// Re-export key types at crate root for convenience
pub use block::{Block, Cell, Row};
pub use dom::{Element, Node};
pub use error::{Error, Result};

// Convenience re-exports from util
pub use util::slug::slugify;
