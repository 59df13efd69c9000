//! Tessera Listing: the `content-listing` block.
//!
//! The block reads its configuration from authored rows, resolves a JSON
//! index, narrows and orders the items, and renders cards plus optional
//! filter controls into an element tree.
//!
//! # Modules
//!
//! - [`config`]: Row parsing, canonical keys, and variant presets
//! - [`fetch`]: Candidate URLs, the index client, and index resolution
//! - [`pipeline`]: Path, field, and tag filters; sorting; limits
//! - [`fields`]: Card field mapping with fallbacks
//! - [`render`]: Card grid, listing shell, and empty state
//! - [`filters`]: Filter bar model and rendering
//! - [`session`]: Per-block state and filter selection
//! - [`decorate`]: The decoration lifecycle
//! - [`mock`]: Static index client for tests

#![doc = include_str!("../README.md")]

pub mod config;
pub mod decorate;
pub mod fetch;
pub mod fields;
pub mod filters;
pub mod item;
pub mod mock;
pub mod pipeline;
pub mod render;
pub mod session;

pub use config::{FailurePolicy, ListingConfig, SortMode};
pub use decorate::{DEFAULT_EMPTY_MESSAGE, DecorateOptions, Decoration, Fallback, ListingBlock, Phase};
pub use fetch::{
    DEFAULT_INDEX_PATH, FetchOutcome, HttpIndexClient, IndexClient, IndexResponse, resolve_index,
};
pub use fields::{CardFields, map_fields};
pub use filters::{FilterBar, FilterControl};
pub use item::{ContentItem, FieldValue};
pub use mock::StaticIndexClient;
pub use session::ListingSession;
