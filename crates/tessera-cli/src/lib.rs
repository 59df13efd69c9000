//! Command-line front end for Tessera.
//!
//! # Modules
//!
//! - [`cli`]: Argument parsing
//! - [`config`]: Application configuration (`TesseraConfig`)
//! - [`config_handlers`]: `tessera config ...` subcommands
//! - [`source`]: Reading authored blocks from HTML or CSV
//! - [`app`]: Command dispatch and logging setup

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod source;

pub use app::TesseraCli;
pub use cli::{CliArgs, Command, ConfigAction};
pub use config::TesseraConfig;
