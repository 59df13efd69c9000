//! Application configuration.
//!
//! [`TesseraConfig`] loads from TOML files, environment variables, and
//! defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `TESSERA_CONFIG` environment variable
//! 3. XDG default: `~/.config/tessera/config.toml`
//! 4. Built-in defaults
//!
//! `TESSERA_<SECTION>_<KEY>` variables are layered over whichever file was
//! found. Environment values arrive as strings, so only string settings can
//! be overridden that way.

use confyg::{Confygery, env};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use tessera_core::{Error, Result};
use tessera_listing::{DEFAULT_EMPTY_MESSAGE, DEFAULT_INDEX_PATH, DecorateOptions, FailurePolicy};

/// Environment prefix and config directory name.
pub const APP_NAME: &str = "tessera";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the `tessera` CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TesseraConfig {
    /// Site the index is served from.
    pub site: SiteConfig,

    /// HTTP fetch settings.
    pub fetch: FetchConfig,

    /// Listing fallbacks.
    pub listing: ListingSettings,
}

/// Site configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL for site-relative index paths.
    pub base_url: String,

    /// Canonical index path, tried after any configured candidate.
    pub index_path: String,
}

/// Fetch configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds; `0` disables it.
    pub timeout_secs: u64,
}

/// Listing fallback configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingSettings {
    /// Failure policy when the index is unreachable.
    pub on_error: FailurePolicy,

    /// Empty-state text.
    pub empty_message: String,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            index_path: DEFAULT_INDEX_PATH.to_string(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            on_error: FailurePolicy::default(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl TesseraConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("TESSERA");
        env_opts.add_section("site");
        env_opts.add_section("fetch");
        env_opts.add_section("listing");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        tracing::debug!(base_url = %config.site.base_url, "configuration loaded");
        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("TESSERA_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_NAME).join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        match self.fetch.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Site-wide decoration settings.
    pub fn decorate_options(&self) -> DecorateOptions {
        DecorateOptions::default()
            .with_index_path(self.site.index_path.clone())
            .with_on_error(self.listing.on_error)
            .with_empty_message(self.listing.empty_message.clone())
    }
}

// ============================================================================
// Tests
// ============================================================================
