//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tessera_listing::FailurePolicy;

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "tessera", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "TESSERA_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decorate an authored block and print the resulting markup.
    Render {
        /// Authored block (`.html`, `.htm`, or `.csv`).
        file: PathBuf,

        /// Block name (class of the block element).
        #[arg(short, long, default_value = "content-listing")]
        block_name: String,

        /// Site base URL (overrides `site.base_url`).
        #[arg(long)]
        base_url: Option<String>,

        /// Filter value to select after the initial render.
        #[arg(short, long)]
        select: Option<String>,

        /// Failure policy (overrides `listing.on_error`).
        #[arg(long)]
        on_error: Option<FailurePolicy>,
    },

    /// Print the parsed block configuration as JSON.
    Inspect {
        /// Authored block (`.html`, `.htm`, or `.csv`).
        file: PathBuf,

        /// Block name (class of the block element).
        #[arg(short, long, default_value = "content-listing")]
        block_name: String,
    },

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Print the effective configuration as TOML.
    Show,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "site.base_url").
        key: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
