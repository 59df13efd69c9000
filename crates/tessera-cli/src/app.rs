//! The `tessera` application: logging setup and command dispatch.

use std::path::PathBuf;

use tessera_core::{Block, Result};
use tessera_listing::{FailurePolicy, HttpIndexClient, IndexClient, ListingBlock, ListingConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::{CliArgs, Command};
use crate::config::TesseraConfig;
use crate::config_handlers;
use crate::source::read_block;

// ============================================================================
// Requests
// ============================================================================

/// Arguments of `tessera render`.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Authored block file.
    pub file: PathBuf,
    /// Block name.
    pub block_name: String,
    /// Base URL override.
    pub base_url: Option<String>,
    /// Filter value to select after the initial render.
    pub select: Option<String>,
    /// Failure policy override.
    pub on_error: Option<FailurePolicy>,
}

// ============================================================================
// TesseraCli
// ============================================================================

/// The CLI application.
pub struct TesseraCli {
    config: TesseraConfig,
    version: String,
}

impl TesseraCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let config = TesseraConfig::load(args.config.as_deref())?;
        Ok(Self::new(config))
    }

    /// Create a new CLI application.
    pub fn new(config: TesseraConfig) -> Self {
        Self {
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Loaded configuration.
    pub fn config(&self) -> &TesseraConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` if set, otherwise defaults based on verbosity flags.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be installed (tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(Command::Render {
                file,
                block_name,
                base_url,
                select,
                on_error,
            }) => {
                let request = RenderRequest {
                    file,
                    block_name,
                    base_url,
                    select,
                    on_error,
                };
                match self.render(&request).await? {
                    Some(html) => println!("{html}"),
                    None => tracing::warn!(
                        file = %request.file.display(),
                        "listing failed and no authored markup was captured"
                    ),
                }
                Ok(())
            }
            Some(Command::Inspect { file, block_name }) => {
                println!("{}", Self::inspect(&file, &block_name)?);
                Ok(())
            }
            Some(Command::Version) => {
                println!("tessera {}", self.version);
                Ok(())
            }
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => {
                println!("tessera {}; use --help for usage", self.version);
                Ok(())
            }
        }
    }

    /// Decorate the block in `request.file` against the live site.
    pub async fn render(&self, request: &RenderRequest) -> Result<Option<String>> {
        let block = read_block(&request.file, &request.block_name)?;
        let base_url = request
            .base_url
            .as_deref()
            .unwrap_or(self.config.site.base_url.as_str());
        let client = HttpIndexClient::new(base_url, self.config.timeout())?;
        tracing::info!(base_url = %client.base_url(), block = %block.name(), "rendering listing");

        self.decorate(&client, block, request.select.as_deref(), request.on_error)
            .await
    }

    /// Decorate `block` with `client` and return the markup to show.
    ///
    /// `None` means the page should be left as authored.
    pub async fn decorate<C: IndexClient + ?Sized>(
        &self,
        client: &C,
        block: Block,
        select: Option<&str>,
        on_error: Option<FailurePolicy>,
    ) -> Result<Option<String>> {
        let mut options = self.config.decorate_options();
        if let Some(policy) = on_error {
            options.on_error = policy;
        }

        let mut listing = ListingBlock::new(block);
        let mut decoration = listing.decorate(client, &options).await?;

        if let Some(value) = select {
            match decoration.session_mut() {
                Some(session) => {
                    if !session.select(Some(value)) {
                        tracing::warn!(value, "no filter control for selection");
                    }
                }
                None => tracing::warn!(value, "selection ignored for failed listing"),
            }
        }

        Ok(decoration.to_html())
    }

    /// Parsed block configuration as pretty JSON.
    pub fn inspect(file: &std::path::Path, block_name: &str) -> Result<String> {
        let block = read_block(file, block_name)?;
        let config = ListingConfig::from_block(&block);
        serde_json::to_string_pretty(&config)
            .map_err(|e| tessera_core::Error::invalid_data(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================
