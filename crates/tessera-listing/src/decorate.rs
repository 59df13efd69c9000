//! Block decoration.
//!
//! [`ListingBlock`] runs one authored block through the whole listing:
//! configuration, index resolution, the item pipeline, and the initial
//! render. Each instance decorates at most once.

use serde::Serialize;
use std::fmt;

use tessera_core::{Block, Element, Error, Result};

use crate::config::{FailurePolicy, ListingConfig};
use crate::fetch::{DEFAULT_INDEX_PATH, FetchOutcome, IndexClient, resolve_index};
use crate::pipeline;
use crate::render::{class, render_empty_state, render_grid, render_shell};
use crate::session::ListingSession;

/// Text shown by the empty-state fallback when the block sets none.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No content available.";

// ============================================================================
// Options
// ============================================================================

/// Site-wide decoration settings. Per-block keys override the policy and
/// the empty-state text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecorateOptions {
    /// Canonical index path tried after every configured candidate.
    pub index_path: String,
    /// What to show when the index cannot be reached at all.
    pub on_error: FailurePolicy,
    /// Empty-state text for [`FailurePolicy::Empty`].
    pub empty_message: String,
}

impl Default for DecorateOptions {
    fn default() -> Self {
        Self {
            index_path: DEFAULT_INDEX_PATH.to_string(),
            on_error: FailurePolicy::default(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }
}

impl DecorateOptions {
    /// Set the canonical index path.
    pub fn with_index_path(mut self, path: impl Into<String>) -> Self {
        self.index_path = path.into();
        self
    }

    /// Set the site-wide failure policy.
    pub fn with_on_error(mut self, policy: FailurePolicy) -> Self {
        self.on_error = policy;
        self
    }

    /// Set the site-wide empty-state text.
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }
}

// ============================================================================
// Phase
// ============================================================================

/// Lifecycle of one decoration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Not started.
    #[default]
    Idle,
    /// Configuration parsed, index being resolved.
    Loading,
    /// Listing rendered, possibly with zero cards.
    Rendered,
    /// The index could not be reached.
    Failed,
}

impl Phase {
    /// Whether the decoration has finished.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rendered | Self::Failed)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Rendered => "rendered",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Result
// ============================================================================

/// What a failed decoration leaves on the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fallback {
    /// The authored markup, when the block carried any.
    Original(Option<String>),
    /// The listing shell with an empty grid and a message.
    EmptyState(Element),
}

/// Outcome of [`ListingBlock::decorate`].
#[derive(Debug)]
pub enum Decoration {
    /// The listing was rendered.
    Rendered(ListingSession),
    /// The index was unreachable and the failure policy was applied.
    Failed {
        /// The last transport error.
        error: Error,
        /// The visible result.
        fallback: Fallback,
    },
}

impl Decoration {
    /// The session, for rendered listings.
    pub fn session(&self) -> Option<&ListingSession> {
        match self {
            Self::Rendered(session) => Some(session),
            Self::Failed { .. } => None,
        }
    }

    /// Mutable session, for applying filter selections.
    pub fn session_mut(&mut self) -> Option<&mut ListingSession> {
        match self {
            Self::Rendered(session) => Some(session),
            Self::Failed { .. } => None,
        }
    }

    /// Markup to put on the page. `None` means leave the page as authored
    /// when no original markup was captured.
    pub fn to_html(&self) -> Option<String> {
        match self {
            Self::Rendered(session) => Some(session.container().to_html()),
            Self::Failed {
                fallback: Fallback::Original(markup),
                ..
            } => markup.clone(),
            Self::Failed {
                fallback: Fallback::EmptyState(container),
                ..
            } => Some(container.to_html()),
        }
    }
}

// ============================================================================
// ListingBlock
// ============================================================================

/// One authored `content-listing` block and its decoration state.
#[derive(Clone, Debug)]
pub struct ListingBlock {
    block: Block,
    phase: Phase,
}

impl ListingBlock {
    /// Wrap an authored block.
    pub fn new(block: Block) -> Self {
        Self {
            block,
            phase: Phase::Idle,
        }
    }

    /// The authored block.
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Decorate the block.
    ///
    /// An index that answered without usable data still renders (zero
    /// cards). Only an unreachable index moves the block to
    /// [`Phase::Failed`], where the effective [`FailurePolicy`] decides the
    /// fallback.
    ///
    /// # Errors
    ///
    /// Returns [`Error::State`] when the block was already decorated.
    pub async fn decorate<C: IndexClient + ?Sized>(
        &mut self,
        client: &C,
        options: &DecorateOptions,
    ) -> Result<Decoration> {
        if self.phase != Phase::Idle {
            return Err(Error::state(format!(
                "block '{}' already decorated (phase: {})",
                self.block.name(),
                self.phase
            )));
        }

        let config = ListingConfig::from_block(&self.block);
        self.phase = Phase::Loading;
        tracing::debug!(block = %self.block.name(), keys = config.len(), "decorating listing");

        let items = match resolve_index(client, &config, &options.index_path).await {
            FetchOutcome::Loaded(items) => items,
            FetchOutcome::Empty => Vec::new(),
            FetchOutcome::Failed(error) => {
                self.phase = Phase::Failed;
                let policy = config.on_error().unwrap_or(options.on_error);
                tracing::error!(
                    block = %self.block.name(),
                    error = %error,
                    policy = %policy,
                    "listing index unreachable"
                );
                let fallback = self.fallback(&config, policy, options);
                return Ok(Decoration::Failed { error, fallback });
            }
        };

        let items = pipeline::apply(&items, &config);
        let session = ListingSession::new(config, items);
        self.phase = Phase::Rendered;
        tracing::debug!(
            block = %self.block.name(),
            items = session.items().len(),
            filters = session.filter_bar().is_some(),
            "listing rendered"
        );
        Ok(Decoration::Rendered(session))
    }

    fn fallback(
        &self,
        config: &ListingConfig,
        policy: FailurePolicy,
        options: &DecorateOptions,
    ) -> Fallback {
        match policy {
            FailurePolicy::Original => {
                Fallback::Original(self.block.original().map(str::to_string))
            }
            FailurePolicy::Empty => {
                let message = config
                    .empty_message()
                    .unwrap_or(options.empty_message.as_str());
                let mut container = render_shell(config);
                if let Some(host) = container.find_mut(class::CARDS_HOST) {
                    host.push(render_grid(&[], config));
                    host.push(render_empty_state(message));
                }
                Fallback::EmptyState(container)
            }
        }
    }
}
