//! Per-block listing state.
//!
//! A session owns everything one decorated listing needs after the fetch:
//! the configuration, the pipeline output, the optional filter bar, and the
//! rendered container. Selecting a filter re-renders the cards host from
//! the in-memory items only.

use serde::Serialize;

use tessera_core::Element;

use crate::config::ListingConfig;
use crate::filters::FilterBar;
use crate::item::ContentItem;
use crate::pipeline::field_matches;
use crate::render::{class, render_into, render_shell};

/// State for one decorated listing.
#[derive(Clone, Debug, Serialize)]
pub struct ListingSession {
    config: ListingConfig,
    items: Vec<ContentItem>,
    filter_bar: Option<FilterBar>,
    #[serde(skip)]
    container: Element,
}

impl ListingSession {
    /// Build the session and its initial render with no active filter.
    ///
    /// `items` is the pipeline output. The filter bar is built only when
    /// `filter-field` is set, `enable-filters` is `true`, and the items
    /// carry at least one value for the field.
    pub fn new(config: ListingConfig, items: Vec<ContentItem>) -> Self {
        let filter_bar = match config.filter_field() {
            Some(field) if config.enable_filters() => FilterBar::build(&items, field),
            _ => None,
        };

        let mut container = render_shell(&config);
        if let (Some(bar), Some(host)) = (&filter_bar, container.find_mut(class::FILTERS_HOST)) {
            host.push(bar.render());
        }

        let mut session = Self {
            config,
            items,
            filter_bar,
            container,
        };
        session.render_cards();
        session
    }

    /// Parsed configuration.
    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    /// The in-memory item set (already filtered, sorted and limited).
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// The filter bar, when one is shown.
    pub fn filter_bar(&self) -> Option<&FilterBar> {
        self.filter_bar.as_ref()
    }

    /// Active selection (`None` means "All").
    pub fn active(&self) -> Option<&str> {
        self.filter_bar.as_ref().and_then(FilterBar::active)
    }

    /// Rendered container.
    pub fn container(&self) -> &Element {
        &self.container
    }

    /// Items matching the active selection.
    pub fn visible_items(&self) -> Vec<ContentItem> {
        match (self.filter_bar.as_ref(), self.active()) {
            (Some(bar), Some(value)) => self
                .items
                .iter()
                .filter(|item| field_matches(item, bar.field(), value))
                .cloned()
                .collect(),
            _ => self.items.clone(),
        }
    }

    /// Apply a filter selection (`None` for "All").
    ///
    /// Returns `true` when the selection changed and the cards host was
    /// re-rendered. Selecting the active control, selecting a value with no
    /// control, or selecting without a filter bar changes nothing.
    pub fn select(&mut self, value: Option<&str>) -> bool {
        let Some(bar) = self.filter_bar.as_mut() else {
            return false;
        };
        if bar.select(value).is_none() {
            return false;
        }

        tracing::debug!(field = %bar.field(), selection = ?value, "filter selection changed");
        let rendered = bar.render();
        if let Some(filters) = self.container.find_mut(crate::filters::class::FILTERS) {
            *filters = rendered;
        }
        self.render_cards();
        true
    }

    fn render_cards(&mut self) {
        let visible = self.visible_items();
        if let Some(host) = self.container.find_mut(class::CARDS_HOST) {
            render_into(host, &visible, &self.config);
        }
    }
}
