//! Card grid and listing shell rendering.
//!
//! Every element carries a `content-listing__<part>` class. Absent fields
//! suppress their element; no empty placeholders are emitted.

use tessera_core::Element;
use tessera_core::dom::el;

use crate::config::ListingConfig;
use crate::fields::{CardFields, map_fields};
use crate::item::ContentItem;

/// Class names used by the listing markup.
pub mod class {
    /// Outer container.
    pub const ROOT: &str = "content-listing";
    /// Host for the filter bar.
    pub const FILTERS_HOST: &str = "content-listing__filters-host";
    /// Host for the card grid; the only part re-rendered on selection.
    pub const CARDS_HOST: &str = "content-listing__cards-host";
    /// Card grid.
    pub const GRID: &str = "content-listing__grid";
    /// One card.
    pub const CARD: &str = "content-listing__card";
    /// Link around the card image.
    pub const IMAGE_LINK: &str = "content-listing__image-link";
    /// Card image.
    pub const IMAGE: &str = "content-listing__image";
    /// Card text body.
    pub const BODY: &str = "content-listing__body";
    /// Tag badge.
    pub const TAG: &str = "content-listing__tag";
    /// Card heading.
    pub const TITLE: &str = "content-listing__title";
    /// Link inside the heading.
    pub const TITLE_LINK: &str = "content-listing__title-link";
    /// Card summary.
    pub const SUMMARY: &str = "content-listing__summary";
    /// CTA footer.
    pub const FOOTER: &str = "content-listing__footer";
    /// CTA link.
    pub const CTA: &str = "content-listing__cta";
    /// Empty-state paragraph.
    pub const EMPTY: &str = "content-listing__empty";
}

/// Render one card, or `None` when title, summary and image are all empty.
pub fn render_card(fields: &CardFields) -> Option<Element> {
    if !fields.is_displayable() {
        return None;
    }

    let href = if fields.path.is_empty() {
        "#"
    } else {
        fields.path.as_str()
    };
    let mut card = el("article", class::CARD);

    if !fields.image.is_empty() {
        let image = el("img", class::IMAGE)
            .attr("src", fields.image.as_str())
            .attr("alt", fields.title.as_str())
            .attr("loading", "lazy");
        card.push(el("a", class::IMAGE_LINK).attr("href", href).child(image));
    }

    let mut body = el("div", class::BODY);

    if !fields.tag.is_empty() {
        body.push(el("span", class::TAG).text(fields.tag.as_str()));
    }

    if !fields.title.is_empty() {
        let link = el("a", class::TITLE_LINK)
            .attr("href", href)
            .text(fields.title.as_str());
        body.push(el("h3", class::TITLE).child(link));
    }

    if !fields.summary.is_empty() {
        body.push(el("p", class::SUMMARY).text(fields.summary.as_str()));
    }

    card.push(body);
    Some(card)
}

/// Render the card grid for `items`. Undisplayable items are dropped.
pub fn render_grid(items: &[ContentItem], config: &ListingConfig) -> Element {
    items
        .iter()
        .filter_map(|item| render_card(&map_fields(item, config)))
        .fold(el("div", class::GRID), Element::child)
}

/// Replace the contents of `host` with a fresh grid.
///
/// Rendering twice with the same inputs leaves an identical tree.
pub fn render_into(host: &mut Element, items: &[ContentItem], config: &ListingConfig) {
    host.clear();
    host.push(render_grid(items, config));
}

/// Build the listing container: filters host, cards host, and the CTA
/// footer when both `cta-label` and `cta-url` are set.
pub fn render_shell(config: &ListingConfig) -> Element {
    let mut container = el("div", class::ROOT)
        .child(el("div", class::FILTERS_HOST))
        .child(el("div", class::CARDS_HOST));

    if let Some((label, url)) = config.cta() {
        let cta = el("a", class::CTA)
            .class("button primary")
            .attr("href", url)
            .text(label);
        container.push(el("div", class::FOOTER).child(cta));
    }

    container
}

/// Empty-state paragraph.
pub fn render_empty_state(message: &str) -> Element {
    el("p", class::EMPTY).text(message)
}
