//! Filter controls.
//!
//! The bar is plain data (a list of controls, exactly one active) so the
//! selection logic can be exercised without any markup. [`FilterBar::render`]
//! is the adapter that turns it into elements.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

use tessera_core::Element;
use tessera_core::dom::el;

use crate::item::ContentItem;

/// Label of the control that clears the selection.
pub const ALL_LABEL: &str = "All";

/// Filter bar class names.
pub mod class {
    /// Bar container.
    pub const FILTERS: &str = "content-listing__filters";
    /// Control list.
    pub const LIST: &str = "content-listing__filter-list";
    /// One control.
    pub const FILTER: &str = "content-listing__filter";
    /// Active control marker.
    pub const ACTIVE: &str = "content-listing__filter--active";
}

/// One selectable control.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FilterControl {
    /// Selection value; `None` for "All".
    pub value: Option<String>,
    /// Visible label.
    pub label: String,
    /// Whether this control is the active one.
    pub active: bool,
}

/// Mutually exclusive set of filter controls for one field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FilterBar {
    field: String,
    controls: Vec<FilterControl>,
}

impl FilterBar {
    /// Build the bar for `field`, or `None` when no item has a non-empty
    /// value for it.
    ///
    /// Controls are "All" (initially active) followed by each distinct
    /// value in alphabetical order.
    pub fn build(items: &[ContentItem], field: &str) -> Option<Self> {
        let values = distinct_values(items, field);
        if values.is_empty() {
            return None;
        }

        let mut controls = Vec::with_capacity(values.len() + 1);
        controls.push(FilterControl {
            value: None,
            label: ALL_LABEL.to_string(),
            active: true,
        });
        controls.extend(values.into_iter().map(|value| FilterControl {
            label: value.clone(),
            value: Some(value),
            active: false,
        }));

        Some(Self {
            field: field.to_string(),
            controls,
        })
    }

    /// Field the bar filters on.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Controls in display order.
    pub fn controls(&self) -> &[FilterControl] {
        &self.controls
    }

    /// Value of the active control (`None` for "All").
    pub fn active(&self) -> Option<&str> {
        self.controls
            .iter()
            .find(|c| c.active)
            .and_then(|c| c.value.as_deref())
    }

    /// Activate the control for `value` (`None` selects "All").
    ///
    /// Returns `Some(new selection)` when the selection changed, `None` when
    /// the control was already active or no control has that value.
    pub fn select(&mut self, value: Option<&str>) -> Option<Option<String>> {
        let target = self.controls.iter().position(|c| {
            match (c.value.as_deref(), value) {
                (Some(have), Some(wanted)) => have.to_lowercase() == wanted.to_lowercase(),
                (have, wanted) => have == wanted,
            }
        })?;
        if self.controls[target].active {
            return None;
        }

        for (index, control) in self.controls.iter_mut().enumerate() {
            control.active = index == target;
        }
        Some(self.controls[target].value.clone())
    }

    /// Render the bar as buttons.
    pub fn render(&self) -> Element {
        let list = self
            .controls
            .iter()
            .map(|control| {
                let mut button = el("button", class::FILTER)
                    .attr("type", "button")
                    .attr("data-filter-value", control.value.as_deref().unwrap_or(""))
                    .text(control.label.as_str());
                if control.active {
                    button.add_class(class::ACTIVE);
                }
                button
            })
            .fold(el("div", class::LIST), Element::child);

        el("div", class::FILTERS).child(list)
    }
}

/// Distinct non-empty values of `field` across `items`, list fields
/// flattened, sorted alphabetically.
///
/// Values are distinct ignoring case, the same way selections match items;
/// the first spelling seen is kept.
pub fn distinct_values(items: &[ContentItem], field: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut values: Vec<String> = items
        .iter()
        .filter_map(|item| item.get(field))
        .flat_map(|value| value.values())
        .filter(|v| !v.trim().is_empty())
        .filter(|v| seen.insert(v.to_lowercase()))
        .map(str::to_string)
        .collect();

    values.sort_by(|a, b| alphabetical(a, b));
    values
}

/// Case-insensitive ordering.
fn alphabetical(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
