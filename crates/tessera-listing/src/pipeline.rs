//! Filter, sort, and limit.
//!
//! The stages always run in this order: path prefix, fixed field filters
//! (or tag tokens when no `filter-field` is set), sort, limit. Limiting
//! last is what makes `limit = N` mean "the first N by sort order".

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::{ListingConfig, SortMode};
use crate::item::{ContentItem, FieldValue};

/// Date fields consulted for recency, most specific first.
pub const DATE_FIELDS: &[&str] = &["publishDate", "lastModified", "last-modified", "date"];

/// Fields holding tag tokens for the `filters` key.
pub const TAG_FIELDS: &[&str] = &["tags", "category"];

/// Run the full pipeline. The input is left untouched.
pub fn apply(items: &[ContentItem], config: &ListingConfig) -> Vec<ContentItem> {
    let mut result: Vec<ContentItem> = items.to_vec();

    if let Some(prefix) = config.path_prefix() {
        result.retain(|item| item.path().starts_with(&prefix));
    }

    let fixed = config.fixed_filters();
    if !fixed.is_empty() {
        result.retain(|item| {
            fixed
                .iter()
                .all(|(field, value)| field_matches(item, field, value))
        });
    }

    if config.filter_field().is_none() {
        let tokens = config.tag_tokens();
        if !tokens.is_empty() {
            result.retain(|item| has_any_tag(item, &tokens));
        }
    }

    sort_items(&mut result, config.sort_mode(), config.sort_ascending());

    if let Some(limit) = config.limit() {
        result.truncate(limit);
    }

    tracing::debug!(input = items.len(), output = result.len(), "listing pipeline");
    result
}

/// Whether `field` on `item` equals `wanted`, ignoring case.
///
/// For list fields any element may match. Absent fields never match.
pub fn field_matches(item: &ContentItem, field: &str, wanted: &str) -> bool {
    item.get(field)
        .is_some_and(|value| value.matches_ignore_case(wanted))
}

fn has_any_tag(item: &ContentItem, tokens: &[String]) -> bool {
    TAG_FIELDS
        .iter()
        .filter_map(|field| item.get(field))
        .flat_map(tag_tokens)
        .any(|tag| tokens.contains(&tag))
}

/// Split a tag field into lowercased tokens on commas and whitespace.
fn tag_tokens(value: &FieldValue) -> Vec<String> {
    value
        .values()
        .iter()
        .flat_map(|v| v.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Stable in-place sort.
pub fn sort_items(items: &mut [ContentItem], mode: SortMode, ascending: bool) {
    match mode {
        SortMode::Unsorted => {}
        SortMode::Newest => items.sort_by(|a, b| {
            let ordering = date_key(a).cmp(&date_key(b));
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        }),
        SortMode::Title => items.sort_by(|a, b| title_key(a).cmp(&title_key(b))),
    }
}

fn title_key(item: &ContentItem) -> String {
    item.text("title").unwrap_or("").to_lowercase()
}

/// Sortable form of an item's best date.
///
/// Ascending order ranks by tier first, then within the tier: missing dates,
/// then unparseable dates by text, then real instants. Reversed for
/// "newest", real dates lead and missing ones land last.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum DateKey {
    Missing,
    Raw(String),
    Instant(DateTime<Utc>),
}

fn date_key(item: &ContentItem) -> DateKey {
    match item.first_text(DATE_FIELDS) {
        None => DateKey::Missing,
        Some(raw) => parse_date(raw).map_or_else(|| DateKey::Raw(raw.to_string()), DateKey::Instant),
    }
}

/// Parse epoch seconds, RFC 3339, or `YYYY-MM-DD`.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(secs) = raw.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

// ============================================================================
// Tests
// ============================================================================
