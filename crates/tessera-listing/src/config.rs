//! Block configuration parsed from authored rows.
//!
//! The configuration is a flat mapping of slugged keys to plain string
//! values. Nothing is typed at parse time; the accessors on
//! [`ListingConfig`] interpret values when a pipeline stage asks for them,
//! and unrecognized keys are kept but ignored.
//!
//! # Authored shapes
//!
//! - **Header + value rows**: when the first two rows have the same,
//!   non-zero number of cells, row 0 holds keys and row 1 holds values.
//! - **Key/value rows**: every other row with exactly two cells is a
//!   `key | value` pair. Later rows overwrite earlier keys.
//!
//! A two-row, two-column table is ambiguous. It is read as header + value
//! whenever row 0 reads as a header (`Filter Field | Filter Value` over
//! `type | article`). It is read as key/value rows only when row 0's second
//! cell is not a known key and the second row's first cell is one
//! (`Limit | 3` over `Sort | newest`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tessera_core::{Block, Error, Row, slugify};

/// Recognized configuration keys.
pub mod keys {
    /// Explicit index URL or path.
    pub const JSON_PATH: &str = "json-path";
    /// Named source, resolved to `/<source>/query-index.json`.
    pub const SOURCE: &str = "source";
    /// Path prefix filter (preferred spelling).
    pub const PATH_PREFIX: &str = "path-prefix";
    /// Path prefix filter (alias).
    pub const PATH_FILTER: &str = "path-filter";
    /// Field for the fixed filter and the filter bar.
    pub const FILTER_FIELD: &str = "filter-field";
    /// Value for the fixed filter.
    pub const FILTER_VALUE: &str = "filter-value";
    /// Field for the second fixed filter.
    pub const FILTER_FIELD_2: &str = "filter-field-2";
    /// Value for the second fixed filter.
    pub const FILTER_VALUE_2: &str = "filter-value-2";
    /// Comma-separated tag tokens.
    pub const FILTERS: &str = "filters";
    /// Sort mode (preferred spelling).
    pub const SORT: &str = "sort";
    /// Sort mode (alias).
    pub const SORT_BY: &str = "sort-by";
    /// `asc` or `desc`.
    pub const SORT_DIRECTION: &str = "sort-direction";
    /// Maximum number of items.
    pub const LIMIT: &str = "limit";
    /// Item field used for card titles.
    pub const TITLE_FIELD: &str = "title-field";
    /// Item field used for card summaries.
    pub const SUMMARY_FIELD: &str = "summary-field";
    /// Item field used for card images.
    pub const IMAGE_FIELD: &str = "image-field";
    /// Item field used for card links.
    pub const PATH_FIELD: &str = "path-field";
    /// Item field used for the card badge.
    pub const TAG_FIELD: &str = "tag-field";
    /// Call-to-action label.
    pub const CTA_LABEL: &str = "cta-label";
    /// Call-to-action target.
    pub const CTA_URL: &str = "cta-url";
    /// `true` to show the filter bar.
    pub const ENABLE_FILTERS: &str = "enable-filters";
    /// Variant name (preferred spelling).
    pub const VARIANT: &str = "variant";
    /// Variant name (alias).
    pub const TYPE: &str = "type";
    /// Text of the empty-state paragraph.
    pub const EMPTY_MESSAGE: &str = "empty-message";
    /// Failure policy override: `original` or `empty`.
    pub const ON_ERROR: &str = "on-error";

    /// Every key above.
    pub const ALL: &[&str] = &[
        JSON_PATH,
        SOURCE,
        PATH_PREFIX,
        PATH_FILTER,
        FILTER_FIELD,
        FILTER_VALUE,
        FILTER_FIELD_2,
        FILTER_VALUE_2,
        FILTERS,
        SORT,
        SORT_BY,
        SORT_DIRECTION,
        LIMIT,
        TITLE_FIELD,
        SUMMARY_FIELD,
        IMAGE_FIELD,
        PATH_FIELD,
        TAG_FIELD,
        CTA_LABEL,
        CTA_URL,
        ENABLE_FILTERS,
        VARIANT,
        TYPE,
        EMPTY_MESSAGE,
        ON_ERROR,
    ];

    /// Whether `key` is a recognized key.
    pub fn is_known(key: &str) -> bool {
        ALL.contains(&key)
    }
}

/// Named presets: variant names and the defaults they inject.
const VARIANT_PRESETS: &[(&[&str], &[(&str, &str)])] = &[
    (&["newest", "latest"], &[(keys::SORT, "newest")]),
    (&["alphabetical"], &[(keys::SORT, "title")]),
    (
        &["adventures", "filterable"],
        &[(keys::ENABLE_FILTERS, "true"), (keys::FILTER_FIELD, "category")],
    ),
];

// ============================================================================
// Sort and failure enums
// ============================================================================

/// Ordering applied by the pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Keep index order.
    #[default]
    Unsorted,
    /// Most recent first by publish/modified date.
    Newest,
    /// Case-insensitive title order.
    Title,
}

impl SortMode {
    /// Interpret an authored sort value; unknown values keep index order.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "newest" | "publishdate" | "date" => Self::Newest,
            "title" | "name" | "alpha" => Self::Title,
            _ => Self::Unsorted,
        }
    }
}

/// What a block shows when its index could not be loaded at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Hand back the authored markup untouched.
    #[default]
    Original,
    /// Render the listing shell with an empty-state message.
    Empty,
}

impl FromStr for FailurePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "original" | "leave" | "none" => Ok(Self::Original),
            "empty" | "empty-state" => Ok(Self::Empty),
            other => Err(Error::config(format!("Unknown failure policy: {other}"))),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => write!(f, "original"),
            Self::Empty => write!(f, "empty"),
        }
    }
}

// ============================================================================
// ListingConfig
// ============================================================================

/// Flat, slugged block configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ListingConfig {
    entries: BTreeMap<String, String>,
}

impl ListingConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from content rows.
    ///
    /// Never fails: rows that do not fit either shape, and entries with an
    /// empty key, are skipped.
    pub fn parse_rows(rows: &[Row]) -> Self {
        let mut config = Self::new();

        let header_pair = match (rows.first(), rows.get(1)) {
            (Some(header), Some(values))
                if !header.is_empty()
                    && header.len() == values.len()
                    && !looks_like_key_value(header, values) =>
            {
                Some((header, values))
            }
            _ => None,
        };

        let rest = match header_pair {
            Some((header, values)) => {
                for index in 0..header.len() {
                    config.insert(header.cell_text(index), values.cell_text(index));
                }
                &rows[2..]
            }
            None => rows,
        };

        for row in rest.iter().filter(|r| r.len() == 2) {
            config.insert(row.cell_text(0), row.cell_text(1));
        }

        config
    }

    /// Parse a block's configuration, then apply variant presets.
    ///
    /// The variant comes from the `variant` key, else `type`, else the
    /// block's first extra class name. Preset values never overwrite keys
    /// the author set.
    pub fn from_block(block: &Block) -> Self {
        let mut config = Self::parse_rows(block.content_rows());

        let variant = config
            .get(keys::VARIANT)
            .or_else(|| config.get(keys::TYPE))
            .map(slugify)
            .or_else(|| block.variants().first().map(|c| slugify(c)))
            .filter(|v| !v.is_empty());

        if let Some(variant) = variant {
            config.apply_variant(&variant);
        }

        config
    }

    /// Record `variant` and inject its preset defaults.
    pub fn apply_variant(&mut self, variant: &str) {
        self.entries
            .entry(keys::VARIANT.to_string())
            .or_insert_with(|| variant.to_string());

        let Some((_, defaults)) = VARIANT_PRESETS
            .iter()
            .find(|(names, _)| names.contains(&variant))
        else {
            return;
        };

        for (key, value) in defaults.iter() {
            if self.get(key).is_none() {
                self.entries.insert((*key).to_string(), (*value).to_string());
            }
        }
    }

    /// Insert an entry, slugging the key and trimming the value.
    ///
    /// Entries whose key slugs to nothing are dropped.
    pub fn insert(&mut self, key: &str, value: &str) {
        let key = slugify(key);
        if key.is_empty() {
            return;
        }
        self.entries.insert(key, value.trim().to_string());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    /// Non-empty value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// All entries, including unrecognized keys.
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ------------------------------------------------------------------------
    // Typed accessors
    // ------------------------------------------------------------------------

    /// Path prefix filter with a trailing `*` removed.
    ///
    /// `path-prefix` wins over `path-filter`.
    pub fn path_prefix(&self) -> Option<String> {
        let raw = self
            .get(keys::PATH_PREFIX)
            .or_else(|| self.get(keys::PATH_FILTER))?;
        normalize_path_prefix(raw)
    }

    /// Field named by `filter-field`.
    pub fn filter_field(&self) -> Option<&str> {
        self.get(keys::FILTER_FIELD)
    }

    /// Fixed `(field, value)` filters that are fully specified.
    pub fn fixed_filters(&self) -> Vec<(&str, &str)> {
        [
            (keys::FILTER_FIELD, keys::FILTER_VALUE),
            (keys::FILTER_FIELD_2, keys::FILTER_VALUE_2),
        ]
        .iter()
        .filter_map(|(field, value)| Some((self.get(field)?, self.get(value)?)))
        .collect()
    }

    /// Lowercased tokens from `filters`.
    pub fn tag_tokens(&self) -> Vec<String> {
        self.get(keys::FILTERS)
            .map(|raw| {
                raw.split(',')
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Sort mode from `sort`, else `sort-by`.
    pub fn sort_mode(&self) -> SortMode {
        self.get(keys::SORT)
            .or_else(|| self.get(keys::SORT_BY))
            .map(SortMode::parse)
            .unwrap_or_default()
    }

    /// Whether `sort-direction` asks for ascending order.
    pub fn sort_ascending(&self) -> bool {
        self.get(keys::SORT_DIRECTION)
            .is_some_and(|d| d.eq_ignore_ascii_case("asc"))
    }

    /// Positive item limit, parsed like `parseInt` (leading digits only).
    pub fn limit(&self) -> Option<usize> {
        self.get(keys::LIMIT)
            .and_then(parse_leading_int)
            .filter(|n| *n > 0)
            .and_then(|n| usize::try_from(n).ok())
    }

    /// Whether the filter bar is enabled.
    pub fn enable_filters(&self) -> bool {
        self.get(keys::ENABLE_FILTERS)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    /// Call-to-action `(label, url)` when both are set.
    pub fn cta(&self) -> Option<(&str, &str)> {
        Some((self.get(keys::CTA_LABEL)?, self.get(keys::CTA_URL)?))
    }

    /// Per-block failure policy override. Unknown values are ignored.
    pub fn on_error(&self) -> Option<FailurePolicy> {
        self.get(keys::ON_ERROR).and_then(|v| v.parse().ok())
    }

    /// Empty-state text override.
    pub fn empty_message(&self) -> Option<&str> {
        self.get(keys::EMPTY_MESSAGE)
    }

    /// Detected variant name.
    pub fn variant(&self) -> Option<&str> {
        self.get(keys::VARIANT)
    }
}

/// Whether the first two rows read better as two key/value rows.
///
/// Only when row 0 does not itself read as a header: its second cell must
/// not be a known key while the second row's first cell is one.
fn looks_like_key_value(first: &Row, second: &Row) -> bool {
    first.len() == 2
        && second.len() == 2
        && !keys::is_known(&slugify(first.cell_text(1)))
        && keys::is_known(&slugify(second.cell_text(0)))
}

/// Trim a path prefix and strip one trailing `*`.
///
/// Returns `None` when nothing is left, meaning "no path filtering".
pub fn normalize_path_prefix(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let prefix = trimmed.strip_suffix('*').unwrap_or(trimmed);
    if prefix.is_empty() {
        None
    } else {
        Some(prefix.to_string())
    }
}

/// Parse an optional sign and leading base-10 digits, ignoring the rest.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Row> {
        data.iter().map(|r| Row::from_texts(r.iter().copied())).collect()
    }

    // ------------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------------

    #[test]
    fn test_parse_header_value_pair() {
        let config = ListingConfig::parse_rows(&rows(&[&["Path Filter", "Limit"], &["/x/", "3"]]));
        assert_eq!(config.len(), 2);
        assert_eq!(config.get("path-filter"), Some("/x/"));
        assert_eq!(config.get("limit"), Some("3"));
    }

    #[test]
    fn test_parse_header_pair_then_key_value_rows() {
        let config = ListingConfig::parse_rows(&rows(&[
            &["JSON Path", "Sort", "Limit"],
            &["/magazine.json", "newest", "6"],
            &["CTA Label", "See all"],
            &["Limit", "4"],
        ]));
        assert_eq!(config.get("json-path"), Some("/magazine.json"));
        assert_eq!(config.get("cta-label"), Some("See all"));
        assert_eq!(config.get("limit"), Some("4"));
    }

    #[test]
    fn test_parse_header_pair_wins_when_values_look_like_keys() {
        let config = ListingConfig::parse_rows(&rows(&[
            &["Filter Field", "Filter Value"],
            &["type", "article"],
        ]));
        assert_eq!(config.len(), 2);
        assert_eq!(config.get("filter-field"), Some("type"));
        assert_eq!(config.get("filter-value"), Some("article"));
        assert_eq!(config.get("type"), None);
    }

    #[test]
    fn test_parse_two_key_value_rows() {
        let config = ListingConfig::parse_rows(&rows(&[&["Limit", "3"], &["Sort", "newest"]]));
        assert_eq!(config.get("limit"), Some("3"));
        assert_eq!(config.get("sort"), Some("newest"));
    }

    #[test]
    fn test_parse_pure_key_value_rows() {
        let config = ListingConfig::parse_rows(&rows(&[
            &["Path Prefix", "/us/en/magazine/*"],
            &["Sort", "newest"],
            &["Limit", "2"],
        ]));
        assert_eq!(config.get("path-prefix"), Some("/us/en/magazine/*"));
        assert_eq!(config.get("sort"), Some("newest"));
        assert_eq!(config.get("limit"), Some("2"));
    }

    #[test]
    fn test_parse_mismatched_first_rows_are_key_value() {
        let config = ListingConfig::parse_rows(&rows(&[&["Limit", "5"], &["Sort"], &["Source", "magazine"]]));
        assert_eq!(config.get("limit"), Some("5"));
        assert_eq!(config.get("source"), Some("magazine"));
        assert!(config.get("sort").is_none());
    }

    #[test]
    fn test_parse_skips_malformed_rows() {
        let config = ListingConfig::parse_rows(&rows(&[
            &[],
            &["only one"],
            &["a", "b", "c"],
            &["", "orphan"],
            &["Limit", " 3 "],
        ]));
        assert_eq!(config.len(), 1);
        assert_eq!(config.get("limit"), Some("3"));
    }

    #[test]
    fn test_parse_header_pair_drops_empty_keys() {
        let config = ListingConfig::parse_rows(&rows(&[&["Sort", "", "!!"], &["title", "x", "y"]]));
        assert_eq!(config.len(), 1);
        assert_eq!(config.get("sort"), Some("title"));
    }

    #[test]
    fn test_parse_empty() {
        assert!(ListingConfig::parse_rows(&[]).is_empty());
    }

    #[test]
    fn test_unknown_keys_preserved() {
        let config = ListingConfig::parse_rows(&rows(&[&["Colour Scheme", "dark"]]));
        assert_eq!(config.get("colour-scheme"), Some("dark"));
    }

    // ------------------------------------------------------------------------
    // Variants
    // ------------------------------------------------------------------------

    #[test]
    fn test_variant_from_block_class() {
        let block = Block::new("content-listing")
            .with_classes(["content-listing", "Adventures"])
            .with_rows(rows(&[&["Limit", "8"]]));
        let config = ListingConfig::from_block(&block);
        assert_eq!(config.variant(), Some("adventures"));
        assert!(config.enable_filters());
        assert_eq!(config.filter_field(), Some("category"));
    }

    #[test]
    fn test_variant_defaults_do_not_override() {
        let block = Block::new("content-listing").with_rows(rows(&[
            &["Variant", "latest"],
            &["Sort", "title"],
        ]));
        let config = ListingConfig::from_block(&block);
        assert_eq!(config.get("sort"), Some("title"));
    }

    #[test]
    fn test_variant_from_type_key() {
        let block = Block::new("content-listing").with_rows(rows(&[&["Type", "Newest"]]));
        let config = ListingConfig::from_block(&block);
        assert_eq!(config.variant(), Some("newest"));
        assert_eq!(config.sort_mode(), SortMode::Newest);
    }

    #[test]
    fn test_unknown_variant_recorded_only() {
        let block = Block::new("content-listing").with_classes(["teaser"]);
        let config = ListingConfig::from_block(&block);
        assert_eq!(config.variant(), Some("teaser"));
        assert_eq!(config.len(), 1);
    }

    #[test]
    fn test_from_block_skips_name_row() {
        let block = Block::new("content-listing").with_rows(rows(&[
            &["Content-Listing"],
            &["Limit", "2"],
            &["Sort", "title"],
        ]));
        let config = ListingConfig::from_block(&block);
        assert_eq!(config.len(), 2);
        assert_eq!(config.get("limit"), Some("2"));
        assert_eq!(config.sort_mode(), SortMode::Title);
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    #[test]
    fn test_path_prefix_precedence_and_star() {
        let config = ListingConfig::new()
            .with("path-filter", "/b/")
            .with("path-prefix", "/a/*");
        assert_eq!(config.path_prefix().as_deref(), Some("/a/"));

        let config = ListingConfig::new().with("path-filter", "/b/*");
        assert_eq!(config.path_prefix().as_deref(), Some("/b/"));

        let config = ListingConfig::new().with("path-prefix", "*");
        assert!(config.path_prefix().is_none());
    }

    #[test]
    fn test_fixed_filters_require_both_parts() {
        let config = ListingConfig::new()
            .with("filter-field", "category")
            .with("filter-field-2", "region")
            .with("filter-value-2", "north");
        assert_eq!(config.fixed_filters(), vec![("region", "north")]);
    }

    #[test]
    fn test_tag_tokens() {
        let config = ListingConfig::new().with("filters", "Beach, surf ,,Hiking");
        assert_eq!(config.tag_tokens(), vec!["beach", "surf", "hiking"]);
    }

    #[test]
    fn test_sort_mode_aliases() {
        assert_eq!(ListingConfig::new().with("sort", "NEWEST").sort_mode(), SortMode::Newest);
        assert_eq!(ListingConfig::new().with("sort-by", "publishDate").sort_mode(), SortMode::Newest);
        assert_eq!(ListingConfig::new().with("sort", "alpha").sort_mode(), SortMode::Title);
        assert_eq!(ListingConfig::new().with("sort", "random").sort_mode(), SortMode::Unsorted);
        assert_eq!(ListingConfig::new().sort_mode(), SortMode::Unsorted);
        assert_eq!(
            ListingConfig::new().with("sort", "title").with("sort-by", "newest").sort_mode(),
            SortMode::Title
        );
    }

    #[test]
    fn test_limit_parsing() {
        assert_eq!(ListingConfig::new().with("limit", "3").limit(), Some(3));
        assert_eq!(ListingConfig::new().with("limit", "12 items").limit(), Some(12));
        assert_eq!(ListingConfig::new().with("limit", "0").limit(), None);
        assert_eq!(ListingConfig::new().with("limit", "-2").limit(), None);
        assert_eq!(ListingConfig::new().with("limit", "all").limit(), None);
        assert_eq!(ListingConfig::new().limit(), None);
    }

    #[test]
    fn test_enable_filters_and_cta() {
        let config = ListingConfig::new()
            .with("enable-filters", "TRUE")
            .with("cta-label", "More")
            .with("cta-url", "/more");
        assert!(config.enable_filters());
        assert_eq!(config.cta(), Some(("More", "/more")));
        assert!(ListingConfig::new().with("cta-label", "More").cta().is_none());
    }

    #[test]
    fn test_on_error() {
        assert_eq!(
            ListingConfig::new().with("on-error", "Empty").on_error(),
            Some(FailurePolicy::Empty)
        );
        assert_eq!(ListingConfig::new().with("on-error", "bogus").on_error(), None);
    }

    #[test]
    fn test_failure_policy_roundtrip_str() {
        for policy in [FailurePolicy::Original, FailurePolicy::Empty] {
            assert_eq!(policy.to_string().parse::<FailurePolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int(" 42"), Some(42));
        assert_eq!(parse_leading_int("+7x"), Some(7));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("x7"), None);
        assert_eq!(parse_leading_int(""), None);
    }
}
