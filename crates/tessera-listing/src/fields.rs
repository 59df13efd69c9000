//! Card field mapping.

use serde::Serialize;

use crate::config::{ListingConfig, keys};
use crate::item::ContentItem;

/// Display-ready fields for one card. Unresolved fields are empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CardFields {
    /// Card heading.
    pub title: String,
    /// Card body text.
    pub summary: String,
    /// Image URL.
    pub image: String,
    /// Link target.
    pub path: String,
    /// Badge text.
    pub tag: String,
}

impl CardFields {
    /// Whether the card has anything to show.
    pub fn is_displayable(&self) -> bool {
        !(self.title.is_empty() && self.summary.is_empty() && self.image.is_empty())
    }
}

/// Resolve an item's card fields.
///
/// Each field uses the item field named by its `*-field` key when the item
/// has it, else a fixed default field (`title`, `description`, `image`,
/// `path`; none for the tag), else `""`.
pub fn map_fields(item: &ContentItem, config: &ListingConfig) -> CardFields {
    let resolve = |key: &str, fallback: Option<&str>| -> String {
        config
            .get(key)
            .and_then(|name| item.get(name))
            .or_else(|| fallback.and_then(|name| item.get(name)))
            .map(|value| value.display())
            .unwrap_or_default()
    };

    CardFields {
        title: resolve(keys::TITLE_FIELD, Some("title")),
        summary: resolve(keys::SUMMARY_FIELD, Some("description")),
        image: resolve(keys::IMAGE_FIELD, Some("image")),
        path: resolve(keys::PATH_FIELD, Some("path")),
        tag: resolve(keys::TAG_FIELD, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let item = ContentItem::new()
            .with("title", "Dunes")
            .with("description", "Sand")
            .with("image", "/d.jpg")
            .with("path", "/dunes")
            .with("category", "Beach");
        let fields = map_fields(&item, &ListingConfig::new());
        assert_eq!(fields.title, "Dunes");
        assert_eq!(fields.summary, "Sand");
        assert_eq!(fields.image, "/d.jpg");
        assert_eq!(fields.path, "/dunes");
        assert_eq!(fields.tag, "");
    }

    #[test]
    fn test_overrides() {
        let item = ContentItem::new()
            .with("title", "Fallback")
            .with("headline", "Headline")
            .with("category", "Beach")
            .with_list("thumbs", ["/t1.jpg", "/t2.jpg"]);
        let config = ListingConfig::new()
            .with("title-field", "headline")
            .with("tag-field", "category")
            .with("image-field", "thumbs");
        let fields = map_fields(&item, &config);
        assert_eq!(fields.title, "Headline");
        assert_eq!(fields.tag, "Beach");
        assert_eq!(fields.image, "/t1.jpg, /t2.jpg");
    }

    #[test]
    fn test_override_missing_falls_back() {
        let item = ContentItem::new().with("title", "Fallback");
        let config = ListingConfig::new().with("title-field", "headline");
        assert_eq!(map_fields(&item, &config).title, "Fallback");
    }

    #[test]
    fn test_unresolved_is_empty() {
        let fields = map_fields(&ContentItem::new(), &ListingConfig::new().with("tag-field", "x"));
        assert_eq!(fields, CardFields::default());
        assert!(!fields.is_displayable());
    }

    #[test]
    fn test_displayable_with_summary_only() {
        let fields = CardFields {
            summary: "Only text".into(),
            ..Default::default()
        };
        assert!(fields.is_displayable());
    }
}
