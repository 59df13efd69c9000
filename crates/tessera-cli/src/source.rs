//! Reading authored blocks from files.
//!
//! HTML fragments follow the authoring convention: the block element
//! carries the block name as a class, each child element is a row, and
//! each child of a row is a cell. CSV files hold one row per record.

use scraper::{ElementRef, Html, Selector};
use std::path::Path;

use tessera_core::{Block, Error, Result, Row, slugify};

/// Read the block named `block_name` from `path`, choosing the format by
/// extension.
pub fn read_block(path: &Path, block_name: &str) -> Result<Block> {
    let text = std::fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("html" | "htm") => block_from_html(&text, block_name),
        Some("csv") => block_from_csv(&text, block_name),
        _ => Err(Error::config(format!(
            "Unsupported block source {} (expected .html, .htm, or .csv)",
            path.display()
        ))),
    }
}

/// Find the first element classed `block_name` in an HTML fragment.
///
/// The element's markup is kept so a failed decoration can hand it back.
pub fn block_from_html(markup: &str, block_name: &str) -> Result<Block> {
    let class = slugify(block_name);
    if class.is_empty() {
        return Err(Error::config(format!("Invalid block name: '{block_name}'")));
    }

    let fragment = Html::parse_fragment(markup);
    let selector = Selector::parse(&format!(".{class}"))
        .map_err(|e| Error::parse(format!("block selector: {e}")))?;
    let element = fragment
        .select(&selector)
        .next()
        .ok_or_else(|| Error::invalid_data(format!("No '{class}' block found in markup")))?;

    let rows = child_elements(element)
        .map(|row| Row::from_texts(child_elements(row).map(element_text)))
        .collect();

    Ok(Block::new(class)
        .with_classes(element.value().classes())
        .with_rows(rows)
        .with_original(element.html()))
}

/// Build a block from CSV records, one row per record.
pub fn block_from_csv(text: &str, block_name: &str) -> Result<Block> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let rows = reader
        .records()
        .map(|record| {
            record
                .map(|r| Row::from_texts(r.iter()))
                .map_err(|e| Error::parse(format!("CSV: {e}")))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Block::new(slugify(block_name)).with_rows(rows))
}

fn child_elements(element: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    element.children().filter_map(ElementRef::wrap)
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
