//! Authored block structure.
//!
//! A block is a table produced by the document-authoring tool: an ordered
//! list of rows, each an ordered list of cells. Blocks only ever consume the
//! row count, the per-row cell count, and each cell's trimmed text.

use serde::{Deserialize, Serialize};

/// One table cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    text: String,
}

impl Cell {
    /// Create a cell from its text content.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The cell's text with surrounding whitespace removed.
    pub fn text(&self) -> &str {
        self.text.trim()
    }
}

/// One table row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// Create a row from cells.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Create a row from plain text values.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: texts.into_iter().map(Cell::new).collect(),
        }
    }

    /// All cells in authored order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Trimmed text of the cell at `index`, or `""` when absent.
    pub fn cell_text(&self, index: usize) -> &str {
        self.cells.get(index).map(Cell::text).unwrap_or("")
    }
}

/// An authored block awaiting decoration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    name: String,
    classes: Vec<String>,
    rows: Vec<Row>,
    original: Option<String>,
}

impl Block {
    /// Create a block with the given name (e.g. `"content-listing"`).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the authored rows.
    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    /// Add extra class names (variants) carried by the block element.
    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes.extend(classes.into_iter().map(Into::into));
        self
    }

    /// Keep the original authored markup so it can be handed back untouched.
    pub fn with_original(mut self, markup: impl Into<String>) -> Self {
        self.original = Some(markup.into());
        self
    }

    /// The block name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every class on the block element, in authored order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Extra classes that are neither the block name nor the generic
    /// `block` marker.
    pub fn variants(&self) -> Vec<&str> {
        self.classes
            .iter()
            .map(String::as_str)
            .filter(|c| !c.is_empty() && *c != "block" && !c.eq_ignore_ascii_case(&self.name))
            .collect()
    }

    /// All authored rows, including a name header row if present.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The original authored markup, if known.
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    /// Content rows: the authored rows minus a leading header row that
    /// only repeats the block name.
    ///
    /// A row counts as the name header when it has exactly one cell whose
    /// text equals the block name, ignoring case.
    pub fn content_rows(&self) -> &[Row] {
        match self.rows.first() {
            Some(first)
                if !self.name.is_empty()
                    && first.len() == 1
                    && first.cell_text(0).eq_ignore_ascii_case(&self.name) =>
            {
                &self.rows[1..]
            }
            _ => &self.rows,
        }
    }
}
