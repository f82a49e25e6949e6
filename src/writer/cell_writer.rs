//! Writing content into single table cells.
//!
//! A cell is always cleared before it is written. Failures while resolving
//! the content (typically a missing icon) stay scoped to the cell: they are
//! logged and the cell keeps its empty state.

use super::resource_cache::{Icon, ResourceCache};
use crate::docx::{ContainerEngine, Paragraph, Run, TableHandle};
use crate::error::{Error, Result};
use crate::model::TableColumn;

/// Content of one cell, resolved before it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    /// Plain text; `None` leaves the cell empty
    Plain(Option<String>),
    /// An icon followed by text
    IconAnnotated(Icon, String),
}

impl CellContent {
    /// Plain text content.
    pub fn text(text: impl Into<String>) -> Self {
        CellContent::Plain(Some(text.into()))
    }

    /// Plain text content that may be absent.
    pub fn optional(text: Option<&str>) -> Self {
        CellContent::Plain(text.map(str::to_string))
    }

    /// No content.
    pub fn empty() -> Self {
        CellContent::Plain(None)
    }

    /// Name cell of a column: primary keys get the primary-key icon, foreign
    /// keys the foreign-key icon, anything else plain text.
    pub fn column_name(column: &TableColumn) -> Self {
        if column.is_primary() {
            CellContent::IconAnnotated(Icon::PrimaryKey, column.name.clone())
        } else if column.is_foreign_key() {
            CellContent::IconAnnotated(Icon::ForeignKey, column.name.clone())
        } else {
            CellContent::text(column.name.clone())
        }
    }

    /// The text part of the content.
    pub fn text_part(&self) -> Option<&str> {
        match self {
            CellContent::Plain(text) => text.as_deref(),
            CellContent::IconAnnotated(_, text) => Some(text),
        }
    }
}

impl From<&str> for CellContent {
    fn from(text: &str) -> Self {
        CellContent::text(text)
    }
}

impl From<String> for CellContent {
    fn from(text: String) -> Self {
        CellContent::Plain(Some(text))
    }
}

impl From<Option<&str>> for CellContent {
    fn from(text: Option<&str>) -> Self {
        CellContent::optional(text)
    }
}

/// What happened to a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellOutcome {
    /// The content was written
    Written,
    /// The content could not be resolved; the cell was left empty
    LeftEmpty(String),
}

impl CellOutcome {
    /// Whether the content was written.
    pub fn is_written(&self) -> bool {
        matches!(self, CellOutcome::Written)
    }
}

/// Clear the cell and write `content` into it.
///
/// Errors are returned as-is; see [`set_cell_content`] for the isolating
/// variant used by the renderers.
pub fn fill_cell<C: ContainerEngine + ?Sized>(
    container: &mut C,
    cache: &mut ResourceCache,
    table: &TableHandle,
    row: usize,
    col: usize,
    content: &CellContent,
) -> Result<()> {
    container.cell_mut(table, row, col)?.clear();

    let paragraph = match content {
        CellContent::Plain(text) => Paragraph::text(text.as_deref()),
        CellContent::IconAnnotated(icon, text) => {
            let image = cache.icon(container, *icon)?;
            Paragraph {
                style: None,
                runs: vec![Run::image_and_text(image, text.as_str())],
            }
        },
    };
    container.cell_mut(table, row, col)?.paragraphs.push(paragraph);
    Ok(())
}

/// Write `content` into a cell, isolating content failures to that cell.
///
/// A failure to resolve the content is logged and reported as
/// [`CellOutcome::LeftEmpty`]. A [`Error::ContainerFault`] means the
/// container itself is broken and is propagated.
pub fn set_cell_content<C: ContainerEngine + ?Sized>(
    container: &mut C,
    cache: &mut ResourceCache,
    table: &TableHandle,
    row: usize,
    col: usize,
    content: &CellContent,
) -> Result<CellOutcome> {
    match fill_cell(container, cache, table, row, col, content) {
        Ok(()) => Ok(CellOutcome::Written),
        Err(e @ Error::ContainerFault(_)) => Err(e),
        Err(e) => {
            log::warn!(
                "Leaving cell ({}, {}) empty: {}",
                row,
                col,
                e
            );
            // fill_cell may have failed after clearing; make sure nothing partial remains
            container.cell_mut(table, row, col)?.clear();
            Ok(CellOutcome::LeftEmpty(e.to_string()))
        },
    }
}
