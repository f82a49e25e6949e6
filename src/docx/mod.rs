//! WordprocessingML container engine.
//!
//! The renderer talks to the output document only through the
//! [`ContainerEngine`] capability set. [`DocxPackage`] is the production
//! implementation; it keeps the element sequence in memory and writes an
//! Office Open XML package on persist.
//!
//! ## Architecture
//!
//! ```text
//! sections::* ──▶ writer (table builder, cell writer, resource cache)
//!                    │
//!                    ▼
//!             ContainerEngine (DocxPackage)
//!                    │  persist
//!                    ▼
//!   [Content_Types].xml, word/document.xml, word/styles.xml,
//!   word/media/*, docProps/*  ──zip──▶  document.docx
//! ```

mod document;
mod elements;
mod package;
mod page;
pub mod styles;
mod xml;

pub use elements::{
    BinaryPart, Element, GridCell, GridRow, GridTable, InlineImage, Paragraph, Run, RunContent,
};
pub use package::{DocxPackage, ImageFormat};
pub use page::{Margins, PageDimensions, PageSize, EMU_PER_TWIP, TWIPS_PER_INCH};

use std::path::Path;

use crate::error::Result;

/// Handle to a table allocated in a container.
///
/// Only the most recently allocated table accepts cell writes; handles to
/// earlier tables are rejected by the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableHandle {
    element_index: usize,
    rows: usize,
    columns: usize,
}

impl TableHandle {
    /// Create a handle for the table stored at `element_index`.
    pub fn new(element_index: usize, rows: usize, columns: usize) -> Self {
        Self {
            element_index,
            rows,
            columns,
        }
    }

    /// Position of the table in the element sequence.
    pub fn element_index(&self) -> usize {
        self.element_index
    }

    /// Total rows, header included.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }
}

/// The operations the renderer needs from an output container.
///
/// Every failure is reported as [`crate::Error::ContainerFault`].
pub trait ContainerEngine {
    /// Page width available for content, in twips.
    fn writable_width(&self) -> u32;

    /// Append a paragraph with a named style.
    fn append_styled_paragraph(&mut self, style: &str, text: &str) -> Result<()>;

    /// Append an unstyled paragraph; `None` appends an empty one.
    fn append_paragraph(&mut self, text: Option<&str>) -> Result<()>;

    /// Append a `rows` x `columns` table of empty cells.
    fn allocate_table(
        &mut self,
        rows: usize,
        columns: usize,
        column_widths: &[u32],
    ) -> Result<TableHandle>;

    /// Mutable access to one cell of the most recently allocated table.
    fn cell_mut(&mut self, table: &TableHandle, row: usize, col: usize) -> Result<&mut GridCell>;

    /// Register binary content (an image) as a part of the container.
    fn embed_binary_asset(&mut self, bytes: &[u8]) -> Result<BinaryPart>;

    /// Create an inline display of a registered part, `width_twips` wide.
    fn create_inline_display(&mut self, part: &BinaryPart, width_twips: u32)
        -> Result<InlineImage>;

    /// Append a hard page break.
    fn append_page_break(&mut self) -> Result<()>;

    /// Write the finished container to `path`.
    fn persist(&mut self, path: &Path) -> Result<()>;

    /// The element sequence appended so far.
    fn elements(&self) -> &[Element];
}
