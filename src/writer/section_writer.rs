//! Facade bundling a container with its resource cache for the renderers.

use super::cell_writer::{set_cell_content, CellContent, CellOutcome};
use super::resource_cache::ResourceCache;
use super::table_builder::create_table;
use crate::docx::{styles, ContainerEngine, TableHandle};
use crate::error::Result;

/// Append-only writing surface handed to section renderers.
pub struct SectionWriter<'a, C: ContainerEngine + ?Sized> {
    container: &'a mut C,
    cache: &'a mut ResourceCache,
}

impl<'a, C: ContainerEngine + ?Sized> SectionWriter<'a, C> {
    /// Wrap a container and the cache bound to it.
    pub fn new(container: &'a mut C, cache: &'a mut ResourceCache) -> Self {
        Self { container, cache }
    }

    /// Append a `Title` paragraph.
    pub fn title(&mut self, text: &str) -> Result<()> {
        self.container.append_styled_paragraph(styles::TITLE, text)
    }

    /// Append a heading paragraph with the given style.
    pub fn heading(&mut self, style: &str, text: &str) -> Result<()> {
        self.container.append_styled_paragraph(style, text)
    }

    /// Append a Normal paragraph; `None` appends an empty one.
    pub fn paragraph(&mut self, text: Option<&str>) -> Result<()> {
        self.container.append_paragraph(text)
    }

    /// Append a table with a header row and `data_rows` empty rows.
    pub fn table<S: AsRef<str>>(&mut self, titles: &[S], data_rows: usize) -> Result<TableHandle> {
        create_table(self.container, self.cache, titles, data_rows)
    }

    /// Append `text` as a header-only single-column table.
    ///
    /// The table is used as a page-wide text block, not as tabular data.
    pub fn verbatim_block(&mut self, text: &str) -> Result<TableHandle> {
        create_table(self.container, self.cache, &[text], 0)
    }

    /// Write one cell, isolating content failures to it.
    pub fn cell(
        &mut self,
        table: &TableHandle,
        row: usize,
        col: usize,
        content: &CellContent,
    ) -> Result<CellOutcome> {
        set_cell_content(self.container, self.cache, table, row, col, content)
    }

    /// Write a data row starting at column 0.
    pub fn row(&mut self, table: &TableHandle, row: usize, cells: &[CellContent]) -> Result<()> {
        for (col, content) in cells.iter().enumerate() {
            self.cell(table, row, col, content)?;
        }
        Ok(())
    }

    /// Append a hard page break.
    pub fn page_break(&mut self) -> Result<()> {
        self.container.append_page_break()
    }

    /// The underlying container.
    pub fn container(&self) -> &C {
        self.container
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::{DocxPackage, Element, PageDimensions};
    use crate::writer::assets::BundledAssets;
    use std::sync::Arc;

    #[test]
    fn test_writes_in_append_order() {
        let mut pkg = DocxPackage::create(PageDimensions::default()).unwrap();
        let mut cache = ResourceCache::new(Arc::new(BundledAssets), 200);
        let mut out = SectionWriter::new(&mut pkg, &mut cache);

        out.title("Database: shop").unwrap();
        out.heading(styles::HEADING3, "Description").unwrap();
        out.paragraph(None).unwrap();
        let table = out.table(&["A", "B"], 1).unwrap();
        out.row(&table, 1, &["a".into(), CellContent::empty()]).unwrap();
        out.verbatim_block("select 1").unwrap();
        out.page_break().unwrap();

        let kinds: Vec<_> = out.container().elements().iter().map(Element::kind).collect();
        assert_eq!(
            kinds,
            vec!["paragraph", "paragraph", "paragraph", "table", "table", "page-break"]
        );
        let first = out.container().elements()[0].as_paragraph().unwrap();
        assert_eq!(first.style.as_deref(), Some("Title"));
    }
}
