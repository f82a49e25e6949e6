//! Logical element model of the main document stream.
//!
//! These types mirror the WordprocessingML body structure closely enough to
//! serialize one-to-one (`w:p`, `w:r`, `w:tbl`, `w:tr`, `w:tc`) while staying
//! easy to inspect in tests.

/// A top-level structural element of the document body.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A paragraph, optionally styled
    Paragraph(Paragraph),
    /// A table
    Table(GridTable),
    /// A hard page break
    PageBreak,
}

impl Element {
    /// Returns the paragraph if this element is one.
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Element::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    /// Returns the table if this element is one.
    pub fn as_table(&self) -> Option<&GridTable> {
        match self {
            Element::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Short name of the element kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Paragraph(_) => "paragraph",
            Element::Table(_) => "table",
            Element::PageBreak => "page-break",
        }
    }
}

/// A paragraph made of runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    /// Paragraph style id (`Title`, `Heading1`, ...); `None` means Normal
    pub style: Option<String>,
    /// Runs in reading order
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// A Normal paragraph holding a single text run.
    ///
    /// `None` produces a paragraph with no runs.
    pub fn text(text: Option<&str>) -> Self {
        Self {
            style: None,
            runs: text.map(|t| vec![Run::text(t)]).unwrap_or_default(),
        }
    }

    /// A styled paragraph holding a single text run.
    pub fn styled(style: impl Into<String>, text: &str) -> Self {
        Self {
            style: Some(style.into()),
            runs: vec![Run::text(text)],
        }
    }

    /// Concatenated text of all runs.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(Run::plain_text).collect()
    }

    /// Whether any run carries an inline drawing.
    pub fn has_drawing(&self) -> bool {
        self.runs.iter().any(Run::has_drawing)
    }
}

/// A run of inline content sharing formatting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Run {
    /// Inline items in order
    pub content: Vec<RunContent>,
}

impl Run {
    /// A run with a single text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![RunContent::Text(text.into())],
        }
    }

    /// A run with an inline image followed by text.
    pub fn image_and_text(image: InlineImage, text: impl Into<String>) -> Self {
        Self {
            content: vec![RunContent::Drawing(image), RunContent::Text(text.into())],
        }
    }

    fn plain_text(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| match c {
                RunContent::Text(t) => Some(t.as_str()),
                RunContent::Drawing(_) => None,
            })
            .collect()
    }

    fn has_drawing(&self) -> bool {
        self.content
            .iter()
            .any(|c| matches!(c, RunContent::Drawing(_)))
    }
}

/// An inline item within a run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunContent {
    /// Literal text
    Text(String),
    /// An embedded image displayed inline
    Drawing(InlineImage),
}

/// A registered binary part inside the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryPart {
    /// Relationship id from the main document part, e.g. `rId4`
    pub rel_id: String,
    /// Part name inside the package, e.g. `word/media/image1.png`
    pub part_name: String,
    /// Pixel width
    pub pixel_width: u32,
    /// Pixel height
    pub pixel_height: u32,
}

/// An inline display of a [`BinaryPart`] at a fixed size.
///
/// One handle may be placed in any number of runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// Relationship id of the image part
    pub rel_id: String,
    /// Name used for the drawing properties
    pub name: String,
    /// Display width in EMU
    pub cx: u64,
    /// Display height in EMU
    pub cy: u64,
}

/// A table with a fixed column grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridTable {
    /// Column widths in twips
    pub column_widths: Vec<u32>,
    /// Rows; row 0 is the header when built by the table builder
    pub rows: Vec<GridRow>,
}

impl GridTable {
    /// A table of empty cells.
    pub fn empty(rows: usize, column_widths: &[u32]) -> Self {
        let row = GridRow {
            cells: column_widths
                .iter()
                .map(|w| GridCell {
                    width: *w,
                    paragraphs: Vec::new(),
                })
                .collect(),
        };
        Self {
            column_widths: column_widths.to_vec(),
            rows: vec![row; rows],
        }
    }

    /// Number of columns in the grid.
    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    /// Cell at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        self.rows.get(row).and_then(|r| r.cells.get(col))
    }

    /// Header titles (text of row 0).
    pub fn header(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|r| r.cells.iter().map(GridCell::plain_text).collect())
            .unwrap_or_default()
    }
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridRow {
    /// Cells, one per grid column
    pub cells: Vec<GridCell>,
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridCell {
    /// Cell width in twips
    pub width: u32,
    /// Block content; empty means the default single empty paragraph
    pub paragraphs: Vec<Paragraph>,
}

impl GridCell {
    /// Concatenated text of every paragraph.
    pub fn plain_text(&self) -> String {
        self.paragraphs.iter().map(Paragraph::plain_text).collect()
    }

    /// Whether the cell references an embedded image.
    pub fn has_drawing(&self) -> bool {
        self.paragraphs.iter().any(Paragraph::has_drawing)
    }

    /// Whether the cell has no visible content.
    pub fn is_empty(&self) -> bool {
        self.plain_text().is_empty() && !self.has_drawing()
    }

    /// Remove all content, returning the cell to its default state.
    pub fn clear(&mut self) {
        self.paragraphs.clear();
    }
}
