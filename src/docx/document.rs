//! Serialization of the element sequence into `word/document.xml`.

use super::elements::{Element, GridTable, InlineImage, Paragraph, Run, RunContent};
use super::page::PageDimensions;
use super::styles::TABLE_GRID;
use super::xml::XmlWriter;
use crate::error::Result;

const NAMESPACES: [(&str, &str); 5] = [
    ("xmlns:w", "http://schemas.openxmlformats.org/wordprocessingml/2006/main"),
    ("xmlns:r", "http://schemas.openxmlformats.org/officeDocument/2006/relationships"),
    ("xmlns:wp", "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing"),
    ("xmlns:a", "http://schemas.openxmlformats.org/drawingml/2006/main"),
    ("xmlns:pic", "http://schemas.openxmlformats.org/drawingml/2006/picture"),
];

const PICTURE_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";

/// Serialize `word/document.xml`.
pub(crate) fn document_xml(elements: &[Element], page: &PageDimensions) -> Result<Vec<u8>> {
    let mut out = DocumentWriter {
        w: XmlWriter::new()?,
        next_drawing_id: 1,
    };

    out.w.start("w:document", &NAMESPACES)?;
    out.w.start("w:body", &[])?;
    for element in elements {
        match element {
            Element::Paragraph(p) => out.paragraph(p)?,
            Element::Table(t) => out.table(t)?,
            Element::PageBreak => out.page_break()?,
        }
    }
    out.section(page)?;
    out.w.end("w:body")?;
    out.w.end("w:document")?;
    Ok(out.w.finish())
}

struct DocumentWriter {
    w: XmlWriter,
    // wp:docPr ids must be unique per document even when an image handle is reused
    next_drawing_id: u32,
}

impl DocumentWriter {
    fn paragraph(&mut self, p: &Paragraph) -> Result<()> {
        self.w.start("w:p", &[])?;
        if let Some(style) = &p.style {
            self.w.start("w:pPr", &[])?;
            self.w.empty("w:pStyle", &[("w:val", style.as_str())])?;
            self.w.end("w:pPr")?;
        }
        for run in &p.runs {
            self.run(run)?;
        }
        self.w.end("w:p")
    }

    fn run(&mut self, run: &Run) -> Result<()> {
        self.w.start("w:r", &[])?;
        for item in &run.content {
            match item {
                RunContent::Text(text) => self.text(text)?,
                RunContent::Drawing(image) => self.drawing(image)?,
            }
        }
        self.w.end("w:r")
    }

    /// Multi-line text keeps its line structure through `w:br`.
    fn text(&mut self, text: &str) -> Result<()> {
        for (idx, line) in text.split('\n').enumerate() {
            if idx > 0 {
                self.w.empty("w:br", &[])?;
            }
            let line = line.strip_suffix('\r').unwrap_or(line);
            self.w
                .text_element("w:t", &[("xml:space", "preserve")], line)?;
        }
        Ok(())
    }

    fn drawing(&mut self, image: &InlineImage) -> Result<()> {
        let id = self.next_drawing_id.to_string();
        self.next_drawing_id += 1;
        let cx = image.cx.to_string();
        let cy = image.cy.to_string();
        let extent = [("cx", cx.as_str()), ("cy", cy.as_str())];

        let w = &mut self.w;
        w.start("w:drawing", &[])?;
        w.start(
            "wp:inline",
            &[("distT", "0"), ("distB", "0"), ("distL", "0"), ("distR", "0")],
        )?;
        w.empty("wp:extent", &extent)?;
        w.empty("wp:effectExtent", &[("l", "0"), ("t", "0"), ("r", "0"), ("b", "0")])?;
        w.empty("wp:docPr", &[("id", id.as_str()), ("name", image.name.as_str())])?;
        w.start("wp:cNvGraphicFramePr", &[])?;
        w.empty("a:graphicFrameLocks", &[("noChangeAspect", "1")])?;
        w.end("wp:cNvGraphicFramePr")?;
        w.start("a:graphic", &[])?;
        w.start("a:graphicData", &[("uri", PICTURE_URI)])?;
        w.start("pic:pic", &[])?;
        w.start("pic:nvPicPr", &[])?;
        w.empty("pic:cNvPr", &[("id", "0"), ("name", image.name.as_str())])?;
        w.empty("pic:cNvPicPr", &[])?;
        w.end("pic:nvPicPr")?;
        w.start("pic:blipFill", &[])?;
        w.empty("a:blip", &[("r:embed", image.rel_id.as_str())])?;
        w.start("a:stretch", &[])?;
        w.empty("a:fillRect", &[])?;
        w.end("a:stretch")?;
        w.end("pic:blipFill")?;
        w.start("pic:spPr", &[])?;
        w.start("a:xfrm", &[])?;
        w.empty("a:off", &[("x", "0"), ("y", "0")])?;
        w.empty("a:ext", &extent)?;
        w.end("a:xfrm")?;
        w.start("a:prstGeom", &[("prst", "rect")])?;
        w.empty("a:avLst", &[])?;
        w.end("a:prstGeom")?;
        w.end("pic:spPr")?;
        w.end("pic:pic")?;
        w.end("a:graphicData")?;
        w.end("a:graphic")?;
        w.end("wp:inline")?;
        w.end("w:drawing")
    }

    fn table(&mut self, table: &GridTable) -> Result<()> {
        self.w.start("w:tbl", &[])?;
        self.w.start("w:tblPr", &[])?;
        self.w.empty("w:tblStyle", &[("w:val", TABLE_GRID)])?;
        self.w.empty("w:tblW", &[("w:w", "0"), ("w:type", "auto")])?;
        self.w.empty("w:tblLayout", &[("w:type", "fixed")])?;
        self.w.end("w:tblPr")?;

        self.w.start("w:tblGrid", &[])?;
        for width in &table.column_widths {
            let width = width.to_string();
            self.w.empty("w:gridCol", &[("w:w", width.as_str())])?;
        }
        self.w.end("w:tblGrid")?;

        for row in &table.rows {
            self.w.start("w:tr", &[])?;
            for cell in &row.cells {
                self.w.start("w:tc", &[])?;
                self.w.start("w:tcPr", &[])?;
                let width = cell.width.to_string();
                self.w
                    .empty("w:tcW", &[("w:w", width.as_str()), ("w:type", "dxa")])?;
                self.w.end("w:tcPr")?;
                // a cell must end with a paragraph
                if cell.paragraphs.is_empty() {
                    self.w.empty("w:p", &[])?;
                }
                for p in &cell.paragraphs {
                    self.paragraph(p)?;
                }
                self.w.end("w:tc")?;
            }
            self.w.end("w:tr")?;
        }
        self.w.end("w:tbl")
    }

    fn page_break(&mut self) -> Result<()> {
        self.w.start("w:p", &[])?;
        self.w.start("w:r", &[])?;
        self.w.empty("w:br", &[("w:type", "page")])?;
        self.w.end("w:r")?;
        self.w.end("w:p")
    }

    fn section(&mut self, page: &PageDimensions) -> Result<()> {
        let width = page.width().to_string();
        let height = page.height().to_string();
        let top = page.margins.top.to_string();
        let right = page.margins.right.to_string();
        let bottom = page.margins.bottom.to_string();
        let left = page.margins.left.to_string();

        self.w.start("w:sectPr", &[])?;
        self.w
            .empty("w:pgSz", &[("w:w", width.as_str()), ("w:h", height.as_str())])?;
        self.w.empty(
            "w:pgMar",
            &[
                ("w:top", top.as_str()),
                ("w:right", right.as_str()),
                ("w:bottom", bottom.as_str()),
                ("w:left", left.as_str()),
                ("w:header", "708"),
                ("w:footer", "708"),
                ("w:gutter", "0"),
            ],
        )?;
        self.w.end("w:sectPr")
    }
}
