//! Paragraph and table styles of the generated document.
//!
//! Renderers refer to styles only by id; this module owns what those ids look
//! like in `word/styles.xml`.

use super::xml::XmlWriter;
use crate::error::Result;

/// Style id of the document title.
pub const TITLE: &str = "Title";
/// Style id of the schema heading.
pub const HEADING1: &str = "Heading1";
/// Style id of section and entity headings.
pub const HEADING2: &str = "Heading2";
/// Style id of sub-section headings.
pub const HEADING3: &str = "Heading3";
/// Style id applied to every table.
pub const TABLE_GRID: &str = "TableGrid";

const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// A paragraph style definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    /// Style id referenced from `w:pStyle`
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Font size in half-points
    pub size_half_points: u32,
    /// Bold text
    pub bold: bool,
    /// Space before the paragraph in twips
    pub space_before: u32,
    /// Outline level for headings (0-based)
    pub outline_level: Option<u8>,
}

/// The paragraph styles every generated document carries.
pub fn paragraph_styles() -> Vec<ParagraphStyle> {
    vec![
        ParagraphStyle {
            id: "Normal",
            name: "Normal",
            size_half_points: 22,
            bold: false,
            space_before: 0,
            outline_level: None,
        },
        ParagraphStyle {
            id: TITLE,
            name: "Title",
            size_half_points: 56,
            bold: false,
            space_before: 0,
            outline_level: None,
        },
        heading(HEADING1, "heading 1", 32, 0),
        heading(HEADING2, "heading 2", 26, 1),
        heading(HEADING3, "heading 3", 24, 2),
    ]
}

fn heading(id: &'static str, name: &'static str, size: u32, level: u8) -> ParagraphStyle {
    ParagraphStyle {
        id,
        name,
        size_half_points: size,
        bold: true,
        space_before: 240,
        outline_level: Some(level),
    }
}

/// Serialize `word/styles.xml`.
pub(crate) fn styles_xml() -> Result<Vec<u8>> {
    let mut w = XmlWriter::new()?;
    w.start("w:styles", &[("xmlns:w", WML_NS)])?;

    for style in paragraph_styles() {
        let default = if style.id == "Normal" { "1" } else { "0" };
        w.start(
            "w:style",
            &[("w:type", "paragraph"), ("w:default", default), ("w:styleId", style.id)],
        )?;
        w.empty("w:name", &[("w:val", style.name)])?;
        if style.id != "Normal" {
            w.empty("w:basedOn", &[("w:val", "Normal")])?;
            w.empty("w:next", &[("w:val", "Normal")])?;
            w.empty("w:qFormat", &[])?;
        }

        w.start("w:pPr", &[])?;
        let before = style.space_before.to_string();
        w.empty("w:spacing", &[("w:before", before.as_str()), ("w:after", "120")])?;
        if let Some(level) = style.outline_level {
            w.empty("w:keepNext", &[])?;
            let level = level.to_string();
            w.empty("w:outlineLvl", &[("w:val", level.as_str())])?;
        }
        w.end("w:pPr")?;

        w.start("w:rPr", &[])?;
        if style.bold {
            w.empty("w:b", &[])?;
        }
        let size = style.size_half_points.to_string();
        w.empty("w:sz", &[("w:val", size.as_str())])?;
        w.end("w:rPr")?;
        w.end("w:style")?;
    }

    w.start("w:style", &[("w:type", "table"), ("w:styleId", TABLE_GRID)])?;
    w.empty("w:name", &[("w:val", "Table Grid")])?;
    w.start("w:tblPr", &[])?;
    w.start("w:tblBorders", &[])?;
    for side in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
        w.empty(
            side,
            &[("w:val", "single"), ("w:sz", "4"), ("w:space", "0"), ("w:color", "auto")],
        )?;
    }
    w.end("w:tblBorders")?;
    w.end("w:tblPr")?;
    w.end("w:style")?;

    w.end("w:styles")?;
    Ok(w.finish())
}
