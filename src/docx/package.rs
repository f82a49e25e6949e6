//! In-memory WordprocessingML package and its ZIP persistence.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use image::GenericImageView;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::document::document_xml;
use super::elements::{BinaryPart, Element, GridCell, GridTable, InlineImage, Paragraph};
use super::page::{PageDimensions, EMU_PER_TWIP};
use super::styles::styles_xml;
use super::xml::XmlWriter;
use super::{ContainerEngine, TableHandle};
use crate::error::{Error, Result};

const RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const APPLICATION: &str = "schema_docx";

/// Image encodings accepted as embedded parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// PNG image
    Png,
    /// JPEG image
    Jpeg,
}

impl ImageFormat {
    /// Detect the format from magic bytes.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.len() >= 8 && &data[0..8] == b"\x89PNG\r\n\x1a\n" {
            return Some(ImageFormat::Png);
        }
        if data.len() >= 2 && data[0] == 0xFF && data[1] == 0xD8 {
            return Some(ImageFormat::Jpeg);
        }
        None
    }

    /// File extension used for the media part.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }

    fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }

    fn decoder_format(&self) -> image::ImageFormat {
        match self {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

#[derive(Debug)]
struct MediaPart {
    part: BinaryPart,
    format: ImageFormat,
    bytes: Vec<u8>,
}

/// A WordprocessingML package under construction.
///
/// Holds the main document's element sequence and any embedded media, and
/// writes everything as a `.docx` ZIP archive on [`ContainerEngine::persist`].
#[derive(Debug)]
pub struct DocxPackage {
    page: PageDimensions,
    writable_width: u32,
    elements: Vec<Element>,
    media: Vec<MediaPart>,
    last_table: Option<usize>,
}

impl DocxPackage {
    /// Create an empty package with a single section of the given geometry.
    pub fn create(page: PageDimensions) -> Result<Self> {
        let writable_width = page.writable_width().ok_or_else(|| {
            Error::container(format!(
                "page width {} leaves no writable area between margins {} and {}",
                page.width(),
                page.margins.left,
                page.margins.right
            ))
        })?;
        Ok(Self {
            page,
            writable_width,
            elements: Vec::new(),
            media: Vec::new(),
            last_table: None,
        })
    }

    /// Page geometry of the document section.
    pub fn page(&self) -> &PageDimensions {
        &self.page
    }

    /// Number of embedded media parts.
    pub fn media_count(&self) -> usize {
        self.media.len()
    }

    fn next_rel_id(&self) -> String {
        // rId1 is the styles part
        format!("rId{}", self.media.len() + 2)
    }

    /// Serialize every part and return `(part name, bytes)` pairs in archive order.
    pub fn parts(&self) -> Result<Vec<(String, Vec<u8>)>> {
        let mut parts = vec![
            ("[Content_Types].xml".to_string(), self.content_types_xml()?),
            ("_rels/.rels".to_string(), package_rels_xml()?),
            (
                "word/document.xml".to_string(),
                document_xml(&self.elements, &self.page)?,
            ),
            ("word/styles.xml".to_string(), styles_xml()?),
            (
                "word/_rels/document.xml.rels".to_string(),
                self.document_rels_xml()?,
            ),
            ("docProps/core.xml".to_string(), core_props_xml()?),
            ("docProps/app.xml".to_string(), app_props_xml()?),
        ];
        for media in &self.media {
            parts.push((media.part.part_name.clone(), media.bytes.clone()));
        }
        Ok(parts)
    }

    fn content_types_xml(&self) -> Result<Vec<u8>> {
        let mut w = XmlWriter::new()?;
        w.start("Types", &[("xmlns", TYPES_NS)])?;
        w.empty(
            "Default",
            &[
                ("Extension", "rels"),
                ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
            ],
        )?;
        w.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
        for format in [ImageFormat::Png, ImageFormat::Jpeg] {
            if self.media.iter().any(|m| m.format == format) {
                w.empty(
                    "Default",
                    &[("Extension", format.extension()), ("ContentType", format.content_type())],
                )?;
            }
        }
        for (part, content_type) in [
            (
                "/word/document.xml",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
            ),
            (
                "/word/styles.xml",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
            ),
            (
                "/docProps/core.xml",
                "application/vnd.openxmlformats-package.core-properties+xml",
            ),
            (
                "/docProps/app.xml",
                "application/vnd.openxmlformats-officedocument.extended-properties+xml",
            ),
        ] {
            w.empty("Override", &[("PartName", part), ("ContentType", content_type)])?;
        }
        w.end("Types")?;
        Ok(w.finish())
    }

    fn document_rels_xml(&self) -> Result<Vec<u8>> {
        let mut w = XmlWriter::new()?;
        w.start("Relationships", &[("xmlns", RELS_NS)])?;
        let styles_type = format!("{}/styles", REL_BASE);
        w.empty(
            "Relationship",
            &[("Id", "rId1"), ("Type", styles_type.as_str()), ("Target", "styles.xml")],
        )?;
        let image_type = format!("{}/image", REL_BASE);
        for media in &self.media {
            let target = media
                .part
                .part_name
                .strip_prefix("word/")
                .unwrap_or(&media.part.part_name);
            w.empty(
                "Relationship",
                &[
                    ("Id", media.part.rel_id.as_str()),
                    ("Type", image_type.as_str()),
                    ("Target", target),
                ],
            )?;
        }
        w.end("Relationships")?;
        Ok(w.finish())
    }

    fn table_at(&mut self, table: &TableHandle) -> Result<&mut GridTable> {
        if self.last_table != Some(table.element_index()) {
            return Err(Error::container(format!(
                "table at element {} is no longer open for population",
                table.element_index()
            )));
        }
        match self.elements.get_mut(table.element_index()) {
            Some(Element::Table(t)) => Ok(t),
            _ => Err(Error::container(format!(
                "element {} is not a table",
                table.element_index()
            ))),
        }
    }
}

impl ContainerEngine for DocxPackage {
    fn writable_width(&self) -> u32 {
        self.writable_width
    }

    fn append_styled_paragraph(&mut self, style: &str, text: &str) -> Result<()> {
        self.elements
            .push(Element::Paragraph(Paragraph::styled(style, text)));
        Ok(())
    }

    fn append_paragraph(&mut self, text: Option<&str>) -> Result<()> {
        self.elements.push(Element::Paragraph(Paragraph::text(text)));
        Ok(())
    }

    fn allocate_table(
        &mut self,
        rows: usize,
        columns: usize,
        column_widths: &[u32],
    ) -> Result<TableHandle> {
        if column_widths.len() != columns {
            return Err(Error::container(format!(
                "{} column widths given for {} columns",
                column_widths.len(),
                columns
            )));
        }
        let index = self.elements.len();
        self.elements
            .push(Element::Table(GridTable::empty(rows, column_widths)));
        self.last_table = Some(index);
        Ok(TableHandle::new(index, rows, columns))
    }

    fn cell_mut(&mut self, table: &TableHandle, row: usize, col: usize) -> Result<&mut GridCell> {
        self.table_at(table)?
            .rows
            .get_mut(row)
            .and_then(|r| r.cells.get_mut(col))
            .ok_or_else(|| {
                Error::container(format!(
                    "cell ({}, {}) outside {}x{} table",
                    row,
                    col,
                    table.rows(),
                    table.columns()
                ))
            })
    }

    fn embed_binary_asset(&mut self, bytes: &[u8]) -> Result<BinaryPart> {
        let format = ImageFormat::sniff(bytes)
            .ok_or_else(|| Error::container("unsupported image format"))?;
        let decoded = image::load_from_memory_with_format(bytes, format.decoder_format())
            .map_err(|e| Error::container(format!("failed to decode image: {}", e)))?;
        let (pixel_width, pixel_height) = decoded.dimensions();
        if pixel_width == 0 || pixel_height == 0 {
            return Err(Error::container("image has no pixels"));
        }

        let part = BinaryPart {
            rel_id: self.next_rel_id(),
            part_name: format!("word/media/image{}.{}", self.media.len() + 1, format.extension()),
            pixel_width,
            pixel_height,
        };
        log::debug!(
            "Embedded {} ({}x{}) as {}",
            part.part_name,
            pixel_width,
            pixel_height,
            part.rel_id
        );
        self.media.push(MediaPart {
            part: part.clone(),
            format,
            bytes: bytes.to_vec(),
        });
        Ok(part)
    }

    fn create_inline_display(&mut self, part: &BinaryPart, width_twips: u32) -> Result<InlineImage> {
        if !self.media.iter().any(|m| m.part == *part) {
            return Err(Error::container(format!(
                "{} is not registered in this package",
                part.part_name
            )));
        }
        if width_twips == 0 {
            return Err(Error::container("inline display width must be positive"));
        }
        let cx = u64::from(width_twips) * EMU_PER_TWIP;
        let cy = cx * u64::from(part.pixel_height) / u64::from(part.pixel_width);
        let name = Path::new(&part.part_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image")
            .to_string();
        Ok(InlineImage {
            rel_id: part.rel_id.clone(),
            name,
            cx,
            cy,
        })
    }

    fn append_page_break(&mut self) -> Result<()> {
        self.elements.push(Element::PageBreak);
        Ok(())
    }

    fn persist(&mut self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .map_err(|e| Error::container(format!("cannot create {}: {}", path.display(), e)))?;
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, bytes) in self.parts()? {
            zip.start_file(name.as_str(), options)?;
            zip.write_all(&bytes)
                .map_err(|e| Error::container(format!("writing {}: {}", name, e)))?;
        }
        zip.finish()?;
        Ok(())
    }

    fn elements(&self) -> &[Element] {
        &self.elements
    }
}

fn package_rels_xml() -> Result<Vec<u8>> {
    let mut w = XmlWriter::new()?;
    w.start("Relationships", &[("xmlns", RELS_NS)])?;
    let office = format!("{}/officeDocument", REL_BASE);
    let extended = format!("{}/extended-properties", REL_BASE);
    let core = "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    for (id, rel_type, target) in [
        ("rId1", office.as_str(), "word/document.xml"),
        ("rId2", core, "docProps/core.xml"),
        ("rId3", extended.as_str(), "docProps/app.xml"),
    ] {
        w.empty("Relationship", &[("Id", id), ("Type", rel_type), ("Target", target)])?;
    }
    w.end("Relationships")?;
    Ok(w.finish())
}

fn core_props_xml() -> Result<Vec<u8>> {
    let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let mut w = XmlWriter::new()?;
    w.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    w.text_element("dc:creator", &[], APPLICATION)?;
    w.text_element("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], &now)?;
    w.text_element("dcterms:modified", &[("xsi:type", "dcterms:W3CDTF")], &now)?;
    w.end("cp:coreProperties")?;
    Ok(w.finish())
}

fn app_props_xml() -> Result<Vec<u8>> {
    let mut w = XmlWriter::new()?;
    w.start(
        "Properties",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
        )],
    )?;
    w.text_element("Application", &[], APPLICATION)?;
    w.end("Properties")?;
    Ok(w.finish())
}
