//! Configuration for document generation.
//!
//! A [`DocxConfig`] can be built in code or read from a TOML file. Every key
//! is optional; missing keys keep their defaults and unknown keys are
//! rejected.
//!
//! ```toml
//! [page]
//! size = "a4"          # letter, a4, legal, a3
//! margin = 1440        # every side, in twips
//!
//! [page.margins]       # single sides override `margin`
//! left = 1800
//!
//! [output]
//! file = "schema.docx"
//!
//! [icons]
//! width = 200          # twips
//! dir = "assets"       # replacement icon images
//! ```
//!
//! A custom paper size is given as `width` and `height` in twips instead of
//! `size`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::docx::{Margins, PageDimensions, PageSize};
use crate::error::{Error, Result};

/// Default name of the persisted document.
pub const DEFAULT_OUTPUT_FILE: &str = "document.docx";

/// Default display width of key icons, in twips.
pub const DEFAULT_ICON_WIDTH: u32 = 200;

/// Document generation configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DocxConfig {
    /// Paper size of the single document section.
    pub page_size: PageSize,

    /// Page margins in twips.
    pub margins: Margins,

    /// File name written into the output directory.
    pub output_file_name: String,

    /// Display width of key icons in twips.
    pub icon_width: u32,

    /// Directory to load icon images from instead of the bundled ones.
    pub asset_dir: Option<PathBuf>,
}

impl Default for DocxConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            page_size: PageSize::Letter,
            margins: Margins::default(),
            output_file_name: DEFAULT_OUTPUT_FILE.to_string(),
            icon_width: DEFAULT_ICON_WIDTH,
            asset_dir: None,
        }
    }

    /// Set the paper size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    /// Set the page margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the output file name.
    pub fn with_output_file_name(mut self, name: impl Into<String>) -> Self {
        self.output_file_name = name.into();
        self
    }

    /// Set the icon display width.
    pub fn with_icon_width(mut self, twips: u32) -> Self {
        self.icon_width = twips;
        self
    }

    /// Load icons from `dir` instead of the bundled images.
    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = Some(dir.into());
        self
    }

    /// Page geometry derived from size and margins.
    pub fn page(&self) -> PageDimensions {
        PageDimensions::new(self.page_size, self.margins)
    }

    /// Read configuration from a TOML file, starting from defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text).map_err(|e| match e {
            Error::Config(reason) => Error::Config(format!("{}: {}", path.display(), reason)),
            other => other,
        })
    }

    /// Read configuration from TOML text, starting from defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(text).map_err(|e| Error::Config(e.message().to_string()))?;
        let mut config = Self::new();
        config.apply(file)?;
        Ok(config)
    }

    fn apply(&mut self, file: ConfigFile) -> Result<()> {
        let page = file.page;
        match (page.size, page.width, page.height) {
            (Some(name), None, None) => {
                self.page_size = PageSize::from_name(&name)
                    .ok_or_else(|| Error::Config(format!("unknown page size '{}'", name)))?;
            },
            (None, Some(width), Some(height)) => self.page_size = PageSize::Custom(width, height),
            (None, None, None) => {},
            _ => {
                return Err(Error::Config(
                    "page needs either `size` or both `width` and `height`".to_string(),
                ))
            },
        }

        if let Some(margin) = page.margin {
            self.margins = Margins::uniform(margin);
        }
        let sides = page.margins;
        self.margins.left = sides.left.unwrap_or(self.margins.left);
        self.margins.right = sides.right.unwrap_or(self.margins.right);
        self.margins.top = sides.top.unwrap_or(self.margins.top);
        self.margins.bottom = sides.bottom.unwrap_or(self.margins.bottom);

        if let Some(name) = file.output.file {
            if name.trim().is_empty() {
                return Err(Error::Config("output.file must not be empty".to_string()));
            }
            self.output_file_name = name;
        }
        if let Some(width) = file.icons.width {
            self.icon_width = width;
        }
        if let Some(dir) = file.icons.dir {
            self.asset_dir = Some(dir);
        }
        log::debug!("Loaded configuration: {:?}", self);
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    page: PageTable,
    output: OutputTable,
    icons: IconTable,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PageTable {
    size: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    margin: Option<u32>,
    margins: MarginTable,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MarginTable {
    left: Option<u32>,
    right: Option<u32>,
    top: Option<u32>,
    bottom: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct OutputTable {
    file: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct IconTable {
    width: Option<u32>,
    dir: Option<PathBuf>,
}
