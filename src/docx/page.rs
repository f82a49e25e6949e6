//! Page geometry for the main document section.
//!
//! WordprocessingML measures page size and margins in twentieths of a point
//! (twips). All values here use that unit.

/// Twips per inch.
pub const TWIPS_PER_INCH: u32 = 1440;

/// English Metric Units per twip (drawing extents are expressed in EMU).
pub const EMU_PER_TWIP: u64 = 635;

/// Standard page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    /// US Letter (8.5" x 11")
    #[default]
    Letter,
    /// A4 (210mm x 297mm)
    A4,
    /// Legal (8.5" x 14")
    Legal,
    /// A3 (297mm x 420mm)
    A3,
    /// Custom dimensions in twips
    Custom(u32, u32),
}

impl PageSize {
    /// Get dimensions in twips as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            PageSize::Letter => (12240, 15840),
            PageSize::A4 => (11906, 16838),
            PageSize::Legal => (12240, 20160),
            PageSize::A3 => (16838, 23811),
            PageSize::Custom(w, h) => (*w, *h),
        }
    }

    /// Parse a page size name (`letter`, `a4`, `legal`, `a3`), case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "letter" => Some(PageSize::Letter),
            "a4" => Some(PageSize::A4),
            "legal" => Some(PageSize::Legal),
            "a3" => Some(PageSize::A3),
            _ => None,
        }
    }
}

/// Page margins in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    /// Top margin
    pub top: u32,
    /// Bottom margin
    pub bottom: u32,
    /// Left margin
    pub left: u32,
    /// Right margin
    pub right: u32,
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(TWIPS_PER_INCH)
    }
}

impl Margins {
    /// Create margins with equal values on all sides.
    pub fn uniform(margin: u32) -> Self {
        Self {
            top: margin,
            bottom: margin,
            left: margin,
            right: margin,
        }
    }

    /// Create margins with no spacing.
    pub fn none() -> Self {
        Self::uniform(0)
    }
}

/// Resolved page size plus margins for the single document section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageDimensions {
    /// Paper size
    pub size: PageSize,
    /// Margins
    pub margins: Margins,
}

impl PageDimensions {
    /// Create page dimensions from a size and margins.
    pub fn new(size: PageSize, margins: Margins) -> Self {
        Self { size, margins }
    }

    /// Page width in twips.
    pub fn width(&self) -> u32 {
        self.size.dimensions().0
    }

    /// Page height in twips.
    pub fn height(&self) -> u32 {
        self.size.dimensions().1
    }

    /// Width available for content between the left and right margins.
    ///
    /// Returns `None` when the margins consume the whole page.
    pub fn writable_width(&self) -> Option<u32> {
        self.width()
            .checked_sub(self.margins.left)
            .and_then(|w| w.checked_sub(self.margins.right))
            .filter(|w| *w > 0)
    }
}
