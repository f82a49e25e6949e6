//! Layout primitives shared by the section renderers.
//!
//! ## Architecture
//!
//! ```text
//! SectionWriter
//!     ├── table_builder  (page-wide tables, header row)
//!     ├── cell_writer    (clear + write, per-cell failure isolation)
//!     └── resource_cache (embed-once icons)
//!             ↓
//!         AssetSource (bundled / directory / in-memory)
//! ```

mod assets;
mod cell_writer;
mod resource_cache;
mod section_writer;
mod table_builder;

pub use assets::{
    AssetSource, BundledAssets, DirectoryAssets, InMemoryAssets, SharedAssetData,
    FOREIGN_KEY_ICON, PRIMARY_KEY_ICON,
};
pub use cell_writer::{fill_cell, set_cell_content, CellContent, CellOutcome};
pub use resource_cache::{Icon, ResourceCache};
pub use section_writer::SectionWriter;
pub use table_builder::{column_widths, create_table};
