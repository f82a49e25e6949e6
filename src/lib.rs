// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::enum_variant_names)]
#![allow(clippy::should_implement_trait)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]
#![cfg_attr(test, allow(unused_variables))]

//! # schema_docx
//!
//! Renders a relational schema model (tables, views, routines with their
//! columns, keys, indexes and constraints) into a Word (`.docx`) report.
//!
//! ## Document layout
//!
//! - Title with the database name, heading with the schema
//! - **Tables**: summary list, then per table its description, columns (key
//!   columns marked with an icon), relationships, checks and indexes
//! - **Views**: summary list, then per view its description, columns and
//!   source text
//! - **Routines**: summary list, then per routine its description,
//!   parameters and source text
//!
//! Sections without entities are left out entirely. A database with no
//! tables produces no file at all.
//!
//! ## Quick Start
//!
//! ```ignore
//! use schema_docx::{Database, DocxProducer, OutputProducer, ProduceOutcome};
//!
//! let database: Database = serde_json::from_str(&json)?;
//! match DocxProducer::new().generate(&database, "out".as_ref()) {
//!     ProduceOutcome::Written(path) => println!("wrote {}", path.display()),
//!     ProduceOutcome::NothingToWrite => println!("no tables"),
//!     ProduceOutcome::Failed(reason) => eprintln!("{}", reason),
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! producer (DocxProducer)
//!     ↓
//! sections (tables → views → routines)
//!     ↓
//! writer (table builder, cell writer, resource cache)
//!     ↓
//! docx (ContainerEngine / DocxPackage) ──▶ document.docx
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Schema model
pub mod model;

// Container engine
pub mod docx;

// Layout primitives
pub mod writer;

// Section renderers
pub mod sections;

// Document assembly
pub mod producer;

pub use config::DocxConfig;
pub use docx::{ContainerEngine, DocxPackage, Element, PageDimensions, PageSize, TableHandle};
pub use error::{Error, Result};
pub use model::{
    ColumnRef, Database, ForeignKeyConstraint, Routine, RoutineParameter, Table, TableColumn,
    TableIndex, View,
};
pub use producer::{DocxProducer, OutputProducer, ProduceOutcome};
pub use writer::{AssetSource, BundledAssets, DirectoryAssets, InMemoryAssets};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
