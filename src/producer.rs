//! Document assembly: schema model in, `.docx` file out.
//!
//! [`DocxProducer`] creates a fresh container per invocation, renders the
//! title, the schema heading and the tables, views and routines sections in
//! that order, and persists the result into the output directory. Container
//! faults are caught here, logged, and reported as
//! [`ProduceOutcome::Failed`]; they never propagate further.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::DocxConfig;
use crate::docx::{styles, ContainerEngine, DocxPackage};
use crate::error::Result;
use crate::model::Database;
use crate::sections::{RoutinesSection, SectionRenderer, TablesSection, ViewsSection};
use crate::writer::{AssetSource, BundledAssets, DirectoryAssets, ResourceCache, SectionWriter};

/// Result of one output generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProduceOutcome {
    /// The document was written to this path
    Written(PathBuf),
    /// The database has no tables; nothing was written
    NothingToWrite,
    /// Generation failed; the reason has been logged
    Failed(String),
}

impl ProduceOutcome {
    /// Whether the caller should treat the run as successful.
    ///
    /// [`ProduceOutcome::NothingToWrite`] counts as success.
    pub fn is_success(&self) -> bool {
        !matches!(self, ProduceOutcome::Failed(_))
    }

    /// Path of the written file, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ProduceOutcome::Written(path) => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for ProduceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProduceOutcome::Written(path) => write!(f, "written to {}", path.display()),
            ProduceOutcome::NothingToWrite => write!(f, "nothing to write"),
            ProduceOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// A renderer of the schema model into some output format.
pub trait OutputProducer {
    /// Short name of the output format.
    fn name(&self) -> &'static str;

    /// Render `database` into `output_dir`.
    ///
    /// Never panics and never returns an error; failures are logged and
    /// reported through the outcome.
    fn generate(&self, database: &Database, output_dir: &Path) -> ProduceOutcome;
}

/// Word document producer.
#[derive(Debug, Clone)]
pub struct DocxProducer {
    config: DocxConfig,
    assets: Arc<dyn AssetSource>,
}

impl Default for DocxProducer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxProducer {
    /// Producer with default configuration and the bundled icons.
    pub fn new() -> Self {
        Self::with_config(DocxConfig::default())
    }

    /// Producer with the given configuration.
    ///
    /// Icons come from `config.asset_dir` when set, otherwise from the
    /// images bundled with the crate.
    pub fn with_config(config: DocxConfig) -> Self {
        let assets: Arc<dyn AssetSource> = match &config.asset_dir {
            Some(dir) => Arc::new(DirectoryAssets::new(dir.clone())),
            None => Arc::new(BundledAssets),
        };
        Self { config, assets }
    }

    /// Replace the icon source.
    pub fn with_asset_source(mut self, assets: Arc<dyn AssetSource>) -> Self {
        self.assets = assets;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &DocxConfig {
        &self.config
    }

    /// Full path of the document inside `output_dir`.
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.config.output_file_name)
    }

    /// Append the whole report for `database` to `container`.
    pub fn render<C: ContainerEngine + ?Sized>(
        &self,
        container: &mut C,
        database: &Database,
    ) -> Result<()> {
        let mut cache = ResourceCache::new(Arc::clone(&self.assets), self.config.icon_width);
        let mut out = SectionWriter::new(container, &mut cache);

        out.title(&format!("Database: {}", database.name))?;
        out.heading(
            styles::HEADING1,
            &format!("Schema: {}", database.schema.as_deref().unwrap_or_default()),
        )?;

        TablesSection.render(&mut out, &database.tables)?;
        ViewsSection.render(&mut out, &database.views)?;
        RoutinesSection.render(&mut out, &database.routines)?;

        log::debug!(
            "Rendered {} elements for database {}",
            out.container().elements().len(),
            database.name
        );
        Ok(())
    }

    /// Render into an existing container and persist it into `output_dir`.
    ///
    /// A database without tables leaves the container untouched and writes
    /// nothing.
    pub fn generate_into<C: ContainerEngine + ?Sized>(
        &self,
        container: &mut C,
        database: &Database,
        output_dir: &Path,
    ) -> ProduceOutcome {
        if database.tables.is_empty() {
            log::info!("No tables to output, nothing written to disk");
            return ProduceOutcome::NothingToWrite;
        }
        self.finish(self.render_and_persist(container, database, output_dir))
    }

    fn render_and_persist<C: ContainerEngine + ?Sized>(
        &self,
        container: &mut C,
        database: &Database,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        self.render(container, database)?;
        let path = self.output_path(output_dir);
        container.persist(&path)?;
        Ok(path)
    }

    fn finish(&self, result: Result<PathBuf>) -> ProduceOutcome {
        match result {
            Ok(path) => {
                log::info!("Wrote {}", path.display());
                ProduceOutcome::Written(path)
            },
            Err(e) => {
                log::error!("Failed to produce output: {}", e);
                ProduceOutcome::Failed(e.to_string())
            },
        }
    }
}

impl OutputProducer for DocxProducer {
    fn name(&self) -> &'static str {
        "docx"
    }

    fn generate(&self, database: &Database, output_dir: &Path) -> ProduceOutcome {
        match DocxPackage::create(self.config.page()) {
            Ok(mut package) => self.generate_into(&mut package, database, output_dir),
            Err(e) => self.finish(Err(e)),
        }
    }
}
