//! Sources of binary assets (key icons) embedded into documents.
//!
//! - [`BundledAssets`]: images compiled into the library
//! - [`DirectoryAssets`]: images read from a directory on disk
//! - [`InMemoryAssets`]: images supplied by the caller

use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};

/// Shared asset bytes.
pub type SharedAssetData = Arc<Vec<u8>>;

/// Logical path of the primary-key icon.
pub const PRIMARY_KEY_ICON: &str = "images/primaryKey.png";

/// Logical path of the foreign-key icon.
pub const FOREIGN_KEY_ICON: &str = "images/foreignKey.png";

static PRIMARY_KEY_PNG: &[u8] = include_bytes!("../../assets/images/primaryKey.png");
static FOREIGN_KEY_PNG: &[u8] = include_bytes!("../../assets/images/foreignKey.png");

/// A place assets can be loaded from by logical path.
pub trait AssetSource: Send + Sync + Debug {
    /// Load the asset at `path`.
    ///
    /// Fails with [`Error::ResourceUnavailable`] when the asset is missing or
    /// unreadable.
    fn load(&self, path: &str) -> Result<SharedAssetData>;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}

/// The icons shipped with the crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledAssets;

impl AssetSource for BundledAssets {
    fn load(&self, path: &str) -> Result<SharedAssetData> {
        match path {
            PRIMARY_KEY_ICON => Ok(Arc::new(PRIMARY_KEY_PNG.to_vec())),
            FOREIGN_KEY_ICON => Ok(Arc::new(FOREIGN_KEY_PNG.to_vec())),
            _ => Err(Error::resource_unavailable(path, "not a bundled asset")),
        }
    }

    fn name(&self) -> &'static str {
        "BundledAssets"
    }
}

/// Assets read from files below a base directory.
///
/// Absolute paths and paths containing `..` are refused so a logical asset
/// path can never escape the base directory.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    base: PathBuf,
}

impl DirectoryAssets {
    /// Create a source rooted at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// The base directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return None;
        }
        Some(self.base.join(relative))
    }
}

impl AssetSource for DirectoryAssets {
    fn load(&self, path: &str) -> Result<SharedAssetData> {
        let full_path = self
            .resolve(path)
            .ok_or_else(|| Error::resource_unavailable(path, "path escapes asset directory"))?;
        std::fs::read(&full_path)
            .map(Arc::new)
            .map_err(|e| Error::resource_unavailable(path, format!("{}: {}", full_path.display(), e)))
    }

    fn name(&self) -> &'static str {
        "DirectoryAssets"
    }
}

/// Assets held in memory, keyed by logical path.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAssets {
    assets: HashMap<String, SharedAssetData>,
}

impl InMemoryAssets {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an asset.
    pub fn with_asset(mut self, path: impl Into<String>, data: Vec<u8>) -> Self {
        self.assets.insert(path.into(), Arc::new(data));
        self
    }

    /// Number of assets held.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether no assets are held.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetSource for InMemoryAssets {
    fn load(&self, path: &str) -> Result<SharedAssetData> {
        self.assets
            .get(path)
            .cloned()
            .ok_or_else(|| Error::resource_unavailable(path, "not found"))
    }

    fn name(&self) -> &'static str {
        "InMemoryAssets"
    }
}
