//! Embed-once cache for icon images.
//!
//! The first request for an asset reads its bytes, registers them with the
//! container and creates an inline display handle. Later requests return the
//! same handle, so each asset is embedded at most once per document.

use std::collections::HashMap;
use std::sync::Arc;

use super::assets::{AssetSource, FOREIGN_KEY_ICON, PRIMARY_KEY_ICON};
use crate::docx::{BinaryPart, ContainerEngine, InlineImage};
use crate::error::{Error, Result};

/// Icons used to mark key columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    /// Primary-key marker
    PrimaryKey,
    /// Foreign-key marker
    ForeignKey,
}

impl Icon {
    /// Logical asset path of the icon image.
    pub fn asset_path(&self) -> &'static str {
        match self {
            Icon::PrimaryKey => PRIMARY_KEY_ICON,
            Icon::ForeignKey => FOREIGN_KEY_ICON,
        }
    }
}

/// Per-document cache of embedded assets.
///
/// Bound to one container: handles are only meaningful inside the container
/// they were created in.
#[derive(Debug)]
pub struct ResourceCache {
    source: Arc<dyn AssetSource>,
    display_width: u32,
    parts: HashMap<String, BinaryPart>,
    handles: HashMap<String, InlineImage>,
}

impl ResourceCache {
    /// Create an empty cache reading from `source`, displaying images
    /// `display_width` twips wide.
    pub fn new(source: Arc<dyn AssetSource>, display_width: u32) -> Self {
        Self {
            source,
            display_width,
            parts: HashMap::new(),
            handles: HashMap::new(),
        }
    }

    /// Return the inline handle for `asset_path`, embedding it on first use.
    ///
    /// Any failure is reported as [`Error::ResourceUnavailable`]. Nothing is
    /// cached for a failed request.
    pub fn embed<C: ContainerEngine + ?Sized>(
        &mut self,
        container: &mut C,
        asset_path: &str,
    ) -> Result<InlineImage> {
        if let Some(handle) = self.handles.get(asset_path) {
            return Ok(handle.clone());
        }

        let part = match self.parts.get(asset_path) {
            Some(part) => part.clone(),
            None => {
                let bytes = self.source.load(asset_path)?;
                let part = container
                    .embed_binary_asset(&bytes)
                    .map_err(|e| Error::resource_unavailable(asset_path, e))?;
                log::debug!(
                    "Embedded {} from {} as {}",
                    asset_path,
                    self.source.name(),
                    part.rel_id
                );
                self.parts.insert(asset_path.to_string(), part.clone());
                part
            },
        };

        let handle = container
            .create_inline_display(&part, self.display_width)
            .map_err(|e| Error::resource_unavailable(asset_path, e))?;
        self.handles.insert(asset_path.to_string(), handle.clone());
        Ok(handle)
    }

    /// Shorthand for [`ResourceCache::embed`] with an [`Icon`].
    pub fn icon<C: ContainerEngine + ?Sized>(
        &mut self,
        container: &mut C,
        icon: Icon,
    ) -> Result<InlineImage> {
        self.embed(container, icon.asset_path())
    }

    /// Whether a handle exists for `asset_path`.
    pub fn contains(&self, asset_path: &str) -> bool {
        self.handles.contains_key(asset_path)
    }

    /// Number of cached handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether nothing has been embedded yet.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
