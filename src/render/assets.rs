//! Letterhead images, decoded once and kept ready for embedding.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use crate::layout::AssetKind;

/// Extensions tried in order for each asset stem.
const EXTENSIONS: [&str; 3] = ["png", "webp", "jpg"];

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("no {stem}.{{png,webp,jpg}} in {dir}")]
    Missing { stem: &'static str, dir: PathBuf },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// An image split into zlib-compressed RGB samples and an optional alpha
/// channel, as PDF image XObjects want them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
}

impl PreparedImage {
    pub fn from_rgba(rgba: &image::RgbaImage) -> Self {
        let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);
        let rgb: Vec<u8> = rgba
            .pixels()
            .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
            .collect();
        let alpha = has_alpha.then(|| {
            let samples: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
            miniz_oxide::deflate::compress_to_vec_zlib(&samples, 6)
        });

        Self {
            width: rgba.width(),
            height: rgba.height(),
            rgb: miniz_oxide::deflate::compress_to_vec_zlib(&rgb, 6),
            alpha,
        }
    }
}

/// Looks up letterhead images in a directory.
///
/// Successful loads are cached; failures are not, so an asset dropped into
/// the directory later is picked up on the next export.
pub struct AssetStore {
    dir: PathBuf,
    cache: RwLock<HashMap<AssetKind, Arc<PreparedImage>>>,
}

impl AssetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// First existing file for `asset`, trying each extension in turn.
    pub fn locate(&self, asset: AssetKind) -> Option<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", asset.file_stem(), ext)))
            .find(|path| path.is_file())
    }

    pub fn load(&self, asset: AssetKind) -> Result<Arc<PreparedImage>, AssetError> {
        if let Some(image) = self.cache.read().get(&asset) {
            return Ok(Arc::clone(image));
        }

        let path = self.locate(asset).ok_or_else(|| AssetError::Missing {
            stem: asset.file_stem(),
            dir: self.dir.clone(),
        })?;
        let decoded = image::open(&path).map_err(|source| AssetError::Decode {
            path: path.clone(),
            source,
        })?;
        let prepared = Arc::new(PreparedImage::from_rgba(&decoded.to_rgba8()));
        log::debug!(
            "Loaded {} ({}x{}) from {}",
            asset.file_stem(),
            prepared.width,
            prepared.height,
            path.display()
        );

        self.cache.write().insert(asset, Arc::clone(&prepared));
        Ok(prepared)
    }
}
