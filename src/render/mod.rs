//! Document exporter: turns a laid-out page into PDF bytes.

pub mod assets;
pub mod pdf;

pub use assets::{AssetError, AssetStore};
pub use pdf::PdfExporter;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ExportError {
    #[error("draw operation {index} has a non-finite coordinate")]
    NonFinite { index: usize },
    #[error("page size {width}x{height} is not drawable")]
    PageSize { width: f32, height: f32 },
}
