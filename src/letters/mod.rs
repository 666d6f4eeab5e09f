//! Letter generation pipeline.
//!
//! A form snapshot goes through validation, then the layout engine, then the
//! PDF exporter:
//! - `FacultyRequestGenerator` - faculty request letter (points)
//! - `EventApprovalGenerator` - event approval letter with budget (millimetres)

pub mod common;
pub mod engine;
pub mod event_approval;
pub mod faculty_request;
pub mod form;
pub mod handlers;
pub mod traits;
pub mod validation;

pub use engine::RenderEngine;
pub use event_approval::EventApprovalGenerator;
pub use faculty_request::FacultyRequestGenerator;
pub use form::{EditError, FormEdit};
pub use traits::{Generator, Validator};
pub use validation::{ValidationError, ValidationErrors};

use chrono::NaiveDate;
use thiserror::Error;

use crate::layout::RenderError;
use crate::models::LetterKind;
use crate::render::ExportError;

/// Errors that can occur during document generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("layout failed: {0}")]
    Render(#[from] RenderError),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

/// Result of a successful document generation.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub kind: LetterKind,
    pub filename: String,
    pub pdf: Vec<u8>,
    pub date: NaiveDate,
}
