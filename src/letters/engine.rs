//! PDF rendering engine.
//!
//! Owns the exporter (and through it the letterhead assets) and turns laid-out
//! pages into downloadable documents.

use chrono::NaiveDate;

use crate::layout::PageDescription;
use crate::models::{LetterForm, LetterKind};
use crate::render::{AssetStore, PdfExporter};

use super::event_approval::EventApprovalGenerator;
use super::faculty_request::FacultyRequestGenerator;
use super::traits::Generator;
use super::{GeneratedDocument, GeneratorError};

pub struct RenderEngine {
    exporter: PdfExporter,
}

impl RenderEngine {
    pub fn new(assets: AssetStore) -> Self {
        Self {
            exporter: PdfExporter::new(assets),
        }
    }

    /// Serialize a finished page.
    ///
    /// # Arguments
    /// * `kind` - The letter type, used for logging.
    /// * `page` - The laid-out page.
    /// * `filename` - Download name for the document.
    /// * `date` - The date stamped into the page.
    pub fn render(
        &self,
        kind: LetterKind,
        page: &PageDescription,
        filename: String,
        date: NaiveDate,
    ) -> Result<GeneratedDocument, GeneratorError> {
        let pdf = self.exporter.export(page)?;
        log::info!(
            "Generated {} ({} ops) as {} [{} bytes]",
            kind.slug(),
            page.ops.len(),
            filename,
            pdf.len()
        );

        Ok(GeneratedDocument {
            kind,
            filename,
            pdf,
            date,
        })
    }

    /// Validate, lay out and export any letter form.
    pub fn generate(
        &self,
        form: &LetterForm,
        date: NaiveDate,
    ) -> Result<GeneratedDocument, GeneratorError> {
        match form {
            LetterForm::FacultyRequest(f) => FacultyRequestGenerator::new(self).generate_on(f, date),
            LetterForm::EventApproval(f) => EventApprovalGenerator::new(self).generate_on(f, date),
        }
    }
}
