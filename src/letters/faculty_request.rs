//! Generator for the faculty request letter.

use chrono::NaiveDate;

use crate::layout::constants::{FacultyRequestConstants, FACULTY_REQUEST};
use crate::layout::faculty_request;
use crate::models::{FacultyRequestForm, LetterKind};

use super::common::sanitize_filename;
use super::engine::RenderEngine;
use super::traits::{Generator, Validator};
use super::{GeneratedDocument, GeneratorError};

/// Download name, e.g. `Faculty_Request_Letter_cse_19_10_2026.pdf`.
pub fn filename(department: &str, date: NaiveDate) -> String {
    format!(
        "Faculty_Request_Letter_{}_{}.pdf",
        sanitize_filename(department, "dept"),
        date.format("%d_%m_%Y")
    )
}

pub struct FacultyRequestGenerator<'a> {
    engine: &'a RenderEngine,
    constants: &'static FacultyRequestConstants,
}

impl<'a> FacultyRequestGenerator<'a> {
    pub fn new(engine: &'a RenderEngine) -> Self {
        Self {
            engine,
            constants: &FACULTY_REQUEST,
        }
    }
}

impl Generator<FacultyRequestForm> for FacultyRequestGenerator<'_> {
    fn generate_on(
        &self,
        request: &FacultyRequestForm,
        date: NaiveDate,
    ) -> Result<GeneratedDocument, GeneratorError> {
        request.validate().map_err(GeneratorError::Validation)?;

        let page = faculty_request::plan(request, self.constants, date)?.into_page();
        self.engine.render(
            LetterKind::FacultyRequest,
            &page,
            filename(&request.department, date),
            date,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::AssetStore;
    use tempfile::tempdir;

    #[test]
    fn test_filename() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(
            filename("Computer Science", date),
            "Faculty_Request_Letter_computer-science_07_03_2026.pdf"
        );
        assert_eq!(filename("", date), "Faculty_Request_Letter_dept_07_03_2026.pdf");
    }

    #[test]
    fn test_invalid_form_produces_no_document() {
        let dir = tempdir().unwrap();
        let engine = RenderEngine::new(AssetStore::new(dir.path()));
        let result = FacultyRequestGenerator::new(&engine).generate(&FacultyRequestForm::default());
        assert!(matches!(result, Err(GeneratorError::Validation(e)) if e.len() == 5));
    }
}
