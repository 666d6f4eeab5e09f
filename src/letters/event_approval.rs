//! Generator for the event approval letter.

use chrono::NaiveDate;

use crate::layout::constants::{EventApprovalConstants, EVENT_APPROVAL};
use crate::layout::event_approval;
use crate::models::{EventApprovalForm, LetterKind};

use super::common::sanitize_filename;
use super::engine::RenderEngine;
use super::traits::{Generator, Validator};
use super::{GeneratedDocument, GeneratorError};

/// Download name, e.g. `Event_Approval_Letter_cse.pdf`.
pub fn filename(department: &str) -> String {
    format!(
        "Event_Approval_Letter_{}.pdf",
        sanitize_filename(department, "dept")
    )
}

pub struct EventApprovalGenerator<'a> {
    engine: &'a RenderEngine,
    constants: &'static EventApprovalConstants,
}

impl<'a> EventApprovalGenerator<'a> {
    pub fn new(engine: &'a RenderEngine) -> Self {
        Self {
            engine,
            constants: &EVENT_APPROVAL,
        }
    }
}

impl Generator<EventApprovalForm> for EventApprovalGenerator<'_> {
    fn generate_on(
        &self,
        request: &EventApprovalForm,
        date: NaiveDate,
    ) -> Result<GeneratedDocument, GeneratorError> {
        request.validate().map_err(GeneratorError::Validation)?;

        let plan = event_approval::plan(request, self.constants, date)?;
        if let Some(table) = &plan.table {
            if !table.skipped_rows.is_empty() {
                log::debug!(
                    "Attached table: {} row(s) did not fit and were left out",
                    table.skipped_rows.len()
                );
            }
        }

        self.engine.render(
            LetterKind::EventApproval,
            &plan.into_page(),
            filename(&request.department),
            date,
        )
    }
}
