//! Snapshot edits for letter forms.
//!
//! A form is never mutated in place: `LetterForm::apply` returns the next
//! snapshot and leaves the current one untouched. Text goes through the
//! length limiter and amounts through the amount sanitizer on the way in.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::{EventApprovalForm, LetterField, LetterForm, LetterKind, ParticularEntry};
use crate::table::{parse_pasted_table, TableGrid};

use super::common::{limit_amount, limit_chars};

/// One edit to a form snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FormEdit {
    SetField {
        field: LetterField,
        value: String,
    },
    SetParticularCount {
        count: usize,
    },
    SetParticular {
        index: usize,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        amount: Option<String>,
    },
    SetAttachTable {
        attach: bool,
    },
    SetTableContent {
        content: String,
    },
    ParseTable,
    SetTableCell {
        row: usize,
        col: usize,
        value: String,
    },
    AddTableRow,
    AddTableCol,
    RemoveTableRow {
        index: usize,
    },
    RemoveTableCol {
        index: usize,
    },
}

impl FormEdit {
    pub fn name(&self) -> &'static str {
        match self {
            FormEdit::SetField { .. } => "set_field",
            FormEdit::SetParticularCount { .. } => "set_particular_count",
            FormEdit::SetParticular { .. } => "set_particular",
            FormEdit::SetAttachTable { .. } => "set_attach_table",
            FormEdit::SetTableContent { .. } => "set_table_content",
            FormEdit::ParseTable => "parse_table",
            FormEdit::SetTableCell { .. } => "set_table_cell",
            FormEdit::AddTableRow => "add_table_row",
            FormEdit::AddTableCol => "add_table_col",
            FormEdit::RemoveTableRow { .. } => "remove_table_row",
            FormEdit::RemoveTableCol { .. } => "remove_table_col",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("{kind:?} letters have no '{field}' field")]
    UnknownField { kind: LetterKind, field: &'static str },
    #[error("'{op}' does not apply to {kind:?} letters")]
    Unsupported { op: &'static str, kind: LetterKind },
    #[error("particular count must be between 1 and 7, got {0}")]
    ParticularCount(usize),
    #[error("{what} index {index} is out of range (len {len})")]
    OutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
}

impl LetterForm {
    /// Applies `edit` and returns the resulting snapshot.
    pub fn apply(&self, edit: &FormEdit) -> Result<LetterForm, EditError> {
        let kind = self.kind();

        if let FormEdit::SetField { field, value } = edit {
            let mut next = self.clone();
            let max = kind.max_chars(*field);
            let slot = next.field_mut(*field).ok_or(EditError::UnknownField {
                kind,
                field: field.key(),
            })?;
            *slot = match max {
                Some(max) => limit_chars(value, max),
                None => value.clone(),
            };
            return Ok(next);
        }

        match self {
            LetterForm::EventApproval(form) => {
                apply_event_edit(form, edit).map(LetterForm::EventApproval)
            }
            LetterForm::FacultyRequest(_) => Err(EditError::Unsupported {
                op: edit.name(),
                kind,
            }),
        }
    }

    /// The documented defaults for this letter kind.
    pub fn reset(&self) -> LetterForm {
        LetterForm::blank(self.kind())
    }
}

fn apply_event_edit(
    form: &EventApprovalForm,
    edit: &FormEdit,
) -> Result<EventApprovalForm, EditError> {
    let mut next = form.clone();
    match edit {
        FormEdit::SetField { .. } => {}
        FormEdit::SetParticularCount { count } => {
            let count = *count;
            if !(ParticularEntry::MIN_COUNT..=ParticularEntry::MAX_COUNT).contains(&count) {
                return Err(EditError::ParticularCount(count));
            }
            next.particulars.resize(count, ParticularEntry::default());
        }
        FormEdit::SetParticular {
            index,
            description,
            amount,
        } => {
            let len = next.particulars.len();
            let entry = next.particulars.get_mut(*index).ok_or(EditError::OutOfRange {
                what: "particular",
                index: *index,
                len,
            })?;
            if let Some(description) = description {
                entry.description = limit_chars(description, ParticularEntry::MAX_DESCRIPTION_CHARS);
            }
            if let Some(amount) = amount {
                entry.amount = limit_amount(amount, ParticularEntry::MAX_AMOUNT_DIGITS);
            }
        }
        FormEdit::SetAttachTable { attach } => next.attach_table = *attach,
        FormEdit::SetTableContent { content } => next.table_content = content.clone(),
        FormEdit::ParseTable => {
            if let Some(grid) = parse_pasted_table(&next.table_content) {
                next.table = grid;
            }
        }
        FormEdit::SetTableCell { row, col, value } => {
            let (rows, cols) = (form.table.row_count(), form.table.col_count());
            next.table = next.table.with_cell(*row, *col, value.clone()).ok_or(
                if *row >= rows {
                    EditError::OutOfRange { what: "table row", index: *row, len: rows }
                } else {
                    EditError::OutOfRange { what: "table column", index: *col, len: cols }
                },
            )?;
        }
        FormEdit::AddTableRow => next.table = next.table.with_row_added(),
        FormEdit::AddTableCol => next.table = next.table.with_col_added(),
        FormEdit::RemoveTableRow { index } => {
            next.table = removal(&next.table, *index, "table row", true)?;
        }
        FormEdit::RemoveTableCol { index } => {
            next.table = removal(&next.table, *index, "table column", false)?;
        }
    }
    Ok(next)
}

/// Removing from a single row / column grid is a no-op for any index.
fn removal(
    table: &TableGrid,
    index: usize,
    what: &'static str,
    rows: bool,
) -> Result<TableGrid, EditError> {
    let len = if rows { table.row_count() } else { table.col_count() };
    if len <= 1 {
        return Ok(table.clone());
    }
    let next = if rows {
        table.with_row_removed(index)
    } else {
        table.with_col_removed(index)
    };
    next.ok_or(EditError::OutOfRange { what, index, len })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::Validator;

    fn event() -> LetterForm {
        LetterForm::blank(LetterKind::EventApproval)
    }

    fn event_form(form: &LetterForm) -> &EventApprovalForm {
        match form {
            LetterForm::EventApproval(f) => f,
            other => panic!("expected event form, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_set_field_is_limited() {
        let edit = FormEdit::SetField {
            field: LetterField::Department,
            value: "d".repeat(40),
        };
        let next = event().apply(&edit).unwrap();
        assert_eq!(next.field(LetterField::Department).unwrap().len(), 30);
    }

    #[test]
    fn test_apply_leaves_original_untouched() {
        let form = event();
        let edit = FormEdit::SetField {
            field: LetterField::Subject,
            value: "Expo".into(),
        };
        let next = form.apply(&edit).unwrap();
        assert_eq!(form.field(LetterField::Subject), Some(""));
        assert_eq!(next.field(LetterField::Subject), Some("Expo"));
    }

    #[test]
    fn test_faculty_has_no_through() {
        let form = LetterForm::blank(LetterKind::FacultyRequest);
        let edit = FormEdit::SetField {
            field: LetterField::Through,
            value: "HOD".into(),
        };
        assert!(matches!(form.apply(&edit), Err(EditError::UnknownField { .. })));
    }

    #[test]
    fn test_event_only_edit_on_faculty_fails() {
        let form = LetterForm::blank(LetterKind::FacultyRequest);
        assert_eq!(
            form.apply(&FormEdit::AddTableRow).unwrap_err(),
            EditError::Unsupported {
                op: "add_table_row",
                kind: LetterKind::FacultyRequest
            }
        );
    }

    #[test]
    fn test_particular_count_keeps_existing_entries() {
        let form = event()
            .apply(&FormEdit::SetParticular {
                index: 0,
                description: Some("Venue".into()),
                amount: Some("1,500".into()),
            })
            .unwrap()
            .apply(&FormEdit::SetParticularCount { count: 5 })
            .unwrap();
        let f = event_form(&form);
        assert_eq!(f.particulars.len(), 5);
        assert_eq!(f.particulars[0], ParticularEntry::new("Venue", "1500"));
        assert_eq!(f.particulars[4], ParticularEntry::default());

        assert_eq!(
            form.apply(&FormEdit::SetParticularCount { count: 0 }).unwrap_err(),
            EditError::ParticularCount(0)
        );
    }

    #[test]
    fn test_amount_edit_caps_digits() {
        let form = event()
            .apply(&FormEdit::SetParticular {
                index: 1,
                description: None,
                amount: Some(format!("{}.75", "9".repeat(40))),
            })
            .unwrap();
        assert_eq!(event_form(&form).particulars[1].amount, format!("{}.", "9".repeat(15)));
        assert!(form.validate().is_err_and(|e| !e.to_field_map().contains_key("particulars[1].amount")));
    }

    #[test]
    fn test_set_particular_out_of_range() {
        let err = event()
            .apply(&FormEdit::SetParticular {
                index: 3,
                description: None,
                amount: None,
            })
            .unwrap_err();
        assert!(matches!(err, EditError::OutOfRange { index: 3, len: 3, .. }));
    }

    #[test]
    fn test_parse_table_empty_is_noop() {
        let form = event()
            .apply(&FormEdit::SetTableCell { row: 0, col: 0, value: "keep".into() })
            .unwrap()
            .apply(&FormEdit::SetTableContent { content: "  \n ".into() })
            .unwrap()
            .apply(&FormEdit::ParseTable)
            .unwrap();
        assert_eq!(event_form(&form).table.cell(0, 0), Some("keep"));
    }

    #[test]
    fn test_parse_table_replaces_grid() {
        let form = event()
            .apply(&FormEdit::SetTableContent { content: "A\tB\nC\tD".into() })
            .unwrap()
            .apply(&FormEdit::ParseTable)
            .unwrap();
        assert_eq!(
            event_form(&form).table,
            TableGrid::from(vec![
                vec!["A".to_string(), "B".to_string()],
                vec!["C".to_string(), "D".to_string()],
            ])
        );
    }

    #[test]
    fn test_table_never_below_one_by_one() {
        let mut form = event();
        for _ in 0..5 {
            form = form.apply(&FormEdit::RemoveTableRow { index: 0 }).unwrap();
            form = form.apply(&FormEdit::RemoveTableCol { index: 0 }).unwrap();
        }
        let table = &event_form(&form).table;
        assert_eq!((table.row_count(), table.col_count()), (1, 1));

        let grown = form
            .apply(&FormEdit::AddTableCol)
            .unwrap()
            .apply(&FormEdit::AddTableRow)
            .unwrap();
        let table = &event_form(&grown).table;
        assert!(table.rows().iter().all(|r| r.len() == 2));
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let edited = event()
            .apply(&FormEdit::SetAttachTable { attach: true })
            .unwrap()
            .apply(&FormEdit::SetParticularCount { count: 7 })
            .unwrap()
            .apply(&FormEdit::AddTableCol)
            .unwrap();
        assert_eq!(edited.reset(), LetterForm::EventApproval(EventApprovalForm::default()));
    }

    #[test]
    fn test_edit_deserialization() {
        let edit: FormEdit =
            serde_json::from_str(r#"{"op": "set_field", "field": "body", "value": "Hi"}"#).unwrap();
        assert_eq!(
            edit,
            FormEdit::SetField {
                field: LetterField::Body,
                value: "Hi".into()
            }
        );
        let edit: FormEdit = serde_json::from_str(r#"{"op": "parse_table"}"#).unwrap();
        assert_eq!(edit, FormEdit::ParseTable);
    }
}
