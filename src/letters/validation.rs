//! Input validation for letter forms.
//!
//! Every failure is reported against the form key it belongs to, so a client
//! can show the message next to the offending input.

use std::collections::BTreeMap;
use std::fmt;

use crate::models::{EventApprovalForm, FacultyRequestForm, LetterForm, ParticularEntry};

use super::common::amount_digits;
use super::traits::Validator;

/// Validation error for a single form key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The form key that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
    /// Suggestion for how to fix the error
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} is required", label))
    }

    pub fn too_long(field: &str, label: &str, max: usize) -> Self {
        Self::new(field, format!("{} must be at most {} characters", label, max))
    }

    pub fn amount_too_long(index: usize) -> Self {
        Self::new(
            format!("particulars[{}].amount", index),
            format!(
                "Amount must be at most {} digits",
                ParticularEntry::MAX_AMOUNT_DIGITS
            ),
        )
    }

    pub fn no_particulars() -> Self {
        Self::new("particulars", "At least one particular must be filled")
            .with_suggestion("Describe at least one budget item")
    }

    pub fn particular_count(count: usize) -> Self {
        Self::new(
            "particulars",
            format!(
                "Between {} and {} particulars are allowed, got {}",
                ParticularEntry::MIN_COUNT,
                ParticularEntry::MAX_COUNT,
                count
            ),
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Field → message, keeping the first message reported for each field.
    pub fn to_field_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for error in &self.errors {
            map.entry(error.field.clone())
                .or_insert_with(|| error.message.clone());
        }
        map
    }

    /// Ok if no errors were collected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed: {} error(s)", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate that a string is not empty after trimming
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

/// Validate a maximum length, counted in characters
pub fn validate_max_chars(
    value: &str,
    field: &str,
    label: &str,
    max: usize,
    errors: &mut ValidationErrors,
) {
    if value.chars().count() > max {
        errors.add(ValidationError::too_long(field, label, max));
    }
}

/// Validate count, description length and that at least one item is described
pub fn validate_particulars(particulars: &[ParticularEntry], errors: &mut ValidationErrors) {
    let count = particulars.len();
    if !(ParticularEntry::MIN_COUNT..=ParticularEntry::MAX_COUNT).contains(&count) {
        errors.add(ValidationError::particular_count(count));
        return;
    }

    for (i, particular) in particulars.iter().enumerate() {
        validate_max_chars(
            &particular.description,
            &format!("particulars[{}].description", i),
            "Particular",
            ParticularEntry::MAX_DESCRIPTION_CHARS,
            errors,
        );
        if amount_digits(&particular.amount) > ParticularEntry::MAX_AMOUNT_DIGITS {
            errors.add(ValidationError::amount_too_long(i));
        }
    }

    if particulars.iter().all(|p| p.description.trim().is_empty()) {
        errors.add(ValidationError::no_particulars());
    }
}

fn validate_letter_fields(form: &LetterForm, errors: &mut ValidationErrors) {
    let kind = form.kind();
    for &field in kind.fields() {
        let value = form.field(field).unwrap_or_default();
        validate_required(value, field.key(), field.label(), errors);
        if let Some(max) = kind.max_chars(field) {
            validate_max_chars(value, field.key(), field.label(), max, errors);
        }
    }
}

impl Validator for LetterForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_letter_fields(self, &mut errors);
        if let LetterForm::EventApproval(form) = self {
            validate_particulars(&form.particulars, &mut errors);
        }
        errors.into_result()
    }
}

impl Validator for FacultyRequestForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        LetterForm::FacultyRequest(self.clone()).validate()
    }
}

impl Validator for EventApprovalForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        LetterForm::EventApproval(self.clone()).validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faculty() -> FacultyRequestForm {
        FacultyRequestForm {
            department: "CSE".into(),
            from: "Dr. X".into(),
            to: "Principal".into(),
            subject: "Leave".into(),
            body: "Please grant leave.".into(),
        }
    }

    #[test]
    fn test_valid_faculty_form() {
        assert!(faculty().validate().is_ok());
    }

    #[test]
    fn test_whitespace_only_is_missing() {
        let mut form = faculty();
        form.subject = "   ".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.to_field_map().get("subject").map(String::as_str),
            Some("Subject is required")
        );
    }

    #[test]
    fn test_over_limit_reported() {
        let mut form = faculty();
        form.department = "x".repeat(51);
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.to_field_map()["department"],
            "Department must be at most 50 characters"
        );
    }

    #[test]
    fn test_event_requires_a_particular() {
        let form = EventApprovalForm {
            department: "CSE".into(),
            from: "A".into(),
            through: "B".into(),
            to: "C".into(),
            subject: "S".into(),
            body: "B".into(),
            ..EventApprovalForm::default()
        };
        let errors = form.validate().unwrap_err();
        let map = errors.to_field_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map["particulars"], "At least one particular must be filled");
    }

    #[test]
    fn test_event_collects_every_missing_field() {
        let errors = EventApprovalForm::default().validate().unwrap_err();
        let map = errors.to_field_map();
        for key in ["department", "from", "through", "to", "subject", "body", "particulars"] {
            assert!(map.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn test_particular_count_bounds() {
        let mut errors = ValidationErrors::new();
        validate_particulars(&vec![ParticularEntry::new("a", "1"); 8], &mut errors);
        assert_eq!(errors.len(), 1);
        assert!(errors.to_field_map()["particulars"].contains("got 8"));
    }

    #[test]
    fn test_long_amount_reported_per_entry() {
        let mut errors = ValidationErrors::new();
        let particulars = vec![
            ParticularEntry::new("Venue", "1500"),
            ParticularEntry::new("Stage", "9".repeat(40)),
        ];
        validate_particulars(&particulars, &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.to_field_map()["particulars[1].amount"],
            "Amount must be at most 15 digits"
        );
    }

    #[test]
    fn test_display_lists_errors() {
        let errors = EventApprovalForm::default().validate().unwrap_err();
        let text = errors.to_string();
        assert!(text.starts_with("Validation failed: 7 error(s)"));
        assert!(text.contains("[through] Through is required"));
    }
}
