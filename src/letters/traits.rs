//! Traits for generator system standardization.

use chrono::NaiveDate;

use super::common::today;
use super::validation::ValidationErrors;
use super::{GeneratedDocument, GeneratorError};

/// Trait for validating form snapshots.
pub trait Validator {
    /// Validate the state of the object.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Trait for document generators.
pub trait Generator<Req> {
    /// Generate a document dated `date`.
    fn generate_on(&self, request: &Req, date: NaiveDate)
        -> Result<GeneratedDocument, GeneratorError>;

    /// Generate a document stamped with today's local date.
    fn generate(&self, request: &Req) -> Result<GeneratedDocument, GeneratorError> {
        self.generate_on(request, today())
    }
}
