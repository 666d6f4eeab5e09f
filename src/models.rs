use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::letters::common::sanitize_amount;
use crate::table::TableGrid;

/// The letter types the portal can produce.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum LetterKind {
    FacultyRequest,
    EventApproval,
}

impl LetterKind {
    pub const ALL: [LetterKind; 2] = [LetterKind::FacultyRequest, LetterKind::EventApproval];

    pub fn slug(self) -> &'static str {
        match self {
            LetterKind::FacultyRequest => "faculty-request",
            LetterKind::EventApproval => "event-approval",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            LetterKind::FacultyRequest => "Faculty Request Letter",
            LetterKind::EventApproval => "Event Approval Letter",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            LetterKind::FacultyRequest => {
                "Formal request from a faculty member, routed from sender to recipient"
            }
            LetterKind::EventApproval => {
                "Approval request for a department event with an itemised budget"
            }
        }
    }

    /// Maximum character count for `field`, or `None` when the letter has no
    /// such field.
    pub fn max_chars(self, field: LetterField) -> Option<usize> {
        use LetterField::*;
        match (self, field) {
            (LetterKind::FacultyRequest, Department) => Some(50),
            (LetterKind::FacultyRequest, From | To) => Some(200),
            (LetterKind::FacultyRequest, Through) => None,
            (LetterKind::FacultyRequest, Subject) => Some(120),
            (LetterKind::FacultyRequest, Body) => Some(3800),
            (LetterKind::EventApproval, Department) => Some(30),
            (LetterKind::EventApproval, From | Through | To) => Some(100),
            (LetterKind::EventApproval, Subject) => Some(150),
            (LetterKind::EventApproval, Body) => Some(800),
        }
    }

    /// Fields this letter carries, in form order.
    pub fn fields(self) -> &'static [LetterField] {
        match self {
            LetterKind::FacultyRequest => &[
                LetterField::Department,
                LetterField::From,
                LetterField::To,
                LetterField::Subject,
                LetterField::Body,
            ],
            LetterKind::EventApproval => &[
                LetterField::Department,
                LetterField::From,
                LetterField::Through,
                LetterField::To,
                LetterField::Subject,
                LetterField::Body,
            ],
        }
    }
}

/// Free-text fields shared by the letter forms.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LetterField {
    Department,
    From,
    Through,
    To,
    Subject,
    Body,
}

impl LetterField {
    pub fn key(self) -> &'static str {
        match self {
            LetterField::Department => "department",
            LetterField::From => "from",
            LetterField::Through => "through",
            LetterField::To => "to",
            LetterField::Subject => "subject",
            LetterField::Body => "body",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LetterField::Department => "Department",
            LetterField::From => "From",
            LetterField::Through => "Through",
            LetterField::To => "To",
            LetterField::Subject => "Subject",
            LetterField::Body => "Body",
        }
    }
}

/// One budget line item.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq, ToSchema)]
#[serde(default)]
pub struct ParticularEntry {
    #[serde(alias = "particular")]
    #[schema(example = "Venue")]
    pub description: String,
    /// Digits and at most one decimal point. Anything else is stripped on
    /// the way in.
    #[serde(deserialize_with = "deserialize_amount")]
    #[schema(example = "1500")]
    pub amount: String,
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|raw| sanitize_amount(&raw))
}

impl ParticularEntry {
    pub const MAX_DESCRIPTION_CHARS: usize = 50;
    pub const MIN_COUNT: usize = 1;
    pub const MAX_COUNT: usize = 7;
    pub const DEFAULT_COUNT: usize = 3;
    pub const MAX_AMOUNT_DIGITS: usize = 15;

    /// The amount is passed through the amount sanitizer.
    pub fn new(description: impl Into<String>, amount: impl AsRef<str>) -> Self {
        Self {
            description: description.into(),
            amount: sanitize_amount(amount.as_ref()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq, ToSchema)]
#[serde(default)]
pub struct FacultyRequestForm {
    #[schema(example = "Computer Science")]
    pub department: String,
    #[schema(example = "Dr. A. Kumar, Assistant Professor")]
    pub from: String,
    #[schema(example = "The Principal")]
    pub to: String,
    #[schema(example = "Request for on-duty leave")]
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
#[serde(default)]
pub struct EventApprovalForm {
    #[schema(example = "CSE")]
    pub department: String,
    #[schema(example = "Event Coordinator; Student Council")]
    pub from: String,
    #[schema(example = "HOD - CSE")]
    pub through: String,
    #[schema(example = "The Principal")]
    pub to: String,
    #[schema(example = "Approval for the annual symposium")]
    pub subject: String,
    pub body: String,
    pub particulars: Vec<ParticularEntry>,
    pub attach_table: bool,
    /// Raw pasted text waiting to be parsed into `table`.
    pub table_content: String,
    pub table: TableGrid,
}

impl Default for EventApprovalForm {
    fn default() -> Self {
        Self {
            department: String::new(),
            from: String::new(),
            through: String::new(),
            to: String::new(),
            subject: String::new(),
            body: String::new(),
            particulars: vec![ParticularEntry::default(); ParticularEntry::DEFAULT_COUNT],
            attach_table: false,
            table_content: String::new(),
            table: TableGrid::default(),
        }
    }
}

/// A form snapshot of either letter type.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LetterForm {
    FacultyRequest(FacultyRequestForm),
    EventApproval(EventApprovalForm),
}

impl LetterForm {
    pub fn blank(kind: LetterKind) -> Self {
        match kind {
            LetterKind::FacultyRequest => LetterForm::FacultyRequest(FacultyRequestForm::default()),
            LetterKind::EventApproval => LetterForm::EventApproval(EventApprovalForm::default()),
        }
    }

    pub fn kind(&self) -> LetterKind {
        match self {
            LetterForm::FacultyRequest(_) => LetterKind::FacultyRequest,
            LetterForm::EventApproval(_) => LetterKind::EventApproval,
        }
    }

    /// Value of a text field, or `None` when this letter has no such field.
    pub fn field(&self, field: LetterField) -> Option<&str> {
        match (self, field) {
            (LetterForm::FacultyRequest(f), LetterField::Department) => Some(&f.department),
            (LetterForm::FacultyRequest(f), LetterField::From) => Some(&f.from),
            (LetterForm::FacultyRequest(_), LetterField::Through) => None,
            (LetterForm::FacultyRequest(f), LetterField::To) => Some(&f.to),
            (LetterForm::FacultyRequest(f), LetterField::Subject) => Some(&f.subject),
            (LetterForm::FacultyRequest(f), LetterField::Body) => Some(&f.body),
            (LetterForm::EventApproval(f), LetterField::Department) => Some(&f.department),
            (LetterForm::EventApproval(f), LetterField::From) => Some(&f.from),
            (LetterForm::EventApproval(f), LetterField::Through) => Some(&f.through),
            (LetterForm::EventApproval(f), LetterField::To) => Some(&f.to),
            (LetterForm::EventApproval(f), LetterField::Subject) => Some(&f.subject),
            (LetterForm::EventApproval(f), LetterField::Body) => Some(&f.body),
        }
    }

    pub(crate) fn field_mut(&mut self, field: LetterField) -> Option<&mut String> {
        match (self, field) {
            (LetterForm::FacultyRequest(f), LetterField::Department) => Some(&mut f.department),
            (LetterForm::FacultyRequest(f), LetterField::From) => Some(&mut f.from),
            (LetterForm::FacultyRequest(_), LetterField::Through) => None,
            (LetterForm::FacultyRequest(f), LetterField::To) => Some(&mut f.to),
            (LetterForm::FacultyRequest(f), LetterField::Subject) => Some(&mut f.subject),
            (LetterForm::FacultyRequest(f), LetterField::Body) => Some(&mut f.body),
            (LetterForm::EventApproval(f), LetterField::Department) => Some(&mut f.department),
            (LetterForm::EventApproval(f), LetterField::From) => Some(&mut f.from),
            (LetterForm::EventApproval(f), LetterField::Through) => Some(&mut f.through),
            (LetterForm::EventApproval(f), LetterField::To) => Some(&mut f.to),
            (LetterForm::EventApproval(f), LetterField::Subject) => Some(&mut f.subject),
            (LetterForm::EventApproval(f), LetterField::Body) => Some(&mut f.body),
        }
    }
}
