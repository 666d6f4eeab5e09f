#![allow(dead_code)]

use letter_portal::models::{EventApprovalForm, FacultyRequestForm, ParticularEntry};
use letter_portal::{AppState, PortalConfig};
use std::path::Path;

pub fn test_config(assets_dir: &Path) -> PortalConfig {
    PortalConfig {
        assets_dir: assets_dir.to_path_buf(),
        ..PortalConfig::default()
    }
}

pub fn test_state(assets_dir: &Path) -> AppState {
    AppState::new(&test_config(assets_dir))
}

pub fn faculty_form() -> FacultyRequestForm {
    FacultyRequestForm {
        department: "Computer Science".to_string(),
        from: "Dr. A. Kumar, Assistant Professor".to_string(),
        to: "The Principal".to_string(),
        subject: "Request for on-duty leave".to_string(),
        body: "I request on-duty leave to attend the workshop.".to_string(),
    }
}

pub fn event_form() -> EventApprovalForm {
    EventApprovalForm {
        department: "CSE".to_string(),
        from: "Event Coordinator; Student Council".to_string(),
        through: "HOD - CSE".to_string(),
        to: "The Principal".to_string(),
        subject: "Approval for the annual symposium".to_string(),
        body: "We request approval to conduct the annual symposium.".to_string(),
        particulars: vec![
            ParticularEntry::new("Venue", "1500"),
            ParticularEntry::new("Food", "2,500.50"),
        ],
        ..EventApprovalForm::default()
    }
}

/// Writes a small opaque PNG for `stem` into `dir`.
pub fn write_logo(dir: &Path, stem: &str) {
    image::RgbaImage::from_pixel(8, 6, image::Rgba([20, 40, 160, 255]))
        .save(dir.join(format!("{}.png", stem)))
        .unwrap();
}

pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
