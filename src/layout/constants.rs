//! Fixed geometry and letterhead text for each letter type.
//!
//! Faculty request values are in points, event approval values in
//! millimetres. Everything on the page is derived from these numbers plus the
//! variable row/line counts coming from the form.

/// Institutional metadata printed on every letter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterhead {
    pub institution: &'static str,
    pub address: &'static str,
    pub forms_label: &'static str,
    pub academic_year: &'static str,
    pub powered_by: &'static str,
}

pub const LETTERHEAD: Letterhead = Letterhead {
    institution: "KGISL INSTITUTE OF TECHNOLOGY",
    address: "COIMBATORE -35, TN, INDIA",
    forms_label: "ACADEMIC - FORMS",
    academic_year: "ACADEMIC YEAR: 2024 - 2025",
    powered_by: "Powered by IPS Tech Community",
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacultyRequestConstants {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub border_width: f32,
    pub rule_width: f32,

    pub logo_y: f32,
    pub logo_w: f32,
    pub logo_h: f32,
    pub logo_inset: f32,
    pub institution_baseline: f32,
    pub address_baseline: f32,

    pub header_y: f32,
    pub header_cols: [f32; 2],
    pub header_row_h: f32,
    pub header_text_offset: f32,
    pub header_font_size: f32,
    pub department_clip_chars: usize,
    pub title: &'static str,
    pub issue_label: &'static str,
    pub issue_value: &'static str,
    pub doc_ref_label: &'static str,
    pub doc_ref_value: &'static str,

    pub title_baseline: f32,

    pub parties_y: f32,
    pub parties_h: f32,
    pub party_label_offset: f32,
    pub party_first_baseline_offset: f32,
    pub party_line_h: f32,
    pub party_bottom_pad: f32,
    pub party_max_lines: usize,
    pub party_wrap_inset: f32,

    pub salutation_baseline: f32,
    pub subject_baseline: f32,
    pub subject_text_x_offset: f32,
    pub subject_wrap_inset: f32,
    pub subject_clip_chars: usize,

    pub body_y: f32,
    pub body_h: f32,
    pub body_x_inset: f32,
    pub body_first_baseline_offset: f32,
    pub body_line_h: f32,
    pub body_bottom_pad: f32,
    pub body_max_lines: usize,
    pub body_font_size: f32,

    pub date_box_y: f32,
    pub date_box_w: f32,
    pub date_box_h: f32,
    pub date_gap: f32,
    pub date_baseline_adjust: f32,

    pub footer_right_pad: f32,
    pub footer_baseline_offset: f32,
}

impl FacultyRequestConstants {
    /// Left edge of the inner content (header table, boxes).
    pub fn content_x(&self) -> f32 {
        self.margin + 8.0
    }

    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin * 2.0 - 16.0
    }
}

pub const FACULTY_REQUEST: FacultyRequestConstants = FacultyRequestConstants {
    page_width: 595.0,
    page_height: 842.0,
    margin: 28.0,
    border_width: 1.0,
    rule_width: 0.5,

    logo_y: 40.0,
    logo_w: 72.0,
    logo_h: 36.0,
    logo_inset: 8.0,
    institution_baseline: 54.0,
    address_baseline: 66.0,

    header_y: 92.0,
    header_cols: [340.0, 100.0],
    header_row_h: 18.0,
    header_text_offset: 12.0,
    header_font_size: 8.0,
    department_clip_chars: 12,
    title: "FACULTY REQUEST LETTER",
    issue_label: "Issue No / Date",
    issue_value: "01 / 19.08.2024",
    doc_ref_label: "Doc. Ref.",
    doc_ref_value: "KITE/ AC/FRL/ 76",

    title_baseline: 168.0,

    parties_y: 188.0,
    parties_h: 70.0,
    party_label_offset: 12.0,
    party_first_baseline_offset: 24.0,
    party_line_h: 11.0,
    party_bottom_pad: 4.0,
    party_max_lines: 4,
    party_wrap_inset: 10.0,

    salutation_baseline: 275.0,
    subject_baseline: 290.0,
    subject_text_x_offset: 50.0,
    subject_wrap_inset: 60.0,
    subject_clip_chars: 80,

    body_y: 308.0,
    body_h: 445.0,
    body_x_inset: 6.0,
    body_first_baseline_offset: 14.0,
    body_line_h: 12.0,
    body_bottom_pad: 4.0,
    body_max_lines: 37,
    body_font_size: 9.0,

    date_box_y: 768.0,
    date_box_w: 120.0,
    date_box_h: 28.0,
    date_gap: 4.0,
    date_baseline_adjust: 3.5,

    footer_right_pad: 10.0,
    footer_baseline_offset: 20.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventApprovalConstants {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub border_width: f32,

    pub header_y_offset: f32,
    pub header_h: f32,
    pub header_rule_width: f32,
    pub logo_col_w: f32,
    pub right_col_w: f32,
    pub logo_x_offset: f32,
    pub logo_y_offset: f32,
    pub logo_w: f32,
    pub logo_h: f32,
    pub doc_ref_value: &'static str,
    pub issue_value: &'static str,

    pub title: &'static str,
    pub title_gap: f32,

    pub parties_gap: f32,
    pub parties_inset: f32,
    pub parties_h: f32,
    pub party_label_offset: f32,
    pub party_first_baseline_offset: f32,
    pub party_line_h: f32,
    pub party_bottom_pad: f32,
    pub party_text_inset: f32,

    pub subject_gap: f32,
    pub subject_text_x_offset: f32,
    pub subject_box_gap: f32,
    pub subject_box_min_h: f32,
    pub subject_box_budget_gap: f32,

    pub body_font_size: f32,
    pub body_inset: f32,
    pub body_first_baseline_offset: f32,
    pub body_line_h: f32,
    pub body_vertical_pad: f32,
    pub body_table_gap: f32,

    pub table_bottom_pad: f32,
    pub table_min_space: f32,
    pub table_row_h: f32,
    pub table_min_row_h: f32,
    pub table_font_size: f32,
    pub table_rule_width: f32,
    pub table_cell_pad: f32,
    pub table_rect_lift: f32,
    pub table_text_lift: f32,

    pub budget_w: f32,
    pub budget_cols: [f32; 2],
    pub budget_row_h: f32,
    pub budget_compact_row_h: f32,
    pub budget_compact_threshold: usize,
    pub budget_bottom_gap: f32,
    pub budget_title: &'static str,
    pub budget_title_gap: f32,
    pub budget_title_cap: f32,
    pub budget_text_offset: f32,
    pub budget_text_inset: f32,
    pub budget_rule_width: f32,

    pub footer_right_pad: f32,
    pub footer_bottom_pad: f32,
}

impl EventApprovalConstants {
    pub fn parties_x(&self) -> f32 {
        self.margin + self.parties_inset
    }

    pub fn parties_w(&self) -> f32 {
        self.page_width - self.margin * 2.0 - self.parties_inset * 2.0
    }

    /// Row height of the budget table for `count` particulars.
    pub fn budget_row_height(&self, count: usize) -> f32 {
        if count <= self.budget_compact_threshold {
            self.budget_row_h
        } else {
            self.budget_compact_row_h
        }
    }
}

pub const EVENT_APPROVAL: EventApprovalConstants = EventApprovalConstants {
    page_width: 210.0,
    page_height: 297.0,
    margin: 6.0,
    border_width: 0.6,

    header_y_offset: 4.0,
    header_h: 38.0,
    header_rule_width: 0.4,
    logo_col_w: 40.0,
    right_col_w: 60.0,
    logo_x_offset: 6.0,
    logo_y_offset: 8.0,
    logo_w: 28.0,
    logo_h: 22.0,
    doc_ref_value: "KITE/AC/AL/ 75",
    issue_value: "02 / 30.08.2024",

    title: "EVENT APPROVAL LETTER",
    title_gap: 10.0,

    parties_gap: 8.0,
    parties_inset: 10.0,
    parties_h: 28.0,
    party_label_offset: 5.0,
    party_first_baseline_offset: 12.0,
    party_line_h: 5.0,
    party_bottom_pad: 2.0,
    party_text_inset: 3.0,

    subject_gap: 33.0,
    subject_text_x_offset: 18.0,
    subject_box_gap: 8.0,
    subject_box_min_h: 80.0,
    subject_box_budget_gap: 20.0,

    body_font_size: 10.0,
    body_inset: 3.0,
    body_first_baseline_offset: 8.0,
    body_line_h: 4.5,
    body_vertical_pad: 12.0,
    body_table_gap: 4.0,

    table_bottom_pad: 6.0,
    table_min_space: 6.0,
    table_row_h: 7.0,
    table_min_row_h: 4.0,
    table_font_size: 9.0,
    table_rule_width: 0.2,
    table_cell_pad: 2.0,
    table_rect_lift: 4.0,
    table_text_lift: 1.0,

    budget_w: 120.0,
    budget_cols: [18.0, 72.0],
    budget_row_h: 8.0,
    budget_compact_row_h: 6.5,
    budget_compact_threshold: 5,
    budget_bottom_gap: 12.0,
    budget_title: "Event Budget",
    budget_title_gap: 6.0,
    budget_title_cap: 4.0,
    budget_text_offset: 6.0,
    budget_text_inset: 6.0,
    budget_rule_width: 0.3,

    footer_right_pad: 10.0,
    footer_bottom_pad: 2.0,
};
