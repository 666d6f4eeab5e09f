//! Faculty request letter layout (points).

use chrono::NaiveDate;
use serde::Serialize;

use super::constants::{FacultyRequestConstants, LETTERHEAD};
use super::wrap::{clip_chars, split_entries, split_text_to_size, truncate_lines, Ellipsis};
use super::{
    Align, AssetKind, Font, LineBlock, PageDescription, PageSize, RenderError, Rgb, TextMeasure,
    TextRun, Unit,
};
use crate::models::FacultyRequestForm;

const UNIT: Unit = Unit::Pt;
const PARTY_FONT_SIZE: f32 = 8.0;
const LABEL_FONT_SIZE: f32 = 9.0;
const FOOTER_GRAY: Rgb = Rgb(60, 60, 60);

/// A labelled From/To box and the lines that fit in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyBox {
    pub label: &'static str,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub content: LineBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacultyRequestPlan {
    pub date_text: String,
    pub department_cell: String,
    pub from: PartyBox,
    pub to: PartyBox,
    pub subject: String,
    pub body: LineBlock,
    #[serde(skip)]
    constants: FacultyRequestConstants,
}

/// Computes the faculty request geometry.
pub fn plan(
    form: &FacultyRequestForm,
    c: &FacultyRequestConstants,
    date: NaiveDate,
) -> Result<FacultyRequestPlan, RenderError> {
    let body_bottom = c.body_y + c.body_h;
    if body_bottom > c.date_box_y {
        return Err(RenderError::Overlap {
            section: "body box",
            other: "date box",
            bottom: body_bottom,
            limit: c.date_box_y,
        });
    }

    let x = c.content_x();
    let width = c.content_width();
    let half = width / 2.0;

    let from = party_box("From", &form.from, x, half, c);
    let to = party_box("To", &form.to, x + half, half, c);

    let subject_measure = TextMeasure::new(Font::TimesRoman, PARTY_FONT_SIZE, UNIT);
    let subject_lines = split_text_to_size(&form.subject, &subject_measure, width - c.subject_wrap_inset);
    let first = subject_lines.first().cloned().unwrap_or_default();
    let subject = if subject_lines.len() > 1 || first.chars().count() > c.subject_clip_chars {
        let head: String = first.chars().take(c.subject_clip_chars).collect();
        format!("{head}...")
    } else {
        first
    };

    let body_measure = TextMeasure::new(Font::TimesRoman, c.body_font_size, UNIT);
    let wrapped = split_text_to_size(&form.body, &body_measure, width - c.body_x_inset * 2.0);
    let first_baseline = c.body_y + c.body_first_baseline_offset;
    let capacity = lines_fitting(first_baseline, c.body_line_h, body_bottom - c.body_bottom_pad);
    let (lines, truncated) =
        truncate_lines(wrapped, capacity.min(c.body_max_lines), Ellipsis::ReplaceTail);

    Ok(FacultyRequestPlan {
        date_text: date.format("%d.%m.%Y").to_string(),
        department_cell: clip_chars(&form.department, c.department_clip_chars),
        from,
        to,
        subject,
        body: LineBlock {
            x: x + c.body_x_inset,
            first_baseline,
            line_height: c.body_line_h,
            lines,
            truncated,
        },
        constants: *c,
    })
}

/// Number of baselines `first, first + pitch, ...` that stay at or above `limit`.
fn lines_fitting(first: f32, pitch: f32, limit: f32) -> usize {
    if first > limit {
        0
    } else {
        ((limit - first) / pitch).floor() as usize + 1
    }
}

fn party_box(label: &'static str, text: &str, x: f32, w: f32, c: &FacultyRequestConstants) -> PartyBox {
    let measure = TextMeasure::new(Font::TimesRoman, PARTY_FONT_SIZE, UNIT);
    let first_baseline = c.parties_y + c.party_first_baseline_offset;
    let limit = c.parties_y + c.parties_h - c.party_bottom_pad;

    let mut lines = Vec::new();
    let mut baseline = first_baseline;
    let candidates = split_entries(text)
        .into_iter()
        .flat_map(|entry| split_text_to_size(&entry, &measure, w - c.party_wrap_inset));
    for line in candidates {
        if lines.len() >= c.party_max_lines || baseline + c.party_line_h > limit {
            break;
        }
        lines.push(line);
        baseline += c.party_line_h;
    }

    PartyBox {
        label,
        x,
        y: c.parties_y,
        w,
        h: c.parties_h,
        content: LineBlock {
            x: x + 4.0,
            first_baseline,
            line_height: c.party_line_h,
            lines,
            truncated: false,
        },
    }
}

impl FacultyRequestPlan {
    pub fn into_page(self) -> PageDescription {
        let c = self.constants;
        let mut page = PageDescription::new(PageSize {
            width: c.page_width,
            height: c.page_height,
            unit: UNIT,
        });
        let x = c.content_x();
        let width = c.content_width();
        let right = c.page_width - c.margin;

        page.rect(c.margin, c.margin, c.page_width - c.margin * 2.0, c.page_height - c.margin * 2.0, c.border_width);

        page.image(AssetKind::InstitutionLogo, c.margin + c.logo_inset, c.logo_y, c.logo_w, c.logo_h);
        page.image(AssetKind::PartnerLogo, right - c.logo_w - c.logo_inset, c.logo_y, c.logo_w, c.logo_h);

        let centre = c.page_width / 2.0;
        page.text(TextRun::new(LETTERHEAD.institution, centre, c.institution_baseline, Font::TimesBold, 11.0).aligned(Align::Center));
        page.text(TextRun::new(LETTERHEAD.address, centre, c.address_baseline, Font::TimesRoman, 9.0).aligned(Align::Center));

        self.draw_header_table(&mut page);

        page.text(TextRun::new(c.title, centre, c.title_baseline, Font::TimesBold, 11.0).aligned(Align::Center));

        for party in [&self.from, &self.to] {
            page.rect(party.x, party.y, party.w, party.h, c.rule_width);
            page.text(TextRun::new(party.label, party.x + 4.0, party.y + c.party_label_offset, Font::TimesBold, LABEL_FONT_SIZE));
            party.content.draw(&mut page, Font::TimesRoman, PARTY_FONT_SIZE);
        }

        page.text(TextRun::new("Respected Sir/Madam", x + 4.0, c.salutation_baseline, Font::TimesRoman, LABEL_FONT_SIZE));
        page.text(TextRun::new("Subject :", x + 4.0, c.subject_baseline, Font::TimesBold, LABEL_FONT_SIZE));
        page.text(TextRun::new(self.subject.clone(), x + c.subject_text_x_offset, c.subject_baseline, Font::TimesRoman, PARTY_FONT_SIZE));

        page.rect(x, c.body_y, width, c.body_h, c.rule_width);
        self.body.draw(&mut page, Font::TimesRoman, c.body_font_size);

        self.draw_date_box(&mut page);

        page.text(
            TextRun::new(LETTERHEAD.powered_by, x + width - c.footer_right_pad, c.date_box_y + c.footer_baseline_offset, Font::TimesItalic, PARTY_FONT_SIZE)
                .aligned(Align::Right)
                .colored(FOOTER_GRAY),
        );

        page
    }

    fn draw_header_table(&self, page: &mut PageDescription) {
        let c = &self.constants;
        let x = c.content_x();
        let width = c.content_width();
        let [col1_w, col2_w] = c.header_cols;
        let col3_w = width - col1_w - col2_w;
        let col2_x = x + col1_w;
        let col3_x = col2_x + col2_w;
        let bottom = c.header_y + 3.0 * c.header_row_h;

        for i in 0..=3 {
            let y = c.header_y + i as f32 * c.header_row_h;
            page.line(x, y, x + width, y, c.rule_width);
        }
        for vx in [x, col2_x, col3_x, x + width] {
            page.line(vx, c.header_y, vx, bottom, c.rule_width);
        }

        let rows: [[(&str, Font); 3]; 3] = [
            [
                (LETTERHEAD.forms_label, Font::TimesBold),
                (c.issue_label, Font::TimesRoman),
                (c.doc_ref_label, Font::TimesRoman),
            ],
            [
                (c.title, Font::TimesBold),
                (c.issue_value, Font::TimesRoman),
                (c.doc_ref_value, Font::TimesRoman),
            ],
            [
                (LETTERHEAD.academic_year, Font::TimesBold),
                ("Department", Font::TimesBold),
                (self.department_cell.as_str(), Font::TimesRoman),
            ],
        ];
        let centres = [x + col1_w / 2.0, col2_x + col2_w / 2.0, col3_x + col3_w / 2.0];

        for (r, row) in rows.iter().enumerate() {
            let y = c.header_y + r as f32 * c.header_row_h + c.header_text_offset;
            for ((text, font), cx) in row.iter().zip(centres) {
                page.text(TextRun::new(*text, cx, y, *font, c.header_font_size).aligned(Align::Center));
            }
        }
    }

    fn draw_date_box(&self, page: &mut PageDescription) {
        let c = &self.constants;
        let x = c.content_x();
        page.rect(x, c.date_box_y, c.date_box_w, c.date_box_h, c.rule_width);

        let label = "Date:";
        let label_w = TextMeasure::new(Font::TimesBold, LABEL_FONT_SIZE, UNIT).width(label);
        let value_w = TextMeasure::new(Font::TimesRoman, PARTY_FONT_SIZE, UNIT).width(&self.date_text);
        let start = x + (c.date_box_w - (label_w + c.date_gap + value_w)) / 2.0;
        let baseline = c.date_box_y + c.date_box_h / 2.0 + c.date_baseline_adjust;

        page.text(TextRun::new(label, start, baseline, Font::TimesBold, LABEL_FONT_SIZE));
        page.text(TextRun::new(self.date_text.clone(), start + label_w + c.date_gap, baseline, Font::TimesRoman, PARTY_FONT_SIZE));
    }
}
