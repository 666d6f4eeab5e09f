//! Event approval letter layout (millimetres).

use chrono::NaiveDate;
use serde::Serialize;

use super::budget::{total_of, Amount};
use super::constants::{EventApprovalConstants, LETTERHEAD};
use super::wrap::{fit_single_line, split_entries, split_text_to_size, truncate_lines, Ellipsis};
use super::{
    Align, AssetKind, Font, LineBlock, PageDescription, PageSize, RenderError, TextMeasure,
    TextRun, Unit,
};
use crate::models::{EventApprovalForm, ParticularEntry};
use crate::table::TableGrid;

const UNIT: Unit = Unit::Mm;
/// Baseline-to-baseline distance of wrapped cell text (1.15 × font size).
const CELL_LINE_FACTOR: f32 = 1.15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl BoxRect {
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// One column of the From / Through / To table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartyColumn {
    pub label: &'static str,
    pub centre_x: f32,
    pub content: LineBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCell {
    pub rect: BoxRect,
    pub content: LineBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub index: usize,
    pub cells: Vec<TableCell>,
}

/// The attached table as it fits below the body text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachedTable {
    pub row_height: f32,
    pub cell_width: f32,
    pub rows: Vec<TableRow>,
    pub skipped_rows: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetRow {
    pub serial: String,
    pub description: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetTable {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub row_height: f32,
    pub rows: Vec<BudgetRow>,
    pub total: String,
}

impl BudgetTable {
    /// Header + particulars + total.
    pub fn row_count(&self) -> usize {
        self.rows.len() + 2
    }

    pub fn height(&self) -> f32 {
        self.row_height * self.row_count() as f32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventApprovalPlan {
    pub date_text: String,
    pub department: String,
    pub parties: Vec<PartyColumn>,
    pub subject: String,
    pub subject_box: BoxRect,
    pub body: LineBlock,
    pub table: Option<AttachedTable>,
    pub budget: BudgetTable,
    #[serde(skip)]
    constants: EventApprovalConstants,
}

fn header_y(c: &EventApprovalConstants) -> f32 {
    c.margin + c.header_y_offset
}

fn title_baseline(c: &EventApprovalConstants) -> f32 {
    header_y(c) + c.header_h + c.title_gap
}

fn parties_y(c: &EventApprovalConstants) -> f32 {
    title_baseline(c) + c.parties_gap
}

fn subject_baseline(c: &EventApprovalConstants) -> f32 {
    parties_y(c) + c.subject_gap + 4.0
}

/// Computes the event approval geometry.
pub fn plan(
    form: &EventApprovalForm,
    c: &EventApprovalConstants,
    date: NaiveDate,
) -> Result<EventApprovalPlan, RenderError> {
    let count = form.particulars.len();
    if !(ParticularEntry::MIN_COUNT..=ParticularEntry::MAX_COUNT).contains(&count) {
        return Err(RenderError::ParticularCount(count));
    }

    let budget = budget_table(&form.particulars, c);

    let x = c.parties_x();
    let width = c.parties_w();
    let parties = party_columns(form, c);

    let subject_measure = TextMeasure::new(Font::TimesBold, c.body_font_size, UNIT);
    let subject = fit_single_line(&form.subject, &subject_measure, width - c.subject_text_x_offset);

    let box_y = parties_y(c) + c.subject_gap + c.subject_box_gap;
    let box_h = (budget.y - box_y - c.subject_box_budget_gap).max(c.subject_box_min_h);
    let subject_box = BoxRect { x, y: box_y, w: width, h: box_h };

    let title_top = budget.y - c.budget_title_gap - c.budget_title_cap;
    if subject_box.bottom() > title_top {
        return Err(RenderError::Overlap {
            section: "subject box",
            other: "budget table",
            bottom: subject_box.bottom(),
            limit: title_top,
        });
    }

    let body_measure = TextMeasure::new(Font::TimesRoman, c.body_font_size, UNIT);
    let wrapped = split_text_to_size(&form.body, &body_measure, width - c.body_inset * 2.0);
    let max_lines = ((box_h - c.body_vertical_pad) / c.body_line_h).floor().max(0.0) as usize;
    let (lines, truncated) = truncate_lines(wrapped, max_lines, Ellipsis::Append);
    let body = LineBlock {
        x: x + c.body_inset,
        first_baseline: box_y + c.body_first_baseline_offset,
        line_height: c.body_line_h,
        lines,
        truncated,
    };

    let cursor = body.first_baseline + body.lines.len() as f32 * c.body_line_h + c.body_table_gap;
    let table = if form.attach_table && !form.table.is_blank() {
        attached_table(&form.table, cursor, &subject_box, c)
    } else {
        None
    };

    Ok(EventApprovalPlan {
        date_text: date.format("%d/%m/%Y").to_string(),
        department: form.department.clone(),
        parties,
        subject,
        subject_box,
        body,
        table,
        budget,
        constants: *c,
    })
}

fn party_columns(form: &EventApprovalForm, c: &EventApprovalConstants) -> Vec<PartyColumn> {
    let x = c.parties_x();
    let col_w = c.parties_w() / 3.0;
    let top = parties_y(c);
    let first_baseline = top + c.party_first_baseline_offset;
    let limit = top + c.parties_h - c.party_bottom_pad;

    [("From", &form.from), ("Through", &form.through), ("To", &form.to)]
        .into_iter()
        .enumerate()
        .map(|(i, (label, text))| {
            let col_x = x + col_w * i as f32;
            let lines: Vec<String> = split_entries(text)
                .into_iter()
                .enumerate()
                .take_while(|(n, _)| first_baseline + *n as f32 * c.party_line_h < limit)
                .map(|(_, entry)| entry)
                .collect();
            PartyColumn {
                label,
                centre_x: col_x + col_w / 2.0,
                content: LineBlock {
                    x: col_x + c.party_text_inset,
                    first_baseline,
                    line_height: c.party_line_h,
                    lines,
                    truncated: false,
                },
            }
        })
        .collect()
}

fn budget_table(particulars: &[ParticularEntry], c: &EventApprovalConstants) -> BudgetTable {
    let row_height = c.budget_row_height(particulars.len());
    let height = row_height * (particulars.len() + 2) as f32;
    let rows = particulars
        .iter()
        .enumerate()
        .map(|(i, p)| BudgetRow {
            serial: format!("{}.", i + 1),
            description: if p.description.trim().is_empty() {
                "nil".to_string()
            } else {
                p.description.clone()
            },
            amount: if p.amount.is_empty() {
                "0".to_string()
            } else {
                p.amount.clone()
            },
        })
        .collect();
    let total: Amount = total_of(particulars.iter().map(|p| p.amount.as_str()));

    BudgetTable {
        x: (c.page_width - c.budget_w) / 2.0,
        y: c.page_height - c.margin - height - c.budget_bottom_gap,
        w: c.budget_w,
        row_height,
        rows,
        total: total.to_fixed_2(),
    }
}

fn attached_table(
    grid: &TableGrid,
    cursor: f32,
    subject_box: &BoxRect,
    c: &EventApprovalConstants,
) -> Option<AttachedTable> {
    let remaining = subject_box.bottom() - cursor - c.table_bottom_pad;
    if remaining <= c.table_min_space {
        return None;
    }

    let row_count = grid.row_count();
    let col_count = grid.col_count().max(1);
    let cell_width = (subject_box.w - c.body_inset * 2.0) / col_count as f32;
    let mut row_height = c.table_row_h;
    if row_count as f32 * row_height > remaining {
        row_height = (remaining / row_count as f32).floor().max(c.table_min_row_h);
    }

    let measure = TextMeasure::new(Font::TimesRoman, c.table_font_size, UNIT);
    let text_pitch = c.table_font_size * CELL_LINE_FACTOR / UNIT.points_per_unit();

    let mut rows = Vec::new();
    let mut skipped_rows = Vec::new();
    for (r, cells) in grid.rows().iter().enumerate() {
        let anchor = cursor + r as f32 * row_height;
        if anchor + row_height > subject_box.bottom() {
            skipped_rows.push(r);
            continue;
        }
        let cells = (0..col_count)
            .map(|col| {
                let x = subject_box.x + c.body_inset + col as f32 * cell_width;
                let rect = BoxRect {
                    x,
                    y: anchor - c.table_rect_lift,
                    w: cell_width,
                    h: row_height,
                };
                let text = cells.get(col).map(String::as_str).unwrap_or("");
                let first_baseline = anchor - c.table_text_lift;
                let lines = split_text_to_size(text, &measure, cell_width - c.table_cell_pad * 2.0)
                    .into_iter()
                    .enumerate()
                    .take_while(|(n, _)| first_baseline + *n as f32 * text_pitch <= rect.bottom())
                    .map(|(_, line)| line)
                    .collect();
                TableCell {
                    rect,
                    content: LineBlock {
                        x: x + c.table_cell_pad,
                        first_baseline,
                        line_height: text_pitch,
                        lines,
                        truncated: false,
                    },
                }
            })
            .collect();
        rows.push(TableRow { index: r, cells });
    }

    Some(AttachedTable {
        row_height,
        cell_width,
        rows,
        skipped_rows,
    })
}

impl EventApprovalPlan {
    pub fn into_page(self) -> PageDescription {
        let c = self.constants;
        let mut page = PageDescription::new(PageSize {
            width: c.page_width,
            height: c.page_height,
            unit: UNIT,
        });

        page.rect(c.margin, c.margin, c.page_width - c.margin * 2.0, c.page_height - c.margin * 2.0, c.border_width);

        self.draw_header(&mut page);

        let right_anchor = c.page_width - c.margin - c.footer_right_pad;
        let title_y = title_baseline(&c);
        page.text(TextRun::new(c.title, c.page_width / 2.0, title_y, Font::HelveticaBold, 13.0).aligned(Align::Center));
        page.text(
            TextRun::new(format!("Date: {}", self.date_text), right_anchor, title_y, Font::Helvetica, 10.0)
                .aligned(Align::Right),
        );

        self.draw_parties(&mut page);

        let sb = self.subject_box;
        let subject_y = subject_baseline(&c);
        page.text(TextRun::new("Sub :", sb.x, subject_y, Font::TimesRoman, c.body_font_size));
        page.text(TextRun::new(self.subject.clone(), sb.x + c.subject_text_x_offset, subject_y, Font::TimesBold, c.body_font_size));

        page.rect(sb.x, sb.y, sb.w, sb.h, c.header_rule_width);
        self.body.draw(&mut page, Font::TimesRoman, c.body_font_size);

        if let Some(table) = &self.table {
            for cell in table.rows.iter().flat_map(|row| &row.cells) {
                page.rect(cell.rect.x, cell.rect.y, cell.rect.w, cell.rect.h, c.table_rule_width);
                cell.content.draw(&mut page, Font::TimesRoman, c.table_font_size);
            }
        }

        self.draw_budget(&mut page);

        page.text(
            TextRun::new(LETTERHEAD.powered_by, right_anchor, c.page_height - c.margin - c.footer_bottom_pad, Font::TimesItalic, 9.0)
                .aligned(Align::Right),
        );

        page
    }

    fn draw_header(&self, page: &mut PageDescription) {
        let c = &self.constants;
        let top = header_y(c);
        let lw = c.header_rule_width;

        page.rect(c.margin, top, c.logo_col_w, c.header_h, lw);
        page.image(AssetKind::InstitutionLogo, c.margin + c.logo_x_offset, top + c.logo_y_offset, c.logo_w, c.logo_h);

        let middle_x = c.margin + c.logo_col_w;
        let middle_w = c.page_width - c.margin * 2.0 - c.logo_col_w - c.right_col_w;
        let middle_h = c.header_h / 4.0;
        let institution = format!("{},", LETTERHEAD.institution);
        let middle_rows = [
            (institution.as_str(), Font::HelveticaBold, 11.0),
            (LETTERHEAD.address, Font::Helvetica, 9.0),
            (LETTERHEAD.forms_label, Font::HelveticaBold, 10.0),
            (LETTERHEAD.academic_year, Font::HelveticaBold, 10.0),
        ];
        for (i, (text, font, size)) in middle_rows.into_iter().enumerate() {
            let row_y = top + middle_h * i as f32;
            page.rect(middle_x, row_y, middle_w, middle_h, lw);
            page.text(
                TextRun::new(text, middle_x + middle_w / 2.0, row_y + middle_h / 2.0 + 1.5, font, size)
                    .aligned(Align::Center),
            );
        }

        let right_x = middle_x + middle_w;
        let right_h = c.header_h / 3.0;
        let right_rows = [
            ("Doc. Ref.", c.doc_ref_value),
            ("Issue No / Date", c.issue_value),
            ("Department", self.department.as_str()),
        ];
        let cx = right_x + c.right_col_w / 2.0;
        for (i, (label, value)) in right_rows.into_iter().enumerate() {
            let row_y = top + right_h * i as f32;
            page.rect(right_x, row_y, c.right_col_w, right_h, lw);
            page.text(TextRun::new(label, cx, row_y + right_h / 3.0 + 1.0, Font::Helvetica, 9.0).aligned(Align::Center));
            page.text(TextRun::new(value, cx, row_y + right_h / 3.0 + 7.0, Font::HelveticaBold, 9.0).aligned(Align::Center));
        }
    }

    fn draw_parties(&self, page: &mut PageDescription) {
        let c = &self.constants;
        let x = c.parties_x();
        let w = c.parties_w();
        let top = parties_y(c);
        let col_w = w / 3.0;

        page.rect(x, top, w, c.parties_h, c.header_rule_width);
        for i in 1..3 {
            let vx = x + col_w * i as f32;
            page.line(vx, top, vx, top + c.parties_h, c.header_rule_width);
        }
        for column in &self.parties {
            page.text(
                TextRun::new(column.label, column.centre_x, top + c.party_label_offset, Font::TimesBold, c.body_font_size)
                    .aligned(Align::Center),
            );
        }
        for column in &self.parties {
            column.content.draw(page, Font::TimesRoman, c.body_font_size);
        }
    }

    fn draw_budget(&self, page: &mut PageDescription) {
        let c = &self.constants;
        let b = &self.budget;
        let rows = b.row_count();
        let [col1, col2] = c.budget_cols;
        let col3 = b.w - col1 - col2;

        for r in 0..rows {
            page.rect(b.x, b.y + r as f32 * b.row_height, b.w, b.row_height, c.budget_rule_width);
        }

        page.text(
            TextRun::new(c.budget_title, b.x + b.w / 2.0, b.y - c.budget_title_gap, Font::TimesBold, 12.0)
                .aligned(Align::Center),
        );

        let bottom = b.y + b.height();
        page.line(b.x + col1, b.y, b.x + col1, bottom, c.budget_rule_width);
        page.line(b.x + col1 + col2, b.y, b.x + col1 + col2, bottom, c.budget_rule_width);

        let serial_x = b.x + col1 / 2.0;
        let text_x = b.x + col1 + c.budget_text_inset;
        let amount_x = b.x + col1 + col2 + col3 / 2.0;
        let size = 9.0;
        let row_baseline = |r: usize| b.y + b.row_height * r as f32 + c.budget_text_offset;

        page.text(TextRun::new("S.No", serial_x, row_baseline(0), Font::TimesBold, size).aligned(Align::Center));
        page.text(TextRun::new("Particulars", b.x + col1 + col2 / 2.0, row_baseline(0), Font::TimesBold, size).aligned(Align::Center));
        page.text(TextRun::new("Amount", amount_x, row_baseline(0), Font::TimesBold, size).aligned(Align::Center));

        for (i, row) in b.rows.iter().enumerate() {
            let y = row_baseline(i + 1);
            page.text(TextRun::new(row.serial.clone(), serial_x, y, Font::TimesRoman, size).aligned(Align::Center));
            page.text(TextRun::new(row.description.clone(), text_x, y, Font::TimesRoman, size));
            page.text(TextRun::new(row.amount.clone(), amount_x, y, Font::TimesRoman, size).aligned(Align::Center));
        }

        let total_y = row_baseline(b.rows.len() + 1);
        page.text(TextRun::new("Total", text_x, total_y, Font::TimesBold, size));
        page.text(TextRun::new(b.total.clone(), amount_x, total_y, Font::TimesBold, size).aligned(Align::Center));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::constants::EVENT_APPROVAL;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn form() -> EventApprovalForm {
        EventApprovalForm {
            department: "CSE".into(),
            from: "Dr. X; Dr. Y, Dr. Z".into(),
            through: "HOD".into(),
            to: "Principal".into(),
            subject: "Symposium".into(),
            body: "We request approval for the symposium.".into(),
            particulars: vec![
                ParticularEntry::new("Venue", "1500"),
                ParticularEntry::new("Food", "2,500.50"),
            ],
            ..EventApprovalForm::default()
        }
    }

    #[test]
    fn test_budget_total_and_rows() {
        let plan = plan(&form(), &EVENT_APPROVAL, date()).unwrap();
        assert_eq!(plan.budget.total, "4000.50");
        assert_eq!(plan.budget.row_height, 8.0);
        assert_eq!(plan.budget.rows[1].amount, "2500.50");
        assert_eq!(plan.budget.rows[0].serial, "1.");
    }

    #[test]
    fn test_budget_anchored_to_bottom_margin() {
        let plan = plan(&form(), &EVENT_APPROVAL, date()).unwrap();
        let bottom = plan.budget.y + plan.budget.height();
        assert!((bottom - (297.0 - 6.0 - 12.0)).abs() < 1e-4);
    }

    #[test]
    fn test_budget_rows_shrink_past_threshold() {
        let mut f = form();
        f.particulars = vec![ParticularEntry::new("x", "1"); 6];
        let plan = plan(&f, &EVENT_APPROVAL, date()).unwrap();
        assert_eq!(plan.budget.row_height, 6.5);
        assert_eq!(plan.budget.total, "6.00");
    }

    #[test]
    fn test_blank_particulars_render_placeholders() {
        let mut f = form();
        f.particulars.push(ParticularEntry::default());
        let plan = plan(&f, &EVENT_APPROVAL, date()).unwrap();
        assert_eq!(plan.budget.rows[2].description, "nil");
        assert_eq!(plan.budget.rows[2].amount, "0");
    }

    #[test]
    fn test_particular_count_out_of_range() {
        let mut f = form();
        f.particulars = vec![ParticularEntry::default(); 8];
        assert_eq!(
            plan(&f, &EVENT_APPROVAL, date()).unwrap_err(),
            RenderError::ParticularCount(8)
        );
        f.particulars.clear();
        assert!(plan(&f, &EVENT_APPROVAL, date()).is_err());
    }

    #[test]
    fn test_party_entries() {
        let plan = plan(&form(), &EVENT_APPROVAL, date()).unwrap();
        assert_eq!(plan.parties[0].content.lines, vec!["Dr. X", "Dr. Y", "Dr. Z"]);
        assert_eq!(plan.parties[1].content.lines, vec!["HOD"]);
    }

    #[test]
    fn test_party_overflow_dropped() {
        let mut f = form();
        f.to = "a,b,c,d,e".into();
        let plan = plan(&f, &EVENT_APPROVAL, date()).unwrap();
        assert_eq!(plan.parties[2].content.lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_subject_box_fills_to_budget() {
        let plan = plan(&form(), &EVENT_APPROVAL, date()).unwrap();
        assert!((plan.subject_box.y - 107.0).abs() < 1e-4);
        assert!((plan.subject_box.bottom() - (plan.budget.y - 20.0)).abs() < 1e-4);
    }

    #[test]
    fn test_body_truncation_appends_ellipsis() {
        let mut f = form();
        f.body = "lorem ipsum dolor sit amet ".repeat(200);
        let plan = plan(&f, &EVENT_APPROVAL, date()).unwrap();
        let max = ((plan.subject_box.h - 12.0) / 4.5).floor() as usize;
        assert!(plan.body.truncated);
        assert_eq!(plan.body.lines.len(), max);
        assert!(plan.body.lines.last().unwrap().ends_with(" ..."));
        assert!(plan.body.last_baseline().unwrap() < plan.subject_box.bottom());
    }

    #[test]
    fn test_table_only_when_attached() {
        let mut f = form();
        f.table = TableGrid::from(vec![vec!["A".to_string(), "B".to_string()]]);
        assert!(plan(&f, &EVENT_APPROVAL, date()).unwrap().table.is_none());

        f.attach_table = true;
        let table = plan(&f, &EVENT_APPROVAL, date()).unwrap().table.unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.row_height, 7.0);
        assert!((table.cell_width - 86.0).abs() < 1e-4);
        assert_eq!(table.rows[0].cells[1].content.lines, vec!["B"]);
    }

    #[test]
    fn test_blank_table_is_not_drawn() {
        let mut f = form();
        f.attach_table = true;
        assert!(plan(&f, &EVENT_APPROVAL, date()).unwrap().table.is_none());
    }

    #[test]
    fn test_table_rows_shrink_then_skip() {
        let mut f = form();
        f.attach_table = true;
        f.table = TableGrid::from(vec![vec!["r".to_string()]; 60]);
        let plan = plan(&f, &EVENT_APPROVAL, date()).unwrap();
        let table = plan.table.unwrap();
        assert_eq!(table.row_height, 4.0);
        assert!(!table.skipped_rows.is_empty());
        assert_eq!(table.rows.len() + table.skipped_rows.len(), 60);
        for row in &table.rows {
            let anchor = row.cells[0].rect.y + 4.0;
            assert!(anchor + table.row_height <= plan.subject_box.bottom());
        }
    }

    #[test]
    fn test_no_table_when_body_fills_box() {
        let mut f = form();
        f.attach_table = true;
        f.table = TableGrid::from(vec![vec!["r".to_string()]]);
        f.body = "lorem ipsum dolor sit amet ".repeat(200);
        assert!(plan(&f, &EVENT_APPROVAL, date()).unwrap().table.is_none());
    }

    #[test]
    fn test_page_has_title_date_and_total() {
        let page = plan(&form(), &EVENT_APPROVAL, date()).unwrap().into_page();
        assert_eq!(page.size.unit, Unit::Mm);
        let texts: Vec<&str> = page.texts().map(|t| t.text.as_str()).collect();
        assert!(texts.contains(&"EVENT APPROVAL LETTER"));
        assert!(texts.contains(&"Date: 19/10/2026"));
        assert!(texts.contains(&"4000.50"));
        assert!(texts.contains(&"KGISL INSTITUTE OF TECHNOLOGY,"));
        assert!(texts.contains(&"CSE"));
    }
}
