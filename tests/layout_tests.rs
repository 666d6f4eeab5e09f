mod common;

#[cfg(test)]
mod layout_tests {
    use chrono::NaiveDate;

    use letter_portal::layout::budget::total_of;
    use letter_portal::layout::constants::{EVENT_APPROVAL, FACULTY_REQUEST};
    use letter_portal::layout::{event_approval, faculty_request, DrawOp, PageDescription};
    use letter_portal::models::{LetterField, LetterKind, ParticularEntry};

    use crate::common::{event_form, faculty_form};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    /// Every text baseline and box must stay inside the outer border.
    fn assert_inside_border(page: &PageDescription, margin: f32) {
        let (w, h) = (page.size.width, page.size.height);
        for op in &page.ops {
            match op {
                DrawOp::Text(run) => {
                    assert!(run.y > margin && run.y < h - margin, "{:?} outside border", run.text);
                }
                DrawOp::Rect { x, y, w: rw, h: rh, .. } => {
                    assert!(*x >= margin - 1e-3 && x + rw <= w - margin + 1e-3);
                    assert!(*y >= margin - 1e-3 && y + rh <= h - margin + 1e-3);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn test_budget_total_example() {
        assert_eq!(total_of(["1500", "2,500.50"]).to_fixed_2(), "4000.50");
        assert_eq!(total_of(["abc", "", "-5", "0.005"]).to_fixed_2(), "0.01");
    }

    #[test]
    fn test_multi_entry_from_field() {
        let mut form = faculty_form();
        form.from = "Dr. X; Dr. Y, Dr. Z".to_string();
        let plan = faculty_request::plan(&form, &FACULTY_REQUEST, date()).unwrap();
        assert_eq!(plan.from.content.lines, vec!["Dr. X", "Dr. Y", "Dr. Z"]);

        let mut form = event_form();
        form.from = "Dr. X; Dr. Y, Dr. Z".to_string();
        let plan = event_approval::plan(&form, &EVENT_APPROVAL, date()).unwrap();
        assert_eq!(plan.parties[0].content.lines, vec!["Dr. X", "Dr. Y", "Dr. Z"]);
    }

    #[test]
    fn test_maximal_faculty_form_stays_in_bounds() {
        let mut form = faculty_form();
        for field in LetterKind::FacultyRequest.fields() {
            let max = LetterKind::FacultyRequest.max_chars(*field).unwrap();
            let value = "lorem ipsum dolor ".repeat(max / 18 + 1);
            let value: String = value.chars().take(max).collect();
            match field {
                LetterField::Department => form.department = value,
                LetterField::From => form.from = value,
                LetterField::To => form.to = value,
                LetterField::Subject => form.subject = value,
                LetterField::Body => form.body = "line\n".repeat(max / 5),
                LetterField::Through => unreachable!(),
            }
        }

        let plan = faculty_request::plan(&form, &FACULTY_REQUEST, date()).unwrap();
        assert!(plan.body.truncated);
        assert!(plan.body.lines.last().unwrap().ends_with("..."));
        let body_bottom = FACULTY_REQUEST.body_y + FACULTY_REQUEST.body_h;
        assert!(plan.body.last_baseline().unwrap() <= body_bottom - FACULTY_REQUEST.body_bottom_pad);

        assert_inside_border(&plan.into_page(), FACULTY_REQUEST.margin);
    }

    #[test]
    fn test_maximal_event_form_stays_in_bounds() {
        let mut form = event_form();
        form.body = "x".repeat(800);
        form.particulars = (0..ParticularEntry::MAX_COUNT)
            .map(|i| ParticularEntry::new(format!("Item {}", i), "99999999.99"))
            .collect();
        form.attach_table = true;
        form.table = letter_portal::table::parse_pasted_table(&"a\tb\tc\n".repeat(40)).unwrap();

        let plan = event_approval::plan(&form, &EVENT_APPROVAL, date()).unwrap();
        assert_eq!(plan.budget.total, "699999999.93");
        assert_eq!(plan.budget.row_height, 6.5);
        if let Some(table) = &plan.table {
            for row in &table.rows {
                for cell in &row.cells {
                    assert!(cell.rect.y + 4.0 + table.row_height <= plan.subject_box.bottom());
                }
            }
        }

        assert_inside_border(&plan.into_page(), EVENT_APPROVAL.margin);
    }

    #[test]
    fn test_same_input_same_geometry() {
        let a = event_approval::plan(&event_form(), &EVENT_APPROVAL, date())
            .unwrap()
            .into_page();
        let b = event_approval::plan(&event_form(), &EVENT_APPROVAL, date())
            .unwrap()
            .into_page();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }

    #[test]
    fn test_date_changes_only_date_text() {
        let a = faculty_request::plan(&faculty_form(), &FACULTY_REQUEST, date())
            .unwrap()
            .into_page();
        let later = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        let b = faculty_request::plan(&faculty_form(), &FACULTY_REQUEST, later)
            .unwrap()
            .into_page();
        let differing: Vec<_> = a
            .ops
            .iter()
            .zip(&b.ops)
            .filter(|(x, y)| x != y)
            .collect();
        assert!(!differing.is_empty());
        assert!(differing.iter().all(|(x, _)| matches!(x, DrawOp::Text(_))));
    }
}
