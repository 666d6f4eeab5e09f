#[cfg(test)]
mod table_tests {
    use letter_portal::letters::FormEdit;
    use letter_portal::models::{LetterForm, LetterKind};
    use letter_portal::table::{parse_pasted_table, TableGrid};

    fn grid(rows: &[&[&str]]) -> TableGrid {
        TableGrid::from(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect::<Vec<Vec<String>>>(),
        )
    }

    fn table_of(form: &LetterForm) -> TableGrid {
        match form {
            LetterForm::EventApproval(f) => f.table.clone(),
            LetterForm::FacultyRequest(_) => panic!("faculty forms have no table"),
        }
    }

    #[test]
    fn test_tab_and_comma_give_same_grid() {
        let expected = grid(&[&["A", "B"], &["C", "D"]]);
        assert_eq!(parse_pasted_table("A\tB\nC\tD"), Some(expected.clone()));
        assert_eq!(parse_pasted_table("A, B\nC, D"), Some(expected));
    }

    #[test]
    fn test_tab_wins_over_comma() {
        assert_eq!(
            parse_pasted_table("1,000\tTea"),
            Some(grid(&[&["1,000", "Tea"]]))
        );
    }

    #[test]
    fn test_empty_paste_is_no_change() {
        assert_eq!(parse_pasted_table(""), None);
        assert_eq!(parse_pasted_table("\n\n   \n"), None);
    }

    #[test]
    fn test_ragged_rows_padded() {
        let parsed = parse_pasted_table("a\tb\tc\nd").unwrap();
        assert_eq!(parsed.col_count(), 3);
        assert_eq!(parsed.cell(1, 2), Some(""));
    }

    #[test]
    fn test_edit_sequence_keeps_grid_rectangular() {
        let edits = [
            FormEdit::AddTableCol,
            FormEdit::RemoveTableRow { index: 2 },
            FormEdit::AddTableRow,
            FormEdit::RemoveTableCol { index: 0 },
            FormEdit::RemoveTableCol { index: 0 },
            FormEdit::RemoveTableCol { index: 0 },
            FormEdit::RemoveTableRow { index: 0 },
            FormEdit::RemoveTableRow { index: 0 },
            FormEdit::RemoveTableRow { index: 0 },
            FormEdit::AddTableCol,
            FormEdit::AddTableRow,
        ];

        let mut form = LetterForm::blank(LetterKind::EventApproval);
        for edit in &edits {
            form = form.apply(edit).unwrap();
            let table = table_of(&form);
            assert!(table.row_count() >= 1 && table.col_count() >= 1);
            let width = table.col_count();
            assert!(table.rows().iter().all(|row| row.len() == width));
        }
        let table = table_of(&form);
        assert_eq!((table.row_count(), table.col_count()), (2, 2));
    }

    #[test]
    fn test_grid_from_json_is_normalized() {
        let table: TableGrid = serde_json::from_str(r#"[["a"], ["b", "c"], []]"#).unwrap();
        assert_eq!(table, grid(&[&["a", ""], &["b", "c"], &["", ""]]));
        let empty: TableGrid = serde_json::from_str("[]").unwrap();
        assert_eq!((empty.row_count(), empty.col_count()), (1, 1));
    }
}
