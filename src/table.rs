//! Attachable data table: a rectangular grid of cell strings plus the parser
//! that turns pasted spreadsheet text into one.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

lazy_static! {
    static ref LINE_BREAK: Regex = Regex::new(r"\r?\n").unwrap();
    static ref WIDE_GAP: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// Rows × columns of cell text.
///
/// Every row has the same length and the grid never shrinks below 1×1.
/// Deserialized grids are normalized the same way, so the invariant holds for
/// data coming off the wire as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")]
#[schema(value_type = Vec<Vec<String>>, example = json!([["Name", "Role"], ["Asha", "Speaker"]]))]
pub struct TableGrid(Vec<Vec<String>>);

impl TableGrid {
    pub const DEFAULT_ROWS: usize = 3;
    pub const DEFAULT_COLS: usize = 2;

    /// Empty grid of the given size (at least 1×1).
    pub fn blank(rows: usize, cols: usize) -> Self {
        let cols = cols.max(1);
        Self(vec![vec![String::new(); cols]; rows.max(1)])
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.0
    }

    pub fn row_count(&self) -> usize {
        self.0.len()
    }

    pub fn col_count(&self) -> usize {
        self.0.first().map_or(0, Vec::len)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.0.get(row).and_then(|r| r.get(col)).map(String::as_str)
    }

    /// True when every cell is blank after trimming.
    pub fn is_blank(&self) -> bool {
        self.0
            .iter()
            .all(|row| row.iter().all(|cell| cell.trim().is_empty()))
    }

    /// Returns a copy with one cell replaced, or `None` when out of range.
    pub fn with_cell(&self, row: usize, col: usize, value: impl Into<String>) -> Option<Self> {
        let mut next = self.clone();
        let slot = next.0.get_mut(row)?.get_mut(col)?;
        *slot = value.into();
        Some(next)
    }

    /// Appends an empty row as wide as the existing ones.
    pub fn with_row_added(&self) -> Self {
        let mut next = self.clone();
        next.0.push(vec![String::new(); self.col_count().max(1)]);
        next
    }

    /// Appends an empty cell to every row.
    pub fn with_col_added(&self) -> Self {
        let mut next = self.clone();
        for row in &mut next.0 {
            row.push(String::new());
        }
        next
    }

    /// Removes row `index`. A single-row grid is returned unchanged;
    /// `None` means the index does not exist.
    pub fn with_row_removed(&self, index: usize) -> Option<Self> {
        if index >= self.row_count() {
            return None;
        }
        let mut next = self.clone();
        if next.0.len() > 1 {
            next.0.remove(index);
        }
        Some(next)
    }

    /// Removes column `index` from every row. A single-column grid is
    /// returned unchanged; `None` means the index does not exist.
    pub fn with_col_removed(&self, index: usize) -> Option<Self> {
        if index >= self.col_count() {
            return None;
        }
        let mut next = self.clone();
        if self.col_count() > 1 {
            for row in &mut next.0 {
                row.remove(index);
            }
        }
        Some(next)
    }

    /// Pads short rows with empty cells and guarantees at least one cell.
    fn normalized(mut rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
        if rows.is_empty() {
            rows.push(Vec::new());
        }
        let width = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
        for row in &mut rows {
            row.resize(width, String::new());
        }
        rows
    }
}

impl Default for TableGrid {
    fn default() -> Self {
        Self::blank(Self::DEFAULT_ROWS, Self::DEFAULT_COLS)
    }
}

impl From<Vec<Vec<String>>> for TableGrid {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self(Self::normalized(rows))
    }
}

impl From<TableGrid> for Vec<Vec<String>> {
    fn from(grid: TableGrid) -> Self {
        grid.0
    }
}

/// Parses pasted text into a grid.
///
/// Each non-blank line picks its own delimiter: a tab if the line has one,
/// otherwise a comma, otherwise a run of two or more whitespace characters.
/// Cells are trimmed. Rows of different lengths are padded to the widest.
/// Returns `None` when the text has no non-blank line, so callers keep their
/// current grid instead of clearing it.
pub fn parse_pasted_table(raw: &str) -> Option<TableGrid> {
    let rows: Vec<Vec<String>> = LINE_BREAK
        .split(raw.trim())
        .filter(|line| !line.trim().is_empty())
        .map(split_row)
        .collect();

    if rows.is_empty() {
        None
    } else {
        Some(TableGrid::from(rows))
    }
}

fn split_row(line: &str) -> Vec<String> {
    let cells: Vec<&str> = if line.contains('\t') {
        line.split('\t').collect()
    } else if line.contains(',') {
        line.split(',').collect()
    } else {
        WIDE_GAP.split(line).collect()
    };
    cells.into_iter().map(|c| c.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> TableGrid {
        TableGrid::from(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect::<Vec<Vec<String>>>(),
        )
    }

    #[test]
    fn test_parse_tabs() {
        let parsed = parse_pasted_table("A\tB\nC\tD").unwrap();
        assert_eq!(parsed, grid(&[&["A", "B"], &["C", "D"]]));
    }

    #[test]
    fn test_parse_comma_fallback() {
        let parsed = parse_pasted_table("A, B\r\nC, D").unwrap();
        assert_eq!(parsed, grid(&[&["A", "B"], &["C", "D"]]));
    }

    #[test]
    fn test_parse_wide_spaces() {
        let parsed = parse_pasted_table("Item   Cost\nTea  40").unwrap();
        assert_eq!(parsed, grid(&[&["Item", "Cost"], &["Tea", "40"]]));
    }

    #[test]
    fn test_parse_single_space_is_one_cell() {
        let parsed = parse_pasted_table("Guest lecture").unwrap();
        assert_eq!(parsed, grid(&[&["Guest lecture"]]));
    }

    #[test]
    fn test_parse_skips_blank_lines_and_pads() {
        let parsed = parse_pasted_table("\n\nA\tB\tC\n   \nD\n").unwrap();
        assert_eq!(parsed.row_count(), 2);
        assert_eq!(parsed.col_count(), 3);
        assert_eq!(parsed.cell(1, 0), Some("D"));
        assert_eq!(parsed.cell(1, 2), Some(""));
    }

    #[test]
    fn test_parse_empty_is_none() {
        assert!(parse_pasted_table("").is_none());
        assert!(parse_pasted_table("  \n \t\n").is_none());
    }

    #[test]
    fn test_default_is_three_by_two() {
        let t = TableGrid::default();
        assert_eq!((t.row_count(), t.col_count()), (3, 2));
        assert!(t.is_blank());
    }

    #[test]
    fn test_remove_never_below_one_by_one() {
        let mut t = TableGrid::blank(1, 1);
        t = t.with_row_removed(0).unwrap();
        t = t.with_col_removed(0).unwrap();
        assert_eq!((t.row_count(), t.col_count()), (1, 1));
    }

    #[test]
    fn test_remove_out_of_range() {
        let t = TableGrid::default();
        assert!(t.with_row_removed(3).is_none());
        assert!(t.with_col_removed(2).is_none());
    }

    #[test]
    fn test_add_keeps_rectangular() {
        let t = grid(&[&["a", "b"], &["c", "d"]])
            .with_col_added()
            .with_row_added()
            .with_col_added();
        assert_eq!((t.row_count(), t.col_count()), (3, 4));
        assert!(t.rows().iter().all(|r| r.len() == 4));
        assert_eq!(t.cell(0, 1), Some("b"));
    }

    #[test]
    fn test_with_cell() {
        let t = TableGrid::default().with_cell(2, 1, "x").unwrap();
        assert_eq!(t.cell(2, 1), Some("x"));
        assert!(TableGrid::default().with_cell(5, 0, "x").is_none());
    }

    #[test]
    fn test_deserialize_normalizes() {
        let t: TableGrid = serde_json::from_str(r#"[["a"], ["b", "c"]]"#).unwrap();
        assert_eq!(t.col_count(), 2);
        assert_eq!(t.cell(0, 1), Some(""));

        let empty: TableGrid = serde_json::from_str("[]").unwrap();
        assert_eq!((empty.row_count(), empty.col_count()), (1, 1));
    }
}
