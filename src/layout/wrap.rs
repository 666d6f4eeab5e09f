//! Greedy word wrapping and the truncation policies used by the letters.

use lazy_static::lazy_static;
use regex::Regex;

use super::metrics::TextMeasure;

lazy_static! {
    static ref ENTRY_SEPARATOR: Regex = Regex::new(r"[,;\n]+").unwrap();
}

pub const ELLIPSIS: &str = "...";

/// How an overflowing block of lines is marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ellipsis {
    /// Right-trim the last kept line and append `" ..."`.
    Append,
    /// Replace the last three characters of the last kept line with `"..."`.
    ReplaceTail,
}

impl Ellipsis {
    pub fn apply(self, line: &str) -> String {
        match self {
            Ellipsis::Append => format!("{} {}", line.trim_end(), ELLIPSIS),
            Ellipsis::ReplaceTail => {
                let keep = line.chars().count().saturating_sub(3);
                let mut out: String = line.chars().take(keep).collect();
                out.push_str(ELLIPSIS);
                out
            }
        }
    }
}

/// Wraps `text` so that no line is wider than `max_width`.
///
/// Explicit newlines start a new paragraph and blank paragraphs are kept as
/// empty lines. Words wider than the box are broken between characters.
/// An empty input yields a single empty line.
pub fn split_text_to_size(text: &str, measure: &TextMeasure, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let space = measure.width(" ");

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in paragraph.split_whitespace() {
            let word_width = measure.width(word);

            if current.is_empty() {
                if word_width <= max_width {
                    current.push_str(word);
                    current_width = word_width;
                } else {
                    current = break_long_word(word, measure, max_width, &mut lines);
                    current_width = measure.width(&current);
                }
                continue;
            }

            if current_width + space + word_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                if word_width <= max_width {
                    current.push_str(word);
                    current_width = word_width;
                } else {
                    current = break_long_word(word, measure, max_width, &mut lines);
                    current_width = measure.width(&current);
                }
            }
        }

        lines.push(current);
    }

    lines
}

/// Pushes full-width chunks of `word` onto `lines` and returns the remainder.
fn break_long_word(
    word: &str,
    measure: &TextMeasure,
    max_width: f32,
    lines: &mut Vec<String>,
) -> String {
    let mut chunk = String::new();
    for ch in word.chars() {
        let mut candidate = chunk.clone();
        candidate.push(ch);
        if !chunk.is_empty() && measure.width(&candidate) > max_width {
            lines.push(std::mem::take(&mut chunk));
            chunk.push(ch);
        } else {
            chunk = candidate;
        }
    }
    chunk
}

/// Keeps at most `max_lines` lines. Returns whether anything was cut.
/// When the block is cut the last kept line is marked with `ellipsis`.
pub fn truncate_lines(
    mut lines: Vec<String>,
    max_lines: usize,
    ellipsis: Ellipsis,
) -> (Vec<String>, bool) {
    if lines.len() <= max_lines {
        return (lines, false);
    }
    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        *last = ellipsis.apply(last);
    }
    (lines, true)
}

/// Clips `text` to the first wrapped line, marking the cut with `...`.
pub fn fit_single_line(text: &str, measure: &TextMeasure, max_width: f32) -> String {
    let lines = split_text_to_size(text, measure, max_width);
    let first = lines.first().cloned().unwrap_or_default();
    if lines.len() > 1 {
        format!("{first}{ELLIPSIS}")
    } else {
        first
    }
}

/// Splits a From/Through/To value into its entries. Separators are commas,
/// semicolons and newlines; blank entries are dropped.
pub fn split_entries(text: &str) -> Vec<String> {
    ENTRY_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keeps the first `max_chars` characters and appends `...` when longer.
pub fn clip_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut out: String = text.chars().take(max_chars).collect();
        out.push_str(ELLIPSIS);
        out
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::metrics::{Font, Unit};

    fn times(size: f32) -> TextMeasure {
        TextMeasure::new(Font::TimesRoman, size, Unit::Pt)
    }

    #[test]
    fn test_split_entries_mixed_separators() {
        assert_eq!(
            split_entries("Dr. X; Dr. Y, Dr. Z"),
            vec!["Dr. X", "Dr. Y", "Dr. Z"]
        );
    }

    #[test]
    fn test_split_entries_drops_blanks() {
        assert_eq!(split_entries(" ;,\n HOD \n\n"), vec!["HOD"]);
        assert!(split_entries("").is_empty());
    }

    #[test]
    fn test_wrap_respects_width() {
        let m = times(10.0);
        let text = "the quick brown fox jumps over the lazy dog again and again";
        let lines = split_text_to_size(text, &m, 100.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(m.width(line) <= 100.0, "line too wide: {line}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_keeps_paragraph_breaks() {
        let lines = split_text_to_size("one\n\ntwo", &times(10.0), 500.0);
        assert_eq!(lines, vec!["one", "", "two"]);
    }

    #[test]
    fn test_wrap_empty_is_single_empty_line() {
        assert_eq!(split_text_to_size("", &times(10.0), 50.0), vec![String::new()]);
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        let m = times(10.0);
        let lines = split_text_to_size(&"W".repeat(40), &m, 60.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| m.width(l) <= 60.0));
        assert_eq!(lines.concat(), "W".repeat(40));
    }

    #[test]
    fn test_truncate_append() {
        let lines = vec!["a".into(), "b  ".into(), "c".into()];
        let (kept, cut) = truncate_lines(lines, 2, Ellipsis::Append);
        assert!(cut);
        assert_eq!(kept, vec!["a", "b ..."]);
    }

    #[test]
    fn test_truncate_replace_tail() {
        let lines = vec!["abcdef".into(), "ghi".into()];
        let (kept, cut) = truncate_lines(lines, 1, Ellipsis::ReplaceTail);
        assert!(cut);
        assert_eq!(kept, vec!["abc..."]);
        assert_eq!(Ellipsis::ReplaceTail.apply("ab"), "...");
    }

    #[test]
    fn test_truncate_noop_when_fits() {
        let lines = vec!["a".to_string()];
        let (kept, cut) = truncate_lines(lines.clone(), 3, Ellipsis::Append);
        assert!(!cut);
        assert_eq!(kept, lines);
    }

    #[test]
    fn test_clip_chars() {
        assert_eq!(clip_chars("Computer Science", 12), "Computer Sci...");
        assert_eq!(clip_chars("CSE", 12), "CSE");
    }
}
