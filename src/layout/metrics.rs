//! Static font-metric tables for the base-14 fonts the letters use.
//!
//! Widths are the Adobe AFM advance widths in 1/1000 em for ASCII 0x20..=0x7E.
//! Index = (char as usize) - 32. Characters outside the table fall back to
//! `average_width`, which keeps wrapping deterministic for any input.

use serde::{Deserialize, Serialize};

/// Fonts available to the layout engine. All of them are PDF base-14 fonts,
/// so the exporter never has to embed font programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Font {
    TimesRoman,
    TimesBold,
    TimesItalic,
    Helvetica,
    HelveticaBold,
}

impl Font {
    pub const ALL: [Font; 5] = [
        Font::TimesRoman,
        Font::TimesBold,
        Font::TimesItalic,
        Font::Helvetica,
        Font::HelveticaBold,
    ];

    /// PostScript name written into the PDF font dictionary.
    pub fn base_font(self) -> &'static str {
        match self {
            Font::TimesRoman => "Times-Roman",
            Font::TimesBold => "Times-Bold",
            Font::TimesItalic => "Times-Italic",
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Resource name used inside content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::TimesRoman => "F1",
            Font::TimesBold => "F2",
            Font::TimesItalic => "F3",
            Font::Helvetica => "F4",
            Font::HelveticaBold => "F5",
        }
    }

    fn table(self) -> &'static FontMetricTable {
        match self {
            Font::TimesRoman => &TIMES_ROMAN,
            Font::TimesBold => &TIMES_BOLD,
            Font::TimesItalic => &TIMES_ITALIC,
            Font::Helvetica => &HELVETICA,
            Font::HelveticaBold => &HELVETICA_BOLD,
        }
    }

    /// Advance width of `text` in points at `size` points.
    pub fn text_width_pt(self, text: &str, size: f32) -> f32 {
        self.table().measure_em(text) * size
    }
}

/// Layout unit of a page. The event letter is laid out in millimetres, the
/// faculty letter in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Pt,
    Mm,
}

impl Unit {
    pub fn points_per_unit(self) -> f32 {
        match self {
            Unit::Pt => 1.0,
            Unit::Mm => 72.0 / 25.4,
        }
    }
}

/// Measures text in the page's own unit. Font sizes are always in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMeasure {
    pub font: Font,
    pub size: f32,
    pub unit: Unit,
}

impl TextMeasure {
    pub fn new(font: Font, size: f32, unit: Unit) -> Self {
        Self { font, size, unit }
    }

    pub fn width(&self, text: &str) -> f32 {
        self.font.text_width_pt(text, self.size) / self.unit.points_per_unit()
    }
}

struct FontMetricTable {
    widths: [u16; 95],
    average_width: u16,
}

impl FontMetricTable {
    fn measure_em(&self, text: &str) -> f32 {
        let total: u32 = text
            .chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    u32::from(self.widths[code - 32])
                } else {
                    u32::from(self.average_width)
                }
            })
            .sum();
        total as f32 / 1000.0
    }
}

static TIMES_ROMAN: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
        // 0-9
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        // :    ;    <    =    >    ?    @
        278, 278, 564, 564, 564, 444, 921,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 469, 500, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
        // {    |    }    ~
        480, 200, 480, 541,
    ],
    average_width: 500,
};

static TIMES_BOLD: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        333, 333, 570, 570, 570, 500, 930,
        722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
        722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
        333, 278, 333, 581, 500, 333,
        500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
        556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
        394, 220, 394, 520,
    ],
    average_width: 520,
};

static TIMES_ITALIC: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        333, 333, 675, 675, 675, 500, 920,
        611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833,
        667, 722, 611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556,
        389, 278, 389, 422, 500, 333,
        500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722,
        500, 500, 500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389,
        400, 275, 400, 541,
    ],
    average_width: 500,
};

static HELVETICA: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        278, 278, 584, 584, 584, 556, 1015,
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        278, 278, 278, 469, 556, 333,
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        334, 260, 334, 584,
    ],
    average_width: 556,
};

static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        333, 333, 584, 584, 584, 611, 975,
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        333, 278, 333, 584, 556, 333,
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        389, 280, 389, 584,
    ],
    average_width: 611,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_times_roman_known_widths() {
        // "Ab" = 722 + 500
        let w = Font::TimesRoman.text_width_pt("Ab", 10.0);
        assert!((w - 12.22).abs() < 1e-4);
    }

    #[test]
    fn test_non_ascii_uses_average() {
        let w = Font::Helvetica.text_width_pt("é", 1.0);
        assert!((w - 0.556).abs() < 1e-6);
    }

    #[test]
    fn test_mm_measure_is_scaled() {
        let pt = TextMeasure::new(Font::TimesRoman, 10.0, Unit::Pt).width("Hello");
        let mm = TextMeasure::new(Font::TimesRoman, 10.0, Unit::Mm).width("Hello");
        assert!((mm * 72.0 / 25.4 - pt).abs() < 1e-3);
    }

    #[test]
    fn test_resource_names_are_unique() {
        let mut names: Vec<_> = Font::ALL.iter().map(|f| f.resource_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Font::ALL.len());
    }
}
