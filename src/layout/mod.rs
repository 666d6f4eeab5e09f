//! Layout engine.
//!
//! Each letter is laid out in two phases. `plan` is pure geometry: it turns a
//! form snapshot, the letter's constants and the render date into a
//! structured plan. `Plan::into_page` then flattens the plan into draw
//! operations for the exporter. The same input always yields the same page.

pub mod budget;
pub mod constants;
pub mod event_approval;
pub mod faculty_request;
pub mod metrics;
pub mod wrap;

use serde::Serialize;
use thiserror::Error;

pub use metrics::{Font, TextMeasure, Unit};

/// Errors raised when a plan's geometry cannot be satisfied.
#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("particular count {0} is outside 1..=7")]
    ParticularCount(usize),
    #[error("{section} overlaps {other} ({bottom:.2} > {limit:.2})")]
    Overlap {
        section: &'static str,
        other: &'static str,
        bottom: f32,
        limit: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

/// Static images placed on the letterhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AssetKind {
    InstitutionLogo,
    PartnerLogo,
}

impl AssetKind {
    /// File stem looked up in the assets directory.
    pub fn file_stem(self) -> &'static str {
        match self {
            AssetKind::InstitutionLogo => "kite-logo",
            AssetKind::PartnerLogo => "ips-logo",
        }
    }
}

/// A text run anchored at a baseline point. `align` says whether `x` is the
/// left edge, the centre or the right edge of the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub align: Align,
    pub font: Font,
    pub size: f32,
    pub color: Rgb,
}

impl TextRun {
    pub fn new(text: impl Into<String>, x: f32, y: f32, font: Font, size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            align: Align::Left,
            font,
            size,
            color: Rgb::BLACK,
        }
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn colored(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Left edge of the run once alignment is resolved.
    pub fn left_x(&self, unit: Unit) -> f32 {
        let width = TextMeasure::new(self.font, self.size, unit).width(&self.text);
        match self.align {
            Align::Left => self.x,
            Align::Center => self.x - width / 2.0,
            Align::Right => self.x - width,
        }
    }
}

/// One drawing primitive. Coordinates are in the page unit with the origin
/// at the top-left corner and y growing downwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        line_width: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        line_width: f32,
    },
    Text(TextRun),
    Image {
        asset: AssetKind,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
    pub unit: Unit,
}

/// A finished single page: its size and the ordered draw operations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageDescription {
    pub size: PageSize,
    pub ops: Vec<DrawOp>,
}

impl PageDescription {
    pub fn new(size: PageSize) -> Self {
        Self {
            size,
            ops: Vec::new(),
        }
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, line_width: f32) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            w,
            h,
            line_width,
        });
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, line_width: f32) {
        self.ops.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            line_width,
        });
    }

    pub fn text(&mut self, run: TextRun) {
        self.ops.push(DrawOp::Text(run));
    }

    pub fn image(&mut self, asset: AssetKind, x: f32, y: f32, w: f32, h: f32) {
        self.ops.push(DrawOp::Image { asset, x, y, w, h });
    }

    /// All text runs, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }
}

/// A block of wrapped lines placed at a fixed pitch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineBlock {
    pub x: f32,
    pub first_baseline: f32,
    pub line_height: f32,
    pub lines: Vec<String>,
    pub truncated: bool,
}

impl LineBlock {
    pub fn baseline(&self, index: usize) -> f32 {
        self.first_baseline + index as f32 * self.line_height
    }

    pub fn last_baseline(&self) -> Option<f32> {
        self.lines.len().checked_sub(1).map(|i| self.baseline(i))
    }

    fn draw(&self, page: &mut PageDescription, font: Font, size: f32) {
        for (i, line) in self.lines.iter().enumerate() {
            page.text(TextRun::new(line.clone(), self.x, self.baseline(i), font, size));
        }
    }
}
