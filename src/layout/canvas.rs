// Display lists: what each page draws, independent of the PDF backend

use super::metrics::{FontFace, FontMetrics};
use crate::wrap::wrap_text;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn hex(value: u32) -> Self {
        Rgb {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    pub fn components(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
    pub color: Rgb,
}

impl TextStyle {
    pub const fn new(face: FontFace, size: f32, color: Rgb) -> Self {
        TextStyle { face, size, color }
    }
}

/// A single drawing primitive. Coordinates are millimetres from the
/// bottom-left page corner; text `y` is the baseline. Line thickness is
/// in points.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        text: String,
        style: TextStyle,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
        thickness: f32,
    },
}

/// One finished page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCanvas {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<DrawOp>,
}

impl PageCanvas {
    /// All text runs on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

/// Accumulates draw operations for one page and offers measured
/// placement helpers.
pub struct PageBuilder<'a> {
    canvas: PageCanvas,
    metrics: &'a dyn FontMetrics,
}

impl<'a> PageBuilder<'a> {
    pub fn new(width: f32, height: f32, metrics: &'a dyn FontMetrics) -> Self {
        PageBuilder {
            canvas: PageCanvas {
                width,
                height,
                ops: Vec::new(),
            },
            metrics,
        }
    }

    pub fn width(&self) -> f32 {
        self.canvas.width
    }

    pub fn height(&self) -> f32 {
        self.canvas.height
    }

    pub fn measure(&self, text: &str, style: TextStyle) -> f32 {
        self.metrics.text_width(text, style.face, style.size)
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.canvas.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgb, thickness: f32) {
        self.canvas.ops.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            thickness,
        });
    }

    pub fn text(&mut self, x: f32, y: f32, text: &str, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        self.canvas.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            style,
        });
    }

    pub fn text_centered(&mut self, center_x: f32, y: f32, text: &str, style: TextStyle) {
        let width = self.measure(text, style);
        self.text(center_x - width / 2.0, y, text, style);
    }

    pub fn text_right(&mut self, right_x: f32, y: f32, text: &str, style: TextStyle) {
        let width = self.measure(text, style);
        self.text(right_x - width, y, text, style);
    }

    pub fn wrap(&self, text: &str, style: TextStyle, max_width: f32) -> Vec<String> {
        wrap_text(text, |s| self.measure(s, style), max_width)
    }

    /// Draw wrapped lines starting at baseline `y`; returns the baseline
    /// after the last line.
    pub fn lines(&mut self, x: f32, y: f32, lines: &[String], style: TextStyle, leading: f32) -> f32 {
        let mut y = y;
        for line in lines {
            self.text(x, y, line, style);
            y -= leading;
        }
        y
    }

    pub fn lines_centered(
        &mut self,
        center_x: f32,
        y: f32,
        lines: &[String],
        style: TextStyle,
        leading: f32,
    ) -> f32 {
        let mut y = y;
        for line in lines {
            self.text_centered(center_x, y, line, style);
            y -= leading;
        }
        y
    }

    pub fn finish(self) -> PageCanvas {
        self.canvas
    }
}
