//! The page renderer contract consumed by layout.
//!
//! Layout never talks to an output format directly. Every measurement and
//! paint operation goes through a [`Renderer`], which keeps a small amount of
//! cursor state (current font, fill color, stroke color, alpha). Callers must
//! set that state explicitly before each use and never rely on whatever a
//! sibling or parent left behind.

use glam::DVec2;

use crate::border::BorderStyle;
use crate::color::Color;
use crate::errors::RenderError;
use crate::geometry::Rect;

/// A page renderer: font metrics plus a handful of paint primitives.
pub trait Renderer {
    /// Select the font used by subsequent measure and text calls.
    fn set_font(&mut self, family: &str, size: f64) -> Result<(), RenderError>;

    /// Width of `text` in the current font.
    fn measure_text_width(&self, text: &str) -> Result<f64, RenderError>;

    /// Greedily split `text` into lines no wider than `width`, breaking
    /// between characters and at newlines. Every line holds at least one
    /// character.
    fn split_text_to_width(&self, text: &str, width: f64) -> Result<Vec<String>, RenderError> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let mut line = String::new();
            for ch in paragraph.chars() {
                line.push(ch);
                if line.chars().count() > 1 && self.measure_text_width(&line)? > width {
                    line.pop();
                    lines.push(std::mem::take(&mut line));
                    line.push(ch);
                }
            }
            lines.push(line);
        }
        Ok(lines)
    }

    fn set_fill_color(&mut self, r: f32, g: f32, b: f32);

    fn set_stroke_color(&mut self, r: f32, g: f32, b: f32);

    /// Opacity applied to subsequent fills, strokes and text.
    fn set_alpha(&mut self, alpha: f32);

    /// Fill `rect` with the current fill color.
    fn fill_rect(&mut self, rect: Rect);

    /// Stroke a straight line with the current stroke color.
    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, style: BorderStyle);

    /// Paint `text` in the current font and fill color inside `cell`.
    fn draw_text_cell(&mut self, cell: Rect, text: &str) -> Result<(), RenderError>;

    /// Set fill color and alpha from `color`.
    fn use_fill(&mut self, color: Color) {
        self.set_fill_color(color.r, color.g, color.b);
        self.set_alpha(color.a);
    }

    /// Set stroke color and alpha from `color`.
    fn use_stroke(&mut self, color: Color) {
        self.set_stroke_color(color.r, color.g, color.b);
        self.set_alpha(color.a);
    }
}
