//! Borders.

use glam::DVec2;

use crate::color::Color;
use crate::geometry::Rect;
use crate::renderer::Renderer;
use crate::spacing::{Spacing, Trbl};

/// How a border side (or any stroked line) is dashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl BorderStyle {
    /// On/off dash lengths for a stroke of `width`, or `None` for solid.
    ///
    /// Dotted strokes use zero-length dashes and rely on round line caps.
    pub fn dash_pattern(self, width: f64) -> Option<[f64; 2]> {
        match self {
            BorderStyle::Solid => None,
            BorderStyle::Dashed => Some([3.0 * width, 3.0 * width]),
            BorderStyle::Dotted => Some([0.0, 2.0 * width]),
        }
    }
}

/// One side of a border.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderSide {
    /// `None` draws nothing for this side.
    pub color: Option<Color>,
    pub width: f64,
    pub style: BorderStyle,
}

impl BorderSide {
    pub fn new(color: Color, style: BorderStyle, width: f64) -> Self {
        Self {
            color: Some(color),
            width,
            style,
        }
    }

    /// Whether stroking this side would produce any ink.
    pub fn is_visible(&self) -> bool {
        self.color.is_some() && self.width > 0.0
    }
}

/// Border for all four sides. The default has zero width everywhere.
pub type Border = Trbl<BorderSide>;

impl Trbl<BorderSide> {
    /// Same color, style and width on every side.
    pub fn solid(color: Color, width: f64) -> Self {
        Self::uniform(BorderSide::new(color, BorderStyle::Solid, width))
    }

    /// Same color, style and width on every side, in the argument order of
    /// the layout builders.
    pub fn uniformed(color: Color, style: BorderStyle, width: f64) -> Self {
        Self::uniform(BorderSide::new(color, style, width))
    }

    /// Side widths, used to go from the border box to the padding box.
    pub fn widths(&self) -> Spacing {
        self.map(|side| side.width)
    }

    /// Stroke every visible side over `border_box`.
    ///
    /// Each side is stroked along a line inset by half its width, so the ink
    /// covers exactly the border area inside the border box.
    pub fn draw(&self, renderer: &mut dyn Renderer, border_box: Rect) {
        if border_box.is_empty() {
            return;
        }

        let w = self.widths();
        let r = Rect::new(
            border_box.x + w.left / 2.0,
            border_box.y + w.top / 2.0,
            border_box.width - (w.left + w.right) / 2.0,
            border_box.height - (w.top + w.bottom) / 2.0,
        );

        let top_left = DVec2::new(r.x, r.y);
        let top_right = DVec2::new(r.right(), r.y);
        let bottom_right = DVec2::new(r.right(), r.bottom());
        let bottom_left = DVec2::new(r.x, r.bottom());

        draw_side(renderer, &self.top, top_left, top_right);
        draw_side(renderer, &self.right, top_right, bottom_right);
        draw_side(renderer, &self.bottom, bottom_left, bottom_right);
        draw_side(renderer, &self.left, top_left, bottom_left);
    }
}

fn draw_side(renderer: &mut dyn Renderer, side: &BorderSide, from: DVec2, to: DVec2) {
    let Some(color) = side.color else {
        return;
    };
    if side.width <= 0.0 {
        return;
    }
    renderer.use_stroke(color);
    renderer.stroke_line(from, to, side.width, side.style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_border_is_invisible() {
        let border = Border::default();
        assert_eq!(border.widths(), Spacing::ZERO);
        assert!(!border.top.is_visible());
    }

    #[test]
    fn test_uniformed_widths() {
        let border = Border::uniformed(Color::BLACK, BorderStyle::Dashed, 10.0);
        assert_eq!(border.widths(), Spacing::uniform(10.0));
        assert_eq!(border.left.style, BorderStyle::Dashed);
        assert!(border.bottom.is_visible());
    }

    #[test]
    fn test_side_without_color_is_invisible() {
        let side = BorderSide {
            color: None,
            width: 3.0,
            style: BorderStyle::Solid,
        };
        assert!(!side.is_visible());
    }

    #[test]
    fn test_dash_patterns() {
        assert_eq!(BorderStyle::Solid.dash_pattern(2.0), None);
        assert_eq!(BorderStyle::Dashed.dash_pattern(2.0), Some([6.0, 6.0]));
        assert_eq!(BorderStyle::Dotted.dash_pattern(2.0), Some([0.0, 4.0]));
    }
}
