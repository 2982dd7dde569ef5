//! Recorded paint commands.
//!
//! Every paint call made against a [`Scene`](crate::Scene) is captured as a
//! [`RenderCommand`] together with the renderer state that was in force.

use flexpage_core::{BorderStyle, Color, Rect};
use glam::DVec2;

/// A render command representing something that was drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// A filled rectangle
    Rect(RectPrimitive),
    /// A stroked line segment
    Line(LinePrimitive),
    /// A cell of text
    Text(TextPrimitive),
}

impl RenderCommand {
    pub fn as_rect(&self) -> Option<&RectPrimitive> {
        match self {
            RenderCommand::Rect(rect) => Some(rect),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&LinePrimitive> {
        match self {
            RenderCommand::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextPrimitive> {
        match self {
            RenderCommand::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// A filled rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RectPrimitive {
    pub rect: Rect,
    /// Fill color with the alpha in force at paint time
    pub fill: Color,
}

/// A stroked line.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePrimitive {
    pub from: DVec2,
    pub to: DVec2,
    pub width: f64,
    pub style: BorderStyle,
    /// Stroke color with the alpha in force at paint time
    pub color: Color,
}

/// A text cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub cell: Rect,
    pub text: String,
    pub font_family: String,
    pub font_size: f64,
    /// Baseline offset from the top of the cell
    pub baseline: f64,
    pub color: Color,
}
