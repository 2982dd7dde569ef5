//! A renderer that records what it is asked to paint.

use flexpage_core::{BorderStyle, Color, Rect, RenderError, Renderer, Size};
use glam::DVec2;
use indexmap::IndexMap;

use crate::metrics::FixedMetrics;
use crate::primitives::{LinePrimitive, RectPrimitive, RenderCommand, TextPrimitive};

#[derive(Debug, Clone)]
struct CurrentFont {
    family: String,
    size: f64,
    metrics: FixedMetrics,
}

/// In-memory page that implements [`Renderer`] by recording commands.
#[derive(Debug, Clone)]
pub struct Scene {
    size: Size,
    fonts: IndexMap<String, FixedMetrics>,
    font: Option<CurrentFont>,
    fill: Color,
    stroke: Color,
    alpha: f32,
    pub commands: Vec<RenderCommand>,
}

impl Scene {
    /// Create an empty scene for a page of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            fonts: IndexMap::new(),
            font: None,
            fill: Color::BLACK,
            stroke: Color::BLACK,
            alpha: 1.0,
            commands: Vec::new(),
        }
    }

    /// Register a font family.
    pub fn with_font(mut self, family: impl Into<String>, metrics: FixedMetrics) -> Self {
        self.register_font(family, metrics);
        self
    }

    pub fn register_font(&mut self, family: impl Into<String>, metrics: FixedMetrics) {
        self.fonts.insert(family.into(), metrics);
    }

    /// Registered font families, in registration order.
    pub fn font_families(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Drop recorded commands and reset paint state. Fonts stay registered.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.font = None;
        self.fill = Color::BLACK;
        self.stroke = Color::BLACK;
        self.alpha = 1.0;
    }

    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.commands.iter().filter_map(RenderCommand::as_rect)
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.commands.iter().filter_map(RenderCommand::as_line)
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.commands.iter().filter_map(RenderCommand::as_text)
    }

    /// Concatenated text of all text commands, in paint order.
    pub fn text_content(&self) -> String {
        self.texts().map(|t| t.text.as_str()).collect()
    }

    fn current_font(&self) -> Result<&CurrentFont, RenderError> {
        self.font.as_ref().ok_or(RenderError::NoFontSelected)
    }

    fn with_alpha(&self, color: Color) -> Color {
        Color { a: self.alpha, ..color }
    }
}

impl Renderer for Scene {
    fn set_font(&mut self, family: &str, size: f64) -> Result<(), RenderError> {
        let metrics = *self
            .fonts
            .get(family)
            .ok_or_else(|| RenderError::FontNotFound {
                family: family.to_string(),
            })?;
        self.font = Some(CurrentFont {
            family: family.to_string(),
            size,
            metrics,
        });
        Ok(())
    }

    fn measure_text_width(&self, text: &str) -> Result<f64, RenderError> {
        let font = self.current_font()?;
        Ok(font.metrics.measure(text, font.size))
    }

    fn set_fill_color(&mut self, r: f32, g: f32, b: f32) {
        self.fill = Color::rgb(r, g, b);
    }

    fn set_stroke_color(&mut self, r: f32, g: f32, b: f32) {
        self.stroke = Color::rgb(r, g, b);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    fn fill_rect(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        let fill = self.with_alpha(self.fill);
        self.push(RenderCommand::Rect(RectPrimitive { rect, fill }));
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, style: BorderStyle) {
        let color = self.with_alpha(self.stroke);
        self.push(RenderCommand::Line(LinePrimitive {
            from,
            to,
            width,
            style,
            color,
        }));
    }

    fn draw_text_cell(&mut self, cell: Rect, text: &str) -> Result<(), RenderError> {
        let font = self.current_font()?;
        let primitive = TextPrimitive {
            cell,
            text: text.to_string(),
            font_family: font.family.clone(),
            font_size: font.size,
            baseline: font.metrics.ascent * font.size,
            color: self.with_alpha(self.fill),
        };
        self.push(RenderCommand::Text(primitive));
        Ok(())
    }
}
