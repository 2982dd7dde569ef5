//! Styled text with line breaking.
//!
//! A [`Text`] holds a sequence of [`Run`]s, each with its own font, size,
//! color and line height. Runs flow into shared lines: a newline forces a
//! break, and a run that does not fit the remaining width is split at the
//! longest character prefix that does. Every line is as tall as its tallest
//! fragment and fragments sit on the line's bottom edge.

use smallvec::SmallVec;

use flexpage_core::{Color, LayoutError, NodeKind, Rect, RenderError, Renderer, Size};

use crate::item::{Content, Item};

pub const DEFAULT_FONT_FAMILY: &str = "Helvetica";
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Content boxes narrower than this are skipped when painting.
pub const MIN_DRAW_WIDTH: f64 = 20.0;

/// A span of uniformly styled text.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub color: Color,
    pub font_family: String,
    pub font_size: f64,
    /// Multiplier applied to the font size to get the line box height
    pub line_height: f64,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Color::BLACK,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            line_height: 1.0,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    /// Height this run contributes to any line it appears on.
    pub fn line_box_height(&self) -> f64 {
        self.font_size * self.line_height
    }
}

/// Horizontal placement of each line within the content box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Begin,
    Center,
    End,
}

impl TextAlign {
    pub fn offset(self, available: f64, line_width: f64) -> f64 {
        match self {
            TextAlign::Begin => 0.0,
            TextAlign::Center => (available - line_width) / 2.0,
            TextAlign::End => available - line_width,
        }
    }
}

/// A piece of one run placed on one line.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment<'a> {
    pub run: &'a Run,
    pub text: &'a str,
    pub width: f64,
    pub height: f64,
}

/// One laid-out line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line<'a> {
    pub fragments: SmallVec<[Fragment<'a>; 4]>,
    pub width: f64,
    pub height: f64,
}

impl<'a> Line<'a> {
    /// Empty fragments only hold the height of a blank line; the first text
    /// fragment replaces them and later ones are dropped.
    fn push(&mut self, fragment: Fragment<'a>) {
        if fragment.text.is_empty() {
            if self.has_text() {
                return;
            }
        } else if !self.has_text() {
            self.fragments.clear();
            self.height = 0.0;
        }
        self.width += fragment.width;
        self.height = self.height.max(fragment.height);
        self.fragments.push(fragment);
    }

    /// True once any visible text sits on the line.
    pub fn has_text(&self) -> bool {
        self.fragments.iter().any(|f| !f.text.is_empty())
    }
}

/// Content of a text node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLayout {
    pub runs: Vec<Run>,
    pub align: TextAlign,
}

/// A text node.
pub type Text = Item<TextLayout>;

struct LineBreaker<'a> {
    max_width: f64,
    lines: Vec<Line<'a>>,
    current: Line<'a>,
}

impl<'a> LineBreaker<'a> {
    fn new(max_width: f64) -> Self {
        Self {
            max_width,
            lines: Vec::new(),
            current: Line::default(),
        }
    }

    fn break_line(&mut self) {
        let line = std::mem::take(&mut self.current);
        self.lines.push(line);
    }

    fn push_run(&mut self, renderer: &dyn Renderer, run: &'a Run) -> Result<(), RenderError> {
        let height = run.line_box_height();
        for (i, paragraph) in run.text.split('\n').enumerate() {
            if i > 0 {
                self.break_line();
            }
            if paragraph.is_empty() {
                self.current.push(Fragment {
                    run,
                    text: paragraph,
                    width: 0.0,
                    height,
                });
                continue;
            }

            let mut rest = paragraph;
            while !rest.is_empty() {
                let budget = self.max_width - self.current.width;
                let (end, width) = fit_prefix(renderer, rest, budget, !self.current.has_text())?;
                if end == 0 {
                    self.break_line();
                    continue;
                }
                self.current.push(Fragment {
                    run,
                    text: &rest[..end],
                    width,
                    height,
                });
                rest = &rest[end..];
                if !rest.is_empty() {
                    self.break_line();
                }
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Vec<Line<'a>> {
        self.break_line();
        self.lines
    }
}

/// Longest character prefix of `text` no wider than `budget`, as a byte
/// length and its width. An empty line always takes at least one character.
fn fit_prefix(
    renderer: &dyn Renderer,
    text: &str,
    budget: f64,
    line_is_empty: bool,
) -> Result<(usize, f64), RenderError> {
    let mut fit = (0, 0.0);
    for (idx, ch) in text.char_indices() {
        let end = idx + ch.len_utf8();
        let width = renderer.measure_text_width(&text[..end])?;
        if width > budget {
            break;
        }
        fit = (end, width);
    }

    if fit.0 == 0 && line_is_empty {
        let end = text.chars().next().map_or(0, char::len_utf8);
        fit = (end, renderer.measure_text_width(&text[..end])?);
    }
    Ok(fit)
}

fn set_font(renderer: &mut dyn Renderer, run: &Run) -> Result<(), LayoutError> {
    renderer
        .set_font(&run.font_family, run.font_size)
        .map_err(|e| LayoutError::renderer(NodeKind::Text, "set_font", e))
}

impl TextLayout {
    /// Break every run into lines no wider than `max_width`.
    pub fn break_lines<'a>(
        &'a self,
        renderer: &mut dyn Renderer,
        max_width: f64,
    ) -> Result<Vec<Line<'a>>, LayoutError> {
        let mut breaker = LineBreaker::new(max_width);
        for run in &self.runs {
            set_font(renderer, run)?;
            breaker
                .push_run(&*renderer, run)
                .map_err(|e| LayoutError::renderer(NodeKind::Text, "measure_text_width", e))?;
        }
        let lines = breaker.finish();
        tracing::trace!(lines = lines.len(), max_width, "broke text");
        Ok(lines)
    }
}

impl Content for TextLayout {
    const KIND: NodeKind = NodeKind::Text;

    fn content_size(&self, renderer: &mut dyn Renderer, max: Size) -> Result<Size, LayoutError> {
        let lines = self.break_lines(renderer, max.width)?;
        let width = lines.iter().map(|l| l.width).fold(0.0, f64::max);
        let height: f64 = lines.iter().map(|l| l.height).sum();
        Ok(Size::new(width, height))
    }

    fn draw_content(
        &self,
        renderer: &mut dyn Renderer,
        content_box: Rect,
    ) -> Result<(), LayoutError> {
        if content_box.width < MIN_DRAW_WIDTH {
            tracing::debug!(width = content_box.width, "text box too narrow, skipped");
            return Ok(());
        }

        let lines = self.break_lines(renderer, content_box.width)?;
        let mut y = content_box.y;
        for line in &lines {
            let mut x = content_box.x + self.align.offset(content_box.width, line.width);
            for fragment in &line.fragments {
                if !fragment.text.is_empty() {
                    set_font(renderer, fragment.run)?;
                    renderer.use_fill(fragment.run.color);
                    let cell = Rect::new(
                        x,
                        y + line.height - fragment.height,
                        fragment.width,
                        fragment.height,
                    );
                    renderer
                        .draw_text_cell(cell, fragment.text)
                        .map_err(|e| LayoutError::renderer(NodeKind::Text, "draw_text_cell", e))?;
                }
                x += fragment.width;
            }
            y += line.height;
        }
        Ok(())
    }
}

impl Item<TextLayout> {
    pub fn new(runs: Vec<Run>) -> Self {
        Item::from_content(TextLayout {
            runs,
            ..Default::default()
        })
    }

    /// A single run in the default style.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(vec![Run::new(text)])
    }

    pub fn with_run(mut self, run: Run) -> Self {
        self.content.runs.push(run);
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.content.align = align;
        self
    }

    pub fn runs(&self) -> &[Run] {
        &self.content.runs
    }
}
