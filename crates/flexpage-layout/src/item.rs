//! The item contract and the box-model wrapper shared by every node kind.
//!
//! A node is an [`Item`]: common [`ItemStyle`] fields (explicit size, flex
//! weights, background, border, margin, padding) composed with a
//! kind-specific [`Content`]. The wrapper turns an outer margin box into the
//! content box (margin, then border, then padding), paints the background
//! and border, and hands the content box to the content. Sizing runs the
//! same chain in reverse.

use std::fmt;

use flexpage_core::{
    Border, Color, LayoutError, NodeKind, Rect, Renderer, Size, Spacing,
};

/// Capabilities every node in a layout tree provides.
pub trait FlexItem: fmt::Debug {
    /// Paint this item into `margin_box`.
    fn draw(&self, renderer: &mut dyn Renderer, margin_box: Rect) -> Result<(), LayoutError>;

    /// Margin-box size this item wants, given the largest margin box it may
    /// occupy. Pure: the same constraint always yields the same size.
    fn preferred_size(
        &self,
        renderer: &mut dyn Renderer,
        max: Size,
    ) -> Result<Size, LayoutError>;

    /// Share of leftover main-axis space this item absorbs.
    fn flex_grow(&self) -> f64;

    fn kind(&self) -> NodeKind;
}

/// Node-specific part of an item, working on the content box only.
pub trait Content: fmt::Debug {
    const KIND: NodeKind;

    /// Size of the content when it may use at most `max`.
    fn content_size(&self, renderer: &mut dyn Renderer, max: Size) -> Result<Size, LayoutError>;

    /// Paint the content into `content_box`.
    fn draw_content(
        &self,
        renderer: &mut dyn Renderer,
        content_box: Rect,
    ) -> Result<(), LayoutError>;
}

/// Fields common to every node.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStyle {
    /// Explicit content-box width; `None` derives it from the content.
    pub width: Option<f64>,
    /// Explicit content-box height; `None` derives it from the content.
    pub height: Option<f64>,
    pub flex_grow: f64,
    /// Declared for completeness; overflow is never redistributed.
    pub flex_shrink: f64,
    pub background_color: Option<Color>,
    pub border: Border,
    pub margin: Spacing,
    pub padding: Spacing,
}

impl Default for ItemStyle {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            background_color: None,
            border: Border::default(),
            margin: Spacing::ZERO,
            padding: Spacing::ZERO,
        }
    }
}

/// The four nested boxes of one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxModel {
    pub margin_box: Rect,
    pub border_box: Rect,
    pub padding_box: Rect,
    pub content_box: Rect,
}

impl ItemStyle {
    /// Everything between the margin box and the content box.
    pub fn edges(&self) -> Spacing {
        self.margin
            .combine(&self.border.widths())
            .combine(&self.padding)
    }

    /// Split a margin box into the border, padding and content boxes.
    pub fn box_model(&self, margin_box: Rect) -> BoxModel {
        let border_box = margin_box.shrink(&self.margin);
        let padding_box = border_box.shrink(&self.border.widths());
        let content_box = padding_box.shrink(&self.padding);
        BoxModel {
            margin_box,
            border_box,
            padding_box,
            content_box,
        }
    }

    /// Replace content dimensions that were set explicitly.
    fn apply_explicit(&self, mut size: Size) -> Size {
        if let Some(width) = self.width {
            size.width = width;
        }
        if let Some(height) = self.height {
            size.height = height;
        }
        size
    }
}

/// A layout node: common style plus kind-specific content.
#[derive(Debug)]
pub struct Item<C> {
    pub style: ItemStyle,
    pub content: C,
}

impl<C: Content> Item<C> {
    pub fn from_content(content: C) -> Self {
        Self {
            style: ItemStyle::default(),
            content,
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.style.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.style.height = Some(height);
        self
    }

    pub fn with_size(self, width: f64, height: f64) -> Self {
        self.with_width(width).with_height(height)
    }

    /// Derive the width from the content again.
    pub fn with_auto_width(mut self) -> Self {
        self.style.width = None;
        self
    }

    /// Derive the height from the content again.
    pub fn with_auto_height(mut self) -> Self {
        self.style.height = None;
        self
    }

    /// Negative weights are treated as zero.
    pub fn with_flex_grow(mut self, grow: f64) -> Self {
        self.style.flex_grow = grow.max(0.0);
        self
    }

    pub fn with_flex_shrink(mut self, shrink: f64) -> Self {
        self.style.flex_shrink = shrink.max(0.0);
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.style.background_color = Some(color);
        self
    }

    pub fn with_border(mut self, border: Border) -> Self {
        self.style.border = border;
        self
    }

    pub fn with_margin(mut self, margin: impl Into<Spacing>) -> Self {
        self.style.margin = margin.into();
        self
    }

    pub fn with_padding(mut self, padding: impl Into<Spacing>) -> Self {
        self.style.padding = padding.into();
        self
    }

    /// Mutate the item in place while building.
    pub fn configure(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }

    /// Type-erase into a child for a container.
    pub fn boxed(self) -> Box<dyn FlexItem>
    where
        C: 'static,
    {
        Box::new(self)
    }
}

impl<C: Content> FlexItem for Item<C> {
    fn draw(&self, renderer: &mut dyn Renderer, margin_box: Rect) -> Result<(), LayoutError> {
        let _span = tracing::debug_span!("draw", kind = %C::KIND, rect = ?margin_box).entered();

        let model = self.style.box_model(margin_box);

        if let Some(color) = self.style.background_color {
            if !model.border_box.is_empty() {
                renderer.use_fill(color);
                renderer.fill_rect(model.border_box);
            }
        }

        self.content.draw_content(renderer, model.content_box)?;

        self.style.border.draw(renderer, model.border_box);
        Ok(())
    }

    fn preferred_size(
        &self,
        renderer: &mut dyn Renderer,
        max: Size,
    ) -> Result<Size, LayoutError> {
        let edges = self.style.edges();
        let content_max = self.style.apply_explicit(max.shrink(&edges));
        let content = self.content.content_size(renderer, content_max)?;
        let size = self.style.apply_explicit(content).expand(&edges);

        tracing::trace!(kind = %C::KIND, ?max, ?size, "preferred size");
        Ok(size)
    }

    fn flex_grow(&self) -> f64 {
        self.style.flex_grow
    }

    fn kind(&self) -> NodeKind {
        C::KIND
    }
}

impl<C: Content + 'static> From<Item<C>> for Box<dyn FlexItem> {
    fn from(item: Item<C>) -> Self {
        Box::new(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexpage_core::BorderStyle;

    #[test]
    fn test_edges_combine_margin_border_padding() {
        let style = ItemStyle {
            margin: Spacing::uniform(5.0),
            border: Border::uniformed(Color::BLACK, BorderStyle::Solid, 1.0),
            padding: Spacing::symmetric(2.0, 3.0),
            ..Default::default()
        };
        let edges = style.edges();
        assert!((edges.left - 8.0).abs() < 0.001);
        assert!((edges.top - 9.0).abs() < 0.001);
    }

    #[test]
    fn test_box_model_nesting() {
        let style = ItemStyle {
            margin: Spacing::uniform(10.0),
            border: Border::uniformed(Color::BLACK, BorderStyle::Dashed, 2.0),
            padding: Spacing::uniform(3.0),
            ..Default::default()
        };
        let model = style.box_model(Rect::new(0.0, 0.0, 100.0, 60.0));
        assert_eq!(model.border_box, Rect::new(10.0, 10.0, 80.0, 40.0));
        assert_eq!(model.padding_box, Rect::new(12.0, 12.0, 76.0, 36.0));
        assert_eq!(model.content_box, Rect::new(15.0, 15.0, 70.0, 30.0));
    }

    #[test]
    fn test_default_style() {
        let style = ItemStyle::default();
        assert_eq!(style.width, None);
        assert_eq!(style.flex_grow, 0.0);
        assert_eq!(style.edges(), Spacing::ZERO);
    }

    #[test]
    fn test_builders_adjust_style() {
        let item = crate::FlexBox::row(Vec::new())
            .with_size(10.0, 20.0)
            .with_flex_grow(-2.0)
            .configure(|item| item.style.margin = Spacing::uniform(4.0))
            .with_auto_width();

        assert_eq!(item.style.width, None);
        assert_eq!(item.style.height, Some(20.0));
        assert_eq!(item.style.flex_grow, 0.0);
        assert_eq!(item.style.margin, Spacing::uniform(4.0));
        assert_eq!(item.kind(), NodeKind::Box);
    }
}
