//! Flex containers.
//!
//! A [`FlexBox`] lays its children out along one main axis in two passes.
//! The natural pass asks every child for its preferred size (unconstrained
//! along a horizontal main axis). Leftover main-axis space is then split
//! between flex growth and justification spacing, and every child is
//! measured again at its grown width so text can reflow before the final
//! heights are taken.

use flexpage_core::{Axis, LayoutError, NodeKind, Rect, Renderer, Size};

use crate::item::{Content, FlexItem, Item};
use crate::UNCONSTRAINED;

/// Main-axis direction of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Row,
    Column,
}

impl Direction {
    pub fn main_axis(self) -> Axis {
        match self {
            Direction::Row => Axis::Horizontal,
            Direction::Column => Axis::Vertical,
        }
    }
}

/// Main-axis distribution of leftover space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JustifyContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
}

impl JustifyContent {
    /// Offset of the first child and gap between consecutive children for
    /// `count` children sharing `spacing`.
    pub fn offsets(self, spacing: f64, count: usize) -> (f64, f64) {
        let n = count as f64;
        match self {
            JustifyContent::FlexStart => (0.0, 0.0),
            JustifyContent::FlexEnd => (spacing, 0.0),
            JustifyContent::Center => (spacing / 2.0, 0.0),
            JustifyContent::SpaceBetween if count > 1 => (0.0, spacing / (n - 1.0)),
            JustifyContent::SpaceBetween => (0.0, 0.0),
            JustifyContent::SpaceAround if count > 0 => (spacing / (2.0 * n), spacing / n),
            JustifyContent::SpaceAround => (0.0, 0.0),
        }
    }
}

/// Cross-axis treatment of children.
///
/// Only [`AlignItems::Stretch`] changes a child's cross length; every other
/// value keeps the natural cross length at the start of the content box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignItems {
    FlexStart,
    FlexEnd,
    Center,
    #[default]
    Stretch,
}

/// How leftover main-axis space is split.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Distribution {
    growing: f64,
    spacing: f64,
}

impl Distribution {
    /// A total grow weight of at least one consumes everything. Smaller
    /// totals take that fraction and leave the rest for justification.
    fn split(remains: f64, grow_total: f64) -> Self {
        if grow_total >= 1.0 {
            Self {
                growing: remains,
                spacing: 0.0,
            }
        } else {
            let growing = remains * grow_total;
            Self {
                growing,
                spacing: remains - growing,
            }
        }
    }
}

/// Content of a flex container.
#[derive(Debug, Default)]
pub struct BoxLayout {
    pub direction: Direction,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub items: Vec<Box<dyn FlexItem>>,
}

/// A flex container node.
pub type FlexBox = Item<BoxLayout>;

impl BoxLayout {
    /// Constraint handed to every child, in both passes' first step.
    fn child_constraint(&self, content: Size) -> Size {
        match self.direction.main_axis() {
            Axis::Horizontal => Size::new(UNCONSTRAINED, content.height),
            Axis::Vertical => content,
        }
    }

    fn measure_children(
        &self,
        renderer: &mut dyn Renderer,
        content: Size,
    ) -> Result<Vec<Size>, LayoutError> {
        let constraint = self.child_constraint(content);
        self.items
            .iter()
            .map(|item| item.preferred_size(renderer, constraint))
            .collect()
    }

    /// Compute the margin box of every child inside `content_box`.
    pub fn arrange(
        &self,
        renderer: &mut dyn Renderer,
        content_box: Rect,
    ) -> Result<Vec<Rect>, LayoutError> {
        let main = self.direction.main_axis();
        let cross = main.cross();

        let mut sizes = self.measure_children(renderer, content_box.size())?;

        let used: f64 = sizes.iter().map(|size| size.get(main)).sum();
        let remains = (content_box.len(main) - used).max(0.0);
        let grow_total: f64 = self.items.iter().map(|item| item.flex_grow()).sum();
        let Distribution { growing, spacing } = Distribution::split(remains, grow_total);

        for (item, size) in self.items.iter().zip(sizes.iter_mut()) {
            if grow_total > 0.0 {
                size.add(main, growing * item.flex_grow() / grow_total);
            }
            if main == Axis::Horizontal {
                // text reflows at its final width
                let reflowed =
                    item.preferred_size(renderer, Size::new(size.width, content_box.height))?;
                size.height = reflowed.height;
            }
        }

        let (offset, gap) = self.justify_content.offsets(spacing, self.items.len());
        tracing::trace!(remains, grow_total, growing, spacing, offset, gap, "distributed");

        let mut cursor = content_box.pos(main) + offset;
        let rects = sizes
            .iter()
            .map(|size| {
                let mut rect = content_box;
                rect.set_pos(main, cursor);
                rect.set_len(main, size.get(main));
                if self.align_items != AlignItems::Stretch {
                    rect.set_len(cross, size.get(cross));
                }
                cursor += size.get(main) + gap;
                rect
            })
            .collect();
        Ok(rects)
    }
}

impl Content for BoxLayout {
    const KIND: NodeKind = NodeKind::Box;

    fn content_size(&self, renderer: &mut dyn Renderer, max: Size) -> Result<Size, LayoutError> {
        let main = self.direction.main_axis();
        let cross = main.cross();

        let mut size = Size::ZERO;
        for child in self.measure_children(renderer, max)? {
            size.add(main, child.get(main));
            size.set(cross, size.get(cross).max(child.get(cross)));
        }
        Ok(size)
    }

    fn draw_content(
        &self,
        renderer: &mut dyn Renderer,
        content_box: Rect,
    ) -> Result<(), LayoutError> {
        tracing::debug!(
            direction = ?self.direction,
            justify_content = ?self.justify_content,
            align_items = ?self.align_items,
            children = self.items.len(),
            "arrange"
        );
        let rects = self.arrange(renderer, content_box)?;
        for (item, rect) in self.items.iter().zip(rects) {
            tracing::trace!(kind = %item.kind(), ?rect, "place child");
            item.draw(renderer, rect)?;
        }
        Ok(())
    }
}

impl Item<BoxLayout> {
    pub fn new(direction: Direction, items: Vec<Box<dyn FlexItem>>) -> Self {
        Item::from_content(BoxLayout {
            direction,
            items,
            ..Default::default()
        })
    }

    /// A horizontal container.
    pub fn row(items: Vec<Box<dyn FlexItem>>) -> Self {
        Self::new(Direction::Row, items)
    }

    /// A vertical container.
    pub fn column(items: Vec<Box<dyn FlexItem>>) -> Self {
        Self::new(Direction::Column, items)
    }

    pub fn with_child(mut self, child: impl FlexItem + 'static) -> Self {
        self.content.items.push(Box::new(child));
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.content.direction = direction;
        self
    }

    pub fn with_justify_content(mut self, justify_content: JustifyContent) -> Self {
        self.content.justify_content = justify_content;
        self
    }

    pub fn with_align_items(mut self, align_items: AlignItems) -> Self {
        self.content.align_items = align_items;
        self
    }

    pub fn items(&self) -> &[Box<dyn FlexItem>] {
        &self.content.items
    }

    /// Child margin boxes for this container drawn into `margin_box`.
    pub fn arrange(
        &self,
        renderer: &mut dyn Renderer,
        margin_box: Rect,
    ) -> Result<Vec<Rect>, LayoutError> {
        let content_box = self.style.box_model(margin_box).content_box;
        self.content.arrange(renderer, content_box)
    }
}
