//! Flexbox-style page layout for flexpage.
//!
//! A layout tree is built from two node kinds:
//! - [`FlexBox`]: a container that places children along a row or column
//!   using flex growth, `justify-content` and `align-items: stretch`
//! - [`Text`]: styled runs broken into lines inside the available width
//!
//! Both kinds share the same box model (explicit size, margin, border,
//! padding, background) through [`Item`]. Everything is measured and painted
//! through a [`Renderer`](flexpage_core::Renderer), so the same tree can be
//! drawn into a PDF page or recorded for inspection.
//!
//! ```ignore
//! use flexpage_layout::{FlexBox, JustifyContent, Run, Text};
//!
//! let page = FlexBox::column(vec![
//!     Text::new(vec![Run::new("Title").with_font_size(24.0)]).boxed(),
//!     FlexBox::row(vec![Text::plain("left").boxed(), Text::plain("right").boxed()])
//!         .with_justify_content(JustifyContent::SpaceBetween)
//!         .boxed(),
//! ])
//! .with_padding(36.0);
//! ```

pub mod flex;
pub mod item;
pub mod text;

use flexpage_core::{LayoutError, Rect, Renderer, Size};

pub use flex::{AlignItems, BoxLayout, Direction, FlexBox, JustifyContent};
pub use item::{BoxModel, Content, FlexItem, Item, ItemStyle};
pub use text::{
    Fragment, Line, Run, Text, TextAlign, TextLayout, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE,
    MIN_DRAW_WIDTH,
};

/// Main-axis constraint used while measuring children of a row.
pub const UNCONSTRAINED: f64 = 10_000_000.0;

/// Draw `root` so that its margin box covers the whole page.
pub fn draw_page(
    root: &dyn FlexItem,
    renderer: &mut dyn Renderer,
    page: Size,
) -> Result<(), LayoutError> {
    let _span = tracing::info_span!("page", width = page.width, height = page.height).entered();
    root.draw(renderer, Rect::from_size(page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexpage_core::{Border, BorderStyle, Color};
    use flexpage_render::{FixedMetrics, Scene};

    fn scene(width: f64, height: f64) -> Scene {
        Scene::new(width, height).with_font("Helvetica", FixedMetrics::new(0.5))
    }

    fn swatch(hex: &str) -> Box<dyn FlexItem> {
        FlexBox::row(Vec::new())
            .with_size(20.0, 20.0)
            .with_background_color(Color::from_hex(hex).unwrap())
            .boxed()
    }

    #[test]
    fn test_draw_page_nested_tree() {
        let mut scene = scene(300.0, 200.0);
        let root = FlexBox::column(vec![
            FlexBox::row(vec![swatch("#FFCCCC"), swatch("#CCFFCC"), swatch("#CCCCFF")])
                .with_justify_content(JustifyContent::SpaceAround)
                .with_align_items(AlignItems::FlexStart)
                .boxed(),
            Text::new(vec![Run::new("hello").with_font_size(10.0)])
                .with_flex_grow(1.0)
                .boxed(),
        ])
        .with_padding(10.0)
        .with_border(Border::uniformed(Color::BLACK, BorderStyle::Dotted, 1.0));

        draw_page(&root, &mut scene, Size::new(300.0, 200.0)).unwrap();

        // content box is 278 wide; 218 left over, 218 / 3 apart
        let swatches: Vec<Rect> = scene.rects().map(|r| r.rect).collect();
        assert_eq!(swatches.len(), 3);
        let gap = 218.0 / 3.0;
        assert!((swatches[0].x - (11.0 + gap / 2.0)).abs() < 0.001);
        assert!((swatches[1].x - swatches[0].right() - gap).abs() < 0.001);
        assert!((swatches[0].y - 11.0).abs() < 0.001);
        assert!((swatches[0].height - 20.0).abs() < 0.001);

        let texts: Vec<_> = scene.texts().collect();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].text, "hello");
        assert!((texts[0].cell.y - 31.0).abs() < 0.001);

        assert_eq!(scene.lines().count(), 4);
        assert!(scene.lines().all(|l| l.style == BorderStyle::Dotted));
    }

    #[test]
    fn test_empty_root_paints_only_its_own_box() {
        let mut scene = scene(100.0, 100.0);
        let root = FlexBox::row(Vec::new()).with_background_color(Color::WHITE);

        draw_page(&root, &mut scene, Size::new(100.0, 100.0)).unwrap();
        let rects: Vec<_> = scene.rects().collect();
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].rect, Rect::new(0.0, 0.0, 100.0, 100.0));
    }
}
