//! Property tests for flex distribution and line breaking.

use flexpage_core::{Rect, Size, Spacing};
use flexpage_layout::{FlexBox, FlexItem, JustifyContent, Run, Text, TextLayout};
use flexpage_render::{FixedMetrics, Scene};
use proptest::prelude::*;

fn scene() -> Scene {
    Scene::new(1000.0, 1000.0).with_font("Helvetica", FixedMetrics::new(0.5))
}

fn justify() -> impl Strategy<Value = JustifyContent> {
    prop_oneof![
        Just(JustifyContent::FlexStart),
        Just(JustifyContent::FlexEnd),
        Just(JustifyContent::Center),
        Just(JustifyContent::SpaceBetween),
        Just(JustifyContent::SpaceAround),
    ]
}

fn row(widths: &[(f64, f64)], justify: JustifyContent) -> FlexBox {
    let items = widths
        .iter()
        .map(|&(width, grow)| {
            FlexBox::row(Vec::new())
                .with_size(width, 10.0)
                .with_flex_grow(grow)
                .boxed()
        })
        .collect();
    FlexBox::row(items).with_justify_content(justify)
}

proptest! {
    #[test]
    fn shrink_then_expand_restores_rect(
        x in -100.0f64..100.0,
        y in -100.0f64..100.0,
        width in 0.0f64..500.0,
        height in 0.0f64..500.0,
        edges in prop::array::uniform4(0.0f64..50.0),
    ) {
        let rect = Rect::new(x, y, width, height);
        let spacing = Spacing::new(edges[0], edges[1], edges[2], edges[3]);
        let restored = rect.shrink(&spacing).expand(&spacing);

        prop_assert!((restored.x - rect.x).abs() < 0.001);
        prop_assert!((restored.y - rect.y).abs() < 0.001);
        prop_assert!((restored.width - rect.width).abs() < 0.001);
        prop_assert!((restored.height - rect.height).abs() < 0.001);
    }

    #[test]
    fn grow_fills_the_row(
        children in prop::collection::vec((0.0f64..100.0, 1.0f64..5.0), 1..6),
        justify in justify(),
    ) {
        let mut scene = scene();
        let container = row(&children, justify);
        let rects = container.arrange(&mut scene, Rect::new(0.0, 0.0, 600.0, 50.0)).unwrap();

        let used: f64 = rects.iter().map(|r| r.width).sum();
        prop_assert!((used - 600.0).abs() < 0.001);
        prop_assert!(rects[0].x.abs() < 0.001);
    }

    #[test]
    fn children_stay_in_order_without_overlap(
        children in prop::collection::vec((0.0f64..150.0, 0.0f64..0.5), 0..6),
        justify in justify(),
    ) {
        let mut scene = scene();
        let container = row(&children, justify);
        let rects = container.arrange(&mut scene, Rect::new(0.0, 0.0, 500.0, 50.0)).unwrap();

        prop_assert_eq!(rects.len(), children.len());
        for pair in rects.windows(2) {
            prop_assert!(pair[1].x >= pair[0].right() - 0.001);
        }
        for (rect, &(width, _)) in rects.iter().zip(&children) {
            prop_assert!(rect.width >= width - 0.001);
        }
    }

    #[test]
    fn narrower_text_never_has_fewer_lines(
        text in "[a-z ]{1,60}",
        wide in 20.0f64..300.0,
        narrow_by in 0.0f64..200.0,
    ) {
        let mut scene = scene();
        let layout = TextLayout {
            runs: vec![Run::new(text).with_font_size(10.0)],
            ..Default::default()
        };
        let narrow = (wide - narrow_by).max(1.0);

        let wide_lines = layout.break_lines(&mut scene, wide).unwrap().len();
        let narrow_lines = layout.break_lines(&mut scene, narrow).unwrap().len();
        prop_assert!(narrow_lines >= wide_lines);
    }

    #[test]
    fn lines_fit_unless_single_char(
        text in "[a-z]{1,40}",
        width in 1.0f64..200.0,
    ) {
        let mut scene = scene();
        let layout = TextLayout {
            runs: vec![Run::new(text).with_font_size(10.0)],
            ..Default::default()
        };

        for line in layout.break_lines(&mut scene, width).unwrap() {
            let chars: usize = line.fragments.iter().map(|f| f.text.chars().count()).sum();
            prop_assert!(line.width <= width + 0.001 || chars == 1);
        }
    }

    #[test]
    fn preferred_size_is_repeatable(
        text in "[a-z \n]{0,40}",
        width in 1.0f64..300.0,
    ) {
        let mut scene = scene();
        let item = Text::plain(text).with_padding(2.0);
        let max = Size::new(width, 500.0);

        let first = item.preferred_size(&mut scene, max).unwrap();
        let second = item.preferred_size(&mut scene, max).unwrap();
        prop_assert_eq!(first, second);
    }
}
