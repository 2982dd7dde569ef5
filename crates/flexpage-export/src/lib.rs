//! Output formats for flexpage layouts.
//!
//! Supported formats:
//! - PDF (multi-page, built-in Helvetica plus embedded TrueType fonts)
//! - SVG (serialized from a recorded [`Scene`](flexpage_render::Scene))

#[cfg(feature = "pdf")]
mod font;

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "svg")]
pub mod svg;

#[cfg(feature = "pdf")]
use flexpage_core::FlexpageError;
#[cfg(feature = "pdf")]
use flexpage_layout::FlexItem;

#[cfg(feature = "pdf")]
pub use font::{FontProgram, PdfFont, TrueTypeFont, HELVETICA};
#[cfg(feature = "pdf")]
pub use pdf::{PageSize, PdfDocument, PdfOptions, PdfRenderer};

/// Lay out `root` on a single page of the given size and return PDF bytes.
#[cfg(feature = "pdf")]
pub fn render(
    root: &dyn FlexItem,
    page_width: f64,
    page_height: f64,
) -> Result<Vec<u8>, FlexpageError> {
    let options = PdfOptions {
        width: page_width,
        height: page_height,
        ..Default::default()
    };
    pdf::export(root, &options)
}

/// Lay out `root` on a single page described by `options`.
#[cfg(feature = "pdf")]
pub fn render_with_options(
    root: &dyn FlexItem,
    options: &PdfOptions,
) -> Result<Vec<u8>, FlexpageError> {
    pdf::export(root, options)
}

/// Serialize a recorded scene to SVG.
#[cfg(feature = "svg")]
pub fn export_svg(scene: &flexpage_render::Scene) -> String {
    svg::export(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexpage_core::{Border, BorderStyle, Color};
    use flexpage_layout::{FlexBox, JustifyContent, Run, Text, TextAlign};

    fn swatch(hex: &str) -> Box<dyn FlexItem> {
        FlexBox::row(Vec::new())
            .with_size(20.0, 20.0)
            .with_background_color(Color::from_hex(hex).unwrap())
            .boxed()
    }

    #[test]
    #[cfg(feature = "pdf")]
    fn test_render_page() {
        let root = FlexBox::column(vec![
            Text::new(vec![
                Run::new("normal "),
                Run::new("large\n").with_font_size(30.0),
                Run::new("red").with_color(Color::from_hex("#FF0000").unwrap()),
            ])
            .with_align(TextAlign::Center)
            .boxed(),
            FlexBox::row(vec![swatch("#FFCCCC"), swatch("#CCFFCC"), swatch("#CCCCFF")])
                .with_justify_content(JustifyContent::SpaceBetween)
                .with_border(Border::uniformed(Color::BLACK, BorderStyle::Dashed, 1.0))
                .with_flex_grow(1.0)
                .boxed(),
        ])
        .with_padding(20.0);

        let bytes = render(&root, 400.0, 300.0).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    #[cfg(feature = "pdf")]
    fn test_render_with_options_writes_title() {
        let root = FlexBox::row(Vec::new());
        let options = PdfOptions {
            title: Some("Empty".into()),
            ..Default::default()
        };
        let bytes = render_with_options(&root, &options).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/MediaBox"));
        assert!(text.contains("Empty"));
    }

    #[test]
    #[cfg(feature = "svg")]
    fn test_export_svg() {
        let scene = flexpage_render::Scene::new(10.0, 10.0);
        assert!(export_svg(&scene).contains("<svg"));
    }
}
