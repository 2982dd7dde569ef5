//! PDF export.
//!
//! This module draws layout trees into PDF pages using pdf-writer. Layout
//! coordinates have their origin at the top-left corner of the page; every
//! paint call flips them into PDF's bottom-left space.

use glam::DVec2;
use indexmap::IndexMap;
use pdf_writer::types::{CidFontType, FontFlags, LineCapStyle, SystemInfo, UnicodeCmap};
use pdf_writer::{Content, Finish, Name, Pdf, Ref, Str, TextStr};

use flexpage_core::{
    BorderStyle, ExportError, FlexpageError, LayoutError, Rect, RenderError, Renderer, Size,
};
use flexpage_layout::{draw_page, FlexItem};

use crate::font::{FontProgram, PdfFont, TrueTypeFont, HELVETICA};

/// Common page sizes in points (1/72 inch).
pub struct PageSize;

impl PageSize {
    pub const A4: Size = Size::new(595.28, 841.89);
    pub const A5: Size = Size::new(419.53, 595.28);
    pub const LETTER: Size = Size::new(612.0, 792.0);
}

/// PDF export options.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfOptions {
    /// Page width in points (1/72 inch)
    pub width: f64,
    /// Page height in points (1/72 inch)
    pub height: f64,
    /// Document title written to the info dictionary
    pub title: Option<String>,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            width: PageSize::A4.width,
            height: PageSize::A4.height,
            title: None,
        }
    }
}

impl PdfOptions {
    pub fn page_size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// A finished page waiting to be written.
struct Page {
    size: Size,
    content: Vec<u8>,
    alphas: Vec<f32>,
}

/// A multi-page PDF under construction.
pub struct PdfDocument {
    options: PdfOptions,
    fonts: IndexMap<String, PdfFont>,
    pages: Vec<Page>,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new(PdfOptions::default())
    }
}

impl PdfDocument {
    /// Create a document with the built-in Helvetica family registered.
    pub fn new(options: PdfOptions) -> Self {
        let mut document = Self {
            options,
            fonts: IndexMap::new(),
            pages: Vec::new(),
        };
        document.insert_font(HELVETICA, FontProgram::Helvetica);
        document
    }

    fn insert_font(&mut self, family: &str, program: FontProgram) {
        // re-registering a family keeps its resource name
        let resource = match self.fonts.get(family) {
            Some(existing) => existing.resource.clone(),
            None => format!("F{}", self.fonts.len() + 1),
        };
        self.fonts
            .insert(family.to_string(), PdfFont::new(resource, program));
    }

    /// Register a TrueType font under `family`.
    pub fn register_font(&mut self, family: &str, data: Vec<u8>) -> Result<(), RenderError> {
        let font = TrueTypeFont::parse(family, data)?;
        tracing::debug!(family, glyphs = font.advances.len(), "registered font");
        self.insert_font(family, FontProgram::TrueType(Box::new(font)));
        Ok(())
    }

    /// Registered font families, in registration order.
    pub fn font_families(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Lay out and draw `root` onto a new page of `size`.
    pub fn add_page(&mut self, root: &dyn FlexItem, size: Size) -> Result<(), LayoutError> {
        let mut renderer = PdfRenderer::new(&self.fonts, size);
        draw_page(root, &mut renderer, size)?;
        let page = renderer.finish();
        self.pages.push(page);
        Ok(())
    }

    /// Write the document.
    pub fn finish(self) -> Result<Vec<u8>, ExportError> {
        if self.pages.is_empty() {
            return Err(ExportError::NoPages);
        }

        let mut pdf = Pdf::new();
        let mut alloc = Ref::new(1);

        let catalog_id = alloc.bump();
        let page_tree_id = alloc.bump();

        pdf.catalog(catalog_id).pages(page_tree_id);

        let font_ids: Vec<Ref> = self
            .fonts
            .values()
            .map(|font| write_font(&mut pdf, &mut alloc, font))
            .collect();

        let page_ids: Vec<Ref> = self.pages.iter().map(|_| alloc.bump()).collect();
        pdf.pages(page_tree_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);

        for (page, &page_id) in self.pages.iter().zip(&page_ids) {
            let content_id = alloc.bump();
            let state_ids: Vec<Ref> = page.alphas.iter().map(|_| alloc.bump()).collect();

            let mut writer = pdf.page(page_id);
            writer.media_box(pdf_writer::Rect::new(
                0.0,
                0.0,
                page.size.width as f32,
                page.size.height as f32,
            ));
            writer.parent(page_tree_id);
            writer.contents(content_id);

            let mut resources = writer.resources();
            let mut fonts = resources.fonts();
            for (font, &font_id) in self.fonts.values().zip(&font_ids) {
                fonts.pair(Name(font.resource.as_bytes()), font_id);
            }
            fonts.finish();

            let mut states = resources.ext_g_states();
            for (index, &state_id) in state_ids.iter().enumerate() {
                let name = alpha_state_name(index);
                states.pair(Name(name.as_bytes()), state_id);
            }
            states.finish();
            resources.finish();
            writer.finish();

            pdf.stream(content_id, &page.content);

            for (&alpha, &state_id) in page.alphas.iter().zip(&state_ids) {
                pdf.ext_graphics(state_id)
                    .non_stroking_alpha(alpha)
                    .stroking_alpha(alpha);
            }
        }

        let info_id = alloc.bump();
        let mut info = pdf.document_info(info_id);
        info.producer(TextStr("flexpage"));
        if let Some(title) = &self.options.title {
            info.title(TextStr(title));
        }
        info.finish();

        tracing::info!(pages = self.pages.len(), fonts = self.fonts.len(), "wrote pdf");
        Ok(pdf.finish())
    }
}

fn alpha_state_name(index: usize) -> String {
    format!("GS{}", index + 1)
}

/// Write the objects for one font and return the reference pages use.
fn write_font(pdf: &mut Pdf, alloc: &mut Ref, font: &PdfFont) -> Ref {
    let font_id = alloc.bump();
    match &font.program {
        FontProgram::Helvetica => {
            pdf.type1_font(font_id)
                .base_font(Name(HELVETICA.as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }
        FontProgram::TrueType(program) => {
            let cid_id = alloc.bump();
            let descriptor_id = alloc.bump();
            let file_id = alloc.bump();
            let cmap_id = alloc.bump();
            let base_font = format!("FlexPage{}", font.resource);
            let base_font = Name(base_font.as_bytes());
            let system_info = SystemInfo {
                registry: Str(b"Adobe"),
                ordering: Str(b"Identity"),
                supplement: 0,
            };

            pdf.type0_font(font_id)
                .base_font(base_font)
                .encoding_predefined(Name(b"Identity-H"))
                .descendant_font(cid_id)
                .to_unicode(cmap_id);

            let mut cid = pdf.cid_font(cid_id);
            cid.subtype(CidFontType::Type2);
            cid.base_font(base_font);
            cid.system_info(system_info);
            cid.font_descriptor(descriptor_id);
            cid.default_width(0.0);
            cid.cid_to_gid_map_predefined(Name(b"Identity"));
            cid.widths().consecutive(
                0,
                program.advances.iter().map(|&advance| program.pdf_width(advance)),
            );
            cid.finish();

            let [x_min, y_min, x_max, y_max] = program.bbox;
            pdf.font_descriptor(descriptor_id)
                .name(base_font)
                .flags(FontFlags::NON_SYMBOLIC)
                .bbox(pdf_writer::Rect::new(
                    program.to_pdf_units(x_min),
                    program.to_pdf_units(y_min),
                    program.to_pdf_units(x_max),
                    program.to_pdf_units(y_max),
                ))
                .italic_angle(0.0)
                .ascent(program.to_pdf_units(program.ascent))
                .descent(program.to_pdf_units(program.descent))
                .cap_height(program.to_pdf_units(program.cap_height))
                .stem_v(80.0)
                .font_file2(file_id);

            pdf.stream(file_id, &program.data)
                .pair(Name(b"Length1"), program.data.len() as i32);

            let mut cmap = UnicodeCmap::new(Name(b"Custom"), system_info);
            for (glyph, ch) in program.unicode_pairs() {
                cmap.pair(glyph, ch);
            }
            pdf.cmap(cmap_id, &cmap.finish());
        }
    }
    font_id
}

#[derive(Debug, Clone, Copy)]
struct CurrentFont<'a> {
    font: &'a PdfFont,
    size: f64,
}

/// [`Renderer`] that writes one PDF page content stream.
pub struct PdfRenderer<'a> {
    fonts: &'a IndexMap<String, PdfFont>,
    size: Size,
    content: Content,
    font: Option<CurrentFont<'a>>,
    alpha: f32,
    alphas: Vec<f32>,
}

impl<'a> PdfRenderer<'a> {
    fn new(fonts: &'a IndexMap<String, PdfFont>, size: Size) -> Self {
        Self {
            fonts,
            size,
            content: Content::new(),
            font: None,
            alpha: 1.0,
            alphas: Vec::new(),
        }
    }

    fn finish(self) -> Page {
        Page {
            size: self.size,
            content: self.content.finish(),
            alphas: self.alphas,
        }
    }

    fn current_font(&self) -> Result<CurrentFont<'a>, RenderError> {
        self.font.ok_or(RenderError::NoFontSelected)
    }

    fn flip(&self, point: DVec2) -> (f32, f32) {
        (point.x as f32, (self.size.height - point.y) as f32)
    }
}

impl Renderer for PdfRenderer<'_> {
    fn set_font(&mut self, family: &str, size: f64) -> Result<(), RenderError> {
        let font = self
            .fonts
            .get(family)
            .ok_or_else(|| RenderError::FontNotFound {
                family: family.to_string(),
            })?;
        self.font = Some(CurrentFont { font, size });
        Ok(())
    }

    fn measure_text_width(&self, text: &str) -> Result<f64, RenderError> {
        let current = self.current_font()?;
        Ok(current.font.measure(text, current.size))
    }

    fn set_fill_color(&mut self, r: f32, g: f32, b: f32) {
        self.content.set_fill_rgb(r, g, b);
    }

    fn set_stroke_color(&mut self, r: f32, g: f32, b: f32) {
        self.content.set_stroke_rgb(r, g, b);
    }

    fn set_alpha(&mut self, alpha: f32) {
        if alpha == self.alpha {
            return;
        }
        self.alpha = alpha;
        let index = match self.alphas.iter().position(|&a| a == alpha) {
            Some(index) => index,
            None => {
                self.alphas.push(alpha);
                self.alphas.len() - 1
            }
        };
        let name = alpha_state_name(index);
        self.content.set_parameters(Name(name.as_bytes()));
    }

    fn fill_rect(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        let y = self.size.height - rect.y - rect.height;
        self.content.rect(
            rect.x as f32,
            y as f32,
            rect.width as f32,
            rect.height as f32,
        );
        self.content.fill_nonzero();
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, style: BorderStyle) {
        let (x1, y1) = self.flip(from);
        let (x2, y2) = self.flip(to);

        self.content.save_state();
        self.content.set_line_width(width as f32);
        if style == BorderStyle::Dotted {
            self.content.set_line_cap(LineCapStyle::RoundCap);
        }
        if let Some(pattern) = style.dash_pattern(width) {
            self.content
                .set_dash_pattern(pattern.iter().map(|&len| len as f32), 0.0);
        }
        self.content.move_to(x1, y1);
        self.content.line_to(x2, y2);
        self.content.stroke();
        self.content.restore_state();
    }

    fn draw_text_cell(&mut self, cell: Rect, text: &str) -> Result<(), RenderError> {
        let current = self.current_font()?;
        // center the em box vertically in the cell
        let top = cell.y + (cell.height - current.size) / 2.0;
        let baseline = top + current.font.baseline(current.size);
        let encoded = current.font.encode(text);

        self.content.begin_text();
        self.content
            .set_font(Name(current.font.resource.as_bytes()), current.size as f32);
        self.content
            .next_line(cell.x as f32, (self.size.height - baseline) as f32);
        self.content.show(Str(&encoded));
        self.content.end_text();
        Ok(())
    }
}

/// Render a layout tree to a single-page PDF.
pub fn export(root: &dyn FlexItem, options: &PdfOptions) -> Result<Vec<u8>, FlexpageError> {
    let mut document = PdfDocument::new(options.clone());
    document.add_page(root, options.page_size())?;
    Ok(document.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexpage_core::{Border, Color};
    use flexpage_layout::{FlexBox, Run, Text};

    fn sample() -> FlexBox {
        FlexBox::column(vec![
            Text::new(vec![Run::new("Hello").with_font_size(24.0)]).boxed(),
            FlexBox::row(Vec::new())
                .with_height(40.0)
                .with_background_color(Color::rgba(1.0, 0.8, 0.8, 0.5))
                .with_border(Border::uniformed(Color::BLACK, BorderStyle::Dashed, 2.0))
                .boxed(),
        ])
        .with_padding(36.0)
    }

    #[test]
    fn test_pdf_options_default() {
        let options = PdfOptions::default();
        assert_eq!(options.page_size(), PageSize::A4);
        assert_eq!(options.title, None);
    }

    #[test]
    fn test_export_starts_with_header() {
        let bytes = export(&sample(), &PdfOptions::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_multiple_pages() {
        let mut document = PdfDocument::new(PdfOptions {
            title: Some("Report".into()),
            ..Default::default()
        });
        document.add_page(&sample(), PageSize::A4).unwrap();
        document.add_page(&sample(), PageSize::LETTER).unwrap();
        assert_eq!(document.page_count(), 2);

        let bytes = document.finish().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 2"));
        assert!(text.contains("/Helvetica"));
    }

    #[test]
    fn test_no_pages() {
        let document = PdfDocument::new(PdfOptions::default());
        assert!(matches!(document.finish(), Err(ExportError::NoPages)));
    }

    #[test]
    fn test_unknown_family() {
        let root = Text::new(vec![Run::new("x").with_font_family("ipaexg")]);
        let err = export(&root, &PdfOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            FlexpageError::Layout(LayoutError::Renderer {
                source: RenderError::FontNotFound { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_register_invalid_font() {
        let mut document = PdfDocument::new(PdfOptions::default());
        let err = document.register_font("broken", b"not a font".to_vec()).unwrap_err();
        assert!(matches!(err, RenderError::InvalidFont { .. }));
        assert_eq!(document.font_families().collect::<Vec<_>>(), vec!["Helvetica"]);
    }

    #[test]
    fn test_truetype_font_has_unicode_map() {
        let font = TrueTypeFont {
            data: vec![0; 16],
            units_per_em: 1000.0,
            ascent: 800.0,
            descent: -200.0,
            cap_height: 700.0,
            bbox: [0.0, -200.0, 1000.0, 800.0],
            advances: vec![0, 500],
            glyphs: [('x', 1)].into_iter().collect(),
        };
        let mut document = PdfDocument::new(PdfOptions::default());
        document.insert_font("Custom", FontProgram::TrueType(Box::new(font)));
        let root = Text::new(vec![Run::new("xx").with_font_family("Custom")]);
        document.add_page(&root, PageSize::A5).unwrap();

        let bytes = document.finish().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/ToUnicode"));
        assert!(text.contains("1 beginbfchar\n<0001> <0078>"));
    }

    #[test]
    fn test_renderer_measures_with_helvetica() {
        let fonts = PdfDocument::new(PdfOptions::default()).fonts;
        let mut renderer = PdfRenderer::new(&fonts, PageSize::A4);
        assert_eq!(
            renderer.measure_text_width("a"),
            Err(RenderError::NoFontSelected)
        );
        renderer.set_font("Helvetica", 10.0).unwrap();
        assert!((renderer.measure_text_width("Hi").unwrap() - 9.44).abs() < 0.001);
    }

    #[test]
    fn test_alpha_states_are_shared() {
        let fonts = IndexMap::new();
        let mut renderer = PdfRenderer::new(&fonts, PageSize::A4);
        renderer.set_alpha(0.5);
        renderer.set_alpha(1.0);
        renderer.set_alpha(0.5);
        let page = renderer.finish();
        assert_eq!(page.alphas, vec![0.5, 1.0]);
    }
}
