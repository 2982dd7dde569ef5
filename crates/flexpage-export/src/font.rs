//! Fonts available to PDF pages.
//!
//! Two kinds are supported: the standard Helvetica face, which every PDF
//! reader provides and which is measured from its published metrics, and
//! TrueType files embedded whole as CID-keyed fonts.

use indexmap::IndexMap;
use ttf_parser::{Face, GlyphId};

use flexpage_core::RenderError;

/// Family name of the built-in font.
pub const HELVETICA: &str = "Helvetica";

/// Glyph units per em for the built-in font metrics.
const HELVETICA_UNITS: f64 = 1000.0;
const HELVETICA_ASCENT: f64 = 718.0;
const HELVETICA_DESCENT: f64 = -207.0;

/// Advance of printable ASCII in Helvetica, starting at the space.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Advance of the Latin-1 half of WinAnsi in Helvetica, starting at the
/// no-break space.
#[rustfmt::skip]
const HELVETICA_LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// WinAnsi code for `ch`. Characters without a code are written as `?`.
fn winansi_code(ch: char) -> u8 {
    match u32::from(ch) {
        code @ (0x20..=0x7e | 0xa0..=0xff) => code as u8,
        _ => b'?',
    }
}

fn helvetica_advance(ch: char) -> u16 {
    match winansi_code(ch) {
        code @ 0xa0..=0xff => HELVETICA_LATIN1_WIDTHS[usize::from(code - 0xa0)],
        code => HELVETICA_WIDTHS[usize::from(code.saturating_sub(0x20))],
    }
}

/// A TrueType font program with the metrics needed for layout and
/// embedding.
#[derive(Debug, Clone)]
pub struct TrueTypeFont {
    pub(crate) data: Vec<u8>,
    pub(crate) units_per_em: f64,
    pub(crate) ascent: f64,
    pub(crate) descent: f64,
    pub(crate) cap_height: f64,
    pub(crate) bbox: [f64; 4],
    /// Advance of every glyph, indexed by glyph id
    pub(crate) advances: Vec<u16>,
    pub(crate) glyphs: IndexMap<char, u16>,
}

impl TrueTypeFont {
    pub fn parse(family: &str, data: Vec<u8>) -> Result<Self, RenderError> {
        let face = Face::parse(&data, 0).map_err(|e| RenderError::InvalidFont {
            family: family.to_string(),
            reason: e.to_string(),
        })?;

        let advances = (0..face.number_of_glyphs())
            .map(|id| face.glyph_hor_advance(GlyphId(id)).unwrap_or(0))
            .collect();

        let mut glyphs = IndexMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables.into_iter().filter(|s| s.is_unicode()) {
                subtable.codepoints(|code| {
                    let glyph = char::from_u32(code).zip(subtable.glyph_index(code));
                    if let Some((ch, GlyphId(id))) = glyph {
                        glyphs.entry(ch).or_insert(id);
                    }
                });
            }
        }

        let bbox = face.global_bounding_box();
        let ascent = f64::from(face.ascender());
        Ok(Self {
            units_per_em: f64::from(face.units_per_em()),
            ascent,
            descent: f64::from(face.descender()),
            cap_height: face.capital_height().map_or(ascent, f64::from),
            bbox: [
                f64::from(bbox.x_min),
                f64::from(bbox.y_min),
                f64::from(bbox.x_max),
                f64::from(bbox.y_max),
            ],
            advances,
            glyphs,
            data,
        })
    }

    /// Glyph for `ch`, falling back to `.notdef`.
    fn glyph(&self, ch: char) -> u16 {
        self.glyphs.get(&ch).copied().unwrap_or(0)
    }

    fn advance(&self, ch: char) -> f64 {
        let glyph = usize::from(self.glyph(ch));
        f64::from(self.advances.get(glyph).copied().unwrap_or(0))
    }

    /// Glyphs paired with the first character mapped to them, for the
    /// font's `/ToUnicode` map. `.notdef` is left out.
    pub(crate) fn unicode_pairs(&self) -> Vec<(u16, char)> {
        let mut seen = IndexMap::new();
        for (&ch, &glyph) in &self.glyphs {
            if glyph != 0 {
                seen.entry(glyph).or_insert(ch);
            }
        }
        seen.into_iter().collect()
    }

    /// Advance of a glyph in thousandths of an em, as PDF widths expect.
    pub(crate) fn pdf_width(&self, advance: u16) -> f32 {
        (f64::from(advance) * 1000.0 / self.units_per_em) as f32
    }

    /// Scale a font-unit value to thousandths of an em.
    pub(crate) fn to_pdf_units(&self, value: f64) -> f32 {
        (value * 1000.0 / self.units_per_em) as f32
    }
}

/// The program behind a registered family.
#[derive(Debug, Clone)]
pub enum FontProgram {
    Helvetica,
    TrueType(Box<TrueTypeFont>),
}

/// A family registered with a document, with its page resource name.
#[derive(Debug, Clone)]
pub struct PdfFont {
    pub(crate) resource: String,
    pub(crate) program: FontProgram,
}

impl PdfFont {
    pub(crate) fn new(resource: String, program: FontProgram) -> Self {
        Self { resource, program }
    }

    /// Width of `text` at `size` points.
    pub fn measure(&self, text: &str, size: f64) -> f64 {
        match &self.program {
            FontProgram::Helvetica => {
                let units: f64 = text.chars().map(|ch| f64::from(helvetica_advance(ch))).sum();
                units * size / HELVETICA_UNITS
            }
            FontProgram::TrueType(font) => {
                let units: f64 = text.chars().map(|ch| font.advance(ch)).sum();
                units * size / font.units_per_em
            }
        }
    }

    /// Distance from the top of a `size` point em box to the baseline,
    /// with ascent and descent scaled to fill the box.
    pub fn baseline(&self, size: f64) -> f64 {
        let (ascent, descent) = match &self.program {
            FontProgram::Helvetica => (HELVETICA_ASCENT, HELVETICA_DESCENT),
            FontProgram::TrueType(font) => (font.ascent, font.descent),
        };
        let extent = ascent - descent;
        if extent <= 0.0 {
            return size;
        }
        size * ascent / extent
    }

    /// Encode `text` as a PDF string for this font.
    ///
    /// Helvetica uses single-byte WinAnsi codes; characters it cannot
    /// encode become `?` and are measured as such. TrueType fonts use
    /// big-endian glyph ids.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match &self.program {
            FontProgram::Helvetica => text
                .chars()
                .map(winansi_code)
                .collect(),
            FontProgram::TrueType(font) => text
                .chars()
                .flat_map(|ch| font.glyph(ch).to_be_bytes())
                .collect(),
        }
    }
}
