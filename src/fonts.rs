use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use pdf_writer::{Name, Pdf, Rect, Ref};
use ttf_parser::Face;

use crate::error::MetricsError;
use crate::theme::FontClass;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Advance widths for WinAnsi bytes 32..=255 at 1000 units/em plus the
/// vertical ratios needed to place a baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct FontMetrics {
    pub(crate) widths_1000: Vec<f32>,
    pub(crate) line_h_ratio: f32,
    pub(crate) ascender_ratio: f32,
}

impl FontMetrics {
    /// Width of one character at 1000 units/em. Characters outside WinAnsi
    /// are never drawn, so they measure as zero.
    pub fn char_width_1000(&self, c: char) -> f32 {
        match to_winansi(c) {
            Some(byte) if byte >= 32 => self.widths_1000[(byte - 32) as usize],
            _ => 0.0,
        }
    }
}

pub(crate) struct FontEntry {
    pub(crate) pdf_name: String,
    pub(crate) font_ref: Ref,
}

/// Adobe core-font widths for ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667,
    778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556,
    556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667,
    778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611,
    611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    278, 278, 564, 564, 564, 444, 921,
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722, 556,
    722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
    333, 278, 333, 469, 500, 333,
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500, 500,
    500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
    480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    333, 333, 570, 570, 570, 500, 930,
    722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778, 611,
    778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
    333, 278, 333, 581, 500, 333,
    500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500, 556,
    556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
    394, 220, 394, 520,
];

/// Build the 32..=255 table for a core font. Above ASCII only the
/// punctuation a resume realistically contains gets an exact width; accented
/// Latin-1 letters take the width of an average letter of the same case.
fn core_widths(ascii: &[u16; 95], serif: bool, bold: bool) -> Vec<f32> {
    let (upper, lower) = match (serif, bold) {
        (false, false) => (667.0, 556.0),
        (false, true) => (722.0, 611.0),
        (true, false) => (722.0, 444.0),
        (true, true) => (722.0, 500.0),
    };
    let (single_quote, double_quote) = match (serif, bold) {
        (false, false) => (222.0, 333.0),
        (false, true) => (278.0, 500.0),
        (true, false) => (333.0, 444.0),
        (true, true) => (333.0, 500.0),
    };
    let en_dash = if serif { 500.0 } else { 556.0 };
    (32u8..=255u8)
        .map(|b| match b {
            32..=126 => ascii[(b - 32) as usize] as f32,
            0x85 | 0x97 | 0x89 => 1000.0,
            0x91 | 0x92 | 0x82 | 0x8B | 0x9B => single_quote,
            0x93 | 0x94 | 0x84 => double_quote,
            0x95 => 350.0,
            0x96 => en_dash,
            0xA0 => ascii[0] as f32,
            0xC0..=0xDE => upper,
            0xDF..=0xFF => lower,
            _ => lower,
        })
        .collect()
}

struct CoreMetrics {
    sans: FontMetrics,
    sans_bold: FontMetrics,
    serif: FontMetrics,
    serif_bold: FontMetrics,
}

static CORE_METRICS: OnceLock<CoreMetrics> = OnceLock::new();

fn core_metrics() -> &'static CoreMetrics {
    // Line heights follow the FontBBox height of each AFM.
    CORE_METRICS.get_or_init(|| CoreMetrics {
        sans: FontMetrics {
            widths_1000: core_widths(&HELVETICA, false, false),
            line_h_ratio: 1.156,
            ascender_ratio: 0.718,
        },
        sans_bold: FontMetrics {
            widths_1000: core_widths(&HELVETICA_BOLD, false, true),
            line_h_ratio: 1.19,
            ascender_ratio: 0.718,
        },
        serif: FontMetrics {
            widths_1000: core_widths(&TIMES_ROMAN, true, false),
            line_h_ratio: 1.116,
            ascender_ratio: 0.683,
        },
        serif_bold: FontMetrics {
            widths_1000: core_widths(&TIMES_BOLD, true, true),
            line_h_ratio: 1.153,
            ascender_ratio: 0.683,
        },
    })
}

pub(crate) fn builtin_metrics(class: FontClass, weight: FontWeight) -> &'static FontMetrics {
    let core = core_metrics();
    match (class, weight) {
        (FontClass::Sans, FontWeight::Regular) => &core.sans,
        (FontClass::Sans, FontWeight::Bold) => &core.sans_bold,
        (FontClass::Serif, FontWeight::Regular) => &core.serif,
        (FontClass::Serif, FontWeight::Bold) => &core.serif_bold,
    }
}

/// Windows-1252 (WinAnsi) byte to Unicode char mapping.
/// Bytes 0x80-0x9F are remapped; all others map directly to their Unicode codepoint.
fn winansi_to_char(byte: u8) -> char {
    match byte {
        0x80 => '\u{20AC}',
        0x82 => '\u{201A}',
        0x83 => '\u{0192}',
        0x84 => '\u{201E}',
        0x85 => '\u{2026}',
        0x86 => '\u{2020}',
        0x87 => '\u{2021}',
        0x88 => '\u{02C6}',
        0x89 => '\u{2030}',
        0x8A => '\u{0160}',
        0x8B => '\u{2039}',
        0x8C => '\u{0152}',
        0x8E => '\u{017D}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x98 => '\u{02DC}',
        0x99 => '\u{2122}',
        0x9A => '\u{0161}',
        0x9B => '\u{203A}',
        0x9C => '\u{0153}',
        0x9E => '\u{017E}',
        0x9F => '\u{0178}',
        _ => byte as char,
    }
}

pub(crate) fn to_winansi(c: char) -> Option<u8> {
    match c as u32 {
        0x0000..=0x007F => Some(c as u8),
        0x00A0..=0x00FF => Some(c as u8),
        0x20AC => Some(0x80),
        0x201A => Some(0x82),
        0x0192 => Some(0x83),
        0x201E => Some(0x84),
        0x2026 => Some(0x85),
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02C6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8A),
        0x2039 => Some(0x8B),
        0x0152 => Some(0x8C),
        0x017D => Some(0x8E),
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201C => Some(0x93),
        0x201D => Some(0x94),
        0x2022 => Some(0x95),
        0x2013 => Some(0x96),
        0x2014 => Some(0x97),
        0x02DC => Some(0x98),
        0x2122 => Some(0x99),
        0x0161 => Some(0x9A),
        0x203A => Some(0x9B),
        0x0153 => Some(0x9C),
        0x017E => Some(0x9E),
        0x0178 => Some(0x9F),
        _ => None,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Unmappable characters are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars().filter_map(to_winansi).collect()
}

/// A parsed TrueType/OpenType program supplied by the caller.
pub struct FontProgram {
    data: Vec<u8>,
    face_index: u32,
    ps_name: String,
    metrics: FontMetrics,
    ascent: f32,
    descent: f32,
    cap_height: f32,
    bbox: Rect,
}

impl std::fmt::Debug for FontProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontProgram")
            .field("ps_name", &self.ps_name)
            .field("face_index", &self.face_index)
            .field("bytes", &self.data.len())
            .finish()
    }
}

fn font_family_name(face: &Face) -> Option<String> {
    face.names()
        .into_iter()
        .find(|name| name.name_id == ttf_parser::name_id::FAMILY && name.is_unicode())
        .and_then(|name| name.to_string())
}

impl FontProgram {
    pub fn parse(data: Vec<u8>, face_index: u32) -> Result<FontProgram, MetricsError> {
        let face = Face::parse(&data, face_index).map_err(|e| MetricsError {
            reason: e.to_string(),
        })?;

        let units = face.units_per_em() as f32;
        if units <= 0.0 {
            return Err(MetricsError {
                reason: "zero units per em".into(),
            });
        }
        let ascent = face.ascender() as f32 / units * 1000.0;
        let descent = face.descender() as f32 / units * 1000.0;
        let cap_height = face
            .capital_height()
            .map(|h| h as f32 / units * 1000.0)
            .unwrap_or(700.0);

        let bb = face.global_bounding_box();
        let bbox = Rect::new(
            bb.x_min as f32 / units * 1000.0,
            bb.y_min as f32 / units * 1000.0,
            bb.x_max as f32 / units * 1000.0,
            bb.y_max as f32 / units * 1000.0,
        );

        let widths_1000: Vec<f32> = (32u8..=255u8)
            .map(|byte| {
                face.glyph_index(winansi_to_char(byte))
                    .and_then(|gid| face.glyph_hor_advance(gid))
                    .map(|adv| adv as f32 / units * 1000.0)
                    .unwrap_or(0.0)
            })
            .collect();
        if widths_1000[(b'a' - 32) as usize] == 0.0 {
            return Err(MetricsError {
                reason: "no Latin glyphs".into(),
            });
        }

        let line_gap = face.line_gap() as f32;
        let line_h_ratio = (face.ascender() as f32 - face.descender() as f32 + line_gap) / units;
        let ascender_ratio = face.ascender() as f32 / units;

        let family = font_family_name(&face).unwrap_or_else(|| "Embedded".to_string());
        let mut ps_name: String = family.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        if face.is_bold() {
            ps_name.push_str("-Bold");
        }

        i32::try_from(data.len()).map_err(|_| MetricsError {
            reason: "font program too large".into(),
        })?;

        Ok(FontProgram {
            metrics: FontMetrics {
                widths_1000,
                line_h_ratio,
                ascender_ratio,
            },
            data,
            face_index,
            ps_name,
            ascent,
            descent,
            cap_height,
            bbox,
        })
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }
}

/// Font programs available to a renderer, keyed by theme font class and
/// weight. Slots without a program use the Standard-14 core fonts, which
/// need no embedding. Immutable once built and cheap to clone.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    programs: HashMap<(FontClass, FontWeight), Arc<FontProgram>>,
}

impl FontBook {
    pub fn builtin() -> FontBook {
        FontBook::default()
    }

    /// Install a TrueType/OpenType program. A program that cannot be parsed
    /// is logged and the slot keeps the core font.
    pub fn with_truetype(
        mut self,
        class: FontClass,
        weight: FontWeight,
        data: Vec<u8>,
    ) -> FontBook {
        if let Err(e) = self.try_insert(class, weight, data, 0) {
            log::warn!("{e}; using core metrics for {class:?} {weight:?}");
        }
        self
    }

    pub fn try_insert(
        &mut self,
        class: FontClass,
        weight: FontWeight,
        data: Vec<u8>,
        face_index: u32,
    ) -> Result<(), MetricsError> {
        let program = FontProgram::parse(data, face_index)?;
        log::debug!("Installed {} for {class:?} {weight:?}", program.ps_name);
        self.programs.insert((class, weight), Arc::new(program));
        Ok(())
    }

    pub fn program(&self, class: FontClass, weight: FontWeight) -> Option<&FontProgram> {
        self.programs.get(&(class, weight)).map(Arc::as_ref)
    }

    pub fn metrics(&self, class: FontClass, weight: FontWeight) -> &FontMetrics {
        self.program(class, weight)
            .map(FontProgram::metrics)
            .unwrap_or_else(|| builtin_metrics(class, weight))
    }
}

/// Embed a parsed TrueType program as a simple WinAnsi font.
fn embed_truetype(
    pdf: &mut Pdf,
    font_ref: Ref,
    descriptor_ref: Ref,
    data_ref: Ref,
    program: &FontProgram,
) {
    // Length was range-checked when the program was parsed.
    let data_len = program.data.len() as i32;
    pdf.stream(data_ref, &program.data)
        .pair(Name(b"Length1"), data_len);

    let ps_name = program.ps_name.as_bytes();

    pdf.font_descriptor(descriptor_ref)
        .name(Name(ps_name))
        .flags(pdf_writer::types::FontFlags::NON_SYMBOLIC)
        .bbox(program.bbox)
        .italic_angle(0.0)
        .ascent(program.ascent)
        .descent(program.descent)
        .cap_height(program.cap_height)
        .stem_v(80.0)
        .font_file2(data_ref);

    let mut d = pdf.indirect(font_ref).dict();
    d.pair(Name(b"Type"), Name(b"Font"));
    d.pair(Name(b"Subtype"), Name(b"TrueType"));
    d.pair(Name(b"BaseFont"), Name(ps_name));
    d.pair(Name(b"Encoding"), Name(b"WinAnsiEncoding"));
    d.pair(Name(b"FirstChar"), 32i32);
    d.pair(Name(b"LastChar"), 255i32);
    d.pair(Name(b"FontDescriptor"), descriptor_ref);
    d.insert(Name(b"Widths"))
        .array()
        .items(program.metrics.widths_1000.iter().copied());
}

pub(crate) fn register_font(
    pdf: &mut Pdf,
    base_font: &str,
    program: Option<&FontProgram>,
    pdf_name: String,
    alloc: &mut impl FnMut() -> Ref,
) -> FontEntry {
    let font_ref = alloc();
    match program {
        Some(program) => {
            let descriptor_ref = alloc();
            let data_ref = alloc();
            embed_truetype(pdf, font_ref, descriptor_ref, data_ref, program);
        }
        None => {
            pdf.type1_font(font_ref)
                .base_font(Name(base_font.as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }
    }
    FontEntry { pdf_name, font_ref }
}
