//! Text measurement shared by both renderers.
//!
//! Every variable-height element is measured here before it is placed:
//! the fixed-page renderer uses the result for pagination, the flow
//! renderer for deciding whether role and duration fit on one tabbed line.

use crate::fonts::{FontBook, FontMetrics, FontWeight};
use crate::theme::FontClass;

/// Vertical gap inserted between hard-break paragraphs of one field.
pub const PARAGRAPH_SPACING: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub weight: FontWeight,
    pub size: f32,
    /// Extra leading added below every line.
    pub line_gap: f32,
    /// Extra advance after every character (PDF `Tc`).
    pub char_spacing: f32,
}

impl TextStyle {
    pub const fn regular(size: f32) -> TextStyle {
        TextStyle {
            weight: FontWeight::Regular,
            size,
            line_gap: 0.0,
            char_spacing: 0.0,
        }
    }

    pub const fn bold(size: f32) -> TextStyle {
        TextStyle {
            weight: FontWeight::Bold,
            ..TextStyle::regular(size)
        }
    }

    pub const fn with_line_gap(self, line_gap: f32) -> TextStyle {
        TextStyle { line_gap, ..self }
    }

    pub const fn with_char_spacing(self, char_spacing: f32) -> TextStyle {
        TextStyle {
            char_spacing,
            ..self
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Line {
    pub text: String,
    pub width: f32,
    /// Number of inter-word spaces, the stretch points for justification.
    pub spaces: usize,
}

/// Wrapped text within one column.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<Line>,
    pub line_height: f32,
    pub block_height: f32,
    pub alignment: Alignment,
}

impl TextBlock {
    /// Horizontal offset of line `i` inside a column of `width`.
    pub fn line_offset(&self, i: usize, width: f32) -> f32 {
        let line_width = self.lines.get(i).map_or(0.0, |l| l.width);
        match self.alignment {
            Alignment::Center => ((width - line_width) / 2.0).max(0.0),
            Alignment::Right => (width - line_width).max(0.0),
            Alignment::Left | Alignment::Justify => 0.0,
        }
    }

    /// Extra space per inter-word gap (PDF `Tw`) for line `i`. The last line
    /// of a justified block stays ragged.
    pub fn word_spacing(&self, i: usize, width: f32) -> f32 {
        if self.alignment != Alignment::Justify || i + 1 >= self.lines.len() {
            return 0.0;
        }
        let line = &self.lines[i];
        if line.spaces == 0 {
            return 0.0;
        }
        ((width - line.width) / line.spaces as f32).max(0.0)
    }

    /// Height of lines `start..end` as placed on a page. The trailing line
    /// gap is only dropped when the range reaches the last line.
    pub fn range_height(&self, start: usize, end: usize) -> f32 {
        let end = end.min(self.lines.len());
        if start >= end {
            return 0.0;
        }
        let height = (end - start) as f32 * self.line_height;
        if end == self.lines.len() {
            let trailing_gap = self.lines.len() as f32 * self.line_height - self.block_height;
            height - trailing_gap
        } else {
            height
        }
    }
}

/// Split free text on hard line breaks. Blank paragraphs are dropped.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|p| p.trim_end_matches('\r').trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Measures text in the fonts of one theme font class.
#[derive(Clone, Copy, Debug)]
pub struct TextMetrics<'a> {
    fonts: &'a FontBook,
    class: FontClass,
}

impl<'a> TextMetrics<'a> {
    pub fn new(fonts: &'a FontBook, class: FontClass) -> TextMetrics<'a> {
        TextMetrics { fonts, class }
    }

    fn font(&self, weight: FontWeight) -> &'a FontMetrics {
        self.fonts.metrics(self.class, weight)
    }

    pub fn text_width(&self, text: &str, style: &TextStyle) -> f32 {
        let font = self.font(style.weight);
        text.chars()
            .map(|c| font.char_width_1000(c) / 1000.0 * style.size + style.char_spacing)
            .sum()
    }

    /// Distance between consecutive baselines.
    pub fn line_height(&self, style: &TextStyle) -> f32 {
        style.size * self.font(style.weight).line_h_ratio + style.line_gap
    }

    /// Distance from the top of a line box to its baseline.
    pub fn ascent(&self, style: &TextStyle) -> f32 {
        style.size * self.font(style.weight).ascender_ratio
    }

    /// Greedy word wrap. Runs of whitespace collapse to one space; a word
    /// wider than the column is broken between characters.
    pub fn wrap(&self, text: &str, style: &TextStyle, width: f32) -> Vec<Line> {
        let space_w = self.text_width(" ", style);
        let mut lines = Vec::new();
        let mut current = Line::default();

        for word in text.split_whitespace() {
            let word_w = self.text_width(word, style);
            if current.text.is_empty() {
                if word_w <= width {
                    current.text.push_str(word);
                    current.width = word_w;
                } else {
                    self.break_word(word, style, width, &mut lines, &mut current);
                }
                continue;
            }
            if current.width + space_w + word_w <= width {
                current.text.push(' ');
                current.text.push_str(word);
                current.width += space_w + word_w;
                current.spaces += 1;
                continue;
            }
            lines.push(std::mem::take(&mut current));
            if word_w <= width {
                current.text.push_str(word);
                current.width = word_w;
            } else {
                self.break_word(word, style, width, &mut lines, &mut current);
            }
        }
        if !current.text.is_empty() {
            lines.push(current);
        }
        lines
    }

    fn break_word(
        &self,
        word: &str,
        style: &TextStyle,
        width: f32,
        lines: &mut Vec<Line>,
        current: &mut Line,
    ) {
        let font = self.font(style.weight);
        for c in word.chars() {
            let w = font.char_width_1000(c) / 1000.0 * style.size + style.char_spacing;
            if !current.text.is_empty() && current.width + w > width {
                lines.push(std::mem::take(current));
            }
            current.text.push(c);
            current.width += w;
        }
    }

    /// Wrap `text` into `width` and report its height. Empty text measures
    /// to zero lines and zero height.
    pub fn measure(
        &self,
        text: &str,
        style: &TextStyle,
        width: f32,
        alignment: Alignment,
    ) -> TextBlock {
        let lines = self.wrap(text, style, width);
        let line_height = self.line_height(style);
        // The gap below the last line belongs to whatever follows.
        let block_height = if lines.is_empty() {
            0.0
        } else {
            lines.len() as f32 * line_height - style.line_gap
        };
        TextBlock {
            lines,
            line_height,
            block_height,
            alignment,
        }
    }

    /// Measure each paragraph independently; the total adds
    /// [`PARAGRAPH_SPACING`] between consecutive paragraphs.
    pub fn measure_paragraphs(
        &self,
        paragraphs: &[String],
        style: &TextStyle,
        width: f32,
        alignment: Alignment,
    ) -> (Vec<TextBlock>, f32) {
        let blocks: Vec<TextBlock> = paragraphs
            .iter()
            .map(|p| self.measure(p, style, width, alignment))
            .collect();
        let total = blocks.iter().map(|b| b.block_height).sum::<f32>()
            + PARAGRAPH_SPACING * blocks.len().saturating_sub(1) as f32;
        (blocks, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sans(fonts: &FontBook) -> TextMetrics<'_> {
        TextMetrics::new(fonts, FontClass::Sans)
    }

    #[test]
    fn width_scales_with_size_and_spacing() {
        let fonts = FontBook::builtin();
        let m = sans(&fonts);
        let w10 = m.text_width("Hello", &TextStyle::regular(10.0));
        let w20 = m.text_width("Hello", &TextStyle::regular(20.0));
        assert!((w20 - 2.0 * w10).abs() < 1e-3);
        let spaced = m.text_width("Hello", &TextStyle::regular(10.0).with_char_spacing(1.0));
        assert!((spaced - w10 - 5.0).abs() < 1e-3);
        let bold = TextStyle::bold(10.0);
        assert!(m.text_width("W", &bold) > m.text_width("i", &bold));
    }

    #[test]
    fn wrap_respects_column_width() {
        let fonts = FontBook::builtin();
        let m = sans(&fonts);
        let style = TextStyle::regular(10.0);
        let text = "the quick brown fox jumps over the lazy dog ".repeat(6);
        let lines = m.wrap(&text, &style, 120.0);
        assert!(lines.len() > 3);
        for line in &lines {
            assert!(line.width <= 120.0 + 1e-3, "{line:?}");
            assert!(!line.text.starts_with(' ') && !line.text.ends_with(' '));
        }
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.text.split(' ')).collect();
        assert_eq!(rejoined, text.split_whitespace().collect::<Vec<_>>());
    }

    #[test]
    fn overlong_word_breaks_between_characters() {
        let fonts = FontBook::builtin();
        let m = sans(&fonts);
        let lines = m.wrap(&"x".repeat(80), &TextStyle::regular(10.0), 50.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.width <= 50.0 + 1e-3));
        assert_eq!(lines.iter().map(|l| l.text.len()).sum::<usize>(), 80);
    }

    #[test]
    fn empty_text_has_no_height() {
        let fonts = FontBook::builtin();
        let block = sans(&fonts).measure("   ", &TextStyle::regular(10.0), 100.0, Alignment::Left);
        assert!(block.lines.is_empty());
        assert_eq!(block.block_height, 0.0);
    }

    #[test]
    fn hard_breaks_are_measured_as_separate_paragraphs() {
        let fonts = FontBook::builtin();
        let m = sans(&fonts);
        let style = TextStyle::regular(10.5).with_line_gap(3.0);
        let paragraphs = split_paragraphs("Line1\r\nLine2\n\n");
        assert_eq!(paragraphs, vec!["Line1", "Line2"]);

        let (blocks, total) = m.measure_paragraphs(&paragraphs, &style, 300.0, Alignment::Justify);
        assert_eq!(blocks.len(), 2);
        let one = m.measure("Line1", &style, 300.0, Alignment::Justify).block_height;
        assert!((total - (2.0 * one + PARAGRAPH_SPACING)).abs() < 1e-3);

        // Measured as one soft-wrapped block the break would vanish.
        let joined = m.measure("Line1 Line2", &style, 300.0, Alignment::Justify);
        assert_eq!(joined.lines.len(), 1);
        assert!(total > joined.block_height);
    }

    #[test]
    fn justified_lines_stretch_except_the_last() {
        let fonts = FontBook::builtin();
        let m = sans(&fonts);
        let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu";
        let block = m.measure(text, &TextStyle::regular(10.0), 150.0, Alignment::Justify);
        assert!(block.lines.len() >= 2);
        let first = block.word_spacing(0, 150.0);
        assert!(first > 0.0);
        let stretched = block.lines[0].width + first * block.lines[0].spaces as f32;
        assert!((stretched - 150.0).abs() < 1e-2);
        assert_eq!(block.word_spacing(block.lines.len() - 1, 150.0), 0.0);
    }

    #[test]
    fn centered_offset_halves_the_slack() {
        let fonts = FontBook::builtin();
        let m = sans(&fonts);
        let block = m.measure("JANE DOE", &TextStyle::bold(36.0), 495.0, Alignment::Center);
        let offset = block.line_offset(0, 495.0);
        assert!((offset * 2.0 + block.lines[0].width - 495.0).abs() < 1e-3);
    }
}
