mod layout;

use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use crate::error::Error;
use crate::fonts::{FontBook, FontWeight, register_font, to_winansi_bytes};
use crate::layout::DocumentPlan;
use crate::metrics::TextMetrics;
use crate::model::ResumeDocument;
use crate::theme::{ResolvedTheme, Rgb};

use layout::{DrawOp, FixedLayout, PAGE_HEIGHT, PAGE_WIDTH, PaginatedFlow, Shape, TextRun};

/// Bezier control distance for a quarter circle of unit radius.
const KAPPA: f32 = 0.552_284_8;

const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");

struct PageLink {
    rect: Rect,
    uri: String,
}

pub(crate) fn render(
    resume: &ResumeDocument,
    theme: &ResolvedTheme,
    fonts: &FontBook,
) -> Result<Vec<u8>, Error> {
    let plan = DocumentPlan::build(resume);
    let layout = PaginatedFlow::run(&plan, TextMetrics::new(fonts, theme.font), theme);
    write_pdf(&layout, theme, fonts)
}

fn write_pdf(
    layout: &FixedLayout,
    theme: &ResolvedTheme,
    fonts: &FontBook,
) -> Result<Vec<u8>, Error> {
    if layout.pages.is_empty() {
        return Err(Error::Pdf("layout produced no pages".into()));
    }

    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();

    let family = theme.fonts();
    let regular = register_font(
        &mut pdf,
        family.regular,
        fonts.program(theme.font, FontWeight::Regular),
        "F1".into(),
        &mut alloc,
    );
    let bold = register_font(
        &mut pdf,
        family.bold,
        fonts.program(theme.font, FontWeight::Bold),
        "F2".into(),
        &mut alloc,
    );
    let font_pairs = [regular, bold];

    let n = layout.pages.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    let mut page_annot_refs: Vec<Vec<Ref>> = Vec::with_capacity(n);
    for (i, page) in layout.pages.iter().enumerate() {
        let mut content = Content::new();
        let mut links = Vec::new();
        for block in &page.blocks {
            for op in &block.ops {
                draw(&mut content, op, &mut links);
            }
        }
        pdf.stream(content_ids[i], &content.finish());

        let refs = links
            .into_iter()
            .map(|link| {
                let annot_ref = alloc();
                let mut annot = pdf.annotation(annot_ref);
                annot
                    .subtype(AnnotationType::Link)
                    .rect(link.rect)
                    .border(0.0, 0.0, 0.0, None);
                annot
                    .action()
                    .action_type(ActionType::Uri)
                    .uri(Str(link.uri.as_bytes()));
                annot_ref
            })
            .collect();
        page_annot_refs.push(refs);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
            .parent(pages_id)
            .contents(content_ids[i]);
        if !page_annot_refs[i].is_empty() {
            page.annotations(page_annot_refs[i].iter().copied());
        }
        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        for entry in &font_pairs {
            fonts.pair(Name(entry.pdf_name.as_bytes()), entry.font_ref);
        }
    }

    log::info!("Wrote fixed-page document with {n} page(s)");
    Ok(pdf.finish())
}

/// PDF user space has its origin at the bottom-left.
fn flip(y: f32) -> f32 {
    PAGE_HEIGHT - y
}

fn fill_color(content: &mut Content, color: Rgb) {
    let (r, g, b) = color.unit();
    content.set_fill_rgb(r, g, b);
}

fn draw(content: &mut Content, op: &DrawOp, links: &mut Vec<PageLink>) {
    match op {
        DrawOp::Fill {
            shape,
            x,
            y,
            width,
            height,
            color,
        } => {
            content.save_state();
            fill_color(content, *color);
            let bottom = flip(y + height);
            match shape {
                Shape::Rect => {
                    content.rect(*x, bottom, *width, *height);
                }
                Shape::RoundedRect { radius } => {
                    rounded_rect(content, *x, bottom, *width, *height, *radius);
                }
                Shape::Ellipse => {
                    let (rx, ry) = (width / 2.0, height / 2.0);
                    ellipse(content, x + rx, bottom + ry, rx, ry);
                }
            }
            content.fill_nonzero();
            content.restore_state();
        }
        DrawOp::Stroke {
            from,
            to,
            width,
            color,
        } => {
            let (r, g, b) = color.unit();
            content.save_state();
            content.set_stroke_rgb(r, g, b);
            content.set_line_width(*width);
            content.move_to(from.0, flip(from.1));
            content.line_to(to.0, flip(to.1));
            content.stroke();
            content.restore_state();
        }
        DrawOp::Text(run) => draw_text(content, run),
        DrawOp::Link {
            x,
            y,
            width,
            height,
            uri,
        } => links.push(PageLink {
            rect: Rect::new(*x, flip(y + height), x + width, flip(*y)),
            uri: uri.clone(),
        }),
    }
}

fn draw_text(content: &mut Content, run: &TextRun) {
    let bytes = to_winansi_bytes(&run.text);
    if bytes.is_empty() {
        return;
    }
    let font = match run.weight {
        FontWeight::Regular => REGULAR,
        FontWeight::Bold => BOLD,
    };
    let skew = if run.oblique { layout::oblique_skew() } else { 0.0 };

    content.save_state();
    fill_color(content, run.color);
    content.begin_text();
    content.set_font(font, run.size);
    if run.char_spacing != 0.0 {
        content.set_char_spacing(run.char_spacing);
    }
    if run.word_spacing != 0.0 {
        content.set_word_spacing(run.word_spacing);
    }
    content.set_text_matrix([1.0, 0.0, skew, 1.0, run.x, flip(run.baseline)]);
    content.show(Str(&bytes));
    content.end_text();
    content.restore_state();
}

fn rounded_rect(content: &mut Content, x: f32, y: f32, w: f32, h: f32, r: f32) {
    let r = r.min(w / 2.0).min(h / 2.0);
    let k = r * KAPPA;
    let (right, top) = (x + w, y + h);
    content.move_to(x + r, y);
    content.line_to(right - r, y);
    content.cubic_to(right - r + k, y, right, y + r - k, right, y + r);
    content.line_to(right, top - r);
    content.cubic_to(right, top - r + k, right - r + k, top, right - r, top);
    content.line_to(x + r, top);
    content.cubic_to(x + r - k, top, x, top - r + k, x, top - r);
    content.line_to(x, y + r);
    content.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    content.close_path();
}

fn ellipse(content: &mut Content, cx: f32, cy: f32, rx: f32, ry: f32) {
    let (kx, ky) = (rx * KAPPA, ry * KAPPA);
    content.move_to(cx + rx, cy);
    content.cubic_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry);
    content.cubic_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy);
    content.cubic_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry);
    content.cubic_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy);
    content.close_path();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Column;
    use crate::theme::Theme;
    use layout::{BlockKind, LayoutBlock, Page};

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn empty_layout_is_an_error() {
        let theme = Theme::default().resolve();
        let result = write_pdf(&FixedLayout { pages: vec![] }, &theme, &FontBook::builtin());
        assert!(matches!(result, Err(Error::Pdf(_))));
    }

    #[test]
    fn links_become_uri_annotations() {
        let theme = Theme::default().resolve();
        let layout = FixedLayout {
            pages: vec![Page {
                blocks: vec![LayoutBlock {
                    kind: BlockKind::Header,
                    column: None,
                    top: 0.0,
                    height: 100.0,
                    ops: vec![DrawOp::Link {
                        x: 10.0,
                        y: 20.0,
                        width: 50.0,
                        height: 12.0,
                        uri: "https://example.com/in/jane".into(),
                    }],
                }],
            }],
        };
        let bytes = write_pdf(&layout, &theme, &FontBook::builtin()).unwrap();
        assert!(contains(&bytes, b"/Subtype /Link"));
        assert!(contains(&bytes, b"(https://example.com/in/jane)"));
    }

    #[test]
    fn oblique_runs_skew_the_text_matrix() {
        let mut content = Content::new();
        draw_text(
            &mut content,
            &TextRun {
                x: 50.0,
                baseline: 100.0,
                text: "Quote".into(),
                weight: FontWeight::Regular,
                size: 11.0,
                color: Rgb::BLACK,
                char_spacing: 0.0,
                word_spacing: 0.0,
                oblique: true,
            },
        );
        let bytes = content.finish();
        assert!(contains(&bytes, b"Tm"));
        assert!(contains(&bytes, b"0.2126"));
        assert!(contains(&bytes, b"(Quote) Tj"));
    }

    #[test]
    fn unmappable_text_is_skipped() {
        let mut content = Content::new();
        draw_text(
            &mut content,
            &TextRun {
                x: 0.0,
                baseline: 0.0,
                text: "日本".into(),
                weight: FontWeight::Bold,
                size: 9.0,
                color: Rgb::BLACK,
                char_spacing: 0.0,
                word_spacing: 0.0,
                oblique: false,
            },
        );
        assert!(content.finish().is_empty());
    }

    #[test]
    fn renders_both_fonts_on_every_page() {
        let theme = Theme::default().resolve();
        let block = |column| LayoutBlock {
            kind: BlockKind::Skill,
            column: Some(column),
            top: 60.0,
            height: 20.0,
            ops: vec![],
        };
        let layout = FixedLayout {
            pages: vec![
                Page { blocks: vec![block(Column::Main)] },
                Page { blocks: vec![block(Column::Side)] },
            ],
        };
        let bytes = write_pdf(&layout, &theme, &FontBook::builtin()).unwrap();
        assert!(contains(&bytes, b"/Count 2"));
        assert!(contains(&bytes, b"/BaseFont /Helvetica-Bold"));
        assert!(contains(&bytes, b"/F1"));
        assert!(contains(&bytes, b"/F2"));
    }
}
