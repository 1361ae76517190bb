//! Fixed-page layout: turns the content plan into pages of positioned
//! blocks. Coordinates are top-down (y grows toward the page bottom); the
//! assembler flips them into PDF user space.

use crate::fonts::FontWeight;
use crate::layout::{Column, DocumentPlan, Header, Item, Section, SectionKind};
use crate::metrics::{Alignment, PARAGRAPH_SPACING, TextBlock, TextMetrics, TextStyle};
use crate::theme::{ResolvedTheme, Rgb};

pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;
pub const MARGIN: f32 = 50.0;
pub(crate) const PAGE_BOTTOM: f32 = PAGE_HEIGHT - MARGIN;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const COLUMN_GAP: f32 = 30.0;
const MAIN_SHARE: f32 = 0.62;

const ACCENT_HEIGHT: f32 = 8.0;
const OBLIQUE_SKEW: f32 = 0.2126; // tan(12°)

const NAME: TextStyle = TextStyle::bold(36.0).with_char_spacing(1.0);
const CONTACT: TextStyle = TextStyle::regular(11.0);
const LINK: TextStyle = TextStyle::bold(11.0);
const SECTION_TITLE: TextStyle = TextStyle::bold(14.0).with_char_spacing(1.0);
const SUMMARY: TextStyle = TextStyle::regular(11.0).with_line_gap(3.0);
const ROLE: TextStyle = TextStyle::bold(13.0);
const DURATION: TextStyle = TextStyle::bold(8.5);
const COMPANY: TextStyle = TextStyle::bold(11.0);
const DESCRIPTION: TextStyle = TextStyle::regular(10.5).with_line_gap(3.0);
const DEGREE: TextStyle = TextStyle::bold(11.0);
const INSTITUTION: TextStyle = TextStyle::regular(10.0);
const YEAR: TextStyle = TextStyle::bold(9.0);
const SKILL: TextStyle = TextStyle::bold(9.0);

const PILL_MIN_WIDTH: f32 = 100.0;
const PILL_HEIGHT: f32 = 18.0;
/// Horizontal room between the pill edge and its text.
const PILL_INSET: f32 = 6.0;
const ROLE_ROW_MIN: f32 = 22.0;
const COMPANY_ROW_MIN: f32 = 22.0;
const CHIP_MIN_HEIGHT: f32 = 20.0;
const TIMELINE_OFFSET: f32 = 12.0;
const BULLET_RADIUS: f32 = 5.0;
/// Remaining column space below which the cursor is flagged as near the
/// page bottom. No section title plus its first block fits in less.
const NEAR_BOTTOM: f32 = 40.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Shape {
    Rect,
    RoundedRect { radius: f32 },
    Ellipse,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TextRun {
    pub(crate) x: f32,
    pub(crate) baseline: f32,
    pub(crate) text: String,
    pub(crate) weight: FontWeight,
    pub(crate) size: f32,
    pub(crate) color: Rgb,
    pub(crate) char_spacing: f32,
    pub(crate) word_spacing: f32,
    pub(crate) oblique: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DrawOp {
    Fill {
        shape: Shape,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    Stroke {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Rgb,
    },
    Text(TextRun),
    Link {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        uri: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BlockKind {
    PageBackground,
    Header,
    SectionTitle(SectionKind),
    Summary,
    ExperienceHeader,
    Description,
    Connector,
    Education,
    Skill,
}

/// One positioned visual unit with its measured height.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LayoutBlock {
    pub(crate) kind: BlockKind,
    pub(crate) column: Option<Column>,
    pub(crate) top: f32,
    pub(crate) height: f32,
    pub(crate) ops: Vec<DrawOp>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Page {
    pub(crate) blocks: Vec<LayoutBlock>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FixedLayout {
    pub(crate) pages: Vec<Page>,
}

/// Where a column cursor stands. The state decides how a section opens and
/// whether a block that does not fit may break the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FlowState {
    /// The title of `title` is pending and goes down with the next block.
    /// `fresh` is set when nothing has been placed on this page yet.
    AtSectionStart { title: SectionKind, fresh: bool },
    InSection,
    NearPageBottom,
    /// Top of a continuation page, nothing placed yet.
    NewPage,
}

#[derive(Clone, Copy, Debug)]
struct ColumnCursor {
    x: f32,
    width: f32,
    page: usize,
    y: f32,
    state: FlowState,
}

impl ColumnCursor {
    /// Breaking the page would not gain any room.
    fn at_page_top(&self) -> bool {
        matches!(
            self.state,
            FlowState::NewPage | FlowState::AtSectionStart { fresh: true, .. }
        )
    }

    fn settle(&mut self) {
        self.state = if PAGE_BOTTOM - self.y < NEAR_BOTTOM {
            FlowState::NearPageBottom
        } else {
            FlowState::InSection
        };
    }
}

/// Two independent column cursors streaming top-down over a shared list of
/// pages. A column that runs out of room moves to the next page on its own;
/// the other column keeps its position.
pub(crate) struct PaginatedFlow<'a> {
    metrics: TextMetrics<'a>,
    theme: &'a ResolvedTheme,
    pages: Vec<Page>,
    main: ColumnCursor,
    side: ColumnCursor,
    last_bullet: Option<(usize, f32)>,
}

impl<'a> PaginatedFlow<'a> {
    fn new(metrics: TextMetrics<'a>, theme: &'a ResolvedTheme) -> PaginatedFlow<'a> {
        let main_width = CONTENT_WIDTH * MAIN_SHARE;
        let cursor = |x, width| ColumnCursor {
            x,
            width,
            page: 0,
            y: MARGIN,
            // Columns open below the header, so page 1 is never fresh.
            state: FlowState::InSection,
        };
        let mut flow = PaginatedFlow {
            metrics,
            theme,
            pages: Vec::new(),
            main: cursor(MARGIN, main_width),
            side: cursor(
                MARGIN + main_width + COLUMN_GAP,
                CONTENT_WIDTH * (1.0 - MAIN_SHARE) - COLUMN_GAP,
            ),
            last_bullet: None,
        };
        flow.open_page();
        flow
    }

    /// Lay out a whole document.
    pub(crate) fn run(
        plan: &DocumentPlan<'_>,
        metrics: TextMetrics<'a>,
        theme: &'a ResolvedTheme,
    ) -> FixedLayout {
        let mut flow = PaginatedFlow::new(metrics, theme);
        let columns_top = flow.header(&plan.header);
        flow.main.y = columns_top;
        flow.side.y = columns_top;

        for column in [Column::Main, Column::Side] {
            for (i, section) in plan.column(column).enumerate() {
                flow.section(column, section, i == 0);
            }
        }

        log::debug!(
            "Fixed layout: {} page(s), main ends on page {}, side ends on page {}",
            flow.pages.len(),
            flow.main.page + 1,
            flow.side.page + 1
        );
        FixedLayout { pages: flow.pages }
    }

    fn cursor(&self, column: Column) -> &ColumnCursor {
        match column {
            Column::Main => &self.main,
            Column::Side => &self.side,
        }
    }

    fn cursor_mut(&mut self, column: Column) -> &mut ColumnCursor {
        match column {
            Column::Main => &mut self.main,
            Column::Side => &mut self.side,
        }
    }

    fn open_page(&mut self) {
        let mut page = Page::default();
        if self.theme.dark {
            page.blocks.push(LayoutBlock {
                kind: BlockKind::PageBackground,
                column: None,
                top: 0.0,
                height: PAGE_HEIGHT,
                ops: vec![fill_rect(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT, self.theme.background)],
            });
        }
        self.pages.push(page);
    }

    fn break_page(&mut self, column: Column) {
        let cursor = self.cursor_mut(column);
        cursor.page += 1;
        cursor.y = MARGIN;
        cursor.state = FlowState::NewPage;
        let page = cursor.page;
        while self.pages.len() <= page {
            self.open_page();
        }
        log::debug!("{column:?} column continues on page {}", page + 1);
    }

    /// Make room for a block of `height` in `column`, breaking to a new page
    /// when the column budget is exhausted. A pending section title is
    /// reserved together with the block and placed first, so a title never
    /// sits alone at the bottom of a page. A block taller than an empty page
    /// is placed anyway rather than looping.
    fn ensure(&mut self, column: Column, height: f32) {
        let cursor = *self.cursor(column);
        let pending = match cursor.state {
            FlowState::AtSectionStart { title, .. } => Some(title),
            _ => None,
        };
        let needed = height + pending.map_or(0.0, Self::title_height);
        if cursor.y + needed > PAGE_BOTTOM {
            if cursor.at_page_top() {
                log::warn!("{column:?} block of {needed:.1}pt exceeds an empty page");
            } else {
                self.break_page(column);
            }
        }
        if let Some(kind) = pending {
            self.section_title(column, kind);
        }
    }

    fn place(&mut self, column: Column, kind: BlockKind, height: f32, ops: Vec<DrawOp>) {
        let cursor = self.cursor_mut(column);
        let top = cursor.y;
        let page = cursor.page;
        cursor.y += height;
        cursor.settle();
        self.pages[page].blocks.push(LayoutBlock {
            kind,
            column: Some(column),
            top,
            height,
            ops,
        });
    }

    fn advance(&mut self, column: Column, dy: f32) {
        let cursor = self.cursor_mut(column);
        cursor.y += dy;
        if matches!(cursor.state, FlowState::InSection | FlowState::NearPageBottom) {
            cursor.settle();
        }
    }

    fn measure(
        &self,
        text: &str,
        style: &TextStyle,
        width: f32,
        alignment: Alignment,
    ) -> TextBlock {
        self.metrics.measure(text, style, width, alignment)
    }

    fn text_ops(
        &self,
        block: &TextBlock,
        lines: std::ops::Range<usize>,
        x: f32,
        top: f32,
        width: f32,
        style: &TextStyle,
        color: Rgb,
    ) -> Vec<DrawOp> {
        let ascent = self.metrics.ascent(style);
        let first = lines.start;
        lines
            .map(|i| {
                DrawOp::Text(TextRun {
                    x: x + block.line_offset(i, width),
                    baseline: top + (i - first) as f32 * block.line_height + ascent,
                    text: block.lines[i].text.clone(),
                    weight: style.weight,
                    size: style.size,
                    color,
                    char_spacing: style.char_spacing,
                    word_spacing: block.word_spacing(i, width),
                    oblique: false,
                })
            })
            .collect()
    }

    /// Every line of `block`.
    fn block_ops(
        &self,
        block: &TextBlock,
        x: f32,
        top: f32,
        width: f32,
        style: &TextStyle,
        color: Rgb,
    ) -> Vec<DrawOp> {
        self.text_ops(block, 0..block.lines.len(), x, top, width, style, color)
    }

    /// Name, contact line, link and divider. Returns where the columns start.
    fn header(&mut self, header: &Header<'_>) -> f32 {
        let theme = self.theme;
        let mut ops = vec![fill_rect(0.0, 0.0, PAGE_WIDTH, ACCENT_HEIGHT, theme.primary)];
        let mut y = MARGIN;

        let name = self.measure(&header.name, &NAME, CONTENT_WIDTH, Alignment::Center);
        ops.extend(self.block_ops(&name, MARGIN, y, CONTENT_WIDTH, &NAME, theme.heading));
        y += (name.block_height + 4.0).max(45.0);

        let contact_line = header.contact_line("   |   ");
        let contact = self.measure(&contact_line, &CONTACT, CONTENT_WIDTH, Alignment::Center);
        ops.extend(self.block_ops(&contact, MARGIN, y, CONTENT_WIDTH, &CONTACT, theme.muted));
        y += (contact.block_height + 4.0).max(18.0);

        if let Some(uri) = header.linkedin {
            let link = self.measure("Click here", &LINK, CONTENT_WIDTH, Alignment::Center);
            ops.extend(self.block_ops(&link, MARGIN, y, CONTENT_WIDTH, &LINK, theme.link));
            if let Some(line) = link.lines.first() {
                let x = MARGIN + link.line_offset(0, CONTENT_WIDTH);
                let underline_y = y + self.metrics.ascent(&LINK) + 1.5;
                ops.push(DrawOp::Stroke {
                    from: (x, underline_y),
                    to: (x + line.width, underline_y),
                    width: 0.75,
                    color: theme.link,
                });
                ops.push(DrawOp::Link {
                    x,
                    y,
                    width: line.width,
                    height: link.block_height,
                    uri: uri.to_string(),
                });
            }
        }
        y += 35.0;

        ops.push(DrawOp::Stroke {
            from: (MARGIN, y),
            to: (PAGE_WIDTH - MARGIN, y),
            width: 0.5,
            color: theme.divider,
        });
        y += 40.0;

        self.pages[0].blocks.push(LayoutBlock {
            kind: BlockKind::Header,
            column: None,
            top: 0.0,
            height: y,
            ops,
        });
        y
    }

    fn title_height(kind: SectionKind) -> f32 {
        match kind {
            SectionKind::Experience => 40.0,
            _ => 35.0,
        }
    }

    /// Leave the cursor at the start of a section with its title pending.
    fn open_section(&mut self, column: Column, kind: SectionKind, first_in_column: bool) {
        if self.cursor(column).state == FlowState::NearPageBottom {
            self.break_page(column);
        }
        let fresh = self.cursor(column).state == FlowState::NewPage;
        if kind == SectionKind::Expertise && !first_in_column && !fresh {
            self.advance(column, 15.0);
        }
        self.cursor_mut(column).state = FlowState::AtSectionStart { title: kind, fresh };
    }

    fn section(&mut self, column: Column, section: &Section<'_>, first_in_column: bool) {
        self.open_section(column, section.kind, first_in_column);
        if section.kind == SectionKind::Experience {
            self.last_bullet = None;
        }
        for item in &section.items {
            match item {
                Item::Summary { paragraphs } => self.summary(column, paragraphs),
                Item::Experience {
                    role,
                    company,
                    duration,
                    paragraphs,
                } => self.experience(column, role, company, duration, paragraphs),
                Item::Education {
                    degree,
                    institution,
                    year,
                } => self.education(column, degree, institution, year),
                Item::Skill { label } => self.skill(column, label),
            }
        }
    }

    fn section_title(&mut self, column: Column, kind: SectionKind) {
        let theme = self.theme;
        let ColumnCursor { x, width, y, .. } = *self.cursor(column);
        let mut ops = Vec::new();
        let text_x = if kind.has_accent() {
            ops.push(fill_rect(x, y, 5.0, 20.0, theme.primary));
            x + 15.0
        } else {
            x
        };
        let top = if kind.has_accent() { y + 3.0 } else { y };
        let title = self.measure(kind.title(), &SECTION_TITLE, f32::INFINITY, Alignment::Left);
        ops.extend(self.block_ops(&title, text_x, top, width, &SECTION_TITLE, theme.heading));
        self.place(column, BlockKind::SectionTitle(kind), Self::title_height(kind), ops);
    }

    fn first_description_line(&self, width: f32, paragraphs: &[String]) -> f32 {
        paragraphs.first().map_or(0.0, |p| {
            self.measure(p, &DESCRIPTION, width, Alignment::Justify)
                .range_height(0, 1)
        })
    }

    /// Place paragraph lines, splitting at line boundaries when the column
    /// budget runs out mid-paragraph.
    fn flow_lines(
        &mut self,
        column: Column,
        kind: BlockKind,
        block: &TextBlock,
        style: &TextStyle,
        color: Rgb,
        oblique: bool,
    ) {
        let mut start = 0;
        while start < block.lines.len() {
            let cursor = *self.cursor(column);
            // Slack absorbs rounding between reserving and placing.
            let available = PAGE_BOTTOM - cursor.y + 0.01;
            let fit = (start + 1..=block.lines.len())
                .take_while(|&end| block.range_height(start, end) <= available)
                .last();
            let end = match fit {
                Some(end) => end,
                None if cursor.at_page_top() => start + 1,
                None => {
                    self.break_page(column);
                    continue;
                }
            };
            let mut ops = self.text_ops(
                block,
                start..end,
                cursor.x,
                cursor.y,
                cursor.width,
                style,
                color,
            );
            if oblique {
                for op in &mut ops {
                    if let DrawOp::Text(run) = op {
                        run.oblique = true;
                    }
                }
            }
            self.place(column, kind, block.range_height(start, end), ops);
            start = end;
            if start < block.lines.len() {
                self.break_page(column);
            }
        }
    }

    fn summary(&mut self, column: Column, paragraphs: &[String]) {
        let width = self.cursor(column).width;
        let last = paragraphs.len().saturating_sub(1);
        for (i, paragraph) in paragraphs.iter().enumerate() {
            let mut text = paragraph.clone();
            if i == 0 {
                text.insert(0, '"');
            }
            if i == last {
                text.push('"');
            }
            let block = self.measure(&text, &SUMMARY, width, Alignment::Justify);
            if i == 0 {
                self.ensure(column, block.range_height(0, 1));
            }
            self.flow_lines(column, BlockKind::Summary, &block, &SUMMARY, self.theme.text, true);
            if i != last {
                self.advance(column, PARAGRAPH_SPACING);
            }
        }
        self.advance(column, 45.0);
    }

    fn experience_header_metrics(
        &self,
        width: f32,
        role: &str,
        company: &str,
        duration: &str,
    ) -> ExperienceHeaderMetrics {
        let duration = duration.trim();
        let pill_width = if duration.is_empty() {
            0.0
        } else {
            (self.metrics.text_width(duration, &DURATION) + 16.0)
                .min(width * 0.45)
                .max(PILL_MIN_WIDTH)
        };
        let role_width = (width - pill_width - 8.0).max(width * 0.5);
        let role = self.measure(role, &ROLE, role_width, Alignment::Left);
        let company = self.measure(company, &COMPANY, width, Alignment::Left);
        // A duration wider than the capped pill wraps; the pill grows down.
        let duration = self.measure(
            duration,
            &DURATION,
            (pill_width - 2.0 * PILL_INSET).max(0.0),
            Alignment::Center,
        );
        let pill_height = (duration.block_height + 8.0).max(PILL_HEIGHT);
        ExperienceHeaderMetrics {
            role_row: role
                .block_height
                .max(ROLE_ROW_MIN)
                .max(pill_height + ROLE_ROW_MIN - PILL_HEIGHT),
            company_row: (company.block_height + 8.0).max(COMPANY_ROW_MIN),
            role_width,
            pill_width,
            pill_height,
            role,
            company,
            duration,
        }
    }

    fn experience(
        &mut self,
        column: Column,
        role: &str,
        company: &str,
        duration: &str,
        paragraphs: &[String],
    ) {
        let theme = self.theme;
        let width = self.cursor(column).width;
        let header = self.experience_header_metrics(width, role, company, duration);

        // Keep the role/company header with the first line of its description.
        self.ensure(column, header.height() + self.first_description_line(width, paragraphs));

        let ColumnCursor { x, y, page, .. } = *self.cursor(column);
        let bullet_x = x - TIMELINE_OFFSET;
        let bullet_y = y + 8.0;

        if let Some((prev_page, prev_y)) = self.last_bullet
            && prev_page == page
        {
            self.pages[page].blocks.push(LayoutBlock {
                kind: BlockKind::Connector,
                column: Some(column),
                top: prev_y,
                height: bullet_y - prev_y,
                ops: vec![DrawOp::Stroke {
                    from: (bullet_x, prev_y + BULLET_RADIUS + 1.0),
                    to: (bullet_x, bullet_y - BULLET_RADIUS - 1.0),
                    width: 1.5,
                    color: theme.divider,
                }],
            });
        }
        self.last_bullet = Some((page, bullet_y));

        let mut ops = vec![DrawOp::Fill {
            shape: Shape::Ellipse,
            x: bullet_x - BULLET_RADIUS,
            y: bullet_y - BULLET_RADIUS,
            width: 2.0 * BULLET_RADIUS,
            height: 2.0 * BULLET_RADIUS,
            color: theme.primary,
        }];
        ops.extend(self.block_ops(
            &header.role,
            x,
            y,
            header.role_width,
            &ROLE,
            theme.body,
        ));
        if header.pill_width > 0.0 {
            let pill_x = x + width - header.pill_width;
            ops.push(DrawOp::Fill {
                shape: Shape::RoundedRect {
                    radius: PILL_HEIGHT / 2.0,
                },
                x: pill_x,
                y,
                width: header.pill_width,
                height: header.pill_height,
                color: theme.pill_fill,
            });
            ops.extend(self.block_ops(
                &header.duration,
                pill_x + PILL_INSET,
                y + (header.pill_height - header.duration.block_height) / 2.0,
                header.pill_width - 2.0 * PILL_INSET,
                &DURATION,
                theme.pill_text,
            ));
        }
        ops.extend(self.block_ops(
            &header.company,
            x,
            y + header.role_row,
            width,
            &COMPANY,
            theme.secondary,
        ));
        self.place(column, BlockKind::ExperienceHeader, header.height(), ops);

        let last = paragraphs.len().saturating_sub(1);
        for (i, paragraph) in paragraphs.iter().enumerate() {
            let block = self.measure(paragraph, &DESCRIPTION, width, Alignment::Justify);
            self.flow_lines(
                column,
                BlockKind::Description,
                &block,
                &DESCRIPTION,
                theme.muted,
                false,
            );
            if i != last {
                self.advance(column, PARAGRAPH_SPACING);
            }
        }
        self.advance(column, 35.0);
    }

    fn education_metrics(
        &self,
        width: f32,
        degree: &str,
        institution: &str,
        year: &str,
    ) -> EducationMetrics {
        let degree = self.measure(degree, &DEGREE, width, Alignment::Left);
        let institution = self.measure(institution, &INSTITUTION, width, Alignment::Left);
        let year = self.measure(year, &YEAR, width, Alignment::Left);
        EducationMetrics {
            degree_row: degree.block_height + 5.0,
            institution_row: (institution.block_height + 3.0).max(15.0),
            year_row: year.block_height.max(YEAR.size),
            degree,
            institution,
            year,
        }
    }

    fn education(&mut self, column: Column, degree: &str, institution: &str, year: &str) {
        let theme = self.theme;
        let width = self.cursor(column).width;
        let m = self.education_metrics(width, degree, institution, year);
        self.ensure(column, m.height());

        let ColumnCursor { x, y, .. } = *self.cursor(column);
        let mut ops = self.block_ops(&m.degree, x, y, width, &DEGREE, theme.body);
        let y = y + m.degree_row;
        ops.extend(self.block_ops(&m.institution, x, y, width, &INSTITUTION, theme.muted));
        let y = y + m.institution_row;
        ops.extend(self.block_ops(&m.year, x, y, width, &YEAR, theme.subtle));
        self.place(column, BlockKind::Education, m.height(), ops);
        self.advance(column, 30.0 - YEAR.size);
    }

    fn chip_metrics(&self, width: f32, label: &str) -> (TextBlock, f32) {
        let text = self.measure(label, &SKILL, width - 20.0, Alignment::Left);
        let height = (text.block_height + 11.0).max(CHIP_MIN_HEIGHT);
        (text, height)
    }

    fn skill(&mut self, column: Column, label: &str) {
        let theme = self.theme;
        let width = self.cursor(column).width;
        let (text, height) = self.chip_metrics(width, label);
        self.ensure(column, height);

        let ColumnCursor { x, y, .. } = *self.cursor(column);
        let mut ops = vec![fill_rect(x, y, width, height, theme.chip_fill)];
        ops.extend(self.block_ops(&text, x + 10.0, y + 6.0, width - 20.0, &SKILL, theme.text));
        self.place(column, BlockKind::Skill, height, ops);
        self.advance(column, 5.0);
    }
}

struct ExperienceHeaderMetrics {
    role_row: f32,
    company_row: f32,
    role_width: f32,
    pill_width: f32,
    pill_height: f32,
    role: TextBlock,
    company: TextBlock,
    duration: TextBlock,
}

impl ExperienceHeaderMetrics {
    fn height(&self) -> f32 {
        self.role_row + self.company_row
    }
}

struct EducationMetrics {
    degree_row: f32,
    institution_row: f32,
    year_row: f32,
    degree: TextBlock,
    institution: TextBlock,
    year: TextBlock,
}

impl EducationMetrics {
    fn height(&self) -> f32 {
        self.degree_row + self.institution_row + self.year_row
    }
}

fn fill_rect(x: f32, y: f32, width: f32, height: f32, color: Rgb) -> DrawOp {
    DrawOp::Fill {
        shape: Shape::Rect,
        x,
        y,
        width,
        height,
        color,
    }
}

pub(crate) fn oblique_skew() -> f32 {
    OBLIQUE_SKEW
}
