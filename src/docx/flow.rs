//! Block tree for the flow document. Pagination is left to the word
//! processor; this module only decides paragraph order, inline runs and the
//! role/duration line breaking that needs measured text.

use crate::layout::{Column, DocumentPlan, Header, Item, Section, SectionKind};
use crate::metrics::{TextMetrics, TextStyle};
use crate::theme::{ResolvedTheme, Rgb};

/// Right tab stop for the duration on an experience line, in twips.
pub(crate) const ROLE_TAB_STOP: u32 = 6000;
/// Gap kept between the end of the role text and the start of the duration.
const ROLE_TAB_GAP_PT: f32 = 12.0;

pub(crate) const MAIN_CELL_WIDTH: u32 = 6500;
pub(crate) const SIDE_CELL_WIDTH: u32 = 3500;
pub(crate) const CELL_PADDING: u32 = 200;
pub(crate) const PAGE_MARGIN: u32 = 720;

const FIRST_HYPERLINK_REL: usize = 3;

const LIGHT_BODY: Rgb = Rgb(0x33, 0x33, 0x33);

// Run sizes in half-points.
const BASE_SIZE: u32 = 20;
const NAME_SIZE: u32 = 44;
const CONTACT_SIZE: u32 = 18;
const SECTION_SIZE: u32 = 22;
const ROLE_SIZE: u32 = 20;
const COMPANY_SIZE: u32 = 18;
const DURATION_SIZE: u32 = 16;
const DEGREE_SIZE: u32 = 18;
const INSTITUTION_SIZE: u32 = 16;
const YEAR_SIZE: u32 = 14;
const SKILL_SIZE: u32 = 16;

fn points(half_points: u32) -> f32 {
    half_points as f32 / 2.0
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct RunProps {
    pub(crate) bold: bool,
    pub(crate) italic: bool,
    pub(crate) underline: bool,
    pub(crate) size: Option<u32>,
    pub(crate) color: Option<Rgb>,
}

impl RunProps {
    fn sized(size: u32) -> RunProps {
        RunProps {
            size: Some(size),
            ..Default::default()
        }
    }

    fn bold(mut self) -> RunProps {
        self.bold = true;
        self
    }

    fn italic(mut self) -> RunProps {
        self.italic = true;
        self
    }

    fn underline(mut self) -> RunProps {
        self.underline = true;
        self
    }

    fn color(mut self, color: Rgb) -> RunProps {
        self.color = Some(color);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Inline {
    Text { text: String, props: RunProps },
    Tab(RunProps),
    Break,
    Hyperlink {
        rel_id: String,
        text: String,
        props: RunProps,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Justification {
    Center,
    Both,
}

impl Justification {
    pub(crate) fn val(self) -> &'static str {
        match self {
            Justification::Center => "center",
            Justification::Both => "both",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Paragraph {
    pub(crate) inlines: Vec<Inline>,
    pub(crate) justification: Option<Justification>,
    pub(crate) spacing_before: u32,
    pub(crate) spacing_after: u32,
    pub(crate) right_tab: Option<u32>,
    pub(crate) left_border: Option<Rgb>,
    pub(crate) shading: Option<Rgb>,
}

impl Paragraph {
    fn with(inlines: Vec<Inline>) -> Paragraph {
        Paragraph {
            inlines,
            ..Default::default()
        }
    }

    fn text(text: impl Into<String>, props: RunProps) -> Paragraph {
        Paragraph::with(vec![Inline::Text {
            text: text.into(),
            props,
        }])
    }

    fn spacing(mut self, before: u32, after: u32) -> Paragraph {
        self.spacing_before = before;
        self.spacing_after = after;
        self
    }

    fn justify(mut self, justification: Justification) -> Paragraph {
        self.justification = Some(justification);
        self
    }

    /// Plain text of the paragraph with tabs and breaks as `\t` and `\n`.
    #[cfg(test)]
    pub(crate) fn plain_text(&self) -> String {
        self.inlines
            .iter()
            .map(|inline| match inline {
                Inline::Text { text, .. } | Inline::Hyperlink { text, .. } => text.as_str(),
                Inline::Tab(_) => "\t",
                Inline::Break => "\n",
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TableCell {
    pub(crate) width: u32,
    pub(crate) margin_left: u32,
    pub(crate) margin_right: u32,
    pub(crate) paragraphs: Vec<Paragraph>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum FlowBlock {
    Paragraph(Paragraph),
    /// One borderless row spanning the text width.
    Table(Vec<TableCell>),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Hyperlink {
    pub(crate) rel_id: String,
    pub(crate) target: String,
}

/// Document-wide run defaults written into the styles part.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BaseStyle {
    pub(crate) font: &'static str,
    pub(crate) size: u32,
    pub(crate) color: Rgb,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FlowDocument {
    pub(crate) base: BaseStyle,
    pub(crate) background: Option<Rgb>,
    pub(crate) body: Vec<FlowBlock>,
    pub(crate) hyperlinks: Vec<Hyperlink>,
}

impl FlowDocument {
    fn add_hyperlink(&mut self, target: &str) -> String {
        let rel_id = format!("rId{}", FIRST_HYPERLINK_REL + self.hyperlinks.len());
        self.hyperlinks.push(Hyperlink {
            rel_id: rel_id.clone(),
            target: target.to_string(),
        });
        rel_id
    }
}

struct FlowBuilder<'a> {
    theme: &'a ResolvedTheme,
    metrics: TextMetrics<'a>,
    body_color: Rgb,
}

/// Build the block tree for `plan`.
pub(crate) fn build(
    plan: &DocumentPlan<'_>,
    theme: &ResolvedTheme,
    metrics: TextMetrics<'_>,
) -> FlowDocument {
    let body_color = if theme.dark { Rgb::WHITE } else { LIGHT_BODY };
    let builder = FlowBuilder {
        theme,
        metrics,
        body_color,
    };
    let mut doc = FlowDocument {
        base: BaseStyle {
            font: theme.font.word_font(),
            size: BASE_SIZE,
            color: body_color,
        },
        background: theme.dark.then_some(theme.background),
        body: Vec::new(),
        hyperlinks: Vec::new(),
    };

    let header = builder.header(&plan.header, &mut doc);
    doc.body.extend(header.into_iter().map(FlowBlock::Paragraph));

    let cells = [
        (Column::Main, MAIN_CELL_WIDTH, 0, CELL_PADDING),
        (Column::Side, SIDE_CELL_WIDTH, CELL_PADDING, 0),
    ]
    .into_iter()
    .map(|(column, width, margin_left, margin_right)| {
        let mut paragraphs = Vec::new();
        for (i, section) in plan.column(column).enumerate() {
            builder.section(section, i == 0, &mut paragraphs);
        }
        // A cell must hold at least one paragraph.
        if paragraphs.is_empty() {
            paragraphs.push(Paragraph::default());
        }
        TableCell {
            width,
            margin_left,
            margin_right,
            paragraphs,
        }
    })
    .collect();
    doc.body.push(FlowBlock::Table(cells));

    log::debug!(
        "Flow document: {} body blocks, {} hyperlink(s)",
        doc.body.len(),
        doc.hyperlinks.len()
    );
    doc
}

impl FlowBuilder<'_> {
    fn header(&self, header: &Header<'_>, doc: &mut FlowDocument) -> Vec<Paragraph> {
        let theme = self.theme;
        let name = Paragraph::text(
            header.name.clone(),
            RunProps::sized(NAME_SIZE).bold().color(theme.secondary),
        )
        .justify(Justification::Center)
        .spacing(200, 100);

        let contact = header.contact_line("  |  ");
        let mut inlines = Vec::new();
        if !contact.is_empty() {
            inlines.push(Inline::Text {
                text: contact,
                props: RunProps::sized(CONTACT_SIZE).color(theme.muted),
            });
        }
        if let Some(target) = header.linkedin {
            if !inlines.is_empty() {
                inlines.push(Inline::Text {
                    text: "  |  ".into(),
                    props: RunProps::sized(CONTACT_SIZE).color(theme.muted),
                });
            }
            inlines.push(Inline::Hyperlink {
                rel_id: doc.add_hyperlink(target),
                text: "LinkedIn".into(),
                props: RunProps::sized(CONTACT_SIZE).underline().color(theme.link),
            });
        }
        let contact = Paragraph::with(inlines)
            .justify(Justification::Center)
            .spacing(0, 400);

        vec![name, contact]
    }

    fn section_header(&self, kind: SectionKind, first_in_column: bool) -> Paragraph {
        let theme = self.theme;
        let before = match kind {
            SectionKind::Expertise if !first_in_column => 400,
            SectionKind::Experience if !first_in_column => 300,
            _ => 200,
        };
        let mut paragraph = Paragraph::text(
            kind.title(),
            RunProps::sized(SECTION_SIZE).bold().color(theme.secondary),
        )
        .spacing(before, 150);
        if kind.has_accent() {
            paragraph.left_border = Some(theme.primary);
        }
        paragraph
    }

    fn section(&self, section: &Section<'_>, first_in_column: bool, out: &mut Vec<Paragraph>) {
        out.push(self.section_header(section.kind, first_in_column));
        for item in &section.items {
            match item {
                Item::Summary { paragraphs } => self.summary(paragraphs, out),
                Item::Experience {
                    role,
                    company,
                    duration,
                    paragraphs,
                } => self.experience(role, company, duration, paragraphs, out),
                Item::Education {
                    degree,
                    institution,
                    year,
                } => self.education(degree, institution, year, out),
                Item::Skill { label } => out.push(self.skill(label)),
            }
        }
    }

    fn summary(&self, paragraphs: &[String], out: &mut Vec<Paragraph>) {
        let last = paragraphs.len().saturating_sub(1);
        for (i, text) in paragraphs.iter().enumerate() {
            let mut text = text.clone();
            if i == 0 {
                text.insert(0, '"');
            }
            if i == last {
                text.push('"');
            }
            let after = if i == last { 300 } else { 80 };
            out.push(
                Paragraph::text(text, RunProps::default().italic())
                    .justify(Justification::Both)
                    .spacing(0, after),
            );
        }
    }

    /// True when `role` cannot end before the duration starts at the tab.
    fn role_needs_break(&self, role: &str, duration: &str) -> bool {
        let duration_w = self
            .metrics
            .text_width(duration, &TextStyle::regular(points(DURATION_SIZE)));
        let max_role = ROLE_TAB_STOP as f32 / 20.0 - duration_w - ROLE_TAB_GAP_PT;
        let role_w = self
            .metrics
            .text_width(role, &TextStyle::bold(points(ROLE_SIZE)));
        role_w > max_role
    }

    fn experience(
        &self,
        role: &str,
        company: &str,
        duration: &str,
        paragraphs: &[String],
        out: &mut Vec<Paragraph>,
    ) {
        let theme = self.theme;
        let duration = duration.trim();
        let mut inlines = vec![Inline::Text {
            text: role.to_string(),
            props: RunProps::sized(ROLE_SIZE).bold().color(self.body_color),
        }];
        if !duration.is_empty() {
            if self.role_needs_break(role, duration) {
                log::debug!("Role {role:?} too wide for one tabbed line, breaking before duration");
                inlines.push(Inline::Break);
            }
            let props = RunProps::sized(DURATION_SIZE).color(theme.muted);
            inlines.push(Inline::Tab(props.clone()));
            inlines.push(Inline::Text {
                text: duration.to_string(),
                props,
            });
        }
        let mut role_line = Paragraph::with(inlines).spacing(150, 0);
        role_line.right_tab = Some(ROLE_TAB_STOP);
        out.push(role_line);

        let entry_gap = 350;
        out.push(
            Paragraph::text(
                company,
                RunProps::sized(COMPANY_SIZE).bold().color(theme.secondary),
            )
            .spacing(0, if paragraphs.is_empty() { entry_gap } else { 100 }),
        );

        let last = paragraphs.len().saturating_sub(1);
        for (i, text) in paragraphs.iter().enumerate() {
            let after = if i == last { entry_gap } else { 80 };
            out.push(
                Paragraph::text(text.as_str(), RunProps::default())
                    .justify(Justification::Both)
                    .spacing(0, after),
            );
        }
    }

    fn education(&self, degree: &str, institution: &str, year: &str, out: &mut Vec<Paragraph>) {
        let theme = self.theme;
        out.push(Paragraph::text(
            degree,
            RunProps::sized(DEGREE_SIZE).bold().color(self.body_color),
        ));
        out.push(Paragraph::text(
            institution,
            RunProps::sized(INSTITUTION_SIZE).color(theme.muted),
        ));
        out.push(
            Paragraph::text(year, RunProps::sized(YEAR_SIZE).bold().color(theme.muted))
                .spacing(0, 200),
        );
    }

    fn skill(&self, label: &str) -> Paragraph {
        let mut chip = Paragraph::text(
            format!("\u{2022} {label}"),
            RunProps::sized(SKILL_SIZE).color(self.theme.text),
        )
        .spacing(40, 40);
        chip.shading = Some(self.theme.chip_fill);
        chip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontBook;
    use crate::model::{ExperienceEntry, ResumeDocument};
    use crate::theme::Theme;

    fn flow(resume: &ResumeDocument, theme: &Theme) -> FlowDocument {
        let fonts = FontBook::builtin();
        let resolved = theme.resolve();
        let plan = DocumentPlan::build(resume);
        build(&plan, &resolved, TextMetrics::new(&fonts, resolved.font))
    }

    fn cells(doc: &FlowDocument) -> &[TableCell] {
        match doc.body.last() {
            Some(FlowBlock::Table(cells)) => cells,
            other => panic!("expected table, got {other:?}"),
        }
    }

    fn experience(role: &str, duration: &str, description: &str) -> ResumeDocument {
        ResumeDocument {
            experience: vec![ExperienceEntry {
                role: role.into(),
                company: "Acme".into(),
                duration: duration.into(),
                description: description.into(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn scenario_a_has_only_expertise() {
        let resume = ResumeDocument {
            name: "Jane Doe".into(),
            skills: vec!["SQL".into(), "Go".into()],
            ..Default::default()
        };
        let doc = flow(&resume, &Theme::default());
        let FlowBlock::Paragraph(name) = &doc.body[0] else {
            panic!("expected name paragraph");
        };
        assert_eq!(name.plain_text(), "JANE DOE");
        assert_eq!(name.justification, Some(Justification::Center));

        let cells = cells(&doc);
        assert_eq!(cells[0].paragraphs, vec![Paragraph::default()]);
        let side: Vec<String> = cells[1].paragraphs.iter().map(Paragraph::plain_text).collect();
        assert_eq!(side, vec!["EXPERTISE", "\u{2022} SQL", "\u{2022} GO"]);
    }

    #[test]
    fn scenario_b_description_splits_into_paragraphs() {
        let doc = flow(&experience("Engineer", "2020-2022", "Line1\nLine2"), &Theme::default());
        let main: Vec<String> = cells(&doc)[0]
            .paragraphs
            .iter()
            .map(Paragraph::plain_text)
            .collect();
        assert_eq!(main, vec!["EXPERIENCE", "Engineer\t2020-2022", "Acme", "Line1", "Line2"]);
    }

    #[test]
    fn long_role_breaks_before_the_tab() {
        let long = "Principal Distinguished Staff Engineer for Platform Reliability";
        let doc = flow(&experience(long, "Jan 2019 - Present", ""), &Theme::default());
        let role_line = &cells(&doc)[0].paragraphs[1];
        assert_eq!(role_line.right_tab, Some(ROLE_TAB_STOP));
        assert_eq!(role_line.plain_text(), format!("{long}\n\tJan 2019 - Present"));

        let doc = flow(&experience("Engineer", "Jan 2019 - Present", ""), &Theme::default());
        assert_eq!(cells(&doc)[0].paragraphs[1].plain_text(), "Engineer\tJan 2019 - Present");
    }

    #[test]
    fn main_column_headers_carry_the_accent_border() {
        let mut resume = experience("Engineer", "2020", "Did things.");
        resume.summary = "Builds reliable systems.".into();
        resume.skills = vec!["Rust".into()];
        let theme = Theme::preset("creative").unwrap();
        let primary = theme.resolve().primary;
        let doc = flow(&resume, &theme);
        let cells = cells(&doc);
        let main_titles: Vec<_> = cells[0]
            .paragraphs
            .iter()
            .filter(|p| p.left_border.is_some())
            .map(|p| (p.plain_text(), p.left_border))
            .collect();
        assert_eq!(
            main_titles,
            vec![
                ("PROFESSIONAL SUMMARY".to_string(), Some(primary)),
                ("EXPERIENCE".to_string(), Some(primary)),
            ]
        );
        assert!(cells[1].paragraphs.iter().all(|p| p.left_border.is_none()));
    }

    #[test]
    fn linkedin_becomes_a_hyperlink_relationship() {
        let resume = ResumeDocument {
            email: "jane@example.com".into(),
            linkedin: "https://www.linkedin.com/in/jane".into(),
            ..Default::default()
        };
        let doc = flow(&resume, &Theme::default());
        assert_eq!(
            doc.hyperlinks,
            vec![Hyperlink {
                rel_id: "rId3".into(),
                target: "https://www.linkedin.com/in/jane".into(),
            }]
        );
        let FlowBlock::Paragraph(contact) = &doc.body[1] else {
            panic!("expected contact paragraph");
        };
        assert_eq!(contact.plain_text(), "jane@example.com  |  LinkedIn");
    }

    #[test]
    fn dark_theme_sets_background_and_white_body() {
        let doc = flow(&ResumeDocument::default(), &Theme::preset("tech").unwrap());
        assert_eq!(doc.background, Some(Rgb(0x11, 0x18, 0x27)));
        assert_eq!(doc.base.color, Rgb::WHITE);

        let doc = flow(&ResumeDocument::default(), &Theme::default());
        assert_eq!(doc.background, None);
        assert_eq!(doc.base.color, LIGHT_BODY);
        assert_eq!(doc.base.font, "Arial");
    }
}
