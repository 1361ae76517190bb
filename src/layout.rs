//! The content plan both renderers start from.
//!
//! Section presence, column assignment, entry order and paragraph
//! boundaries are decided once here. The fixed-page renderer turns the plan
//! into positioned blocks, the flow renderer into a block tree; neither
//! re-derives what belongs on the page.

use crate::metrics::split_paragraphs;
use crate::model::ResumeDocument;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Column {
    Main,
    Side,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SectionKind {
    Summary,
    Experience,
    Education,
    Expertise,
}

impl SectionKind {
    pub(crate) fn title(self) -> &'static str {
        match self {
            SectionKind::Summary => "PROFESSIONAL SUMMARY",
            SectionKind::Experience => "EXPERIENCE",
            SectionKind::Education => "EDUCATION",
            SectionKind::Expertise => "EXPERTISE",
        }
    }

    pub(crate) fn column(self) -> Column {
        match self {
            SectionKind::Summary | SectionKind::Experience => Column::Main,
            SectionKind::Education | SectionKind::Expertise => Column::Side,
        }
    }

    /// Main-column titles carry an accent bar in the primary color.
    pub(crate) fn has_accent(self) -> bool {
        self.column() == Column::Main
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Item<'a> {
    Summary {
        paragraphs: Vec<String>,
    },
    Experience {
        role: &'a str,
        company: &'a str,
        duration: &'a str,
        paragraphs: Vec<String>,
    },
    Education {
        degree: &'a str,
        institution: &'a str,
        year: &'a str,
    },
    Skill {
        label: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Section<'a> {
    pub(crate) kind: SectionKind,
    pub(crate) items: Vec<Item<'a>>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Header<'a> {
    /// Uppercased display name; empty when the resume has none.
    pub(crate) name: String,
    pub(crate) email: &'a str,
    pub(crate) phone: &'a str,
    pub(crate) linkedin: Option<&'a str>,
}

impl Header<'_> {
    /// Non-empty contact parts joined by `separator`.
    pub(crate) fn contact_line(&self, separator: &str) -> String {
        [self.email.trim(), self.phone.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DocumentPlan<'a> {
    pub(crate) header: Header<'a>,
    pub(crate) sections: Vec<Section<'a>>,
}

impl<'a> DocumentPlan<'a> {
    pub(crate) fn build(resume: &'a ResumeDocument) -> DocumentPlan<'a> {
        let linkedin = resume.linkedin.trim();
        let header = Header {
            name: resume.name.trim().to_uppercase(),
            email: &resume.email,
            phone: &resume.phone,
            linkedin: (!linkedin.is_empty()).then_some(linkedin),
        };

        let mut sections = Vec::new();

        let summary = split_paragraphs(&resume.summary);
        if !summary.is_empty() {
            sections.push(Section {
                kind: SectionKind::Summary,
                items: vec![Item::Summary {
                    paragraphs: summary,
                }],
            });
        }

        if !resume.experience.is_empty() {
            sections.push(Section {
                kind: SectionKind::Experience,
                items: resume
                    .experience
                    .iter()
                    .map(|exp| Item::Experience {
                        role: &exp.role,
                        company: &exp.company,
                        duration: &exp.duration,
                        paragraphs: split_paragraphs(&exp.description),
                    })
                    .collect(),
            });
        }

        if !resume.education.is_empty() {
            sections.push(Section {
                kind: SectionKind::Education,
                items: resume
                    .education
                    .iter()
                    .map(|edu| Item::Education {
                        degree: &edu.degree,
                        institution: &edu.institution,
                        year: &edu.year,
                    })
                    .collect(),
            });
        }

        if !resume.skills.is_empty() {
            sections.push(Section {
                kind: SectionKind::Expertise,
                items: resume
                    .skills
                    .iter()
                    .map(|skill| Item::Skill {
                        label: skill.trim().to_uppercase(),
                    })
                    .collect(),
            });
        }

        log::debug!(
            "Planned {} sections: {:?}",
            sections.len(),
            sections.iter().map(|s| s.kind).collect::<Vec<_>>()
        );

        DocumentPlan { header, sections }
    }

    /// Sections of one column, in display order.
    pub(crate) fn column(&self, column: Column) -> impl Iterator<Item = &Section<'a>> {
        self.sections
            .iter()
            .filter(move |s| s.kind.column() == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EducationEntry, ExperienceEntry};

    #[test]
    fn empty_lists_produce_no_sections() {
        let resume = ResumeDocument {
            name: "Jane Doe".into(),
            skills: vec!["SQL".into(), "Go".into()],
            ..Default::default()
        };
        let plan = DocumentPlan::build(&resume);
        assert_eq!(plan.header.name, "JANE DOE");
        let kinds: Vec<_> = plan.sections.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SectionKind::Expertise]);
        assert_eq!(
            plan.sections[0].items,
            vec![
                Item::Skill { label: "SQL".into() },
                Item::Skill { label: "GO".into() }
            ]
        );
    }

    #[test]
    fn columns_are_statically_assigned() {
        let resume = ResumeDocument {
            summary: "Builds things.".into(),
            experience: vec![ExperienceEntry::default()],
            education: vec![EducationEntry::default()],
            skills: vec!["Rust".into()],
            ..Default::default()
        };
        let plan = DocumentPlan::build(&resume);
        let main: Vec<_> = plan.column(Column::Main).map(|s| s.kind).collect();
        let side: Vec<_> = plan.column(Column::Side).map(|s| s.kind).collect();
        assert_eq!(main, vec![SectionKind::Summary, SectionKind::Experience]);
        assert_eq!(side, vec![SectionKind::Education, SectionKind::Expertise]);
    }

    #[test]
    fn entries_keep_list_order_and_split_descriptions() {
        let resume = ResumeDocument {
            experience: vec![
                ExperienceEntry {
                    role: "Later".into(),
                    description: "Line1\nLine2".into(),
                    ..Default::default()
                },
                ExperienceEntry {
                    role: "Earlier".into(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let plan = DocumentPlan::build(&resume);
        let roles: Vec<_> = plan.sections[0]
            .items
            .iter()
            .map(|item| match item {
                Item::Experience { role, paragraphs, .. } => (*role, paragraphs.len()),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(roles, vec![("Later", 2), ("Earlier", 0)]);
    }

    #[test]
    fn contact_line_skips_missing_parts() {
        let resume = ResumeDocument {
            phone: "555-0100".into(),
            ..Default::default()
        };
        let plan = DocumentPlan::build(&resume);
        assert_eq!(plan.header.contact_line(" | "), "555-0100");
        assert!(plan.header.linkedin.is_none());
    }
}
