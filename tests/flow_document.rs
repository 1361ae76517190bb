use std::io::{Cursor, Read};

use resume_render::{
    ExperienceEntry, OutputFormat, Renderer, ResumeDocument, ResumeRequest, Theme,
    render_flow_document,
};

const FULL_RESUME: &str = include_str!("fixtures/full_resume.json");
const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

fn read_part(package: &[u8], name: &str) -> String {
    let mut zip = zip::ZipArchive::new(Cursor::new(package)).unwrap();
    let mut file = zip.by_name(name).unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

fn w<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children()
        .find(|n| n.tag_name().namespace() == Some(W_NS) && n.tag_name().name() == name)
}

fn w_attr<'a>(node: roxmltree::Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute((W_NS, name))
}

/// Text of a paragraph, with tabs as `\t` and line breaks as `\n`.
fn paragraph_text(p: roxmltree::Node) -> String {
    let mut out = String::new();
    for n in p.descendants() {
        if n.tag_name().namespace() != Some(W_NS) {
            continue;
        }
        match n.tag_name().name() {
            "t" => out.push_str(n.text().unwrap_or("")),
            "tab" if n.parent().is_some_and(|p| p.tag_name().name() == "r") => out.push('\t'),
            "br" => out.push('\n'),
            _ => {}
        }
    }
    out
}

/// Paragraph texts of the two table cells (main, side).
fn cell_texts(xml: &str) -> (Vec<String>, Vec<String>) {
    let doc = roxmltree::Document::parse(xml).unwrap();
    let body = w(doc.root_element(), "body").unwrap();
    let tbl = w(body, "tbl").expect("two-column table");
    let tr = w(tbl, "tr").unwrap();
    let cells: Vec<Vec<String>> = tr
        .children()
        .filter(|n| n.tag_name().name() == "tc")
        .map(|tc| {
            tc.children()
                .filter(|n| n.tag_name().name() == "p")
                .map(paragraph_text)
                .collect()
        })
        .collect();
    assert_eq!(cells.len(), 2);
    (cells[0].clone(), cells[1].clone())
}

fn single_role(role: &str, duration: &str, description: &str) -> ResumeDocument {
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
fn skills_only_resume_has_only_expertise() {
    let resume = ResumeDocument {
        name: "Jane Doe".into(),
        skills: vec!["SQL".into(), "Go".into()],
        ..Default::default()
    };
    let docx = render_flow_document(&resume, &Theme::default()).unwrap();
    let xml = read_part(&docx, "word/document.xml");
    assert!(xml.contains(">JANE DOE<"));

    let (main, side) = cell_texts(&xml);
    assert_eq!(main, vec![""]);
    assert_eq!(side, vec!["EXPERTISE", "\u{2022} SQL", "\u{2022} GO"]);
}

#[test]
fn description_breaks_become_paragraphs() {
    let docx = render_flow_document(
        &single_role("Engineer", "2020 - 2022", "Line1\nLine2"),
        &Theme::default(),
    )
    .unwrap();
    let (main, _) = cell_texts(&read_part(&docx, "word/document.xml"));
    assert_eq!(main, vec!["EXPERIENCE", "Engineer\t2020 - 2022", "Acme", "Line1", "Line2"]);
}

#[test]
fn duration_sits_on_the_right_tab_stop() {
    let long = "Principal Distinguished Staff Engineer for Platform Reliability";
    for (role, expect_break) in [("Engineer", false), (long, true)] {
        let resume = single_role(role, "Jan 2019 - Present", "");
        let docx = render_flow_document(&resume, &Theme::default()).unwrap();
        let xml = read_part(&docx, "word/document.xml");
        let doc = roxmltree::Document::parse(&xml).unwrap();

        let role_p = doc
            .descendants()
            .filter(|n| n.tag_name().name() == "p")
            .find(|p| paragraph_text(*p).starts_with(role))
            .expect("role paragraph");
        let tab = role_p
            .descendants()
            .find(|n| n.tag_name().name() == "tab" && w_attr(*n, "val") == Some("right"))
            .expect("right tab stop");
        assert_eq!(w_attr(tab, "pos"), Some("6000"));

        let text = paragraph_text(role_p);
        assert!(text.ends_with("\tJan 2019 - Present"), "{text:?}");
        assert_eq!(text.contains('\n'), expect_break, "{text:?}");
    }
}

#[test]
fn empty_lists_omit_their_sections() {
    let resume = ResumeDocument {
        name: "Jane Doe".into(),
        summary: "Builds reliable systems.".into(),
        ..Default::default()
    };
    let docx = render_flow_document(&resume, &Theme::default()).unwrap();
    let xml = read_part(&docx, "word/document.xml");
    assert!(xml.contains("PROFESSIONAL SUMMARY"));
    for absent in ["EXPERIENCE", "EDUCATION", "EXPERTISE"] {
        assert!(!xml.contains(absent), "unexpected {absent}");
    }
}

#[test]
fn dark_theme_sets_page_background() {
    let tech = Theme::preset("tech").unwrap();
    let docx = render_flow_document(&ResumeDocument::default(), &tech).unwrap();
    let xml = read_part(&docx, "word/document.xml");
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let background = w(doc.root_element(), "background").expect("background");
    assert_eq!(w_attr(background, "color"), Some("111827"));
    assert!(read_part(&docx, "word/settings.xml").contains("displayBackgroundShape"));

    let light = render_flow_document(&ResumeDocument::default(), &Theme::default()).unwrap();
    assert!(!read_part(&light, "word/document.xml").contains("w:background"));
}

#[test]
fn linkedin_is_an_external_hyperlink() {
    let request = ResumeRequest::from_json(FULL_RESUME).unwrap();
    let docx = render_flow_document(&request.resume, &request.theme_or_default()).unwrap();

    let xml = read_part(&docx, "word/document.xml");
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let link = doc
        .descendants()
        .find(|n| n.tag_name().name() == "hyperlink")
        .expect("hyperlink");
    let rel_id = link.attribute((R_NS, "id")).unwrap();
    assert_eq!(paragraph_text(link), "LinkedIn");

    let rels = read_part(&docx, "word/_rels/document.xml.rels");
    let rels = roxmltree::Document::parse(&rels).unwrap();
    let rel = rels
        .descendants()
        .find(|n| n.attribute("Id") == Some(rel_id))
        .expect("hyperlink relationship");
    assert_eq!(rel.attribute("Target"), Some("https://www.linkedin.com/in/janedoe"));
    assert_eq!(rel.attribute("TargetMode"), Some("External"));
}

#[test]
fn accent_border_marks_main_column_headers() {
    let request = ResumeRequest::from_json(FULL_RESUME).unwrap();
    let docx = render_flow_document(&request.resume, &request.theme_or_default()).unwrap();
    let xml = read_part(&docx, "word/document.xml");
    let doc = roxmltree::Document::parse(&xml).unwrap();

    let bordered: Vec<String> = doc
        .descendants()
        .filter(|n| n.tag_name().name() == "p")
        .filter(|p| p.descendants().any(|n| n.tag_name().name() == "pBdr"))
        .map(paragraph_text)
        .collect();
    assert_eq!(bordered, vec!["PROFESSIONAL SUMMARY", "EXPERIENCE"]);

    // Gradient primary resolves to its first stop.
    let border = doc
        .descendants()
        .find(|n| {
            n.tag_name().name() == "left"
                && n.parent().is_some_and(|p| p.tag_name().name() == "pBdr")
        })
        .unwrap();
    assert_eq!(w_attr(border, "color"), Some("9333EA"));
}

#[test]
fn identical_inputs_give_identical_packages() {
    let request = ResumeRequest::from_json(FULL_RESUME).unwrap();
    let renderer = Renderer::default();
    let theme = request.theme_or_default();
    let a = renderer.render(OutputFormat::Docx, &request.resume, &theme).unwrap();
    let b = renderer.render(OutputFormat::Docx, &request.resume, &theme).unwrap();
    assert_eq!(a, b);
}

#[test]
fn malformed_payload_is_rejected_before_rendering() {
    let err = ResumeRequest::from_json(r#"{"name": "Jane", "skills": ["SQL", 7]}"#).unwrap_err();
    assert!(err.is_input_error());
    let err = ResumeRequest::from_json("[1, 2, 3]").unwrap_err();
    assert!(err.is_input_error());
}

#[test]
fn form_feed_in_summary_still_yields_well_formed_xml() {
    let resume = ResumeDocument {
        summary: "Page one\u{000C}page two".into(),
        ..Default::default()
    };
    let docx = render_flow_document(&resume, &Theme::default()).unwrap();
    let xml = read_part(&docx, "word/document.xml");
    let (main, _) = cell_texts(&xml);
    assert_eq!(main, vec!["PROFESSIONAL SUMMARY", "\"Page one page two\""]);
}
