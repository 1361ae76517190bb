//! WordprocessingML package writer.

mod flow;

use std::borrow::Cow;
use std::io::{Cursor, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Error;
use crate::fonts::FontBook;
use crate::layout::DocumentPlan;
use crate::metrics::TextMetrics;
use crate::model::ResumeDocument;
use crate::theme::ResolvedTheme;

use flow::{FlowBlock, FlowDocument, Inline, PAGE_MARGIN, Paragraph, RunProps, TableCell};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PKG_RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const CT_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const REL_TYPE: &str = R_NS;

// A4 in twips.
const PAGE_WIDTH: u32 = 11906;
const PAGE_HEIGHT: u32 = 16838;

type XmlWriter = Writer<Cursor<Vec<u8>>>;

pub(crate) fn render(
    resume: &ResumeDocument,
    theme: &ResolvedTheme,
    fonts: &FontBook,
) -> Result<Vec<u8>, Error> {
    let plan = DocumentPlan::build(resume);
    let doc = flow::build(&plan, theme, TextMetrics::new(fonts, theme.font));
    write_package(&doc)
}

fn write_package(doc: &FlowDocument) -> Result<Vec<u8>, Error> {
    let parts = [
        ("[Content_Types].xml", content_types()?),
        ("_rels/.rels", package_rels()?),
        ("word/document.xml", document_xml(doc)?),
        ("word/styles.xml", styles_xml(doc)?),
        ("word/settings.xml", settings_xml(doc)?),
        ("word/_rels/document.xml.rels", document_rels(doc)?),
    ];

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());
    for (name, data) in parts {
        zip.start_file(name, options)?;
        zip.write_all(&data)?;
    }
    let bytes = zip.finish()?.into_inner();
    log::info!("Wrote flow document package ({} bytes)", bytes.len());
    Ok(bytes)
}

fn new_writer() -> Result<XmlWriter, Error> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    Ok(writer)
}

fn start(w: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> Result<(), Error> {
    let mut elem = BytesStart::new(name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    w.write_event(Event::Start(elem))?;
    Ok(())
}

fn empty(w: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> Result<(), Error> {
    let mut elem = BytesStart::new(name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    w.write_event(Event::Empty(elem))?;
    Ok(())
}

fn end(w: &mut XmlWriter, name: &str) -> Result<(), Error> {
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Characters XML 1.0 forbids even when escaped. Text pulled out of other
/// documents often carries form feeds and stray C0 controls.
fn is_xml_forbidden(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
    )
}

/// Vertical tab and form feed become spaces; other forbidden characters
/// are dropped.
fn xml_chars(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_xml_forbidden) {
        return Cow::Borrowed(text);
    }
    let cleaned: String = text
        .chars()
        .filter_map(|c| match c {
            '\u{B}' | '\u{C}' => Some(' '),
            c if is_xml_forbidden(c) => None,
            c => Some(c),
        })
        .collect();
    log::debug!("Removed characters XML cannot carry from {text:?}");
    Cow::Owned(cleaned)
}

/// `<w:name w:val="val"/>`
fn val(w: &mut XmlWriter, name: &str, value: &str) -> Result<(), Error> {
    empty(w, name, &[("w:val", value)])
}

fn content_types() -> Result<Vec<u8>, Error> {
    let mut w = new_writer()?;
    start(&mut w, "Types", &[("xmlns", CT_NS)])?;
    empty(
        &mut w,
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    empty(
        &mut w,
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;
    for (part, content_type) in [
        (
            "/word/document.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        ),
        (
            "/word/styles.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
        ),
        (
            "/word/settings.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml",
        ),
    ] {
        empty(&mut w, "Override", &[("PartName", part), ("ContentType", content_type)])?;
    }
    end(&mut w, "Types")?;
    Ok(w.into_inner().into_inner())
}

fn package_rels() -> Result<Vec<u8>, Error> {
    let mut w = new_writer()?;
    start(&mut w, "Relationships", &[("xmlns", PKG_RELS_NS)])?;
    empty(
        &mut w,
        "Relationship",
        &[
            ("Id", "rId1"),
            ("Type", &format!("{REL_TYPE}/officeDocument")),
            ("Target", "word/document.xml"),
        ],
    )?;
    end(&mut w, "Relationships")?;
    Ok(w.into_inner().into_inner())
}

fn document_rels(doc: &FlowDocument) -> Result<Vec<u8>, Error> {
    let mut w = new_writer()?;
    start(&mut w, "Relationships", &[("xmlns", PKG_RELS_NS)])?;
    empty(
        &mut w,
        "Relationship",
        &[
            ("Id", "rId1"),
            ("Type", &format!("{REL_TYPE}/styles")),
            ("Target", "styles.xml"),
        ],
    )?;
    empty(
        &mut w,
        "Relationship",
        &[
            ("Id", "rId2"),
            ("Type", &format!("{REL_TYPE}/settings")),
            ("Target", "settings.xml"),
        ],
    )?;
    let hyperlink_type = format!("{REL_TYPE}/hyperlink");
    for link in &doc.hyperlinks {
        let target = xml_chars(&link.target);
        empty(
            &mut w,
            "Relationship",
            &[
                ("Id", link.rel_id.as_str()),
                ("Type", hyperlink_type.as_str()),
                ("Target", target.as_ref()),
                ("TargetMode", "External"),
            ],
        )?;
    }
    end(&mut w, "Relationships")?;
    Ok(w.into_inner().into_inner())
}

fn styles_xml(doc: &FlowDocument) -> Result<Vec<u8>, Error> {
    let base = &doc.base;
    let size = base.size.to_string();
    let color = base.color.hex();

    let mut w = new_writer()?;
    start(&mut w, "w:styles", &[("xmlns:w", W_NS)])?;
    start(&mut w, "w:docDefaults", &[])?;
    start(&mut w, "w:rPrDefault", &[])?;
    start(&mut w, "w:rPr", &[])?;
    empty(
        &mut w,
        "w:rFonts",
        &[
            ("w:ascii", base.font),
            ("w:hAnsi", base.font),
            ("w:cs", base.font),
            ("w:eastAsia", base.font),
        ],
    )?;
    val(&mut w, "w:color", &color)?;
    val(&mut w, "w:sz", &size)?;
    val(&mut w, "w:szCs", &size)?;
    end(&mut w, "w:rPr")?;
    end(&mut w, "w:rPrDefault")?;
    start(&mut w, "w:pPrDefault", &[])?;
    start(&mut w, "w:pPr", &[])?;
    empty(&mut w, "w:spacing", &[("w:after", "0"), ("w:line", "240"), ("w:lineRule", "auto")])?;
    end(&mut w, "w:pPr")?;
    end(&mut w, "w:pPrDefault")?;
    end(&mut w, "w:docDefaults")?;

    start(
        &mut w,
        "w:style",
        &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
    )?;
    val(&mut w, "w:name", "Normal")?;
    empty(&mut w, "w:qFormat", &[])?;
    end(&mut w, "w:style")?;

    start(
        &mut w,
        "w:style",
        &[("w:type", "table"), ("w:default", "1"), ("w:styleId", "TableNormal")],
    )?;
    val(&mut w, "w:name", "Normal Table")?;
    start(&mut w, "w:tblPr", &[])?;
    start(&mut w, "w:tblCellMar", &[])?;
    for side in ["w:top", "w:left", "w:bottom", "w:right"] {
        empty(&mut w, side, &[("w:w", "0"), ("w:type", "dxa")])?;
    }
    end(&mut w, "w:tblCellMar")?;
    end(&mut w, "w:tblPr")?;
    end(&mut w, "w:style")?;

    start(&mut w, "w:style", &[("w:type", "character"), ("w:styleId", "Hyperlink")])?;
    val(&mut w, "w:name", "Hyperlink")?;
    start(&mut w, "w:rPr", &[])?;
    val(&mut w, "w:u", "single")?;
    end(&mut w, "w:rPr")?;
    end(&mut w, "w:style")?;

    end(&mut w, "w:styles")?;
    Ok(w.into_inner().into_inner())
}

fn settings_xml(doc: &FlowDocument) -> Result<Vec<u8>, Error> {
    let mut w = new_writer()?;
    start(&mut w, "w:settings", &[("xmlns:w", W_NS)])?;
    if doc.background.is_some() {
        empty(&mut w, "w:displayBackgroundShape", &[])?;
    }
    val(&mut w, "w:defaultTabStop", "720")?;
    end(&mut w, "w:settings")?;
    Ok(w.into_inner().into_inner())
}

fn document_xml(doc: &FlowDocument) -> Result<Vec<u8>, Error> {
    let mut w = new_writer()?;
    start(&mut w, "w:document", &[("xmlns:w", W_NS), ("xmlns:r", R_NS)])?;
    if let Some(background) = doc.background {
        empty(&mut w, "w:background", &[("w:color", &background.hex())])?;
    }
    start(&mut w, "w:body", &[])?;
    for block in &doc.body {
        match block {
            FlowBlock::Paragraph(p) => write_paragraph(&mut w, p)?,
            FlowBlock::Table(cells) => write_table(&mut w, cells)?,
        }
    }
    // Word expects a paragraph between a table and the section properties.
    write_paragraph(&mut w, &Paragraph::default())?;
    write_section_properties(&mut w)?;
    end(&mut w, "w:body")?;
    end(&mut w, "w:document")?;
    Ok(w.into_inner().into_inner())
}

fn write_section_properties(w: &mut XmlWriter) -> Result<(), Error> {
    let margin = PAGE_MARGIN.to_string();
    start(w, "w:sectPr", &[])?;
    empty(
        w,
        "w:pgSz",
        &[("w:w", &PAGE_WIDTH.to_string()), ("w:h", &PAGE_HEIGHT.to_string())],
    )?;
    empty(
        w,
        "w:pgMar",
        &[
            ("w:top", &margin),
            ("w:right", &margin),
            ("w:bottom", &margin),
            ("w:left", &margin),
            ("w:header", "708"),
            ("w:footer", "708"),
            ("w:gutter", "0"),
        ],
    )?;
    end(w, "w:sectPr")
}

fn write_table(w: &mut XmlWriter, cells: &[TableCell]) -> Result<(), Error> {
    start(w, "w:tbl", &[])?;
    start(w, "w:tblPr", &[])?;
    empty(w, "w:tblW", &[("w:w", "5000"), ("w:type", "pct")])?;
    start(w, "w:tblBorders", &[])?;
    for side in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
        val(w, side, "nil")?;
    }
    end(w, "w:tblBorders")?;
    empty(w, "w:tblLayout", &[("w:type", "fixed")])?;
    end(w, "w:tblPr")?;

    start(w, "w:tblGrid", &[])?;
    for cell in cells {
        empty(w, "w:gridCol", &[("w:w", &cell.width.to_string())])?;
    }
    end(w, "w:tblGrid")?;

    start(w, "w:tr", &[])?;
    for cell in cells {
        start(w, "w:tc", &[])?;
        start(w, "w:tcPr", &[])?;
        empty(w, "w:tcW", &[("w:w", &cell.width.to_string()), ("w:type", "dxa")])?;
        start(w, "w:tcMar", &[])?;
        empty(w, "w:left", &[("w:w", &cell.margin_left.to_string()), ("w:type", "dxa")])?;
        empty(w, "w:right", &[("w:w", &cell.margin_right.to_string()), ("w:type", "dxa")])?;
        end(w, "w:tcMar")?;
        end(w, "w:tcPr")?;
        for p in &cell.paragraphs {
            write_paragraph(w, p)?;
        }
        end(w, "w:tc")?;
    }
    end(w, "w:tr")?;
    end(w, "w:tbl")
}

fn write_paragraph(w: &mut XmlWriter, p: &Paragraph) -> Result<(), Error> {
    start(w, "w:p", &[])?;
    start(w, "w:pPr", &[])?;
    if let Some(color) = p.left_border {
        start(w, "w:pBdr", &[])?;
        empty(
            w,
            "w:left",
            &[
                ("w:val", "single"),
                ("w:sz", "24"),
                ("w:space", "10"),
                ("w:color", &color.hex()),
            ],
        )?;
        end(w, "w:pBdr")?;
    }
    if let Some(fill) = p.shading {
        empty(w, "w:shd", &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", &fill.hex())])?;
    }
    if let Some(pos) = p.right_tab {
        start(w, "w:tabs", &[])?;
        empty(w, "w:tab", &[("w:val", "right"), ("w:pos", &pos.to_string())])?;
        end(w, "w:tabs")?;
    }
    if p.spacing_before > 0 || p.spacing_after > 0 {
        empty(
            w,
            "w:spacing",
            &[
                ("w:before", &p.spacing_before.to_string()),
                ("w:after", &p.spacing_after.to_string()),
            ],
        )?;
    }
    if let Some(justification) = p.justification {
        val(w, "w:jc", justification.val())?;
    }
    end(w, "w:pPr")?;

    for inline in &p.inlines {
        match inline {
            Inline::Text { text, props } => write_run(w, props, RunContent::Text(text))?,
            Inline::Tab(props) => write_run(w, props, RunContent::Tab)?,
            Inline::Break => write_run(w, &RunProps::default(), RunContent::Break)?,
            Inline::Hyperlink {
                rel_id,
                text,
                props,
            } => {
                start(w, "w:hyperlink", &[("r:id", rel_id.as_str()), ("w:history", "1")])?;
                write_run(w, props, RunContent::Text(text))?;
                end(w, "w:hyperlink")?;
            }
        }
    }
    end(w, "w:p")
}

enum RunContent<'a> {
    Text(&'a str),
    Tab,
    Break,
}

fn write_run(w: &mut XmlWriter, props: &RunProps, content: RunContent<'_>) -> Result<(), Error> {
    start(w, "w:r", &[])?;
    if *props != RunProps::default() {
        start(w, "w:rPr", &[])?;
        if props.bold {
            empty(w, "w:b", &[])?;
            empty(w, "w:bCs", &[])?;
        }
        if props.italic {
            empty(w, "w:i", &[])?;
            empty(w, "w:iCs", &[])?;
        }
        if let Some(color) = props.color {
            val(w, "w:color", &color.hex())?;
        }
        if let Some(size) = props.size {
            let size = size.to_string();
            val(w, "w:sz", &size)?;
            val(w, "w:szCs", &size)?;
        }
        if props.underline {
            val(w, "w:u", "single")?;
        }
        end(w, "w:rPr")?;
    }
    match content {
        RunContent::Text(text) => {
            let text = xml_chars(text);
            let mut elem = BytesStart::new("w:t");
            if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
                elem.push_attribute(("xml:space", "preserve"));
            }
            w.write_event(Event::Start(elem))?;
            w.write_event(Event::Text(BytesText::new(&text)))?;
            end(w, "w:t")?;
        }
        RunContent::Tab => empty(w, "w:tab", &[])?,
        RunContent::Break => empty(w, "w:br", &[])?,
    }
    end(w, "w:r")
}
