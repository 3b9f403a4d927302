//! PDF Writer: serializes a `RenderedDocument` with lopdf.
//!
//! Base-14 fonts only (nothing embedded), one uncompressed content stream per page,
//! and no creation date or file ID, so the same document always yields the same bytes.

use anyhow::anyhow;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::errors::AppError;
use crate::layout::blocks::{
    Block, DividerBlock, Footer, RenderedDocument, TextBlock, TextStyle, BULLET_TEXT_OFFSET,
};
use crate::layout::font_metrics::{get_metrics, latin1_bytes, to_latin1, FontFamily};
use crate::layout::template::{Align, Rgb, TemplateStyle, PAGE_HEIGHT, PAGE_WIDTH};

const FONTS: [(&str, &str); 4] = [
    ("F1", "Helvetica"),
    ("F2", "Helvetica-Bold"),
    ("F3", "Times-Roman"),
    ("F4", "Times-Bold"),
];

/// Gap between a rule's lead segment and its trailing hairline.
const TRAILING_GAP: f32 = 2.0;
const TRAILING_THICKNESS: f32 = 0.5;

fn font_key(font: FontFamily, bold: bool) -> &'static str {
    match (font, bold) {
        (FontFamily::Helvetica, false) => "F1",
        (FontFamily::Helvetica, true) => "F2",
        (FontFamily::Times, false) => "F3",
        (FontFamily::Times, true) => "F4",
    }
}

fn real(v: f32) -> Object {
    Object::Real(v.into())
}

pub fn to_pdf(document: &RenderedDocument) -> Result<Vec<u8>, AppError> {
    let style = document.template.style();
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut font_dict = Dictionary::new();
    for (key, base) in FONTS {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => base,
            "Encoding" => "WinAnsiEncoding",
        });
        font_dict.set(key, font_id);
    }
    let resources_id = doc.add_object(dictionary! { "Font" => font_dict });

    let mut kids: Vec<Object> = Vec::with_capacity(document.pages.len());
    for page in &document.pages {
        let mut ops = Vec::new();
        let top = PAGE_HEIGHT - style.margins.top;
        for placed in &page.blocks {
            let y = top - placed.y;
            match &placed.block {
                Block::Heading(t) | Block::Paragraph(t) => {
                    draw_text(&mut ops, &style, t, y, false)
                }
                Block::Bullet(t) => draw_text(&mut ops, &style, t, y, true),
                Block::Divider(d) => draw_divider(&mut ops, &style, d, y),
            }
        }
        if let Some(footer) = &document.footer {
            draw_footer(&mut ops, &style, footer);
        }

        let encoded = Content { operations: ops }
            .encode()
            .map_err(|e| anyhow!("failed to encode page {} content: {e}", page.number))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![Object::Integer(0), Object::Integer(0), real(PAGE_WIDTH), real(PAGE_HEIGHT)],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let title = format!("{} - {}", to_latin1(&document.author), document.kind.title());
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(latin1_bytes(&title)),
        "Author" => Object::string_literal(latin1_bytes(&to_latin1(&document.author))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| anyhow!("failed to serialize PDF: {e}"))?;
    Ok(bytes)
}

fn draw_text(
    ops: &mut Vec<Operation>,
    style: &TemplateStyle,
    block: &TextBlock,
    top: f32,
    bullet: bool,
) {
    let s = &block.style;
    let x0 = style.margins.left + block.indent;
    let text_x = if bullet { x0 + BULLET_TEXT_OFFSET } else { x0 };
    let available = style.text_width() - (text_x - style.margins.left);

    let mut line_top = top - block.space_before;
    for (i, line) in block.lines.iter().enumerate() {
        let baseline = baseline_for(line_top, s);
        if bullet && i == 0 {
            show_text(ops, s, x0, baseline, "-");
        }
        let x = match s.align {
            Align::Left => text_x,
            Align::Center => {
                let width = get_metrics(s.font, s.bold).measure_str(line, s.size);
                text_x + ((available - width) / 2.0).max(0.0)
            }
        };
        show_text(ops, s, x, baseline, line);
        line_top -= s.line_height;
    }
}

/// Baseline of a line whose box starts at `line_top`, text vertically centered in it.
fn baseline_for(line_top: f32, s: &TextStyle) -> f32 {
    line_top - (s.line_height - s.size) / 2.0 - s.size * 0.8
}

fn show_text(ops: &mut Vec<Operation>, s: &TextStyle, x: f32, y: f32, text: &str) {
    let [r, g, b] = s.color.unit();
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![Object::Name(font_key(s.font, s.bold).as_bytes().to_vec()), real(s.size)],
    ));
    ops.push(Operation::new("rg", vec![real(r), real(g), real(b)]));
    ops.push(Operation::new("Td", vec![real(x), real(y)]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(latin1_bytes(text))]));
    ops.push(Operation::new("ET", vec![]));
}

fn draw_divider(ops: &mut Vec<Operation>, style: &TemplateStyle, d: &DividerBlock, top: f32) {
    let rule = &d.rule;
    let y = top - d.space_before - rule.thickness / 2.0;
    let left = style.margins.left;
    let full = style.text_width();
    let lead = rule.width.unwrap_or(full).min(full);

    stroke_line(ops, rule.color, rule.thickness, left, left + lead, y);
    if let Some(trailing) = rule.trailing {
        let start = left + lead + TRAILING_GAP;
        if start < left + full {
            stroke_line(ops, trailing, TRAILING_THICKNESS, start, left + full, y);
        }
    }
}

fn stroke_line(ops: &mut Vec<Operation>, color: Rgb, thickness: f32, x1: f32, x2: f32, y: f32) {
    let [r, g, b] = color.unit();
    ops.push(Operation::new("RG", vec![real(r), real(g), real(b)]));
    ops.push(Operation::new("w", vec![real(thickness)]));
    ops.push(Operation::new("m", vec![real(x1), real(y)]));
    ops.push(Operation::new("l", vec![real(x2), real(y)]));
    ops.push(Operation::new("S", vec![]));
}

fn draw_footer(ops: &mut Vec<Operation>, style: &TemplateStyle, footer: &Footer) {
    let s = &footer.style;
    let text = to_latin1(&footer.text);
    let width = get_metrics(s.font, s.bold).measure_str(&text, s.size);
    let x = style.margins.left + ((style.text_width() - width) / 2.0).max(0.0);
    show_text(ops, s, x, style.margins.bottom + s.size, &text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::renderer::{render, render_cover_letter};
    use crate::layout::template::TemplateSpec;
    use crate::models::{EducationEntry, ExperienceEntry, ResumeProfile};
    use crate::prose::ProseSections;

    fn profile() -> ResumeProfile {
        ResumeProfile {
            name: "Renée Okafor".to_string(),
            headline: Some("Platform Engineer".to_string()),
            experience: vec![ExperienceEntry {
                title: "Engineer".to_string(),
                org: "Globex".to_string(),
                dates: Some("2019 – 2024".to_string()),
                bullets: vec!["Built CI pipelines serving 300 engineers".to_string()],
            }],
            education: vec![EducationEntry {
                degree: "MSc".to_string(),
                institution: "Lagos University".to_string(),
                dates: None,
                details: None,
            }],
            ..Default::default()
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_identical_documents_identical_bytes() {
        for template in TemplateSpec::ALL {
            let doc = render(&profile(), &ProseSections::default(), template, None).unwrap();
            let a = to_pdf(&doc).unwrap();
            let b = to_pdf(&doc.clone()).unwrap();
            assert_eq!(a, b, "{template}");
        }
    }

    #[test]
    fn test_output_is_pdf_with_text() {
        let doc = render(&profile(), &ProseSections::default(), TemplateSpec::Classic, None).unwrap();
        let bytes = to_pdf(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert!(contains(&bytes, b"Times-Roman"));
        assert!(contains(&bytes, b"Built CI pipelines"));
        // "é" is written as a single WinAnsi byte
        assert!(contains(&bytes, b"Ren\xe9e Okafor"));
    }

    #[test]
    fn test_page_count_round_trips() {
        let mut p = profile();
        p.experience[0].bullets = (0..120)
            .map(|i| format!("Shipped improvement number {i} to the deployment system"))
            .collect();
        let doc = render(&p, &ProseSections::default(), TemplateSpec::Modern, None).unwrap();
        assert!(doc.page_count() > 1);

        let bytes = to_pdf(&doc).unwrap();
        let loaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(loaded.get_pages().len(), doc.page_count());
    }

    #[test]
    fn test_cover_letter_serializes() {
        let body = "Dear team,\n\nI build platforms.";
        let doc = render_cover_letter(&profile(), body, TemplateSpec::Minimal).unwrap();
        let bytes = to_pdf(&doc).unwrap();
        assert!(contains(&bytes, b"COVER LETTER"));
        assert!(contains(&bytes, b"Helvetica-Bold"));
    }
}
