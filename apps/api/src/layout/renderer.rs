//! Document Renderer: lays a profile and its prose out in one template.
//!
//! Every template goes through the same builder: only the `TemplateStyle` differs,
//! so two templates given the same input carry the same words in the same order.

use tracing::{info, warn};

use crate::analysis::scoring::ScoreResult;
use crate::analysis::normalizer::strip_bullet_glyph;
use crate::analysis::vocabulary::BULLET_GLYPHS;
use crate::errors::AppError;
use crate::layout::blocks::{
    Block, DividerBlock, DocumentKind, Footer, RenderedDocument, TextBlock, TextStyle,
    BULLET_TEXT_OFFSET,
};
use crate::layout::font_metrics::{get_metrics, to_latin1};
use crate::layout::page_fill::paginate;
use crate::layout::template::{Align, Rgb, RuleStyle, Section, TemplateSpec, TemplateStyle};
use crate::models::ResumeProfile;
use crate::prose::{ProseSection, ProseSections};

/// LinkedIn's limit for the About section.
pub const BIO_CHAR_LIMIT: usize = 2600;

/// Space kept free at the bottom of each resume page for the score footer, in
/// multiples of the footer font size.
const FOOTER_RESERVE_LINES: f32 = 3.0;

/// Extra space a blank line in free text adds below the preceding block, in points.
const PARAGRAPH_BREAK: f32 = 6.0;

/// Renders the resume. Sections come in the template's order; empty ones are skipped.
pub fn render(
    profile: &ResumeProfile,
    prose: &ProseSections,
    template: TemplateSpec,
    score: Option<&ScoreResult>,
) -> Result<RenderedDocument, AppError> {
    require_name(profile)?;
    if profile.experience.is_empty() && profile.education.is_empty() {
        return Err(AppError::content(
            "experience",
            "a resume needs at least one experience or education entry",
        ));
    }

    let style = template.style();
    let mut builder = LayoutBuilder::new(&style);
    let mut absent_sections = Vec::new();

    for section in style.section_order {
        match section {
            Section::Header => builder.header(profile),
            Section::Summary => {
                let summary = prose
                    .text(ProseSection::Summary)
                    .or_else(|| profile.summary.as_deref().map(str::trim))
                    .filter(|s| !s.is_empty());
                match summary {
                    Some(text) => {
                        builder.section_heading(section.label());
                        builder.prose(text);
                    }
                    None => absent_sections.push(ProseSection::Summary),
                }
            }
            Section::Experience => {
                if profile.experience.is_empty() {
                    continue;
                }
                builder.section_heading(section.label());
                for entry in &profile.experience {
                    builder.entry_title(&format!("{}, {}", entry.title.trim(), entry.org.trim()));
                    if let Some(dates) = non_blank(entry.dates.as_deref()) {
                        builder.meta(dates);
                    }
                    for bullet in &entry.bullets {
                        builder.bullet(bullet);
                    }
                }
            }
            Section::Projects => {
                if profile.projects.is_empty() {
                    continue;
                }
                builder.section_heading(section.label());
                for entry in &profile.projects {
                    let title = match non_blank(entry.tech_stack.as_deref()) {
                        Some(stack) => format!("{} | {stack}", entry.name.trim()),
                        None => entry.name.trim().to_string(),
                    };
                    builder.entry_title(&title);
                    for bullet in &entry.bullets {
                        builder.bullet(bullet);
                    }
                }
            }
            Section::Education => {
                if profile.education.is_empty() {
                    continue;
                }
                builder.section_heading(section.label());
                for entry in &profile.education {
                    builder.entry_title(&format!(
                        "{}, {}",
                        entry.degree.trim(),
                        entry.institution.trim()
                    ));
                    if let Some(dates) = non_blank(entry.dates.as_deref()) {
                        builder.meta(dates);
                    }
                    if let Some(details) = non_blank(entry.details.as_deref()) {
                        builder.paragraph(details);
                    }
                }
            }
            Section::Skills => {
                if profile.skills.is_empty() {
                    continue;
                }
                builder.section_heading(section.label());
                let skills: Vec<&str> = profile.skills.iter().map(|s| s.trim()).collect();
                builder.paragraph(&skills.join(", "));
            }
        }
    }

    let footer = score.map(|s| Footer {
        text: format!("Resume Strength: {}/100 | {}", s.score, s.grade.label()),
        style: TextStyle {
            font: style.font,
            bold: false,
            size: style.footer_size,
            color: style.muted,
            line_height: style.line_height(style.footer_size),
            align: Align::Center,
        },
    });
    let reserve = if footer.is_some() {
        style.footer_size * FOOTER_RESERVE_LINES
    } else {
        0.0
    };

    let pages = paginate(builder.finish(), style.content_height() - reserve)?;
    let document = RenderedDocument {
        kind: DocumentKind::Resume,
        template,
        author: profile.name.trim().to_string(),
        pages,
        absent_sections,
        footer,
        warnings: Vec::new(),
    };
    log_rendered(&document);
    Ok(document)
}

/// Renders a cover letter as its own document.
pub fn render_cover_letter(
    profile: &ResumeProfile,
    body: &str,
    template: TemplateSpec,
) -> Result<RenderedDocument, AppError> {
    render_letter_like(profile, body, template, DocumentKind::CoverLetter, Vec::new())
}

/// Renders a LinkedIn bio as its own document. Bios over the LinkedIn limit still
/// render, with a warning.
pub fn render_bio(
    profile: &ResumeProfile,
    bio: &str,
    template: TemplateSpec,
) -> Result<RenderedDocument, AppError> {
    let mut warnings = Vec::new();
    let length = bio.trim().chars().count();
    if length > BIO_CHAR_LIMIT {
        warn!(length, limit = BIO_CHAR_LIMIT, "LinkedIn bio exceeds character limit");
        warnings.push(format!(
            "bio is {length} characters, LinkedIn shows at most {BIO_CHAR_LIMIT}"
        ));
    }
    render_letter_like(profile, bio, template, DocumentKind::Bio, warnings)
}

fn render_letter_like(
    profile: &ResumeProfile,
    body: &str,
    template: TemplateSpec,
    kind: DocumentKind,
    warnings: Vec<String>,
) -> Result<RenderedDocument, AppError> {
    require_name(profile)?;
    if body.trim().is_empty() {
        let field = match kind {
            DocumentKind::Bio => ProseSection::LinkedinBio,
            _ => ProseSection::CoverLetter,
        };
        return Err(AppError::content(
            field.as_str(),
            format!("{} has no body text", kind.title().to_lowercase()),
        ));
    }

    let style = template.style();
    let mut builder = LayoutBuilder::new(&style);
    builder.header(profile);
    builder.section_heading(&kind.title().to_uppercase());
    builder.prose(body);

    let pages = paginate(builder.finish(), style.content_height())?;
    let document = RenderedDocument {
        kind,
        template,
        author: profile.name.trim().to_string(),
        pages,
        absent_sections: Vec::new(),
        footer: None,
        warnings,
    };
    log_rendered(&document);
    Ok(document)
}

/// The name must survive transliteration, otherwise the header would be empty.
fn require_name(profile: &ResumeProfile) -> Result<(), AppError> {
    if profile.name.trim().is_empty() {
        return Err(AppError::content("name", "a document needs the candidate's name"));
    }
    if to_latin1(&profile.name).trim().is_empty() {
        return Err(AppError::content(
            "name",
            "the candidate's name has no characters the PDF fonts can draw",
        ));
    }
    Ok(())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn log_rendered(document: &RenderedDocument) {
    info!(
        kind = ?document.kind,
        template = %document.template,
        pages = document.page_count(),
        absent = ?document.absent_sections,
        "Rendered document"
    );
}

/// Accumulates blocks for one document in one template.
struct LayoutBuilder<'a> {
    style: &'a TemplateStyle,
    blocks: Vec<Block>,
}

impl<'a> LayoutBuilder<'a> {
    fn new(style: &'a TemplateStyle) -> Self {
        Self {
            style,
            blocks: Vec::new(),
        }
    }

    fn finish(self) -> Vec<Block> {
        self.blocks
    }

    fn text_style(&self, size: f32, bold: bool, color: Rgb) -> TextStyle {
        TextStyle {
            font: self.style.font,
            bold,
            size,
            color,
            line_height: self.style.line_height(size),
            align: Align::Left,
        }
    }

    fn wrap(&self, text: &str, style: &TextStyle, width: f32) -> Vec<String> {
        get_metrics(style.font, style.bold).wrap_lines(&to_latin1(text), style.size, width)
    }

    fn text_block(
        &self,
        text: &str,
        style: TextStyle,
        indent: f32,
        space_before: f32,
        space_after: f32,
    ) -> Option<TextBlock> {
        let lines = self.wrap(text, &style, self.style.text_width() - indent);
        if lines.is_empty() {
            return None;
        }
        Some(TextBlock {
            lines,
            style,
            indent,
            space_before,
            space_after,
        })
    }

    fn header(&mut self, profile: &ResumeProfile) {
        let s = self.style;
        let align = s.header_align;

        let mut name = self.text_style(s.name_size, true, s.dark);
        name.align = align;
        if let Some(block) = self.text_block(&profile.name, name, 0.0, 0.0, 2.0) {
            self.blocks.push(Block::Heading(block));
        }

        if let Some(headline) = non_blank(profile.headline.as_deref()) {
            let mut style = self.text_style(s.headline_size, false, s.accent);
            style.align = align;
            if let Some(block) = self.text_block(headline, style, 0.0, 0.0, 2.0) {
                self.blocks.push(Block::Paragraph(block));
            }
        }

        let parts = profile.contact.parts();
        if !parts.is_empty() {
            let mut style = self.text_style(s.contact_size, false, s.muted);
            style.align = align;
            let contact = parts.join(s.contact_separator);
            if let Some(block) = self.text_block(&contact, style, 0.0, 0.0, 0.0) {
                self.blocks.push(Block::Paragraph(block));
            }
        }

        self.divider(s.header_rule, 6.0, 8.0);
    }

    fn section_heading(&mut self, label: &str) {
        let style = self.text_style(self.style.heading_size, true, self.style.dark);
        if let Some(block) = self.text_block(label, style, 0.0, 8.0, 2.0) {
            self.blocks.push(Block::Heading(block));
        }
        self.divider(self.style.section_rule, 0.0, 5.0);
    }

    fn divider(&mut self, rule: RuleStyle, space_before: f32, space_after: f32) {
        self.blocks.push(Block::Divider(DividerBlock {
            rule,
            space_before,
            space_after,
        }));
    }

    fn entry_title(&mut self, text: &str) {
        let style = self.text_style(self.style.body_size + 0.5, true, self.style.dark);
        if let Some(block) = self.text_block(text, style, 0.0, 4.0, 0.5) {
            self.blocks.push(Block::Heading(block));
        }
    }

    fn meta(&mut self, text: &str) {
        let style = self.text_style(self.style.body_size - 1.0, false, self.style.muted);
        if let Some(block) = self.text_block(text, style, 0.0, 0.0, 2.0) {
            self.blocks.push(Block::Paragraph(block));
        }
    }

    fn paragraph(&mut self, text: &str) {
        let style = self.text_style(self.style.body_size, false, self.style.body);
        if let Some(block) = self.text_block(text, style, 0.0, 0.0, 3.0) {
            self.blocks.push(Block::Paragraph(block));
        }
    }

    fn bullet(&mut self, text: &str) {
        let text = strip_bullet_glyph(text);
        let style = self.text_style(self.style.body_size, false, self.style.body);
        let indent = self.style.bullet_indent;
        let lines = self.wrap(text, &style, self.style.text_width() - indent - BULLET_TEXT_OFFSET);
        if lines.is_empty() {
            return;
        }
        self.blocks.push(Block::Bullet(TextBlock {
            lines,
            style,
            indent,
            space_before: 0.0,
            space_after: 1.5,
        }));
    }

    /// Free text: every line is its own paragraph, glyph-led lines become bullets and
    /// blank lines widen the gap below the previous block.
    fn prose(&mut self, text: &str) {
        for chunk in split_prose(text) {
            match chunk {
                ProseChunk::Paragraph(p) => self.paragraph(p),
                ProseChunk::Bullet(b) => self.bullet(b),
                ProseChunk::Break => self.widen_last_gap(PARAGRAPH_BREAK),
            }
        }
    }

    fn widen_last_gap(&mut self, extra: f32) {
        if let Some(Block::Paragraph(t) | Block::Bullet(t)) = self.blocks.last_mut() {
            t.space_after += extra;
        }
    }
}

#[derive(Debug, PartialEq)]
enum ProseChunk<'t> {
    Paragraph(&'t str),
    Bullet(&'t str),
    Break,
}

fn split_prose(text: &str) -> Vec<ProseChunk<'_>> {
    let mut chunks = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if matches!(chunks.last(), Some(ProseChunk::Paragraph(_) | ProseChunk::Bullet(_))) {
                chunks.push(ProseChunk::Break);
            }
        } else if trimmed.starts_with(BULLET_GLYPHS) && !strip_bullet_glyph(trimmed).is_empty() {
            chunks.push(ProseChunk::Bullet(strip_bullet_glyph(trimmed)));
        } else {
            chunks.push(ProseChunk::Paragraph(trimmed));
        }
    }
    if chunks.last() == Some(&ProseChunk::Break) {
        chunks.pop();
    }
    chunks
}
