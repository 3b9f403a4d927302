//! Layout primitives: blocks, pages, and the rendered document.
//!
//! Text in a block is already transliterated and wrapped, so a block's height is
//! fixed once it is built. The PDF writer only draws what is here.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontFamily;
use crate::layout::template::{Align, Rgb, RuleStyle, TemplateSpec};
use crate::prose::ProseSection;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font: FontFamily,
    pub bold: bool,
    pub size: f32,
    pub color: Rgb,
    /// Baseline-to-baseline distance in points.
    pub line_height: f32,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub style: TextStyle,
    /// Left offset from the text margin, in points.
    pub indent: f32,
    pub space_before: f32,
    pub space_after: f32,
}

impl TextBlock {
    pub fn height(&self) -> f32 {
        self.space_before + self.lines.len() as f32 * self.style.line_height + self.space_after
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividerBlock {
    pub rule: RuleStyle,
    pub space_before: f32,
    pub space_after: f32,
}

impl DividerBlock {
    pub fn height(&self) -> f32 {
        self.space_before + self.rule.thickness + self.space_after
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading(TextBlock),
    Paragraph(TextBlock),
    /// Drawn with a dash glyph at `indent`, text after `BULLET_TEXT_OFFSET`.
    Bullet(TextBlock),
    Divider(DividerBlock),
}

/// Gap between a bullet's glyph and its text.
pub const BULLET_TEXT_OFFSET: f32 = 9.0;

impl Block {
    pub fn height(&self) -> f32 {
        match self {
            Block::Heading(t) | Block::Paragraph(t) | Block::Bullet(t) => t.height(),
            Block::Divider(d) => d.height(),
        }
    }

    pub fn text(&self) -> Option<&TextBlock> {
        match self {
            Block::Heading(t) | Block::Paragraph(t) | Block::Bullet(t) => Some(t),
            Block::Divider(_) => None,
        }
    }

    /// Short description for error messages.
    pub fn describe(&self) -> String {
        let kind = match self {
            Block::Heading(_) => "heading",
            Block::Paragraph(_) => "paragraph",
            Block::Bullet(_) => "bullet",
            Block::Divider(_) => return "divider".to_string(),
        };
        let first = self
            .text()
            .and_then(|t| t.lines.first())
            .map(String::as_str)
            .unwrap_or_default();
        let preview: String = first.chars().take(40).collect();
        format!("{kind} \"{preview}\"")
    }
}

/// A block and the y offset of its top edge from the page's content top, in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedBlock {
    pub y: f32,
    pub block: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFill {
    pub used_height: f32,
    pub available_height: f32,
    /// used / available, 0.0–1.0.
    pub fill_fraction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based.
    pub number: usize,
    pub blocks: Vec<PlacedBlock>,
    pub fill: PageFill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    CoverLetter,
    Bio,
}

impl DocumentKind {
    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "Resume",
            DocumentKind::CoverLetter => "Cover Letter",
            DocumentKind::Bio => "LinkedIn Bio",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footer {
    pub text: String,
    pub style: TextStyle,
}

/// One render call's output. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub kind: DocumentKind,
    pub template: TemplateSpec,
    /// Document author, used for the PDF title.
    pub author: String,
    pub pages: Vec<Page>,
    pub absent_sections: Vec<ProseSection>,
    pub footer: Option<Footer>,
    pub warnings: Vec<String>,
}

impl RenderedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.pages.iter().flat_map(|p| p.blocks.iter().map(|b| &b.block))
    }

    /// Every word of visible body text in order, footer excluded.
    pub fn words(&self) -> Vec<&str> {
        self.blocks()
            .filter_map(Block::text)
            .flat_map(|t| t.lines.iter())
            .flat_map(|l| l.split_whitespace())
            .collect()
    }
}
