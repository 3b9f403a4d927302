//! Visual templates. A template is pure configuration: colors, fonts, margins,
//! rule styles, and section order. One layout algorithm consumes all three.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontFamily;

/// A4 portrait, in points.
pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;

fn mm(v: f32) -> f32 {
    v * 72.0 / 25.4
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateSpec {
    #[default]
    Modern,
    Classic,
    Minimal,
}

impl TemplateSpec {
    pub const ALL: [TemplateSpec; 3] = [
        TemplateSpec::Modern,
        TemplateSpec::Classic,
        TemplateSpec::Minimal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateSpec::Modern => "modern",
            TemplateSpec::Classic => "classic",
            TemplateSpec::Minimal => "minimal",
        }
    }

    pub fn style(&self) -> TemplateStyle {
        match self {
            TemplateSpec::Modern => modern(),
            TemplateSpec::Classic => classic(),
            TemplateSpec::Minimal => minimal(),
        }
    }
}

impl fmt::Display for TemplateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "modern" => Ok(TemplateSpec::Modern),
            "classic" => Ok(TemplateSpec::Classic),
            "minimal" => Ok(TemplateSpec::Minimal),
            other => Err(format!(
                "unknown template '{other}', expected one of: modern, classic, minimal"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Components scaled to 0.0–1.0 for PDF color operators.
    pub fn unit(&self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Header,
    Summary,
    Experience,
    Projects,
    Education,
    Skills,
}

impl Section {
    /// Heading text. The same in every template.
    pub fn label(&self) -> &'static str {
        match self {
            Section::Header => "",
            Section::Summary => "PROFESSIONAL SUMMARY",
            Section::Experience => "EXPERIENCE",
            Section::Projects => "PROJECTS",
            Section::Education => "EDUCATION",
            Section::Skills => "SKILLS",
        }
    }
}

pub const SECTION_ORDER: [Section; 6] = [
    Section::Header,
    Section::Summary,
    Section::Experience,
    Section::Projects,
    Section::Education,
    Section::Skills,
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// A horizontal rule. `width: None` spans the full text width. `trailing` continues
/// the rule after the lead segment as a hairline in a second color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleStyle {
    pub width: Option<f32>,
    pub thickness: f32,
    pub color: Rgb,
    pub trailing: Option<Rgb>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateStyle {
    pub template: TemplateSpec,
    pub font: FontFamily,
    pub margins: Margins,

    pub dark: Rgb,
    pub accent: Rgb,
    pub body: Rgb,
    pub muted: Rgb,

    pub name_size: f32,
    pub headline_size: f32,
    pub contact_size: f32,
    pub heading_size: f32,
    pub body_size: f32,
    pub footer_size: f32,
    /// Line advance as a multiple of the font size.
    pub leading: f32,

    pub header_align: Align,
    pub contact_separator: &'static str,
    pub header_rule: RuleStyle,
    pub section_rule: RuleStyle,
    pub bullet_indent: f32,
    pub section_order: [Section; 6],
}

impl TemplateStyle {
    pub fn text_width(&self) -> f32 {
        PAGE_WIDTH - self.margins.left - self.margins.right
    }

    pub fn content_height(&self) -> f32 {
        PAGE_HEIGHT - self.margins.top - self.margins.bottom
    }

    pub fn line_height(&self, size: f32) -> f32 {
        size * self.leading
    }
}

fn modern() -> TemplateStyle {
    let dark = Rgb(22, 28, 54);
    let accent = Rgb(67, 143, 232);
    TemplateStyle {
        template: TemplateSpec::Modern,
        font: FontFamily::Helvetica,
        margins: Margins {
            left: mm(18.0),
            right: mm(18.0),
            top: mm(16.0),
            bottom: mm(22.0),
        },
        dark,
        accent,
        body: Rgb(30, 35, 45),
        muted: Rgb(105, 115, 130),
        name_size: 21.0,
        headline_size: 10.0,
        contact_size: 8.5,
        heading_size: 10.5,
        body_size: 9.5,
        footer_size: 8.0,
        leading: 1.4,
        header_align: Align::Left,
        contact_separator: " | ",
        header_rule: RuleStyle {
            width: None,
            thickness: mm(0.8),
            color: dark,
            trailing: None,
        },
        section_rule: RuleStyle {
            width: Some(mm(30.0)),
            thickness: mm(0.45),
            color: accent,
            trailing: Some(Rgb(210, 215, 228)),
        },
        bullet_indent: mm(4.0),
        section_order: SECTION_ORDER,
    }
}

fn classic() -> TemplateStyle {
    let dark = Rgb(15, 15, 15);
    TemplateStyle {
        template: TemplateSpec::Classic,
        font: FontFamily::Times,
        margins: Margins {
            left: mm(22.0),
            right: mm(22.0),
            top: mm(16.0),
            bottom: mm(22.0),
        },
        dark,
        accent: dark,
        body: Rgb(45, 45, 45),
        muted: Rgb(140, 140, 140),
        name_size: 22.0,
        headline_size: 10.0,
        contact_size: 9.0,
        heading_size: 11.0,
        body_size: 10.0,
        footer_size: 8.0,
        leading: 1.35,
        header_align: Align::Center,
        contact_separator: " \u{b7} ",
        header_rule: RuleStyle {
            width: None,
            thickness: mm(0.7),
            color: dark,
            trailing: None,
        },
        section_rule: RuleStyle {
            width: None,
            thickness: mm(0.3),
            color: dark,
            trailing: None,
        },
        bullet_indent: mm(4.0),
        section_order: SECTION_ORDER,
    }
}

fn minimal() -> TemplateStyle {
    let teal = Rgb(20, 184, 166);
    let rule = Rgb(220, 225, 230);
    TemplateStyle {
        template: TemplateSpec::Minimal,
        font: FontFamily::Helvetica,
        margins: Margins {
            left: mm(24.0),
            right: mm(24.0),
            top: mm(20.0),
            bottom: mm(28.0),
        },
        dark: Rgb(12, 12, 12),
        accent: teal,
        body: Rgb(55, 65, 75),
        muted: Rgb(150, 160, 170),
        name_size: 19.0,
        headline_size: 10.0,
        contact_size: 8.0,
        heading_size: 9.5,
        body_size: 9.5,
        footer_size: 7.5,
        leading: 1.5,
        header_align: Align::Left,
        contact_separator: " \u{b7} ",
        header_rule: RuleStyle {
            width: Some(mm(10.0)),
            thickness: mm(1.2),
            color: teal,
            trailing: Some(rule),
        },
        section_rule: RuleStyle {
            width: Some(mm(6.0)),
            thickness: mm(0.8),
            color: teal,
            trailing: None,
        },
        bullet_indent: mm(4.0),
        section_order: SECTION_ORDER,
    }
}
