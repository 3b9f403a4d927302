//! Parsing for the prose collaborator's plain-text output.
//!
//! The collaborator is asked for plain text with standalone section markers but
//! routinely decorates them ("## SUMMARY", "**RESUME**", "COVER LETTER:") and lets
//! emphasis slip into the body. Everything here is tolerant of that.

use serde::{Deserialize, Serialize};

use crate::prose::ProseSections;

/// Lines starting with one of these are prioritized tips.
const PRIORITY_MARKERS: &[&str] = &["🔴", "🟡", "🟢"];

/// Fallback tip count when no line carries a priority marker.
const FALLBACK_TIP_LIMIT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Summary,
    Resume,
    CoverLetter,
}

/// The three sections of a generated document, each trimmed, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedOutput {
    pub summary: String,
    pub resume: String,
    pub cover_letter: String,
}

impl GeneratedOutput {
    /// The renderer-facing sections. Empty text becomes `None`.
    pub fn into_sections(self, tips: Vec<String>) -> ProseSections {
        ProseSections {
            summary: non_empty(self.summary),
            cover_letter: non_empty(self.cover_letter),
            linkedin_bio: None,
            tips,
        }
    }
}

/// Splits collaborator output into summary, resume, and cover letter.
///
/// Text before the first marker is dropped. Without any marker the whole
/// (markdown-stripped) text is the resume.
pub fn parse_generated_output(raw: &str) -> GeneratedOutput {
    let cleaned = strip_markdown(raw);
    let mut output = GeneratedOutput::default();
    let mut current: Option<Marker> = None;

    for line in cleaned.lines() {
        if let Some(marker) = section_marker(line) {
            current = Some(marker);
            continue;
        }
        let target = match current {
            Some(Marker::Summary) => &mut output.summary,
            Some(Marker::Resume) => &mut output.resume,
            Some(Marker::CoverLetter) => &mut output.cover_letter,
            None => continue,
        };
        target.push_str(line);
        target.push('\n');
    }

    output.summary = output.summary.trim().to_string();
    output.resume = output.resume.trim().to_string();
    output.cover_letter = output.cover_letter.trim().to_string();

    if output.summary.is_empty() && output.resume.is_empty() && output.cover_letter.is_empty() {
        output.resume = cleaned.trim().to_string();
    }
    output
}

/// Tips carrying a priority marker, or the first eight non-empty lines if none do.
pub fn parse_tips(raw: &str) -> Vec<String> {
    let lines: Vec<&str> = raw.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    let prioritized: Vec<String> = lines
        .iter()
        .filter(|l| PRIORITY_MARKERS.iter().any(|m| l.starts_with(m)))
        .map(|l| l.to_string())
        .collect();
    if !prioritized.is_empty() {
        return prioritized;
    }

    lines
        .into_iter()
        .take(FALLBACK_TIP_LIMIT)
        .map(str::to_string)
        .collect()
}

/// Removes emphasis pairs, heading hashes, and normalizes "•" list items to "  - ".
pub fn strip_markdown(text: &str) -> String {
    text.lines()
        .map(strip_markdown_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_markdown_line(line: &str) -> String {
    let mut out = strip_heading(line).to_string();
    for marker in ["**", "__", "*"] {
        out = strip_paired(&out, marker);
    }

    let body = out.trim_start();
    if let Some(rest) = body.strip_prefix('•') {
        if rest.starts_with(char::is_whitespace) {
            return format!("  - {}", rest.trim_start());
        }
    }
    out
}

/// "## Title" → "Title". A run of hashes without following whitespace is kept.
fn strip_heading(line: &str) -> &str {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&hashes) {
        let rest = &line[hashes..];
        if rest.starts_with(char::is_whitespace) {
            return rest.trim_start();
        }
    }
    line
}

/// Replaces every `marker text marker` with `text`. Unpaired markers are kept.
fn strip_paired(line: &str, marker: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(open) = rest.find(marker) {
        let after_open = &rest[open + marker.len()..];
        match after_open.find(marker) {
            Some(close) if close > 0 => {
                out.push_str(&rest[..open]);
                out.push_str(&after_open[..close]);
                rest = &after_open[close + marker.len()..];
            }
            _ => break,
        }
    }
    out.push_str(rest);
    out
}

fn section_marker(line: &str) -> Option<Marker> {
    let mut s = line.trim().trim_start_matches('#').trim_start();
    s = strip_stars(s);
    s = s.strip_suffix(':').unwrap_or(s).trim_end();
    s = strip_stars(s);

    match s.to_uppercase().as_str() {
        "SUMMARY" => Some(Marker::Summary),
        "RESUME" => Some(Marker::Resume),
        "COVER LETTER" => Some(Marker::CoverLetter),
        _ => None,
    }
}

fn strip_stars(s: &str) -> &str {
    let s = s.strip_prefix("**").or_else(|| s.strip_prefix('*')).unwrap_or(s);
    let s = s.strip_suffix("**").or_else(|| s.strip_suffix('*')).unwrap_or(s);
    s.trim()
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
