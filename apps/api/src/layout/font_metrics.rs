//! Static font-metric tables for the PDF base-14 fonts the templates use.
//!
//! Widths are the Adobe AFM advance widths in thousandths of an em, so a string's
//! width in points is `sum(widths) * size / 1000`. Tables cover ASCII 0x20..=0x7E;
//! index = (char as usize) - 32. The Latin-1 upper half falls back to the table's
//! average width, which is within a few percent for accented letters.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// Sans-serif, used by Modern and Minimal.
    Helvetica,
    /// Serif, used by Classic.
    Times,
}

/// Static character-width table for one font face.
pub struct FontMetricTable {
    widths: [u16; 95],
    /// Fallback for characters outside the ASCII range.
    pub average_char_width: u16,
}

impl FontMetricTable {
    /// Width of `s` in points at `size`.
    pub fn measure_str(&self, s: &str, size: f32) -> f32 {
        let units: u32 = s
            .chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32] as u32
                } else {
                    self.average_char_width as u32
                }
            })
            .sum();
        units as f32 * size / 1000.0
    }

    /// Greedy word wrap at `max_width` points.
    ///
    /// A word wider than the whole line is broken between characters. Whitespace-only
    /// input yields no lines.
    pub fn wrap_lines(&self, s: &str, size: f32, max_width: f32) -> Vec<String> {
        let space = self.measure_str(" ", size);
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in s.split_whitespace() {
            let word_w = self.measure_str(word, size);

            if word_w > max_width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut pieces = self.break_word(word, size, max_width);
                // The last piece keeps filling the line like a normal word.
                let tail = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
                current_width = self.measure_str(&tail, size);
                current = tail;
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + space + word_w > max_width {
                lines.push(std::mem::replace(&mut current, word.to_string()));
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_w;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    fn break_word(&self, word: &str, size: f32, max_width: f32) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut piece = String::new();
        for c in word.chars() {
            let mut candidate = piece.clone();
            candidate.push(c);
            if !piece.is_empty() && self.measure_str(&candidate, size) > max_width {
                pieces.push(std::mem::take(&mut piece));
                piece.push(c);
            } else {
                piece = candidate;
            }
        }
        if !piece.is_empty() {
            pieces.push(piece);
        }
        pieces
    }
}

/// Maps typographic characters to Latin-1 equivalents and drops anything the
/// WinAnsi-encoded base fonts cannot show.
pub fn to_latin1(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2013}' | '\u{2022}' | '\u{2500}' | '\u{2212}' => out.push('-'),
            '\u{2014}' => out.push_str("--"),
            '\u{2018}' | '\u{2019}' | '\u{201A}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' => out.push('"'),
            '\u{2026}' => out.push_str("..."),
            '\u{2192}' => out.push_str("->"),
            '\u{00A0}' | '\u{2009}' | '\u{202F}' => out.push(' '),
            '\t' => out.push(' '),
            '\n' => out.push('\n'),
            c if (c as u32) <= 0xFF && !c.is_control() => out.push(c),
            _ => {}
        }
    }
    out
}

/// Single-byte encoding of already-transliterated text.
pub fn latin1_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .filter_map(|c| u8::try_from(c as u32).ok())
        .collect()
}

#[rustfmt::skip]
static HELVETICA: FontMetricTable = FontMetricTable {
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A-M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N-Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a-m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n-z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    average_char_width: 540,
};

#[rustfmt::skip]
static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    widths: [
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        333, 333, 584, 584, 584, 611, 975,
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        333, 278, 333, 584, 556, 333,
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        389, 280, 389, 584,
    ],
    average_char_width: 590,
};

#[rustfmt::skip]
static TIMES_ROMAN: FontMetricTable = FontMetricTable {
    widths: [
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        278, 278, 564, 564, 564, 444, 921,
        722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
        722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
        333, 278, 333, 469, 500, 333,
        444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
        500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
        480, 200, 480, 541,
    ],
    average_char_width: 480,
};

#[rustfmt::skip]
static TIMES_BOLD: FontMetricTable = FontMetricTable {
    widths: [
        250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        333, 333, 570, 570, 570, 500, 930,
        722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
        722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
        333, 278, 333, 581, 500, 333,
        500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
        556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
        394, 220, 394, 520,
    ],
    average_char_width: 520,
};

pub fn get_metrics(font: FontFamily, bold: bool) -> &'static FontMetricTable {
    match (font, bold) {
        (FontFamily::Helvetica, false) => &HELVETICA,
        (FontFamily::Helvetica, true) => &HELVETICA_BOLD,
        (FontFamily::Times, false) => &TIMES_ROMAN,
        (FontFamily::Times, true) => &TIMES_BOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(FontFamily::Helvetica, false).measure_str("", 10.0), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        // "Rust" = R(722) + u(556) + s(500) + t(278) = 2056 units
        let width = get_metrics(FontFamily::Helvetica, false).measure_str("Rust", 10.0);
        assert!((width - 20.56).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_bold_is_wider() {
        let text = "Architected distributed caching layer";
        for font in [FontFamily::Helvetica, FontFamily::Times] {
            let regular = get_metrics(font, false).measure_str(text, 10.0);
            let bold = get_metrics(font, true).measure_str(text, 10.0);
            assert!(bold > regular, "{font:?} bold should be wider");
        }
    }

    #[test]
    fn test_times_narrower_than_helvetica() {
        let text = "Reduced deployment time across services";
        let helvetica = get_metrics(FontFamily::Helvetica, false).measure_str(text, 10.0);
        let times = get_metrics(FontFamily::Times, false).measure_str(text, 10.0);
        assert!(times < helvetica);
    }

    #[test]
    fn test_wrap_respects_width() {
        let metrics = get_metrics(FontFamily::Helvetica, false);
        let text = "Architected a distributed caching layer using Redis and consistent hashing, \
                    reducing p99 latency by 40% under 50k RPS peak load";
        let lines = metrics.wrap_lines(text, 9.5, 200.0);
        assert!(lines.len() >= 2);
        for line in &lines {
            assert!(metrics.measure_str(line, 9.5) <= 200.0, "overlong line: {line}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_wrap_breaks_overlong_word() {
        let metrics = get_metrics(FontFamily::Helvetica, false);
        let url = "https://example.com/".to_string() + &"a".repeat(80);
        let lines = metrics.wrap_lines(&url, 10.0, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), url);
        assert!(lines.iter().all(|l| metrics.measure_str(l, 10.0) <= 100.0));
    }

    #[test]
    fn test_wrap_empty_has_no_lines() {
        assert!(get_metrics(FontFamily::Times, false).wrap_lines("   ", 10.0, 100.0).is_empty());
    }

    #[test]
    fn test_to_latin1_transliterates() {
        assert_eq!(to_latin1("2019 – 2023 — “Lead” • café → done…"), "2019 - 2023 -- \"Lead\" - café -> done...");
        assert_eq!(to_latin1("emoji 🚀 gone"), "emoji  gone");
        assert_eq!(latin1_bytes("é"), vec![0xE9]);
    }
}
