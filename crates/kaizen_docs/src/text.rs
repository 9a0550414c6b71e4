//! Font metrics and word wrapping for the built-in PDF fonts.
//!
//! Widths are the Adobe AFM advance widths for Helvetica and Helvetica-Bold,
//! in 1/1000 em, for printable ASCII. Characters outside ASCII use the
//! average width of a lowercase glyph.

use kaizen_core::ExportError;

/// The two standard fonts the PDF renderer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    pub fn base_font(&self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
        }
    }

    /// Resource name used in content streams.
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Bold => "F1",
            Self::Regular => "F2",
        }
    }

    fn widths(&self) -> &'static [u16; 95] {
        match self {
            Self::Regular => &HELVETICA_WIDTHS,
            Self::Bold => &HELVETICA_BOLD_WIDTHS,
        }
    }
}

const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9 : ; < = > ? @
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Advance width of one character in 1/1000 em.
pub fn char_width(font: Font, ch: char) -> u16 {
    let code = ch as u32;
    if (32..=126).contains(&code) {
        font.widths()[(code - 32) as usize]
    } else if ch == '\t' {
        font.widths()[0]
    } else {
        FALLBACK_WIDTH
    }
}

/// Rendered width of `text` in points.
pub fn text_width(text: &str, font: Font, size: f64) -> f64 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(font, c))).sum();
    f64::from(units) * size / 1000.0
}

/// Map a character to its WinAnsiEncoding byte. Unmappable characters
/// become `?`.
pub fn win_ansi_byte(ch: char) -> u8 {
    let code = ch as u32;
    match ch {
        '\t' => b' ',
        _ if (32..=126).contains(&code) => code as u8,
        _ if (0xA0..=0xFF).contains(&code) => code as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    }
}

/// Word-wrap `text` so no line exceeds `max_width` points.
///
/// Explicit newlines are kept as line breaks and blank input lines survive
/// as empty strings. A word wider than the line is broken by character.
pub fn wrap_text(
    text: &str,
    font: Font,
    size: f64,
    max_width: f64,
) -> Result<Vec<String>, ExportError> {
    if !size.is_finite() || size <= 0.0 {
        return Err(ExportError::Layout(format!("invalid font size {size}")));
    }
    if !max_width.is_finite() || max_width <= 0.0 {
        return Err(ExportError::Layout(format!(
            "no horizontal space to lay out text ({max_width:.1}pt)"
        )));
    }

    let mut lines = Vec::new();
    for raw in text.split('\n') {
        let raw = raw.trim_end_matches('\r');
        let mut current = String::new();
        let mut any_word = false;

        for word in raw.split_whitespace() {
            any_word = true;
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if text_width(&candidate, font, size) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if text_width(word, font, size) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = break_word(word, font, size, max_width);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }

        if any_word {
            lines.push(current);
        } else {
            lines.push(String::new());
        }
    }
    Ok(lines)
}

/// Split an overlong word into chunks that each fit. Every chunk holds at
/// least one character so narrow columns still make progress.
fn break_word(word: &str, font: Font, size: f64, max_width: f64) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut chunk = String::new();
    for ch in word.chars() {
        chunk.push(ch);
        if chunk.chars().count() > 1 && text_width(&chunk, font, size) > max_width {
            chunk.pop();
            pieces.push(std::mem::take(&mut chunk));
            chunk.push(ch);
        }
    }
    if !chunk.is_empty() {
        pieces.push(chunk);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        assert_eq!(char_width(Font::Regular, ' '), 278);
        assert_eq!(char_width(Font::Regular, 'W'), 944);
        assert_eq!(char_width(Font::Regular, 'i'), 222);
        assert_eq!(char_width(Font::Bold, 'i'), 278);
        assert_eq!(char_width(Font::Regular, '~'), 584);
        assert_eq!(char_width(Font::Bold, '@'), 975);
        assert_eq!(char_width(Font::Regular, 'é'), FALLBACK_WIDTH);
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let w10 = text_width("Kaizen", Font::Regular, 10.0);
        let w20 = text_width("Kaizen", Font::Regular, 20.0);
        assert!((w20 - 2.0 * w10).abs() < 1e-9);
        assert!(text_width("Kaizen", Font::Bold, 10.0) > w10);
    }

    #[test]
    fn test_win_ansi_mapping() {
        assert_eq!(win_ansi_byte('A'), b'A');
        assert_eq!(win_ansi_byte('é'), 0xE9);
        assert_eq!(win_ansi_byte('•'), 0x95);
        assert_eq!(win_ansi_byte('–'), 0x96);
        assert_eq!(win_ansi_byte('→'), b'?');
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let lines = wrap_text("Reject turun", Font::Regular, 11.0, 300.0).unwrap();
        assert_eq!(lines, vec!["Reject turun"]);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Operator belum memahami prosedur setting mesin sealer sehingga \
                    suhu tidak stabil pada shift malam";
        let lines = wrap_text(text, Font::Regular, 11.0, 120.0).unwrap();
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, Font::Regular, 11.0) <= 120.0, "{line}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_wrap_keeps_newlines_and_blank_lines() {
        let lines = wrap_text("satu\n\ndua", Font::Regular, 11.0, 300.0).unwrap();
        assert_eq!(lines, vec!["satu", "", "dua"]);
    }

    #[test]
    fn test_wrap_breaks_long_word() {
        let word = "Pneumonoultramicroscopicsilicovolcanoconiosis";
        let lines = wrap_text(word, Font::Bold, 12.0, 60.0).unwrap();
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_wrap_rejects_bad_geometry() {
        assert!(matches!(
            wrap_text("x", Font::Regular, 11.0, 0.0),
            Err(ExportError::Layout(_))
        ));
        assert!(matches!(
            wrap_text("x", Font::Regular, f64::NAN, 100.0),
            Err(ExportError::Layout(_))
        ));
    }

    #[test]
    fn test_wrap_empty_text() {
        assert_eq!(wrap_text("", Font::Regular, 11.0, 100.0).unwrap(), vec![""]);
    }
}
