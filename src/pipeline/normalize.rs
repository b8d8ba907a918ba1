//! Text normalization shared by the text-layer and OCR paths.
//!
//! Both pdfium and Tesseract hand back text with platform noise: NUL padding
//! from broken ToUnicode maps, `\r\n` or bare `\r` line endings, and leading
//! or trailing blank lines. Every piece of text is passed through
//! [`normalize`] before anything inspects it.

/// Normalize raw page text.
///
/// Rules, in order:
/// 1. Remove every NUL character
/// 2. Convert CRLF and bare CR to LF
/// 3. Trim leading and trailing whitespace (see [`is_blank_char`])
///
/// The function is idempotent.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let s = strip_nul(raw);
    let s = normalise_line_endings(&s);
    s.trim_matches(is_blank_char).to_string()
}

/// `true` if the text has at least one non-blank character.
///
/// NUL counts as padding, so un-normalized `"\0\0"` is not meaningful either.
pub fn is_meaningful(text: &str) -> bool {
    text.chars().any(|c| !is_blank_char(c) && c != '\0')
}

/// Unicode whitespace plus the ASCII information separators U+001C..=U+001F.
///
/// pdfium emits the separators for glyphs with broken ToUnicode maps, and a
/// page holding nothing else has no usable text layer.
pub fn is_blank_char(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

fn strip_nul(input: &str) -> String {
    input.replace('\0', "")
}

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_maps_to_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn strips_nul() {
        assert_eq!(normalize("a\0b\0"), "ab");
        assert_eq!(normalize("\0\0"), "");
    }

    #[test]
    fn unifies_line_endings() {
        assert_eq!(normalize("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn nul_between_cr_and_lf_collapses_to_one_newline() {
        assert_eq!(normalize("a\r\0\nb"), "a\nb");
    }

    #[test]
    fn trims_surrounding_whitespace_only() {
        assert_eq!(normalize("\n\t  line one\n\n line two  \r\n"), "line one\n\n line two");
    }

    #[test]
    fn idempotent_on_tricky_inputs() {
        let samples = [
            "",
            "   ",
            "\r\r\n\n",
            "\0 \r\0\n x \r",
            "ગુજરાતી\r\nहिन्दी\u{3000}",
            "\u{feff}text",
            "a\r\n\r\nb",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn non_meaningful_inputs() {
        for s in ["", "   ", "\n\t", "\x00\x00", "\u{3000}\u{a0}"] {
            assert!(!is_meaningful(s), "{s:?} should not be meaningful");
        }
    }

    #[test]
    fn information_separators_are_blank() {
        assert_eq!(normalize("\x1c"), "");
        assert_eq!(normalize("\x1f\x1e"), "");
        assert_eq!(normalize("\x1d text \x1c\n"), "text");
        assert!(!is_meaningful("\x1c"));
        assert!(!is_meaningful("\x1f\x1e"));
        assert!(!is_meaningful(" \x1d\n\x1e\t"));
        assert!(is_meaningful("\x1cક\x1f"));
        assert_eq!(normalize(&normalize("\x1c \x1d")), normalize("\x1c \x1d"));
    }

    #[test]
    fn meaningful_inputs() {
        assert!(is_meaningful("a"));
        assert!(is_meaningful("  .  "));
        assert!(is_meaningful("\n૧\n"));
    }
}
