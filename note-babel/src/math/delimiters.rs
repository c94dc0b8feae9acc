//! Delimiter rewriting and cleanup

use super::spans::{split_math, Piece};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static DISPLAY_BRACKETS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\\\[(.*?)\\\]").expect("valid display bracket regex"));
static INLINE_PARENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\\\((.*?)\\\)").expect("valid inline paren regex"));

/// Rewrite `\[...\]` to `$$...$$` and `\(...\)` to `$...$`.
///
/// Content between the delimiters is kept verbatim; pairs may span lines.
pub fn normalize_math_delimiters(text: &str) -> String {
    let display = DISPLAY_BRACKETS.replace_all(text, |caps: &Captures| format!("$${}$$", &caps[1]));
    INLINE_PARENS
        .replace_all(&display, |caps: &Captures| format!("${}$", &caps[1]))
        .into_owned()
}

/// Drop delimiter pairs whose content is empty or whitespace only.
///
/// Non-empty spans and unmatched delimiters are left alone, so applying this
/// twice gives the same result as applying it once.
pub fn clean_math_delimiters(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for piece in split_math(text) {
        match piece {
            Piece::Text(range) => output.push_str(&text[range]),
            Piece::Math { outer, inner, .. } => {
                if !text[inner].trim().is_empty() {
                    output.push_str(&text[outer]);
                }
            }
        }
    }
    output
}
