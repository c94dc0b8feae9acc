//! Math span tokenizer
//!
//! Splits text into plain segments and `$...$` / `$$...$$` spans. Rewrite rules
//! only ever see the plain segments, which is what keeps them from wrapping
//! something that is already math.
//!
//! Scanning rules:
//! - `\$` is a literal dollar and never opens or closes a span
//! - `$$` opens a display span closed by the next `$$`, newlines included
//! - a single `$` opens an inline span closed by the next `$` on the same line
//! - an opener without a closer stays in the surrounding text

use regex::{Captures, Regex};
use std::ops::Range;

/// A slice of the scanned text, as byte ranges into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Text(Range<usize>),
    Math {
        /// Span including its delimiters
        outer: Range<usize>,
        /// Span content between the delimiters
        inner: Range<usize>,
        display: bool,
    },
}

pub fn split_math(text: &str) -> Vec<Piece> {
    let bytes = text.as_bytes();
    let mut pieces = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' if bytes.get(i + 1) == Some(&b'$') => i += 2,
            b'$' => {
                let display = bytes.get(i + 1) == Some(&b'$');
                let width = if display { 2 } else { 1 };
                let close = if display {
                    find_display_close(bytes, i + 2)
                } else {
                    find_inline_close(bytes, i + 1)
                };
                match close {
                    Some(close) => {
                        if text_start < i {
                            pieces.push(Piece::Text(text_start..i));
                        }
                        let end = close + width;
                        pieces.push(Piece::Math {
                            outer: i..end,
                            inner: i + width..close,
                            display,
                        });
                        i = end;
                        text_start = end;
                    }
                    None => i += width,
                }
            }
            _ => i += 1,
        }
    }

    if text_start < bytes.len() {
        pieces.push(Piece::Text(text_start..bytes.len()));
    }
    pieces
}

fn find_display_close(bytes: &[u8], from: usize) -> Option<usize> {
    let mut j = from;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' if bytes.get(j + 1) == Some(&b'$') => j += 2,
            b'$' if bytes.get(j + 1) == Some(&b'$') => return Some(j),
            _ => j += 1,
        }
    }
    None
}

fn find_inline_close(bytes: &[u8], from: usize) -> Option<usize> {
    let mut j = from;
    while j < bytes.len() {
        match bytes[j] {
            b'\n' => return None,
            b'\\' if bytes.get(j + 1) == Some(&b'$') => j += 2,
            b'$' => return Some(j),
            _ => j += 1,
        }
    }
    None
}

/// Number of `$$` markers on a line that open or close a display region.
///
/// A `$$...$$` pair closed on the same line does not count; adjacent inline spans
/// such as `$a$$b$` do not count either.
pub fn unmatched_display_markers(line: &str) -> usize {
    let bytes = line.as_bytes();
    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if bytes.get(i + 1) == Some(&b'$') => i += 2,
            b'$' if bytes.get(i + 1) == Some(&b'$') => match find_display_close(bytes, i + 2) {
                Some(close) => i = close + 2,
                None => {
                    count += 1;
                    i += 2;
                }
            },
            b'$' => match find_inline_close(bytes, i + 1) {
                Some(close) => i = close + 1,
                None => i += 1,
            },
            _ => i += 1,
        }
    }
    count
}

/// Apply `rewrite` to every plain segment, copying math spans through untouched
pub fn rewrite_outside_math<F>(text: &str, mut rewrite: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut output = String::with_capacity(text.len());
    for piece in split_math(text) {
        match piece {
            Piece::Text(range) => output.push_str(&rewrite(&text[range])),
            Piece::Math { outer, .. } => output.push_str(&text[outer]),
        }
    }
    output
}

/// Like `Regex::replace_all`, but the replacer sees the whole haystack and may
/// return `None` to leave a match as it is.
pub fn replace_matches<F>(text: &str, pattern: &Regex, mut replace: F) -> String
where
    F: FnMut(&Captures, &str) -> Option<String>,
{
    let mut output = String::with_capacity(text.len());
    let mut last = 0;
    for caps in pattern.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if let Some(replacement) = replace(&caps, text) {
            output.push_str(&text[last..whole.start()]);
            output.push_str(&replacement);
            last = whole.end();
        }
    }
    output.push_str(&text[last..]);
    output
}

/// Character immediately before byte offset `at`
pub fn char_before(text: &str, at: usize) -> Option<char> {
    text[..at].chars().next_back()
}

/// Character starting at byte offset `at`
pub fn char_at(text: &str, at: usize) -> Option<char> {
    text[at..].chars().next()
}
