//! Heuristic math detection

use super::symbols::{self, CONTROL_SEQUENCES};
use once_cell::sync::Lazy;
use regex::RegexSet;

static MATH_SIGNALS: Lazy<RegexSet> = Lazy::new(|| {
    let glyphs: String = symbols::glyphs()
        .chain(['√', '∂'])
        .map(|c| regex::escape(&c.to_string()))
        .collect();
    let commands = CONTROL_SEQUENCES.join("|");

    RegexSet::new([
        // existing delimited spans
        r"(?s)\$\$.+?\$\$".to_string(),
        r"\$[^$\n]+\$".to_string(),
        r"(?s)\\\[.*?\\\]".to_string(),
        r"(?s)\\\(.*?\\\)".to_string(),
        // control sequences
        format!(r"\\(?:{commands})\b"),
        // scripts: x^{2}, a_{ij}, x^2, a_1
        r"[A-Za-z0-9]\s*[\^_]\s*\{[^}]*\}".to_string(),
        r"[A-Za-z0-9][\^_]\d+".to_string(),
        // math glyphs
        format!("[{glyphs}]"),
        // derivatives
        r"\bd[A-Za-z]?/d[A-Za-z]\b".to_string(),
        r"∂[A-Za-z]?/∂".to_string(),
    ])
    .expect("valid math detection patterns")
});

/// Heuristically decide whether `text` contains mathematical notation
pub fn detect_math_content(text: &str) -> bool {
    MATH_SIGNALS.is_match(text)
}
