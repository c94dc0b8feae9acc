//! Math normalization for note content
//!
//! Turns informal notation typed in notes (`x^2`, `1/2`, `θ`, `∑_{i=1}^{n}`) into
//! explicit `$...$` / `$$...$$` spans that a math renderer can pick up.
//!
//! The entry points mirror the stages of the pipeline:
//!
//! | Function                        | Stage                                        |
//! |---------------------------------|----------------------------------------------|
//! | [`detect_math_content`]         | cheap check, no rewriting                    |
//! | [`normalize_math_delimiters`]   | `\[..\]` → `$$..$$`, `\(..\)` → `$..$`        |
//! | [`process_math_in_content`]     | line-by-line rewrite rules                   |
//! | [`clean_math_delimiters`]       | drop empty delimiter pairs                   |
//! | [`normalize_math_content`]      | all of the above, in that order              |
//!
//! Processing is line oriented and stateful. Fenced code, `<pre>` regions and
//! `$$` display regions pass through untouched, as do the lines that open and
//! close them.

mod delimiters;
mod detect;
mod rewrite;
mod spans;
mod symbols;

pub use delimiters::{clean_math_delimiters, normalize_math_delimiters};
pub use detect::detect_math_content;

/// Knobs for the rewrite rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MathOptions {
    /// Rewrite `1/2` and short `a/b` to `\frac`. Prose such as `and/or` is
    /// rewritten as well when this is on.
    pub rewrite_fractions: bool,
}

impl Default for MathOptions {
    fn default() -> Self {
        Self {
            rewrite_fractions: true,
        }
    }
}

/// Where the line scanner currently is
#[derive(Debug, Default)]
struct LineState {
    in_code_block: bool,
    in_pre_tag: bool,
    in_math_block: bool,
}

impl LineState {
    /// Update the state for `line`; true when the line must pass through as is.
    ///
    /// Any line holding `$$` passes through, but only an odd number of unmatched
    /// `$$` markers flips `in_math_block`, so `$$x$$` or `$a$$b$` leave it alone.
    fn is_protected(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            self.in_code_block = !self.in_code_block;
            return true;
        }
        if self.in_code_block {
            return true;
        }

        let was_in_pre = self.in_pre_tag;
        match (find_pre_open(line), line.rfind("</pre>")) {
            (Some(open), Some(close)) => self.in_pre_tag = open > close,
            (Some(_), None) => self.in_pre_tag = true,
            (None, Some(_)) => self.in_pre_tag = false,
            (None, None) => {}
        }
        if was_in_pre || self.in_pre_tag || line.contains("</pre>") {
            return true;
        }

        if line.contains("$$") {
            if spans::unmatched_display_markers(line) % 2 == 1 {
                self.in_math_block = !self.in_math_block;
            }
            return true;
        }
        self.in_math_block
    }
}

/// Byte offset of the last `<pre>` / `<pre ...>` opening tag on the line
fn find_pre_open(line: &str) -> Option<usize> {
    line.match_indices("<pre")
        .filter(|(at, tag)| {
            matches!(line[at + tag.len()..].chars().next(), Some(c) if c == '>' || c.is_whitespace())
        })
        .map(|(at, _)| at)
        .last()
}

/// Wrap informal math notation in delimiters, using default options
pub fn process_math_in_content(text: &str) -> String {
    process_math_in_content_with(text, &MathOptions::default())
}

/// Wrap informal math notation in delimiters.
///
/// Lines are separated on `\n` and joined back the same way, so line endings
/// and trailing newlines survive.
pub fn process_math_in_content_with(text: &str, options: &MathOptions) -> String {
    let mut state = LineState::default();
    let mut rewritten = 0usize;

    let lines: Vec<String> = text
        .split('\n')
        .map(|line| {
            if state.is_protected(line) {
                return line.to_string();
            }
            let output = rewrite::rewrite_line(line, options);
            if output != line {
                rewritten += 1;
            }
            output
        })
        .collect();

    tracing::trace!(
        lines = lines.len(),
        rewritten,
        unclosed_code = state.in_code_block,
        unclosed_math = state.in_math_block,
        "processed math"
    );
    lines.join("\n")
}

/// Full pipeline with default options
pub fn normalize_math_content(text: &str) -> String {
    normalize_math_content_with(text, &MathOptions::default())
}

/// Normalize delimiters, rewrite notation, then clean empty pairs
pub fn normalize_math_content_with(text: &str, options: &MathOptions) -> String {
    let delimited = normalize_math_delimiters(text);
    let processed = process_math_in_content_with(&delimited, options);
    clean_math_delimiters(&processed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_code_untouched() {
        let input = "a/b\n```\na/b\nx^2\n```\nx^2";
        assert_eq!(
            process_math_in_content(input),
            "$\\frac{a}{b}$\n```\na/b\nx^2\n```\n$x^{2}$"
        );
    }

    #[test]
    fn test_tilde_fence_and_indentation() {
        let input = "  ~~~\nθ\n  ~~~\nθ";
        assert_eq!(process_math_in_content(input), "  ~~~\nθ\n  ~~~\n$\\theta$");
    }

    #[test]
    fn test_pre_region_untouched() {
        let input = "<pre>\nx^2\n</pre>\nx^2";
        assert_eq!(process_math_in_content(input), "<pre>\nx^2\n</pre>\n$x^{2}$");
    }

    #[test]
    fn test_single_line_pre_untouched() {
        let input = "<pre><code>x^2</code></pre>\nx^2";
        assert_eq!(
            process_math_in_content(input),
            "<pre><code>x^2</code></pre>\n$x^{2}$"
        );
    }

    #[test]
    fn test_display_block_untouched() {
        let input = "$$\nx^2 + θ\n$$\nθ";
        assert_eq!(process_math_in_content(input), "$$\nx^2 + θ\n$$\n$\\theta$");
    }

    #[test]
    fn test_display_pair_on_one_line_does_not_open_block() {
        let input = "$$a$$\nθ";
        assert_eq!(process_math_in_content(input), "$$a$$\n$\\theta$");
    }

    #[test]
    fn test_line_endings_survive() {
        assert_eq!(process_math_in_content("a\n\nb\n"), "a\n\nb\n");
    }

    #[test]
    fn test_normalize_pipeline() {
        assert_eq!(normalize_math_content(r"\(x\)"), "$x$");
        assert_eq!(normalize_math_content(r"\[x+y\]"), "$$x+y$$");
        assert_eq!(normalize_math_content(r"\( \) and θ"), r" and $\theta$");
    }

    #[test]
    fn test_multiline_display_brackets_become_block() {
        let input = "\\[\n1/2\n\\]\n1/2";
        assert_eq!(
            normalize_math_content(input),
            "$$\n1/2\n$$\n$\\frac{1}{2}$"
        );
    }

    #[test]
    fn test_fraction_option() {
        let options = MathOptions {
            rewrite_fractions: false,
        };
        assert_eq!(normalize_math_content_with("1/2 and x^2", &options), "1/2 and $x^{2}$");
    }
}
