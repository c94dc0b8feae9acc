//! Per-line rewrite rules
//!
//! Rules run in a fixed order, each one over the plain segments left by the
//! previous rule, so a span produced by an earlier rule is never rewritten by a
//! later one. The first rule only braces bare digit scripts (`^2` → `^{2}`) and
//! wraps nothing, so every later rule sees the braced form.

use super::delimiters::clean_math_delimiters;
use super::spans::{char_at, char_before, replace_matches, rewrite_outside_math};
use super::symbols;
use super::MathOptions;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Brace group with one level of nesting, a parenthesized group, or digits
const SCRIPT_ARGUMENT: &str = r"(?:\{(?:[^{}]|\{[^{}]*\})*\}|\([^()]*\)|\d+)";

static BARE_DIGIT_SCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<op>[\^_])(?P<digits>\d+)").expect("valid digit script regex"));
static SCRIPT_EXPRESSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?P<base>[A-Za-z]{{1,3}}\d?)(?P<first>\s*[\^_]\s*{SCRIPT_ARGUMENT})(?P<second>\s*[\^_]\s*{SCRIPT_ARGUMENT})?"
    ))
    .expect("valid script regex")
});
static PRIME_BEFORE_ARGS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<f>[A-Za-z])\^(?P<primes>['′’]+)(?P<args>\([^()]*\))")
        .expect("valid prime regex")
});
static PRIME_AFTER_ARGS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<f>[A-Za-z])(?P<args>\([^()]*\))\^(?P<primes>['′’]+)")
        .expect("valid prime regex")
});
static FRACTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<num>[^\s/]+)/(?P<den>[^\s/]+)").expect("valid fraction regex"));
static BIG_OPERATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<op>[∑Σ∫∏Π])\s*(?:_\s*)?\{(?P<lower>[^{}]*)\}\s*(?:\^\s*)?\{(?P<upper>[^{}]*)\}")
        .expect("valid operator regex")
});
static LIMIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\blim\s*(?:_\s*)?\{(?P<approach>[^{}]*)\}").expect("valid limit regex")
});
static SQUARE_ROOT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"√(?:\{(?P<group>[^{}]*)\}|(?P<single>[A-Za-z0-9]))").expect("valid root regex")
});
static SYMBOL: Lazy<Regex> = Lazy::new(|| {
    let class: String = symbols::glyphs()
        .map(|c| regex::escape(&c.to_string()))
        .collect();
    Regex::new(&format!("[{class}]")).expect("valid symbol regex")
});

/// Run every rule over one line outside code, preformatted and block math
pub fn rewrite_line(line: &str, options: &MathOptions) -> String {
    let mut line = rewrite_outside_math(line, brace_digit_scripts);
    line = rewrite_outside_math(&line, wrap_script_expressions);
    line = rewrite_outside_math(&line, wrap_primes);
    if options.rewrite_fractions {
        line = rewrite_outside_math(&line, wrap_fractions);
    }
    line = rewrite_outside_math(&line, wrap_operators);
    line = rewrite_outside_math(&line, wrap_square_roots);
    line = rewrite_outside_math(&line, wrap_symbols);
    clean_math_delimiters(&line)
}

/// Whether a match starting at `start` begins a new token.
///
/// Letters, underscores, backslashes and dollars before the match mean it sits
/// inside an identifier, a command or a stray delimiter.
fn starts_token(text: &str, start: usize) -> bool {
    !matches!(char_before(text, start), Some(c) if c.is_alphabetic() || matches!(c, '_' | '\\' | '$'))
}

/// `^10` → `^{10}` and `_1` → `_{1}` wherever they appear, identifiers included
fn brace_digit_scripts(segment: &str) -> String {
    replace_matches(segment, &BARE_DIGIT_SCRIPT, |caps, text| {
        let whole = caps.get(0)?;
        if char_before(text, whole.start()) == Some('\\') {
            return None;
        }
        Some(format!("{}{{{}}}", &caps["op"], &caps["digits"]))
    })
}

/// `x^{2}`, `a_{ij}`, `x2^{3}`, `x_1^2` and `(n+1)` arguments
fn wrap_script_expressions(segment: &str) -> String {
    replace_matches(segment, &SCRIPT_EXPRESSION, |caps, text| {
        let whole = caps.get(0)?;
        let base = &caps["base"];
        if base == "lim" || !starts_token(text, whole.start()) {
            return None;
        }
        let mut expression = format!("${base}");
        expression.push_str(&brace_script(&caps["first"]));
        if let Some(second) = caps.name("second") {
            expression.push_str(&brace_script(second.as_str()));
        }
        expression.push('$');
        Some(expression)
    })
}

/// Normalize one `^arg` / `_arg` part: no whitespace, argument in braces
fn brace_script(script: &str) -> String {
    let script = script.trim_start();
    let mut chars = script.chars();
    let operator = chars.next().unwrap_or('^');
    let argument = chars.as_str().trim_start();

    let inner = if let Some(group) = argument.strip_prefix('(').and_then(|a| a.strip_suffix(')')) {
        group
    } else if let Some(group) = argument.strip_prefix('{').and_then(|a| a.strip_suffix('}')) {
        group
    } else {
        argument
    };
    format!("{operator}{{{inner}}}")
}

/// `f^'(x)` and `f(x)^''`, with curly primes made straight
fn wrap_primes(segment: &str) -> String {
    let once = replace_matches(segment, &PRIME_BEFORE_ARGS, prime_expression);
    replace_matches(&once, &PRIME_AFTER_ARGS, prime_expression)
}

fn prime_expression(caps: &Captures, text: &str) -> Option<String> {
    let whole = caps.get(0)?;
    if !starts_token(text, whole.start()) {
        return None;
    }
    let primes = "'".repeat(caps["primes"].chars().count());
    Some(format!("${}{primes}{}$", &caps["f"], &caps["args"]))
}

/// `1/2` and short alphanumeric `a/b`, never inside paths or URLs
fn wrap_fractions(segment: &str) -> String {
    replace_matches(segment, &FRACTION, |caps, text| {
        let whole = caps.get(0)?;
        if char_before(text, whole.start()) == Some('/') || char_at(text, whole.end()) == Some('/') {
            return None;
        }
        if looks_like_link(enclosing_word(text, whole.start(), whole.end())) {
            return None;
        }

        let (lead, num) = split_leading_punctuation(&caps["num"]);
        let (den, trail) = split_trailing_punctuation(&caps["den"]);
        if num.is_empty() || den.is_empty() {
            return None;
        }
        let numeric = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        let short = |s: &str| s.chars().count() <= 4 && s.chars().all(|c| c.is_ascii_alphanumeric());
        if (numeric(num) && numeric(den)) || (short(num) && short(den)) {
            Some(format!(r"{lead}$\frac{{{num}}}{{{den}}}${trail}"))
        } else {
            None
        }
    })
}

/// Opening brackets and quotes stay outside the fraction
fn split_leading_punctuation(token: &str) -> (&str, &str) {
    let core = token.trim_start_matches(['(', '[', '"', '\'', '“', '‘']);
    token.split_at(token.len() - core.len())
}

/// Closing brackets, quotes and sentence punctuation stay outside the fraction
fn split_trailing_punctuation(token: &str) -> (&str, &str) {
    let core = token.trim_end_matches([')', ']', '"', '\'', '”', '’', '.', ',', ';', ':', '!', '?']);
    token.split_at(core.len())
}

/// The whitespace-delimited word containing `start..end`
fn enclosing_word(text: &str, start: usize, end: usize) -> &str {
    let word_start = text[..start]
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());
    let word_end = text[end..]
        .find(char::is_whitespace)
        .map_or(text.len(), |i| end + i);
    &text[word_start..word_end]
}

fn looks_like_link(word: &str) -> bool {
    let word = word.to_ascii_lowercase();
    word.contains("http") || word.contains("://") || word.contains("www")
}

/// `∑_{i=1}^{n}` style operators with bounds, and `lim_{x→0}`
fn wrap_operators(segment: &str) -> String {
    let bounded = replace_matches(segment, &BIG_OPERATOR, |caps, _| {
        let command = match caps["op"].chars().next()? {
            '∑' | 'Σ' => r"\sum",
            '∫' => r"\int",
            _ => r"\prod",
        };
        Some(format!(
            "$${command}_{{{}}}^{{{}}}$$",
            &caps["lower"], &caps["upper"]
        ))
    });
    replace_matches(&bounded, &LIMIT, |caps, text| {
        let whole = caps.get(0)?;
        if char_before(text, whole.start()) == Some('\\') {
            return None;
        }
        Some(format!(r"$\lim_{{{}}}$", &caps["approach"]))
    })
}

/// `√{x+1}` and `√x`
fn wrap_square_roots(segment: &str) -> String {
    replace_matches(segment, &SQUARE_ROOT, |caps, _| {
        let radicand = caps.name("group").or_else(|| caps.name("single"))?;
        Some(format!(r"$\sqrt{{{}}}$", radicand.as_str()))
    })
}

/// Greek letters and math symbols, one span per glyph
fn wrap_symbols(segment: &str) -> String {
    replace_matches(segment, &SYMBOL, |caps, text| {
        let whole = caps.get(0)?;
        if matches!(char_before(text, whole.start()), Some('$' | '\\')) {
            return None;
        }
        let command = whole.as_str().chars().next().and_then(symbols::control_sequence)?;
        Some(format!("${command}$"))
    })
}
