//! Math normalization pipeline

use insta::assert_snapshot;
use note_babel::{
    clean_math_delimiters, normalize_math_content, normalize_math_content_with,
    normalize_math_delimiters, process_math_in_content, MathOptions,
};
use proptest::prelude::*;

#[test]
fn test_bare_exponents_are_wrapped() {
    let out = process_math_in_content("x^2 + y^2");
    assert!(out.contains("$x^{2}$"));
    assert!(out.contains("$y^{2}$"));
    assert_eq!(out, "$x^{2}$ + $y^{2}$");
}

#[test]
fn test_digit_scripts_for_any_base() {
    assert_eq!(process_math_in_content("2^10"), "2^{10}");
    assert_eq!(process_math_in_content("(a+b)^2"), "(a+b)^{2}");
    assert!(process_math_in_content("abcd^2").contains("^{2}"));
    assert_eq!(process_math_in_content("$2^10$ stays"), "$2^10$ stays");
}

#[test]
fn test_each_symbol_is_wrapped_alone() {
    assert_eq!(
        process_math_in_content("αβ ≤≥"),
        r"$\alpha$$\beta$ $\leq$$\geq$"
    );
}

#[test]
fn test_legacy_delimiters() {
    assert_eq!(normalize_math_delimiters(r"\[x+y\]"), "$$x+y$$");
    assert_eq!(normalize_math_delimiters(r"\(x\)"), "$x$");
}

#[test]
fn test_fenced_code_is_never_rewritten() {
    let input = "before 1/2\n```\nlet ratio = a/b;\nlet sq = x^2;\n```\nafter 1/2";
    let out = process_math_in_content(input);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[2], "let ratio = a/b;");
    assert_eq!(lines[3], "let sq = x^2;");
    assert_eq!(lines[0], r"before $\frac{1}{2}$");
    assert_eq!(lines[5], r"after $\frac{1}{2}$");
}

#[test]
fn test_no_double_wrapping() {
    let once = normalize_math_content("θ and x^2 and ∑_{i=1}^{n} and √{2}");
    assert_eq!(normalize_math_content(&once), once);
}

#[test]
fn test_note_paragraph() {
    let input = "Energy: E = mc^2\n\
                 Sum: ∑_{k=0}^{n} k\n\
                 Half of it is 1/2 or see https://example.com/a/b\n\
                 \\[\n\
                 \\int_0^1 f\n\
                 \\]\n\
                 Derivative f^'(x) for α ≥ 0";
    assert_snapshot!(normalize_math_content(input), @r###"
    Energy: E = $mc^{2}$
    Sum: $$\sum_{k=0}^{n}$$ k
    Half of it is $\frac{1}{2}$ or see https://example.com/a/b
    $$
    \int_0^1 f
    $$
    Derivative $f'(x)$ for $\alpha$ $\geq$ 0
    "###);
}

#[test]
fn test_fractions_opt_out() {
    let options = MathOptions {
        rewrite_fractions: false,
    };
    assert_eq!(
        normalize_math_content_with("and/or 3/4", &options),
        "and/or 3/4"
    );
    assert_eq!(
        normalize_math_content("and/or 3/4"),
        r"$\frac{and}{or}$ $\frac{3}{4}$"
    );
}

#[test]
fn test_empty_pairs_are_dropped() {
    assert_eq!(clean_math_delimiters("a $$ $$ b $ $ c"), "a  b  c");
    assert_eq!(normalize_math_content(r"\(  \)x"), "x");
}

proptest! {
    #[test]
    fn clean_is_idempotent(text in r"[a-z $\\\n{}]{0,40}") {
        let once = clean_math_delimiters(&text);
        prop_assert_eq!(clean_math_delimiters(&once), once);
    }

    #[test]
    fn clean_is_idempotent_on_any_text(text in ".{0,80}") {
        let once = clean_math_delimiters(&text);
        prop_assert_eq!(clean_math_delimiters(&once), once);
    }

    #[test]
    fn fenced_lines_pass_through(body in "[a-z0-9/^_ ]{0,30}") {
        let input = format!("```\n{body}\n```");
        prop_assert_eq!(process_math_in_content(&input), input);
    }
}
