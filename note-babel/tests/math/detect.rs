//! Math detection heuristics

use note_babel::detect_math_content;

#[test]
fn test_prose_is_not_math() {
    for text in [
        "hello world",
        "Meeting at 10am, bring snacks.",
        "snake_case_names and kebab-case",
        "",
    ] {
        assert!(!detect_math_content(text), "{text:?}");
    }
}

#[test]
fn test_shorthand_and_commands() {
    for text in [
        "E = mc^2",
        "x_1 + x_2",
        "a^{n+1}",
        r"\frac{a}{b}",
        r"\alpha + 1",
        r"\sqrt{2}",
    ] {
        assert!(detect_math_content(text), "{text:?}");
    }
}

#[test]
fn test_delimited_spans() {
    assert!(detect_math_content("inline $a+b$ math"));
    assert!(detect_math_content("$$\nx\n$$"));
    assert!(detect_math_content(r"\(x\)"));
    assert!(detect_math_content(r"\[x\]"));
}

#[test]
fn test_unicode_symbols() {
    for text in ["∑ of terms", "∫ dx", "α", "x ≤ y", "A ⊆ B", "p ⇒ q", "∞"] {
        assert!(detect_math_content(text), "{text:?}");
    }
}

#[test]
fn test_derivatives() {
    assert!(detect_math_content("dy/dx is the slope"));
    assert!(detect_math_content("d/dt of position"));
}
