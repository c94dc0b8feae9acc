//! Glyph → control sequence tables.

/// Greek letters that have a control sequence of their own.
///
/// Capital letters identical to Latin ones (Α, Β, Ε, ...) are absent on purpose:
/// typesetting them as `A`, `B`, `E` would change the text.
pub const GREEK: &[(char, &str)] = &[
    ('α', r"\alpha"),
    ('β', r"\beta"),
    ('γ', r"\gamma"),
    ('δ', r"\delta"),
    ('ε', r"\epsilon"),
    ('ζ', r"\zeta"),
    ('η', r"\eta"),
    ('θ', r"\theta"),
    ('ι', r"\iota"),
    ('κ', r"\kappa"),
    ('λ', r"\lambda"),
    ('μ', r"\mu"),
    ('ν', r"\nu"),
    ('ξ', r"\xi"),
    ('π', r"\pi"),
    ('ρ', r"\rho"),
    ('σ', r"\sigma"),
    ('ς', r"\varsigma"),
    ('τ', r"\tau"),
    ('υ', r"\upsilon"),
    ('φ', r"\phi"),
    ('χ', r"\chi"),
    ('ψ', r"\psi"),
    ('ω', r"\omega"),
    ('Γ', r"\Gamma"),
    ('Δ', r"\Delta"),
    ('Θ', r"\Theta"),
    ('Λ', r"\Lambda"),
    ('Ξ', r"\Xi"),
    ('Π', r"\Pi"),
    ('Σ', r"\Sigma"),
    ('Υ', r"\Upsilon"),
    ('Φ', r"\Phi"),
    ('Ψ', r"\Psi"),
    ('Ω', r"\Omega"),
];

/// Operators, relations, arrows and set/logic symbols.
pub const SYMBOLS: &[(char, &str)] = &[
    ('∑', r"\sum"),
    ('∏', r"\prod"),
    ('∫', r"\int"),
    ('∬', r"\iint"),
    ('∭', r"\iiint"),
    ('∮', r"\oint"),
    ('∞', r"\infty"),
    ('∂', r"\partial"),
    ('∇', r"\nabla"),
    ('±', r"\pm"),
    ('∓', r"\mp"),
    ('×', r"\times"),
    ('÷', r"\div"),
    ('·', r"\cdot"),
    ('≤', r"\leq"),
    ('≥', r"\geq"),
    ('≠', r"\neq"),
    ('≈', r"\approx"),
    ('≡', r"\equiv"),
    ('∝', r"\propto"),
    ('∈', r"\in"),
    ('∉', r"\notin"),
    ('⊂', r"\subset"),
    ('⊃', r"\supset"),
    ('⊆', r"\subseteq"),
    ('⊇', r"\supseteq"),
    ('∪', r"\cup"),
    ('∩', r"\cap"),
    ('∅', r"\emptyset"),
    ('∀', r"\forall"),
    ('∃', r"\exists"),
    ('¬', r"\neg"),
    ('∧', r"\land"),
    ('∨', r"\lor"),
    ('⇒', r"\Rightarrow"),
    ('⇐', r"\Leftarrow"),
    ('⇔', r"\Leftrightarrow"),
    ('→', r"\to"),
    ('←', r"\leftarrow"),
    ('↔', r"\leftrightarrow"),
    ('⊥', r"\perp"),
    ('∠', r"\angle"),
];

/// Control sequence names recognized by detection, without the backslash.
pub const CONTROL_SEQUENCES: &[&str] = &[
    "frac", "sqrt", "sum", "int", "prod", "lim", "alpha", "beta", "gamma", "delta", "epsilon",
    "zeta", "eta", "theta", "iota", "kappa", "lambda", "mu", "nu", "xi", "pi", "rho", "sigma",
    "tau", "upsilon", "phi", "chi", "psi", "omega", "Gamma", "Delta", "Theta", "Lambda", "Xi",
    "Pi", "Sigma", "Upsilon", "Phi", "Psi", "Omega",
];

/// Control sequence for a glyph from either table
pub fn control_sequence(glyph: char) -> Option<&'static str> {
    GREEK
        .iter()
        .chain(SYMBOLS)
        .find(|(c, _)| *c == glyph)
        .map(|(_, name)| *name)
}

/// Every glyph of both tables, in table order
pub fn glyphs() -> impl Iterator<Item = char> {
    GREEK.iter().chain(SYMBOLS).map(|(c, _)| *c)
}
