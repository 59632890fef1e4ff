//! Replace non-ASCII glyphs with LaTeX-safe text.
//!
//! Pandoc passes box-drawing characters, arrows, typographic quotes and
//! similar glyphs straight through to its LaTeX output, where the default
//! fonts cannot render them. [`normalize_glyphs`] rewrites them using an
//! ordered substitution table.

/// Substitutions applied in order, first entry first.
///
/// Several composite entries start with a glyph that an earlier entry already
/// replaces, so they never match. They are kept so the table stays in its
/// established order.
pub const GLYPH_REPLACEMENTS: &[(&str, &str)] = &[
    ("\u{251C}", "|"),
    ("\u{2502}", "|"),
    ("\u{2514}", "`"),
    ("\u{2500}", "-"),
    ("\u{250C}", "+"),
    ("\u{2510}", "+"),
    ("\u{2518}", "+"),
    ("\u{2534}", "+"),
    ("\u{252C}", "+"),
    ("\u{2524}", "+"),
    ("\u{251C}\u{2500}\u{2500}", "|--"),
    ("\u{2514}\u{2500}\u{2500}", "`--"),
    ("\u{2502}   ", "|   "),
    ("\u{2713}", r"\checkmark"),
    ("\u{2717}", r"\texttimes"),
    ("\u{26A0}", r"\textbf{!}"),
    ("\u{26A0}\u{FE0F}", r"\textbf{!}"),
    ("\u{2192}", r"$\rightarrow$"),
    ("\u{2190}", r"$\leftarrow$"),
    ("\u{2194}", r"$\leftrightarrow$"),
    ("\u{2026}", r"\ldots"),
    ("\u{2014}", "---"),
    ("\u{2013}", "--"),
    ("\u{201C}", "``"),
    ("\u{201D}", "''"),
    ("\u{2018}", "`"),
    ("\u{2019}", "'"),
    // emoji variation selector
    ("\u{FE0F}", ""),
];

/// Replace every glyph in [`GLYPH_REPLACEMENTS`] with its LaTeX form.
///
/// # Examples
///
/// ```
/// use mdtexfix::normalize_glyphs;
/// assert_eq!(normalize_glyphs("a → b"), r"a $\rightarrow$ b");
/// ```
#[must_use]
pub fn normalize_glyphs(text: &str) -> String {
    let mut out = text.to_string();
    for (glyph, replacement) in GLYPH_REPLACEMENTS {
        if out.contains(glyph) {
            out = out.replace(glyph, replacement);
        }
    }
    out
}
