//! High-level LaTeX post-processing.

use crate::{glyphs::normalize_glyphs, seqsplit::wrap_long_words, widths::fix_column_widths};

/// Definitions prepended to fragments so they compile without pandoc's
/// standalone preamble.
pub const COMPAT_PREAMBLE: &str = concat!(
    "% Pandoc compatibility commands\n",
    "\\providecommand{\\tightlist}{%\n",
    "  \\setlength{\\itemsep}{0pt}\\setlength{\\parskip}{0pt}%\n",
    "}\n",
    "\\providecommand{\\passthrough}[1]{#1}\n",
    "\n",
);

/// Post-process pandoc LaTeX output.
///
/// Glyphs are normalised first, then table widths fixed, then long words in
/// tables wrapped. Fragments (`standalone == false`) get
/// [`COMPAT_PREAMBLE`] prepended.
#[must_use]
pub fn postprocess(text: &str, standalone: bool) -> String {
    let text = normalize_glyphs(text);
    let text = fix_column_widths(&text);
    let text = wrap_long_words(&text);
    if standalone {
        text
    } else {
        let mut out = String::with_capacity(COMPAT_PREAMBLE.len() + text.len());
        out.push_str(COMPAT_PREAMBLE);
        out.push_str(&text);
        out
    }
}
