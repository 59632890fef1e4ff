//! Allow long identifiers in table cells to break.
//!
//! Field names such as `Keringstoestand[open/gesloten]` contain no spaces,
//! so LaTeX cannot break them and they overflow fixed-width `p{}` columns.
//! Wrapping them in `\seqsplit{…}` lets the line break at any character.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::longtable::map_longtables;

static BRACKETED_WORD_RE: LazyLock<Regex> = lazy_regex!(
    r"([A-Za-z]{10,})\{?\[([^\]]+)\]\}?",
    "valid bracketed word regex",
);

/// Number of characters inspected before a match for existing wrappers.
pub const LOOKBEHIND_CHARS: usize = 20;

const SKIP_MARKERS: [&str; 2] = ["\\seqsplit", "\\passthrough"];

/// Slice of `text` holding up to `chars` characters ending at byte `end`.
fn preceding(text: &str, end: usize, chars: usize) -> &str {
    let head = &text[..end];
    let start = head
        .char_indices()
        .rev()
        .nth(chars.saturating_sub(1))
        .map_or(0, |(idx, _)| idx);
    &head[start..]
}

/// Wrap bracketed long words in one `longtable` block.
///
/// The lookbehind window is taken from the unmodified block, so a match is
/// skipped only when the original text already wraps it.
#[must_use]
pub fn wrap_table_words(block: &str) -> String {
    BRACKETED_WORD_RE
        .replace_all(block, |caps: &Captures<'_>| {
            let whole = &caps[0];
            let Some(m) = caps.get(0) else {
                return whole.to_string();
            };
            let window = preceding(block, m.start(), LOOKBEHIND_CHARS);
            if SKIP_MARKERS.iter().any(|marker| window.contains(marker)) {
                return whole.to_string();
            }
            format!("\\seqsplit{{{}[{}]}}", &caps[1], &caps[2])
        })
        .into_owned()
}

/// Apply [`wrap_table_words`] to every `longtable` block in `text`.
///
/// # Examples
///
/// ```
/// use mdtexfix::wrap_long_words;
/// let text = "\\begin{longtable}\nWaterstandMeting[cm] & x \\\\\n\\end{longtable}";
/// assert!(wrap_long_words(text).contains("\\seqsplit{WaterstandMeting[cm]}"));
/// ```
#[must_use]
pub fn wrap_long_words(text: &str) -> String {
    map_longtables(text, wrap_table_words)
}
