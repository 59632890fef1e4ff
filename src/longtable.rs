//! Locate `longtable` environments in generated LaTeX.
//!
//! Pandoc renders every Markdown table as a `longtable` environment. The
//! table fixers only ever touch text inside these blocks, so they share the
//! extraction implemented here. Blocks are matched lazily from a
//! `\begin{longtable}` to the next `\end{longtable}`; nesting is not
//! supported.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static LONGTABLE_RE: LazyLock<Regex> = lazy_regex!(
    r"(?s)\\begin\{longtable\}.*?\\end\{longtable\}",
    "valid longtable regex",
);

/// Rewrite each `longtable` block in `text` with `f`.
///
/// Text outside the blocks is copied verbatim.
///
/// # Examples
///
/// ```
/// use mdtexfix::longtable::map_longtables;
/// let text = "a \\begin{longtable}x\\end{longtable} b";
/// let out = map_longtables(text, |block| block.replace('x', "y"));
/// assert_eq!(out, "a \\begin{longtable}y\\end{longtable} b");
/// ```
#[must_use]
pub fn map_longtables<F>(text: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    LONGTABLE_RE
        .replace_all(text, |caps: &Captures<'_>| f(&caps[0]))
        .into_owned()
}

/// Return every `longtable` block in `text`, in document order.
#[must_use]
pub fn find_longtables(text: &str) -> Vec<&str> {
    LONGTABLE_RE.find_iter(text).map(|m| m.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_span_newlines() {
        let text = "pre\n\\begin{longtable}[]{@{}ll@{}}\nA & B \\\\\n\\end{longtable}\npost";
        let blocks = find_longtables(text);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].starts_with("\\begin{longtable}"));
        assert!(blocks[0].ends_with("\\end{longtable}"));
    }

    #[test]
    fn adjacent_blocks_stay_separate() {
        let text = "\\begin{longtable}1\\end{longtable}\n\\begin{longtable}2\\end{longtable}";
        assert_eq!(
            find_longtables(text),
            vec!["\\begin{longtable}1\\end{longtable}", "\\begin{longtable}2\\end{longtable}"]
        );
    }

    #[test]
    fn unterminated_block_is_ignored() {
        let text = "\\begin{longtable}never closed";
        assert!(find_longtables(text).is_empty());
        assert_eq!(map_longtables(text, |_| String::from("gone")), text);
    }

    #[test]
    fn map_only_touches_blocks() {
        let text = "x \\begin{longtable}x\\end{longtable} x";
        let out = map_longtables(text, |b| b.replace('x', "z"));
        assert_eq!(out, "x \\begin{longtable}z\\end{longtable} x");
    }
}
