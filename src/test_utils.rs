//! Helper utilities for tests.

use std::fmt::Write as _;

/// Build a `longtable` block shaped like pandoc's output for a pipe table.
///
/// Every column gets an equal `\real{…}` fraction and the separator
/// constant pandoc uses for the column count (`2 * columns`).
#[must_use]
pub fn longtable_block(headers: &[&str], rows: &[&[&str]]) -> String {
    let cols = headers.len();
    let sep = cols * 2;
    #[expect(
        clippy::cast_precision_loss,
        reason = "column counts in test tables are tiny"
    )]
    let fraction = 1.0 / cols as f64;

    let mut out = String::from("\\begin{longtable}[]{@{}\n");
    for i in 0..cols {
        let tail = if i + 1 == cols { "@{}}" } else { "" };
        let _ = writeln!(
            out,
            "  >{{\\raggedright\\arraybackslash}}p{{(\\linewidth - {sep}\\tabcolsep) * \\real{{{fraction:.4}}}}}{tail}"
        );
    }
    out.push_str("\\toprule\\noalign{}\n");
    let header_cells: Vec<String> = headers
        .iter()
        .map(|h| format!("\\begin{{minipage}}[b]{{\\linewidth}}\\raggedright\n{h}\n\\end{{minipage}}"))
        .collect();
    out.push_str(&header_cells.join(" & "));
    out.push_str(" \\\\\n\\midrule\\noalign{}\n\\endhead\n");
    for row in rows {
        out.push_str(&row.join(" & "));
        out.push_str(" \\\\\n");
    }
    out.push_str("\\bottomrule\\noalign{}\n\\end{longtable}");
    out
}

/// Collect the `\real{…}` fractions of every width specifier in `text`.
#[must_use]
pub fn width_fractions(text: &str) -> Vec<String> {
    text.split("\\real{")
        .skip(1)
        .filter_map(|rest| rest.split_once('}').map(|(value, _)| value.to_string()))
        .collect()
}
