//! Column width tuning for pandoc `longtable` output.
//!
//! Pandoc sizes columns of wide pipe tables from the relative length of the
//! dash runs in the Markdown separator row. For the handful of table shapes
//! used throughout the documentation this produces cramped option columns,
//! so recognised tables get hand-tuned fractions instead. Unrecognised
//! tables are returned byte-for-byte unchanged.

use std::sync::LazyLock;

use regex::Regex;

use crate::longtable::map_longtables;

static WIDTH_SPEC_RE: LazyLock<Regex> = lazy_regex!(
    r">\{\\raggedright\\arraybackslash\}p\{\(\\linewidth - (\d+)\\tabcolsep\) \* \\real\{(0\.\d+)\}\}",
    "valid width specifier regex",
);

/// Option whose presence calls for a wider long-option column.
pub const LONG_OPTION_MARKER: &str = "--calculate-surge";
/// Field names too long for the generic column layout.
pub const WIDE_FIELD_MARKERS: [&str; 2] = ["Keringstoestand", "[open/gesloten]"];

const CLI_FIVE_LONG_OPTION: &[&str] = &["0.16", "0.07", "0.22", "0.10", "0.35"];
const CLI_FIVE: &[&str] = &["0.19", "0.08", "0.18", "0.12", "0.33"];
const CLI_FOUR: &[&str] = &["0.25", "0.09", "0.22", "0.44"];
const WIDE_FIELD_FOUR: &[&str] = &["0.28", "0.30", "0.12", "0.30"];
const COLUMN_DESCRIPTION_FOUR: &[&str] = &["0.25", "0.35", "0.15", "0.25"];

/// Table shapes with tuned column widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Command-line argument tables with `Short` and `Long` option columns.
    CliArguments,
    /// Input file tables listing very long field names.
    WideField,
    /// Generic `Column` / `Description` tables.
    ColumnDescription,
}

impl TableKind {
    /// Classify a table block by the header tokens it contains.
    ///
    /// Checks run in precedence order, so a CLI table that also mentions a
    /// wide field is still a CLI table.
    #[must_use]
    pub fn classify(block: &str) -> Option<Self> {
        if block.contains("Short") && block.contains("Long") {
            Some(Self::CliArguments)
        } else if WIDE_FIELD_MARKERS.iter().any(|m| block.contains(m)) {
            Some(Self::WideField)
        } else if block.contains("Column") && block.contains("Description") {
            Some(Self::ColumnDescription)
        } else {
            None
        }
    }

    /// Width fractions for a table of this kind with `columns` columns.
    ///
    /// Returns `None` when the column count has no tuned layout.
    #[must_use]
    pub fn widths(self, columns: usize, block: &str) -> Option<&'static [&'static str]> {
        match (self, columns) {
            (Self::CliArguments, 5) if block.contains(LONG_OPTION_MARKER) => {
                Some(CLI_FIVE_LONG_OPTION)
            }
            (Self::CliArguments, 5) => Some(CLI_FIVE),
            (Self::CliArguments, 4) => Some(CLI_FOUR),
            (Self::WideField, 4) => Some(WIDE_FIELD_FOUR),
            (Self::ColumnDescription, 4) => Some(COLUMN_DESCRIPTION_FOUR),
            _ => None,
        }
    }
}

fn width_spec(sep: &str, width: &str) -> String {
    format!(">{{\\raggedright\\arraybackslash}}p{{(\\linewidth - {sep}\\tabcolsep) * \\real{{{width}}}}}")
}

/// Apply tuned column widths to a single `longtable` block.
///
/// The i-th width specifier receives the i-th tuned fraction. Specifiers
/// past the end of the tuned list keep their original value. All rewritten
/// specifiers use the separator constant of the first one.
#[must_use]
pub fn fix_table_widths(block: &str) -> String {
    let specs: Vec<_> = WIDTH_SPEC_RE.captures_iter(block).collect();
    let Some(first) = specs.first() else {
        return block.to_string();
    };
    let sep = first.get(1).map_or("", |m| m.as_str());

    let Some(widths) = TableKind::classify(block).and_then(|kind| kind.widths(specs.len(), block))
    else {
        return block.to_string();
    };

    let mut out = String::with_capacity(block.len());
    let mut last = 0;
    for (caps, width) in specs.iter().zip(widths) {
        let Some(m) = caps.get(0) else { continue };
        out.push_str(&block[last..m.start()]);
        out.push_str(&width_spec(sep, width));
        last = m.end();
    }
    out.push_str(&block[last..]);
    out
}

/// Apply [`fix_table_widths`] to every `longtable` block in `text`.
#[must_use]
pub fn fix_column_widths(text: &str) -> String {
    map_longtables(text, fix_table_widths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{longtable_block, width_fractions};

    #[test]
    fn cli_table_with_long_option() {
        let block = longtable_block(
            &["Short", "", "Long", "Default", "Description"],
            &[&["-s", "", "--calculate-surge", "false", "Compute surge"]],
        );
        let out = fix_table_widths(&block);
        assert_eq!(width_fractions(&out), ["0.16", "0.07", "0.22", "0.10", "0.35"]);
    }

    #[test]
    fn cli_table_without_long_option() {
        let block = longtable_block(
            &["Argument", "Short", "Long", "Default", "Description"],
            &[&["input", "-i", "--input", "", "Input directory"]],
        );
        let out = fix_table_widths(&block);
        assert_eq!(width_fractions(&out), ["0.19", "0.08", "0.18", "0.12", "0.33"]);
    }

    #[test]
    fn four_column_cli_table() {
        let block = longtable_block(&["Argument", "Short", "Long", "Description"], &[]);
        assert_eq!(
            width_fractions(&fix_table_widths(&block)),
            ["0.25", "0.09", "0.22", "0.44"]
        );
    }

    #[test]
    fn wide_field_table() {
        let block = longtable_block(
            &["Column", "Description", "Unit", "Required"],
            &[&["Keringstoestand[open/gesloten]", "State", "-", "yes"]],
        );
        assert_eq!(TableKind::classify(&block), Some(TableKind::WideField));
        assert_eq!(
            width_fractions(&fix_table_widths(&block)),
            ["0.28", "0.30", "0.12", "0.30"]
        );
    }

    #[test]
    fn column_description_table() {
        let block = longtable_block(&["Column", "Description", "Unit", "Example"], &[]);
        assert_eq!(
            width_fractions(&fix_table_widths(&block)),
            ["0.25", "0.35", "0.15", "0.25"]
        );
    }

    #[test]
    fn rewritten_specs_keep_separator() {
        let block = longtable_block(&["Column", "Description", "Unit", "Example"], &[]);
        let out = fix_table_widths(&block);
        assert_eq!(out.matches("(\\linewidth - 8\\tabcolsep)").count(), 4);
        assert!(out.contains(
            ">{\\raggedright\\arraybackslash}p{(\\linewidth - 8\\tabcolsep) * \\real{0.35}}"
        ));
    }

    #[test]
    fn unhandled_column_counts_are_untouched() {
        for headers in [
            &["Short", "Long", "Description"][..],
            &["Short", "Long", "A", "B", "C", "D"][..],
            &["Column", "Description", "Unit"][..],
            &["Keringstoestand", "B", "C", "D", "E"][..],
        ] {
            let block = longtable_block(headers, &[]);
            assert_eq!(fix_table_widths(&block), block);
        }
    }

    #[test]
    fn unrecognised_table_is_untouched() {
        let block = longtable_block(&["Name", "Value", "Unit", "Notes"], &[]);
        assert_eq!(TableKind::classify(&block), None);
        assert_eq!(fix_table_widths(&block), block);
    }

    #[test]
    fn table_without_width_specs_is_untouched() {
        let block = "\\begin{longtable}[]{@{}ll@{}}\nShort & Long \\\\\n\\end{longtable}";
        assert_eq!(fix_table_widths(block), block);
    }

    #[test]
    fn cli_classification_wins_over_wide_field() {
        let block = "Short Long Keringstoestand Column Description";
        assert_eq!(TableKind::classify(block), Some(TableKind::CliArguments));
    }

    #[test]
    fn fixes_every_table_in_document() {
        let text = format!(
            "intro\n{}\nmiddle\n{}\noutro",
            longtable_block(&["Column", "Description", "Unit", "Example"], &[]),
            longtable_block(&["Name", "Value"], &[]),
        );
        let out = fix_column_widths(&text);
        assert_eq!(
            width_fractions(&out),
            ["0.25", "0.35", "0.15", "0.25", "0.5000", "0.5000"]
        );
        assert!(out.starts_with("intro\n") && out.ends_with("\noutro"));
    }

    #[test]
    fn second_pass_is_stable() {
        let block = longtable_block(&["Short", "Long", "Type", "Default", "Description"], &[]);
        let once = fix_table_widths(&block);
        assert_eq!(fix_table_widths(&once), once);
    }
}
