//! File helpers for rewriting generated LaTeX documents.

use std::{fs, path::Path};

use crate::process::postprocess;

/// Post-process a LaTeX file in place.
///
/// # Errors
/// Returns an error if reading or writing the file fails.
pub fn rewrite(path: &Path, standalone: bool) -> std::io::Result<()> {
    let text = fs::read_to_string(path)?;
    fs::write(path, postprocess(&text, standalone))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::process::COMPAT_PREAMBLE;

    #[test]
    fn rewrite_fragment() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("sample.tex");
        fs::write(&file, "a \u{2014} b\n").unwrap();
        rewrite(&file, false).unwrap();
        let out = fs::read_to_string(&file).unwrap();
        assert_eq!(out, format!("{COMPAT_PREAMBLE}a --- b\n"));
    }

    #[test]
    fn rewrite_standalone() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("sample.tex");
        fs::write(&file, "\u{2018}x\u{2019}\n").unwrap();
        rewrite(&file, true).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "`x'\n");
    }

    #[test]
    fn rewrite_missing_file_errors() {
        let dir = tempdir().unwrap();
        assert!(rewrite(&dir.path().join("missing.tex"), false).is_err());
    }
}
