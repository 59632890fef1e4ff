//! Library for converting Markdown documentation to LaTeX.
//!
//! Conversion itself is delegated to pandoc. This crate patches what pandoc
//! produces:
//! - [`normalize_glyphs`] rewrites box-drawing characters, arrows and
//!   typographic punctuation into LaTeX-safe text;
//! - [`fix_column_widths`] applies tuned column widths to recognised
//!   `longtable` blocks;
//! - [`wrap_long_words`] lets long bracketed identifiers in tables break.
//!
//! [`postprocess`] runs all three and adds the compatibility preamble
//! fragments need. [`convert_all`] drives pandoc over a directory and
//! [`template`] fetches the LaTeX style files.

#[macro_use]
mod macros;

pub mod convert;
pub mod error;
pub mod glyphs;
pub mod io;
pub mod longtable;
pub mod pandoc;
pub mod process;
pub mod seqsplit;
pub mod template;
#[doc(hidden)]
pub mod test_utils;
pub mod widths;

pub use convert::{BatchSummary, ConvertOptions, convert_all};
pub use error::{ConvertError, TemplateError};
pub use glyphs::normalize_glyphs;
pub use io::rewrite;
pub use pandoc::{PandocCommand, convert_file, pandoc_version};
pub use process::{COMPAT_PREAMBLE, postprocess};
pub use seqsplit::wrap_long_words;
pub use template::{RepoCloner, fetch_templates};
pub use widths::{TableKind, fix_column_widths};
