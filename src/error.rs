//! Error types for conversion and template fetching.
//!
//! Text transformations never fail; these errors come from the external
//! processes (`pandoc`, `git`) and the file system around them.

use std::path::PathBuf;

use thiserror::Error;

/// Failures converting a Markdown file with pandoc.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The converter binary could not be started.
    #[error("could not run '{}': {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The converter ran but reported an error.
    #[error("'{}' exited with {status}: {stderr}", program.display())]
    Failed {
        program: PathBuf,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// `--version` output did not contain a version.
    #[error("unexpected version output from '{}': {output:?}", program.display())]
    UnknownVersion { program: PathBuf, output: String },

    /// The glob pattern for input files is invalid.
    #[error("invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// Another input of the batch already writes this output file.
    #[error("{} is already produced from {first}", output.display())]
    DuplicateOutput { output: PathBuf, first: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures cloning the template repository or copying files out of it.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("repository not cloned yet")]
    NotCloned,

    #[error("source file not found: {}", path.display())]
    SourceMissing { path: PathBuf },

    #[error("could not run git: {0}")]
    Spawn(#[source] std::io::Error),

    /// `git clone` exited unsuccessfully.
    #[error("git clone of '{url}' failed: {stderr}")]
    Clone { url: String, stderr: String },

    #[error("invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("could not copy directory tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
