//! Batch conversion of a directory of Markdown files.
//!
//! Files are converted in parallel. A failure on one file is recorded in the
//! [`BatchSummary`] and never stops the rest of the batch.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use tracing::{error, info};

use crate::{
    error::ConvertError,
    pandoc::{DEFAULT_PANDOC, convert_file, file_name},
};

/// Default glob for input files.
pub const DEFAULT_PATTERN: &str = "*.md";

/// Settings shared by every file in a batch.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Converter binary.
    pub pandoc: PathBuf,
    /// Custom pandoc LaTeX template.
    pub template: Option<PathBuf>,
    /// Produce complete documents instead of fragments.
    pub standalone: bool,
    /// Glob matched against file names in the input directory.
    pub pattern: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            pandoc: PathBuf::from(DEFAULT_PANDOC),
            template: None,
            standalone: false,
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

/// Outcome of a batch conversion.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub converted: usize,
    /// File name and error message of each failed conversion.
    pub failures: Vec<(String, String)>,
}

impl BatchSummary {
    #[must_use]
    pub fn all_converted(&self) -> bool {
        self.converted == self.total
    }
}

/// Glob `pattern` inside `dir`. Metacharacters in `dir` match literally.
pub(crate) fn glob_in(dir: &Path, pattern: &str) -> Result<glob::Paths, glob::PatternError> {
    let root = PathBuf::from(glob::Pattern::escape(&dir.to_string_lossy()));
    glob::glob(&root.join(pattern).to_string_lossy())
}

/// List files in `dir` matching `pattern`, sorted by path.
///
/// # Errors
/// Returns an error if the pattern is invalid.
pub fn find_inputs(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, ConvertError> {
    let paths = glob_in(dir, pattern).map_err(|source| ConvertError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;
    let mut files: Vec<PathBuf> = paths
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Output path for `input`: `<output_dir>/<stem>.tex`.
#[must_use]
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".tex");
    output_dir.join(name)
}

/// Pair each input with its output path.
///
/// Inputs are sorted, so the first input claiming an output path keeps it;
/// later inputs with the same stem are rejected instead of racing for the
/// file.
fn plan_outputs(
    files: Vec<PathBuf>,
    output_dir: &Path,
) -> Vec<(PathBuf, Result<PathBuf, ConvertError>)> {
    let mut claimed: HashMap<PathBuf, String> = HashMap::new();
    files
        .into_iter()
        .map(|input| {
            let output = output_path(&input, output_dir);
            let res = match claimed.get(&output) {
                Some(first) => Err(ConvertError::DuplicateOutput {
                    output,
                    first: first.clone(),
                }),
                None => {
                    claimed.insert(output.clone(), file_name(&input));
                    Ok(output)
                }
            };
            (input, res)
        })
        .collect()
}

/// Convert every matching Markdown file in `input_dir` into `output_dir`.
///
/// # Errors
/// Returns an error if the output directory cannot be created or the file
/// pattern is invalid. Per-file failures are reported in the summary.
pub fn convert_all(
    input_dir: &Path,
    output_dir: &Path,
    opts: &ConvertOptions,
) -> Result<BatchSummary, ConvertError> {
    fs::create_dir_all(output_dir)?;

    let files = find_inputs(input_dir, &opts.pattern)?;
    if files.is_empty() {
        info!("No markdown files found in {}", input_dir.display());
        return Ok(BatchSummary::default());
    }
    info!("Found {} markdown file(s) to convert", files.len());

    let total = files.len();
    let results: Vec<(PathBuf, Result<PathBuf, ConvertError>)> = plan_outputs(files, output_dir)
        .into_par_iter()
        .map(|(input, output)| {
            let res = output.and_then(|output| {
                convert_file(
                    &opts.pandoc,
                    &input,
                    &output,
                    opts.template.as_deref(),
                    opts.standalone,
                )
            });
            (input, res)
        })
        .collect();

    let mut summary = BatchSummary {
        total,
        ..BatchSummary::default()
    };
    for (input, res) in results {
        match res {
            Ok(output) => {
                info!("Converted: {} -> {}", file_name(&input), file_name(&output));
                summary.converted += 1;
            }
            Err(err) => {
                error!("Error converting {}: {err}", file_name(&input));
                summary.failures.push((file_name(&input), err.to_string()));
            }
        }
    }
    Ok(summary)
}
