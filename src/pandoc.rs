//! Invoking pandoc for Markdown to LaTeX conversion.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::Command,
};

use tracing::{debug, warn};

use crate::{error::ConvertError, io::rewrite};

/// Default converter binary, resolved through `PATH`.
pub const DEFAULT_PANDOC: &str = "pandoc";

/// Return the version reported by `program --version`.
///
/// # Errors
/// Returns an error if the program cannot be started, exits unsuccessfully
/// or prints no version.
pub fn pandoc_version(program: &Path) -> Result<String, ConvertError> {
    let output = Command::new(program)
        .arg("--version")
        .output()
        .map_err(|source| ConvertError::Spawn {
            program: program.to_path_buf(),
            source,
        })?;
    if !output.status.success() {
        return Err(ConvertError::Failed {
            program: program.to_path_buf(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = stdout.split_whitespace().nth(1).map(str::to_string);
    version.ok_or_else(|| ConvertError::UnknownVersion {
        program: program.to_path_buf(),
        output: stdout.into_owned(),
    })
}

/// A single pandoc Markdown to LaTeX invocation.
#[derive(Debug, Clone)]
pub struct PandocCommand<'a> {
    pub program: &'a Path,
    pub input: &'a Path,
    pub output: &'a Path,
    pub template: Option<&'a Path>,
    pub standalone: bool,
}

impl PandocCommand<'_> {
    /// Arguments passed to pandoc, in order.
    #[must_use]
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            self.input.into(),
            "-o".into(),
            self.output.into(),
            "--from".into(),
            "markdown".into(),
            "--to".into(),
            "latex".into(),
        ];
        if self.standalone {
            args.push("--standalone".into());
        }
        if let Some(template) = self.template {
            args.push("--template".into());
            args.push(template.into());
        }
        args.push("--listings".into());
        args.push("--number-sections".into());
        args
    }

    /// Run pandoc and wait for it to finish.
    ///
    /// # Errors
    /// Returns an error if pandoc cannot be started or exits unsuccessfully.
    pub fn run(&self) -> Result<(), ConvertError> {
        debug!(program = %self.program.display(), input = %self.input.display(), "running converter");
        let output = Command::new(self.program)
            .args(self.args())
            .output()
            .map_err(|source| ConvertError::Spawn {
                program: self.program.to_path_buf(),
                source,
            })?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ConvertError::Failed {
                program: self.program.to_path_buf(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// Convert one Markdown file and post-process the result.
///
/// Post-processing failures are logged and do not fail the conversion; the
/// unpatched pandoc output is left in place.
///
/// # Errors
/// Returns an error if pandoc fails.
pub fn convert_file(
    program: &Path,
    input: &Path,
    output: &Path,
    template: Option<&Path>,
    standalone: bool,
) -> Result<PathBuf, ConvertError> {
    PandocCommand {
        program,
        input,
        output,
        template,
        standalone,
    }
    .run()?;

    if let Err(err) = rewrite(output, standalone) {
        warn!(file = %file_name(output), "could not post-process: {err}");
    }
    Ok(output.to_path_buf())
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
