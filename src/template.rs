//! Fetch LaTeX style files from a template repository.
//!
//! [`RepoCloner`] clones a git repository into a temporary directory that
//! lives as long as the cloner, and copies or moves files out of it.

use std::{
    env, fs,
    path::{Path, PathBuf},
    process::Command,
};

use tempfile::TempDir;
use tracing::info;
use walkdir::WalkDir;

use crate::{convert::glob_in, error::TemplateError};

/// Repository holding the LaTeX installation files.
pub const TEMPLATE_REPO: &str = "https://github.com/Deltares/LatexInstallation";

/// Directories copied out of [`TEMPLATE_REPO`].
pub const TEMPLATE_PATHS: [&str; 3] = [
    "MiKTeX/tex/latex/deltares",
    "MiKTeX/tex/latex/nomentbl/deltares",
    "MiKTeX/bibtex/bst/deltares",
];

/// Environment variables consulted for clone credentials.
pub const USERNAME_VAR: &str = "SVN_USERNAME";
pub const PASSWORD_VAR: &str = "SVN_PASSWORD";

/// Directory name for a clone of `url`.
///
/// # Examples
///
/// ```
/// use mdtexfix::template::repo_name;
/// assert_eq!(repo_name("https://example.com/org/Repo.git/"), "Repo");
/// ```
#[must_use]
pub fn repo_name(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .replace(".git", "")
}

/// Insert credentials into an `https://` URL. Other URLs are returned as-is.
#[must_use]
pub fn authenticated_url(url: &str, username: &str, password: &str) -> String {
    match url.strip_prefix("https://") {
        Some(rest) => format!("https://{username}:{password}@{rest}"),
        None => url.to_string(),
    }
}

/// A git repository cloned into a temporary directory.
#[derive(Debug)]
pub struct RepoCloner {
    url: String,
    credentials: Option<(String, String)>,
    workdir: Option<TempDir>,
    repo_path: Option<PathBuf>,
}

impl RepoCloner {
    /// Create a cloner for `url`, taking credentials from the environment.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        let credentials = match (env::var(USERNAME_VAR), env::var(PASSWORD_VAR)) {
            (Ok(user), Ok(pass)) if !user.is_empty() && !pass.is_empty() => Some((user, pass)),
            _ => None,
        };
        Self {
            url: url.into(),
            credentials,
            workdir: None,
            repo_path: None,
        }
    }

    /// Use explicit credentials instead of the environment.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Path of the clone, once [`clone_repo`](Self::clone_repo) succeeded.
    #[must_use]
    pub fn repo_path(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }

    /// URL passed to `git clone`.
    #[must_use]
    pub fn clone_url(&self) -> String {
        match &self.credentials {
            Some((user, pass)) => authenticated_url(&self.url, user, pass),
            None => self.url.clone(),
        }
    }

    /// Clone the repository into a fresh temporary directory.
    ///
    /// # Errors
    /// Returns an error if the temporary directory cannot be created or
    /// `git clone` fails.
    pub fn clone_repo(&mut self) -> Result<&Path, TemplateError> {
        let workdir = match self.workdir.take() {
            Some(dir) => dir,
            None => TempDir::new()?,
        };
        let target = workdir.path().join(repo_name(&self.url));
        self.workdir = Some(workdir);

        let output = Command::new("git")
            .arg("clone")
            .arg("--quiet")
            .arg(self.clone_url())
            .arg(&target)
            .output()
            .map_err(TemplateError::Spawn)?;
        if !output.status.success() {
            return Err(TemplateError::Clone {
                url: self.url.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(self.repo_path.insert(target).as_path())
    }

    fn source(&self, rel: &Path) -> Result<PathBuf, TemplateError> {
        let root = self.repo_path.as_ref().ok_or(TemplateError::NotCloned)?;
        let source = root.join(rel);
        if source.exists() {
            Ok(source)
        } else {
            Err(TemplateError::SourceMissing { path: source })
        }
    }

    /// Copy a file or directory from the clone to `dest`.
    ///
    /// Directories are merged into `dest`, overwriting existing files. A file
    /// copied onto an existing directory lands inside it under its own name.
    ///
    /// # Errors
    /// Returns an error if nothing was cloned, the source does not exist or
    /// copying fails.
    pub fn copy_file(
        &self,
        rel: impl AsRef<Path>,
        dest: impl AsRef<Path>,
    ) -> Result<PathBuf, TemplateError> {
        let source = self.source(rel.as_ref())?;
        if source.is_dir() {
            let dest = dest.as_ref();
            copy_tree(&source, dest)?;
            return Ok(dest.to_path_buf());
        }
        let dest = into_dir(&source, dest.as_ref());
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&source, &dest)?;
        Ok(dest)
    }

    /// Move a file or directory from the clone to `dest`.
    ///
    /// When `dest` is an existing directory the source is moved inside it.
    ///
    /// # Errors
    /// Returns an error if nothing was cloned, the source does not exist or
    /// the move fails.
    pub fn move_file(
        &self,
        rel: impl AsRef<Path>,
        dest: impl AsRef<Path>,
    ) -> Result<PathBuf, TemplateError> {
        let source = self.source(rel.as_ref())?;
        let dest = into_dir(&source, dest.as_ref());
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        if fs::rename(&source, &dest).is_err() {
            // rename does not work across file systems
            if source.is_dir() {
                copy_tree(&source, &dest)?;
                fs::remove_dir_all(&source)?;
            } else {
                fs::copy(&source, &dest)?;
                fs::remove_file(&source)?;
            }
        }
        Ok(dest)
    }

    /// List entries under `rel` in the clone matching `pattern`.
    ///
    /// A missing directory yields an empty list.
    ///
    /// # Errors
    /// Returns an error if nothing was cloned or the pattern is invalid.
    pub fn list_files(
        &self,
        rel: impl AsRef<Path>,
        pattern: &str,
    ) -> Result<Vec<PathBuf>, TemplateError> {
        let root = self.repo_path.as_ref().ok_or(TemplateError::NotCloned)?;
        let dir = root.join(rel);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let paths = glob_in(&dir, pattern).map_err(|source| TemplateError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let mut found: Vec<PathBuf> = paths.filter_map(Result::ok).collect();
        found.sort();
        Ok(found)
    }

    /// Remove the temporary directory holding the clone.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be removed.
    pub fn cleanup(&mut self) -> Result<(), TemplateError> {
        self.repo_path = None;
        if let Some(dir) = self.workdir.take() {
            dir.close()?;
        }
        Ok(())
    }
}

/// `dest` itself, or `dest/<name of source>` when `dest` is a directory.
fn into_dir(source: &Path, dest: &Path) -> PathBuf {
    match source.file_name() {
        Some(name) if dest.is_dir() => dest.join(name),
        _ => dest.to_path_buf(),
    }
}

/// Copy the contents of `from` into `to`, creating directories as needed.
fn copy_tree(from: &Path, to: &Path) -> Result<(), TemplateError> {
    for entry in WalkDir::new(from) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(from).unwrap_or(entry.path());
        let target = to.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Clone `repo` and copy the LaTeX style directories into `output_dir`.
///
/// # Errors
/// Returns an error if cloning or copying fails.
pub fn fetch_templates(repo: &str, output_dir: &Path) -> Result<(), TemplateError> {
    fs::create_dir_all(output_dir)?;
    info!("Cloning {repo}...");
    let mut cloner = RepoCloner::new(repo);
    cloner.clone_repo()?;
    for path in TEMPLATE_PATHS {
        info!("Copying {path}...");
        cloner.copy_file(path, output_dir)?;
    }
    cloner.cleanup()?;
    info!("Template files copied to {}", output_dir.display());
    Ok(())
}
