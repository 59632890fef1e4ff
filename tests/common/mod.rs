//! Utility helpers shared across integration tests.
#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

/// Version string printed by [`fake_pandoc`].
pub const FAKE_PANDOC_VERSION: &str = "3.1.11";

/// Bytes [`fake_pandoc`] writes for inputs named `*binary*`.
pub const NON_UTF8_OUTPUT: &[u8] = b"\xff\xfe raw";

/// Write a stand-in for pandoc into `dir` and return its path.
///
/// The script answers `--version`, fails for inputs whose name contains
/// `fail`, writes [`NON_UTF8_OUTPUT`] for inputs whose name contains
/// `binary`, and otherwise copies the input file to the `-o` target so tests
/// control exactly which LaTeX reaches the post-processor.
#[cfg(unix)]
pub fn fake_pandoc(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-pandoc");
    let script = format!(
        concat!(
            "#!/bin/sh\n",
            "if [ \"$1\" = \"--version\" ]; then echo \"pandoc {}\"; exit 0; fi\n",
            "case \"$(basename \"$1\")\" in\n",
            "  *fail*) echo \"cannot parse $1\" >&2; exit 64;;\n",
            "  *binary*) printf '\\377\\376 raw' > \"$3\"; exit 0;;\n",
            "esac\n",
            "cp \"$1\" \"$3\"\n",
        ),
        FAKE_PANDOC_VERSION
    );
    fs::write(&path, script).expect("failed to write fake pandoc");
    let mut perms = fs::metadata(&path)
        .expect("failed to stat fake pandoc")
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("failed to mark fake pandoc executable");
    path
}

/// Return `true` when a real pandoc is on `PATH`.
pub fn pandoc_available() -> bool {
    mdtexfix::pandoc_version(Path::new("pandoc")).is_ok()
}

/// Return `true` when git is on `PATH`.
pub fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}
