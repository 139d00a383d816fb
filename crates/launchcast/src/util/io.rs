//! I/O utility functions

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Sibling temp path for `path` (`model.csv` -> `model.csv.tmp`)
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("launchcast"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write content to a file atomically using write-then-rename pattern.
///
/// The content is first written to a temporary file next to the target,
/// then renamed over it, so readers never observe a partial file.
///
/// # Example
/// ```ignore
/// atomic_write(Path::new("scenario.yaml"), &yaml_content)?;
/// ```
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    atomic_write_bytes(path, content.as_bytes())
}

/// Write bytes to a file atomically using write-then-rename pattern.
pub fn atomic_write_bytes(path: &Path, content: &[u8]) -> io::Result<()> {
    let temp = temp_path(path);
    fs::write(&temp, content)?;
    fs::rename(&temp, path)?;
    Ok(())
}
