use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Name of the log file inside the data directory
pub const LOG_FILE_NAME: &str = "launchcast.log";
/// Maximum log file size before rotation (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
/// Size to keep after rotation (1 MB of most recent logs)
const KEEP_SIZE: u64 = 1024 * 1024;

const ROTATION_MARKER: &[u8] = b"--- Log rotated (older entries removed) ---\n";

/// Trim the log to its most recent `keep` bytes once it grows past `max`.
///
/// Cuts at the first newline so no partial line survives.
fn rotate_log_if_needed(log_path: &Path, max: u64, keep: u64) -> io::Result<bool> {
    if !log_path.exists() {
        return Ok(false);
    }

    let file_size = fs::metadata(log_path)?.len();
    if file_size <= max {
        return Ok(false);
    }

    let mut file = File::open(log_path)?;
    file.seek(SeekFrom::Start(file_size.saturating_sub(keep)))?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    drop(file);

    let skip = buffer
        .iter()
        .position(|&b| b == b'\n')
        .map(|i| i + 1)
        .unwrap_or(0);

    let mut file = File::create(log_path)?;
    file.write_all(ROTATION_MARKER)?;
    file.write_all(&buffer[skip..])?;

    Ok(true)
}

/// Hands out writers that share one open log file
#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<File>>,
}

struct LockedWriter {
    file: Arc<Mutex<File>>,
}

impl LockedWriter {
    fn with_file<T>(&self, f: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        f(&mut file)
    }
}

impl Write for LockedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(|file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = LockedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LockedWriter {
            file: self.file.clone(),
        }
    }
}

/// Initialize logging to `{data_dir}/launchcast.log`.
///
/// The file is trimmed to its last 1MB once it exceeds 5MB. `RUST_LOG`
/// overrides `level` when set.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<()> {
    fs::create_dir_all(data_dir)?;

    let log_path = data_dir.join(LOG_FILE_NAME);
    if let Err(e) = rotate_log_if_needed(&log_path, MAX_LOG_SIZE, KEEP_SIZE) {
        eprintln!("Warning: Failed to rotate log file: {}", e);
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;
    let writer = SharedFileWriter {
        file: Arc::new(Mutex::new(file)),
    };

    let default_filter = format!("launchcast={level},launchcast_core=warn");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false),
        )
        .init();

    tracing::info!(log_path = %log_path.display(), "Launchcast logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_small_log_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        fs::write(&path, "one\ntwo\n").unwrap();

        assert!(!rotate_log_if_needed(&path, 100, 10).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
        assert!(!rotate_log_if_needed(&dir.path().join("missing.log"), 1, 1).unwrap());
    }

    #[test]
    fn test_rotation_keeps_whole_recent_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        let content: String = (0..50).map(|i| format!("line {i:02}\n")).collect();
        fs::write(&path, &content).unwrap();

        // Each line is 8 bytes; keeping 20 bytes cuts into line 47
        assert!(rotate_log_if_needed(&path, 100, 20).unwrap());

        let rotated = fs::read_to_string(&path).unwrap();
        let mut lines = rotated.lines();
        assert_eq!(lines.next(), Some("--- Log rotated (older entries removed) ---"));
        assert_eq!(lines.collect::<Vec<_>>(), ["line 48", "line 49"]);
    }
}
