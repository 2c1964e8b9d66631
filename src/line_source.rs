// Whole-file line reads for /proc and /sys pseudo-files. Nothing here returns an error:
// a missing or unreadable file is an empty result, reported through tracing.

use std::path::Path;

/// Supplies the lines of a named resource, or nothing if it cannot be read.
pub trait LineSource: Send + Sync {
    fn read_lines(&self, path: &Path) -> Vec<String>;
}

/// Reads from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLineSource;

impl LineSource for FsLineSource {
    fn read_lines(&self, path: &Path) -> Vec<String> {
        read_lines(path)
    }
}

/// Read a whole file at once so /proc contents come from a single kernel snapshot.
/// Warns when the file is missing.
pub fn read_lines(path: impl AsRef<Path>) -> Vec<String> {
    read_file(path.as_ref(), true)
}

/// Same as [`read_lines`] but a missing file is not worth a warning.
pub fn read_lines_quiet(path: impl AsRef<Path>) -> Vec<String> {
    read_file(path.as_ref(), false)
}

fn read_file(path: &Path, report_error: bool) -> Vec<String> {
    if !path.exists() {
        if report_error {
            tracing::warn!(path = %path.display(), "File not found");
        }
        return Vec::new();
    }
    tracing::debug!(path = %path.display(), "Reading file");
    match std::fs::read_to_string(path) {
        Ok(content) => content.lines().map(str::to_string).collect(),
        Err(e) => {
            if report_error {
                tracing::warn!(path = %path.display(), error = %e, "Unable to read file");
            }
            Vec::new()
        }
    }
}

/// First line of the file parsed as `i64`; 0 if missing or not a number.
pub fn read_long_from_file(path: impl AsRef<Path>) -> i64 {
    parse_first_line(path.as_ref()).unwrap_or(0)
}

/// First line of the file parsed as `i32`; 0 if missing or not a number.
pub fn read_int_from_file(path: impl AsRef<Path>) -> i32 {
    parse_first_line(path.as_ref()).unwrap_or(0)
}

fn parse_first_line<T: std::str::FromStr>(path: &Path) -> Option<T> {
    let first = read_file(path, false).into_iter().next()?;
    tracing::trace!(path = %path.display(), line = %first, "Read");
    match first.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::debug!(path = %path.display(), "Unable to read value from file");
            None
        }
    }
}

/// First line of the file, or an empty string.
pub fn read_string_from_file(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    match read_file(path, false).into_iter().next() {
        Some(line) => {
            tracing::trace!(path = %path.display(), line = %line, "Read");
            line
        }
        None => String::new(),
    }
}

/// First line of the file split on whitespace, or empty.
pub fn read_split_from_file(path: impl AsRef<Path>) -> Vec<String> {
    read_file(path.as_ref(), false)
        .first()
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}
