// Log collection and cleanup for the `dbg.<index>.log` files the test
// script leaves in the working directory.

use crate::config::{log_path_in, Settings};
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Full text of one log file. A missing file yields an empty string and a
/// warning written to `out`; the run carries on regardless.
pub fn read_part_log(path: &Path, out: &mut impl Write) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            let name = path.file_name().map(Path::new).unwrap_or(path);
            let shown = if e.kind() == ErrorKind::NotFound {
                writeln!(out, "Warning: {} not found.", name.display())
            } else {
                writeln!(out, "Warning: could not read {}: {}", name.display(), e)
            };
            if let Err(write_err) = shown {
                tracing::debug!(error = %write_err, "could not print warning");
            }
            tracing::warn!(path = %path.display(), error = %e, "log file unavailable");
            String::new()
        }
    }
}

/// Read logs `0..count`, in index order, printing warnings to stdout.
pub fn collect(settings: &Settings, count: usize) -> Vec<String> {
    collect_into(settings, count, &mut io::stdout())
}

/// Like `collect`, with warnings written to `out`.
pub fn collect_into(settings: &Settings, count: usize, out: &mut impl Write) -> Vec<String> {
    (0..count).map(|i| read_part_log(&settings.log_path(i), &mut *out)).collect()
}

/// Remove logs `0..count`. Failures are ignored.
pub fn cleanup(settings: &Settings, count: usize) {
    remove_logs(&settings.workdir, count);
}

fn remove_logs(dir: &Path, count: usize) {
    for i in 0..count {
        let path = log_path_in(dir, i);
        match fs::remove_file(&path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed log"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::debug!(path = %path.display(), error = %e, "could not remove log"),
        }
    }
}

/// Removes the log files when dropped, so every exit path of a run cleans
/// up after the test script.
#[derive(Debug)]
pub struct CleanupGuard {
    dir: PathBuf,
    count: usize,
}

impl CleanupGuard {
    pub fn new(settings: &Settings, count: usize) -> Self {
        CleanupGuard { dir: settings.workdir.clone(), count }
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        remove_logs(&self.dir, self.count);
    }
}
