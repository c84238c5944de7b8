// Configuration: the fixed assignment metadata and the runtime settings.
// Both are plain values handed to the submission flow, so tests can point
// the flow at a temporary directory, a throwaway script and a mock server.

use std::path::{Path, PathBuf};

/// Grading endpoint used when `SUBMIT_URL` is not set.
pub const DEFAULT_SUBMIT_URL: &str =
    "https://www.coursera.org/api/onDemandProgrammingScriptSubmissions.v1";

/// Test script used when `SUBMIT_SCRIPT` is not set.
pub const DEFAULT_SCRIPT: &str = "run.sh";

/// A gradable part of the assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub id: &'static str,
    pub name: &'static str,
}

/// Assignment key plus the ordered part registry. Index `i` of `parts`
/// is graded from `dbg.<i>.log`.
#[derive(Debug, Clone)]
pub struct Assignment {
    key: &'static str,
    parts: Vec<Part>,
}

impl Assignment {
    pub fn new(key: &'static str, parts: Vec<Part>) -> Self {
        Assignment { key, parts }
    }

    /// The membership protocol assignment this tool submits.
    pub fn membership() -> Self {
        Assignment::new(
            "Lm64BvbLEeWEJw5JS44kjw",
            vec![
                Part { id: "PH3Q7", name: "Create Test" },
                Part { id: "PIXym", name: "Delete Test" },
                Part { id: "mUKdC", name: "Read Test" },
                Part { id: "peNB6", name: "Update Test" },
            ],
        )
    }

    pub fn key(&self) -> &str {
        self.key
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }
}

/// Runtime settings: where to submit, which script produces the logs and
/// the directory the script runs in (and the logs are read from).
#[derive(Debug, Clone)]
pub struct Settings {
    pub submit_url: String,
    pub interpreter: String,
    pub script: PathBuf,
    pub script_arg: String,
    pub workdir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            submit_url: DEFAULT_SUBMIT_URL.into(),
            interpreter: "sh".into(),
            script: PathBuf::from(DEFAULT_SCRIPT),
            script_arg: "0".into(),
            workdir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Defaults, with `SUBMIT_URL` and `SUBMIT_SCRIPT` taken from the
    /// environment when present.
    pub fn from_env() -> Self {
        let mut settings = Settings::default();
        if let Ok(url) = std::env::var("SUBMIT_URL") {
            settings.submit_url = url;
        }
        if let Ok(script) = std::env::var("SUBMIT_SCRIPT") {
            settings.script = PathBuf::from(script);
        }
        tracing::debug!(url = %settings.submit_url, script = %settings.script.display(), "settings loaded");
        settings
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.submit_url = url.into();
        self
    }

    pub fn with_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.script = script.into();
        self
    }

    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    /// Script location as seen from the current process. Relative paths
    /// are resolved against the working directory.
    pub fn script_path(&self) -> PathBuf {
        self.workdir.join(&self.script)
    }

    /// Path of the log file for part `index`.
    pub fn log_path(&self, index: usize) -> PathBuf {
        log_path_in(&self.workdir, index)
    }
}

pub(crate) fn log_path_in(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("dbg.{}.log", index))
}
