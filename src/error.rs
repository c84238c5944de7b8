use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Fatal failures of a submission run. A cancelled prompt and a missing
/// log file are not errors and never show up here.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("failed to read credentials: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("test script not found: {}", path.display())]
    ScriptNotFound { path: PathBuf },

    #[error("interpreter not found: {interpreter}")]
    InterpreterNotFound { interpreter: String },

    #[error("failed to start test script: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("{} exited with {status}", script.display())]
    ScriptFailed { script: PathBuf, status: ExitStatus },

    #[error("HTTP {code} {reason}")]
    Http { code: u16, reason: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl SubmitError {
    /// Line printed to the user when the run stops on this error.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Prompt(e) => format!("!! Error reading input: {}", e),
            SubmitError::ScriptNotFound { path } => format!(
                "!! Error: {} not found. Make sure it exists and is executable.",
                path.display()
            ),
            SubmitError::InterpreterNotFound { interpreter } => {
                format!("!! Error: {} not found. Cannot run the test script.", interpreter)
            }
            SubmitError::Spawn(e) => format!("!! Error starting test script: {}", e),
            SubmitError::ScriptFailed { script, .. } => {
                format!("!! Error running {} script.", script.display())
            }
            SubmitError::Http { code, reason } if reason.is_empty() => format!("HTTP Error: {}", code),
            SubmitError::Http { code, reason } => format!("HTTP Error: {} - {}", code, reason),
            SubmitError::Transport(e) => format!("URL Error: {}", e),
        }
    }
}
