// Test runner: invokes the external build/test script once, blocking until
// it exits. Its stdout and stderr go straight to the terminal.

use crate::config::Settings;
use crate::error::SubmitError;
use std::io::ErrorKind;
use std::process::Command;

/// Run `<interpreter> <script> <arg>` inside the working directory.
/// Succeeds only on a zero exit status.
pub fn run_tests(settings: &Settings) -> Result<(), SubmitError> {
    if !settings.script_path().is_file() {
        return Err(SubmitError::ScriptNotFound { path: settings.script.clone() });
    }

    tracing::info!(
        interpreter = %settings.interpreter,
        script = %settings.script.display(),
        arg = %settings.script_arg,
        "running test script"
    );
    let status = Command::new(&settings.interpreter)
        .arg(&settings.script)
        .arg(&settings.script_arg)
        .current_dir(&settings.workdir)
        .status()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => SubmitError::InterpreterNotFound {
                interpreter: settings.interpreter.clone(),
            },
            _ => SubmitError::Spawn(e),
        })?;

    if !status.success() {
        tracing::warn!(%status, "test script failed");
        return Err(SubmitError::ScriptFailed { script: settings.script.clone(), status });
    }
    Ok(())
}
