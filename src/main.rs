// Entrypoint for the submission helper.
// - Keeps `main` small: load settings, build the API client and hand both
//   to the submission flow.
// - The cleanup guard is created first so the log files are removed on
//   every way out of the run.
// - Only a failure to get the tests run exits non-zero; an undelivered
//   submission has already been reported by the flow.

use mp_submit::logs::CleanupGuard;
use mp_submit::prompt::TerminalPrompt;
use mp_submit::{api::ApiClient, logger, submit, Assignment, Settings};

fn main() -> anyhow::Result<()> {
    logger::init_cli_logger();

    // `SUBMIT_URL` and `SUBMIT_SCRIPT` override the built-in defaults.
    let settings = Settings::from_env();
    let assignment = Assignment::membership();

    let result = {
        let _cleanup = CleanupGuard::new(&settings, assignment.parts().len());
        let api = ApiClient::new(settings.submit_url.clone())?;
        submit(&settings, &assignment, &mut TerminalPrompt, &api)
    };

    match result {
        Ok(outcome) => {
            tracing::debug!(?outcome, "run finished");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "submission aborted");
            println!("{}", e.user_message());
            std::process::exit(1);
        }
    }
}
