// The submission flow: prompt, run the tests, collect logs, submit.
// Cleanup is owned by the caller (see `logs::CleanupGuard`) so it also
// runs when this returns early.

use crate::api::{ApiClient, SubmissionPayload};
use crate::config::{Assignment, Settings};
use crate::error::SubmitError;
use crate::logs;
use crate::prompt::CredentialPrompt;
use crate::runner;

/// How a run ended when nothing fatal happened.
#[derive(Debug)]
pub enum Outcome {
    /// Empty login; nothing was run or sent.
    Cancelled,
    /// The grader accepted the request; `response` is its raw body.
    Submitted { response: String },
    /// The request was made but failed at the HTTP or connection level.
    /// The classified error has already been printed.
    Undelivered { error: SubmitError },
}

pub fn submit(
    settings: &Settings,
    assignment: &Assignment,
    prompt: &mut impl CredentialPrompt,
    api: &ApiClient,
) -> Result<Outcome, SubmitError> {
    println!("==\n== [sandbox] Submitting Solutions \n==");

    let credentials = prompt.ask().map_err(SubmitError::Prompt)?;
    if credentials.is_cancelled() {
        println!("!! Submission Cancelled");
        return Ok(Outcome::Cancelled);
    }

    runner::run_tests(settings)?;

    let outputs = logs::collect(settings, assignment.parts().len());
    print_summary(assignment, &outputs);

    let payload = SubmissionPayload::new(assignment, &credentials, &outputs);
    match api.submit(&payload) {
        Ok(response) => {
            println!("== Submission response ==");
            println!("{}", response);
            Ok(Outcome::Submitted { response })
        }
        Err(error) => {
            tracing::warn!(%error, "submission not delivered");
            println!("{}", error.user_message());
            Ok(Outcome::Undelivered { error })
        }
    }
}

fn print_summary(assignment: &Assignment, outputs: &[String]) {
    println!("== Parts:");
    for (i, (part, output)) in assignment.parts().iter().zip(outputs).enumerate() {
        println!("{}) {} [{}]: {} bytes", i + 1, part.name, part.id, output.len());
    }
}
