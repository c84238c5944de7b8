// API client module: builds the submission payload and sends it to the
// grading endpoint with a single blocking POST.

use crate::config::Assignment;
use crate::error::SubmitError;
use crate::prompt::Credentials;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use reqwest::header::CACHE_CONTROL;
use serde::Serialize;
use std::collections::BTreeMap;

/// Captured output for one part, sent as `{"output": "..."}`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PartOutput {
    pub output: String,
}

/// Body of the submission request. Field names follow the grader's
/// camelCase JSON.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub assignment_key: String,
    pub submitter_email: String,
    pub secret: String,
    pub parts: BTreeMap<String, PartOutput>,
}

impl SubmissionPayload {
    /// Pair each registered part with the log at the same index. Parts
    /// without a collected log are sent with empty output.
    pub fn new(assignment: &Assignment, credentials: &Credentials, outputs: &[String]) -> Self {
        let parts = assignment
            .parts()
            .iter()
            .enumerate()
            .map(|(i, part)| {
                let output = outputs.get(i).cloned().unwrap_or_default();
                (part.id.to_string(), PartOutput { output })
            })
            .collect();
        SubmissionPayload {
            assignment_key: assignment.key().to_string(),
            submitter_email: credentials.login.clone(),
            secret: credentials.password.clone(),
            parts,
        }
    }
}

/// Blocking client bound to one submission URL.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    url: String,
}

impl ApiClient {
    pub fn new(url: impl Into<String>) -> Result<Self, SubmitError> {
        let client = Client::builder().build()?;
        Ok(ApiClient { client, url: url.into() })
    }

    /// POST the payload as JSON and return the raw response body. A non
    /// success status becomes `SubmitError::Http`; anything below HTTP
    /// (DNS, connect, TLS, bad URL) becomes `SubmitError::Transport`.
    pub fn submit(&self, payload: &SubmissionPayload) -> Result<String, SubmitError> {
        tracing::info!(url = %self.url, parts = payload.parts.len(), "sending submission");

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Submitting...");
        // Drawn once; no ticker thread while the request blocks.
        spinner.tick();

        let result = self
            .client
            .post(&self.url)
            .header(CACHE_CONTROL, "no-cache")
            .json(payload)
            .send();
        spinner.finish_and_clear();

        let res = result?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().unwrap_or_default();
            tracing::debug!(%status, %body, "submission rejected");
            return Err(SubmitError::Http {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }
        Ok(res.text()?)
    }
}
