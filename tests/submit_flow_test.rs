#![cfg(unix)]

use httpmock::prelude::*;
use mp_submit::api::ApiClient;
use mp_submit::logs::CleanupGuard;
use mp_submit::prompt::{CredentialPrompt, Credentials};
use mp_submit::{submit, Assignment, Outcome, Settings, SubmitError};
use serde_json::json;
use std::fs;
use std::io;
use tempfile::TempDir;

/// Answers the prompt with fixed credentials and counts how often it was asked.
struct Canned {
    credentials: Credentials,
    asked: usize,
}

impl Canned {
    fn new(login: &str, password: &str) -> Self {
        Canned {
            credentials: Credentials { login: login.into(), password: password.into() },
            asked: 0,
        }
    }
}

impl CredentialPrompt for Canned {
    fn ask(&mut self) -> io::Result<Credentials> {
        self.asked += 1;
        Ok(self.credentials.clone())
    }
}

fn workspace(script: &str) -> (TempDir, Settings) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("run.sh"), script).unwrap();
    let settings = Settings::default().with_workdir(dir.path());
    (dir, settings)
}

/// A test script that writes "A", "B", "C" into logs 0..2 and leaves log 3 out.
const THREE_LOGS: &str = "printf A > dbg.0.log\nprintf B > dbg.1.log\nprintf C > dbg.2.log\n";

#[test]
fn submits_collected_logs_and_prints_response() {
    let server = MockServer::start();
    let grader = server.mock(|when, then| {
        when.method(POST)
            .path("/submit")
            .header("content-type", "application/json")
            .header("cache-control", "no-cache")
            .json_body(json!({
                "assignmentKey": "Lm64BvbLEeWEJw5JS44kjw",
                "submitterEmail": "student@example.com",
                "secret": "otp123",
                "parts": {
                    "PH3Q7": {"output": "A"},
                    "PIXym": {"output": "B"},
                    "mUKdC": {"output": "C"},
                    "peNB6": {"output": ""}
                }
            }));
        then.status(201).body(r#"{"id":"abc"}"#);
    });

    let (_dir, settings) = workspace(THREE_LOGS);
    let settings = settings.with_url(server.url("/submit"));
    let api = ApiClient::new(settings.submit_url.clone()).unwrap();
    let mut prompt = Canned::new("student@example.com", "otp123");

    let outcome = submit(&settings, &Assignment::membership(), &mut prompt, &api).unwrap();

    grader.assert();
    assert!(matches!(outcome, Outcome::Submitted { ref response } if response == r#"{"id":"abc"}"#));
}

#[test]
fn empty_login_runs_nothing_and_sends_nothing() {
    let server = MockServer::start();
    let grader = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let (dir, settings) = workspace("touch ran.marker\n");
    let settings = settings.with_url(server.url("/submit"));
    let api = ApiClient::new(settings.submit_url.clone()).unwrap();
    let mut prompt = Canned::new("", "otp123");

    let outcome = submit(&settings, &Assignment::membership(), &mut prompt, &api).unwrap();

    assert!(matches!(outcome, Outcome::Cancelled));
    assert_eq!(prompt.asked, 1);
    assert!(!dir.path().join("ran.marker").exists());
    grader.assert_hits(0);
}

#[test]
fn missing_script_aborts_before_submission() {
    let server = MockServer::start();
    let grader = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let dir = TempDir::new().unwrap();
    let settings = Settings::default()
        .with_workdir(dir.path())
        .with_url(server.url("/submit"));
    let api = ApiClient::new(settings.submit_url.clone()).unwrap();
    let mut prompt = Canned::new("student@example.com", "otp123");

    let err = submit(&settings, &Assignment::membership(), &mut prompt, &api).unwrap_err();

    assert!(matches!(err, SubmitError::ScriptNotFound { .. }));
    grader.assert_hits(0);
}

#[test]
fn failing_script_aborts_before_submission() {
    let server = MockServer::start();
    let grader = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let (_dir, settings) = workspace("printf A > dbg.0.log\nexit 1\n");
    let settings = settings.with_url(server.url("/submit"));
    let api = ApiClient::new(settings.submit_url.clone()).unwrap();
    let mut prompt = Canned::new("student@example.com", "otp123");

    let err = submit(&settings, &Assignment::membership(), &mut prompt, &api).unwrap_err();

    assert!(matches!(err, SubmitError::ScriptFailed { .. }));
    assert_eq!(err.user_message(), "!! Error running run.sh script.");
    grader.assert_hits(0);
}

#[test]
fn script_without_logs_still_submits_empty_parts() {
    let server = MockServer::start();
    let grader = server.mock(|when, then| {
        when.method(POST).path("/submit").json_body_partial(
            r#"{"parts": {
                "PH3Q7": {"output": ""},
                "PIXym": {"output": ""},
                "mUKdC": {"output": ""},
                "peNB6": {"output": ""}
            }}"#,
        );
        then.status(200).body("ok");
    });

    let (_dir, settings) = workspace("exit 0\n");
    let settings = settings.with_url(server.url("/submit"));
    let api = ApiClient::new(settings.submit_url.clone()).unwrap();
    let mut prompt = Canned::new("student@example.com", "otp123");

    let outcome = submit(&settings, &Assignment::membership(), &mut prompt, &api).unwrap();

    grader.assert();
    assert!(matches!(outcome, Outcome::Submitted { ref response } if response == "ok"));
}

#[test]
fn rejected_submission_reports_status_and_reason() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/submit");
        then.status(401).body("bad secret");
    });

    let (_dir, settings) = workspace(THREE_LOGS);
    let settings = settings.with_url(server.url("/submit"));
    let api = ApiClient::new(settings.submit_url.clone()).unwrap();
    let mut prompt = Canned::new("student@example.com", "wrong");

    let outcome = submit(&settings, &Assignment::membership(), &mut prompt, &api).unwrap();

    let error = match outcome {
        Outcome::Undelivered { error } => error,
        other => panic!("expected an undelivered submission, got {:?}", other),
    };
    assert!(matches!(error, SubmitError::Http { code: 401, .. }));
    assert_eq!(error.user_message(), "HTTP Error: 401 - Unauthorized");
}

#[test]
fn unreachable_grader_is_reported_without_aborting() {
    let (_dir, settings) = workspace(THREE_LOGS);
    // Port 1 is reserved and nothing listens there.
    let settings = settings.with_url("http://127.0.0.1:1/submit");
    let api = ApiClient::new(settings.submit_url.clone()).unwrap();
    let mut prompt = Canned::new("student@example.com", "otp123");

    let outcome = submit(&settings, &Assignment::membership(), &mut prompt, &api).unwrap();

    let error = match outcome {
        Outcome::Undelivered { error } => error,
        other => panic!("expected an undelivered submission, got {:?}", other),
    };
    assert!(matches!(error, SubmitError::Transport(_)));
    assert!(error.user_message().starts_with("URL Error:"));
}

#[test]
fn guard_removes_logs_after_undelivered_submission() {
    let (dir, settings) = workspace(THREE_LOGS);
    let settings = settings.with_url("http://127.0.0.1:1/submit");
    let api = ApiClient::new(settings.submit_url.clone()).unwrap();
    let mut prompt = Canned::new("student@example.com", "otp123");

    let result = {
        let _cleanup = CleanupGuard::new(&settings, 4);
        let result = submit(&settings, &Assignment::membership(), &mut prompt, &api);
        assert!(dir.path().join("dbg.0.log").exists());
        result
    };

    assert!(matches!(result, Ok(Outcome::Undelivered { .. })));
    for i in 0..4 {
        assert!(!dir.path().join(format!("dbg.{}.log", i)).exists());
    }
    assert!(dir.path().join("run.sh").exists());
}
