// Library root
// -----------
// This crate exposes the pieces of the assignment submission helper. The
// binary (`main.rs`) runs them in order: prompt, run tests, collect logs,
// submit, clean up.
//
// Module responsibilities:
// - `config`: the assignment metadata (key and part registry) and the
//   runtime settings (endpoint, test script, working directory).
// - `prompt`: reads the login and one-time password from the terminal.
// - `runner`: invokes the external test script.
// - `logs`: reads the `dbg.<index>.log` files and removes them afterwards.
// - `api`: builds the JSON payload and POSTs it to the grader.
// - `submit`: the linear flow tying the above together.
// - `error` and `logger`: the failure taxonomy and diagnostic logging.
pub mod api;
pub mod config;
pub mod error;
pub mod logger;
pub mod logs;
pub mod prompt;
pub mod runner;
pub mod submit;

pub use config::{Assignment, Part, Settings};
pub use error::SubmitError;
pub use submit::{submit, Outcome};
