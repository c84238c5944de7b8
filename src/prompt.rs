// Credential prompt: asks for the submitter's email and the assignment's
// one-time password. Input is echoed and not validated; an empty login
// means the user wants to cancel.

use dialoguer::console::Term;
use dialoguer::Input;
use std::io::{self, BufRead, IsTerminal, Write};

const LOGIN_PROMPT: &str = "Login (Email address)";
const PASSWORD_PROMPT: &str =
    "One-time Password (from the assignment page. This is NOT your own account's password)";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    pub fn is_cancelled(&self) -> bool {
        self.login.is_empty()
    }
}

/// Source of credentials. The terminal implementation is used by the
/// binary; tests feed canned answers.
pub trait CredentialPrompt {
    fn ask(&mut self) -> io::Result<Credentials>;
}

/// Reads both answers from the terminal. `dialoguer` draws on stderr and
/// reads nothing when stderr is redirected, so unless both stdin and stderr
/// are terminals the answers are read as plain lines from stdin.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl CredentialPrompt for TerminalPrompt {
    fn ask(&mut self) -> io::Result<Credentials> {
        if !io::stdin().is_terminal() || !Term::stderr().is_term() {
            tracing::debug!("not an interactive terminal, reading credentials from stdin");
            let stdin = io::stdin();
            return LinePrompt::new(stdin.lock(), io::stdout()).ask();
        }

        let login: String = Input::new()
            .with_prompt(LOGIN_PROMPT)
            .allow_empty(true)
            .interact_text()?;
        let password: String = Input::new()
            .with_prompt(PASSWORD_PROMPT)
            .allow_empty(true)
            .interact_text()?;
        Ok(Credentials { login, password })
    }
}

/// Line-oriented prompt: writes each question to `out` and reads one line
/// of answer from `input`. End of input counts as an empty answer.
pub struct LinePrompt<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, out: W) -> Self {
        LinePrompt { input, out }
    }

    fn answer(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.out, "{}: ", prompt)?;
        self.out.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> CredentialPrompt for LinePrompt<R, W> {
    fn ask(&mut self) -> io::Result<Credentials> {
        let login = self.answer(LOGIN_PROMPT)?;
        let password = self.answer(PASSWORD_PROMPT)?;
        Ok(Credentials { login, password })
    }
}
