//! Terminal decisions produced by dispatch
//!
//! Dispatch never exits the process itself; it returns an [`Exit`] describing what to
//! print and which code to exit with. [`Exit::terminate`] performs the side effects.

use tracing::debug;

use crate::errors::CommandError;
use crate::exitcode;
use crate::output;

/// The terminal state a dispatch ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// `help` requested or no subcommand given
    HelpShown,
    /// First positional matched no command
    UnknownCommand,
    /// Handler returned [`CommandError::Usage`]
    UsageError,
    /// Handler returned [`CommandError::ExitCode`]
    ExplicitExit,
    /// Handler returned [`CommandError::Fatal`]
    Fatal,
    /// Handler succeeded
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exit {
    pub termination: Termination,
    pub code: i32,
    /// Lines for the diagnostic stream, written before `usage`
    pub diagnostics: Vec<String>,
    /// Usage text written verbatim after the diagnostics
    pub usage: Option<String>,
}

impl Exit {
    pub fn help(usage_text: &str) -> Self {
        Self {
            termination: Termination::HelpShown,
            code: exitcode::OK,
            diagnostics: Vec::new(),
            usage: Some(usage_text.to_string()),
        }
    }

    pub fn unknown_command(program: &str, name: &str) -> Self {
        Self {
            termination: Termination::UnknownCommand,
            code: exitcode::FATAL,
            diagnostics: vec![
                format!("{}: unknown subcommand {:?}", program, name),
                format!("Run '{} help' for usage.", program),
            ],
            usage: None,
        }
    }

    pub fn success() -> Self {
        Self {
            termination: Termination::Success,
            code: exitcode::OK,
            diagnostics: Vec::new(),
            usage: None,
        }
    }

    /// Classify a handler failure. `usage` is the failing command's usage text.
    pub fn from_command_error(err: CommandError, usage: impl FnOnce() -> String) -> Self {
        let code = err.exit_code();
        match err {
            CommandError::Usage(cause) => Self {
                termination: Termination::UsageError,
                code,
                diagnostics: vec![cause.to_string()],
                usage: Some(usage()),
            },
            CommandError::ExitCode { cause, .. } => Self {
                termination: Termination::ExplicitExit,
                code,
                diagnostics: cause.map(|c| c.to_string()).into_iter().collect(),
                usage: None,
            },
            CommandError::Fatal(cause) => Self {
                termination: Termination::Fatal,
                code,
                diagnostics: vec![cause.to_string()],
                usage: None,
            },
        }
    }

    fn is_failure(&self) -> bool {
        matches!(
            self.termination,
            Termination::UnknownCommand | Termination::Fatal
        )
    }

    /// Write diagnostics and usage to stderr, then exit the process with `code`.
    pub fn terminate(self) -> ! {
        debug!(termination = ?self.termination, code = self.code, "terminating");
        for line in &self.diagnostics {
            if self.is_failure() {
                output::error(line);
            } else {
                output::diagnostic(line);
            }
        }
        if let Some(usage) = &self.usage {
            output::usage(usage);
        }
        output::flush();
        std::process::exit(self.code)
    }
}
