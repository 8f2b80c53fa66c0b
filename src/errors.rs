//! Error types: handler outcomes, dispatch faults, settings failures

use clap::error::ErrorKind;
use thiserror::Error;

/// Boxed cause carried by a [`CommandError`].
pub type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Failure returned by a subcommand handler.
///
/// The variant decides how the dispatcher terminates the process:
/// - `Usage`: print the cause and the command's usage, exit [`exitcode::USAGE`](crate::exitcode::USAGE)
/// - `ExitCode`: print the cause if any, exit with `code`
/// - `Fatal`: print the cause, exit [`exitcode::FATAL`](crate::exitcode::FATAL)
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{0}")]
    Usage(#[source] Cause),

    #[error("{}", exit_message(.cause, .code))]
    ExitCode {
        #[source]
        cause: Option<Cause>,
        code: i32,
    },

    #[error("{0}")]
    Fatal(#[source] Cause),
}

fn exit_message(cause: &Option<Cause>, code: &i32) -> String {
    match cause {
        Some(cause) => cause.to_string(),
        None => format!("exit status {}", code),
    }
}

/// Result type for subcommand handlers.
pub type CommandResult = Result<(), CommandError>;

impl CommandError {
    /// The arguments were invalid for this command.
    pub fn usage(cause: impl Into<Cause>) -> Self {
        Self::Usage(cause.into())
    }

    /// Unexpected failure.
    pub fn fatal(cause: impl Into<Cause>) -> Self {
        Self::Fatal(cause.into())
    }

    /// Exit with `code` without printing anything.
    pub fn exit(code: i32) -> Self {
        Self::ExitCode { cause: None, code }
    }

    /// Print `cause`, then exit with `code`.
    pub fn exit_with(code: i32, cause: impl Into<Cause>) -> Self {
        Self::ExitCode {
            cause: Some(cause.into()),
            code,
        }
    }

    /// Get the exit code the dispatcher uses for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Usage(_) => crate::exitcode::USAGE,
            CommandError::ExitCode { code, .. } => *code,
            CommandError::Fatal(_) => crate::exitcode::FATAL,
        }
    }
}

impl From<clap::Error> for CommandError {
    fn from(err: clap::Error) -> Self {
        match err.kind() {
            // -h / --version inside a subcommand: show the rendered text, succeed
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                let code = err.exit_code();
                Self::exit_with(code, err.render().to_string().trim_end().to_string())
            }
            _ => Self::Usage(clap_message(&err).into()),
        }
    }
}

/// First line of a rendered clap error, without the `error: ` prefix.
///
/// The dispatcher prints the command's own usage after it, so clap's usage and
/// `--help` hint lines are dropped.
fn clap_message(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let line = rendered.lines().next().unwrap_or_default().trim();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        Self::Fatal(Box::new(err))
    }
}

/// Faults raised before a handler can run.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Top-level flag parsing failed (includes `--version` requests).
    #[error(transparent)]
    Parse(#[from] clap::Error),

    /// The top-level scope was not configured by `Commander::prepare`.
    #[error("top-level scope was not prepared for dispatch: {0}")]
    ScopeNotPrepared(String),
}

impl DispatchError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            DispatchError::Parse(e) => e.exit_code(),
            DispatchError::ScopeNotPrepared(_) => crate::exitcode::SOFTWARE,
        }
    }
}

/// Settings loading errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config error: {message}")]
    Config { message: String },
}

impl From<config::ConfigError> for SettingsError {
    fn from(e: config::ConfigError) -> Self {
        SettingsError::Config {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exitcode;
    use clap::{Arg, Command};

    #[test]
    fn exit_code_without_cause_displays_status() {
        let err = CommandError::exit(7);
        assert_eq!(err.to_string(), "exit status 7");
        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn exit_code_with_cause_displays_cause() {
        let err = CommandError::exit_with(3, "no results");
        assert_eq!(err.to_string(), "no results");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn usage_and_fatal_map_to_fixed_codes() {
        assert_eq!(CommandError::usage("bad").exit_code(), exitcode::USAGE);
        assert_eq!(CommandError::fatal("boom").exit_code(), exitcode::FATAL);
        assert_eq!(CommandError::fatal("boom").to_string(), "boom");
    }

    #[test]
    fn clap_help_request_becomes_successful_exit() {
        let err = Command::new("get")
            .no_binary_name(true)
            .try_get_matches_from(["--help"])
            .unwrap_err();
        match CommandError::from(err) {
            CommandError::ExitCode { cause, code } => {
                assert_eq!(code, 0);
                assert!(cause.is_some());
            }
            other => panic!("expected ExitCode, got {:?}", other),
        }
    }

    #[test]
    fn clap_parse_failure_becomes_usage_error() {
        let err = Command::new("get")
            .no_binary_name(true)
            .arg(Arg::new("url").required(true))
            .try_get_matches_from(Vec::<String>::new())
            .unwrap_err();
        assert!(matches!(CommandError::from(err), CommandError::Usage(_)));
    }

    #[test]
    fn clap_parse_failure_keeps_only_the_message_line() {
        let err = Command::new("get")
            .no_binary_name(true)
            .try_get_matches_from(["--nope"])
            .unwrap_err();
        let message = CommandError::from(err).to_string();
        assert!(message.contains("'--nope'"));
        assert!(!message.starts_with("error:"));
        assert!(!message.contains('\n'));
        assert!(!message.contains("Usage:"));
        assert!(!message.contains("--help"));
    }

    #[test]
    fn io_error_is_fatal() {
        let err: CommandError = std::io::Error::other("disk gone").into();
        assert!(matches!(err, CommandError::Fatal(_)));
    }
}
