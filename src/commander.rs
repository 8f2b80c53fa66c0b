//! Subcommand resolution and dispatch
//!
//! A [`Commander`] owns the registered [`Command`]s of one program. A single call to
//! [`Commander::run`] parses the top-level flags, picks the subcommand named by the first
//! positional argument (canonical name or alias), invokes its handler with the remaining
//! arguments, and terminates the process according to the handler's outcome:
//!
//! | outcome | output | exit code |
//! |---|---|---|
//! | no subcommand / `help` | top-level usage | 0 |
//! | unknown subcommand | `<program>: unknown subcommand "<name>"` | 1 |
//! | `Ok(())` | - | 0 |
//! | `CommandError::Usage` | cause, command usage | 2 |
//! | `CommandError::ExitCode` | cause if any | handler-specified |
//! | `CommandError::Fatal` | cause | 1 |

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches};
use tracing::{debug, instrument, trace};

use crate::command::Command;
use crate::errors::DispatchError;
use crate::exit::Exit;
use crate::output;

/// Id of the trailing positional capturing the subcommand name and its arguments.
pub const ARGS_ID: &str = "cmder-args";

/// First positional that always shows the top-level usage.
pub const HELP: &str = "help";

#[derive(Debug, Default)]
pub struct Commander {
    commands: Vec<Command>,
}

impl Commander {
    pub fn new(commands: Vec<Command>) -> Self {
        for command in &commands {
            debug_assert!(!command.name().is_empty(), "command name must not be empty");
        }
        Self { commands }
    }

    pub fn register(mut self, command: Command) -> Self {
        debug_assert!(!command.name().is_empty(), "command name must not be empty");
        self.commands.push(command);
        self
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// First command in registration order matching `name` or one of its aliases.
    pub fn find(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|command| command.matches(name))
    }

    /// Configure a top-level scope for dispatch.
    ///
    /// - argument vectors start after the program name
    /// - `-h` / `--help` render `usage_text` verbatim
    /// - top-level flag parsing stops at the first positional; it and everything after it
    ///   are captured for the subcommand
    pub fn prepare(scope: clap::Command, usage_text: &str) -> clap::Command {
        scope
            .no_binary_name(true)
            .disable_help_subcommand(true)
            .override_help(usage_text.to_string())
            .arg(
                Arg::new(ARGS_ID)
                    .value_name("COMMAND")
                    .num_args(0..)
                    .action(ArgAction::Append)
                    .trailing_var_arg(true)
                    .value_parser(clap::value_parser!(String)),
            )
    }

    /// Parse `args` with the prepared top-level scope and dispatch.
    ///
    /// `-h` / `--help` end in [`Termination::HelpShown`](crate::exit::Termination::HelpShown),
    /// like the `help` positional.
    pub fn dispatch<I, T>(
        &self,
        scope: clap::Command,
        program: &str,
        usage_text: &str,
        args: I,
    ) -> Result<Exit, DispatchError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let Some(matches) = parse_top_level(scope, usage_text, args)? else {
            return Ok(Exit::help(usage_text));
        };
        self.dispatch_matches(&matches, program, usage_text)
    }

    /// Prepare and parse a top-level scope, exiting on errors.
    ///
    /// For hosts that read their own flags before [`Commander::run_matches`]. `-h` /
    /// `--help` terminate like the `help` positional; other parse errors exit the way
    /// clap's `get_matches_from` does.
    pub fn get_matches_from<I, T>(scope: clap::Command, usage_text: &str, args: I) -> ArgMatches
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match parse_top_level(scope, usage_text, args) {
            Ok(Some(matches)) => matches,
            Ok(None) => Exit::help(usage_text).terminate(),
            Err(e) => e.exit(),
        }
    }

    /// Dispatch from an already parsed scope, which must come from [`Commander::prepare`].
    #[instrument(level = "debug", skip(self, matches, usage_text))]
    pub fn dispatch_matches(
        &self,
        matches: &ArgMatches,
        program: &str,
        usage_text: &str,
    ) -> Result<Exit, DispatchError> {
        let args = positionals(matches)?;
        trace!(?args, "positional arguments");

        let name = match args.first() {
            Some(name) if name != HELP => name,
            _ => {
                debug!("no subcommand or help requested");
                return Ok(Exit::help(usage_text));
            }
        };

        let Some(command) = self.find(name) else {
            debug!(name, "unknown subcommand");
            return Ok(Exit::unknown_command(program, name));
        };
        debug!(name, command = command.name(), "resolved subcommand");

        let exit = match command.invoke(program, &args[1..]) {
            Ok(()) => Exit::success(),
            Err(err) => {
                debug!(error = %err, "handler failed");
                Exit::from_command_error(err, || command.usage_text(program))
            }
        };
        Ok(exit)
    }

    /// Dispatch and terminate the process.
    pub fn run<I, T>(&self, scope: clap::Command, program: &str, usage_text: &str, args: I) -> !
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        finish(self.dispatch(scope, program, usage_text, args))
    }

    /// Dispatch from an already parsed scope and terminate the process.
    pub fn run_matches(&self, matches: &ArgMatches, program: &str, usage_text: &str) -> ! {
        finish(self.dispatch_matches(matches, program, usage_text))
    }
}

impl FromIterator<Command> for Commander {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// `None` when `-h` / `--help` was given.
fn parse_top_level<I, T>(
    scope: clap::Command,
    usage_text: &str,
    args: I,
) -> Result<Option<ArgMatches>, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Commander::prepare(scope, usage_text).try_get_matches_from(args) {
        Ok(matches) => Ok(Some(matches)),
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            debug!("top-level help flag");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn positionals(matches: &ArgMatches) -> Result<Vec<String>, DispatchError> {
    let values = matches
        .try_get_many::<String>(ARGS_ID)
        .map_err(|e| DispatchError::ScopeNotPrepared(e.to_string()))?;
    Ok(values.map(|v| v.cloned().collect()).unwrap_or_default())
}

fn finish(result: Result<Exit, DispatchError>) -> ! {
    match result {
        Ok(exit) => exit.terminate(),
        // the top-level scope behaves as exit-on-error
        Err(DispatchError::Parse(e)) => e.exit(),
        Err(e) => {
            output::error(&e);
            output::flush();
            std::process::exit(e.exit_code())
        }
    }
}
