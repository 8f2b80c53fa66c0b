//! A subcommand: parsing scope, aliases, handler, and optional usage renderer

use std::fmt;

use clap::ArgMatches;

use crate::errors::{CommandError, CommandResult};
use crate::usage::default_usage;

/// Handles one invocation of a subcommand.
pub type Handler = Box<dyn Fn(&Invocation<'_>) -> CommandResult>;

/// Produces help text for a subcommand.
pub type UsageFn = Box<dyn Fn() -> String>;

pub struct Command {
    scope: clap::Command,
    aliases: Vec<String>,
    handler: Handler,
    usage: Option<UsageFn>,
}

impl Command {
    /// Create a command named after `scope`.
    ///
    /// The scope is configured to parse argument vectors without a leading binary name,
    /// matching what the handler receives.
    pub fn new<F>(scope: clap::Command, handler: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> CommandResult + 'static,
    {
        Self {
            scope: scope.no_binary_name(true),
            aliases: Vec::new(),
            handler: Box::new(handler),
            usage: None,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Replace the synthesized usage text with a custom renderer.
    pub fn usage<F>(mut self, usage: F) -> Self
    where
        F: Fn() -> String + 'static,
    {
        self.usage = Some(Box::new(usage));
        self
    }

    /// Canonical name, taken from the parsing scope.
    pub fn name(&self) -> &str {
        self.scope.get_name()
    }

    pub fn alias_names(&self) -> &[String] {
        &self.aliases
    }

    pub fn scope(&self) -> &clap::Command {
        &self.scope
    }

    pub fn has_custom_usage(&self) -> bool {
        self.usage.is_some()
    }

    /// True iff `query` is exactly the canonical name or one of the aliases.
    pub fn matches(&self, query: &str) -> bool {
        query == self.name() || self.aliases.iter().any(|alias| alias == query)
    }

    /// Usage text for this command as part of `program`.
    pub fn usage_text(&self, program: &str) -> String {
        match &self.usage {
            Some(usage) => usage(),
            None => default_usage(program, &self.scope),
        }
    }

    /// Run the handler with the arguments following the command name.
    pub fn invoke(&self, program: &str, args: &[String]) -> CommandResult {
        let invocation = Invocation {
            program,
            command: self,
            args,
        };
        (self.handler)(&invocation)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name())
            .field("aliases", &self.aliases)
            .field("custom_usage", &self.usage.is_some())
            .finish_non_exhaustive()
    }
}

/// What a handler sees: its arguments, plus the command and program they belong to.
pub struct Invocation<'a> {
    program: &'a str,
    command: &'a Command,
    args: &'a [String],
}

impl<'a> Invocation<'a> {
    /// Arguments following the subcommand name.
    pub fn args(&self) -> &'a [String] {
        self.args
    }

    pub fn program(&self) -> &'a str {
        self.program
    }

    pub fn command(&self) -> &'a Command {
        self.command
    }

    /// The command's usage text (custom renderer or the synthesized default).
    pub fn usage_text(&self) -> String {
        self.command.usage_text(self.program)
    }

    /// Parse the arguments with the command's own scope.
    ///
    /// `-h` / `--help` yield a successful [`CommandError::ExitCode`] carrying the command's
    /// usage text; every other parse failure becomes [`CommandError::Usage`].
    pub fn parse(&self) -> Result<ArgMatches, CommandError> {
        let matches = self
            .command
            .scope
            .clone()
            .override_help(self.usage_text())
            .try_get_matches_from(self.args)?;
        Ok(matches)
    }
}
