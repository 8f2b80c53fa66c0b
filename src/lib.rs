//! Subcommand dispatch for command-line programs.
//!
//! Register [`Command`]s (a `clap::Command` parsing scope, aliases, a handler and an
//! optional usage renderer) in a [`Commander`], then hand it the argument vector:
//!
//! ```no_run
//! use cmder::{Command, Commander, CommandError, Invocation};
//!
//! let get = Command::new(clap::Command::new("get"), |inv: &Invocation<'_>| {
//!     let args = inv.args();
//!     if args.is_empty() {
//!         return Err(CommandError::usage("get: missing URL"));
//!     }
//!     println!("GET {}", args.join(" "));
//!     Ok(())
//! })
//! .alias("fetch");
//!
//! let usage = "kurl is a tool that makes HTTP requests.\n";
//! Commander::new(vec![get]).run(
//!     clap::Command::new("kurl"),
//!     "kurl",
//!     usage,
//!     std::env::args_os().skip(1),
//! );
//! ```

pub mod command;
pub mod commander;
pub mod config;
pub mod errors;
pub mod exit;
pub mod exitcode;
pub mod logging;
pub mod output;
pub mod usage;
pub mod util;

pub use command::{Command, Handler, Invocation, UsageFn};
pub use commander::Commander;
pub use config::{ColorMode, Settings};
pub use errors::{CommandError, CommandResult, DispatchError, SettingsError};
pub use exit::{Exit, Termination};
