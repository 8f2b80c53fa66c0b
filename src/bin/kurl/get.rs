//! `kurl get`: perform HTTP GET requests (illustrative only)

use clap::{value_parser, Arg};

use cmder::usage::{flag_defaults, usage_header};
use cmder::{Command, CommandError, CommandResult, Invocation};

const EXAMPLES: &str = "
Examples:

  Perform an HTTPS GET request on a URL:

    $ kurl get https://google.com

  Include verbose output:

    $ kurl get --verbose https://google.com
";

pub fn scope() -> clap::Command {
    clap::Command::new("get")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .value_name("BOOL")
                .value_parser(value_parser!(bool))
                .num_args(0..=1)
                .require_equals(true)
                .default_value("true")
                .default_missing_value("true")
                .help("include verbose information"),
        )
        .arg(
            Arg::new("url")
                .value_name("URL")
                .num_args(0..)
                .help("URLs to fetch"),
        )
}

fn handle(inv: &Invocation<'_>) -> CommandResult {
    let matches = inv.parse()?;
    let urls: Vec<String> = matches
        .get_many::<String>("url")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();
    if urls.is_empty() {
        return Err(CommandError::usage("get: missing URL"));
    }
    let verbose = matches.get_one::<bool>("verbose").copied().unwrap_or(true);
    println!("subcommand called with {:?} verbose? {}", urls, verbose);
    Ok(())
}

pub fn command() -> Command {
    let usage_scope = scope();
    Command::new(scope(), handle)
        .alias("fetch")
        .usage(move || {
            let mut text = usage_header(super::PROGRAM, usage_scope.get_name());
            text.push_str(&flag_defaults(&usage_scope));
            text.push_str(EXAMPLES);
            text
        })
}
