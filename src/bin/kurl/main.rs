use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, FromArgMatches, Parser};

use cmder::{exitcode, logging, output, Commander, Settings};

mod get;

const PROGRAM: &str = "kurl";

const USAGE_TEXT: &str = "kurl is a tool that makes HTTP requests.

Usage:

\tkurl [-v] [--config FILE] <command> [arguments]

The commands are:

\tget    perform HTTP GET requests (alias: fetch)

Use \"kurl <command> -h\" for more information about a command.
";

/// Top-level flags, parsed before the subcommand name
#[derive(Parser, Debug)]
#[command(name = "kurl", version)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Config file (default: $XDG_CONFIG_HOME/kurl/kurl.toml)
    #[arg(long, env = "KURL_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
}

fn commands() -> Commander {
    Commander::new(vec![get::command()])
}

fn main() {
    let matches =
        Commander::get_matches_from(Cli::command(), USAGE_TEXT, std::env::args_os().skip(1));
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let settings = match &cli.config {
        Some(path) => Settings::load_from(PROGRAM, path),
        None => Settings::load(PROGRAM),
    }
    .unwrap_or_else(|e| {
        output::error(&format!("{}: {}", PROGRAM, e));
        process::exit(exitcode::CONFIG);
    });

    output::apply_color(settings.color);
    logging::init(cli.verbose, &settings);

    commands().run_matches(&matches, PROGRAM, USAGE_TEXT)
}
