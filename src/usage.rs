//! Usage text synthesis for subcommands without a custom renderer
//!
//! Mirrors a classic flag-default listing:
//!
//! ```text
//! Usage of 'kurl get':
//!   --verbose <BOOL>
//!         include verbose information (default: true)
//! ```

use clap::{Arg, ArgAction};

/// Header naming both the overall program and the subcommand.
pub fn usage_header(program: &str, name: &str) -> String {
    format!("Usage of '{} {}':\n", program, name)
}

/// Default usage for a subcommand: header plus the scope's flag-default listing.
///
/// Pure function of its inputs: rendering it twice yields the same text.
pub fn default_usage(program: &str, scope: &clap::Command) -> String {
    let mut text = usage_header(program, scope.get_name());
    text.push_str(&flag_defaults(scope));
    text
}

/// List every visible argument declared on `scope`, in declaration order.
pub fn flag_defaults(scope: &clap::Command) -> String {
    scope
        .get_arguments()
        .filter(|arg| !arg.is_hide_set())
        .map(render_arg)
        .collect()
}

fn render_arg(arg: &Arg) -> String {
    let mut out = format!("  {}\n", arg_synopsis(arg));
    let mut description = arg.get_help().map(|h| h.to_string()).unwrap_or_default();
    let defaults = arg
        .get_default_values()
        .iter()
        .map(|v| v.to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    if !defaults.is_empty() {
        if !description.is_empty() {
            description.push(' ');
        }
        description.push_str(&format!("(default: {})", defaults.join(", ")));
    }
    if !description.is_empty() {
        out.push_str(&format!("        {}\n", description));
    }
    out
}

fn arg_synopsis(arg: &Arg) -> String {
    if arg.is_positional() {
        return format!("<{}>", value_name(arg));
    }
    let mut names = Vec::new();
    if let Some(short) = arg.get_short() {
        names.push(format!("-{}", short));
    }
    if let Some(long) = arg.get_long() {
        names.push(format!("--{}", long));
    }
    let mut synopsis = names.join(", ");
    if takes_value(arg) {
        let value = format!("<{}>", value_name(arg));
        if !arg.is_require_equals_set() {
            synopsis.push_str(&format!(" {}", value));
        } else if optional_value(arg) {
            synopsis.push_str(&format!("[={}]", value));
        } else {
            synopsis.push_str(&format!("={}", value));
        }
    }
    synopsis
}

fn optional_value(arg: &Arg) -> bool {
    arg.get_num_args().is_some_and(|range| range.min_values() == 0)
}

fn takes_value(arg: &Arg) -> bool {
    !matches!(
        arg.get_action(),
        ArgAction::SetTrue
            | ArgAction::SetFalse
            | ArgAction::Count
            | ArgAction::Help
            | ArgAction::HelpShort
            | ArgAction::HelpLong
            | ArgAction::Version
    )
}

fn value_name(arg: &Arg) -> String {
    arg.get_value_names()
        .and_then(|names| names.first())
        .map(|n| n.to_string())
        .unwrap_or_else(|| arg.get_id().as_str().to_uppercase())
}
