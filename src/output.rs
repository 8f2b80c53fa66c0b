//! Terminal output for the dispatcher's diagnostic stream
//!
//! Everything goes to stderr. Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE unless
//! overridden by [`apply_color`].

use std::io::Write;

use colored::Colorize;

use crate::config::ColorMode;

/// Print a diagnostic line (no decoration)
pub fn diagnostic(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}", msg);
}

/// Print a fatal diagnostic line (red)
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}", msg.to_string().red());
}

/// Print usage text verbatim
pub fn usage(text: &str) {
    eprint!("{}", text);
}

/// Flush stderr before the process exits
pub fn flush() {
    std::io::stderr().flush().ok();
}

/// Apply the configured color mode to all colored output
pub fn apply_color(mode: ColorMode) {
    match mode {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => colored::control::unset_override(),
    }
}
