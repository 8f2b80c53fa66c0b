//! Exit codes used by the dispatcher

/// Successful termination, or help shown
pub const OK: i32 = 0;

/// Unknown subcommand or unclassified handler failure
pub const FATAL: i32 = 1;

/// Command line usage error
pub const USAGE: i32 = 2;

/// Internal software error (BSD sysexits.h)
pub const SOFTWARE: i32 = 70;

/// Configuration error (BSD sysexits.h)
pub const CONFIG: i32 = 78;
