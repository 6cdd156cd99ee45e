//! Common constants used throughout the application.

/// Output extensions treated as script-like, selecting the script defaults
pub const SCRIPT_EXTENSIONS: [&str; 8] = ["ts", "tsx", "js", "jsx", "mjs", "cjs", "mts", "cts"];

/// Default formatter command, run against the output path
pub const FMT_COMMAND: [&str; 2] = ["deno", "fmt"];

/// Default checker command, run against the output path
pub const CHECK_COMMAND: [&str; 2] = ["deno", "check"];

/// Fraction of the terminal width used for the summary divider
pub const DIVIDER_RATIO: f64 = 0.67;

/// Terminal width assumed when the size cannot be queried
pub const FALLBACK_TERM_WIDTH: usize = 80;
