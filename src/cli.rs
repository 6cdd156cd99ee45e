//! Command-line interface implementation for dgen.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for dgen.
#[derive(Parser, Debug)]
#[command(author, version, about = "dgen: template-driven code generation tool", long_about = None)]
pub struct Args {
    /// Path to the template file
    #[arg(long = "in", value_name = "TEMPLATE")]
    pub input: PathBuf,

    /// Path to the output file; the result is printed to stdout when omitted
    #[arg(long, value_name = "OUTPUT")]
    pub out: Option<PathBuf>,

    /// Path to the data file (JSON, comments allowed)
    #[arg(long, value_name = "DATA")]
    pub data: Option<PathBuf>,

    /// Path or http(s) URL of the processor script
    #[arg(long, value_name = "PROCESSOR")]
    pub processor: Option<String>,

    /// Comma-separated pipeline flags: fmt, check, print_info
    #[arg(long, value_name = "FLAGS", value_parser = flags_value)]
    pub flags: Option<String>,

    /// Re-run the pipeline whenever an input file changes
    #[arg(long)]
    pub watch: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Validates a `--flags` value at parse time, keeping the raw string.
fn flags_value(raw: &str) -> Result<String, String> {
    match crate::config::parse_flags(raw) {
        Ok(_) => Ok(raw.to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 0 after printing help or version information
/// * With status code 1 on any usage error, after printing the usage text
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            ErrorKind::MissingRequiredArgument => {
                Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help()
                    .unwrap();
                std::process::exit(1);
            }
            _ => {
                // Usage errors exit with 1 rather than clap's default of 2.
                let _ = e.print();
                std::process::exit(1);
            }
        },
    }
}
