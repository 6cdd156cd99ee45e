//! Pipeline configuration and per-category defaults.

use crate::cli::Args;
use crate::command::CommandSpec;
use crate::constants::{CHECK_COMMAND, FMT_COMMAND, SCRIPT_EXTENSIONS};
use crate::error::{Error, Result};
use crate::filters::{default_filters, FilterMap};
use crate::renderer::ContextMap;
use minijinja::Value;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Pipeline toggles carried alongside the paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// Run the formatter command over the output file
    Fmt,
    /// Run the checker command over the output file
    Check,
    /// Print the summary banner and the command output
    PrintInfo,
}

impl FromStr for Flag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fmt" => Ok(Flag::Fmt),
            "check" => Ok(Flag::Check),
            "print_info" => Ok(Flag::PrintInfo),
            other => Err(Error::ConfigError(format!(
                "unknown flag '{}' (expected fmt, check or print_info)",
                other
            ))),
        }
    }
}

/// Parses a comma-separated `--flags` value.
///
/// Empty segments are skipped and duplicates collapse; `None` means the value
/// named no flags at all, so the category defaults stay in effect.
pub fn parse_flags(raw: &str) -> Result<Option<Vec<Flag>>> {
    let mut flags = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let flag = part.parse()?;
        if !flags.contains(&flag) {
            flags.push(flag);
        }
    }
    Ok(if flags.is_empty() { None } else { Some(flags) })
}

/// Output classification driving the configuration defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Script,
    Text,
}

impl OutputKind {
    /// Infers the category from the output path extension. Runs without an
    /// output path keep the script defaults.
    pub fn from_output(output: Option<&Path>) -> Self {
        match output {
            Some(path) => {
                let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
                if SCRIPT_EXTENSIONS.contains(&extension) {
                    OutputKind::Script
                } else {
                    OutputKind::Text
                }
            }
            None => OutputKind::Script,
        }
    }

    fn default_flags(self) -> Vec<Flag> {
        match self {
            OutputKind::Script => vec![Flag::Fmt, Flag::Check, Flag::PrintInfo],
            OutputKind::Text => vec![Flag::PrintInfo],
        }
    }
}

/// Default render data: one plain value and one invokable, so a bare template
/// can exercise both forms without any data file.
pub fn default_data() -> ContextMap {
    let mut data = ContextMap::new();
    data.insert("name".to_string(), Value::from("Bobert Paulson"));
    data.insert(
        "hello".to_string(),
        Value::from_function(|| "sup dawg".to_string()),
    );
    data
}

/// The effective configuration of one pipeline run.
pub struct Config {
    /// Path to the template file
    pub template_path: PathBuf,
    /// Processor script path or URL, as given on the command line
    pub processor_path: Option<String>,
    /// Path to the data file
    pub data_path: Option<PathBuf>,
    /// Path to the output file; absent means print to stdout
    pub output_path: Option<PathBuf>,
    /// Default filter set, applied unless a processor replaces it
    pub filters: FilterMap,
    /// Default render data, applied unless a data file or processor replaces it
    pub data: ContextMap,
    /// Enabled pipeline toggles
    pub flags: Vec<Flag>,
    /// Formatter invocation for the `fmt` flag
    pub fmt_command: CommandSpec,
    /// Checker invocation for the `check` flag
    pub check_command: CommandSpec,
}

impl Config {
    /// Builds the category defaults for a template/output pair. Every field
    /// can be overridden afterwards.
    pub fn new(template_path: impl Into<PathBuf>, output_path: Option<PathBuf>) -> Self {
        let kind = OutputKind::from_output(output_path.as_deref());
        Config {
            template_path: template_path.into(),
            processor_path: None,
            data_path: None,
            output_path,
            filters: default_filters(kind),
            data: default_data(),
            flags: kind.default_flags(),
            fmt_command: CommandSpec::from_parts(&FMT_COMMAND),
            check_command: CommandSpec::from_parts(&CHECK_COMMAND),
        }
    }

    /// Builds the effective configuration from parsed command-line arguments.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = Config::new(&args.input, args.out.clone());
        config.processor_path = args.processor.clone();
        config.data_path = args.data.clone();
        if let Some(raw) = &args.flags {
            if let Some(flags) = parse_flags(raw)? {
                config.flags = flags;
            }
        }
        Ok(config)
    }

    pub fn has_flag(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }
}
