//! The code generation pipeline.
//!
//! Stages run in a fixed order: data, processor, render, write, formatter,
//! checker, summary. Every stage failure is recorded in the report and the
//! pipeline carries on with the best state it has, so a broken data file
//! still yields a render attempt and a complete report.

use crate::command::{CommandOutput, CommandRunner, CommandSpec, ProcessCommandRunner};
use crate::config::{Config, Flag};
use crate::data::load_data;
use crate::error::{Error, Result};
use crate::filters::FilterMap;
use crate::processor::{load_processor, Processor};
use crate::renderer::{context_from_json, render_template, ContextMap};
use crate::report::{print_summary, Failure, Report};
use log::error;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Runs the full pipeline with the default process-backed command runner.
pub fn codegen(config: &Config) -> Report {
    codegen_with_runner(config, &ProcessCommandRunner)
}

/// Runs the full pipeline with a caller-supplied command runner.
pub fn codegen_with_runner(config: &Config, runner: &dyn CommandRunner) -> Report {
    let start = Instant::now();
    let mut failures = Vec::new();

    // Data stage. A bad or missing data file is recorded and rendering falls
    // back to the configuration defaults.
    let mut loaded: Option<serde_json::Value> = None;
    if let Some(path) = &config.data_path {
        match load_data(path) {
            Ok(value) => loaded = Some(value),
            Err(err) => {
                error!("{}", err);
                failures.push(Failure::Data {
                    path: path.display().to_string(),
                });
            }
        }
    }

    // Processor stage. Success replaces data and filters wholesale, even with
    // absence; failure keeps whatever the data stage produced.
    let mut data: Option<ContextMap> = loaded.as_ref().map(context_from_json);
    let mut processor_filters: Option<FilterMap> = None;
    if let Some(spec) = &config.processor_path {
        let transformed =
            load_processor(spec).and_then(|processor| processor.transform(loaded.clone()));
        match transformed {
            Ok(output) => {
                data = output.data;
                processor_filters = output.filters;
            }
            Err(err) => {
                error!("{}", err);
                failures.push(Failure::Processor { path: spec.clone() });
            }
        }
    }

    let filters = processor_filters.as_ref().unwrap_or(&config.filters);
    let context = data.as_ref().unwrap_or(&config.data);

    // Render stage. On failure the output stays empty so the later stages and
    // the report still run.
    let mut output = String::new();
    match render_template(&config.template_path, filters, context) {
        Ok(rendered) => output = rendered,
        Err(err) => {
            error!("{}", err);
            failures.push(Failure::Template {
                path: config.template_path.display().to_string(),
            });
        }
    }

    // Write and post-processing stages. The formatter and checker run against
    // the output path whenever one was given, independently of each other and
    // of whether the write succeeded.
    if let Some(path) = &config.output_path {
        if let Err(err) = write_output(path, &output) {
            error!("{}", err);
            failures.push(Failure::Output {
                path: path.display().to_string(),
            });
        }

        let print_info = config.has_flag(Flag::PrintInfo);
        if config.has_flag(Flag::Fmt)
            && !run_command(runner, &config.fmt_command, path, print_info)
        {
            failures.push(Failure::Fmt {
                command: config.fmt_command.label(),
            });
        }
        if config.has_flag(Flag::Check)
            && !run_command(runner, &config.check_command, path, print_info)
        {
            failures.push(Failure::Check {
                command: config.check_command.label(),
            });
        }
    }

    let report = Report {
        output,
        failures,
        elapsed: start.elapsed(),
    };

    if config.has_flag(Flag::PrintInfo) {
        print_summary(&report);
    }

    report
}

/// Writes the rendered text, creating missing parent directories.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let write_error = |source| Error::OutputWriteError {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
    }
    fs::write(path, content).map_err(write_error)
}

/// Runs one post-processing command, echoing its captured output to stderr
/// under `print_info`. Returns whether the command succeeded.
fn run_command(
    runner: &dyn CommandRunner,
    spec: &CommandSpec,
    target: &Path,
    print_info: bool,
) -> bool {
    match runner.run(spec, target) {
        Ok(CommandOutput {
            success,
            stdout,
            stderr,
        }) => {
            if print_info {
                let mut sink = std::io::stderr();
                let _ = sink.write_all(&stdout);
                let _ = sink.write_all(&stderr);
            }
            success
        }
        Err(err) => {
            error!("{}", err);
            false
        }
    }
}
