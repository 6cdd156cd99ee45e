//! Error handling for the dgen application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for dgen operations.
///
/// Stage errors (data, processor, template, output, command) are recorded in
/// the run report and never abort the pipeline; the remaining variants are
/// fatal to the invocation that raised them.
#[derive(Error, Debug)]
pub enum Error {
    /// The data file could not be read
    #[error("Cannot read data file '{path}': {source}.")]
    DataReadError { path: String, source: io::Error },

    /// The data file content is not valid JSON/JSONC
    #[error("Invalid JSON in data file '{path}': {source}.")]
    DataParseError { path: String, source: serde_json::Error },

    /// The data file parsed but does not hold an object
    #[error("Data file '{path}' must contain a JSON object.")]
    DataFormatError { path: String },

    /// The processor script could not be resolved, fetched or compiled
    #[error("Cannot load processor '{path}': {reason}.")]
    ProcessorLoadError { path: String, reason: String },

    /// The processor script loaded but its invocation failed
    #[error("Processor '{path}' failed: {reason}.")]
    ProcessorExecutionError { path: String, reason: String },

    /// The template file is missing or contains a syntax error
    #[error("Cannot load template '{path}': {source}.")]
    TemplateLoadError { path: String, source: minijinja::Error },

    /// Rendering the template against the final context failed
    #[error("Cannot render template '{path}': {source}.")]
    TemplateRenderError { path: String, source: minijinja::Error },

    /// Writing the rendered output failed
    #[error("Cannot write output '{path}': {source}.")]
    OutputWriteError { path: String, source: io::Error },

    /// An external formatter/checker command could not be run
    #[error("Command '{command}' failed: {reason}.")]
    CommandError { command: String, reason: String },

    /// Represents errors in the effective configuration or CLI arguments
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents errors raised by the file watcher
    #[error("Watch error: {0}.")]
    WatchError(#[from] notify::Error),

    /// Aggregate raised after a run whose failure list is non-empty
    #[error("Failed steps: {0}.")]
    FailedStepsError(String),
}

/// Convenience type alias for Results with dgen's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
