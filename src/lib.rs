//! dgen is a template-driven code generation tool.
//!
//! It renders a MiniJinja template against JSON data, optionally transformed
//! by a Rhai processor script, then formats and checks the written output and
//! can watch every input for changes.

/// Command-line interface module for the dgen application
pub mod cli;

/// External command execution for the formatter and checker stages
pub mod command;

/// Pipeline configuration and per-category defaults
pub mod config;

/// Common constants used throughout the application
pub mod constants;

/// Data file loading (JSON with comments)
pub mod data;

/// Error types and handling for the dgen application
pub mod error;

/// Filter set handling and the built-in filters
pub mod filters;

/// Logger configuration
pub mod logger;

/// The code generation pipeline
pub mod pipeline;

/// Processor plugin contract and loading
pub mod processor;

/// Template rendering via MiniJinja
pub mod renderer;

/// Run reports and the console summary
pub mod report;

/// Rhai runtime backing processor scripts
pub mod script;

/// File-watch mode
pub mod watch;
