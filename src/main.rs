//! dgen's main application entry point and orchestration logic.
//! Builds the pipeline configuration from command-line flags and runs the
//! pipeline once or under the file watcher.

use dgen::{
    cli::{get_args, Args},
    config::Config,
    error::{default_error_handler, Result},
    logger::init_logger,
    pipeline::codegen,
    watch::run_watch,
};

fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Builds the effective configuration from the parsed arguments
/// 2. Watch mode: runs the pipeline under the file watcher until interrupted
/// 3. Otherwise runs the pipeline once, echoes the result to stdout when no
///    output path was given, and maps recorded failures to the exit status
fn run(args: Args) -> Result<()> {
    let watch = args.watch;
    let config = Config::from_args(&args)?;

    if watch {
        return run_watch(&config);
    }

    let report = codegen(&config);
    if config.output_path.is_none() {
        println!("{}", report.output);
    }

    match report.to_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
