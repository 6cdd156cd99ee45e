//! File-watch mode: re-run the pipeline when an input file changes.
//!
//! The watcher registers the parent directories of the watched files and
//! filters events back down to the files themselves, so editors that replace
//! files on save (write to a temp file, then rename) still trigger a run.

use crate::config::Config;
use crate::error::Result;
use crate::pipeline::codegen;
use crate::processor::ProcessorSource;
use log::{debug, warn};
use notify::{recommended_watcher, Event, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// De-duplicated input paths whose modification re-triggers the pipeline:
/// the template, the data file and a local processor script. URL processors
/// are left out.
pub fn watch_set(config: &Config) -> Vec<PathBuf> {
    let mut paths = vec![config.template_path.clone()];

    if let Some(path) = &config.data_path {
        if !paths.contains(path) {
            paths.push(path.clone());
        }
    }
    if let Some(spec) = &config.processor_path {
        let source = ProcessorSource::detect(spec);
        if let Some(path) = source.watchable_path() {
            let path = path.to_path_buf();
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    paths
}

/// Whether an event represents a content change to one of the watched files.
pub fn is_watched(event: &Event, paths: &[PathBuf]) -> bool {
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return false;
    }
    event
        .paths
        .iter()
        .any(|changed| paths.contains(&normalize(changed)))
}

/// Runs the pipeline once, then again on every change to a watched file.
/// Blocks for as long as the watcher stays alive.
pub fn run_watch(config: &Config) -> Result<()> {
    let paths: Vec<PathBuf> = watch_set(config).iter().map(|p| normalize(p)).collect();

    let (tx, rx) = mpsc::channel();
    let mut watcher = recommended_watcher(tx)?;
    let mut watched_dirs: Vec<PathBuf> = Vec::new();
    for path in &paths {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !watched_dirs.contains(&dir) {
            watcher.watch(&dir, RecursiveMode::NonRecursive)?;
            debug!("Watching '{}'", dir.display());
            watched_dirs.push(dir);
        }
    }

    run_iteration(config);

    for result in rx {
        match result {
            Ok(event) if is_watched(&event, &paths) => {
                debug!("Change detected: {:?}", event.paths);
                run_iteration(config);
            }
            Ok(_) => {}
            Err(err) => warn!("Watch error: {}", err),
        }
    }

    Ok(())
}

/// One full pipeline run plus the stdout echo for runs without an output
/// path. Failures are already reported per stage, so the loop keeps going
/// regardless of the outcome.
fn run_iteration(config: &Config) {
    let report = codegen(config);
    if config.output_path.is_none() {
        println!("{}", report.output);
    }
}

/// Resolves a path for event comparison. Canonicalization also follows
/// symlinked directories the way watcher backends report them.
fn normalize(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(path)
    }
}
