//! Processor plugin contract and loading.
//!
//! A processor sits between data loading and rendering: it receives the
//! loaded data (if any) and returns the state the render should use instead.
//! Both returned pieces replace their defaults wholesale; omitting one drops
//! back to the configuration defaults, not to the loaded state.

use crate::error::{Error, Result};
use crate::filters::FilterMap;
use crate::renderer::ContextMap;
use crate::script::ScriptProcessor;
use log::debug;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Replacement state returned by a processor invocation.
#[derive(Default)]
pub struct ProcessorOutput {
    /// Render data replacing the loaded data, even when `None`
    pub data: Option<ContextMap>,
    /// Filter set replacing the default filters, when present
    pub filters: Option<FilterMap>,
}

/// Contract for processor plugins.
pub trait Processor {
    /// Transforms the loaded data into the state used for rendering.
    fn transform(&self, data: Option<serde_json::Value>) -> Result<ProcessorOutput>;
}

/// Where a processor script comes from.
#[derive(Debug, PartialEq)]
pub enum ProcessorSource {
    /// Script on the local filesystem
    LocalPath(PathBuf),
    /// Script fetched over http(s)
    Url(String),
}

impl fmt::Display for ProcessorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessorSource::LocalPath(path) => write!(f, "local path: '{}'", path.display()),
            ProcessorSource::Url(url) => write!(f, "url: '{}'", url),
        }
    }
}

impl ProcessorSource {
    /// Classifies a processor argument as a URL or a local path. Relative
    /// paths are resolved against the current working directory.
    pub fn detect(spec: &str) -> Self {
        if let Ok(url) = Url::parse(spec) {
            if url.scheme() == "http" || url.scheme() == "https" {
                return ProcessorSource::Url(spec.to_string());
            }
        }

        let path = PathBuf::from(spec);
        if path.is_absolute() {
            ProcessorSource::LocalPath(path)
        } else {
            let cwd = std::env::current_dir().unwrap_or_default();
            ProcessorSource::LocalPath(cwd.join(path))
        }
    }

    /// The local path to put on the watch list, if any. URL processors are
    /// fetched once per run and cannot be watched.
    pub fn watchable_path(&self) -> Option<&Path> {
        match self {
            ProcessorSource::LocalPath(path) => Some(path),
            ProcessorSource::Url(_) => None,
        }
    }

    fn read(&self, spec: &str) -> Result<String> {
        let load_error = |reason: String| Error::ProcessorLoadError {
            path: spec.to_string(),
            reason,
        };

        match self {
            ProcessorSource::LocalPath(path) => {
                std::fs::read_to_string(path).map_err(|e| load_error(e.to_string()))
            }
            ProcessorSource::Url(url) => reqwest::blocking::get(url)
                .and_then(|response| response.error_for_status())
                .and_then(|response| response.text())
                .map_err(|e| load_error(e.to_string())),
        }
    }
}

/// Resolves, fetches and compiles the processor script named by `spec`.
pub fn load_processor(spec: &str) -> Result<ScriptProcessor> {
    let source = ProcessorSource::detect(spec);
    debug!("Loading processor from the {}", source);
    let text = source.read(spec)?;
    ScriptProcessor::compile(spec, &text)
}
