//! Template loading and rendering on top of MiniJinja.

use crate::error::{Error, Result};
use crate::filters::{register_filters, FilterMap};
use indexmap::IndexMap;
use log::debug;
use minijinja::{path_loader, Environment, UndefinedBehavior, Value};
use std::path::Path;

/// Final mapping of names to values visible inside the template. Values may
/// be plain data or invokables.
pub type ContextMap = IndexMap<String, Value>;

/// Converts a loaded JSON object into a context map.
pub fn context_from_json(value: &serde_json::Value) -> ContextMap {
    match value.as_object() {
        Some(object) => object
            .iter()
            .map(|(key, value)| (key.clone(), Value::from_serialize(value)))
            .collect(),
        None => ContextMap::new(),
    }
}

/// Renders the template at `path` with the given filter set and context.
///
/// The template's directory becomes the loader root, so includes and imports
/// resolve relative to the template itself. Referencing an undefined variable
/// is a render error.
///
/// # Errors
/// * `TemplateLoadError` - The file is missing or fails to parse
/// * `TemplateRenderError` - Evaluation against the context failed
pub fn render_template(path: &Path, filters: &FilterMap, context: &ContextMap) -> Result<String> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    register_filters(&mut env, filters);

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::ConfigError(format!("invalid template path '{}'", path.display())))?;
    env.set_loader(path_loader(dir));

    debug!("Rendering template '{}'", path.display());

    let template = env.get_template(name).map_err(|e| Error::TemplateLoadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let rendered = template
        .render(build_context(context))
        .map_err(|e| Error::TemplateRenderError {
            path: path.display().to_string(),
            source: e,
        })?;

    Ok(rendered.trim().to_string())
}

/// Builds the render value from a context map, preserving entry order and
/// invokable values.
fn build_context(context: &ContextMap) -> Value {
    Value::from_iter(
        context
            .iter()
            .map(|(key, value)| (key.clone(), value.clone())),
    )
}
