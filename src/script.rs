//! Rhai runtime backing processor scripts.
//!
//! A processor script defines `fn transform(data)` and returns either unit or
//! a map with optional `data` and `filters` keys. Function values survive the
//! boundary: a function under `data` becomes an invokable template value and
//! every entry of `filters` becomes a template filter.

use crate::error::{Error, Result};
use crate::filters::{FilterFn, FilterMap};
use crate::processor::{Processor, ProcessorOutput};
use crate::renderer::ContextMap;
use log::warn;
use minijinja::value::Rest;
use minijinja::Value;
use rhai::{Dynamic, Engine, FnPtr, Scope, AST};
use std::sync::Arc;

/// Entry function every processor script must define.
pub const TRANSFORM_FN: &str = "transform";

// Limits keeping a runaway script from wedging the pipeline.
const MAX_CALL_LEVELS: usize = 32;
const MAX_OPERATIONS: u64 = 100_000;
const MAX_STRING_SIZE: usize = 10 * 1024 * 1024; // 10MB

fn create_engine() -> Engine {
    let mut engine = Engine::new();
    engine.set_max_call_levels(MAX_CALL_LEVELS);
    engine.set_max_operations(MAX_OPERATIONS);
    engine.set_max_string_size(MAX_STRING_SIZE);
    engine
}

fn template_error(err: impl std::fmt::Display) -> minijinja::Error {
    minijinja::Error::new(minijinja::ErrorKind::InvalidOperation, err.to_string())
}

/// A compiled processor script bound to its sandboxed engine.
pub struct ScriptProcessor {
    path: String,
    engine: Arc<Engine>,
    ast: Arc<AST>,
}

impl ScriptProcessor {
    /// Compiles the script text; `path` is kept for error labels only.
    pub fn compile(path: &str, source: &str) -> Result<Self> {
        let engine = create_engine();
        let ast = engine.compile(source).map_err(|e| Error::ProcessorLoadError {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        Ok(ScriptProcessor {
            path: path.to_string(),
            engine: Arc::new(engine),
            ast: Arc::new(ast),
        })
    }

    fn execution_error(&self, reason: String) -> Error {
        Error::ProcessorExecutionError {
            path: self.path.clone(),
            reason,
        }
    }

    fn decode_output(&self, result: Dynamic) -> Result<ProcessorOutput> {
        if result.is_unit() {
            return Ok(ProcessorOutput::default());
        }

        let map = result.try_cast::<rhai::Map>().ok_or_else(|| {
            self.execution_error(format!(
                "'{}' must return a map with optional 'data' and 'filters' keys",
                TRANSFORM_FN
            ))
        })?;

        let mut output = ProcessorOutput::default();
        for (key, value) in map {
            if value.is_unit() {
                continue;
            }
            match key.as_str() {
                "data" => output.data = Some(self.decode_data(value)?),
                "filters" => output.filters = Some(self.decode_filters(value)?),
                other => warn!("Ignoring unknown key '{}' in processor result", other),
            }
        }

        Ok(output)
    }

    fn decode_data(&self, value: Dynamic) -> Result<ContextMap> {
        let map = value
            .try_cast::<rhai::Map>()
            .ok_or_else(|| self.execution_error("'data' must be a map".to_string()))?;

        let mut context = ContextMap::new();
        for (key, value) in map {
            context.insert(key.to_string(), self.template_value(value)?);
        }
        Ok(context)
    }

    fn decode_filters(&self, value: Dynamic) -> Result<FilterMap> {
        let map = value
            .try_cast::<rhai::Map>()
            .ok_or_else(|| self.execution_error("'filters' must be a map of functions".to_string()))?;

        let mut filters = FilterMap::new();
        for (key, value) in map {
            let name = key.to_string();
            let fn_ptr = value.try_cast::<FnPtr>().ok_or_else(|| {
                self.execution_error(format!("filter '{}' is not a function", name))
            })?;
            filters.insert(name, self.filter_fn(fn_ptr));
        }
        Ok(filters)
    }

    /// Converts a script value into a template value. Function pointers become
    /// invokable values; maps and arrays are converted recursively so nested
    /// functions work too.
    fn template_value(&self, value: Dynamic) -> Result<Value> {
        if value.is::<FnPtr>() {
            let fn_ptr = value.cast::<FnPtr>();
            return Ok(self.callable_value(fn_ptr));
        }
        if value.is_map() {
            let map = value.cast::<rhai::Map>();
            let mut entries = Vec::with_capacity(map.len());
            for (key, value) in map {
                entries.push((key.to_string(), self.template_value(value)?));
            }
            return Ok(Value::from_iter(entries));
        }
        if value.is_array() {
            let array = value.cast::<rhai::Array>();
            let mut items = Vec::with_capacity(array.len());
            for item in array {
                items.push(self.template_value(item)?);
            }
            return Ok(Value::from_iter(items));
        }

        let json: serde_json::Value =
            rhai::serde::from_dynamic(&value).map_err(|e| self.execution_error(e.to_string()))?;
        Ok(Value::from_serialize(&json))
    }

    fn callable_value(&self, fn_ptr: FnPtr) -> Value {
        let engine = Arc::clone(&self.engine);
        let ast = Arc::clone(&self.ast);
        Value::from_function(move |args: Rest<Value>| call_script_fn(&engine, &ast, &fn_ptr, &args.0))
    }

    fn filter_fn(&self, fn_ptr: FnPtr) -> FilterFn {
        let engine = Arc::clone(&self.engine);
        let ast = Arc::clone(&self.ast);
        Arc::new(move |args: &[Value]| call_script_fn(&engine, &ast, &fn_ptr, args))
    }
}

impl Processor for ScriptProcessor {
    fn transform(&self, data: Option<serde_json::Value>) -> Result<ProcessorOutput> {
        let arg = match &data {
            Some(value) => {
                rhai::serde::to_dynamic(value).map_err(|e| self.execution_error(e.to_string()))?
            }
            None => Dynamic::UNIT,
        };

        let mut scope = Scope::new();
        let result = self
            .engine
            .call_fn::<Dynamic>(&mut scope, &self.ast, TRANSFORM_FN, (arg,))
            .map_err(|e| self.execution_error(e.to_string()))?;

        self.decode_output(result)
    }
}

/// Bridges one template-side call into a script function. Arguments and the
/// result cross the boundary as JSON values.
fn call_script_fn(
    engine: &Engine,
    ast: &AST,
    fn_ptr: &FnPtr,
    args: &[Value],
) -> std::result::Result<Value, minijinja::Error> {
    let mut call_args = Vec::with_capacity(args.len());
    for arg in args {
        let json = serde_json::to_value(arg).map_err(template_error)?;
        call_args.push(rhai::serde::to_dynamic(&json).map_err(template_error)?);
    }

    let result = fn_ptr
        .call::<Dynamic>(engine, ast, call_args)
        .map_err(template_error)?;

    let json: serde_json::Value = rhai::serde::from_dynamic(&result).map_err(template_error)?;
    Ok(Value::from_serialize(&json))
}
