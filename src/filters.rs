//! Filter set handling: the built-in filter functions and their registration
//! with the template engine.
//!
//! A filter set always applies wholesale. The defaults depend on the output
//! category, and a processor that supplies its own filters replaces the
//! defaults entirely rather than merging with them.

use crate::config::OutputKind;
use cruet::Inflector;
use indexmap::IndexMap;
use minijinja::value::Rest;
use minijinja::{Environment, Value};
use std::sync::Arc;

/// A named filter callable from templates. The first element of `args` is the
/// piped value, the rest are the explicit filter arguments.
pub type FilterFn = Arc<dyn Fn(&[Value]) -> Result<Value, minijinja::Error> + Send + Sync>;

/// Ordered name to filter mapping applied to the template environment.
pub type FilterMap = IndexMap<String, FilterFn>;

fn invalid_operation(err: impl std::fmt::Display) -> minijinja::Error {
    minijinja::Error::new(minijinja::ErrorKind::InvalidOperation, err.to_string())
}

/// Coerces the piped value to a string, using the display form for
/// non-string values.
fn input_string(args: &[Value]) -> String {
    let input = args.first().cloned().unwrap_or_default();
    match input.as_str() {
        Some(s) => s.to_owned(),
        None => input.to_string(),
    }
}

/// Wraps a plain string transformation as a filter function.
fn string_filter(f: impl Fn(&str) -> String + Send + Sync + 'static) -> FilterFn {
    Arc::new(move |args: &[Value]| Ok(Value::from(f(&input_string(args)))))
}

/// Quotes the input as a JSON string literal, escaping as needed.
fn quote_filter() -> FilterFn {
    Arc::new(|args: &[Value]| {
        let quoted = serde_json::to_string(&input_string(args)).map_err(invalid_operation)?;
        Ok(Value::from(quoted))
    })
}

/// Returns the default filter set for the given output category.
///
/// Text outputs get basic case filters; script outputs additionally get the
/// identifier-casing and quoting filters useful in generated code.
pub fn default_filters(kind: OutputKind) -> FilterMap {
    let mut filters = FilterMap::new();
    filters.insert("upper".to_string(), string_filter(str::to_uppercase));
    filters.insert("lower".to_string(), string_filter(str::to_lowercase));
    if kind == OutputKind::Script {
        filters.insert("camel".to_string(), string_filter(|s| s.to_camel_case()));
        filters.insert("snake".to_string(), string_filter(|s| s.to_snake_case()));
        filters.insert("pascal".to_string(), string_filter(|s| s.to_pascal_case()));
        filters.insert("quote".to_string(), quote_filter());
    }
    filters
}

/// Registers every filter of the set with a template environment.
pub fn register_filters(env: &mut Environment<'static>, filters: &FilterMap) {
    for (name, filter) in filters {
        let filter = Arc::clone(filter);
        env.add_filter(name.clone(), move |value: Value, rest: Rest<Value>| {
            let mut args = Vec::with_capacity(rest.0.len() + 1);
            args.push(value);
            args.extend(rest.0);
            filter(&args)
        });
    }
}
