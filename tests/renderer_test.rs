use dgen::config::{default_data, OutputKind};
use dgen::error::Error;
use dgen::filters::{default_filters, FilterMap};
use dgen::renderer::{context_from_json, render_template, ContextMap};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_template(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn text_filters() -> FilterMap {
    default_filters(OutputKind::Text)
}

#[test]
fn test_render_plain_context() {
    let dir = TempDir::new().unwrap();
    let path = write_template(&dir, "greeting.j2", "Hello {{ name }}!");
    let context = context_from_json(&json!({"name": "Marla"}));

    let rendered = render_template(&path, &text_filters(), &context).unwrap();
    assert_eq!(rendered, "Hello Marla!");
}

#[test]
fn test_render_applies_filters() {
    let dir = TempDir::new().unwrap();
    let path = write_template(&dir, "shout.j2", "{{ name | upper }}");
    let context = context_from_json(&json!({"name": "marla"}));

    let rendered = render_template(&path, &text_filters(), &context).unwrap();
    assert_eq!(rendered, "MARLA");
}

#[test]
fn test_render_script_filters() {
    let dir = TempDir::new().unwrap();
    let path = write_template(&dir, "decl.j2", "{{ name | pascal }} = {{ name | quote }};");
    let context = context_from_json(&json!({"name": "big bob"}));

    let rendered =
        render_template(&path, &default_filters(OutputKind::Script), &context).unwrap();
    assert_eq!(rendered, "BigBob = \"big bob\";");
}

#[test]
fn test_render_invokable_value() {
    let dir = TempDir::new().unwrap();
    let path = write_template(&dir, "call.j2", "{{ hello() }}");

    let rendered = render_template(&path, &text_filters(), &default_data()).unwrap();
    assert_eq!(rendered, "sup dawg");
}

#[test]
fn test_render_trims_surrounding_whitespace() {
    let dir = TempDir::new().unwrap();
    let path = write_template(&dir, "padded.j2", "\n\nHello {{ name }}\n\n");
    let context = context_from_json(&json!({"name": "Marla"}));

    let rendered = render_template(&path, &text_filters(), &context).unwrap();
    assert_eq!(rendered, "Hello Marla");
}

#[test]
fn test_undefined_variable_is_render_error() {
    let dir = TempDir::new().unwrap();
    let path = write_template(&dir, "broken.j2", "{{ missing }}");

    let err = render_template(&path, &text_filters(), &ContextMap::new()).unwrap_err();
    assert!(matches!(err, Error::TemplateRenderError { .. }));
}

#[test]
fn test_missing_template_is_load_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.j2");

    let err = render_template(&path, &text_filters(), &ContextMap::new()).unwrap_err();
    assert!(matches!(err, Error::TemplateLoadError { .. }));
}

#[test]
fn test_syntax_error_is_load_error() {
    let dir = TempDir::new().unwrap();
    let path = write_template(&dir, "syntax.j2", "{% if %}");

    let err = render_template(&path, &text_filters(), &ContextMap::new()).unwrap_err();
    assert!(matches!(err, Error::TemplateLoadError { .. }));
}

#[test]
fn test_includes_resolve_next_to_template() {
    let dir = TempDir::new().unwrap();
    write_template(&dir, "header.j2", "// generated file");
    let path = write_template(&dir, "main.j2", "{% include \"header.j2\" %}\nbody");
    let context = context_from_json(&json!({}));

    let rendered = render_template(&path, &text_filters(), &context).unwrap();
    assert_eq!(rendered, "// generated file\nbody");
}
