use dgen::cli::Args;
use dgen::config::{default_data, parse_flags, Config, Flag, OutputKind};
use std::path::{Path, PathBuf};

fn make_args(input: &str, out: Option<&str>, flags: Option<&str>) -> Args {
    Args {
        input: PathBuf::from(input),
        out: out.map(PathBuf::from),
        data: None,
        processor: None,
        flags: flags.map(str::to_string),
        watch: false,
        verbose: false,
    }
}

#[test]
fn test_parse_flags_basic() {
    let flags = parse_flags("fmt,check").unwrap().unwrap();
    assert_eq!(flags, vec![Flag::Fmt, Flag::Check]);
}

#[test]
fn test_parse_flags_skips_blanks_and_duplicates() {
    let flags = parse_flags(" fmt , fmt ,print_info").unwrap().unwrap();
    assert_eq!(flags, vec![Flag::Fmt, Flag::PrintInfo]);
}

#[test]
fn test_parse_flags_empty_keeps_defaults() {
    assert!(parse_flags("").unwrap().is_none());
    assert!(parse_flags(" , ,").unwrap().is_none());
}

#[test]
fn test_parse_flags_unknown_name_is_error() {
    assert!(parse_flags("fmt,frobnicate").is_err());
}

#[test]
fn test_output_kind_inference() {
    assert_eq!(
        OutputKind::from_output(Some(Path::new("out.ts"))),
        OutputKind::Script
    );
    assert_eq!(
        OutputKind::from_output(Some(Path::new("out.mts"))),
        OutputKind::Script
    );
    assert_eq!(
        OutputKind::from_output(Some(Path::new("README.md"))),
        OutputKind::Text
    );
    assert_eq!(
        OutputKind::from_output(Some(Path::new("no_extension"))),
        OutputKind::Text
    );
    assert_eq!(OutputKind::from_output(None), OutputKind::Script);
}

#[test]
fn test_script_output_defaults() {
    let config = Config::new("template.j2", Some(PathBuf::from("out.ts")));
    assert_eq!(config.flags, vec![Flag::Fmt, Flag::Check, Flag::PrintInfo]);

    let names: Vec<&str> = config.filters.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec!["upper", "lower", "camel", "snake", "pascal", "quote"]
    );

    assert_eq!(config.fmt_command.label(), "deno fmt");
    assert_eq!(config.check_command.label(), "deno check");
}

#[test]
fn test_text_output_defaults() {
    let config = Config::new("template.j2", Some(PathBuf::from("out.txt")));
    assert_eq!(config.flags, vec![Flag::PrintInfo]);

    let names: Vec<&str> = config.filters.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["upper", "lower"]);
}

#[test]
fn test_stdout_runs_use_script_defaults() {
    let config = Config::new("template.j2", None);
    assert_eq!(config.flags, vec![Flag::Fmt, Flag::Check, Flag::PrintInfo]);
    assert!(config.filters.contains_key("quote"));
}

#[test]
fn test_default_data_entries() {
    let data = default_data();
    assert_eq!(data["name"].as_str(), Some("Bobert Paulson"));
    assert!(data.contains_key("hello"));
}

#[test]
fn test_from_args_applies_overrides() {
    let mut args = make_args("template.j2", Some("out.ts"), Some("check"));
    args.data = Some(PathBuf::from("data.json"));
    args.processor = Some("processor.rhai".to_string());

    let config = Config::from_args(&args).unwrap();
    assert_eq!(config.template_path, PathBuf::from("template.j2"));
    assert_eq!(config.output_path, Some(PathBuf::from("out.ts")));
    assert_eq!(config.data_path, Some(PathBuf::from("data.json")));
    assert_eq!(config.processor_path.as_deref(), Some("processor.rhai"));
    assert_eq!(config.flags, vec![Flag::Check]);
}

#[test]
fn test_from_args_empty_flags_keep_defaults() {
    let args = make_args("template.j2", Some("out.ts"), Some(""));
    let config = Config::from_args(&args).unwrap();
    assert_eq!(config.flags, vec![Flag::Fmt, Flag::Check, Flag::PrintInfo]);
}

#[test]
fn test_from_args_rejects_unknown_flag() {
    let args = make_args("template.j2", None, Some("fmt,nope"));
    assert!(Config::from_args(&args).is_err());
}
