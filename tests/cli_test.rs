use clap::Parser;
use dgen::cli::Args;
use std::path::PathBuf;

fn parse(args: &[&str]) -> Result<Args, clap::Error> {
    Args::try_parse_from(std::iter::once("dgen").chain(args.iter().copied()))
}

#[test]
fn test_parse_minimal_arguments() {
    let args = parse(&["--in", "template.j2"]).unwrap();
    assert_eq!(args.input, PathBuf::from("template.j2"));
    assert!(args.out.is_none());
    assert!(args.data.is_none());
    assert!(args.processor.is_none());
    assert!(args.flags.is_none());
    assert!(!args.watch);
    assert!(!args.verbose);
}

#[test]
fn test_parse_all_arguments() {
    let args = parse(&[
        "--in",
        "template.j2",
        "--out",
        "generated.ts",
        "--data",
        "data.json",
        "--processor",
        "processor.rhai",
        "--flags",
        "fmt,check",
        "--watch",
        "--verbose",
    ])
    .unwrap();

    assert_eq!(args.input, PathBuf::from("template.j2"));
    assert_eq!(args.out, Some(PathBuf::from("generated.ts")));
    assert_eq!(args.data, Some(PathBuf::from("data.json")));
    assert_eq!(args.processor.as_deref(), Some("processor.rhai"));
    assert_eq!(args.flags.as_deref(), Some("fmt,check"));
    assert!(args.watch);
    assert!(args.verbose);
}

#[test]
fn test_template_argument_is_required() {
    assert!(parse(&[]).is_err());
    assert!(parse(&["--out", "generated.ts"]).is_err());
}

#[test]
fn test_positional_arguments_are_rejected() {
    assert!(parse(&["template.j2"]).is_err());
    assert!(parse(&["--in", "template.j2", "stray"]).is_err());
}

#[test]
fn test_unknown_flags_are_rejected() {
    assert!(parse(&["--in", "template.j2", "--bogus"]).is_err());
}

#[test]
fn test_invalid_flags_value_is_rejected() {
    assert!(parse(&["--in", "template.j2", "--flags", "fmt,frobnicate"]).is_err());
    assert!(parse(&["--in", "template.j2", "--flags", "fmt,check"]).is_ok());
}

#[test]
fn test_processor_accepts_urls() {
    let args = parse(&["--in", "t.j2", "--processor", "https://example.com/p.rhai"]).unwrap();
    assert_eq!(args.processor.as_deref(), Some("https://example.com/p.rhai"));
}
