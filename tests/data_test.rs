use dgen::data::load_data;
use dgen::error::Error;
use std::fs;
use tempfile::TempDir;

fn write_data(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("data.json");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_valid_json() {
    let dir = TempDir::new().unwrap();
    let path = write_data(&dir, r#"{"name": "Marla", "count": 3}"#);

    let value = load_data(&path).unwrap();
    assert_eq!(value["name"], "Marla");
    assert_eq!(value["count"], 3);
}

#[test]
fn test_load_json_with_comments() {
    let dir = TempDir::new().unwrap();
    let path = write_data(
        &dir,
        "{\n  // the narrator\n  \"name\": \"Marla\", /* inline */\n  \"url\": \"https://example.com/a//b\"\n}",
    );

    let value = load_data(&path).unwrap();
    assert_eq!(value["name"], "Marla");
    // Comment markers inside strings are data, not comments.
    assert_eq!(value["url"], "https://example.com/a//b");
}

#[test]
fn test_missing_data_file() {
    let dir = TempDir::new().unwrap();
    let err = load_data(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Error::DataReadError { .. }));
}

#[test]
fn test_invalid_json_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_data(&dir, "{ nope");
    let err = load_data(&path).unwrap_err();
    assert!(matches!(err, Error::DataParseError { .. }));
}

#[test]
fn test_trailing_commas_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_data(&dir, r#"{"a": 1,}"#);
    let err = load_data(&path).unwrap_err();
    assert!(matches!(err, Error::DataParseError { .. }));
}

#[test]
fn test_top_level_must_be_an_object() {
    let dir = TempDir::new().unwrap();
    let path = write_data(&dir, "[1, 2, 3]");
    let err = load_data(&path).unwrap_err();
    assert!(matches!(err, Error::DataFormatError { .. }));
}
