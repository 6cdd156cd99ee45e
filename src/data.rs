//! Data file loading.
//!
//! Data files are JSON with `//` and `/* */` comments permitted. Comments are
//! blanked out before parsing so that parse errors still point at the right
//! line and column; everything else is strict JSON.

use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Loads the data file at `path` and parses it into a JSON value.
///
/// # Errors
/// * `DataReadError` - The file cannot be read
/// * `DataParseError` - The content is not valid JSON after comment removal
/// * `DataFormatError` - The top-level value is not an object
pub fn load_data<P: AsRef<Path>>(path: P) -> Result<serde_json::Value> {
    let path = path.as_ref();
    debug!("Loading data from '{}'", path.display());

    let raw = fs::read_to_string(path).map_err(|e| Error::DataReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let value: serde_json::Value =
        serde_json::from_str(&strip_comments(&raw)).map_err(|e| Error::DataParseError {
            path: path.display().to_string(),
            source: e,
        })?;

    if !value.is_object() {
        return Err(Error::DataFormatError {
            path: path.display().to_string(),
        });
    }

    Ok(value)
}

/// Replaces `//` and `/* */` comments outside string literals with spaces,
/// keeping newlines so offsets are preserved.
pub fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            '/' if chars.peek() == Some(&'/') => {
                out.push(' ');
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                    out.push(' ');
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                out.push(' ');
                chars.next();
                out.push(' ');
                let mut prev = '\0';
                while let Some(inner) = chars.next() {
                    out.push(if inner == '\n' { '\n' } else { ' ' });
                    if prev == '*' && inner == '/' {
                        break;
                    }
                    prev = inner;
                }
            }
            _ => out.push(ch),
        }
    }

    out
}
