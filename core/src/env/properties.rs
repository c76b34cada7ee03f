//! Flat `key=value` property files.
//!
//! One pair per line. Blank lines and lines whose first non-blank character
//! is `#` or `!` are skipped. The key is trimmed; the value loses its leading
//! whitespace and is otherwise kept as written. A repeated key keeps the last
//! value.
//!
//! Files are read as UTF-8. Content that is not valid UTF-8 is decoded as
//! ISO-8859-1, the historical encoding of Java property files.
//!
//! Only this subset of the Java properties format is accepted: `:` and
//! whitespace separators, `\` escapes and line continuations are not
//! interpreted. A line without `=` is a parse error, and a backslash is kept
//! as a literal character.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::error::ConfigError;

/// Flat string properties.
pub type Properties = BTreeMap<String, String>;

/// Reads and parses a property file.
pub fn load(path: &Path) -> Result<Properties, ConfigError> {
    let bytes = fs::read(path).map_err(|source| ConfigError::Load {
        path: path.display().to_string(),
        source,
    })?;
    parse(&path.display().to_string(), &decode(bytes))
}

fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
    }
}

/// Parses property file content. `origin` names the file in errors.
pub fn parse(origin: &str, content: &str) -> Result<Properties, ConfigError> {
    let mut properties = Properties::new();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let malformed = || ConfigError::Parse {
            path: origin.to_string(),
            line: index + 1,
            content: raw.to_string(),
        };

        let (key, value) = line.split_once('=').ok_or_else(malformed)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(malformed());
        }
        properties.insert(key.to_string(), value.trim_start().to_string());
    }

    Ok(properties)
}
