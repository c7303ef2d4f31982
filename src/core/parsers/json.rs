use std::{collections::HashMap, fs, path::Path};

use serde_json::{Number, Value};

use crate::core::LocaleTable;
use crate::error::{LensError, LensResult};

/// Read and flatten a locale file into a fresh table.
pub fn parse_locale_file(path: &Path) -> LensResult<LocaleTable> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LensError::FileNotFound(path.to_path_buf())
        } else {
            LensError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_locale_str(&content, path)
}

/// Flatten locale JSON that has already been read. `path` is recorded as
/// the table's source and used in error messages.
pub fn parse_locale_str(content: &str, path: &Path) -> LensResult<LocaleTable> {
    let json: Value = serde_json::from_str(content).map_err(|source| LensError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if !json.is_object() {
        return Err(LensError::NotAnObject(path.to_path_buf()));
    }

    let mut entries = HashMap::new();
    flatten_json(&json, String::new(), &mut entries);
    Ok(LocaleTable::new(entries, path))
}

/// Flatten a JSON tree into dotted keys.
///
/// Objects are descended into; everything else is a leaf. Strings are kept
/// verbatim, numbers use their shortest decimal form (`1e2` is `100`),
/// booleans/null their literal text, and arrays are stored as their
/// compact JSON text (they have no key semantics here).
pub fn flatten_json(value: &Value, prefix: String, result: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_json(val, new_prefix, result);
            }
        }
        Value::String(s) => {
            result.insert(prefix, s.clone());
        }
        Value::Number(n) => {
            result.insert(prefix, number_text(n));
        }
        other => {
            result.insert(prefix, other.to_string());
        }
    }
}

/// Integers print as-is; floats drop a zero fraction (`100.0` is `100`).
fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
