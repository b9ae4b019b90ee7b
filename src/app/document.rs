// JSON document loading for the viewer.
// - No path means an empty panel rather than an error.
// - Blank files are treated the same as `null`.
use std::{fs, path::Path};

use serde_json::Value;

use crate::error::DocumentError;

pub fn load_document(path: Option<&Path>) -> Result<Value, DocumentError> {
    let Some(path) = path else {
        return Ok(Value::Null);
    };

    let raw = fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if raw.trim().is_empty() {
        tracing::debug!(path = %path.display(), "Document is blank");
        return Ok(Value::Null);
    }

    let value = serde_json::from_str(&raw).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "Loaded panel document");
    Ok(value)
}
