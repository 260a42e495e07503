use crate::domain::{RaspaError, RaspaResult};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Appends a final `\n` to non-empty content lacking one. Content bytes are
/// never rewritten, so carriage returns inside values survive.
pub fn terminate_text_artifact(content: &str) -> String {
    let mut terminated = content.to_string();
    if !terminated.is_empty() && !terminated.ends_with('\n') {
        terminated.push('\n');
    }
    terminated
}

pub fn write_text_artifact(path: &Path, content: &str) -> RaspaResult<()> {
    fs::write(path, terminate_text_artifact(content)).map_err(|source| {
        RaspaError::io_system(
            "IO.INPUT_WRITE",
            format!("failed to write '{}': {}", path.display(), source),
        )
    })
}

/// Pretty JSON with a trailing newline, ready to be written as-is.
pub fn encode_json_artifact<T>(value: &T) -> RaspaResult<String>
where
    T: Serialize + ?Sized,
{
    let content = serde_json::to_string_pretty(value).map_err(|source| {
        RaspaError::internal(
            "SYS.JSON_ENCODE",
            format!("failed to encode JSON artifact: {}", source),
        )
    })?;
    Ok(terminate_text_artifact(&content))
}

pub fn write_json_artifact<T>(path: &Path, value: &T) -> RaspaResult<()>
where
    T: Serialize + ?Sized,
{
    let content = encode_json_artifact(value)?;
    fs::write(path, content).map_err(|source| {
        RaspaError::io_system(
            "IO.JSON_WRITE",
            format!("failed to write '{}': {}", path.display(), source),
        )
    })
}
