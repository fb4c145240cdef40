//! Input reading for prompts and context text.
//!
//! Prompt text arrives inline, from a file, or from stdin. Files are capped
//! in size since everything is held in memory for a single compression call.

use crate::error::{IoError, Result};
use std::io::Read;
use std::path::Path;

/// Maximum file size to read into memory (64MB).
const MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Reads a UTF-8 text file into memory.
///
/// # Errors
///
/// Returns an error if the file doesn't exist, is too large, can't be read,
/// or is not valid UTF-8.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path_ref = path.as_ref();
    let path_str = path_ref.to_string_lossy().to_string();

    if !path_ref.exists() {
        return Err(IoError::FileNotFound { path: path_str }.into());
    }

    let metadata = std::fs::metadata(path_ref).map_err(|e| IoError::ReadFailed {
        path: path_str.clone(),
        reason: e.to_string(),
    })?;

    if metadata.len() > MAX_FILE_SIZE {
        return Err(IoError::ReadFailed {
            path: path_str,
            reason: format!(
                "file too large: {} bytes (max: {MAX_FILE_SIZE} bytes)",
                metadata.len()
            ),
        }
        .into());
    }

    std::fs::read_to_string(path_ref).map_err(|e| {
        IoError::ReadFailed {
            path: path_str,
            reason: e.to_string(),
        }
        .into()
    })
}

/// Reads all of stdin as a string.
///
/// # Errors
///
/// Returns an error if stdin can't be read or is not valid UTF-8.
pub fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| IoError::ReadFailed {
            path: "<stdin>".to_string(),
            reason: e.to_string(),
        })?;
    Ok(buffer)
}

/// Resolves the input text from an inline argument, a file, or stdin.
///
/// Inline text wins over a file; stdin is read only when neither is given.
///
/// # Errors
///
/// Returns an error if the file or stdin can't be read.
pub fn read_input(text: Option<&str>, file: Option<&Path>) -> Result<String> {
    match (text, file) {
        (Some(text), _) => Ok(text.to_string()),
        (None, Some(path)) => read_file(path),
        (None, None) => read_stdin(),
    }
}
