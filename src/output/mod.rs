//! Output module for rendering analysis results
//!
//! This module handles:
//! - Serializing results and error envelopes as JSON
//! - Generating human-readable markdown reports
//! - Writing rendered output to a file

mod json;
mod markdown;

pub use json::{render_error_json, render_json, render_json_batch};
pub use markdown::{format_markdown_error, format_markdown_report};

use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes rendered output to a file, replacing any previous content
///
/// # Arguments
///
/// * `content` - The rendered report
/// * `output_path` - Path where the report should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to create or write the file
pub fn write_output(content: &str, output_path: &Path) -> OutputResult<()> {
    let mut file = File::create(output_path)?;
    file.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        file.write_all(b"\n")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.md");

        write_output("# Report", &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "# Report\n");
    }

    #[test]
    fn test_write_output_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("report.md");

        let err = write_output("{}", &path).unwrap_err();
        assert!(matches!(err, OutputError::Io(_)));
    }
}
