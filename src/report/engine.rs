//! Typst compilation engine.
//!
//! Handles the low-level details of writing Typst source to a temporary
//! directory, invoking the compiler, and reading back the output PDF.

use std::fs;
use std::process::Command;

use tempfile::tempdir;

use super::RenderError;

const SOURCE_FILE: &str = "report.typ";
const OUTPUT_FILE: &str = "report.pdf";

/// Stateless engine that compiles a Typst source string to PDF bytes.
pub struct TypstEngine;

impl TypstEngine {
    pub fn compile(source: &str) -> Result<Vec<u8>, RenderError> {
        let temp_dir = tempdir().map_err(RenderError::TempDir)?;
        let source_path = temp_dir.path().join(SOURCE_FILE);
        fs::write(&source_path, source).map_err(RenderError::WriteSource)?;

        let output_path = temp_dir.path().join(OUTPUT_FILE);
        let output = Command::new("typst")
            .arg("compile")
            .arg(&source_path)
            .arg(&output_path)
            .current_dir(temp_dir.path())
            .output()
            .map_err(RenderError::CompilerIo)?;

        if !output.status.success() {
            let detail = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(RenderError::CompilerRejected(detail));
        }

        fs::read(&output_path).map_err(RenderError::ReadPdf)
    }
}
