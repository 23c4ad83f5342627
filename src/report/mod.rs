//! Report module - turning raw model output into styled PDF documents.
//!
//! Submodules:
//! - `classify` - per-line semantic role assignment
//! - `typeset` - Typst source assembly with role-specific styles
//! - `engine` - Typst CLI compilation
//! - `renderer` - artifact creation in the download directory
//! - `handlers` - download and payment-bypass generation endpoints

pub mod classify;
pub mod engine;
pub mod handlers;
pub mod models;
pub mod renderer;
pub mod typeset;

pub use classify::{classify, ClassifiedLine, LineRole};
pub use models::{
    ConsultancyType, ConsultationRequest, FocusArea, GeneratedReport, RenderedDocument,
};
pub use renderer::{RenderReport, TypstReportRenderer};

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the rendering pipeline. Fatal for the invocation: malformed
/// content does not self-heal via retry, so these are never retried.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write Typst source: {0}")]
    WriteSource(#[source] std::io::Error),
    #[error("Typst compiler could not be invoked: {0}")]
    CompilerIo(#[source] std::io::Error),
    #[error("Typst compiler rejected the document: {0}")]
    CompilerRejected(String),
    #[error("failed to read compiled PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
    #[error("failed to write artifact to {path}: {source}")]
    WriteArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
