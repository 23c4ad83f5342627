//! Report renderer: classified text in, PDF artifact on disk out.

use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

use super::engine::TypstEngine;
use super::models::{ConsultancyType, GeneratedReport, RenderedDocument};
use super::{typeset, RenderError};

/// Renders a generated report into a paginated document artifact.
///
/// Object-safe so the orchestrator can be exercised with an in-process fake.
pub trait RenderReport: Send + Sync {
    fn render(
        &self,
        consultancy_type: ConsultancyType,
        report: &GeneratedReport,
    ) -> Result<RenderedDocument, RenderError>;
}

/// Artifact filename: `{consultancy_type}_{8-hex-random}.pdf`.
///
/// Collisions are left to the improbability of the random id; an existing
/// file at the same path would be overwritten.
pub fn artifact_filename(consultancy_type: ConsultancyType) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}_{}.pdf", consultancy_type.as_str(), &id[..8])
}

/// Typst-backed renderer writing artifacts into a flat download directory.
pub struct TypstReportRenderer {
    download_dir: PathBuf,
}

impl TypstReportRenderer {
    pub fn new(download_dir: PathBuf) -> Self {
        Self { download_dir }
    }
}

impl RenderReport for TypstReportRenderer {
    fn render(
        &self,
        consultancy_type: ConsultancyType,
        report: &GeneratedReport,
    ) -> Result<RenderedDocument, RenderError> {
        let source = typeset::build_source(report);
        let pdf = TypstEngine::compile(&source)?;

        let filename = artifact_filename(consultancy_type);
        let path = self.download_dir.join(&filename);

        fs::create_dir_all(&self.download_dir).map_err(|source| RenderError::WriteArtifact {
            path: self.download_dir.clone(),
            source,
        })?;
        fs::write(&path, &pdf).map_err(|source| RenderError::WriteArtifact {
            path: path.clone(),
            source,
        })?;

        log::info!("rendered consultation report to {}", path.display());

        Ok(RenderedDocument { filename, path })
    }
}
