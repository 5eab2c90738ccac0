// src/render/mod.rs
//! Output rendering - one capability, two strategies (structured DOCX, LaTeX PDF)

pub mod docx;
pub mod latex;

pub use docx::DocxRenderer;
pub use latex::{is_latex_available, LatexRenderer};

use crate::error::OptimizeError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PDF_MIME: &str = "application/pdf";

/// A produced document: file path plus MIME type for the download step.
#[derive(Debug, Clone)]
pub struct RenderedArtifact {
    pub path: PathBuf,
    pub mime_type: &'static str,
}

/// Render strategy over the model's optimized text. Implementations share the
/// input shape contract (line-level `**heading**` and bullet cues) but nothing
/// else; new output formats are additive.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(
        &self,
        text: &str,
        output_path: &Path,
    ) -> Result<RenderedArtifact, OptimizeError>;
}
