//! Resume optimization pipeline: extract an uploaded resume, acquire a job
//! description (pasted or scraped), ask an LLM to align the resume with the
//! job, and re-render the result as a downloadable DOCX or PDF.

pub mod completion;
pub mod config;
pub mod error;
pub mod extractor;
pub mod job_scraper;
pub mod pipeline;
pub mod prompt;
pub mod render;
pub mod utils;

pub use config::{OptimizerConfig, OutputFormat};
pub use error::OptimizeError;
pub use extractor::{DocumentFormat, SourceDocument};
pub use job_scraper::{JobDescription, JobScraper};
pub use pipeline::{JobSource, ResumeOptimizer};
pub use render::{is_latex_available, RenderedArtifact};

use std::path::PathBuf;

/// Convenience function for a one-shot optimization run.
pub async fn optimize_resume(
    document: SourceDocument,
    job: JobSource,
    format: OutputFormat,
    output_dir: Option<PathBuf>,
) -> Result<RenderedArtifact, OptimizeError> {
    let mut config = OptimizerConfig::from_env()?.with_format(format);
    if let Some(dir) = output_dir {
        config = config.with_output_dir(dir);
    }

    let optimizer = ResumeOptimizer::new(config)?;
    optimizer.optimize(&document, &job).await
}
