// src/pipeline.rs
//! One-shot optimization pipeline: extract -> acquire job -> prompt -> complete -> render

use crate::completion::CompletionClient;
use crate::config::{OptimizerConfig, OutputFormat};
use crate::error::OptimizeError;
use crate::extractor::{extract_text, SourceDocument};
use crate::job_scraper::{JobDescription, JobScraper};
use crate::prompt::build_alignment_prompt;
use crate::render::{DocxRenderer, LatexRenderer, RenderedArtifact, Renderer};
use crate::utils::output_file_path;
use tracing::info;

/// Where the job description comes from: pasted text (verbatim) or a
/// job-posting URL (validated, fetched, extracted, cleaned).
pub enum JobSource {
    Text(String),
    Url(String),
}

pub struct ResumeOptimizer {
    pub config: OptimizerConfig,
    scraper: JobScraper,
    client: CompletionClient,
}

impl ResumeOptimizer {
    pub fn new(config: OptimizerConfig) -> Result<Self, OptimizeError> {
        let scraper = JobScraper::new()?;
        let client = CompletionClient::new(&config)?;
        Ok(Self {
            config,
            scraper,
            client,
        })
    }

    /// Run the whole pipeline for one request. Each stage fails fast; on
    /// failure no artifact is produced.
    pub async fn optimize(
        &self,
        document: &SourceDocument,
        job: &JobSource,
    ) -> Result<RenderedArtifact, OptimizeError> {
        let resume_text = extract_text(document)?;
        let job_description = self.acquire_job(job).await?;

        let prompt = build_alignment_prompt(&resume_text, &job_description.text);
        let optimized = self.client.complete(&prompt).await?;
        info!("Received {} chars of optimized resume text", optimized.len());

        self.render(&optimized).await
    }

    pub async fn acquire_job(&self, job: &JobSource) -> Result<JobDescription, OptimizeError> {
        match job {
            JobSource::Text(text) => Ok(JobDescription::from_text(text)),
            JobSource::Url(url) => self.scraper.scrape(url).await,
        }
    }

    /// Render already-optimized text with the configured strategy.
    pub async fn render(&self, optimized: &str) -> Result<RenderedArtifact, OptimizeError> {
        tokio::fs::create_dir_all(&self.config.output_dir).await?;
        let output_path = output_file_path(
            &self.config.output_dir,
            "optimized_resume",
            self.config.format.extension(),
        );

        let renderer: Box<dyn Renderer> = match self.config.format {
            OutputFormat::Docx => Box::new(DocxRenderer::new()),
            OutputFormat::Pdf => Box::new(LatexRenderer::new()),
        };

        renderer.render(optimized, &output_path).await
    }
}
