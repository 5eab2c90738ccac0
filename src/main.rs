use anyhow::Result;
use clap::{Parser, Subcommand};
use resume_optimizer::{
    is_latex_available, JobScraper, JobSource, OptimizerConfig, OutputFormat, ResumeOptimizer,
    SourceDocument,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tailorcv")]
#[command(about = "Optimize a resume against a job description with an LLM")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full optimization pipeline on a resume file
    Optimize {
        /// Resume file (.pdf, .docx, or .tex)
        resume: PathBuf,
        /// Job description pasted as text
        #[arg(long, conflicts_with = "job_url")]
        job_text: Option<String>,
        /// Job posting URL to scrape
        #[arg(long)]
        job_url: Option<String>,
        /// Output format: docx or pdf
        #[arg(long, default_value = "docx")]
        format: String,
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
        /// Override the completion model identifier
        #[arg(long)]
        model: Option<String>,
    },
    /// Scrape a job posting URL and print the cleaned description
    Scrape { url: String },
    /// Check whether the LaTeX toolchain is available
    CheckLatex,
}

fn parse_format(format: &str) -> Result<OutputFormat> {
    match format.to_lowercase().as_str() {
        "docx" => Ok(OutputFormat::Docx),
        "pdf" => Ok(OutputFormat::Pdf),
        other => anyhow::bail!("Unknown output format: {}. Use docx or pdf", other),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Optimize {
            resume,
            job_text,
            job_url,
            format,
            output_dir,
            model,
        } => {
            let job = match (job_text, job_url) {
                (Some(text), _) => JobSource::Text(text),
                (None, Some(url)) => JobSource::Url(url),
                (None, None) => {
                    anyhow::bail!("Provide a job description via --job-text or --job-url")
                }
            };

            let format = parse_format(&format)?;
            if format == OutputFormat::Pdf && !is_latex_available().await {
                anyhow::bail!(
                    "pdflatex not found. Install a LaTeX distribution or use --format docx"
                );
            }

            let file_name = resume
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow::anyhow!("Invalid resume path: {}", resume.display()))?
                .to_string();
            let bytes = std::fs::read(&resume)?;
            let document = SourceDocument::new(&file_name, bytes);

            let mut config = OptimizerConfig::from_env()?
                .with_format(format)
                .with_output_dir(output_dir);
            if let Some(model) = model {
                config = config.with_model(&model);
            }

            let optimizer = ResumeOptimizer::new(config)?;
            let artifact = optimizer.optimize(&document, &job).await?;

            info!("Optimization completed");
            println!("{}", artifact.path.display());
            println!("{}", artifact.mime_type);
        }

        Command::Scrape { url } => {
            let scraper = JobScraper::new()?;
            let job = scraper.scrape(&url).await?;
            println!("{}", job.text);
        }

        Command::CheckLatex => {
            if is_latex_available().await {
                println!("pdflatex is available");
            } else {
                println!("pdflatex not found. Install a LaTeX distribution (e.g. TeX Live, MiKTeX)");
            }
        }
    }

    Ok(())
}
