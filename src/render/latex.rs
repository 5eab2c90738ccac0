// src/render/latex.rs
//! LaTeX renderer - fixed article template compiled by an external TeX toolchain

use super::{RenderedArtifact, Renderer, PDF_MIME};
use crate::error::OptimizeError;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tracing::{info, warn};

const DEFAULT_COMPILER: &str = "pdflatex";
const COMPILE_TIMEOUT_SECS: u64 = 30;
const PROBE_TIMEOUT_SECS: u64 = 5;

const TEMPLATE_HEADER: &str = r"\documentclass[11pt,a4paper]{article}
\usepackage[utf8]{inputenc}
\usepackage[margin=1in]{geometry}
\usepackage{enumitem}
\usepackage{titlesec}

\titleformat{\section}{\large\bfseries}{\thesection}{1em}{}
\titleformat{\subsection}{\normalsize\bfseries}{\thesubsection}{1em}{}

\begin{document}

\pagestyle{empty}

";

const TEMPLATE_FOOTER: &str = "

\\end{document}
";

/// Wrap optimized text in the fixed one-column template, spacing out
/// paragraph breaks.
pub fn wrap_in_template(text: &str) -> String {
    let body = text.replace("\n\n", "\n\n\\vspace{0.2cm}\n\n");
    format!("{}{}{}", TEMPLATE_HEADER, body, TEMPLATE_FOOTER)
}

pub struct LatexRenderer {
    compiler: String,
}

impl Default for LatexRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LatexRenderer {
    pub fn new() -> Self {
        Self {
            compiler: DEFAULT_COMPILER.to_string(),
        }
    }

    pub fn with_compiler(compiler: &str) -> Self {
        Self {
            compiler: compiler.to_string(),
        }
    }
}

#[async_trait]
impl Renderer for LatexRenderer {
    async fn render(
        &self,
        text: &str,
        output_path: &Path,
    ) -> Result<RenderedArtifact, OptimizeError> {
        let latex = wrap_in_template(text);

        // Isolated workspace, removed on drop on every exit path
        let workdir = tempfile::tempdir()?;
        let tex_path = workdir.path().join("resume.tex");
        tokio::fs::write(&tex_path, latex).await?;

        info!("Compiling LaTeX with {}", self.compiler);

        let mut command = Command::new(&self.compiler);
        command
            .arg("-interaction=nonstopmode")
            .arg("-output-directory")
            .arg(workdir.path())
            .arg(&tex_path)
            .kill_on_drop(true);

        let output = match tokio::time::timeout(
            Duration::from_secs(COMPILE_TIMEOUT_SECS),
            command.output(),
        )
        .await
        {
            Err(_) => {
                return Err(OptimizeError::Render(format!(
                    "{} timed out after {}s",
                    self.compiler, COMPILE_TIMEOUT_SECS
                )))
            }
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(OptimizeError::Render(format!(
                    "{} not found. Install a LaTeX distribution (e.g. TeX Live, MiKTeX)",
                    self.compiler
                )))
            }
            Ok(Err(e)) => {
                return Err(OptimizeError::Render(format!(
                    "Failed to run {}: {}",
                    self.compiler, e
                )))
            }
            Ok(Ok(output)) => output,
        };

        // nonstopmode can exit non-zero and still produce a usable PDF;
        // the produced file decides success
        let pdf_path = workdir.path().join("resume.pdf");
        if !pdf_path.exists() {
            return Err(OptimizeError::Render(format!(
                "{} produced no PDF (exit {:?}): {}",
                self.compiler,
                output.status.code(),
                diagnostics_tail(&output)
            )));
        }
        if !output.status.success() {
            warn!(
                "{} exited non-zero but produced a PDF, keeping it",
                self.compiler
            );
        }

        if let Some(parent) = output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::copy(&pdf_path, output_path).await?;

        info!("Compiled PDF to {}", output_path.display());
        Ok(RenderedArtifact {
            path: output_path.to_path_buf(),
            mime_type: PDF_MIME,
        })
    }
}

fn diagnostics_tail(output: &std::process::Output) -> String {
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    let tail_start = combined.len().saturating_sub(2000);
    combined[tail_start..].trim().to_string()
}

/// Probe for the TeX compiler without performing a render. Used to gate
/// caller affordances; never fails, only reports.
pub async fn is_latex_available() -> bool {
    compiler_available(DEFAULT_COMPILER).await
}

pub async fn compiler_available(compiler: &str) -> bool {
    let mut command = Command::new(compiler);
    command.arg("--version").kill_on_drop(true);

    match tokio::time::timeout(Duration::from_secs(PROBE_TIMEOUT_SECS), command.output()).await {
        Ok(Ok(output)) => output.status.success(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_wraps_body() {
        let latex = wrap_in_template("**Summary**\nExperienced engineer.");
        assert!(latex.starts_with("\\documentclass[11pt,a4paper]{article}"));
        assert!(latex.contains("Experienced engineer."));
        assert!(latex.trim_end().ends_with("\\end{document}"));
    }

    #[test]
    fn test_template_spaces_paragraph_breaks() {
        let latex = wrap_in_template("first paragraph\n\nsecond paragraph");
        assert!(latex.contains("first paragraph\n\n\\vspace{0.2cm}\n\nsecond paragraph"));
    }

    #[tokio::test]
    async fn test_missing_compiler_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("resume.pdf");

        let renderer = LatexRenderer::with_compiler("definitely-not-a-tex-compiler");
        let err = renderer.render("some resume text", &output).await.unwrap_err();

        assert!(matches!(err, OptimizeError::Render(_)));
        assert!(err.to_string().contains("definitely-not-a-tex-compiler"));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_probe_for_missing_compiler_is_false() {
        assert!(!compiler_available("definitely-not-a-tex-compiler").await);
    }
}
