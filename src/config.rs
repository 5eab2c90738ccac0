// src/config.rs
use crate::error::OptimizeError;
use std::path::PathBuf;

pub const DEFAULT_COMPLETION_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Output artifact format, selects the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Docx,
    Pdf,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Docx => "docx",
            OutputFormat::Pdf => "pdf",
        }
    }
}

pub struct OptimizerConfig {
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub completion_url: String,
    pub model: String,
    pub api_key: String,
    pub temperature: f32,
}

impl OptimizerConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            format: OutputFormat::Docx,
            completion_url: DEFAULT_COMPLETION_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Read the API key from the GROQ_API_KEY environment variable
    pub fn from_env() -> Result<Self, OptimizeError> {
        let api_key = std::env::var("GROQ_API_KEY").map_err(|_| {
            OptimizeError::Completion("GROQ_API_KEY environment variable not set".to_string())
        })?;
        Ok(Self::new(&api_key))
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_completion_url(mut self, url: &str) -> Self {
        self.completion_url = url.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OptimizerConfig::new("key");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.format, OutputFormat::Docx);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_builders() {
        let config = OptimizerConfig::new("key")
            .with_format(OutputFormat::Pdf)
            .with_output_dir(PathBuf::from("artifacts"))
            .with_model("llama-3.1-8b-instant");
        assert_eq!(config.format, OutputFormat::Pdf);
        assert_eq!(config.output_dir, PathBuf::from("artifacts"));
        assert_eq!(config.model, "llama-3.1-8b-instant");
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(OutputFormat::Docx.extension(), "docx");
        assert_eq!(OutputFormat::Pdf.extension(), "pdf");
    }
}
