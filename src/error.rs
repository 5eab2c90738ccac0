// src/error.rs
//! Pipeline error taxonomy - each stage fails fast with its own variant

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("Unsupported resume format: {0}. Use pdf, docx, or tex")]
    UnsupportedFormat(String),

    #[error("Failed to extract resume text: {0}")]
    Extraction(String),

    #[error("Invalid job URL: {0}")]
    Validation(String),

    #[error("Failed to fetch job posting: {0}")]
    Fetch(String),

    #[error("LLM completion failed: {0}")]
    Completion(String),

    #[error("Document rendering failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failing_stage() {
        assert_eq!(
            OptimizeError::UnsupportedFormat("txt".to_string()).to_string(),
            "Unsupported resume format: txt. Use pdf, docx, or tex"
        );
        assert_eq!(
            OptimizeError::Validation("missing URL".to_string()).to_string(),
            "Invalid job URL: missing URL"
        );
        assert!(OptimizeError::Render("pdflatex not found".to_string())
            .to_string()
            .contains("rendering"));
    }

    #[test]
    fn test_io_errors_convert_transparently() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: OptimizeError = io.into();
        assert!(matches!(err, OptimizeError::Io(_)));
        assert_eq!(err.to_string(), "no such file");
    }
}
