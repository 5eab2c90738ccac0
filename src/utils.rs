// src/utils.rs
use std::path::{Path, PathBuf};

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Normalize a document stem for file system usage
pub fn sanitize_filename(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Build a timestamped output file path for a rendered artifact
pub fn output_file_path(base: &Path, stem: &str, extension: &str) -> PathBuf {
    base.join(format!(
        "{}_{}.{}",
        sanitize_filename(stem),
        chrono::Utc::now().format("%Y%m%d_%H%M%S"),
        extension
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_file_extension() {
        assert_eq!(get_file_extension("resume.pdf"), Some("pdf".to_string()));
        assert_eq!(get_file_extension("resume.DOCX"), Some("docx".to_string()));
        assert_eq!(get_file_extension("noext"), None);
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("John Doe CV"), "John_Doe_CV");
        assert_eq!(sanitize_filename("resume@2024"), "resume_2024");
        assert_eq!(sanitize_filename("my-resume_v2"), "my-resume_v2");
    }

    #[test]
    fn test_output_file_path() {
        let path = output_file_path(Path::new("output"), "optimized resume", "docx");
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("optimized_resume_"));
        assert!(name.ends_with(".docx"));
    }
}
