// src/extractor.rs
//! Resume text extraction - PDF, DOCX, and LaTeX sources reduced to plain text

use crate::error::OptimizeError;
use crate::utils::get_file_extension;
use once_cell::sync::Lazy;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::io::{Read, Write};
use tracing::info;

/// An uploaded resume: raw bytes plus the declared file name.
/// Lives only for the duration of one extraction call.
pub struct SourceDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            bytes,
        }
    }

    pub fn format(&self) -> Result<DocumentFormat, OptimizeError> {
        DocumentFormat::from_filename(&self.file_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Tex,
}

impl DocumentFormat {
    pub fn from_filename(filename: &str) -> Result<Self, OptimizeError> {
        match get_file_extension(filename).as_deref() {
            Some("pdf") => Ok(DocumentFormat::Pdf),
            Some("docx") => Ok(DocumentFormat::Docx),
            Some("tex") => Ok(DocumentFormat::Tex),
            Some(other) => Err(OptimizeError::UnsupportedFormat(other.to_string())),
            None => Err(OptimizeError::UnsupportedFormat(filename.to_string())),
        }
    }
}

/// Extract plain text from an uploaded resume document.
///
/// Formatting is reduced to line-level cues only: the result is a flat
/// newline-delimited string handed to the prompt stage as-is.
pub fn extract_text(document: &SourceDocument) -> Result<String, OptimizeError> {
    let format = document.format()?;
    info!(
        "Extracting text from {} ({:?}, {} bytes)",
        document.file_name,
        format,
        document.bytes.len()
    );

    match format {
        DocumentFormat::Pdf => extract_pdf_text(&document.bytes),
        DocumentFormat::Docx => extract_docx_text(&document.bytes),
        DocumentFormat::Tex => Ok(extract_latex_text(&String::from_utf8_lossy(
            &document.bytes,
        ))),
    }
}

/// Spool uploaded bytes to a temp file for path-based library consumption.
/// The file is removed when the handle drops.
fn spool_to_temp(bytes: &[u8], suffix: &str) -> Result<tempfile::NamedTempFile, OptimizeError> {
    let mut tmp = tempfile::Builder::new().suffix(suffix).tempfile()?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    Ok(tmp)
}

fn extract_pdf_text(bytes: &[u8]) -> Result<String, OptimizeError> {
    let tmp = spool_to_temp(bytes, ".pdf")?;
    pdf_extract::extract_text(tmp.path())
        .map_err(|e| OptimizeError::Extraction(format!("PDF parsing failed: {}", e)))
}

/// Read word/document.xml out of the DOCX archive and join paragraph text
/// with newlines, in document order.
fn extract_docx_text(bytes: &[u8]) -> Result<String, OptimizeError> {
    let tmp = spool_to_temp(bytes, ".docx")?;
    let file = std::fs::File::open(tmp.path())?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| OptimizeError::Extraction(format!("Not a valid DOCX archive: {}", e)))?;

    let mut document_file = archive
        .by_name("word/document.xml")
        .map_err(|e| OptimizeError::Extraction(format!("DOCX missing document.xml: {}", e)))?;
    let mut xml = String::new();
    document_file.read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut current = String::new();
    let mut paragraphs = Vec::new();
    let mut in_paragraph = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == b"w:p" {
                    in_paragraph = true;
                    current.clear();
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"w:p" {
                    paragraphs.push(current.trim().to_string());
                    current.clear();
                    in_paragraph = false;
                }
            }
            Ok(Event::Empty(e)) => {
                // self-closing <w:p/> is an intentionally blank paragraph
                if e.name().as_ref() == b"w:p" {
                    paragraphs.push(String::new());
                }
            }
            Ok(Event::Text(e)) => {
                if in_paragraph {
                    let value = e
                        .xml_content()
                        .map_err(|e| OptimizeError::Extraction(e.to_string()))?;
                    current.push_str(&value);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(OptimizeError::Extraction(format!(
                    "DOCX XML parsing failed: {}",
                    e
                )))
            }
            _ => {}
        }

        buf.clear();
    }

    Ok(paragraphs.join("\n"))
}

static TEX_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"%[^\n]*").unwrap());
static TEX_MACRO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\[a-zA-Z]+\*?(?:\[[^\]]*\])?(?:\{[^}]*\})*").unwrap());
static TEX_BRACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[{}]").unwrap());
static TEX_LINEBREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\\\").unwrap());
static TEX_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

/// Best-effort textual reduction of LaTeX source. This pattern-strips common
/// command syntax; it is not a LaTeX parser and never resolves macros.
pub fn extract_latex_text(content: &str) -> String {
    let content = TEX_COMMENT.replace_all(content, "");
    let content = TEX_MACRO.replace_all(&content, "");
    let content = TEX_BRACES.replace_all(&content, "");
    let content = TEX_LINEBREAK.replace_all(&content, "\n");
    let content = TEX_SPACES.replace_all(&content, " ");

    content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use zip::write::SimpleFileOptions;

    #[test]
    fn test_format_from_filename() {
        assert_eq!(
            DocumentFormat::from_filename("resume.pdf").unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_filename("Resume.DOCX").unwrap(),
            DocumentFormat::Docx
        );
        assert_eq!(
            DocumentFormat::from_filename("cv.tex").unwrap(),
            DocumentFormat::Tex
        );
        assert!(matches!(
            DocumentFormat::from_filename("resume.txt"),
            Err(OptimizeError::UnsupportedFormat(_))
        ));
        assert!(DocumentFormat::from_filename("noext").is_err());
    }

    #[test]
    fn test_latex_strips_comments_and_macros() {
        let source = "\\section{Experience} % my jobs\nLed a team of 5\\\\\nBuilt   services";
        let text = extract_latex_text(source);
        assert_eq!(text, "Led a team of 5\nBuilt services");
    }

    #[test]
    fn test_latex_keeps_brace_free_content() {
        let source = "\\textbf{Summary}\nExperienced {engineer} with skills";
        let text = extract_latex_text(source);
        assert_eq!(text, "Experienced engineer with skills");
    }

    #[test]
    fn test_latex_drops_empty_lines() {
        let source = "line one\n\n% only a comment\n\nline two";
        assert_eq!(extract_latex_text(source), "line one\nline two");
    }

    fn fake_docx(paragraphs: &[&str]) -> Vec<u8> {
        let body = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
            .collect::<String>();
        let xml = format!(
            "<?xml version=\"1.0\"?><w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body>{}</w:body></w:document>",
            body
        );

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_docx_paragraphs_joined_in_order() {
        let bytes = fake_docx(&["**Summary**", "Experienced engineer.", "- Led team of 5"]);
        let doc = SourceDocument::new("resume.docx", bytes);
        let text = extract_text(&doc).unwrap();
        assert_eq!(
            text,
            "**Summary**\nExperienced engineer.\n- Led team of 5"
        );
    }

    #[test]
    fn test_pdf_malformed_bytes_fail_as_extraction() {
        let doc = SourceDocument::new("resume.pdf", b"%PDF-1.4 truncated garbage".to_vec());
        let err = extract_text(&doc).unwrap_err();
        assert!(matches!(err, OptimizeError::Extraction(_)));
        assert!(err.to_string().contains("PDF parsing failed"));
    }

    #[test]
    fn test_docx_invalid_archive_fails() {
        let doc = SourceDocument::new("resume.docx", b"not a zip".to_vec());
        assert!(matches!(
            extract_text(&doc),
            Err(OptimizeError::Extraction(_))
        ));
    }
}
