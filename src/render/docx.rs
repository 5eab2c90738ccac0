// src/render/docx.rs
//! Structured DOCX renderer - line state machine over the optimized text

use super::{RenderedArtifact, Renderer, DOCX_MIME};
use crate::error::OptimizeError;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use quick_xml::escape::escape;
use regex::Regex;
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::info;
use zip::write::SimpleFileOptions;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*\*(.+?)\*\*$").unwrap());
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*•]\s+(.*)").unwrap());

/// Line classification priority ladder: blank, then heading, then bullet,
/// then plain. A literal bullet glyph opening a sentence is misclassified as
/// a list item; accepted lossy heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    Blank,
    Heading(String),
    Bullet(String),
    Plain(String),
}

pub fn classify_line(line: &str) -> LineClass {
    let line = line.trim();
    if line.is_empty() {
        return LineClass::Blank;
    }
    if let Some(captures) = HEADING.captures(line) {
        return LineClass::Heading(captures[1].to_string());
    }
    if let Some(captures) = BULLET.captures(line) {
        return LineClass::Bullet(captures[1].to_string());
    }
    LineClass::Plain(line.to_string())
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/></Relationships>"#;

// Calibri 11pt document default (sz is half-points)
const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri"/><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr></w:rPrDefault></w:docDefaults></w:styles>"#;

const NUMBERING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:abstractNum w:abstractNumId="0"><w:lvl w:ilvl="0"><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#;

fn paragraph_xml(class: &LineClass) -> String {
    match class {
        LineClass::Blank => "<w:p/>".to_string(),
        // bold 12pt heading, asterisks already stripped
        LineClass::Heading(text) => format!(
            "<w:p><w:r><w:rPr><w:b/><w:sz w:val=\"24\"/><w:szCs w:val=\"24\"/></w:rPr><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
            escape(text.as_str())
        ),
        LineClass::Bullet(text) => format!(
            "<w:p><w:pPr><w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"1\"/></w:numPr></w:pPr><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
            escape(text.as_str())
        ),
        // 1.15 line spacing (276/240), 6pt space after (120 twips)
        LineClass::Plain(text) => format!(
            "<w:p><w:pPr><w:spacing w:after=\"120\" w:line=\"276\" w:lineRule=\"auto\"/></w:pPr><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
            escape(text.as_str())
        ),
    }
}

pub fn build_document_xml(text: &str) -> String {
    let mut body = String::new();
    for line in text.trim().split('\n') {
        body.push_str(&paragraph_xml(&classify_line(line)));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body>{}</w:body></w:document>",
        body
    )
}

/// Assemble the minimal OOXML package in memory.
pub fn build_docx_bytes(text: &str) -> Result<Vec<u8>, OptimizeError> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let parts: [(&str, String); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
        ("_rels/.rels", PACKAGE_RELS_XML.to_string()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.to_string()),
        ("word/styles.xml", STYLES_XML.to_string()),
        ("word/numbering.xml", NUMBERING_XML.to_string()),
        ("word/document.xml", build_document_xml(text)),
    ];

    for (name, content) in parts {
        writer
            .start_file(name, options)
            .map_err(|e| OptimizeError::Render(format!("DOCX write failed: {}", e)))?;
        writer.write_all(content.as_bytes())?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| OptimizeError::Render(format!("DOCX finalize failed: {}", e)))?;
    Ok(cursor.into_inner())
}

#[derive(Default)]
pub struct DocxRenderer;

impl DocxRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Renderer for DocxRenderer {
    async fn render(
        &self,
        text: &str,
        output_path: &Path,
    ) -> Result<RenderedArtifact, OptimizeError> {
        let bytes = build_docx_bytes(text)?;

        if let Some(parent) = output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(output_path, bytes).await?;

        info!("Wrote structured document to {}", output_path.display());
        Ok(RenderedArtifact {
            path: output_path.to_path_buf(),
            mime_type: DOCX_MIME,
        })
    }
}
