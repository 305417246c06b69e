use std::io::Read;
use std::path::Path;

use log::{info, warn};
use quick_xml::events::Event;

use super::{parse_answer_key_text, AnswerKey, KeyImportError};

/// Load an answer key from a file on disk, dispatching on the extension.
///
/// JSON is parsed strictly; PDF and DOCX are text-extracted and then run
/// through the heuristic parser; anything text-like is read (lossily, for old
/// .doc files and odd encodings) and parsed the same way.
pub async fn load_answer_key(path: &Path) -> Result<AnswerKey, KeyImportError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let key = match extension.as_str() {
        "json" => {
            let text = tokio::fs::read_to_string(path).await?;
            serde_json::from_str(&text)?
        }
        "pdf" => {
            let text = extract_pdf_text(path)?;
            parse_answer_key_text(&text)
        }
        "docx" => {
            let bytes = tokio::fs::read(path).await?;
            let text = extract_docx_text(&bytes)?;
            parse_answer_key_text(&text)
        }
        "txt" | "text" | "doc" | "rtf" | "md" | "csv" => {
            let bytes = tokio::fs::read(path).await?;
            parse_answer_key_text(&String::from_utf8_lossy(&bytes))
        }
        other => return Err(KeyImportError::UnsupportedFormat(other.to_string())),
    };

    if key.is_empty() {
        warn!("Answer key import from {} produced no entries", path.display());
        return Err(KeyImportError::Empty);
    }

    info!(
        "Loaded {} answer(s) from {} ({} file)",
        key.len(),
        path.display(),
        if extension.is_empty() { "unknown" } else { &extension }
    );
    Ok(key)
}

fn extract_pdf_text(path: &Path) -> Result<String, KeyImportError> {
    pdf_extract::extract_text(path).map_err(|e| KeyImportError::PdfExtraction(e.to_string()))
}

/// Pull the raw text out of a DOCX archive's main document part.
///
/// Paragraph ends become newlines so the line-oriented parser still sees one
/// answer per line; soft breaks and tabs become separators.
fn extract_docx_text(bytes: &[u8]) -> Result<String, KeyImportError> {
    let cursor = std::io::Cursor::new(bytes);
    let mut archive =
        zip::ZipArchive::new(cursor).map_err(|e| KeyImportError::DocxExtraction(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| KeyImportError::DocxExtraction(e.to_string()))?
        .read_to_string(&mut xml)
        .map_err(|e| KeyImportError::DocxExtraction(e.to_string()))?;

    let mut reader = quick_xml::Reader::from_str(&xml);
    let mut text = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Text(fragment)) => {
                let piece = fragment
                    .unescape()
                    .map_err(|e| KeyImportError::DocxExtraction(e.to_string()))?;
                text.push_str(&piece);
            }
            Ok(Event::End(element)) if element.name().as_ref() == b"w:p" => text.push('\n'),
            Ok(Event::Empty(element))
                if element.name().as_ref() == b"w:br" || element.name().as_ref() == b"w:tab" =>
            {
                text.push(' ')
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(KeyImportError::DocxExtraction(e.to_string())),
            Ok(_) => {}
        }
    }
    Ok(text)
}
