pub mod document;
pub mod parser;

pub use document::*;
pub use parser::*;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// An expected or submitted answer: a single string, or an unordered set of
/// choices for multi-select questions (serialized as a JSON list).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Multiple(Vec<String>),
}

impl AnswerValue {
    /// Whether the candidate actually put something down for this question.
    pub fn is_attempted(&self) -> bool {
        match self {
            AnswerValue::Single(text) => !text.trim().is_empty(),
            AnswerValue::Multiple(choices) => !choices.is_empty(),
        }
    }
}

/// Reference mapping from question number to expected answer(s).
///
/// Serializes to the external JSON shape `{"1": "FALSE", "18": ["A", "B"]}`;
/// serde_json renders the numeric keys as strings on the wire.
pub type AnswerKey = BTreeMap<u32, AnswerValue>;

/// The candidate's answers, same shape as the key.
pub type AnswerSheet = BTreeMap<u32, AnswerValue>;

#[derive(Debug, Error)]
pub enum KeyImportError {
    #[error("Unsupported file format '{0}'. Please upload JSON, PDF, DOC, DOCX, or TXT files.")]
    UnsupportedFormat(String),
    #[error("Failed to read the file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Could not parse answer key JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
    #[error("Failed to extract text from PDF. Please ensure the PDF contains readable text.")]
    PdfExtraction(String),
    #[error("Failed to extract text from Word document. Please ensure the document is not corrupted.")]
    DocxExtraction(String),
    #[error("No answer key data found in the file. Please check the file format and content.")]
    Empty,
}

/// Sample answer key offered to users as a download, mirroring the shape the
/// importer accepts.
pub fn answer_key_template() -> String {
    let template = json!({
        "1": "TRUE/FALSE/NOT GIVEN",
        "2": "TRUE/FALSE/NOT GIVEN",
        "7": "one word answer",
        "14": "A/B/C/D/E/F/G",
        "18": ["A", "B"],
        "27": "TRUE/FALSE/NOT GIVEN",
        "34": "one word answer"
    });
    serde_json::to_string_pretty(&template).expect("static template serializes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_key_json_shape() {
        let mut key = AnswerKey::new();
        key.insert(1, AnswerValue::Single("FALSE".to_string()));
        key.insert(18, AnswerValue::Multiple(vec!["A".to_string(), "B".to_string()]));

        let encoded = serde_json::to_string(&key).unwrap();
        assert_eq!(encoded, r#"{"1":"FALSE","18":["A","B"]}"#);

        let decoded: AnswerKey = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn test_template_is_valid_key_json() {
        let key: AnswerKey = serde_json::from_str(&answer_key_template()).unwrap();
        assert_eq!(key.len(), 7);
        assert_eq!(
            key.get(&18),
            Some(&AnswerValue::Multiple(vec!["A".to_string(), "B".to_string()]))
        );
    }

    #[test]
    fn test_is_attempted() {
        assert!(AnswerValue::Single("TRUE".to_string()).is_attempted());
        assert!(!AnswerValue::Single("   ".to_string()).is_attempted());
        assert!(!AnswerValue::Multiple(vec![]).is_attempted());
    }
}
