use log::info;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{AnswerKey, AnswerValue};

// Line shapes seen in real answer sheets: "1. TRUE", "2) B", "3: radium",
// "4 - FALSE", "5 = C", "Q6: A", "Question 7: thorium", "8 pitchblende".
static LINE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)^(?:question|q)\s*(\d{1,3})\s*[.):=-]?\s*(\S.*)$").unwrap(),
        Regex::new(r"^(\d{1,3})\s*[.):=-]\s*(\S.*)$").unwrap(),
        Regex::new(r"^(\d{1,3})\s+(\S.*)$").unwrap(),
    ]
});

// Letter-choice lists like "A, B" or "C and D" become multi-select answers.
static CHOICE_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-h](?:\s*(?:,|\band\b)\s*[a-h])+$").unwrap());
static CHOICE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*(?:,|\band\b)\s*").unwrap());

/// Heuristic answer-key extraction from free-form text.
///
/// Scans line by line for "number + separator + answer" shapes. Later lines
/// for the same question number overwrite earlier ones, so a corrected sheet
/// pasted below the original wins.
pub fn parse_answer_key_text(text: &str) -> AnswerKey {
    let mut key = AnswerKey::new();

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        for pattern in LINE_PATTERNS.iter() {
            let Some(caps) = pattern.captures(line) else {
                continue;
            };
            let Ok(number) = caps[1].parse::<u32>() else {
                break;
            };
            if let Some(value) = normalize_answer(caps[2].trim()) {
                key.insert(number, value);
            }
            break;
        }
    }

    info!("Parsed {} answer(s) from {} line(s) of text", key.len(), text.lines().count());
    key
}

fn normalize_answer(raw: &str) -> Option<AnswerValue> {
    if raw.is_empty() {
        return None;
    }

    if CHOICE_LIST.is_match(raw) {
        let choices: Vec<String> = CHOICE_SEPARATOR
            .split(raw)
            .filter(|choice| !choice.is_empty())
            .map(|choice| choice.trim().to_ascii_uppercase())
            .collect();
        if choices.len() > 1 {
            return Some(AnswerValue::Multiple(choices));
        }
    }

    // Single answers keep their case but lose one trailing period or comma.
    let cleaned = raw
        .strip_suffix(['.', ','])
        .unwrap_or(raw)
        .trim()
        .to_string();
    if cleaned.is_empty() {
        return None;
    }
    Some(AnswerValue::Single(cleaned))
}
