pub mod band;

pub use band::*;

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use tauri::State;

use crate::answer_key::{AnswerKey, AnswerSheet, AnswerValue};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct QuestionResult {
    pub candidate: Option<AnswerValue>,
    pub expected: AnswerValue,
    pub is_correct: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GradingReport {
    pub raw_score: usize,
    pub total_questions: usize,
    /// Percentage of key questions answered correctly, rounded to one decimal.
    pub percentage: f64,
    pub band_score: f64,
    pub band_description: String,
    pub results: BTreeMap<u32, QuestionResult>,
    pub graded_at: DateTime<Utc>,
}

/// Compare the candidate's sheet against the key, question by question.
/// Only questions present in the key count towards the total.
pub fn grade_answer_sheet(key: &AnswerKey, sheet: &AnswerSheet) -> GradingReport {
    let mut correct = 0;
    let mut results = BTreeMap::new();

    for (number, expected) in key {
        let candidate = sheet.get(number);
        let is_correct = answer_matches(expected, candidate);
        if is_correct {
            correct += 1;
        }
        results.insert(
            *number,
            QuestionResult {
                candidate: candidate.cloned(),
                expected: expected.clone(),
                is_correct,
            },
        );
    }

    let total = key.len();
    let percentage = if total == 0 {
        0.0
    } else {
        (correct as f64 / total as f64 * 1000.0).round() / 10.0
    };
    let band_score = convert_to_band_score(correct, total);

    GradingReport {
        raw_score: correct,
        total_questions: total,
        percentage,
        band_score,
        band_description: band_description(band_score).to_string(),
        results,
        graded_at: Utc::now(),
    }
}

/// Single expected answers match case-insensitively after trimming; list
/// expected answers require exact set equality, never subset or superset.
fn answer_matches(expected: &AnswerValue, candidate: Option<&AnswerValue>) -> bool {
    match (expected, candidate) {
        (AnswerValue::Single(want), Some(AnswerValue::Single(got))) => {
            !got.trim().is_empty() && want.trim().eq_ignore_ascii_case(got.trim())
        }
        (AnswerValue::Multiple(want), Some(AnswerValue::Multiple(got))) => {
            let want_set: BTreeSet<String> = normalized_choices(want);
            let got_set: BTreeSet<String> = normalized_choices(got);
            // Raw lengths must agree too, so duplicated choices never pass.
            want.len() == got.len() && want_set == got_set
        }
        _ => false,
    }
}

fn normalized_choices(choices: &[String]) -> BTreeSet<String> {
    choices
        .iter()
        .map(|choice| choice.trim().to_ascii_uppercase())
        .collect()
}

// Tauri commands for grading

#[tauri::command]
pub async fn grade_test(state: State<'_, crate::AppState>) -> Result<GradingReport, String> {
    let key = {
        let library = state.library.lock();
        library.current().answer_key.clone()
    };

    if key.is_empty() {
        return Err("Please upload an answer key first or load the default answer key.".to_string());
    }

    let sitting = crate::session::current_sitting();
    let mut sitting = sitting.lock();
    let report = grade_answer_sheet(&key, &sitting.answers);

    info!(
        "Graded test '{}': {}/{} correct ({}%), band {}",
        sitting.test_id, report.raw_score, report.total_questions, report.percentage, report.band_score
    );

    sitting.report = Some(report.clone());
    Ok(report)
}

#[tauri::command]
pub async fn get_grading_report() -> Result<GradingReport, String> {
    let sitting = crate::session::current_sitting();
    let sitting = sitting.lock();
    sitting
        .report
        .clone()
        .ok_or_else(|| "The test has not been graded yet.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(text: &str) -> AnswerValue {
        AnswerValue::Single(text.to_string())
    }

    fn multiple(choices: &[&str]) -> AnswerValue {
        AnswerValue::Multiple(choices.iter().map(|c| c.to_string()).collect())
    }

    fn key_of(entries: &[(u32, AnswerValue)]) -> AnswerKey {
        entries.iter().cloned().collect()
    }

    #[test]
    fn test_single_answers_match_case_and_whitespace_insensitively() {
        let key = key_of(&[(7, single("thorium")), (27, single("NOT GIVEN"))]);
        let sheet = key_of(&[(7, single("  Thorium ")), (27, single("not given"))]);

        let report = grade_answer_sheet(&key, &sheet);
        assert_eq!(report.raw_score, 2);
        assert_eq!(report.percentage, 100.0);
    }

    #[test]
    fn test_set_equality_required_for_multi_select() {
        let key = key_of(&[(18, multiple(&["A", "B"]))]);

        // Exact set, order and case ignored.
        let exact = key_of(&[(18, multiple(&["b", "A"]))]);
        assert_eq!(grade_answer_sheet(&key, &exact).raw_score, 1);

        // Subset, superset and duplicates all fail.
        let subset = key_of(&[(18, multiple(&["A"]))]);
        let superset = key_of(&[(18, multiple(&["A", "B", "C"]))]);
        let duplicated = key_of(&[(18, multiple(&["A", "A"]))]);
        assert_eq!(grade_answer_sheet(&key, &subset).raw_score, 0);
        assert_eq!(grade_answer_sheet(&key, &superset).raw_score, 0);
        assert_eq!(grade_answer_sheet(&key, &duplicated).raw_score, 0);
    }

    #[test]
    fn test_shape_mismatch_never_matches() {
        let key = key_of(&[(18, multiple(&["A", "B"])), (1, single("TRUE"))]);
        let sheet = key_of(&[(18, single("A")), (1, multiple(&["TRUE"]))]);
        assert_eq!(grade_answer_sheet(&key, &sheet).raw_score, 0);
    }

    #[test]
    fn test_unanswered_questions_count_against_total() {
        let key = key_of(&[(1, single("TRUE")), (2, single("FALSE"))]);
        let sheet = key_of(&[(1, single("TRUE"))]);

        let report = grade_answer_sheet(&key, &sheet);
        assert_eq!(report.raw_score, 1);
        assert_eq!(report.total_questions, 2);
        assert_eq!(report.percentage, 50.0);
        assert_eq!(report.band_score, 5.5);
        assert!(!report.results[&2].is_correct);
        assert!(report.results[&2].candidate.is_none());
    }

    #[test]
    fn test_extra_sheet_answers_are_ignored() {
        let key = key_of(&[(1, single("TRUE"))]);
        let sheet = key_of(&[(1, single("TRUE")), (99, single("FALSE"))]);

        let report = grade_answer_sheet(&key, &sheet);
        assert_eq!(report.total_questions, 1);
        assert_eq!(report.raw_score, 1);
        assert!(!report.results.contains_key(&99));
    }

    #[test]
    fn test_report_carries_band_description() {
        let key = key_of(&[(1, single("TRUE"))]);
        let report = grade_answer_sheet(&key, &key.clone());
        assert_eq!(report.band_score, 9.0);
        assert_eq!(report.band_description, "Expert User - Very Good User");
    }
}
