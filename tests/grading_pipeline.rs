// End-to-end checks over the pure pipeline: parse an answer key from text or
// a file, grade a sheet against it, and map the score to a band.

use readband_lib::answer_key::{
    load_answer_key, parse_answer_key_text, AnswerSheet, AnswerValue,
};
use readband_lib::grading::grade_answer_sheet;
use readband_lib::test_library::content::default_answer_key;

#[test]
fn parsed_text_key_grades_a_perfect_sheet_to_band_nine() {
    let key_text = "\
1. FALSE
2. NOT GIVEN
3. TRUE
7. thorium
14. B
18. A, B
";
    let key = parse_answer_key_text(key_text);
    assert_eq!(key.len(), 6);

    // Copy the key into the sheet, varying case and whitespace.
    let mut sheet = AnswerSheet::new();
    for (number, value) in &key {
        let submitted = match value {
            AnswerValue::Single(text) => AnswerValue::Single(format!(" {} ", text.to_lowercase())),
            AnswerValue::Multiple(choices) => {
                let mut reversed = choices.clone();
                reversed.reverse();
                AnswerValue::Multiple(reversed)
            }
        };
        sheet.insert(*number, submitted);
    }

    let report = grade_answer_sheet(&key, &sheet);
    assert_eq!(report.raw_score, 6);
    assert_eq!(report.percentage, 100.0);
    assert_eq!(report.band_score, 9.0);
}

#[test]
fn builtin_key_grades_an_empty_sheet_to_the_floor() {
    let key = default_answer_key();
    let report = grade_answer_sheet(&key, &AnswerSheet::new());

    assert_eq!(report.raw_score, 0);
    assert_eq!(report.total_questions, 37);
    assert_eq!(report.band_score, 2.0);
    assert!(report.results.values().all(|result| !result.is_correct));
}

#[test]
fn builtin_key_band_thresholds_line_up_with_raw_scores() {
    let key = default_answer_key();
    let numbers: Vec<u32> = key.keys().copied().collect();

    // Answer the first `correct` questions from the key itself, leave the
    // rest blank, and confirm the band never decreases as the score rises.
    let mut previous_band = 0.0;
    for correct in 0..=numbers.len() {
        let mut sheet = AnswerSheet::new();
        for number in &numbers[..correct] {
            sheet.insert(*number, key[number].clone());
        }
        let report = grade_answer_sheet(&key, &sheet);
        assert_eq!(report.raw_score, correct);
        assert!(
            report.band_score >= previous_band,
            "band dropped at {} correct",
            correct
        );
        previous_band = report.band_score;
    }
    assert_eq!(previous_band, 9.0);
}

#[tokio::test]
async fn exported_key_json_reimports_identically() {
    let key = default_answer_key();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("marie_curie_key.json");
    std::fs::write(&path, serde_json::to_string_pretty(&key).unwrap()).unwrap();

    let reloaded = load_answer_key(&path).await.unwrap();
    assert_eq!(reloaded, key);
}

#[tokio::test]
async fn text_file_import_survives_messy_formatting() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("key.txt");
    std::fs::write(
        &path,
        "ANSWER KEY\n\nQuestion 1: FALSE\n2) not given\n18 - A and B\n\nGood luck!\n",
    )
    .unwrap();

    let key = load_answer_key(&path).await.unwrap();
    assert_eq!(key.len(), 3);
    assert_eq!(key.get(&1), Some(&AnswerValue::Single("FALSE".to_string())));
    assert_eq!(
        key.get(&2),
        Some(&AnswerValue::Single("not given".to_string()))
    );
    assert_eq!(
        key.get(&18),
        Some(&AnswerValue::Multiple(vec!["A".to_string(), "B".to_string()]))
    );
}
