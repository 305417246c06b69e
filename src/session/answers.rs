use log::info;

use crate::answer_key::AnswerSheet;

// Tauri commands for the candidate's answer sheet

#[tauri::command]
pub async fn record_answer(question: u32, value: String) -> Result<String, String> {
    let sitting = super::current_sitting();
    let mut sitting = sitting.lock();
    sitting.record_answer(question, &value);
    Ok(sitting.question_status(question).to_string())
}

#[tauri::command]
pub async fn toggle_choice(
    question: u32,
    choice: String,
    checked: bool,
) -> Result<Vec<String>, String> {
    let sitting = super::current_sitting();
    let mut sitting = sitting.lock();
    Ok(sitting.toggle_choice(question, &choice, checked))
}

#[tauri::command]
pub async fn question_status(question: u32) -> Result<String, String> {
    let sitting = super::current_sitting();
    let sitting = sitting.lock();
    Ok(sitting.question_status(question).to_string())
}

#[tauri::command]
pub async fn get_answer_sheet() -> Result<AnswerSheet, String> {
    let sitting = super::current_sitting();
    let sitting = sitting.lock();
    Ok(sitting.answers.clone())
}

#[tauri::command]
pub async fn clear_answer_sheet() -> Result<(), String> {
    let sitting = super::current_sitting();
    let mut sitting = sitting.lock();
    let dropped = sitting.answers.len();
    sitting.answers.clear();
    sitting.report = None;
    info!("Cleared answer sheet ({} answer(s) dropped)", dropped);
    Ok(())
}
