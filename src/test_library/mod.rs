pub mod content;

pub use content::*;

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tauri::State;
use uuid::Uuid;

use crate::answer_key::{self, AnswerKey};
use crate::settings;

pub const DEFAULT_TEST_ID: &str = "test-1";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ReadingTest {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub answer_key: AnswerKey,
    pub parts: Vec<TestPart>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TestSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub question_count: usize,
}

/// The in-memory collection of tests the candidate can sit. Always holds the
/// built-in default test; exactly one test is current at any time.
pub struct TestLibrary {
    tests: HashMap<String, ReadingTest>,
    current_test_id: String,
}

impl TestLibrary {
    pub fn with_builtin() -> Self {
        let default_test = ReadingTest {
            id: DEFAULT_TEST_ID.to_string(),
            name: "IELTS Reading Test 1 - Marie Curie".to_string(),
            description: "Academic Reading test about the life and work of Marie Curie"
                .to_string(),
            created_at: Utc::now(),
            answer_key: content::default_answer_key(),
            parts: content::builtin_parts(),
        };

        let mut tests = HashMap::new();
        tests.insert(default_test.id.clone(), default_test);
        TestLibrary {
            tests,
            current_test_id: DEFAULT_TEST_ID.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn current_test_id(&self) -> &str {
        &self.current_test_id
    }

    pub fn current(&self) -> &ReadingTest {
        // delete() refuses to drop the default test and re-points the current
        // id before removal, so the current test is always present.
        self.tests
            .get(&self.current_test_id)
            .expect("current test always present in library")
    }

    pub fn get(&self, test_id: &str) -> Option<&ReadingTest> {
        self.tests.get(test_id)
    }

    pub fn list(&self) -> Vec<TestSummary> {
        let mut summaries: Vec<TestSummary> = self
            .tests
            .values()
            .map(|test| TestSummary {
                id: test.id.clone(),
                name: test.name.clone(),
                description: test.description.clone(),
                created_at: test.created_at,
                question_count: test.answer_key.len(),
            })
            .collect();
        summaries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        summaries
    }

    pub fn create(&mut self, name: &str) -> Result<ReadingTest, String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Please enter a test name".to_string());
        }

        let now = Utc::now();
        let test = ReadingTest {
            id: format!("test-{}", Uuid::new_v4()),
            name: name.to_string(),
            description: format!("IELTS Reading test created on {}", now.format("%Y-%m-%d")),
            created_at: now,
            answer_key: AnswerKey::new(),
            parts: Vec::new(),
        };
        self.tests.insert(test.id.clone(), test.clone());
        Ok(test)
    }

    pub fn switch(&mut self, test_id: &str) -> Result<&ReadingTest, String> {
        if !self.tests.contains_key(test_id) {
            return Err(format!("Test not found: {}", test_id));
        }
        self.current_test_id = test_id.to_string();
        Ok(self.current())
    }

    pub fn delete(&mut self, test_id: &str) -> Result<(), String> {
        if test_id == DEFAULT_TEST_ID {
            return Err("Cannot delete the default test".to_string());
        }
        if self.tests.remove(test_id).is_none() {
            return Err(format!("Test not found: {}", test_id));
        }
        if self.current_test_id == test_id {
            self.current_test_id = DEFAULT_TEST_ID.to_string();
        }
        Ok(())
    }

    pub fn update_key(&mut self, test_id: &str, key: AnswerKey) -> Result<(), String> {
        let test = self
            .tests
            .get_mut(test_id)
            .ok_or_else(|| format!("Test not found: {}", test_id))?;
        test.answer_key = key;
        Ok(())
    }

    /// Restore the built-in key on the current test if its key is empty, as
    /// the "load default answer key" button does.
    pub fn restore_default_key(&mut self) -> AnswerKey {
        let current_id = self.current_test_id.clone();
        let test = self
            .tests
            .get_mut(&current_id)
            .expect("current test always present in library");
        if test.answer_key.is_empty() {
            test.answer_key = content::default_answer_key();
        }
        test.answer_key.clone()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ImportSummary {
    pub test_id: String,
    pub file_name: String,
    pub question_count: usize,
}

// Tauri commands for the test library

#[tauri::command]
pub async fn list_tests(state: State<'_, crate::AppState>) -> Result<Vec<TestSummary>, String> {
    let library = state.library.lock();
    Ok(library.list())
}

#[tauri::command]
pub async fn get_test(
    test_id: Option<String>,
    state: State<'_, crate::AppState>,
) -> Result<ReadingTest, String> {
    let library = state.library.lock();
    match test_id {
        Some(id) => library
            .get(&id)
            .cloned()
            .ok_or_else(|| format!("Test not found: {}", id)),
        None => Ok(library.current().clone()),
    }
}

#[tauri::command]
pub async fn get_test_parts(
    test_id: Option<String>,
    state: State<'_, crate::AppState>,
) -> Result<Vec<TestPart>, String> {
    let library = state.library.lock();
    match test_id {
        Some(id) => library
            .get(&id)
            .map(|test| test.parts.clone())
            .ok_or_else(|| format!("Test not found: {}", id)),
        None => Ok(library.current().parts.clone()),
    }
}

#[tauri::command]
pub async fn create_test(
    name: String,
    state: State<'_, crate::AppState>,
) -> Result<ReadingTest, String> {
    let mut library = state.library.lock();
    let test = library.create(&name)?;
    info!("Created test '{}' ({})", test.name, test.id);
    Ok(test)
}

#[tauri::command]
pub async fn switch_test(
    test_id: String,
    state: State<'_, crate::AppState>,
) -> Result<ReadingTest, String> {
    let test = {
        let mut library = state.library.lock();
        library.switch(&test_id)?.clone()
    };

    // A fresh sitting: answers, markup, report and timer all start over.
    crate::session::reset_sitting(&test.id);
    crate::session::timer_store().lock().clear();
    info!("Switched to test '{}' ({})", test.name, test.id);
    Ok(test)
}

#[tauri::command]
pub async fn delete_test(test_id: String, state: State<'_, crate::AppState>) -> Result<(), String> {
    let was_current = {
        let mut library = state.library.lock();
        let was_current = library.current_test_id() == test_id;
        library.delete(&test_id)?;
        was_current
    };

    if was_current {
        crate::session::reset_sitting(DEFAULT_TEST_ID);
        crate::session::timer_store().lock().clear();
    }
    info!("Deleted test {}", test_id);
    Ok(())
}

#[tauri::command]
pub async fn update_test_answer_key(
    test_id: String,
    answer_key: AnswerKey,
    state: State<'_, crate::AppState>,
) -> Result<usize, String> {
    let mut library = state.library.lock();
    let count = answer_key.len();
    library.update_key(&test_id, answer_key)?;
    info!("Updated answer key for {} ({} question(s))", test_id, count);
    Ok(count)
}

#[tauri::command]
pub async fn load_default_answer_key(
    state: State<'_, crate::AppState>,
) -> Result<AnswerKey, String> {
    let mut library = state.library.lock();
    Ok(library.restore_default_key())
}

/// Parse pasted answer-key text without applying it, so the frontend can show
/// a preview before committing via `update_test_answer_key`.
#[tauri::command]
pub async fn parse_answer_key(text: String) -> Result<AnswerKey, String> {
    let key = answer_key::parse_answer_key_text(&text);
    if key.is_empty() {
        return Err(answer_key::KeyImportError::Empty.to_string());
    }
    Ok(key)
}

#[tauri::command]
pub async fn import_answer_key(
    path: String,
    state: State<'_, crate::AppState>,
) -> Result<ImportSummary, String> {
    let path = PathBuf::from(path);
    let key = answer_key::load_answer_key(&path)
        .await
        .map_err(|e| e.to_string())?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("answer key")
        .to_string();

    let mut library = state.library.lock();
    let test_id = library.current_test_id().to_string();
    let question_count = key.len();
    library.update_key(&test_id, key)?;

    info!(
        "Imported {} answer(s) from {} into {}",
        question_count, file_name, test_id
    );
    Ok(ImportSummary {
        test_id,
        file_name,
        question_count,
    })
}

#[tauri::command]
pub async fn answer_key_template() -> Result<String, String> {
    Ok(answer_key::answer_key_template())
}

#[tauri::command]
pub async fn export_test_data(
    test_id: Option<String>,
    output_dir: Option<String>,
    state: State<'_, crate::AppState>,
) -> Result<String, String> {
    let test = {
        let library = state.library.lock();
        match test_id {
            Some(id) => library
                .get(&id)
                .cloned()
                .ok_or_else(|| format!("Test not found: {}", id))?,
            None => library.current().clone(),
        }
    };

    let payload = json!({
        "testInfo": {
            "name": test.name,
            "description": test.description,
            "createdDate": test.created_at,
        },
        "answerKey": test.answer_key,
    });
    let body = serde_json::to_string_pretty(&payload)
        .map_err(|e| format!("Failed to serialize test data: {}", e))?;

    let dir = output_dir
        .map(PathBuf::from)
        .unwrap_or_else(settings::export_dir);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| format!("Failed to create export directory: {}", e))?;

    let path = dir.join(format!("{}_data.json", sanitize_file_stem(&test.name)));
    tokio::fs::write(&path, body)
        .await
        .map_err(|e| format!("Failed to write export file: {}", e))?;

    info!("Exported test '{}' to {}", test.name, path.display());
    Ok(path.display().to_string())
}

/// Lowercase the test name and collapse anything non-alphanumeric, matching
/// the export filenames users already have.
fn sanitize_file_stem(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer_key::AnswerValue;

    #[test]
    fn test_library_seeds_the_builtin_test() {
        let library = TestLibrary::with_builtin();
        assert_eq!(library.len(), 1);
        assert_eq!(library.current_test_id(), DEFAULT_TEST_ID);
        assert_eq!(library.current().answer_key.len(), 37);
        assert_eq!(library.current().parts.len(), 3);
    }

    #[test]
    fn test_create_requires_a_name() {
        let mut library = TestLibrary::with_builtin();
        assert!(library.create("   ").is_err());

        let test = library.create("Mock Test 2").unwrap();
        assert!(test.answer_key.is_empty());
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn test_default_test_cannot_be_deleted() {
        let mut library = TestLibrary::with_builtin();
        let err = library.delete(DEFAULT_TEST_ID).unwrap_err();
        assert_eq!(err, "Cannot delete the default test");
    }

    #[test]
    fn test_deleting_current_falls_back_to_default() {
        let mut library = TestLibrary::with_builtin();
        let test = library.create("Mock Test 2").unwrap();
        library.switch(&test.id).unwrap();
        assert_eq!(library.current_test_id(), test.id);

        library.delete(&test.id).unwrap();
        assert_eq!(library.current_test_id(), DEFAULT_TEST_ID);
    }

    #[test]
    fn test_switch_to_unknown_test_fails() {
        let mut library = TestLibrary::with_builtin();
        assert!(library.switch("test-nope").is_err());
        assert_eq!(library.current_test_id(), DEFAULT_TEST_ID);
    }

    #[test]
    fn test_restore_default_key_only_fills_empty_keys() {
        let mut library = TestLibrary::with_builtin();

        // Current test already has a key: untouched.
        let key = library.restore_default_key();
        assert_eq!(key.len(), 37);

        // A new empty test picks up the built-in key.
        let test = library.create("Mock Test 2").unwrap();
        library.switch(&test.id).unwrap();
        let restored = library.restore_default_key();
        assert_eq!(restored.len(), 37);
        assert_eq!(
            restored.get(&1),
            Some(&AnswerValue::Single("FALSE".to_string()))
        );
    }

    #[test]
    fn test_list_orders_by_creation() {
        let mut library = TestLibrary::with_builtin();
        library.create("Mock Test 2").unwrap();
        let summaries = library.list();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, DEFAULT_TEST_ID);
    }

    #[test]
    fn test_sanitize_file_stem() {
        assert_eq!(
            sanitize_file_stem("IELTS Reading Test 1 - Marie Curie"),
            "ielts_reading_test_1___marie_curie"
        );
    }
}
