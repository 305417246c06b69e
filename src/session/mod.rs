pub mod answers;
pub mod markup;
pub mod timer;

pub use answers::*;
pub use markup::*;
pub use timer::*;

use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::answer_key::{AnswerSheet, AnswerValue};
use crate::grading::GradingReport;
use crate::test_library::DEFAULT_TEST_ID;

// Global state for the active sitting and the per-test countdown timers
lazy_static! {
    static ref ACTIVE_SITTING: Arc<Mutex<Sitting>> =
        Arc::new(Mutex::new(Sitting::new(DEFAULT_TEST_ID)));
    static ref TIMER_STORE: Arc<Mutex<HashMap<String, timer::TestTimer>>> =
        Arc::new(Mutex::new(HashMap::new()));
}

/// Everything a candidate accumulates while sitting one test: answers,
/// passage markup and the last grading report. Lives only in memory and is
/// discarded when they switch tests or close the app.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Sitting {
    pub test_id: String,
    pub answers: AnswerSheet,
    pub highlights: Vec<Highlight>,
    pub notes: Vec<Note>,
    pub report: Option<GradingReport>,
}

impl Sitting {
    pub fn new(test_id: &str) -> Self {
        Sitting {
            test_id: test_id.to_string(),
            answers: AnswerSheet::new(),
            highlights: Vec::new(),
            notes: Vec::new(),
            report: None,
        }
    }

    /// Record a single-valued answer. A blank value clears the question, so
    /// emptying an input returns it to not-attempted.
    pub fn record_answer(&mut self, question: u32, value: &str) {
        if value.trim().is_empty() {
            self.answers.remove(&question);
        } else {
            self.answers
                .insert(question, AnswerValue::Single(value.to_string()));
        }
    }

    /// Add or remove one choice of a multi-select question, returning the
    /// current selection.
    pub fn toggle_choice(&mut self, question: u32, choice: &str, checked: bool) -> Vec<String> {
        let mut choices = match self.answers.get(&question) {
            Some(AnswerValue::Multiple(existing)) => existing.clone(),
            _ => Vec::new(),
        };

        if checked {
            if !choices.iter().any(|c| c == choice) {
                choices.push(choice.to_string());
            }
        } else {
            choices.retain(|c| c != choice);
        }

        if choices.is_empty() {
            self.answers.remove(&question);
        } else {
            self.answers
                .insert(question, AnswerValue::Multiple(choices.clone()));
        }
        choices
    }

    pub fn question_status(&self, question: u32) -> &'static str {
        match self.answers.get(&question) {
            Some(value) if value.is_attempted() => "attempted",
            _ => "not-attempted",
        }
    }
}

pub fn current_sitting() -> Arc<Mutex<Sitting>> {
    ACTIVE_SITTING.clone()
}

/// Start a fresh sitting for the given test, dropping answers, markup and any
/// grading report from the previous one.
pub fn reset_sitting(test_id: &str) {
    let mut sitting = ACTIVE_SITTING.lock();
    *sitting = Sitting::new(test_id);
}

pub fn timer_store() -> Arc<Mutex<HashMap<String, timer::TestTimer>>> {
    TIMER_STORE.clone()
}
