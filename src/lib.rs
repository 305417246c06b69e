#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::sync::Arc;

use anyhow::Result;
use log::info;
use parking_lot::Mutex;
use tauri::{AppHandle, Builder, Manager, Window};

pub mod answer_key;
pub mod grading;
pub mod session;
pub mod settings;
pub mod test_library;

use test_library::TestLibrary;

/// Global application state: the test library, with exactly one current test.
/// The candidate's sitting (answers, markup, timer) lives in the session
/// module's stores.
pub struct AppState {
    pub library: Arc<Mutex<TestLibrary>>,
}

impl AppState {
    fn new() -> Self {
        AppState {
            library: Arc::new(Mutex::new(TestLibrary::with_builtin())),
        }
    }
}

pub fn run() -> Result<()> {
    info!("ReadBand starting...");
    settings::log_environment_status();

    Builder::default()
        .plugin(tauri_plugin_opener::init())
        .invoke_handler(tauri::generate_handler![
            // Test library
            test_library::list_tests,
            test_library::get_test,
            test_library::get_test_parts,
            test_library::create_test,
            test_library::switch_test,
            test_library::delete_test,
            test_library::update_test_answer_key,
            test_library::load_default_answer_key,
            test_library::export_test_data,
            test_library::answer_key_template,
            // Answer key import
            test_library::import_answer_key,
            test_library::parse_answer_key,
            // Grading
            grading::grade_test,
            grading::get_grading_report,
            // Answer sheet
            session::record_answer,
            session::toggle_choice,
            session::question_status,
            session::get_answer_sheet,
            session::clear_answer_sheet,
            // Highlights and notes
            session::get_highlight_colors,
            session::add_highlight,
            session::remove_highlight,
            session::clear_highlights,
            session::list_highlights,
            session::add_note,
            session::update_note,
            session::delete_note,
            session::list_notes,
            // Timer
            session::start_test_timer,
            session::pause_test_timer,
            session::resume_test_timer,
            session::stop_test_timer,
            session::get_timer_state,
            // Window management
            close_application,
            minimize_window,
            toggle_always_on_top,
        ])
        .manage(AppState::new())
        .setup(|app| {
            info!("ReadBand application starting up...");

            let state = app.state::<AppState>();
            let library = state.library.lock();
            info!(
                "Test library seeded with {} test(s); current: {}",
                library.len(),
                library.current_test_id()
            );

            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("Error while running tauri application");

    Ok(())
}

#[tauri::command]
fn close_application(app_handle: AppHandle) {
    info!("Closing application...");
    app_handle.exit(0);
}

#[tauri::command]
fn minimize_window(window: Window) {
    if let Err(e) = window.minimize() {
        log::error!("Failed to minimize window: {}", e);
    }
}

#[tauri::command]
fn toggle_always_on_top(window: Window) -> Result<bool, String> {
    let is_always_on_top = window.is_always_on_top().map_err(|e| e.to_string())?;
    window
        .set_always_on_top(!is_always_on_top)
        .map_err(|e| e.to_string())?;
    Ok(!is_always_on_top)
}
