use std::path::PathBuf;

use log::info;

pub const DEFAULT_TEST_MINUTES: u64 = 60;
pub const DEFAULT_EXPORT_DIR: &str = "exports";

/// Look a tunable up at runtime first, then fall back to the value embedded
/// at build time by build.rs (if any).
pub fn get_env_var(key: &str) -> Option<String> {
    // Load .env if one is present, for development runs.
    let _ = dotenvy::dotenv();

    if let Ok(value) = std::env::var(key) {
        if !value.is_empty() {
            return Some(value);
        }
    }

    // option_env!() keys must be literal, so the embedded fallbacks are
    // enumerated here.
    let embedded = match key {
        "READBAND_TEST_MINUTES" => option_env!("READBAND_TEST_MINUTES"),
        "READBAND_EXPORT_DIR" => option_env!("READBAND_EXPORT_DIR"),
        _ => None,
    };
    embedded
        .map(str::to_string)
        .filter(|value| !value.is_empty())
}

/// Countdown length for a test sitting, in minutes.
pub fn test_minutes() -> u64 {
    get_env_var("READBAND_TEST_MINUTES")
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_TEST_MINUTES)
}

/// Where exported test data lands when the frontend does not pick a folder.
pub fn export_dir() -> PathBuf {
    get_env_var("READBAND_EXPORT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR))
}

pub fn log_environment_status() {
    info!("Environment configuration status:");
    info!(
        "  READBAND_TEST_MINUTES: {} ({})",
        test_minutes(),
        if get_env_var("READBAND_TEST_MINUTES").is_some() {
            "configured"
        } else {
            "default"
        }
    );
    info!(
        "  READBAND_EXPORT_DIR: {} ({})",
        export_dir().display(),
        if get_env_var("READBAND_EXPORT_DIR").is_some() {
            "configured"
        } else {
            "default"
        }
    );
}
