use std::time::{Duration, Instant};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::settings;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TimerState {
    pub test_id: String,
    pub total_seconds: u64,
    pub elapsed_seconds: u64,
    pub remaining_seconds: u64,
    pub is_running: bool,
    pub is_expired: bool,
    /// Remaining time as the `MM:SS` clock shown in the header.
    pub clock: String,
}

/// Countdown timer for one test sitting. Counts down from the configured
/// duration, clamps at zero and survives pause/resume cycles.
pub struct TestTimer {
    test_id: String,
    duration: Duration,
    start_time: Instant,
    paused_time: Duration,
    paused_at: Option<Instant>,
    is_running: bool,
}

impl TestTimer {
    pub fn new(test_id: String, minutes: u64) -> Self {
        TestTimer {
            test_id,
            duration: Duration::from_secs(minutes * 60),
            start_time: Instant::now(),
            paused_time: Duration::ZERO,
            paused_at: None,
            is_running: false,
        }
    }

    pub fn start(&mut self) {
        self.start_time = Instant::now();
        self.paused_time = Duration::ZERO;
        self.paused_at = None;
        self.is_running = true;
        info!("Timer started for test {} ({:?})", self.test_id, self.duration);
    }

    pub fn pause(&mut self) {
        if self.is_running && self.paused_at.is_none() {
            self.paused_at = Some(Instant::now());
            info!("Timer paused for test {}", self.test_id);
        }
    }

    pub fn resume(&mut self) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_time += paused_at.elapsed();
            info!("Timer resumed for test {}", self.test_id);
        }
    }

    pub fn stop(&mut self) -> TimerState {
        let state = self.state();
        self.is_running = false;
        info!(
            "Timer stopped for test {} ({}s remaining)",
            self.test_id, state.remaining_seconds
        );
        state
    }

    fn elapsed(&self) -> Duration {
        if !self.is_running {
            return Duration::ZERO;
        }
        let frozen = self.paused_at.map(|at| at.elapsed()).unwrap_or(Duration::ZERO);
        self.start_time
            .elapsed()
            .saturating_sub(self.paused_time)
            .saturating_sub(frozen)
            .min(self.duration)
    }

    pub fn state(&self) -> TimerState {
        let elapsed = self.elapsed().as_secs();
        let total = self.duration.as_secs();
        let remaining = total.saturating_sub(elapsed);

        TimerState {
            test_id: self.test_id.clone(),
            total_seconds: total,
            elapsed_seconds: elapsed,
            remaining_seconds: remaining,
            is_running: self.is_running && self.paused_at.is_none(),
            is_expired: self.is_running && remaining == 0,
            clock: format_clock(remaining),
        }
    }
}

pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

// Tauri commands for the countdown timer

#[tauri::command]
pub async fn start_test_timer() -> Result<TimerState, String> {
    let test_id = {
        let sitting = super::current_sitting();
        let sitting = sitting.lock();
        sitting.test_id.clone()
    };

    let store = super::timer_store();
    let mut timers = store.lock();

    let timer = timers
        .entry(test_id.clone())
        .or_insert_with(|| TestTimer::new(test_id, settings::test_minutes()));
    timer.start();
    Ok(timer.state())
}

#[tauri::command]
pub async fn pause_test_timer() -> Result<TimerState, String> {
    with_current_timer(|timer| {
        timer.pause();
        timer.state()
    })
}

#[tauri::command]
pub async fn resume_test_timer() -> Result<TimerState, String> {
    with_current_timer(|timer| {
        timer.resume();
        timer.state()
    })
}

#[tauri::command]
pub async fn stop_test_timer() -> Result<TimerState, String> {
    let test_id = {
        let sitting = super::current_sitting();
        let sitting = sitting.lock();
        sitting.test_id.clone()
    };

    let store = super::timer_store();
    let mut timers = store.lock();

    match timers.remove(&test_id) {
        Some(mut timer) => Ok(timer.stop()),
        None => {
            warn!("Stop requested but no timer is running for test {}", test_id);
            Err("Timer not running for this test".to_string())
        }
    }
}

#[tauri::command]
pub async fn get_timer_state() -> Result<TimerState, String> {
    with_current_timer(|timer| timer.state())
}

fn with_current_timer<T>(apply: impl FnOnce(&mut TestTimer) -> T) -> Result<T, String> {
    let test_id = {
        let sitting = super::current_sitting();
        let sitting = sitting.lock();
        sitting.test_id.clone()
    };

    let store = super::timer_store();
    let mut timers = store.lock();
    match timers.get_mut(&test_id) {
        Some(timer) => Ok(apply(timer)),
        None => Err("Timer not running for this test".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_timer_counts_down_from_full_duration() {
        let mut timer = TestTimer::new("test-1".to_string(), 60);
        timer.start();

        let state = timer.state();
        assert_eq!(state.total_seconds, 3600);
        assert!(state.remaining_seconds >= 3599);
        assert!(state.is_running);
        assert!(!state.is_expired);
    }

    #[test]
    fn test_unstarted_timer_reports_not_running() {
        let timer = TestTimer::new("test-1".to_string(), 60);
        let state = timer.state();
        assert!(!state.is_running);
        assert!(!state.is_expired);
        assert_eq!(state.elapsed_seconds, 0);
    }

    #[test]
    fn test_pause_and_resume_transitions() {
        let mut timer = TestTimer::new("test-1".to_string(), 60);
        timer.start();

        timer.pause();
        assert!(!timer.state().is_running);
        // A second pause while paused is a no-op.
        timer.pause();

        timer.resume();
        assert!(timer.state().is_running);

        let state = timer.stop();
        assert!(state.remaining_seconds <= 3600);
        assert!(!timer.state().is_running);
    }

    #[test]
    fn test_zero_duration_expires_immediately() {
        let mut timer = TestTimer::new("test-1".to_string(), 0);
        timer.start();
        let state = timer.state();
        assert_eq!(state.remaining_seconds, 0);
        assert!(state.is_expired);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(3600), "60:00");
        assert_eq!(format_clock(125), "02:05");
        assert_eq!(format_clock(9), "00:09");
        assert_eq!(format_clock(0), "00:00");
    }
}
