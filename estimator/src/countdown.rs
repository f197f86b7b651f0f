//! Countdown Clock - background worker that ticks the time remaining
//!
//! Each tick recomputes the breakdown from the absolute end instant and the
//! clock's current time, so scheduling jitter never accumulates.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::stats::DAYS_PER_YEAR;

const SECONDS_PER_DAY: i64 = 86_400;

// ============================================================================
// Clocks
// ============================================================================

/// Source of "now" for estimates and countdown ticks
///
/// Calendar math (today, end date) uses the wall-clock reading from `now`.
/// Countdown ticks subtract absolute instants from `instant`, which never
/// jump when daylight saving time starts or ends.
pub trait Clock: Send + Sync {
    /// Absolute current instant
    fn instant(&self) -> DateTime<Utc>;

    /// Wall-clock reading of the current instant
    fn now(&self) -> NaiveDateTime;

    /// Absolute instant of a wall-clock time in this clock's zone
    fn instant_of(&self, local: NaiveDateTime) -> DateTime<Utc>;
}

/// System time in the local zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn instant(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    /// Ambiguous times (fall back) take the earlier instant; times skipped by
    /// a spring-forward gap land one hour later.
    fn instant_of(&self, local: NaiveDateTime) -> DateTime<Utc> {
        Local
            .from_local_datetime(&local)
            .earliest()
            .or_else(|| {
                Local
                    .from_local_datetime(&(local + chrono::Duration::hours(1)))
                    .earliest()
            })
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&local))
    }
}

/// Always returns the same instant. Its zone is UTC, so the wall-clock
/// reading equals the instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn instant(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.0)
    }

    fn now(&self) -> NaiveDateTime {
        self.0
    }

    fn instant_of(&self, local: NaiveDateTime) -> DateTime<Utc> {
        Utc.from_utc_datetime(&local)
    }
}

// ============================================================================
// Countdown state
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountdownState {
    pub end: DateTime<Utc>,
    pub years: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    /// Whole seconds left; strictly decreases from tick to tick
    pub total_seconds: i64,
    pub expired: bool,
}

impl CountdownState {
    /// Break down the time between `now` and `end`
    pub fn between(end: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let total_seconds = (end - now).num_seconds();
        if total_seconds <= 0 {
            return Self::expired_at(end);
        }

        let total_minutes = total_seconds / 60;
        let total_hours = total_minutes / 60;
        let total_days = total_hours / 24;
        let years = (total_days as f64 / DAYS_PER_YEAR).floor() as i64;
        let days = total_days - (years as f64 * DAYS_PER_YEAR).floor() as i64;

        Self {
            end,
            years,
            days,
            hours: total_hours % 24,
            minutes: total_minutes % 60,
            seconds: total_seconds % 60,
            total_seconds,
            expired: false,
        }
    }

    /// All units zero
    pub fn expired_at(end: DateTime<Utc>) -> Self {
        Self {
            end,
            years: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
            total_seconds: 0,
            expired: true,
        }
    }

    pub fn total_days(&self) -> i64 {
        self.total_seconds / SECONDS_PER_DAY
    }
}

// ============================================================================
// Countdown clock
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClockPhase {
    Idle,
    Running,
    Expired,
}

/// Owns at most one ticking worker. Starting again replaces the previous
/// worker; dropping the clock stops it.
pub struct CountdownClock {
    is_running: Arc<AtomicBool>,
    is_expired: Arc<AtomicBool>,
    cancel: Option<Sender<()>>,
    thread_handle: Option<JoinHandle<()>>,
    end: Option<DateTime<Utc>>,
}

impl CountdownClock {
    pub fn new() -> Self {
        Self {
            is_running: Arc::new(AtomicBool::new(false)),
            is_expired: Arc::new(AtomicBool::new(false)),
            cancel: None,
            thread_handle: None,
            end: None,
        }
    }

    /// Start ticking towards `end`
    ///
    /// # Arguments
    /// * `end` - Absolute end instant (usually `EstimationResult::end_instant`)
    /// * `clock` - Source of the current instant for every tick
    /// * `interval` - Time between ticks (one second in normal use)
    /// * `callback` - Receives every tick whose whole-second total changed,
    ///   including the final zeroed one
    pub fn start<F>(
        &mut self,
        end: DateTime<Utc>,
        clock: Arc<dyn Clock>,
        interval: Duration,
        mut callback: F,
    ) where
        F: FnMut(CountdownState) + Send + 'static,
    {
        if self.thread_handle.is_some() {
            tracing::debug!("Replacing active countdown");
            self.stop();
        }

        tracing::info!("Starting countdown to {} ({:?} ticks)", end, interval);
        self.is_expired.store(false, Ordering::SeqCst);
        self.is_running.store(true, Ordering::SeqCst);
        self.end = Some(end);

        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let running = Arc::clone(&self.is_running);
        let expired = Arc::clone(&self.is_expired);

        let handle = thread::spawn(move || {
            // Clears the running flag on every exit, panics included
            let _running = RunningGuard(running);
            let mut last_total = None;

            loop {
                let state = CountdownState::between(end, clock.instant());
                if last_total != Some(state.total_seconds) {
                    last_total = Some(state.total_seconds);
                    callback(state);
                }

                if state.expired {
                    expired.store(true, Ordering::SeqCst);
                    tracing::info!("Countdown to {} expired", end);
                    break;
                }

                // A message or a dropped sender both mean cancel
                match cancel_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        self.cancel = Some(cancel_tx);
        self.thread_handle = Some(handle);
    }

    /// Cancel the pending tick and return to idle
    pub fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(()); // Worker may already have exited on expiry
        }
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join(); // Callback panic intentionally ignored during shutdown
            tracing::debug!("Countdown worker stopped");
        }
        self.is_running.store(false, Ordering::SeqCst);
        self.is_expired.store(false, Ordering::SeqCst);
        self.end = None;
    }

    pub fn phase(&self) -> ClockPhase {
        if self.is_expired.load(Ordering::SeqCst) {
            ClockPhase::Expired
        } else if self.is_running.load(Ordering::SeqCst) {
            ClockPhase::Running
        } else {
            ClockPhase::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase() == ClockPhase::Running
    }

    /// End instant of the active countdown, if any
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }
}

struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Default for CountdownClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CountdownClock {
    fn drop(&mut self) {
        self.stop();
    }
}
