use anyhow::Result;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::state::{AppState, TickEvent};

use super::estimate::calculate;

/// Run the live countdown for `seconds`, or until it expires
pub fn run(state: &mut AppState, seconds: u64, json: bool) -> Result<()> {
    let result = calculate(state)?;
    let (tx, rx) = mpsc::channel();

    state.countdown.start(
        result.end_instant(state.clock.as_ref()),
        Arc::clone(&state.clock),
        state.config.tick_interval(),
        move |tick| {
            if tx.send(tick).is_err() {
                tracing::trace!("Dropped tick {}s, receiver gone", tick.total_seconds);
            }
        },
    );

    let deadline = Instant::now() + Duration::from_secs(seconds);
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        match rx.recv_timeout(remaining) {
            Ok(tick) => {
                let event = TickEvent::from(tick);
                super::emit(json, &event, || {
                    if event.expired {
                        "Time is up".to_string()
                    } else {
                        format!(
                            "{}y {}d {:02}:{:02}:{:02}",
                            event.years, event.days, event.hours, event.minutes, event.seconds
                        )
                    }
                })?;
                if event.expired {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    state.countdown.stop();
    Ok(())
}
