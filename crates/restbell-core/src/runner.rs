//! Foreground tick loop.
//!
//! Drives a [`Scheduler`] at one tick per second on the tokio runtime.
//! The scheduler itself never sleeps or reads the clock; this loop is
//! the only place wall time enters the picture, so every state
//! transition stays testable without waiting.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::events::Event;
use crate::timer::Scheduler;

/// Drive `scheduler` until shutdown fires or `max_ticks` elapse.
///
/// Starts the scheduler on entry and stops it on exit. Every event,
/// the start/stop pair included, is delivered through `on_tick` along
/// with a borrow of the scheduler for status rendering. If the host
/// stalls past a tick deadline the missed ticks are skipped, not
/// bunched up.
pub async fn run<F>(
    scheduler: &mut Scheduler,
    mut shutdown: watch::Receiver<bool>,
    max_ticks: Option<u64>,
    mut on_tick: F,
) where
    F: FnMut(&Scheduler, &[Event]),
{
    let started: Vec<Event> = scheduler.start().into_iter().collect();
    if !started.is_empty() {
        info!(slots = scheduler.slot_count(), "scheduler started");
        on_tick(scheduler, &started);
    }

    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first interval tick completes immediately; consume it so the
    // loop waits a full second before the first scheduler tick.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let events = scheduler.tick();
                on_tick(scheduler, &events);
                if let Some(max) = max_ticks {
                    if scheduler.ticks() >= max {
                        debug!(ticks = scheduler.ticks(), "tick budget reached");
                        break;
                    }
                }
            }
            changed = shutdown.changed() => {
                // A closed channel counts as shutdown.
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    let stopped: Vec<Event> = scheduler.stop().into_iter().collect();
    if !stopped.is_empty() {
        info!(ticks = scheduler.ticks(), "scheduler stopped");
        on_tick(scheduler, &stopped);
    }
}
