//! Scheduler events.
//!
//! Every observable transition is reported as an [`Event`] so callers
//! (the CLI, tests, future frontends) can render or record what
//! happened without reaching into scheduler internals. Events serialize
//! as tagged JSON objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sound::SoundCategory;
use crate::timer::{SchedulerState, SlotPhase};

/// A point-in-time report of one slot, embedded in snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotStatus {
    pub index: usize,
    pub category: SoundCategory,
    pub enabled: bool,
    pub volume: f32,
    pub duration_min: f64,
    pub phase: SlotPhase,
    /// Seconds the slot currently displays (duration while armed, the
    /// live countdown while counting, zero while waiting to re-arm).
    pub remaining_secs: u64,
}

/// Something the scheduler did.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// All slots began counting down from their configured durations.
    SchedulerStarted {
        slot_count: usize,
        at: DateTime<Utc>,
    },

    /// Every countdown was cancelled and the slots returned to armed.
    SchedulerStopped { at: DateTime<Utc> },

    /// A slot's countdown reached zero. `notified` is true when a sound
    /// was dispatched to the notification sink; a disabled slot or a
    /// sink failure leaves it false (the slot re-arms either way).
    SlotExpired {
        slot_index: usize,
        category: SoundCategory,
        enabled: bool,
        notified: bool,
        at: DateTime<Utc>,
    },

    /// A slot finished its re-arm delay and began a fresh countdown.
    SlotRearmed {
        slot_index: usize,
        category: SoundCategory,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },

    /// On-demand dump of scheduler state.
    StateSnapshot {
        state: SchedulerState,
        /// Ticks processed since the last start.
        ticks: u64,
        slots: Vec<SlotStatus>,
        at: DateTime<Utc>,
    },
}
