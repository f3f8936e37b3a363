//! Scheduler implementation.
//!
//! The scheduler is a tick-driven state machine over a set of reminder
//! slots. It does not use internal threads or read the clock to make
//! decisions - the caller delivers one `tick()` per elapsed second and
//! each call advances every running countdown by exactly one second.
//!
//! ## Slot cycle
//!
//! ```text
//! Armed -> Counting -> (expiry: play sound) -> RearmPending -> Counting -> ...
//! ```
//!
//! `start()` moves every slot from `Armed` into `Counting`; `stop()`
//! cancels all countdowns and returns the slots to `Armed`. Slots expire
//! and re-arm independently of each other.
//!
//! ## Usage
//!
//! ```ignore
//! let mut scheduler = Scheduler::new(configs, Box::new(NullSink))?;
//! scheduler.start();
//! // Once per second:
//! for event in scheduler.tick() { /* render */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::slot::{Slot, SlotConfig, SlotPhase};
use crate::error::ValidationError;
use crate::events::{Event, SlotStatus};
use crate::notify::NotificationSink;
use crate::sound::SoundCategory;

/// Fixed pause between a slot expiring and its next countdown, in ticks.
pub const REARM_DELAY_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerState {
    Stopped,
    Running,
}

/// Tick-driven reminder scheduler.
///
/// Owns the slots and the notification sink. The caller is responsible
/// for calling `tick()` once per second while the scheduler runs.
pub struct Scheduler {
    slots: Vec<Slot>,
    state: SchedulerState,
    /// Ticks processed since the last start.
    ticks: u64,
    sink: Box<dyn NotificationSink>,
}

impl Scheduler {
    /// Create a stopped scheduler from slot settings.
    ///
    /// Every configured duration and volume is validated up front so a
    /// bad config file fails here rather than mid-run.
    pub fn new(
        configs: Vec<SlotConfig>,
        sink: Box<dyn NotificationSink>,
    ) -> Result<Self, ValidationError> {
        for config in &configs {
            SlotConfig::validate_duration(config.duration_min)?;
            SlotConfig::validate_volume(config.volume)?;
        }
        Ok(Self {
            slots: configs.into_iter().map(Slot::new).collect(),
            state: SchedulerState::Stopped,
            ticks: 0,
            sink,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            ticks: self.ticks,
            slots: self
                .slots
                .iter()
                .enumerate()
                .map(|(index, slot)| SlotStatus {
                    index,
                    category: slot.config.category,
                    enabled: slot.config.enabled,
                    volume: slot.config.volume,
                    duration_min: slot.config.duration_min,
                    phase: slot.phase(),
                    remaining_secs: slot.remaining_display_secs(),
                })
                .collect(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start all countdowns from their configured durations.
    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            SchedulerState::Stopped => {
                self.state = SchedulerState::Running;
                self.ticks = 0;
                for slot in &mut self.slots {
                    slot.arm();
                }
                Some(Event::SchedulerStarted {
                    slot_count: self.slots.len(),
                    at: Utc::now(),
                })
            }
            SchedulerState::Running => None, // Already running.
        }
    }

    /// Cancel every countdown and pending re-arm.
    pub fn stop(&mut self) -> Option<Event> {
        match self.state {
            SchedulerState::Running => {
                self.state = SchedulerState::Stopped;
                for slot in &mut self.slots {
                    slot.reset();
                }
                Some(Event::SchedulerStopped { at: Utc::now() })
            }
            SchedulerState::Stopped => None, // Already stopped.
        }
    }

    /// Advance every running countdown by one second.
    ///
    /// A slot reaching zero plays one sound from its category (when
    /// enabled) and enters the re-arm delay; a slot finishing the delay
    /// begins a fresh countdown. Sink failures are logged and reported
    /// via `notified: false` - they never stop the scheduler.
    pub fn tick(&mut self) -> Vec<Event> {
        if self.state != SchedulerState::Running {
            return Vec::new();
        }
        self.ticks += 1;
        let mut events = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            match slot.phase {
                SlotPhase::Counting { remaining_secs } => {
                    let remaining = remaining_secs.saturating_sub(1);
                    if remaining == 0 {
                        let category = slot.config.category;
                        let enabled = slot.config.enabled;
                        let notified = if enabled {
                            match self.sink.play(category, slot.config.volume) {
                                Ok(()) => true,
                                Err(e) => {
                                    warn!(slot = index, %category, error = %e, "notification failed");
                                    false
                                }
                            }
                        } else {
                            debug!(slot = index, %category, "slot disabled, skipping sound");
                            false
                        };
                        slot.phase = SlotPhase::RearmPending {
                            delay_secs: REARM_DELAY_SECS,
                        };
                        events.push(Event::SlotExpired {
                            slot_index: index,
                            category,
                            enabled,
                            notified,
                            at: Utc::now(),
                        });
                    } else {
                        slot.phase = SlotPhase::Counting {
                            remaining_secs: remaining,
                        };
                    }
                }
                SlotPhase::RearmPending { delay_secs } => {
                    let delay = delay_secs.saturating_sub(1);
                    if delay == 0 {
                        slot.arm();
                        events.push(Event::SlotRearmed {
                            slot_index: index,
                            category: slot.config.category,
                            remaining_secs: slot.config.duration_secs(),
                            at: Utc::now(),
                        });
                    } else {
                        slot.phase = SlotPhase::RearmPending { delay_secs: delay };
                    }
                }
                // Armed slots only exist while stopped.
                SlotPhase::Armed => {}
            }
        }
        events
    }

    // ── Slot edits (stopped only) ────────────────────────────────────

    /// Change a slot's countdown duration. Takes effect on the next start.
    pub fn set_duration(&mut self, index: usize, minutes: f64) -> Result<(), ValidationError> {
        SlotConfig::validate_duration(minutes)?;
        self.slot_checked_mut(index)?.config.duration_min = minutes;
        Ok(())
    }

    /// Enable or disable a slot's sound on expiry.
    pub fn set_enabled(&mut self, index: usize, enabled: bool) -> Result<(), ValidationError> {
        self.slot_checked_mut(index)?.config.enabled = enabled;
        Ok(())
    }

    /// Change a slot's playback volume.
    pub fn set_volume(&mut self, index: usize, volume: f32) -> Result<(), ValidationError> {
        SlotConfig::validate_volume(volume)?;
        self.slot_checked_mut(index)?.config.volume = volume;
        Ok(())
    }

    /// Change which sound category a slot plays.
    pub fn set_category(
        &mut self,
        index: usize,
        category: SoundCategory,
    ) -> Result<(), ValidationError> {
        self.slot_checked_mut(index)?.config.category = category;
        Ok(())
    }

    /// Settings are frozen while running: reject the edit unless the
    /// scheduler is stopped, then bounds-check the slot index.
    fn slot_checked_mut(&mut self, index: usize) -> Result<&mut Slot, ValidationError> {
        if self.state == SchedulerState::Running {
            return Err(ValidationError::SchedulerRunning);
        }
        let len = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(ValidationError::SlotOutOfRange { index, len })
    }
}
