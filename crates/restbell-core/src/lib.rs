//! # Restbell Core Library
//!
//! This library provides the core logic for restbell, a periodic
//! wellness reminder. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any
//! future GUI being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Scheduler**: A tick-driven state machine over independent
//!   reminder slots; the caller invokes `tick()` once per second and
//!   receives events for every expiry and re-arm
//! - **Sound bank**: Clips preloaded into memory per category, with
//!   seeded uniform-random choice on expiry
//! - **Notification sinks**: Pluggable delivery (rodio playback, null
//!   sink, desktop toasts) behind a small trait
//! - **Storage**: TOML-based configuration under `~/.config/restbell/`
//!
//! ## Key Components
//!
//! - [`Scheduler`]: Slot countdown state machine
//! - [`SoundBank`]: Preloaded clips and random choice
//! - [`NotificationSink`]: Trait the scheduler notifies through
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod notify;
pub mod runner;
pub mod sound;
pub mod storage;
pub mod timer;

pub use error::{AudioError, ConfigError, CoreError, ValidationError};
pub use events::{Event, SlotStatus};
pub use notify::{DesktopNotifier, NotificationSink, NullSink, RodioSink};
pub use sound::{Clip, SoundBank, SoundCategory, SoundTable};
pub use storage::Config;
pub use timer::{
    format_mmss, parse_duration_min, Scheduler, SchedulerState, Slot, SlotConfig, SlotPhase,
    REARM_DELAY_SECS,
};
