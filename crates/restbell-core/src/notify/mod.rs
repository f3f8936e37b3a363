//! Notification sinks.
//!
//! The scheduler reports expiries through the [`NotificationSink`] trait
//! instead of touching audio directly, so the delivery mechanism can be
//! swapped: rodio playback for real runs, a null sink for silent runs,
//! recording fakes for tests.

mod desktop;
mod rodio;

pub use self::desktop::{DesktopNotifier, NotifyError};
pub use self::rodio::RodioSink;

use crate::error::AudioError;
use crate::sound::SoundCategory;

/// Outlet for expired-slot notifications.
pub trait NotificationSink: Send + Sync {
    /// Deliver one reminder for `category` at `volume` (within [0, 1]).
    ///
    /// Must return promptly - the scheduler calls this from its tick
    /// path, so implementations hand long-running playback to their own
    /// thread. An `Err` marks the expiry as unnotified; it never stops
    /// the scheduler.
    fn play(&self, category: SoundCategory, volume: f32) -> Result<(), AudioError>;
}

/// Sink that drops every notification. Used for `run --silent`.
pub struct NullSink;

impl NullSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for NullSink {
    fn play(&self, _category: SoundCategory, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }
}
