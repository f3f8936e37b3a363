//! Desktop toast notifications via notify-rust.
//!
//! Off by default; enabled with `notifications.desktop = true` in the
//! config file. Toasts ride alongside the sound sink - they are a
//! second delivery channel, not a replacement.

use notify_rust::Notification;
use thiserror::Error;

use crate::sound::SoundCategory;

#[derive(Debug, Clone, Error)]
pub enum NotifyError {
    #[error("Failed to show notification: {0}")]
    ShowFailed(String),
}

/// Cross-platform desktop notifier.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self {
            app_name: "restbell".to_string(),
        }
    }

    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    /// Show a toast for an expired slot. Can block briefly on the
    /// platform notification bus, so call it off the tick loop.
    pub fn notify(&self, category: SoundCategory) -> Result<(), NotifyError> {
        Notification::new()
            .appname(&self.app_name)
            .summary("Break time")
            .body(category.label())
            .icon("appointment-soon")
            .show()
            .map_err(|e| NotifyError::ShowFailed(e.to_string()))?;
        Ok(())
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}
