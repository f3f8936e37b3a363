//! Core error types for restbell-core.
//!
//! This module defines the error hierarchy using thiserror. Nothing in
//! here is fatal to a running scheduler: playback and notification
//! failures are logged at the call site and the remaining slots keep
//! ticking.

use std::path::PathBuf;
use thiserror::Error;

use crate::sound::SoundCategory;

/// Core error type for restbell-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Sound selection and playback errors
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to create the configuration directory
    #[error("Failed to create configuration directory {path}: {message}")]
    DirFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key in a get/set request
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Sound bank and playback errors.
///
/// Per-expiry playback failures are logged by the scheduler and never
/// interrupt ticking.
#[derive(Error, Debug)]
pub enum AudioError {
    /// Category is not present in the sound bank at all
    #[error("No sounds configured for category '{category}'")]
    UnknownCategory { category: SoundCategory },

    /// Category is configured but none of its clips could be loaded
    #[error("No playable clips loaded for category '{category}'")]
    EmptyCategory { category: SoundCategory },

    /// No audio output device available
    #[error("Audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// A clip could not be decoded
    #[error("Failed to decode clip '{name}': {message}")]
    DecodeFailed { name: String, message: String },

    /// Playback was rejected by the environment
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}

impl AudioError {
    /// True when the failure is "no clips to choose from" rather than a
    /// hardware or decode problem.
    pub fn is_missing_clips(&self) -> bool {
        matches!(
            self,
            Self::UnknownCategory { .. } | Self::EmptyCategory { .. }
        )
    }
}

/// Validation errors for slot edits.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Duration outside the accepted range
    #[error("Invalid duration {minutes} min: must be within (0, 60] and at least one second")]
    InvalidDuration { minutes: f64 },

    /// Duration argument that is neither decimal minutes nor MM:SS
    #[error("Cannot parse duration '{input}': expected minutes (e.g. 12.5) or MM:SS (e.g. 12:30)")]
    DurationParse { input: String },

    /// Volume outside [0, 1]
    #[error("Invalid volume {value}: must be within [0, 1]")]
    InvalidVolume { value: f32 },

    /// Slot edits are only permitted while the scheduler is stopped
    #[error("Slot settings cannot be changed while the scheduler is running")]
    SchedulerRunning,

    /// Slot index out of range
    #[error("Slot index {index} out of range (slot count: {len})")]
    SlotOutOfRange { index: usize, len: usize },

    /// Unrecognized sound category name
    #[error("Unknown sound category '{name}' (expected one of: eye, sit, drinkwater, warm, history)")]
    UnknownCategory { name: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
