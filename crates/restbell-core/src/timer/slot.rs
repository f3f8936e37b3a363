//! Reminder slot configuration and the per-slot countdown state machine.
//!
//! A slot is one configured reminder (sound category, enabled flag,
//! volume, duration). While the scheduler runs, each slot cycles
//! independently through `Counting -> expiry -> RearmPending -> Counting`;
//! stopping the scheduler returns every slot to `Armed` with its
//! configured duration on display.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::sound::SoundCategory;

/// Upper bound on a slot duration, in minutes.
pub const MAX_DURATION_MIN: f64 = 60.0;

fn default_enabled() -> bool {
    true
}
fn default_volume() -> f32 {
    0.5
}
fn default_duration_min() -> f64 {
    20.0
}

/// User-editable settings for one reminder slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotConfig {
    /// Sound category played on expiry.
    pub category: SoundCategory,
    /// When false, expiry stays silent but the slot still re-arms.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Playback volume in [0, 1].
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Countdown duration in minutes, within (0, 60].
    #[serde(default = "default_duration_min")]
    pub duration_min: f64,
}

impl SlotConfig {
    pub fn new(category: SoundCategory, duration_min: f64) -> Self {
        Self {
            category,
            enabled: default_enabled(),
            volume: default_volume(),
            duration_min,
        }
    }

    /// Configured duration in whole seconds (what the countdown starts from).
    pub fn duration_secs(&self) -> u64 {
        ((self.duration_min * 60.0).round() as u64).max(1)
    }

    /// Check a duration edit: must be within (0, 60] minutes and round to
    /// at least one second.
    pub fn validate_duration(minutes: f64) -> Result<(), ValidationError> {
        if !(minutes > 0.0) || minutes > MAX_DURATION_MIN || (minutes * 60.0).round() < 1.0 {
            return Err(ValidationError::InvalidDuration { minutes });
        }
        Ok(())
    }

    /// Check a volume edit: must be within [0, 1].
    pub fn validate_volume(value: f32) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::InvalidVolume { value });
        }
        Ok(())
    }
}

/// Where a slot is in its countdown cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotPhase {
    /// Scheduler stopped; the configured duration is on display.
    Armed,
    /// Counting down one second per tick.
    Counting { remaining_secs: u64 },
    /// Expired; waiting out the fixed re-arm delay.
    RearmPending { delay_secs: u64 },
}

/// One reminder slot: its settings plus its countdown state.
#[derive(Debug, Clone)]
pub struct Slot {
    pub config: SlotConfig,
    pub(crate) phase: SlotPhase,
}

impl Slot {
    pub fn new(config: SlotConfig) -> Self {
        Self {
            config,
            phase: SlotPhase::Armed,
        }
    }

    pub fn phase(&self) -> SlotPhase {
        self.phase
    }

    /// Begin a fresh countdown from the configured duration.
    pub(crate) fn arm(&mut self) {
        self.phase = SlotPhase::Counting {
            remaining_secs: self.config.duration_secs(),
        };
    }

    /// Back to the stopped shape: countdown cancelled, display reset.
    pub(crate) fn reset(&mut self) {
        self.phase = SlotPhase::Armed;
    }

    /// Seconds shown for this slot: the live countdown while counting,
    /// the configured duration while stopped, and zero while waiting to
    /// re-arm (the countdown sits at 00:00 until the cycle restarts).
    pub fn remaining_display_secs(&self) -> u64 {
        match self.phase {
            SlotPhase::Armed => self.config.duration_secs(),
            SlotPhase::Counting { remaining_secs } => remaining_secs,
            SlotPhase::RearmPending { .. } => 0,
        }
    }
}

/// Zero-padded `MM:SS` rendering of a second count.
pub fn format_mmss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Parse a duration argument: either decimal minutes (`12.5`) or
/// `MM:SS` (`12:30`).
pub fn parse_duration_min(input: &str) -> Result<f64, ValidationError> {
    let parse_err = || ValidationError::DurationParse {
        input: input.to_string(),
    };
    let minutes = if let Some((m, s)) = input.split_once(':') {
        let m: u64 = m.parse().map_err(|_| parse_err())?;
        let s: u64 = s.parse().map_err(|_| parse_err())?;
        if s > 59 {
            return Err(parse_err());
        }
        m as f64 + s as f64 / 60.0
    } else {
        input.parse::<f64>().map_err(|_| parse_err())?
    };
    SlotConfig::validate_duration(minutes)?;
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_secs_rounds_fractional_minutes() {
        let slot = SlotConfig::new(SoundCategory::Eye, 0.05);
        assert_eq!(slot.duration_secs(), 3);
        let slot = SlotConfig::new(SoundCategory::Eye, 12.5);
        assert_eq!(slot.duration_secs(), 750);
    }

    #[test]
    fn validate_duration_bounds() {
        assert!(SlotConfig::validate_duration(0.05).is_ok());
        assert!(SlotConfig::validate_duration(60.0).is_ok());
        assert!(SlotConfig::validate_duration(0.0).is_err());
        assert!(SlotConfig::validate_duration(-1.0).is_err());
        assert!(SlotConfig::validate_duration(60.01).is_err());
        // Rounds to zero seconds.
        assert!(SlotConfig::validate_duration(0.005).is_err());
        assert!(SlotConfig::validate_duration(f64::NAN).is_err());
    }

    #[test]
    fn validate_volume_bounds() {
        assert!(SlotConfig::validate_volume(0.0).is_ok());
        assert!(SlotConfig::validate_volume(1.0).is_ok());
        assert!(SlotConfig::validate_volume(-0.1).is_err());
        assert!(SlotConfig::validate_volume(1.1).is_err());
        assert!(SlotConfig::validate_volume(f32::NAN).is_err());
    }

    #[test]
    fn display_secs_tracks_phase() {
        let mut slot = Slot::new(SlotConfig::new(SoundCategory::Sit, 1.0));
        assert_eq!(slot.remaining_display_secs(), 60);
        slot.arm();
        assert_eq!(slot.remaining_display_secs(), 60);
        slot.phase = SlotPhase::Counting { remaining_secs: 42 };
        assert_eq!(slot.remaining_display_secs(), 42);
        slot.phase = SlotPhase::RearmPending { delay_secs: 5 };
        assert_eq!(slot.remaining_display_secs(), 0);
        slot.reset();
        assert_eq!(slot.remaining_display_secs(), 60);
    }

    #[test]
    fn format_mmss_pads() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(3), "00:03");
        assert_eq!(format_mmss(750), "12:30");
        assert_eq!(format_mmss(3600), "60:00");
    }

    #[test]
    fn parse_duration_accepts_both_forms() {
        assert_eq!(parse_duration_min("12:30").unwrap(), 12.5);
        assert_eq!(parse_duration_min("0:03").unwrap(), 0.05);
        assert_eq!(parse_duration_min("20").unwrap(), 20.0);
        assert_eq!(parse_duration_min("0.05").unwrap(), 0.05);
    }

    #[test]
    fn parse_duration_rejects_garbage_and_out_of_range() {
        assert!(parse_duration_min("abc").is_err());
        assert!(parse_duration_min("12:61").is_err());
        assert!(parse_duration_min("0").is_err());
        assert!(parse_duration_min("61").is_err());
        assert!(parse_duration_min("").is_err());
    }
}
