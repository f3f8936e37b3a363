//! Rodio-based notification sink.
//!
//! Plays preloaded clips from memory. Playback runs on a detached
//! thread so the tick loop never waits on audio hardware; in-thread
//! failures are logged and dropped.

use std::io::Cursor;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, Sink};
use tracing::{debug, warn};

use super::NotificationSink;
use crate::error::AudioError;
use crate::sound::{Clip, SoundBank, SoundCategory};

/// Notification sink backed by rodio and a preloaded [`SoundBank`].
pub struct RodioSink {
    bank: SoundBank,
    rng: Mutex<Mcg128Xsl64>,
    /// Play a synthesized chime instead of failing when a category has
    /// no usable clips.
    fallback_chime: bool,
}

impl RodioSink {
    /// A fixed `seed` makes the clip choice sequence reproducible;
    /// `None` seeds from entropy.
    pub fn new(bank: SoundBank, seed: Option<u64>, fallback_chime: bool) -> Self {
        let rng = match seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Self {
            bank,
            rng: Mutex::new(rng),
            fallback_chime,
        }
    }

    pub fn bank(&self) -> &SoundBank {
        &self.bank
    }

    /// Play one clip synchronously and report what was played. The
    /// `test` command uses this so the process outlives the sound.
    pub fn play_blocking(
        &self,
        category: SoundCategory,
        volume: f32,
    ) -> Result<String, AudioError> {
        let volume = volume.clamp(0.0, 1.0);
        match self.pick(category) {
            Ok(clip) => {
                play_clip_sync(&clip, volume)?;
                Ok(clip.name().to_string())
            }
            Err(e) if self.fallback_chime && e.is_missing_clips() => {
                play_chime_sync(volume)?;
                Ok("chime".to_string())
            }
            Err(e) => Err(e),
        }
    }

    fn pick(&self, category: SoundCategory) -> Result<Clip, AudioError> {
        let mut rng = self.rng.lock().unwrap_or_else(|p| p.into_inner());
        self.bank.pick(category, &mut *rng).cloned()
    }
}

impl NotificationSink for RodioSink {
    fn play(&self, category: SoundCategory, volume: f32) -> Result<(), AudioError> {
        let volume = volume.clamp(0.0, 1.0);
        match self.pick(category) {
            Ok(clip) => {
                debug!(%category, clip = clip.name(), "dispatching clip");
                thread::spawn(move || {
                    if let Err(e) = play_clip_sync(&clip, volume) {
                        warn!(clip = clip.name(), error = %e, "clip playback failed");
                    }
                });
                Ok(())
            }
            Err(e) if self.fallback_chime && e.is_missing_clips() => {
                debug!(%category, error = %e, "no clips, falling back to chime");
                thread::spawn(move || {
                    if let Err(e) = play_chime_sync(volume) {
                        warn!(error = %e, "chime playback failed");
                    }
                });
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

/// Decode one clip from memory and play it start to finish.
fn play_clip_sync(clip: &Clip, volume: f32) -> Result<(), AudioError> {
    let (_stream, stream_handle) = OutputStream::try_default()
        .map_err(|e| AudioError::DeviceNotAvailable(e.to_string()))?;
    let sink =
        Sink::try_new(&stream_handle).map_err(|e| AudioError::PlaybackFailed(e.to_string()))?;
    let source = Decoder::new(Cursor::new(clip.bytes())).map_err(|e| AudioError::DecodeFailed {
        name: clip.name().to_string(),
        message: e.to_string(),
    })?;
    sink.set_volume(volume);
    sink.append(source);
    sink.sleep_until_end();
    Ok(())
}

/// Ascending two-tone chime: C5 -> E5.
fn play_chime_sync(volume: f32) -> Result<(), AudioError> {
    let (_stream, stream_handle) = OutputStream::try_default()
        .map_err(|e| AudioError::DeviceNotAvailable(e.to_string()))?;
    let sink =
        Sink::try_new(&stream_handle).map_err(|e| AudioError::PlaybackFailed(e.to_string()))?;
    sink.set_volume(volume);
    sink.append(gentle_tone(523.0, 150));
    sink.append(gentle_tone(659.0, 200));
    sink.sleep_until_end();
    Ok(())
}

/// Sine tone with a short fade-in so the chime does not click.
fn gentle_tone(freq: f32, duration_ms: u64) -> impl Source<Item = f32> + Send {
    let fade_ms = (duration_ms / 5).min(30);
    SineWave::new(freq)
        .take_duration(Duration::from_millis(duration_ms))
        .fade_in(Duration::from_millis(fade_ms))
        .amplify(0.3)
}
