//! Sound categories, the static sound table, and the preloaded bank.
//!
//! Each reminder slot points at one [`SoundCategory`]; a category maps to
//! an ordered list of audio files (the [`SoundTable`], part of the
//! configuration). At startup the table is preloaded into an in-memory
//! [`SoundBank`] so expiry playback never touches the disk. Expiry picks
//! one clip from the slot's category uniformly at random.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AudioError, ValidationError};

/// The closed set of reminder sound categories.
///
/// Mirrors the five reminder types of the sound table: rest your eyes,
/// stand up from sitting, drink water, warm up, and a history-listening
/// break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCategory {
    Eye,
    Sit,
    DrinkWater,
    Warm,
    History,
}

impl SoundCategory {
    /// All categories, in sound-table order.
    pub const ALL: [SoundCategory; 5] = [
        SoundCategory::Eye,
        SoundCategory::Sit,
        SoundCategory::DrinkWater,
        SoundCategory::Warm,
        SoundCategory::History,
    ];

    /// The configuration key for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            SoundCategory::Eye => "eye",
            SoundCategory::Sit => "sit",
            SoundCategory::DrinkWater => "drinkwater",
            SoundCategory::Warm => "warm",
            SoundCategory::History => "history",
        }
    }

    /// Human-readable reminder message, used for desktop notifications.
    pub fn label(self) -> &'static str {
        match self {
            SoundCategory::Eye => "Rest your eyes",
            SoundCategory::Sit => "Stand up and move around",
            SoundCategory::DrinkWater => "Drink some water",
            SoundCategory::Warm => "Warm up your body",
            SoundCategory::History => "Time for a history break",
        }
    }
}

impl fmt::Display for SoundCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoundCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eye" => Ok(SoundCategory::Eye),
            "sit" => Ok(SoundCategory::Sit),
            "drinkwater" => Ok(SoundCategory::DrinkWater),
            "warm" => Ok(SoundCategory::Warm),
            "history" => Ok(SoundCategory::History),
            other => Err(ValidationError::UnknownCategory {
                name: other.to_string(),
            }),
        }
    }
}

/// Static mapping from category to its ordered list of audio files.
///
/// Relative paths are resolved against the configuration directory when
/// the bank is loaded. Serialized as the `[sounds]` config section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundTable {
    #[serde(default)]
    pub eye: Vec<PathBuf>,
    #[serde(default)]
    pub sit: Vec<PathBuf>,
    #[serde(default)]
    pub drinkwater: Vec<PathBuf>,
    #[serde(default)]
    pub warm: Vec<PathBuf>,
    #[serde(default)]
    pub history: Vec<PathBuf>,
}

impl SoundTable {
    /// Files configured for `category`, in table order.
    pub fn files(&self, category: SoundCategory) -> &[PathBuf] {
        match category {
            SoundCategory::Eye => &self.eye,
            SoundCategory::Sit => &self.sit,
            SoundCategory::DrinkWater => &self.drinkwater,
            SoundCategory::Warm => &self.warm,
            SoundCategory::History => &self.history,
        }
    }
}

impl Default for SoundTable {
    /// The conventional layout: `sounds/<category>/<category>N.m4a`
    /// under the configuration directory.
    fn default() -> Self {
        fn paths(category: &str, count: usize) -> Vec<PathBuf> {
            (1..=count)
                .map(|i| PathBuf::from(format!("sounds/{category}/{category}{i}.m4a")))
                .collect()
        }
        Self {
            eye: paths("eye", 2),
            sit: paths("sit", 2),
            drinkwater: paths("drinkwater", 3),
            warm: paths("warm", 2),
            history: paths("history", 4),
        }
    }
}

/// One preloaded audio clip.
///
/// Bytes are shared so a clip can be handed to a playback thread without
/// copying.
#[derive(Clone)]
pub struct Clip {
    name: String,
    bytes: Arc<[u8]>,
}

impl Clip {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }
}

impl fmt::Debug for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clip")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// In-memory store of preloaded clips, keyed by category.
#[derive(Debug, Clone, Default)]
pub struct SoundBank {
    clips: HashMap<SoundCategory, Vec<Clip>>,
}

impl SoundBank {
    /// Preload every file listed in `table` into memory.
    ///
    /// Relative paths are resolved against `base`. Unreadable files are
    /// logged and skipped; a category whose files all fail to load ends
    /// up present but empty, and a category with no files listed is
    /// absent from the bank entirely. Neither case is fatal here -- it
    /// surfaces as an [`AudioError`] when a pick is attempted.
    pub fn load(table: &SoundTable, base: &Path) -> Self {
        let mut clips: HashMap<SoundCategory, Vec<Clip>> = HashMap::new();
        for category in SoundCategory::ALL {
            let files = table.files(category);
            if files.is_empty() {
                continue;
            }
            let loaded = clips.entry(category).or_default();
            for file in files {
                let path = if file.is_absolute() {
                    file.clone()
                } else {
                    base.join(file)
                };
                match std::fs::read(&path) {
                    Ok(bytes) => {
                        let name = path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_else(|| path.display().to_string());
                        loaded.push(Clip::new(name, bytes));
                    }
                    Err(e) => {
                        warn!(category = %category, path = %path.display(), error = %e,
                              "skipping unreadable sound file");
                    }
                }
            }
        }
        Self { clips }
    }

    /// Add a clip directly. Used by tests and by callers that source
    /// clips from somewhere other than the file table.
    pub fn insert_clip(&mut self, category: SoundCategory, clip: Clip) {
        self.clips.entry(category).or_default().push(clip);
    }

    /// Clips loaded for `category`.
    pub fn clips(&self, category: SoundCategory) -> &[Clip] {
        self.clips.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of playable clips for `category`.
    pub fn clip_count(&self, category: SoundCategory) -> usize {
        self.clips(category).len()
    }

    /// Select one clip for `category` uniformly at random.
    pub fn pick<R: Rng>(&self, category: SoundCategory, rng: &mut R) -> Result<&Clip, AudioError> {
        match self.clips.get(&category) {
            None => Err(AudioError::UnknownCategory { category }),
            Some(clips) if clips.is_empty() => Err(AudioError::EmptyCategory { category }),
            Some(clips) => Ok(&clips[rng.gen_range(0..clips.len())]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    fn bank_with(category: SoundCategory, names: &[&str]) -> SoundBank {
        let mut bank = SoundBank::default();
        for name in names {
            bank.insert_clip(category, Clip::new(*name, vec![0u8; 4]));
        }
        bank
    }

    #[test]
    fn category_from_str_roundtrip() {
        for category in SoundCategory::ALL {
            assert_eq!(category.as_str().parse::<SoundCategory>().unwrap(), category);
        }
    }

    #[test]
    fn category_from_str_rejects_unknown() {
        let err = "tea".parse::<SoundCategory>().unwrap_err();
        assert!(matches!(err, ValidationError::UnknownCategory { ref name } if name == "tea"));
    }

    #[test]
    fn default_table_lists_all_categories() {
        let table = SoundTable::default();
        for category in SoundCategory::ALL {
            assert!(!table.files(category).is_empty());
        }
        assert_eq!(table.files(SoundCategory::DrinkWater).len(), 3);
    }

    #[test]
    fn pick_unknown_category_errors() {
        let bank = SoundBank::default();
        let mut rng = Mcg128Xsl64::seed_from_u64(1);
        let err = bank.pick(SoundCategory::Eye, &mut rng).unwrap_err();
        assert!(matches!(err, AudioError::UnknownCategory { .. }));
    }

    #[test]
    fn pick_empty_category_errors() {
        let mut bank = SoundBank::default();
        bank.insert_clip(SoundCategory::Eye, Clip::new("only", vec![]));
        bank.clips.get_mut(&SoundCategory::Eye).unwrap().clear();
        let mut rng = Mcg128Xsl64::seed_from_u64(1);
        let err = bank.pick(SoundCategory::Eye, &mut rng).unwrap_err();
        assert!(matches!(err, AudioError::EmptyCategory { .. }));
    }

    #[test]
    fn pick_is_deterministic_for_a_seed() {
        let bank = bank_with(SoundCategory::Sit, &["a", "b", "c", "d"]);
        let sequence = |seed: u64| -> Vec<String> {
            let mut rng = Mcg128Xsl64::seed_from_u64(seed);
            (0..16)
                .map(|_| bank.pick(SoundCategory::Sit, &mut rng).unwrap().name().to_string())
                .collect()
        };
        assert_eq!(sequence(7), sequence(7));
    }

    #[test]
    fn pick_reaches_every_clip() {
        let bank = bank_with(SoundCategory::Warm, &["a", "b", "c"]);
        let mut rng = Mcg128Xsl64::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(bank.pick(SoundCategory::Warm, &mut rng).unwrap().name().to_string());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn load_skips_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("sounds/eye")).unwrap();
        std::fs::write(dir.path().join("sounds/eye/eye1.m4a"), b"data").unwrap();

        let table = SoundTable {
            eye: vec![
                PathBuf::from("sounds/eye/eye1.m4a"),
                PathBuf::from("sounds/eye/eye2.m4a"),
            ],
            sit: Vec::new(),
            drinkwater: Vec::new(),
            warm: Vec::new(),
            history: Vec::new(),
        };
        let bank = SoundBank::load(&table, dir.path());
        assert_eq!(bank.clip_count(SoundCategory::Eye), 1);
        assert_eq!(bank.clips(SoundCategory::Eye)[0].name(), "eye1.m4a");
        // Listed but nothing loaded is distinct from not listed at all.
        let mut rng = Mcg128Xsl64::seed_from_u64(1);
        assert!(matches!(
            bank.pick(SoundCategory::Sit, &mut rng),
            Err(AudioError::UnknownCategory { .. })
        ));
    }
}
