use clap::Subcommand;

use restbell_core::{
    format_mmss, parse_duration_min, Config, SlotConfig, SoundCategory, ValidationError,
};

#[derive(Subcommand)]
pub enum SlotAction {
    /// List reminder slots
    List {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Edit one slot's settings (takes effect on the next run)
    Set {
        /// Slot index (see `slot list`)
        index: usize,
        /// Countdown duration: minutes or MM:SS
        #[arg(long)]
        duration: Option<String>,
        /// Enable or disable the sound on expiry
        #[arg(long)]
        enabled: Option<bool>,
        /// Playback volume in [0, 1]
        #[arg(long)]
        volume: Option<f32>,
        /// Sound category (eye, sit, drinkwater, warm, history)
        #[arg(long)]
        category: Option<SoundCategory>,
    },
    /// Append a new slot
    Add {
        /// Sound category
        category: SoundCategory,
        /// Countdown duration: minutes or MM:SS
        #[arg(long, default_value = "20")]
        duration: String,
    },
    /// Remove a slot
    Remove {
        /// Slot index (see `slot list`)
        index: usize,
    },
}

pub fn run(action: SlotAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SlotAction::List { json } => {
            let config = Config::load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config.slots)?);
            } else {
                print_table(&config.slots);
            }
        }
        SlotAction::Set {
            index,
            duration,
            enabled,
            volume,
            category,
        } => {
            let mut config = Config::load()?;
            let len = config.slots.len();
            let slot = config
                .slots
                .get_mut(index)
                .ok_or(ValidationError::SlotOutOfRange { index, len })?;
            if let Some(ref input) = duration {
                slot.duration_min = parse_duration_min(input)?;
            }
            if let Some(enabled) = enabled {
                slot.enabled = enabled;
            }
            if let Some(volume) = volume {
                SlotConfig::validate_volume(volume)?;
                slot.volume = volume;
            }
            if let Some(category) = category {
                slot.category = category;
            }
            config.save()?;
            println!("ok");
        }
        SlotAction::Add { category, duration } => {
            let mut config = Config::load()?;
            let slot = SlotConfig::new(category, parse_duration_min(&duration)?);
            config.slots.push(slot);
            config.save()?;
            println!("added slot {}", config.slots.len() - 1);
        }
        SlotAction::Remove { index } => {
            let mut config = Config::load()?;
            let len = config.slots.len();
            if index >= len {
                return Err(ValidationError::SlotOutOfRange { index, len }.into());
            }
            config.slots.remove(index);
            config.save()?;
            println!("ok");
        }
    }
    Ok(())
}

fn print_table(slots: &[SlotConfig]) {
    println!(
        "{:<5} {:<12} {:<8} {:<8} {:<9}",
        "idx", "category", "enabled", "volume", "duration"
    );
    for (index, slot) in slots.iter().enumerate() {
        println!(
            "{:<5} {:<12} {:<8} {:<8.2} {:<9}",
            index,
            slot.category.to_string(),
            slot.enabled,
            slot.volume,
            format_mmss(slot.duration_secs()),
        );
    }
}
