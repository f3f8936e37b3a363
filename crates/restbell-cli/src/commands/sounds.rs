use clap::Subcommand;

use restbell_core::{storage, Config, SoundBank, SoundCategory};

#[derive(Subcommand)]
pub enum SoundsAction {
    /// Show every configured clip and whether it loads
    List,
}

pub fn run(action: SoundsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SoundsAction::List => {
            let config = Config::load()?;
            let base = storage::data_dir()?;
            let bank = SoundBank::load(&config.sounds, &base);
            for category in SoundCategory::ALL {
                let files = config.sounds.files(category);
                println!(
                    "{category} - {}: {} of {} loaded",
                    category.label(),
                    bank.clip_count(category),
                    files.len()
                );
                for path in files {
                    let resolved = if path.is_absolute() {
                        path.clone()
                    } else {
                        base.join(path)
                    };
                    let marker = if resolved.is_file() { "ok     " } else { "missing" };
                    println!("  [{marker}] {}", path.display());
                }
            }
        }
    }
    Ok(())
}
