use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "restbell", version, about = "Restbell CLI - periodic wellness reminders")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reminder scheduler in the foreground
    Run(commands::run::RunArgs),
    /// Inspect and edit reminder slots
    Slot {
        #[command(subcommand)]
        action: commands::slot::SlotAction,
    },
    /// Play one sound from a slot's category, exactly as an expiry would
    Test {
        /// Slot index (see `slot list`)
        index: usize,
    },
    /// Inspect the configured sound files
    Sounds {
        #[command(subcommand)]
        action: commands::sounds::SoundsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout is reserved for command output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "restbell=info,restbell_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args).await,
        Commands::Slot { action } => commands::slot::run(action),
        Commands::Test { index } => commands::test::run(index),
        Commands::Sounds { action } => commands::sounds::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
