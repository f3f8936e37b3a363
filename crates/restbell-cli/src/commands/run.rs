use clap::Args;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use restbell_core::{
    format_mmss, runner, storage, Config, DesktopNotifier, Event, NotificationSink, NullSink,
    RodioSink, Scheduler, SoundBank, SoundCategory,
};

#[derive(Args)]
pub struct RunArgs {
    /// Stop after this many minutes (default: run until Ctrl+C)
    #[arg(long = "for", value_name = "MINUTES")]
    for_minutes: Option<u64>,
    /// Tick without playing any sound
    #[arg(long)]
    silent: bool,
    /// Fixed RNG seed for clip choice (overrides the config)
    #[arg(long)]
    seed: Option<u64>,
    /// Print a status line for every tick, not just event JSON
    #[arg(long)]
    watch: bool,
}

pub async fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    let sink: Box<dyn NotificationSink> = if args.silent {
        Box::new(NullSink::new())
    } else {
        let base = storage::data_dir()?;
        let bank = SoundBank::load(&config.sounds, &base);
        for category in SoundCategory::ALL {
            debug!(%category, clips = bank.clip_count(category), "sound bank loaded");
        }
        Box::new(RodioSink::new(
            bank,
            args.seed.or(config.notifications.seed),
            config.notifications.fallback_chime,
        ))
    };

    let mut scheduler = Scheduler::new(config.slots.clone(), sink)?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let desktop = config.notifications.desktop.then(DesktopNotifier::new);
    let max_ticks = args.for_minutes.map(|m| m * 60);
    let watch_mode = args.watch;

    runner::run(
        &mut scheduler,
        shutdown_rx,
        max_ticks,
        |scheduler, events| {
            for event in events {
                match serde_json::to_string(event) {
                    Ok(line) => println!("{line}"),
                    Err(e) => warn!(error = %e, "cannot serialize event"),
                }
                if let Event::SlotExpired {
                    category,
                    enabled: true,
                    ..
                } = event
                {
                    if let Some(notifier) = desktop.clone() {
                        let category = *category;
                        tokio::task::spawn_blocking(move || {
                            if let Err(e) = notifier.notify(category) {
                                debug!(error = %e, "desktop notification failed");
                            }
                        });
                    }
                }
            }
            if watch_mode {
                println!("{}", status_line(scheduler));
            }
        },
    )
    .await;

    println!("{}", serde_json::to_string_pretty(&scheduler.snapshot())?);
    Ok(())
}

/// One-line view of every slot, mirroring the countdown displays.
fn status_line(scheduler: &Scheduler) -> String {
    let cells: Vec<String> = scheduler
        .slots()
        .iter()
        .map(|slot| {
            let marker = if slot.config.enabled { "" } else { " (off)" };
            format!(
                "{} {}{marker}",
                slot.config.category,
                format_mmss(slot.remaining_display_secs())
            )
        })
        .collect();
    format!("[{:>6}] {}", scheduler.ticks(), cells.join(" | "))
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received terminate signal, shutting down"),
    }
}
