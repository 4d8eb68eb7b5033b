//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use pos_watch::{
    cli::{Commands, PosWatch},
    commands::{
        export_games::{handle_export_games, ExportGamesParams},
        export_innings::{handle_export_innings, ExportInningsParams},
        notify::{handle_notify, NotifyParams},
    },
    Result, Thresholds,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to initialize trace");

    let app = PosWatch::parse();

    match app.command {
        Commands::Export {
            scan,
            file,
            start_inning,
        } => {
            handle_export_games(ExportGamesParams {
                days: scan.days,
                file,
                thresholds: Thresholds {
                    start_inning,
                    run_threshold: scan.run_threshold,
                },
                snapshot_roster: scan.snapshot_roster,
            })
            .await?
        }

        Commands::ExportInnings {
            scan,
            file,
            start_inning,
        } => {
            handle_export_innings(ExportInningsParams {
                days: scan.days,
                file,
                thresholds: Thresholds {
                    start_inning,
                    run_threshold: scan.run_threshold,
                },
                snapshot_roster: scan.snapshot_roster,
            })
            .await?
        }

        Commands::Notify {
            from,
            to,
            smtp_host,
            interval_secs,
            start_inning,
            run_threshold,
            ttl_hours,
        } => {
            handle_notify(NotifyParams {
                from,
                to,
                smtp_host,
                interval_secs,
                thresholds: Thresholds {
                    start_inning,
                    run_threshold,
                },
                ttl_hours,
            })
            .await?
        }
    }

    Ok(())
}
