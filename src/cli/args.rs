//! CLI argument definitions and parsing structures.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Common scan arguments shared by the CSV exporters
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Lookback window in days, ending today.
    #[clap(long, short, default_value_t = 30)]
    pub days: i64,

    /// Run differential that marks a blowout.
    #[clap(long, default_value_t = 8)]
    pub run_threshold: i64,

    /// Classify position players from the bundled roster snapshot instead
    /// of live player lookups (offline-friendly).
    #[clap(long)]
    pub snapshot_roster: bool,
}

#[derive(Debug, Parser)]
#[clap(
    name = "pos-watch",
    about = "Tracks blowout games and position players pressed into pitching"
)]
pub struct PosWatch {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export one CSV row per blowout or position-player game.
    ///
    /// Scans finished games in the lookback window, reconstructs inning
    /// state from the linescore and boxscore, and writes qualifying games.
    Export {
        #[clap(flatten)]
        scan: ScanArgs,

        /// Output CSV path.
        #[clap(long, short, default_value = "games.csv")]
        file: PathBuf,

        /// First checkpoint inning for score and pitcher snapshots.
        #[clap(long, default_value_t = 6)]
        start_inning: u8,
    },

    /// Export one CSV row per half-inning that began at blowout margin.
    ///
    /// Regular-season games only; each row records who was batting, the
    /// pre-half differential, runs scored, and whether a position player
    /// started the half pitching.
    ExportInnings {
        #[clap(flatten)]
        scan: ScanArgs,

        /// Output CSV path.
        #[clap(long, short, default_value = "innings.csv")]
        file: PathBuf,

        /// First inning eligible for half-inning rows.
        #[clap(long, default_value_t = 7)]
        start_inning: u8,
    },

    /// Poll today's games and email a one-time alert per blowout.
    Notify {
        /// Sender address (also the SMTP username; password comes from
        /// the `POS_WATCH_SMTP_PASSWORD` env var).
        #[clap(long)]
        from: String,

        /// Recipient address (repeatable): `--to a@x.org --to b@y.org`.
        #[clap(long = "to", required = true)]
        to: Vec<String>,

        /// SMTP relay host.
        #[clap(long, default_value = "smtp.gmail.com")]
        smtp_host: String,

        /// Seconds between schedule polls.
        #[clap(long, default_value_t = 60)]
        interval_secs: u64,

        /// Earliest inning worth alerting on.
        #[clap(long, default_value_t = 6)]
        start_inning: u8,

        /// Run differential that marks a blowout.
        #[clap(long, default_value_t = 8)]
        run_threshold: i64,

        /// Hours before a notified game becomes alertable again.
        #[clap(long, default_value_t = 24)]
        ttl_hours: u64,
    },
}
