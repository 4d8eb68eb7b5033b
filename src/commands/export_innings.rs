//! Half-inning-level CSV export.
//!
//! One row per half-inning that began at blowout margin, across every
//! finished regular-season game in the window.

use std::fs::File;
use std::path::PathBuf;

use tracing::warn;

use crate::commands::date_window;
use crate::commands::export_games::fetch_game_inputs;
use crate::error::Result;
use crate::game::classify::{half_inning_rows, HalfInningRow, Thresholds};
use crate::game::linescore::parse_linescore;
use crate::game::pos::PosClassifier;
use crate::stats::http::StatsClient;
use crate::stats::types::GameSummary;

/// Configuration for the half-inning exporter.
#[derive(Debug)]
pub struct ExportInningsParams {
    pub days: i64,
    pub file: PathBuf,
    pub thresholds: Thresholds,
    pub snapshot_roster: bool,
}

pub async fn handle_export_innings(params: ExportInningsParams) -> Result<()> {
    let client = StatsClient::new();
    let mut classifier = if params.snapshot_roster {
        PosClassifier::snapshot()
    } else {
        PosClassifier::live(client.clone())
    };

    let (start_date, end_date) = date_window(params.days);
    println!("Fetching schedule {start_date} through {end_date}...");
    let games = client.schedule(&start_date, &end_date).await?;

    // Finished regular-season games that went the distance.
    let eligible: Vec<GameSummary> = games
        .into_iter()
        .filter(|g| g.is_final() && g.is_regular_season())
        .filter(|g| g.current_inning.map_or(false, |i| i >= 9))
        .collect();
    println!("Scanning {} regular-season games...", eligible.len());

    let fetched = fetch_game_inputs(&client, eligible).await;

    let file = File::create(&params.file)?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(HalfInningRow::CSV_HEADERS)?;

    let mut written = 0usize;
    for (game, linescore, boxscore) in fetched {
        let innings = match game.current_inning {
            Some(innings) => innings,
            None => continue,
        };
        // Score tracking begins one inning early so the first eligible
        // half-inning has a "before" differential.
        let from_inning = params.thresholds.start_inning.saturating_sub(1).max(1);
        let scores = match parse_linescore(&linescore, innings, from_inning) {
            Ok(scores) => scores,
            Err(err) => {
                warn!(game = %game.game_id, %err, "skipping game with unparseable linescore");
                continue;
            }
        };

        match half_inning_rows(&game, &scores, &boxscore, &mut classifier, params.thresholds).await
        {
            Ok(rows) => {
                for row in rows {
                    writer.write_record(row.to_csv_row())?;
                    written += 1;
                }
            }
            Err(err) => warn!(game = %game.game_id, %err, "skipping unclassifiable game"),
        }
    }

    writer.flush()?;
    println!("✓ Wrote {written} half-innings to {}", params.file.display());
    Ok(())
}
