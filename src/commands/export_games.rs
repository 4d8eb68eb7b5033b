//! Game-level CSV export of blowout and position-player games.
//!
//! Pipeline: schedule fetch -> parallel linescore fetches -> parallel
//! boxscore fetches for the survivors -> serial classification and CSV
//! emit. A failed fetch drops its game; it never fails the run.

use std::fs::File;
use std::path::PathBuf;

use futures::{stream, StreamExt};
use tracing::warn;

use crate::commands::{date_window, FETCH_WORKERS};
use crate::error::Result;
use crate::game::classify::{classify_game, game_csv_headers, DecisionPolicy, Thresholds};
use crate::game::linescore::parse_linescore;
use crate::game::pos::PosClassifier;
use crate::stats::http::StatsClient;
use crate::stats::types::{BoxscorePitchers, GameSummary};

/// Configuration for the game-level exporter.
#[derive(Debug)]
pub struct ExportGamesParams {
    pub days: i64,
    pub file: PathBuf,
    pub thresholds: Thresholds,
    pub snapshot_roster: bool,
}

pub async fn handle_export_games(params: ExportGamesParams) -> Result<()> {
    let client = StatsClient::new();
    let mut classifier = if params.snapshot_roster {
        PosClassifier::snapshot()
    } else {
        PosClassifier::live(client.clone())
    };

    let (start_date, end_date) = date_window(params.days);
    println!("Fetching schedule {start_date} through {end_date}...");
    let games = client.schedule(&start_date, &end_date).await?;

    // Finished nine-inning games only; weather-shortened games are out.
    let finished: Vec<GameSummary> = games
        .into_iter()
        .filter(|g| g.is_final())
        .filter(|g| g.current_inning.map_or(false, |i| i >= 9))
        .collect();
    println!("Scanning {} finished games...", finished.len());

    let fetched = fetch_game_inputs(&client, finished).await;

    let file = File::create(&params.file)?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(game_csv_headers(params.thresholds.start_inning))?;

    let mut logged = 0usize;
    for (game, linescore, boxscore) in fetched {
        let from_inning = params.thresholds.start_inning.saturating_sub(1).max(1);
        let innings = match game.current_inning {
            Some(innings) => innings,
            None => continue,
        };
        let scores = match parse_linescore(&linescore, innings, from_inning) {
            Ok(scores) => scores,
            Err(err) => {
                warn!(game = %game.game_id, %err, "skipping game with unparseable linescore");
                continue;
            }
        };

        match classify_game(
            &game,
            scores,
            &boxscore,
            &mut classifier,
            params.thresholds,
            DecisionPolicy::default(),
        )
        .await
        {
            Ok(log) if log.should_log() => {
                let reason = if log.pos.is_some() { "POS" } else { "blowout" };
                println!(
                    "{} {} at {} ({reason})",
                    log.date, log.away_team, log.home_team
                );
                writer.write_record(log.to_csv_row())?;
                logged += 1;
            }
            Ok(_) => {}
            Err(err) => warn!(game = %game.game_id, %err, "skipping unclassifiable game"),
        }
    }

    writer.flush()?;
    println!("✓ Wrote {logged} games to {}", params.file.display());
    Ok(())
}

/// Two bounded parallel fetch stages; each drops failures with a warning.
pub(crate) async fn fetch_game_inputs(
    client: &StatsClient,
    games: Vec<GameSummary>,
) -> Vec<(GameSummary, String, BoxscorePitchers)> {
    let with_linescores: Vec<(GameSummary, String)> = stream::iter(games)
        .map(|game| {
            let client = client.clone();
            async move {
                match client.linescore_text(game.game_id).await {
                    Ok(text) => Some((game, text)),
                    Err(err) => {
                        warn!(game = %game.game_id, %err, "linescore fetch failed; dropping game");
                        None
                    }
                }
            }
        })
        .buffer_unordered(FETCH_WORKERS)
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .flatten()
        .collect();

    stream::iter(with_linescores)
        .map(|(game, text)| {
            let client = client.clone();
            async move {
                match client.boxscore_pitchers(game.game_id).await {
                    Ok(boxscore) => Some((game, text, boxscore)),
                    Err(err) => {
                        warn!(game = %game.game_id, %err, "boxscore fetch failed; dropping game");
                        None
                    }
                }
            }
        })
        .buffer_unordered(FETCH_WORKERS)
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .flatten()
        .collect()
}
