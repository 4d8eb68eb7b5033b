//! Live blowout notifier loop.
//!
//! Polls today's schedule on a fixed interval and emails a one-time alert
//! for each in-progress game that reaches blowout margin. Per-iteration
//! failures are logged and the loop keeps going.

use std::time::Duration;

use tracing::warn;

use crate::alert::email::Mailer;
use crate::alert::seen::TtlSet;
use crate::cli::types::GameId;
use crate::commands::today;
use crate::error::Result;
use crate::game::classify::Thresholds;
use crate::stats::http::StatsClient;
use crate::stats::types::GameSummary;

/// Configuration for the notifier.
#[derive(Debug)]
pub struct NotifyParams {
    pub from: String,
    pub to: Vec<String>,
    pub smtp_host: String,
    pub interval_secs: u64,
    pub thresholds: Thresholds,
    pub ttl_hours: u64,
}

pub async fn handle_notify(params: NotifyParams) -> Result<()> {
    let client = StatsClient::new();
    let mailer = Mailer::new(&params.smtp_host, &params.from, &params.to)?;
    let mut notified: TtlSet<GameId> =
        TtlSet::new(Duration::from_secs(params.ttl_hours * 60 * 60));

    println!(
        "Watching for blowouts every {}s ({} recipients)...",
        params.interval_secs,
        params.to.len()
    );

    loop {
        if let Err(err) = poll_once(&client, &mailer, &mut notified, params.thresholds).await {
            warn!(%err, "poll failed; retrying next interval");
        }
        notified.purge_expired();
        tokio::time::sleep(Duration::from_secs(params.interval_secs)).await;
    }
}

async fn poll_once(
    client: &StatsClient,
    mailer: &Mailer,
    notified: &mut TtlSet<GameId>,
    thresholds: Thresholds,
) -> Result<()> {
    let today = today();
    let games = client.schedule(&today, &today).await?;

    for game in games {
        if !game.is_live() || notified.contains(&game.game_id) {
            continue;
        }
        if !is_live_blowout(&game, thresholds) {
            continue;
        }

        // Only mark the game once the alert actually went out, so a
        // transient SMTP failure gets another shot next poll.
        match mailer.send_blowout_alert(&game) {
            Ok(()) => {
                println!(
                    "Alerted: {} {} - {} {} (inning {})",
                    game.home_name,
                    game.home_score,
                    game.away_name,
                    game.away_score,
                    game.current_inning.unwrap_or(0)
                );
                notified.insert(game.game_id);
            }
            Err(err) => warn!(game = %game.game_id, %err, "alert delivery failed"),
        }
    }

    Ok(())
}

/// Live blowout: deep enough into the game and a differential at or past
/// the threshold.
fn is_live_blowout(game: &GameSummary, thresholds: Thresholds) -> bool {
    let inning = game.current_inning.unwrap_or(0);
    inning >= thresholds.start_inning
        && (game.home_score - game.away_score).abs() >= thresholds.run_threshold
}
