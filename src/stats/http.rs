//! HTTP client for the stats gateway.

use reqwest::Client;

use crate::cli::types::{GameId, PlayerId};
use crate::error::Result;
use crate::stats::types::{
    BoxscorePitchers, GameSummary, PeopleResponse, Person, ScheduleResponse,
};

/// Default base path for the stats gateway.
pub const DEFAULT_BASE_URL: &str = "https://statsapi.mlb.com/api/v1";

/// Override the gateway base URL (useful against a local fixture server).
pub const BASE_URL_ENV_VAR: &str = "POS_WATCH_BASE_URL";

#[derive(Debug, Clone)]
pub struct StatsClient {
    client: Client,
    base_url: String,
}

impl StatsClient {
    pub fn new() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Schedule for a date range (inclusive, "MM/DD/YYYY"), flattened to
    /// one summary per game.
    pub async fn schedule(&self, start_date: &str, end_date: &str) -> Result<Vec<GameSummary>> {
        let url = format!("{}/schedule", self.base_url);
        let params = [
            ("sportId", "1"),
            ("startDate", start_date),
            ("endDate", end_date),
            ("hydrate", "team,linescore"),
        ];

        let res = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<ScheduleResponse>()
            .await?;

        Ok(res
            .dates
            .into_iter()
            .flat_map(|d| {
                let date = d.date;
                d.games
                    .into_iter()
                    .map(move |g| GameSummary::from_wire(&date, g))
                    .collect::<Vec<_>>()
            })
            .collect())
    }

    /// Raw fixed-width linescore grid for a game.
    pub async fn linescore_text(&self, game_id: GameId) -> Result<String> {
        let url = format!("{}/game/{}/linescore/text", self.base_url, game_id);
        let res = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(res)
    }

    /// Ordered home/away pitcher tables for a finished game.
    pub async fn boxscore_pitchers(&self, game_id: GameId) -> Result<BoxscorePitchers> {
        let url = format!("{}/game/{}/boxscore/pitchers", self.base_url, game_id);
        let res = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<BoxscorePitchers>()
            .await?;
        Ok(res)
    }

    /// Player metadata; `Ok(None)` when the id is unknown upstream.
    pub async fn person(&self, player_id: PlayerId) -> Result<Option<Person>> {
        let url = format!("{}/people/{}", self.base_url, player_id);
        let res = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<PeopleResponse>()
            .await?;
        Ok(res.people.into_iter().next())
    }
}

impl Default for StatsClient {
    fn default() -> Self {
        Self::new()
    }
}
