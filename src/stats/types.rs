//! Wire types for the stats gateway.

use crate::cli::types::{GameId, PlayerId};
use serde::Deserialize;

/// Top-level envelope for the schedule endpoint.
#[derive(Debug, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub dates: Vec<ScheduleDate>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleDate {
    pub date: String,
    #[serde(default)]
    pub games: Vec<ScheduleGame>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleGame {
    #[serde(rename = "gamePk")]
    pub game_pk: GameId,
    #[serde(rename = "gameType", default)]
    pub game_type: String,
    pub status: GameStatus,
    pub teams: GameTeams,
    #[serde(default)]
    pub linescore: Option<LinescoreSummary>,
}

#[derive(Debug, Deserialize)]
pub struct GameStatus {
    #[serde(rename = "detailedState")]
    pub detailed_state: String,
}

#[derive(Debug, Deserialize)]
pub struct GameTeams {
    pub home: TeamSide,
    pub away: TeamSide,
}

#[derive(Debug, Deserialize)]
pub struct TeamSide {
    #[serde(default)]
    pub score: Option<i64>,
    pub team: TeamName,
}

#[derive(Debug, Deserialize)]
pub struct TeamName {
    pub name: String,
}

/// Inning counter hydrated onto schedule entries.
#[derive(Debug, Deserialize)]
pub struct LinescoreSummary {
    #[serde(rename = "currentInning", default)]
    pub current_inning: Option<u8>,
}

/// One game flattened out of the schedule envelope.
#[derive(Debug, Clone)]
pub struct GameSummary {
    pub game_id: GameId,
    pub date: String,
    pub game_type: String,
    pub status: String,
    pub home_name: String,
    pub away_name: String,
    pub home_score: i64,
    pub away_score: i64,
    pub current_inning: Option<u8>,
}

impl GameSummary {
    pub fn from_wire(date: &str, game: ScheduleGame) -> Self {
        Self {
            game_id: game.game_pk,
            date: date.to_string(),
            game_type: game.game_type,
            status: game.status.detailed_state,
            home_name: game.teams.home.team.name,
            away_name: game.teams.away.team.name,
            home_score: game.teams.home.score.unwrap_or(0),
            away_score: game.teams.away.score.unwrap_or(0),
            current_inning: game.linescore.and_then(|l| l.current_inning),
        }
    }

    pub fn is_final(&self) -> bool {
        self.status == "Final"
    }

    pub fn is_live(&self) -> bool {
        self.status == "In Progress"
    }

    pub fn is_regular_season(&self) -> bool {
        self.game_type == "R"
    }
}

/// Ordered pitcher tables for one game.
///
/// Index 0 of each list is a column-header placeholder, not a pitcher;
/// every consumer skips it.
#[derive(Debug, Clone, Deserialize)]
pub struct BoxscorePitchers {
    #[serde(rename = "awayPitchers", default)]
    pub away_pitchers: Vec<PitcherLine>,
    #[serde(rename = "homePitchers", default)]
    pub home_pitchers: Vec<PitcherLine>,
}

/// One row of a team's pitcher table, in appearance order.
///
/// Numeric columns arrive as strings on the wire (the header row carries
/// column labels in the same fields).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PitcherLine {
    #[serde(rename = "personId", default)]
    pub person_id: Option<PlayerId>,
    #[serde(default)]
    pub name: String,
    /// Innings pitched as "whole.outs", e.g. "5.2" = 5 innings, 2 outs.
    #[serde(default)]
    pub ip: String,
    #[serde(rename = "r", default)]
    pub runs: String,
    #[serde(rename = "p", default)]
    pub pitches: String,
}

/// Envelope for the player metadata endpoint.
#[derive(Debug, Deserialize)]
pub struct PeopleResponse {
    #[serde(default)]
    pub people: Vec<Person>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    pub id: PlayerId,
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
    #[serde(rename = "primaryPosition", default)]
    pub primary_position: Option<PrimaryPosition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrimaryPosition {
    #[serde(default)]
    pub abbreviation: String,
}
