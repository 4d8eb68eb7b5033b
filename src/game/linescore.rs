//! Parses the fixed-width linescore grid into cumulative score maps.

use std::collections::BTreeMap;

use crate::error::{PosWatchError, Result};

/// Cumulative runs per team, inning -> runs through that inning inclusive.
///
/// Only innings from the requested retention point onward are present,
/// but every sum runs from inning 1, so retained totals are exact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub home_after: BTreeMap<u8, i64>,
    pub away_after: BTreeMap<u8, i64>,
}

impl ScoreState {
    /// Absolute run differential once both teams have batted in `inning`.
    pub fn diff_after(&self, inning: u8) -> Result<i64> {
        let home = self.home_total(inning)?;
        let away = self.away_total(inning)?;
        Ok((home - away).abs())
    }

    pub fn home_total(&self, inning: u8) -> Result<i64> {
        self.home_after
            .get(&inning)
            .copied()
            .ok_or(PosWatchError::MissingInning { inning })
    }

    pub fn away_total(&self, inning: u8) -> Result<i64> {
        self.away_after
            .get(&inning)
            .copied()
            .ok_or(PosWatchError::MissingInning { inning })
    }

    /// Runs the home team scored in `inning` alone.
    pub fn home_runs_in(&self, inning: u8) -> Result<i64> {
        Ok(self.home_total(inning)? - self.home_total(inning - 1)?)
    }

    /// Runs the away team scored in `inning` alone.
    pub fn away_runs_in(&self, inning: u8) -> Result<i64> {
        Ok(self.away_total(inning)? - self.away_total(inning - 1)?)
    }

    /// Runs scored by both teams in `inning`.
    pub fn runs_in(&self, inning: u8) -> Result<i64> {
        Ok(self.home_runs_in(inning)? + self.away_runs_in(inning)?)
    }
}

/// Parse the grid, retaining innings `from_inning..=innings`.
///
/// The header row's first '1' marks the start of the per-inning columns,
/// two characters each; the next two rows hold away and home runs. Extra
/// innings are supported by passing the played inning count.
pub fn parse_linescore(linescore: &str, innings: u8, from_inning: u8) -> Result<ScoreState> {
    let lines: Vec<&str> = linescore.lines().collect();
    if lines.len() < 3 {
        return Err(PosWatchError::Linescore {
            detail: format!("expected at least 3 rows, got {}", lines.len()),
        });
    }

    let start = lines[0].find('1').ok_or_else(|| PosWatchError::Linescore {
        detail: "header row has no inning columns".to_string(),
    })?;

    let mut state = ScoreState::default();
    let mut away_score = 0i64;
    let mut home_score = 0i64;

    for inning in 1..=innings {
        let col = start + 2 * usize::from(inning - 1);
        away_score += score_cell(lines[1], col, inning)?;
        home_score += score_cell(lines[2], col, inning)?;

        if inning >= from_inning {
            state.away_after.insert(inning, away_score);
            state.home_after.insert(inning, home_score);
        }
    }

    Ok(state)
}

fn score_cell(row: &str, col: usize, inning: u8) -> Result<i64> {
    let cell: String = row.get(col..).unwrap_or("").chars().take(2).collect();
    if cell.trim().is_empty() {
        return Err(PosWatchError::Linescore {
            detail: format!("score row ends before inning {inning}"),
        });
    }
    cell.trim().parse().map_err(|_| PosWatchError::Linescore {
        detail: format!("non-numeric score {:?} in inning {inning}", cell.trim()),
    })
}
