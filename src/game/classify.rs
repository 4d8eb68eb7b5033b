//! Blowout and decision-point classification.
//!
//! Combines the score and pitcher-usage reconstructions into the two
//! shapes the exporters emit: one record per qualifying game, or one
//! record per half-inning that began at blowout margin.

use std::fmt;

use tracing::warn;

use crate::cli::types::GameId;
use crate::error::{PosWatchError, Result};
use crate::game::linescore::ScoreState;
use crate::game::pitchers::{reconstruct_usage, starter_of_inning, PitcherCounts};
use crate::game::pos::PosClassifier;
use crate::stats::types::{BoxscorePitchers, GameSummary, PitcherLine};

/// Which side a team plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Home => write!(f, "Home"),
            Side::Away => write!(f, "Away"),
        }
    }
}

/// Tunables for a scan.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    /// First checkpoint inning for score and pitcher snapshots.
    pub start_inning: u8,
    /// Run differential that marks a blowout.
    pub run_threshold: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            start_inning: 6,
            run_threshold: 8,
        }
    }
}

/// Where a team is assumed to insert a position player when none did,
/// as offsets back from the final inning: the home team pitches the top
/// of `final - home_offset`, the away team the bottom of
/// `final - away_offset`.
///
/// This is a house rule, not derivable from the data; the defaults put
/// the home team at the top of the final inning and the away team at the
/// bottom of the second-to-last.
#[derive(Debug, Clone, Copy)]
pub struct DecisionPolicy {
    pub home_offset: u8,
    pub away_offset: u8,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            home_offset: 0,
            away_offset: 1,
        }
    }
}

/// The position player's appearance, as recorded on the game log.
#[derive(Debug, Clone)]
pub struct PosAppearance {
    pub side: Side,
    pub name: String,
    /// Runs the position player allowed (wire string).
    pub runs: String,
    /// Pitch count (wire string).
    pub pitches: String,
    /// Whole-innings mark where the outing ended; None when the usage
    /// data never resolved it.
    pub inning_pitched: Option<u8>,
}

/// Everything the game-level exporter records about one game.
#[derive(Debug, Clone)]
pub struct GameLog {
    pub date: String,
    pub game_id: GameId,
    pub home_team: String,
    pub away_team: String,
    pub innings: u8,
    pub blowout: bool,
    pub pos: Option<PosAppearance>,
    /// Runs scored by both teams in the inning the position player
    /// pitched (or would have, under the decision policy).
    pub runs_in_pos_inning: i64,
    /// Differential immediately before the decision-point half-inning;
    /// None when the score state does not cover it.
    pub diff_at_decision_point: Option<i64>,
    pub scores: ScoreState,
    pub home_pitchers_after: PitcherCounts,
    pub away_pitchers_after: PitcherCounts,
    start_inning: u8,
}

impl GameLog {
    /// A game is worth a row if it was a blowout at any checkpoint or a
    /// position player pitched in it.
    pub fn should_log(&self) -> bool {
        self.blowout || self.pos.is_some()
    }

    pub fn to_csv_row(&self) -> Vec<String> {
        fn check(val: &str) -> String {
            if val.is_empty() {
                "-".to_string()
            } else {
                val.to_string()
            }
        }

        let (pos_team, pos_name, pos_runs, pos_pitches) = match &self.pos {
            Some(p) => (
                p.side.to_string(),
                check(&p.name),
                check(&p.runs),
                check(&p.pitches),
            ),
            None => ("-".into(), "-".into(), "-".into(), "-".into()),
        };

        let mut row = vec![
            self.date.clone(),
            self.game_id.to_string(),
            self.home_team.clone(),
            self.away_team.clone(),
            if self.pos.is_some() { "T" } else { "F" }.to_string(),
            pos_team,
            pos_name,
            pos_runs,
            self.runs_in_pos_inning.to_string(),
            pos_pitches,
            self.diff_at_decision_point
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ];

        for inning in self.start_inning..=9 {
            row.push(
                self.scores
                    .diff_after(inning)
                    .map(|d| d.to_string())
                    .unwrap_or_else(|_| "-".to_string()),
            );
        }

        let final_score = match (
            self.scores.home_total(self.innings),
            self.scores.away_total(self.innings),
        ) {
            (Ok(home), Ok(away)) => format!("({home}-{away})"),
            _ => "-".to_string(),
        };
        row.push(final_score);

        for inning in self.start_inning..=9 {
            let cell = match (
                self.home_pitchers_after.get(&inning),
                self.away_pitchers_after.get(&inning),
            ) {
                (Some(home), Some(away)) => format!("({home}-{away})"),
                _ => "-".to_string(),
            };
            row.push(cell);
        }

        row
    }
}

/// Header row matching [`GameLog::to_csv_row`].
pub fn game_csv_headers(start_inning: u8) -> Vec<String> {
    let mut headers: Vec<String> = [
        "date",
        "game id",
        "home",
        "away",
        "pos?",
        "pos team",
        "pos name",
        "pos runs",
        "runs in pos inning",
        "pos num pitches",
        "diff at decision pt",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    for inning in start_inning..=9 {
        headers.push(format!("score {inning} diff"));
    }
    headers.push("final score".to_string());
    for inning in start_inning..=9 {
        headers.push(format!("pitchers {inning}"));
    }

    headers
}

/// Blowout at any checkpoint inning?
pub fn is_blowout(scores: &ScoreState, innings: u8, thresholds: Thresholds) -> Result<bool> {
    for inning in thresholds.start_inning..=innings {
        if scores.diff_after(inning)? >= thresholds.run_threshold {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Classify one finished game.
///
/// Errors only on score state too malformed to reason about; the caller
/// skips the game. Softer inconsistencies (a decision point outside the
/// tracked innings) are logged and left unclassified instead.
pub async fn classify_game(
    summary: &GameSummary,
    scores: ScoreState,
    boxscore: &BoxscorePitchers,
    classifier: &mut PosClassifier,
    thresholds: Thresholds,
    policy: DecisionPolicy,
) -> Result<GameLog> {
    let innings = summary.current_inning.ok_or(PosWatchError::NoData)?;
    let home_final = scores.home_total(innings)?;
    let away_final = scores.away_total(innings)?;

    // Away pitchers are scanned first; only the first position player
    // found across both teams is recorded.
    let mut found = None;
    if let Some(line) = classifier
        .first_position_player(&boxscore.away_pitchers)
        .await
    {
        found = Some((Side::Away, line));
    } else if let Some(line) = classifier
        .first_position_player(&boxscore.home_pitchers)
        .await
    {
        found = Some((Side::Home, line));
    }

    let pos_id = found.as_ref().and_then(|(_, line)| line.person_id);
    let usage = reconstruct_usage(boxscore, innings, thresholds.start_inning, pos_id);

    let pos = found.map(|(side, line)| PosAppearance {
        side,
        name: line.name,
        runs: line.runs,
        pitches: line.pitches,
        inning_pitched: usage.pos_inning,
    });

    let mut runs_in_pos_inning = 0i64;
    if let Some(inning) = usage.pos_inning {
        match scores.runs_in(inning) {
            Ok(runs) => runs_in_pos_inning = runs,
            Err(err) => warn!(
                game = %summary.game_id,
                %err,
                "cannot total runs in the position player's inning"
            ),
        }
    }

    let actual_point = pos
        .as_ref()
        .and_then(|p| p.inning_pitched.map(|x| (p.side, x)));
    let (home_ref, away_ref) = match actual_point {
        Some((Side::Home, x)) => (x.saturating_sub(1), x.saturating_sub(1)),
        // An away-side position player pitches the bottom of inning x,
        // after their own team has batted in the top.
        Some((Side::Away, x)) => (x.saturating_sub(1), x),
        None => {
            let blown_out = if home_final < away_final {
                Side::Home
            } else {
                Side::Away
            };
            match blown_out {
                Side::Home => {
                    let sub = innings.saturating_sub(policy.home_offset).max(1);
                    match scores.runs_in(sub) {
                        Ok(runs) => runs_in_pos_inning = runs,
                        Err(err) => warn!(game = %summary.game_id, %err, "cannot total runs at the assumed substitution point"),
                    }
                    (sub.saturating_sub(1), sub.saturating_sub(1))
                }
                Side::Away => {
                    let sub = innings.saturating_sub(policy.away_offset).max(1);
                    // Only the home half of that inning counts here; the
                    // away team has already batted when the sub would occur.
                    match scores.home_runs_in(sub) {
                        Ok(runs) => runs_in_pos_inning = runs,
                        Err(err) => warn!(game = %summary.game_id, %err, "cannot total runs at the assumed substitution point"),
                    }
                    (sub.saturating_sub(1), sub)
                }
            }
        }
    };

    let diff_at_decision_point = match (scores.home_total(home_ref), scores.away_total(away_ref)) {
        (Ok(home), Ok(away)) => Some((home - away).abs()),
        _ => {
            warn!(
                game = %summary.game_id,
                inning = home_ref,
                "score state does not cover the decision point; leaving it unclassified"
            );
            None
        }
    };

    let blowout = is_blowout(&scores, innings, thresholds)?;

    Ok(GameLog {
        date: summary.date.clone(),
        game_id: summary.game_id,
        home_team: summary.home_name.clone(),
        away_team: summary.away_name.clone(),
        innings,
        blowout,
        pos,
        runs_in_pos_inning,
        diff_at_decision_point,
        scores,
        home_pitchers_after: usage.home_after,
        away_pitchers_after: usage.away_after,
        start_inning: thresholds.start_inning,
    })
}

/// One half-inning that began at blowout margin.
#[derive(Debug, Clone)]
pub struct HalfInningRow {
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub inning: u8,
    pub is_top: bool,
    pub winning_team_batting: bool,
    pub pre_half_diff: i64,
    pub runs_scored: i64,
    pub pos_started: bool,
}

impl HalfInningRow {
    pub const CSV_HEADERS: [&'static str; 9] = [
        "date",
        "home",
        "away",
        "inning",
        "is_top",
        "is_winning_team_batting",
        "pre_half_score_diff",
        "runs_scored",
        "did_pos_start",
    ];

    pub fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.home_team.clone(),
            self.away_team.clone(),
            self.inning.to_string(),
            self.is_top.to_string(),
            self.winning_team_batting.to_string(),
            self.pre_half_diff.to_string(),
            self.runs_scored.to_string(),
            self.pos_started.to_string(),
        ]
    }
}

/// Half-inning rows for one game.
///
/// `scores` must cover one inning before `thresholds.start_inning` so
/// pre-half differentials exist for the first eligible inning.
pub async fn half_inning_rows(
    summary: &GameSummary,
    scores: &ScoreState,
    boxscore: &BoxscorePitchers,
    classifier: &mut PosClassifier,
    thresholds: Thresholds,
) -> Result<Vec<HalfInningRow>> {
    let innings = summary.current_inning.ok_or(PosWatchError::NoData)?;
    let home_final = scores.home_total(innings)?;
    let away_final = scores.away_total(innings)?;
    let winner = if home_final > away_final {
        Side::Home
    } else {
        Side::Away
    };

    // Cheap gate before any starter lookup: a staff with no position
    // player anywhere in the game cannot have one starting a half.
    let home_staff_has_pos = classifier
        .first_position_player(&boxscore.home_pitchers)
        .await
        .is_some();
    let away_staff_has_pos = classifier
        .first_position_player(&boxscore.away_pitchers)
        .await
        .is_some();

    let mut rows = Vec::new();
    for inning in thresholds.start_inning..=innings {
        // Top half: away bats against the home staff.
        let pre_top = (scores.away_total(inning - 1)? - scores.home_total(inning - 1)?).abs();
        if pre_top >= thresholds.run_threshold {
            rows.push(HalfInningRow {
                date: summary.date.clone(),
                home_team: summary.home_name.clone(),
                away_team: summary.away_name.clone(),
                inning,
                is_top: true,
                winning_team_batting: winner == Side::Away,
                pre_half_diff: pre_top,
                runs_scored: scores.away_runs_in(inning)?,
                pos_started: half_started_by_pos(
                    home_staff_has_pos,
                    &boxscore.home_pitchers,
                    inning,
                    classifier,
                )
                .await,
            });
        }

        // Bottom half: home bats against the away staff. A home team
        // leading into its final at-bat has no reason to burn a position
        // player, so that half is excluded outright.
        let pre_bottom = (scores.away_total(inning)? - scores.home_total(inning - 1)?).abs();
        let home_leads_final =
            inning == innings && scores.home_total(inning - 1)? > scores.away_total(inning)?;
        if pre_bottom >= thresholds.run_threshold && !home_leads_final {
            rows.push(HalfInningRow {
                date: summary.date.clone(),
                home_team: summary.home_name.clone(),
                away_team: summary.away_name.clone(),
                inning,
                is_top: false,
                winning_team_batting: winner == Side::Home,
                pre_half_diff: pre_bottom,
                runs_scored: scores.home_runs_in(inning)?,
                pos_started: half_started_by_pos(
                    away_staff_has_pos,
                    &boxscore.away_pitchers,
                    inning,
                    classifier,
                )
                .await,
            });
        }
    }

    Ok(rows)
}

async fn half_started_by_pos(
    staff_has_pos: bool,
    staff: &[PitcherLine],
    inning: u8,
    classifier: &mut PosClassifier,
) -> bool {
    if !staff_has_pos {
        return false;
    }
    match starter_of_inning(staff, inning) {
        Some(starter) => match starter.person_id {
            Some(id) => classifier.is_position_player(id).await,
            None => false,
        },
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::PlayerId;
    use std::collections::BTreeMap;

    fn flat_totals(from: u8, to: u8, total: i64) -> BTreeMap<u8, i64> {
        (from..=to).map(|i| (i, total)).collect()
    }

    fn summary(innings: u8) -> GameSummary {
        GameSummary {
            game_id: GameId::new(662021),
            date: "2022-08-01".to_string(),
            game_type: "R".to_string(),
            status: "Final".to_string(),
            home_name: "Home Nine".to_string(),
            away_name: "Away Nine".to_string(),
            home_score: 0,
            away_score: 0,
            current_inning: Some(innings),
        }
    }

    fn header() -> PitcherLine {
        PitcherLine {
            name: "Pitchers".to_string(),
            ip: "IP".to_string(),
            ..PitcherLine::default()
        }
    }

    fn line(id: u64, ip: &str) -> PitcherLine {
        PitcherLine {
            person_id: Some(PlayerId::new(id)),
            name: format!("Pitcher {id}"),
            ip: ip.to_string(),
            ..PitcherLine::default()
        }
    }

    fn empty_boxscore() -> BoxscorePitchers {
        BoxscorePitchers {
            away_pitchers: vec![header()],
            home_pitchers: vec![header()],
        }
    }

    fn roster_of(ids: &[u64]) -> PosClassifier {
        PosClassifier::Snapshot(ids.iter().copied().map(PlayerId::new).collect())
    }

    #[test]
    fn test_differential_of_exactly_eight_is_a_blowout() {
        let scores = ScoreState {
            home_after: flat_totals(5, 9, 0),
            away_after: flat_totals(5, 9, 8),
        };
        assert!(is_blowout(&scores, 9, Thresholds::default()).unwrap());
    }

    #[test]
    fn test_differential_of_seven_is_not_a_blowout() {
        let scores = ScoreState {
            home_after: flat_totals(5, 9, 0),
            away_after: flat_totals(5, 9, 7),
        };
        assert!(!is_blowout(&scores, 9, Thresholds::default()).unwrap());
    }

    #[tokio::test]
    async fn test_seven_run_game_without_pos_is_not_loggable() {
        let scores = ScoreState {
            home_after: flat_totals(5, 9, 0),
            away_after: flat_totals(5, 9, 7),
        };
        let log = classify_game(
            &summary(9),
            scores,
            &empty_boxscore(),
            &mut roster_of(&[]),
            Thresholds::default(),
            DecisionPolicy::default(),
        )
        .await
        .unwrap();

        assert!(!log.should_log());
        assert!(log.pos.is_none());
    }

    #[tokio::test]
    async fn test_late_blowout_uses_home_convention() {
        // Differential crosses the threshold only in the ninth; the
        // blown-out home team is assumed to sub at the top of the final
        // inning, so the comparison point is after inning eight.
        let mut away = flat_totals(5, 8, 2);
        away.insert(9, 10);
        let scores = ScoreState {
            home_after: flat_totals(5, 9, 2),
            away_after: away,
        };
        let log = classify_game(
            &summary(9),
            scores,
            &empty_boxscore(),
            &mut roster_of(&[]),
            Thresholds::default(),
            DecisionPolicy::default(),
        )
        .await
        .unwrap();

        assert!(log.blowout);
        assert!(log.should_log());
        assert_eq!(log.diff_at_decision_point, Some(0));
        // All eight ninth-inning runs count toward the assumed pos inning.
        assert_eq!(log.runs_in_pos_inning, 8);
    }

    #[tokio::test]
    async fn test_blown_out_away_team_uses_second_to_last_inning() {
        let scores = ScoreState {
            home_after: flat_totals(5, 9, 10),
            away_after: flat_totals(5, 9, 2),
        };
        let log = classify_game(
            &summary(9),
            scores,
            &empty_boxscore(),
            &mut roster_of(&[]),
            Thresholds::default(),
            DecisionPolicy::default(),
        )
        .await
        .unwrap();

        // Away would sub at the bottom of the eighth: home through seven
        // against away through eight.
        assert_eq!(log.diff_at_decision_point, Some(8));
        assert_eq!(log.runs_in_pos_inning, 0);
    }

    #[tokio::test]
    async fn test_actual_pos_appearance_sets_decision_point() {
        let boxscore = BoxscorePitchers {
            away_pitchers: vec![header(), line(2, "9.0")],
            home_pitchers: vec![header(), line(1, "8.0"), line(300, "1.0")],
        };
        let scores = ScoreState {
            home_after: flat_totals(5, 9, 0),
            away_after: flat_totals(5, 9, 10),
        };
        let log = classify_game(
            &summary(9),
            scores,
            &boxscore,
            &mut roster_of(&[300]),
            Thresholds::default(),
            DecisionPolicy::default(),
        )
        .await
        .unwrap();

        let pos = log.pos.as_ref().unwrap();
        assert_eq!(pos.side, Side::Home);
        assert_eq!(pos.inning_pitched, Some(9));
        assert_eq!(log.diff_at_decision_point, Some(10));
        assert_eq!(log.runs_in_pos_inning, 0);
        assert!(log.should_log());
    }

    #[tokio::test]
    async fn test_csv_row_matches_header_width() {
        let scores = ScoreState {
            home_after: flat_totals(5, 9, 0),
            away_after: flat_totals(5, 9, 9),
        };
        let log = classify_game(
            &summary(9),
            scores,
            &empty_boxscore(),
            &mut roster_of(&[]),
            Thresholds::default(),
            DecisionPolicy::default(),
        )
        .await
        .unwrap();

        let headers = game_csv_headers(6);
        let row = log.to_csv_row();
        assert_eq!(headers.len(), 20);
        assert_eq!(row.len(), headers.len());
        assert_eq!(row[4], "F");
        assert_eq!(row[15], "(0-9)");
    }

    #[tokio::test]
    async fn test_home_leading_into_final_at_bat_is_excluded() {
        let scores = ScoreState {
            home_after: flat_totals(6, 9, 10),
            away_after: flat_totals(6, 9, 0),
        };
        let thresholds = Thresholds {
            start_inning: 7,
            run_threshold: 8,
        };
        let rows = half_inning_rows(
            &summary(9),
            &scores,
            &empty_boxscore(),
            &mut roster_of(&[]),
            thresholds,
        )
        .await
        .unwrap();

        assert!(!rows.is_empty());
        assert!(!rows.iter().any(|r| r.inning == 9 && !r.is_top));
        // Tops of 7-9 plus bottoms of 7-8.
        assert_eq!(rows.len(), 5);
        for row in &rows {
            assert_eq!(row.winning_team_batting, !row.is_top);
            assert_eq!(row.pre_half_diff, 10);
            assert_eq!(row.runs_scored, 0);
            assert!(!row.pos_started);
        }
    }

    #[tokio::test]
    async fn test_pos_starting_the_bottom_half_is_tagged() {
        let boxscore = BoxscorePitchers {
            away_pitchers: vec![header(), line(1, "8.0"), line(300, "1.0")],
            home_pitchers: vec![header(), line(2, "9.0")],
        };
        let scores = ScoreState {
            home_after: flat_totals(6, 9, 0),
            away_after: flat_totals(6, 9, 10),
        };
        let thresholds = Thresholds {
            start_inning: 7,
            run_threshold: 8,
        };
        let rows = half_inning_rows(
            &summary(9),
            &scores,
            &boxscore,
            &mut roster_of(&[300]),
            thresholds,
        )
        .await
        .unwrap();

        let bottom_ninth = rows
            .iter()
            .find(|r| r.inning == 9 && !r.is_top)
            .expect("home team trails, so its final at-bat stays in");
        assert!(bottom_ninth.pos_started);

        let bottom_eighth = rows.iter().find(|r| r.inning == 8 && !r.is_top).unwrap();
        assert!(!bottom_eighth.pos_started);
    }
}
