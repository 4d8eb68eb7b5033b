//! End-to-end classification scenarios driven through the public API

use pos_watch::game::classify::{classify_game, half_inning_rows, DecisionPolicy, Side};
use pos_watch::game::pitchers::{pitcher_counts, starter_of_inning};
use pos_watch::stats::types::{BoxscorePitchers, PitcherLine};
use pos_watch::{parse_linescore, GameId, GameSummary, PlayerId, PosClassifier, Thresholds};

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

fn pitcher(id: u64, name: &str, ip: &str) -> PitcherLine {
    PitcherLine {
        person_id: Some(PlayerId::new(id)),
        name: name.to_string(),
        ip: ip.to_string(),
        runs: "0".to_string(),
        pitches: "15".to_string(),
        ..PitcherLine::default()
    }
}

fn roster_of(ids: &[u64]) -> PosClassifier {
    PosClassifier::Snapshot(ids.iter().copied().map(PlayerId::new).collect())
}

/// Scenario A: a nine-run seventh turns a quiet game into a blowout.
#[test]
fn test_nine_run_inning_crosses_threshold_at_seven() {
    let grid = "1 2 3 4 5 6 7 8 9\n 0 1 0 0 0 0 9 0 1\n 0 0 0 0 0 0 0 0 0";
    let thresholds = Thresholds {
        start_inning: 6,
        run_threshold: 8,
    };

    let scores = parse_linescore(grid, 9, thresholds.start_inning).unwrap();

    assert_eq!(scores.away_total(7).unwrap(), 10);
    assert_eq!(scores.home_total(7).unwrap(), 0);
    assert_eq!(scores.diff_after(6).unwrap(), 1);
    assert_eq!(scores.diff_after(7).unwrap(), 10);
}

/// Scenario B: rollover and backfill across a three-man staff.
#[test]
fn test_pitcher_count_checkpoints() {
    let pitchers = vec![
        header(),
        pitcher(1, "Starter", "5.2"),
        pitcher(2, "Reliever", "2.1"),
        pitcher(3, "Closer", "1.0"),
    ];

    let (counts, _) = pitcher_counts(&pitchers, 9, 6, None);

    assert_eq!(counts.get(&6), Some(&2));
    assert_eq!(counts.get(&9), Some(&3));
}

/// Scenario C: a blowout with no actual POS still gets a comparable
/// decision-point differential from the house convention.
#[tokio::test]
async fn test_blowout_without_pos_is_loggable() {
    // Away puts up eight in the ninth; nothing before that.
    let grid = "1 2 3 4 5 6 7 8 9\n 0 0 0 0 0 0 0 0 8\n 0 0 0 0 0 0 0 0 0";
    let thresholds = Thresholds::default();
    let scores = parse_linescore(grid, 9, 5).unwrap();
    let boxscore = BoxscorePitchers {
        away_pitchers: vec![header(), pitcher(1, "Away Starter", "9.0")],
        home_pitchers: vec![header(), pitcher(2, "Home Starter", "9.0")],
    };

    let log = classify_game(
        &summary(9),
        scores,
        &boxscore,
        &mut roster_of(&[]),
        thresholds,
        DecisionPolicy::default(),
    )
    .await
    .unwrap();

    assert!(log.blowout);
    assert!(log.pos.is_none());
    assert!(log.should_log());
    // Blown-out home team is assumed to sub at the top of the ninth,
    // where the game was still tied.
    assert_eq!(log.diff_at_decision_point, Some(0));
}

/// Scenario D: the bottom of the ninth vanishes when the home team leads
/// going into it.
#[tokio::test]
async fn test_leading_home_team_final_at_bat_excluded() {
    let grid = "1 2 3 4 5 6 7 8 9\n 0 0 0 0 0 0 0 0 0\n 9 0 0 0 0 0 0 0 0";
    let thresholds = Thresholds {
        start_inning: 7,
        run_threshold: 8,
    };
    let scores = parse_linescore(grid, 9, thresholds.start_inning - 1).unwrap();
    let boxscore = BoxscorePitchers {
        away_pitchers: vec![header(), pitcher(1, "Away Starter", "8.0")],
        home_pitchers: vec![header(), pitcher(2, "Home Starter", "9.0")],
    };

    let rows = half_inning_rows(
        &summary(9),
        &scores,
        &boxscore,
        &mut roster_of(&[]),
        thresholds,
    )
    .await
    .unwrap();

    assert!(rows.iter().all(|r| !(r.inning == 9 && !r.is_top)));
    // The trailing away team's at-bats are all still present.
    assert_eq!(rows.iter().filter(|r| r.is_top).count(), 3);
}

/// A position player recorded on the away side wins the scan even when
/// the home side has one too.
#[tokio::test]
async fn test_away_pos_scanned_before_home() {
    let grid = "1 2 3 4 5 6 7 8 9\n 0 0 0 0 0 0 0 0 0\n 2 0 0 0 0 0 0 0 0";
    let scores = parse_linescore(grid, 9, 5).unwrap();
    let boxscore = BoxscorePitchers {
        away_pitchers: vec![
            header(),
            pitcher(1, "Away Starter", "7.0"),
            pitcher(300, "Away Infielder", "1.0"),
        ],
        home_pitchers: vec![
            header(),
            pitcher(2, "Home Starter", "8.0"),
            pitcher(301, "Home Infielder", "1.0"),
        ],
    };

    let log = classify_game(
        &summary(9),
        scores,
        &boxscore,
        &mut roster_of(&[300, 301]),
        Thresholds::default(),
        DecisionPolicy::default(),
    )
    .await
    .unwrap();

    let pos = log.pos.as_ref().expect("away infielder should be recorded");
    assert_eq!(pos.side, Side::Away);
    assert_eq!(pos.name, "Away Infielder");
    assert_eq!(pos.inning_pitched, Some(8));
    // POS game despite the modest differential.
    assert!(log.should_log());
    assert!(!log.blowout);
}

/// Starter lookup distinguishes clean inning starts from mid-inning
/// changes.
#[test]
fn test_starter_lookup_boundaries() {
    let pitchers = vec![
        header(),
        pitcher(1, "Starter", "5.2"),
        pitcher(2, "Reliever", "2.1"),
        pitcher(3, "Closer", "1.0"),
    ];

    assert_eq!(
        starter_of_inning(&pitchers, 1).and_then(|p| p.person_id),
        Some(PlayerId::new(1))
    );
    assert_eq!(
        starter_of_inning(&pitchers, 9).and_then(|p| p.person_id),
        Some(PlayerId::new(3))
    );
    assert!(starter_of_inning(&pitchers, 6).is_none());
    assert!(starter_of_inning(&pitchers, 7).is_none());
}
