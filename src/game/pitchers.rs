//! Reconstructs per-inning pitcher usage from ordered appearance lists.

use std::collections::BTreeMap;

use tracing::warn;

use crate::cli::types::PlayerId;
use crate::stats::types::{BoxscorePitchers, PitcherLine};

/// Cumulative pitchers used, inning -> count through that inning.
pub type PitcherCounts = BTreeMap<u8, u32>;

/// Usage maps for both teams, plus the whole-innings mark at which the
/// position player's outing ended, if one was identified.
#[derive(Debug, Clone, Default)]
pub struct PitcherUsage {
    pub home_after: PitcherCounts,
    pub away_after: PitcherCounts,
    pub pos_inning: Option<u8>,
}

/// Innings-pitched string split into whole innings and outs ("5.2" = 5 and 2).
fn split_ip(ip: &str) -> (u8, u8) {
    let mut parts = ip.splitn(2, '.');
    let whole = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(0);
    let outs = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(0);
    (whole, outs)
}

/// Walk one team's pitcher table (header row skipped), recording the
/// cumulative pitcher count for every inning from `start_inning` through
/// `total_innings`, and the whole-innings mark where `pos_id` finished.
///
/// The outs counter rolls over into a whole inning at 3. When one
/// pitcher completes several innings in a single outing, every newly
/// reached inning gets the same count; an inning already recorded is
/// never overwritten.
pub fn pitcher_counts(
    pitchers: &[PitcherLine],
    total_innings: u8,
    start_inning: u8,
    pos_id: Option<PlayerId>,
) -> (PitcherCounts, Option<u8>) {
    let mut counts = PitcherCounts::new();
    let mut innings = 0u8;
    let mut outs = 0u8;
    let mut num_pitchers = 0u32;
    let mut last_insert = 0u8;
    let mut pos_inning = None;

    for pitcher in pitchers.iter().skip(1) {
        let (whole, extra_outs) = split_ip(&pitcher.ip);
        innings += whole;
        outs += extra_outs;
        if outs >= 3 {
            innings += 1;
            outs %= 3;
        }

        if pos_inning.is_none() && pos_id.is_some() && pitcher.person_id == pos_id {
            pos_inning = Some(innings);
        }

        num_pitchers += 1;
        if innings >= start_inning && innings > last_insert {
            for inning in start_inning.max(last_insert + 1)..=innings {
                counts.insert(inning, num_pitchers);
                last_insert = inning;
            }
        }
    }

    if last_insert == 0 {
        if num_pitchers > 0 {
            warn!(
                total_innings,
                start_inning, "pitcher table exhausted before first tracked inning; usage left unclassified"
            );
        }
        return (counts, pos_inning);
    }

    // The last recorded pitcher finishes the game; later innings inherit
    // its count.
    if let Some(&last_count) = counts.get(&last_insert) {
        for inning in (last_insert + 1)..=total_innings {
            counts.insert(inning, last_count);
        }
    }

    (counts, pos_inning)
}

/// Usage for both teams. The away table is scanned for `pos_id` before
/// the home table; the first match wins.
pub fn reconstruct_usage(
    boxscore: &BoxscorePitchers,
    total_innings: u8,
    start_inning: u8,
    pos_id: Option<PlayerId>,
) -> PitcherUsage {
    let (away_after, away_pos) =
        pitcher_counts(&boxscore.away_pitchers, total_innings, start_inning, pos_id);
    let remaining_pos_id = if away_pos.is_some() { None } else { pos_id };
    let (home_after, home_pos) = pitcher_counts(
        &boxscore.home_pitchers,
        total_innings,
        start_inning,
        remaining_pos_id,
    );

    PitcherUsage {
        home_after,
        away_after,
        pos_inning: away_pos.or(home_pos),
    }
}

/// The pitcher who started inning `n`, if the previous outing ended
/// exactly on the inning boundary.
///
/// Outs are summed forward through the table; an outing that begins at
/// exactly `(n-1) * 3` outs started the inning. If no outing boundary
/// lands there, the change happened mid-inning and there is no clean
/// starter.
pub fn starter_of_inning(pitchers: &[PitcherLine], inning: u8) -> Option<&PitcherLine> {
    let target = u32::from(inning - 1) * 3;
    let mut outs_seen = 0u32;

    for pitcher in pitchers.iter().skip(1) {
        if outs_seen == target {
            return Some(pitcher);
        }
        if outs_seen > target {
            break;
        }
        let (whole, outs) = split_ip(&pitcher.ip);
        outs_seen += u32::from(whole) * 3 + u32::from(outs);
    }

    None
}
