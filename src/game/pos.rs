//! Position-player classification strategies.
//!
//! Two interchangeable ways to answer "is this pitcher actually a
//! position player?": a live metadata lookup (source of truth) and a
//! bundled roster snapshot (offline approximation). Selection happens
//! once, by configuration, not at call sites.

use std::collections::HashSet;
use std::num::NonZeroUsize;

use lru::LruCache;
use tracing::debug;

use crate::cli::types::PlayerId;
use crate::stats::http::StatsClient;
use crate::stats::types::PitcherLine;

/// Primary-position abbreviations that mark a real pitcher.
const PITCHER_POSITIONS: [&str; 2] = ["P", "TWP"];

const LOOKUP_CACHE_SIZE: usize = 512;

/// Known position players who pitched; 2022-season snapshot.
pub const POS_ROSTER_2022: [u64; 65] = [
    593643, 665019, 670768, 642165, 608348, 624503, 621433, 542194, 643524, 596117, 571976, 605612,
    543281, 641914, 670712, 425877, 644374, 676391, 620443, 621011, 660636, 664670, 572191, 606993,
    642851, 663630, 444876, 592743, 665155, 518586, 573131, 608703, 676946, 405395, 506702, 570560,
    622268, 670032, 553902, 572008, 572816, 593160, 605170, 641531, 543829, 608686, 608700, 640461,
    645801, 545121, 545341, 594838, 598265, 606115, 607054, 622569, 624512, 668800, 501303, 650339,
    661531, 669742, 503556, 571466, 614177,
];

pub enum PosClassifier {
    /// Offline set of known position-player ids.
    Snapshot(HashSet<PlayerId>),
    /// Live metadata lookups, memoized per id.
    Live {
        client: StatsClient,
        cache: LruCache<PlayerId, bool>,
    },
}

impl PosClassifier {
    /// Classifier backed by the bundled roster snapshot.
    pub fn snapshot() -> Self {
        Self::Snapshot(POS_ROSTER_2022.iter().copied().map(PlayerId::new).collect())
    }

    /// Classifier backed by live player-metadata lookups.
    pub fn live(client: StatsClient) -> Self {
        Self::Live {
            client,
            cache: LruCache::new(NonZeroUsize::new(LOOKUP_CACHE_SIZE).unwrap()),
        }
    }

    /// Whether this pitcher is a position player. Unknown ids and failed
    /// lookups count as pitchers.
    pub async fn is_position_player(&mut self, id: PlayerId) -> bool {
        match self {
            Self::Snapshot(roster) => roster.contains(&id),
            Self::Live { client, cache } => {
                if let Some(&known) = cache.get(&id) {
                    return known;
                }
                let is_pos = match client.person(id).await {
                    Ok(Some(person)) => person
                        .primary_position
                        .map(|pos| !PITCHER_POSITIONS.contains(&pos.abbreviation.as_str()))
                        .unwrap_or(false),
                    Ok(None) => false,
                    Err(err) => {
                        debug!(%id, %err, "player lookup failed; treating as pitcher");
                        false
                    }
                };
                cache.put(id, is_pos);
                is_pos
            }
        }
    }

    /// First position player in a team's pitcher table, in appearance
    /// order, header row skipped.
    pub async fn first_position_player(&mut self, pitchers: &[PitcherLine]) -> Option<PitcherLine> {
        for pitcher in pitchers.iter().skip(1) {
            if let Some(id) = pitcher.person_id {
                if self.is_position_player(id).await {
                    return Some(pitcher.clone());
                }
            }
        }
        None
    }
}
