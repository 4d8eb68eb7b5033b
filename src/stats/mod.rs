//! Stats gateway client: schedule, linescores, boxscores, player lookups.

pub mod http;
pub mod types;

pub use http::StatsClient;
pub use types::{BoxscorePitchers, GameSummary, PitcherLine};
