//! Inning-state reconstruction and blowout/POS classification.

pub mod classify;
pub mod linescore;
pub mod pitchers;
pub mod pos;

pub use classify::{DecisionPolicy, GameLog, HalfInningRow, Side, Thresholds};
pub use linescore::{parse_linescore, ScoreState};
pub use pos::PosClassifier;
