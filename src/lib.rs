//! pos-watch CLI Library
//!
//! Tracks lopsided baseball games and the position players pressed into
//! pitching duty during them, against a remote stats gateway.
//!
//! ## Features
//!
//! - **Inning Reconstruction**: cumulative score and pitcher-usage state
//!   per inning, rebuilt from the textual linescore grid and ordered
//!   pitcher tables
//! - **Blowout Classification**: checkpoint-inning differentials against a
//!   configurable run threshold
//! - **POS Detection**: live player-metadata lookups or an offline roster
//!   snapshot, behind one contract
//! - **CSV Export**: one row per qualifying game, or one row per
//!   half-inning that began at blowout margin
//! - **Live Alerts**: polling notifier that emails once per game, with a
//!   per-entry expiry window
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pos_watch::commands::export_games::{handle_export_games, ExportGamesParams};
//! use pos_watch::Thresholds;
//!
//! # async fn example() -> pos_watch::Result<()> {
//! let params = ExportGamesParams {
//!     days: 30,
//!     file: "games.csv".into(),
//!     thresholds: Thresholds::default(),
//!     snapshot_roster: false,
//! };
//!
//! handle_export_games(params).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Point the client at a different gateway, and supply the SMTP password
//! for the notifier:
//! ```bash
//! export POS_WATCH_BASE_URL=http://localhost:8080/api/v1
//! export POS_WATCH_SMTP_PASSWORD=app-password
//! ```

pub mod alert;
pub mod cli;
pub mod commands;
pub mod error;
pub mod game;
pub mod stats;

// Re-export commonly used types
pub use cli::types::{GameId, PlayerId};
pub use error::{PosWatchError, Result};
pub use game::classify::{DecisionPolicy, GameLog, HalfInningRow, Side, Thresholds};
pub use game::linescore::{parse_linescore, ScoreState};
pub use game::pos::PosClassifier;
pub use stats::types::GameSummary;
