//! Polaris: a fixed-depth alpha-beta chess engine on top of `shakmaty`.
//!
//! The engine exposes two entry points, [`Engine::find_best_move`] and
//! [`Engine::play_best_move`]. Move generation and game rules come from
//! `shakmaty`; this crate only searches and evaluates.

pub mod config;
pub mod constants;
pub mod game;

pub use game::evaluation::Score;
pub use game::search::{Engine, SearchAlgorithm, SearchConfig, SearchError, SearchOutcome, TieBreak};
pub use game::{GameOutcome, GameState, Status};
