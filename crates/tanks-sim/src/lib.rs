//! Match engine for the tank battle game.
//!
//! Owns the hecs world of tanks, the rosters, the result ledger and the
//! round/match loop, and produces `MatchSnapshot`s for the host.

pub mod engine;
pub mod error;
pub mod export;
pub mod ledger;
pub mod presentation;
pub mod roster;
pub mod spawn;
pub mod systems;

pub use engine::MatchController;
pub use tanks_core as core;
