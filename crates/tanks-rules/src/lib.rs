//! Match rules for the tank battle engine.
//!
//! Implements the round phase state machine, round terminal conditions,
//! pluggable round/match scoring strategies, and the round clock.
//! Everything here is pure and operates on plain data.

pub mod clock;
pub mod fsm;
pub mod scoring;
pub mod terminal;

pub use tanks_core as core;

#[cfg(test)]
mod tests;
