//! Headless host for the tank battle match engine.
//!
//! Wires settings, logging and a fixed-rate game loop thread around the
//! `MatchController`, and feeds it console input.

pub mod console;
pub mod game_loop;
pub mod logger;
pub mod settings;
pub mod skirmish;
pub mod state;

pub use tanks_core as core;
