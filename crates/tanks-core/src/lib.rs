//! Core types and definitions for the tank battle match engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! identifiers, components, commands, snapshots, presentation events,
//! match configuration, and constants. It has no runtime dependencies
//! beyond serialization.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
