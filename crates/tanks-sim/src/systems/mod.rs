//! Systems that operate on the tank world.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components and rosters.

pub mod damage;
pub mod framing;
pub mod snapshot;
