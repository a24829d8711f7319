//! Match constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Match defaults (platoon battle) ---

/// Rounds per match.
pub const DEFAULT_NUM_OF_ROUNDS: u32 = 3;

/// Upper bound on rounds per match.
pub const MAX_NUM_OF_ROUNDS: u32 = 10;

/// Length of a timed round in minutes.
pub const DEFAULT_MINUTES_PER_ROUND: f64 = 3.0;

/// Points awarded for a clean sweep of the opposing roster.
pub const DEFAULT_POINTS_PER_WIN: f32 = 3.0;

/// Longest timed round accepted, in minutes.
pub const MAX_MINUTES_PER_ROUND: f64 = 15.0;

/// Remaining time at which the round timer is flagged critical (0.25 min).
pub const DEFAULT_CRITICAL_SECS: f64 = 15.0;

/// Hold at the start of each round before controls are enabled.
pub const DEFAULT_ROUND_START_DELAY_SECS: f64 = 2.5;

/// Pause after match cleanup before the next match may begin.
pub const DEFAULT_INTERMISSION_SECS: f64 = 0.2;

/// Default number of tanks in a fixed-size AI platoon.
pub const DEFAULT_PLATOON_SIZE: u32 = 3;

/// Most tanks one roster may field.
pub const MAX_ROSTER_SIZE: usize = 100;

/// Highest team number selectable in the start options.
pub const MAX_TEAM_NUMBER: u8 = 32;

/// Health every tank starts a life with.
pub const STARTING_HEALTH: f32 = 100.0;

// --- Knockout variants ---

/// Round wins needed to take a duel.
pub const DUEL_ROUNDS_TO_WIN: u32 = 5;

/// Upper bound on rounds in a duel (2 * wins - 1).
pub const DUEL_MAX_ROUNDS: u32 = 2 * DUEL_ROUNDS_TO_WIN - 1;

/// Start hold used by the knockout variants.
pub const KNOCKOUT_START_DELAY_SECS: f64 = 3.0;

/// Automatic end-of-round hold used by the knockout variants.
pub const KNOCKOUT_END_DELAY_SECS: f64 = 3.0;

/// Rounds in a free-for-all match before the ledger is closed.
pub const FREE_FOR_ALL_ROUNDS: u32 = 5;

// --- Spawn surface ---

/// Half-extent of the square spawn area on the ground plane.
pub const SPAWN_MAX_DIM: f32 = 80.0;

/// Vertices above this height are not valid spawn points.
pub const SPAWN_MAX_HEIGHT: f32 = 1.0;

/// Spacing of the synthetic flat spawn grid.
pub const SPAWN_GRID_STEP: f32 = 4.0;

// --- Camera framing ---

/// Space added around the outermost tank.
pub const CAMERA_EDGE_BUFFER: f32 = 4.0;

/// The framing never zooms in tighter than this.
pub const CAMERA_MIN_SIZE: f32 = 6.5;

/// Default viewport aspect ratio (width / height).
pub const DEFAULT_ASPECT: f32 = 16.0 / 9.0;

// --- Tally glyphs ---

/// Shown once per destroyed tank in a roster tally.
pub const GLYPH_DESTROYED: char = '\u{2620}';

/// Shown once per live tank in a roster tally.
pub const GLYPH_ALIVE: char = '\u{26FD}';
