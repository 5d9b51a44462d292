//! Pulse Dodge - a single-screen arcade dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning, cooldowns)
//! - `input`: Pointer/keyboard events to per-tick input snapshots
//! - `game`: Fixed-timestep loop driver tying input, simulation and drawing together
//! - `renderer`: Drawing surface abstraction, scene layout and WebGPU pipeline
//! - `settings`: JSON-backed runtime settings

pub mod error;
pub mod game;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SimError};
pub use game::Game;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz, the rate per-tick speeds are tuned for)
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame gap fed to the accumulator (tab switches, debugger pauses)
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Default playing field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 10.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    /// Enemies never spawn closer than this to the player
    pub const SPAWN_SAFE_RADIUS: f32 = 100.0;
    /// Rejection-sampling budget for a single spawn
    pub const MAX_SPAWN_ATTEMPTS: u32 = 1000;
    /// Enemies spawned when a run starts
    pub const INITIAL_ENEMIES: usize = 5;
    /// Chance per tick of an extra enemy appearing
    pub const SPAWN_CHANCE_PER_TICK: f64 = 0.02;
    /// Smallest field side that leaves rejection sampling a sizeable spawn zone
    /// around a centred player (over a third of a square field at this size)
    pub const MIN_FIELD_SIDE: f32 = 2.0 * (SPAWN_SAFE_RADIUS + ENEMY_RADIUS);

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 10.0;

    /// Pulse defaults
    pub const PULSE_MAX_RADIUS: f32 = 200.0;
    pub const PULSE_GROWTH: f32 = 5.0;

    /// Cooldowns (milliseconds of simulation time)
    pub const SHOT_COOLDOWN_MS: f64 = 500.0;
    pub const PULSE_COOLDOWN_MS: f64 = 60_000.0;

    /// Points per enemy destroyed, by any means
    pub const SCORE_PER_KILL: u64 = 10;
}

/// Unit vector from `from` toward `to`, or zero when the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}
