//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (cooldowns run on the simulation clock)
//! - Seeded RNG only
//! - Stable iteration order (insertion order, ids ascending)
//! - No rendering or platform dependencies

pub mod collision;
pub mod cooldown;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, within_radius};
pub use cooldown::Cooldown;
pub use spawner::{maybe_spawn_extra, pick_spawn_point, spawn_enemy};
pub use state::{
    Enemy, Field, GameEvent, GamePhase, GameState, KillCause, Player, Projectile, Pulse,
};
pub use tick::{TickInput, tick};
