//! Error types
//!
//! Gameplay rejections (cooldowns, actions outside a run) are silent no-ops and
//! never show up here. These cover configuration that cannot produce a playable
//! field and the one simulation failure that cannot be recovered within a run.

use thiserror::Error;

/// Invalid settings or field geometry
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("field {width}x{height} cannot contain a player of radius {player_radius}")]
    FieldTooSmall {
        width: f32,
        height: f32,
        player_radius: f32,
    },
    #[error("field {width}x{height} has no room to spawn {safe_radius}px from the player")]
    SafeRadiusUnreachable {
        width: f32,
        height: f32,
        safe_radius: f32,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fatal simulation failures
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("no spawn position found outside the safe radius after {attempts} attempts")]
    SpawnExhausted { attempts: u32 },
}
