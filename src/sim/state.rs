//! Game state and core simulation types
//!
//! Everything a run needs lives in `GameState`; the tick and the spawner only
//! ever mutate state handed to them.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::cooldown::Cooldown;
use super::spawner;
use crate::consts::*;
use crate::direction_to;
use crate::error::{ConfigError, SimError};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Nothing started yet, waiting for the start trigger
    Idle,
    /// Active gameplay
    Running,
    /// Player was caught; only a restart is accepted
    GameOver,
}

/// What removed an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillCause {
    Projectile,
    Pulse,
}

/// Notable things that happened during a tick or action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    RunStarted,
    EnemySpawned { id: u32, pos: Vec2 },
    ShotFired { id: u32, target: Vec2 },
    PulseFired { id: u32, origin: Vec2 },
    EnemyDestroyed { id: u32, cause: KillCause },
    PlayerHit { enemy_id: u32 },
}

/// Rectangular playing field, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    /// Validate that the field can hold a player and still leave room to spawn enemies
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        if !(width >= 2.0 * PLAYER_RADIUS && height >= 2.0 * PLAYER_RADIUS) {
            return Err(ConfigError::FieldTooSmall {
                width,
                height,
                player_radius: PLAYER_RADIUS,
            });
        }
        if width < MIN_FIELD_SIDE || height < MIN_FIELD_SIDE {
            return Err(ConfigError::SafeRadiusUnreachable {
                width,
                height,
                safe_radius: SPAWN_SAFE_RADIUS,
            });
        }
        Ok(Self { width, height })
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True once a point has left the field (edges count as inside)
    pub fn is_outside(&self, pos: Vec2) -> bool {
        pos.x < 0.0 || pos.x > self.width || pos.y < 0.0 || pos.y > self.height
    }

    /// Clamp a circle's centre so the whole circle stays inside
    pub fn clamp_circle(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            pos.x.clamp(radius, self.width - radius),
            pos.y.clamp(radius, self.height - radius),
        )
    }
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

/// The player's circle
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
        }
    }

    /// Step by `dir * speed`, staying fully inside the field
    pub fn move_by(&mut self, dir: Vec2, field: &Field) {
        self.pos = field.clamp_circle(self.pos + dir * self.speed, self.radius);
    }
}

/// A circle that chases the player
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            radius: ENEMY_RADIUS,
            speed: ENEMY_SPEED,
        }
    }

    /// Re-aim at `target` and advance one tick. An enemy sitting exactly on its
    /// target has no direction and stays put.
    pub fn seek(&mut self, target: Vec2) {
        self.pos += direction_to(self.pos, target) * self.speed;
    }
}

/// A straight-flying shot
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Projectile {
    /// Aim from `origin` toward `target`. Returns `None` when the two coincide,
    /// since such a shot would hang in place forever.
    pub fn aimed(id: u32, origin: Vec2, target: Vec2) -> Option<Self> {
        let dir = direction_to(origin, target);
        if dir == Vec2::ZERO {
            return None;
        }
        Some(Self {
            id,
            pos: origin,
            vel: dir * PROJECTILE_SPEED,
            radius: PROJECTILE_RADIUS,
        })
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// An expanding ring that wipes out every enemy it engulfs
#[derive(Debug, Clone)]
pub struct Pulse {
    pub id: u32,
    pub origin: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub growth: f32,
}

impl Pulse {
    pub fn new(id: u32, origin: Vec2) -> Self {
        Self {
            id,
            origin,
            radius: 0.0,
            max_radius: PULSE_MAX_RADIUS,
            growth: PULSE_GROWTH,
        }
    }

    pub fn grow(&mut self) {
        self.radius += self.growth;
    }

    pub fn is_finished(&self) -> bool {
        self.radius >= self.max_radius
    }
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState {
    pub field: Field,
    pub phase: GamePhase,
    pub score: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub pulses: Vec<Pulse>,
    pub shot_cooldown: Cooldown,
    pub pulse_cooldown: Cooldown,
    /// Simulation clock (ms since run start)
    pub time_ms: f64,
    /// Ticks since run start
    pub time_ticks: u64,
    /// Seed the RNG was created from
    pub seed: u64,
    /// Chance per tick of an extra enemy appearing
    pub spawn_chance: f64,
    pub(super) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an idle state; call `start_run` to begin playing
    pub fn new(field: Field, seed: u64) -> Self {
        Self {
            field,
            phase: GamePhase::Idle,
            score: 0,
            player: Player::new(field.center()),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            pulses: Vec::new(),
            shot_cooldown: Cooldown::new(SHOT_COOLDOWN_MS),
            pulse_cooldown: Cooldown::new(PULSE_COOLDOWN_MS),
            time_ms: 0.0,
            time_ticks: 0,
            seed,
            spawn_chance: SPAWN_CHANCE_PER_TICK,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset everything and begin a fresh run (also used for restart)
    pub fn start_run(&mut self) -> Result<Vec<GameEvent>, SimError> {
        self.enemies.clear();
        self.projectiles.clear();
        self.pulses.clear();
        self.score = 0;
        self.shot_cooldown.reset();
        self.pulse_cooldown.reset();
        self.time_ms = 0.0;
        self.time_ticks = 0;
        self.player = Player::new(self.field.center());

        let mut events = vec![GameEvent::RunStarted];
        for _ in 0..INITIAL_ENEMIES {
            events.push(spawner::spawn_enemy(self)?);
        }
        self.phase = GamePhase::Running;
        log::info!(
            "Run started with {} enemies (seed {})",
            self.enemies.len(),
            self.seed
        );
        Ok(events)
    }

    /// Fire a projectile from the player toward `target` if the shot cooldown allows
    pub fn try_shoot(&mut self, target: Vec2) -> Option<GameEvent> {
        if self.phase != GamePhase::Running || !self.shot_cooldown.is_ready(self.time_ms) {
            return None;
        }
        // A shot with no direction is dropped before it can spend the cooldown
        let projectile = Projectile::aimed(self.next_id, self.player.pos, target)?;
        self.shot_cooldown.try_use(self.time_ms);
        let id = self.next_entity_id();
        self.projectiles.push(projectile);
        Some(GameEvent::ShotFired { id, target })
    }

    /// Emit a pulse at the player's position if the pulse cooldown allows
    pub fn try_pulse(&mut self) -> Option<GameEvent> {
        if self.phase != GamePhase::Running || !self.pulse_cooldown.try_use(self.time_ms) {
            return None;
        }
        let id = self.next_entity_id();
        let origin = self.player.pos;
        self.pulses.push(Pulse::new(id, origin));
        log::debug!("Pulse fired at ({:.0}, {:.0})", origin.x, origin.y);
        Some(GameEvent::PulseFired { id, origin })
    }

    /// Shot cooldown recharge fraction for the HUD
    pub fn shot_progress(&self) -> f32 {
        self.shot_cooldown.progress(self.time_ms)
    }

    /// Pulse cooldown recharge fraction for the HUD
    pub fn pulse_progress(&self) -> f32 {
        self.pulse_cooldown.progress(self.time_ms)
    }
}
