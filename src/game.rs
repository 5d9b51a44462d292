//! Loop driver
//!
//! Owns the run state, the input record and the settings. The platform calls
//! `frame` once per display refresh with a timestamp; the driver converts real
//! time into a whole number of fixed simulation ticks and only ticks while a
//! run is active.

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, SIM_DT_MS};
use crate::error::{ConfigError, SimError};
use crate::input::InputState;
use crate::renderer::{Surface, draw_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, tick};

/// Game instance holding all state
pub struct Game {
    pub state: GameState,
    pub input: InputState,
    pub settings: Settings,
    accumulator: f64,
    last_time: Option<f64>,
}

impl Game {
    pub fn new(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        let field = settings.field()?;
        log::info!(
            "Game created: field {}x{}, seed {}",
            field.width,
            field.height,
            seed
        );
        Ok(Self {
            state: GameState::new(field, seed),
            input: InputState::new(),
            settings,
            accumulator: 0.0,
            last_time: None,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Advance to `time_ms` (a monotonic timestamp, e.g. from requestAnimationFrame).
    ///
    /// Handles a queued start/restart first, then runs as many fixed ticks as
    /// the elapsed time covers. An error means the run cannot continue.
    pub fn frame(&mut self, time_ms: f64) -> Result<Vec<GameEvent>, SimError> {
        let dt = match self.last_time {
            Some(last) => (time_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => SIM_DT_MS,
        };
        self.last_time = Some(time_ms);

        let mut events = Vec::new();

        if self.input.take_start() && self.state.phase != GamePhase::Running {
            self.input.clear_actions();
            self.accumulator = 0.0;
            events.extend(self.state.start_run()?);
        }

        if self.state.phase != GamePhase::Running {
            self.accumulator = 0.0;
            return Ok(events);
        }

        self.accumulator += dt;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            let input = self.input.snapshot();
            events.extend(tick(&mut self.state, &input)?);
            self.accumulator -= SIM_DT_MS;
            substeps += 1;

            if self.state.phase != GamePhase::Running {
                self.accumulator = 0.0;
                break;
            }
        }

        for event in &events {
            log_event(event);
        }
        Ok(events)
    }

    /// Draw the current state
    pub fn draw<S: Surface>(&self, surface: &mut S) {
        draw_frame(surface, &self.state, self.input.pointer(), &self.settings);
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::PlayerHit { enemy_id } => log::debug!("Player caught by enemy {enemy_id}"),
        GameEvent::EnemyDestroyed { id, cause } => log::trace!("Enemy {id} destroyed by {cause:?}"),
        GameEvent::EnemySpawned { id, pos } => {
            log::trace!("Enemy {id} spawned at ({:.0}, {:.0})", pos.x, pos.y)
        }
        GameEvent::ShotFired { id, .. } => log::trace!("Projectile {id} fired"),
        GameEvent::PulseFired { id, .. } => log::trace!("Pulse {id} fired"),
        GameEvent::RunStarted => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::ShapeBatch;
    use crate::sim::{Enemy, Field};
    use glam::Vec2;

    fn game() -> Game {
        Game::new(Settings::default(), 1234).unwrap()
    }

    #[test]
    fn rejects_invalid_field() {
        let settings = Settings {
            field_width: 5.0,
            ..Settings::default()
        };
        assert!(Game::new(settings, 1).is_err());
    }

    #[test]
    fn idle_until_started() {
        let mut g = game();
        assert!(g.frame(0.0).unwrap().is_empty());
        assert!(g.frame(1000.0).unwrap().is_empty());
        assert_eq!(g.phase(), GamePhase::Idle);
        assert_eq!(g.state.time_ticks, 0);

        g.input.pointer_clicked(100.0, 100.0, g.phase());
        let events = g.frame(1016.0).unwrap();
        assert!(events.contains(&GameEvent::RunStarted));
        assert_eq!(g.phase(), GamePhase::Running);
        // The click that started the run does not also fire a shot
        assert!(g.state.projectiles.is_empty());
    }

    #[test]
    fn fixed_timestep_accumulates_partial_frames() {
        let mut g = game();
        g.input.start_pressed();
        g.frame(0.0).unwrap();
        let after_first = g.state.time_ticks;
        assert_eq!(after_first, 1);

        g.frame(8.0).unwrap();
        assert_eq!(g.state.time_ticks, after_first);
        g.frame(17.0).unwrap();
        assert_eq!(g.state.time_ticks, after_first + 1);
    }

    #[test]
    fn long_gaps_are_clamped() {
        let mut g = game();
        g.state.spawn_chance = 0.0;
        g.input.start_pressed();
        g.frame(0.0).unwrap();
        g.state.enemies.clear();
        let before = g.state.time_ticks;
        g.frame(60_000.0).unwrap();
        let ran = g.state.time_ticks - before;
        assert!(ran <= 6, "ran {ran} ticks");
        assert!(ran >= 5, "ran {ran} ticks");
    }

    #[test]
    fn one_shot_input_consumed_by_single_tick() {
        let mut g = game();
        g.state.spawn_chance = 0.0;
        g.input.start_pressed();
        g.frame(0.0).unwrap();
        g.state.enemies.clear();

        g.input.pointer_clicked(0.0, 300.0, g.phase());
        // 50 ms covers three ticks; only the first one sees the click
        g.frame(50.0).unwrap();
        assert_eq!(g.state.projectiles.len(), 1);
        assert!(g.state.shot_cooldown.last_used_ms.is_some());
    }

    #[test]
    fn ticking_stops_at_game_over_and_click_restarts() {
        let mut g = game();
        g.input.start_pressed();
        g.frame(0.0).unwrap();

        let id = g.state.next_entity_id();
        let pos = g.state.player.pos + Vec2::new(25.0, 0.0);
        g.state.enemies.push(Enemy::new(id, pos));
        g.frame(20.0).unwrap();
        assert_eq!(g.phase(), GamePhase::GameOver);

        let ticks = g.state.time_ticks;
        g.input.key_down("d");
        g.frame(40.0).unwrap();
        g.frame(60.0).unwrap();
        assert_eq!(g.state.time_ticks, ticks);

        g.input.pointer_clicked(10.0, 10.0, g.phase());
        g.frame(80.0).unwrap();
        assert_eq!(g.phase(), GamePhase::Running);
        assert_eq!(g.state.score, 0);
    }

    #[test]
    fn spawn_failure_mid_run_is_an_error() {
        let mut g = game();
        g.input.start_pressed();
        g.frame(0.0).unwrap();

        // No point of this field is clear of a centred player
        g.state.field = Field {
            width: 100.0,
            height: 100.0,
        };
        g.state.player.pos = g.state.field.center();
        g.state.enemies.clear();
        g.state.spawn_chance = 1.0;

        let err = g.frame(20.0).unwrap_err();
        assert_eq!(err, SimError::SpawnExhausted { attempts: 1000 });
    }

    #[test]
    fn spawn_failure_at_run_start_is_an_error() {
        let mut g = game();
        g.state.field = Field {
            width: 100.0,
            height: 100.0,
        };
        g.input.start_pressed();
        assert!(g.frame(0.0).is_err());
        assert_ne!(g.phase(), GamePhase::Running);
    }

    #[test]
    fn draw_fills_a_batch() {
        let mut g = game();
        g.input.start_pressed();
        g.frame(0.0).unwrap();
        let mut batch = ShapeBatch::new();
        g.draw(&mut batch);
        assert!(!batch.vertices.is_empty());
        assert!(batch.labels.iter().any(|l| l.text.starts_with("Score:")));
    }
}
