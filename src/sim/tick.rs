//! Fixed timestep simulation tick
//!
//! Resolution order within one tick:
//! 1. queued actions (shot, pulse) against the clock
//! 2. player movement
//! 3. enemy seeking and the player-contact check (ends the run)
//! 4. projectiles: advance, hit enemies, leave the field
//! 5. pulses: grow, engulf enemies, expire
//! 6. compaction of everything marked dead, then the random extra spawn

use glam::Vec2;

use super::collision::{circles_overlap, within_radius};
use super::spawner::maybe_spawn_extra;
use super::state::{GameEvent, GamePhase, GameState, KillCause};
use crate::consts::*;
use crate::error::SimError;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Movement direction, each axis in [-1, 1]
    pub movement: Vec2,
    /// Fire a projectile toward this point
    pub shoot_at: Option<Vec2>,
    /// Trigger the pulse
    pub pulse: bool,
}

/// Advance the game state by one fixed timestep.
///
/// Does nothing unless the run is active. Returns the events the tick produced.
pub fn tick(state: &mut GameState, input: &TickInput) -> Result<Vec<GameEvent>, SimError> {
    if state.phase != GamePhase::Running {
        return Ok(Vec::new());
    }

    let mut events = Vec::new();

    if let Some(target) = input.shoot_at {
        events.extend(state.try_shoot(target));
    }
    if input.pulse {
        events.extend(state.try_pulse());
    }

    state.time_ticks += 1;
    state.time_ms = state.time_ticks as f64 * SIM_DT_MS;

    let movement = input.movement.clamp(Vec2::NEG_ONE, Vec2::ONE);
    state.player.move_by(movement, &state.field);

    // Enemies close in; any contact ends the run before shots resolve
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;
    let mut caught_by = None;
    for enemy in &mut state.enemies {
        enemy.seek(player_pos);
        if caught_by.is_none()
            && circles_overlap(enemy.pos, enemy.radius, player_pos, player_radius)
        {
            caught_by = Some(enemy.id);
        }
    }
    if let Some(enemy_id) = caught_by {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::PlayerHit { enemy_id });
        log::info!(
            "Run over after {} ticks, final score {}",
            state.time_ticks,
            state.score
        );
        return Ok(events);
    }

    // Marks are committed only after every check has run, so an enemy can die once per tick
    let mut destroyed = vec![false; state.enemies.len()];
    let mut spent = vec![false; state.projectiles.len()];
    let mut kills = 0u64;

    for (projectile, spent) in state.projectiles.iter_mut().zip(spent.iter_mut()) {
        projectile.advance();
        let mut hit = false;
        for (enemy, dead) in state.enemies.iter().zip(destroyed.iter_mut()) {
            if *dead {
                continue;
            }
            if circles_overlap(projectile.pos, projectile.radius, enemy.pos, enemy.radius) {
                *dead = true;
                hit = true;
                kills += 1;
                events.push(GameEvent::EnemyDestroyed {
                    id: enemy.id,
                    cause: KillCause::Projectile,
                });
            }
        }
        *spent = hit || state.field.is_outside(projectile.pos);
    }

    for pulse in &mut state.pulses {
        pulse.grow();
        for (enemy, dead) in state.enemies.iter().zip(destroyed.iter_mut()) {
            if !*dead && within_radius(pulse.origin, pulse.radius, enemy.pos) {
                *dead = true;
                kills += 1;
                events.push(GameEvent::EnemyDestroyed {
                    id: enemy.id,
                    cause: KillCause::Pulse,
                });
            }
        }
    }

    state.score += kills * SCORE_PER_KILL;
    retain_unmarked(&mut state.enemies, &destroyed);
    retain_unmarked(&mut state.projectiles, &spent);
    state.pulses.retain(|p| !p.is_finished());

    events.extend(maybe_spawn_extra(state)?);

    Ok(events)
}

/// Drop every element whose mark is set
fn retain_unmarked<T>(items: &mut Vec<T>, marks: &[bool]) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !marks.get(index).copied().unwrap_or(false);
        index += 1;
        keep
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, Field, Projectile, Pulse};

    /// A running 800x600 state with no enemies and no random spawns
    fn empty_run(seed: u64) -> GameState {
        let mut state = GameState::new(Field::default(), seed);
        state.start_run().unwrap();
        state.enemies.clear();
        state.spawn_chance = 0.0;
        state
    }

    fn add_enemy(state: &mut GameState, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, pos));
        id
    }

    fn count_kills(events: &[GameEvent], id: u32) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyDestroyed { id: eid, .. } if *eid == id))
            .count()
    }

    #[test]
    fn test_tick_idle_is_noop() {
        let mut state = GameState::new(Field::default(), 1);
        let events = tick(&mut state, &TickInput::default()).unwrap();
        assert!(events.is_empty());
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_player_moves_with_input() {
        let mut state = empty_run(2);
        let input = TickInput {
            movement: Vec2::new(1.0, -1.0),
            ..Default::default()
        };
        tick(&mut state, &input).unwrap();
        assert_eq!(state.player.pos, Vec2::new(405.0, 295.0));
    }

    #[test]
    fn test_oversized_movement_is_clamped() {
        let mut state = empty_run(2);
        let input = TickInput {
            movement: Vec2::new(50.0, 0.0),
            ..Default::default()
        };
        tick(&mut state, &input).unwrap();
        assert_eq!(state.player.pos, Vec2::new(405.0, 300.0));
    }

    #[test]
    fn test_enemy_contact_ends_run() {
        let mut state = empty_run(3);
        let id = add_enemy(&mut state, Vec2::new(431.0, 300.0));
        let events = tick(&mut state, &TickInput::default()).unwrap();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::PlayerHit { enemy_id: id }));
    }

    #[test]
    fn test_game_over_ignores_input() {
        let mut state = empty_run(4);
        add_enemy(&mut state, Vec2::new(425.0, 300.0));
        tick(&mut state, &TickInput::default()).unwrap();
        assert_eq!(state.phase, GamePhase::GameOver);

        let player_before = state.player.pos;
        let ticks_before = state.time_ticks;
        let input = TickInput {
            movement: Vec2::new(1.0, 0.0),
            shoot_at: Some(Vec2::ZERO),
            pulse: true,
        };
        let events = tick(&mut state, &input).unwrap();
        assert!(events.is_empty());
        assert_eq!(state.player.pos, player_before);
        assert_eq!(state.time_ticks, ticks_before);
        assert!(state.projectiles.is_empty());
        assert!(state.pulses.is_empty());
    }

    #[test]
    fn test_projectile_kills_enemy_and_scores() {
        let mut state = empty_run(5);
        let id = add_enemy(&mut state, Vec2::new(400.0, 150.0));
        let input = TickInput {
            shoot_at: Some(Vec2::new(400.0, 0.0)),
            ..Default::default()
        };
        let mut events = tick(&mut state, &input).unwrap();
        for _ in 0..20 {
            if state.enemies.is_empty() {
                break;
            }
            events.extend(tick(&mut state, &TickInput::default()).unwrap());
        }
        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, SCORE_PER_KILL);
        assert_eq!(count_kills(&events, id), 1);
    }

    #[test]
    fn test_projectile_leaving_field_is_removed() {
        let mut state = empty_run(6);
        let input = TickInput {
            shoot_at: Some(Vec2::ZERO),
            ..Default::default()
        };
        tick(&mut state, &input).unwrap();
        for _ in 0..48 {
            tick(&mut state, &TickInput::default()).unwrap();
            let p = &state.projectiles[0];
            // Straight line from (400, 300) toward the origin: y = 0.75 x
            assert!((p.pos.y - 0.75 * p.pos.x).abs() < 0.01);
        }
        for _ in 0..3 {
            tick(&mut state, &TickInput::default()).unwrap();
        }
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_shot_cooldown_through_tick() {
        let mut state = empty_run(7);
        let fire = TickInput {
            shoot_at: Some(Vec2::new(0.0, 300.0)),
            ..Default::default()
        };
        tick(&mut state, &fire).unwrap();
        tick(&mut state, &fire).unwrap();
        assert_eq!(state.projectiles.len(), 1);

        // 31 ticks covers the 500 ms cooldown at 60 Hz
        for _ in 0..31 {
            tick(&mut state, &TickInput::default()).unwrap();
        }
        tick(&mut state, &fire).unwrap();
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_pulse_engulfs_enemies_in_radius() {
        let mut state = empty_run(8);
        let near = add_enemy(&mut state, Vec2::new(400.0, 150.0));
        let far = add_enemy(&mut state, Vec2::new(20.0, 20.0));
        let input = TickInput {
            pulse: true,
            ..Default::default()
        };
        let mut events = tick(&mut state, &input).unwrap();
        assert_eq!(state.pulses.len(), 1);

        let mut ticks = 1;
        while !state.pulses.is_empty() {
            events.extend(tick(&mut state, &TickInput::default()).unwrap());
            ticks += 1;
        }
        assert_eq!(ticks, (PULSE_MAX_RADIUS / PULSE_GROWTH) as u32);
        assert_eq!(count_kills(&events, near), 1);
        assert_eq!(count_kills(&events, far), 0);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, SCORE_PER_KILL);
    }

    #[test]
    fn test_pulse_and_projectile_on_same_enemy_score_once() {
        let mut state = empty_run(9);
        let id = add_enemy(&mut state, Vec2::new(100.0, 100.0));

        let projectile_id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id: projectile_id,
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            radius: PROJECTILE_RADIUS,
        });
        let pulse_id = state.next_entity_id();
        let mut pulse = Pulse::new(pulse_id, Vec2::new(100.0, 100.0));
        pulse.radius = 45.0;
        state.pulses.push(pulse);

        let events = tick(&mut state, &TickInput::default()).unwrap();
        assert_eq!(count_kills(&events, id), 1);
        assert_eq!(state.score, SCORE_PER_KILL);
        assert!(state.enemies.is_empty());
        // The projectile connected, so it is gone too
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_projectile_destroys_every_enemy_it_overlaps() {
        let mut state = empty_run(10);
        let a = add_enemy(&mut state, Vec2::new(100.0, 100.0));
        let b = add_enemy(&mut state, Vec2::new(104.0, 100.0));
        let projectile_id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id: projectile_id,
            pos: Vec2::new(102.0, 100.0),
            vel: Vec2::ZERO,
            radius: PROJECTILE_RADIUS,
        });
        let events = tick(&mut state, &TickInput::default()).unwrap();
        assert_eq!(count_kills(&events, a), 1);
        assert_eq!(count_kills(&events, b), 1);
        assert_eq!(state.score, 2 * SCORE_PER_KILL);
    }

    #[test]
    fn test_enemies_close_in_on_stationary_player() {
        let mut state = empty_run(11);
        add_enemy(&mut state, Vec2::new(700.0, 500.0));
        let mut last = state.enemies[0].pos.distance(state.player.pos);
        while state.phase == GamePhase::Running {
            tick(&mut state, &TickInput::default()).unwrap();
            let d = state.enemies[0].pos.distance(state.player.pos);
            assert!(d < last);
            last = d;
        }
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_retain_unmarked() {
        let mut items = vec![1, 2, 3, 4];
        retain_unmarked(&mut items, &[false, true, false, true]);
        assert_eq!(items, vec![1, 3]);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(Field::default(), 99999);
        let mut state2 = GameState::new(Field::default(), 99999);
        state1.start_run().unwrap();
        state2.start_run().unwrap();

        let inputs = [
            TickInput {
                movement: Vec2::new(1.0, 0.0),
                ..Default::default()
            },
            TickInput {
                shoot_at: Some(Vec2::new(10.0, 10.0)),
                ..Default::default()
            },
            TickInput {
                pulse: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input).unwrap();
                tick(&mut state2, input).unwrap();
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }
}
