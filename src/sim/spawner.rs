//! Enemy placement
//!
//! Rejection sampling over the whole field, keeping new enemies out of the
//! player's immediate surroundings.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, Field, GameEvent, GameState};
use crate::consts::{MAX_SPAWN_ATTEMPTS, SPAWN_SAFE_RADIUS};
use crate::distance;
use crate::error::SimError;

/// Draw uniform points in the field until one is at least `safe_radius` from `avoid`
pub fn pick_spawn_point<R: Rng>(
    rng: &mut R,
    field: &Field,
    avoid: Vec2,
    safe_radius: f32,
    max_attempts: u32,
) -> Result<Vec2, SimError> {
    for _ in 0..max_attempts {
        let candidate = Vec2::new(
            rng.random_range(0.0..field.width),
            rng.random_range(0.0..field.height),
        );
        if distance(candidate, avoid) >= safe_radius {
            return Ok(candidate);
        }
    }
    Err(SimError::SpawnExhausted {
        attempts: max_attempts,
    })
}

/// Add one enemy at a safe random position
pub fn spawn_enemy(state: &mut GameState) -> Result<GameEvent, SimError> {
    let pos = pick_spawn_point(
        &mut state.rng,
        &state.field,
        state.player.pos,
        SPAWN_SAFE_RADIUS,
        MAX_SPAWN_ATTEMPTS,
    )
    .inspect_err(|e| log::error!("Spawn failed: {e}"))?;
    let id = state.next_entity_id();
    state.enemies.push(Enemy::new(id, pos));
    Ok(GameEvent::EnemySpawned { id, pos })
}

/// Roll the per-tick chance of an extra enemy
pub fn maybe_spawn_extra(state: &mut GameState) -> Result<Option<GameEvent>, SimError> {
    let chance = state.spawn_chance.clamp(0.0, 1.0);
    if state.rng.random_bool(chance) {
        spawn_enemy(state).map(Some)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn spawns_respect_safe_radius() {
        let mut rng = Pcg32::seed_from_u64(42);
        let field = Field::default();
        let player = field.center();
        for _ in 0..500 {
            let p = pick_spawn_point(&mut rng, &field, player, 100.0, 1000).unwrap();
            assert!(distance(p, player) >= 100.0);
            assert!(!field.is_outside(p));
        }
    }

    #[test]
    fn exhausted_attempts_are_reported() {
        let mut rng = Pcg32::seed_from_u64(1);
        let field = Field::default();
        // Nothing in an 800x600 field is 10_000px away from its centre
        let result = pick_spawn_point(&mut rng, &field, field.center(), 10_000.0, 25);
        assert_eq!(result, Err(SimError::SpawnExhausted { attempts: 25 }));
    }

    #[test]
    fn spawn_enemy_assigns_fresh_ids() {
        let mut state = GameState::new(Field::default(), 5);
        let a = spawn_enemy(&mut state).unwrap();
        let b = spawn_enemy(&mut state).unwrap();
        match (a, b) {
            (GameEvent::EnemySpawned { id: ia, .. }, GameEvent::EnemySpawned { id: ib, .. }) => {
                assert_ne!(ia, ib)
            }
            other => panic!("unexpected events {other:?}"),
        }
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn extra_spawns_happen_occasionally() {
        let mut state = GameState::new(Field::default(), 11);
        let mut spawned = 0;
        for _ in 0..2000 {
            if maybe_spawn_extra(&mut state).unwrap().is_some() {
                spawned += 1;
            }
        }
        // 2% of 2000 is 40; allow generous slack
        assert!((10..=90).contains(&spawned), "spawned {spawned}");
    }
}
