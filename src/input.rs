//! Input intent tracking
//!
//! Browser events arrive whenever they like; they only update this record.
//! The loop driver takes one `TickInput` snapshot per tick, which consumes the
//! one-shot actions (shot, pulse) and leaves held keys in place.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::{GamePhase, TickInput};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Pulse,
}

impl Key {
    /// Map a browser `KeyboardEvent.key` value (case-insensitive)
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "w" | "arrowup" => Some(Key::Up),
            "s" | "arrowdown" => Some(Key::Down),
            "a" | "arrowleft" => Some(Key::Left),
            "d" | "arrowright" => Some(Key::Right),
            "f" => Some(Key::Pulse),
            _ => None,
        }
    }
}

/// Everything the player has asked for since the last tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pointer: Vec2,
    held: HashSet<Key>,
    pending_shot: Option<Vec2>,
    pending_pulse: bool,
    pending_start: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known pointer position in field coordinates
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    /// A click shoots during a run; otherwise it starts or restarts one
    pub fn pointer_clicked(&mut self, x: f32, y: f32, phase: GamePhase) {
        self.pointer = Vec2::new(x, y);
        match phase {
            GamePhase::Running => self.pending_shot = Some(self.pointer),
            GamePhase::Idle | GamePhase::GameOver => self.pending_start = true,
        }
    }

    /// Returns whether the key is one the game uses (so the caller can suppress scrolling)
    pub fn key_down(&mut self, name: &str) -> bool {
        let Some(key) = Key::from_key_name(name) else {
            return false;
        };
        if key == Key::Pulse {
            self.pending_pulse = true;
        }
        self.held.insert(key);
        true
    }

    pub fn key_up(&mut self, name: &str) -> bool {
        match Key::from_key_name(name) {
            Some(key) => {
                self.held.remove(&key);
                true
            }
            None => false,
        }
    }

    /// Start/restart button
    pub fn start_pressed(&mut self) {
        self.pending_start = true;
    }

    /// Forget held keys (focus lost, so key-up events will never arrive)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Movement direction from held keys; opposing keys cancel out
    pub fn movement(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.is_held(Key::Up) {
            dir.y -= 1.0;
        }
        if self.is_held(Key::Down) {
            dir.y += 1.0;
        }
        if self.is_held(Key::Left) {
            dir.x -= 1.0;
        }
        if self.is_held(Key::Right) {
            dir.x += 1.0;
        }
        dir
    }

    /// Consume a queued start/restart request
    pub fn take_start(&mut self) -> bool {
        std::mem::take(&mut self.pending_start)
    }

    /// Drop queued actions (a fresh run should not inherit clicks from the last one)
    pub fn clear_actions(&mut self) {
        self.pending_shot = None;
        self.pending_pulse = false;
        self.pending_start = false;
    }

    /// Capture this tick's input, consuming one-shot actions
    pub fn snapshot(&mut self) -> TickInput {
        TickInput {
            movement: self.movement(),
            shoot_at: self.pending_shot.take(),
            pulse: std::mem::take(&mut self.pending_pulse),
        }
    }
}
