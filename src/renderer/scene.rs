//! Scene layout
//!
//! Decides what a frame looks like for each run phase and issues the drawing
//! calls. Knows nothing about how the surface turns them into pixels.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, TAU};

use super::surface::{Color, Surface, TextAlign};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};

/// Colors for game elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub player: Color,
    pub enemy: Color,
    pub projectile: Color,
    pub pulse: Color,
    pub reticle: Color,
    pub dial_track: Color,
    pub text: Color,
    pub overlay: Color,
}

impl Palette {
    pub const STANDARD: Palette = Palette {
        background: [0.02, 0.02, 0.05, 1.0],
        player: [0.0, 0.0, 1.0, 1.0],
        enemy: [1.0, 0.0, 0.0, 1.0],
        projectile: [1.0, 1.0, 0.0, 1.0],
        pulse: [0.5, 0.0, 0.5, 1.0],
        reticle: [1.0, 1.0, 1.0, 0.35],
        dial_track: [0.5, 0.5, 0.5, 1.0],
        text: [1.0, 1.0, 1.0, 1.0],
        overlay: [0.0, 0.0, 0.0, 0.75],
    };

    pub const HIGH_CONTRAST: Palette = Palette {
        background: [0.0, 0.0, 0.0, 1.0],
        player: [0.0, 0.9, 1.0, 1.0],
        enemy: [1.0, 0.45, 0.0, 1.0],
        projectile: [1.0, 1.0, 1.0, 1.0],
        pulse: [1.0, 0.2, 1.0, 1.0],
        reticle: [1.0, 1.0, 1.0, 0.8],
        dial_track: [0.35, 0.35, 0.35, 1.0],
        text: [1.0, 1.0, 1.0, 1.0],
        overlay: [0.0, 0.0, 0.0, 0.85],
    };

    pub fn for_settings(settings: &Settings) -> &'static Palette {
        if settings.high_contrast {
            &Palette::HIGH_CONTRAST
        } else {
            &Palette::STANDARD
        }
    }
}

/// Cooldown dial radius
pub const DIAL_RADIUS: f32 = 20.0;
/// Shot and pulse dial centres
pub const SHOT_DIAL_POS: Vec2 = Vec2::new(10.0, 10.0);
pub const PULSE_DIAL_POS: Vec2 = Vec2::new(10.0, 50.0);
/// Score baseline
pub const SCORE_POS: Vec2 = Vec2::new(10.0, 100.0);

const PULSE_LINE_WIDTH: f32 = 3.0;
const RETICLE_RADIUS: f32 = 6.0;

/// Draw one frame of the game
pub fn draw_frame<S: Surface>(
    surface: &mut S,
    state: &GameState,
    pointer: Vec2,
    settings: &Settings,
) {
    let palette = Palette::for_settings(settings);
    surface.clear(palette.background);

    if state.phase == GamePhase::Idle {
        draw_title(surface, state, palette);
        return;
    }

    draw_world(surface, state, palette);

    if state.phase == GamePhase::Running && settings.show_reticle {
        surface.stroke_circle(pointer, RETICLE_RADIUS, 1.5, palette.reticle);
    }

    if settings.show_cooldowns {
        draw_dial(
            surface,
            SHOT_DIAL_POS,
            state.shot_progress(),
            palette.dial_track,
            palette.projectile,
        );
        draw_dial(
            surface,
            PULSE_DIAL_POS,
            state.pulse_progress(),
            palette.dial_track,
            palette.pulse,
        );
    }
    if settings.show_score {
        surface.draw_text(
            &format!("Score: {}", state.score),
            SCORE_POS,
            24.0,
            TextAlign::Left,
            palette.text,
        );
    }

    if state.phase == GamePhase::GameOver {
        draw_game_over(surface, state, palette);
    }
}

fn draw_world<S: Surface>(surface: &mut S, state: &GameState, palette: &Palette) {
    let player = &state.player;
    surface.fill_circle(player.pos, player.radius, palette.player);
    for enemy in &state.enemies {
        surface.fill_circle(enemy.pos, enemy.radius, palette.enemy);
    }
    for projectile in &state.projectiles {
        surface.fill_circle(projectile.pos, projectile.radius, palette.projectile);
    }
    for pulse in &state.pulses {
        surface.stroke_circle(pulse.origin, pulse.radius, PULSE_LINE_WIDTH, palette.pulse);
    }
}

/// Grey disc with a clockwise pie from 12 o'clock showing recharge progress
fn draw_dial<S: Surface>(surface: &mut S, center: Vec2, progress: f32, track: Color, fill: Color) {
    surface.fill_circle(center, DIAL_RADIUS, track);
    surface.fill_wedge(
        center,
        DIAL_RADIUS,
        -FRAC_PI_2,
        TAU * progress.clamp(0.0, 1.0),
        fill,
    );
}

fn draw_title<S: Surface>(surface: &mut S, state: &GameState, palette: &Palette) {
    let center = state.field.center();
    surface.draw_text(
        "Pulse Dodge",
        center - Vec2::new(0.0, 60.0),
        48.0,
        TextAlign::Center,
        palette.text,
    );
    surface.draw_text(
        "Click to Start",
        center + Vec2::new(0.0, 10.0),
        24.0,
        TextAlign::Center,
        palette.text,
    );
    surface.draw_text(
        "WASD to move, click to shoot, F to pulse",
        center + Vec2::new(0.0, 50.0),
        18.0,
        TextAlign::Center,
        palette.text,
    );
}

fn draw_game_over<S: Surface>(surface: &mut S, state: &GameState, palette: &Palette) {
    let field = state.field;
    surface.fill_rect(Vec2::ZERO, Vec2::new(field.width, field.height), palette.overlay);

    let center = field.center();
    surface.draw_text(
        "Game Over",
        center - Vec2::new(0.0, 100.0),
        48.0,
        TextAlign::Center,
        palette.text,
    );
    surface.draw_text(
        &format!("Final Score: {}", state.score),
        center - Vec2::new(0.0, 20.0),
        36.0,
        TextAlign::Center,
        palette.text,
    );
    surface.draw_text(
        "Click to Restart",
        center + Vec2::new(0.0, 50.0),
        24.0,
        TextAlign::Center,
        palette.text,
    );
}
