//! Drawing surface abstraction
//!
//! The scene only ever talks to this trait, so the same frame can be
//! tessellated for the GPU or recorded in tests.

use glam::Vec2;

/// Straight RGBA, components in [0, 1]
pub type Color = [f32; 4];

/// Horizontal anchoring of text relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Primitive drawing operations, all in field coordinates
pub trait Surface {
    /// Wipe the whole surface to `color`
    fn clear(&mut self, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Circle outline centred on `radius`, `line_width` wide
    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color);
    /// Pie slice from `start` sweeping clockwise by `sweep` radians
    fn fill_wedge(&mut self, center: Vec2, radius: f32, start: f32, sweep: f32, color: Color);
    /// Rectangle; translucency comes from the color's alpha
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);
    /// Text whose baseline passes through `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2, size_px: f32, align: TextAlign, color: Color);
}
