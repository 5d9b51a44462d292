//! Frame batching
//!
//! `ShapeBatch` turns surface calls into one triangle list for the GPU pass
//! plus a list of text labels, which the page lays out over the canvas.

use glam::Vec2;

use super::shapes;
use super::surface::{Color, Surface, TextAlign};
use super::vertex::Vertex;

/// A piece of text to place over the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub pos: Vec2,
    pub size_px: f32,
    pub align: TextAlign,
    pub color: Color,
}

impl Label {
    /// CSS color string for the label
    pub fn css_color(&self) -> String {
        let [r, g, b, a] = self.color;
        format!(
            "rgba({}, {}, {}, {})",
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
            a
        )
    }
}

/// One frame's worth of geometry and text
#[derive(Debug, Clone, Default)]
pub struct ShapeBatch {
    pub clear_color: Color,
    pub vertices: Vec<Vertex>,
    pub labels: Vec<Label>,
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for ShapeBatch {
    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.vertices.clear();
        self.labels.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let segments = shapes::segments_for(radius);
        self.vertices
            .extend(shapes::circle(center, radius, color, segments));
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color) {
        let half = line_width / 2.0;
        let segments = shapes::segments_for(radius);
        self.vertices.extend(shapes::ring(
            center,
            radius - half,
            radius + half,
            color,
            segments,
        ));
    }

    fn fill_wedge(&mut self, center: Vec2, radius: f32, start: f32, sweep: f32, color: Color) {
        let segments = shapes::segments_for(radius);
        self.vertices
            .extend(shapes::wedge(center, radius, start, sweep, color, segments));
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.vertices.extend(shapes::rect(origin, size, color));
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size_px: f32, align: TextAlign, color: Color) {
        self.labels.push(Label {
            text: text.to_string(),
            pos,
            size_px,
            align,
            color,
        });
    }
}
