//! Circle overlap tests
//!
//! Every entity is a circle, so contact reduces to comparing centre distance
//! against radii. Touching exactly at the rim is not a hit for two bodies, but
//! it is for a pulse: an enemy whose centre sits on the ring is engulfed.

use glam::Vec2;

/// Two circles overlap (strictly closer than the sum of radii)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// A point lies inside or on a circle
#[inline]
pub fn within_radius(center: Vec2, radius: f32, point: Vec2) -> bool {
    center.distance(point) <= radius
}
