//! # Narrow-Phase Geometry
//!
//! Circle overlap is the only exact test in the engine. Everything is
//! compared in squared space so no square root is ever taken.

use crate::entity::Circle;

/// Returns the squared Euclidean distance between two points.
#[inline]
#[must_use]
pub fn distance_squared(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x1 - x2;
    let dy = y1 - y2;
    dx * dx + dy * dy
}

/// Returns `true` if two circles strictly overlap.
///
/// Tangent circles do not overlap: the squared distance must be strictly
/// less than the squared sum of radii.
#[inline]
#[must_use]
pub fn circles_overlap(a: Circle, b: Circle) -> bool {
    let radius_sum = a.radius + b.radius;
    distance_squared(a.x, a.y, b.x, b.y) < radius_sum * radius_sum
}
