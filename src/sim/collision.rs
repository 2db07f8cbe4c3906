//! Circle geometry: overlap tests, bounds clamping, obstacle blocking
//!
//! Everything in this game is a circle, so collision detection reduces to
//! center-distance checks against radius sums.

use glam::Vec2;

use super::state::Obstacle;

/// True if two circles overlap (strict: touching circles do not count)
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) < a_radius + b_radius
}

/// Clamp a circle center so the circle stays fully inside the bounds
#[inline]
pub fn clamp_to_bounds(pos: Vec2, radius: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(radius, width - radius),
        pos.y.clamp(radius, height - radius),
    )
}

/// True if a circle at `candidate` would intersect any obstacle. Movement is
/// rejected whole on a hit: no sliding along the blocker.
pub fn blocked_by_obstacle(candidate: Vec2, radius: f32, obstacles: &[Obstacle]) -> bool {
    obstacles
        .iter()
        .any(|o| circles_overlap(candidate, radius, o.pos, o.radius))
}
