//! Hit detection between the character and the bill
//!
//! Distances are measured in percentage space, not pixels, so a wide
//! container stretches the hit area horizontally. That distortion is accepted.

use super::position::Position;

/// Result of a hit check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitCheck {
    /// Whether the character was close enough
    pub hit: bool,
    /// Distance between character and target
    pub distance: f32,
}

/// Euclidean distance between two positions
#[inline]
pub fn compute_distance(a: Position, b: Position) -> f32 {
    a.as_vec2().distance(b.as_vec2())
}

/// True iff the character is strictly closer than `threshold` to the target
#[inline]
pub fn is_hit(character: Position, target: Position, threshold: f32) -> bool {
    compute_distance(character, target) < threshold
}

/// Run a hit check and keep the distance for logging/feedback
pub fn check_hit(character: Position, target: Position, threshold: f32) -> HitCheck {
    let distance = compute_distance(character, target);
    HitCheck {
        hit: distance < threshold,
        distance,
    }
}
