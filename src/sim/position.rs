//! Positions inside the play field
//!
//! Everything is expressed as percentages of the container so the simulation
//! never needs to know the on-screen size.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// A point in container percentage space, nominally [0,100] on each axis
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const CENTER: Self = Self { x: 50.0, y: 50.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec2> for Position {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// On-screen bounding rectangle of the play field (client pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerBounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ContainerBounds {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Map an absolute pointer location into container percentages.
///
/// Not clamped: near the edges the result may fall slightly outside
/// [0,100], the view clips it. A zero-sized container yields `None`.
pub fn character_position_from_pointer(
    pointer: Vec2,
    bounds: &ContainerBounds,
) -> Option<Position> {
    if bounds.width <= 0.0 || bounds.height <= 0.0 {
        return None;
    }
    let x = (pointer.x - bounds.left) / bounds.width * 100.0;
    let y = (pointer.y - bounds.top) / bounds.height * 100.0;
    Some(Position::new(x, y))
}

/// Random target spot inside the tuning's safe spawn area (inclusive).
///
/// Never panics: bounds given high-to-low are swapped and a non-finite bound
/// pins that axis to the field center. [`Tuning::validate`] rejects both.
pub fn random_target_position<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Position {
    let x = sample_axis(rng, tuning.target_x_range);
    let y = sample_axis(rng, tuning.target_y_range);
    Position::new(x, y)
}

fn sample_axis<R: Rng + ?Sized>(rng: &mut R, (a, b): (f32, f32)) -> f32 {
    if !(a.is_finite() && b.is_finite()) {
        return Position::CENTER.x;
    }
    rng.random_range(a.min(b)..=a.max(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_pointer_maps_to_percentages() {
        let bounds = ContainerBounds::new(100.0, 50.0, 400.0, 200.0);

        let center = character_position_from_pointer(Vec2::new(300.0, 150.0), &bounds).unwrap();
        assert_eq!(center, Position::CENTER);

        let corner = character_position_from_pointer(Vec2::new(100.0, 50.0), &bounds).unwrap();
        assert_eq!(corner, Position::new(0.0, 0.0));
    }

    #[test]
    fn test_pointer_outside_container_is_not_clamped() {
        let bounds = ContainerBounds::new(0.0, 0.0, 200.0, 100.0);
        let pos = character_position_from_pointer(Vec2::new(250.0, -25.0), &bounds).unwrap();
        assert_eq!(pos, Position::new(125.0, -25.0));
    }

    #[test]
    fn test_degenerate_container() {
        let bounds = ContainerBounds::new(0.0, 0.0, 0.0, 100.0);
        assert!(character_position_from_pointer(Vec2::new(10.0, 10.0), &bounds).is_none());
    }

    #[test]
    fn test_target_stays_in_spawn_area() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2024);
        for _ in 0..10_000 {
            let pos = random_target_position(&mut rng, &tuning);
            assert!((10.0..=90.0).contains(&pos.x), "x out of range: {}", pos.x);
            assert!((15.0..=85.0).contains(&pos.y), "y out of range: {}", pos.y);
        }
    }

    #[test]
    fn test_inverted_range_is_swapped() {
        let tuning = Tuning {
            target_x_range: (90.0, 10.0),
            target_y_range: (85.0, 15.0),
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1_000 {
            let pos = random_target_position(&mut rng, &tuning);
            assert!((10.0..=90.0).contains(&pos.x), "x out of range: {}", pos.x);
            assert!((15.0..=85.0).contains(&pos.y), "y out of range: {}", pos.y);
        }
    }

    #[test]
    fn test_degenerate_ranges() {
        let tuning = Tuning {
            target_x_range: (40.0, 40.0),
            target_y_range: (f32::NAN, 85.0),
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(8);
        assert_eq!(random_target_position(&mut rng, &tuning), Position::new(40.0, 50.0));
    }

    proptest! {
        #[test]
        fn prop_target_in_bounds(seed in any::<u64>()) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let pos = random_target_position(&mut rng, &tuning);
            prop_assert!(pos.x >= 10.0 && pos.x <= 90.0);
            prop_assert!(pos.y >= 15.0 && pos.y <= 85.0);
        }
    }
}
