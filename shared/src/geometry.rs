//! Vector helpers used by the splitting and lifecycle code.
//!
//! Units are meters unless a name says otherwise. The world uses screen orientation:
//! +X right, +Y down.

use nalgebra as na;

use crate::constants::{MIN_SPLIT_SIZE_M, SPLIT_FACTOR};

pub type Vec2 = na::Vector2<f32>;

/// Diagonal steps used to place and scatter split children, in spawn order:
/// up-left, up-right, down-left, down-right.
pub const DIAGONAL_STEPS: [[f32; 2]; 4] = [
    [-1.0, -1.0], // up-left
    [1.0, -1.0],  // up-right
    [-1.0, 1.0],  // down-left
    [1.0, 1.0],   // down-right
];

/// The four diagonal steps as vectors.
#[inline]
pub fn diagonals() -> [Vec2; 4] {
    DIAGONAL_STEPS.map(Vec2::from)
}

#[inline]
pub fn scaled(v: Vec2, factor: f32) -> Vec2 {
    v * factor
}

#[inline]
pub fn meters_to_pixels(v: Vec2, pixels_per_meter: f32) -> Vec2 {
    scaled(v, pixels_per_meter)
}

#[inline]
pub fn pixels_to_meters(v: Vec2, pixels_per_meter: f32) -> Vec2 {
    scaled(v, pixels_per_meter.recip())
}

/// Size of each child produced by splitting a box of `size`.
///
/// Returns `None` when either child edge would fall below [`MIN_SPLIT_SIZE_M`]; the
/// caller must then leave the parent intact.
#[inline]
pub fn child_size(size: Vec2) -> Option<Vec2> {
    let child = scaled(size, SPLIT_FACTOR);
    if child.x < MIN_SPLIT_SIZE_M || child.y < MIN_SPLIT_SIZE_M {
        return None;
    }
    Some(child)
}
