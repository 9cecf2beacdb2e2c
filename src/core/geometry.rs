//! Degree-based trig and point helpers used by sprite movement.

use bevy::math::Vec2;

/// Cosine of an angle given in degrees.
#[inline]
pub fn dcos(angle: f32) -> f32 {
    angle.to_radians().cos()
}

/// Sine of an angle given in degrees.
#[inline]
pub fn dsin(angle: f32) -> f32 {
    angle.to_radians().sin()
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector from `from` towards `to`. Coincident points yield zero.
#[inline]
pub fn direction(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Cosine of the direction from `from` towards `to`.
pub fn direction_cos(from: Vec2, to: Vec2) -> f32 {
    direction(from, to).x
}

/// Sine of the direction from `from` towards `to`.
pub fn direction_sin(from: Vec2, to: Vec2) -> f32 {
    direction(from, to).y
}
