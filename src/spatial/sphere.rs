//! Geometry on the planet sphere
//!
//! Every grounded entity lives on a sphere of fixed radius centred on the
//! origin, with +Y as "up" at the north pole. Movement is approximated by
//! stepping along the chord towards the target and re-projecting, which is
//! close enough to great-circle motion for steps much shorter than the radius.

use rand::Rng;
use std::f32::consts::{PI, TAU};

use crate::core::types::Point;

/// Relative tolerance used by surface invariant checks
pub const SURFACE_TOLERANCE: f32 = 1e-3;

/// Map spherical angles to a point on the sphere.
///
/// `polar` is measured from +Y (0 = north pole, PI = south pole), `azimuth`
/// rotates around Y starting at +X.
pub fn surface_point(polar: f32, azimuth: f32, radius: f32) -> Point {
    Point::new(
        radius * polar.sin() * azimuth.cos(),
        radius * polar.cos(),
        radius * polar.sin() * azimuth.sin(),
    )
}

/// Random point on the sphere.
///
/// Angles are drawn uniformly, so points bunch up towards the poles. World
/// density tuning depends on that distribution.
pub fn random_surface_point<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Point {
    let polar = rng.gen_range(0.0..=PI);
    let azimuth = rng.gen_range(0.0..TAU);
    surface_point(polar, azimuth, radius)
}

/// Scale the direction of `point` out (or in) to the sphere surface.
///
/// The zero vector has no direction; callers always offset from a surface
/// point so it never reaches here.
pub fn project_to_surface(point: Point, radius: f32) -> Point {
    debug_assert!(
        point.length_squared() > 0.0,
        "cannot project the origin onto the sphere"
    );
    point.normalize_or_zero() * radius
}

/// Move `current` by `step` towards `target` and snap back onto the sphere
pub fn step_toward_on_surface(current: Point, target: Point, step: f32, radius: f32) -> Point {
    let direction = (target - current).normalize_or_zero();
    let next = project_to_surface(current + direction * step, radius);
    debug_assert!(is_on_surface(next, radius));
    next
}

/// Outward unit normal of the sphere at `point`
pub fn surface_normal(point: Point) -> Point {
    point.normalize_or_zero()
}

/// Point `distance` away from `anchor` in the horizontal (XZ) plane at
/// `angle`, projected onto the sphere. Used for patrol spots around the base.
pub fn surface_offset(anchor: Point, angle: f32, distance: f32, radius: f32) -> Point {
    let offset = Point::new(angle.cos() * distance, 0.0, angle.sin() * distance);
    project_to_surface(anchor + offset, radius)
}

/// Check the surface invariant for a position
pub fn is_on_surface(point: Point, radius: f32) -> bool {
    (point.length() - radius).abs() <= radius * SURFACE_TOLERANCE
}
