// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;

use dot_core::{dot_assert, Vector3};

use crate::Plane3;

/// Half-line from `position` along a unit `direction`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray3 {
    position: Vector3,
    direction: Vector3,
}

impl Ray3 {
    /// Creates a ray. `direction` must be unit length (checked builds assert
    /// it to within `1e-2`).
    pub fn new(position: Vector3, direction: Vector3) -> Self {
        dot_assert!(
            position.is_finite() && direction.is_finite(),
            "ray must be finite: {position}, {direction}"
        );
        dot_assert!(
            (direction.magnitude() - 1.0).abs() < 1e-2,
            "ray direction must be unit length: {direction}"
        );
        Self {
            position,
            direction,
        }
    }

    /// Origin of the ray.
    pub fn position(&self) -> Vector3 {
        self.position
    }

    /// Unit direction.
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Same ray with its origin moved `distance` along the direction.
    pub fn shifted(&self, distance: f64) -> Self {
        Self::new(self.point_at_distance(distance), self.direction)
    }

    /// `position + distance · direction`.
    pub fn point_at_distance(&self, distance: f64) -> Vector3 {
        self.position.plus(&self.direction.times_scalar(distance))
    }

    /// Signed distance along the ray to `plane`.
    ///
    /// A ray parallel to the plane divides by zero and yields an infinite or
    /// NaN result; check [`f64::is_finite`] before using it.
    pub fn distance_to_plane(&self, plane: &Plane3) -> f64 {
        let normal = plane.normal();
        (plane.distance() - self.position.dot(&normal)) / self.direction.dot(&normal)
    }
}

impl fmt::Display for Ray3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ray3({}, {})", self.position, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifted_moves_origin_along_direction() {
        let ray = Ray3::new(Vector3::new(1.0, 0.0, 0.0), Vector3::Y_UNIT);
        let moved = ray.shifted(2.5);
        assert_eq!(moved.position(), Vector3::new(1.0, 2.5, 0.0));
        assert_eq!(moved.direction(), Vector3::Y_UNIT);
    }

    #[test]
    fn parallel_ray_has_non_finite_distance() {
        let ray = Ray3::new(Vector3::new(0.0, 0.0, 1.0), Vector3::X_UNIT);
        assert!(!ray.distance_to_plane(&Plane3::XY).is_finite());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "unit length")]
    fn non_unit_direction_is_rejected_in_checked_builds() {
        let _ = Ray3::new(Vector3::ZERO, Vector3::new(2.0, 0.0, 0.0));
    }
}
