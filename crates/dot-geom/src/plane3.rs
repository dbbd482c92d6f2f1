// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;

use dot_core::{dot_assert, Vector3};

use crate::Ray3;

/// Plane `{ p : normal · p = distance }` with a unit normal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plane3 {
    normal: Vector3,
    distance: f64,
}

impl Plane3 {
    /// The XY plane through the origin, normal +Z.
    pub const XY: Self = Self {
        normal: Vector3::Z_UNIT,
        distance: 0.0,
    };

    /// The XZ plane through the origin, normal +Y.
    pub const XZ: Self = Self {
        normal: Vector3::Y_UNIT,
        distance: 0.0,
    };

    /// The YZ plane through the origin, normal +X.
    pub const YZ: Self = Self {
        normal: Vector3::X_UNIT,
        distance: 0.0,
    };

    /// Creates a plane from a unit `normal` and signed `distance` from the
    /// origin along it.
    pub fn new(normal: Vector3, distance: f64) -> Self {
        dot_assert!(
            normal.is_finite() && distance.is_finite(),
            "plane must be finite: {normal}, {distance}"
        );
        dot_assert!(
            (normal.magnitude() - 1.0).abs() < 1e-2,
            "plane normal must be unit length: {normal}"
        );
        Self { normal, distance }
    }

    /// Unit normal.
    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    /// Signed distance from the origin.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Point where `ray` meets this plane.
    ///
    /// Non-finite when the ray is parallel to the plane.
    pub fn intersect_with_ray(&self, ray: &Ray3) -> Vector3 {
        ray.point_at_distance(ray.distance_to_plane(self))
    }

    /// Plane through three points, normal `normalize((c - a) × (b - a))`.
    ///
    /// Returns `None` for collinear points.
    pub fn from_triangle(a: &Vector3, b: &Vector3, c: &Vector3) -> Option<Self> {
        let normal = c.minus(a).cross(&b.minus(a)).normalized().ok()?;
        Some(Self::new(normal, normal.dot(a)))
    }

    /// Line shared by two planes, as a ray along `normalize(n₁ × n₂)`.
    ///
    /// Returns `None` for parallel (or coincident) planes.
    pub fn get_intersection(&self, other: &Self) -> Option<Ray3> {
        let cos = self.normal.dot(&other.normal);
        let det = 1.0 - cos * cos;
        if det == 0.0 {
            return None;
        }
        let a = (self.distance - other.distance * cos) / det;
        let b = (other.distance - self.distance * cos) / det;
        let point = self
            .normal
            .times_scalar(a)
            .plus(&other.normal.times_scalar(b));
        let direction = self.normal.cross(&other.normal).normalized().ok()?;
        Some(Ray3::new(point, direction))
    }
}

impl fmt::Display for Plane3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plane3({}, {})", self.normal, self.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_planes_pass_through_origin() {
        for plane in [Plane3::XY, Plane3::XZ, Plane3::YZ] {
            assert_eq!(plane.distance(), 0.0);
            assert_eq!(plane.normal().magnitude(), 1.0);
        }
        assert_eq!(Plane3::XY.normal(), Vector3::Z_UNIT);
    }

    #[test]
    fn triangle_winding_sets_normal_sign() {
        let plane = Plane3::from_triangle(
            &Vector3::new(0.0, 0.0, 2.0),
            &Vector3::new(1.0, 0.0, 2.0),
            &Vector3::new(0.0, 1.0, 2.0),
        );
        // (c - a) × (b - a) = Y × X = -Z
        assert_eq!(plane, Some(Plane3::new(-Vector3::Z_UNIT, -2.0)));
    }
}
