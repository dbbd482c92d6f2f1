// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;
use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::{MathError, Poolable, Vector4};

/// 3D vector used for points, deltas, and normals.
///
/// * Components are `f64`; a value may represent a position or a direction
///   depending on the calling context.
/// * Every operation comes in two flavours: value-returning (`plus`,
///   `normalized`, …) which leaves `self` untouched, and in-place (`add`,
///   `normalize`, …) which mutates `self` and returns it for chaining.
/// * All in-place mutation funnels through [`Vector3::set_xyz`], the single
///   canonical setter shared with pooled reinitialization and `From`
///   conversions. [`Vector3::new`] is the one exception: it stays `const` so
///   the axis constants can be built at compile time, and it stores the
///   components exactly as `set_xyz` would.
/// * Use [`crate::Matrix4::times_vector3`] for points (homogeneous `w = 1`)
///   and [`crate::Matrix4::times_relative_vector3`] for deltas (`w = 0`).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vector3 {
    data: [f64; 3],
}

/// Plain `{x, y, z}` triplet exchanged with persistence collaborators.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3StateObject {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vector3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit vector pointing along the positive X axis.
    pub const X_UNIT: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit vector pointing along the positive Y axis.
    pub const Y_UNIT: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit vector pointing along the positive Z axis.
    pub const Z_UNIT: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a vector from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { data: [x, y, z] }
    }

    /// X component.
    pub const fn x(&self) -> f64 {
        self.data[0]
    }

    /// Y component.
    pub const fn y(&self) -> f64 {
        self.data[1]
    }

    /// Z component.
    pub const fn z(&self) -> f64 {
        self.data[2]
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f64; 3] {
        self.data
    }

    /// Euclidean length.
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Squared length.
    pub fn magnitude_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Distance to another point.
    pub fn distance(&self, point: &Self) -> f64 {
        self.distance_squared(point).sqrt()
    }

    /// Distance to the point `(x, y, z)`.
    pub fn distance_xyz(&self, x: f64, y: f64, z: f64) -> f64 {
        self.distance_squared_xyz(x, y, z).sqrt()
    }

    /// Squared distance to another point.
    pub fn distance_squared(&self, point: &Self) -> f64 {
        self.distance_squared_xyz(point.x(), point.y(), point.z())
    }

    /// Squared distance to the point `(x, y, z)`.
    pub fn distance_squared_xyz(&self, x: f64, y: f64, z: f64) -> f64 {
        let dx = self.x() - x;
        let dy = self.y() - y;
        let dz = self.z() - z;
        dx * dx + dy * dy + dz * dz
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &Self) -> f64 {
        self.dot_xyz(other.x(), other.y(), other.z())
    }

    /// Dot product with `(x, y, z)`.
    pub fn dot_xyz(&self, x: f64, y: f64, z: f64) -> f64 {
        self.x() * x + self.y() * y + self.z() * z
    }

    /// Angle in radians between this vector and `other`, in `[0, π]`.
    ///
    /// Fails if either vector has exactly zero magnitude.
    pub fn angle_between(&self, other: &Self) -> Result<f64, MathError> {
        let a = self.normalized_for("angle_between")?;
        let b = other.normalized_for("angle_between")?;
        Ok(a.dot(&b).clamp(-1.0, 1.0).acos())
    }

    /// Returns `true` if the sum of absolute per-component differences is at
    /// most `epsilon`.
    pub fn equals_epsilon(&self, other: &Self, epsilon: f64) -> bool {
        (self.x() - other.x()).abs() + (self.y() - other.y()).abs() + (self.z() - other.z()).abs()
            <= epsilon
    }

    /// Returns `true` if no component is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|c| c.is_finite())
    }

    /// Cross product (`self × other`).
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.data;
        let [bx, by, bz] = other.data;
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    /// Unit-length copy of this vector.
    ///
    /// Fails on an exactly-zero vector instead of producing NaN components.
    pub fn normalized(&self) -> Result<Self, MathError> {
        self.normalized_for("normalized")
    }

    fn normalized_for(&self, operation: &'static str) -> Result<Self, MathError> {
        let mag = self.magnitude();
        if mag == 0.0 {
            return Err(MathError::ZeroMagnitude { operation });
        }
        Ok(self.divided_scalar(mag))
    }

    /// Copy of this vector rescaled to `magnitude`.
    pub fn with_magnitude(&self, magnitude: f64) -> Result<Self, MathError> {
        Ok(self
            .normalized_for("with_magnitude")?
            .times_scalar(magnitude))
    }

    /// Copy with every component rounded half away from zero.
    pub fn rounded_symmetric(&self) -> Self {
        Self::new(self.x().round(), self.y().round(), self.z().round())
    }

    /// Scalar multiple.
    pub fn times_scalar(&self, scalar: f64) -> Self {
        Self::new(self.x() * scalar, self.y() * scalar, self.z() * scalar)
    }

    /// Component-wise product.
    pub fn component_times(&self, other: &Self) -> Self {
        Self::new(self.x() * other.x(), self.y() * other.y(), self.z() * other.z())
    }

    /// Sum with another vector.
    pub fn plus(&self, other: &Self) -> Self {
        self.plus_xyz(other.x(), other.y(), other.z())
    }

    /// Sum with `(x, y, z)`.
    pub fn plus_xyz(&self, x: f64, y: f64, z: f64) -> Self {
        Self::new(self.x() + x, self.y() + y, self.z() + z)
    }

    /// Adds `scalar` to every component.
    pub fn plus_scalar(&self, scalar: f64) -> Self {
        self.plus_xyz(scalar, scalar, scalar)
    }

    /// Difference with another vector.
    pub fn minus(&self, other: &Self) -> Self {
        self.minus_xyz(other.x(), other.y(), other.z())
    }

    /// Difference with `(x, y, z)`.
    pub fn minus_xyz(&self, x: f64, y: f64, z: f64) -> Self {
        Self::new(self.x() - x, self.y() - y, self.z() - z)
    }

    /// Subtracts `scalar` from every component.
    pub fn minus_scalar(&self, scalar: f64) -> Self {
        self.minus_xyz(scalar, scalar, scalar)
    }

    /// Divides every component by `scalar`.
    pub fn divided_scalar(&self, scalar: f64) -> Self {
        Self::new(self.x() / scalar, self.y() / scalar, self.z() / scalar)
    }

    /// Component-wise negation.
    pub fn negated(&self) -> Self {
        Self::new(-self.x(), -self.y(), -self.z())
    }

    /// Linear interpolation: `ratio = 0` yields `self`, `ratio = 1` yields `other`.
    pub fn blend(&self, other: &Self, ratio: f64) -> Self {
        self.plus(&other.minus(self).times_scalar(ratio))
    }

    /// Midpoint between this vector and `other`.
    pub fn average(&self, other: &Self) -> Self {
        self.blend(other, 0.5)
    }

    /// Extends to a [`Vector4`] with the given `w`.
    pub fn to_vector4(&self, w: f64) -> Vector4 {
        Vector4::new(self.x(), self.y(), self.z(), w)
    }

    /// Plain-object form for persistence.
    pub fn to_state_object(&self) -> Vector3StateObject {
        Vector3StateObject {
            x: self.x(),
            y: self.y(),
            z: self.z(),
        }
    }

    /// Rebuilds a vector from its plain-object form.
    pub fn from_state_object(state: &Vector3StateObject) -> Self {
        Self::from([state.x, state.y, state.z])
    }

    /// Sets every component. All other mutators route through here.
    pub fn set_xyz(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.data = [x, y, z];
        self
    }

    /// Sets the X component.
    pub fn set_x(&mut self, x: f64) -> &mut Self {
        self.set_xyz(x, self.y(), self.z())
    }

    /// Sets the Y component.
    pub fn set_y(&mut self, y: f64) -> &mut Self {
        self.set_xyz(self.x(), y, self.z())
    }

    /// Sets the Z component.
    pub fn set_z(&mut self, z: f64) -> &mut Self {
        self.set_xyz(self.x(), self.y(), z)
    }

    /// Copies every component from `other`.
    pub fn set(&mut self, other: &Self) -> &mut Self {
        self.set_xyz(other.x(), other.y(), other.z())
    }

    /// Rescales in place to `magnitude`; `self` is untouched on failure.
    pub fn set_magnitude(&mut self, magnitude: f64) -> Result<&mut Self, MathError> {
        let unit = self.normalized_for("set_magnitude")?;
        let [x, y, z] = unit.times_scalar(magnitude).data;
        Ok(self.set_xyz(x, y, z))
    }

    /// Adds another vector in place.
    pub fn add(&mut self, other: &Self) -> &mut Self {
        self.add_xyz(other.x(), other.y(), other.z())
    }

    /// Adds `(x, y, z)` in place.
    pub fn add_xyz(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.set_xyz(self.x() + x, self.y() + y, self.z() + z)
    }

    /// Adds `scalar` to every component in place.
    pub fn add_scalar(&mut self, scalar: f64) -> &mut Self {
        self.add_xyz(scalar, scalar, scalar)
    }

    /// Subtracts another vector in place.
    pub fn subtract(&mut self, other: &Self) -> &mut Self {
        self.subtract_xyz(other.x(), other.y(), other.z())
    }

    /// Subtracts `(x, y, z)` in place.
    pub fn subtract_xyz(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.set_xyz(self.x() - x, self.y() - y, self.z() - z)
    }

    /// Subtracts `scalar` from every component in place.
    pub fn subtract_scalar(&mut self, scalar: f64) -> &mut Self {
        self.subtract_xyz(scalar, scalar, scalar)
    }

    /// Scales in place.
    pub fn multiply_scalar(&mut self, scalar: f64) -> &mut Self {
        self.set_xyz(self.x() * scalar, self.y() * scalar, self.z() * scalar)
    }

    /// Component-wise product in place.
    pub fn component_multiply(&mut self, other: &Self) -> &mut Self {
        self.set_xyz(self.x() * other.x(), self.y() * other.y(), self.z() * other.z())
    }

    /// Divides every component by `scalar` in place.
    pub fn divide_scalar(&mut self, scalar: f64) -> &mut Self {
        self.set_xyz(self.x() / scalar, self.y() / scalar, self.z() / scalar)
    }

    /// Negates in place.
    pub fn negate(&mut self) -> &mut Self {
        self.set_xyz(-self.x(), -self.y(), -self.z())
    }

    /// Normalizes in place and returns `self`.
    ///
    /// Fails on an exactly-zero vector, leaving it unchanged.
    pub fn normalize(&mut self) -> Result<&mut Self, MathError> {
        let mag = self.magnitude();
        if mag == 0.0 {
            return Err(MathError::ZeroMagnitude {
                operation: "normalize",
            });
        }
        Ok(self.divide_scalar(mag))
    }

    /// Rounds every component half away from zero in place.
    pub fn round_symmetric(&mut self) -> &mut Self {
        self.set_xyz(self.x().round(), self.y().round(), self.z().round())
    }
}

impl Poolable for Vector3 {
    type Args = (f64, f64, f64);

    fn fresh((x, y, z): Self::Args) -> Self {
        Self::new(x, y, z)
    }

    fn reinitialize(&mut self, (x, y, z): Self::Args) {
        self.set_xyz(x, y, z);
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector3({}, {}, {})", self.x(), self.y(), self.z())
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        let mut v = Self::ZERO;
        v.set_xyz(x, y, z);
        v
    }
}

impl From<Vector3StateObject> for Vector3 {
    fn from(state: Vector3StateObject) -> Self {
        Self::from_state_object(&state)
    }
}

impl Add for Vector3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        self.plus(&rhs)
    }
}

impl Sub for Vector3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        self.minus(&rhs)
    }
}

impl Neg for Vector3 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        self.times_scalar(rhs)
    }
}

impl Div<f64> for Vector3 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        self.divided_scalar(rhs)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        Vector3::add(self, &rhs);
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.subtract(&rhs);
    }
}

impl MulAssign<f64> for Vector3 {
    fn mul_assign(&mut self, rhs: f64) {
        self.multiply_scalar(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutators_funnel_through_set_xyz_and_chain() {
        let mut v = Vector3::new(1.0, 2.0, 3.0);
        v.add_xyz(1.0, 1.0, 1.0).multiply_scalar(2.0).set_z(0.5);
        assert_eq!(v.to_array(), [4.0, 6.0, 0.5]);
    }

    #[test]
    fn failed_set_magnitude_leaves_receiver_untouched() {
        let mut v = Vector3::ZERO;
        let err = v.set_magnitude(3.0).map(|_| ()).unwrap_err();
        assert_eq!(
            err,
            MathError::ZeroMagnitude {
                operation: "set_magnitude"
            }
        );
        assert_eq!(v, Vector3::ZERO);
    }
}
