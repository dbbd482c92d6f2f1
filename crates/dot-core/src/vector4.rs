// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use crate::{MathError, Poolable, Vector3};

/// 4D vector, mostly used as a homogeneous coordinate.
///
/// Mirrors [`Vector3`]: value-returning and in-place families, with every
/// mutation and `From` conversion routed through [`Vector4::set_xyzw`].
/// [`Vector4::new`] stays `const` for the axis constants.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vector4 {
    data: [f64; 4],
}

/// Plain `{x, y, z, w}` quadruplet exchanged with persistence collaborators.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector4StateObject {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
    /// W component.
    pub w: f64,
}

impl Vector4 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Unit vector along X.
    pub const X_UNIT: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    /// Unit vector along Y.
    pub const Y_UNIT: Self = Self::new(0.0, 1.0, 0.0, 0.0);
    /// Unit vector along Z.
    pub const Z_UNIT: Self = Self::new(0.0, 0.0, 1.0, 0.0);
    /// Unit vector along W.
    pub const W_UNIT: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a vector from components.
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { data: [x, y, z, w] }
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

    /// W component.
    pub const fn w(&self) -> f64 {
        self.data[3]
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f64; 4] {
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

    /// Squared distance to another point.
    pub fn distance_squared(&self, point: &Self) -> f64 {
        self.minus(point).magnitude_squared()
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &Self) -> f64 {
        self.dot_xyzw(other.x(), other.y(), other.z(), other.w())
    }

    /// Dot product with `(x, y, z, w)`.
    pub fn dot_xyzw(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        self.x() * x + self.y() * y + self.z() * z + self.w() * w
    }

    /// Angle in radians between this vector and `other`.
    pub fn angle_between(&self, other: &Self) -> Result<f64, MathError> {
        let a = self.normalized_for("angle_between")?;
        let b = other.normalized_for("angle_between")?;
        Ok(a.dot(&b).clamp(-1.0, 1.0).acos())
    }

    /// Returns `true` if the sum of absolute per-component differences is at
    /// most `epsilon`.
    pub fn equals_epsilon(&self, other: &Self, epsilon: f64) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a - b).abs())
            .sum::<f64>()
            <= epsilon
    }

    /// Returns `true` if no component is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|c| c.is_finite())
    }

    /// Unit-length copy; fails on an exactly-zero vector.
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

    /// Copy rescaled to `magnitude`.
    pub fn with_magnitude(&self, magnitude: f64) -> Result<Self, MathError> {
        Ok(self
            .normalized_for("with_magnitude")?
            .times_scalar(magnitude))
    }

    /// Copy with every component rounded half away from zero.
    pub fn rounded_symmetric(&self) -> Self {
        Self::new(
            self.x().round(),
            self.y().round(),
            self.z().round(),
            self.w().round(),
        )
    }

    /// Scalar multiple.
    pub fn times_scalar(&self, scalar: f64) -> Self {
        Self::new(
            self.x() * scalar,
            self.y() * scalar,
            self.z() * scalar,
            self.w() * scalar,
        )
    }

    /// Component-wise product.
    pub fn component_times(&self, other: &Self) -> Self {
        Self::new(
            self.x() * other.x(),
            self.y() * other.y(),
            self.z() * other.z(),
            self.w() * other.w(),
        )
    }

    /// Sum with another vector.
    pub fn plus(&self, other: &Self) -> Self {
        self.plus_xyzw(other.x(), other.y(), other.z(), other.w())
    }

    /// Sum with `(x, y, z, w)`.
    pub fn plus_xyzw(&self, x: f64, y: f64, z: f64, w: f64) -> Self {
        Self::new(self.x() + x, self.y() + y, self.z() + z, self.w() + w)
    }

    /// Adds `scalar` to every component.
    pub fn plus_scalar(&self, scalar: f64) -> Self {
        self.plus_xyzw(scalar, scalar, scalar, scalar)
    }

    /// Difference with another vector.
    pub fn minus(&self, other: &Self) -> Self {
        self.minus_xyzw(other.x(), other.y(), other.z(), other.w())
    }

    /// Difference with `(x, y, z, w)`.
    pub fn minus_xyzw(&self, x: f64, y: f64, z: f64, w: f64) -> Self {
        Self::new(self.x() - x, self.y() - y, self.z() - z, self.w() - w)
    }

    /// Subtracts `scalar` from every component.
    pub fn minus_scalar(&self, scalar: f64) -> Self {
        self.minus_xyzw(scalar, scalar, scalar, scalar)
    }

    /// Divides every component by `scalar`.
    pub fn divided_scalar(&self, scalar: f64) -> Self {
        Self::new(
            self.x() / scalar,
            self.y() / scalar,
            self.z() / scalar,
            self.w() / scalar,
        )
    }

    /// Component-wise negation.
    pub fn negated(&self) -> Self {
        Self::new(-self.x(), -self.y(), -self.z(), -self.w())
    }

    /// Linear interpolation between `self` (`ratio = 0`) and `other` (`ratio = 1`).
    pub fn blend(&self, other: &Self, ratio: f64) -> Self {
        self.plus(&other.minus(self).times_scalar(ratio))
    }

    /// Midpoint between this vector and `other`.
    pub fn average(&self, other: &Self) -> Self {
        self.blend(other, 0.5)
    }

    /// Drops `w`.
    pub fn to_vector3(&self) -> Vector3 {
        Vector3::new(self.x(), self.y(), self.z())
    }

    /// Plain-object form for persistence.
    pub fn to_state_object(&self) -> Vector4StateObject {
        Vector4StateObject {
            x: self.x(),
            y: self.y(),
            z: self.z(),
            w: self.w(),
        }
    }

    /// Rebuilds a vector from its plain-object form.
    pub fn from_state_object(state: &Vector4StateObject) -> Self {
        Self::from([state.x, state.y, state.z, state.w])
    }

    /// Sets every component. All other mutators route through here.
    pub fn set_xyzw(&mut self, x: f64, y: f64, z: f64, w: f64) -> &mut Self {
        self.data = [x, y, z, w];
        self
    }

    /// Sets the X component.
    pub fn set_x(&mut self, x: f64) -> &mut Self {
        self.set_xyzw(x, self.y(), self.z(), self.w())
    }

    /// Sets the Y component.
    pub fn set_y(&mut self, y: f64) -> &mut Self {
        self.set_xyzw(self.x(), y, self.z(), self.w())
    }

    /// Sets the Z component.
    pub fn set_z(&mut self, z: f64) -> &mut Self {
        self.set_xyzw(self.x(), self.y(), z, self.w())
    }

    /// Sets the W component.
    pub fn set_w(&mut self, w: f64) -> &mut Self {
        self.set_xyzw(self.x(), self.y(), self.z(), w)
    }

    /// Copies every component from `other`.
    pub fn set(&mut self, other: &Self) -> &mut Self {
        self.set_xyzw(other.x(), other.y(), other.z(), other.w())
    }

    /// Rescales in place; `self` is untouched on failure.
    pub fn set_magnitude(&mut self, magnitude: f64) -> Result<&mut Self, MathError> {
        let scaled = self
            .normalized_for("set_magnitude")?
            .times_scalar(magnitude);
        Ok(self.set(&scaled))
    }

    /// Adds another vector in place.
    pub fn add(&mut self, other: &Self) -> &mut Self {
        self.add_xyzw(other.x(), other.y(), other.z(), other.w())
    }

    /// Adds `(x, y, z, w)` in place.
    pub fn add_xyzw(&mut self, x: f64, y: f64, z: f64, w: f64) -> &mut Self {
        self.set_xyzw(self.x() + x, self.y() + y, self.z() + z, self.w() + w)
    }

    /// Adds `scalar` to every component in place.
    pub fn add_scalar(&mut self, scalar: f64) -> &mut Self {
        self.add_xyzw(scalar, scalar, scalar, scalar)
    }

    /// Subtracts another vector in place.
    pub fn subtract(&mut self, other: &Self) -> &mut Self {
        self.subtract_xyzw(other.x(), other.y(), other.z(), other.w())
    }

    /// Subtracts `(x, y, z, w)` in place.
    pub fn subtract_xyzw(&mut self, x: f64, y: f64, z: f64, w: f64) -> &mut Self {
        self.set_xyzw(self.x() - x, self.y() - y, self.z() - z, self.w() - w)
    }

    /// Subtracts `scalar` from every component in place.
    pub fn subtract_scalar(&mut self, scalar: f64) -> &mut Self {
        self.subtract_xyzw(scalar, scalar, scalar, scalar)
    }

    /// Scales in place.
    pub fn multiply_scalar(&mut self, scalar: f64) -> &mut Self {
        let scaled = self.times_scalar(scalar);
        self.set(&scaled)
    }

    /// Component-wise product in place.
    pub fn component_multiply(&mut self, other: &Self) -> &mut Self {
        let product = self.component_times(other);
        self.set(&product)
    }

    /// Divides every component by `scalar` in place.
    pub fn divide_scalar(&mut self, scalar: f64) -> &mut Self {
        self.set_xyzw(
            self.x() / scalar,
            self.y() / scalar,
            self.z() / scalar,
            self.w() / scalar,
        )
    }

    /// Negates in place.
    pub fn negate(&mut self) -> &mut Self {
        self.set_xyzw(-self.x(), -self.y(), -self.z(), -self.w())
    }

    /// Normalizes in place; fails on an exactly-zero vector.
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
        let rounded = self.rounded_symmetric();
        self.set(&rounded)
    }
}

impl Poolable for Vector4 {
    type Args = (f64, f64, f64, f64);

    fn fresh((x, y, z, w): Self::Args) -> Self {
        Self::new(x, y, z, w)
    }

    fn reinitialize(&mut self, (x, y, z, w): Self::Args) {
        self.set_xyzw(x, y, z, w);
    }
}

impl fmt::Display for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vector4({}, {}, {}, {})",
            self.x(),
            self.y(),
            self.z(),
            self.w()
        )
    }
}

impl From<[f64; 4]> for Vector4 {
    fn from([x, y, z, w]: [f64; 4]) -> Self {
        let mut v = Self::ZERO;
        v.set_xyzw(x, y, z, w);
        v
    }
}

impl Add for Vector4 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        self.plus(&rhs)
    }
}

impl Sub for Vector4 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        self.minus(&rhs)
    }
}

impl Neg for Vector4 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Mul<f64> for Vector4 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        self.times_scalar(rhs)
    }
}
