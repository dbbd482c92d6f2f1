// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;
use core::ops::{Mul, MulAssign};

use tracing::debug;

use crate::{MathError, Poolable, Vector3, Vector4};

mod css;
mod inverse;
mod matrix_type;

pub use matrix_type::MatrixType;

/// Column-major 4×4 homogeneous matrix with a structural [`MatrixType`] tag.
///
/// - Entries are stored column-major (`entries[col * 4 + row]`) to match GPU
///   uploads; [`Matrix4::copy_to_array`] hands them out in that order.
/// - The tag is computed at exactly one place, [`Matrix4::set_column_major`],
///   which every constructor and full assignment funnels through. Without an
///   explicit override it is inferred (`Affine` or `Other`).
/// - Multiply and invert dispatch on the tag alone. A matrix tagged `Other`
///   whose content happens to be cheaper is still computed correctly by the
///   general path; only speed depends on the tag.
///
/// # Examples
/// ```
/// use dot_core::{Matrix4, Vector3};
/// let m = Matrix4::translation(1.0, 2.0, 3.0).times_matrix(&Matrix4::scaling(2.0, 2.0, 2.0));
/// assert_eq!(m.times_vector3(&Vector3::ZERO), Vector3::new(1.0, 2.0, 3.0));
/// assert_eq!(m.times_relative_vector3(&Vector3::X_UNIT), Vector3::new(2.0, 0.0, 0.0));
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix4 {
    entries: [f64; 16],
    matrix_type: MatrixType,
}

impl Matrix4 {
    /// The identity matrix, tagged [`MatrixType::Identity`].
    pub const IDENTITY: Self = Self {
        entries: [
            1.0, 0.0, 0.0, 0.0, // col 0
            0.0, 1.0, 0.0, 0.0, // col 1
            0.0, 0.0, 1.0, 0.0, // col 2
            0.0, 0.0, 0.0, 1.0, // col 3
        ],
        matrix_type: MatrixType::Identity,
    };

    /// Creates a matrix from column-major data, inferring the tag.
    pub fn new(entries: [f64; 16]) -> Self {
        let mut m = Self::IDENTITY;
        m.set_column_major(entries, None);
        m
    }

    /// Creates a matrix from column-major data with an explicit tag.
    ///
    /// The tag must truthfully describe the entries; checked builds assert it.
    pub fn with_type(entries: [f64; 16], matrix_type: MatrixType) -> Self {
        let mut m = Self::IDENTITY;
        m.set_column_major(entries, Some(matrix_type));
        m
    }

    /// Creates a matrix from row-major data (reads like the written matrix),
    /// inferring the tag.
    pub fn row_major(rows: [f64; 16]) -> Self {
        Self::new(transpose_entries(&rows))
    }

    /// Creates a matrix from row-major data with an explicit tag.
    pub fn row_major_with_type(rows: [f64; 16], matrix_type: MatrixType) -> Self {
        Self::with_type(transpose_entries(&rows), matrix_type)
    }

    /// Canonical full assignment: overwrites every entry and recomputes the tag.
    ///
    /// `matrix_type = None` infers the tag from content.
    pub fn set_column_major(
        &mut self,
        entries: [f64; 16],
        matrix_type: Option<MatrixType>,
    ) -> &mut Self {
        let matrix_type = match matrix_type {
            Some(tag) => {
                dot_assert!(
                    tag.describes(&entries),
                    "matrix tag {tag} does not describe entries {entries:?}"
                );
                tag
            }
            None => MatrixType::infer(&entries),
        };
        self.entries = entries;
        self.matrix_type = matrix_type;
        self
    }

    /// Row-major variant of [`Matrix4::set_column_major`].
    pub fn set_row_major(&mut self, rows: [f64; 16], matrix_type: Option<MatrixType>) -> &mut Self {
        self.set_column_major(transpose_entries(&rows), matrix_type)
    }

    /// Copies entries and tag from `other`.
    pub fn set(&mut self, other: &Self) -> &mut Self {
        self.set_column_major(other.entries, Some(other.matrix_type))
    }

    /// Returns the identity matrix.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Builds a translation matrix.
    ///
    /// Column-major layout: translation occupies the last column.
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Self::with_type(
            [
                1.0, 0.0, 0.0, 0.0, // col 0
                0.0, 1.0, 0.0, 0.0, // col 1
                0.0, 0.0, 1.0, 0.0, // col 2
                x, y, z, 1.0, // col 3 (translation)
            ],
            MatrixType::Translation3d,
        )
    }

    /// Builds a translation matrix from a vector.
    pub fn translation_from_vector(v: &Vector3) -> Self {
        Self::translation(v.x(), v.y(), v.z())
    }

    /// Builds a non-uniform scale matrix.
    pub fn scaling(x: f64, y: f64, z: f64) -> Self {
        Self::with_type(
            [
                x, 0.0, 0.0, 0.0, // col 0
                0.0, y, 0.0, 0.0, // col 1
                0.0, 0.0, z, 0.0, // col 2
                0.0, 0.0, 0.0, 1.0, // col 3
            ],
            MatrixType::Scaling,
        )
    }

    /// Builds a uniform scale matrix.
    pub fn uniform_scaling(s: f64) -> Self {
        Self::scaling(s, s, s)
    }

    /// Rotation about a unit `axis` by `angle` radians (right-handed).
    pub fn rotation_axis_angle(axis: &Vector3, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let [x, y, z] = axis.to_array();
        #[rustfmt::skip]
        let rows = [
            x * x * t + c,     x * y * t - z * s, x * z * t + y * s, 0.0,
            y * x * t + z * s, y * y * t + c,     y * z * t - x * s, 0.0,
            z * x * t - y * s, z * y * t + x * s, z * z * t + c,     0.0,
            0.0,               0.0,               0.0,               1.0,
        ];
        Self::row_major_with_type(rows, MatrixType::Affine)
    }

    /// Rotation about +X by `angle` radians.
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let rows = [
            1.0, 0.0, 0.0, 0.0,
            0.0, c,   -s,  0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        Self::row_major_with_type(rows, MatrixType::Affine)
    }

    /// Rotation about +Y by `angle` radians.
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let rows = [
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
            -s,  0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        Self::row_major_with_type(rows, MatrixType::Affine)
    }

    /// Rotation about +Z by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let rows = [
            c,   -s,  0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        Self::row_major_with_type(rows, MatrixType::Affine)
    }

    /// OpenGL-style (`gluPerspective`) projection matrix; tagged `Other`.
    ///
    /// The cotangent is taken of `fov_y_radians` as given, so pass half the
    /// vertical field of view to match `gluPerspective(fovy, ...)`.
    pub fn perspective(fov_y_radians: f64, aspect: f64, z_near: f64, z_far: f64) -> Self {
        let (s, c) = fov_y_radians.sin_cos();
        let cotangent = c / s;
        #[rustfmt::skip]
        let rows = [
            cotangent / aspect, 0.0,       0.0,                                0.0,
            0.0,                cotangent, 0.0,                                0.0,
            0.0,                0.0,       (z_far + z_near) / (z_near - z_far), (2.0 * z_far * z_near) / (z_near - z_far),
            0.0,                0.0,       -1.0,                               0.0,
        ];
        Self::row_major(rows)
    }

    /// Entry at `row`, `col` (both in `0..4`).
    pub fn entry(&self, row: usize, col: usize) -> f64 {
        self.at(row, col)
    }

    fn at(&self, row: usize, col: usize) -> f64 {
        self.entries[col * 4 + row]
    }

    /// Structural tag.
    pub fn matrix_type(&self) -> MatrixType {
        self.matrix_type
    }

    /// Returns the matrix as a column-major array.
    pub fn to_array(self) -> [f64; 16] {
        self.entries
    }

    /// Copies the entries column-major into `out` (first 4 slots = column 0).
    pub fn copy_to_array<'a>(&self, out: &'a mut [f64; 16]) -> &'a mut [f64; 16] {
        *out = self.entries;
        out
    }

    /// Single-precision variant of [`Matrix4::copy_to_array`] for rendering APIs.
    #[allow(clippy::cast_possible_truncation)]
    pub fn copy_to_f32_array<'a>(&self, out: &'a mut [f32; 16]) -> &'a mut [f32; 16] {
        for (dst, src) in out.iter_mut().zip(self.entries.iter()) {
            *dst = *src as f32;
        }
        out
    }

    /// Returns `true` if no entry is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.entries.iter().all(|e| e.is_finite())
    }

    /// Determinant by full expansion (ignores the tag).
    pub fn determinant(&self) -> f64 {
        inverse::determinant(&self.entries)
    }

    /// Translation column `(m03, m13, m23)`.
    pub fn translation_vector(&self) -> Vector3 {
        Vector3::new(self.at(0, 3), self.at(1, 3), self.at(2, 3))
    }

    /// Lengths of the three basis columns of the 3×3 block.
    pub fn scale_vector(&self) -> Vector3 {
        let column = |col: usize| {
            Vector3::new(self.at(0, col), self.at(1, col), self.at(2, col)).magnitude()
        };
        Vector3::new(column(0), column(1), column(2))
    }

    /// CSS `matrix3d(...)` text, column-major, 20 fractional digits per entry.
    pub fn css_transform(&self) -> String {
        css::matrix3d(&self.entries)
    }

    /// Returns `true` if every entry differs from `other`'s by at most `epsilon`.
    pub fn equals_epsilon(&self, other: &Self, epsilon: f64) -> bool {
        self.entries
            .iter()
            .zip(other.entries.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    /// Entry-wise sum.
    pub fn plus(&self, other: &Self) -> Self {
        Self::new(core::array::from_fn(|i| self.entries[i] + other.entries[i]))
    }

    /// Entry-wise difference.
    pub fn minus(&self, other: &Self) -> Self {
        Self::new(core::array::from_fn(|i| self.entries[i] - other.entries[i]))
    }

    /// Entry-wise negation.
    pub fn negated(&self) -> Self {
        Self::new(self.entries.map(|e| -e))
    }

    /// Transpose.
    pub fn transposed(&self) -> Self {
        Self::new(transpose_entries(&self.entries))
    }

    /// Inverse, dispatched on the tag.
    ///
    /// - `Identity` returns itself.
    /// - `Translation3d` negates the translation.
    /// - `Scaling` takes the reciprocal of each diagonal entry.
    /// - `Affine` / `Other` use the full adjugate; a zero determinant fails
    ///   with [`MathError::NotInvertible`].
    ///
    /// Unrecognized tags cannot reach this dispatch: `MatrixType` is closed and
    /// raw discriminants are validated by `MatrixType::try_from`, which
    /// reports [`MathError::UnknownMatrixType`].
    pub fn inverted(&self) -> Result<Self, MathError> {
        match self.matrix_type {
            MatrixType::Identity => Ok(*self),
            MatrixType::Translation3d => Ok(Self::translation(
                -self.at(0, 3),
                -self.at(1, 3),
                -self.at(2, 3),
            )),
            MatrixType::Scaling => Ok(Self::scaling(
                1.0 / self.at(0, 0),
                1.0 / self.at(1, 1),
                1.0 / self.at(2, 2),
            )),
            MatrixType::Affine | MatrixType::Other => match inverse::inverse(&self.entries) {
                Some(entries) => Ok(Self::new(entries)),
                None => {
                    debug!(matrix_type = %self.matrix_type, "singular matrix");
                    Err(MathError::NotInvertible)
                }
            },
        }
    }

    /// Matrix product `self · rhs`.
    ///
    /// In priority order:
    /// 1. either side `Identity`: the other operand is returned unchanged;
    /// 2. both `Translation3d` (or both `Scaling`): closed form, tag kept;
    /// 3. neither side `Other`: affine product assuming bottom row
    ///    `(0, 0, 0, 1)`, tagged `Affine`;
    /// 4. otherwise the full 4×4 product, tag inferred.
    pub fn times_matrix(&self, rhs: &Self) -> Self {
        if self.matrix_type == MatrixType::Identity {
            return *rhs;
        }
        if rhs.matrix_type == MatrixType::Identity {
            return *self;
        }
        if self.matrix_type == rhs.matrix_type {
            match self.matrix_type {
                MatrixType::Translation3d => {
                    return Self::translation(
                        self.at(0, 3) + rhs.at(0, 3),
                        self.at(1, 3) + rhs.at(1, 3),
                        self.at(2, 3) + rhs.at(2, 3),
                    );
                }
                MatrixType::Scaling => {
                    return Self::scaling(
                        self.at(0, 0) * rhs.at(0, 0),
                        self.at(1, 1) * rhs.at(1, 1),
                        self.at(2, 2) * rhs.at(2, 2),
                    );
                }
                _ => {}
            }
        }
        if self.matrix_type != MatrixType::Other && rhs.matrix_type != MatrixType::Other {
            return self.times_affine(rhs);
        }
        self.times_general(rhs)
    }

    fn times_affine(&self, rhs: &Self) -> Self {
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..3 {
                let mut sum = self.at(row, 0) * rhs.at(0, col)
                    + self.at(row, 1) * rhs.at(1, col)
                    + self.at(row, 2) * rhs.at(2, col);
                if col == 3 {
                    sum += self.at(row, 3);
                }
                out[col * 4 + row] = sum;
            }
        }
        out[15] = 1.0;
        Self::with_type(out, MatrixType::Affine)
    }

    fn times_general(&self, rhs: &Self) -> Self {
        let mut out = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.at(row, k) * rhs.at(k, col);
                }
                out[col * 4 + row] = sum;
            }
        }
        Self::new(out)
    }

    /// Full homogeneous product `self · v`.
    pub fn times_vector4(&self, v: &Vector4) -> Vector4 {
        let [x, y, z, w] = v.to_array();
        let row = |r: usize| {
            self.at(r, 0) * x + self.at(r, 1) * y + self.at(r, 2) * z + self.at(r, 3) * w
        };
        Vector4::new(row(0), row(1), row(2), row(3))
    }

    /// Transforms a point (`w = 1`, translation applied, no perspective divide).
    pub fn times_vector3(&self, v: &Vector3) -> Vector3 {
        self.times_vector4(&v.to_vector4(1.0)).to_vector3()
    }

    /// Full homogeneous product with the transpose, `selfᵀ · v`.
    pub fn times_transpose_vector4(&self, v: &Vector4) -> Vector4 {
        let [x, y, z, w] = v.to_array();
        let col = |c: usize| {
            self.at(0, c) * x + self.at(1, c) * y + self.at(2, c) * z + self.at(3, c) * w
        };
        Vector4::new(col(0), col(1), col(2), col(3))
    }

    /// Product with the transposed 3×3 block; used to carry normals.
    pub fn times_transpose_vector3(&self, v: &Vector3) -> Vector3 {
        let [x, y, z] = v.to_array();
        let col = |c: usize| self.at(0, c) * x + self.at(1, c) * y + self.at(2, c) * z;
        Vector3::new(col(0), col(1), col(2))
    }

    /// Transforms a relative vector (delta): 3×3 block only, translation ignored.
    pub fn times_relative_vector3(&self, v: &Vector3) -> Vector3 {
        let [x, y, z] = v.to_array();
        let row = |r: usize| self.at(r, 0) * x + self.at(r, 1) * y + self.at(r, 2) * z;
        Vector3::new(row(0), row(1), row(2))
    }
}

fn transpose_entries(entries: &[f64; 16]) -> [f64; 16] {
    core::array::from_fn(|i| entries[(i % 4) * 4 + i / 4])
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Poolable for Matrix4 {
    type Args = [f64; 16];

    fn fresh(entries: Self::Args) -> Self {
        Self::new(entries)
    }

    fn reinitialize(&mut self, entries: Self::Args) {
        self.set_column_major(entries, None);
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..4 {
            if row > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{} {} {} {}",
                self.at(row, 0),
                self.at(row, 1),
                self.at(row, 2),
                self.at(row, 3)
            )?;
        }
        Ok(())
    }
}

impl From<[f64; 16]> for Matrix4 {
    fn from(value: [f64; 16]) -> Self {
        Self::new(value)
    }
}

impl Mul for Matrix4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        self.times_matrix(&rhs)
    }
}

impl Mul<&Matrix4> for &Matrix4 {
    type Output = Matrix4;
    fn mul(self, rhs: &Matrix4) -> Self::Output {
        self.times_matrix(rhs)
    }
}

impl MulAssign for Matrix4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.times_matrix(&rhs);
    }
}

impl MulAssign<&Matrix4> for Matrix4 {
    fn mul_assign(&mut self, rhs: &Matrix4) {
        *self = self.times_matrix(rhs);
    }
}

impl Mul<Vector3> for Matrix4 {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Self::Output {
        self.times_vector3(&rhs)
    }
}

impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;
    fn mul(self, rhs: Vector4) -> Self::Output {
        self.times_vector4(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transpose_entries_swaps_rows_and_columns() {
        let e = [
            0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0,
        ];
        let t = transpose_entries(&e);
        assert_eq!(t[1], 4.0);
        assert_eq!(t[4], 1.0);
        assert_eq!(transpose_entries(&t), e);
    }

    #[test]
    fn row_major_reads_like_the_written_matrix() {
        #[rustfmt::skip]
        let m = Matrix4::row_major([
            1.0, 2.0, 3.0, 4.0,
            5.0, 6.0, 7.0, 8.0,
            9.0, 10.0, 11.0, 12.0,
            0.0, 0.0, 0.0, 1.0,
        ]);
        assert_eq!(m.entry(0, 3), 4.0);
        assert_eq!(m.entry(2, 1), 10.0);
        assert_eq!(m.matrix_type(), MatrixType::Affine);
    }
}
