// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! General-path determinant and inverse.
//!
//! Both expand along complementary 2×2 minors of the top two and bottom two
//! rows (Laplace expansion), so the twelve minors are shared between the
//! determinant and the adjugate.

/// The twelve 2×2 minors of a column-major matrix.
struct Minors {
    b: [f64; 12],
}

impl Minors {
    fn of(e: &[f64; 16]) -> Self {
        let [m00, m10, m20, m30, m01, m11, m21, m31, m02, m12, m22, m32, m03, m13, m23, m33] = *e;
        Self {
            b: [
                m00 * m11 - m10 * m01,
                m00 * m21 - m20 * m01,
                m00 * m31 - m30 * m01,
                m10 * m21 - m20 * m11,
                m10 * m31 - m30 * m11,
                m20 * m31 - m30 * m21,
                m02 * m13 - m12 * m03,
                m02 * m23 - m22 * m03,
                m02 * m33 - m32 * m03,
                m12 * m23 - m22 * m13,
                m12 * m33 - m32 * m13,
                m22 * m33 - m32 * m23,
            ],
        }
    }

    fn determinant(&self) -> f64 {
        let [b00, b01, b02, b03, b04, b05, b06, b07, b08, b09, b10, b11] = self.b;
        b00 * b11 - b01 * b10 + b02 * b09 + b03 * b08 - b04 * b07 + b05 * b06
    }
}

/// Full-expansion determinant.
pub(super) fn determinant(e: &[f64; 16]) -> f64 {
    Minors::of(e).determinant()
}

/// Adjugate divided by the determinant, or `None` when the determinant is
/// exactly zero.
pub(super) fn inverse(e: &[f64; 16]) -> Option<[f64; 16]> {
    let minors = Minors::of(e);
    let det = minors.determinant();
    if det == 0.0 {
        return None;
    }
    let [m00, m10, m20, m30, m01, m11, m21, m31, m02, m12, m22, m32, m03, m13, m23, m33] = *e;
    let [b00, b01, b02, b03, b04, b05, b06, b07, b08, b09, b10, b11] = minors.b;
    let adjugate = [
        m11 * b11 - m21 * b10 + m31 * b09,
        m20 * b10 - m10 * b11 - m30 * b09,
        m13 * b05 - m23 * b04 + m33 * b03,
        m22 * b04 - m12 * b05 - m32 * b03,
        m21 * b08 - m01 * b11 - m31 * b07,
        m00 * b11 - m20 * b08 + m30 * b07,
        m23 * b02 - m03 * b05 - m33 * b01,
        m02 * b05 - m22 * b02 + m32 * b01,
        m01 * b10 - m11 * b08 + m31 * b06,
        m10 * b08 - m00 * b10 - m30 * b06,
        m03 * b04 - m13 * b02 + m33 * b00,
        m12 * b02 - m02 * b04 - m32 * b00,
        m11 * b07 - m01 * b09 - m21 * b06,
        m00 * b09 - m10 * b07 + m20 * b06,
        m13 * b01 - m03 * b03 - m23 * b00,
        m02 * b03 - m12 * b01 + m22 * b00,
    ];
    Some(adjugate.map(|v| v / det))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn determinant_of_permutation_is_signed() {
        // Swapping two columns of the identity flips the sign.
        let swapped = [
            0.0, 1.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ];
        assert_eq!(determinant(&swapped), -1.0);
        // A permutation matrix is orthogonal: its inverse is its transpose (itself here).
        assert_eq!(inverse(&swapped), Some(swapped));
    }

    #[test]
    fn rank_deficient_matrix_has_no_inverse() {
        let mut e = [0.0; 16];
        e[0] = 1.0;
        e[5] = 1.0;
        e[10] = 1.0;
        assert_eq!(determinant(&e), 0.0);
        assert!(inverse(&e).is_none());
    }
}
