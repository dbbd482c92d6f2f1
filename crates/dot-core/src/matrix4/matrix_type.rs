// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;

use crate::MathError;

/// Structural classification of a [`super::Matrix4`].
///
/// The tag is a conservative hint: it only ever selects a cheaper algorithm
/// and never changes a result. `Other` is always truthful; the narrower tags
/// promise exact content:
///
/// | tag             | content guarantee                                    |
/// |-----------------|------------------------------------------------------|
/// | `Identity`      | exactly the identity                                 |
/// | `Translation3d` | identity 3×3 block, bottom row `(0, 0, 0, 1)`        |
/// | `Scaling`       | diagonal, `m33 = 1`, zero translation                |
/// | `Affine`        | bottom row exactly `(0, 0, 0, 1)`                    |
/// | `Other`         | nothing                                              |
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "u8", try_from = "u8")
)]
pub enum MatrixType {
    /// Exactly the identity matrix.
    Identity = 0,
    /// Pure 3D translation.
    Translation3d = 1,
    /// Axis-aligned scaling.
    Scaling = 2,
    /// Any affine transform.
    Affine = 3,
    /// No structural guarantee.
    Other = 4,
}

// Column-major indices of the bottom row.
const BOTTOM_ROW: [usize; 4] = [3, 7, 11, 15];

impl MatrixType {
    /// Infers a tag from content: `Affine` when the bottom row is exactly
    /// `(0, 0, 0, 1)`, otherwise `Other`.
    ///
    /// Narrower tags are never inferred; only factories assign them.
    pub fn infer(entries: &[f64; 16]) -> Self {
        if has_affine_bottom_row(entries) {
            Self::Affine
        } else {
            Self::Other
        }
    }

    /// Returns `true` if `entries` satisfy this tag's content guarantee.
    // Tags promise exact content, so the comparisons are exact.
    #[allow(clippy::float_cmp)]
    pub fn describes(self, entries: &[f64; 16]) -> bool {
        let is = |idx: usize, value: f64| entries[idx] == value;
        match self {
            Self::Identity => {
                (0..16).all(|idx| is(idx, if idx % 5 == 0 { 1.0 } else { 0.0 }))
            }
            Self::Translation3d => {
                has_affine_bottom_row(entries)
                    && [0, 5, 10].iter().all(|&idx| is(idx, 1.0))
                    && [1, 2, 4, 6, 8, 9].iter().all(|&idx| is(idx, 0.0))
            }
            Self::Scaling => {
                has_affine_bottom_row(entries)
                    && [1, 2, 4, 6, 8, 9, 12, 13, 14]
                        .iter()
                        .all(|&idx| is(idx, 0.0))
            }
            Self::Affine => has_affine_bottom_row(entries),
            Self::Other => true,
        }
    }

    /// Upper-case name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Identity => "IDENTITY",
            Self::Translation3d => "TRANSLATION_3D",
            Self::Scaling => "SCALING",
            Self::Affine => "AFFINE",
            Self::Other => "OTHER",
        }
    }
}

#[allow(clippy::float_cmp)]
fn has_affine_bottom_row(entries: &[f64; 16]) -> bool {
    let [a, b, c, d] = BOTTOM_ROW;
    entries[a] == 0.0 && entries[b] == 0.0 && entries[c] == 0.0 && entries[d] == 1.0
}

impl fmt::Display for MatrixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<MatrixType> for u8 {
    fn from(value: MatrixType) -> Self {
        value as Self
    }
}

impl TryFrom<u8> for MatrixType {
    type Error = MathError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Identity),
            1 => Ok(Self::Translation3d),
            2 => Ok(Self::Scaling),
            3 => Ok(Self::Affine),
            4 => Ok(Self::Other),
            unknown => Err(MathError::UnknownMatrixType(unknown)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_discriminant_is_rejected() {
        assert_eq!(
            MatrixType::try_from(5),
            Err(MathError::UnknownMatrixType(5))
        );
        for tag in [
            MatrixType::Identity,
            MatrixType::Translation3d,
            MatrixType::Scaling,
            MatrixType::Affine,
            MatrixType::Other,
        ] {
            assert_eq!(MatrixType::try_from(u8::from(tag)), Ok(tag));
        }
    }

    #[test]
    fn scaling_tag_rejects_translation() {
        let mut entries = [0.0; 16];
        entries[0] = 2.0;
        entries[5] = 3.0;
        entries[10] = 4.0;
        entries[15] = 1.0;
        assert!(MatrixType::Scaling.describes(&entries));
        entries[12] = 1.0;
        assert!(!MatrixType::Scaling.describes(&entries));
        assert!(MatrixType::Affine.describes(&entries));
    }
}
