// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Algebraic laws that must hold regardless of which tag path computes them.

use dot_core::{Matrix4, MatrixType, Vector3};
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = f64> {
    -10.0..10.0f64
}

fn affine_rows() -> impl Strategy<Value = Matrix4> {
    proptest::array::uniform12(coord()).prop_map(|top| {
        let mut rows = [0.0; 16];
        rows[..12].copy_from_slice(&top);
        rows[15] = 1.0;
        Matrix4::row_major_with_type(rows, MatrixType::Affine)
    })
}

/// One matrix per tag, each carrying its factory's tag.
fn tagged_matrix() -> impl Strategy<Value = Matrix4> {
    prop_oneof![
        Just(Matrix4::IDENTITY),
        (coord(), coord(), coord()).prop_map(|(x, y, z)| Matrix4::translation(x, y, z)),
        (coord(), coord(), coord()).prop_map(|(x, y, z)| Matrix4::scaling(x, y, z)),
        affine_rows(),
        proptest::array::uniform16(coord()).prop_map(Matrix4::new),
    ]
}

/// Matrices whose inverse is numerically tame.
fn well_conditioned() -> impl Strategy<Value = Matrix4> {
    prop_oneof![
        (0.5..4.0f64, 0.5..4.0f64, 0.5..4.0f64).prop_map(|(x, y, z)| Matrix4::scaling(x, y, z)),
        (coord(), coord(), coord()).prop_map(|(x, y, z)| Matrix4::translation(x, y, z)),
        (coord(), coord(), coord(), -3.0..3.0f64, -3.0..3.0f64).prop_map(|(x, y, z, a, b)| {
            Matrix4::translation(x, y, z) * Matrix4::rotation_x(a) * Matrix4::rotation_z(b)
        }),
        proptest::array::uniform16(-1.0..1.0f64).prop_map(|mut entries| {
            for diag in [0, 5, 10, 15] {
                entries[diag] += 8.0;
            }
            Matrix4::new(entries)
        }),
    ]
}

fn untagged(m: &Matrix4) -> Matrix4 {
    Matrix4::with_type(m.to_array(), MatrixType::Other)
}

proptest! {
    #[test]
    fn multiplication_is_associative_across_tags(
        a in tagged_matrix(),
        b in tagged_matrix(),
        c in tagged_matrix()
    ) {
        let left = (a * b) * c;
        let right = a * (b * c);
        prop_assert!(left.equals_epsilon(&right, 1e-6), "{left}\nvs\n{right}");
    }

    #[test]
    fn fast_paths_agree_with_general_product(a in tagged_matrix(), b in tagged_matrix()) {
        let fast = a * b;
        let general = untagged(&a) * untagged(&b);
        prop_assert!(fast.equals_epsilon(&general, 1e-9), "{fast}\nvs\n{general}");
    }

    #[test]
    fn identity_law_is_exact(m in tagged_matrix()) {
        prop_assert_eq!(Matrix4::IDENTITY * m, m);
        prop_assert_eq!(m * Matrix4::IDENTITY, m);
        // Identity content tagged only Affine still multiplies exactly.
        let plain = Matrix4::new(Matrix4::IDENTITY.to_array());
        prop_assert_eq!((plain * m).to_array(), m.to_array());
    }

    #[test]
    fn inverse_law_on_well_conditioned_matrices(m in well_conditioned()) {
        let inv = m.inverted();
        prop_assert!(inv.is_ok());
        if let Ok(inv) = inv {
            prop_assert!((m * inv).equals_epsilon(&Matrix4::IDENTITY, 1e-9));
            prop_assert!((inv * m).equals_epsilon(&Matrix4::IDENTITY, 1e-9));
        }
    }

    #[test]
    fn relative_transform_of_basis_vector_is_column(
        entries in proptest::array::uniform16(coord())
    ) {
        let m = Matrix4::new(entries);
        for (col, basis) in [Vector3::X_UNIT, Vector3::Y_UNIT, Vector3::Z_UNIT].iter().enumerate() {
            let expected = Vector3::new(m.entry(0, col), m.entry(1, col), m.entry(2, col));
            prop_assert_eq!(m.times_relative_vector3(basis), expected);
        }
    }
}
