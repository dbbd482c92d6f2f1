// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Matrix4 tag dispatch, inversion, vector transforms, and external formats.

use core::f64::consts::FRAC_PI_2;
use dot_core::{MathError, Matrix4, MatrixType, Vector3, Vector4};

const EPS: f64 = 1e-12;

fn approx_eq16(a: [f64; 16], b: [f64; 16]) {
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        assert!((x - y).abs() <= EPS, "index {i}: {a:?} vs {b:?}");
    }
}

fn approx_eq3(a: Vector3, b: Vector3) {
    assert!(a.equals_epsilon(&b, EPS), "expected {b}, got {a}");
}

#[test]
fn translation_times_scaling_maps_points_and_deltas() {
    let m = Matrix4::translation(1.0, 2.0, 3.0).times_matrix(&Matrix4::scaling(2.0, 2.0, 2.0));
    assert_eq!(m.matrix_type(), MatrixType::Affine);
    assert_eq!(m.times_vector3(&Vector3::ZERO), Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(
        m.times_relative_vector3(&Vector3::X_UNIT),
        Vector3::new(2.0, 0.0, 0.0)
    );
}

#[test]
fn identity_short_circuit_returns_other_operand_exactly() {
    // Tagged Other on purpose: the short circuit must not retag or recompute.
    let odd = Matrix4::with_type(
        [
            1.5, -2.0, 0.25, 0.0, 3.0, 4.0, 5.0, 0.0, 6.0, 7.0, 8.0, 0.0, 9.0, 1.0, 2.0, 1.0,
        ],
        MatrixType::Other,
    );
    assert_eq!(Matrix4::IDENTITY.times_matrix(&odd), odd);
    assert_eq!(odd.times_matrix(&Matrix4::IDENTITY), odd);
    assert_eq!(Matrix4::identity() * odd, odd);
}

#[test]
fn same_tag_closed_forms_keep_tag() {
    let t = Matrix4::translation(1.0, 2.0, 3.0) * Matrix4::translation(-4.0, 0.5, 1.0);
    assert_eq!(t.matrix_type(), MatrixType::Translation3d);
    assert_eq!(t.translation_vector(), Vector3::new(-3.0, 2.5, 4.0));

    let s = Matrix4::scaling(2.0, 3.0, 4.0) * Matrix4::scaling(0.5, 2.0, -1.0);
    assert_eq!(s.matrix_type(), MatrixType::Scaling);
    assert_eq!(s, Matrix4::scaling(1.0, 6.0, -4.0));
}

#[test]
fn mixed_cheap_tags_use_affine_path() {
    let a = Matrix4::scaling(2.0, 3.0, 4.0);
    let b = Matrix4::translation(1.0, 1.0, 1.0);
    let m = a.times_matrix(&b);
    assert_eq!(m.matrix_type(), MatrixType::Affine);
    assert_eq!(m.translation_vector(), Vector3::new(2.0, 3.0, 4.0));
    // Same content through the general path.
    let general = Matrix4::with_type(a.to_array(), MatrixType::Other)
        .times_matrix(&Matrix4::with_type(b.to_array(), MatrixType::Other));
    approx_eq16(m.to_array(), general.to_array());
}

#[test]
fn mis_tagged_other_matrices_are_still_computed_correctly() {
    let t = Matrix4::with_type(
        Matrix4::translation(1.0, 2.0, 3.0).to_array(),
        MatrixType::Other,
    );
    let u = Matrix4::with_type(
        Matrix4::translation(4.0, 5.0, 6.0).to_array(),
        MatrixType::Other,
    );
    let product = t * u;
    assert_eq!(product.translation_vector(), Vector3::new(5.0, 7.0, 9.0));
    // General-path results are re-inferred from content.
    assert_eq!(product.matrix_type(), MatrixType::Affine);
}

#[test]
fn tag_inference_only_distinguishes_affine_from_other() {
    let affine = Matrix4::new(Matrix4::translation(1.0, 0.0, 0.0).to_array());
    assert_eq!(affine.matrix_type(), MatrixType::Affine);
    let projective = Matrix4::perspective(FRAC_PI_2, 1.0, 0.1, 100.0);
    assert_eq!(projective.matrix_type(), MatrixType::Other);
    // Even the identity content is only inferred as Affine.
    assert_eq!(
        Matrix4::new(Matrix4::IDENTITY.to_array()).matrix_type(),
        MatrixType::Affine
    );
}

#[test]
fn inverse_dispatch_per_tag() {
    assert_eq!(Matrix4::IDENTITY.inverted(), Ok(Matrix4::IDENTITY));
    assert_eq!(
        Matrix4::translation(1.0, -2.0, 3.0).inverted(),
        Ok(Matrix4::translation(-1.0, 2.0, -3.0))
    );
    let s = Matrix4::scaling(2.0, 4.0, 0.5).inverted().map(|m| m.matrix_type());
    assert_eq!(s, Ok(MatrixType::Scaling));
    assert_eq!(
        Matrix4::scaling(2.0, 4.0, 0.5).inverted(),
        Ok(Matrix4::scaling(0.5, 0.25, 2.0))
    );

    let affine = Matrix4::translation(3.0, 1.0, -2.0) * Matrix4::rotation_z(0.7);
    let inv = affine.inverted();
    assert!(inv.is_ok());
    if let Ok(inv) = inv {
        approx_eq16((affine * inv).to_array(), Matrix4::IDENTITY.to_array());
    }
}

#[test]
fn singular_matrices_fail_to_invert() {
    let flat = Matrix4::with_type(
        Matrix4::scaling(1.0, 0.0, 1.0).to_array(),
        MatrixType::Affine,
    );
    assert_eq!(flat.determinant(), 0.0);
    assert_eq!(flat.inverted(), Err(MathError::NotInvertible));

    let ones = Matrix4::new([1.0; 16]);
    assert_eq!(ones.matrix_type(), MatrixType::Other);
    assert_eq!(ones.inverted(), Err(MathError::NotInvertible));
}

#[test]
fn determinant_matches_scale_product() {
    let m = Matrix4::translation(5.0, 6.0, 7.0) * Matrix4::scaling(2.0, 3.0, 4.0);
    assert!((m.determinant() - 24.0).abs() <= EPS);
    let r = Matrix4::rotation_axis_angle(&Vector3::new(0.0, 0.6, 0.8), 1.1);
    assert!((r.determinant() - 1.0).abs() <= EPS);
}

#[test]
fn relative_transform_maps_basis_vectors_to_columns() {
    #[rustfmt::skip]
    let m = Matrix4::row_major([
        1.0, 2.0, 3.0, 10.0,
        4.0, 5.0, 6.0, 20.0,
        7.0, 8.0, 9.0, 30.0,
        0.0, 0.0, 0.0, 1.0,
    ]);
    assert_eq!(m.times_relative_vector3(&Vector3::X_UNIT), Vector3::new(1.0, 4.0, 7.0));
    assert_eq!(m.times_relative_vector3(&Vector3::Y_UNIT), Vector3::new(2.0, 5.0, 8.0));
    assert_eq!(m.times_relative_vector3(&Vector3::Z_UNIT), Vector3::new(3.0, 6.0, 9.0));
    // Translation only affects points.
    assert_eq!(m.times_vector3(&Vector3::ZERO), Vector3::new(10.0, 20.0, 30.0));
}

#[test]
fn transpose_products_match_explicit_transpose() {
    #[rustfmt::skip]
    let m = Matrix4::row_major([
        1.0, 2.0, 3.0, 4.0,
        5.0, 6.0, 7.0, 8.0,
        9.0, 1.0, 2.0, 3.0,
        4.0, 5.0, 6.0, 7.0,
    ]);
    let v4 = Vector4::new(1.0, -1.0, 2.0, 0.5);
    assert_eq!(m.times_transpose_vector4(&v4), m.transposed().times_vector4(&v4));
    let v3 = Vector3::new(0.5, 2.0, -3.0);
    assert_eq!(
        m.times_transpose_vector3(&v3),
        m.transposed().times_relative_vector3(&v3)
    );
}

#[test]
fn rotations_follow_right_hand_rule() {
    approx_eq3(
        Matrix4::rotation_z(FRAC_PI_2).times_vector3(&Vector3::X_UNIT),
        Vector3::Y_UNIT,
    );
    approx_eq3(
        Matrix4::rotation_x(FRAC_PI_2).times_vector3(&Vector3::Y_UNIT),
        Vector3::Z_UNIT,
    );
    approx_eq3(
        Matrix4::rotation_y(FRAC_PI_2).times_vector3(&Vector3::Z_UNIT),
        Vector3::X_UNIT,
    );
    approx_eq16(
        Matrix4::rotation_axis_angle(&Vector3::Z_UNIT, 0.3).to_array(),
        Matrix4::rotation_z(0.3).to_array(),
    );
}

#[test]
fn css_transform_is_column_major_with_twenty_digits() {
    let one = "1.00000000000000000000";
    let zero = "0.00000000000000000000";
    let expected = format!(
        "matrix3d({one},{zero},{zero},{zero},{zero},{one},{zero},{zero},{zero},{zero},{one},{zero},\
         0.50000000000000000000,-2.00000000000000000000,{zero},{one})"
    );
    assert_eq!(
        Matrix4::translation(0.5, -2.0, -0.0).css_transform(),
        expected
    );
}

#[test]
fn bulk_copy_is_column_major() {
    let m = Matrix4::translation(7.0, 8.0, 9.0);
    let mut out = [0.0; 16];
    m.copy_to_array(&mut out);
    assert_eq!(&out[0..4], &[1.0, 0.0, 0.0, 0.0]);
    assert_eq!(&out[12..16], &[7.0, 8.0, 9.0, 1.0]);

    let mut out32 = [0.0_f32; 16];
    m.copy_to_f32_array(&mut out32);
    assert_eq!(&out32[12..16], &[7.0, 8.0, 9.0, 1.0]);
}

#[test]
fn finiteness_and_display() {
    assert!(Matrix4::IDENTITY.is_finite());
    assert!(!Matrix4::scaling(f64::INFINITY, 1.0, 1.0).is_finite());
    assert_eq!(
        Matrix4::translation(1.0, 2.0, 3.0).to_string(),
        "1 0 0 1\n0 1 0 2\n0 0 1 3\n0 0 0 1"
    );
}

#[test]
fn scale_vector_reads_column_lengths() {
    let m = Matrix4::rotation_y(0.4) * Matrix4::scaling(2.0, 3.0, 4.0);
    approx_eq3(m.scale_vector(), Vector3::new(2.0, 3.0, 4.0));
}

#[test]
fn plus_minus_negated_infer_tags() {
    let a = Matrix4::translation(1.0, 2.0, 3.0);
    let sum = a.plus(&a);
    // Bottom row becomes (0, 0, 0, 2): no longer affine.
    assert_eq!(sum.matrix_type(), MatrixType::Other);
    assert_eq!(sum.minus(&a).to_array(), a.to_array());
    assert_eq!(a.negated().negated().to_array(), a.to_array());
}

#[test]
fn mul_assign_variants_match_times_matrix() {
    let lhs = Matrix4::rotation_x(0.5);
    let rhs = Matrix4::scaling(2.0, 3.0, 4.0);
    let expected = lhs.times_matrix(&rhs);
    let mut owned = lhs;
    owned *= rhs;
    assert_eq!(owned, expected);
    let mut borrowed = lhs;
    borrowed *= &rhs;
    assert_eq!(borrowed, expected);
    assert_eq!(&lhs * &rhs, expected);
}
