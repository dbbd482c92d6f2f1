// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use thiserror::Error;

/// Errors raised by vector and matrix operations on unrepresentable input.
///
/// These are never recovered locally: every fallible operation leaves its
/// receiver untouched and hands the error to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    /// A magnitude-based operation was applied to an exactly-zero vector.
    #[error("{operation}: cannot operate on a zero-magnitude vector")]
    ZeroMagnitude {
        /// Name of the operation that failed (e.g. `"normalize"`).
        operation: &'static str,
    },
    /// The matrix determinant is exactly zero.
    #[error("inverted: matrix is not invertible (determinant is 0)")]
    NotInvertible,
    /// A structural tag discriminant did not name any [`crate::MatrixType`].
    #[error("unknown matrix type tag: {0}")]
    UnknownMatrixType(u8),
}
