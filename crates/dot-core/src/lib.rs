// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! dot-core: fixed-size linear algebra for real-time coordinate conversion.
//!
//! This crate provides:
//! - `Vector3` / `Vector4` with paired value-returning (`plus`, `normalized`)
//!   and in-place (`add`, `normalize`) operation families.
//! - `Matrix4`, a column-major 4×4 homogeneous matrix carrying a structural
//!   [`MatrixType`] tag that selects cheaper multiply/invert algorithms.
//! - [`Pool`], an explicit acquire/release free list for hot loops.
//! - [`dot_assert!`], the checked-build invariant gate shared with `dot-geom`.
//!
//! Everything is `f64`; no operation allocates on the heap except `Pool`
//! growth and text rendering.
#![forbid(unsafe_code)]

#[macro_use]
mod assert;
mod error;
/// Column-major 4×4 matrices and their structural tags.
pub mod matrix4;
mod pool;
mod vector3;
mod vector4;

pub use assert::CHECKED;
pub use error::MathError;
pub use matrix4::{Matrix4, MatrixType};
pub use pool::{Pool, PoolConfig, Poolable};
pub use vector3::{Vector3, Vector3StateObject};
pub use vector4::{Vector4, Vector4StateObject};

/// Default tolerance used by epsilon comparisons in tests and callers that do
/// not carry their own.
pub const EPSILON: f64 = 1e-10;
