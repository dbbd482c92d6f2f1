// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![forbid(unsafe_code)]
#![doc = r"Geometry built on `dot-core` vectors and matrices.

This crate provides:
- Rays (`Ray3`) and planes (`Plane3`) with intersection helpers.
- `Transform4`, an authoritative `Matrix4` with lazily cached inverse,
  transpose, and inverse-transpose plus synchronous change listeners.
- Axis-aligned 2D bounds (`Bounds2`, alias `Rectangle`).

Design notes:
- Single-threaded and synchronous; nothing here suspends or locks.
- Degenerate geometry with valid input (collinear triangle, parallel planes)
  yields `None`. Malformed input (non-unit directions, non-finite matrices)
  trips `dot_assert!` in checked builds.
"]

pub mod bounds;
mod plane3;
mod ray3;
mod transform4;

pub use bounds::{Bounds2, Rectangle};
pub use dot_core::MathError;
pub use plane3::Plane3;
pub use ray3::Ray3;
pub use transform4::{CacheStats, ChangeListener, ListenerId, Transform4};
