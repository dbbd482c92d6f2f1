// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Axis-aligned 2D bounds.
//!
//! Bounds are inclusive on their edges. A box whose max is below its min on
//! either axis is empty; `Bounds2::NOTHING` is the canonical empty box.

mod bounds2;

pub use bounds2::Bounds2;

/// Rectangle described by origin and size; build one with [`Bounds2::rect`].
pub type Rectangle = Bounds2;
