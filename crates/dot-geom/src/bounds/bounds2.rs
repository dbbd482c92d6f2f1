// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;

/// Axis-aligned box `[min_x, max_x] × [min_y, max_y]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds2 {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds2 {
    /// Empty bounds that contain nothing (min = +∞, max = −∞).
    pub const NOTHING: Self = Self {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    /// Creates bounds from corner coordinates.
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates bounds from an origin and a size.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Minimum X.
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    /// Minimum Y.
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    /// Maximum X.
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    /// Maximum Y.
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// `max_x - min_x`.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// `max_y - min_y`.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// `true` when either extent is negative. Zero-size bounds are not empty.
    pub fn is_empty(&self) -> bool {
        self.width() < 0.0 || self.height() < 0.0
    }

    /// `true` when `(x, y)` lies inside or on the edge.
    pub fn contains_coordinates(&self, x: f64, y: f64) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }

    /// Horizontal midpoint.
    pub fn center_x(&self) -> f64 {
        (self.min_x + self.max_x) / 2.0
    }

    /// Vertical midpoint.
    pub fn center_y(&self) -> f64 {
        (self.min_y + self.max_y) / 2.0
    }

    /// Smallest bounds containing both boxes.
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Overlap of both boxes; empty when they are disjoint.
    pub fn intersection(&self, other: &Self) -> Self {
        Self::new(
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        )
    }
}

impl Default for Bounds2 {
    fn default() -> Self {
        Self::NOTHING
    }
}

impl fmt::Display for Bounds2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[x:({},{}),y:({},{})]",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}
