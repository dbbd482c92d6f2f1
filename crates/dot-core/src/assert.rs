// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Checked-build invariant assertions.
//!
//! # Cfg Gating
//!
//! Assertions are active when `debug_assertions` is set (debug builds) or when
//! the `checked` feature is enabled. Unchecked builds skip the condition
//! entirely and proceed with the value as-is.
//!
//! Violations are programmer errors (non-finite matrices, non-unit ray
//! directions, lying matrix tags) and panic immediately.

/// `true` when [`dot_assert!`] conditions are evaluated.
pub const CHECKED: bool = cfg!(any(debug_assertions, feature = "checked"));

/// Asserts an invariant in checked builds only.
///
/// Accepts the same arguments as [`assert!`]. The condition is not evaluated
/// at all when [`CHECKED`](crate::CHECKED) is `false`.
///
/// ```
/// use dot_core::dot_assert;
/// let len = 1.0_f64;
/// dot_assert!((len - 1.0).abs() < 1e-2, "expected unit length, got {len}");
/// ```
#[macro_export]
macro_rules! dot_assert {
    ($cond:expr $(,)?) => {
        if $crate::CHECKED {
            assert!($cond);
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if $crate::CHECKED {
            assert!($cond, $($arg)+);
        }
    };
}
