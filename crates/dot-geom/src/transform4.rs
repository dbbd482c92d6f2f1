// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Authoritative 4×4 transform with lazily cached derived matrices.

use core::fmt;

use dot_core::{dot_assert, MathError, Matrix4, Vector3};
use tracing::trace;

use crate::Ray3;

/// Callback invoked synchronously after every change to a [`Transform4`].
///
/// The listener receives the transform itself, so it may read derived
/// matrices (which recompute on the spot) or register further listeners.
pub type ChangeListener = Box<dyn FnMut(&mut Transform4)>;

/// Handle returned by [`Transform4::on_change`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Number of times each derived matrix has been recomputed.
///
/// A getter that hits its cache leaves these untouched.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Inverse recomputations.
    pub inverse: u64,
    /// Transpose recomputations.
    pub transpose: u64,
    /// Inverse-transpose recomputations.
    pub inverse_transpose: u64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Validity {
    inverse: bool,
    transpose: bool,
    inverse_transpose: bool,
}

impl Validity {
    const ALL: Self = Self {
        inverse: true,
        transpose: true,
        inverse_transpose: true,
    };
    const NONE: Self = Self {
        inverse: false,
        transpose: false,
        inverse_transpose: false,
    };
}

struct ListenerSlot {
    id: ListenerId,
    // Taken out while the callback runs.
    callback: Option<ChangeListener>,
    removed: bool,
}

/// One authoritative [`Matrix4`] plus its inverse, transpose, and
/// inverse-transpose, each recomputed at most once per change.
///
/// Invariants:
/// - a set validity flag means the derived slot matches the current matrix;
/// - every mutator ends by clearing all three flags and then notifying
///   listeners, before anything is recomputed;
/// - the inverse-transpose is the transpose *of the inverse* and is always
///   derived by first going through [`Transform4::get_inverse`];
/// - each change is delivered to the listeners exactly once. A change made
///   from inside a listener is queued and delivered in a further round after
///   the current one, so a listener that always mutates never settles.
///
/// Matrices passed in are copied; later changes to the caller's value never
/// reach the transform.
///
/// # Examples
/// ```
/// use dot_core::{Matrix4, Vector3};
/// use dot_geom::Transform4;
///
/// let mut t = Transform4::from_matrix(&Matrix4::translation(1.0, 2.0, 3.0));
/// assert!(!t.is_inverse_valid());
/// let back = t.inverse_position3(&Vector3::new(1.0, 2.0, 3.0));
/// assert_eq!(back, Ok(Vector3::ZERO));
/// assert!(t.is_inverse_valid());
/// ```
pub struct Transform4 {
    matrix: Matrix4,
    inverse: Matrix4,
    transpose: Matrix4,
    inverse_transpose: Matrix4,
    valid: Validity,
    stats: CacheStats,
    listeners: Vec<ListenerSlot>,
    next_listener: u64,
    notifying: bool,
    pending_rounds: u32,
}

impl Transform4 {
    /// Identity transform with every derived matrix already populated.
    pub fn new() -> Self {
        Self {
            matrix: Matrix4::IDENTITY,
            inverse: Matrix4::IDENTITY,
            transpose: Matrix4::IDENTITY,
            inverse_transpose: Matrix4::IDENTITY,
            valid: Validity::ALL,
            stats: CacheStats::default(),
            listeners: Vec::new(),
            next_listener: 0,
            notifying: false,
            pending_rounds: 0,
        }
    }

    /// Transform holding a copy of `matrix`; derived matrices start invalid.
    pub fn from_matrix(matrix: &Matrix4) -> Self {
        let mut transform = Self::new();
        transform.set_matrix(matrix);
        transform
    }

    /// Replaces the authoritative matrix with a copy of `matrix`.
    pub fn set_matrix(&mut self, matrix: &Matrix4) -> &mut Self {
        self.matrix.set(matrix);
        self.invalidate()
    }

    /// `matrix = m · matrix` (applies `m` after the current transform).
    pub fn prepend(&mut self, m: &Matrix4) -> &mut Self {
        self.matrix = m.times_matrix(&self.matrix);
        self.invalidate()
    }

    /// `matrix = matrix · m` (applies `m` before the current transform).
    pub fn append(&mut self, m: &Matrix4) -> &mut Self {
        self.matrix = self.matrix.times_matrix(m);
        self.invalidate()
    }

    /// Prepends another transform's matrix.
    pub fn prepend_transform(&mut self, other: &Self) -> &mut Self {
        self.prepend(&other.matrix)
    }

    /// Appends another transform's matrix.
    pub fn append_transform(&mut self, other: &Self) -> &mut Self {
        self.append(&other.matrix)
    }

    fn invalidate(&mut self) -> &mut Self {
        dot_assert!(
            self.matrix.is_finite(),
            "transform matrix must be finite:\n{}",
            self.matrix
        );
        self.valid = Validity::NONE;
        trace!(
            matrix_type = %self.matrix.matrix_type(),
            listeners = self.listeners.len(),
            "transform invalidated"
        );
        self.notify();
        self
    }

    fn notify(&mut self) {
        // A change made by a listener is queued and delivered as its own
        // round once the current one finishes.
        self.pending_rounds += 1;
        if self.notifying {
            return;
        }
        self.notifying = true;
        while self.pending_rounds > 0 {
            self.pending_rounds -= 1;
            // Listeners registered from inside a callback wait for the next round.
            let count = self.listeners.len();
            for idx in 0..count {
                if let Some(mut callback) = self.listeners[idx].callback.take() {
                    callback(self);
                    self.listeners[idx].callback = Some(callback);
                }
            }
            self.listeners.retain(|slot| !slot.removed);
        }
        self.notifying = false;
    }

    /// Registers `listener`, called after every subsequent change.
    pub fn on_change(&mut self, listener: impl FnMut(&mut Self) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(ListenerSlot {
            id,
            callback: Some(Box::new(listener)),
            removed: false,
        });
        id
    }

    /// Unregisters a listener; returns `false` if `id` is not registered.
    ///
    /// Removal requested during a notification takes effect once that
    /// notification completes.
    pub fn remove_change_listener(&mut self, id: ListenerId) -> bool {
        let Some(idx) = self
            .listeners
            .iter()
            .position(|slot| slot.id == id && !slot.removed)
        else {
            return false;
        };
        if self.notifying {
            self.listeners[idx].removed = true;
        } else {
            self.listeners.remove(idx);
        }
        true
    }

    /// The authoritative matrix.
    pub fn get_matrix(&self) -> &Matrix4 {
        &self.matrix
    }

    /// Inverse of the matrix, recomputed only after a change.
    ///
    /// # Errors
    /// [`MathError::NotInvertible`] when the matrix is singular; the cache
    /// stays invalid and the next call tries again.
    pub fn get_inverse(&mut self) -> Result<&Matrix4, MathError> {
        if !self.valid.inverse {
            let inverse = self.matrix.inverted()?;
            self.inverse.set(&inverse);
            self.valid.inverse = true;
            self.stats.inverse += 1;
            trace!(slot = "inverse", "derived matrix recomputed");
        }
        Ok(&self.inverse)
    }

    /// Transpose of the matrix, recomputed only after a change.
    pub fn get_matrix_transposed(&mut self) -> &Matrix4 {
        if !self.valid.transpose {
            self.transpose.set(&self.matrix.transposed());
            self.valid.transpose = true;
            self.stats.transpose += 1;
            trace!(slot = "transpose", "derived matrix recomputed");
        }
        &self.transpose
    }

    /// Transpose of the inverse, recomputed only after a change.
    ///
    /// # Errors
    /// [`MathError::NotInvertible`] when the matrix is singular.
    pub fn get_inverse_transposed(&mut self) -> Result<&Matrix4, MathError> {
        let inverse = *self.get_inverse()?;
        if !self.valid.inverse_transpose {
            self.inverse_transpose.set(&inverse.transposed());
            self.valid.inverse_transpose = true;
            self.stats.inverse_transpose += 1;
            trace!(slot = "inverse_transpose", "derived matrix recomputed");
        }
        Ok(&self.inverse_transpose)
    }

    /// Whether the cached inverse matches the current matrix.
    pub fn is_inverse_valid(&self) -> bool {
        self.valid.inverse
    }

    /// Whether the cached transpose matches the current matrix.
    pub fn is_transpose_valid(&self) -> bool {
        self.valid.transpose
    }

    /// Whether the cached inverse-transpose matches the current matrix.
    pub fn is_inverse_transpose_valid(&self) -> bool {
        self.valid.inverse_transpose
    }

    /// Recomputation counters.
    pub fn cache_stats(&self) -> CacheStats {
        self.stats
    }

    /// `true` when the matrix is tagged [`dot_core::MatrixType::Identity`].
    pub fn is_identity(&self) -> bool {
        self.matrix.matrix_type() == dot_core::MatrixType::Identity
    }

    /// `true` when every matrix entry is finite.
    pub fn is_finite(&self) -> bool {
        self.matrix.is_finite()
    }

    // Forward family.

    /// Transforms a point (translation applied).
    pub fn transform_position3(&self, v: &Vector3) -> Vector3 {
        self.matrix.times_vector3(v)
    }

    /// Transforms a delta (translation ignored).
    pub fn transform_delta3(&self, v: &Vector3) -> Vector3 {
        self.matrix.times_relative_vector3(v)
    }

    /// Transforms a surface normal with the inverse-transpose, keeping it
    /// perpendicular to transformed surfaces under non-uniform scale.
    ///
    /// The result is not renormalized.
    ///
    /// # Errors
    /// [`MathError::NotInvertible`] when the matrix is singular.
    pub fn transform_normal3(&mut self, v: &Vector3) -> Result<Vector3, MathError> {
        Ok(self.get_inverse_transposed()?.times_relative_vector3(v))
    }

    /// X component of the transformed delta `(x, 0, 0)`.
    pub fn transform_delta_x(&self, x: f64) -> f64 {
        self.transform_delta3(&Vector3::new(x, 0.0, 0.0)).x()
    }

    /// Y component of the transformed delta `(0, y, 0)`.
    pub fn transform_delta_y(&self, y: f64) -> f64 {
        self.transform_delta3(&Vector3::new(0.0, y, 0.0)).y()
    }

    /// Z component of the transformed delta `(0, 0, z)`.
    pub fn transform_delta_z(&self, z: f64) -> f64 {
        self.transform_delta3(&Vector3::new(0.0, 0.0, z)).z()
    }

    /// Transforms a ray: origin as a point, direction as a renormalized delta.
    ///
    /// # Errors
    /// [`MathError::ZeroMagnitude`] when the matrix collapses the direction.
    pub fn transform_ray(&self, ray: &Ray3) -> Result<Ray3, MathError> {
        Ok(Ray3::new(
            self.transform_position3(&ray.position()),
            self.transform_delta3(&ray.direction()).normalized()?,
        ))
    }

    // Inverse family.

    /// Maps a point back through the inverse.
    ///
    /// # Errors
    /// [`MathError::NotInvertible`] when the matrix is singular.
    pub fn inverse_position3(&mut self, v: &Vector3) -> Result<Vector3, MathError> {
        Ok(self.get_inverse()?.times_vector3(v))
    }

    /// Maps a delta back through the inverse.
    ///
    /// # Errors
    /// [`MathError::NotInvertible`] when the matrix is singular.
    pub fn inverse_delta3(&mut self, v: &Vector3) -> Result<Vector3, MathError> {
        Ok(self.get_inverse()?.times_relative_vector3(v))
    }

    /// Maps a normal back: the inverse of [`Transform4::transform_normal3`]
    /// is the plain matrix transpose, so this never fails.
    pub fn inverse_normal3(&mut self, v: &Vector3) -> Vector3 {
        self.get_matrix_transposed().times_relative_vector3(v)
    }

    /// X component of the inverse-transformed delta `(x, 0, 0)`.
    ///
    /// # Errors
    /// [`MathError::NotInvertible`] when the matrix is singular.
    pub fn inverse_delta_x(&mut self, x: f64) -> Result<f64, MathError> {
        Ok(self.inverse_delta3(&Vector3::new(x, 0.0, 0.0))?.x())
    }

    /// Y component of the inverse-transformed delta `(0, y, 0)`.
    ///
    /// # Errors
    /// [`MathError::NotInvertible`] when the matrix is singular.
    pub fn inverse_delta_y(&mut self, y: f64) -> Result<f64, MathError> {
        Ok(self.inverse_delta3(&Vector3::new(0.0, y, 0.0))?.y())
    }

    /// Z component of the inverse-transformed delta `(0, 0, z)`.
    ///
    /// # Errors
    /// [`MathError::NotInvertible`] when the matrix is singular.
    pub fn inverse_delta_z(&mut self, z: f64) -> Result<f64, MathError> {
        Ok(self.inverse_delta3(&Vector3::new(0.0, 0.0, z))?.z())
    }

    /// Maps a ray back through the inverse.
    ///
    /// # Errors
    /// [`MathError::NotInvertible`] for a singular matrix, or
    /// [`MathError::ZeroMagnitude`] if the direction collapses.
    pub fn inverse_ray(&mut self, ray: &Ray3) -> Result<Ray3, MathError> {
        let inverse = *self.get_inverse()?;
        Ok(Ray3::new(
            inverse.times_vector3(&ray.position()),
            inverse.times_relative_vector3(&ray.direction()).normalized()?,
        ))
    }
}

impl Default for Transform4 {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Transform4 {
    /// Copies the matrix and every cached slot; listeners stay behind.
    fn clone(&self) -> Self {
        Self {
            matrix: self.matrix,
            inverse: self.inverse,
            transpose: self.transpose,
            inverse_transpose: self.inverse_transpose,
            valid: self.valid,
            stats: CacheStats::default(),
            listeners: Vec::new(),
            next_listener: 0,
            notifying: false,
            pending_rounds: 0,
        }
    }
}

impl fmt::Debug for Transform4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform4")
            .field("matrix", &self.matrix)
            .field("valid", &self.valid)
            .field("stats", &self.stats)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
