// Copyright 2025 the Campus Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

/// Bounds applied to the scale and rotation of a [`Pose`].
///
/// Rotation is expressed in radians. A degenerate range such as `0.0..=0.0`
/// disables rotation entirely, which is the common configuration for maps
/// that should always stay north-up.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoseLimits {
    /// Smallest allowed uniform scale. Always strictly positive after normalization.
    pub min_scale: f64,
    /// Largest allowed uniform scale.
    pub max_scale: f64,
    /// Smallest allowed rotation in radians.
    pub min_rotation: f64,
    /// Largest allowed rotation in radians.
    pub max_rotation: f64,
}

impl Default for PoseLimits {
    /// Scale in `[1e-3, 1e3]`, rotation disabled.
    fn default() -> Self {
        Self {
            min_scale: 1e-3,
            max_scale: 1e3,
            min_rotation: 0.0,
            max_rotation: 0.0,
        }
    }
}

impl PoseLimits {
    /// Creates limits from a scale range and a rotation range.
    ///
    /// The values are stored as given; [`Pose`] normalizes them on use.
    #[must_use]
    pub const fn new(min_scale: f64, max_scale: f64, min_rotation: f64, max_rotation: f64) -> Self {
        Self {
            min_scale,
            max_scale,
            min_rotation,
            max_rotation,
        }
    }

    /// Returns a copy with ordered ranges and a strictly positive, finite scale range.
    ///
    /// - Swapped bounds are reordered.
    /// - A non-positive or non-finite minimum scale falls back to the default minimum.
    /// - A non-finite maximum scale falls back to the default maximum (or the
    ///   minimum, whichever is larger).
    /// - Non-finite rotation bounds are replaced with `0.0`.
    #[must_use]
    pub fn normalized(self) -> Self {
        let fallback = Self::default();

        let (mut min_scale, mut max_scale) = ordered(self.min_scale, self.max_scale);
        if !(min_scale.is_finite() && min_scale > 0.0) {
            min_scale = if max_scale.is_finite() && max_scale > 0.0 {
                fallback.min_scale.min(max_scale)
            } else {
                fallback.min_scale
            };
        }
        if !max_scale.is_finite() || max_scale < min_scale {
            max_scale = fallback.max_scale.max(min_scale);
        }

        let finite_or_zero = |v: f64| if v.is_finite() { v } else { 0.0 };
        let (min_rotation, max_rotation) = ordered(
            finite_or_zero(self.min_rotation),
            finite_or_zero(self.max_rotation),
        );

        Self {
            min_scale,
            max_scale,
            min_rotation,
            max_rotation,
        }
    }

    /// Clamps `scale` into the scale range.
    ///
    /// Limits must be [normalized](Self::normalized).
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// Clamps `rotation` into the rotation range.
    ///
    /// Limits must be [normalized](Self::normalized).
    #[must_use]
    pub fn clamp_rotation(&self, rotation: f64) -> f64 {
        rotation.clamp(self.min_rotation, self.max_rotation)
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// One decoded gesture update: pan, additive zoom and additive rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransformDelta {
    /// Translation delta in screen pixels.
    pub translation: Vec2,
    /// Additive scale delta.
    pub scale: f64,
    /// Additive rotation delta in radians.
    pub rotation: f64,
}

impl TransformDelta {
    /// A delta that changes nothing.
    pub const ZERO: Self = Self {
        translation: Vec2::ZERO,
        scale: 0.0,
        rotation: 0.0,
    };

    /// A pure pan.
    #[must_use]
    pub const fn pan(translation: Vec2) -> Self {
        Self {
            translation,
            scale: 0.0,
            rotation: 0.0,
        }
    }

    /// A pure zoom.
    #[must_use]
    pub const fn zoom(scale: f64) -> Self {
        Self {
            translation: Vec2::ZERO,
            scale,
            rotation: 0.0,
        }
    }

    /// A pure rotation.
    #[must_use]
    pub const fn rotate(rotation: f64) -> Self {
        Self {
            translation: Vec2::ZERO,
            scale: 0.0,
            rotation,
        }
    }
}

/// Live pan/zoom/rotation of the map: a 2D similarity transform.
///
/// The forward transform maps *centered display* coordinates (the drawing laid
/// out at display scale, with its center at the origin) into screen space:
///
/// ```text
/// screen = translation + rotate(rotation) * (scale * p)
/// ```
///
/// Scale is uniform and always strictly positive, so the transform is always
/// invertible. The forward and inverse matrices are cached and rebuilt
/// together on every mutation, so they never drift apart.
///
/// Updates are pure functions of the current state and the delta: scale and
/// rotation are clamped into [`PoseLimits`], translation is unclamped, and
/// non-finite deltas are ignored.
///
/// ```rust
/// use kurbo::{Point, Vec2};
/// use campus_view::{Pose, PoseLimits};
///
/// let limits = PoseLimits::new(3.0, 30.0, 0.0, 0.0);
/// let mut pose = Pose::new(Vec2::new(100.0, 190.0), 3.0, 0.0, limits);
///
/// pose.update_scale(100.0);
/// assert_eq!(pose.scale(), 30.0);
///
/// let p = Point::new(12.0, -4.0);
/// let back = pose.apply_inverse(pose.apply(p));
/// assert!((back - p).hypot() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct Pose {
    translation: Vec2,
    scale: f64,
    rotation: f64,
    limits: PoseLimits,
    forward: Affine,
    inverse: Affine,
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 1.0, 0.0, PoseLimits::default())
    }
}

impl Pose {
    /// Creates a pose, clamping `scale` and `rotation` into `limits`.
    ///
    /// Non-finite inputs fall back to a zero translation, the minimum scale,
    /// and the clamped zero rotation respectively.
    #[must_use]
    pub fn new(translation: Vec2, scale: f64, rotation: f64, limits: PoseLimits) -> Self {
        let limits = limits.normalized();
        let translation = if translation.is_finite() {
            translation
        } else {
            Vec2::ZERO
        };
        let scale = if scale.is_finite() {
            limits.clamp_scale(scale)
        } else {
            limits.min_scale
        };
        let rotation = limits.clamp_rotation(if rotation.is_finite() { rotation } else { 0.0 });

        let mut pose = Self {
            translation,
            scale,
            rotation,
            limits,
            forward: Affine::IDENTITY,
            inverse: Affine::IDENTITY,
        };
        pose.rebuild_transforms();
        pose
    }

    /// Returns the current translation in screen pixels.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Returns the current uniform scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the current rotation in radians.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Returns the normalized limits.
    #[must_use]
    pub fn limits(&self) -> PoseLimits {
        self.limits
    }

    /// Replaces the limits and re-clamps the current scale and rotation.
    pub fn set_limits(&mut self, limits: PoseLimits) {
        let limits = limits.normalized();
        if self.limits == limits {
            return;
        }
        self.limits = limits;
        self.scale = limits.clamp_scale(self.scale);
        self.rotation = limits.clamp_rotation(self.rotation);
        self.rebuild_transforms();
    }

    /// Returns the composed forward transform.
    #[must_use]
    pub fn affine(&self) -> Affine {
        self.forward
    }

    /// Returns the inverse of [`Pose::affine`].
    #[must_use]
    pub fn inverse(&self) -> Affine {
        self.inverse
    }

    /// Applies the forward transform to `pt`.
    #[must_use]
    pub fn apply(&self, pt: Point) -> Point {
        self.forward * pt
    }

    /// Applies the inverse transform to `pt`.
    #[must_use]
    pub fn apply_inverse(&self, pt: Point) -> Point {
        self.inverse * pt
    }

    /// Adds `delta` to the scale, clamping the result into the scale range.
    pub fn update_scale(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        self.set_scale(self.scale + delta);
    }

    /// Sets the scale, clamping it into the scale range.
    pub fn set_scale(&mut self, scale: f64) {
        if !scale.is_finite() {
            return;
        }
        let clamped = self.limits.clamp_scale(scale);
        if clamped == self.scale {
            return;
        }
        self.scale = clamped;
        self.rebuild_transforms();
    }

    /// Adds `delta` to the rotation, clamping the result into the rotation range.
    pub fn update_rotation(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        let clamped = self.limits.clamp_rotation(self.rotation + delta);
        if clamped == self.rotation {
            return;
        }
        self.rotation = clamped;
        self.rebuild_transforms();
    }

    /// Adds `delta` to the translation. Translation is not clamped.
    pub fn update_translation(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO || !delta.is_finite() {
            return;
        }
        self.translation += delta;
        self.rebuild_transforms();
    }

    /// Applies a gesture delta: translation, then scale, then rotation.
    pub fn apply_delta(&mut self, delta: TransformDelta) {
        self.update_translation(delta.translation);
        self.update_scale(delta.scale);
        self.update_rotation(delta.rotation);
    }

    /// Multiplies the scale by `factor` while keeping `anchor` (in screen
    /// space) fixed, as a pinch centered on the anchor would.
    ///
    /// Non-positive or non-finite factors are ignored.
    pub fn zoom_about_screen_point(&mut self, anchor: Point, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let old_scale = self.scale;
        let new_scale = self.limits.clamp_scale(old_scale * factor);
        if new_scale == old_scale {
            return;
        }

        let local = self.apply_inverse(anchor);
        self.scale = new_scale;
        self.rebuild_transforms();
        let moved = self.apply(local);
        self.update_translation(anchor - moved);
    }

    /// Snapshot of the current pose for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> PoseDebugInfo {
        PoseDebugInfo {
            translation: self.translation,
            scale: self.scale,
            rotation: self.rotation,
            limits: self.limits,
            affine: self.forward,
        }
    }

    fn rebuild_transforms(&mut self) {
        // Screen <- rotate <- scale. The inverse is built term by term rather
        // than through a generic matrix inversion.
        self.forward = Affine::translate(self.translation)
            * Affine::rotate(self.rotation)
            * Affine::scale(self.scale);
        self.inverse = Affine::scale(1.0 / self.scale)
            * Affine::rotate(-self.rotation)
            * Affine::translate(-self.translation);
    }
}

/// Debug snapshot of a [`Pose`].
#[derive(Clone, Copy, Debug)]
pub struct PoseDebugInfo {
    /// Translation in screen pixels.
    pub translation: Vec2,
    /// Uniform scale.
    pub scale: f64,
    /// Rotation in radians.
    pub rotation: f64,
    /// Normalized limits.
    pub limits: PoseLimits,
    /// Composed forward transform.
    pub affine: Affine,
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;

    use kurbo::{Point, Vec2};

    use super::{Pose, PoseLimits, TransformDelta};

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn scale_clamps_exactly_to_max() {
        let limits = PoseLimits::new(3.0, 30.0, 0.0, 0.0);
        let mut pose = Pose::new(Vec2::ZERO, 3.0, 0.0, limits);
        pose.update_scale(26.5);
        assert_eq!(pose.scale(), 29.5);
        pose.update_scale(0.75);
        assert_eq!(pose.scale(), 30.0);
        pose.update_scale(-1000.0);
        assert_eq!(pose.scale(), 3.0);
    }

    #[test]
    fn degenerate_rotation_range_disables_rotation() {
        let limits = PoseLimits::new(1.0, 2.0, 0.0, 0.0);
        let mut pose = Pose::new(Vec2::ZERO, 1.0, 0.5, limits);
        assert_eq!(pose.rotation(), 0.0);
        pose.update_rotation(1.0);
        assert_eq!(pose.rotation(), 0.0);
    }

    #[test]
    fn translation_is_unclamped() {
        let mut pose = Pose::default();
        pose.update_translation(Vec2::new(1e7, -1e7));
        assert_eq!(pose.translation(), Vec2::new(1e7, -1e7));
    }

    #[test]
    fn forward_and_inverse_agree_with_rotation() {
        let limits = PoseLimits::new(0.5, 8.0, -FRAC_PI_2, FRAC_PI_2);
        let pose = Pose::new(Vec2::new(40.0, -7.0), 2.5, 0.3, limits);
        let p = Point::new(13.0, 21.0);
        assert!(close(pose.apply_inverse(pose.apply(p)), p));
        assert!(close(pose.apply(pose.apply_inverse(p)), p));
        let composed = pose.affine() * pose.inverse();
        assert!(close(composed * p, p));
    }

    #[test]
    fn quarter_turn_maps_axes() {
        let limits = PoseLimits::new(1.0, 1.0, -FRAC_PI_2, FRAC_PI_2);
        let pose = Pose::new(Vec2::ZERO, 1.0, FRAC_PI_2, limits);
        // y-down screen space: +x rotates onto +y.
        assert!(close(pose.apply(Point::new(1.0, 0.0)), Point::new(0.0, 1.0)));
    }

    #[test]
    fn non_finite_deltas_are_ignored() {
        let mut pose = Pose::new(Vec2::new(1.0, 2.0), 4.0, 0.0, PoseLimits::default());
        pose.apply_delta(TransformDelta {
            translation: Vec2::new(f64::NAN, 0.0),
            scale: f64::INFINITY,
            rotation: f64::NAN,
        });
        assert_eq!(pose.translation(), Vec2::new(1.0, 2.0));
        assert_eq!(pose.scale(), 4.0);
        assert_eq!(pose.rotation(), 0.0);
    }

    #[test]
    fn apply_delta_combines_components() {
        let limits = PoseLimits::new(3.0, 30.0, 0.0, 0.0);
        let mut pose = Pose::new(Vec2::ZERO, 3.0, 0.0, limits);
        pose.apply_delta(TransformDelta {
            translation: Vec2::new(5.0, -5.0),
            scale: 2.0,
            rotation: 0.2,
        });
        assert_eq!(pose.translation(), Vec2::new(5.0, -5.0));
        assert_eq!(pose.scale(), 5.0);
        assert_eq!(pose.rotation(), 0.0);
    }

    #[test]
    fn limits_normalize_and_reclamp() {
        let limits = PoseLimits::new(30.0, 3.0, 1.0, -1.0).normalized();
        assert_eq!(limits, PoseLimits::new(3.0, 30.0, -1.0, 1.0));

        let bad = PoseLimits::new(-2.0, f64::NAN, f64::INFINITY, 0.0).normalized();
        assert!(bad.min_scale > 0.0);
        assert!(bad.max_scale >= bad.min_scale);
        assert_eq!((bad.min_rotation, bad.max_rotation), (0.0, 0.0));

        let limits = PoseLimits::new(1.0, 30.0, 0.0, 0.0);
        let mut pose = Pose::new(Vec2::ZERO, 20.0, 0.0, limits);
        pose.set_limits(PoseLimits::new(1.0, 10.0, 0.0, 0.0));
        assert_eq!(pose.scale(), 10.0);
    }

    #[test]
    fn zoom_about_anchor_keeps_anchor_fixed() {
        let limits = PoseLimits::new(3.0, 30.0, 0.0, 0.0);
        let mut pose = Pose::new(Vec2::new(100.0, 190.0), 3.0, 0.0, limits);
        let anchor = Point::new(250.0, 400.0);
        let local_before = pose.apply_inverse(anchor);

        pose.zoom_about_screen_point(anchor, 2.0);
        assert_eq!(pose.scale(), 6.0);
        assert!(close(pose.apply_inverse(anchor), local_before));

        // Ignored.
        pose.zoom_about_screen_point(anchor, 0.0);
        assert_eq!(pose.scale(), 6.0);
    }

    #[test]
    fn debug_info_reflects_state() {
        let pose = Pose::new(Vec2::new(1.0, 1.0), 2.0, 0.0, PoseLimits::default());
        let info = pose.debug_info();
        assert_eq!(info.scale, 2.0);
        assert_eq!(info.translation, Vec2::new(1.0, 1.0));
        assert_eq!(info.affine, pose.affine());
    }
}
