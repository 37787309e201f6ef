// Copyright 2025 the Campus Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use campus_view::{Pose, PoseLimits};
use kurbo::{Size, Vec2};

/// Opacity of building labels as a function of zoom.
///
/// Labels are fully transparent below `appear_scale - ramp`, fully opaque at
/// or above `appear_scale`, and fade linearly in between. A zero `ramp` makes
/// them pop in at `appear_scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelFade {
    /// Scale at which labels are fully opaque.
    pub appear_scale: f64,
    /// Width of the fade-in band below `appear_scale`.
    pub ramp: f64,
}

impl LabelFade {
    /// Labels are always fully opaque.
    pub const ALWAYS: Self = Self {
        appear_scale: 0.0,
        ramp: 0.0,
    };

    /// Returns the label opacity in `[0, 1]` for a pose scale.
    #[must_use]
    pub fn opacity(&self, scale: f64) -> f64 {
        if scale >= self.appear_scale {
            return 1.0;
        }
        if !(self.ramp.is_finite() && self.ramp > 0.0) {
            return 0.0;
        }
        ((scale - (self.appear_scale - self.ramp)) / self.ramp).clamp(0.0, 1.0)
    }
}

impl Default for LabelFade {
    fn default() -> Self {
        Self {
            appear_scale: 7.0,
            ramp: 0.0,
        }
    }
}

/// Starting pan/zoom/rotation of the map.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitialPose {
    /// Translation in screen pixels.
    pub translation: Vec2,
    /// Uniform scale.
    pub scale: f64,
    /// Rotation in radians.
    pub rotation: f64,
}

impl Default for InitialPose {
    fn default() -> Self {
        Self {
            translation: Vec2::new(100.0, 190.0),
            scale: 3.0,
            rotation: 0.0,
        }
    }
}

/// Everything needed to set up a [`MapContext`](crate::MapContext) besides
/// the drawing and the building catalog.
///
/// The defaults describe the reference campus drawing: a `1000 x 700`
/// drawing shown at 3x to 30x zoom with rotation disabled, and labels
/// appearing at 7x.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapConfig {
    /// Native size of the drawing in map units.
    pub native_size: Size,
    /// Pose the map starts at.
    pub initial_pose: InitialPose,
    /// Scale and rotation bounds.
    pub limits: PoseLimits,
    /// Building label fade-in.
    pub label_fade: LabelFade,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            native_size: Size::new(1000.0, 700.0),
            initial_pose: InitialPose::default(),
            limits: PoseLimits::new(3.0, 30.0, 0.0, 0.0),
            label_fade: LabelFade::default(),
        }
    }
}

impl MapConfig {
    /// Builds the starting [`Pose`].
    #[must_use]
    pub fn pose(&self) -> Pose {
        Pose::new(
            self.initial_pose.translation,
            self.initial_pose.scale,
            self.initial_pose.rotation,
            self.limits,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{LabelFade, MapConfig};

    #[test]
    fn step_fade() {
        let fade = LabelFade::default();
        assert_eq!(fade.opacity(3.0), 0.0);
        assert_eq!(fade.opacity(6.999), 0.0);
        assert_eq!(fade.opacity(7.0), 1.0);
        assert_eq!(fade.opacity(30.0), 1.0);
    }

    #[test]
    fn ramped_fade() {
        let fade = LabelFade {
            appear_scale: 8.0,
            ramp: 2.0,
        };
        assert_eq!(fade.opacity(5.0), 0.0);
        assert_eq!(fade.opacity(6.0), 0.0);
        assert!((fade.opacity(7.0) - 0.5).abs() < 1e-12);
        assert_eq!(fade.opacity(8.0), 1.0);
    }

    #[test]
    fn always_is_opaque() {
        assert_eq!(LabelFade::ALWAYS.opacity(1e-3), 1.0);
    }

    #[test]
    fn default_config_pose() {
        let pose = MapConfig::default().pose();
        assert_eq!(pose.scale(), 3.0);
        assert_eq!(pose.limits().max_scale, 30.0);
        assert_eq!(pose.rotation(), 0.0);
    }
}
