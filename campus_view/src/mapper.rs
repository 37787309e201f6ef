// Copyright 2025 the Campus Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

use crate::pose::Pose;

/// Error returned when a conversion is attempted before the view has a usable size.
///
/// This is expected during start-up (before the first layout pass) and is
/// meant to be handled locally by deferring or dropping the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("view size is not known yet, screen/map conversion is unavailable")]
pub struct NotReadyError;

/// Converts between screen space and map space.
///
/// - **Map space** is the fixed coordinate system of the source drawing:
///   origin at the top-left, extent [`SpaceMapper::native_size`].
/// - **Screen space** is the coordinate system of the rendered view: origin at
///   the top-left, extent [`SpaceMapper::view_size`].
///
/// The drawing is first laid out at a *display scale* (view width over native
/// width) and centered on the origin, then the live [`Pose`] is applied:
///
/// ```text
/// screen = pose.apply(map * display_scale - display_size / 2)
/// map    = (pose.apply_inverse(screen) + display_size / 2) / display_scale
/// ```
///
/// The pose is passed into every conversion rather than cached, so a
/// conversion always observes the latest transform.
///
/// Until a valid view size has been set the mapper is not ready and all
/// conversions return [`NotReadyError`].
///
/// ```rust
/// use kurbo::{Point, Size, Vec2};
/// use campus_view::{Pose, PoseLimits, SpaceMapper};
///
/// let mut mapper = SpaceMapper::new(Size::new(1000.0, 700.0));
/// let limits = PoseLimits::new(3.0, 30.0, 0.0, 0.0);
/// let pose = Pose::new(Vec2::new(100.0, 190.0), 3.0, 0.0, limits);
/// assert!(mapper.screen_to_map(&pose, Point::ZERO).is_err());
///
/// mapper.set_view_size(Size::new(500.0, 350.0));
/// assert_eq!(mapper.display_scale(), 0.5);
///
/// let map_pt = Point::new(420.0, 310.0);
/// let screen = mapper.map_to_screen(&pose, map_pt).unwrap();
/// let back = mapper.screen_to_map(&pose, screen).unwrap();
/// assert!((back - map_pt).hypot() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct SpaceMapper {
    native_size: Size,
    view_size: Option<Size>,
    display_scale: f64,
    display_size: Size,
}

impl SpaceMapper {
    /// Creates a mapper for a drawing of `native_size`, with no view size yet.
    #[must_use]
    pub fn new(native_size: Size) -> Self {
        Self {
            native_size,
            view_size: None,
            display_scale: 0.0,
            display_size: Size::ZERO,
        }
    }

    /// Returns the native size of the drawing in map units.
    #[must_use]
    pub fn native_size(&self) -> Size {
        self.native_size
    }

    /// Returns the last view size that was set, if any.
    #[must_use]
    pub fn view_size(&self) -> Option<Size> {
        self.view_size
    }

    /// Returns the ratio of view width to native drawing width, or `0.0` when not ready.
    #[must_use]
    pub fn display_scale(&self) -> f64 {
        self.display_scale
    }

    /// Returns the drawing size at display scale, or zero when not ready.
    #[must_use]
    pub fn display_size(&self) -> Size {
        self.display_size
    }

    /// Returns `true` once a view size producing a positive, finite display scale is known.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.display_scale > 0.0
    }

    /// Records a new view size (first layout, rotation, window resize).
    ///
    /// The display scale and size are recomputed immediately, so the next
    /// conversion already uses them. A size that yields no usable display
    /// scale (zero width, non-finite values) puts the mapper back into the
    /// not-ready state.
    pub fn set_view_size(&mut self, size: Size) {
        if self.view_size == Some(size) {
            return;
        }
        self.view_size = Some(size);
        self.recompute();
        if self.is_ready() {
            tracing::trace!(
                width = size.width,
                height = size.height,
                display_scale = self.display_scale,
                "view resized"
            );
        } else {
            tracing::warn!(
                width = size.width,
                height = size.height,
                "view size gives no usable display scale, mapping disabled"
            );
        }
    }

    /// Converts a screen-space point into map space.
    pub fn screen_to_map(&self, pose: &Pose, screen: Point) -> Result<Point, NotReadyError> {
        let scale = self.ready_scale()?;
        let centered = pose.apply_inverse(screen).to_vec2();
        Ok(((centered + self.half_display()) / scale).to_point())
    }

    /// Converts a map-space point into screen space.
    pub fn map_to_screen(&self, pose: &Pose, map: Point) -> Result<Point, NotReadyError> {
        let scale = self.ready_scale()?;
        let centered = map.to_vec2() * scale - self.half_display();
        Ok(pose.apply(centered.to_point()))
    }

    /// Converts a map-space rectangle into the screen-space bounding box of its corners.
    pub fn map_to_screen_rect(&self, pose: &Pose, rect: Rect) -> Result<Rect, NotReadyError> {
        self.ready_scale()?;
        bounding_box(rect, |p| self.map_to_screen(pose, p))
    }

    /// Converts a screen-space rectangle into the map-space bounding box of its corners.
    pub fn screen_to_map_rect(&self, pose: &Pose, rect: Rect) -> Result<Rect, NotReadyError> {
        self.ready_scale()?;
        bounding_box(rect, |p| self.screen_to_map(pose, p))
    }

    /// Returns the map-space region currently covered by the view.
    ///
    /// With a rotated pose this is the axis-aligned bounding box of the
    /// rotated view, so it may include some map area that is not on screen.
    pub fn visible_map_rect(&self, pose: &Pose) -> Result<Rect, NotReadyError> {
        let view = self.view_size.ok_or(NotReadyError)?;
        self.screen_to_map_rect(pose, Rect::from_origin_size(Point::ZERO, view))
    }

    /// Snapshot of the current mapper state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> SpaceMapperDebugInfo {
        SpaceMapperDebugInfo {
            native_size: self.native_size,
            view_size: self.view_size,
            display_scale: self.display_scale,
            display_size: self.display_size,
            ready: self.is_ready(),
        }
    }

    fn ready_scale(&self) -> Result<f64, NotReadyError> {
        if self.is_ready() {
            Ok(self.display_scale)
        } else {
            Err(NotReadyError)
        }
    }

    fn half_display(&self) -> Vec2 {
        self.display_size.to_vec2() / 2.0
    }

    fn recompute(&mut self) {
        let scale = match self.view_size {
            Some(view) if view.is_finite() => view.width / self.native_size.width,
            _ => 0.0,
        };
        if scale.is_finite() && scale > 0.0 && self.native_size.height.is_finite() {
            self.display_scale = scale;
            self.display_size = self.native_size * scale;
        } else {
            self.display_scale = 0.0;
            self.display_size = Size::ZERO;
        }
    }
}

fn bounding_box(
    rect: Rect,
    mut map: impl FnMut(Point) -> Result<Point, NotReadyError>,
) -> Result<Rect, NotReadyError> {
    let q0 = map(Point::new(rect.x0, rect.y0))?;
    let q1 = map(Point::new(rect.x1, rect.y0))?;
    let q2 = map(Point::new(rect.x0, rect.y1))?;
    let q3 = map(Point::new(rect.x1, rect.y1))?;
    let min_x = q0.x.min(q1.x).min(q2.x).min(q3.x);
    let min_y = q0.y.min(q1.y).min(q2.y).min(q3.y);
    let max_x = q0.x.max(q1.x).max(q2.x).max(q3.x);
    let max_y = q0.y.max(q1.y).max(q2.y).max(q3.y);
    Ok(Rect::new(min_x, min_y, max_x, max_y))
}

/// Debug snapshot of a [`SpaceMapper`] state.
#[derive(Clone, Copy, Debug)]
pub struct SpaceMapperDebugInfo {
    /// Native drawing size in map units.
    pub native_size: Size,
    /// Last view size set, if any.
    pub view_size: Option<Size>,
    /// Current display scale (`0.0` when not ready).
    pub display_scale: f64,
    /// Drawing size at display scale.
    pub display_size: Size,
    /// Whether conversions are currently available.
    pub ready: bool,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};

    use super::{NotReadyError, SpaceMapper};
    use crate::pose::{Pose, PoseLimits};

    fn campus_pose() -> Pose {
        Pose::new(
            Vec2::new(100.0, 190.0),
            3.0,
            0.0,
            PoseLimits::new(3.0, 30.0, 0.0, 0.0),
        )
    }

    #[test]
    fn conversions_before_first_measurement_are_rejected() {
        let mapper = SpaceMapper::new(Size::new(1000.0, 700.0));
        let pose = campus_pose();
        assert!(!mapper.is_ready());
        assert_eq!(mapper.screen_to_map(&pose, Point::ZERO), Err(NotReadyError));
        assert_eq!(mapper.map_to_screen(&pose, Point::ZERO), Err(NotReadyError));
        assert_eq!(mapper.visible_map_rect(&pose), Err(NotReadyError));
    }

    #[test]
    fn resize_recomputes_display_metrics() {
        let mut mapper = SpaceMapper::new(Size::new(1000.0, 700.0));
        mapper.set_view_size(Size::new(500.0, 900.0));
        assert_eq!(mapper.display_scale(), 0.5);
        assert_eq!(mapper.display_size(), Size::new(500.0, 350.0));

        mapper.set_view_size(Size::new(2000.0, 900.0));
        assert_eq!(mapper.display_scale(), 2.0);
        assert_eq!(mapper.display_size(), Size::new(2000.0, 1400.0));
    }

    #[test]
    fn zero_width_view_is_not_ready() {
        let mut mapper = SpaceMapper::new(Size::new(1000.0, 700.0));
        mapper.set_view_size(Size::new(1000.0, 700.0));
        assert!(mapper.is_ready());
        mapper.set_view_size(Size::new(0.0, 700.0));
        assert!(!mapper.is_ready());
        assert_eq!(mapper.display_size(), Size::ZERO);

        let mut degenerate = SpaceMapper::new(Size::ZERO);
        degenerate.set_view_size(Size::new(800.0, 600.0));
        assert!(!degenerate.is_ready());
    }

    #[test]
    fn non_finite_view_height_is_not_ready() {
        let pose = Pose::default();
        let mut mapper = SpaceMapper::new(Size::new(1000.0, 700.0));
        mapper.set_view_size(Size::new(1000.0, f64::NAN));
        assert!(!mapper.is_ready());
        assert_eq!(mapper.visible_map_rect(&pose), Err(NotReadyError));

        mapper.set_view_size(Size::new(1000.0, f64::INFINITY));
        assert!(!mapper.is_ready());

        mapper.set_view_size(Size::new(1000.0, 700.0));
        assert!(mapper.is_ready());
    }

    #[test]
    fn known_mapping_matches_formula() {
        let mut mapper = SpaceMapper::new(Size::new(1000.0, 700.0));
        mapper.set_view_size(Size::new(1000.0, 700.0));
        let pose = campus_pose();

        // Drawing center lands on the pose translation.
        let center = mapper.map_to_screen(&pose, Point::new(500.0, 350.0)).unwrap();
        assert!((center - Point::new(100.0, 190.0)).hypot() < 1e-9);

        // One map unit is display_scale * pose scale screen pixels.
        let right = mapper.map_to_screen(&pose, Point::new(510.0, 350.0)).unwrap();
        assert!((right.x - center.x - 30.0).abs() < 1e-9);

        let back = mapper.screen_to_map(&pose, Point::new(130.0, 220.0)).unwrap();
        assert!((back - Point::new(510.0, 360.0)).hypot() < 1e-9);
    }

    #[test]
    fn mapper_reads_latest_pose() {
        let mut mapper = SpaceMapper::new(Size::new(1000.0, 700.0));
        mapper.set_view_size(Size::new(1000.0, 700.0));
        let mut pose = campus_pose();
        let screen = Point::new(300.0, 300.0);
        let before = mapper.screen_to_map(&pose, screen).unwrap();
        pose.update_translation(Vec2::new(30.0, 0.0));
        let after = mapper.screen_to_map(&pose, screen).unwrap();
        assert!((before.x - after.x - 10.0).abs() < 1e-9);
    }

    #[test]
    fn visible_rect_covers_view_corners() {
        let mut mapper = SpaceMapper::new(Size::new(1000.0, 700.0));
        mapper.set_view_size(Size::new(400.0, 300.0));
        let pose = campus_pose();
        let visible = mapper.visible_map_rect(&pose).unwrap();
        let top_left = mapper.screen_to_map(&pose, Point::ZERO).unwrap();
        let bottom_right = mapper
            .screen_to_map(&pose, Point::new(400.0, 300.0))
            .unwrap();
        assert!((visible.origin() - top_left).hypot() < 1e-9);
        assert!((Point::new(visible.x1, visible.y1) - bottom_right).hypot() < 1e-9);

        let screen = mapper.map_to_screen_rect(&pose, visible).unwrap();
        let view = Rect::new(0.0, 0.0, 400.0, 300.0);
        assert!((screen.x0 - view.x0).abs() < 1e-6 && (screen.y1 - view.y1).abs() < 1e-6);
    }

    #[test]
    fn debug_info_reports_readiness() {
        let mut mapper = SpaceMapper::new(Size::new(100.0, 50.0));
        assert!(!mapper.debug_info().ready);
        mapper.set_view_size(Size::new(200.0, 100.0));
        let info = mapper.debug_info();
        assert!(info.ready);
        assert_eq!(info.display_scale, 2.0);
        assert_eq!(info.view_size, Some(Size::new(200.0, 100.0)));
    }
}
