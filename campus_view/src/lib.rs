// Copyright 2025 the Campus Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=campus_view --heading-base-level=0

//! Campus View: the coordinate pipeline of a drawing-backed map.
//!
//! This crate reconciles three things:
//! - **Screen space**: pixel coordinates of the rendered view.
//! - **Map space**: the fixed logical coordinates of the source drawing.
//! - A live pan/zoom/rotation transform, [`Pose`], driven by gestures.
//!
//! [`SpaceMapper`] combines the pose with a display scale derived from the
//! view size and the native drawing size, and converts points and
//! rectangles in both directions. Conversions are exact inverses of each
//! other up to floating-point rounding.
//!
//! It does **not** own a scene, hit-test anything, or draw. Callers are
//! expected to:
//! - Feed decoded gesture deltas into [`Pose::apply_delta`].
//! - Report layout changes through [`SpaceMapper::set_view_size`].
//! - Use [`SpaceMapper::screen_to_map`] for hit testing and
//!   [`SpaceMapper::map_to_screen`] to place overlays.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use campus_view::{Pose, PoseLimits, SpaceMapper, TransformDelta};
//!
//! let limits = PoseLimits::new(3.0, 30.0, 0.0, 0.0);
//! let mut pose = Pose::new(Vec2::new(100.0, 190.0), 3.0, 0.0, limits);
//! let mut mapper = SpaceMapper::new(Size::new(1000.0, 700.0));
//!
//! // First layout pass.
//! mapper.set_view_size(Size::new(1000.0, 700.0));
//!
//! // A pinch and a drag arrive from the gesture layer.
//! pose.apply_delta(TransformDelta::zoom(1.5));
//! pose.apply_delta(TransformDelta::pan(Vec2::new(-20.0, 8.0)));
//!
//! // Where on the drawing did the user tap?
//! let tap = Point::new(160.0, 240.0);
//! let on_map = mapper.screen_to_map(&pose, tap).unwrap();
//! assert!((mapper.map_to_screen(&pose, on_map).unwrap() - tap).hypot() < 1e-9);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod mapper;
mod pose;

pub use mapper::{NotReadyError, SpaceMapper, SpaceMapperDebugInfo};
pub use pose::{Pose, PoseDebugInfo, PoseLimits, TransformDelta};
