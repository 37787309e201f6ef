// Copyright 2025 the Campus Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=campus_map --heading-base-level=0

//! Campus Map: the headless core of an interactive campus map.
//!
//! [`MapContext`] is the single object a host application keeps per map. It
//! owns the loaded [`Drawing`](campus_scene::Drawing), the resolved
//! [`SceneGraph`](campus_scene::SceneGraph), the live
//! [`Pose`](campus_view::Pose), the screen/map
//! [`SpaceMapper`](campus_view::SpaceMapper) and the
//! [`SelectionController`](campus_selection::SelectionController), and
//! exposes:
//!
//! - inputs from the gesture and layout layers:
//!   [`MapContext::on_transform_delta`], [`MapContext::on_tap`] and
//!   [`MapContext::on_view_resize`];
//! - programmatic selection for the popup: [`MapContext::select_floor`] and
//!   [`MapContext::close`];
//! - outputs for the renderer: [`MapContext::affine`], the drawing's layer
//!   visibility, [`MapContext::building_labels`],
//!   [`MapContext::room_labels`] and [`MapContext::popup`].
//!
//! [`MapConfig`] carries the drawing size, starting pose, pose limits and
//! label fade; its `Default` describes the Tandem campus drawing, whose
//! building catalog is [`presets::tandem_campus`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use campus_map::{MapConfig, MapContext, presets};
//! use campus_scene::{Shape, ShapeTree, catalog};
//! use campus_selection::Transition;
//!
//! // An in-memory stand-in for the parsed campus drawing.
//! let mut drawing = ShapeTree::new();
//! for (i, spec) in presets::tandem_campus().iter().enumerate() {
//!     let x = 100.0 * i as f64;
//!     let hit_box = Shape::Rect(Rect::new(x, 0.0, x + 80.0, 60.0));
//!     drawing.insert(catalog::hit_box_id(&spec.id), hit_box);
//!     drawing.insert(catalog::roof_id(&spec.id), Shape::Group);
//!     for level in 0..spec.floors.len() {
//!         drawing.insert(catalog::floor_id(&spec.id, level), Shape::Group);
//!     }
//! }
//!
//! let buildings = presets::tandem_campus();
//! let mut map = MapContext::new(drawing, &buildings, &MapConfig::default()).unwrap();
//! map.on_view_resize(Size::new(1000.0, 700.0));
//!
//! let tap = map.mapper().map_to_screen(map.pose(), Point::new(40.0, 30.0)).unwrap();
//! assert!(matches!(map.on_tap(tap), Transition::Opened { .. }));
//! assert_eq!(map.popup().unwrap().name, "Main Building");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod context;
mod labels;
pub mod presets;

pub use config::{InitialPose, LabelFade, MapConfig};
pub use context::{MapContext, MapContextDebugInfo};
pub use labels::{BuildingLabel, Popup, RoomLabel};
