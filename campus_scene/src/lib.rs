// Copyright 2025 the Campus Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=campus_scene --heading-base-level=0

//! Campus Scene: the building/floor/room model of a drawing-backed map.
//!
//! A campus drawing contains, for each building, a roof layer that hides the
//! interior, one layer per floor, a hit rectangle and optional room markers.
//! This crate resolves those elements into a typed [`SceneGraph`] once, up
//! front, so that the rest of the system never deals with string ids or
//! untyped nodes:
//!
//! - [`Drawing`] is the interface to the loaded drawing: lookup by id,
//!   geometry, and the visibility flag that is the only thing ever mutated.
//! - [`BuildingSpec`] declares which buildings (and floors and rooms) to
//!   resolve; [`catalog`] documents the element id convention.
//! - [`SceneGraph::build`] resolves everything or fails with a
//!   [`SceneBuildError`]; a partially built scene is never returned.
//! - [`ShapeTree`] is an in-memory [`Drawing`] for tests and simple hosts.
//!
//! Floors refer back to their building by [`BuildingId`]; buildings own
//! their floors, floors own their rooms.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use campus_scene::{BuildingSpec, Drawing, SceneGraph, Shape, ShapeTree};
//!
//! let mut drawing = ShapeTree::new()
//!     .with("Main_HitBox", Shape::Rect(Rect::new(100.0, 100.0, 200.0, 160.0)))
//!     .with("Main_Roof", Shape::Group)
//!     .with("Main_F0", Shape::Group);
//!
//! let catalog = [BuildingSpec::new("Main", "Main Building").with_floors(1)];
//! let scene = SceneGraph::build(&mut drawing, &catalog).unwrap();
//!
//! let main = scene.hit_test(Point::new(150.0, 120.0)).unwrap();
//! let building = scene.building(main).unwrap();
//! assert_eq!(building.name(), "Main Building");
//!
//! // Resting state: roof shown, floor hidden.
//! assert!(drawing.is_visible(building.roof()));
//! assert!(!drawing.is_visible(building.floors()[0].layer()));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod catalog;
mod drawing;
mod scene;
mod shape_tree;

pub use catalog::{BuildingSpec, FloorSpec, RoomSpec};
pub use drawing::{Drawing, Shape, ShapeKind};
pub use scene::{Building, BuildingId, Floor, FloorRef, Room, SceneBuildError, SceneGraph};
pub use shape_tree::{ShapeNode, ShapeTree};
