// Copyright 2025 the Campus Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=campus_selection --heading-base-level=0

//! Campus Selection: the tap-driven building/floor state machine.
//!
//! A campus map shows every building with its roof on. Tapping a building
//! "opens" it: its roof is hidden and one of its floors is shown. Tapping the
//! open building again cycles through its floors; tapping another building
//! closes the first and opens the second; tapping empty ground closes
//! whatever is open. At most one building is ever open.
//!
//! [`SelectionController`] implements this on top of a
//! [`SceneGraph`](campus_scene::SceneGraph) and a
//! [`Drawing`](campus_scene::Drawing):
//!
//! - Taps arrive in screen space and are mapped through a
//!   [`SpaceMapper`](campus_view::SpaceMapper) and the current
//!   [`Pose`](campus_view::Pose), then hit-tested against the scene.
//! - The only side effects are visibility writes on roof and floor layers
//!   and the controller's own state.
//! - Each operation reports a [`Transition`] and records the
//!   [`LayerChange`]s it made, available from
//!   [`SelectionController::changes`] until the next operation.
//! - A **revision** counter is bumped only when the selection actually
//!   changes, so observers can cheaply detect "nothing happened".
//!
//! ## States
//!
//! | State | Roofs | Floors |
//! |---|---|---|
//! | [`SelectionState::Idle`] | all shown | all hidden |
//! | [`SelectionState::BuildingActive`] | all shown except the active building's | only the active building's selected floor |
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use campus_scene::{BuildingSpec, SceneGraph, Shape, ShapeTree};
//! use campus_selection::{SelectionController, SelectionState, Transition};
//! use campus_view::{Pose, SpaceMapper};
//!
//! let mut drawing = ShapeTree::new()
//!     .with("Main_HitBox", Shape::Rect(Rect::new(400.0, 300.0, 600.0, 400.0)))
//!     .with("Main_Roof", Shape::Group)
//!     .with("Main_F0", Shape::Group)
//!     .with("Main_F1", Shape::Group);
//! let catalog = [BuildingSpec::new("Main", "Main Building").with_floors(2)];
//! let scene = SceneGraph::build(&mut drawing, &catalog).unwrap();
//!
//! let pose = Pose::default();
//! let mut mapper = SpaceMapper::new(Size::new(1000.0, 700.0));
//! mapper.set_view_size(Size::new(1000.0, 700.0));
//!
//! let mut selection = SelectionController::new();
//! let tap = mapper.map_to_screen(&pose, Point::new(500.0, 350.0)).unwrap();
//!
//! // First tap opens Main on its default floor.
//! let t = selection.on_tap(&scene, &mut drawing, &mapper, &pose, tap);
//! assert!(matches!(t, Transition::Opened { floor: 0, closed: None, .. }));
//!
//! // Tapping it again cycles to the next floor.
//! let t = selection.on_tap(&scene, &mut drawing, &mapper, &pose, tap);
//! assert!(matches!(t, Transition::FloorChanged { from: 0, to: 1, .. }));
//!
//! // Tapping empty ground closes it.
//! let outside = mapper.map_to_screen(&pose, Point::new(50.0, 50.0)).unwrap();
//! selection.on_tap(&scene, &mut drawing, &mapper, &pose, outside);
//! assert_eq!(selection.state(), SelectionState::Idle);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

use campus_scene::{BuildingId, Drawing, FloorRef, SceneGraph};
use campus_view::{Pose, SpaceMapper};
use kurbo::Point;
use smallvec::SmallVec;

/// Which building, if any, is open, and which of its floors is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionState {
    /// No building is open.
    #[default]
    Idle,
    /// `building` is open with `floor` shown.
    BuildingActive {
        /// The open building.
        building: BuildingId,
        /// Index of the shown floor; always valid for `building`.
        floor: usize,
    },
}

impl SelectionState {
    /// Returns the open building, if any.
    #[must_use]
    pub fn building(&self) -> Option<BuildingId> {
        match *self {
            Self::Idle => None,
            Self::BuildingActive { building, .. } => Some(building),
        }
    }

    /// Returns the shown floor of the open building, if any.
    #[must_use]
    pub fn floor(&self) -> Option<FloorRef> {
        match *self {
            Self::Idle => None,
            Self::BuildingActive { building, floor } => Some(FloorRef {
                building,
                index: floor,
            }),
        }
    }
}

/// A single visibility write performed by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerChange {
    /// The roof of a building was shown.
    RoofShown(BuildingId),
    /// The roof of a building was hidden.
    RoofHidden(BuildingId),
    /// A floor layer was shown.
    FloorShown(FloorRef),
    /// A floor layer was hidden.
    FloorHidden(FloorRef),
}

/// Result of a selection operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The view has not been measured yet; the tap was dropped.
    NotReady,
    /// Nothing changed and no layer was touched.
    Unchanged,
    /// `building` was opened on `floor`, closing `closed` first if it was open.
    Opened {
        /// The newly opened building.
        building: BuildingId,
        /// The floor it was opened on (its default floor).
        floor: usize,
        /// The previously open building, if any.
        closed: Option<BuildingId>,
    },
    /// `building` was closed and the controller is now idle.
    Closed {
        /// The building that was open.
        building: BuildingId,
    },
    /// The open building switched floors.
    FloorChanged {
        /// The open building.
        building: BuildingId,
        /// Previously shown floor.
        from: usize,
        /// Newly shown floor.
        to: usize,
    },
}

impl Transition {
    /// Returns `true` if the selection changed.
    #[must_use]
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::NotReady | Self::Unchanged)
    }
}

/// Drives the open-building/floor state from taps.
///
/// The controller owns only its state; the scene and drawing are passed into
/// every operation. All operations run to completion synchronously.
#[derive(Clone, Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
    revision: u64,
    changes: SmallVec<[LayerChange; 4]>,
}

impl SelectionController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Returns the open building, if any.
    #[must_use]
    pub fn active_building(&self) -> Option<BuildingId> {
        self.state.building()
    }

    /// Returns the shown floor of the open building, if any.
    #[must_use]
    pub fn selected_floor(&self) -> Option<FloorRef> {
        self.state.floor()
    }

    /// Returns the revision counter.
    ///
    /// Bumped once per operation that changes the state; operations that
    /// return [`Transition::Unchanged`] or [`Transition::NotReady`] leave it
    /// alone.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Layer writes made by the most recent operation, in order.
    #[must_use]
    pub fn changes(&self) -> &[LayerChange] {
        &self.changes
    }

    /// Handles a tap at `screen` (view pixel coordinates).
    ///
    /// The tap is mapped into map space with the given mapper and pose. If
    /// the mapper is not ready yet the tap is dropped and
    /// [`Transition::NotReady`] is returned.
    pub fn on_tap<D: Drawing>(
        &mut self,
        scene: &SceneGraph<D::Node>,
        drawing: &mut D,
        mapper: &SpaceMapper,
        pose: &Pose,
        screen: Point,
    ) -> Transition {
        match mapper.screen_to_map(pose, screen) {
            Ok(map_pt) => self.on_map_tap(scene, drawing, map_pt),
            Err(_) => {
                self.changes.clear();
                tracing::trace!(x = screen.x, y = screen.y, "tap dropped, view not measured");
                Transition::NotReady
            }
        }
    }

    /// Handles a tap already converted into map space.
    ///
    /// - A tap on a building other than the open one (or on empty ground)
    ///   behaves like [`SelectionController::select_building`].
    /// - A tap on the open building advances to its next floor, wrapping
    ///   around; single-floor buildings are left as they are.
    /// - A tap on empty ground while idle does nothing.
    pub fn on_map_tap<D: Drawing>(
        &mut self,
        scene: &SceneGraph<D::Node>,
        drawing: &mut D,
        map_pt: Point,
    ) -> Transition {
        let tapped = scene.hit_test(map_pt);
        if tapped != self.state.building() {
            return self.select_building(scene, drawing, tapped);
        }

        self.changes.clear();
        let SelectionState::BuildingActive { building, floor } = self.state else {
            return Transition::Unchanged;
        };
        let count = scene.building(building).map_or(0, |b| b.floor_count());
        if count > 1 {
            self.switch_floor(scene, drawing, building, floor, (floor + 1) % count)
        } else {
            Transition::Unchanged
        }
    }

    /// Opens `target` on its default floor, or closes the open building when
    /// `target` is `None`.
    ///
    /// The previously open building is restored first: its roof is shown and
    /// its *currently selected* floor is hidden. Selecting the building that
    /// is already open, or an id that does not belong to `scene`, is treated
    /// as no change.
    pub fn select_building<D: Drawing>(
        &mut self,
        scene: &SceneGraph<D::Node>,
        drawing: &mut D,
        target: Option<BuildingId>,
    ) -> Transition {
        self.changes.clear();
        let target = match target {
            Some(id) => match scene.building(id) {
                Some(b) => Some((id, b)),
                None => return Transition::Unchanged,
            },
            None => None,
        };
        let previous = self.state;
        if target.map(|(id, _)| id) == previous.building() {
            return Transition::Unchanged;
        }

        let mut layers = Layers {
            scene,
            drawing,
            changes: &mut self.changes,
        };
        if let Some(floor) = previous.floor() {
            layers.set_roof(floor.building, true);
            layers.set_floor(floor, false);
        }

        let transition = match (target, previous.building()) {
            (Some((building, b)), closed) => {
                let floor = b.default_floor();
                layers.set_roof(building, false);
                layers.set_floor(
                    FloorRef {
                        building,
                        index: floor,
                    },
                    true,
                );
                self.state = SelectionState::BuildingActive { building, floor };
                tracing::debug!(building = b.name(), floor, "building opened");
                Transition::Opened {
                    building,
                    floor,
                    closed,
                }
            }
            (None, Some(building)) => {
                self.state = SelectionState::Idle;
                tracing::debug!(building = building.index(), "building closed");
                Transition::Closed { building }
            }
            (None, None) => return Transition::Unchanged,
        };
        self.revision += 1;
        transition
    }

    /// Closes the open building, if any.
    pub fn close<D: Drawing>(
        &mut self,
        scene: &SceneGraph<D::Node>,
        drawing: &mut D,
    ) -> Transition {
        self.select_building(scene, drawing, None)
    }

    /// Shows floor `index` of the open building.
    ///
    /// Does nothing when idle, when `index` is already shown, or when it is
    /// out of range.
    pub fn select_floor<D: Drawing>(
        &mut self,
        scene: &SceneGraph<D::Node>,
        drawing: &mut D,
        index: usize,
    ) -> Transition {
        self.changes.clear();
        let SelectionState::BuildingActive { building, floor } = self.state else {
            return Transition::Unchanged;
        };
        let count = scene.building(building).map_or(0, |b| b.floor_count());
        if index == floor || index >= count {
            return Transition::Unchanged;
        }
        self.switch_floor(scene, drawing, building, floor, index)
    }

    fn switch_floor<D: Drawing>(
        &mut self,
        scene: &SceneGraph<D::Node>,
        drawing: &mut D,
        building: BuildingId,
        from: usize,
        to: usize,
    ) -> Transition {
        let mut layers = Layers {
            scene,
            drawing,
            changes: &mut self.changes,
        };
        layers.set_floor(FloorRef { building, index: from }, false);
        layers.set_floor(FloorRef { building, index: to }, true);
        self.state = SelectionState::BuildingActive { building, floor: to };
        self.revision += 1;
        tracing::debug!(building = building.index(), from, to, "floor changed");
        Transition::FloorChanged { building, from, to }
    }
}

/// Visibility writer that records what it touched.
struct Layers<'a, D: Drawing> {
    scene: &'a SceneGraph<D::Node>,
    drawing: &'a mut D,
    changes: &'a mut SmallVec<[LayerChange; 4]>,
}

impl<D: Drawing> Layers<'_, D> {
    fn set_roof(&mut self, building: BuildingId, visible: bool) {
        let Some(b) = self.scene.building(building) else {
            return;
        };
        self.drawing.set_visible(b.roof(), visible);
        self.changes.push(if visible {
            LayerChange::RoofShown(building)
        } else {
            LayerChange::RoofHidden(building)
        });
    }

    fn set_floor(&mut self, floor: FloorRef, visible: bool) {
        let Some(f) = self.scene.floor(floor) else {
            return;
        };
        self.drawing.set_visible(f.layer(), visible);
        self.changes.push(if visible {
            LayerChange::FloorShown(floor)
        } else {
            LayerChange::FloorHidden(floor)
        });
    }
}
