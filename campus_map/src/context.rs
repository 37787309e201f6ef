// Copyright 2025 the Campus Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use campus_scene::{BuildingId, BuildingSpec, Drawing, SceneBuildError, SceneGraph};
use campus_selection::{SelectionController, SelectionState, Transition};
use campus_view::{Pose, PoseDebugInfo, SpaceMapper, SpaceMapperDebugInfo, TransformDelta};
use kurbo::{Affine, Point, Size};

use crate::config::{LabelFade, MapConfig};
use crate::labels::{self, BuildingLabel, Popup, RoomLabel};

/// The complete mutable state of one interactive map.
///
/// Owns the drawing, the resolved scene, the live pose, the screen/map mapper
/// and the selection controller. Every entry point takes `&mut self`, so input
/// events are applied strictly one after another.
#[derive(Clone, Debug)]
pub struct MapContext<D: Drawing> {
    drawing: D,
    scene: SceneGraph<D::Node>,
    pose: Pose,
    mapper: SpaceMapper,
    selection: SelectionController,
    label_fade: LabelFade,
}

impl<D: Drawing> MapContext<D> {
    /// Resolves `catalog` against `drawing` and sets up the starting pose.
    ///
    /// On success the drawing is in its resting state (all roofs shown, all
    /// floors and hit boxes hidden) and nothing is selected. The view size is
    /// unknown until [`MapContext::on_view_resize`] is called; until then taps
    /// are dropped and label lists are empty.
    pub fn new(
        mut drawing: D,
        catalog: &[BuildingSpec],
        config: &MapConfig,
    ) -> Result<Self, SceneBuildError> {
        let scene = SceneGraph::build(&mut drawing, catalog)?;
        Ok(Self {
            drawing,
            scene,
            pose: config.pose(),
            mapper: SpaceMapper::new(config.native_size),
            selection: SelectionController::new(),
            label_fade: config.label_fade,
        })
    }

    /// Applies a decoded pan/zoom/rotate gesture delta.
    ///
    /// Scale and rotation are clamped to the configured limits.
    pub fn on_transform_delta(&mut self, delta: TransformDelta) {
        self.pose.apply_delta(delta);
        let t = self.pose.translation();
        tracing::trace!(x = t.x, y = t.y, scale = self.pose.scale(), "pose updated");
    }

    /// Handles a tap at `screen` (view pixel coordinates).
    pub fn on_tap(&mut self, screen: Point) -> Transition {
        self.selection.on_tap(
            &self.scene,
            &mut self.drawing,
            &self.mapper,
            &self.pose,
            screen,
        )
    }

    /// Records a new view size; call on every layout change.
    pub fn on_view_resize(&mut self, size: Size) {
        self.mapper.set_view_size(size);
    }

    /// Opens `building`, or closes the open building when `None`.
    pub fn select_building(&mut self, building: Option<BuildingId>) -> Transition {
        self.selection
            .select_building(&self.scene, &mut self.drawing, building)
    }

    /// Shows floor `index` of the open building.
    pub fn select_floor(&mut self, index: usize) -> Transition {
        self.selection
            .select_floor(&self.scene, &mut self.drawing, index)
    }

    /// Closes the open building, if any.
    pub fn close(&mut self) -> Transition {
        self.selection.close(&self.scene, &mut self.drawing)
    }

    /// Returns the drawing, with its current layer visibility.
    #[must_use]
    pub fn drawing(&self) -> &D {
        &self.drawing
    }

    /// Consumes the context and returns the drawing.
    #[must_use]
    pub fn into_drawing(self) -> D {
        self.drawing
    }

    /// Returns the resolved scene.
    #[must_use]
    pub fn scene(&self) -> &SceneGraph<D::Node> {
        &self.scene
    }

    /// Returns the live pose.
    #[must_use]
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Returns the pose as an affine, for renderers.
    #[must_use]
    pub fn affine(&self) -> Affine {
        self.pose.affine()
    }

    /// Returns the screen/map mapper.
    #[must_use]
    pub fn mapper(&self) -> &SpaceMapper {
        &self.mapper
    }

    /// Returns the selection controller.
    #[must_use]
    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// Returns the selection state.
    #[must_use]
    pub fn state(&self) -> SelectionState {
        self.selection.state()
    }

    /// Returns the opacity hint for building labels at the current scale.
    #[must_use]
    pub fn label_opacity(&self) -> f64 {
        self.label_fade.opacity(self.pose.scale())
    }

    /// Replaces the label fade policy.
    pub fn set_label_fade(&mut self, fade: LabelFade) {
        self.label_fade = fade;
    }

    /// Labels for every visible building except the open one.
    #[must_use]
    pub fn building_labels(&self) -> Vec<BuildingLabel<'_>> {
        labels::building_labels(
            &self.scene,
            &self.mapper,
            &self.pose,
            self.selection.state(),
            &self.label_fade,
        )
    }

    /// Labels for the visible rooms of the shown floor.
    #[must_use]
    pub fn room_labels(&self) -> Vec<RoomLabel<'_>> {
        labels::room_labels(
            &self.scene,
            &self.mapper,
            &self.pose,
            self.selection.state(),
        )
    }

    /// Popup contents, if a building is open.
    #[must_use]
    pub fn popup(&self) -> Option<Popup<'_>> {
        labels::popup(&self.scene, self.selection.state())
    }

    /// Snapshot of the context state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> MapContextDebugInfo {
        MapContextDebugInfo {
            pose: self.pose.debug_info(),
            mapper: self.mapper.debug_info(),
            state: self.selection.state(),
            revision: self.selection.revision(),
            buildings: self.scene.len(),
        }
    }
}

/// Debug snapshot of a [`MapContext`].
#[derive(Clone, Copy, Debug)]
pub struct MapContextDebugInfo {
    /// Pose snapshot.
    pub pose: PoseDebugInfo,
    /// Mapper snapshot.
    pub mapper: SpaceMapperDebugInfo,
    /// Selection state.
    pub state: SelectionState,
    /// Selection revision counter.
    pub revision: u64,
    /// Number of buildings in the scene.
    pub buildings: usize,
}
