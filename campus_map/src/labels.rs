// Copyright 2025 the Campus Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen-space label and popup placement.

use alloc::vec::Vec;

use campus_scene::{BuildingId, SceneGraph};
use campus_selection::SelectionState;
use campus_view::{Pose, SpaceMapper};
use kurbo::{Point, Rect};

use crate::config::LabelFade;

/// A building name to draw over the map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildingLabel<'a> {
    /// The labelled building.
    pub building: BuildingId,
    /// Display name.
    pub name: &'a str,
    /// Center of the building's hit region, in screen pixels.
    pub position: Point,
    /// Opacity hint in `[0, 1]`.
    pub opacity: f64,
}

/// A room name on the shown floor of the open building.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoomLabel<'a> {
    /// Display name.
    pub name: &'a str,
    /// Room marker position, in screen pixels.
    pub position: Point,
}

/// Contents of the "building / floor" popup shown while a building is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Popup<'a> {
    /// The open building.
    pub building: BuildingId,
    /// Its display name.
    pub name: &'a str,
    /// Zero-based index of the shown floor.
    pub floor_index: usize,
    /// One-based floor number for display.
    pub floor_number: usize,
    /// Number of floors the building has.
    pub floor_count: usize,
}

/// Labels for every building except the open one.
///
/// Anchors outside the visible map region are dropped. Returns an empty list
/// while the mapper is not ready.
pub(crate) fn building_labels<'a, N: Copy>(
    scene: &'a SceneGraph<N>,
    mapper: &SpaceMapper,
    pose: &Pose,
    state: SelectionState,
    fade: &LabelFade,
) -> Vec<BuildingLabel<'a>> {
    let Ok(visible) = mapper.visible_map_rect(pose) else {
        return Vec::new();
    };
    let opacity = fade.opacity(pose.scale());
    let active = state.building();
    scene
        .iter()
        .filter(|(id, _)| Some(*id) != active)
        .filter(|(_, b)| within(visible, b.label_anchor()))
        .filter_map(|(id, b)| {
            let position = mapper.map_to_screen(pose, b.label_anchor()).ok()?;
            Some(BuildingLabel {
                building: id,
                name: b.name(),
                position,
                opacity,
            })
        })
        .collect()
}

/// Labels for the rooms of the shown floor, if a building is open.
pub(crate) fn room_labels<'a, N: Copy>(
    scene: &'a SceneGraph<N>,
    mapper: &SpaceMapper,
    pose: &Pose,
    state: SelectionState,
) -> Vec<RoomLabel<'a>> {
    let Some(floor) = state.floor().and_then(|f| scene.floor(f)) else {
        return Vec::new();
    };
    let Ok(visible) = mapper.visible_map_rect(pose) else {
        return Vec::new();
    };
    floor
        .rooms()
        .iter()
        .filter(|room| within(visible, room.position()))
        .filter_map(|room| {
            let position = mapper.map_to_screen(pose, room.position()).ok()?;
            Some(RoomLabel {
                name: room.name(),
                position,
            })
        })
        .collect()
}

pub(crate) fn popup<N: Copy>(scene: &SceneGraph<N>, state: SelectionState) -> Option<Popup<'_>> {
    let SelectionState::BuildingActive { building, floor } = state else {
        return None;
    };
    let b = scene.building(building)?;
    Some(Popup {
        building,
        name: b.name(),
        floor_index: floor,
        floor_number: floor + 1,
        floor_count: b.floor_count(),
    })
}

// Inclusive on every edge, unlike `Rect::contains`.
fn within(rect: Rect, pt: Point) -> bool {
    rect.x0 <= pt.x && pt.x <= rect.x1 && rect.y0 <= pt.y && pt.y <= rect.y1
}
