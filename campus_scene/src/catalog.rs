// Copyright 2025 the Campus Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative description of the buildings to resolve from a drawing, and
//! the element id convention used to find them.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// Id of the hit rectangle of building `building`: `"{building}_HitBox"`.
#[must_use]
pub fn hit_box_id(building: &str) -> String {
    format!("{building}_HitBox")
}

/// Id of the roof layer of building `building`: `"{building}_Roof"`.
#[must_use]
pub fn roof_id(building: &str) -> String {
    format!("{building}_Roof")
}

/// Id of the floor layer at `level`: `"{building}_F{level}"`.
#[must_use]
pub fn floor_id(building: &str, level: usize) -> String {
    format!("{building}_F{level}")
}

/// Id of the marker of room `room` on `level`: `"{building}_F{level}_{room}"`.
#[must_use]
pub fn room_id(building: &str, level: usize, room: &str) -> String {
    format!("{building}_F{level}_{room}")
}

/// A room to resolve on a floor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomSpec {
    /// Short id used to build the marker element id.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A floor to resolve. Its level is its position in [`BuildingSpec::floors`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorSpec {
    /// Rooms on this floor, in label order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rooms: Vec<RoomSpec>,
}

impl FloorSpec {
    /// A floor without rooms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a room.
    #[must_use]
    pub fn with_room(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.rooms.push(RoomSpec {
            id: id.into(),
            name: name.into(),
        });
        self
    }
}

/// A building to resolve from the drawing.
///
/// ```rust
/// use campus_scene::{BuildingSpec, FloorSpec};
///
/// let main = BuildingSpec::new("Main", "Main Building")
///     .with_floor(FloorSpec::new().with_room("101", "Office"))
///     .with_floor(FloorSpec::new())
///     .with_default_floor(0);
/// assert_eq!(main.floors.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildingSpec {
    /// Short id used to build element ids.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Floors, ground floor first.
    pub floors: Vec<FloorSpec>,
    /// Floor shown when the building is opened.
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_floor: usize,
}

impl BuildingSpec {
    /// A building without floors; add at least one before building a scene.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            floors: Vec::new(),
            default_floor: 0,
        }
    }

    /// Adds a floor above the existing ones.
    #[must_use]
    pub fn with_floor(mut self, floor: FloorSpec) -> Self {
        self.floors.push(floor);
        self
    }

    /// Adds `count` floors without rooms.
    #[must_use]
    pub fn with_floors(mut self, count: usize) -> Self {
        self.floors.extend((0..count).map(|_| FloorSpec::new()));
        self
    }

    /// Sets the floor shown when the building is opened.
    #[must_use]
    pub fn with_default_floor(mut self, index: usize) -> Self {
        self.default_floor = index;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_ids_follow_convention() {
        assert_eq!(hit_box_id("Main"), "Main_HitBox");
        assert_eq!(roof_id("Main"), "Main_Roof");
        assert_eq!(floor_id("Main", 1), "Main_F1");
        assert_eq!(room_id("Main", 0, "101"), "Main_F0_101");
    }

    #[test]
    fn builder_accumulates_floors() {
        let spec = BuildingSpec::new("Gym", "Field House/Gym")
            .with_floors(2)
            .with_floor(FloorSpec::new().with_room("A", "Court A"))
            .with_default_floor(2);
        assert_eq!(spec.floors.len(), 3);
        assert_eq!(spec.floors[2].rooms[0].name, "Court A");
        assert_eq!(spec.default_floor, 2);
    }
}
