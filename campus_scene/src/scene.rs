// Copyright 2025 the Campus Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved scene: buildings, floors and rooms with typed drawing handles.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::catalog::{BuildingSpec, floor_id, hit_box_id, roof_id, room_id};
use crate::drawing::{Drawing, Shape, ShapeKind};

/// Errors produced while resolving a scene from a drawing.
///
/// Construction is all-or-nothing: when any of these is returned, no scene
/// exists and the drawing's visibility has not been touched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SceneBuildError {
    /// An element required by the id convention is absent.
    #[error("drawing has no element `{id}`")]
    MissingElement {
        /// The id that was looked up.
        id: String,
    },
    /// An element exists but has the wrong kind.
    #[error("element `{id}` is a {found}, expected {expected}")]
    WrongShape {
        /// The offending element id.
        id: String,
        /// What the element should have been.
        expected: &'static str,
        /// What it actually is.
        found: ShapeKind,
    },
    /// A building was declared without floors.
    #[error("building `{building}` has no floors")]
    NoFloors {
        /// Building id.
        building: String,
    },
    /// A building's default floor does not exist.
    #[error(
        "building `{building}` opens on floor {default_floor} but only has {floor_count} floors"
    )]
    DefaultFloorOutOfRange {
        /// Building id.
        building: String,
        /// Requested default floor.
        default_floor: usize,
        /// Number of floors declared.
        floor_count: usize,
    },
    /// Two buildings share an id.
    #[error("building id `{id}` is declared more than once")]
    DuplicateBuilding {
        /// The repeated id.
        id: String,
    },
}

/// Index of a building within its [`SceneGraph`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct BuildingId(usize);

impl BuildingId {
    /// Returns the position of the building in scene order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Address of a floor: its building and its index (level) within that building.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FloorRef {
    /// Owning building.
    pub building: BuildingId,
    /// Floor index, `0` being the ground floor.
    pub index: usize,
}

/// A named point of interest on a floor.
#[derive(Clone, Debug, PartialEq)]
pub struct Room {
    name: String,
    position: Point,
}

impl Room {
    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Label anchor in map space.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }
}

/// One floor of a building, drawn as its own layer.
#[derive(Clone, Debug)]
pub struct Floor<N> {
    level: usize,
    layer: N,
    rooms: Vec<Room>,
    building: BuildingId,
}

impl<N: Copy> Floor<N> {
    /// Floor index within its building, `0` being the ground floor.
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Drawing handle of the floor layer.
    #[must_use]
    pub fn layer(&self) -> N {
        self.layer
    }

    /// Rooms in label order.
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// The building this floor belongs to.
    #[must_use]
    pub fn building(&self) -> BuildingId {
        self.building
    }
}

/// A building: a roof layer covering one or more floor layers, plus a hit region.
#[derive(Clone, Debug)]
pub struct Building<N> {
    id: String,
    name: String,
    hit_region: Rect,
    hit_layer: N,
    roof: N,
    floors: SmallVec<[Floor<N>; 4]>,
    default_floor: usize,
}

impl<N: Copy> Building<N> {
    /// Short id from the catalog.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Axis-aligned hit region in map space.
    #[must_use]
    pub fn hit_region(&self) -> Rect {
        self.hit_region
    }

    /// Midpoint of the hit region, used as the label anchor.
    #[must_use]
    pub fn label_anchor(&self) -> Point {
        self.hit_region.center()
    }

    /// Drawing handle of the hit rectangle element.
    #[must_use]
    pub fn hit_layer(&self) -> N {
        self.hit_layer
    }

    /// Drawing handle of the roof layer.
    #[must_use]
    pub fn roof(&self) -> N {
        self.roof
    }

    /// Floors, ground floor first. Never empty.
    #[must_use]
    pub fn floors(&self) -> &[Floor<N>] {
        &self.floors
    }

    /// Returns the floor at `index`.
    #[must_use]
    pub fn floor(&self, index: usize) -> Option<&Floor<N>> {
        self.floors.get(index)
    }

    /// Number of floors. At least one.
    #[must_use]
    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    /// Floor shown when the building is opened. Always a valid index.
    #[must_use]
    pub fn default_floor(&self) -> usize {
        self.default_floor
    }

    /// Returns `true` if `pt` (in map space) lies in the hit region.
    ///
    /// Uses [`Rect::contains`]: the minimum edges are inside, the maximum
    /// edges are outside.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        self.hit_region.contains(pt)
    }
}

/// The ordered set of buildings resolved from a drawing.
///
/// Apart from layer visibility, which lives in the [`Drawing`], the scene is
/// immutable once built.
#[derive(Clone, Debug)]
pub struct SceneGraph<N> {
    buildings: Vec<Building<N>>,
    by_id: HashMap<String, BuildingId>,
}

impl<N: Copy + Eq + core::fmt::Debug> SceneGraph<N> {
    /// Resolves `catalog` against `drawing` and applies the resting visibility.
    ///
    /// For each building, the hit rectangle, the roof and every floor layer are
    /// looked up by the id convention in [`crate::catalog`]; room markers must
    /// be rectangles or circles and their center becomes the room position.
    ///
    /// Everything is validated before any visibility is written. On success
    /// roofs are shown while floors and hit rectangles are hidden.
    pub fn build<D>(drawing: &mut D, catalog: &[BuildingSpec]) -> Result<Self, SceneBuildError>
    where
        D: Drawing<Node = N>,
    {
        let mut buildings = Vec::with_capacity(catalog.len());
        let mut by_id = HashMap::with_capacity(catalog.len());

        for spec in catalog {
            let id = BuildingId(buildings.len());
            if by_id.insert(spec.id.clone(), id).is_some() {
                return Err(SceneBuildError::DuplicateBuilding {
                    id: spec.id.clone(),
                });
            }
            buildings.push(resolve_building(&*drawing, spec, id)?);
        }

        let scene = Self { buildings, by_id };
        scene.reset_layers(drawing);
        tracing::debug!(buildings = scene.buildings.len(), "scene resolved");
        Ok(scene)
    }

    /// Puts every layer back into the resting state: roofs shown, floors and
    /// hit rectangles hidden.
    pub fn reset_layers<D>(&self, drawing: &mut D)
    where
        D: Drawing<Node = N>,
    {
        for building in &self.buildings {
            drawing.set_visible(building.roof, true);
            drawing.set_visible(building.hit_layer, false);
            for floor in &building.floors {
                drawing.set_visible(floor.layer, false);
            }
        }
    }
}

impl<N: Copy> SceneGraph<N> {
    /// Number of buildings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    /// Returns `true` if the scene has no buildings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// Buildings in scene order.
    #[must_use]
    pub fn buildings(&self) -> &[Building<N>] {
        &self.buildings
    }

    /// Iterates over buildings together with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (BuildingId, &Building<N>)> + '_ {
        self.buildings
            .iter()
            .enumerate()
            .map(|(idx, b)| (BuildingId(idx), b))
    }

    /// Returns the building for `id`, if it belongs to this scene.
    #[must_use]
    pub fn building(&self, id: BuildingId) -> Option<&Building<N>> {
        self.buildings.get(id.0)
    }

    /// Looks a building up by its catalog id.
    #[must_use]
    pub fn building_by_id(&self, id: &str) -> Option<BuildingId> {
        self.by_id.get(id).copied()
    }

    /// Returns the floor at `floor`, if both the building and the index exist.
    #[must_use]
    pub fn floor(&self, floor: FloorRef) -> Option<&Floor<N>> {
        self.building(floor.building)?.floor(floor.index)
    }

    /// Returns the first building, in scene order, whose hit region contains `pt`.
    ///
    /// `pt` is in map space. This is a linear scan; campus scenes hold tens of
    /// buildings at most.
    #[must_use]
    pub fn hit_test(&self, pt: Point) -> Option<BuildingId> {
        self.buildings
            .iter()
            .position(|b| b.contains(pt))
            .map(BuildingId)
    }
}

fn lookup<D: Drawing>(
    drawing: &D,
    id: String,
) -> Result<(D::Node, Shape, String), SceneBuildError> {
    match drawing.find(&id) {
        Some(node) => Ok((node, drawing.shape(node), id)),
        None => Err(SceneBuildError::MissingElement { id }),
    }
}

fn resolve_building<D: Drawing>(
    drawing: &D,
    spec: &BuildingSpec,
    id: BuildingId,
) -> Result<Building<D::Node>, SceneBuildError> {
    if spec.floors.is_empty() {
        return Err(SceneBuildError::NoFloors {
            building: spec.id.clone(),
        });
    }
    if spec.default_floor >= spec.floors.len() {
        return Err(SceneBuildError::DefaultFloorOutOfRange {
            building: spec.id.clone(),
            default_floor: spec.default_floor,
            floor_count: spec.floors.len(),
        });
    }

    let (hit_layer, hit_shape, hit_id) = lookup(drawing, hit_box_id(&spec.id))?;
    let Shape::Rect(hit_region) = hit_shape else {
        return Err(SceneBuildError::WrongShape {
            id: hit_id,
            expected: "a rectangle",
            found: hit_shape.kind(),
        });
    };
    let (roof, _, _) = lookup(drawing, roof_id(&spec.id))?;

    let mut floors = SmallVec::with_capacity(spec.floors.len());
    for (level, floor_spec) in spec.floors.iter().enumerate() {
        let (layer, _, _) = lookup(drawing, floor_id(&spec.id, level))?;
        let mut rooms = Vec::with_capacity(floor_spec.rooms.len());
        for room in &floor_spec.rooms {
            let (_, shape, marker_id) = lookup(drawing, room_id(&spec.id, level, &room.id))?;
            let Some(position) = shape.center() else {
                return Err(SceneBuildError::WrongShape {
                    id: marker_id,
                    expected: "a rectangle or circle",
                    found: shape.kind(),
                });
            };
            rooms.push(Room {
                name: room.name.clone(),
                position,
            });
        }
        floors.push(Floor {
            level,
            layer,
            rooms,
            building: id,
        });
    }

    Ok(Building {
        id: spec.id.clone(),
        name: spec.name.clone(),
        hit_region: hit_region.abs(),
        hit_layer,
        roof,
        floors,
        default_floor: spec.default_floor,
    })
}
