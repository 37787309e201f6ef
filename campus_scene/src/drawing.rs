// Copyright 2025 the Campus Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing interface: a shape tree that can be queried by element id.

use core::fmt;

use kurbo::{Circle, Point, Rect};

/// Coarse kind of a drawing element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// An axis-aligned rectangle.
    Rect,
    /// A circle.
    Circle,
    /// A group of other elements.
    Group,
    /// Any other element (paths, text, images, ...).
    Other,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rect => "rectangle",
            Self::Circle => "circle",
            Self::Group => "group",
            Self::Other => "other element",
        })
    }
}

/// Geometry of a drawing element, in map space.
///
/// Only rectangles and circles carry geometry; the scene never needs the
/// geometry of other elements, only their visibility.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// An axis-aligned rectangle.
    Rect(Rect),
    /// A circle.
    Circle(Circle),
    /// A group of other elements.
    Group,
    /// Any other element.
    Other,
}

impl Shape {
    /// Returns the kind of this shape.
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Rect(_) => ShapeKind::Rect,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Group => ShapeKind::Group,
            Self::Other => ShapeKind::Other,
        }
    }

    /// Returns the center of a rectangle or circle.
    #[must_use]
    pub fn center(&self) -> Option<Point> {
        match self {
            Self::Rect(r) => Some(r.center()),
            Self::Circle(c) => Some(c.center),
            Self::Group | Self::Other => None,
        }
    }
}

/// A loaded vector drawing whose elements can be looked up by id.
///
/// This is the only surface through which the scene reads geometry and
/// toggles layers. Parsing and rendering the drawing are the implementor's
/// business; [`ShapeTree`](crate::ShapeTree) is a small in-memory
/// implementation.
pub trait Drawing {
    /// Handle to an element. Handles stay valid for the lifetime of the drawing.
    type Node: Copy + Eq + fmt::Debug;

    /// Looks up an element by its id.
    fn find(&self, id: &str) -> Option<Self::Node>;

    /// Returns the geometry of `node`.
    fn shape(&self, node: Self::Node) -> Shape;

    /// Returns whether `node` is currently shown.
    fn is_visible(&self, node: Self::Node) -> bool;

    /// Shows or hides `node`.
    fn set_visible(&mut self, node: Self::Node, visible: bool);
}
