// Copyright 2025 the Campus Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory [`Drawing`] implementation keyed by element id.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::drawing::{Drawing, Shape};

/// Handle to an element of a [`ShapeTree`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ShapeNode(usize);

impl ShapeNode {
    const fn idx(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Entry {
    id: String,
    shape: Shape,
    visible: bool,
}

/// A flat, id-addressable collection of shapes.
///
/// Elements are visible when inserted. Every call to
/// [`Drawing::set_visible`] is counted in [`ShapeTree::visibility_writes`],
/// which lets renderers (and tests) see whether anything was touched.
///
/// ```rust
/// use kurbo::Rect;
/// use campus_scene::{Drawing, Shape, ShapeTree};
///
/// let mut tree = ShapeTree::new();
/// let roof = tree.insert("Main_Roof", Shape::Group);
/// tree.insert("Main_HitBox", Shape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0)));
///
/// assert_eq!(tree.find("Main_Roof"), Some(roof));
/// tree.set_visible(roof, false);
/// assert!(!tree.is_visible(roof));
/// assert_eq!(tree.visibility_writes(), 1);
/// ```
#[derive(Clone, Default)]
pub struct ShapeTree {
    entries: Vec<Entry>,
    by_id: HashMap<String, ShapeNode>,
    writes: u64,
}

impl fmt::Debug for ShapeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hidden = self.entries.iter().filter(|e| !e.visible).count();
        f.debug_struct("ShapeTree")
            .field("elements", &self.entries.len())
            .field("hidden", &hidden)
            .field("writes", &self.writes)
            .finish_non_exhaustive()
    }
}

impl ShapeTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an element, or replaces the shape of an existing element with the same id.
    ///
    /// Replacing keeps the element's handle and visibility.
    pub fn insert(&mut self, id: impl Into<String>, shape: Shape) -> ShapeNode {
        let id = id.into();
        if let Some(&node) = self.by_id.get(&id) {
            self.entries[node.idx()].shape = shape;
            return node;
        }
        let node = ShapeNode(self.entries.len());
        self.entries.push(Entry {
            id: id.clone(),
            shape,
            visible: true,
        });
        self.by_id.insert(id, node);
        node
    }

    /// Builder-style [`ShapeTree::insert`].
    #[must_use]
    pub fn with(mut self, id: impl Into<String>, shape: Shape) -> Self {
        self.insert(id, shape);
        self
    }

    /// Returns the id of `node`, if it belongs to this tree.
    #[must_use]
    pub fn id(&self, node: ShapeNode) -> Option<&str> {
        self.entries.get(node.idx()).map(|e| e.id.as_str())
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the tree has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns how many visibility writes have been made.
    #[must_use]
    pub fn visibility_writes(&self) -> u64 {
        self.writes
    }

    /// Iterates over the ids of the currently visible elements, in insertion order.
    pub fn visible_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .iter()
            .filter(|e| e.visible)
            .map(|e| e.id.as_str())
    }
}

impl Drawing for ShapeTree {
    type Node = ShapeNode;

    fn find(&self, id: &str) -> Option<ShapeNode> {
        self.by_id.get(id).copied()
    }

    fn shape(&self, node: ShapeNode) -> Shape {
        self.entries.get(node.idx()).map_or(Shape::Other, |e| e.shape)
    }

    fn is_visible(&self, node: ShapeNode) -> bool {
        self.entries.get(node.idx()).is_some_and(|e| e.visible)
    }

    fn set_visible(&mut self, node: ShapeNode, visible: bool) {
        if let Some(entry) = self.entries.get_mut(node.idx()) {
            entry.visible = visible;
            self.writes += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Circle, Rect};

    use super::ShapeTree;
    use crate::drawing::{Drawing, Shape, ShapeKind};

    #[test]
    fn insert_find_and_replace() {
        let mut tree = ShapeTree::new();
        let a = tree.insert("A", Shape::Group);
        let b = tree.insert("B", Shape::Circle(Circle::new((1.0, 2.0), 3.0)));
        assert_ne!(a, b);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.find("B"), Some(b));
        assert_eq!(tree.find("C"), None);
        assert_eq!(tree.id(a), Some("A"));

        tree.set_visible(a, false);
        let again = tree.insert("A", Shape::Rect(Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert_eq!(again, a);
        assert_eq!(tree.shape(a).kind(), ShapeKind::Rect);
        assert!(!tree.is_visible(a));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn writes_are_counted_even_when_unchanged() {
        let mut tree = ShapeTree::new().with("A", Shape::Other);
        let a = tree.find("A").unwrap();
        tree.set_visible(a, true);
        tree.set_visible(a, true);
        assert_eq!(tree.visibility_writes(), 2);
        assert_eq!(tree.visible_ids().collect::<Vec<_>>(), ["A"]);
    }

    #[test]
    fn foreign_handles_are_inert() {
        let mut small = ShapeTree::new().with("A", Shape::Group);
        let big = ShapeTree::new()
            .with("X", Shape::Group)
            .with("Y", Shape::Group);
        let foreign = big.find("Y").unwrap();

        assert_eq!(small.shape(foreign), Shape::Other);
        assert!(!small.is_visible(foreign));
        small.set_visible(foreign, false);
        assert_eq!(small.visibility_writes(), 0);
    }

    #[test]
    fn shape_center() {
        assert_eq!(
            Shape::Rect(Rect::new(0.0, 0.0, 10.0, 4.0)).center(),
            Some((5.0, 2.0).into())
        );
        assert_eq!(Shape::Group.center(), None);
    }
}
