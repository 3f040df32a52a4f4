//! A point quadtree over a bounded region, answering nearest-neighbour queries.
//!
//! Every node of the tree owns a rectangle. A node starts out as a *leaf* node which stores the
//! points inserted into its rectangle directly; once it holds more points than the configured
//! capacity it becomes a *branch* node with exactly four children, one per quadrant, and hands its
//! points down to them. Nodes which are already smaller than the configured minimum region size
//! on both axes never split and simply keep accepting points.
//!
//! The [Wikipedia article] on quadtrees covers their use cases and specifics in more detail.
//!
//! # Routing
//! Quadrants share their midlines, and a point lying on one belongs to the first quadrant that
//! contains it, in the order of [`Quadrant::ALL`]: northwest, northeast, southwest, southeast. The
//! centre of a node therefore always ends up in its northwest child.
//!
//! # Example
//! ```rust
//! use quadsearch::{Quadtree, Point, quadtree::Quadrant};
//!
//! let mut tree = Quadtree::new(Point::new(0, 10), Point::new(10, 0));
//! tree.insert(Point::new(5, 5), "hello").unwrap();
//! tree.insert(Point::new(1, 10), "let's").unwrap();
//! tree.insert(Point::new(5, 8), "cause").unwrap();
//! tree.insert(Point::new(3, 4), "a").unwrap();
//! // The fifth point overflows the root, which splits into quadrants.
//! tree.insert(Point::new(7, 7), "new level").unwrap();
//!
//! let root = tree.root();
//! assert!(root.is_branch());
//! let southwest = root.child(Quadrant::SouthWest).unwrap();
//! assert_eq!(tree.route(Point::new(1, 1)), Some(southwest));
//! assert_eq!(southwest.leaves().unwrap()[0].to_string(), "a at (3, 4)");
//!
//! assert_eq!(tree.nearest(Point::new(8, 6)), Some(&"new level"));
//! ```
//!
//! [Wikipedia article]: https://en.wikipedia.org/wiki/Quadtree " "

use core::{
    iter::{DoubleEndedIterator, ExactSizeIterator, FusedIterator},
    slice,
};
use arrayvec::{ArrayVec, IntoIter as ArrayVecIntoIter};

mod base;
mod node;
mod node_ref;

#[cfg(test)]
mod tests;

use node::NodeData;
pub use node::{Node, Leaf};
pub use node_ref::NodeRef;
pub use base::{Quadtree, Leaves};

/// One of the four quadrants a branch node splits its rectangle into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quadrant {
    /// The quadrant between the western edge, the vertical midline, the northern edge and the horizontal midline.
    NorthWest,
    /// The quadrant between the vertical midline, the eastern edge, the northern edge and the horizontal midline.
    NorthEast,
    /// The quadrant between the western edge, the vertical midline, the horizontal midline and the southern edge.
    SouthWest,
    /// The quadrant between the vertical midline, the eastern edge, the horizontal midline and the southern edge.
    SouthEast,
}
impl Quadrant {
    /// All quadrants, in the order used for routing and searching.
    pub const ALL: [Self; 4] = [
        Self::NorthWest,
        Self::NorthEast,
        Self::SouthWest,
        Self::SouthEast,
    ];
    /// Returns the position of the quadrant in [`ALL`](#associatedconstant.ALL).
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One value per quadrant, stored in routing order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Quadrants<T>(pub [T; 4]);
impl<T> Quadrants<T> {
    /// Returns the value for the specified quadrant.
    #[inline]
    pub fn get(&self, quadrant: Quadrant) -> &T {
        &self.0[quadrant.index()]
    }
    /// Returns an iterator over the values, in routing order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.0.iter()
    }
    /// Returns an iterator over the values paired with their quadrants, in routing order.
    pub fn enumerate(&self) -> impl Iterator<Item = (Quadrant, &T)> + '_ {
        Quadrant::ALL.iter().copied().zip(self.0.iter())
    }
    /// Returns the values as an array.
    #[allow(clippy::missing_const_for_fn)] // cannot drop at compile time smh
    pub fn into_inner(self) -> [T; 4] {
        self.0
    }
}
impl<T> IntoIterator for Quadrants<T> {
    type Item = T;
    type IntoIter = QuadrantsIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        self.into()
    }
}
impl<'a, T> IntoIterator for &'a Quadrants<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
impl<T> From<[T; 4]> for Quadrants<T> {
    fn from(op: [T; 4]) -> Self {
        Self(op)
    }
}

/// An owned iterator over the elements of `Quadrants`.
#[derive(Clone, Debug)]
pub struct QuadrantsIter<T>(ArrayVecIntoIter<[T; 4]>);
impl<T> From<Quadrants<T>> for QuadrantsIter<T> {
    fn from(op: Quadrants<T>) -> Self {
        Self(ArrayVec::from(op.0).into_iter())
    }
}
impl<T> Iterator for QuadrantsIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}
impl<T> DoubleEndedIterator for QuadrantsIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back()
    }
}
impl<T> ExactSizeIterator for QuadrantsIter<T> {
    fn len(&self) -> usize {
        self.0.len()
    }
}
impl<T> FusedIterator for QuadrantsIter<T> {}
