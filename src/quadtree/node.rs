use core::fmt::{self, Display, Formatter};
use smallvec::SmallVec;
use crate::{
    geometry::{BoundingBox, Coordinate, Point},
    util::invariant_violation,
};

/// Inline room for the default leaf capacity plus the one point which triggers a split.
pub(super) type Bucket<V, C> = SmallVec<[Leaf<V, C>; 5]>;

/// A point stored in the tree together with its value.
///
/// Leaves are created on insertion and never modified afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Leaf<V, C = i64> {
    point: Point<C>,
    value: V,
}
impl<V, C: Coordinate> Leaf<V, C> {
    #[inline(always)]
    pub(crate) fn new(point: Point<C>, value: V) -> Self {
        Self { point, value }
    }
    /// Returns the point the value was stored at.
    #[inline(always)]
    pub fn point(&self) -> Point<C> {
        self.point
    }
    /// Returns a reference to the stored value.
    #[inline(always)]
    pub fn value(&self) -> &V {
        &self.value
    }
    /// Consumes the leaf and returns the stored value.
    #[inline(always)]
    #[allow(clippy::missing_const_for_fn)] // const fn cannot evaluate drop
    pub fn into_value(self) -> V {
        self.value
    }
}
impl<V: Display, C: Display> Display for Leaf<V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.value, self.point)
    }
}

/// A node of a quadtree.
///
/// Created by the quadtree internally and only publicly exposed so that it can be named in
/// signatures; use [`NodeRef`] to inspect nodes.
///
/// [`NodeRef`]: struct.NodeRef.html " "
#[derive(Clone, Debug)]
pub struct Node<V, C = i64> {
    pub(super) bounds: BoundingBox<C>,
    pub(super) data: NodeData<V, C>,
}
impl<V, C: Coordinate> Node<V, C> {
    #[inline(always)]
    pub(super) fn leaf(bounds: BoundingBox<C>) -> Self {
        Self {
            bounds,
            data: NodeData::Leaf(Bucket::new()),
        }
    }
    /// Appends a leaf and returns the new number of leaves in the node.
    ///
    /// Branch nodes never store leaves directly; routing hands out only leaf nodes, so reaching a
    /// branch here means the tree is corrupted.
    #[track_caller]
    pub(super) fn push_leaf(&mut self, leaf: Leaf<V, C>) -> usize {
        match &mut self.data {
            NodeData::Leaf(bucket) => {
                bucket.push(leaf);
                bucket.len()
            }
            NodeData::Branch { .. } => invariant_violation("cannot add an item to a branch node"),
        }
    }
}

// Leaf buckets are stored inline.
#[allow(variant_size_differences)]
#[derive(Clone, Debug)]
pub(super) enum NodeData<V, C> {
    Branch {
        children: [usize; 4],
    },
    Leaf(Bucket<V, C>),
}
impl<V, C> NodeData<V, C> {
    #[inline]
    pub(super) fn children(&self) -> Option<&[usize; 4]> {
        match self {
            Self::Branch { children } => Some(children),
            Self::Leaf(..) => None,
        }
    }
    #[inline]
    pub(super) fn leaves(&self) -> Option<&[Leaf<V, C>]> {
        match self {
            Self::Branch { .. } => None,
            Self::Leaf(bucket) => Some(bucket.as_slice()),
        }
    }
}
