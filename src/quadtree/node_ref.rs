use core::{
    fmt::{self, Debug, Formatter},
    ptr,
};
use super::{Quadtree, Node, NodeData, Leaf, Quadrant, Quadrants};
use crate::{
    geometry::{BoundingBox, Coordinate, Point},
    util::invariant_violation,
};

/// A reference to a node in a quadtree.
///
/// Since this type does not point to the node directly, but rather the tree the node is in and the key of the node in the storage, it can be used to traverse the tree.
pub struct NodeRef<'a, V, C = i64> {
    tree: &'a Quadtree<V, C>,
    key: usize,
}
impl<'a, V, C: Coordinate> NodeRef<'a, V, C> {
    /// Creates a new `NodeRef` pointing to the specified key in the storage, or `None` if there is no such node.
    #[inline]
    pub fn new_raw(tree: &'a Quadtree<V, C>, key: usize) -> Option<Self> {
        if key < tree.nodes.len() {
            Some(Self::new_trusted(tree, key))
        } else {
            None
        }
    }
    /// Keys handed out by the tree itself are always valid.
    #[inline(always)]
    pub(super) fn new_trusted(tree: &'a Quadtree<V, C>, key: usize) -> Self {
        Self { tree, key }
    }
    /// Returns the raw storage key for the node.
    ///
    /// Keys are stable: nodes are never removed or moved once created.
    #[inline(always)]
    pub fn raw_key(&self) -> usize {
        self.key
    }
    /// Returns `true` if the node is the root node, `false` otherwise.
    #[inline(always)]
    pub fn is_root(&self) -> bool {
        self.key == self.tree.root
    }
    /// Returns `true` if the node is a *leaf* node, i.e. stores points and has no children; `false` otherwise.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        match &self.node().data {
            NodeData::Branch { .. } => false,
            NodeData::Leaf(..) => true,
        }
    }
    /// Returns `true` if the node is a *branch* node, i.e. has four children and stores no points itself; `false` otherwise.
    #[inline]
    pub fn is_branch(&self) -> bool {
        !self.is_leaf()
    }
    /// Returns the rectangle covered by the node.
    #[inline(always)]
    pub fn bounds(&self) -> BoundingBox<C> {
        self.node().bounds
    }
    /// Returns the points stored in the node in insertion order, or `None` if it is a branch node.
    #[inline]
    pub fn leaves(&self) -> Option<&'a [Leaf<V, C>]> {
        self.node().data.leaves()
    }
    /// Returns references to the children, or `None` if the node is a leaf node.
    #[inline]
    pub fn children(&self) -> Option<Quadrants<Self>> {
        let [nw, ne, sw, se] = *self.node().data.children()?;
        let child = |key| Self::new_trusted(self.tree, key);
        Some(Quadrants([child(nw), child(ne), child(sw), child(se)]))
    }
    /// Returns a reference to the child covering the specified quadrant, or `None` if the node is a leaf node.
    #[inline]
    pub fn child(&self, quadrant: Quadrant) -> Option<Self> {
        self.node()
            .data
            .children()
            .map(|children| Self::new_trusted(self.tree, children[quadrant.index()]))
    }

    /// Returns the deepest node whose rectangle contains the point, or `None` if the point lies
    /// outside of this node.
    ///
    /// The result is always a leaf node. At every branch the children are tried in the order of
    /// [`Quadrant::ALL`] and the first one containing the point is descended into, so points on a
    /// midline go to the northwest-most quadrant touching it.
    pub fn route(&self, point: Point<C>) -> Option<Self> {
        if !self.bounds().contains(point) {
            return None;
        }
        let mut current = *self;
        while let Some(children) = current.children() {
            current = children
                .into_iter()
                .find(|child| child.bounds().contains(point))
                .unwrap_or_else(|| invariant_violation("quadrants do not cover their parent"));
        }
        Some(current)
    }

    /// Finds the stored point closest to `point` which is strictly closer than `best_distance`, if
    /// one is given.
    ///
    /// Children are visited in the order of [`Quadrant::ALL`]. The distance from the query point to
    /// a child's rectangle is a lower bound on the distance to anything stored inside it, so a
    /// child whose rectangle is not strictly closer than the best candidate found so far is skipped
    /// entirely. Leaf nodes are scanned in insertion order. Candidates only replace the current
    /// best if they are strictly closer, so on equal distances the one discovered first wins.
    ///
    /// # Example
    /// ```rust
    /// use quadsearch::{Quadtree, Point};
    ///
    /// let mut tree = Quadtree::new(Point::new(0, 50), Point::new(50, 0));
    /// tree.insert(Point::new(30, 8), "far").unwrap();
    /// tree.insert(Point::new(26, 9), "near").unwrap();
    ///
    /// let root = tree.root();
    /// let found = root.search(Point::new(27, 10), None).unwrap();
    /// assert_eq!(found.value(), &"near");
    /// // Nothing is strictly closer than the match itself:
    /// assert!(root.search(Point::new(27, 10), Some(2.0_f64.sqrt())).is_none());
    /// ```
    pub fn search(&self, point: Point<C>, best_distance: Option<f64>) -> Option<&'a Leaf<V, C>> {
        let mut best_distance = best_distance;
        let mut closest = None;
        let beats = |distance: f64, best: Option<f64>| best.map_or(true, |best| distance < best);
        match &self.node().data {
            NodeData::Branch { children } => {
                for &key in children {
                    let child = Self::new_trusted(self.tree, key);
                    if !beats(child.bounds().distance_to(point), best_distance) {
                        continue;
                    }
                    if let Some(found) = child.search(point, best_distance) {
                        let distance = found.point().distance_to(point);
                        if beats(distance, best_distance) {
                            best_distance = Some(distance);
                            closest = Some(found);
                        }
                    }
                }
            }
            NodeData::Leaf(bucket) => {
                for leaf in bucket.iter() {
                    let distance = leaf.point().distance_to(point);
                    if beats(distance, best_distance) {
                        best_distance = Some(distance);
                        closest = Some(leaf);
                    }
                }
            }
        }
        closest
    }

    #[inline(always)]
    fn node(&self) -> &'a Node<V, C> {
        &self.tree.nodes[self.key]
    }
}
impl<V, C> Copy for NodeRef<'_, V, C> {}
impl<V, C> Clone for NodeRef<'_, V, C> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}
impl<V, C> PartialEq for NodeRef<'_, V, C> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.key == other.key
    }
}
impl<V, C> Eq for NodeRef<'_, V, C> {}
impl<V, C: Coordinate> Debug for NodeRef<'_, V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", &self.key)
            .field("bounds", &self.bounds())
            .field("is_leaf", &self.is_leaf())
            .finish()
    }
}
