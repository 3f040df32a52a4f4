use core::{
    fmt::{self, Debug, Formatter},
    iter::FusedIterator,
    mem,
    slice,
};
use crate::{
    geometry::{BoundingBox, Coordinate, Point},
    util::invariant_violation,
    OutOfBounds,
    QuadtreeConfig,
};
use super::{Node, NodeData, NodeRef, Leaf};

/// A quadtree storing values at points of a bounded region.
///
/// See the [module-level documentation] for more.
///
/// [module-level documentation]: index.html " "
#[derive(Clone)]
pub struct Quadtree<V, C = i64> {
    pub(super) nodes: Vec<Node<V, C>>,
    pub(super) root: usize,
    config: QuadtreeConfig,
    len: usize,
}
impl<V, C: Coordinate> Quadtree<V, C> {
    /// Creates an empty quadtree covering the rectangle between the two corners, using the default configuration.
    ///
    /// # Panics
    /// Will panic if the northwest corner lies south or east of the southeast one.
    ///
    /// # Example
    /// ```rust
    /// # use quadsearch::{Quadtree, Point};
    /// let tree = Quadtree::<&str>::new(Point::new(0, 100), Point::new(100, 0));
    /// assert!(tree.is_empty());
    /// // An empty tree has nothing to offer, wherever you look:
    /// assert_eq!(tree.nearest(Point::new(50, 50)), None);
    /// assert_eq!(tree.nearest(Point::new(-500, 500)), None);
    /// ```
    #[track_caller]
    pub fn new(northwest: Point<C>, southeast: Point<C>) -> Self {
        Self::with_config(northwest, southeast, QuadtreeConfig::default())
    }
    /// Creates an empty quadtree covering the rectangle between the two corners.
    ///
    /// # Panics
    /// Will panic if the northwest corner lies south or east of the southeast one.
    #[track_caller]
    pub fn with_config(northwest: Point<C>, southeast: Point<C>, config: QuadtreeConfig) -> Self {
        let bounds = BoundingBox::new(northwest, southeast);
        Self {
            nodes: vec![Node::leaf(bounds)],
            root: 0,
            config,
            len: 0,
        }
    }

    /// Stores a value at the specified point.
    ///
    /// Several values may be stored at the same point; lookups return the one inserted first.
    ///
    /// # Errors
    /// Fails if the point lies outside of the tree's bounds. The tree is left untouched and the
    /// value is handed back inside the error.
    ///
    /// # Example
    /// ```rust
    /// # use quadsearch::{Quadtree, Point};
    /// let mut tree = Quadtree::new(Point::new(0, 10), Point::new(10, 0));
    /// tree.insert(Point::new(5, 5), "hello").unwrap();
    ///
    /// let error = tree.insert(Point::new(20, 10), "fail").unwrap_err();
    /// assert_eq!(error.to_string(), "point (20, 10) is out of bounds of ((10,0),(0,10))");
    /// assert_eq!(error.into_value(), "fail");
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, point: Point<C>, value: V) -> Result<(), OutOfBounds<V, C>> {
        match self.insert_leaf(self.root, Leaf::new(point, value)) {
            Ok(()) => {
                self.len += 1;
                Ok(())
            }
            Err(leaf) => {
                log::trace!("rejected {:?}, outside of {:?}", point, self.bounds());
                Err(OutOfBounds {
                    point,
                    bounds: self.bounds(),
                    value: leaf.into_value(),
                })
            }
        }
    }
    /// Returns the value stored at the point closest to `point`, or `None` if the tree is empty.
    ///
    /// The query point does not need to lie inside the tree's bounds. If several stored points are
    /// equally close, the one found first wins: quadrants are searched northwest, northeast,
    /// southwest, southeast, and points within a node in insertion order.
    ///
    /// # Example
    /// ```rust
    /// # use quadsearch::{Quadtree, Point};
    /// let mut tree = Quadtree::new(Point::new(0, 100), Point::new(100, 0));
    /// tree.insert(Point::new(50, 49), "A").unwrap();
    /// tree.insert(Point::new(59, 39), "B").unwrap();
    /// assert_eq!(tree.nearest(Point::new(50, 50)), Some(&"A"));
    /// ```
    #[inline]
    pub fn nearest(&self, point: Point<C>) -> Option<&V> {
        self.nearest_leaf(point).map(Leaf::value)
    }
    /// Returns the stored leaf closest to `point`, or `None` if the tree is empty.
    ///
    /// Same as [`nearest`], but also reports where the value was stored.
    ///
    /// [`nearest`]: #method.nearest " "
    pub fn nearest_leaf(&self, point: Point<C>) -> Option<&Leaf<V, C>> {
        let found = self.root().search(point, None);
        log::trace!(
            "nearest to {:?} among {} points: {:?}",
            point,
            self.len,
            found.map(Leaf::point),
        );
        found
    }
    /// Returns the leaf node whose rectangle the point would be stored in, or `None` if the point
    /// is outside of the tree's bounds.
    ///
    /// Routing does not modify the tree, so repeated calls return the same node until the next
    /// insertion.
    #[inline]
    pub fn route(&self, point: Point<C>) -> Option<NodeRef<'_, V, C>> {
        self.root().route(point)
    }

    /// Returns a reference to the root node of the tree.
    #[inline]
    pub fn root(&self) -> NodeRef<'_, V, C> {
        NodeRef::new_trusted(self, self.root)
    }
    /// Returns the rectangle covered by the tree.
    #[inline]
    pub fn bounds(&self) -> BoundingBox<C> {
        self.nodes[self.root].bounds
    }
    /// Returns the configuration the tree was created with.
    #[inline(always)]
    pub fn config(&self) -> &QuadtreeConfig {
        &self.config
    }
    /// Returns the number of stored points.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }
    /// Returns `true` if no points have been stored yet, `false` otherwise.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    /// Returns the number of nodes, both leaf and branch ones, including the root.
    #[inline(always)]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
    /// Returns an iterator over all stored leaves, depth-first in quadrant order, and in insertion
    /// order within each node.
    pub fn leaves(&self) -> Leaves<'_, V, C> {
        Leaves {
            tree: self,
            stack: vec![self.root],
            current: [].iter(),
        }
    }

    /// Routes the leaf from the node at `from` and stores it there, splitting the receiving node
    /// if it overflows. Hands the leaf back if the point is outside of `from`.
    fn insert_leaf(&mut self, from: usize, leaf: Leaf<V, C>) -> Result<(), Leaf<V, C>> {
        let target = match NodeRef::new_trusted(self, from).route(leaf.point()) {
            Some(node) => node.raw_key(),
            None => return Err(leaf),
        };
        if self.nodes[target].push_leaf(leaf) > self.config.leaf_capacity().get() {
            self.subdivide(target);
        }
        Ok(())
    }

    /// Turns the leaf node at `key` into a branch node and redistributes its points among the new
    /// children, unless the node is too small to be split.
    fn subdivide(&mut self, key: usize) {
        let bounds = self.nodes[key].bounds;
        let min_region_size = self.config.min_region_size();
        if bounds.width() < min_region_size && bounds.height() < min_region_size {
            log::debug!(
                "node {} at {:?} is below the minimum region size, not splitting",
                key,
                bounds,
            );
            return;
        }
        let quadrants = bounds.quadrants();
        // A quadrant as large as its parent would receive the same points and split forever.
        if quadrants.iter().any(|quadrant| *quadrant == bounds) {
            log::debug!(
                "node {} at {:?} cannot be divided any further, not splitting",
                key,
                bounds,
            );
            return;
        }

        let first_child = self.nodes.len();
        self.nodes.extend(quadrants.into_iter().map(Node::leaf));
        let children = [first_child, first_child + 1, first_child + 2, first_child + 3];
        let bucket = match mem::replace(&mut self.nodes[key].data, NodeData::Branch { children }) {
            NodeData::Leaf(bucket) => bucket,
            NodeData::Branch { .. } => invariant_violation("cannot split a branch node"),
        };
        log::debug!(
            "split node {} at {:?} into nodes {}..={}, moving {} points",
            key,
            bounds,
            first_child,
            first_child + 3,
            bucket.len(),
        );
        for leaf in bucket {
            if self.insert_leaf(key, leaf).is_err() {
                invariant_violation("a point left the node it was stored in");
            }
        }
    }
}
impl<V: Debug, C: Coordinate> Debug for Quadtree<V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quadtree")
            .field("config", &self.config)
            .field("len", &self.len)
            .field("root", &DebugNode(self.root()))
            .finish()
    }
}

/// Prints a node together with everything below it.
struct DebugNode<'a, V, C>(NodeRef<'a, V, C>);
impl<V: Debug, C: Coordinate> Debug for DebugNode<'_, V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut node = f.debug_struct("Node");
        node.field("bounds", &self.0.bounds());
        match self.0.children() {
            Some(children) => node.field(
                "children",
                &children.into_inner().map(DebugNode),
            ),
            None => node.field("leaves", &self.0.leaves().unwrap_or_default()),
        };
        node.finish()
    }
}

/// An iterator over the leaves of a quadtree.
///
/// Created by [`Quadtree::leaves`].
///
/// [`Quadtree::leaves`]: struct.Quadtree.html#method.leaves " "
pub struct Leaves<'a, V, C = i64> {
    tree: &'a Quadtree<V, C>,
    stack: Vec<usize>,
    current: slice::Iter<'a, Leaf<V, C>>,
}
impl<'a, V, C> Iterator for Leaves<'a, V, C> {
    type Item = &'a Leaf<V, C>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(leaf) = self.current.next() {
                return Some(leaf);
            }
            let key = self.stack.pop()?;
            let tree = self.tree;
            match &tree.nodes[key].data {
                NodeData::Leaf(bucket) => self.current = bucket.iter(),
                // Reversed so that the northwest child is popped first.
                NodeData::Branch { children } => self.stack.extend(children.iter().rev()),
            }
        }
    }
}
impl<V, C> FusedIterator for Leaves<'_, V, C> {}
impl<V, C> Debug for Leaves<'_, V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaves")
            .field("pending_nodes", &self.stack.len())
            .field("pending_in_node", &self.current.len())
            .finish()
    }
}
