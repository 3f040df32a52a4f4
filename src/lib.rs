//! A bounded point quadtree answering nearest-neighbour queries.
//!
//! ------------------------
//!
//! # Overview
//! Quadsearch stores values at points of a fixed rectangular region and finds the value stored
//! closest to any query point. The region is recursively split into four quadrants as it fills up,
//! and lookups use the distance from the query point to each quadrant's rectangle to skip every
//! quadrant which cannot possibly hold a closer point than the best one found so far. Lookups are
//! always exact: the pruning only ever discards quadrants which are provably too far away.
//!
//! ```rust
//! use quadsearch::{Quadtree, Point};
//!
//! let mut tree = Quadtree::new(Point::new(0, 50), Point::new(50, 0));
//! tree.insert(Point::new(30, 8), "bogus").unwrap();
//! tree.insert(Point::new(25, 9), "bogus").unwrap();
//! tree.insert(Point::new(26, 9), "find me").unwrap();
//! assert_eq!(tree.nearest(Point::new(27, 10)), Some(&"find me"));
//!
//! // Points outside of the region are rejected and handed back.
//! let error = tree.insert(Point::new(51, 0), "outside").unwrap_err();
//! assert_eq!(error.point(), Point::new(51, 0));
//! ```
//!
//! # Storage
//! Nodes are allocated in a single arena owned by the tree and refer to their children by index,
//! the technique described by Ben Lovy in ["arena-allocated trees"][arena tree blog post]. A node
//! is either a leaf node holding up to the configured number of points (inline, without a separate
//! allocation for the default capacity) or a branch node holding the indices of its four children.
//! Nodes are never removed, so indices stay valid for the lifetime of the tree.
//!
//! # Configuration
//! [`QuadtreeConfig`] fixes the leaf capacity (4 by default) and the minimum region size (5 by
//! default) when the tree is created. Nodes smaller than the minimum region size on both axes are
//! never split and keep accepting points past their capacity.
//!
//! # Concurrency
//! All operations run synchronously on the caller's thread. Insertion takes `&mut self` and lookups
//! take `&self`, so any number of concurrent lookups is fine and insertions need exclusive access,
//! which the borrow checker enforces; sharing a tree across threads for writing requires a lock.
//!
//! # Logging
//! Node splits are reported through the [`log`] facade at the `debug` level, rejected insertions
//! and lookups at the `trace` level. No logger is installed by the crate.
//!
//! # Feature flags
//! - `serde` — implements `Serialize` and `Deserialize` for [`Point`], [`BoundingBox`] and [`QuadtreeConfig`].
//!
//! [`log`]: https://docs.rs/log " "
//! [arena tree blog post]: https://dev.to/deciduously/no-more-tears-no-more-knots-arena-allocated-trees-in-rust-44k6 " "

#![warn(
    rust_2018_idioms,
    clippy::cargo,
    clippy::nursery,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    variant_size_differences,
    clippy::cast_lossless,
    clippy::checked_conversions,
    clippy::copy_iterator,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
    clippy::filter_map_next,
    clippy::map_flatten,
    clippy::map_unwrap_or,
    clippy::implicit_saturating_sub,
    clippy::inefficient_to_string,
    clippy::items_after_statements,
    clippy::match_same_arms,
    clippy::match_wildcard_for_single_variants,
    clippy::mut_mut,
    clippy::needless_continue,
    clippy::needless_pass_by_value,
    clippy::option_option,
    clippy::range_plus_one,
    clippy::range_minus_one,
    clippy::redundant_closure_for_method_calls,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::too_many_lines,
    clippy::trivially_copy_pass_by_ref,
    clippy::unnested_or_patterns,
    clippy::unused_self,
    clippy::used_underscore_binding,
    clippy::dbg_macro,
    clippy::get_unwrap,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unneeded_field_pattern,
    clippy::unwrap_used, // Only .expect() allowed
)]
#![deny(
    anonymous_parameters,
    bare_trait_objects,
    clippy::exit,
)]
#![allow(clippy::use_self)]

pub mod geometry;
#[doc(no_inline)]
pub use geometry::{Point, BoundingBox, Coordinate};

mod config;
pub use config::QuadtreeConfig;

pub mod quadtree;
pub use quadtree::{Quadtree, NodeRef, Leaf};

/// A prelude for using Quadsearch, containing the most used types in a renamed form for safe glob-importing.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::geometry::{
        Point as QuadtreePoint,
        BoundingBox as QuadtreeBoundingBox,
        Coordinate as QuadtreeCoordinate,
    };
    #[doc(no_inline)]
    pub use crate::quadtree::{
        Quadtree,
        NodeRef as QuadtreeNodeRef,
        Leaf as QuadtreeLeaf,
        Quadrant,
    };
    #[doc(no_inline)]
    pub use crate::{QuadtreeConfig, OutOfBounds as QuadtreeOutOfBounds};
}

pub(crate) mod util;

use core::fmt::{self, Formatter, Display, Debug};

/// The error type returned by [`Quadtree::insert`] when the point lies outside of the tree's bounds.
///
/// Nothing is stored when this happens; the value which was attempted to be inserted is provided
/// here so that it doesn't get dropped if it could instead be reused.
///
/// [`Quadtree::insert`]: quadtree/struct.Quadtree.html#method.insert " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OutOfBounds<V, C = i64> {
    pub(crate) point: Point<C>,
    pub(crate) bounds: BoundingBox<C>,
    pub(crate) value: V,
}
impl<V, C: Coordinate> OutOfBounds<V, C> {
    /// Returns the rejected point.
    #[inline(always)]
    pub fn point(&self) -> Point<C> {
        self.point
    }
    /// Returns the bounds of the tree which rejected the point.
    #[inline(always)]
    pub fn bounds(&self) -> BoundingBox<C> {
        self.bounds
    }
    /// Returns a reference to the value which was not inserted.
    #[inline(always)]
    pub fn value(&self) -> &V {
        &self.value
    }
    /// Consumes the error and returns the value which was not inserted.
    #[inline(always)]
    #[allow(clippy::missing_const_for_fn)] // const fn cannot evaluate drop
    pub fn into_value(self) -> V {
        self.value
    }
}
impl<V, C: Display> Display for OutOfBounds<V, C> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "point {} is out of bounds of {}", self.point, self.bounds)
    }
}
impl<V: Debug, C: Debug + Display> std::error::Error for OutOfBounds<V, C> {}
