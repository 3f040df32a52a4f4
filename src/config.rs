//! Construction-time tuning for quadtrees.

use core::num::NonZeroUsize;

/// Tuning parameters for a [`Quadtree`], fixed when the tree is created.
///
/// # Example
/// ```rust
/// use core::num::NonZeroUsize;
/// use quadsearch::{Quadtree, QuadtreeConfig, Point};
///
/// let config = QuadtreeConfig::new()
///     .with_leaf_capacity(NonZeroUsize::new(16).unwrap())
///     .with_min_region_size(1.0);
/// let tree = Quadtree::<&str>::with_config(Point::new(0, 100), Point::new(100, 0), config);
/// assert_eq!(tree.config().leaf_capacity().get(), 16);
/// ```
///
/// [`Quadtree`]: crate::Quadtree " "
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadtreeConfig {
    leaf_capacity: NonZeroUsize,
    min_region_size: f64,
}
impl QuadtreeConfig {
    /// How many points a node holds before it tries to subdivide.
    pub const DEFAULT_LEAF_CAPACITY: usize = 4;
    /// The extent below which, on both axes, a node no longer subdivides.
    pub const DEFAULT_MIN_REGION_SIZE: f64 = 5.0;

    /// Creates the default configuration.
    pub const fn new() -> Self {
        Self {
            leaf_capacity: match NonZeroUsize::new(Self::DEFAULT_LEAF_CAPACITY) {
                Some(x) => x,
                None => unreachable!(),
            },
            min_region_size: Self::DEFAULT_MIN_REGION_SIZE,
        }
    }
    /// Sets the number of points a leaf node may hold before it is split into quadrants.
    ///
    /// This is a soft limit: nodes which are too small to be split keep accepting points.
    #[must_use]
    pub const fn with_leaf_capacity(mut self, leaf_capacity: NonZeroUsize) -> Self {
        self.leaf_capacity = leaf_capacity;
        self
    }
    /// Sets the minimum region size. A node whose width *and* height are both below it is never
    /// split, no matter how many points it holds.
    ///
    /// # Panics
    /// Will panic if `min_region_size` is negative, infinite or NaN.
    #[must_use]
    #[track_caller]
    pub fn with_min_region_size(mut self, min_region_size: f64) -> Self {
        assert!(
            min_region_size.is_finite() && min_region_size >= 0.0,
            "\
the minimum region size must be a finite non-negative number, got {}",
            min_region_size,
        );
        self.min_region_size = min_region_size;
        self
    }

    /// Returns the leaf capacity.
    #[inline(always)]
    pub const fn leaf_capacity(&self) -> NonZeroUsize {
        self.leaf_capacity
    }
    /// Returns the minimum region size.
    #[inline(always)]
    pub const fn min_region_size(&self) -> f64 {
        self.min_region_size
    }
}
impl Default for QuadtreeConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
