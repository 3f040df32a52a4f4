//! Points, axis-aligned bounding boxes and the coordinate types they are built from.
//!
//! Everything here is immutable and `Copy`. Distances are always reported as `f64`, regardless of
//! the coordinate type, so integer and floating-point trees compare candidates the same way.

use core::fmt::{self, Debug, Display, Formatter};
use crate::quadtree::Quadrants;

/// Numeric types which can be used as coordinates of points stored in a quadtree.
///
/// Implemented for the primitive integers of 16 bits and wider and for both floating-point types.
pub trait Coordinate: Copy + PartialOrd + Debug {
    /// Converts the coordinate to `f64` for distance computations.
    fn to_f64(self) -> f64;
    /// Returns the absolute extent between two coordinates on the same axis.
    fn span(low: Self, high: Self) -> f64 {
        (high.to_f64() - low.to_f64()).abs()
    }
    /// Returns the point which splits `low..=high` in two, computed as `high - (high - low) / 2`.
    ///
    /// For integers the division truncates, so the lower half is never narrower than the upper one.
    fn bisect(low: Self, high: Self) -> Self;
}

macro_rules! impl_coordinate_int {
    ($($t:ty),+ $(,)?) => {$(
        impl Coordinate for $t {
            #[inline]
            #[allow(clippy::cast_lossless, clippy::cast_precision_loss)]
            fn to_f64(self) -> f64 {
                self as f64
            }
            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            fn bisect(low: Self, high: Self) -> Self {
                // Widened so that extreme bounds cannot overflow; the result always lies between
                // `low` and `high`, which makes the narrowing cast lossless.
                let (low, high) = (low as i128, high as i128);
                (high - (high - low) / 2) as $t
            }
        }
    )+};
}
impl_coordinate_int!(i16, i32, i64, isize, u16, u32, u64, usize);

macro_rules! impl_coordinate_float {
    ($($t:ty),+ $(,)?) => {$(
        impl Coordinate for $t {
            #[inline]
            fn to_f64(self) -> f64 {
                f64::from(self)
            }
            #[inline]
            fn bisect(low: Self, high: Self) -> Self {
                let span = high - low;
                if span.is_finite() {
                    high - span / 2.0
                } else {
                    // The extent overflows near the ends of the type's range.
                    low / 2.0 + high / 2.0
                }
            }
        }
    )+};
}
impl_coordinate_float!(f32, f64);

/// A point on the plane.
///
/// # Example
/// ```rust
/// use quadsearch::Point;
///
/// let p = Point::new(10, 0);
/// assert_eq!(p.distance_to(Point::new(5, 0)), 5.0);
/// assert_eq!(p.distance_to(Point::new(10, -5)), 5.0);
/// assert_eq!(p.to_string(), "(10, 0)");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<C = i64> {
    x: C,
    y: C,
}
impl<C: Coordinate> Point<C> {
    /// Creates a point from its coordinates.
    #[inline(always)]
    pub const fn new(x: C, y: C) -> Self {
        Self { x, y }
    }
    /// Returns the horizontal coordinate.
    #[inline(always)]
    pub fn x(self) -> C {
        self.x
    }
    /// Returns the vertical coordinate. North is up: larger `y` means further north.
    #[inline(always)]
    pub fn y(self) -> C {
        self.y
    }
    /// Returns the Euclidean distance between the two points.
    #[inline]
    pub fn distance_to(self, other: Self) -> f64 {
        let dx = other.x.to_f64() - self.x.to_f64();
        let dy = other.y.to_f64() - self.y.to_f64();
        (dx * dx + dy * dy).sqrt()
    }
}
impl<C> From<(C, C)> for Point<C> {
    #[inline]
    fn from((x, y): (C, C)) -> Self {
        Self { x, y }
    }
}
impl<C: Display> Display for Point<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle with `north >= south` and `east >= west`.
///
/// All four edges belong to the box: a point lying exactly on an edge or a corner is contained in it.
/// Boxes which wrap around the edge of an enclosing region are not representable.
///
/// # Example
/// ```rust
/// use quadsearch::{BoundingBox, Point};
///
/// let b = BoundingBox::new(Point::new(0, 10), Point::new(10, 0));
/// assert!(b.contains(Point::new(0, 0)));
/// assert!(!b.contains(Point::new(11, 10)));
/// assert_eq!(b.distance_to(Point::new(10, 20)), 10.0);
/// assert_eq!(b.distance_to(Point::new(5, 5)), 0.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox<C = i64> {
    north: C,
    south: C,
    east: C,
    west: C,
}
impl<C: Coordinate> BoundingBox<C> {
    /// Creates a bounding box from its northwest and southeast corners.
    ///
    /// # Panics
    /// Will panic if the northwest corner lies south or east of the southeast one.
    #[track_caller]
    pub fn new(northwest: Point<C>, southeast: Point<C>) -> Self {
        Self::checked(northwest, southeast).unwrap_or_else(|| {
            panic!(
                "\
bounding box corners are inverted: northwest is {:?}, southeast is {:?}",
                northwest, southeast,
            )
        })
    }
    /// Creates a bounding box from its northwest and southeast corners, or returns `None` if the
    /// northwest corner lies south or east of the southeast one.
    ///
    /// Comparisons against NaN coordinates fail, so boxes with NaN edges are rejected too.
    pub fn checked(northwest: Point<C>, southeast: Point<C>) -> Option<Self> {
        let bounds = Self {
            north: northwest.y,
            west: northwest.x,
            south: southeast.y,
            east: southeast.x,
        };
        if bounds.north >= bounds.south && bounds.east >= bounds.west {
            Some(bounds)
        } else {
            None
        }
    }

    /// The northern (largest `y`) edge.
    #[inline(always)]
    pub fn north(&self) -> C {
        self.north
    }
    /// The southern (smallest `y`) edge.
    #[inline(always)]
    pub fn south(&self) -> C {
        self.south
    }
    /// The eastern (largest `x`) edge.
    #[inline(always)]
    pub fn east(&self) -> C {
        self.east
    }
    /// The western (smallest `x`) edge.
    #[inline(always)]
    pub fn west(&self) -> C {
        self.west
    }
    /// The northwest corner.
    #[inline]
    pub fn northwest(&self) -> Point<C> {
        Point::new(self.west, self.north)
    }
    /// The southeast corner.
    #[inline]
    pub fn southeast(&self) -> Point<C> {
        Point::new(self.east, self.south)
    }
    /// East-west extent.
    #[inline]
    pub fn width(&self) -> f64 {
        C::span(self.west, self.east)
    }
    /// North-south extent.
    #[inline]
    pub fn height(&self) -> f64 {
        C::span(self.south, self.north)
    }

    /// Returns `true` if the point lies inside the box or on any of its edges.
    #[inline]
    pub fn contains(&self, point: Point<C>) -> bool {
        point.x >= self.west
            && point.x <= self.east
            && point.y >= self.south
            && point.y <= self.north
    }
    /// Returns the distance from the point to the nearest point on or inside the box, which is zero
    /// if the box contains the point.
    ///
    /// The horizontal and vertical clearances are computed independently and then combined, so a
    /// point diagonally off a corner gets the distance to that corner.
    pub fn distance_to(&self, point: Point<C>) -> f64 {
        let ns = Self::clearance(point.y, self.south, self.north);
        let ew = Self::clearance(point.x, self.west, self.east);
        (ns * ns + ew * ew).sqrt()
    }
    fn clearance(value: C, low: C, high: C) -> f64 {
        if low <= value && value <= high {
            0.0
        } else {
            let value = value.to_f64();
            (value - high.to_f64())
                .abs()
                .min((value - low.to_f64()).abs())
        }
    }

    /// Splits the box into four quadrants at its midpoint.
    ///
    /// The midpoint lines are shared: each of them is an edge of two quadrants, and containment is
    /// inclusive, so the quadrants cover the box without gaps.
    ///
    /// # Example
    /// ```rust
    /// use quadsearch::{BoundingBox, Point, quadtree::Quadrant};
    ///
    /// let b = BoundingBox::new(Point::new(0, 100), Point::new(100, 0));
    /// let quadrants = b.quadrants();
    /// assert_eq!(
    ///     quadrants.get(Quadrant::SouthEast),
    ///     &BoundingBox::new(Point::new(50, 50), Point::new(100, 0)),
    /// );
    /// ```
    pub fn quadrants(&self) -> Quadrants<Self> {
        let mid_x = C::bisect(self.west, self.east);
        let mid_y = C::bisect(self.south, self.north);
        let quadrant = |west, north, east, south| Self {
            north,
            south,
            east,
            west,
        };
        Quadrants([
            quadrant(self.west, self.north, mid_x, mid_y),
            quadrant(mid_x, self.north, self.east, mid_y),
            quadrant(self.west, mid_y, mid_x, self.south),
            quadrant(mid_x, mid_y, self.east, self.south),
        ])
    }
}
impl<C: Display> Display for BoundingBox<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(({},{}),({},{}))",
            self.north, self.west, self.south, self.east,
        )
    }
}
