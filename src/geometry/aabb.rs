//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector, DIM};

/// An Axis-Aligned Bounding Box.
///
/// Used as the pre-filter of the intersection solver: candidate cutter sides
/// are tested against the (slightly loosened) box of the background element
/// before any exact geometric test runs.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// The minimum coordinates of the box.
    pub mins: Point<Real>,
    /// The maximum coordinates of the box.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new box from its extremal points.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid box such that merging any point into it yields the
    /// box of that point.
    #[inline]
    pub fn new_invalid() -> Aabb {
        Aabb {
            mins: Point::new(Real::MAX, Real::MAX, Real::MAX),
            maxs: Point::new(-Real::MAX, -Real::MAX, -Real::MAX),
        }
    }

    /// The smallest box containing all the given points.
    pub fn from_points<'a, I>(pts: I) -> Aabb
    where
        I: IntoIterator<Item = &'a Point<Real>>,
    {
        let mut result = Aabb::new_invalid();

        for pt in pts {
            result.take_point(pt);
        }

        result
    }

    /// Grows this box so it contains `pt`.
    #[inline]
    pub fn take_point(&mut self, pt: &Point<Real>) {
        for i in 0..DIM {
            self.mins[i] = self.mins[i].min(pt[i]);
            self.maxs[i] = self.maxs[i].max(pt[i]);
        }
    }

    /// The center of this box.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The extents of this box along each axis.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// Enlarges this box by `amount` on all sides.
    #[inline]
    pub fn loosened(&self, amount: Real) -> Aabb {
        let amount = Vector::repeat(amount);
        Aabb {
            mins: self.mins - amount,
            maxs: self.maxs + amount,
        }
    }

    /// Tests whether this box intersects `other`.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        (0..DIM).all(|i| self.mins[i] <= other.maxs[i] && other.mins[i] <= self.maxs[i])
    }

    /// Tests whether this box contains the point `pt`.
    #[inline]
    pub fn contains_point(&self, pt: &Point<Real>) -> bool {
        (0..DIM).all(|i| self.mins[i] <= pt[i] && pt[i] <= self.maxs[i])
    }
}
