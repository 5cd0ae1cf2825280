//! Definition of the triangle shape.

use crate::math::{Point, Real, Vector};
use crate::utils;

/// A triangle with 3 vertices.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
}

impl Triangle {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// The normal of this triangle, scaled by twice its area.
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        (self.b - self.a).cross(&(self.c - self.a))
    }

    /// The unit normal of this triangle, or `None` if it is degenerate.
    #[inline]
    pub fn unit_normal(&self) -> Option<Vector<Real>> {
        self.scaled_normal().try_normalize(Real::MIN_POSITIVE)
    }

    /// The area of this triangle.
    #[inline]
    pub fn area(&self) -> Real {
        self.scaled_normal().norm() * 0.5
    }

    /// The center of this triangle.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        utils::center(&[self.a, self.b, self.c])
    }
}
