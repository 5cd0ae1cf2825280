//! The tolerant-equality policy used by every other component.

use crate::math::{Point, Real};

/// Classification of a point relative to an edge.
///
/// Returned by [`Tolerances::point_on_edge`]. Degenerate configurations are
/// reported explicitly so that callers can fall back to a perturbation or a
/// finer decomposition instead of misreading them as a miss.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointOnEdge {
    /// The point does not lie on the edge.
    NotOn,
    /// The point coincides with the endpoint of the given local index (0 or 1).
    AtEndpoint(usize),
    /// The point lies strictly between the endpoints, at the given parametric
    /// coordinate `t ∈ (0, 1)`.
    Interior(Real),
    /// The edge itself is degenerate (its endpoints coincide within tolerance).
    Degenerate,
}

/// The tolerance policy deciding point identity under floating-point uncertainty.
///
/// All coincidence decisions of the cut pipeline are routed through this type
/// so that the epsilon policy is consistent and tunable from one place. The
/// effective epsilon is an absolute base tolerance scaled by a characteristic
/// element length, which keeps the predicates scale-invariant across meshes of
/// very different size.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Tolerances {
    base: Real,
    scale: Real,
}

impl Tolerances {
    /// A tolerance policy with the given absolute base epsilon and a unit
    /// characteristic length.
    pub fn new(base: Real) -> Self {
        Tolerances { base, scale: 1.0 }
    }

    /// The same base epsilon, rescaled to the given characteristic length.
    pub fn scaled_to(self, characteristic_length: Real) -> Self {
        Tolerances {
            base: self.base,
            scale: characteristic_length.max(Real::MIN_POSITIVE),
        }
    }

    /// The effective epsilon for point-coincidence decisions.
    #[inline]
    pub fn point(&self) -> Real {
        self.base * self.scale
    }

    /// Tests whether two points are the same point under this policy.
    ///
    /// This predicate is the single source of truth for point identity: any
    /// two points closer than the effective epsilon are one identity, and the
    /// pipeline never carries two distinct point objects that satisfy it.
    #[inline]
    pub fn same_point(&self, p: &Point<Real>, q: &Point<Real>) -> bool {
        na::distance_squared(p, q) <= self.point() * self.point()
    }

    /// Classifies the position of a point along the edge `[a, b]`.
    ///
    /// Interior hits report the parametric coordinate so that callers can
    /// interpolate other quantities consistently.
    pub fn point_on_edge(
        &self,
        p: &Point<Real>,
        a: &Point<Real>,
        b: &Point<Real>,
    ) -> PointOnEdge {
        let eps = self.point();
        let ab = b - a;
        let sq_length = ab.norm_squared();

        if sq_length <= eps * eps {
            return PointOnEdge::Degenerate;
        }

        if self.same_point(p, a) {
            return PointOnEdge::AtEndpoint(0);
        }

        if self.same_point(p, b) {
            return PointOnEdge::AtEndpoint(1);
        }

        let t = (p - a).dot(&ab) / sq_length;
        let proj = a + ab * t;

        if na::distance_squared(p, &proj) > eps * eps {
            return PointOnEdge::NotOn;
        }

        if t <= 0.0 || t >= 1.0 {
            // Off the segment along its supporting line. The endpoint cases
            // were already caught by the coincidence tests above.
            return PointOnEdge::NotOn;
        }

        PointOnEdge::Interior(t)
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Tolerances::new(crate::options::DEFAULT_TOLERANCE)
    }
}
