use crate::geometry::Tolerances;
use crate::math::{Point, Real, Vector};

/// The position of a point relative to a plane, under a tolerance policy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaneSide {
    /// On the half-space the normal points into.
    Front,
    /// On the half-space the normal points away from.
    Back,
    /// On the plane, within tolerance.
    On,
}

/// An oriented plane in Hessian normal form `normal · x = offset`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Plane {
    /// The unit normal of the plane.
    pub normal: Vector<Real>,
    /// The signed distance of the plane from the origin.
    pub offset: Real,
}

impl Plane {
    /// Builds the plane supporting the polygon described by `pts`.
    ///
    /// The normal is the Newell normal of the polygon, which stays meaningful
    /// for slightly non-planar quads. Returns `None` if the polygon has zero
    /// area (degenerate input, to be reported as such by the caller).
    pub fn from_points(pts: &[Point<Real>]) -> Option<Plane> {
        let mut normal = Vector::zeros();

        for i in 0..pts.len() {
            let a = &pts[i];
            let b = &pts[(i + 1) % pts.len()];
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
        }

        // The Newell normal has the magnitude of twice the polygon area. A
        // polygon whose area vanishes relative to its diameter has no
        // meaningful plane.
        let mut sq_diameter: Real = 0.0;
        for i in 0..pts.len() {
            let d = na::distance_squared(&pts[i], &pts[(i + 1) % pts.len()]);
            sq_diameter = sq_diameter.max(d);
        }

        let normal = normal.try_normalize(1.0e-14 * sq_diameter)?;
        let center = crate::utils::center(pts);
        Some(Plane {
            normal,
            offset: normal.dot(&center.coords),
        })
    }

    /// The signed distance from `p` to this plane, positive on the front side.
    #[inline]
    pub fn signed_distance(&self, p: &Point<Real>) -> Real {
        self.normal.dot(&p.coords) - self.offset
    }

    /// Classifies `p` relative to this plane.
    #[inline]
    pub fn side(&self, p: &Point<Real>, tol: &Tolerances) -> PlaneSide {
        let d = self.signed_distance(p);
        if d.abs() <= tol.point() {
            PlaneSide::On
        } else if d > 0.0 {
            PlaneSide::Front
        } else {
            PlaneSide::Back
        }
    }

    /// Tests whether all the given points lie on this plane within tolerance.
    pub fn contains_all(&self, pts: &[Point<Real>], tol: &Tolerances) -> bool {
        pts.iter().all(|p| self.side(p, tol) == PlaneSide::On)
    }

    /// An orthonormal basis of the plane, for 2-D projections.
    pub fn basis(&self) -> [Vector<Real>; 2] {
        let u = if self.normal.x.abs() > self.normal.y.abs() {
            Vector::new(-self.normal.z, 0.0, self.normal.x).normalize()
        } else {
            Vector::new(0.0, self.normal.z, -self.normal.y).normalize()
        };
        let v = self.normal.cross(&u);
        [u, v]
    }

    /// The same plane with a flipped orientation.
    #[inline]
    pub fn flipped(&self) -> Plane {
        Plane {
            normal: -self.normal,
            offset: -self.offset,
        }
    }
}
