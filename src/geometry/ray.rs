use crate::math::{Point, Real, Vector};

/// A ray for the inside/outside classification of volume cells.
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    /// Starting point of the ray.
    pub origin: Point<Real>,
    /// Direction of the ray. Does not need to be normalized.
    pub dir: Vector<Real>,
}

/// The outcome of casting a ray against one cutter triangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RayCrossing {
    /// The ray does not cross the triangle.
    Miss,
    /// A clean transversal crossing.
    Hit {
        /// The parametric coordinate of the crossing along the ray.
        t: Real,
        /// The dot product between the ray direction and the triangle normal.
        ///
        /// Its sign tells on which side of the oriented cutter the ray origin
        /// lies: positive means the ray exits through the front of the
        /// triangle.
        normal_dot: Real,
    },
    /// The ray passes within tolerance of the triangle boundary, or runs
    /// within the triangle plane. The caller must re-cast with a different
    /// direction instead of trusting a parity count.
    Grazing,
}

impl Ray {
    /// Creates a new ray from an origin and a direction.
    #[inline]
    pub fn new(origin: Point<Real>, dir: Vector<Real>) -> Ray {
        Ray { origin, dir }
    }

    /// The point at parameter `t` along this ray.
    #[inline]
    pub fn point_at(&self, t: Real) -> Point<Real> {
        self.origin + self.dir * t
    }

    /// Casts this ray against the triangle `(a, b, c)`.
    ///
    /// Möller–Trumbore with explicit detection of the configurations a parity
    /// count cannot be trusted on: a crossing within `bary_eps` of an edge or
    /// vertex of the triangle, a crossing within `bary_eps` of the ray origin,
    /// and a ray direction parallel to the triangle plane while the origin
    /// lies in that plane.
    pub fn cross_triangle(
        &self,
        a: &Point<Real>,
        b: &Point<Real>,
        c: &Point<Real>,
        bary_eps: Real,
    ) -> RayCrossing {
        let ab = b - a;
        let ac = c - a;
        let normal = ab.cross(&ac);

        let pvec = self.dir.cross(&ac);
        let det = ab.dot(&pvec);

        // Scale-invariant parallelism threshold: `det` is homogeneous to
        // |dir| * area.
        let det_eps = 1.0e-12 * self.dir.norm() * normal.norm().max(Real::MIN_POSITIVE);

        if det.abs() <= det_eps {
            // Parallel. Only dangerous if the ray actually runs inside the
            // triangle plane near the triangle.
            let dist = (self.origin - a).dot(&normal);
            let plane_eps = bary_eps * normal.norm().max(Real::MIN_POSITIVE);
            if dist.abs() <= plane_eps {
                return RayCrossing::Grazing;
            }
            return RayCrossing::Miss;
        }

        let inv_det = 1.0 / det;
        let tvec = self.origin - a;
        let u = tvec.dot(&pvec) * inv_det;

        let qvec = tvec.cross(&ab);
        let v = self.dir.dot(&qvec) * inv_det;
        let t = ac.dot(&qvec) * inv_det;

        let w = 1.0 - u - v;

        if u < -bary_eps || v < -bary_eps || w < -bary_eps || t < -bary_eps {
            return RayCrossing::Miss;
        }

        if u <= bary_eps || v <= bary_eps || w <= bary_eps || t <= bary_eps {
            return RayCrossing::Grazing;
        }

        RayCrossing::Hit {
            t,
            normal_dot: self.dir.dot(&normal),
        }
    }
}
