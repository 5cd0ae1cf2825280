//! Intersection of one element edge with one cutter side.

use crate::error::CutError;
use crate::geometry::Tolerances;
use crate::math::{Matrix, Point, Real, Vector};
use crate::mesh::Side;
use crate::options::CutOptions;
use crate::shape::{self, CellType, Triangle};

/// The outcome of intersecting an element edge with a cutter side.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EdgeSideIntersection {
    /// The edge does not meet the side.
    None,
    /// A transversal cut point.
    ///
    /// The point lies simultaneously on the edge (at parametric coordinate
    /// `t ∈ [0, 1]`) and inside the side's reference domain, both within
    /// tolerance.
    Cut {
        /// The position of the cut point.
        point: Point<Real>,
        /// The parametric coordinate along the edge.
        t: Real,
    },
    /// The edge runs inside the supporting plane of the side, within
    /// tolerance. Such non-transversal contact is handled by the coincidence
    /// logic of the cut driver, never as a regular cut point.
    Coincident,
}

/// Intersects the edge `[p0, p1]` with a cutter side.
///
/// Triangle sides reduce to one linear 3×3 solve. Bilinear quad sides use a
/// Newton iteration capped at `options.newton_max_iter`; if the iteration
/// fails to converge, the quad is split into two triangles and both halves
/// are retried. The error is only escalated if that fallback is impossible
/// because a sub-triangle is degenerate.
pub fn intersect_edge_side(
    p0: &Point<Real>,
    p1: &Point<Real>,
    side: &Side,
    options: &CutOptions,
    tol: &Tolerances,
) -> Result<EdgeSideIntersection, CutError> {
    match side.cell_type() {
        CellType::Tri3 => {
            let tris = side.triangles();
            Ok(intersect_edge_triangle(p0, p1, &tris[0], tol))
        }
        _ => {
            match newton_edge_quad(p0, p1, side, options, tol) {
                NewtonOutcome::Hit(result) => return Ok(result),
                NewtonOutcome::Clean => return Ok(EdgeSideIntersection::None),
                NewtonOutcome::Diverged => (),
            }

            log::debug!(
                "newton iteration diverged on side {}, splitting into triangles",
                side.id()
            );

            let mut result = EdgeSideIntersection::None;
            for tri in side.triangles() {
                if tri.unit_normal().is_none() {
                    return Err(CutError::NonConvergent { side: side.id() });
                }

                match intersect_edge_triangle(p0, p1, &tri, tol) {
                    EdgeSideIntersection::None => (),
                    hit => {
                        result = hit;
                        break;
                    }
                }
            }

            Ok(result)
        }
    }
}

/// Intersects an edge with a triangle by solving for the plane crossing and
/// classifying the barycentric coordinates of the hit.
pub(crate) fn intersect_edge_triangle(
    p0: &Point<Real>,
    p1: &Point<Real>,
    tri: &Triangle,
    tol: &Tolerances,
) -> EdgeSideIntersection {
    let eps = tol.point();
    let dir = p1 - p0;
    let ab = tri.b - tri.a;
    let ac = tri.c - tri.a;
    let normal = ab.cross(&ac);

    let denom = normal.dot(&dir);
    let n_norm = normal.norm().max(Real::MIN_POSITIVE);
    let d_norm = dir.norm().max(Real::MIN_POSITIVE);

    if denom.abs() <= 1.0e-12 * n_norm * d_norm {
        // The edge is parallel to the side plane. Coincident contact if both
        // endpoints lie in the plane.
        let d0 = (p0 - tri.a).dot(&normal) / n_norm;
        let d1 = (p1 - tri.a).dot(&normal) / n_norm;
        if d0.abs() <= eps && d1.abs() <= eps {
            return EdgeSideIntersection::Coincident;
        }
        return EdgeSideIntersection::None;
    }

    let t = normal.dot(&(tri.a - p0)) / denom;
    let t_eps = eps / d_norm;

    if t < -t_eps || t > 1.0 + t_eps {
        return EdgeSideIntersection::None;
    }

    let hit = p0 + dir * t.clamp(0.0, 1.0);

    // Barycentric coordinates of the hit inside the triangle.
    let w = hit - tri.a;
    let d00 = ab.dot(&ab);
    let d01 = ab.dot(&ac);
    let d11 = ac.dot(&ac);
    let d20 = w.dot(&ab);
    let d21 = w.dot(&ac);
    let denom2 = d00 * d11 - d01 * d01;

    let r = (d11 * d20 - d01 * d21) / denom2;
    let s = (d00 * d21 - d01 * d20) / denom2;

    let bary_eps = eps / (d00.max(d11)).sqrt().max(Real::MIN_POSITIVE);

    if r >= -bary_eps && s >= -bary_eps && r + s <= 1.0 + bary_eps {
        EdgeSideIntersection::Cut {
            point: hit,
            t: t.clamp(0.0, 1.0),
        }
    } else {
        EdgeSideIntersection::None
    }
}

enum NewtonOutcome {
    /// Converged to a point inside edge and side domains.
    Hit(EdgeSideIntersection),
    /// Converged, but the solution lies outside the domains: a clean miss.
    Clean,
    /// No convergence within the iteration cap.
    Diverged,
}

/// Newton iteration for the intersection of an edge with a bilinear quad:
/// solve `Σ Nᵢ(r, s) xᵢ = p0 + t (p1 - p0)` for `(r, s, t)`.
fn newton_edge_quad(
    p0: &Point<Real>,
    p1: &Point<Real>,
    side: &Side,
    options: &CutOptions,
    tol: &Tolerances,
) -> NewtonOutcome {
    let eps = tol.point();
    let dir = p1 - p0;
    let nodes = side.nodes();

    let mut xi = Vector::new(0.0, 0.0, 0.5);

    for _ in 0..options.newton_max_iter {
        let local = Point::new(xi.x, xi.y, 0.0);
        let funs = shape::shape_functions(CellType::Quad4, &local);
        let grads = shape::shape_gradients(CellType::Quad4, &local);

        let mut pos = Vector::zeros();
        let mut d_r = Vector::zeros();
        let mut d_s = Vector::zeros();
        for i in 0..4 {
            pos += nodes[i].coords * funs[i];
            d_r += nodes[i].coords * grads[i].x;
            d_s += nodes[i].coords * grads[i].y;
        }

        let residual = pos - p0.coords - dir * xi.z;

        if residual.norm() <= eps {
            let t_eps = eps / dir.norm().max(Real::MIN_POSITIVE);
            let diameter = side.aabb().extents().norm().max(Real::MIN_POSITIVE);
            let ref_eps = 2.0 * eps / diameter;

            let inside = xi.x >= -1.0 - ref_eps
                && xi.x <= 1.0 + ref_eps
                && xi.y >= -1.0 - ref_eps
                && xi.y <= 1.0 + ref_eps
                && xi.z >= -t_eps
                && xi.z <= 1.0 + t_eps;

            if inside {
                let t = xi.z.clamp(0.0, 1.0);
                return NewtonOutcome::Hit(EdgeSideIntersection::Cut {
                    point: p0 + dir * t,
                    t,
                });
            }
            return NewtonOutcome::Clean;
        }

        let jac = Matrix::from_columns(&[d_r, d_s, -dir]);
        match jac.try_inverse() {
            Some(inv) => xi -= inv * residual,
            None => return NewtonOutcome::Diverged,
        }

        // Runaway iterates will not come back.
        if xi.norm() > 1.0e3 {
            return NewtonOutcome::Diverged;
        }
    }

    NewtonOutcome::Diverged
}
