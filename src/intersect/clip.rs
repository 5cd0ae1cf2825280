//! Half-space clipping of polygons and convex polyhedra.
//!
//! This is the single robust primitive the tetrahedral decomposition reduces
//! every parent cell type to: clipping arbitrary hexahedra or wedges against
//! several non-axis-aligned planes directly is error-prone near edges and
//! corners, while a convex polyhedron against one half-space at a time is
//! well understood.

use crate::geometry::Plane;
use crate::math::{Point, Real};
use crate::shape::Tetrahedron;
use crate::utils;
use smallvec::SmallVec;

/// A planar polygon given by its ordered corner loop.
pub type Polygon = SmallVec<[Point<Real>; 8]>;

/// Clips `polygon` by the half-space behind `plane` (signed distance ≤ 0).
///
/// Sutherland-Hodgman with an epsilon slab: points within `eps` of the plane
/// are treated as lying on it and kept, without generating a crossing point.
pub fn clip_polygon(polygon: &[Point<Real>], plane: &Plane, eps: Real) -> Polygon {
    let mut result = Polygon::new();

    if polygon.is_empty() {
        return result;
    }

    let mut prev = polygon[polygon.len() - 1];
    let mut d_prev = plane.signed_distance(&prev);

    for pt in polygon {
        let d = plane.signed_distance(pt);

        if d <= eps {
            if d_prev > eps && d < -eps {
                // We crossed the plane, so we need to cut the edge.
                let t = d_prev / (d_prev - d);
                result.push(prev + (pt - prev) * t);
            }
            result.push(*pt);
        } else if d_prev < -eps {
            let t = d_prev / (d_prev - d);
            result.push(prev + (pt - prev) * t);
        }

        prev = *pt;
        d_prev = d;
    }

    result
}

/// A convex polyhedron represented by its planar boundary polygons.
///
/// Face orientation is not tracked; every query that needs an outward normal
/// derives it from an interior point, which is always available for a convex
/// body.
#[derive(Clone, Debug)]
pub struct ConvexPolyhedron {
    /// The boundary polygons.
    pub faces: Vec<Polygon>,
}

impl ConvexPolyhedron {
    /// The polyhedron of a tetrahedron.
    pub fn from_tetrahedron(tet: &Tetrahedron) -> ConvexPolyhedron {
        let faces = (0..4)
            .map(|i| {
                let tri = tet.face(i);
                Polygon::from_slice(&[tri.a, tri.b, tri.c])
            })
            .collect();

        ConvexPolyhedron { faces }
    }

    /// Iterates over all face corners (with repetitions across faces).
    pub fn corners(&self) -> impl Iterator<Item = &Point<Real>> {
        self.faces.iter().flatten()
    }

    /// An interior point: the centroid of all face corners.
    pub fn interior_point(&self) -> Point<Real> {
        let corners: Vec<_> = self.corners().copied().collect();
        utils::center(&corners)
    }

    /// The volume of this polyhedron, from a tetrahedron fan around an
    /// interior point.
    pub fn volume(&self) -> Real {
        let center = self.interior_point();
        let mut volume = 0.0;

        for face in &self.faces {
            for i in 1..face.len().saturating_sub(1) {
                volume +=
                    Tetrahedron::new(center, face[0], face[i], face[i + 1]).volume();
            }
        }

        volume
    }

    /// Splits this polyhedron by `plane` into its back and front pieces.
    ///
    /// A piece that degenerates (all corners within the `eps` slab of the
    /// plane, or on the wrong side) is `None`. The cap polygon closing both
    /// pieces along the plane is rebuilt from the clip crossing points.
    pub fn split(
        &self,
        plane: &Plane,
        eps: Real,
    ) -> (Option<ConvexPolyhedron>, Option<ConvexPolyhedron>) {
        let mut min_d: Real = Real::MAX;
        let mut max_d: Real = -Real::MAX;

        for pt in self.corners() {
            let d = plane.signed_distance(pt);
            min_d = min_d.min(d);
            max_d = max_d.max(d);
        }

        if max_d <= eps {
            return (Some(self.clone()), None);
        }
        if min_d >= -eps {
            return (None, Some(self.clone()));
        }

        let flipped = plane.flipped();
        let mut back_faces = Vec::with_capacity(self.faces.len() + 1);
        let mut front_faces = Vec::with_capacity(self.faces.len() + 1);
        let mut cap_points: Vec<Point<Real>> = Vec::new();

        for face in &self.faces {
            let back = clip_polygon(face, plane, eps);
            let front = clip_polygon(face, &flipped, eps);

            for pt in &back {
                if plane.signed_distance(pt).abs() <= eps
                    && !cap_points.iter().any(|q| na::distance(q, pt) <= eps)
                {
                    cap_points.push(*pt);
                }
            }

            if back.len() >= 3 {
                back_faces.push(back);
            }
            if front.len() >= 3 {
                front_faces.push(front);
            }
        }

        // Order the cap points into a polygon. The section of a convex body
        // by a plane is convex, so an angular sort around its centroid is a
        // valid ordering.
        if cap_points.len() >= 3 {
            let cap = order_convex_loop(&cap_points, plane);
            back_faces.push(cap.clone());
            front_faces.push(cap);
        }

        (
            (back_faces.len() >= 4).then(|| ConvexPolyhedron { faces: back_faces }),
            (front_faces.len() >= 4).then(|| ConvexPolyhedron { faces: front_faces }),
        )
    }
}

fn order_convex_loop(points: &[Point<Real>], plane: &Plane) -> Polygon {
    let center = utils::center(points);
    let [u, v] = plane.basis();

    let mut keyed: Vec<(ordered_float::OrderedFloat<Real>, Point<Real>)> = points
        .iter()
        .map(|p| {
            let d = p - center;
            let angle = d.dot(&v).atan2(d.dot(&u));
            (ordered_float::OrderedFloat(angle), *p)
        })
        .collect();

    keyed.sort_by_key(|(angle, _)| *angle);
    keyed.into_iter().map(|(_, p)| p).collect()
}
