//! Construction of the cut-facet regions: the parts of each cutter side that
//! actually lie inside the element being cut.

use crate::error::CutError;
use crate::geometry::{Aabb, Plane, Tolerances};
use crate::intersect::clip::clip_polygon;
use crate::math::{Point, Real, Vector};
use crate::mesh::{Element, Side};
use smallvec::SmallVec;

/// The region of one cutter side inside one element: a convex planar polygon
/// in the side's supporting plane.
///
/// Regions drive the tetrahedral clipping (their planes are the cutting
/// half-spaces) and decide which fragment faces become cut facets (a face on
/// a region plane but outside the region polygon is an artificial interface
/// and is merged away).
#[derive(Clone, Debug)]
pub struct CutFacetRegion {
    /// The index of the side in the candidate list of the element cut.
    pub side_index: u32,
    /// The caller-supplied id of the side, for diagnostics.
    pub side_id: u32,
    /// The supporting plane, oriented like the side.
    pub plane: Plane,
    /// The clipped polygon, a closed loop.
    pub polygon: Vec<Point<Real>>,
}

impl CutFacetRegion {
    /// Builds the regions of one side inside one element.
    ///
    /// A planar side yields at most one region. A warped quad is split into
    /// its two triangles first, each with its own plane, so that every region
    /// is exactly planar. Sides that merely graze the element (clipped region
    /// empty or with vanishing area) yield no region.
    pub fn build(
        side_index: u32,
        side: &Side,
        element: &Element,
        tol: &Tolerances,
    ) -> Result<Vec<CutFacetRegion>, CutError> {
        let mut polygons: SmallVec<[SmallVec<[Point<Real>; 8]>; 2]> = SmallVec::new();

        if side.is_warped() {
            for tri in side.triangles() {
                polygons.push(SmallVec::from_slice(&[tri.a, tri.b, tri.c]));
            }
        } else {
            polygons.push(side.nodes().iter().copied().collect());
        }

        let face_planes = element.face_planes();
        let eps = tol.point();
        let mut regions = Vec::new();

        for polygon in polygons {
            let plane = match Plane::from_points(&polygon) {
                Some(plane) => plane,
                // A degenerate half of a warped quad; the other half still
                // cuts.
                None => continue,
            };

            let mut clipped: SmallVec<[Point<Real>; 8]> = polygon;
            for face_plane in &face_planes {
                clipped = clip_polygon(&clipped, face_plane, eps);
                if clipped.len() < 3 {
                    break;
                }
            }

            if clipped.len() < 3 {
                continue;
            }

            // Drop exact duplicates the clipping may have produced.
            let mut points: Vec<Point<Real>> = Vec::with_capacity(clipped.len());
            for p in &clipped {
                let prev = points.last().copied();
                let first = points.first().copied();
                let dup = |q: Option<Point<Real>>| {
                    q.map(|q| tol.same_point(p, &q)).unwrap_or(false)
                };
                if !dup(prev) && !dup(first) {
                    points.push(*p);
                }
            }

            if points.len() < 3 || polygon_area(&points) <= 10.0 * eps * eps {
                // A zero-area touch, not a cut.
                continue;
            }

            // The clip happened inside the side plane; anything off it is a
            // malformed construction, not a tolerance artifact.
            for p in &points {
                if plane.signed_distance(p).abs() > 1.0e3 * eps {
                    return Err(CutError::MalformedFacet {
                        element: element.id(),
                        side: side.id(),
                    });
                }
            }

            regions.push(CutFacetRegion {
                side_index,
                side_id: side.id(),
                plane,
                polygon: points,
            });
        }

        Ok(regions)
    }

    /// The bounding box of the region polygon.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(&self.polygon)
    }

    /// Tests whether a point lies inside this region (plane slab plus convex
    /// polygon containment, both with tolerance).
    pub fn contains(&self, p: &Point<Real>, tol: &Tolerances) -> bool {
        let eps = tol.point();

        if self.plane.signed_distance(p).abs() > 4.0 * eps {
            return false;
        }

        let [u, v] = self.plane.basis();
        let origin = self.polygon[0];
        let project = |q: &Point<Real>| {
            let d = q - origin;
            (d.dot(&u), d.dot(&v))
        };

        let (px, py) = project(p);
        let mut sign = 0.0;

        for i in 0..self.polygon.len() {
            let (ax, ay) = project(&self.polygon[i]);
            let (bx, by) = project(&self.polygon[(i + 1) % self.polygon.len()]);
            let (sx, sy) = (bx - ax, by - ay);
            let seg_norm = (sx * sx + sy * sy).sqrt();

            let perp = (px - ax) * sy - (py - ay) * sx;

            if perp.abs() <= eps * seg_norm.max(Real::MIN_POSITIVE) {
                // On the boundary, counts as inside.
                continue;
            }

            if sign == 0.0 {
                sign = perp;
            } else if sign * perp < 0.0 {
                return false;
            }
        }

        true
    }
}

fn polygon_area(points: &[Point<Real>]) -> Real {
    let mut normal = Vector::zeros();
    for i in 0..points.len() {
        let a = &points[i];
        let b = &points[(i + 1) % points.len()];
        normal += (a - Point::origin()).cross(&(b - Point::origin()));
    }
    normal.norm() * 0.5
}

/// Tests whether a side lies inside an element face, within tolerance: a
/// coincident, non-transversal contact that must not generate cutting planes.
pub(crate) fn side_coincides_with_face(
    side: &Side,
    element: &Element,
    tol: &Tolerances,
) -> Option<usize> {
    let eps = tol.point();

    for (f, plane) in element.face_planes().iter().enumerate() {
        if side
            .nodes()
            .iter()
            .all(|p| plane.signed_distance(p).abs() <= eps)
        {
            return Some(f);
        }
    }

    None
}
