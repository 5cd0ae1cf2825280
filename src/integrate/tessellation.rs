use crate::integrate::rules::{tet_rule, triangle_rule};
use crate::integrate::{GaussPoint, QuadratureRule};
use crate::math::Point;
use crate::mesh::{Facet, PointPool, VolumeCell};

/// Builds the tessellation integration rule of a volume cell.
///
/// A tetrahedral Gauss rule of the requested order is mapped onto every
/// integration tetrahedron of the cell. The integration cells are affine, so
/// the mapped rule is exact for polynomials up to that order.
pub fn tessellation_rule(cell: &VolumeCell, pool: &PointPool, order: u32) -> QuadratureRule {
    let reference = tet_rule(order);
    let mut points = Vec::with_capacity(cell.integration_cells().len() * reference.len());

    for ic in cell.integration_cells() {
        let tet = ic.tet(pool);
        let volume = tet.volume();

        for (bary, w) in reference {
            let coords = tet.a.coords * bary[0]
                + tet.b.coords * bary[1]
                + tet.c.coords * bary[2]
                + tet.d.coords * bary[3];

            points.push(GaussPoint {
                point: Point::from(coords),
                local: None,
                weight: w * volume,
            });
        }
    }

    QuadratureRule { points }
}

/// Builds a surface integration rule over a boundary facet.
///
/// A triangle Gauss rule of the requested order is mapped onto each triangle
/// of the facet's centroid fan; the weights carry the physical area measure.
/// Used by the finite-element caller to assemble interface terms on cut
/// facets.
pub fn facet_rule(facet: &Facet, pool: &PointPool, order: u32) -> QuadratureRule {
    let reference = triangle_rule(order);
    let triangles = facet.triangles(pool);
    let mut points = Vec::with_capacity(triangles.len() * reference.len());

    for tri in &triangles {
        let area = tri.area();

        for (bary, w) in reference {
            let coords =
                tri.a.coords * bary[0] + tri.b.coords * bary[1] + tri.c.coords * bary[2];

            points.push(GaussPoint {
                point: Point::from(coords),
                local: None,
                weight: w * area,
            });
        }
    }

    QuadratureRule { points }
}
