use crate::integrate::rules::{line_rule, triangle_rule};
use crate::integrate::{GaussPoint, QuadratureRule};
use crate::math::{Point, Real, Vector};
use crate::mesh::{Facet, PointPool, VolumeCell};

/// Builds the direct-divergence integration rule of a volume cell.
///
/// The volume integral is rewritten with the divergence theorem as a sum of
/// boundary-facet integrals of interior line integrals taken along the x
/// direction from a reference plane:
///
/// `∫_V f dV = ∮_S n_x ∫_{x_ref}^{x} f(ξ, y, z) dξ dA`
///
/// Each facet Gauss point spawns the 1-D Gauss points of its integration
/// line; those interior points, weighted by facet area, outward normal
/// x-component and line length, are the emitted volume Gauss points. Compared
/// to tessellation this avoids amplifying round-off on cells with many very
/// thin integration tetrahedra.
pub fn direct_divergence_rule(
    cell: &VolumeCell,
    facets: &[Facet],
    pool: &PointPool,
    order: u32,
) -> QuadratureRule {
    // The surface integrand carries one extra polynomial degree from the
    // interior line integral.
    let surface = triangle_rule(order + 1);
    let line = line_rule(order);

    // Volume-weighted centroid, used to orient facet normals outward.
    let mut centroid = Vector::zeros();
    let mut volume = 0.0;
    for ic in cell.integration_cells() {
        let tet = ic.tet(pool);
        let v = tet.volume();
        centroid += tet.center().coords * v;
        volume += v;
    }
    let centroid = Point::from(centroid / volume.max(Real::MIN_POSITIVE));

    // The reference plane may be any x = const plane; the element box lower
    // bound keeps the integration lines short.
    let x_ref = cell
        .facets()
        .iter()
        .flat_map(|&fid| facets[fid.index()].points())
        .map(|&pid| pool[pid].x)
        .fold(Real::MAX, Real::min);

    let mut points = Vec::new();

    for &fid in cell.facets() {
        let facet = &facets[fid.index()];

        let mut normal = facet.plane().normal;
        if normal.dot(&(facet.centroid(pool) - centroid)) < 0.0 {
            normal = -normal;
        }

        if normal.x.abs() <= 1.0e-14 {
            // The facet is parallel to the integration direction and does
            // not contribute.
            continue;
        }

        for tri in facet.triangles(pool) {
            let area = tri.area();

            for (bary, ws) in surface {
                let coords =
                    tri.a.coords * bary[0] + tri.b.coords * bary[1] + tri.c.coords * bary[2];
                let surface_weight = ws * area * normal.x;
                let length = coords.x - x_ref;

                for (g, wl) in line {
                    points.push(GaussPoint {
                        point: Point::new(x_ref + length * g, coords.y, coords.z),
                        local: None,
                        weight: surface_weight * length * wl,
                    });
                }
            }
        }
    }

    QuadratureRule { points }
}
