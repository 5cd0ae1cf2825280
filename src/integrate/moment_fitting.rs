use crate::integrate::rules::triangle_rule;
use crate::integrate::{tessellation_rule, GaussPoint, QuadratureRule};
use crate::math::{Point, Real, Vector};
use crate::mesh::{Facet, PointPool, VolumeCell};
use na::{DMatrix, DVector};

/// Builds a moment-fitted integration rule of a volume cell.
///
/// The point set is taken from the tessellation rule; the weights are re-fit
/// by least squares so that all monomial moments up to `order`, computed
/// exactly from the boundary facets by the divergence theorem, are
/// reproduced. Moments and monomials are evaluated in a normalized cell
/// frame to keep the fitting system well conditioned.
///
/// Falls back to the plain tessellation rule if the fitting system cannot be
/// solved.
pub fn moment_fitting_rule(
    cell: &VolumeCell,
    facets: &[Facet],
    pool: &PointPool,
    order: u32,
) -> QuadratureRule {
    let tessellation = tessellation_rule(cell, pool, order);
    if tessellation.is_empty() {
        return tessellation;
    }

    let exponents = monomial_exponents(order);

    // The normalized cell frame.
    let mut mins = Vector::repeat(Real::MAX);
    let mut maxs = Vector::repeat(-Real::MAX);
    for &fid in cell.facets() {
        for &pid in facets[fid.index()].points() {
            let p = pool[pid];
            mins = mins.inf(&p.coords);
            maxs = maxs.sup(&p.coords);
        }
    }
    let center = Point::from((mins + maxs) * 0.5);
    let scale = (maxs - mins).max().max(Real::MIN_POSITIVE);

    let moments = boundary_moments(cell, facets, pool, &exponents, &center, scale, order);

    let rows = exponents.len();
    let cols = tessellation.len();

    let system = DMatrix::from_fn(rows, cols, |i, j| {
        let u = (tessellation.points[j].point - center) / scale;
        monomial(&exponents[i], &u)
    });
    let rhs = DVector::from_iterator(rows, moments.iter().copied());

    let svd = system.svd(true, true);
    match svd.solve(&rhs, 1.0e-12) {
        Ok(weights) => {
            let points = tessellation
                .points
                .iter()
                .zip(weights.iter())
                .map(|(gp, &w)| GaussPoint {
                    point: gp.point,
                    local: None,
                    weight: w,
                })
                .collect();
            QuadratureRule { points }
        }
        Err(_) => {
            log::warn!("moment fitting failed, falling back to tessellation");
            tessellation
        }
    }
}

/// All monomial exponent triples with total degree up to `order`.
fn monomial_exponents(order: u32) -> Vec<[u32; 3]> {
    let mut out = Vec::new();
    for total in 0..=order {
        for a in 0..=total {
            for b in 0..=(total - a) {
                out.push([a, b, total - a - b]);
            }
        }
    }
    out
}

fn monomial(exp: &[u32; 3], u: &Vector<Real>) -> Real {
    u.x.powi(exp[0] as i32) * u.y.powi(exp[1] as i32) * u.z.powi(exp[2] as i32)
}

/// The exact monomial moments of the cell in the normalized frame, from its
/// boundary facets by the divergence theorem.
fn boundary_moments(
    cell: &VolumeCell,
    facets: &[Facet],
    pool: &PointPool,
    exponents: &[[u32; 3]],
    center: &Point<Real>,
    scale: Real,
    order: u32,
) -> Vec<Real> {
    // The surface integrand of a degree-k moment has degree k + 1.
    let surface = triangle_rule(order + 1);

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

    let u_ref = (mins_x(cell, facets, pool) - center.x) / scale;
    let mut moments = vec![0.0; exponents.len()];

    for &fid in cell.facets() {
        let facet = &facets[fid.index()];

        let mut normal = facet.plane().normal;
        if normal.dot(&(facet.centroid(pool) - centroid)) < 0.0 {
            normal = -normal;
        }

        if normal.x.abs() <= 1.0e-14 {
            continue;
        }

        for tri in facet.triangles(pool) {
            let area = tri.area();

            for (bary, ws) in surface {
                let coords =
                    tri.a.coords * bary[0] + tri.b.coords * bary[1] + tri.c.coords * bary[2];
                let u = (coords - center.coords) / scale;
                let surface_weight = ws * area * normal.x;

                for (i, exp) in exponents.iter().enumerate() {
                    // ∫ u_x^a du_x from u_ref to u.x, in closed form. The
                    // extra `scale` factor converts the normalized interior
                    // coordinate back to physical length.
                    let a = exp[0] as i32;
                    let antiderivative =
                        (u.x.powi(a + 1) - u_ref.powi(a + 1)) / (a + 1) as Real * scale;

                    moments[i] += surface_weight
                        * antiderivative
                        * u.y.powi(exp[1] as i32)
                        * u.z.powi(exp[2] as i32);
                }
            }
        }
    }

    moments
}

fn mins_x(cell: &VolumeCell, facets: &[Facet], pool: &PointPool) -> Real {
    cell.facets()
        .iter()
        .flat_map(|&fid| facets[fid.index()].points())
        .map(|&pid| pool[pid].x)
        .fold(Real::MAX, Real::min)
}
