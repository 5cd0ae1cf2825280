//! Isoparametric mappings between reference and global coordinates.
//!
//! Reference domains follow the usual finite-element conventions: `[-1, 1]`
//! intervals for hex/quad/wedge-thickness/pyramid coordinates, barycentric
//! simplex coordinates for triangles and tetrahedra. The pyramid uses the
//! collapsed-hexahedron parametrization (top face merged into the apex).

use crate::math::{Matrix, Point, Real, Vector};
use crate::shape::CellType;
use arrayvec::ArrayVec;

/// The shape function values of `cell` at the reference coordinate `xi`.
///
/// Surface cells ignore `xi.z`.
pub fn shape_functions(cell: CellType, xi: &Point<Real>) -> ArrayVec<Real, 8> {
    let (r, s, t) = (xi.x, xi.y, xi.z);
    let mut out = ArrayVec::new();

    match cell {
        CellType::Tri3 => {
            out.extend([1.0 - r - s, r, s]);
        }
        CellType::Quad4 => {
            out.extend([
                0.25 * (1.0 - r) * (1.0 - s),
                0.25 * (1.0 + r) * (1.0 - s),
                0.25 * (1.0 + r) * (1.0 + s),
                0.25 * (1.0 - r) * (1.0 + s),
            ]);
        }
        CellType::Tet4 => {
            out.extend([1.0 - r - s - t, r, s, t]);
        }
        CellType::Hex8 => {
            out.extend([
                0.125 * (1.0 - r) * (1.0 - s) * (1.0 - t),
                0.125 * (1.0 + r) * (1.0 - s) * (1.0 - t),
                0.125 * (1.0 + r) * (1.0 + s) * (1.0 - t),
                0.125 * (1.0 - r) * (1.0 + s) * (1.0 - t),
                0.125 * (1.0 - r) * (1.0 - s) * (1.0 + t),
                0.125 * (1.0 + r) * (1.0 - s) * (1.0 + t),
                0.125 * (1.0 + r) * (1.0 + s) * (1.0 + t),
                0.125 * (1.0 - r) * (1.0 + s) * (1.0 + t),
            ]);
        }
        CellType::Wedge6 => {
            out.extend([
                0.5 * (1.0 - r - s) * (1.0 - t),
                0.5 * r * (1.0 - t),
                0.5 * s * (1.0 - t),
                0.5 * (1.0 - r - s) * (1.0 + t),
                0.5 * r * (1.0 + t),
                0.5 * s * (1.0 + t),
            ]);
        }
        CellType::Pyramid5 => {
            out.extend([
                0.125 * (1.0 - r) * (1.0 - s) * (1.0 - t),
                0.125 * (1.0 + r) * (1.0 - s) * (1.0 - t),
                0.125 * (1.0 + r) * (1.0 + s) * (1.0 - t),
                0.125 * (1.0 - r) * (1.0 + s) * (1.0 - t),
                0.5 * (1.0 + t),
            ]);
        }
    }

    out
}

/// The reference-coordinate gradients of the shape functions of `cell` at `xi`.
pub fn shape_gradients(cell: CellType, xi: &Point<Real>) -> ArrayVec<Vector<Real>, 8> {
    let (r, s, t) = (xi.x, xi.y, xi.z);
    let mut out = ArrayVec::new();

    match cell {
        CellType::Tri3 => {
            out.extend([
                Vector::new(-1.0, -1.0, 0.0),
                Vector::new(1.0, 0.0, 0.0),
                Vector::new(0.0, 1.0, 0.0),
            ]);
        }
        CellType::Quad4 => {
            out.extend([
                Vector::new(-0.25 * (1.0 - s), -0.25 * (1.0 - r), 0.0),
                Vector::new(0.25 * (1.0 - s), -0.25 * (1.0 + r), 0.0),
                Vector::new(0.25 * (1.0 + s), 0.25 * (1.0 + r), 0.0),
                Vector::new(-0.25 * (1.0 + s), 0.25 * (1.0 - r), 0.0),
            ]);
        }
        CellType::Tet4 => {
            out.extend([
                Vector::new(-1.0, -1.0, -1.0),
                Vector::new(1.0, 0.0, 0.0),
                Vector::new(0.0, 1.0, 0.0),
                Vector::new(0.0, 0.0, 1.0),
            ]);
        }
        CellType::Hex8 => {
            let signs: [(Real, Real, Real); 8] = [
                (-1.0, -1.0, -1.0),
                (1.0, -1.0, -1.0),
                (1.0, 1.0, -1.0),
                (-1.0, 1.0, -1.0),
                (-1.0, -1.0, 1.0),
                (1.0, -1.0, 1.0),
                (1.0, 1.0, 1.0),
                (-1.0, 1.0, 1.0),
            ];
            for (sr, ss, st) in signs {
                out.push(Vector::new(
                    0.125 * sr * (1.0 + ss * s) * (1.0 + st * t),
                    0.125 * (1.0 + sr * r) * ss * (1.0 + st * t),
                    0.125 * (1.0 + sr * r) * (1.0 + ss * s) * st,
                ));
            }
        }
        CellType::Wedge6 => {
            out.extend([
                Vector::new(-0.5 * (1.0 - t), -0.5 * (1.0 - t), -0.5 * (1.0 - r - s)),
                Vector::new(0.5 * (1.0 - t), 0.0, -0.5 * r),
                Vector::new(0.0, 0.5 * (1.0 - t), -0.5 * s),
                Vector::new(-0.5 * (1.0 + t), -0.5 * (1.0 + t), 0.5 * (1.0 - r - s)),
                Vector::new(0.5 * (1.0 + t), 0.0, 0.5 * r),
                Vector::new(0.0, 0.5 * (1.0 + t), 0.5 * s),
            ]);
        }
        CellType::Pyramid5 => {
            let signs: [(Real, Real); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
            for (sr, ss) in signs {
                out.push(Vector::new(
                    0.125 * sr * (1.0 + ss * s) * (1.0 - t),
                    0.125 * (1.0 + sr * r) * ss * (1.0 - t),
                    -0.125 * (1.0 + sr * r) * (1.0 + ss * s),
                ));
            }
            out.push(Vector::new(0.0, 0.0, 0.5));
        }
    }

    out
}

/// The center of the reference domain of `cell`.
pub fn reference_center(cell: CellType) -> Point<Real> {
    match cell {
        CellType::Tri3 | CellType::Wedge6 => Point::new(1.0 / 3.0, 1.0 / 3.0, 0.0),
        CellType::Tet4 => Point::new(0.25, 0.25, 0.25),
        CellType::Quad4 | CellType::Hex8 | CellType::Pyramid5 => Point::origin(),
    }
}

/// Tests whether `xi` lies inside the reference domain of `cell`, within `eps`.
pub fn reference_contains(cell: CellType, xi: &Point<Real>, eps: Real) -> bool {
    let (r, s, t) = (xi.x, xi.y, xi.z);
    let in_unit = |v: Real| v >= -1.0 - eps && v <= 1.0 + eps;

    match cell {
        CellType::Tri3 => r >= -eps && s >= -eps && r + s <= 1.0 + eps,
        CellType::Quad4 => in_unit(r) && in_unit(s),
        CellType::Tet4 => r >= -eps && s >= -eps && t >= -eps && r + s + t <= 1.0 + eps,
        CellType::Hex8 | CellType::Pyramid5 => in_unit(r) && in_unit(s) && in_unit(t),
        CellType::Wedge6 => r >= -eps && s >= -eps && r + s <= 1.0 + eps && in_unit(t),
    }
}

/// The local face index whose reference constraint `xi` satisfies within
/// `eps`, if any.
///
/// Face indices follow [`CellType::faces`]. If `xi` satisfies several face
/// constraints (a point on an element edge or corner), the closest one wins.
pub fn boundary_face(cell: CellType, xi: &Point<Real>, eps: Real) -> Option<usize> {
    let (r, s, t) = (xi.x, xi.y, xi.z);

    // Distance of `xi` to each face constraint, in face-table order.
    let mut distances: ArrayVec<Real, 6> = ArrayVec::new();
    match cell {
        CellType::Hex8 => distances.extend([
            (t + 1.0).abs(),
            (t - 1.0).abs(),
            (s + 1.0).abs(),
            (r - 1.0).abs(),
            (s - 1.0).abs(),
            (r + 1.0).abs(),
        ]),
        CellType::Tet4 => distances.extend([
            t.abs(),
            s.abs(),
            (1.0 - r - s - t).abs(),
            r.abs(),
        ]),
        CellType::Wedge6 => distances.extend([
            (t + 1.0).abs(),
            (t - 1.0).abs(),
            s.abs(),
            (1.0 - r - s).abs(),
            r.abs(),
        ]),
        CellType::Pyramid5 => distances.extend([
            (t + 1.0).abs(),
            (s + 1.0).abs(),
            (r - 1.0).abs(),
            (s - 1.0).abs(),
            (r + 1.0).abs(),
        ]),
        CellType::Tri3 | CellType::Quad4 => return None,
    }

    let mut best = None;
    for (i, d) in distances.iter().enumerate() {
        if *d <= eps && best.map(|(_, bd)| *d < bd).unwrap_or(true) {
            best = Some((i, *d));
        }
    }

    best.map(|(i, _)| i)
}

/// Maps the reference coordinate `xi` to global coordinates.
pub fn map_to_global(cell: CellType, nodes: &[Point<Real>], xi: &Point<Real>) -> Point<Real> {
    let funs = shape_functions(cell, xi);
    let mut out = Vector::zeros();

    for (n, node) in funs.iter().zip(nodes.iter()) {
        out += node.coords * *n;
    }

    Point::from(out)
}

/// Inverts the isoparametric map of `cell` at the global point `p` by Newton
/// iteration.
///
/// Returns `None` if the iteration does not converge within `max_iter` steps
/// or runs into a singular Jacobian. Convergence does not imply the result
/// lies inside the reference domain; check with [`reference_contains`].
pub fn map_to_local(
    cell: CellType,
    nodes: &[Point<Real>],
    p: &Point<Real>,
    max_iter: u32,
    tol: Real,
) -> Option<Point<Real>> {
    let mut xi = reference_center(cell);

    for _ in 0..max_iter {
        let residual = map_to_global(cell, nodes, &xi) - p;

        if residual.norm() <= tol {
            return Some(xi);
        }

        let grads = shape_gradients(cell, &xi);
        let mut jac = Matrix::zeros();

        for (g, node) in grads.iter().zip(nodes.iter()) {
            jac += node.coords * g.transpose();
        }

        let inv = jac.try_inverse()?;
        xi -= inv * residual;
    }

    None
}
