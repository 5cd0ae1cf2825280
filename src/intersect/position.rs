//! Inside/outside classification of volume cells, by casting rays from an
//! interior sample point against the oriented cutter sides.

use crate::error::CutError;
use crate::geometry::{Ray, RayCrossing, Tolerances};
use crate::math::{Point, Real, Vector};
use crate::mesh::{Element, PointPool, Position, Side, VolumeCell};

/// The fixed, deterministic direction table the classification walks through.
/// Axis directions first, then diagonals and two skew directions unlikely to
/// graze anything twice.
const RAY_DIRECTIONS: [[Real; 3]; 12] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, -1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [0.577, 0.211, 0.953],
    [0.311, 0.871, 0.107],
];

enum CastOutcome {
    /// The nearest clean crossing, with the sign of `dir · side_normal`.
    Hit(Real),
    /// No crossing at all in this direction.
    Miss,
    /// Some crossing grazed a side vertex or edge; the direction cannot be
    /// trusted.
    Ambiguous,
}

/// Classifies every cell of an element cut.
///
/// Every cell receives exactly one of `Inside`/`Outside`; exhausting the ray
/// budget on a cell is a hard error carrying the sample point, since an
/// unclassified cell would corrupt the caller's integral assembly.
pub(crate) fn classify_cells(
    cells: &mut [VolumeCell],
    pool: &PointPool,
    element: &Element,
    candidates: &[&Side],
    budget: u32,
    tol: &Tolerances,
) -> Result<(), CutError> {
    for cell in cells.iter_mut() {
        let sample = cell.interior_point(pool);
        let position = classify_point(&sample, candidates, budget, tol).ok_or(
            CutError::PositionUndecided {
                element: element.id(),
                sample,
                attempts: budget,
            },
        )?;
        cell.set_position(position);
    }

    Ok(())
}

/// Classifies a single sample point against the oriented cutter sides.
///
/// The nearest clean crossing decides: a cutter whose normal points back
/// toward the sample puts the sample in front of the interface (`Outside`),
/// away from it puts the sample behind (`Inside`). For a closed oriented
/// cutter this agrees with the even/odd crossing-parity rule, and it extends
/// to open cutter surfaces where a global parity is direction-dependent.
///
/// Returns `None` when every direction in the budget grazed a side vertex or
/// edge.
pub(crate) fn classify_point(
    sample: &Point<Real>,
    candidates: &[&Side],
    budget: u32,
    tol: &Tolerances,
) -> Option<Position> {
    if candidates.is_empty() {
        return Some(Position::Outside);
    }

    let budget = (budget as usize).clamp(1, RAY_DIRECTIONS.len());
    let mut clean_miss = false;

    for dir in &RAY_DIRECTIONS[..budget] {
        let ray = Ray::new(*sample, Vector::new(dir[0], dir[1], dir[2]));

        match cast(&ray, candidates, tol) {
            CastOutcome::Hit(normal_dot) => {
                return Some(if normal_dot > 0.0 {
                    Position::Inside
                } else {
                    Position::Outside
                });
            }
            CastOutcome::Miss => clean_miss = true,
            CastOutcome::Ambiguous => (),
        }
    }

    // No direction ever crossed the cutter: the sample is away from the
    // interface on its open side.
    clean_miss.then_some(Position::Outside)
}

fn cast(ray: &Ray, sides: &[&Side], tol: &Tolerances) -> CastOutcome {
    let mut nearest: Option<(Real, Real)> = None;

    for side in sides {
        for tri in side.triangles() {
            let diameter = (tri.b - tri.a)
                .norm()
                .max((tri.c - tri.a).norm())
                .max(Real::MIN_POSITIVE);
            let bary_eps = (tol.point() / diameter).clamp(1.0e-12, 1.0e-6);

            match ray.cross_triangle(&tri.a, &tri.b, &tri.c, bary_eps) {
                RayCrossing::Miss => (),
                RayCrossing::Grazing => return CastOutcome::Ambiguous,
                RayCrossing::Hit { t, normal_dot } => {
                    if nearest.map(|(bt, _)| t < bt).unwrap_or(true) {
                        nearest = Some((t, normal_dot));
                    }
                }
            }
        }
    }

    match nearest {
        Some((_, normal_dot)) => CastOutcome::Hit(normal_dot),
        None => CastOutcome::Miss,
    }
}
