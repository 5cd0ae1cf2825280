use crate::math::{Point, Real};

/// Computes the center of a set of points.
///
/// # Panics
///
/// Panics if the input slice is empty.
#[inline]
pub fn center(pts: &[Point<Real>]) -> Point<Real> {
    assert!(
        !pts.is_empty(),
        "cannot compute the center of less than 1 point"
    );

    let denom: Real = 1.0 / (pts.len() as Real);

    let mut piter = pts.iter();
    let mut res = *piter.next().unwrap() * denom;

    for pt in piter {
        res += pt.coords * denom;
    }

    res
}
