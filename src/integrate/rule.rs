use crate::math::{Point, Real};

/// One integration point of a quadrature rule.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct GaussPoint {
    /// The global position of the point.
    pub point: Point<Real>,
    /// The element-local position of the point, if it was attached.
    pub local: Option<Point<Real>>,
    /// The integration weight, in physical volume (or area) measure.
    pub weight: Real,
}

/// A quadrature rule over one volume cell or boundary facet.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct QuadratureRule {
    /// The integration points of the rule.
    pub points: Vec<GaussPoint>,
}

impl QuadratureRule {
    /// The number of integration points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether this rule has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The sum of all weights. For a volume rule this is the measure the
    /// rule reproduces for the constant integrand.
    pub fn total_weight(&self) -> Real {
        self.points.iter().map(|gp| gp.weight).sum()
    }

    /// Evaluates the rule on an integrand given in global coordinates.
    pub fn integrate(&self, mut f: impl FnMut(&Point<Real>) -> Real) -> Real {
        self.points.iter().map(|gp| gp.weight * f(&gp.point)).sum()
    }
}
