use crate::math::{Point, Real};
use crate::mesh::{PointId, PointPool};
use crate::geometry::Plane;
use crate::shape::Triangle;
use crate::utils;

/// The index of a facet inside an element cut result.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct FacetId(pub u32);

impl FacetId {
    /// This id as an index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a facet lies on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum FacetOrigin {
    /// The facet lies on a cutter side; the payload is the internal index of
    /// that side.
    CutSide(u32),
    /// The facet lies on an element face; the payload is the local face index.
    ElementFace(usize),
}

/// A closed planar polygon bounding one side of a volume cell.
///
/// Cut facets (those with a [`FacetOrigin::CutSide`] origin) are shared by
/// the two cells the cutter separates; element-boundary facets belong to one
/// cell and the element boundary.
#[derive(Clone, Debug)]
pub struct Facet {
    points: Vec<PointId>,
    origin: FacetOrigin,
    plane: Plane,
}

impl Facet {
    /// Creates a facet from an ordered closed point loop (the closing edge
    /// from the last to the first point is implicit).
    pub fn new(points: Vec<PointId>, origin: FacetOrigin, plane: Plane) -> Facet {
        debug_assert!(points.len() >= 3);
        Facet {
            points,
            origin,
            plane,
        }
    }

    /// The ordered point loop of this facet.
    #[inline]
    pub fn points(&self) -> &[PointId] {
        &self.points
    }

    /// What this facet lies on.
    #[inline]
    pub fn origin(&self) -> FacetOrigin {
        self.origin
    }

    /// The supporting plane of this facet.
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// The coordinates of the facet corners.
    pub fn coords(&self, pool: &PointPool) -> Vec<Point<Real>> {
        self.points.iter().map(|&p| pool[p]).collect()
    }

    /// The centroid of the facet corners.
    pub fn centroid(&self, pool: &PointPool) -> Point<Real> {
        utils::center(&self.coords(pool))
    }

    /// A triangulation of this facet, as a fan around its centroid.
    ///
    /// The triangles preserve the winding of the point loop.
    pub fn triangles(&self, pool: &PointPool) -> Vec<Triangle> {
        let coords = self.coords(pool);
        let center = utils::center(&coords);

        (0..coords.len())
            .map(|i| Triangle::new(center, coords[i], coords[(i + 1) % coords.len()]))
            .collect()
    }

    /// The area of this facet.
    pub fn area(&self, pool: &PointPool) -> Real {
        self.triangles(pool).iter().map(|t| t.area()).sum()
    }
}
