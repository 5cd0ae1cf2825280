use crate::error::CutError;
use crate::geometry::{Aabb, Plane, Tolerances};
use crate::math::{Point, Real};
use crate::shape::{CellType, Triangle};
use arrayvec::ArrayVec;

/// A cutter facet: a triangle or a bilinear quad of the embedded interface.
///
/// Sides are immutable once constructed, so many elements can be cut
/// concurrently against shared `&Side` references.
#[derive(Clone, Debug)]
pub struct Side {
    id: u32,
    cell_type: CellType,
    nodes: ArrayVec<Point<Real>, 4>,
    plane: Plane,
    warped: bool,
    aabb: Aabb,
}

impl Side {
    /// Builds a cutter side from its corner coordinates.
    ///
    /// The orientation of the node loop defines the side normal; the cutter
    /// normal is the front of the interface, and volume cells behind it are
    /// classified as inside.
    pub fn new(
        id: u32,
        coords: &[Point<Real>],
        cell_type: CellType,
        tol: &Tolerances,
    ) -> Result<Side, CutError> {
        if !cell_type.is_surface() {
            return Err(CutError::UnsupportedCellType {
                given: cell_type,
                expected: "tri3, quad4",
            });
        }

        if coords.len() != cell_type.num_nodes() {
            return Err(CutError::WrongNodeCount {
                cell_type,
                expected: cell_type.num_nodes(),
                got: coords.len(),
            });
        }

        let plane = Plane::from_points(coords).ok_or(CutError::DegenerateGeometry {
            entity: "side",
            id,
        })?;

        // A side with an edge collapsed to a point is degenerate even if its
        // Newell plane exists.
        for i in 0..coords.len() {
            let j = (i + 1) % coords.len();
            if tol.same_point(&coords[i], &coords[j]) {
                return Err(CutError::DegenerateGeometry {
                    entity: "side",
                    id,
                });
            }
        }

        let warped = cell_type == CellType::Quad4 && !plane.contains_all(coords, tol);

        Ok(Side {
            id,
            cell_type,
            nodes: coords.iter().copied().collect(),
            plane,
            warped,
            aabb: Aabb::from_points(coords),
        })
    }

    /// The caller-supplied id of this side, tracing which physical interface
    /// it belongs to.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The cell type of this side.
    #[inline]
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    /// The corner coordinates of this side.
    #[inline]
    pub fn nodes(&self) -> &[Point<Real>] {
        &self.nodes
    }

    /// The supporting plane of this side (Newell plane for quads).
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Whether this side is a quad that is non-planar within tolerance.
    #[inline]
    pub fn is_warped(&self) -> bool {
        self.warped
    }

    /// The bounding box of this side.
    #[inline]
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// A triangle view of this side, for ray casting and clipping.
    ///
    /// Triangles preserve the side orientation. Quads are split along the
    /// 0-2 diagonal.
    pub fn triangles(&self) -> ArrayVec<Triangle, 2> {
        let mut out = ArrayVec::new();

        match self.cell_type {
            CellType::Tri3 => {
                out.push(Triangle::new(self.nodes[0], self.nodes[1], self.nodes[2]));
            }
            _ => {
                out.push(Triangle::new(self.nodes[0], self.nodes[1], self.nodes[2]));
                out.push(Triangle::new(self.nodes[0], self.nodes[2], self.nodes[3]));
            }
        }

        out
    }
}
