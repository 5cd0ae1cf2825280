use crate::error::CutError;
use crate::geometry::{Aabb, Plane, Tolerances};
use crate::math::{Point, Real};
use crate::shape::{self, CellType, Tetrahedron};
use crate::utils;
use smallvec::SmallVec;

/// A background cell being cut.
#[derive(Clone, Debug)]
pub struct Element {
    id: u32,
    cell_type: CellType,
    nodes: Vec<Point<Real>>,
    aabb: Aabb,
}

impl Element {
    /// Builds a background element from its corner coordinates.
    pub fn new(id: u32, coords: &[Point<Real>], cell_type: CellType) -> Result<Element, CutError> {
        if !cell_type.is_volume() {
            return Err(CutError::UnsupportedCellType {
                given: cell_type,
                expected: "hex8, tet4, wedge6, pyramid5",
            });
        }

        if coords.len() != cell_type.num_nodes() {
            return Err(CutError::WrongNodeCount {
                cell_type,
                expected: cell_type.num_nodes(),
                got: coords.len(),
            });
        }

        let elem = Element {
            id,
            cell_type,
            nodes: coords.to_vec(),
            aabb: Aabb::from_points(coords),
        };

        // A collapsed element cannot be decomposed meaningfully.
        let scale = elem.characteristic_length();
        if elem.volume() <= 1.0e-14 * scale * scale * scale {
            return Err(CutError::DegenerateGeometry {
                entity: "element",
                id,
            });
        }

        Ok(elem)
    }

    /// The caller-supplied id of this element.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The cell type of this element.
    #[inline]
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    /// The corner coordinates of this element.
    #[inline]
    pub fn nodes(&self) -> &[Point<Real>] {
        &self.nodes
    }

    /// The bounding box of this element.
    #[inline]
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// The characteristic length used to scale the tolerance policy.
    #[inline]
    pub fn characteristic_length(&self) -> Real {
        self.aabb.extents().norm()
    }

    /// The center of this element.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        utils::center(&self.nodes)
    }

    /// The corner coordinates of the edge with the given local index.
    #[inline]
    pub fn edge(&self, i: usize) -> (Point<Real>, Point<Real>) {
        let [a, b] = self.cell_type.edges()[i];
        (self.nodes[a], self.nodes[b])
    }

    /// The corner coordinates of the face with the given local index, ordered
    /// so the face normal points out of the element.
    pub fn face(&self, i: usize) -> SmallVec<[Point<Real>; 4]> {
        self.cell_type.faces()[i]
            .iter()
            .map(|&n| self.nodes[n])
            .collect()
    }

    /// The supporting planes of all element faces, outward oriented.
    ///
    /// Faces of a warped hexahedron use their Newell plane, which is the
    /// plane their corner points straddle within tolerance.
    pub fn face_planes(&self) -> SmallVec<[Plane; 6]> {
        (0..self.cell_type.faces().len())
            .map(|i| {
                let face = self.face(i);
                // The element was validated non-degenerate, so every face has
                // a supporting plane.
                Plane::from_points(&face).expect("degenerate element face")
            })
            .collect()
    }

    /// The volume of this element, from its coarse reference decomposition.
    pub fn volume(&self) -> Real {
        self.decomposition_tets(false)
            .iter()
            .map(|tet| tet.volume())
            .sum()
    }

    /// The sub-tetrahedra of the selected reference decomposition.
    pub fn decomposition_tets(&self, fine: bool) -> Vec<Tetrahedron> {
        let table = shape::decomposition(self.cell_type, fine);

        table
            .iter()
            .map(|idx| {
                Tetrahedron::new(
                    self.decomposition_point(idx[0]),
                    self.decomposition_point(idx[1]),
                    self.decomposition_point(idx[2]),
                    self.decomposition_point(idx[3]),
                )
            })
            .collect()
    }

    fn decomposition_point(&self, idx: usize) -> Point<Real> {
        if idx < self.nodes.len() {
            self.nodes[idx]
        } else if idx == shape::DECOMPOSITION_BODY_CENTER {
            self.center()
        } else {
            let face = self.face(idx - 8);
            utils::center(&face)
        }
    }

    /// Whether the given point lies on the element boundary or inside it,
    /// within tolerance.
    pub fn contains(&self, p: &Point<Real>, tol: &Tolerances) -> bool {
        match shape::map_to_local(self.cell_type, &self.nodes, p, 20, tol.point()) {
            Some(xi) => {
                // Reference-domain epsilon, from the global epsilon and the
                // element extent.
                let scale = self.characteristic_length().max(Real::MIN_POSITIVE);
                let eps = 1.0e-10 + 4.0 * tol.point() / scale;
                shape::reference_contains(self.cell_type, &xi, eps)
            }
            None => false,
        }
    }

    /// The element-local coordinate of a global point, by Newton inversion of
    /// the isoparametric map.
    pub fn local_coordinates(&self, p: &Point<Real>, tol: &Tolerances) -> Option<Point<Real>> {
        shape::map_to_local(self.cell_type, &self.nodes, p, 30, tol.point())
    }

    /// The local index of the element face the given point lies on, if any.
    ///
    /// Works through the isoparametric map, so it stays exact on the bilinear
    /// faces of warped hexahedra where a plane test would not.
    pub fn boundary_face_at(&self, p: &Point<Real>, tol: &Tolerances) -> Option<usize> {
        let xi = shape::map_to_local(self.cell_type, &self.nodes, p, 30, tol.point())?;
        let scale = self.characteristic_length().max(Real::MIN_POSITIVE);
        let eps = 1.0e-9 + 4.0 * tol.point() / scale;
        shape::boundary_face(self.cell_type, &xi, eps)
    }
}

#[cfg(test)]
mod test {
    use super::Element;
    use crate::error::CutError;
    use crate::geometry::Tolerances;
    use crate::math::Point;
    use crate::shape::CellType;

    fn unit_hex_coords() -> Vec<Point<f64>> {
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, 1.0),
            Point::new(1.0, 1.0, 1.0),
            Point::new(0.0, 1.0, 1.0),
        ]
    }

    #[test]
    fn hex_volume_and_faces() {
        let elem = Element::new(1, &unit_hex_coords(), CellType::Hex8).unwrap();

        assert_relative_eq!(elem.volume(), 1.0, epsilon = 1.0e-12);
        assert_eq!(elem.face_planes().len(), 6);

        // All face planes point away from the center.
        for plane in elem.face_planes() {
            assert!(plane.signed_distance(&elem.center()) < 0.0);
        }
    }

    #[test]
    fn flat_element_is_degenerate() {
        let mut coords = unit_hex_coords();
        for c in &mut coords {
            c.z = 0.0;
        }

        assert_eq!(
            Element::new(7, &coords, CellType::Hex8).unwrap_err(),
            CutError::DegenerateGeometry {
                entity: "element",
                id: 7
            }
        );
    }

    #[test]
    fn containment() {
        let elem = Element::new(1, &unit_hex_coords(), CellType::Hex8).unwrap();
        let tol = Tolerances::new(1.0e-12).scaled_to(elem.characteristic_length());

        assert!(elem.contains(&Point::new(0.5, 0.5, 0.5), &tol));
        assert!(elem.contains(&Point::new(0.0, 0.0, 0.0), &tol));
        assert!(!elem.contains(&Point::new(1.5, 0.5, 0.5), &tol));
    }
}
