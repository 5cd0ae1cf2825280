use crate::integrate::QuadratureRule;
use crate::math::{Point, Real};
use crate::mesh::{FacetId, PointId, PointPool};
use crate::shape::Tetrahedron;

/// The index of a volume cell inside an element cut result.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CellId(pub u32);

impl CellId {
    /// This id as an index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The classification of a volume cell relative to the cutter interface.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Position {
    /// Behind the oriented cutter surface.
    Inside,
    /// In front of the oriented cutter surface, or away from any cutter.
    Outside,
    /// Not classified yet. Never present in a successful cut result.
    Undecided,
}

/// A tetrahedron used purely to build a quadrature rule over a volume cell.
///
/// Integration cells are normalized to positive orientation on construction.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct IntegrationCell {
    nodes: [PointId; 4],
}

impl IntegrationCell {
    /// Creates an integration cell, swapping two nodes if needed so that its
    /// signed volume is positive.
    pub fn new(nodes: [PointId; 4], pool: &PointPool) -> IntegrationCell {
        let tet = Tetrahedron::new(
            pool[nodes[0]],
            pool[nodes[1]],
            pool[nodes[2]],
            pool[nodes[3]],
        );

        if tet.signed_volume() < 0.0 {
            IntegrationCell {
                nodes: [nodes[0], nodes[2], nodes[1], nodes[3]],
            }
        } else {
            IntegrationCell { nodes }
        }
    }

    /// The point ids of this integration cell.
    #[inline]
    pub fn nodes(&self) -> &[PointId; 4] {
        &self.nodes
    }

    /// The tetrahedron geometry of this integration cell.
    #[inline]
    pub fn tet(&self, pool: &PointPool) -> Tetrahedron {
        Tetrahedron::new(
            pool[self.nodes[0]],
            pool[self.nodes[1]],
            pool[self.nodes[2]],
            pool[self.nodes[3]],
        )
    }
}

/// A connected, classified fragment of a cut background element.
#[derive(Clone, Debug)]
pub struct VolumeCell {
    position: Position,
    facets: Vec<FacetId>,
    integration_cells: Vec<IntegrationCell>,
    gauss: Option<QuadratureRule>,
}

impl VolumeCell {
    /// Creates an unclassified volume cell from its facets and integration
    /// cells.
    pub fn new(facets: Vec<FacetId>, integration_cells: Vec<IntegrationCell>) -> VolumeCell {
        VolumeCell {
            position: Position::Undecided,
            facets,
            integration_cells,
            gauss: None,
        }
    }

    /// The classification of this cell.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// The facets bounding this cell.
    #[inline]
    pub fn facets(&self) -> &[FacetId] {
        &self.facets
    }

    /// The integration tetrahedra of this cell.
    #[inline]
    pub fn integration_cells(&self) -> &[IntegrationCell] {
        &self.integration_cells
    }

    /// The volume integration rule of this cell, if one was generated.
    #[inline]
    pub fn integration_rule(&self) -> Option<&QuadratureRule> {
        self.gauss.as_ref()
    }

    pub(crate) fn set_integration_rule(&mut self, rule: QuadratureRule) {
        self.gauss = Some(rule);
    }

    /// The volume of this cell, as the sum of its integration tetrahedra.
    pub fn volume(&self, pool: &PointPool) -> Real {
        self.integration_cells
            .iter()
            .map(|ic| ic.tet(pool).volume())
            .sum()
    }

    /// A point strictly inside this cell: the centroid of its largest
    /// integration tetrahedron.
    ///
    /// # Panics
    ///
    /// Panics if the cell has no integration cells.
    pub fn interior_point(&self, pool: &PointPool) -> Point<Real> {
        let largest = self
            .integration_cells
            .iter()
            .max_by(|a, b| {
                a.tet(pool)
                    .volume()
                    .partial_cmp(&b.tet(pool).volume())
                    .expect("NaN tetrahedron volume")
            })
            .expect("volume cell without integration cells");

        largest.tet(pool).center()
    }
}
