//! The supported cell types and their static connectivity tables.

/// The cell types understood by the cut pipeline.
///
/// Volume types describe background elements, surface types describe cutter
/// sides. Connectivity (edges, faces) is given by static lookup tables
/// indexed by this tag; there is no per-instance topology.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum CellType {
    /// 8-node hexahedron.
    Hex8,
    /// 4-node tetrahedron.
    Tet4,
    /// 6-node wedge (triangular prism).
    Wedge6,
    /// 5-node pyramid.
    Pyramid5,
    /// 3-node triangle.
    Tri3,
    /// 4-node bilinear quadrilateral.
    Quad4,
}

const HEX8_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

// Face loops are ordered so their normal points out of the cell.
const HEX8_FACES: [&[usize]; 6] = [
    &[0, 3, 2, 1],
    &[4, 5, 6, 7],
    &[0, 1, 5, 4],
    &[1, 2, 6, 5],
    &[2, 3, 7, 6],
    &[3, 0, 4, 7],
];

const TET4_EDGES: [[usize; 2]; 6] = [[0, 1], [1, 2], [2, 0], [0, 3], [1, 3], [2, 3]];

const TET4_FACES: [&[usize]; 4] = [&[0, 2, 1], &[0, 1, 3], &[1, 2, 3], &[2, 0, 3]];

const WEDGE6_EDGES: [[usize; 2]; 9] = [
    [0, 1],
    [1, 2],
    [2, 0],
    [3, 4],
    [4, 5],
    [5, 3],
    [0, 3],
    [1, 4],
    [2, 5],
];

const WEDGE6_FACES: [&[usize]; 5] = [
    &[0, 2, 1],
    &[3, 4, 5],
    &[0, 1, 4, 3],
    &[1, 2, 5, 4],
    &[2, 0, 3, 5],
];

const PYRAMID5_EDGES: [[usize; 2]; 8] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [0, 4],
    [1, 4],
    [2, 4],
    [3, 4],
];

const PYRAMID5_FACES: [&[usize]; 5] = [
    &[0, 3, 2, 1],
    &[0, 1, 4],
    &[1, 2, 4],
    &[2, 3, 4],
    &[3, 0, 4],
];

const TRI3_EDGES: [[usize; 2]; 3] = [[0, 1], [1, 2], [2, 0]];

const QUAD4_EDGES: [[usize; 2]; 4] = [[0, 1], [1, 2], [2, 3], [3, 0]];

impl CellType {
    /// The number of corner nodes of this cell type.
    #[inline]
    pub fn num_nodes(self) -> usize {
        match self {
            CellType::Hex8 => 8,
            CellType::Tet4 => 4,
            CellType::Wedge6 => 6,
            CellType::Pyramid5 => 5,
            CellType::Tri3 => 3,
            CellType::Quad4 => 4,
        }
    }

    /// Whether this cell type describes a volume (background element).
    #[inline]
    pub fn is_volume(self) -> bool {
        matches!(
            self,
            CellType::Hex8 | CellType::Tet4 | CellType::Wedge6 | CellType::Pyramid5
        )
    }

    /// Whether this cell type describes a surface (cutter side).
    #[inline]
    pub fn is_surface(self) -> bool {
        matches!(self, CellType::Tri3 | CellType::Quad4)
    }

    /// The local node indices of every edge of this cell type.
    #[inline]
    pub fn edges(self) -> &'static [[usize; 2]] {
        match self {
            CellType::Hex8 => &HEX8_EDGES,
            CellType::Tet4 => &TET4_EDGES,
            CellType::Wedge6 => &WEDGE6_EDGES,
            CellType::Pyramid5 => &PYRAMID5_EDGES,
            CellType::Tri3 => &TRI3_EDGES,
            CellType::Quad4 => &QUAD4_EDGES,
        }
    }

    /// The local node loops of every face of this cell type, ordered so the
    /// face normal points out of the cell.
    ///
    /// Only meaningful for volume cell types; surface types have no faces.
    #[inline]
    pub fn faces(self) -> &'static [&'static [usize]] {
        match self {
            CellType::Hex8 => &HEX8_FACES,
            CellType::Tet4 => &TET4_FACES,
            CellType::Wedge6 => &WEDGE6_FACES,
            CellType::Pyramid5 => &PYRAMID5_FACES,
            CellType::Tri3 | CellType::Quad4 => &[],
        }
    }
}
