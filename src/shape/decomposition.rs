//! Reference decompositions of the volume cell types into tetrahedra.
//!
//! The tables index the corner nodes of the cell; for the fine hexahedron
//! decomposition, indices 8 to 13 denote the centroids of the faces (in the
//! face order of [`CellType::faces`]) and index
//! [`DECOMPOSITION_BODY_CENTER`] denotes the centroid of the cell. The fine
//! decomposition guarantees convexity of every sub-tetrahedron even for
//! noticeably warped hexahedra and keeps sub-tet faces conforming across the
//! interior when several cutting planes meet inside one cell.

use crate::shape::CellType;

/// The pseudo-node index denoting the cell centroid in the fine hexahedron
/// decomposition.
pub const DECOMPOSITION_BODY_CENTER: usize = 14;

const TET4_DECOMPOSITION: [[usize; 4]; 1] = [[0, 1, 2, 3]];

const PYRAMID5_DECOMPOSITION: [[usize; 4]; 2] = [[0, 1, 2, 4], [0, 2, 3, 4]];

const WEDGE6_DECOMPOSITION: [[usize; 4]; 3] = [[0, 1, 2, 3], [1, 2, 3, 4], [2, 3, 4, 5]];

// Six tetrahedra around the main diagonal 0-6.
const HEX8_DECOMPOSITION: [[usize; 4]; 6] = [
    [0, 1, 2, 6],
    [0, 2, 3, 6],
    [0, 3, 7, 6],
    [0, 7, 4, 6],
    [0, 4, 5, 6],
    [0, 5, 1, 6],
];

// Four tetrahedra per face: face edge, face centroid, body centroid.
const HEX8_FINE_DECOMPOSITION: [[usize; 4]; 24] = [
    [0, 3, 8, 14],
    [3, 2, 8, 14],
    [2, 1, 8, 14],
    [1, 0, 8, 14],
    [4, 5, 9, 14],
    [5, 6, 9, 14],
    [6, 7, 9, 14],
    [7, 4, 9, 14],
    [0, 1, 10, 14],
    [1, 5, 10, 14],
    [5, 4, 10, 14],
    [4, 0, 10, 14],
    [1, 2, 11, 14],
    [2, 6, 11, 14],
    [6, 5, 11, 14],
    [5, 1, 11, 14],
    [2, 3, 12, 14],
    [3, 7, 12, 14],
    [7, 6, 12, 14],
    [6, 2, 12, 14],
    [3, 0, 13, 14],
    [0, 4, 13, 14],
    [4, 7, 13, 14],
    [7, 3, 13, 14],
];

/// The reference decomposition of `cell` into tetrahedra.
///
/// `fine` selects the 24-tet decomposition for hexahedra; it is ignored for
/// the other cell types, which have a single decomposition each.
///
/// # Panics
///
/// Panics if `cell` is a surface cell type.
pub fn decomposition(cell: CellType, fine: bool) -> &'static [[usize; 4]] {
    match cell {
        CellType::Tet4 => &TET4_DECOMPOSITION,
        CellType::Pyramid5 => &PYRAMID5_DECOMPOSITION,
        CellType::Wedge6 => &WEDGE6_DECOMPOSITION,
        CellType::Hex8 => {
            if fine {
                &HEX8_FINE_DECOMPOSITION
            } else {
                &HEX8_DECOMPOSITION
            }
        }
        CellType::Tri3 | CellType::Quad4 => {
            panic!("surface cell types have no volume decomposition")
        }
    }
}
