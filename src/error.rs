//! Errors reported by the cut pipeline.

use crate::math::{Point, Real};
use crate::shape::CellType;

/// Errors that can occur while cutting a background element.
///
/// All variants are local to one element's cut operation: a degenerate
/// element never corrupts the processing of unrelated elements. Cut topology
/// errors must not be ignored by the caller, since assembling integrals on a
/// corrupted cut would silently produce wrong results.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CutError {
    /// The input geometry is degenerate: a zero-length edge, a zero-area
    /// side, or an element with non-positive volume.
    ///
    /// This is detected at construction and is distinct from "no
    /// intersection": the input itself cannot be cut meaningfully.
    #[error("degenerate {entity} geometry (id {id})")]
    DegenerateGeometry {
        /// What kind of entity was degenerate ("side", "element", "edge").
        entity: &'static str,
        /// The caller-supplied id of the offending entity.
        id: u32,
    },

    /// A cell type outside the supported linear set was supplied.
    #[error("cell type {given:?} is not supported here (expected one of {expected})")]
    UnsupportedCellType {
        /// The cell type that was supplied.
        given: CellType,
        /// A description of the supported set.
        expected: &'static str,
    },

    /// The wrong number of nodes was supplied for a cell type.
    #[error("cell type {cell_type:?} takes {expected} nodes, got {got}")]
    WrongNodeCount {
        /// The cell type being constructed.
        cell_type: CellType,
        /// The number of nodes it takes.
        expected: usize,
        /// The number of nodes supplied.
        got: usize,
    },

    /// The Newton solve of an edge intersection with a bilinear quad side
    /// did not converge, and the triangle-split fallback failed too.
    #[error("edge intersection with side {side} did not converge")]
    NonConvergent {
        /// The id of the offending side.
        side: u32,
    },

    /// A cut facet could not be closed into a valid planar polygon.
    ///
    /// Fatal for the current element: silently dropping the facet would
    /// silently break volume conservation.
    #[error("malformed cut facet on element {element}, side {side}")]
    MalformedFacet {
        /// The id of the element being cut.
        element: u32,
        /// The id of the cutter side the facet was built from.
        side: u32,
    },

    /// The inside/outside classification of a volume cell exhausted its ray
    /// retry budget.
    #[error(
        "could not classify a volume cell of element {element} after {attempts} rays from {sample}"
    )]
    PositionUndecided {
        /// The id of the element being cut.
        element: u32,
        /// The interior sample point the rays were cast from.
        sample: Point<Real>,
        /// How many directions were attempted.
        attempts: u32,
    },

    /// The integration rule of a cell failed to reproduce its volume within
    /// the configured relative tolerance, and the options escalate this to a
    /// hard error.
    #[error("quadrature volume mismatch on element {element}: rule {actual}, cell {expected}")]
    VolumeMismatch {
        /// The id of the element being cut.
        element: u32,
        /// The volume of the cell, from its integration tetrahedra.
        expected: Real,
        /// The volume reproduced by the integration rule.
        actual: Real,
    },
}
