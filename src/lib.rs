/*!
cutcell
========

**cutcell** is a 3-dimensional cut-cell generation library written with
the rust programming language.

It intersects a background finite-element cell (hexahedron, tetrahedron,
wedge, pyramid) with a set of cutter facets (triangles, bilinear quads)
describing an embedded interface, and produces the classified volume
fragments together with numerically valid integration rules, as required
by embedded-interface (XFEM-type) finite element formulations.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub mod error;
pub mod geometry;
pub mod integrate;
pub mod intersect;
pub mod mesh;
pub mod options;
pub mod shape;
pub mod utils;

pub use crate::error::CutError;
pub use crate::intersect::{cut_element, ElementCut, MeshIntersection};
pub use crate::mesh::Position;
pub use crate::options::{CutOptions, VolumeIntegrationScheme};

/// Aliases for the mathematical types used throughout this crate.
pub mod math {
    pub use na::{Matrix3, Point2, Point3, Vector2, Vector3};

    /// The scalar type used throughout this crate.
    pub use f64 as Real;

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The matrix type.
    pub use Matrix3 as Matrix;
}
