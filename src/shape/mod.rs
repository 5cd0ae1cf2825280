//! Cell types, their connectivity tables, and the simple shapes used by the
//! cut pipeline.

pub use self::cell_type::CellType;
pub use self::decomposition::{decomposition, DECOMPOSITION_BODY_CENTER};
pub use self::mapping::{
    boundary_face, map_to_global, map_to_local, reference_center, reference_contains,
    shape_functions, shape_gradients,
};
pub use self::tetrahedron::Tetrahedron;
pub use self::triangle::Triangle;

mod cell_type;
mod decomposition;
mod mapping;
mod tetrahedron;
mod triangle;
