//! The per-cut mesh entities: points, sides, elements, facets, volume cells.
//!
//! Everything a cut produces lives in per-element arenas and is referred to
//! by index newtypes. Nothing is shared across elements except read-only
//! references to the cutter sides.

pub use self::element::Element;
pub use self::facet::{Facet, FacetId, FacetOrigin};
pub use self::point::{PointId, PointPool};
pub use self::side::Side;
pub use self::volume_cell::{CellId, IntegrationCell, Position, VolumeCell};

mod element;
mod facet;
mod point;
mod side;
mod volume_cell;
