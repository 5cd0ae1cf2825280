//! The cut pipeline: edge/side intersection, facet construction, tetrahedral
//! decomposition and clipping, volume-cell assembly and classification.

pub use self::clip::{clip_polygon, ConvexPolyhedron, Polygon};
pub use self::edge_side::{intersect_edge_side, EdgeSideIntersection};
pub use self::element_cut::{cut_element, CutPoint, ElementCut};
pub use self::facets::CutFacetRegion;
pub use self::mesh_intersection::{CutResult, MeshIntersection};

mod clip;
mod edge_side;
mod element_cut;
mod facets;
mod mesh_intersection;
mod position;
mod tetmesh;
