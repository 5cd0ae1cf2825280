use cutcell::mesh::{FacetOrigin, Position};
use cutcell::shape::CellType;
use cutcell::{ElementCut, MeshIntersection};
use nalgebra::Point3;

pub fn unit_hex_coords(scale: f64) -> [Point3<f64>; 8] {
    [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(scale, 0.0, 0.0),
        Point3::new(scale, scale, 0.0),
        Point3::new(0.0, scale, 0.0),
        Point3::new(0.0, 0.0, scale),
        Point3::new(scale, 0.0, scale),
        Point3::new(scale, scale, scale),
        Point3::new(0.0, scale, scale),
    ]
}

/// A hex8 cut by one large triangle in the plane z = `z`, with the triangle
/// normal pointing toward +z.
pub fn hex_cut_by_plane(scale: f64, z: f64) -> MeshIntersection {
    let mut intersection = MeshIntersection::new();

    intersection
        .add_cut_side(
            1,
            &[
                Point3::new(-10.0 * scale, -10.0 * scale, z),
                Point3::new(20.0 * scale, -10.0 * scale, z),
                Point3::new(-10.0 * scale, 20.0 * scale, z),
            ],
            CellType::Tri3,
        )
        .unwrap();

    intersection
        .add_element(1, &unit_hex_coords(scale), CellType::Hex8)
        .unwrap();

    intersection
}

/// Checks the facet-manifoldness property: every cut facet is referenced by
/// exactly two cells, every element-boundary facet by exactly one.
pub fn assert_facets_manifold(cut: &ElementCut) {
    let mut refcount = vec![0usize; cut.facets().len()];
    for cell in cut.cells() {
        for fid in cell.facets() {
            refcount[fid.index()] += 1;
        }
    }

    for (i, facet) in cut.facets().iter().enumerate() {
        match facet.origin() {
            FacetOrigin::CutSide(_) => assert_eq!(
                refcount[i], 2,
                "cut facet {} must be shared by exactly two cells",
                i
            ),
            FacetOrigin::ElementFace(_) => assert_eq!(
                refcount[i], 1,
                "boundary facet {} must belong to exactly one cell",
                i
            ),
        }
    }
}

/// Checks the classification-completeness property.
pub fn assert_all_classified(cut: &ElementCut) {
    assert!(!cut.cells().is_empty());
    for cell in cut.cells() {
        assert_ne!(cell.position(), Position::Undecided);
    }
}

/// The total volume of all cells with the given position.
pub fn volume_of(cut: &ElementCut, position: Position) -> f64 {
    cut.cells()
        .iter()
        .filter(|c| c.position() == position)
        .map(|c| c.volume(cut.points()))
        .sum()
}
