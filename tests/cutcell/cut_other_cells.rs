use crate::common::{assert_all_classified, assert_facets_manifold, volume_of};
use approx::assert_relative_eq;
use cutcell::mesh::Position;
use cutcell::shape::CellType;
use cutcell::MeshIntersection;
use nalgebra::Point3;

fn cut_single_element(
    coords: &[Point3<f64>],
    cell_type: CellType,
    plane_z: f64,
) -> MeshIntersection {
    let mut intersection = MeshIntersection::new();

    intersection
        .add_cut_side(
            1,
            &[
                Point3::new(-10.0, -10.0, plane_z),
                Point3::new(20.0, -10.0, plane_z),
                Point3::new(-10.0, 20.0, plane_z),
            ],
            CellType::Tri3,
        )
        .unwrap();

    intersection.add_element(1, coords, cell_type).unwrap();
    intersection
}

#[test]
fn tet4_cut_by_a_plane() {
    let coords = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
    ];

    let result = cut_single_element(&coords, CellType::Tet4, 0.1).cut().unwrap();
    let cut = result.element_cut(1).unwrap();

    assert_eq!(cut.cells().len(), 2);
    assert_all_classified(cut);
    assert_facets_manifold(cut);
    assert_relative_eq!(cut.volume(), 1.0 / 6.0, max_relative = 1.0e-9);

    // The part above z = 0.1 is a scaled copy of the tetrahedron.
    let above = 0.9_f64.powi(3) / 6.0;
    assert_relative_eq!(
        volume_of(cut, Position::Outside),
        above,
        max_relative = 1.0e-9
    );
    assert_relative_eq!(
        volume_of(cut, Position::Inside),
        1.0 / 6.0 - above,
        max_relative = 1.0e-9
    );
}

#[test]
fn wedge6_cut_by_a_plane() {
    let coords = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    ];

    let result = cut_single_element(&coords, CellType::Wedge6, 0.5)
        .cut()
        .unwrap();
    let cut = result.element_cut(1).unwrap();

    assert_eq!(cut.cells().len(), 2);
    assert_all_classified(cut);
    assert_facets_manifold(cut);
    assert_relative_eq!(cut.volume(), 0.5, max_relative = 1.0e-9);
    assert_relative_eq!(volume_of(cut, Position::Inside), 0.25, max_relative = 1.0e-9);
}

#[test]
fn pyramid5_cut_by_a_plane() {
    let coords = [
        Point3::new(-1.0, -1.0, 0.0),
        Point3::new(1.0, -1.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(-1.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
    ];

    let result = cut_single_element(&coords, CellType::Pyramid5, 0.5)
        .cut()
        .unwrap();
    let cut = result.element_cut(1).unwrap();

    assert_eq!(cut.cells().len(), 2);
    assert_all_classified(cut);
    assert_facets_manifold(cut);
    assert_relative_eq!(cut.volume(), 4.0 / 3.0, max_relative = 1.0e-9);

    // The tip above z = 0.5 is a pyramid scaled by one half.
    assert_relative_eq!(
        volume_of(cut, Position::Outside),
        4.0 / 3.0 / 8.0,
        max_relative = 1.0e-9
    );
}

#[test]
fn uncut_element_yields_one_outside_cell() {
    let mut intersection = MeshIntersection::new();

    // A side far away from the element; the bounding-box pre-filter drops it.
    intersection
        .add_cut_side(
            1,
            &[
                Point3::new(5.0, 5.0, 5.0),
                Point3::new(6.0, 5.0, 5.0),
                Point3::new(5.0, 6.0, 5.0),
            ],
            CellType::Tri3,
        )
        .unwrap();

    intersection
        .add_element(1, &crate::common::unit_hex_coords(1.0), CellType::Hex8)
        .unwrap();

    let result = intersection.cut().unwrap();
    let cut = result.element_cut(1).unwrap();

    assert!(!cut.is_cut());
    assert_eq!(cut.cells().len(), 1);
    assert_eq!(cut.cells()[0].position(), Position::Outside);
    assert_relative_eq!(cut.volume(), 1.0, max_relative = 1.0e-12);

    // The uncut element still carries a valid integration rule.
    let rule = cut.cells()[0].integration_rule().unwrap();
    assert_relative_eq!(rule.total_weight(), 1.0, max_relative = 1.0e-10);
}

#[test]
fn grazing_side_leaves_the_element_uncut() {
    let mut intersection = MeshIntersection::new();

    // A side touching the element exactly along its top face plane.
    intersection
        .add_cut_side(
            1,
            &[
                Point3::new(0.2, 0.2, 1.0),
                Point3::new(0.8, 0.2, 1.0),
                Point3::new(0.5, 0.8, 1.0),
            ],
            CellType::Tri3,
        )
        .unwrap();

    intersection
        .add_element(1, &crate::common::unit_hex_coords(1.0), CellType::Hex8)
        .unwrap();

    let result = intersection.cut().unwrap();
    let cut = result.element_cut(1).unwrap();

    // Coincident contact: no cutting planes, no zero-volume cells.
    assert!(!cut.is_cut());
    assert_eq!(cut.cells().len(), 1);
    assert_relative_eq!(cut.volume(), 1.0, max_relative = 1.0e-9);
}
