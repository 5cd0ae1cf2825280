use cutcell::shape::CellType;
use cutcell::{CutError, MeshIntersection};
use nalgebra::Point3;

#[test]
fn zero_area_side_is_rejected() {
    let mut intersection = MeshIntersection::new();

    let err = intersection
        .add_cut_side(
            7,
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 1.0),
                Point3::new(2.0, 2.0, 2.0),
            ],
            CellType::Tri3,
        )
        .unwrap_err();

    assert_eq!(
        err,
        CutError::DegenerateGeometry {
            entity: "side",
            id: 7
        }
    );
}

#[test]
fn collapsed_element_is_rejected() {
    let mut intersection = MeshIntersection::new();

    let err = intersection
        .add_element(
            3,
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            CellType::Hex8,
        )
        .unwrap_err();

    assert_eq!(
        err,
        CutError::DegenerateGeometry {
            entity: "element",
            id: 3
        }
    );
}

#[test]
fn surface_cell_types_are_not_elements() {
    let mut intersection = MeshIntersection::new();

    let err = intersection
        .add_element(
            1,
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            CellType::Tri3,
        )
        .unwrap_err();

    assert!(matches!(err, CutError::UnsupportedCellType { .. }));
}

#[test]
fn volume_cell_types_are_not_sides() {
    let mut intersection = MeshIntersection::new();

    let err = intersection
        .add_cut_side(
            1,
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            CellType::Tet4,
        )
        .unwrap_err();

    assert!(matches!(err, CutError::UnsupportedCellType { .. }));
}

#[test]
fn node_count_must_match_the_cell_type() {
    let mut intersection = MeshIntersection::new();

    let err = intersection
        .add_cut_side(
            1,
            &[Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            CellType::Tri3,
        )
        .unwrap_err();

    assert_eq!(
        err,
        CutError::WrongNodeCount {
            cell_type: CellType::Tri3,
            expected: 3,
            got: 2
        }
    );
}
