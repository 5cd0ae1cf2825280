use crate::common::{
    assert_all_classified, assert_facets_manifold, hex_cut_by_plane, volume_of,
};
use approx::assert_relative_eq;
use cutcell::mesh::Position;

#[test]
fn plane_cut_splits_into_two_cells() {
    let result = hex_cut_by_plane(1.0, 0.25).cut().unwrap();
    let cut = result.element_cut(1).unwrap();

    assert!(cut.is_cut());
    assert_eq!(cut.cells().len(), 2);
    assert_all_classified(cut);
    assert_facets_manifold(cut);
}

#[test]
fn plane_cut_conserves_volume() {
    let result = hex_cut_by_plane(1.0, 0.25).cut().unwrap();
    let cut = result.element_cut(1).unwrap();

    assert_relative_eq!(cut.volume(), 1.0, max_relative = 1.0e-9);
}

#[test]
fn plane_cut_volumes_split_at_the_plane() {
    let result = hex_cut_by_plane(1.0, 0.25).cut().unwrap();
    let cut = result.element_cut(1).unwrap();

    // The triangle normal points toward +z, so the part below the plane is
    // behind the interface: inside.
    assert_relative_eq!(
        volume_of(cut, Position::Inside),
        0.25,
        max_relative = 1.0e-9
    );
    assert_relative_eq!(
        volume_of(cut, Position::Outside),
        0.75,
        max_relative = 1.0e-9
    );
}

#[test]
fn cut_points_lie_on_the_cut_plane() {
    let result = hex_cut_by_plane(1.0, 0.25).cut().unwrap();
    let cut = result.element_cut(1).unwrap();

    // The plane crosses the four vertical edges of the hex.
    assert!(!cut.cut_points().is_empty());
    for cp in cut.cut_points() {
        assert!(!cp.coincident);
        assert_relative_eq!(cut.points()[cp.point].z, 0.25, epsilon = 1.0e-12);
        assert_relative_eq!(cp.t, 0.25, epsilon = 1.0e-12);
    }
}

#[test]
fn every_cell_gets_an_integration_rule() {
    let result = hex_cut_by_plane(1.0, 0.25).cut().unwrap();
    let cut = result.element_cut(1).unwrap();

    for cell in cut.cells() {
        let rule = cell.integration_rule().unwrap();
        assert!(!rule.is_empty());
        assert_relative_eq!(
            rule.total_weight(),
            cell.volume(cut.points()),
            max_relative = 1.0e-10
        );

        // Every Gauss point carries an element-local coordinate inside the
        // reference domain.
        for gp in &rule.points {
            let local = gp.local.unwrap();
            assert!(local.x.abs() <= 1.0 + 1.0e-9);
            assert!(local.y.abs() <= 1.0 + 1.0e-9);
            assert!(local.z.abs() <= 1.0 + 1.0e-9);
        }
    }
}

#[test]
fn boundary_facets_expose_surface_rules() {
    use cutcell::integrate::facet_rule;
    use cutcell::mesh::FacetOrigin;

    let result = hex_cut_by_plane(1.0, 0.25).cut().unwrap();
    let cut = result.element_cut(1).unwrap();

    // The cut facets tile the interface cross-section, of area 1.
    let cut_area: f64 = cut
        .facets()
        .iter()
        .filter(|f| matches!(f.origin(), FacetOrigin::CutSide(_)))
        .map(|f| f.area(cut.points()))
        .sum();
    assert_relative_eq!(cut_area, 1.0, max_relative = 1.0e-9);

    for facet in cut.facets() {
        if matches!(facet.origin(), FacetOrigin::CutSide(_)) {
            let rule = facet_rule(facet, cut.points(), 2);
            assert_relative_eq!(
                rule.total_weight(),
                facet.area(cut.points()),
                max_relative = 1.0e-10
            );
        }
    }
}
