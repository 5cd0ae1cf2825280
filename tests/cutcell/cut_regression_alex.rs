//! Regression scenarios ported from hand-collected production cut
//! configurations: a hex8 background element against clusters of small,
//! nearly-coincident triangle sides with coordinates given to full double
//! precision. The pipeline must terminate, classify every cell and conserve
//! the element volume.

use crate::common::{assert_all_classified, assert_facets_manifold};
use approx::assert_relative_eq;
use cutcell::options::{CutOptions, VolumeIntegrationScheme};
use cutcell::shape::CellType;
use cutcell::MeshIntersection;
use nalgebra::Point3;

fn run_case(
    sides: &[[Point3<f64>; 3]],
    hex: &[Point3<f64>; 8],
    options: CutOptions,
) -> MeshIntersection {
    let mut intersection = MeshIntersection::with_options(options);

    for (i, side) in sides.iter().enumerate() {
        intersection
            .add_cut_side(i as u32 + 1, side, CellType::Tri3)
            .unwrap();
    }
    intersection.add_element(1, hex, CellType::Hex8).unwrap();
    intersection
}

fn alex49_sides() -> Vec<[Point3<f64>; 3]> {
    vec![
        [Point3::new(9.152615e-01, 5.824657e-02, 1.925487e-01), Point3::new(9.152529e-01, 5.826475e-02, 2.247628e-01), Point3::new(9.137422e-01, 4.361683e-02, 2.086372e-01)],
        [Point3::new(9.152615e-01, 5.824657e-02, 1.925487e-01), Point3::new(9.199503e-01, 8.768309e-02, 1.925545e-01), Point3::new(9.175974e-01, 7.297176e-02, 2.086629e-01)],
        [Point3::new(9.152529e-01, 5.826475e-02, 2.247628e-01), Point3::new(9.152615e-01, 5.824657e-02, 1.925487e-01), Point3::new(9.175974e-01, 7.297176e-02, 2.086629e-01)],
        [Point3::new(9.199503e-01, 8.768309e-02, 1.925545e-01), Point3::new(9.152615e-01, 5.824657e-02, 1.925487e-01), Point3::new(9.175918e-01, 7.296768e-02, 1.764727e-01)],
        [Point3::new(9.122270e-01, 2.896875e-02, 1.925313e-01), Point3::new(9.122100e-01, 2.897082e-02, 1.603983e-01), Point3::new(9.137331e-01, 4.360893e-02, 1.764686e-01)],
        [Point3::new(9.122273e-01, 2.898726e-02, 2.247060e-01), Point3::new(9.122270e-01, 2.896875e-02, 1.925313e-01), Point3::new(9.137422e-01, 4.361683e-02, 2.086372e-01)],
        [Point3::new(9.152615e-01, 5.824657e-02, 1.925487e-01), Point3::new(9.152340e-01, 5.824957e-02, 1.603964e-01), Point3::new(9.175918e-01, 7.296768e-02, 1.764727e-01)],
        [Point3::new(9.122270e-01, 2.896875e-02, 1.925313e-01), Point3::new(9.152615e-01, 5.824657e-02, 1.925487e-01), Point3::new(9.137422e-01, 4.361683e-02, 2.086372e-01)],
        [Point3::new(9.152340e-01, 5.824957e-02, 1.603964e-01), Point3::new(9.152615e-01, 5.824657e-02, 1.925487e-01), Point3::new(9.137331e-01, 4.360893e-02, 1.764686e-01)],
        [Point3::new(9.152615e-01, 5.824657e-02, 1.925487e-01), Point3::new(9.122270e-01, 2.896875e-02, 1.925313e-01), Point3::new(9.137331e-01, 4.360893e-02, 1.764686e-01)],
    ]
}

fn alex49_hex() -> [Point3<f64>; 8] {
    [
        Point3::new(9.253731e-01, 2.962963e-02, 1.764706e-01),
        Point3::new(9.253731e-01, 5.925926e-02, 1.764706e-01),
        Point3::new(8.955224e-01, 5.925926e-02, 1.764706e-01),
        Point3::new(8.955224e-01, 2.962963e-02, 1.764706e-01),
        Point3::new(9.253731e-01, 2.962963e-02, 2.058824e-01),
        Point3::new(9.253731e-01, 5.925926e-02, 2.058824e-01),
        Point3::new(8.955224e-01, 5.925926e-02, 2.058824e-01),
        Point3::new(8.955224e-01, 2.962963e-02, 2.058824e-01),
    ]
}

fn alex55_sides() -> Vec<[Point3<f64>; 3]> {
    vec![
        [Point3::new(0.9103, -0.0001, 0.0962), Point3::new(0.9103, 0.03156666667, 0.0962), Point3::new(0.9103, 0.01573333333, 0.11225)],
        [Point3::new(0.9103, 0.03156666667, 0.0962), Point3::new(0.9103, 0.03156666667, 0.1283), Point3::new(0.9103, 0.01573333333, 0.11225)],
        [Point3::new(0.9103, 0.03156666667, 0.1283), Point3::new(0.9103, 0.03156666667, 0.0962), Point3::new(0.9103, 0.0474, 0.11225)],
        [Point3::new(0.9103, 0.03156666667, 0.0962), Point3::new(0.9103, 0.06323333333, 0.0962), Point3::new(0.9103, 0.0474, 0.11225)],
        [Point3::new(0.9103, 0.06323333333, 0.0962), Point3::new(0.9103, 0.06323333333, 0.1283), Point3::new(0.9103, 0.0474, 0.11225)],
        [Point3::new(0.9103, 0.06323333333, 0.1283), Point3::new(0.9103, 0.03156666667, 0.1283), Point3::new(0.9103, 0.0474, 0.11225)],
        [Point3::new(0.9103, 0.03156666667, 0.0641), Point3::new(0.9103, 0.03156666667, 0.0962), Point3::new(0.9103, 0.01573333333, 0.08015)],
        [Point3::new(0.9103, 0.03156666667, 0.0962), Point3::new(0.9103, -0.0001, 0.0962), Point3::new(0.9103, 0.01573333333, 0.08015)],
        [Point3::new(0.9103, 0.03156666667, 0.0962), Point3::new(0.9103, 0.03156666667, 0.0641), Point3::new(0.9103, 0.0474, 0.08015)],
        [Point3::new(0.9103, 0.06323333333, 0.0641), Point3::new(0.9103, 0.06323333333, 0.0962), Point3::new(0.9103, 0.0474, 0.08015)],
        [Point3::new(0.9103, 0.06323333333, 0.0962), Point3::new(0.9103, 0.03156666667, 0.0962), Point3::new(0.9103, 0.0474, 0.08015)],
    ]
}

fn alex55_hex() -> [Point3<f64>; 8] {
    [
        Point3::new(0.9253731343, 0.02962962963, 0.08823529412),
        Point3::new(0.9253731343, 0.05925925926, 0.08823529412),
        Point3::new(0.8955223881, 0.05925925926, 0.08823529412),
        Point3::new(0.8955223881, 0.02962962963, 0.08823529412),
        Point3::new(0.9253731343, 0.02962962963, 0.1176470588),
        Point3::new(0.9253731343, 0.05925925926, 0.1176470588),
        Point3::new(0.8955223881, 0.05925925926, 0.1176470588),
        Point3::new(0.8955223881, 0.02962962963, 0.1176470588),
    ]
}

#[test]
fn alex49_nearly_parallel_sheet() {
    let intersection = run_case(&alex49_sides(), &alex49_hex(), CutOptions::default());
    let result = intersection.cut().unwrap();
    let cut = result.element_cut(1).unwrap();

    let hex_volume = cut.element().volume();

    assert_all_classified(cut);
    assert!(cut.is_cut());
    assert!(cut.cells().len() >= 2);
    assert_relative_eq!(cut.volume(), hex_volume, max_relative = 1.0e-9);
}

#[test]
fn alex55_coplanar_patch_splits_the_hex() {
    let intersection = run_case(&alex55_sides(), &alex55_hex(), CutOptions::default());
    let result = intersection.cut().unwrap();
    let cut = result.element_cut(1).unwrap();

    let hex_volume = cut.element().volume();

    assert_all_classified(cut);
    assert_facets_manifold(cut);
    assert!(cut.cells().len() >= 2);
    assert_relative_eq!(cut.volume(), hex_volume, max_relative = 1.0e-9);

    // The patch is plane x = 0.9103; the two sides of the split have the
    // volume fractions of that plane inside the hex.
    let x0 = 0.8955223881;
    let x1 = 0.9253731343;
    let fraction: f64 = (0.9103 - x0) / (x1 - x0);

    let mut volumes: Vec<f64> = cut
        .cells()
        .iter()
        .map(|c| c.volume(cut.points()))
        .collect();
    volumes.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let smaller = volumes[0] / hex_volume;
    assert_relative_eq!(smaller, fraction.min(1.0 - fraction), max_relative = 1.0e-6);
}

#[test]
fn alex55_with_direct_divergence() {
    let options = CutOptions {
        scheme: VolumeIntegrationScheme::DirectDivergence,
        ..CutOptions::default()
    };
    let intersection = run_case(&alex55_sides(), &alex55_hex(), options);
    let result = intersection.cut().unwrap();
    let cut = result.element_cut(1).unwrap();

    for cell in cut.cells() {
        let rule = cell.integration_rule().unwrap();
        assert_relative_eq!(
            rule.total_weight(),
            cell.volume(cut.points()),
            max_relative = 1.0e-9
        );
    }
}
