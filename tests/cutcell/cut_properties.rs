use crate::common::{assert_all_classified, hex_cut_by_plane, unit_hex_coords};
use approx::assert_relative_eq;
use cutcell::shape::CellType;
use cutcell::MeshIntersection;
use nalgebra::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn scaling_the_inputs_scales_the_volumes() {
    let reference = hex_cut_by_plane(1.0, 0.25).cut().unwrap();
    let scaled = hex_cut_by_plane(1000.0, 250.0).cut().unwrap();

    let reference = reference.element_cut(1).unwrap();
    let scaled = scaled.element_cut(1).unwrap();

    // Same topology.
    assert_eq!(reference.cells().len(), scaled.cells().len());
    assert_eq!(reference.facets().len(), scaled.facets().len());

    // Volumes scale by the cube of the factor, and the classification of
    // matching cells is unchanged.
    for (a, b) in reference.cells().iter().zip(scaled.cells().iter()) {
        assert_eq!(a.position(), b.position());
        assert_relative_eq!(
            b.volume(scaled.points()),
            a.volume(reference.points()) * 1.0e9,
            max_relative = 1.0e-9
        );
    }
}

#[test]
fn cutting_twice_is_bit_for_bit_identical() {
    let first = hex_cut_by_plane(1.0, 0.3).cut().unwrap();
    let second = hex_cut_by_plane(1.0, 0.3).cut().unwrap();

    let first = first.element_cut(1).unwrap();
    let second = second.element_cut(1).unwrap();

    assert_eq!(first.cells().len(), second.cells().len());
    assert_eq!(first.facets().len(), second.facets().len());
    assert_eq!(first.points().len(), second.points().len());

    for (a, b) in first.cells().iter().zip(second.cells().iter()) {
        assert_eq!(a.position(), b.position());
        assert_eq!(a.facets(), b.facets());

        // Bit-for-bit, not just within tolerance.
        assert!(a.volume(first.points()) == b.volume(second.points()));

        let ra = a.integration_rule().unwrap();
        let rb = b.integration_rule().unwrap();
        assert_eq!(ra.len(), rb.len());
        for (ga, gb) in ra.points.iter().zip(rb.points.iter()) {
            assert!(ga.point == gb.point);
            assert!(ga.weight == gb.weight);
        }
    }
}

#[test]
fn random_planes_conserve_volume() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for trial in 0..40 {
        let normal = loop {
            let candidate = Vector3::new(
                rng.gen_range(-1.0..1.0_f64),
                rng.gen_range(-1.0..1.0_f64),
                rng.gen_range(-1.0..1.0_f64),
            );
            if candidate.norm() > 0.1 {
                break candidate.normalize();
            }
        };

        let through = Point3::new(
            rng.gen_range(0.2..0.8),
            rng.gen_range(0.2..0.8),
            rng.gen_range(0.2..0.8),
        );

        // A triangle centered on `through`, large enough to span the whole
        // element cross-section.
        let u = if normal.x.abs() > normal.y.abs() {
            Vector3::new(-normal.z, 0.0, normal.x).normalize()
        } else {
            Vector3::new(0.0, normal.z, -normal.y).normalize()
        };
        let v = normal.cross(&u);

        let mut intersection = MeshIntersection::new();
        intersection
            .add_cut_side(
                1,
                &[
                    through + u * 20.0,
                    through - u * 10.0 + v * 17.0,
                    through - u * 10.0 - v * 17.0,
                ],
                CellType::Tri3,
            )
            .unwrap();
        intersection
            .add_element(1, &unit_hex_coords(1.0), CellType::Hex8)
            .unwrap();

        let result = intersection.cut().unwrap();
        let cut = result.element_cut(1).unwrap();

        assert_all_classified(cut);
        assert_relative_eq!(cut.volume(), 1.0, max_relative = 1.0e-9);
        assert!(
            cut.cells().len() >= 2,
            "trial {}: a plane through the interior must cut",
            trial
        );
    }
}

#[test]
fn two_parallel_planes_give_three_cells() {
    let mut intersection = hex_cut_by_plane(1.0, 0.25);
    intersection
        .add_cut_side(
            2,
            &[
                Point3::new(-10.0, -10.0, 0.75),
                Point3::new(20.0, -10.0, 0.75),
                Point3::new(-10.0, 20.0, 0.75),
            ],
            CellType::Tri3,
        )
        .unwrap();

    let result = intersection.cut().unwrap();
    let cut = result.element_cut(1).unwrap();

    assert_eq!(cut.cells().len(), 3);
    assert_all_classified(cut);
    assert_relative_eq!(cut.volume(), 1.0, max_relative = 1.0e-9);

    let mut volumes: Vec<f64> = cut
        .cells()
        .iter()
        .map(|c| c.volume(cut.points()))
        .collect();
    volumes.sort_by(|a, b| a.partial_cmp(b).unwrap());

    assert_relative_eq!(volumes[0], 0.25, max_relative = 1.0e-9);
    assert_relative_eq!(volumes[1], 0.25, max_relative = 1.0e-9);
    assert_relative_eq!(volumes[2], 0.5, max_relative = 1.0e-9);
}
