use crate::common::hex_cut_by_plane;
use approx::assert_relative_eq;
use cutcell::mesh::Position;
use cutcell::options::{CutOptions, VolumeIntegrationScheme};

fn inside_rule_integral(
    scheme: VolumeIntegrationScheme,
    order: u32,
    f: impl FnMut(&nalgebra::Point3<f64>) -> f64,
) -> f64 {
    let mut intersection = hex_cut_by_plane(1.0, 0.25);
    intersection.options_mut().scheme = scheme;
    intersection.options_mut().gauss_order = order;

    let result = intersection.cut().unwrap();
    let cut = result.element_cut(1).unwrap();

    let inside = cut
        .cells()
        .iter()
        .find(|c| c.position() == Position::Inside)
        .unwrap();

    inside.integration_rule().unwrap().integrate(f)
}

// The inside piece is the box [0, 1] x [0, 1] x [0, 0.25]; all the reference
// integrals below are closed-form.

#[test]
fn tessellation_integrates_polynomials_exactly() {
    let scheme = VolumeIntegrationScheme::Tessellation;

    assert_relative_eq!(
        inside_rule_integral(scheme, 2, |_| 1.0),
        0.25,
        max_relative = 1.0e-10
    );
    assert_relative_eq!(
        inside_rule_integral(scheme, 2, |p| p.x),
        0.125,
        max_relative = 1.0e-10
    );
    assert_relative_eq!(
        inside_rule_integral(scheme, 2, |p| p.z),
        0.25 * 0.25 / 2.0,
        max_relative = 1.0e-10
    );
    assert_relative_eq!(
        inside_rule_integral(scheme, 2, |p| p.x * p.x),
        0.25 / 3.0,
        max_relative = 1.0e-10
    );
    assert_relative_eq!(
        inside_rule_integral(scheme, 2, |p| p.x * p.y),
        0.0625,
        max_relative = 1.0e-10
    );
    assert_relative_eq!(
        inside_rule_integral(scheme, 3, |p| p.z * p.z * p.z),
        0.25_f64.powi(4) / 4.0,
        max_relative = 1.0e-10
    );
}

#[test]
fn direct_divergence_integrates_polynomials_exactly() {
    let scheme = VolumeIntegrationScheme::DirectDivergence;

    assert_relative_eq!(
        inside_rule_integral(scheme, 2, |_| 1.0),
        0.25,
        max_relative = 1.0e-10
    );
    assert_relative_eq!(
        inside_rule_integral(scheme, 2, |p| p.x),
        0.125,
        max_relative = 1.0e-10
    );
    assert_relative_eq!(
        inside_rule_integral(scheme, 2, |p| p.x * p.z),
        0.5 * 0.25 * 0.25 / 2.0,
        max_relative = 1.0e-10
    );
}

#[test]
fn moment_fitting_integrates_polynomials_exactly() {
    let scheme = VolumeIntegrationScheme::MomentFitting;

    assert_relative_eq!(
        inside_rule_integral(scheme, 2, |_| 1.0),
        0.25,
        max_relative = 1.0e-9
    );
    assert_relative_eq!(
        inside_rule_integral(scheme, 2, |p| p.y),
        0.125,
        max_relative = 1.0e-9
    );
    assert_relative_eq!(
        inside_rule_integral(scheme, 2, |p| p.y * p.y),
        0.25 / 3.0,
        max_relative = 1.0e-9
    );
}

#[test]
fn quadrature_order_reaches_the_tabulated_maximum() {
    let scheme = VolumeIntegrationScheme::Tessellation;

    // Degree 5 in z over the box: z^5 integrates to 0.25^6 / 6.
    assert_relative_eq!(
        inside_rule_integral(scheme, 5, |p| p.z.powi(5)),
        0.25_f64.powi(6) / 6.0,
        max_relative = 1.0e-10
    );
}
