//! Quadrature-rule generation for volume cells and boundary facets.

pub use self::direct_divergence::direct_divergence_rule;
pub use self::moment_fitting::moment_fitting_rule;
pub use self::rule::{GaussPoint, QuadratureRule};
pub use self::rules::{line_rule, tet_rule, triangle_rule};
pub use self::tessellation::{facet_rule, tessellation_rule};

mod direct_divergence;
mod moment_fitting;
mod rule;
mod rules;
mod tessellation;
