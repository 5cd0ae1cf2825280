//! Configuration of a cut operation.

use crate::math::Real;

/// The default absolute base tolerance for point coincidence, before scaling
/// by the characteristic element length.
pub const DEFAULT_TOLERANCE: Real = 1.0e-12;

/// The scheme used to generate the volume integration rule of a cut cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum VolumeIntegrationScheme {
    /// Map a symmetric tetrahedral Gauss rule over each integration
    /// tetrahedron of the cell.
    #[default]
    Tessellation,
    /// Fit the weights of a fixed point set so that the monomial moments of
    /// the cell, computed exactly from its boundary facets, are reproduced.
    MomentFitting,
    /// Build the rule directly from boundary-facet Gauss points and interior
    /// integration lines (divergence theorem). Less sensitive to very thin
    /// integration tetrahedra than tessellation.
    DirectDivergence,
}

/// What to do when the integration rule of a cell fails to reproduce the cell
/// volume within tolerance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum VolumeMismatchPolicy {
    /// Log a warning and keep the rule. The mismatch indicates reduced
    /// accuracy, not a wrong topology.
    #[default]
    Warn,
    /// Fail the cut of the affected element.
    Fatal,
}

/// Configuration of the cut pipeline.
///
/// The defaults are appropriate for well-scaled meshes. All epsilon decisions
/// of the pipeline derive from [`CutOptions::tolerance`], scaled by the
/// characteristic length of the element being cut (see
/// [`Tolerances`](crate::geometry::Tolerances)).
///
/// ```
/// use cutcell::options::{CutOptions, VolumeIntegrationScheme};
///
/// let options = CutOptions {
///     scheme: VolumeIntegrationScheme::DirectDivergence,
///     gauss_order: 3,
///     ..CutOptions::default()
/// };
/// assert_eq!(options.newton_max_iter, 20);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CutOptions {
    /// Absolute base tolerance for point coincidence.
    pub tolerance: Real,
    /// Scale `tolerance` by the characteristic length of each element. Keeps
    /// the cut scale-invariant; disable only to reproduce a fixed absolute
    /// epsilon across all elements.
    pub scale_tolerance: bool,
    /// Iteration cap of the Newton solve used for edge intersections with
    /// bilinear quad sides. Exceeding the cap triggers the triangle-split
    /// fallback.
    pub newton_max_iter: u32,
    /// How many ray directions the inside/outside classification may try
    /// before giving up on an element.
    pub ray_retry_budget: u32,
    /// The volume integration scheme.
    pub scheme: VolumeIntegrationScheme,
    /// Polynomial order the integration rules must reproduce.
    pub gauss_order: u32,
    /// Relative tolerance of the volume-conservation check (sum of cell
    /// volumes against the element volume).
    pub volume_rel_tol: Real,
    /// Relative tolerance of the per-cell quadrature volume check.
    pub quadrature_rel_tol: Real,
    /// Escalation policy for the quadrature volume check.
    pub on_volume_mismatch: VolumeMismatchPolicy,
}

impl Default for CutOptions {
    fn default() -> Self {
        CutOptions {
            tolerance: DEFAULT_TOLERANCE,
            scale_tolerance: true,
            newton_max_iter: 20,
            ray_retry_budget: 12,
            scheme: VolumeIntegrationScheme::default(),
            gauss_order: 2,
            volume_rel_tol: 1.0e-9,
            quadrature_rel_tol: 1.0e-10,
            on_volume_mismatch: VolumeMismatchPolicy::default(),
        }
    }
}
