//! The per-element cut driver: runs the whole pipeline for one background
//! element against a set of cutter sides.

use crate::error::CutError;
use crate::geometry::{PointOnEdge, Tolerances};
use crate::integrate;
use crate::intersect::edge_side::{intersect_edge_side, EdgeSideIntersection};
use crate::intersect::facets::{side_coincides_with_face, CutFacetRegion};
use crate::intersect::{position, tetmesh};
use crate::math::Real;
use crate::mesh::{
    Element, Facet, FacetId, FacetOrigin, PointId, PointPool, Side, VolumeCell,
};
use crate::options::{CutOptions, VolumeIntegrationScheme, VolumeMismatchPolicy};

/// A point produced by an edge/side intersection.
///
/// Cut points carry back-references to the edge and side that produced them;
/// this is lookup data for facet reconstruction and debugging, never an
/// ownership relation.
#[derive(Copy, Clone, Debug)]
pub struct CutPoint {
    /// The merged identity of the point in the pool.
    pub point: PointId,
    /// The local index of the element edge the point lies on.
    pub edge: usize,
    /// The parametric coordinate along that edge.
    pub t: Real,
    /// The caller-supplied id of the side that produced the point.
    pub side: u32,
    /// Whether the intersection was coincident (non-transversal): the edge
    /// runs inside the side plane, or the side lies in an element face.
    pub coincident: bool,
}

/// The result of cutting one background element.
///
/// Owns the point arena, the facet arena and the volume cells; everything is
/// dropped together when the cut result is discarded.
pub struct ElementCut {
    element: Element,
    pool: PointPool,
    facets: Vec<Facet>,
    cells: Vec<VolumeCell>,
    cut_points: Vec<CutPoint>,
}

impl ElementCut {
    /// The element this cut belongs to.
    #[inline]
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// The point arena of this cut.
    #[inline]
    pub fn points(&self) -> &PointPool {
        &self.pool
    }

    /// The facet arena of this cut.
    #[inline]
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// One facet by id.
    #[inline]
    pub fn facet(&self, id: FacetId) -> &Facet {
        &self.facets[id.index()]
    }

    /// The volume cells of this cut.
    #[inline]
    pub fn cells(&self) -> &[VolumeCell] {
        &self.cells
    }

    /// The edge/side cut points, for tracing and debugging.
    #[inline]
    pub fn cut_points(&self) -> &[CutPoint] {
        &self.cut_points
    }

    /// Whether any cutter actually cut through the element.
    pub fn is_cut(&self) -> bool {
        self.facets
            .iter()
            .any(|f| matches!(f.origin(), FacetOrigin::CutSide(_)))
    }

    /// The total volume of all cells.
    pub fn volume(&self) -> Real {
        self.cells.iter().map(|c| c.volume(&self.pool)).sum()
    }
}

/// Cuts one background element against a set of cutter sides.
///
/// This is a pure function of its inputs: it has no global state, so many
/// elements can be cut concurrently against shared `&[Side]` references.
///
/// ```
/// use cutcell::intersect::cut_element;
/// use cutcell::mesh::{Element, Position, Side};
/// use cutcell::options::CutOptions;
/// use cutcell::geometry::Tolerances;
/// use cutcell::shape::CellType;
/// use nalgebra::Point3;
///
/// let element = Element::new(
///     1,
///     &[
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(1.0, 1.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///         Point3::new(0.0, 0.0, 1.0),
///         Point3::new(1.0, 0.0, 1.0),
///         Point3::new(1.0, 1.0, 1.0),
///         Point3::new(0.0, 1.0, 1.0),
///     ],
///     CellType::Hex8,
/// )?;
///
/// // A triangle spanning the whole element at z = 0.25.
/// let side = Side::new(
///     1,
///     &[
///         Point3::new(-2.0, -2.0, 0.25),
///         Point3::new(4.0, -2.0, 0.25),
///         Point3::new(-2.0, 4.0, 0.25),
///     ],
///     CellType::Tri3,
///     &Tolerances::default(),
/// )?;
///
/// let cut = cut_element(&element, &[side], &CutOptions::default())?;
///
/// assert_eq!(cut.cells().len(), 2);
/// let inside: f64 = cut
///     .cells()
///     .iter()
///     .filter(|c| c.position() == Position::Inside)
///     .map(|c| c.volume(cut.points()))
///     .sum();
/// assert!((inside - 0.25).abs() < 1.0e-9);
/// # Ok::<(), cutcell::CutError>(())
/// ```
pub fn cut_element(
    element: &Element,
    sides: &[Side],
    options: &CutOptions,
) -> Result<ElementCut, CutError> {
    let mut tol = Tolerances::new(options.tolerance);
    if options.scale_tolerance {
        tol = tol.scaled_to(element.characteristic_length());
    }

    let mut pool = PointPool::new(tol);

    // Seed the pool with the element corners so they get the lowest, stable
    // identities, and record which faces each corner lies on.
    let corner_ids: Vec<PointId> = element
        .nodes()
        .iter()
        .map(|p| pool.insert(*p))
        .collect();
    for (f, face) in element.cell_type().faces().iter().enumerate() {
        for &n in *face {
            pool.register_on_face(corner_ids[n], f);
        }
    }

    // Pre-filter: only sides whose box overlaps the element box get exact
    // tests. This is the main performance lever when a background mesh is
    // cut by thousands of sides.
    let query_aabb = element.aabb().loosened(tol.point());
    let candidates: Vec<&Side> = sides
        .iter()
        .filter(|s| s.aabb().intersects(&query_aabb))
        .collect();

    // Coincident sides lie inside an element face: non-transversal contact
    // that must not generate cutting planes (and therefore no zero-volume
    // cells and no zero-area facets).
    let mut coincident = vec![false; candidates.len()];
    for (i, side) in candidates.iter().enumerate() {
        coincident[i] = side_coincides_with_face(side, element, &tol).is_some();
    }

    // Edge/side intersections (the cut points of the element edges).
    let mut cut_points = Vec::new();
    for edge_index in 0..element.cell_type().edges().len() {
        let (p0, p1) = element.edge(edge_index);

        for (i, side) in candidates.iter().enumerate() {
            match intersect_edge_side(&p0, &p1, side, options, &tol)? {
                EdgeSideIntersection::None => (),
                EdgeSideIntersection::Cut { point, t } => {
                    // Snap hits at the edge endpoints onto the corner
                    // identity, so the parametric coordinate agrees with the
                    // merged point.
                    let t = match tol.point_on_edge(&point, &p0, &p1) {
                        PointOnEdge::AtEndpoint(0) => 0.0,
                        PointOnEdge::AtEndpoint(_) => 1.0,
                        PointOnEdge::Interior(t) => t,
                        _ => t,
                    };

                    let id = pool.insert(point);
                    pool.register_on_side(id, i as u32);
                    cut_points.push(CutPoint {
                        point: id,
                        edge: edge_index,
                        t,
                        side: side.id(),
                        coincident: coincident[i],
                    });
                }
                EdgeSideIntersection::Coincident => {
                    // The edge runs inside the side plane: record its
                    // endpoints as on-boundary cut points.
                    for (endpoint, t) in [(p0, 0.0), (p1, 1.0)] {
                        let id = pool.insert(endpoint);
                        pool.register_on_side(id, i as u32);
                        cut_points.push(CutPoint {
                            point: id,
                            edge: edge_index,
                            t,
                            side: side.id(),
                            coincident: true,
                        });
                    }
                }
            }
        }
    }

    // Sort deterministically: cut points are reported edge by edge, ordered
    // along each edge.
    cut_points.sort_by_key(|cp| (cp.edge, ordered_float::OrderedFloat(cp.t), cp.side));

    // The cut-facet regions of every transversal candidate.
    let mut regions: Vec<CutFacetRegion> = Vec::new();
    for (i, side) in candidates.iter().enumerate() {
        if coincident[i] {
            continue;
        }
        regions.extend(CutFacetRegion::build(i as u32, side, element, &tol)?);
    }

    // Register the region corners: side nodes inside the element and the
    // crossings of side edges with element faces all become pool identities
    // associated with their side.
    for region in &regions {
        for p in &region.polygon {
            let id = pool.insert(*p);
            pool.register_on_side(id, region.side_index);
        }
    }

    // Decompose, clip and reassemble.
    let tet_cut = tetmesh::decompose_and_cut(element, &regions, &mut pool, &tol)?;
    let tetmesh::TetMeshCut {
        facets,
        mut cells,
        reference_volume,
        fine,
    } = tet_cut;

    // Classify every cell; ambiguity beyond the ray budget is fatal.
    position::classify_cells(
        &mut cells,
        &pool,
        element,
        &candidates,
        options.ray_retry_budget,
        &tol,
    )?;

    // Volume conservation: the cells must tile the reference decomposition.
    let total: Real = cells.iter().map(|c| c.volume(&pool)).sum();
    let drift = (total - reference_volume).abs();
    if drift > options.volume_rel_tol * reference_volume.max(Real::MIN_POSITIVE) {
        match options.on_volume_mismatch {
            VolumeMismatchPolicy::Warn => log::warn!(
                "element {}: cut cells cover {} of {} (drift {:e})",
                element.id(),
                total,
                reference_volume,
                drift
            ),
            VolumeMismatchPolicy::Fatal => {
                return Err(CutError::VolumeMismatch {
                    element: element.id(),
                    expected: reference_volume,
                    actual: total,
                });
            }
        }
    }

    // Quadrature, checked against the cell volume.
    for cell in &mut cells {
        let mut rule = match options.scheme {
            VolumeIntegrationScheme::Tessellation => {
                integrate::tessellation_rule(cell, &pool, options.gauss_order)
            }
            VolumeIntegrationScheme::DirectDivergence => {
                integrate::direct_divergence_rule(cell, &facets, &pool, options.gauss_order)
            }
            VolumeIntegrationScheme::MomentFitting => {
                integrate::moment_fitting_rule(cell, &facets, &pool, options.gauss_order)
            }
        };

        let cell_volume = cell.volume(&pool);
        let rule_volume = rule.total_weight();
        let drift = (rule_volume - cell_volume).abs();
        if drift > options.quadrature_rel_tol * cell_volume.max(Real::MIN_POSITIVE) {
            match options.on_volume_mismatch {
                VolumeMismatchPolicy::Warn => log::warn!(
                    "element {}: integration rule reproduces {} of {} (drift {:e})",
                    element.id(),
                    rule_volume,
                    cell_volume,
                    drift
                ),
                VolumeMismatchPolicy::Fatal => {
                    return Err(CutError::VolumeMismatch {
                        element: element.id(),
                        expected: cell_volume,
                        actual: rule_volume,
                    });
                }
            }
        }

        for gp in &mut rule.points {
            gp.local = element.local_coordinates(&gp.point, &tol);
        }

        cell.set_integration_rule(rule);
    }

    log::debug!(
        "element {}: {} candidate sides, {} regions, {} cells ({} decomposition), volume {:e}",
        element.id(),
        candidates.len(),
        regions.len(),
        cells.len(),
        if fine { "fine" } else { "coarse" },
        total
    );

    Ok(ElementCut {
        element: element.clone(),
        pool,
        facets,
        cells,
        cut_points,
    })
}
