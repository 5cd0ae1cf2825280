//! Tetrahedral decomposition of the element, clipping of the sub-tetrahedra
//! against the cut regions, and re-assembly of the fragments into
//! element-level volume cells.
//!
//! Clipping arbitrary hexahedra or wedges directly against several
//! non-axis-aligned cutting planes is error-prone near edges and corners.
//! Reducing the element to tetrahedra first means only one clipping
//! primitive (convex polyhedron against a half-space) has to be robust, and
//! that robustness transfers to every parent cell type.

use crate::error::CutError;
use crate::geometry::Tolerances;
use crate::intersect::clip::ConvexPolyhedron;
use crate::intersect::facets::CutFacetRegion;
use crate::math::Real;
use crate::mesh::{
    Element, Facet, FacetId, FacetOrigin, IntegrationCell, PointId, PointPool, VolumeCell,
};
use ena::unify::{InPlaceUnificationTable, UnifyKey};
use std::collections::HashMap;

/// The result of decomposing and clipping one element.
pub(crate) struct TetMeshCut {
    /// The facet arena of the element cut.
    pub facets: Vec<Facet>,
    /// The assembled, still unclassified volume cells.
    pub cells: Vec<VolumeCell>,
    /// The volume of the reference decomposition, the baseline of the
    /// volume-conservation check.
    pub reference_volume: Real,
    /// Whether the fine (24-tet) decomposition was selected.
    pub fine: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct FragmentKey(u32);

impl UnifyKey for FragmentKey {
    type Value = ();

    fn index(&self) -> u32 {
        self.0
    }

    fn from_index(u: u32) -> FragmentKey {
        FragmentKey(u)
    }

    fn tag() -> &'static str {
        "FragmentKey"
    }
}

/// What one fragment boundary face lies on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FaceKind {
    /// On a cut region: (region index, side index).
    Cut(usize, u32),
    /// On the element boundary.
    Boundary(usize),
    /// Between two fragments of the same cell; merged away.
    Internal,
}

struct FragmentFace {
    key: Vec<PointId>,
    corners: Vec<PointId>,
    kind: FaceKind,
}

struct Fragment {
    poly: ConvexPolyhedron,
    faces: Vec<FragmentFace>,
}

/// Decomposes the element into sub-tetrahedra, clips them against the cut
/// regions, and merges the resulting fragments back into volume cells by
/// facet adjacency.
pub(crate) fn decompose_and_cut(
    element: &Element,
    regions: &[CutFacetRegion],
    pool: &mut PointPool,
    tol: &Tolerances,
) -> Result<TetMeshCut, CutError> {
    let eps = tol.point();

    // Heuristic for the decomposition fineness: one cutting plane through a
    // hexahedron is handled by the 6-tet decomposition; several distinct
    // planes get the 24-tet decomposition whose conforming interior faces
    // keep every sub-piece convex.
    let fine = count_distinct_planes(regions, eps) > 1;

    let sub_tets = element.decomposition_tets(fine);
    let reference_volume: Real = sub_tets.iter().map(|t| t.volume()).sum();

    // 1: clip every sub-tetrahedron against every region whose plane
    // strictly straddles it. The straddle criterion is evaluated on the
    // sub-tet corners, so two sub-tets sharing a face always agree on
    // whether that face gets clipped; this keeps fragment faces conforming
    // across sub-tet interfaces.
    let mut fragments: Vec<ConvexPolyhedron> = Vec::new();

    for tet in &sub_tets {
        let mut pieces = vec![ConvexPolyhedron::from_tetrahedron(tet)];

        for region in regions {
            let mut next = Vec::with_capacity(pieces.len() + 1);

            for piece in pieces {
                let mut min_d = Real::MAX;
                let mut max_d = -Real::MAX;
                for pt in piece.corners() {
                    let d = region.plane.signed_distance(pt);
                    min_d = min_d.min(d);
                    max_d = max_d.max(d);
                }

                if min_d < -eps && max_d > eps {
                    let (back, front) = piece.split(&region.plane, eps);
                    next.extend(back);
                    next.extend(front);
                } else {
                    next.push(piece);
                }
            }

            pieces = next;
        }

        fragments.extend(pieces);
    }

    // 2: snap the fragment faces into the point pool and attribute them.
    let fragments: Vec<Fragment> = fragments
        .into_iter()
        .map(|poly| {
            let faces = attribute_faces(&poly, element, regions, pool, tol);
            Fragment { poly, faces }
        })
        .collect();

    // 3: merge fragments sharing an internal face into one cell.
    let mut table: InPlaceUnificationTable<FragmentKey> = InPlaceUnificationTable::new();
    let keys: Vec<FragmentKey> = fragments.iter().map(|_| table.new_key(())).collect();

    let mut face_owners: HashMap<&[PointId], u32> = HashMap::new();
    for (i, fragment) in fragments.iter().enumerate() {
        for face in &fragment.faces {
            if face.kind != FaceKind::Internal {
                continue;
            }

            if let Some(other) = face_owners.insert(&face.key, i as u32) {
                table.union(keys[other as usize], keys[i]);
            }
        }
    }

    // 4: assemble the cells, in the deterministic first-seen order of the
    // union-find roots.
    let mut root_to_cell: HashMap<u32, usize> = HashMap::new();
    let mut cell_members: Vec<Vec<usize>> = Vec::new();

    for (i, key) in keys.iter().enumerate() {
        let root = table.find(*key).0;
        let cell = *root_to_cell.entry(root).or_insert_with(|| {
            cell_members.push(Vec::new());
            cell_members.len() - 1
        });
        cell_members[cell].push(i);
    }

    let face_planes = element.face_planes();
    let mut facet_arena: Vec<Facet> = Vec::new();
    let mut facet_ids: HashMap<Vec<PointId>, FacetId> = HashMap::new();
    let mut cells: Vec<VolumeCell> = Vec::new();

    for members in &cell_members {
        let mut cell_facets: Vec<FacetId> = Vec::new();
        let mut integration_cells: Vec<IntegrationCell> = Vec::new();

        for &fi in members {
            let fragment = &fragments[fi];

            for face in &fragment.faces {
                let origin = match face.kind {
                    FaceKind::Cut(_, side) => FacetOrigin::CutSide(side),
                    FaceKind::Boundary(f) => FacetOrigin::ElementFace(f),
                    FaceKind::Internal => continue,
                };

                let fid = match facet_ids.get(&face.key) {
                    Some(&fid) => fid,
                    None => {
                        // Cut facets carry the side-oriented region plane so
                        // the caller sees the interface orientation. Boundary
                        // facets carry their own supporting plane, which on a
                        // warped hexahedron face differs from the average
                        // plane of the whole face.
                        let plane = match face.kind {
                            FaceKind::Cut(r, _) => regions[r].plane,
                            FaceKind::Boundary(f) => {
                                let coords: Vec<_> =
                                    face.corners.iter().map(|&id| pool[id]).collect();
                                crate::geometry::Plane::from_points(&coords)
                                    .unwrap_or(face_planes[f])
                            }
                            FaceKind::Internal => unreachable!(),
                        };
                        let fid = FacetId(facet_arena.len() as u32);
                        facet_arena.push(Facet::new(face.corners.clone(), origin, plane));
                        let _ = facet_ids.insert(face.key.clone(), fid);
                        fid
                    }
                };

                if !cell_facets.contains(&fid) {
                    cell_facets.push(fid);
                }
            }

            integration_cells.extend(tessellate_fragment(fragment, pool, element, eps));
        }

        if integration_cells.is_empty() {
            // The whole group degenerated to slivers below the snapping
            // tolerance; it carries no volume worth a cell.
            log::debug!("element {}: dropping a zero-volume cell", element.id());
            continue;
        }

        cells.push(VolumeCell::new(cell_facets, integration_cells));
    }

    Ok(TetMeshCut {
        facets: facet_arena,
        cells,
        reference_volume,
        fine,
    })
}

/// Snaps the faces of a fragment into the pool and decides what each lies on.
fn attribute_faces(
    poly: &ConvexPolyhedron,
    element: &Element,
    regions: &[CutFacetRegion],
    pool: &mut PointPool,
    tol: &Tolerances,
) -> Vec<FragmentFace> {
    let eps = tol.point();
    let mut out = Vec::with_capacity(poly.faces.len());

    for face in &poly.faces {
        let mut corners: Vec<PointId> = Vec::with_capacity(face.len());
        for pt in face {
            let id = pool.insert(*pt);
            if corners.last() != Some(&id) && corners.first() != Some(&id) {
                corners.push(id);
            }
        }

        if corners.len() < 3 {
            continue;
        }

        let coords: Vec<_> = corners.iter().map(|&id| pool[id]).collect();
        let centroid = crate::utils::center(&coords);

        let mut kind = FaceKind::Internal;

        for (r, region) in regions.iter().enumerate() {
            let on_plane = coords
                .iter()
                .all(|p| region.plane.signed_distance(p).abs() <= 4.0 * eps);

            if on_plane && region.contains(&centroid, tol) {
                kind = FaceKind::Cut(r, region.side_index);
                break;
            }
        }

        if kind == FaceKind::Internal {
            if let Some(f) = element.boundary_face_at(&centroid, tol) {
                kind = FaceKind::Boundary(f);
            }
        }

        if let FaceKind::Cut(_, side) = kind {
            for &id in &corners {
                pool.register_on_side(id, side);
            }
        }
        if let FaceKind::Boundary(f) = kind {
            for &id in &corners {
                pool.register_on_face(id, f);
            }
        }

        let mut key = corners.clone();
        key.sort_unstable();

        out.push(FragmentFace {
            key,
            corners,
            kind,
        });
    }

    out
}

/// Tetrahedralizes a convex fragment by a fan around its centroid.
fn tessellate_fragment(
    fragment: &Fragment,
    pool: &mut PointPool,
    element: &Element,
    eps: Real,
) -> Vec<IntegrationCell> {
    let center = fragment.poly.interior_point();
    let center_id = pool.insert(center);

    // Slivers far below the snapping tolerance carry no volume; their sum
    // stays well inside the conservation tolerance.
    let scale = element.characteristic_length();
    let vol_eps = 0.01 * eps * scale * scale;

    let mut out = Vec::new();

    for face in &fragment.faces {
        for i in 1..face.corners.len() - 1 {
            let nodes = [
                center_id,
                face.corners[0],
                face.corners[i],
                face.corners[i + 1],
            ];
            let ic = IntegrationCell::new(nodes, pool);
            if ic.tet(pool).volume() > vol_eps {
                out.push(ic);
            }
        }
    }

    out
}

fn count_distinct_planes(regions: &[CutFacetRegion], eps: Real) -> usize {
    let mut distinct: Vec<&CutFacetRegion> = Vec::new();

    'next: for region in regions {
        for seen in &distinct {
            let aligned = region.plane.normal.dot(&seen.plane.normal).abs() > 1.0 - 1.0e-9;
            let same_offset = (region.plane.offset.abs() - seen.plane.offset.abs()).abs()
                <= eps.max(1.0e-12 * region.plane.offset.abs());
            if aligned && same_offset {
                continue 'next;
            }
        }
        distinct.push(region);
    }

    distinct.len()
}
