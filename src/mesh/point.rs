use crate::geometry::Tolerances;
use crate::math::{Point, Real};
use smallvec::SmallVec;
use std::ops::Index;

/// The index of a point inside a [`PointPool`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PointId(pub u32);

impl PointId {
    /// This id as an index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The arena of points produced while cutting one element.
///
/// Inserting a coordinate within tolerance of an existing point returns the
/// existing identity instead of creating a new one, so the pool never carries
/// two distinct points that are geometrically coincident. Insertion order is
/// deterministic, which makes the whole cut deterministic.
///
/// Each point additionally records which cutter sides and which element faces
/// it is known to lie on. These association sets are lookup data for facet
/// reconstruction, not ownership.
#[derive(Clone, Debug)]
pub struct PointPool {
    tol: Tolerances,
    pts: Vec<Point<Real>>,
    on_sides: Vec<SmallVec<[u32; 4]>>,
    on_faces: Vec<u8>,
}

impl PointPool {
    /// An empty pool with the given tolerance policy.
    pub fn new(tol: Tolerances) -> Self {
        PointPool {
            tol,
            pts: Vec::new(),
            on_sides: Vec::new(),
            on_faces: Vec::new(),
        }
    }

    /// The tolerance policy of this pool.
    #[inline]
    pub fn tolerances(&self) -> &Tolerances {
        &self.tol
    }

    /// The number of distinct points in this pool.
    #[inline]
    pub fn len(&self) -> usize {
        self.pts.len()
    }

    /// Whether this pool is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    /// Inserts a coordinate, merging it with an existing point if one lies
    /// within tolerance.
    pub fn insert(&mut self, p: Point<Real>) -> PointId {
        for (i, q) in self.pts.iter().enumerate() {
            if self.tol.same_point(&p, q) {
                return PointId(i as u32);
            }
        }

        self.pts.push(p);
        self.on_sides.push(SmallVec::new());
        self.on_faces.push(0);
        PointId(self.pts.len() as u32 - 1)
    }

    /// Looks a coordinate up without inserting it.
    pub fn find(&self, p: &Point<Real>) -> Option<PointId> {
        self.pts
            .iter()
            .position(|q| self.tol.same_point(p, q))
            .map(|i| PointId(i as u32))
    }

    /// Records that a point lies on the cutter side with the given index.
    pub fn register_on_side(&mut self, id: PointId, side: u32) {
        let set = &mut self.on_sides[id.index()];
        if !set.contains(&side) {
            set.push(side);
        }
    }

    /// Records that a point lies on the element face with the given index.
    pub fn register_on_face(&mut self, id: PointId, face: usize) {
        self.on_faces[id.index()] |= 1 << face;
    }

    /// The cutter sides this point is known to lie on.
    #[inline]
    pub fn sides_of(&self, id: PointId) -> &[u32] {
        &self.on_sides[id.index()]
    }

    /// The bitmask of element faces this point is known to lie on.
    #[inline]
    pub fn faces_of(&self, id: PointId) -> u8 {
        self.on_faces[id.index()]
    }

    /// Iterates over all points of the pool.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, &Point<Real>)> {
        self.pts
            .iter()
            .enumerate()
            .map(|(i, p)| (PointId(i as u32), p))
    }
}

impl Index<PointId> for PointPool {
    type Output = Point<Real>;

    #[inline]
    fn index(&self, id: PointId) -> &Point<Real> {
        &self.pts[id.index()]
    }
}
