//! The top-level driver collecting cutter sides and background elements.

use crate::error::CutError;
use crate::geometry::{Aabb, Tolerances};
use crate::intersect::element_cut::{cut_element, ElementCut};
use crate::math::{Point, Real};
use crate::mesh::{Element, Side};
use crate::options::CutOptions;
use crate::shape::CellType;

/// The result of cutting all registered elements.
pub struct CutResult {
    elements: Vec<ElementCut>,
}

impl CutResult {
    /// The cut of every registered element, in registration order.
    #[inline]
    pub fn elements(&self) -> &[ElementCut] {
        &self.elements
    }

    /// The cut of the element with the given caller id.
    pub fn element_cut(&self, id: u32) -> Option<&ElementCut> {
        self.elements.iter().find(|ec| ec.element().id() == id)
    }
}

/// Collects cutter sides and background elements, then runs the cut pipeline
/// on every element.
///
/// This mirrors how the surrounding finite-element code drives the engine:
/// register the cutter surface once, register the background cells, cut, and
/// hand the classified volume cells with their integration rules back to the
/// assembly loops.
///
/// ```
/// use cutcell::{MeshIntersection, Position};
/// use cutcell::shape::CellType;
/// use nalgebra::Point3;
///
/// let mut intersection = MeshIntersection::new();
///
/// intersection.add_cut_side(
///     1,
///     &[
///         Point3::new(-1.0, -1.0, 0.5),
///         Point3::new(3.0, -1.0, 0.5),
///         Point3::new(-1.0, 3.0, 0.5),
///     ],
///     CellType::Tri3,
/// )?;
///
/// intersection.add_element(
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
/// let result = intersection.cut()?;
/// let cut = result.element_cut(1).unwrap();
///
/// assert_eq!(cut.cells().len(), 2);
/// for cell in cut.cells() {
///     assert_ne!(cell.position(), Position::Undecided);
///     assert!(cell.integration_rule().is_some());
/// }
/// # Ok::<(), cutcell::CutError>(())
/// ```
pub struct MeshIntersection {
    options: CutOptions,
    sides: Vec<Side>,
    elements: Vec<Element>,
}

impl MeshIntersection {
    /// An empty intersection with default options.
    pub fn new() -> MeshIntersection {
        MeshIntersection::with_options(CutOptions::default())
    }

    /// An empty intersection with the given options.
    pub fn with_options(options: CutOptions) -> MeshIntersection {
        MeshIntersection {
            options,
            sides: Vec::new(),
            elements: Vec::new(),
        }
    }

    /// The options of this intersection.
    #[inline]
    pub fn options(&self) -> &CutOptions {
        &self.options
    }

    /// Mutable access to the options, before cutting.
    #[inline]
    pub fn options_mut(&mut self) -> &mut CutOptions {
        &mut self.options
    }

    /// Registers a cutter side.
    ///
    /// `id` traces which physical interface the side belongs to; several
    /// sides may share it. Degenerate sides are rejected here, before any
    /// element is cut.
    pub fn add_cut_side(
        &mut self,
        id: u32,
        coords: &[Point<Real>],
        cell_type: CellType,
    ) -> Result<(), CutError> {
        // Scale-invariant degeneracy checks at the side's own scale.
        let diameter = Aabb::from_points(coords).extents().norm();
        let tol = Tolerances::new(self.options.tolerance).scaled_to(diameter);

        let side = Side::new(id, coords, cell_type, &tol)?;
        self.sides.push(side);
        Ok(())
    }

    /// Registers a background element.
    pub fn add_element(
        &mut self,
        id: u32,
        coords: &[Point<Real>],
        cell_type: CellType,
    ) -> Result<(), CutError> {
        let element = Element::new(id, coords, cell_type)?;
        self.elements.push(element);
        Ok(())
    }

    /// The registered cutter sides.
    #[inline]
    pub fn sides(&self) -> &[Side] {
        &self.sides
    }

    /// The registered background elements.
    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Cuts every registered element against every registered side.
    ///
    /// Elements are independent: an error carries the id of the offending
    /// element and aborts the cut, since a corrupted cut topology must not
    /// reach the integral assembly.
    pub fn cut(&self) -> Result<CutResult, CutError> {
        let mut elements = Vec::with_capacity(self.elements.len());

        for element in &self.elements {
            elements.push(cut_element(element, &self.sides, &self.options)?);
        }

        Ok(CutResult { elements })
    }
}

impl Default for MeshIntersection {
    fn default() -> Self {
        MeshIntersection::new()
    }
}
