//! A [polyomino tiling puzzle](https://en.wikipedia.org/wiki/Polyomino#Tiling_with_polyominoes)
//! framed as an exact cover problem.
//!
//! Every in-bounds placement of every instance becomes one possibility. The
//! constraints are one column per instance, so each instance is used exactly
//! once, followed by one column per board cell in row-major order, so each
//! cell is covered exactly once. Overlaps are not filtered while building;
//! the cell columns forbid them during the search.

use crate::{
    backtrack::in_bounds_placements,
    board::Placement,
    catalog::{self, Footprint, ShapeCatalog},
    error::TilingError,
    ExactCover,
};

/// Instance of a tiling puzzle over a fixed board and instance list.
#[derive(Debug)]
pub struct Tiling<'c> {
    width: usize,
    height: usize,
    cell_area: usize,
    mutations: Vec<&'c [Footprint]>,
    possibilities: Vec<Possibility>,
    constraints: Vec<Constraint>,
}

impl<'c> Tiling<'c> {
    /// Build the exact cover problem of tiling a `width` × `height` board with
    /// the given shape instances.
    ///
    /// # Errors
    ///  - [`TilingError::InvalidDimensions`] if the board area is not a
    ///    positive multiple of the catalog's cell area.
    ///  - [`TilingError::UnknownShape`] if an instance is not in the catalog.
    pub fn new<C>(
        catalog: &'c C,
        width: usize,
        height: usize,
        instances: &[char],
    ) -> Result<Self, TilingError>
    where
        C: ShapeCatalog + ?Sized,
    {
        let mutations = catalog::resolve_instances(catalog, width, height, instances)?;

        let possibilities: Vec<_> = instances
            .iter()
            .zip(&mutations)
            .enumerate()
            .flat_map(|(instance, (&shape, footprints))| {
                in_bounds_placements(shape, footprints, width, height)
                    .into_iter()
                    .map(move |placement| Possibility {
                        instance,
                        placement,
                        cells: placement
                            .cells(&footprints[placement.mutation])
                            .collect(),
                    })
            })
            .collect();
        let constraints = Constraint::all(width, height, instances.len()).collect();

        log::debug!(
            "Built [{}] rows for [{}] instances on a [{}x{}] board.",
            possibilities.len(),
            instances.len(),
            width,
            height
        );

        Ok(Self {
            width,
            height,
            cell_area: catalog.cell_area(),
            mutations,
            possibilities,
            constraints,
        })
    }

    /// Return the board width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Return the board height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Return the number of cells covered by every shape.
    pub fn cell_area(&self) -> usize {
        self.cell_area
    }

    /// Return the number of instances to place.
    pub fn instance_count(&self) -> usize {
        self.mutations.len()
    }

    /// Return the footprint a placement of the given instance was built from.
    pub fn footprint(&self, instance: usize, placement: &Placement) -> &'c Footprint {
        &self.mutations[instance][placement.mutation]
    }

    /// Return the matrix row of the possibility at `index` as a bit vector:
    /// the one-hot instance segment, then one bit per board cell in row-major
    /// order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a possibility of this problem.
    pub fn row_bits(&self, index: usize) -> Vec<bool> {
        let possibility = &self.possibilities[index];
        self.constraints
            .iter()
            .map(|constraint| possibility.satisfies(constraint))
            .collect()
    }
}

impl<'c> ExactCover for Tiling<'c> {
    type Constraint = Constraint;
    type Possibility = Possibility;

    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool {
        poss.satisfies(cons)
    }

    fn is_optional(&self, _cons: &Self::Constraint) -> bool {
        false
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        &self.possibilities
    }

    fn constraints(&self) -> &[Self::Constraint] {
        &self.constraints
    }

    fn constraint_indices(&self, poss: &Self::Possibility) -> Vec<usize> {
        let instance_count = self.instance_count();
        std::iter::once(poss.instance)
            .chain(
                poss.cells
                    .iter()
                    .map(|&(row, column)| instance_count + row * self.width + column),
            )
            .collect()
    }
}

/// A possible placement of one instance on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Possibility {
    /// Index of the instance in the input list.
    pub instance: usize,
    /// Shape, mutation and origin of the placement.
    pub placement: Placement,
    /// Board cells covered by the placement, in row-major order.
    pub cells: Vec<(usize, usize)>,
}

impl Possibility {
    /// Check if this possibility satisfies a given constraint.
    pub fn satisfies(&self, constraint: &Constraint) -> bool {
        match constraint {
            Constraint::Instance(index) => self.instance == *index,
            Constraint::Cell(row, column) => self.cells.binary_search(&(*row, *column)).is_ok(),
        }
    }
}

/// A condition that must be satisfied in order to solve a tiling puzzle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Constraint {
    /// The instance with this index must be placed exactly once.
    Instance(usize),
    /// The cell at `(row, column)` must be covered exactly once.
    Cell(usize, usize),
}

impl Constraint {
    /// Return an iterator over all `Constraint`s for a given board size and
    /// number of instances, instances first.
    pub fn all(width: usize, height: usize, instance_count: usize) -> impl Iterator<Item = Self> {
        let instance_it = (0..instance_count).map(Constraint::Instance);
        let cell_it =
            (0..height).flat_map(move |row| (0..width).map(move |column| Constraint::Cell(row, column)));

        instance_it.chain(cell_it)
    }
}
