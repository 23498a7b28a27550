#![deny(missing_docs)]

//! Exact tiling of rectangular boards with
//! [polyominoes](https://en.wikipedia.org/wiki/Polyomino), pentominoes by
//! default.
//!
//! Two interchangeable strategies are provided:
//!  - [`backtracking_solve`] places the instances one by one on a [`Board`],
//!    pruning any partial board with an empty region that cannot be filled.
//!  - [`exact_cover_solve`] frames the puzzle as an
//!    [exact cover](https://en.wikipedia.org/wiki/Exact_cover) problem and
//!    runs [Algorithm X](https://en.wikipedia.org/wiki/Knuth%27s_Algorithm_X)
//!    with [Dancing Links](https://en.wikipedia.org/wiki/Dancing_Links).
//!
//! Both return the placement of every instance in input order, or `None` when
//! no tiling exists.

pub mod backtrack;
pub mod board;
pub mod catalog;
pub mod config;
pub mod error;
pub(crate) mod grid;
pub mod matrix;
pub mod observer;
pub mod solution;
pub(crate) mod solver;
pub mod tiling;

pub use backtrack::BacktrackingSolver;
pub use board::{Board, Placement};
pub use catalog::{pentominoes, Catalog, Footprint, ShapeCatalog, ShapeTransform};
pub use config::SolveConfig;
pub use error::{PlaceError, TilingError};
pub use grid::{Grid, NodeId};
pub use matrix::Matrix;
pub use observer::Observer;
pub use solution::SolutionTranslator;
pub use solver::Solver;
pub use tiling::Tiling;

/// An instance of an exact cover problem.
pub trait ExactCover {
    /// The type of values that are elements of a solution to the exact cover
    /// problem.
    type Possibility: core::fmt::Debug;

    /// The type of value that are constraints on a given instance of an exact
    /// cover problem.
    type Constraint: core::fmt::Debug;

    /// Return true if the given `Possibility` will satisfy the given
    /// `Constraint`.
    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool;

    /// Return true if the given `Constraint` is optional.
    fn is_optional(&self, cons: &Self::Constraint) -> bool;

    /// Return a list of possibilities for this instance of the problem.
    fn possibilities(&self) -> &[Self::Possibility];

    /// Return a list of constraints that must be satisfied for this instance of
    /// the problem.
    fn constraints(&self) -> &[Self::Constraint];

    /// Return the indices into [`ExactCover::constraints`] of every
    /// constraint satisfied by `poss`.
    ///
    /// The default tests every constraint with [`ExactCover::satisfies`].
    /// Problems that know the answer directly should override it, since the
    /// solver calls this once per possibility when building its grid.
    fn constraint_indices(&self, poss: &Self::Possibility) -> Vec<usize> {
        self.constraints()
            .iter()
            .enumerate()
            .filter(|(_, cons)| self.satisfies(poss, cons))
            .map(|(index, _)| index)
            .collect()
    }

    /// Return an iterator over all solutions to this instance of the exact
    /// cover problem.
    fn solver(&self) -> Solver<Self>
    where
        Self: Sized,
    {
        Solver::new(self)
    }
}

impl<E> ExactCover for &E
where
    E: ExactCover,
{
    type Constraint = E::Constraint;
    type Possibility = E::Possibility;

    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool {
        <E as ExactCover>::satisfies(self, poss, cons)
    }

    fn is_optional(&self, cons: &Self::Constraint) -> bool {
        <E as ExactCover>::is_optional(self, cons)
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        <E as ExactCover>::possibilities(self)
    }

    fn constraints(&self) -> &[Self::Constraint] {
        <E as ExactCover>::constraints(self)
    }

    fn constraint_indices(&self, poss: &Self::Possibility) -> Vec<usize> {
        <E as ExactCover>::constraint_indices(self, poss)
    }
}

/// Tile a `width` × `height` board with the given shape instances by direct
/// backtracking.
///
/// # Errors
///  - [`TilingError::InvalidDimensions`] if the board area is not a positive
///    multiple of the catalog's cell area.
///  - [`TilingError::UnknownShape`] if an instance is not in the catalog.
pub fn backtracking_solve<C>(
    catalog: &C,
    width: usize,
    height: usize,
    instances: &[char],
) -> Result<Option<Vec<Placement>>, TilingError>
where
    C: ShapeCatalog + ?Sized,
{
    backtracking_solve_with(catalog, width, height, instances, SolveConfig::default(), ())
}

/// [`backtracking_solve`] with explicit settings and an observer.
///
/// # Errors
///
/// As [`backtracking_solve`], plus [`TilingError::StepLimitExceeded`] when
/// the configured step limit is reached.
pub fn backtracking_solve_with<C, O>(
    catalog: &C,
    width: usize,
    height: usize,
    instances: &[char],
    config: SolveConfig,
    observer: O,
) -> Result<Option<Vec<Placement>>, TilingError>
where
    C: ShapeCatalog + ?Sized,
    O: Observer,
{
    BacktrackingSolver::new(catalog, width, height, instances)?
        .with_config(config)
        .with_observer(observer)
        .solve()
}

/// Tile a `width` × `height` board with the given shape instances by solving
/// the equivalent exact cover problem.
///
/// # Errors
///  - [`TilingError::InvalidDimensions`] if the board area is not a positive
///    multiple of the catalog's cell area.
///  - [`TilingError::UnknownShape`] if an instance is not in the catalog.
pub fn exact_cover_solve<C>(
    catalog: &C,
    width: usize,
    height: usize,
    instances: &[char],
) -> Result<Option<Vec<Placement>>, TilingError>
where
    C: ShapeCatalog + ?Sized,
{
    exact_cover_solve_with(catalog, width, height, instances, SolveConfig::default(), ())
}

/// [`exact_cover_solve`] with explicit settings and an observer.
///
/// Only the step limit of `config` applies to this strategy. The observer is
/// notified once, when the search ends.
///
/// # Errors
///
/// As [`exact_cover_solve`], plus [`TilingError::StepLimitExceeded`] when the
/// configured step limit is reached.
pub fn exact_cover_solve_with<C, O>(
    catalog: &C,
    width: usize,
    height: usize,
    instances: &[char],
    config: SolveConfig,
    mut observer: O,
) -> Result<Option<Vec<Placement>>, TilingError>
where
    C: ShapeCatalog + ?Sized,
    O: Observer,
{
    let tiling = Tiling::new(catalog, width, height, instances)?;
    let translator = SolutionTranslator::new(&tiling);

    let instance_cells = tiling.instance_count() * tiling.cell_area();
    if instance_cells != width * height {
        log::info!(
            "Instances cover [{}] cells but the board has [{}], no tiling exists.",
            instance_cells,
            width * height
        );
        observer.finished(&Board::new(width, height), false);
        return Ok(None);
    }

    let mut solver = tiling.solver();
    if let Some(step_limit) = config.step_limit {
        solver = solver.with_step_limit(step_limit);
    }

    let outcome = solver.first_solution();
    log::debug!(
        "Dancing links search finished after [{}] steps, solved: [{}].",
        solver.steps(),
        matches!(outcome, Ok(Some(_)))
    );

    match outcome {
        Ok(Some(rows)) => {
            let placements = translator.placements(&rows);
            observer.finished(&translator.board(&placements), true);
            Ok(Some(placements))
        }
        Ok(None) => {
            observer.finished(&Board::new(width, height), false);
            Ok(None)
        }
        Err(err) => {
            observer.finished(&Board::new(width, height), false);
            Err(err)
        }
    }
}
