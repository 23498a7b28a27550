//! Depth-first search over direct placements on a [`Board`].
//!
//! Instances are placed one per depth in input order. At each depth the
//! candidates are tried by mutation index, then row-major origin. After every
//! successful placement the board is checked for dead regions, which cuts
//! branches that provably cannot be completed.

use crate::{
    board::{Board, Placement},
    catalog::{self, Footprint, ShapeCatalog},
    config::SolveConfig,
    error::TilingError,
    observer::Observer,
};

/// Backtracking tiling solver.
#[derive(Debug)]
pub struct BacktrackingSolver<'c, O = ()> {
    mutations: Vec<&'c [Footprint]>,
    // In-bounds placements for each instance, in canonical order
    candidates: Vec<Vec<Placement>>,
    cell_area: usize,
    board: Board,
    config: SolveConfig,
    observer: O,

    // Values used to track the state of solving
    stack: Vec<Frame>,
    steps: u64,
}

#[derive(Debug, Default)]
struct Frame {
    // Index of the next candidate to try at this depth
    next: usize,
    placed: Option<Placement>,
}

impl<'c> BacktrackingSolver<'c> {
    /// Create a solver for tiling a `width` × `height` board with the given
    /// shape instances.
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

        let candidates = instances
            .iter()
            .zip(&mutations)
            .map(|(&shape, footprints)| in_bounds_placements(shape, footprints, width, height))
            .collect();

        Ok(Self {
            mutations,
            candidates,
            cell_area: catalog.cell_area(),
            board: Board::new(width, height),
            config: SolveConfig::default(),
            observer: (),
            stack: Vec::new(),
            steps: 0,
        })
    }
}

impl<'c, O> BacktrackingSolver<'c, O>
where
    O: Observer,
{
    /// Replace the search settings.
    pub fn with_config(self, config: SolveConfig) -> Self {
        Self { config, ..self }
    }

    /// Attach an observer that is notified of every placement and removal.
    pub fn with_observer<P: Observer>(self, observer: P) -> BacktrackingSolver<'c, P> {
        BacktrackingSolver {
            mutations: self.mutations,
            candidates: self.candidates,
            cell_area: self.cell_area,
            board: self.board,
            config: self.config,
            observer,
            stack: self.stack,
            steps: self.steps,
        }
    }

    /// Return the board. After a successful solve it holds the tiling.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Return the number of candidate placements tried by the last solve.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Search for a tiling, returning the placement of each instance in input
    /// order, or `None` if no tiling exists.
    ///
    /// # Errors
    ///
    /// [`TilingError::StepLimitExceeded`] if the configured step limit is
    /// reached. The board is left empty in that case.
    pub fn solve(&mut self) -> Result<Option<Vec<Placement>>, TilingError> {
        self.reset();

        let instance_cells = self.mutations.len() * self.cell_area;
        let board_cells = self.board.width() * self.board.height();
        if instance_cells != board_cells {
            log::info!(
                "Instances cover [{}] cells but the board has [{}], no tiling exists.",
                instance_cells,
                board_cells
            );
            self.observer.finished(&self.board, false);
            return Ok(None);
        }

        log::debug!(
            "Starting backtracking search for [{}] instances on a [{}x{}] board.",
            self.mutations.len(),
            self.board.width(),
            self.board.height()
        );

        let outcome = self.search();

        log::debug!(
            "Backtracking search finished after [{}] steps, solved: [{}].",
            self.steps,
            matches!(outcome, Ok(Some(_)))
        );

        match &outcome {
            Ok(solution) => self.observer.finished(&self.board, solution.is_some()),
            Err(_) => {
                self.unwind();
                self.observer.finished(&self.board, false);
            }
        }

        outcome
    }

    fn search(&mut self) -> Result<Option<Vec<Placement>>, TilingError> {
        self.stack.push(Frame::default());

        while let Some(depth) = self.stack.len().checked_sub(1) {
            if !self.advance(depth)? {
                // Every candidate at this depth failed, backtrack to the one above.
                self.stack.pop();
                continue;
            }

            if depth + 1 == self.mutations.len() {
                return Ok(Some(self.stack.iter().filter_map(|frame| frame.placed).collect()));
            }

            self.stack.push(Frame::default());
        }

        Ok(None)
    }

    /// Lift the placement at `depth`, if any, and lay the next candidate that
    /// fits and leaves no dead region. Return false once the candidates at
    /// this depth are exhausted.
    fn advance(&mut self, depth: usize) -> Result<bool, TilingError> {
        self.lift(depth);

        let footprints = self.mutations[depth];
        while let Some(&placement) = self.candidates[depth].get(self.stack[depth].next) {
            self.stack[depth].next += 1;

            if self.config.limit_reached(self.steps) {
                return Err(TilingError::StepLimitExceeded { steps: self.steps });
            }
            self.steps += 1;

            let footprint = &footprints[placement.mutation];
            if self.board.place(&placement, footprint).is_err() {
                continue;
            }
            log::trace!("Placed [{:?}] at depth [{}].", placement, depth);
            self.observer.placed(&self.board, &placement);

            if self.config.prune_dead_regions && self.board.has_dead_region(self.cell_area) {
                self.board.remove(&placement, footprint);
                self.observer.removed(&self.board, &placement);
                continue;
            }

            self.stack[depth].placed = Some(placement);
            return Ok(true);
        }

        Ok(false)
    }

    fn lift(&mut self, depth: usize) {
        if let Some(placement) = self.stack[depth].placed.take() {
            self.board
                .remove(&placement, &self.mutations[depth][placement.mutation]);
            log::trace!("Removed [{:?}] at depth [{}].", placement, depth);
            self.observer.removed(&self.board, &placement);
        }
    }

    /// Remove every placement on the stack, deepest first.
    fn unwind(&mut self) {
        while let Some(depth) = self.stack.len().checked_sub(1) {
            self.lift(depth);
            self.stack.pop();
        }
    }

    fn reset(&mut self) {
        self.unwind();
        self.steps = 0;
    }
}

/// Return every placement of `shape` whose footprint fits inside the board,
/// ordered by mutation index, then row-major origin.
pub(crate) fn in_bounds_placements(
    shape: char,
    footprints: &[Footprint],
    width: usize,
    height: usize,
) -> Vec<Placement> {
    footprints
        .iter()
        .enumerate()
        .filter(|(_, footprint)| footprint.height() <= height && footprint.width() <= width)
        .flat_map(|(mutation, footprint)| {
            let rows = 0..=height - footprint.height();
            let columns = 0..=width - footprint.width();
            rows.flat_map(move |row| {
                columns.clone().map(move |column| Placement {
                    shape,
                    mutation,
                    row,
                    column,
                })
            })
        })
        .collect()
}
