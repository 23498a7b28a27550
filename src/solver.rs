use crate::{error::TilingError, grid::Grid, ExactCover};
use std::collections::VecDeque;

/// Solver that iteratively returns solutions to exact cover problems.
///
/// The search is Knuth's Algorithm X over a [`Grid`], driven by an explicit
/// stack of frames instead of recursion. Each frame owns one covered column
/// and walks the rows through it; covering and uncovering always happen in
/// last-in-first-out order.
#[derive(Debug)]
pub struct Solver<'e, E: ExactCover> {
    problem: &'e E,

    // Values used to track the state of solving
    grid: Grid,
    partial_solution: Vec<usize>,
    stack: Vec<Frame>,
    started: bool,

    step_limit: Option<u64>,
    steps: u64,
}

#[derive(Debug)]
enum FrameState {
    // Before covering the front row
    Cover,
    // After checking, before uncovering the front row
    Uncover,
}

#[derive(Debug)]
struct Frame {
    column: usize,
    // Remaining rows through `column`, each with the other columns it covers
    selected_rows: VecDeque<(usize, Vec<usize>)>,
    state: FrameState,
}

enum StackOp<T> {
    Push(T),
    Pop,
    Abort,
    None,
}

impl<'e, E> Solver<'e, E>
where
    E: ExactCover,
{
    /// Create a new `Solver` with the given instance of an exact cover problem.
    pub fn new(problem: &'e E) -> Self {
        let grid = Self::populate_grid(problem);

        log::debug!(
            "Built grid with [{}] rows and [{}] columns.",
            problem.possibilities().len(),
            grid.num_columns()
        );

        Self {
            problem,

            grid,
            partial_solution: Vec::new(),
            stack: Vec::new(),
            started: false,

            step_limit: None,
            steps: 0,
        }
    }

    /// Stop the search with [`TilingError::StepLimitExceeded`] once
    /// `step_limit` rows have been tried.
    pub fn with_step_limit(self, step_limit: u64) -> Self {
        Self {
            step_limit: Some(step_limit),
            ..self
        }
    }

    /// Return the number of rows tried since the solver was created or last
    /// reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Abandon the current search and start over from an empty partial
    /// solution.
    pub fn reset(&mut self) {
        self.unwind();
        self.started = false;
        self.steps = 0;
    }

    fn populate_grid(problem: &E) -> Grid {
        let coordinates_iter = problem
            .possibilities()
            .iter()
            .enumerate()
            .flat_map(|(row_idx, poss)| {
                problem
                    .constraint_indices(poss)
                    .into_iter()
                    .map(move |col_idx| (row_idx, col_idx))
            });

        Grid::new(problem.constraints().len(), coordinates_iter)
    }

    /// Return true if the current grid represents a valid solution.
    ///
    /// This implementation determines that the grid represents a solution if
    /// there are only optional columns left uncovered in the grid.
    fn solution_test(grid: &Grid, problem: &E) -> bool {
        !grid
            .uncovered_columns()
            .any(|column| !problem.is_optional(&problem.constraints()[column]))
    }

    /// Select a column to remove from the matrix.
    ///
    /// This implementation chooses the non-optional column that has the least
    /// number of entries uncovered in the grid, the leftmost one on ties.
    fn choose_column(grid: &Grid, problem: &E) -> Option<usize> {
        grid.uncovered_columns()
            .filter(|column| !problem.is_optional(&problem.constraints()[*column]))
            .min_by_key(|column| grid.column_size(*column))
    }

    /// Cover the most constrained column and return a frame over its rows, or
    /// `None` if that column has no rows left and the branch is dead.
    fn open_frame(grid: &mut Grid, problem: &E) -> Option<Frame> {
        let column = Self::choose_column(grid, problem)?;
        if grid.column_size(column) == 0 {
            return None;
        }

        grid.cover(column);
        let selected_rows = grid
            .uncovered_rows_in_column(column)
            .map(|node| (grid.row_of(node), grid.row_neighbors(node).collect()))
            .collect();

        Some(Frame {
            column,
            selected_rows,
            state: FrameState::Cover,
        })
    }

    /// Uncover everything the stack has covered, leaving the grid as it was
    /// built.
    fn unwind(&mut self) {
        while let Some(frame) = self.stack.pop() {
            if let (FrameState::Uncover, Some((_, columns))) =
                (&frame.state, frame.selected_rows.front())
            {
                for column in columns.iter().rev() {
                    self.grid.uncover(*column);
                }
                self.partial_solution.pop();
            }
            self.grid.uncover(frame.column);
        }
        debug_assert!(self.partial_solution.is_empty());
    }

    /// Return all remaining solutions.
    ///
    /// # Errors
    ///
    /// [`TilingError::StepLimitExceeded`] if the step limit is reached.
    pub fn all_solutions(&mut self) -> Result<Vec<Vec<&'e E::Possibility>>, TilingError> {
        self.collect()
    }

    /// Restart the search and return its first solution.
    ///
    /// # Errors
    ///
    /// [`TilingError::StepLimitExceeded`] if the step limit is reached.
    pub fn first_solution(&mut self) -> Result<Option<Vec<&'e E::Possibility>>, TilingError> {
        self.reset();
        self.next_solution()
    }

    /// Compute up to the next solution, returning `None` if there are no more.
    ///
    /// # Errors
    ///
    /// [`TilingError::StepLimitExceeded`] if the step limit is reached. The
    /// grid is fully unwound first, and later calls return `Ok(None)`.
    pub fn next_solution(&mut self) -> Result<Option<Vec<&'e E::Possibility>>, TilingError> {
        if !self.started {
            self.started = true;

            // A problem without primary columns is solved by the empty set
            if Self::solution_test(&self.grid, self.problem) {
                return Ok(Some(Vec::new()));
            }
            if let Some(frame) = Self::open_frame(&mut self.grid, self.problem) {
                self.stack.push(frame);
            }
        }

        while let Some(curr_frame) = self.stack.last_mut() {
            let (stack_op, found_solution) = match curr_frame.state {
                // For the front row of this frame, cover the other columns of the row and add
                // it to the solution.
                FrameState::Cover => {
                    if self.step_limit.is_some_and(|limit| self.steps >= limit) {
                        (StackOp::Abort, false)
                    } else {
                        self.steps += 1;

                        let (row_index, columns) = &curr_frame.selected_rows[0];
                        log::trace!(
                            "Trying row [{}] at depth [{}].",
                            row_index,
                            self.partial_solution.len()
                        );
                        self.partial_solution.push(*row_index);
                        for column in columns {
                            self.grid.cover(*column);
                        }
                        curr_frame.state = FrameState::Uncover;

                        // This is where the recursion happens, but we also have to check for the
                        // solution here.
                        if Self::solution_test(&self.grid, self.problem) {
                            (StackOp::None, true)
                        } else {
                            match Self::open_frame(&mut self.grid, self.problem) {
                                Some(frame) => (StackOp::Push(frame), false),
                                None => (StackOp::None, false),
                            }
                        }
                    }
                }
                // Uncover the row's columns in reverse, remove the row from the solution, and
                // release the frame's column once its rows run out.
                FrameState::Uncover => {
                    if let Some((row_index, columns)) = curr_frame.selected_rows.pop_front() {
                        for column in columns.iter().rev() {
                            self.grid.uncover(*column);
                        }
                        let popped = self.partial_solution.pop();
                        debug_assert_eq!(popped, Some(row_index));
                    }

                    if curr_frame.selected_rows.is_empty() {
                        self.grid.uncover(curr_frame.column);
                        (StackOp::Pop, false)
                    } else {
                        curr_frame.state = FrameState::Cover;
                        (StackOp::None, false)
                    }
                }
            };

            match stack_op {
                StackOp::Push(frame) => {
                    self.stack.push(frame);
                }
                StackOp::Pop => {
                    self.stack.pop();
                }
                StackOp::Abort => {
                    log::debug!("Step limit reached after [{}] steps.", self.steps);
                    self.unwind();
                    return Err(TilingError::StepLimitExceeded { steps: self.steps });
                }
                StackOp::None => {}
            }

            if found_solution {
                return Ok(Some(
                    self.partial_solution
                        .iter()
                        .map(|row_index| &self.problem.possibilities()[*row_index])
                        .collect(),
                ));
            }
        }

        Ok(None)
    }
}

impl<'e, E> Iterator for Solver<'e, E>
where
    E: ExactCover,
{
    type Item = Result<Vec<&'e E::Possibility>, TilingError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_solution().transpose()
    }
}
