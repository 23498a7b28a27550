//! Plain 0/1 matrix exact cover problem.

use crate::ExactCover;
use std::ops::Range;

/// Exact cover problem given directly as the filled columns of each row.
///
/// Possibilities are row indices and constraints are column indices, so a
/// solution reads back as the list of chosen rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    // Sorted, deduplicated filled columns of every row
    rows: Vec<Vec<usize>>,
    possibilities: Vec<usize>,
    constraints: Vec<usize>,
    optional: Range<usize>,
}

impl Matrix {
    /// Create a matrix with `num_columns` columns, where every item of `rows`
    /// lists the filled columns of one row.
    ///
    /// # Panics
    ///
    /// Panics if a row names a column outside `0..num_columns`.
    pub fn from_rows<R>(num_columns: usize, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = usize>,
    {
        let rows: Vec<Vec<usize>> = rows
            .into_iter()
            .map(|row| {
                let mut columns: Vec<_> = row.into_iter().collect();
                columns.sort_unstable();
                columns.dedup();
                if let Some(&last) = columns.last() {
                    assert!(
                        last < num_columns,
                        "Column [{last}] is outside the matrix of [{num_columns}] columns"
                    );
                }
                columns
            })
            .collect();

        Self {
            possibilities: (0..rows.len()).collect(),
            constraints: (0..num_columns).collect(),
            rows,
            optional: 0..0,
        }
    }

    /// Create a matrix from dense rows of booleans.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not all have the same length.
    pub fn from_dense(rows: &[Vec<bool>]) -> Self {
        let num_columns = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|row| row.len() == num_columns),
            "Every row must have [{num_columns}] columns"
        );

        Self::from_rows(
            num_columns,
            rows.iter().map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(_, filled)| **filled)
                    .map(|(column, _)| column)
            }),
        )
    }

    /// Mark the given columns as optional: a solution covers them at most
    /// once instead of exactly once.
    pub fn with_optional_columns(self, optional: Range<usize>) -> Self {
        Self { optional, ..self }
    }

    /// Return the filled columns of a row.
    pub fn row(&self, index: usize) -> &[usize] {
        &self.rows[index]
    }
}

impl ExactCover for Matrix {
    type Constraint = usize;
    type Possibility = usize;

    fn satisfies(&self, poss: &Self::Possibility, cons: &Self::Constraint) -> bool {
        self.rows[*poss].binary_search(cons).is_ok()
    }

    fn is_optional(&self, cons: &Self::Constraint) -> bool {
        self.optional.contains(cons)
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        &self.possibilities
    }

    fn constraints(&self) -> &[Self::Constraint] {
        &self.constraints
    }

    fn constraint_indices(&self, poss: &Self::Possibility) -> Vec<usize> {
        self.rows[*poss].clone()
    }
}
