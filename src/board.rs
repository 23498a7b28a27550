//! Mutable board of cell owners, with the placement primitives used by the
//! backtracking search.

use crate::{catalog::Footprint, error::PlaceError};
use std::fmt;

/// One way to lay a shape's footprint on the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placement {
    /// Identifier of the placed shape.
    pub shape: char,
    /// Index into the shape's mutation list.
    pub mutation: usize,
    /// Board row of the footprint's top-left corner.
    pub row: usize,
    /// Board column of the footprint's top-left corner.
    pub column: usize,
}

impl Placement {
    /// Return an iterator over the board cells covered by this placement when
    /// laid with the given footprint.
    pub fn cells<'f>(&self, footprint: &'f Footprint) -> impl Iterator<Item = (usize, usize)> + 'f {
        let (row, column) = (self.row, self.column);
        footprint
            .cells()
            .map(move |(dr, dc)| (row + dr, column + dc))
    }
}

/// A `width` × `height` grid where every cell is either empty or owned by a
/// shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Option<char>>,
}

impl Board {
    /// Create an empty board.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows.
    pub fn new(width: usize, height: usize) -> Self {
        let Some(cell_count) = width.checked_mul(height) else {
            panic!("Board {width}x{height} has more cells than can be counted");
        };

        Self {
            width,
            height,
            cells: vec![None; cell_count],
        }
    }

    /// Return the number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Return the number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Return the owner of a cell, or `None` if the cell is empty or outside
    /// the board.
    pub fn get(&self, row: usize, column: usize) -> Option<char> {
        self.index(row, column).and_then(|index| self.cells[index])
    }

    fn index(&self, row: usize, column: usize) -> Option<usize> {
        (row < self.height && column < self.width).then(|| row * self.width + column)
    }

    /// Mark the cells covered by `placement` as owned by its shape.
    ///
    /// Nothing is modified when the placement is rejected.
    ///
    /// # Errors
    ///  - [`PlaceError::OutOfBounds`] if any footprint cell lies outside the
    ///    board.
    ///  - [`PlaceError::Overlap`] if any footprint cell is already owned.
    pub fn place(&mut self, placement: &Placement, footprint: &Footprint) -> Result<(), PlaceError> {
        if placement.row + footprint.height() > self.height
            || placement.column + footprint.width() > self.width
        {
            return Err(PlaceError::OutOfBounds);
        }

        if let Some((row, column)) = placement
            .cells(footprint)
            .find(|&(row, column)| self.cells[row * self.width + column].is_some())
        {
            return Err(PlaceError::Overlap { row, column });
        }

        for (row, column) in placement.cells(footprint) {
            self.cells[row * self.width + column] = Some(placement.shape);
        }

        Ok(())
    }

    /// Reset the cells covered by a previously placed `placement` to empty.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if some covered cell is not owned by the
    /// placement's shape, which means the placement was never placed.
    pub fn remove(&mut self, placement: &Placement, footprint: &Footprint) {
        for (row, column) in placement.cells(footprint) {
            let index = row * self.width + column;
            debug_assert_eq!(
                self.cells[index],
                Some(placement.shape),
                "Removing a placement that is not on the board"
            );
            self.cells[index] = None;
        }
    }

    /// Return true if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Return the number of empty cells.
    pub fn empty_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Return true if some maximal 4-connected region of empty cells has a
    /// size that is not a multiple of `cell_area`.
    ///
    /// Such a region can never be tiled exactly, so the current partial
    /// state has no completion. The converse does not hold.
    pub fn has_dead_region(&self, cell_area: usize) -> bool {
        let mut visited = vec![false; self.cells.len()];
        let mut stack = Vec::new();

        for start in 0..self.cells.len() {
            if visited[start] || self.cells[start].is_some() {
                continue;
            }

            visited[start] = true;
            stack.push(start);
            let mut region_size = 0;

            while let Some(index) = stack.pop() {
                region_size += 1;

                for neighbor in self.neighbors(index) {
                    if !visited[neighbor] && self.cells[neighbor].is_none() {
                        visited[neighbor] = true;
                        stack.push(neighbor);
                    }
                }
            }

            if region_size % cell_area != 0 {
                return true;
            }
        }

        false
    }

    fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> {
        let (row, column) = (index / self.width, index % self.width);
        let (width, height) = (self.width, self.height);

        [
            (row > 0).then(|| index - width),
            (row + 1 < height).then(|| index + width),
            (column > 0).then(|| index - 1),
            (column + 1 < width).then(|| index + 1),
        ]
        .into_iter()
        .flatten()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            for cell in row {
                write!(f, "{}", cell.unwrap_or('.'))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(shape: char, row: usize, column: usize) -> Placement {
        Placement {
            shape,
            mutation: 0,
            row,
            column,
        }
    }

    fn domino() -> Footprint {
        Footprint::from([[1, 1]])
    }

    /// Fill a board from text, `.` marking empty cells.
    fn board_from(rows: &[&str]) -> Board {
        let mut board = Board::new(rows[0].len(), rows.len());
        for (r, line) in rows.iter().enumerate() {
            for (c, owner) in line.chars().enumerate() {
                if owner != '.' {
                    board.cells[r * board.width + c] = Some(owner);
                }
            }
        }
        board
    }

    #[test]
    fn place_and_remove_round_trip() {
        let mut board = Board::new(3, 2);
        let placement = p('D', 1, 1);

        assert_eq!(board.place(&placement, &domino()), Ok(()));
        assert_eq!(board.get(1, 1), Some('D'));
        assert_eq!(board.get(1, 2), Some('D'));
        assert_eq!(board.empty_cells(), 4);

        board.remove(&placement, &domino());
        assert_eq!(board, Board::new(3, 2));
    }

    #[test]
    fn place_out_of_bounds_leaves_board_untouched() {
        let mut board = Board::new(3, 2);

        assert_eq!(
            board.place(&p('D', 0, 2), &domino()),
            Err(PlaceError::OutOfBounds)
        );
        assert_eq!(
            board.place(&p('D', 2, 0), &domino()),
            Err(PlaceError::OutOfBounds)
        );
        assert_eq!(board, Board::new(3, 2));
    }

    #[test]
    fn place_overlap_leaves_board_untouched() {
        let mut board = Board::new(3, 1);
        board.place(&p('A', 0, 0), &domino()).unwrap();
        let before = board.clone();

        assert_eq!(
            board.place(&p('B', 0, 1), &domino()),
            Err(PlaceError::Overlap { row: 0, column: 1 })
        );
        assert_eq!(board, before);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "Removing a placement that is not on the board")]
    fn remove_unplaced_placement_panics() {
        let mut board = Board::new(2, 1);
        board.remove(&p('D', 0, 0), &domino());
    }

    #[test]
    fn full_board() {
        let mut board = Board::new(2, 1);
        assert!(!board.is_full());
        board.place(&p('D', 0, 0), &domino()).unwrap();
        assert!(board.is_full());
    }

    #[test]
    fn dead_region_of_four_cells() {
        let board = board_from(&["....A", "AAAAA"]);
        assert!(board.has_dead_region(5));
    }

    #[test]
    fn live_region_of_five_cells() {
        let board = board_from(&[".....", "AAAAA"]);
        assert!(!board.has_dead_region(5));
    }

    #[test]
    fn dead_region_of_nine_cells() {
        let board = board_from(&[".....", "....A", "AAAAA"]);
        assert!(board.has_dead_region(5));
    }

    #[test]
    fn live_region_of_ten_cells() {
        let board = board_from(&[".....", ".....", "AAAAA"]);
        assert!(!board.has_dead_region(5));
    }

    #[test]
    fn regions_split_by_owned_cells_are_counted_separately() {
        // Two regions of five, joined only diagonally.
        let board = board_from(&["..A..", "..A..", ".AAA.", "AAAAA"]);
        assert!(!board.has_dead_region(5));

        // Ten empty cells in total, but split into regions of four and six.
        let board = board_from(&["..A...", "..A...", "AAAAAA"]);
        assert!(board.has_dead_region(5));
    }

    #[test]
    fn full_and_empty_boards_have_no_dead_region() {
        assert!(!board_from(&["AAAAA"]).has_dead_region(5));
        assert!(!Board::new(5, 3).has_dead_region(5));
        assert!(Board::new(4, 4).has_dead_region(5));
    }

    #[test]
    fn display_marks_empty_cells() {
        let board = board_from(&["A.", ".B"]);
        assert_eq!(board.to_string(), "A.\n.B\n");
    }

    #[test]
    #[should_panic(expected = "more cells than can be counted")]
    fn overflowing_dimensions_panic() {
        let _board = Board::new(usize::MAX, 2);
    }
}
