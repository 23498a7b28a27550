//! Toroidal sparse matrix used by the dancing links search.
//!
//! All nodes live in one arena and refer to their neighbors by index, so
//! unlinking and relinking a node is plain index rewriting. Index `0` is the
//! root header, indices `1..=num_columns` are the column headers, and the
//! remaining nodes mark the filled cells of the matrix.

use std::iter;

const ROOT: usize = 0;

/// A single link cell in the toroidal structure.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    left: usize,
    right: usize,
    up: usize,
    down: usize,
    // Column header this node belongs to, itself for headers
    header: usize,
    // Matrix row of the node, unused for headers
    row: usize,
}

impl Node {
    fn header(index: usize) -> Self {
        Node {
            left: index,
            right: index,
            up: index,
            down: index,
            header: index,
            row: usize::MAX,
        }
    }
}

/// Doubly linked 2-D mesh of the filled cells of a 0/1 matrix.
///
/// Columns and rows are identified by their 0-based position in the original
/// matrix. A node inside the grid is referred to by an opaque [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    nodes: Vec<Node>,
    // Live node count of every column
    sizes: Vec<usize>,
    covered: Vec<bool>,
}

/// Handle to a filled cell inside a [`Grid`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl Grid {
    /// Create a new grid with a specified number of columns, and the given
    /// `(row, column)` coordinates filled.
    ///
    /// Coordinates may arrive in any order; duplicates are ignored.
    ///
    /// # Panics
    ///
    /// Panics if a coordinate names a column outside `0..num_columns`.
    pub fn new(
        num_columns: usize,
        filled_coordinates: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let mut filled: Vec<_> = filled_coordinates.into_iter().collect();
        filled.sort_unstable();
        filled.dedup();

        let mut nodes = Vec::with_capacity(1 + num_columns + filled.len());
        nodes.extend((0..=num_columns).map(Node::header));

        let mut grid = Grid {
            nodes,
            sizes: vec![0; num_columns],
            covered: vec![false; num_columns],
        };

        // Link the column headers into the root's horizontal ring
        for header in 1..=num_columns {
            grid.insert_left_of(ROOT, header);
        }

        let mut row_start: Option<usize> = None;
        for (row, column) in filled {
            assert!(
                column < num_columns,
                "Column [{column}] is outside the grid of [{num_columns}] columns"
            );

            let index = grid.nodes.len();
            let header = column + 1;
            grid.nodes.push(Node {
                left: index,
                right: index,
                up: index,
                down: index,
                header,
                row,
            });

            // Append to the bottom of the column
            let bottom = grid.nodes[header].up;
            grid.nodes[index].up = bottom;
            grid.nodes[index].down = header;
            grid.nodes[bottom].down = index;
            grid.nodes[header].up = index;
            grid.sizes[column] += 1;

            // Append to the end of the row
            match row_start {
                Some(start) if grid.nodes[start].row == row => grid.insert_left_of(start, index),
                _ => row_start = Some(index),
            }
        }

        grid
    }

    fn insert_left_of(&mut self, anchor: usize, index: usize) {
        let last = self.nodes[anchor].left;
        self.nodes[index].left = last;
        self.nodes[index].right = anchor;
        self.nodes[last].right = index;
        self.nodes[anchor].left = index;
    }

    /// Return the number of columns the grid was built with.
    pub fn num_columns(&self) -> usize {
        self.sizes.len()
    }

    /// Cover entire column, and any rows that that appear in this column.
    ///
    /// Every other node of every row through `column` is unlinked from its
    /// own column, whose live count drops by one.
    ///
    /// # Panics
    ///
    /// Panics if `column` is already covered.
    pub fn cover(&mut self, column: usize) {
        assert!(
            !self.covered[column],
            "Column [{column}] is already covered"
        );
        self.covered[column] = true;

        let header = column + 1;
        self.unlink_horizontal(header);

        let mut row_node = self.nodes[header].down;
        while row_node != header {
            let mut node = self.nodes[row_node].right;
            while node != row_node {
                self.unlink_vertical(node);
                self.sizes[self.nodes[node].header - 1] -= 1;
                node = self.nodes[node].right;
            }
            row_node = self.nodes[row_node].down;
        }
    }

    /// Uncover entire column, and any rows that appear in this column.
    ///
    /// This is the exact mirror of [`Grid::cover`]: rows are relinked bottom
    /// to top and right to left, then the column header is relinked.
    ///
    /// # Panics
    ///
    /// Panics if `column` is not currently covered.
    pub fn uncover(&mut self, column: usize) {
        assert!(self.covered[column], "Column [{column}] is not covered");

        let header = column + 1;
        let mut row_node = self.nodes[header].up;
        while row_node != header {
            let mut node = self.nodes[row_node].left;
            while node != row_node {
                self.sizes[self.nodes[node].header - 1] += 1;
                self.relink_vertical(node);
                node = self.nodes[node].left;
            }
            row_node = self.nodes[row_node].up;
        }

        self.relink_horizontal(header);
        self.covered[column] = false;
    }

    fn unlink_horizontal(&mut self, index: usize) {
        let Node { left, right, .. } = self.nodes[index];
        self.nodes[left].right = right;
        self.nodes[right].left = left;
    }

    fn relink_horizontal(&mut self, index: usize) {
        let Node { left, right, .. } = self.nodes[index];
        debug_assert_eq!(self.nodes[left].right, right, "Horizontal ring corrupted");
        self.nodes[left].right = index;
        self.nodes[right].left = index;
    }

    fn unlink_vertical(&mut self, index: usize) {
        let Node { up, down, .. } = self.nodes[index];
        self.nodes[up].down = down;
        self.nodes[down].up = up;
    }

    fn relink_vertical(&mut self, index: usize) {
        let Node { up, down, .. } = self.nodes[index];
        debug_assert_eq!(self.nodes[up].down, down, "Vertical ring corrupted");
        self.nodes[up].down = index;
        self.nodes[down].up = index;
    }

    /// Return true if `column` is currently covered.
    pub fn is_covered(&self, column: usize) -> bool {
        self.covered[column]
    }

    /// Return an iterator over the columns that are uncovered, in column
    /// order.
    pub fn uncovered_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.ring(ROOT, |node| node.right).map(|header| header - 1)
    }

    /// Return the number of rows uncovered in this column.
    pub fn column_size(&self, column: usize) -> usize {
        self.sizes[column]
    }

    /// Return an iterator over all uncovered nodes in this column, top to
    /// bottom.
    pub fn uncovered_rows_in_column(&self, column: usize) -> impl Iterator<Item = NodeId> + '_ {
        self.ring(column + 1, |node| node.down).map(NodeId)
    }

    /// Return the columns of the other nodes in the same row as `node`, from
    /// left to right starting after `node`.
    pub fn row_neighbors(&self, node: NodeId) -> impl Iterator<Item = usize> + '_ {
        self.ring(node.0, |node| node.right)
            .map(move |index| self.nodes[index].header - 1)
    }

    /// Return the matrix row of a node.
    pub fn row_of(&self, node: NodeId) -> usize {
        self.nodes[node.0].row
    }

    /// Return the matrix column of a node.
    pub fn column_of(&self, node: NodeId) -> usize {
        self.nodes[node.0].header - 1
    }

    /// Walk the ring through `start` in one direction, excluding `start`.
    fn ring(&self, start: usize, step: fn(&Node) -> usize) -> impl Iterator<Item = usize> + '_ {
        iter::successors(Some(step(&self.nodes[start])), move |&index| {
            Some(step(&self.nodes[index]))
        })
        .take_while(move |&index| index != start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Knuth's example from "Dancing Links":
    //   columns A..G, rows
    //   0: C E F
    //   1: A D G
    //   2: B C F
    //   3: A D
    //   4: B G
    //   5: D E G
    fn knuth_grid() -> Grid {
        Grid::new(
            7,
            [
                (0, 2),
                (0, 4),
                (0, 5),
                (1, 0),
                (1, 3),
                (1, 6),
                (2, 1),
                (2, 2),
                (2, 5),
                (3, 0),
                (3, 3),
                (4, 1),
                (4, 6),
                (5, 3),
                (5, 4),
                (5, 6),
            ],
        )
    }

    #[test]
    fn build_counts_and_rings() {
        let grid = knuth_grid();

        assert_eq!(grid.num_columns(), 7);
        assert_eq!(grid.uncovered_columns().collect::<Vec<_>>(), (0..7).collect::<Vec<_>>());
        assert_eq!(
            (0..7).map(|c| grid.column_size(c)).collect::<Vec<_>>(),
            vec![2, 2, 2, 3, 2, 2, 3]
        );

        let rows_in_d: Vec<_> = grid
            .uncovered_rows_in_column(3)
            .map(|node| grid.row_of(node))
            .collect();
        assert_eq!(rows_in_d, vec![1, 3, 5]);

        let first_in_d = grid.uncovered_rows_in_column(3).next().unwrap();
        assert_eq!(grid.column_of(first_in_d), 3);
        assert_eq!(grid.row_neighbors(first_in_d).collect::<Vec<_>>(), vec![6, 0]);
    }

    #[test]
    fn unordered_input_builds_the_same_grid() {
        let mut grid = Grid::new(3, [(1, 2), (0, 1), (1, 0), (0, 0), (1, 0)]);
        let ordered = Grid::new(3, [(0, 0), (0, 1), (1, 0), (1, 2)]);

        assert_eq!(grid, ordered);
        grid.cover(0);
        assert_eq!(grid.column_size(1), 0);
        assert_eq!(grid.column_size(2), 0);
    }

    #[test]
    fn cover_removes_conflicting_rows() {
        let mut grid = knuth_grid();
        grid.cover(0);

        assert!(grid.is_covered(0));
        assert_eq!(
            grid.uncovered_columns().collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5, 6]
        );
        // Rows 1 and 3 go through A, so D keeps only row 5 and G keeps 4 and 5.
        assert_eq!(grid.column_size(3), 1);
        assert_eq!(grid.column_size(6), 2);
        assert_eq!(
            grid.uncovered_rows_in_column(6)
                .map(|node| grid.row_of(node))
                .collect::<Vec<_>>(),
            vec![4, 5]
        );
    }

    #[test]
    fn cover_uncover_round_trip_every_column() {
        let original = knuth_grid();

        for column in 0..original.num_columns() {
            let mut grid = original.clone();
            grid.cover(column);
            assert_ne!(grid, original);
            grid.uncover(column);
            assert_eq!(grid, original, "Round trip through column [{column}]");
        }
    }

    #[test]
    fn nested_covers_unwind_in_reverse() {
        let original = knuth_grid();
        let mut grid = original.clone();

        grid.cover(0);
        let after_first = grid.clone();
        grid.cover(3);
        grid.cover(6);
        grid.uncover(6);
        grid.uncover(3);
        assert_eq!(grid, after_first);
        grid.uncover(0);
        assert_eq!(grid, original);
    }

    #[test]
    #[should_panic(expected = "is already covered")]
    fn double_cover_panics() {
        let mut grid = knuth_grid();
        grid.cover(2);
        grid.cover(2);
    }

    #[test]
    #[should_panic(expected = "is not covered")]
    fn uncover_without_cover_panics() {
        let mut grid = knuth_grid();
        grid.uncover(2);
    }

    #[test]
    #[should_panic(expected = "outside the grid")]
    fn coordinate_outside_grid_panics() {
        let _grid = Grid::new(2, [(0, 2)]);
    }

    #[test]
    fn empty_column_has_empty_ring() {
        let grid = Grid::new(2, [(0, 0)]);
        assert_eq!(grid.column_size(1), 0);
        assert_eq!(grid.uncovered_rows_in_column(1).count(), 0);
    }
}
