//! Translation of solved exact cover rows back into board placements.

use crate::{
    board::{Board, Placement},
    tiling::{Possibility, Tiling},
};

/// Maps the rows of a [`Tiling`] solution back to the placements they stand
/// for.
#[derive(Debug, Clone, Copy)]
pub struct SolutionTranslator<'t, 'c> {
    tiling: &'t Tiling<'c>,
}

impl<'t, 'c> SolutionTranslator<'t, 'c> {
    /// Create a translator for solutions of the given problem.
    pub fn new(tiling: &'t Tiling<'c>) -> Self {
        Self { tiling }
    }

    /// Return the placement of every instance, in input order.
    ///
    /// Each row names exactly one instance, so duplicate shapes in the input
    /// are told apart by the instance segment of their rows.
    pub fn placements(&self, rows: &[&Possibility]) -> Vec<Placement> {
        let mut rows = rows.to_vec();
        rows.sort_by_key(|possibility| possibility.instance);

        debug_assert_eq!(
            rows.len(),
            self.tiling.instance_count(),
            "Solution must hold one row per instance"
        );
        debug_assert!(
            rows.iter()
                .enumerate()
                .all(|(instance, possibility)| possibility.instance == instance),
            "Solution must use every instance exactly once"
        );

        rows.into_iter()
            .map(|possibility| possibility.placement)
            .collect()
    }

    /// Lay the given placements, one per instance in input order, on an
    /// empty board.
    pub fn board(&self, placements: &[Placement]) -> Board {
        let mut board = Board::new(self.tiling.width(), self.tiling.height());

        for (instance, placement) in placements.iter().enumerate() {
            let outcome = board.place(placement, self.tiling.footprint(instance, placement));
            debug_assert_eq!(outcome, Ok(()), "Solution placements overlap");
        }

        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::pentominoes, ExactCover};

    #[test]
    fn placements_follow_instance_order() {
        let tiling = Tiling::new(pentominoes(), 5, 3, &['U', 'X', 'U']).unwrap();
        let mut solver = tiling.solver();
        let rows = solver.first_solution().unwrap().unwrap();
        let translator = SolutionTranslator::new(&tiling);

        let mut reversed = rows.clone();
        reversed.reverse();
        let placements = translator.placements(&rows);

        assert_eq!(placements, translator.placements(&reversed));
        assert_eq!(
            placements.iter().map(|p| p.shape).collect::<String>(),
            "UXU"
        );
    }

    #[test]
    fn duplicate_shapes_map_to_distinct_instances() {
        let tiling = Tiling::new(pentominoes(), 5, 3, &['U', 'X', 'U']).unwrap();
        let mut solver = tiling.solver();
        let rows = solver.first_solution().unwrap().unwrap();
        let placements = SolutionTranslator::new(&tiling).placements(&rows);

        // The two U instances sit on opposite ends of the X.
        assert_ne!(placements[0], placements[2]);
        assert_ne!(placements[0].column, placements[2].column);
    }

    #[test]
    fn board_is_fully_tiled() {
        let tiling = Tiling::new(pentominoes(), 5, 4, &['L', 'P', 'U', 'Y']).unwrap();
        let mut solver = tiling.solver();
        let rows = solver.first_solution().unwrap().unwrap();
        let translator = SolutionTranslator::new(&tiling);

        let board = translator.board(&translator.placements(&rows));

        assert!(board.is_full());
        let mut letters: Vec<_> = (0..4)
            .flat_map(|row| (0..5).map(move |column| (row, column)))
            .filter_map(|(row, column)| board.get(row, column))
            .collect();
        letters.sort_unstable();
        letters.dedup();
        assert_eq!(letters, vec!['L', 'P', 'U', 'Y']);
    }
}
