#![no_main]

use libfuzzer_sys::fuzz_target;
use polyomino_tiling::{backtracking_solve_with, exact_cover_solve, pentominoes, SolveConfig};

const LETTERS: [char; 12] = ['F', 'I', 'L', 'N', 'P', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z'];

#[derive(Debug)]
struct SmallTilingInput {
    width: usize,
    height: usize,
    instances: Vec<char>,
}

impl<'a> arbitrary::Arbitrary<'a> for SmallTilingInput {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        // Boards of at most four pentominoes keep both searches fast.
        let width = u.int_in_range(1..=10)?;
        let max_height = 20 / width;
        let height = u.int_in_range(1..=max_height)?;

        let count = (width * height) / 5;
        let instances = (0..count)
            .map(|_| u.choose(&LETTERS).copied())
            .collect::<arbitrary::Result<_>>()?;

        Ok(SmallTilingInput {
            width,
            height,
            instances,
        })
    }
}

fuzz_target!(|data: SmallTilingInput| {
    let by_exact_cover = exact_cover_solve(pentominoes(), data.width, data.height, &data.instances);
    let by_backtracking = backtracking_solve_with(
        pentominoes(),
        data.width,
        data.height,
        &data.instances,
        SolveConfig::default(),
        (),
    );

    match (by_exact_cover, by_backtracking) {
        (Ok(exact), Ok(backtracked)) => assert_eq!(exact.is_some(), backtracked.is_some()),
        (Err(exact), Err(backtracked)) => assert_eq!(exact, backtracked),
        (exact, backtracked) => panic!("Solvers disagree: [{exact:?}] vs [{backtracked:?}]"),
    }
});
