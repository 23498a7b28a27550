//! Run pentomino tiling solver
//! Usage:
//!
//! ```bash
//! cargo run --release --example pentomino 10 6 FILNPTUVWXYZ
//! ```

use polyomino_tiling::{exact_cover_solve_with, pentominoes, Board, Observer, SolveConfig};

struct PrintSolution;

impl Observer for PrintSolution {
    fn finished(&mut self, board: &Board, solved: bool) {
        if solved {
            print!("{board}");
        } else {
            println!("no tiling exists");
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        eprintln!("usage: pentomino WIDTH HEIGHT LETTERS");
        std::process::exit(1);
    }

    let (Ok(width), Ok(height)) = (args[1].parse::<usize>(), args[2].parse::<usize>()) else {
        eprintln!("invalid board dimensions");
        std::process::exit(1);
    };
    let instances: Vec<char> = args[3].chars().map(|c| c.to_ascii_uppercase()).collect();

    if let Err(err) = exact_cover_solve_with(
        pentominoes(),
        width,
        height,
        &instances,
        SolveConfig::default(),
        PrintSolution,
    ) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
