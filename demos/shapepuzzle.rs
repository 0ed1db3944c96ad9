//! Solve the 8x8 shape puzzle and print every solution.
//! Usage:
//!
//! ```bash
//! cargo run --release --example shapepuzzle [limit]
//! ```
//!
//! Set `RUST_LOG=debug` to print the orientations of every shape and the
//! per-stage summaries.

use shape_puzzle::{make_shapes, Board, Solver, SolverConfig};

fn puzzle_grids() -> Vec<Vec<Vec<u8>>> {
    vec![
        vec![vec![1, 1, 0], vec![1, 1, 1]],
        vec![vec![1, 0, 1], vec![1, 1, 1]],
        vec![vec![1, 0, 0, 0, 0], vec![1, 1, 1, 1, 1]],
        vec![vec![1, 1, 1, 1], vec![1, 0, 0, 1]],
        vec![vec![1, 1, 1], vec![1, 1, 1], vec![0, 1, 1]],
        vec![vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]],
        vec![vec![0, 1, 0], vec![0, 1, 0], vec![1, 1, 1]],
        vec![vec![0, 0, 1, 1], vec![1, 1, 1, 1]],
        vec![vec![0, 1, 1], vec![1, 1, 0], vec![1, 0, 0]],
        vec![
            vec![1, 0, 0, 0],
            vec![1, 0, 0, 0],
            vec![1, 0, 0, 0],
            vec![1, 1, 1, 1],
        ],
        vec![vec![1, 0, 0, 0], vec![1, 1, 1, 1], vec![1, 0, 0, 0]],
    ]
}

fn main() {
    env_logger::init();

    let mut config = SolverConfig::default();
    if let Some(arg) = std::env::args().nth(1) {
        match arg.parse() {
            Ok(limit) => config = config.with_limit(limit),
            Err(_) => {
                eprintln!("invalid solution limit [{}]", arg);
                std::process::exit(1);
            }
        }
    }

    let shapes = match make_shapes(&puzzle_grids()) {
        Ok(shapes) => shapes,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };
    for shape in &shapes {
        for orientation in shape.permutations() {
            log::debug!("{}", orientation);
        }
    }

    let board = match Board::new(8, 8) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };
    print!("Initial board:\n{}", board);

    let solutions = Solver::new(board, shapes)
        .map(|solver| solver.with_config(config))
        .and_then(|solver| solver.solve());
    let solutions = match solutions {
        Ok(solutions) => solutions,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    let mut found = 0;
    for solution in solutions {
        println!("Solution found.");
        println!("{}", solution);
        found += 1;
    }

    match found {
        0 => println!("No solution found."),
        1 => println!("One solution found."),
        n => println!("{} solutions found.", n),
    }
}
