#![deny(missing_docs)]

//! Solver for [polyomino](https://en.wikipedia.org/wiki/Polyomino) tiling
//! puzzles: place a set of pieces, each in any rotation or reflection, so that
//! they cover a rectangular board of at most 8×8 cells exactly once.
//!
//! Boards and shapes are encoded as 64-bit [`Mask`]s, so collision tests are a
//! single `AND`. The search runs as a pipeline of threads, one per piece, and
//! prunes partial boards containing small enclosed voids through a
//! [`GapCatalog`].
//!
//! ```
//! use shape_puzzle::{make_shapes, solve, Board};
//!
//! let grids: Vec<Vec<Vec<u8>>> = vec![
//!     vec![vec![1, 1, 1], vec![1, 0, 0], vec![1, 0, 0], vec![1, 0, 0]],
//!     vec![vec![1, 1, 0], vec![1, 1, 1]],
//!     vec![vec![1, 1, 1], vec![0, 1, 0]],
//!     vec![vec![0, 0, 1, 1], vec![1, 1, 1, 0]],
//!     vec![vec![1, 0, 1], vec![1, 1, 1]],
//! ];
//! let shapes = make_shapes(&grids).unwrap();
//! let board = Board::new(5, 5).unwrap();
//!
//! let solutions: Vec<Board> = solve(board, shapes).unwrap().collect();
//! assert_eq!(solutions.len(), 8);
//! assert!(solutions.iter().all(Board::is_complete));
//! ```

pub mod board;
pub mod error;
pub mod gaps;
pub mod mask;
pub mod pipeline;
pub mod shape;
pub mod solver;

pub use board::Board;
pub use error::PuzzleError;
pub use gaps::GapCatalog;
pub use mask::Mask;
pub use shape::{make_shapes, Pattern, Shape};
pub use solver::{solve, Pruning, Solutions, Solver, SolverConfig};
