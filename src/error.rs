//! Errors raised while building shapes, boards and solvers.

use thiserror::Error;

/// Validation failures. These surface at construction boundaries; a search
/// that has started never fails, it only produces zero or more solutions.
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// The shape pattern has no rows, or its rows have no cells.
    #[error("shape #{id} has an empty pattern")]
    EmptyShape {
        /// Id of the offending shape.
        id: usize,
    },

    /// Not every row of the shape pattern has the same length.
    #[error("shape #{id} row {row} has {len} cells, expected {expected}")]
    RaggedShape {
        /// Id of the offending shape.
        id: usize,
        /// Index of the first row whose length differs from row 0.
        row: usize,
        /// Length of that row.
        len: usize,
        /// Length of row 0.
        expected: usize,
    },

    /// The shape pattern does not fit in the 8×8 mask frame.
    #[error("shape #{id} is {rows}x{cols}, larger than the 8x8 frame")]
    ShapeTooLarge {
        /// Id of the offending shape.
        id: usize,
        /// Number of rows in the pattern.
        rows: usize,
        /// Number of columns in the pattern.
        cols: usize,
    },

    /// A pattern cell holds something other than 0 (empty), 1 (filled) or 2
    /// (gap).
    #[error("shape #{id} has invalid cell value {value} at ({row}, {col})")]
    InvalidCell {
        /// Id of the offending shape.
        id: usize,
        /// Row of the cell.
        row: usize,
        /// Column of the cell.
        col: usize,
        /// The value found.
        value: u8,
    },

    /// A puzzle piece contains gap cells, which are reserved for pruning
    /// templates.
    #[error("shape #{id} contains gap cells, puzzle pieces may only use 0 and 1")]
    ReservedGapCell {
        /// Id of the offending shape.
        id: usize,
    },

    /// The board does not fit in the 8×8 mask frame.
    #[error("board {rows}x{cols} exceeds the 8x8 limit")]
    BoardTooLarge {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },

    /// The board has no cells.
    #[error("board {rows}x{cols} has no cells")]
    EmptyBoard {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },

    /// The shape overlaps cells that are already covered.
    #[error("shape #{id} at ({row}, {col}) collides with an earlier placement")]
    Collision {
        /// Id of the placed shape.
        id: usize,
        /// Row offset of the placement.
        row: i32,
        /// Column offset of the placement.
        col: i32,
    },

    /// Some of the shape's cells fall outside the board.
    #[error("shape #{id} at ({row}, {col}) extends past the board")]
    OutOfBounds {
        /// Id of the placed shape.
        id: usize,
        /// Row offset of the placement.
        row: i32,
        /// Column offset of the placement.
        col: i32,
    },

    /// The solver was given no shapes to place.
    #[error("no shapes to place")]
    NoShapes,

    /// A pipeline stage thread could not be started.
    #[error("failed to start pipeline stage {stage}")]
    StageSpawn {
        /// Index of the stage.
        stage: usize,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
}
