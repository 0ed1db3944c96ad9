//! Accumulated placements on a puzzle grid.
//!
//! The board state is a 64-bit [`Mask`] of every covered cell, plus the list
//! of placed shapes. A candidate placement fits when its mask does not
//! intersect the board mask, so testing a move is one `AND` and applying it is
//! one `OR`.

use crate::{
    error::PuzzleError,
    mask::{Mask, FRAME_SIZE},
    shape::Shape,
};
use core::fmt;
use std::sync::Arc;

/// A number of rows and columns, the shapes placed so far and the union of
/// their masks.
///
/// Boards are values. Placing a shape returns a new board and leaves the
/// original untouched; the placement history is an append-only linked list
/// shared between a board and all boards derived from it.
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    mask: Mask,
    len: usize,
    last: Option<Arc<Placement>>,
}

#[derive(Debug)]
struct Placement {
    shape: Shape,
    previous: Option<Arc<Placement>>,
}

impl Board {
    /// Create an empty board with `rows` rows and `cols` columns, each at most
    /// eight.
    pub fn new(rows: usize, cols: usize) -> Result<Self, PuzzleError> {
        if rows > FRAME_SIZE || cols > FRAME_SIZE {
            return Err(PuzzleError::BoardTooLarge { rows, cols });
        }
        if rows == 0 || cols == 0 {
            return Err(PuzzleError::EmptyBoard { rows, cols });
        }

        Ok(Self {
            rows,
            cols,
            mask: Mask::EMPTY,
            len: 0,
            last: None,
        })
    }

    /// Return an empty board with the same dimensions.
    pub fn cleared(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            mask: Mask::EMPTY,
            len: 0,
            last: None,
        }
    }

    /// Number of rows in the board.
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// Number of columns in the board.
    pub fn num_cols(&self) -> usize {
        self.cols
    }

    /// Number of cells on the board.
    pub fn area(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of shapes placed on the board.
    pub fn num_shapes(&self) -> usize {
        self.len
    }

    /// Union of all placement masks.
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Mask of every cell on the board, independent of placements.
    pub fn region_mask(&self) -> Mask {
        Mask::region(self.rows, self.cols)
    }

    /// Cells of the board not yet covered.
    pub fn empty_cells(&self) -> Mask {
        self.region_mask() & !self.mask
    }

    /// Return true if every cell of the board is covered.
    pub fn is_complete(&self) -> bool {
        self.mask == self.region_mask()
    }

    /// Return the placed shapes in placement order.
    pub fn placements(&self) -> Vec<&Shape> {
        let mut placements = Vec::with_capacity(self.len);
        let mut current = self.last.as_deref();
        while let Some(placement) = current {
            placements.push(&placement.shape);
            current = placement.previous.as_deref();
        }
        placements.reverse();
        placements
    }

    /// Return the id of the shape covering `(row, col)`, if any.
    pub fn shape_at(&self, row: usize, col: usize) -> Option<usize> {
        let cell = Mask::cell(row, col);
        if !self.mask.intersects(cell) {
            return None;
        }

        let mut current = self.last.as_deref();
        while let Some(placement) = current {
            if placement.shape.mask().intersects(cell) {
                return Some(placement.shape.id());
            }
            current = placement.previous.as_deref();
        }
        None
    }

    /// Place `shape`, already translated to its position, and return the new
    /// board.
    ///
    /// Fails if the shape overlaps an earlier placement, or if any of its
    /// cells lies outside the board.
    pub fn place(&self, shape: Shape) -> Result<Self, PuzzleError> {
        if shape.is_truncated() || shape.mask().intersects(!self.region_mask()) {
            return Err(PuzzleError::OutOfBounds {
                id: shape.id(),
                row: shape.row(),
                col: shape.col(),
            });
        }
        if shape.mask().intersects(self.mask) {
            return Err(PuzzleError::Collision {
                id: shape.id(),
                row: shape.row(),
                col: shape.col(),
            });
        }

        Ok(self.place_unchecked(shape))
    }

    /// Place `shape` without any checks. Callers must have verified that
    /// `self.mask() & shape.mask()` is empty.
    pub(crate) fn place_unchecked(&self, shape: Shape) -> Self {
        debug_assert!(!shape.mask().intersects(self.mask));

        Self {
            rows: self.rows,
            cols: self.cols,
            mask: self.mask | shape.mask(),
            len: self.len + 1,
            last: Some(Arc::new(Placement {
                shape,
                previous: self.last.clone(),
            })),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Fill the spots on the board with each shape's id.
        let placements = self.placements();
        for r in 0..self.rows {
            write!(f, "[")?;
            for c in 0..self.cols {
                let cell = Mask::cell(r, c);
                let id = placements
                    .iter()
                    .find(|shape| shape.mask().intersects(cell))
                    .map_or(0, |shape| shape.id());
                write!(f, " {:2}", id)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
