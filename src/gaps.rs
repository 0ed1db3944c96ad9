//! Pruning of boards that contain voids no piece can fill.
//!
//! A partially filled board can be dead long before the last piece is tried:
//! if it contains a small empty region, surrounded on all sides by filled cells
//! or the border, which is too small for any piece, no later placement will
//! ever cover it. Such voids are found by matching the board against a
//! catalog of templates. Each template is a rectangle or cross with one to four
//! interior gap cells (`2`) and an outline of cells that must be filled (`1`);
//! corners are `0` and do not matter.
//!
//! Templates are expanded over all orientations and all positions, including
//! positions one cell past each edge. Those are clipped to the board region,
//! so that the border itself acts as the wall of the void.

use crate::{
    board::Board,
    mask::Mask,
    shape::{Pattern, Shape},
};
use std::collections::HashSet;

/// First id given to template shapes, to keep them apart from puzzle pieces
/// when printed.
const TEMPLATE_ID_BASE: usize = 100;

/// Void templates. A gap is dead when its outline is filled and its interior
/// is empty.
const TEMPLATES: &[&[&[u8]]] = &[
    // One cell.
    &[&[0, 1, 0], &[1, 2, 1], &[0, 1, 0]],
    // Two cells in a row.
    &[&[0, 1, 1, 0], &[1, 2, 2, 1], &[0, 1, 1, 0]],
    // Two by two square.
    &[&[0, 1, 1, 0], &[1, 2, 2, 1], &[1, 2, 2, 1], &[0, 1, 1, 0]],
    // Three cells in a row.
    &[&[0, 1, 1, 1, 0], &[1, 2, 2, 2, 1], &[0, 1, 1, 1, 0]],
    // Four cells in a row.
    &[&[0, 1, 1, 1, 1, 0], &[1, 2, 2, 2, 2, 1], &[0, 1, 1, 1, 1, 0]],
    // Three cells bent into an L.
    &[&[0, 1, 1, 0], &[1, 2, 2, 1], &[0, 1, 2, 1], &[0, 0, 1, 0]],
];

/// Templates expanded over every orientation and position for one board size.
#[derive(Debug, Clone, Default)]
pub struct GapCatalog {
    patterns: Vec<Shape>,
}

impl GapCatalog {
    /// Build the full catalog for boards with the dimensions of `board`.
    ///
    /// Placements on `board` are ignored, only its size matters. An empty
    /// board of at most four cells shaped like one of the voids is itself
    /// dead under this catalog.
    pub fn new(board: &Board) -> Self {
        Self::with_max_gap(board, usize::MAX)
    }

    /// Build a catalog limited to templates whose void has at most
    /// `max_gap_cells` cells.
    ///
    /// A void is only dead if no piece is small enough to fill it, so a puzzle
    /// whose smallest piece has `n` cells should prune voids up to `n - 1`.
    pub fn with_max_gap(board: &Board, max_gap_cells: usize) -> Self {
        let region = board.region_mask();
        let rows = board.num_rows() as i32;
        let cols = board.num_cols() as i32;

        let mut seen = HashSet::new();
        let mut patterns = Vec::new();

        for (index, template_rows) in TEMPLATES.iter().enumerate() {
            let template = Shape::from_pattern(
                TEMPLATE_ID_BASE + index,
                Pattern::from_template(template_rows),
            );
            if template.pattern().gap_count() > max_gap_cells {
                continue;
            }

            for orientation in template.permutations() {
                let height = orientation.num_rows() as i32;
                let width = orientation.num_cols() as i32;

                for r in -1..=rows - height + 1 {
                    for c in -1..=cols - width + 1 {
                        let placed = orientation.translate(r, c).clip(region);
                        // A void pushed entirely off the board matches nothing,
                        // and identical clipped masks only need testing once.
                        if placed.gap_mask().is_empty()
                            || !seen.insert((placed.outline_mask(), placed.gap_mask()))
                        {
                            continue;
                        }
                        patterns.push(placed);
                    }
                }
            }
        }

        log::debug!(
            "Built gap catalog of {} patterns for {}x{} board (max gap {}).",
            patterns.len(),
            rows,
            cols,
            max_gap_cells
        );

        Self { patterns }
    }

    /// A catalog that never rejects anything.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of patterns in the catalog.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Return true if the catalog has no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The expanded patterns, each clipped to the board region.
    pub fn patterns(&self) -> &[Shape] {
        &self.patterns
    }

    /// Return the first pattern describing a dead void on `board`.
    pub fn find_match(&self, board: &Board) -> Option<&Shape> {
        let filled = board.mask();
        self.patterns
            .iter()
            .find(|pattern| Self::is_dead_void(filled, pattern))
    }

    /// Return true if `board` contains a void that can never be filled.
    pub fn rejects(&self, board: &Board) -> bool {
        self.rejects_mask(board.mask())
    }

    /// Same as [`GapCatalog::rejects`], on the board's filled cells alone.
    pub fn rejects_mask(&self, filled: Mask) -> bool {
        self.patterns
            .iter()
            .any(|pattern| Self::is_dead_void(filled, pattern))
    }

    fn is_dead_void(filled: Mask, pattern: &Shape) -> bool {
        // The outline has to be complete for the template to apply, and then
        // the void must still be open.
        filled.covers(pattern.outline_mask()) && !filled.covers(pattern.gap_mask())
    }
}
