//! Polyomino shapes and their orientations.
//!
//! A [`Shape`] is described by a rectangular [`Pattern`] of small integers:
//! `0` is an empty cell, `1` a filled cell and `2` a "gap" cell. Gap cells are
//! only used by the pruning templates in [`crate::gaps`]; they count as part of
//! the shape's mask, and are additionally tracked in its gap mask.

use crate::{
    error::PuzzleError,
    mask::{compute_masks, Mask, FRAME_SIZE},
};
use core::fmt;
use std::{collections::HashSet, sync::Arc};

/// Number of elements in the symmetry group of the square: four rotations,
/// each optionally reflected.
pub const ORIENTATIONS: usize = 8;

/// Cell pattern of a shape, stored row-major. Element of `i`th row and `j`th
/// column is available under index `i * width + j`.
#[derive(Debug, PartialEq, Eq, Clone, Hash, PartialOrd, Ord)]
pub struct Pattern {
    width: usize,
    cells: Vec<u8>,
}

impl Pattern {
    /// Validate a grid of rows and build a pattern from it.
    ///
    /// The `id` is only used to label errors.
    pub fn new<R: AsRef<[u8]>>(id: usize, rows: &[R]) -> Result<Self, PuzzleError> {
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if width == 0 {
            return Err(PuzzleError::EmptyShape { id });
        }

        for (row, cells) in rows.iter().enumerate() {
            let len = cells.as_ref().len();
            if len != width {
                return Err(PuzzleError::RaggedShape {
                    id,
                    row,
                    len,
                    expected: width,
                });
            }
        }

        if rows.len() > FRAME_SIZE || width > FRAME_SIZE {
            return Err(PuzzleError::ShapeTooLarge {
                id,
                rows: rows.len(),
                cols: width,
            });
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.as_ref().iter().enumerate() {
                if value > 2 {
                    return Err(PuzzleError::InvalidCell {
                        id,
                        row,
                        col,
                        value,
                    });
                }
                cells.push(value);
            }
        }

        if cells.iter().all(|&value| value == 0) {
            return Err(PuzzleError::EmptyShape { id });
        }

        Ok(Self { width, cells })
    }

    /// Build a pattern from rows known to be well formed.
    pub(crate) fn from_template(rows: &[&[u8]]) -> Self {
        let width = rows.first().map_or(0, |row| row.len());
        let cells = rows.iter().flat_map(|row| row.iter().copied()).collect();
        Self { width, cells }
    }

    /// Get pattern width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get pattern height.
    pub fn height(&self) -> usize {
        self.cells.len() / self.width
    }

    /// Iterate over the rows of the pattern.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Return the value of the cell at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if col < self.width {
            self.cells.get(row * self.width + col).copied()
        } else {
            None
        }
    }

    /// Number of non-empty cells, gap cells included.
    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|&&value| value != 0).count()
    }

    /// Number of gap cells.
    pub fn gap_count(&self) -> usize {
        self.cells.iter().filter(|&&value| value == 2).count()
    }

    /// Return the pattern rotated 90° clockwise.
    pub fn rotate(&self) -> Self {
        let cols = self.width();
        let rows = self.height();
        let mut rotated = Vec::with_capacity(self.cells.len());

        for c in 0..cols {
            for r in (0..rows).rev() {
                rotated.push(self.cells[r * cols + c]);
            }
        }

        Self {
            width: rows,
            cells: rotated,
        }
    }

    /// Return the pattern mirrored top to bottom.
    pub fn flip(&self) -> Self {
        let width = self.width;
        let mut reflected = Vec::with_capacity(self.cells.len());
        let mut row_it = self.height();

        while row_it > 0 {
            reflected.extend_from_slice(&self.cells[(row_it - 1) * width..row_it * width]);
            row_it -= 1;
        }

        Self {
            width,
            cells: reflected,
        }
    }

    /// Return all eight transforms in generation order: four clockwise
    /// rotations, then the flipped pattern and its four rotations. Symmetric
    /// patterns appear more than once.
    pub fn transforms(&self) -> [Pattern; ORIENTATIONS] {
        let mut current = self.clone();
        core::array::from_fn(|step| {
            if step == ORIENTATIONS / 2 {
                current = current.flip();
            }
            let next = current.rotate();
            core::mem::replace(&mut current, next)
        })
    }

    /// Return the smallest of the eight transforms. Two patterns are the same
    /// free polyomino exactly when their canonical forms are equal.
    pub fn canonical(&self) -> Pattern {
        let [first, rest @ ..] = self.transforms();
        rest.into_iter()
            .fold(first, |min, pattern| if pattern < min { pattern } else { min })
    }
}

/// A shape placed at some offset of the 8×8 frame.
///
/// Cloning is cheap, the pattern is shared. Equality compares the defining
/// pattern only: the id, offset and masks are ignored.
#[derive(Debug, Clone)]
pub struct Shape {
    id: usize,
    pattern: Arc<Pattern>,
    mask: Mask,
    gaps: Mask,
    row: i32,
    col: i32,
}

impl Shape {
    /// Create a shape with the given id from a grid of rows, positioned at
    /// the upper left corner `(0, 0)`. Masks are computed immediately.
    ///
    /// Rows must all have the same length, at most eight rows and columns are
    /// allowed, and cells must be `0`, `1` or `2`.
    pub fn new<R: AsRef<[u8]>>(id: usize, rows: &[R]) -> Result<Self, PuzzleError> {
        Pattern::new(id, rows).map(|pattern| Self::from_pattern(id, pattern))
    }

    /// Create a puzzle piece. Like [`Shape::new`], but gap cells are refused.
    pub fn piece<R: AsRef<[u8]>>(id: usize, rows: &[R]) -> Result<Self, PuzzleError> {
        let shape = Self::new(id, rows)?;
        if shape.has_gaps() {
            return Err(PuzzleError::ReservedGapCell { id });
        }
        Ok(shape)
    }

    pub(crate) fn from_pattern(id: usize, pattern: Pattern) -> Self {
        let (mask, gaps) = compute_masks(pattern.rows());
        Self {
            id,
            pattern: Arc::new(pattern),
            mask,
            gaps,
            row: 0,
            col: 0,
        }
    }

    /// Identifier shared by every orientation and translation of this shape.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The defining pattern.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Number of rows in the pattern.
    pub fn num_rows(&self) -> usize {
        self.pattern.height()
    }

    /// Number of columns in the pattern.
    pub fn num_cols(&self) -> usize {
        self.pattern.width()
    }

    /// Row offset accumulated by translations.
    pub fn row(&self) -> i32 {
        self.row
    }

    /// Column offset accumulated by translations.
    pub fn col(&self) -> i32 {
        self.col
    }

    /// Number of non-empty cells in the pattern.
    pub fn cell_count(&self) -> usize {
        self.pattern.cell_count()
    }

    /// Return true if the pattern contains gap cells.
    pub fn has_gaps(&self) -> bool {
        self.pattern.gap_count() > 0
    }

    /// All cells covered by the shape at its current offset.
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// The gap cells of the shape, a subset of [`Shape::mask`].
    pub fn gap_mask(&self) -> Mask {
        self.gaps
    }

    /// The cells that must be filled for this shape, as a pruning template,
    /// to match: the mask without the gaps.
    pub fn outline_mask(&self) -> Mask {
        self.mask & !self.gaps
    }

    /// Return true if some cells of the pattern were lost to translation past
    /// the frame or to clipping.
    pub fn is_truncated(&self) -> bool {
        self.mask.count() as usize != self.cell_count()
    }

    /// Return a copy moved by `rows` and `cols`.
    ///
    /// Masks are translated directly rather than recomputed from the pattern,
    /// so cells pushed off the frame are lost for good.
    pub fn translate(&self, rows: i32, cols: i32) -> Self {
        Self {
            row: self.row.saturating_add(rows),
            col: self.col.saturating_add(cols),
            mask: self.mask.translate(rows, cols),
            gaps: self.gaps.translate(rows, cols),
            ..self.clone()
        }
    }

    /// Return a copy with both masks restricted to `region`.
    pub fn clip(&self, region: Mask) -> Self {
        Self {
            mask: self.mask & region,
            gaps: self.gaps & region,
            ..self.clone()
        }
    }

    #[cfg(test)]
    fn rotate(&self) -> Self {
        Self::from_pattern(self.id, self.pattern.rotate())
    }

    #[cfg(test)]
    fn flip(&self) -> Self {
        Self::from_pattern(self.id, self.pattern.flip())
    }

    /// Generate the distinct orientations of this shape, each at offset
    /// `(0, 0)`.
    ///
    /// Orientations are produced in the order of [`Pattern::transforms`] and
    /// duplicates, by pattern equality, are dropped. A square yields one
    /// orientation, an L-shape all eight.
    pub fn permutations(&self) -> Vec<Shape> {
        let mut seen = HashSet::with_capacity(ORIENTATIONS);

        self.pattern
            .transforms()
            .into_iter()
            .filter(|pattern| seen.insert(pattern.clone()))
            .map(|pattern| Self::from_pattern(self.id, pattern))
            .collect()
    }

    /// Return true if `other` is a rotation or reflection of this shape.
    pub fn is_congruent(&self, other: &Shape) -> bool {
        self.cell_count() == other.cell_count()
            && self.pattern.canonical() == other.pattern.canonical()
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for Shape {}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shape #{:3}, mask:{}", self.id, self.mask)?;
        for row in self.pattern.rows() {
            let cells: Vec<String> = row.iter().map(u8::to_string).collect();
            writeln!(f, "[{}]", cells.join(" "))?;
        }
        Ok(())
    }
}

/// Build puzzle pieces from a list of grids. The position of each grid in the
/// list determines its id, starting from 1.
pub fn make_shapes<G, R>(grids: impl IntoIterator<Item = G>) -> Result<Vec<Shape>, PuzzleError>
where
    G: AsRef<[R]>,
    R: AsRef<[u8]>,
{
    grids
        .into_iter()
        .enumerate()
        .map(|(index, grid)| Shape::piece(index + 1, grid.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(rows: &[&[u8]]) -> Pattern {
        Pattern::from_template(rows)
    }

    #[test]
    fn new_shape_computes_masks() {
        let shape = Shape::new(7, &[[1u8, 1, 0], [1, 1, 1]]).unwrap();
        assert_eq!(shape.id(), 7);
        assert_eq!(shape.num_rows(), 2);
        assert_eq!(shape.num_cols(), 3);
        assert_eq!(shape.cell_count(), 5);
        assert_eq!(shape.mask(), Mask::from_bits(0xc0e0_0000_0000_0000));
        assert_eq!(shape.gap_mask(), Mask::EMPTY);
        assert_eq!((shape.row(), shape.col()), (0, 0));
    }

    #[test]
    fn gap_cells_are_part_of_mask() {
        let shape = Shape::new(100, &[[0u8, 1, 0], [1, 2, 1], [0, 1, 0]]).unwrap();
        assert!(shape.mask().covers(shape.gap_mask()));
        assert_eq!(shape.gap_mask(), Mask::cell(1, 1));
        assert_eq!(shape.outline_mask().count(), 4);
        assert!(!shape.outline_mask().intersects(shape.gap_mask()));
    }

    #[test]
    fn new_shape_validation() {
        let empty: [[u8; 0]; 0] = [];
        assert!(matches!(
            Shape::new(1, &empty),
            Err(PuzzleError::EmptyShape { id: 1 })
        ));
        assert!(matches!(
            Shape::new(2, &[[0u8, 0], [0, 0]]),
            Err(PuzzleError::EmptyShape { id: 2 })
        ));

        let ragged: Vec<Vec<u8>> = vec![vec![1, 1, 1], vec![1, 1]];
        assert!(matches!(
            Shape::new(3, &ragged),
            Err(PuzzleError::RaggedShape {
                id: 3,
                row: 1,
                len: 2,
                expected: 3
            })
        ));

        assert!(matches!(
            Shape::new(4, &[[1u8; 9]]),
            Err(PuzzleError::ShapeTooLarge {
                id: 4,
                rows: 1,
                cols: 9
            })
        ));
        assert!(matches!(
            Shape::new(5, &[[1u8]; 9]),
            Err(PuzzleError::ShapeTooLarge {
                id: 5,
                rows: 9,
                cols: 1
            })
        ));

        assert!(matches!(
            Shape::new(6, &[[1u8, 3]]),
            Err(PuzzleError::InvalidCell {
                id: 6,
                row: 0,
                col: 1,
                value: 3
            })
        ));

        assert!(Shape::new(7, &[[1u8; 8]; 8]).is_ok());
    }

    #[test]
    fn pieces_refuse_gap_cells() {
        assert!(matches!(
            Shape::piece(9, &[[1u8, 2]]),
            Err(PuzzleError::ReservedGapCell { id: 9 })
        ));
        assert!(Shape::piece(9, &[[1u8, 1]]).is_ok());
    }

    #[test]
    fn make_shapes_numbers_from_one() {
        let grids: Vec<Vec<Vec<u8>>> = vec![
            vec![vec![1, 1, 0], vec![1, 1, 1]],
            vec![vec![1, 0, 1], vec![1, 1, 1]],
            vec![vec![1, 0, 0, 0], vec![1, 1, 1, 1], vec![1, 0, 0, 0]],
        ];
        let shapes = make_shapes(&grids).unwrap();
        assert_eq!(
            shapes.iter().map(Shape::id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(shapes[2].num_rows(), 3);
        assert_eq!(shapes[2].num_cols(), 4);
    }

    #[test]
    fn make_shapes_reports_bad_grid() {
        let grids: Vec<Vec<Vec<u8>>> = vec![vec![vec![1]], vec![vec![1, 1], vec![1]]];
        assert!(matches!(
            make_shapes(&grids),
            Err(PuzzleError::RaggedShape { id: 2, .. })
        ));
    }

    #[test]
    fn test_rotate() {
        let shape = pattern(&[&[1, 0, 0], &[1, 1, 1]]);
        let expected = pattern(&[&[1, 1], &[1, 0], &[1, 0]]);
        assert_eq!(shape.rotate(), expected);
    }

    #[test]
    fn test_flip() {
        let shape = pattern(&[&[1, 0, 0], &[1, 1, 1]]);
        let expected = pattern(&[&[1, 1, 1], &[1, 0, 0]]);
        assert_eq!(shape.flip(), expected);
    }

    #[test]
    fn rotate_rederives_masks() {
        let shape = Shape::new(1, &[[1u8, 1, 1]]).unwrap().translate(2, 2);
        let rotated = shape.rotate();
        assert_eq!(rotated.mask(), Mask::from_bits(0x8080_8000_0000_0000));
        assert_eq!((rotated.row(), rotated.col()), (0, 0));
        assert_eq!(rotated.id(), 1);
        assert_eq!(shape.flip().mask(), Mask::from_bits(0xe000_0000_0000_0000));
    }

    #[test]
    fn test_generate_permutations() {
        let shape = Shape::new(1, &[[1u8, 0, 0], [1, 1, 1]]).unwrap();
        let permutations: Vec<Pattern> = shape
            .permutations()
            .iter()
            .map(|shape| shape.pattern().clone())
            .collect();

        let expected = vec![
            pattern(&[&[1, 0, 0], &[1, 1, 1]]),
            pattern(&[&[1, 1], &[1, 0], &[1, 0]]),
            pattern(&[&[1, 1, 1], &[0, 0, 1]]),
            pattern(&[&[0, 1], &[0, 1], &[1, 1]]),
            pattern(&[&[1, 1, 1], &[1, 0, 0]]),
            pattern(&[&[1, 1], &[0, 1], &[0, 1]]),
            pattern(&[&[0, 0, 1], &[1, 1, 1]]),
            pattern(&[&[1, 0], &[1, 0], &[1, 1]]),
        ];
        assert_eq!(permutations, expected);
    }

    #[test]
    fn symmetric_shapes_have_fewer_permutations() {
        let cases: [(&[&[u8]], usize); 6] = [
            (&[&[1, 1], &[1, 1]], 1),
            (&[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]], 1),
            (&[&[1, 1, 1, 1]], 2),
            (&[&[1, 1], &[1, 0], &[1, 1]], 4),
            (&[&[0, 1, 1], &[1, 1, 0]], 4),
            (&[&[0, 1, 1], &[1, 1, 0], &[1, 0, 0]], 4),
        ];
        for (rows, expected) in cases {
            let shape = Shape::from_pattern(1, pattern(rows));
            assert_eq!(shape.permutations().len(), expected, "{}", shape);
        }
    }

    #[test]
    fn permutations_keep_id_and_reset_offset() {
        let shape = Shape::new(42, &[[1u8, 0], [1, 1]]).unwrap().translate(3, 1);
        for orientation in shape.permutations() {
            assert_eq!(orientation.id(), 42);
            assert_eq!((orientation.row(), orientation.col()), (0, 0));
            assert_eq!(orientation.mask().count(), 3);
        }
    }

    #[test]
    fn permutations_of_templates_keep_gaps() {
        let template = Shape::new(106, &[[0u8, 1, 1, 0], [1, 2, 2, 1], [0, 1, 2, 1], [0, 0, 1, 0]])
            .unwrap();
        let orientations = template.permutations();
        assert_eq!(orientations.len(), 4);
        for orientation in orientations {
            assert_eq!(orientation.gap_mask().count(), 3);
            assert!(orientation.mask().covers(orientation.gap_mask()));
        }
    }

    #[test]
    fn equality_uses_pattern_only() {
        let cross: [[u8; 3]; 3] = [[0, 1, 0], [1, 1, 1], [0, 1, 0]];
        let bracket: [[u8; 2]; 3] = [[1, 1], [1, 0], [1, 1]];

        let cross_1 = Shape::new(1, &cross).unwrap();
        assert_eq!(cross_1, Shape::new(1, &cross).unwrap());
        assert_eq!(cross_1, Shape::new(2, &cross).unwrap());
        assert_ne!(cross_1, Shape::new(2, &bracket).unwrap());

        let bracket_1 = Shape::new(1, &bracket).unwrap();
        assert_eq!(bracket_1, Shape::new(2, &bracket).unwrap());
        assert_eq!(bracket_1, Shape::new(2, &bracket).unwrap().flip());
        assert_ne!(bracket_1, Shape::new(2, &bracket).unwrap().rotate());

        // Same pattern at another offset is still the same shape.
        assert_eq!(bracket_1, bracket_1.translate(2, 3));
    }

    #[test]
    fn canonical_form_identifies_free_polyominoes() {
        let l_shape = pattern(&[&[1, 0, 0], &[1, 1, 1]]);
        let canonical = l_shape.canonical();
        assert_eq!(canonical, pattern(&[&[0, 1], &[0, 1], &[1, 1]]));
        for transform in l_shape.transforms() {
            assert_eq!(transform.canonical(), canonical);
        }

        let a = Shape::new(1, &[[1u8, 0, 0], [1, 1, 1]]).unwrap();
        let b = Shape::new(2, &[[1u8, 1], [0, 1], [0, 1]]).unwrap();
        let c = Shape::new(3, &[[1u8, 1, 1], [0, 1, 0]]).unwrap();
        assert!(a.is_congruent(&b));
        assert!(!a.is_congruent(&c));
    }

    #[test]
    fn translate_saturates_offset() {
        let shape = Shape::new(1, &[[1u8]]).unwrap();
        let far = shape.translate(i32::MAX, i32::MIN).translate(1, -1);
        assert_eq!((far.row(), far.col()), (i32::MAX, i32::MIN));
        assert_eq!(far.mask(), Mask::EMPTY);
        assert!(far.is_truncated());
    }

    #[test]
    fn pattern_cells() {
        let pattern = pattern(&[&[1, 0, 2], &[0, 1, 1]]);
        assert_eq!((pattern.width(), pattern.height()), (3, 2));
        assert_eq!(pattern.get(0, 2), Some(2));
        assert_eq!(pattern.get(1, 0), Some(0));
        assert_eq!(pattern.get(0, 3), None);
        assert_eq!(pattern.get(2, 0), None);
        assert_eq!(pattern.cell_count(), 4);
        assert_eq!(pattern.gap_count(), 1);
    }

    #[test]
    fn translate_and_clip() {
        let shape = Shape::new(1, &[[1u8, 1], [1, 1]]).unwrap();
        let moved = shape.translate(1, 2);
        assert_eq!((moved.row(), moved.col()), (1, 2));
        assert_eq!(moved.mask(), Mask::from_bits(0x0030_3000_0000_0000));
        assert!(!moved.is_truncated());

        let off_edge = shape.translate(-1, 0);
        assert_eq!(off_edge.mask(), Mask::from_bits(0xc000_0000_0000_0000));
        assert!(off_edge.is_truncated());

        let clipped = moved.clip(Mask::region(2, 3));
        assert_eq!(clipped.mask(), Mask::cell(1, 2));
        assert_eq!((clipped.row(), clipped.col()), (1, 2));
        assert!(clipped.is_truncated());
    }

    #[test]
    fn display_shape() {
        let shape = Shape::new(3, &[[1u8, 1, 0], [1, 1, 1]]).unwrap();
        assert_eq!(
            shape.to_string(),
            "Shape #  3, mask:0xc0e0000000000000\n[1 1 0]\n[1 1 1]\n"
        );
    }
}
