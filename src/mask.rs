//! Bit masks over an 8×8 grid.
//!
//! A [`Mask`] packs one cell per bit into a `u64`. The most significant bit is
//! the upper left corner of the grid, `(0, 0)`, and cells follow in row-major
//! order. Every row starts on a new byte no matter how many columns the board
//! actually has, so the mask of a shape does not depend on the board it is
//! eventually tested against and can be computed once per shape.

use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Number of rows and columns addressable by a [`Mask`].
pub const FRAME_SIZE: usize = 8;

/// Every byte set to `0x01`, used to replicate a per-row byte mask across all
/// eight rows.
const ROW_LANES: u64 = 0x0101_0101_0101_0101;

/// A set of cells on an 8×8 grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Mask(u64);

impl Mask {
    /// The mask with no cells set.
    pub const EMPTY: Mask = Mask(0);

    /// The mask with all 64 cells set.
    pub const FULL: Mask = Mask(u64::MAX);

    /// The mask with only the upper left corner `(0, 0)` set.
    pub const FIRST_BIT: Mask = Mask(0x8000_0000_0000_0000);

    /// Wrap raw bits.
    pub const fn from_bits(bits: u64) -> Self {
        Mask(bits)
    }

    /// Return the raw bits.
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Return the mask containing the single cell at `(row, col)`, or the
    /// empty mask if the cell is outside the 8×8 frame.
    pub fn cell(row: usize, col: usize) -> Self {
        if row < FRAME_SIZE && col < FRAME_SIZE {
            Mask(Self::FIRST_BIT.0 >> (row * FRAME_SIZE + col))
        } else {
            Self::EMPTY
        }
    }

    /// Return the mask of the upper left `rows × cols` rectangle.
    ///
    /// For example, the region of a 5×5 board has the first five bits set in
    /// each of the first five bytes. Dimensions larger than the frame are
    /// clamped to it.
    pub fn region(rows: usize, cols: usize) -> Self {
        let cols = cols.min(FRAME_SIZE);
        let rows = rows.min(FRAME_SIZE);

        // Top `cols` bits of a byte, then copied into the first `rows` bytes.
        let row_bits = if cols == 0 {
            0
        } else {
            (0xffu64 << (FRAME_SIZE - cols)) & 0xff
        };
        let mut bits = 0u64;
        for _ in 0..rows {
            bits = (bits >> FRAME_SIZE) | (row_bits << 56);
        }

        Mask(bits)
    }

    /// Return true if no cells are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return the number of cells set.
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Return true if `self` and `other` share at least one cell.
    pub const fn intersects(self, other: Mask) -> bool {
        self.0 & other.0 != 0
    }

    /// Return true if every cell of `other` is also set in `self`.
    pub const fn covers(self, other: Mask) -> bool {
        self.0 & other.0 == other.0
    }

    /// Return true if the cell at `(row, col)` is set.
    pub fn contains(self, row: usize, col: usize) -> bool {
        self.intersects(Mask::cell(row, col))
    }

    /// Translate the mask as if its cell pattern were moved by `rows` rows and
    /// `cols` columns.
    ///
    /// Translating past any edge truncates instead of wrapping: bits shifted out
    /// of a row are dropped and never carried into the neighbouring row.
    /// Moving a pattern entirely off the frame yields [`Mask::EMPTY`].
    pub fn translate(self, rows: i32, cols: i32) -> Self {
        let row_shift = rows.unsigned_abs().saturating_mul(FRAME_SIZE as u32);
        let bits = if rows < 0 {
            self.0.checked_shl(row_shift).unwrap_or(0)
        } else {
            self.0.checked_shr(row_shift).unwrap_or(0)
        };

        // Columns are truncated by clearing, in every byte, the bits that would
        // cross into the adjacent row before shifting.
        let col_shift = cols.unsigned_abs();
        if col_shift as usize >= FRAME_SIZE {
            return Self::EMPTY;
        }
        let bits = if cols < 0 {
            let keep = (0xffu64 >> col_shift) * ROW_LANES;
            (bits & keep) << col_shift
        } else {
            let keep = ((0xffu64 << col_shift) & 0xff) * ROW_LANES;
            (bits & keep) >> col_shift
        };

        Mask(bits)
    }

    /// Iterate over the `(row, col)` coordinates of every set cell in
    /// row-major order.
    pub fn cells(self) -> impl Iterator<Item = (usize, usize)> {
        (0..FRAME_SIZE * FRAME_SIZE)
            .filter(move |index| self.0 & (Self::FIRST_BIT.0 >> index) != 0)
            .map(|index| (index / FRAME_SIZE, index % FRAME_SIZE))
    }
}

/// Compute the occupancy and gap masks of a 2D cell pattern.
///
/// Rows are scanned in order; a row of length `L` maps to the top `L` bits of
/// that row's byte. Any non-zero cell is occupied, cells equal to `2` are
/// additionally recorded in the gap mask, so the gap mask is always a subset of
/// the occupancy mask. Cells beyond the eighth row or column are ignored;
/// callers validate sizes before getting here.
pub fn compute_masks<R>(rows: impl IntoIterator<Item = R>) -> (Mask, Mask)
where
    R: AsRef<[u8]>,
{
    let mut occupied = 0u64;
    let mut gaps = 0u64;

    for (r, row) in rows.into_iter().take(FRAME_SIZE).enumerate() {
        let mut bit = Mask::FIRST_BIT.0 >> (r * FRAME_SIZE);
        for &value in row.as_ref().iter().take(FRAME_SIZE) {
            if value != 0 {
                occupied |= bit;
            }
            if value == 2 {
                gaps |= bit;
            }
            bit >>= 1;
        }
    }

    (Mask(occupied), Mask(gaps))
}

impl BitAnd for Mask {
    type Output = Mask;

    fn bitand(self, rhs: Mask) -> Mask {
        Mask(self.0 & rhs.0)
    }
}

impl BitAndAssign for Mask {
    fn bitand_assign(&mut self, rhs: Mask) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Mask {
    type Output = Mask;

    fn bitor(self, rhs: Mask) -> Mask {
        Mask(self.0 | rhs.0)
    }
}

impl BitOrAssign for Mask {
    fn bitor_assign(&mut self, rhs: Mask) {
        self.0 |= rhs.0;
    }
}

impl Not for Mask {
    type Output = Mask;

    fn not(self) -> Mask {
        Mask(!self.0)
    }
}

impl fmt::LowerHex for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mask({})", self)
    }
}
