use std::{
    fmt,
    ops::{BitAnd, BitOr},
};

use super::bits::Bits;

/// Number of columns in the playfield.
pub const WIDTH: usize = 10;
/// Number of rows in the playfield.
pub const HEIGHT: usize = 22;
/// Number of cells (and significant bits) in a [`Board`].
pub const CELLS: usize = WIDTH * HEIGHT;

/// Backing storage for a board. 256 bits, of which the low [`CELLS`] are used.
pub(crate) type BoardBits = Bits<4>;

const _: () = assert!(BoardBits::BITS >= CELLS);
const _: () = assert!(WIDTH <= u16::BITS as usize);

const BOARD_MASK: BoardBits = BoardBits::low_mask(CELLS);
const ROW_MASK: BoardBits = BoardBits::low_mask(WIDTH);

const fn column_mask(col: usize) -> BoardBits {
    let mut mask = BoardBits::ZERO;
    let mut row = 0;
    while row < HEIGHT {
        mask = mask.with_bit(row * WIDTH + col);
        row += 1;
    }
    mask
}

const fn row_mask(row: usize) -> BoardBits {
    ROW_MASK.shl(row * WIDTH)
}

const LEFT_COLUMN: BoardBits = column_mask(0);
const RIGHT_COLUMN: BoardBits = column_mask(WIDTH - 1);
const BOTTOM_ROW: BoardBits = row_mask(HEIGHT - 1);

/// One layer of the playfield packed into a [`CELLS`]-bit mask.
///
/// # Bit Layout
///
/// Row-major, bit index `row * WIDTH + col`:
///
/// - Row 0 is the top of the field and occupies the least significant bits
/// - Column 0 is the left wall
/// - A set bit means the cell is occupied
///
/// Translation is a shift of the whole mask: one column is one bit, one row is
/// [`WIDTH`] bits. A raw column shift wraps cells across row boundaries, so
/// [`shift_left`](Self::shift_left) and [`shift_right`](Self::shift_right) must only be
/// applied after checking the corresponding wall column is free.
///
/// # Example
///
/// ```
/// use bitfall_engine::{Board, HEIGHT};
///
/// let cell = Board::cell(4, 0);
/// let landed = Board::cell(4, HEIGHT - 1);
///
/// let mut board = cell;
/// for _ in 0..HEIGHT - 1 {
///     board = board.fall();
/// }
/// assert_eq!(board, landed);
/// assert!(board.fall().is_empty());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    bits: BoardBits,
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const EMPTY: Self = Self {
        bits: BoardBits::ZERO,
    };

    /// Wraps raw bits, discarding anything beyond the last cell.
    pub(crate) const fn from_bits(bits: BoardBits) -> Self {
        Self {
            bits: bits.and(BOARD_MASK),
        }
    }

    /// Returns a board with the single cell at (`col`, `row`) occupied.
    #[must_use]
    pub const fn cell(col: usize, row: usize) -> Self {
        assert!(col < WIDTH);
        assert!(row < HEIGHT);
        Self {
            bits: BoardBits::ZERO.with_bit(row * WIDTH + col),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Number of occupied cells.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.bits.count_ones()
    }

    #[must_use]
    pub const fn is_occupied(&self, col: usize, row: usize) -> bool {
        assert!(col < WIDTH);
        assert!(row < HEIGHT);
        self.bits.bit(row * WIDTH + col)
    }

    /// Shifts every cell one row down. Cells on the bottom row fall off the board.
    #[must_use]
    pub const fn fall(self) -> Self {
        Self::from_bits(self.bits.shl(WIDTH))
    }

    /// Shifts every cell one column toward the right wall.
    #[must_use]
    pub const fn shift_right(self) -> Self {
        Self::from_bits(self.bits.shl(1))
    }

    /// Shifts every cell one column toward the left wall.
    #[must_use]
    pub const fn shift_left(self) -> Self {
        Self::from_bits(self.bits.shr(1))
    }

    /// Shifts every cell `n` columns toward the right wall in one step.
    #[must_use]
    pub(crate) const fn shift_right_by(self, n: usize) -> Self {
        Self::from_bits(self.bits.shl(n))
    }

    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        !self.bits.and(other.bits).is_zero()
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits.or(other.bits),
        }
    }

    #[must_use]
    pub const fn occupies_column(&self, col: usize) -> bool {
        assert!(col < WIDTH);
        !self.bits.and(column_mask(col)).is_zero()
    }

    #[must_use]
    pub const fn occupies_row(&self, row: usize) -> bool {
        assert!(row < HEIGHT);
        !self.bits.and(row_mask(row)).is_zero()
    }

    #[must_use]
    pub const fn touches_left_wall(&self) -> bool {
        !self.bits.and(LEFT_COLUMN).is_zero()
    }

    #[must_use]
    pub const fn touches_right_wall(&self) -> bool {
        !self.bits.and(RIGHT_COLUMN).is_zero()
    }

    #[must_use]
    pub const fn touches_floor(&self) -> bool {
        !self.bits.and(BOTTOM_ROW).is_zero()
    }

    /// Returns the cells of `row` as a [`WIDTH`]-bit value, bit `n` being column `n`.
    #[must_use]
    pub fn row_bits(&self, row: usize) -> u16 {
        assert!(row < HEIGHT);
        let mut bits = 0;
        for col in 0..WIDTH {
            if self.bits.bit(row * WIDTH + col) {
                bits |= 1 << col;
            }
        }
        bits
    }

    /// Iterates over the rows from top to bottom, each as a column occupancy iterator.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = bool>> + '_ {
        (0..HEIGHT).map(move |row| {
            let bits = self.row_bits(row);
            (0..WIDTH).map(move |col| bits & (1 << col) != 0)
        })
    }

    /// Creates a `Board` from ASCII art for testing.
    ///
    /// `#` is an occupied cell and `.` an empty one; any other character is ignored.
    /// Rows are given top to bottom and must be [`WIDTH`] cells wide. Fewer than
    /// [`HEIGHT`] rows may be given; the rest of the board stays empty.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= HEIGHT,
            "At most {HEIGHT} rows are allowed, got {}",
            lines.len()
        );

        let mut board = Self::EMPTY;
        for (row, line) in lines.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                cells.len(),
                WIDTH,
                "Each row must have exactly {WIDTH} cells, got {} at row {row}",
                cells.len(),
            );
            for (col, &ch) in cells.iter().enumerate() {
                if ch == '#' {
                    board = board.union(Self::cell(col, row));
                }
            }
        }
        board
    }
}

impl BitOr for Board {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitAnd for Board {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self {
            bits: self.bits.and(rhs.bits),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.rows().enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for occupied in cells {
                f.write_str(if occupied { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for (row, line) in self.to_string().lines().enumerate() {
            writeln!(f, "  {row:2}: {line}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_board() -> Board {
        Board::from_ascii(
            r"
            #.........
            .##.......
            ..........
            .........#
            ",
        )
    }

    #[test]
    fn test_union_with_empty_is_identity() {
        let boards = [
            Board::EMPTY,
            sample_board(),
            Board::cell(WIDTH - 1, HEIGHT - 1),
        ];
        for board in boards {
            assert_eq!(board.union(Board::EMPTY), board);
            assert_eq!(Board::EMPTY | board, board);
            assert!(!board.intersects(&Board::EMPTY));
            assert!(!Board::EMPTY.intersects(&board));
        }
    }

    #[test]
    fn test_intersects() {
        let board = sample_board();
        assert!(board.intersects(&Board::cell(1, 1)));
        assert!(!board.intersects(&Board::cell(0, 1)));
        assert_eq!(board & Board::cell(9, 3), Board::cell(9, 3));
    }

    #[test]
    fn test_from_ascii_layout() {
        let board = sample_board();
        assert_eq!(board.count(), 4);
        assert!(board.is_occupied(0, 0));
        assert!(board.is_occupied(1, 1));
        assert!(board.is_occupied(2, 1));
        assert!(board.is_occupied(9, 3));
        assert_eq!(board.row_bits(1), 0b110);
        assert_eq!(board.row_bits(3), 1 << 9);
    }

    #[test]
    fn test_display_round_trip() {
        let board = sample_board();
        let art = board.to_string();
        assert_eq!(art.lines().count(), HEIGHT);
        assert_eq!(art.lines().next(), Some("#........."));
        assert_eq!(Board::from_ascii(&art), board);
    }

    #[test]
    fn test_fall_moves_one_row() {
        let board = sample_board().fall();
        assert_eq!(
            board,
            Board::from_ascii(
                r"
                ..........
                #.........
                .##.......
                ..........
                .........#
                ",
            )
        );
    }

    #[test]
    fn test_fall_discards_bottom_row() {
        let board = Board::cell(3, HEIGHT - 1).union(Board::cell(5, HEIGHT - 2));
        assert_eq!(board.fall(), Board::cell(5, HEIGHT - 1));
        assert!(board.fall().fall().is_empty());
    }

    #[test]
    fn test_column_shifts() {
        let board = Board::cell(4, 2);
        assert_eq!(board.shift_right(), Board::cell(5, 2));
        assert_eq!(board.shift_left(), Board::cell(3, 2));
    }

    #[test]
    fn test_unguarded_column_shift_wraps_rows() {
        // Shifting past a wall moves the cell into the neighbouring row, which is why the
        // engine checks the wall columns before shifting.
        assert_eq!(Board::cell(WIDTH - 1, 0).shift_right(), Board::cell(0, 1));
        assert_eq!(Board::cell(0, 1).shift_left(), Board::cell(WIDTH - 1, 0));
        assert!(Board::cell(0, 0).shift_left().is_empty());
    }

    #[test]
    fn test_wall_and_floor_queries() {
        let board = sample_board();
        assert!(board.touches_left_wall());
        assert!(board.touches_right_wall());
        assert!(!board.touches_floor());
        assert!(board.occupies_column(2));
        assert!(!board.occupies_column(5));
        assert!(board.occupies_row(3));
        assert!(!board.occupies_row(2));

        let floor = Board::cell(6, HEIGHT - 1);
        assert!(floor.touches_floor());
        assert!(floor.occupies_row(HEIGHT - 1));
        assert!(!floor.touches_left_wall());
        assert!(!floor.touches_right_wall());
    }

    #[test]
    fn test_rows_iterator() {
        let board = Board::cell(2, 1);
        let rows: Vec<Vec<bool>> = board.rows().map(Iterator::collect).collect();
        assert_eq!(rows.len(), HEIGHT);
        assert!(rows.iter().all(|row| row.len() == WIDTH));
        assert!(rows[1][2]);
        assert_eq!(rows.iter().flatten().filter(|c| **c).count(), 1);
    }
}
