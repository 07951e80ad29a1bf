use super::{
    bits::Bits,
    board::{Board, CELLS, WIDTH},
    piece::{PieceId, PieceShape},
};

/// Column at which the left edge of a spawned piece's 4×4 cell is placed.
///
/// The cell covers columns `SPAWN_COLUMN..SPAWN_COLUMN + 4`, i.e. it is centered
/// over the field.
pub const SPAWN_COLUMN: usize = WIDTH / 2 - 2;

/// Bits reserved for one piece: four full board rows.
const SLOT_BITS: usize = WIDTH * PieceShape::CELL_SIZE;
/// Significant bits of the block map: twice a board.
const MAP_BITS: usize = CELLS * 2;

type BlockMapBits = Bits<7>;

const _: () = assert!(BlockMapBits::BITS >= MAP_BITS);
const _: () = assert!(SLOT_BITS * (PieceId::LEN + 1) <= MAP_BITS);
const _: () = assert!(SPAWN_COLUMN + PieceShape::CELL_SIZE <= WIDTH);

/// Every catalog piece packed back-to-back in one mask.
///
/// The pattern of piece `id` sits in a [`WIDTH`]` * 4`-bit slot at bit offset
/// `WIDTH * 4 * id`, laid out with the same row stride as a [`Board`]. Extracting a piece
/// is a shift and a mask, after which the slot bits already are the top rows of a board.
///
/// Row patterns are stacked bottom row first: the last row of a shape lands on the first
/// row of its slot. Together with bit `n` of a row pattern mapping to column `n`, a
/// shape spawns turned half a revolution relative to how the catalog lists it, which
/// keeps its handedness (an L is still an L).
///
/// # Example
///
/// ```
/// use bitfall_engine::{BLOCK_MAP, Board, PieceId};
///
/// let square = BLOCK_MAP.extract(PieceId::Square);
/// assert_eq!(
///     square,
///     Board::from_ascii(
///         r"
///         ...##.....
///         ...##.....
///         ",
///     )
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMap {
    bits: BlockMapBits,
}

/// Block map of [`PieceShape::CATALOG`], computed at compile time.
pub const BLOCK_MAP: BlockMap = BlockMap::build(&PieceShape::CATALOG);

impl BlockMap {
    /// Packs `shapes` into a block map.
    ///
    /// Each shape's rows are OR-ed into the low bits of an accumulator that is moved up
    /// one board row after every pattern. The result is placed at the shape's slot and the
    /// finished map is moved down by one row so that slot offsets line up with board rows.
    #[must_use]
    pub const fn build(shapes: &[PieceShape]) -> Self {
        let mut bits = BlockMapBits::ZERO;
        let mut i = 0;
        while i < shapes.len() {
            let shape = &shapes[i];
            let rows = shape.rows();
            let mut cell = BlockMapBits::ZERO;
            let mut r = 0;
            while r < PieceShape::CELL_SIZE {
                cell = cell.or(BlockMapBits::from_u64(rows[r] as u64)).shl(WIDTH);
                r += 1;
            }
            bits = bits.or(cell.shl(SLOT_BITS * shape.id().index()));
            i += 1;
        }
        let bits = bits.and(BlockMapBits::low_mask(MAP_BITS)).shr(WIDTH);
        Self { bits }
    }

    /// Returns the board pattern of a freshly spawned `id`.
    ///
    /// The piece's slot is moved to the low end, cut to four rows and shifted right by
    /// [`SPAWN_COLUMN`] columns.
    #[must_use]
    pub const fn extract(&self, id: PieceId) -> Board {
        let slot = self
            .bits
            .shr(SLOT_BITS * id.index())
            .and(BlockMapBits::low_mask(SLOT_BITS));
        Board::from_bits(slot.resize()).shift_right_by(SPAWN_COLUMN)
    }
}
