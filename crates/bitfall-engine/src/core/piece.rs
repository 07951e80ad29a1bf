use std::str::FromStr;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};

/// Identifier of one of the seven catalog pieces.
///
/// The discriminant doubles as the slot index in the [`BlockMap`](super::BlockMap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[repr(u8)]
pub enum PieceId {
    #[display("SQUARE")]
    Square = 0,
    #[display("LINE")]
    Line = 1,
    #[display("L")]
    L = 2,
    #[display("J")]
    J = 3,
    #[display("T")]
    T = 4,
    #[display("S")]
    S = 5,
    #[display("Z")]
    Z = 6,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown piece {_0:?}")]
pub struct ParsePieceIdError(#[error(not(source))] String);

/// Parses either the full name (`SQUARE`, `LINE`, ...) or the one character name (`O`,
/// `I`, ...), ignoring case.
///
/// ```
/// use bitfall_engine::PieceId;
///
/// assert_eq!("line".parse::<PieceId>().unwrap(), PieceId::Line);
/// assert_eq!("o".parse::<PieceId>().unwrap(), PieceId::Square);
/// assert!("X".parse::<PieceId>().is_err());
/// ```
impl FromStr for PieceId {
    type Err = ParsePieceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        let mut chars = upper.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && let Some(id) = Self::from_char(c)
        {
            return Ok(id);
        }
        Self::ALL
            .into_iter()
            .find(|id| id.to_string() == upper)
            .ok_or_else(|| ParsePieceIdError(s.to_owned()))
    }
}

impl Distribution<PieceId> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceId {
        PieceId::ALL[rng.random_range(0..PieceId::LEN)]
    }
}

impl PieceId {
    /// Number of catalog pieces (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceId::Square,
        PieceId::Line,
        PieceId::L,
        PieceId::J,
        PieceId::T,
        PieceId::S,
        PieceId::Z,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Looks up a piece by catalog index.
    ///
    /// ```
    /// use bitfall_engine::PieceId;
    ///
    /// assert_eq!(PieceId::from_index(1), Some(PieceId::Line));
    /// assert_eq!(PieceId::from_index(7), None);
    /// ```
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::LEN {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Returns the single character name of this piece.
    ///
    /// ```
    /// use bitfall_engine::PieceId;
    ///
    /// assert_eq!(PieceId::Square.as_char(), 'O');
    /// assert_eq!(PieceId::Line.as_char(), 'I');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceId::Square => 'O',
            PieceId::Line => 'I',
            PieceId::L => 'L',
            PieceId::J => 'J',
            PieceId::T => 'T',
            PieceId::S => 'S',
            PieceId::Z => 'Z',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'O' => Some(PieceId::Square),
            'I' => Some(PieceId::Line),
            'L' => Some(PieceId::L),
            'J' => Some(PieceId::J),
            'T' => Some(PieceId::T),
            'S' => Some(PieceId::S),
            'Z' => Some(PieceId::Z),
            _ => None,
        }
    }

    #[must_use]
    pub const fn shape(self) -> &'static PieceShape {
        &PieceShape::CATALOG[self.index()]
    }
}

/// A catalog piece as four row patterns inside a 4×4 cell.
///
/// Rows are listed top first. Each row is a 4-bit value, one bit per column of the
/// cell. Shapes shorter than four rows leave their top rows zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceShape {
    id: PieceId,
    rows: [u8; PieceShape::CELL_SIZE],
}

impl PieceShape {
    /// Width and height of the cell every piece must fit in.
    pub const CELL_SIZE: usize = 4;

    pub const CATALOG: [Self; PieceId::LEN] = [
        Self::new(PieceId::Square, [0, 0, 3, 3]),
        Self::new(PieceId::Line, [0, 0, 0, 15]),
        Self::new(PieceId::L, [0, 0, 1, 7]),
        Self::new(PieceId::J, [0, 0, 4, 7]),
        Self::new(PieceId::T, [0, 0, 2, 7]),
        Self::new(PieceId::S, [0, 0, 3, 6]),
        Self::new(PieceId::Z, [0, 0, 6, 3]),
    ];

    /// Creates a shape, panicking if a row pattern is wider than the cell.
    ///
    /// Used in `const` context, so an invalid catalog fails to compile.
    #[must_use]
    pub const fn new(id: PieceId, rows: [u8; Self::CELL_SIZE]) -> Self {
        let mut i = 0;
        while i < Self::CELL_SIZE {
            assert!(
                rows[i] < 1 << Self::CELL_SIZE,
                "row pattern wider than the piece cell"
            );
            i += 1;
        }
        Self { id, rows }
    }

    #[must_use]
    pub const fn id(&self) -> PieceId {
        self.id
    }

    #[must_use]
    pub const fn rows(&self) -> [u8; Self::CELL_SIZE] {
        self.rows
    }

    /// Number of occupied cells.
    #[must_use]
    pub const fn cell_count(&self) -> u32 {
        let mut count = 0;
        let mut i = 0;
        while i < Self::CELL_SIZE {
            count += self.rows[i].count_ones();
            i += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_parse_piece_id() {
        for id in PieceId::ALL {
            assert_eq!(id.to_string().parse::<PieceId>().unwrap(), id);
            assert_eq!(id.as_char().to_string().parse::<PieceId>().unwrap(), id);
        }
        assert_eq!("Square".parse::<PieceId>().unwrap(), PieceId::Square);
        let err = "tee".parse::<PieceId>().unwrap_err();
        assert_eq!(err.to_string(), "unknown piece \"tee\"");
    }

    #[test]
    fn test_catalog_order_matches_ids() {
        for (index, shape) in PieceShape::CATALOG.iter().enumerate() {
            assert_eq!(shape.id().index(), index);
            assert_eq!(PieceId::from_index(index), Some(shape.id()));
            assert_eq!(shape.id().shape(), shape);
        }
    }

    #[test]
    fn test_catalog_pieces_are_tetrominoes() {
        for shape in &PieceShape::CATALOG {
            assert_eq!(shape.cell_count(), 4, "{} should have 4 cells", shape.id());
            assert_eq!(shape.rows()[0], 0, "{} top row should be empty", shape.id());
        }
    }

    #[test]
    fn test_piece_char_conversion() {
        for id in PieceId::ALL {
            assert_eq!(PieceId::from_char(id.as_char()), Some(id));
        }
        assert_eq!(PieceId::from_char('X'), None);
        assert_eq!(PieceId::from_char('o'), None);
    }

    #[test]
    fn test_piece_display() {
        assert_eq!(PieceId::Square.to_string(), "SQUARE");
        assert_eq!(PieceId::Line.to_string(), "LINE");
        assert_eq!(PieceId::T.to_string(), "T");
    }

    #[test]
    fn test_uniform_sampling_covers_catalog() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut counts = [0usize; PieceId::LEN];
        for _ in 0..7000 {
            let id: PieceId = rng.random();
            counts[id.index()] += 1;
        }
        for (index, count) in counts.iter().enumerate() {
            assert!(
                (700..1300).contains(count),
                "piece {index} drawn {count} times"
            );
        }
    }

    #[test]
    #[should_panic(expected = "row pattern wider than the piece cell")]
    fn test_wide_shape_is_rejected() {
        let _ = PieceShape::new(PieceId::Line, [0, 0, 0, 31]);
    }
}
