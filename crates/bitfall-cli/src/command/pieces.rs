use std::io::{self, Write as _};

use bitfall_engine::{BLOCK_MAP, PieceId, PieceShape, WIDTH};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PiecesArg {
    /// Pieces to print, by name (`SQUARE`, `LINE`, ...) or letter (`O`, `I`, ...).
    /// Prints the whole catalog when omitted
    pieces: Vec<PieceId>,
}

pub(crate) fn run(arg: &PiecesArg) -> anyhow::Result<()> {
    let pieces = if arg.pieces.is_empty() {
        PieceId::ALL.as_slice()
    } else {
        arg.pieces.as_slice()
    };

    let mut out = io::stdout().lock();
    for id in pieces {
        let spawn = BLOCK_MAP.extract(*id);
        writeln!(out, "{id} ({})", id.as_char())?;
        // Only the top rows of the spawn board hold the piece
        for row in (0..PieceShape::CELL_SIZE).filter(|row| spawn.occupies_row(*row)) {
            let bits = spawn.row_bits(row);
            let line: String = (0..WIDTH)
                .map(|col| if bits & (1 << col) != 0 { '#' } else { '.' })
                .collect();
            writeln!(out, "{line}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
