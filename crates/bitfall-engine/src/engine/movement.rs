//! Movement and collision rules over the two board layers.
//!
//! Every operation takes the falling piece (`dynamic`) and the locked cells (`locked`)
//! and updates them in place. A rejected move leaves both boards untouched and reports
//! no change; callers use the returned value as their redraw signal.

use crate::core::{BLOCK_MAP, Board, PieceId};

/// Result of a [`soft_drop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropOutcome {
    /// There was no falling piece.
    Idle,
    /// The piece moved down one row.
    Fell,
    /// The piece could not fall and was merged into the locked layer.
    Locked,
}

impl DropOutcome {
    /// Whether either board changed.
    #[must_use]
    pub fn changed(self) -> bool {
        !self.is_idle()
    }
}

/// Moves the falling piece one column left.
///
/// Rejected if any cell of the piece is on column 0 or the moved piece would overlap a
/// locked cell.
pub fn move_left(dynamic: &mut Board, locked: &Board) -> bool {
    if dynamic.is_empty() || dynamic.touches_left_wall() {
        return false;
    }
    let moved = dynamic.shift_left();
    if moved.intersects(locked) {
        return false;
    }
    *dynamic = moved;
    true
}

/// Moves the falling piece one column right.
///
/// Rejected if any cell of the piece is on the last column or the moved piece would
/// overlap a locked cell.
pub fn move_right(dynamic: &mut Board, locked: &Board) -> bool {
    if dynamic.is_empty() || dynamic.touches_right_wall() {
        return false;
    }
    let moved = dynamic.shift_right();
    if moved.intersects(locked) {
        return false;
    }
    *dynamic = moved;
    true
}

/// Moves the falling piece one row down, or locks it in place.
///
/// The piece locks when it already rests on the floor or when the fallen piece would
/// overlap a locked cell. Locking merges it into `locked` and clears `dynamic`, which
/// signals that the next piece should spawn.
pub fn soft_drop(dynamic: &mut Board, locked: &mut Board) -> DropOutcome {
    if dynamic.is_empty() {
        return DropOutcome::Idle;
    }
    let fallen = dynamic.fall();
    if dynamic.touches_floor() || fallen.intersects(locked) {
        *locked = locked.union(*dynamic);
        *dynamic = Board::EMPTY;
        return DropOutcome::Locked;
    }
    *dynamic = fallen;
    DropOutcome::Fell
}

/// Places a fresh `id` piece at the spawn position if no piece is falling.
///
/// Overlap with locked cells is not checked.
pub fn spawn(dynamic: &mut Board, id: PieceId) -> bool {
    if !dynamic.is_empty() {
        return false;
    }
    *dynamic = BLOCK_MAP.extract(id);
    true
}
