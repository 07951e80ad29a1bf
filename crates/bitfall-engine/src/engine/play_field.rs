use log::{debug, trace};

use crate::core::{Board, PieceId};

use super::{
    movement::{self, DropOutcome},
    piece_source::{PieceSeed, PieceSource},
};

/// The two board layers plus the source of new pieces.
///
/// `PlayField` wraps the movement rules in [`movement`] and owns the state they act on.
/// Every mutating method returns whether the field changed.
#[derive(Debug, Clone)]
pub struct PlayField {
    dynamic: Board,
    locked: Board,
    falling: Option<PieceId>,
    source: PieceSource,
}

impl Default for PlayField {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayField {
    /// Creates an empty field with a random piece seed. No piece is falling yet.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(PieceSource::new())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_source(PieceSource::with_seed(seed))
    }

    fn with_source(source: PieceSource) -> Self {
        Self {
            dynamic: Board::EMPTY,
            locked: Board::EMPTY,
            falling: None,
            source,
        }
    }

    /// Creates a field from existing layers, for tests and replays.
    #[must_use]
    pub fn from_boards(dynamic: Board, locked: Board, seed: PieceSeed) -> Self {
        Self {
            dynamic,
            locked,
            falling: None,
            source: PieceSource::with_seed(seed),
        }
    }

    /// The falling piece layer.
    #[must_use]
    pub fn dynamic(&self) -> &Board {
        &self.dynamic
    }

    /// The locked cell layer.
    #[must_use]
    pub fn locked(&self) -> &Board {
        &self.locked
    }

    /// Both layers combined, as shown on screen.
    #[must_use]
    pub fn frame(&self) -> Board {
        self.dynamic | self.locked
    }

    /// Kind of the falling piece, if it was spawned by this field.
    #[must_use]
    pub fn falling_piece(&self) -> Option<PieceId> {
        self.falling
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.source.seed()
    }

    /// Spawns the next random piece if nothing is falling.
    pub fn spawn_if_needed(&mut self) -> bool {
        if !self.dynamic.is_empty() {
            return false;
        }
        let id = self.source.next_piece();
        self.spawn(id)
    }

    /// Spawns `id` if nothing is falling.
    pub fn spawn(&mut self, id: PieceId) -> bool {
        if !movement::spawn(&mut self.dynamic, id) {
            return false;
        }
        debug!("spawned {id}");
        if self.dynamic.intersects(&self.locked) {
            debug!("{id} spawned over locked cells");
        }
        self.falling = Some(id);
        true
    }

    pub fn move_left(&mut self) -> bool {
        let moved = movement::move_left(&mut self.dynamic, &self.locked);
        if !moved {
            trace!("move left rejected");
        }
        moved
    }

    pub fn move_right(&mut self) -> bool {
        let moved = movement::move_right(&mut self.dynamic, &self.locked);
        if !moved {
            trace!("move right rejected");
        }
        moved
    }

    pub fn soft_drop(&mut self) -> DropOutcome {
        let outcome = movement::soft_drop(&mut self.dynamic, &mut self.locked);
        if outcome.is_locked() {
            let piece = self
                .falling
                .take()
                .map_or_else(|| "piece".to_owned(), |id| id.to_string());
            debug!(
                "{piece} locked, {} cells on the stack\n{}",
                self.locked.count(),
                self.locked
            );
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BLOCK_MAP, HEIGHT};

    fn seed() -> PieceSeed {
        "0123456789abcdef0123456789abcdef".parse().unwrap()
    }

    #[test]
    fn test_new_field_is_empty() {
        let field = PlayField::with_seed(seed());
        assert!(field.dynamic().is_empty());
        assert!(field.locked().is_empty());
        assert!(field.frame().is_empty());
        assert_eq!(field.falling_piece(), None);
        assert_eq!(field.seed(), seed());
    }

    #[test]
    fn test_spawn_if_needed() {
        let mut field = PlayField::with_seed(seed());
        assert!(field.spawn_if_needed());
        let id = field.falling_piece().unwrap();
        assert_eq!(*field.dynamic(), BLOCK_MAP.extract(id));

        assert!(!field.spawn_if_needed());
        assert_eq!(field.falling_piece(), Some(id));
    }

    #[test]
    fn test_frame_is_union_of_layers() {
        let locked = Board::cell(0, HEIGHT - 1);
        let mut field = PlayField::from_boards(Board::EMPTY, locked, seed());
        field.spawn(PieceId::Line);

        let frame = field.frame();
        assert_eq!(frame, BLOCK_MAP.extract(PieceId::Line) | locked);
        assert_eq!(*field.locked(), locked);
    }

    #[test]
    fn test_piece_lands_and_next_spawns() {
        let mut field = PlayField::with_seed(seed());
        field.spawn(PieceId::Square);

        let mut drops = 0;
        while field.soft_drop().is_fell() {
            drops += 1;
        }
        assert_eq!(drops, HEIGHT - 2);
        assert!(field.dynamic().is_empty());
        assert_eq!(field.falling_piece(), None);
        assert_eq!(field.locked().count(), 4);
        assert!(field.locked().touches_floor());

        assert!(field.spawn_if_needed());
        assert!(!field.dynamic().intersects(field.locked()));
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = PlayField::with_seed(seed());
        let mut b = PlayField::with_seed(seed());
        for _ in 0..8 {
            a.spawn_if_needed();
            b.spawn_if_needed();
            assert_eq!(a.falling_piece(), b.falling_piece());
            while a.soft_drop().is_fell() {}
            while b.soft_drop().is_fell() {}
        }
        assert_eq!(a.locked(), b.locked());
    }
}
