use crate::core::PieceId;

use super::{
    movement::DropOutcome,
    piece_source::PieceSeed,
    play_field::PlayField,
    timing::TickSettings,
};

/// Player input understood by a [`GameSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
}

impl Action {
    /// Maps the `a`, `d` and `s` keys to their actions.
    ///
    /// ```
    /// use bitfall_engine::Action;
    ///
    /// assert_eq!(Action::from_key('a'), Some(Action::MoveLeft));
    /// assert_eq!(Action::from_key('w'), None);
    /// ```
    #[must_use]
    pub const fn from_key(key: char) -> Option<Self> {
        match key {
            'a' => Some(Action::MoveLeft),
            'd' => Some(Action::MoveRight),
            's' => Some(Action::SoftDrop),
            _ => None,
        }
    }
}

/// A running game: the play field plus tick bookkeeping for gravity.
///
/// Call [`increment_tick`](Self::increment_tick) once per tick and [`apply`](Self::apply)
/// for each accepted key. Both return whether the field changed, which the caller uses
/// as its redraw flag.
#[derive(Debug, Clone)]
pub struct GameSession {
    field: PlayField,
    drop_ticks: u64,
    ticks_until_drop: u64,
    total_ticks: u64,
    completed_pieces: u64,
}

impl GameSession {
    #[must_use]
    pub fn new(settings: &TickSettings) -> Self {
        Self::with_field(settings, PlayField::new())
    }

    #[must_use]
    pub fn with_seed(settings: &TickSettings, seed: PieceSeed) -> Self {
        Self::with_field(settings, PlayField::with_seed(seed))
    }

    #[must_use]
    pub fn with_field(settings: &TickSettings, field: PlayField) -> Self {
        let drop_ticks = settings.drop_ticks();
        Self {
            field,
            drop_ticks,
            ticks_until_drop: drop_ticks,
            total_ticks: 0,
            completed_pieces: 0,
        }
    }

    #[must_use]
    pub fn field(&self) -> &PlayField {
        &self.field
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<PieceId> {
        self.field.falling_piece()
    }

    #[must_use]
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Number of pieces merged into the locked layer so far.
    #[must_use]
    pub fn completed_pieces(&self) -> u64 {
        self.completed_pieces
    }

    #[must_use]
    pub fn drop_ticks(&self) -> u64 {
        self.drop_ticks
    }

    /// Spawns a piece if none is falling. Called before the first tick and after every
    /// lock, so that a piece is always present when input arrives.
    pub fn ensure_piece(&mut self) -> bool {
        self.field.spawn_if_needed()
    }

    pub fn apply(&mut self, action: Action) -> bool {
        let changed = match action {
            Action::MoveLeft => self.field.move_left(),
            Action::MoveRight => self.field.move_right(),
            Action::SoftDrop => self.step_down(),
        };
        self.ensure_piece() || changed
    }

    /// Advances one tick, running gravity every [`drop_ticks`](Self::drop_ticks) ticks.
    pub fn increment_tick(&mut self) -> bool {
        self.total_ticks += 1;
        self.ticks_until_drop = self.ticks_until_drop.saturating_sub(1);
        let mut changed = false;
        if self.ticks_until_drop == 0 {
            self.ticks_until_drop = self.drop_ticks;
            changed = self.step_down();
        }
        self.ensure_piece() || changed
    }

    fn step_down(&mut self) -> bool {
        let outcome = self.field.soft_drop();
        if outcome == DropOutcome::Locked {
            self.completed_pieces += 1;
        }
        outcome.changed()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::{BLOCK_MAP, Board, HEIGHT};

    fn settings(drop_ticks: u64) -> TickSettings {
        TickSettings::new(10, Duration::from_millis(100 * drop_ticks))
    }

    fn session_with(drop_ticks: u64, id: PieceId) -> GameSession {
        let seed = "ffeeddccbbaa99887766554433221100".parse().unwrap();
        let mut field = PlayField::with_seed(seed);
        field.spawn(id);
        GameSession::with_field(&settings(drop_ticks), field)
    }

    #[test]
    fn test_gravity_every_drop_ticks() {
        let mut session = session_with(3, PieceId::T);
        let spawn = BLOCK_MAP.extract(PieceId::T);

        assert!(!session.increment_tick());
        assert!(!session.increment_tick());
        assert_eq!(*session.field().dynamic(), spawn);

        assert!(session.increment_tick());
        assert_eq!(*session.field().dynamic(), spawn.fall());

        for _ in 0..3 {
            session.increment_tick();
        }
        assert_eq!(*session.field().dynamic(), spawn.fall().fall());
        assert_eq!(session.total_ticks(), 6);
    }

    #[test]
    fn test_actions() {
        let mut session = session_with(100, PieceId::Square);
        let spawn = BLOCK_MAP.extract(PieceId::Square);

        assert!(session.apply(Action::MoveLeft));
        assert_eq!(*session.field().dynamic(), spawn.shift_left());
        assert!(session.apply(Action::MoveRight));
        assert!(session.apply(Action::SoftDrop));
        assert_eq!(*session.field().dynamic(), spawn.fall());
    }

    #[test]
    fn test_rejected_action_reports_no_change() {
        let mut session = session_with(100, PieceId::Line);
        while session.apply(Action::MoveLeft) {}
        let before = *session.field().dynamic();
        assert!(!session.apply(Action::MoveLeft));
        assert_eq!(*session.field().dynamic(), before);
    }

    #[test]
    fn test_lock_spawns_next_piece() {
        let mut session = session_with(1, PieceId::Square);
        for _ in 0..HEIGHT - 2 {
            session.increment_tick();
        }
        assert!(session.field().dynamic().touches_floor());
        assert_eq!(session.completed_pieces(), 0);

        assert!(session.increment_tick());
        assert_eq!(session.completed_pieces(), 1);
        assert_eq!(session.field().locked().count(), 4);
        assert!(!session.field().dynamic().is_empty());
        assert!(session.falling_piece().is_some());
    }

    #[test]
    fn test_ensure_piece_on_fresh_session() {
        let mut session = GameSession::with_seed(&settings(5), "0".repeat(32).parse().unwrap());
        assert_eq!(*session.field().dynamic(), Board::EMPTY);
        assert!(session.ensure_piece());
        assert!(!session.ensure_piece());
        assert!(session.falling_piece().is_some());
    }
}
