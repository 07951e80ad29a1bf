//! Game rules on top of the board primitives in [`core`](crate::core).
//!
//! - [`movement`] - Left, right, soft drop and spawn as pure board-to-board operations
//! - [`PlayField`] - Owns the falling and locked layers and the piece source
//! - [`GameSession`] - Adds tick counting and automatic gravity
//! - [`PieceSource`] / [`PieceSeed`] - Uniform, optionally seeded, piece selection
//! - [`TickSettings`] - Tick rate and gravity interval
//!
//! # Game Flow
//!
//! 1. A piece spawns at the top whenever the falling layer is empty
//! 2. Input moves it left, right or down; illegal moves are ignored
//! 3. Every `drop_ticks` ticks gravity moves it down one row
//! 4. When it cannot fall it merges into the locked layer and the next piece spawns
//!
//! There is no rotation, line clearing or game over.
//!
//! # Example
//!
//! ```
//! use bitfall_engine::{Action, GameSession, TickSettings};
//!
//! let mut session = GameSession::new(&TickSettings::default());
//! session.ensure_piece();
//!
//! let mut dirty = session.apply(Action::MoveLeft);
//! for _ in 0..session.drop_ticks() {
//!     dirty |= session.increment_tick();
//! }
//! assert!(dirty);
//! ```

pub use self::{
    game_session::*, movement::DropOutcome, piece_source::*, play_field::*, timing::*,
};

mod game_session;
pub mod movement;
mod piece_source;
mod play_field;
mod timing;
