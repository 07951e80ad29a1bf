use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::Runtime;

/// Trait for applications driven by the fixed-tick [`Runtime`].
///
/// Each tick the runtime sleeps, hands at most one key to [`handle_key`](Self::handle_key),
/// calls [`update`](Self::update), and draws if either reported a change.
pub trait App {
    /// Initializes the application.
    ///
    /// Called at the start of `Runtime::run()`. Use this to configure the tick interval and
    /// render mode.
    fn init(&mut self, runtime: &mut Runtime);

    /// Returns whether the application should exit.
    fn should_exit(&self) -> bool;

    /// Handles the key accepted this tick. Returns whether the state changed.
    fn handle_key(&mut self, runtime: &mut Runtime, key: KeyEvent) -> bool;

    /// Advances application state by one tick. Returns whether the state changed.
    fn update(&mut self, runtime: &mut Runtime) -> bool;

    /// Draws the screen (called only on ticks that left the state dirty).
    fn draw(&self, frame: &mut Frame);
}
