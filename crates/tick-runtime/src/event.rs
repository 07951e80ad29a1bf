use std::{io, time::Duration};

use crossterm::event::{self, Event};

/// Non-blocking source of terminal events.
///
/// The runtime polls this once per tick. Tests substitute a scripted queue.
pub trait EventSource {
    /// Returns whether an event is ready to be read without blocking.
    fn poll(&mut self) -> io::Result<bool>;

    /// Reads the next event. Only called after [`poll`](Self::poll) returned `true`.
    fn read(&mut self) -> io::Result<Event>;
}

/// Events read from the terminal through crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn poll(&mut self) -> io::Result<bool> {
        event::poll(Duration::ZERO)
    }

    fn read(&mut self) -> io::Result<Event> {
        event::read()
    }
}
