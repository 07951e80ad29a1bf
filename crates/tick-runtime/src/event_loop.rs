use std::{io, thread, time::Duration};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::event::EventSource;

/// Input collected during one tick.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickInput {
    /// Nothing relevant was pending.
    Idle,
    /// The first key pressed this tick. Later keys of the same tick are discarded.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize,
    /// `Ctrl+C` was pressed. Raw mode delivers it as a key instead of a signal.
    Interrupt,
}

/// Fixed-tick input pump.
///
/// Each call to [`next_tick`](Self::next_tick) sleeps for one tick, then drains every
/// pending event and keeps only the first key press.
#[derive(Debug)]
pub(crate) struct TickLoop<E> {
    source: E,
}

impl<E> TickLoop<E>
where
    E: EventSource,
{
    pub(crate) fn new(source: E) -> Self {
        Self { source }
    }

    /// Sleeps for `tick_interval` and returns the input pending afterwards.
    pub(crate) fn next_tick(&mut self, tick_interval: Duration) -> io::Result<TickInput> {
        if !tick_interval.is_zero() {
            thread::sleep(tick_interval);
        }
        self.poll_input()
    }

    fn poll_input(&mut self) -> io::Result<TickInput> {
        let mut input = TickInput::Idle;
        while self.source.poll()? {
            match self.source.read()? {
                Event::Key(key) if is_interrupt(&key) => input = TickInput::Interrupt,
                Event::Key(key) if key.kind != KeyEventKind::Release && input.is_idle() => {
                    input = TickInput::Key(key);
                }
                Event::Resize(..) if input.is_idle() => input = TickInput::Resize,
                _ => {}
            }
        }
        Ok(input)
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Scripted event queue.
    #[derive(Debug, Default)]
    pub(crate) struct QueuedEvents {
        pub(crate) events: VecDeque<Event>,
    }

    impl QueuedEvents {
        pub(crate) fn keys(chars: &str) -> Self {
            Self {
                events: chars.chars().map(|c| Event::Key(key_event(c))).collect(),
            }
        }
    }

    impl EventSource for QueuedEvents {
        fn poll(&mut self) -> io::Result<bool> {
            Ok(!self.events.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.events
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::WouldBlock, "no event"))
        }
    }

    pub(crate) fn key_event(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_first_key_wins_and_rest_is_drained() {
        let mut tick_loop = TickLoop::new(QueuedEvents::keys("ads"));
        let input = tick_loop.next_tick(Duration::ZERO).unwrap();
        assert_eq!(input, TickInput::Key(key_event('a')));
        assert!(tick_loop.source.events.is_empty());

        assert!(tick_loop.next_tick(Duration::ZERO).unwrap().is_idle());
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut release = key_event('a');
        release.kind = KeyEventKind::Release;
        let mut source = QueuedEvents::default();
        source.events.push_back(Event::Key(release));
        source.events.push_back(Event::Key(key_event('d')));

        let mut tick_loop = TickLoop::new(source);
        let input = tick_loop.next_tick(Duration::ZERO).unwrap();
        assert_eq!(input, TickInput::Key(key_event('d')));
    }

    #[test]
    fn test_interrupt_overrides_pending_key() {
        let mut source = QueuedEvents::keys("a");
        source.events.push_back(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));

        let mut tick_loop = TickLoop::new(source);
        assert!(tick_loop.next_tick(Duration::ZERO).unwrap().is_interrupt());
    }

    #[test]
    fn test_resize() {
        let mut source = QueuedEvents::default();
        source.events.push_back(Event::Resize(80, 24));
        let mut tick_loop = TickLoop::new(source);
        assert!(tick_loop.next_tick(Duration::ZERO).unwrap().is_resize());
    }
}
