use std::{io, mem, time::Duration};

use log::{debug, info};

use crate::{
    App,
    event::{CrosstermEvents, EventSource},
    event_loop::{TickInput, TickLoop},
};

/// How a dirty frame reaches the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Clear the terminal and repaint every cell.
    #[default]
    FullRepaint,
    /// Let ratatui write only the cells that differ from the previous frame.
    Incremental,
}

/// Fixed-tick terminal application runtime.
///
/// Runs a single-threaded loop: sleep one tick, take at most one key, update, and redraw
/// only if something changed. The loop ends when the application asks to exit or the
/// user presses `Ctrl+C`.
#[derive(Debug)]
pub struct Runtime {
    tick_interval: Duration,
    render_mode: RenderMode,
    dirty: bool,
    exit_requested: bool,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// Tick interval used until the application sets its own.
    pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(33);

    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_interval: Self::DEFAULT_TICK_INTERVAL,
            render_mode: RenderMode::default(),
            dirty: true, // The first frame is always drawn
            exit_requested: false,
        }
    }

    pub fn set_tick_interval(&mut self, interval: Duration) {
        self.tick_interval = interval;
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    /// Runs the application against the real terminal.
    ///
    /// 1. Calls `app.init()`
    /// 2. Enters the terminal (raw mode, alternate screen)
    /// 3. Ticks until `app.should_exit()` or `Ctrl+C`, drawing on dirty ticks
    /// 4. Restores the terminal
    pub fn run<A>(self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        self.run_with(app, CrosstermEvents)
    }

    /// Like [`Self::run`], reading input from `source`.
    pub fn run_with<A, E>(mut self, app: &mut A, source: E) -> io::Result<()>
    where
        A: App,
        E: EventSource,
    {
        app.init(&mut self);
        info!(
            "runtime started: tick {:?}, {:?}",
            self.tick_interval, self.render_mode
        );

        let mut events = TickLoop::new(source);
        let result = ratatui::run(|terminal| {
            while !self.should_stop(app) {
                if !self.step(app, &mut events)? {
                    continue;
                }
                if self.render_mode == RenderMode::FullRepaint {
                    terminal.clear()?;
                }
                terminal.draw(|frame| app.draw(frame))?;
            }
            Ok(())
        });

        info!("runtime stopped");
        result
    }

    fn should_stop<A>(&self, app: &A) -> bool
    where
        A: App,
    {
        self.exit_requested || app.should_exit()
    }

    /// Runs one tick. Returns whether the frame must be redrawn.
    fn step<A, E>(&mut self, app: &mut A, events: &mut TickLoop<E>) -> io::Result<bool>
    where
        A: App,
        E: EventSource,
    {
        match events.next_tick(self.tick_interval)? {
            TickInput::Idle => {}
            TickInput::Key(key) => {
                let changed = app.handle_key(self, key);
                self.dirty |= changed;
            }
            TickInput::Resize => self.dirty = true,
            TickInput::Interrupt => {
                debug!("interrupted");
                self.exit_requested = true;
                return Ok(false);
            }
        }
        let changed = app.update(self);
        self.dirty |= changed;
        Ok(mem::take(&mut self.dirty))
    }
}
