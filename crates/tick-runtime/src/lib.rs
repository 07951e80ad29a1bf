pub use self::{
    app::App,
    event::{CrosstermEvents, EventSource},
    event_loop::TickInput,
    runtime::{RenderMode, Runtime},
};

mod app;
mod event;
mod event_loop;
mod runtime;
