use std::time::Duration;

use anyhow::Context as _;
use bitfall_engine::{GameSession, PieceSeed, TickSettings};
use tick_runtime::{RenderMode, Runtime};

use self::screen::PlayScreen;

mod screen;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Ticks per second
    #[clap(long, default_value_t = TickSettings::DEFAULT_TICK_RATE)]
    tick_rate: u32,
    /// Milliseconds between gravity steps
    #[clap(long, default_value_t = TickSettings::DEFAULT_DROP_INTERVAL_MS)]
    drop_interval: u64,
    /// Piece sequence seed (32 hexadecimal digits); random when omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Redraw only the changed cells instead of clearing the whole screen
    #[clap(long)]
    incremental_render: bool,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            tick_rate: TickSettings::DEFAULT_TICK_RATE,
            drop_interval: TickSettings::DEFAULT_DROP_INTERVAL_MS,
            seed: None,
            incremental_render: false,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        tick_rate,
        drop_interval,
        seed,
        incremental_render,
    } = arg;

    let settings = TickSettings::new(*tick_rate, Duration::from_millis(*drop_interval));
    let session = match seed {
        Some(seed) => GameSession::with_seed(&settings, *seed),
        None => GameSession::new(&settings),
    };
    log::info!(
        "starting game: {} ticks/s, gravity every {} ticks, seed {}",
        settings.tick_rate(),
        session.drop_ticks(),
        session.field().seed(),
    );

    let render_mode = if *incremental_render {
        RenderMode::Incremental
    } else {
        RenderMode::FullRepaint
    };
    let mut screen = PlayScreen::new(session, settings, render_mode);
    Runtime::new()
        .run(&mut screen)
        .context("terminal error while playing")?;

    log::info!(
        "game ended after {} ticks, {} pieces locked",
        screen.session().total_ticks(),
        screen.session().completed_pieces(),
    );
    Ok(())
}
