use std::path::PathBuf;

use anyhow::Context as _;
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct LogArg {
    /// File the log is written to (the terminal is taken by the game screen)
    #[clap(long, global = true, default_value = "bitfall.log")]
    log_file: PathBuf,
    /// Maximum log level: off, error, warn, info, debug or trace
    #[clap(long, global = true, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

/// Routes the `log` macros of every crate to the log file.
pub(crate) fn init(arg: &LogArg) -> anyhow::Result<()> {
    let LogArg {
        log_file,
        log_level,
    } = arg;
    if *log_level == LevelFilter::Off {
        return Ok(());
    }

    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(log_file)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;
    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(*log_level)))
                .build("logfile", Box::new(logfile)),
        )
        .build(Root::builder().appender("logfile").build(*log_level))
        .context("invalid log configuration")?;
    log4rs::init_config(config).context("failed to install the logger")?;

    log::info!("logging to {} at {log_level}", log_file.display());
    Ok(())
}
