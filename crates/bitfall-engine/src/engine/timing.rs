use std::time::Duration;

/// Tick rate and gravity timing of a game.
///
/// The tick duration is whole milliseconds (`1000 / tick_rate`), and gravity fires every
/// `drop_interval / tick_duration` ticks.
///
/// ```
/// use std::time::Duration;
///
/// use bitfall_engine::TickSettings;
///
/// let settings = TickSettings::default();
/// assert_eq!(settings.tick_duration(), Duration::from_millis(33));
/// assert_eq!(settings.drop_ticks(), 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSettings {
    tick_rate: u32,
    drop_interval: Duration,
}

impl Default for TickSettings {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_TICK_RATE,
            Duration::from_millis(Self::DEFAULT_DROP_INTERVAL_MS),
        )
    }
}

impl TickSettings {
    pub const DEFAULT_TICK_RATE: u32 = 30;
    pub const DEFAULT_DROP_INTERVAL_MS: u64 = 500;

    /// Creates settings, clamping the tick rate to 1..=1000 ticks per second.
    #[must_use]
    pub fn new(tick_rate: u32, drop_interval: Duration) -> Self {
        Self {
            tick_rate: tick_rate.clamp(1, 1000),
            drop_interval,
        }
    }

    #[must_use]
    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    #[must_use]
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.tick_rate))
    }

    /// Number of ticks between gravity steps, at least one.
    #[must_use]
    pub fn drop_ticks(&self) -> u64 {
        let tick_millis = self.tick_duration().as_millis();
        let ticks = self.drop_interval.as_millis() / tick_millis;
        u64::try_from(ticks).unwrap_or(u64::MAX).max(1)
    }
}
