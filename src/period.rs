//! Tick rate register adjusted by `+` and `-`

/// How a lab's tick rate starts and moves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeriodConfig {
    /// Rate at power-up [ticks/s]
    pub initial: u32,
    /// Change per `+` or `-` [ticks/s]
    pub step: u32,
    /// Rate restored whenever an adjustment would leave the usable range [ticks/s]
    pub safe_default: u32,
}

/// Tick rate and the timer period derived from it.
///
/// The rate is never zero and never exceeds the timer clock, so the derived
/// period is always at least one clock tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeriodRegister {
    rate: u32,
    clock_hz: u32,
    config: PeriodConfig,
}

impl PeriodRegister {
    /// Register at `config.initial`, or at the safe default if that is out of range
    pub const fn new(config: PeriodConfig, clock_hz: u32) -> Self {
        let mut register = PeriodRegister {
            rate: config.initial,
            clock_hz,
            config,
        };
        if !register.in_range(config.initial) {
            register.rate = register.fallback();
        }
        register
    }

    /// Ticks per second
    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Timer reload value [clock ticks]
    pub fn period_ticks(&self) -> u32 {
        self.clock_hz.checked_div(self.rate).unwrap_or(self.clock_hz)
    }

    /// Stepper shaft speed for a 200-step motor
    pub fn rpm(&self) -> u32 {
        self.rate * 3 / 10
    }

    /// One step faster; resets to the safe default if the period would hit zero
    pub fn increase(&mut self) {
        let rate = self.rate.saturating_add(self.config.step);
        self.rate = if self.in_range(rate) { rate } else { self.fallback() };
    }

    /// One step slower; resets to the safe default instead of reaching zero
    pub fn decrease(&mut self) {
        self.rate = match self.rate.checked_sub(self.config.step) {
            Some(rate) if self.in_range(rate) => rate,
            _ => self.fallback(),
        };
    }

    const fn in_range(&self, rate: u32) -> bool {
        rate > 0 && rate <= self.clock_hz
    }

    // A default that is itself out of range degrades to one tick per second
    const fn fallback(&self) -> u32 {
        if self.in_range(self.config.safe_default) {
            self.config.safe_default
        } else {
            1
        }
    }
}
