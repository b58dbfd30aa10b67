//! Status LED that blinks while the main loop is alive

use embedded_hal::digital::v2::OutputPin;

use crate::config::HeartbeatConfig;

/// Counter-paced blinker polled once per main-loop iteration
pub struct Heartbeat<P> {
    led: P,
    config: HeartbeatConfig,
    count: u32,
    lit: bool,
    enabled: bool,
}

impl<P: OutputPin> Heartbeat<P> {
    /// Starts enabled, dark
    pub fn new(mut led: P, config: HeartbeatConfig) -> Self {
        let _ = led.set_low();
        Heartbeat {
            led,
            config,
            count: 0,
            lit: false,
            enabled: true,
        }
    }

    #[allow(missing_docs)]
    pub fn led(&self) -> &P {
        &self.led
    }

    #[allow(missing_docs)]
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Advance one iteration. Any change of `enabled` turns the LED off and
    /// restarts the dark half.
    pub fn poll(&mut self, enabled: bool) {
        if enabled != self.enabled {
            self.enabled = enabled;
            self.count = 0;
            self.set(false);
        }
        if !enabled {
            return;
        }

        self.count += 1;
        let limit = if self.lit {
            self.config.on
        } else {
            self.config.off
        };
        if self.count >= limit {
            self.count = 0;
            self.set(!self.lit);
        }
    }

    fn set(&mut self, lit: bool) {
        self.lit = lit;
        let _ = if lit {
            self.led.set_high()
        } else {
            self.led.set_low()
        };
    }
}
