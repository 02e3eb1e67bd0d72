//! Status indicator driver.
//!
//! A single LED on any `embedded-hal` output pin, wired either active-high
//! or active-low.
//!
//! ## Dual-target design
//!
//! On hardware: the board crate hands in its GPIO pin driver.
//! On host/test: a [`SimPin`] that only tracks its level in memory.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use log::warn;

use crate::app::ports::IndicatorPort;

/// Electrical level that lights the LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnLevel {
    High,
    Low,
}

pub struct PinIndicator<P: OutputPin> {
    pin: P,
    on_level: OnLevel,
    lit: bool,
}

impl<P: OutputPin> PinIndicator<P> {
    pub fn new(pin: P, on_level: OnLevel) -> Self {
        let mut indicator = Self {
            pin,
            on_level,
            lit: true,
        };
        indicator.set_off();
        indicator
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Give the pin back to the caller.
    pub fn release(self) -> P {
        self.pin
    }

    fn drive(&mut self, lit: bool) {
        let high = lit == (self.on_level == OnLevel::High);
        let res = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        // A failed GPIO write only affects the visual signal.
        if res.is_err() {
            warn!("Indicator: GPIO write failed");
        }
        self.lit = lit;
    }
}

impl<P: OutputPin> IndicatorPort for PinIndicator<P> {
    fn set_on(&mut self) {
        self.drive(true);
    }

    fn set_off(&mut self) {
        self.drive(false);
    }
}

/// In-memory output pin for host builds.
#[derive(Debug, Default)]
pub struct SimPin {
    high: bool,
    writes: u32,
}

impl SimPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}
