// This library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this library.  If not, see <http://www.gnu.org/licenses/>.
//! PWM backlight with four brightness steps.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::error::{Error, Result};

/// Duty cycle per level, out of `DUTY_SCALE`.
const DUTY_TABLE: [u8; 4] = [0, 85, 170, 255];
const DUTY_SCALE: u16 = 255;

/// Index into the duty table, always 0-3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrightnessLevel(u8);

impl BrightnessLevel {
    pub const OFF: BrightnessLevel = BrightnessLevel(0);
    pub const FULL: BrightnessLevel = BrightnessLevel(3);

    /// Returns `None` for anything above 3.
    #[must_use]
    pub const fn new(level: u8) -> Option<Self> {
        if (level as usize) < DUTY_TABLE.len() {
            Some(BrightnessLevel(level))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The level after one press of the brightness button: 0, 1, 2, 3, 0, ...
    #[must_use]
    pub const fn next(self) -> Self {
        BrightnessLevel((self.0 + 1) % DUTY_TABLE.len() as u8)
    }

    /// Duty cycle for this level, 0-255.
    #[must_use]
    pub const fn duty(self) -> u8 {
        DUTY_TABLE[self.0 as usize]
    }
}

impl Default for BrightnessLevel {
    fn default() -> Self {
        BrightnessLevel::OFF
    }
}

impl ufmt::uDisplay for BrightnessLevel {
    fn fmt<W: ufmt::uWrite + ?Sized>(&self, f: &mut ufmt::Formatter<'_, W>) -> core::result::Result<(), W::Error> {
        ufmt::uwrite!(f, "{}", self.0)
    }
}

/// Backlight PWM channel plus the auxiliary output that blinks on every change.
pub struct Backlight<W, O> {
    pwm: W,
    feedback: O,
    pulse_ms: u32,
}

impl<W, O> Backlight<W, O>
where
    W: SetDutyCycle,
    O: OutputPin,
{
    pub fn new(pwm: W, feedback: O, pulse_ms: u32) -> Self {
        Self {
            pwm,
            feedback,
            pulse_ms,
        }
    }

    /// Program the duty cycle for `level`.
    ///
    /// Any level other than off is acknowledged with a short pulse on the
    /// feedback output, which blocks for the length of the pulse.
    pub fn set_level<D: DelayNs>(&mut self, level: BrightnessLevel, delay: &mut D) -> Result<()> {
        let duty = level.duty();
        self.pwm
            .set_duty_cycle_fraction(u16::from(duty), DUTY_SCALE)
            .map_err(Error::pwm)?;

        if duty > 0 {
            self.feedback.set_high().map_err(Error::pin)?;
            delay.delay_ms(self.pulse_ms);
            self.feedback.set_low().map_err(Error::pin)?;
        }
        Ok(())
    }
}
