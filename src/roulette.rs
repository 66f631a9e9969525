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
//! Digit roulette: every tube counts 0 to 9 in unison.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::display::DigitBus;
use crate::error::Result;

pub struct Roulette {
    step_ms: u32,
}

impl Roulette {
    #[must_use]
    pub const fn new(step_ms: u32) -> Self {
        Self { step_ms }
    }

    /// Run the whole animation.  Blocks for ten steps; the time keeps running
    /// in the timer interrupt meanwhile.  All tubes are dark on return.
    pub fn run<O: OutputPin, D: DelayNs>(&self, bus: &mut DigitBus<O>, delay: &mut D) -> Result<()> {
        for digit in 0..=9 {
            bus.write(digit)?;
            bus.select_all()?;
            delay.delay_ms(self.step_ms);
            bus.deselect_all()?;
        }
        Ok(())
    }
}
