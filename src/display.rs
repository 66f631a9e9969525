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
//! Nixie tube digit bus and the HH:MM multiplexer.
//!
//! All four tubes hang off one BCD decoder.  Only the tube whose select line is
//! high shows the value on the bus, so the display is drawn one digit at a time
//! fast enough that persistence of vision makes all four look lit.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use crate::clock::ClockTime;
use crate::error::{Error, Result};

/// Number of tubes on the board.
pub const TUBES: usize = 4;

/// The shared 4-bit BCD bus and the per-tube select lines.
pub struct DigitBus<O> {
    /// BCD lines A, B, C, D (bit 0 first).
    bcd: [O; 4],
    /// Select lines, active-high, tube 1 first.
    selects: [O; TUBES],
}

impl<O: OutputPin> DigitBus<O> {
    pub fn new(bcd: [O; 4], selects: [O; TUBES]) -> Self {
        Self { bcd, selects }
    }

    /// Put `digit` on the bus.  Only the low nibble is used.
    pub fn write(&mut self, digit: u8) -> Result<()> {
        for (bit, line) in self.bcd.iter_mut().enumerate() {
            let state = PinState::from(digit & (1 << bit) != 0);
            line.set_state(state).map_err(Error::pin)?;
        }
        Ok(())
    }

    pub fn select(&mut self, tube: usize) -> Result<()> {
        if let Some(line) = self.selects.get_mut(tube) {
            line.set_high().map_err(Error::pin)?;
        }
        Ok(())
    }

    pub fn deselect(&mut self, tube: usize) -> Result<()> {
        if let Some(line) = self.selects.get_mut(tube) {
            line.set_low().map_err(Error::pin)?;
        }
        Ok(())
    }

    pub fn select_all(&mut self) -> Result<()> {
        for line in &mut self.selects {
            line.set_high().map_err(Error::pin)?;
        }
        Ok(())
    }

    pub fn deselect_all(&mut self) -> Result<()> {
        for line in &mut self.selects {
            line.set_low().map_err(Error::pin)?;
        }
        Ok(())
    }
}

/// Draws the time on the tubes and drives the seconds separator.
pub struct Multiplexer<O> {
    bus: DigitBus<O>,
    separator: O,
    dwell_us: u32,
}

impl<O: OutputPin> Multiplexer<O> {
    pub fn new(bus: DigitBus<O>, separator: O, dwell_us: u32) -> Self {
        Self {
            bus,
            separator,
            dwell_us,
        }
    }

    /// The roulette borrows the bus between frames.
    pub fn bus(&mut self) -> &mut DigitBus<O> {
        &mut self.bus
    }

    /// One pass over the four tubes, then the separator.
    ///
    /// The tubes are wired in reverse: the tens of hours sit on the last select
    /// line and the units of minutes on the first.
    pub fn frame<D: DelayNs>(&mut self, time: ClockTime, blink: bool, delay: &mut D) -> Result<()> {
        for (i, digit) in time.digits().into_iter().enumerate() {
            let tube = TUBES - 1 - i;
            self.bus.write(digit)?;
            self.bus.select(tube)?;
            delay.delay_us(self.dwell_us);
            self.bus.deselect(tube)?;
        }

        self.separator
            .set_state(PinState::from(blink))
            .map_err(Error::pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Harness, Line};

    fn time(hours: u8, minutes: u8) -> ClockTime {
        ClockTime::new(hours, minutes, 0).unwrap()
    }

    #[test]
    fn bus_encodes_bcd_lsb_first() {
        let harness = Harness::new();
        let mut bus = harness.bus();
        bus.write(6).unwrap();
        assert!(!harness.level(Line::Bus(0)));
        assert!(harness.level(Line::Bus(1)));
        assert!(harness.level(Line::Bus(2)));
        assert!(!harness.level(Line::Bus(3)));
    }

    #[test]
    fn frame_lights_one_tube_per_digit_in_reverse_order() {
        let harness = Harness::new();
        let mut mux = Multiplexer::new(harness.bus(), harness.output(Line::Separator), 800);
        let mut delay = harness.delay();

        mux.frame(time(21, 47), false, &mut delay).unwrap();

        let shown: std::vec::Vec<_> = harness
            .dwells()
            .iter()
            .map(|d| (d.lit(), d.bus, d.ns))
            .collect();
        assert_eq!(
            shown,
            [
                (std::vec![3], 2, 800_000),
                (std::vec![2], 1, 800_000),
                (std::vec![1], 4, 800_000),
                (std::vec![0], 7, 800_000),
            ]
        );
        assert_eq!(harness.selects(), [false; 4]);
    }

    #[test]
    fn separator_follows_blink_state() {
        let harness = Harness::new();
        let mut mux = Multiplexer::new(harness.bus(), harness.output(Line::Separator), 800);
        let mut delay = harness.delay();

        mux.frame(time(0, 0), true, &mut delay).unwrap();
        assert!(harness.level(Line::Separator));
        // The separator only changes after the digits have been drawn.
        assert!(harness.dwells().iter().all(|d| !d.separator));

        mux.frame(time(0, 0), false, &mut delay).unwrap();
        assert!(!harness.level(Line::Separator));
    }

    #[test]
    fn full_frame_stays_below_flicker_threshold() {
        let harness = Harness::new();
        let mut mux = Multiplexer::new(harness.bus(), harness.output(Line::Separator), 800);
        let mut delay = harness.delay();

        mux.frame(time(12, 34), false, &mut delay).unwrap();

        let total_ns: u64 = harness.dwells().iter().map(|d| d.ns).sum();
        assert!(total_ns < 20_000_000);
    }
}
