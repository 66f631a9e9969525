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
//! State shared between the 1 Hz timer interrupt and the main loop.
//!
//! Each field sits in its own critical-section mutex and is only ever read or
//! written whole, inside `critical_section::with`.  The interrupt cannot tear a
//! multi-byte value and a button increment cannot lose a concurrent tick.

use core::cell::Cell;

use critical_section::Mutex;

use crate::backlight::BrightnessLevel;
use crate::clock::{ClockTime, Rollover};
use crate::config::{Config, RouletteSchedule};

pub struct SharedState {
    time: Mutex<Cell<ClockTime>>,
    /// Toggled every second, drives the separator.
    blink: Mutex<Cell<bool>>,
    /// Set by the tick, cleared when the roulette has finished.
    roulette: Mutex<Cell<bool>>,
    brightness: Mutex<Cell<BrightnessLevel>>,
    schedule: RouletteSchedule,
}

/// What the display needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub time: ClockTime,
    pub blink: bool,
}

impl SharedState {
    #[must_use]
    pub const fn new(config: &Config) -> Self {
        Self {
            time: Mutex::new(Cell::new(config.initial_time)),
            blink: Mutex::new(Cell::new(false)),
            roulette: Mutex::new(Cell::new(false)),
            brightness: Mutex::new(Cell::new(config.initial_brightness)),
            schedule: config.roulette,
        }
    }

    /// Body of the 1 Hz timer interrupt.  Short and never blocks.
    pub fn tick(&self) {
        critical_section::with(|cs| {
            let time_cell = self.time.borrow(cs);
            let mut time = time_cell.get();
            let rollover = time.tick();
            time_cell.set(time);

            let trigger = match self.schedule {
                RouletteSchedule::Daily => rollover == Rollover::Day,
                RouletteSchedule::Hourly => matches!(rollover, Rollover::Hour | Rollover::Day),
            };
            if trigger {
                self.roulette.borrow(cs).set(true);
            }

            let blink = self.blink.borrow(cs);
            blink.set(!blink.get());
        });
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        critical_section::with(|cs| Snapshot {
            time: self.time.borrow(cs).get(),
            blink: self.blink.borrow(cs).get(),
        })
    }

    #[must_use]
    pub fn time(&self) -> ClockTime {
        critical_section::with(|cs| self.time.borrow(cs).get())
    }

    #[must_use]
    pub fn roulette_pending(&self) -> bool {
        critical_section::with(|cs| self.roulette.borrow(cs).get())
    }

    pub fn clear_roulette(&self) {
        critical_section::with(|cs| self.roulette.borrow(cs).set(false));
    }

    /// Returns the new time.
    pub fn increment_hours(&self) -> ClockTime {
        self.update_time(ClockTime::increment_hours)
    }

    /// Returns the new time.
    pub fn increment_minutes(&self) -> ClockTime {
        self.update_time(ClockTime::increment_minutes)
    }

    fn update_time(&self, change: fn(&mut ClockTime)) -> ClockTime {
        critical_section::with(|cs| {
            let cell = self.time.borrow(cs);
            let mut time = cell.get();
            change(&mut time);
            cell.set(time);
            time
        })
    }

    #[must_use]
    pub fn brightness(&self) -> BrightnessLevel {
        critical_section::with(|cs| self.brightness.borrow(cs).get())
    }

    /// Advance to the next brightness level and return it.
    pub fn cycle_brightness(&self) -> BrightnessLevel {
        critical_section::with(|cs| {
            let cell = self.brightness.borrow(cs);
            let level = cell.get().next();
            cell.set(level);
            level
        })
    }
}
