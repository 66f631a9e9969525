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
//! Build-time clock configuration.
//!
//! Nothing is persisted: after a power cycle the clock always comes back with
//! these values.

use crate::backlight::BrightnessLevel;
use crate::clock::ClockTime;

/// When the hour roulette animation is triggered by the 1 Hz tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouletteSchedule {
    /// Once a day, when the hours wrap 23 -> 0.
    Daily,
    /// On every change of the hour, as the first boards did.
    Hourly,
}

/// Delays that shape the display and the buttons.
///
/// The relative magnitudes matter more than the exact values: the per-digit
/// dwell must stay well below a millisecond or the tubes flicker, and the
/// roulette step must be long enough to read each digit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// How long each tube is lit per multiplexing pass.
    pub digit_dwell_us: u32,
    /// How long each roulette digit is shown on all tubes.
    pub roulette_step_ms: u32,
    /// Length of the feedback pulse after a brightness change.
    pub feedback_pulse_ms: u32,
    pub brightness_debounce_ms: u16,
    /// Shared by the hour and the minute button.
    pub set_debounce_ms: u16,
}

// "Factory" default configuration can be configured here:
const INITIAL_TIME: ClockTime = match ClockTime::new(12, 0, 0) {
    Some(t) => t,
    None => ClockTime::MIDNIGHT,
};
const INITIAL_BRIGHTNESS: BrightnessLevel = BrightnessLevel::OFF;
const ROULETTE_DEFAULT: RouletteSchedule = RouletteSchedule::Daily;

const DIGIT_DWELL_US: u32 = 800;
const ROULETTE_STEP_MS: u32 = 500;
const FEEDBACK_PULSE_MS: u32 = 30;
const BRIGHTNESS_DEBOUNCE_MS: u16 = 20;
const SET_DEBOUNCE_MS: u16 = 50;

/// Debug console speed.
pub const BAUD_RATE: u32 = 57_600;

/// Everything the clock needs to know at power-on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub initial_time: ClockTime,
    pub initial_brightness: BrightnessLevel,
    pub roulette: RouletteSchedule,
    pub timing: Timing,
}

impl Config {
    pub const DEFAULT: Config = Config {
        initial_time: INITIAL_TIME,
        initial_brightness: INITIAL_BRIGHTNESS,
        roulette: ROULETTE_DEFAULT,
        timing: Timing::DEFAULT,
    };
}

impl Default for Config {
    fn default() -> Self {
        Config::DEFAULT
    }
}

impl Timing {
    pub const DEFAULT: Timing = Timing {
        digit_dwell_us: DIGIT_DWELL_US,
        roulette_step_ms: ROULETTE_STEP_MS,
        feedback_pulse_ms: FEEDBACK_PULSE_MS,
        brightness_debounce_ms: BRIGHTNESS_DEBOUNCE_MS,
        set_debounce_ms: SET_DEBOUNCE_MS,
    };
}

impl Default for Timing {
    fn default() -> Self {
        Timing::DEFAULT
    }
}
