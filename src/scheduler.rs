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
//! The main loop, one pass at a time.
//!
//! A pass either runs the whole roulette (nothing else happens until it is
//! done) or draws one frame and then polls the buttons.  Only the timer
//! interrupt runs in between.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;

use crate::backlight::{Backlight, BrightnessLevel};
use crate::clock::ClockTime;
use crate::config::Config;
use crate::display::Multiplexer;
use crate::error::Result;
use crate::input::Inputs;
use crate::roulette::Roulette;
use crate::state::SharedState;

/// Which kind of pass just ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Display frame followed by input polling.
    Normal,
    /// The roulette ran to completion.
    Animating,
}

/// Something worth telling the debug console about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    RouletteStarted,
    RouletteFinished,
    Brightness(BrightnessLevel),
    HoursSet(ClockTime),
    MinutesSet(ClockTime),
}

impl ufmt::uDisplay for Event {
    fn fmt<W: ufmt::uWrite + ?Sized>(&self, f: &mut ufmt::Formatter<'_, W>) -> core::result::Result<(), W::Error> {
        match self {
            Event::RouletteStarted => f.write_str("roulette start"),
            Event::RouletteFinished => f.write_str("roulette done"),
            Event::Brightness(level) => ufmt::uwrite!(f, "brightness {}", level),
            Event::HoursSet(time) => ufmt::uwrite!(f, "hour set {}", time),
            Event::MinutesSet(time) => ufmt::uwrite!(f, "minute set {}", time),
        }
    }
}

/// The peripherals the clock drives, already configured.
pub struct Board<O, I, W, D> {
    pub display: Multiplexer<O>,
    pub backlight: Backlight<W, O>,
    pub inputs: Inputs<I>,
    pub delay: D,
}

pub struct Clock<'a, O, I, W, D> {
    state: &'a SharedState,
    display: Multiplexer<O>,
    backlight: Backlight<W, O>,
    inputs: Inputs<I>,
    roulette: Roulette,
    delay: D,
}

impl<'a, O, I, W, D> Clock<'a, O, I, W, D>
where
    O: OutputPin,
    I: InputPin,
    W: SetDutyCycle,
    D: DelayNs,
{
    pub fn new(state: &'a SharedState, board: Board<O, I, W, D>, config: &Config) -> Self {
        Self {
            state,
            display: board.display,
            backlight: board.backlight,
            inputs: board.inputs,
            roulette: Roulette::new(config.timing.roulette_step_ms),
            delay: board.delay,
        }
    }

    /// Apply the power-on brightness.  Call once before the first pass.
    pub fn start(&mut self) -> Result<()> {
        let level = self.state.brightness();
        self.backlight.set_level(level, &mut self.delay)
    }

    /// One iteration of the main loop.  `now` is the wrapping millisecond
    /// counter used to time the button debounce.
    pub fn pass<F: FnMut(Event)>(&mut self, now: u16, mut on_event: F) -> Result<Mode> {
        if self.state.roulette_pending() {
            on_event(Event::RouletteStarted);
            self.roulette.run(self.display.bus(), &mut self.delay)?;
            self.state.clear_roulette();
            on_event(Event::RouletteFinished);
            return Ok(Mode::Animating);
        }

        let snapshot = self.state.snapshot();
        self.display.frame(snapshot.time, snapshot.blink, &mut self.delay)?;

        let presses = self.inputs.poll(now)?;
        if presses.brightness {
            let level = self.state.cycle_brightness();
            self.backlight.set_level(level, &mut self.delay)?;
            on_event(Event::Brightness(level));
        }
        if presses.hour {
            on_event(Event::HoursSet(self.state.increment_hours()));
        }
        if presses.minute {
            on_event(Event::MinutesSet(self.state.increment_minutes()));
        }
        Ok(Mode::Normal)
    }
}
