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
//! Host stand-ins for the board, shared by the unit tests.
//!
//! Every fake output writes into one `Wires` record.  The fake delay takes a
//! snapshot of the wires each time it is called, so a test can see exactly
//! what the tubes showed during every dwell.

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

use crate::display::DigitBus;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    Bus(usize),
    Select(usize),
    Separator,
    Feedback,
}

/// What the outputs looked like while the firmware was waiting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dwell {
    pub ns: u64,
    pub bus: u8,
    pub selects: [bool; 4],
    pub separator: bool,
    pub feedback: bool,
}

impl Dwell {
    /// Positions whose select line was asserted.
    pub fn lit(&self) -> Vec<usize> {
        (0..4).filter(|&i| self.selects[i]).collect()
    }
}

#[derive(Default)]
struct Wires {
    bus: [bool; 4],
    selects: [bool; 4],
    separator: bool,
    feedback: bool,
    duty: u16,
    dwells: Vec<Dwell>,
}

impl Wires {
    fn line(&mut self, line: Line) -> &mut bool {
        match line {
            Line::Bus(i) => &mut self.bus[i],
            Line::Select(i) => &mut self.selects[i],
            Line::Separator => &mut self.separator,
            Line::Feedback => &mut self.feedback,
        }
    }

    fn bus_value(&self) -> u8 {
        self.bus
            .iter()
            .enumerate()
            .fold(0, |acc, (bit, &high)| acc | (u8::from(high) << bit))
    }
}

#[derive(Clone, Default)]
pub struct Harness {
    wires: Rc<RefCell<Wires>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self, line: Line) -> FakeOutput {
        FakeOutput {
            wires: Rc::clone(&self.wires),
            line,
        }
    }

    pub fn bus(&self) -> DigitBus<FakeOutput> {
        DigitBus::new(
            [0, 1, 2, 3].map(|i| self.output(Line::Bus(i))),
            [0, 1, 2, 3].map(|i| self.output(Line::Select(i))),
        )
    }

    pub fn pwm(&self) -> FakePwm {
        FakePwm {
            wires: Rc::clone(&self.wires),
        }
    }

    pub fn delay(&self) -> FakeDelay {
        FakeDelay {
            wires: Rc::clone(&self.wires),
        }
    }

    pub fn level(&self, line: Line) -> bool {
        *self.wires.borrow_mut().line(line)
    }

    pub fn selects(&self) -> [bool; 4] {
        self.wires.borrow().selects
    }

    pub fn duty(&self) -> u16 {
        self.wires.borrow().duty
    }

    pub fn dwells(&self) -> Vec<Dwell> {
        self.wires.borrow().dwells.clone()
    }

    pub fn clear_dwells(&self) {
        self.wires.borrow_mut().dwells.clear();
    }
}

pub struct FakeOutput {
    wires: Rc<RefCell<Wires>>,
    line: Line,
}

impl ErrorType for FakeOutput {
    type Error = Infallible;
}

impl OutputPin for FakeOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        *self.wires.borrow_mut().line(self.line) = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        *self.wires.borrow_mut().line(self.line) = true;
        Ok(())
    }
}

/// A push button wired active-low with a pull-up: released reads high.
#[derive(Clone, Default)]
pub struct FakeButton {
    pressed: Rc<Cell<bool>>,
}

impl FakeButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self) {
        self.pressed.set(true);
    }

    pub fn release(&self) {
        self.pressed.set(false);
    }
}

impl ErrorType for FakeButton {
    type Error = Infallible;
}

impl InputPin for FakeButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.pressed.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pressed.get())
    }
}

pub struct FakePwm {
    wires: Rc<RefCell<Wires>>,
}

impl pwm::ErrorType for FakePwm {
    type Error = Infallible;
}

impl SetDutyCycle for FakePwm {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.wires.borrow_mut().duty = duty;
        Ok(())
    }
}

pub struct FakeDelay {
    wires: Rc<RefCell<Wires>>,
}

impl FakeDelay {
    fn record(&mut self, ns: u64) {
        let mut wires = self.wires.borrow_mut();
        let dwell = Dwell {
            ns,
            bus: wires.bus_value(),
            selects: wires.selects,
            separator: wires.separator,
            feedback: wires.feedback,
        };
        wires.dwells.push(dwell);
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.record(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.record(u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.record(u64::from(ms) * 1_000_000);
    }
}
