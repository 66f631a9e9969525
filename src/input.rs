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
//! Debounced push buttons.
//!
//! Buttons are active-low with pull-ups.  Instead of sleeping through the
//! debounce window and spinning until release, each button is a small state
//! machine advanced once per main loop pass, so the tubes keep refreshing while
//! a button is held.

use embedded_hal::digital::InputPin;

use crate::config::Timing;
use crate::error::{Error, Result};

/// What starts a press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Only a high-to-low transition between two passes.
    FallingEdge,
    /// Any pass that finds the line low.
    Level,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonState {
    Idle,
    /// Waiting out contact bounce since `since` (milliseconds).
    Debouncing { since: u16 },
    /// Press already reported, waiting for the line to go high again.
    HeldAwaitingRelease,
}

pub struct Button<I> {
    pin: I,
    trigger: Trigger,
    debounce_ms: u16,
    state: ButtonState,
    /// Previous sample, for edge detection.
    was_pressed: bool,
}

impl<I: InputPin> Button<I> {
    pub fn new(pin: I, trigger: Trigger, debounce_ms: u16) -> Self {
        Self {
            pin,
            trigger,
            debounce_ms,
            state: ButtonState::Idle,
            was_pressed: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Sample the line once.  Returns `true` exactly once per physical press,
    /// when the press has survived the debounce window.
    ///
    /// `now` is a wrapping millisecond counter.
    pub fn poll(&mut self, now: u16) -> Result<bool> {
        let pressed = self.pin.is_low().map_err(Error::pin)?;
        let was_pressed = core::mem::replace(&mut self.was_pressed, pressed);

        let (next, confirmed) = match self.state {
            ButtonState::Idle => {
                let starts = match self.trigger {
                    Trigger::FallingEdge => pressed && !was_pressed,
                    Trigger::Level => pressed,
                };
                if starts {
                    (ButtonState::Debouncing { since: now }, false)
                } else {
                    (ButtonState::Idle, false)
                }
            }
            ButtonState::Debouncing { since } => {
                if now.wrapping_sub(since) < self.debounce_ms {
                    (self.state, false)
                } else if pressed {
                    (ButtonState::HeldAwaitingRelease, true)
                } else {
                    (ButtonState::Idle, false)
                }
            }
            ButtonState::HeldAwaitingRelease => {
                if pressed {
                    (ButtonState::HeldAwaitingRelease, false)
                } else {
                    (ButtonState::Idle, false)
                }
            }
        };

        self.state = next;
        Ok(confirmed)
    }
}

/// Presses confirmed during one pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Presses {
    pub brightness: bool,
    pub hour: bool,
    pub minute: bool,
}

/// The three front panel buttons.
pub struct Inputs<I> {
    brightness: Button<I>,
    hour: Button<I>,
    minute: Button<I>,
}

impl<I: InputPin> Inputs<I> {
    pub fn new(brightness: I, hour: I, minute: I, timing: &Timing) -> Self {
        Self {
            brightness: Button::new(brightness, Trigger::FallingEdge, timing.brightness_debounce_ms),
            hour: Button::new(hour, Trigger::Level, timing.set_debounce_ms),
            minute: Button::new(minute, Trigger::Level, timing.set_debounce_ms),
        }
    }

    /// Poll brightness, hour and minute, in that order.
    pub fn poll(&mut self, now: u16) -> Result<Presses> {
        Ok(Presses {
            brightness: self.brightness.poll(now)?,
            hour: self.hour.poll(now)?,
            minute: self.minute.poll(now)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeButton;

    /// Poll every millisecond from `from` to `to` (exclusive) and count presses.
    fn run(button: &mut Button<FakeButton>, from: u16, to: u16) -> usize {
        (from..to).filter(|&now| button.poll(now).unwrap()).count()
    }

    #[test]
    fn level_press_is_reported_once_however_long_it_is_held() {
        let line = FakeButton::new();
        let mut button = Button::new(line.clone(), Trigger::Level, 50);

        assert_eq!(run(&mut button, 0, 10), 0);
        line.press();
        assert_eq!(run(&mut button, 10, 5_000), 1);
        assert_eq!(button.state(), ButtonState::HeldAwaitingRelease);

        line.release();
        assert_eq!(run(&mut button, 5_000, 5_100), 0);
        assert_eq!(button.state(), ButtonState::Idle);
    }

    #[test]
    fn press_confirms_exactly_at_the_end_of_the_window() {
        let line = FakeButton::new();
        let mut button = Button::new(line.clone(), Trigger::Level, 50);

        line.press();
        assert!(!button.poll(100).unwrap());
        assert!(!button.poll(149).unwrap());
        assert!(button.poll(150).unwrap());
    }

    #[test]
    fn bounce_that_ends_released_is_ignored() {
        let line = FakeButton::new();
        let mut button = Button::new(line.clone(), Trigger::Level, 50);

        line.press();
        assert!(!button.poll(0).unwrap());
        line.release();
        assert!(!button.poll(50).unwrap());
        assert_eq!(button.state(), ButtonState::Idle);
    }

    #[test]
    fn each_press_and_release_counts_once() {
        let line = FakeButton::new();
        let mut button = Button::new(line.clone(), Trigger::Level, 50);
        let mut presses = 0;
        let mut now = 0u16;
        for _ in 0..5 {
            line.press();
            presses += run(&mut button, now, now + 300);
            line.release();
            presses += run(&mut button, now + 300, now + 400);
            now += 400;
        }
        assert_eq!(presses, 5);
    }

    #[test]
    fn edge_trigger_needs_a_release_between_presses() {
        let line = FakeButton::new();
        line.press();
        let mut button = Button::new(line.clone(), Trigger::FallingEdge, 20);

        // The first sample is treated as an edge from the pulled-up idle level.
        assert_eq!(run(&mut button, 0, 100), 1);

        line.release();
        assert_eq!(run(&mut button, 100, 200), 0);
        line.press();
        assert_eq!(run(&mut button, 200, 300), 1);
    }

    #[test]
    fn debounce_window_survives_counter_wrap() {
        let line = FakeButton::new();
        let mut button = Button::new(line.clone(), Trigger::Level, 50);

        line.press();
        assert!(!button.poll(u16::MAX - 10).unwrap());
        assert!(!button.poll(20).unwrap());
        assert!(button.poll(39).unwrap());
    }

    #[test]
    fn inputs_report_each_button_separately() {
        let brightness = FakeButton::new();
        let hour = FakeButton::new();
        let minute = FakeButton::new();
        let mut inputs = Inputs::new(brightness.clone(), hour.clone(), minute.clone(), &Timing::DEFAULT);

        minute.press();
        assert_eq!(inputs.poll(0).unwrap(), Presses::default());
        assert_eq!(
            inputs.poll(50).unwrap(),
            Presses {
                minute: true,
                ..Presses::default()
            }
        );
    }
}
