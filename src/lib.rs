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
//! Four digit Nixie tube clock.
//!
//! Everything here is board independent and written against `embedded-hal`;
//! the firmware binary wires it to the ATmega328P.  The 1 Hz timer interrupt
//! calls [`SharedState::tick`], the main loop calls [`Clock::pass`] forever.

#![cfg_attr(not(test), no_std)]

pub mod backlight;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod roulette;
pub mod scheduler;
pub mod state;

#[cfg(test)]
mod testing;

pub use backlight::{Backlight, BrightnessLevel};
pub use clock::ClockTime;
pub use config::Config;
pub use display::{DigitBus, Multiplexer};
pub use error::{Error, Result};
pub use input::Inputs;
pub use scheduler::{Board, Clock, Event, Mode};
pub use state::SharedState;
