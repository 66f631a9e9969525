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
//! Hardware errors surfaced by the clock.
//!
//! On the ATmega pins and timers cannot fail, but the drivers are generic over
//! `embedded-hal` and keep whatever the implementation reports.

use embedded_hal::{digital, pwm};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A digital input or output failed.
    Pin(digital::ErrorKind),
    /// Programming the backlight duty cycle failed.
    Pwm(pwm::ErrorKind),
}

impl Error {
    pub(crate) fn pin<E: digital::Error>(e: E) -> Self {
        Error::Pin(e.kind())
    }

    pub(crate) fn pwm<E: pwm::Error>(e: E) -> Self {
        Error::Pwm(e.kind())
    }
}

pub type Result<T> = core::result::Result<T, Error>;

impl ufmt::uDisplay for Error {
    fn fmt<W: ufmt::uWrite + ?Sized>(&self, f: &mut ufmt::Formatter<'_, W>) -> core::result::Result<(), W::Error> {
        match self {
            Error::Pin(_) => f.write_str("pin error"),
            Error::Pwm(_) => f.write_str("pwm error"),
        }
    }
}
