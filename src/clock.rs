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
//! Wall-clock time of day.

const HOURS_PER_DAY: u8 = 24;
const MINUTES_PER_HOUR: u8 = 60;
const SECONDS_PER_MINUTE: u8 = 60;

/// The largest unit that wrapped around during a [`ClockTime::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rollover {
    None,
    /// Seconds went 59 -> 0.
    Minute,
    /// Minutes went 59 -> 0.
    Hour,
    /// Hours went 23 -> 0.
    Day,
}

/// Hours (0-23), minutes (0-59) and seconds (0-59).
///
/// Fields are private so that every value in circulation is a valid time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockTime {
    hours: u8,
    minutes: u8,
    seconds: u8,
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Returns `None` if any field is out of range.
    #[must_use]
    pub const fn new(hours: u8, minutes: u8, seconds: u8) -> Option<Self> {
        if hours < HOURS_PER_DAY && minutes < MINUTES_PER_HOUR && seconds < SECONDS_PER_MINUTE {
            Some(ClockTime {
                hours,
                minutes,
                seconds,
            })
        } else {
            None
        }
    }

    #[must_use]
    pub const fn hours(&self) -> u8 {
        self.hours
    }

    #[must_use]
    pub const fn minutes(&self) -> u8 {
        self.minutes
    }

    #[must_use]
    pub const fn seconds(&self) -> u8 {
        self.seconds
    }

    /// Advance by one second, carrying into minutes and hours.
    pub fn tick(&mut self) -> Rollover {
        self.seconds += 1;
        if self.seconds < SECONDS_PER_MINUTE {
            return Rollover::None;
        }
        self.seconds = 0;

        self.minutes += 1;
        if self.minutes < MINUTES_PER_HOUR {
            return Rollover::Minute;
        }
        self.minutes = 0;

        self.hours += 1;
        if self.hours < HOURS_PER_DAY {
            return Rollover::Hour;
        }
        self.hours = 0;
        Rollover::Day
    }

    /// Hour button: next hour, wrapping 23 -> 0.  Minutes and seconds are kept.
    pub fn increment_hours(&mut self) {
        self.hours = (self.hours + 1) % HOURS_PER_DAY;
    }

    /// Minute button: next minute, wrapping 59 -> 0 without carrying into the hour.
    pub fn increment_minutes(&mut self) {
        self.minutes = (self.minutes + 1) % MINUTES_PER_HOUR;
    }

    /// Decimal digits of HH:MM, most significant first.
    #[must_use]
    pub const fn digits(&self) -> [u8; 4] {
        [
            self.hours / 10,
            self.hours % 10,
            self.minutes / 10,
            self.minutes % 10,
        ]
    }
}

impl Default for ClockTime {
    fn default() -> Self {
        ClockTime::MIDNIGHT
    }
}

fn write_two_digits<W: ufmt::uWrite + ?Sized>(
    f: &mut ufmt::Formatter<'_, W>,
    value: u8,
) -> Result<(), W::Error> {
    if value < 10 {
        f.write_str("0")?;
    }
    ufmt::uwrite!(f, "{}", value)
}

impl ufmt::uDisplay for ClockTime {
    fn fmt<W: ufmt::uWrite + ?Sized>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error> {
        write_two_digits(f, self.hours)?;
        f.write_str(":")?;
        write_two_digits(f, self.minutes)?;
        f.write_str(":")?;
        write_two_digits(f, self.seconds)
    }
}
