//! Calendar dates as stored by the app and the formats used to display them.
//!
//! Records store their date as an ISO-8601 string, e.g. `2024-01-05T00:00:00.000Z`.
//! Only the leading `YYYY-MM-DD` is meaningful and it is always read as a UTC
//! calendar date: no offset is ever applied, so a date can never drift into
//! the previous or next day because of the server's local timezone.

use std::{fmt::Display, str::FromStr};

use time::{Date, Month};

use crate::Error;

/// Three-letter month labels, indexed by zero-based month.
pub const SHORT_MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// The length of the `YYYY-MM-DD` prefix of a date string.
const DATE_PREFIX_LENGTH: usize = 10;

/// A validated calendar date with no time or timezone component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(Date);

impl CalendarDate {
    /// Parse the leading `YYYY-MM-DD` of `text`.
    ///
    /// Anything after the first ten characters (e.g. a time component) is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidDate] if the prefix is not made of 4/2/2 digit
    /// groups separated by `-`, or if the digits do not form a real date
    /// (e.g. `2023-02-30`).
    pub fn parse(text: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidDate(text.to_owned());

        let prefix = text.get(..DATE_PREFIX_LENGTH).ok_or_else(invalid)?;
        let bytes = prefix.as_bytes();

        let is_well_formed = bytes.iter().enumerate().all(|(i, byte)| match i {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        });

        if !is_well_formed {
            return Err(invalid());
        }

        let year: i32 = prefix[0..4].parse().map_err(|_| invalid())?;
        let month: u8 = prefix[5..7].parse().map_err(|_| invalid())?;
        let day: u8 = prefix[8..10].parse().map_err(|_| invalid())?;

        let month = Month::try_from(month).map_err(|_| invalid())?;
        let date = Date::from_calendar_date(year, month, day).map_err(|_| invalid())?;

        Ok(Self(date))
    }

    /// The calendar year, e.g. 2024.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// The calendar month.
    pub fn month(&self) -> Month {
        self.0.month()
    }

    /// The day of the month, starting at 1.
    pub fn day(&self) -> u8 {
        self.0.day()
    }

    /// The zero-based index of the month, January is 0.
    pub fn month_index(&self) -> usize {
        usize::from(u8::from(self.0.month()) - 1)
    }

    /// The form records are stored in: midnight UTC on this date.
    pub fn to_iso_timestamp(&self) -> String {
        format!("{}T00:00:00.000Z", self.0)
    }

    /// Render the date in one of the display formats.
    pub fn format(&self, format: DateFormat) -> String {
        match format {
            DateFormat::NumDate => format!("{:02}", self.day()),
            DateFormat::NumMonthNumDate => format!("{}/{}", u8::from(self.month()), self.day()),
            DateFormat::ShortMonthNumDate => {
                format!("{} {}", SHORT_MONTH_LABELS[self.month_index()], self.day())
            }
            DateFormat::FullFormat => {
                format!("{} {:02}, {}", self.month(), self.day(), self.year())
            }
        }
    }
}

impl From<Date> for CalendarDate {
    fn from(date: Date) -> Self {
        Self(date)
    }
}

impl From<CalendarDate> for Date {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl FromStr for CalendarDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CalendarDate::parse(s)
    }
}

/// Displays as `YYYY-MM-DD`, the format used by `<input type="date">`.
impl Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The ways a date is shown in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// Two-digit day of the month, e.g. `05`.
    NumDate,
    /// Numeric month and day, e.g. `1/5`.
    NumMonthNumDate,
    /// Short month name and day, e.g. `Jan 5`.
    ShortMonthNumDate,
    /// Full month name, two-digit day and year, e.g. `January 05, 2024`.
    FullFormat,
}

/// Look up a month by its three-letter label, e.g. "Jan".
pub fn month_from_short_label(label: &str) -> Option<Month> {
    SHORT_MONTH_LABELS
        .iter()
        .position(|&candidate| candidate == label)
        .and_then(|index| Month::try_from(index as u8 + 1).ok())
}
