//! Calendar month catalog for the month selector.
//!
//! February is fixed at 28 days; there is no leap-year handling.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// One of the twelve selectable billing months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// Longest month; upper bound for a home's days stayed.
    pub const MAX_DAYS: u32 = 31;

    pub fn label(self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }

    /// Day count applied to every home when this month is selected.
    pub fn days(self) -> u32 {
        match self {
            Self::February => 28,
            Self::April | Self::June | Self::September | Self::November => 30,
            _ => 31,
        }
    }

    /// 1-based calendar number.
    pub fn number(self) -> u32 {
        Self::ALL
            .iter()
            .position(|month| *month == self)
            .map_or(0, |index| index as u32 + 1)
    }

    pub fn from_number(number: u32) -> Option<Self> {
        let index = usize::try_from(number.checked_sub(1)?).ok()?;
        Self::ALL.get(index).copied()
    }

    /// Parses a month from `1..12`, a full name, or a 3-letter abbreviation.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn parse(value: &str) -> Result<Self, MonthParseError> {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(MonthParseError::Empty);
        }

        if let Ok(number) = normalized.parse::<u32>() {
            return Self::from_number(number).ok_or(MonthParseError::OutOfRange(number));
        }

        Self::ALL
            .iter()
            .copied()
            .find(|month| {
                let label = month.label().to_ascii_lowercase();
                label == normalized || (normalized.len() == 3 && label.starts_with(&normalized))
            })
            .ok_or_else(|| MonthParseError::Unknown(value.trim().to_string()))
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} days)", self.label(), self.days())
    }
}

/// Month selector parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    Empty,
    OutOfRange(u32),
    Unknown(String),
}

impl Display for MonthParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "month cannot be empty"),
            Self::OutOfRange(number) => {
                write!(f, "month number {number} is out of range; expected 1..12")
            }
            Self::Unknown(value) => write!(f, "unknown month `{value}`"),
        }
    }
}

impl Error for MonthParseError {}
