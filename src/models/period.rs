//! Reporting period identifiers.
//!
//! This module defines the [`Period`] type and the policy for the canonical
//! period identifier format: `Q<n>-<year>` for quarters and `M<n>-<year>`
//! for months. Periods are externally supplied labels, not computed
//! schedule triggers; the only derivation offered is "the period containing
//! a given date".

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A reporting period for a KPI assignment or a monetary adjustment.
///
/// The canonical string forms are `Q<n>-<year>` (quarter, `n` in 1..=4) and
/// `M<n>-<year>` (month, `n` in 1..=12). Periods serialize as that string.
///
/// # Example
///
/// ```
/// use kpi_engine::models::Period;
///
/// let period: Period = "Q3-2026".parse().unwrap();
/// assert_eq!(period, Period::Quarter { quarter: 3, year: 2026 });
/// assert_eq!(period.to_string(), "Q3-2026");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    /// A calendar quarter (1 through 4) of a year.
    Quarter {
        /// The quarter number, 1 through 4.
        quarter: u8,
        /// The calendar year.
        year: i32,
    },
    /// A calendar month (1 through 12) of a year.
    Month {
        /// The month number, 1 through 12.
        month: u8,
        /// The calendar year.
        year: i32,
    },
}

impl Period {
    /// Returns the quarter period containing the given date.
    ///
    /// # Example
    ///
    /// ```
    /// use kpi_engine::models::Period;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
    /// assert_eq!(Period::quarter_of(date), Period::Quarter { quarter: 3, year: 2026 });
    /// ```
    pub fn quarter_of(date: NaiveDate) -> Self {
        let quarter = ((date.month0()) / 3 + 1) as u8;
        Self::Quarter {
            quarter,
            year: date.year(),
        }
    }

    /// Returns the month period containing the given date.
    pub fn month_of(date: NaiveDate) -> Self {
        Self::Month {
            month: date.month() as u8,
            year: date.year(),
        }
    }

    /// Returns the default period for a date.
    ///
    /// Reporting defaults to quarterly periods; callers that track monthly
    /// KPIs supply `M<n>-<year>` labels explicitly.
    pub fn current(today: NaiveDate) -> Self {
        Self::quarter_of(today)
    }

    /// Returns the calendar year of the period.
    pub fn year(&self) -> i32 {
        match *self {
            Self::Quarter { year, .. } | Self::Month { year, .. } => year,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Quarter { quarter, year } => write!(f, "Q{}-{}", quarter, year),
            Self::Month { month, year } => write!(f, "M{}-{}", month, year),
        }
    }
}

impl FromStr for Period {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let invalid = || EngineError::validation("period", format!("'{}' is not a valid period", s));

        let (kind, rest) = s.split_at_checked(1).ok_or_else(invalid)?;
        let (ordinal, year) = rest.split_once('-').ok_or_else(invalid)?;
        let ordinal: u8 = ordinal.parse().map_err(|_| invalid())?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        if !(1000..=9999).contains(&year) {
            return Err(invalid());
        }

        match kind {
            "Q" if (1..=4).contains(&ordinal) => Ok(Self::Quarter {
                quarter: ordinal,
                year,
            }),
            "M" if (1..=12).contains(&ordinal) => Ok(Self::Month {
                month: ordinal,
                year,
            }),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = EngineError;

    fn try_from(value: String) -> EngineResult<Self> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}
