//! Calendar month arithmetic shared by scheduling and statistics.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

pub const MONTHS_PER_YEAR: u32 = 12;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Returns the display label for a 1-based month number. Out-of-range values
/// map to an empty label rather than panicking.
pub fn month_name(month: u32) -> &'static str {
    if (1..=MONTHS_PER_YEAR).contains(&month) {
        MONTH_NAMES[(month - 1) as usize]
    } else {
        ""
    }
}

/// Number of days in the given month, accounting for leap years.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

/// A single calendar month, the unit every schedule and statistic iterates
/// over. Constructors keep `month` within 1..=12.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=MONTHS_PER_YEAR).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month that contains the given date.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }

    /// The true last day of the month, leap years included.
    pub fn last_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, days_in_month(self.year, self.month))
            .unwrap()
    }

    /// Whether the date falls inside this calendar month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn next(&self) -> Self {
        if self.month == MONTHS_PER_YEAR {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The month `months` steps after this one.
    pub fn plus_months(&self, months: u32) -> Self {
        let index = self.year as i64 * 12 + (self.month - 1) as i64 + months as i64;
        Self {
            year: (index.div_euclid(12)) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Every month from `self` through `end`, inclusive. Empty when `end`
    /// precedes `self`.
    pub fn through(self, end: YearMonth) -> Vec<YearMonth> {
        let mut months = Vec::new();
        let mut cursor = self;
        while cursor <= end {
            months.push(cursor);
            cursor = cursor.next();
        }
        months
    }

    pub fn label(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}
