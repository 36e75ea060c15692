use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Suffix the spreadsheet uses for "end of month" report labels ("2024-01-末").
pub const MONTH_END_MARKER: &str = "末";

/// A typed reporting date.
///
/// Report sheets label monthly snapshots either with a concrete day
/// (`2024-01-31`) or with a month-end marker (`2024-01-末`). A month-end label
/// sorts after every concrete day of the same month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReportDate {
    /// A concrete calendar day
    Day(NaiveDate),
    /// The end of a month, whatever its last day is
    MonthEnd { year: i32, month: u32 },
}

impl ReportDate {
    /// Create a month-end label, validating the month.
    pub fn month_end(year: i32, month: u32) -> Result<Self, CoreError> {
        NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            CoreError::InvalidDate(format!("{year:04}-{month:02}-{MONTH_END_MARKER}"))
        })?;
        Ok(ReportDate::MonthEnd { year, month })
    }

    /// Parse a label in `YYYY-MM-DD`, `YYYY/MM/DD` or `YYYY-MM-末` form.
    pub fn parse(label: &str) -> Result<Self, CoreError> {
        let label = label.trim();

        if let Some(prefix) = label.strip_suffix(MONTH_END_MARKER) {
            let invalid = || CoreError::InvalidDate(label.to_string());
            let (year, month) = prefix
                .strip_suffix('-')
                .and_then(|ym| ym.split_once('-'))
                .ok_or_else(invalid)?;
            let year: i32 = year.parse().map_err(|_| invalid())?;
            let month: u32 = month.parse().map_err(|_| invalid())?;
            return Self::month_end(year, month).map_err(|_| invalid());
        }

        NaiveDate::parse_from_str(label, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(label, "%Y/%m/%d"))
            .map(ReportDate::Day)
            .map_err(|_| CoreError::InvalidDate(label.to_string()))
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        match self {
            ReportDate::Day(date) => date.year(),
            ReportDate::MonthEnd { year, .. } => *year,
        }
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        match self {
            ReportDate::Day(date) => date.month(),
            ReportDate::MonthEnd { month, .. } => *month,
        }
    }

    /// The calendar day this label stands for (last day of the month for month-end labels).
    #[must_use]
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        match self {
            ReportDate::Day(date) => Some(*date),
            ReportDate::MonthEnd { year, month } => {
                let (next_year, next_month) = if *month == 12 {
                    (year.checked_add(1)?, 1)
                } else {
                    (*year, month + 1)
                };
                NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
            }
        }
    }

    fn sort_key(&self) -> (i32, u32, u32) {
        match self {
            ReportDate::Day(date) => (date.year(), date.month(), date.day()),
            ReportDate::MonthEnd { year, month } => (*year, *month, u32::MAX),
        }
    }
}

impl Ord for ReportDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for ReportDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportDate::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            ReportDate::MonthEnd { year, month } => {
                write!(f, "{year:04}-{month:02}-{MONTH_END_MARKER}")
            }
        }
    }
}

impl FromStr for ReportDate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportDate::parse(s)
    }
}

impl TryFrom<String> for ReportDate {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ReportDate::parse(&value)
    }
}

impl From<ReportDate> for String {
    fn from(date: ReportDate) -> Self {
        date.to_string()
    }
}

/// How date labels are ordered when rows are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrdering {
    /// Plain string comparison of the labels.
    #[default]
    Lexical,
    /// Labels are parsed as [`ReportDate`] and compared on the calendar.
    /// Unparseable labels go last, in lexical order.
    Chronological,
}

impl DateOrdering {
    /// Sort labels ascending under this ordering.
    pub fn sort<S: AsRef<str>>(self, labels: &mut [S]) {
        match self {
            DateOrdering::Lexical => labels.sort_by(|a, b| a.as_ref().cmp(b.as_ref())),
            DateOrdering::Chronological => labels.sort_by_cached_key(|label| {
                let label = label.as_ref();
                let parsed = match ReportDate::parse(label) {
                    Ok(date) => Some(date),
                    Err(_) => {
                        tracing::warn!(label, "unparseable report date, ordering it last");
                        None
                    }
                };
                (parsed.is_none(), parsed, label.to_string())
            }),
        }
    }

    /// The greatest label under this ordering, if any.
    #[must_use]
    pub fn latest<'a, I>(self, labels: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut distinct: Vec<&str> = labels.into_iter().collect();
        distinct.sort_unstable();
        distinct.dedup();
        self.sort(&mut distinct);
        distinct.last().copied()
    }
}
