use crate::types::errors::TargetMonthError;
use chrono::{Datelike, NaiveDateTime};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The `YYYY-MM` reporting period a run is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetMonth {
    year: i32,
    month: u32
}

impl TargetMonth {
    /// Whether the timestamp falls inside this calendar month.
    pub fn contains(&self, timestamp: &NaiveDateTime) -> bool {
        timestamp.year() == self.year && timestamp.month() == self.month
    }

    /// `YYYYMM`, used to name the output directory of a run.
    pub fn compact(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }
}

impl Display for TargetMonth {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for TargetMonth {
    type Err = TargetMonthError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || TargetMonthError::InvalidFormat(value.to_string());

        let (year, month) = value.split_once('-').ok_or_else(invalid)?;

        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        if !year.bytes().chain(month.bytes()).all(|byte| byte.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        if !(1..=12).contains(&month) {
            return Err(TargetMonthError::MonthOutOfRange(value.to_string()));
        }

        Ok(TargetMonth { year, month })
    }
}
