use crate::error::{GrassError, Result};
use crate::model::{DayActivity, MonthStats};
use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A calendar month, e.g. `2025-09`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(GrassError::InvalidDate(format!("invalid month {year}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or_else(|| self.first_day())
    }

    pub fn days(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first_day();
        (0..self.days()).filter_map(move |d| first.checked_add_days(chrono::Days::new(d as u64)))
    }

    /// UTC instants covering the month with a day of slack on both ends, so
    /// commits made in other timezones aren't dropped before local bucketing.
    pub fn utc_bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.first_day().pred_opt().unwrap_or(self.first_day());
        let end = self.last_day().succ_opt().unwrap_or(self.last_day());
        let start = start.and_hms_opt(0, 0, 0).unwrap_or_default();
        let end = end.and_hms_opt(23, 59, 59).unwrap_or_default();
        (Utc.from_utc_datetime(&start), Utc.from_utc_datetime(&end))
    }

    /// Blank cells before the 1st on a Sunday-first week grid.
    pub fn weekday_offset(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = GrassError;

    fn from_str(s: &str) -> Result<Self> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| GrassError::InvalidDate(format!("expected YYYY-MM, got '{s}'")))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| GrassError::InvalidDate(format!("invalid year in '{s}'")))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| GrassError::InvalidDate(format!("invalid month in '{s}'")))?;
        Self::new(year, month)
    }
}

/// Count `dates` per day of `month`. Dates outside the month are ignored.
pub fn bucket_by_day<I>(month: YearMonth, dates: I) -> Vec<DayActivity>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut counts: HashMap<NaiveDate, u32> = HashMap::new();
    for date in dates.into_iter().filter(|d| month.contains(*d)) {
        *counts.entry(date).or_insert(0) += 1;
    }

    month
        .dates()
        .map(|date| DayActivity {
            date,
            count: counts.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

pub fn empty_month(month: YearMonth) -> Vec<DayActivity> {
    bucket_by_day(month, std::iter::empty())
}

/// Parse `git log --date=short --pretty=format:%ad` output.
pub fn parse_log_dates(text: &str) -> Result<Vec<NaiveDate>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            NaiveDate::parse_from_str(line, "%Y-%m-%d")
                .map_err(|e| GrassError::Parse(format!("invalid log date '{line}': {e}")))
        })
        .collect()
}

pub fn count_on(series: &[DayActivity], date: NaiveDate) -> u32 {
    series
        .iter()
        .find(|d| d.date == date)
        .map(|d| d.count)
        .unwrap_or(0)
}

impl MonthStats {
    pub fn from_series(series: &[DayActivity]) -> Self {
        Self {
            total_commits: series.iter().map(|d| d.count).sum(),
            active_days: series.iter().filter(|d| d.count > 0).count() as u32,
            best_day: series.iter().map(|d| d.count).max().unwrap_or(0),
        }
    }
}
