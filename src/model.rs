use crate::color::Rgb;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub id: String,
    pub author_name: String,
    pub author_email: String,
    pub timestamp: DateTime<Utc>,
    /// Author's UTC offset in seconds.
    ///
    /// `timestamp` is the author date, as printed by `git log --pretty=%ad`.
    pub utc_offset: i32,
}

impl CommitInfo {
    /// Calendar day of the commit in the author's own timezone.
    pub fn local_date(&self) -> NaiveDate {
        match FixedOffset::east_opt(self.utc_offset) {
            Some(offset) => self.timestamp.with_timezone(&offset).date_naive(),
            None => self.timestamp.date_naive(),
        }
    }

    /// Case-insensitive substring match on author name or email.
    ///
    /// Looser than `git log --author`, which is a case-sensitive regex.
    pub fn matches_author(&self, pattern: &str) -> bool {
        let pattern = pattern.to_lowercase();
        self.author_name.to_lowercase().contains(&pattern)
            || self.author_email.to_lowercase().contains(&pattern)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthStats {
    pub total_commits: u32,
    pub active_days: u32,
    pub best_day: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub count: u32,
    pub intensity: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberCalendar {
    pub key: String,
    pub display_name: String,
    pub base_color: String,
    pub stats: MonthStats,
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub title: String,
    pub repository_path: String,
    pub month: String,
    pub members: Vec<MemberCalendar>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub key: String,
    pub display_name: String,
    pub commits: u32,
    pub present: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub date: NaiveDate,
    pub entries: Vec<AttendanceEntry>,
}

#[derive(Debug, Clone)]
pub struct DateRange {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { since: None, until: None }
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        if let Some(since) = self.since {
            if timestamp < &since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if timestamp > &until {
                return false;
            }
        }
        true
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new()
    }
}
