use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::error::{AvailabilityError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive span of dates evaluated for one scrape. Only built through
/// [`AvailabilityWindow::new`] or [`AvailabilityWindow::parse`], so
/// `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvailabilityWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl AvailabilityWindow {
    /// Window of `days` days beginning at `start`; `end = start + (days - 1)`.
    pub fn new(start: NaiveDate, days: i64) -> Result<Self> {
        if days <= 0 {
            return Err(AvailabilityError::InvalidWindow {
                reason: format!("window length must be a positive number of days, got {days}"),
            });
        }
        let span = u64::try_from(days - 1).map_err(|_| AvailabilityError::InvalidWindow {
            reason: format!("window length {days} is out of range"),
        })?;
        let end = start
            .checked_add_days(Days::new(span))
            .ok_or_else(|| AvailabilityError::InvalidWindow {
                reason: format!("window of {days} days starting {start} overflows the calendar"),
            })?;
        Ok(Self { start, end })
    }

    /// Parse a `YYYY-MM-DD` start date and build the window.
    pub fn parse(start: &str, days: i64) -> Result<Self> {
        let start = NaiveDate::parse_from_str(start.trim(), DATE_FORMAT).map_err(|_| {
            AvailabilityError::InvalidWindow {
                reason: format!("invalid start date '{start}', expected YYYY-MM-DD"),
            }
        })?;
        Self::new(start, days)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every date in the window, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(|d| *d <= self.end)
    }

    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Calendar heading of the month holding the window start, e.g. "June 2025".
    pub fn start_month_label(&self) -> String {
        month_label(self.start)
    }
}

pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}
