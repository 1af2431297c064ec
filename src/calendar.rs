//! Arrow counts by day and month.

use crate::error::Result;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Arrows shot in one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ShootRecord {
    pub date: NaiveDate,
    pub arrow_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrowCountCalendar {
    days: BTreeMap<NaiveDate, u32>,
}

impl ArrowCountCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = ShootRecord>) -> Self {
        let mut calendar = Self::new();
        for record in records {
            calendar.add(record);
        }
        calendar
    }

    /// Load records from CSV with `date` (YYYY-MM-DD) and `arrow_count` columns
    pub fn read_csv(csv: &str) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let mut calendar = Self::new();
        for result in reader.deserialize() {
            let record: ShootRecord = result?;
            calendar.add(record);
        }
        Ok(calendar)
    }

    pub fn add(&mut self, record: ShootRecord) {
        *self.days.entry(record.date).or_default() += record.arrow_count;
    }

    pub fn day(&self, date: NaiveDate) -> u32 {
        self.days.get(&date).copied().unwrap_or(0)
    }

    /// Total over `start..=end`
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        if start > end {
            return 0;
        }
        self.days.range(start..=end).map(|(_, count)| *count).sum()
    }

    pub fn month(&self, year: i32, month: u32) -> u32 {
        self.days
            .iter()
            .filter(|(date, _)| date.year() == year && date.month() == month)
            .map(|(_, count)| *count)
            .sum()
    }

    /// Totals for each month of `year` that has any arrows, January first
    pub fn months_of_year(&self, year: i32) -> Vec<(u32, u32)> {
        let mut months: BTreeMap<u32, u32> = BTreeMap::new();
        for (date, count) in self.days.iter().filter(|(date, _)| date.year() == year) {
            *months.entry(date.month()).or_default() += count;
        }
        months.into_iter().collect()
    }

    /// Days with arrows in the given month, in date order
    pub fn days_in_month(&self, year: i32, month: u32) -> Vec<(NaiveDate, u32)> {
        self.days
            .iter()
            .filter(|(date, _)| date.year() == year && date.month() == month)
            .map(|(date, count)| (*date, *count))
            .collect()
    }

    pub fn total(&self) -> u32 {
        self.days.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar() -> ArrowCountCalendar {
        ArrowCountCalendar::from_records(vec![
            ShootRecord { date: date(2024, 5, 4), arrow_count: 144 },
            ShootRecord { date: date(2024, 5, 4), arrow_count: 36 },
            ShootRecord { date: date(2024, 5, 11), arrow_count: 72 },
            ShootRecord { date: date(2024, 6, 1), arrow_count: 60 },
            ShootRecord { date: date(2023, 12, 31), arrow_count: 30 },
        ])
    }

    #[test]
    fn test_same_day_sessions_add_up() {
        assert_eq!(calendar().day(date(2024, 5, 4)), 180);
        assert_eq!(calendar().day(date(2024, 5, 5)), 0);
    }

    #[test]
    fn test_month_totals() {
        let calendar = calendar();
        assert_eq!(calendar.month(2024, 5), 252);
        assert_eq!(calendar.months_of_year(2024), vec![(5, 252), (6, 60)]);
        assert_eq!(calendar.days_in_month(2024, 5).len(), 2);
        assert_eq!(calendar.total(), 342);
    }

    #[test]
    fn test_between() {
        let calendar = calendar();
        assert_eq!(calendar.between(date(2023, 12, 1), date(2024, 5, 4)), 210);
        assert_eq!(calendar.between(date(2024, 6, 2), date(2024, 5, 1)), 0);
    }

    #[test]
    fn test_read_csv() {
        let calendar = ArrowCountCalendar::read_csv("date,arrow_count\n2024-07-01,48\n2024-07-01,12\n").unwrap();
        assert_eq!(calendar.day(date(2024, 7, 1)), 60);
        assert!(ArrowCountCalendar::read_csv("date,arrow_count\nyesterday,48\n").is_err());
    }
}
