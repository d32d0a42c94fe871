//! Source of the current date for inserted invoices

use chrono::{NaiveDate, Utc};

/// Supplies "today" when an invoice is created
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Current UTC date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always returns the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(FixedClock(date).today(), date);
    }

    #[test]
    fn test_system_clock_formats_as_iso_date() {
        let today = SystemClock.today().format("%Y-%m-%d").to_string();
        assert_eq!(today.len(), 10);
    }
}
