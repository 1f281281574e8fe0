use chrono::{Duration, NaiveDate};
use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Billing cadence expressed in whole months per cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillingInterval {
    pub months: u32,
}

impl Default for BillingInterval {
    fn default() -> Self {
        Self::monthly()
    }
}

impl BillingInterval {
    pub fn monthly() -> Self {
        Self { months: 1 }
    }

    pub fn every_months(months: u32) -> Self {
        Self { months }
    }

    /// Next period-start after `from`, using calendar-month stepping.
    pub fn next_date(&self, from: NaiveDate) -> NaiveDate {
        shift_months(from, self.months as i32)
    }

    pub fn previous_date(&self, from: NaiveDate) -> NaiveDate {
        shift_months(from, -(self.months as i32))
    }

    pub fn add_to(&self, from: NaiveDate, steps: i32) -> NaiveDate {
        shift_months(from, steps * self.months as i32)
    }

    pub fn label(&self) -> String {
        match self.months {
            1 => "Monthly".into(),
            n => format!("Every {} Months", n),
        }
    }
}

/// Shifts `date` by `months` calendar months. The day-of-month is clamped
/// to the last valid day of the target month, so Jan 31 + 1 month lands on
/// Feb 28/29 rather than overflowing into March.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Signed whole days from `a` to `b` at day granularity.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn shift_months_clamps_to_month_end() {
        assert_eq!(shift_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(shift_months(date(2023, 1, 31), 1), date(2023, 2, 28));
        assert_eq!(shift_months(date(2024, 3, 31), 1), date(2024, 4, 30));
    }

    #[test]
    fn shift_months_crosses_year_boundaries() {
        assert_eq!(shift_months(date(2024, 11, 15), 3), date(2025, 2, 15));
        assert_eq!(shift_months(date(2024, 2, 29), -2), date(2023, 12, 29));
    }

    #[test]
    fn days_between_is_signed() {
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 1, 31)), 30);
        assert_eq!(days_between(date(2024, 1, 31), date(2024, 1, 1)), -30);
        assert_eq!(days_between(date(2024, 3, 5), date(2024, 3, 5)), 0);
    }

    #[test]
    fn interval_stepping_and_labels() {
        let monthly = BillingInterval::monthly();
        assert_eq!(monthly.next_date(date(2024, 1, 1)), date(2024, 2, 1));
        assert_eq!(monthly.add_to(date(2024, 1, 1), 3), date(2024, 4, 1));
        assert_eq!(monthly.label(), "Monthly");

        let quarterly = BillingInterval::every_months(3);
        assert_eq!(quarterly.next_date(date(2024, 1, 31)), date(2024, 4, 30));
        assert_eq!(quarterly.previous_date(date(2024, 4, 30)), date(2024, 1, 30));
        assert_eq!(quarterly.label(), "Every 3 Months");
    }
}
