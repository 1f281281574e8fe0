use chrono::{NaiveDate, Utc};

/// Supplies the effective "today" for due/overdue computations. Every
/// function in this crate takes the reference date as an explicit
/// parameter; the trait only feeds the boundary, so callers can swap in a
/// simulated date for testing and forecasting.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock reference dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A pinned reference date for simulated-time workflows.
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
    fn fixed_clock_returns_its_date() {
        let pinned = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(FixedClock(pinned).today(), pinned);
    }
}
