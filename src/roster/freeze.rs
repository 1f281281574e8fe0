use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A pause applied to one enrollment. An interval with no end date is
/// indefinite and covers every date from its start until explicitly closed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreezeInterval {
    pub id: Uuid,
    pub enrollment_id: Uuid,
    pub member_id: Uuid,
    pub starts_on: NaiveDate,
    #[serde(default)]
    pub ends_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Days the interval was actually in effect, recorded when it closes.
    #[serde(default)]
    pub effective_days: Option<i64>,
}

impl FreezeInterval {
    pub fn new(enrollment_id: Uuid, member_id: Uuid, starts_on: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            enrollment_id,
            member_id,
            starts_on,
            ends_on: None,
            reason: None,
            effective_days: None,
        }
    }

    pub fn with_end(mut self, ends_on: NaiveDate) -> Self {
        self.ends_on = Some(ends_on);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn is_open(&self) -> bool {
        self.ends_on.is_none()
    }

    /// True iff `date` falls within `[starts_on, ends_on]`, end inclusive,
    /// with a missing end treated as covering every later date.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.starts_on <= date && self.ends_on.map_or(true, |end| date <= end)
    }

    pub fn phase(&self, reference: NaiveDate) -> FreezePhase {
        if self.starts_on > reference {
            FreezePhase::Scheduled
        } else if self.covers(reference) {
            FreezePhase::Active
        } else {
            FreezePhase::Closed
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FreezePhase {
    Scheduled,
    Active,
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn coverage_is_end_inclusive() {
        let interval = FreezeInterval::new(Uuid::new_v4(), Uuid::new_v4(), date(2024, 2, 1))
            .with_end(date(2024, 2, 29));
        assert!(!interval.covers(date(2024, 1, 31)));
        assert!(interval.covers(date(2024, 2, 1)));
        assert!(interval.covers(date(2024, 2, 29)));
        assert!(!interval.covers(date(2024, 3, 1)));
    }

    #[test]
    fn indefinite_interval_covers_everything_after_start() {
        let interval = FreezeInterval::new(Uuid::new_v4(), Uuid::new_v4(), date(2024, 1, 15));
        assert!(interval.is_open());
        assert!(interval.covers(date(2030, 6, 1)));
        assert!(!interval.covers(date(2024, 1, 14)));
    }

    #[test]
    fn phase_follows_the_reference_date() {
        let interval = FreezeInterval::new(Uuid::new_v4(), Uuid::new_v4(), date(2024, 2, 1))
            .with_end(date(2024, 2, 29));
        assert_eq!(interval.phase(date(2024, 1, 20)), FreezePhase::Scheduled);
        assert_eq!(interval.phase(date(2024, 2, 10)), FreezePhase::Active);
        assert_eq!(interval.phase(date(2024, 3, 1)), FreezePhase::Closed);
    }
}
