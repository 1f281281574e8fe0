use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enrollment::Enrollment;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub member_id: Uuid,
    /// Legacy rows may lack the enrollment link and associate by class.
    #[serde(default)]
    pub enrollment_id: Option<Uuid>,
    #[serde(default)]
    pub class_id: Option<Uuid>,
    pub amount: f64,
    pub paid_on: NaiveDate,
    /// Identifies which billing period this payment satisfies.
    pub period_start: NaiveDate,
    #[serde(default)]
    pub period_end: Option<NaiveDate>,
    #[serde(default)]
    pub kind: PaymentKind,
}

impl Payment {
    pub fn new(member_id: Uuid, amount: f64, paid_on: NaiveDate, period_start: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            member_id,
            enrollment_id: None,
            class_id: None,
            amount,
            paid_on,
            period_start,
            period_end: None,
            kind: PaymentKind::Monthly,
        }
    }

    pub fn with_enrollment(mut self, enrollment_id: Uuid) -> Self {
        self.enrollment_id = Some(enrollment_id);
        self
    }

    pub fn with_class(mut self, class_id: Uuid) -> Self {
        self.class_id = Some(class_id);
        self
    }

    pub fn with_period_end(mut self, period_end: NaiveDate) -> Self {
        self.period_end = Some(period_end);
        self
    }

    pub fn with_kind(mut self, kind: PaymentKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this payment satisfies a billing slot of `enrollment`:
    /// matched by enrollment id, or for legacy rows without one, by member
    /// plus class with a period starting no earlier than the enrollment.
    /// Refund rows never satisfy a slot.
    pub fn settles(&self, enrollment: &Enrollment) -> bool {
        if matches!(self.kind, PaymentKind::Refund) {
            return false;
        }
        match self.enrollment_id {
            Some(id) => id == enrollment.id,
            None => {
                self.member_id == enrollment.member_id
                    && self.class_id == Some(enrollment.class_id)
                    && self.period_start >= enrollment.joined_on
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentKind {
    #[default]
    Monthly,
    Custom,
    Refund,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn settles_by_enrollment_id() {
        let enrollment = Enrollment::new(Uuid::new_v4(), Uuid::new_v4(), date(2024, 1, 1));
        let payment = Payment::new(enrollment.member_id, 45.0, date(2024, 1, 3), date(2024, 1, 1))
            .with_enrollment(enrollment.id);
        assert!(payment.settles(&enrollment));
    }

    #[test]
    fn legacy_rows_settle_by_class_after_join_date() {
        let enrollment = Enrollment::new(Uuid::new_v4(), Uuid::new_v4(), date(2024, 3, 1));
        let matching = Payment::new(enrollment.member_id, 45.0, date(2024, 3, 2), date(2024, 3, 1))
            .with_class(enrollment.class_id);
        let too_early = Payment::new(enrollment.member_id, 45.0, date(2024, 1, 2), date(2024, 1, 1))
            .with_class(enrollment.class_id);
        assert!(matching.settles(&enrollment));
        assert!(!too_early.settles(&enrollment));
    }

    #[test]
    fn refunds_never_settle() {
        let enrollment = Enrollment::new(Uuid::new_v4(), Uuid::new_v4(), date(2024, 1, 1));
        let refund = Payment::new(enrollment.member_id, -45.0, date(2024, 1, 9), date(2024, 1, 1))
            .with_enrollment(enrollment.id)
            .with_kind(PaymentKind::Refund);
        assert!(!refund.settles(&enrollment));
    }
}
