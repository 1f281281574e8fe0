//! Payment recording against an enrollment's billing sequence.

use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::roster::{
    shift_days, AuditAction, AuditEntry, Enrollment, Payment, PaymentKind, Roster,
};

pub struct PaymentService;

impl PaymentService {
    /// Records a payment for one billing period of an enrollment. The
    /// period-start must align with the enrollment's due-date sequence;
    /// a settling payment for an already-satisfied period is rejected.
    /// Refreshes the enrollment's stored next due date afterwards.
    pub fn record(
        roster: &mut Roster,
        enrollment_id: Uuid,
        amount: f64,
        paid_on: NaiveDate,
        period_start: NaiveDate,
        kind: PaymentKind,
    ) -> ServiceResult<Uuid> {
        let enrollment = roster
            .enrollment(enrollment_id)
            .ok_or(ServiceError::EnrollmentNotFound(enrollment_id))?
            .clone();

        if !Self::aligns_with_sequence(&enrollment, period_start) {
            return Err(ServiceError::Validation(format!(
                "period start {} does not align with the enrollment's billing sequence",
                period_start
            )));
        }
        if !matches!(kind, PaymentKind::Refund)
            && roster.paid_periods(&enrollment).contains(&period_start)
        {
            return Err(ServiceError::InvalidOperation(format!(
                "period starting {} is already paid",
                period_start
            )));
        }

        let period_end = shift_days(enrollment.interval.next_date(period_start), -1);
        let payment = Payment::new(enrollment.member_id, amount, paid_on, period_start)
            .with_enrollment(enrollment_id)
            .with_class(enrollment.class_id)
            .with_period_end(period_end)
            .with_kind(kind);
        let payment_id = roster.add_payment(payment);

        // Keep the stored convenience field in step with derived truth.
        let next_due = roster.billing_snapshot(&enrollment, paid_on).next_unpaid;
        if let Some(enrollment) = roster.enrollment_mut(enrollment_id) {
            enrollment.next_payment_due = Some(next_due);
        }

        roster.append_audit(
            AuditEntry::new(
                enrollment.member_id,
                AuditAction::PaymentRecorded,
                paid_on,
                format!("Payment recorded for period starting {}", period_start),
            )
            .with_enrollment(enrollment_id)
            .with_metadata(json!({
                "payment_id": payment_id,
                "amount": amount,
                "period_start": period_start,
            })),
        );
        Ok(payment_id)
    }

    fn aligns_with_sequence(enrollment: &Enrollment, period_start: NaiveDate) -> bool {
        let mut cursor = enrollment.joined_on;
        while cursor < period_start {
            let next = enrollment.interval.next_date(cursor);
            if next == cursor {
                return false;
            }
            cursor = next;
        }
        cursor == period_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Enrollment, Member};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn roster_with_enrollment() -> (Roster, Uuid) {
        let mut roster = Roster::new("Studio");
        let member_id = roster.add_member(Member::new("Dana", date(2024, 1, 1)));
        let enrollment_id =
            roster.add_enrollment(Enrollment::new(member_id, Uuid::new_v4(), date(2024, 1, 1)));
        (roster, enrollment_id)
    }

    #[test]
    fn recording_advances_the_stored_due_date() {
        let (mut roster, enrollment_id) = roster_with_enrollment();
        PaymentService::record(
            &mut roster,
            enrollment_id,
            45.0,
            date(2024, 1, 3),
            date(2024, 1, 1),
            PaymentKind::Monthly,
        )
        .unwrap();

        let enrollment = roster.enrollment(enrollment_id).unwrap();
        assert_eq!(enrollment.next_payment_due, Some(date(2024, 2, 1)));
        assert_eq!(roster.payments.len(), 1);
        assert_eq!(roster.payments[0].period_end, Some(date(2024, 1, 31)));
    }

    #[test]
    fn misaligned_period_is_rejected() {
        let (mut roster, enrollment_id) = roster_with_enrollment();
        let err = PaymentService::record(
            &mut roster,
            enrollment_id,
            45.0,
            date(2024, 1, 3),
            date(2024, 1, 15),
            PaymentKind::Monthly,
        )
        .expect_err("mid-period start must fail");
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(roster.payments.is_empty());
    }

    #[test]
    fn double_payment_for_one_period_is_rejected() {
        let (mut roster, enrollment_id) = roster_with_enrollment();
        PaymentService::record(
            &mut roster,
            enrollment_id,
            45.0,
            date(2024, 1, 3),
            date(2024, 1, 1),
            PaymentKind::Monthly,
        )
        .unwrap();
        let err = PaymentService::record(
            &mut roster,
            enrollment_id,
            45.0,
            date(2024, 1, 9),
            date(2024, 1, 1),
            PaymentKind::Monthly,
        )
        .expect_err("period is already satisfied");
        assert!(matches!(err, ServiceError::InvalidOperation(_)));
    }

    #[test]
    fn refunds_are_recorded_but_do_not_settle() {
        let (mut roster, enrollment_id) = roster_with_enrollment();
        PaymentService::record(
            &mut roster,
            enrollment_id,
            -45.0,
            date(2024, 1, 9),
            date(2024, 1, 1),
            PaymentKind::Refund,
        )
        .unwrap();

        let enrollment = roster.enrollment(enrollment_id).unwrap().clone();
        assert!(roster.paid_periods(&enrollment).is_empty());
    }
}
