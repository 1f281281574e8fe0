//! Enrollment lifecycle helpers: enroll, terminate, transfer.

use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::roster::{AuditAction, AuditEntry, BillingInterval, Enrollment, Roster};

pub struct EnrollmentService;

impl EnrollmentService {
    /// Registers a member in a class. At most one active enrollment may
    /// exist per (member, class) pair.
    pub fn enroll(
        roster: &mut Roster,
        member_id: Uuid,
        class_id: Uuid,
        joined_on: NaiveDate,
        interval: BillingInterval,
        custom_price: Option<f64>,
    ) -> ServiceResult<Uuid> {
        roster
            .member(member_id)
            .ok_or(ServiceError::MemberNotFound(member_id))?;
        if Self::has_active_in_class(roster, member_id, class_id) {
            return Err(ServiceError::InvalidOperation(format!(
                "member {} already has an active enrollment in class {}",
                member_id, class_id
            )));
        }

        let mut enrollment =
            Enrollment::new(member_id, class_id, joined_on).with_interval(interval);
        if let Some(price) = custom_price {
            enrollment = enrollment.with_custom_price(price);
        }
        let enrollment_id = roster.add_enrollment(enrollment);
        roster.append_audit(
            AuditEntry::new(
                member_id,
                AuditAction::Enroll,
                joined_on,
                "Enrolled in class",
            )
            .with_enrollment(enrollment_id)
            .with_metadata(json!({ "class_id": class_id, "interval_months": interval.months })),
        );
        Ok(enrollment_id)
    }

    /// Flips the active flag off. Rows with payment history are never
    /// physically deleted.
    pub fn terminate(
        roster: &mut Roster,
        enrollment_id: Uuid,
        reference: NaiveDate,
    ) -> ServiceResult<()> {
        let enrollment = roster
            .enrollment_mut(enrollment_id)
            .ok_or(ServiceError::EnrollmentNotFound(enrollment_id))?;
        if !enrollment.active {
            return Err(ServiceError::InvalidOperation(format!(
                "enrollment {} is already inactive",
                enrollment_id
            )));
        }
        enrollment.deactivate();
        let member_id = enrollment.member_id;
        roster.append_audit(
            AuditEntry::new(member_id, AuditAction::Terminate, reference, "Enrollment terminated")
                .with_enrollment(enrollment_id),
        );
        roster.touch();
        Ok(())
    }

    /// Moves an active enrollment to another class: deactivates the old
    /// row and activates a fresh one carrying the billing cadence and
    /// price override.
    pub fn transfer(
        roster: &mut Roster,
        enrollment_id: Uuid,
        new_class_id: Uuid,
        reference: NaiveDate,
    ) -> ServiceResult<Uuid> {
        let old = roster
            .enrollment(enrollment_id)
            .ok_or(ServiceError::EnrollmentNotFound(enrollment_id))?
            .clone();
        if !old.active {
            return Err(ServiceError::InvalidOperation(format!(
                "enrollment {} is not active and cannot transfer",
                enrollment_id
            )));
        }
        if Self::has_active_in_class(roster, old.member_id, new_class_id) {
            return Err(ServiceError::InvalidOperation(format!(
                "member {} already has an active enrollment in class {}",
                old.member_id, new_class_id
            )));
        }

        if let Some(enrollment) = roster.enrollment_mut(enrollment_id) {
            enrollment.deactivate();
        }
        let mut replacement = Enrollment::new(old.member_id, new_class_id, reference)
            .with_interval(old.interval);
        if let Some(price) = old.custom_price {
            replacement = replacement.with_custom_price(price);
        }
        let replacement_id = roster.add_enrollment(replacement);
        roster.append_audit(
            AuditEntry::new(
                old.member_id,
                AuditAction::Transfer,
                reference,
                "Enrollment transferred to another class",
            )
            .with_enrollment(enrollment_id)
            .with_metadata(json!({
                "from_class": old.class_id,
                "to_class": new_class_id,
                "replacement_enrollment": replacement_id,
            })),
        );
        Ok(replacement_id)
    }

    fn has_active_in_class(roster: &Roster, member_id: Uuid, class_id: Uuid) -> bool {
        roster.enrollments.iter().any(|enrollment| {
            enrollment.member_id == member_id
                && enrollment.class_id == class_id
                && enrollment.active
        })
    }
}
