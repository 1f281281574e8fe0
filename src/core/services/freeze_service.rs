//! Freeze lifecycle operations: create, close, and cancel intervals.

use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult, StatusService};
use crate::roster::{
    days_between, shift_days, AuditAction, AuditEntry, FreezeInterval, MemberStatus, Roster,
};

/// Which of a member's enrollments a freeze applies to.
#[derive(Debug, Clone)]
pub enum FreezeTargets {
    AllActive,
    Enrollments(Vec<Uuid>),
}

pub struct FreezeService;

impl FreezeService {
    /// Creates one freeze interval per target enrollment, then recomputes
    /// the member's stored status. Returns the created interval ids.
    pub fn freeze(
        roster: &mut Roster,
        member_id: Uuid,
        targets: FreezeTargets,
        starts_on: NaiveDate,
        ends_on: Option<NaiveDate>,
        reason: Option<&str>,
        reference: NaiveDate,
    ) -> ServiceResult<Vec<Uuid>> {
        roster
            .member(member_id)
            .ok_or(ServiceError::MemberNotFound(member_id))?;
        if let Some(end) = ends_on {
            if end < starts_on {
                return Err(ServiceError::Validation(format!(
                    "freeze end date {} is before its start date {}",
                    end, starts_on
                )));
            }
        }

        let target_ids = match targets {
            FreezeTargets::AllActive => {
                let ids: Vec<Uuid> = roster
                    .active_enrollments_for(member_id)
                    .iter()
                    .map(|enrollment| enrollment.id)
                    .collect();
                if ids.is_empty() {
                    return Err(ServiceError::Validation(
                        "member has no active enrollments to freeze".into(),
                    ));
                }
                ids
            }
            FreezeTargets::Enrollments(ids) => {
                for id in &ids {
                    let enrollment = roster
                        .enrollment(*id)
                        .ok_or(ServiceError::EnrollmentNotFound(*id))?;
                    if enrollment.member_id != member_id {
                        return Err(ServiceError::Validation(format!(
                            "enrollment {} does not belong to member {}",
                            id, member_id
                        )));
                    }
                }
                ids
            }
        };

        let mut created = Vec::with_capacity(target_ids.len());
        for enrollment_id in target_ids {
            let mut interval = FreezeInterval::new(enrollment_id, member_id, starts_on);
            if let Some(end) = ends_on {
                interval = interval.with_end(end);
            }
            if let Some(reason) = reason {
                interval = interval.with_reason(reason);
            }
            let freeze_id = roster.add_freeze(interval);
            roster.append_audit(
                AuditEntry::new(
                    member_id,
                    AuditAction::Freeze,
                    reference,
                    format!("Enrollment frozen from {}", starts_on),
                )
                .with_enrollment(enrollment_id)
                .with_metadata(json!({
                    "freeze_id": freeze_id,
                    "starts_on": starts_on,
                    "ends_on": ends_on,
                    "reason": reason,
                })),
            );
            created.push(freeze_id);
        }

        // The interval rows are the source of truth; a failed status write
        // leaves them in place and the next sync pass corrects the field.
        if let Err(err) = StatusService::recompute_member_status(roster, member_id, reference) {
            tracing::warn!(member_id = %member_id, error = %err, "status recompute after freeze failed");
        }
        Ok(created)
    }

    /// Closes one interval as of `reference` and shifts the enrollment's
    /// stored due date forward by the days the freeze was actually in
    /// effect. Returns that day count.
    pub fn unfreeze_interval(
        roster: &mut Roster,
        freeze_id: Uuid,
        reference: NaiveDate,
    ) -> ServiceResult<i64> {
        let interval = roster
            .freeze(freeze_id)
            .ok_or(ServiceError::FreezeNotFound(freeze_id))?;
        if !interval.is_open() {
            return Err(ServiceError::InvalidOperation(format!(
                "freeze interval {} is already closed",
                freeze_id
            )));
        }
        let enrollment_id = interval.enrollment_id;
        let member_id = interval.member_id;
        let starts_on = interval.starts_on;

        // An interval that has not started yet never took effect, so
        // closing it shifts nothing.
        let effective_days = if starts_on >= reference {
            0
        } else {
            days_between(starts_on, reference).max(0)
        };

        if effective_days > 0 {
            if let Some(enrollment) = roster.enrollment_mut(enrollment_id) {
                if let Some(due) = enrollment.next_payment_due {
                    enrollment.next_payment_due = Some(shift_days(due, effective_days));
                }
            }
        }

        if let Some(interval) = roster.freeze_mut(freeze_id) {
            interval.ends_on = Some(reference);
            interval.effective_days = Some(effective_days);
        }

        // Closing any one freeze optimistically assumes return to service;
        // the next sync corrects this if other enrollments stay frozen.
        if let Some(member) = roster.member_mut(member_id) {
            if !member.is_archived() {
                member.status = MemberStatus::Active;
            }
        }

        roster.append_audit(
            AuditEntry::new(
                member_id,
                AuditAction::Unfreeze,
                reference,
                format!("Freeze closed after {} effective days", effective_days),
            )
            .with_enrollment(enrollment_id)
            .with_metadata(json!({
                "freeze_id": freeze_id,
                "starts_on": starts_on,
                "effective_days": effective_days,
            })),
        );
        roster.touch();
        Ok(effective_days)
    }

    /// Closes every open interval of the member, in any order. When none
    /// exist the member's status is forced back to active directly.
    pub fn unfreeze_member(
        roster: &mut Roster,
        member_id: Uuid,
        reference: NaiveDate,
    ) -> ServiceResult<usize> {
        roster
            .member(member_id)
            .ok_or(ServiceError::MemberNotFound(member_id))?;

        let open_ids: Vec<Uuid> = roster
            .freezes
            .iter()
            .filter(|interval| interval.member_id == member_id && interval.is_open())
            .map(|interval| interval.id)
            .collect();

        if open_ids.is_empty() {
            if let Some(member) = roster.member_mut(member_id) {
                if !member.is_archived() {
                    member.status = MemberStatus::Active;
                }
            }
            roster.append_audit(AuditEntry::new(
                member_id,
                AuditAction::Unfreeze,
                reference,
                "No open freeze intervals; member status forced active",
            ));
            roster.touch();
            return Ok(0);
        }

        let closed = open_ids.len();
        for freeze_id in open_ids {
            Self::unfreeze_interval(roster, freeze_id, reference)?;
        }
        Ok(closed)
    }

    /// Hard-deletes a scheduled interval. Permitted only while its start
    /// date is strictly in the future; once it has started the interval has
    /// had an effect, and the correct operation is to close it.
    pub fn cancel_scheduled(
        roster: &mut Roster,
        freeze_id: Uuid,
        reference: NaiveDate,
    ) -> ServiceResult<FreezeInterval> {
        let interval = roster
            .freeze(freeze_id)
            .ok_or(ServiceError::FreezeNotFound(freeze_id))?;
        if interval.starts_on <= reference {
            return Err(ServiceError::InvalidOperation(format!(
                "freeze interval {} already started on {}; close it instead of cancelling",
                freeze_id, interval.starts_on
            )));
        }

        let removed = roster
            .remove_freeze(freeze_id)
            .ok_or(ServiceError::FreezeNotFound(freeze_id))?;
        roster.append_audit(
            AuditEntry::new(
                removed.member_id,
                AuditAction::CancelFreeze,
                reference,
                format!("Scheduled freeze starting {} cancelled", removed.starts_on),
            )
            .with_enrollment(removed.enrollment_id)
            .with_metadata(json!({
                "freeze_id": removed.id,
                "starts_on": removed.starts_on,
                "ends_on": removed.ends_on,
            })),
        );
        Ok(removed)
    }
}
