//! Reconciles the denormalized member status against derived truth.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::roster::{AuditAction, AuditEntry, Enrollment, MemberStatus, Roster};

/// Display classification for a single enrollment. Frozen takes precedence
/// over overdue: a freeze suspends both service and billing pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentDisplayStatus {
    Active,
    Frozen,
    Overdue,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub examined: usize,
    pub updated: usize,
}

/// Single writer of the derived member status. Every lifecycle operation
/// funnels through `recompute_member_status` rather than hand-setting the
/// field, and the batch sync is safe to re-run at any time.
pub struct StatusService;

impl StatusService {
    pub fn enrollment_display_status(
        roster: &Roster,
        enrollment: &Enrollment,
        reference: NaiveDate,
    ) -> EnrollmentDisplayStatus {
        if roster.is_date_frozen(enrollment.id, reference) {
            EnrollmentDisplayStatus::Frozen
        } else if roster.billing_snapshot(enrollment, reference).overdue > 0 {
            EnrollmentDisplayStatus::Overdue
        } else {
            EnrollmentDisplayStatus::Active
        }
    }

    /// Recomputes one member's stored status as of `reference`. Returns
    /// whether a write happened. A member with no active enrollments gives
    /// no freeze/active signal and is left untouched, as is an archived
    /// member.
    pub fn recompute_member_status(
        roster: &mut Roster,
        member_id: Uuid,
        reference: NaiveDate,
    ) -> ServiceResult<bool> {
        let member = roster
            .member(member_id)
            .ok_or(ServiceError::MemberNotFound(member_id))?;
        if member.is_archived() {
            return Ok(false);
        }
        let current = member.status;

        let active_ids: Vec<Uuid> = roster
            .active_enrollments_for(member_id)
            .iter()
            .map(|enrollment| enrollment.id)
            .collect();
        if active_ids.is_empty() {
            return Ok(false);
        }

        let should_be_frozen = active_ids
            .iter()
            .all(|id| roster.is_date_frozen(*id, reference));

        let next = if should_be_frozen && current != MemberStatus::Frozen {
            MemberStatus::Frozen
        } else if !should_be_frozen && current == MemberStatus::Frozen {
            MemberStatus::Active
        } else {
            return Ok(false);
        };

        let member = roster
            .member_mut(member_id)
            .ok_or(ServiceError::MemberNotFound(member_id))?;
        member.status = next;
        roster.touch();
        Ok(true)
    }

    /// Batch reconciliation over every non-archived member. Idempotent: a
    /// second run against the same snapshot and reference reports zero
    /// updates.
    pub fn sync_member_statuses(roster: &mut Roster, reference: NaiveDate) -> SyncReport {
        let member_ids: Vec<Uuid> = roster
            .members
            .iter()
            .filter(|member| !member.is_archived())
            .map(|member| member.id)
            .collect();

        let mut report = SyncReport {
            examined: member_ids.len(),
            updated: 0,
        };
        for member_id in member_ids {
            if matches!(
                Self::recompute_member_status(roster, member_id, reference),
                Ok(true)
            ) {
                report.updated += 1;
            }
        }
        report
    }

    /// Explicit, terminal archive action. Archived members are skipped by
    /// every later sync pass.
    pub fn archive_member(
        roster: &mut Roster,
        member_id: Uuid,
        reference: NaiveDate,
    ) -> ServiceResult<()> {
        let member = roster
            .member_mut(member_id)
            .ok_or(ServiceError::MemberNotFound(member_id))?;
        member.status = MemberStatus::Archived;
        roster.append_audit(AuditEntry::new(
            member_id,
            AuditAction::Archive,
            reference,
            "Member archived",
        ));
        roster.touch();
        Ok(())
    }
}
