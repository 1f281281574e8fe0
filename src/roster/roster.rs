use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    audit::AuditEntry,
    enrollment::Enrollment,
    freeze::FreezeInterval,
    member::Member,
    payment::Payment,
    schedule::{self, BillingSnapshot},
};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Aggregate snapshot of one studio's back-office state: members, their
/// class enrollments, freeze intervals, payments, and the audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub enrollments: Vec<Enrollment>,
    #[serde(default)]
    pub freezes: Vec<FreezeInterval>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub audit_log: Vec<AuditEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Roster::schema_version_default")]
    pub schema_version: u8,
}

impl Roster {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            members: Vec::new(),
            enrollments: Vec::new(),
            freezes: Vec::new(),
            payments: Vec::new(),
            audit_log: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_member(&mut self, member: Member) -> Uuid {
        let id = member.id;
        self.members.push(member);
        self.touch();
        id
    }

    pub fn add_enrollment(&mut self, enrollment: Enrollment) -> Uuid {
        let id = enrollment.id;
        self.enrollments.push(enrollment);
        self.touch();
        id
    }

    pub fn add_freeze(&mut self, interval: FreezeInterval) -> Uuid {
        let id = interval.id;
        self.freezes.push(interval);
        self.touch();
        id
    }

    pub fn add_payment(&mut self, payment: Payment) -> Uuid {
        let id = payment.id;
        self.payments.push(payment);
        self.touch();
        id
    }

    pub fn append_audit(&mut self, entry: AuditEntry) {
        self.audit_log.push(entry);
    }

    pub fn member(&self, id: Uuid) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }

    pub fn member_mut(&mut self, id: Uuid) -> Option<&mut Member> {
        self.members.iter_mut().find(|member| member.id == id)
    }

    pub fn enrollment(&self, id: Uuid) -> Option<&Enrollment> {
        self.enrollments.iter().find(|enrollment| enrollment.id == id)
    }

    pub fn enrollment_mut(&mut self, id: Uuid) -> Option<&mut Enrollment> {
        self.enrollments.iter_mut().find(|enrollment| enrollment.id == id)
    }

    pub fn freeze(&self, id: Uuid) -> Option<&FreezeInterval> {
        self.freezes.iter().find(|interval| interval.id == id)
    }

    pub fn freeze_mut(&mut self, id: Uuid) -> Option<&mut FreezeInterval> {
        self.freezes.iter_mut().find(|interval| interval.id == id)
    }

    /// Removes a freeze interval outright. Reserved for intervals that
    /// never took effect; closing is the path for everything else.
    pub fn remove_freeze(&mut self, id: Uuid) -> Option<FreezeInterval> {
        let position = self.freezes.iter().position(|interval| interval.id == id)?;
        let removed = self.freezes.remove(position);
        self.touch();
        Some(removed)
    }

    pub fn enrollments_for(&self, member_id: Uuid) -> Vec<&Enrollment> {
        self.enrollments
            .iter()
            .filter(|enrollment| enrollment.member_id == member_id)
            .collect()
    }

    pub fn active_enrollments_for(&self, member_id: Uuid) -> Vec<&Enrollment> {
        self.enrollments
            .iter()
            .filter(|enrollment| enrollment.member_id == member_id && enrollment.active)
            .collect()
    }

    pub fn freezes_for(&self, enrollment_id: Uuid) -> Vec<&FreezeInterval> {
        self.freezes
            .iter()
            .filter(|interval| interval.enrollment_id == enrollment_id)
            .collect()
    }

    /// True iff some freeze interval of the enrollment covers `date`.
    pub fn is_date_frozen(&self, enrollment_id: Uuid, date: NaiveDate) -> bool {
        self.freezes
            .iter()
            .any(|interval| interval.enrollment_id == enrollment_id && interval.covers(date))
    }

    /// The enrollment's open (indefinite) interval, if any. At most one
    /// exists by convention; the first wins if the data disagrees.
    pub fn open_freeze(&self, enrollment_id: Uuid) -> Option<&FreezeInterval> {
        self.freezes
            .iter()
            .find(|interval| interval.enrollment_id == enrollment_id && interval.is_open())
    }

    /// Period-start dates already satisfied by a payment, as a set of
    /// sequence slots rather than a running balance.
    pub fn paid_periods(&self, enrollment: &Enrollment) -> BTreeSet<NaiveDate> {
        self.payments
            .iter()
            .filter(|payment| payment.settles(enrollment))
            .map(|payment| payment.period_start)
            .collect()
    }

    /// Runs the schedule walk for one enrollment against this snapshot.
    pub fn billing_snapshot(&self, enrollment: &Enrollment, reference: NaiveDate) -> BillingSnapshot {
        let freezes = self.freezes_for(enrollment.id);
        let paid = self.paid_periods(enrollment);
        schedule::billing_snapshot(enrollment, &freezes, &paid, reference)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn lookups_find_inserted_rows() {
        let mut roster = Roster::new("Studio");
        let member_id = roster.add_member(Member::new("Dana", date(2024, 1, 1)));
        let enrollment_id =
            roster.add_enrollment(Enrollment::new(member_id, Uuid::new_v4(), date(2024, 1, 1)));

        assert!(roster.member(member_id).is_some());
        assert!(roster.enrollment(enrollment_id).is_some());
        assert_eq!(roster.active_enrollments_for(member_id).len(), 1);
        assert!(roster.enrollment(Uuid::new_v4()).is_none());
    }

    #[test]
    fn open_freeze_ignores_closed_intervals() {
        let mut roster = Roster::new("Studio");
        let member_id = roster.add_member(Member::new("Dana", date(2024, 1, 1)));
        let enrollment_id =
            roster.add_enrollment(Enrollment::new(member_id, Uuid::new_v4(), date(2024, 1, 1)));

        roster.add_freeze(
            FreezeInterval::new(enrollment_id, member_id, date(2024, 2, 1))
                .with_end(date(2024, 2, 29)),
        );
        assert!(roster.open_freeze(enrollment_id).is_none());

        let open_id =
            roster.add_freeze(FreezeInterval::new(enrollment_id, member_id, date(2024, 4, 1)));
        assert_eq!(roster.open_freeze(enrollment_id).map(|i| i.id), Some(open_id));
    }

    #[test]
    fn paid_periods_collects_settling_payments_only() {
        let mut roster = Roster::new("Studio");
        let member_id = roster.add_member(Member::new("Dana", date(2024, 1, 1)));
        let class_id = Uuid::new_v4();
        let enrollment = Enrollment::new(member_id, class_id, date(2024, 1, 1));
        let enrollment_id = enrollment.id;
        roster.add_enrollment(enrollment);

        roster.add_payment(
            Payment::new(member_id, 45.0, date(2024, 1, 2), date(2024, 1, 1))
                .with_enrollment(enrollment_id),
        );
        // Legacy row associated by class only.
        roster.add_payment(
            Payment::new(member_id, 45.0, date(2024, 2, 3), date(2024, 2, 1)).with_class(class_id),
        );
        // Unrelated member, same class.
        roster.add_payment(
            Payment::new(Uuid::new_v4(), 45.0, date(2024, 3, 3), date(2024, 3, 1))
                .with_class(class_id),
        );

        let enrollment = roster.enrollment(enrollment_id).unwrap().clone();
        let paid = roster.paid_periods(&enrollment);
        assert_eq!(
            paid.into_iter().collect::<Vec<_>>(),
            vec![date(2024, 1, 1), date(2024, 2, 1)]
        );
    }
}
