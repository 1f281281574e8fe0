use chrono::NaiveDate;
use uuid::Uuid;

use studio_core::core::EnrollmentService;
use studio_core::roster::{BillingInterval, Member, Roster};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn roster_with_member(name: &str) -> (Roster, Uuid) {
    let mut roster = Roster::new("Studio");
    let member_id = roster.add_member(Member::new(name, date(2024, 1, 1)));
    (roster, member_id)
}

/// Enrolls the member in a fresh class on a monthly cadence.
pub fn monthly_enrollment(roster: &mut Roster, member_id: Uuid, joined_on: NaiveDate) -> Uuid {
    EnrollmentService::enroll(
        roster,
        member_id,
        Uuid::new_v4(),
        joined_on,
        BillingInterval::monthly(),
        None,
    )
    .unwrap()
}
