//! Due-date and overdue computations over an enrollment's billing timeline.
//!
//! Both queries ride a single bounded cursor walk with shared frozen/paid
//! skip semantics, so "next due date" and "how many periods are overdue"
//! can never disagree about which slots were skipped.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::enrollment::Enrollment;
use super::freeze::FreezeInterval;

/// Safety bound on the billing walk: ten years of monthly cycles. Hitting
/// it is a data-quality signal, not a business rule.
pub const MAX_SCHEDULE_STEPS: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingSnapshot {
    /// First period-start that is neither frozen nor paid. May lie in the
    /// future when everything due so far has been settled.
    pub next_unpaid: NaiveDate,
    /// Unpaid, unfrozen billing periods strictly before the reference date.
    pub overdue: u32,
    /// Set when the walk hit [`MAX_SCHEDULE_STEPS`] before resolving; the
    /// snapshot then carries the last cursor value as a best effort.
    pub scan_exhausted: bool,
}

/// Walks the enrollment's period-start sequence from its join date.
/// Frozen slots are skipped entirely: they never become due and never
/// count as overdue, regardless of payment. Paid slots are skipped too.
/// The walk ends once the next unpaid slot is known and the cursor has
/// reached `reference`, so the overdue tally is complete.
pub fn billing_snapshot(
    enrollment: &Enrollment,
    freezes: &[&FreezeInterval],
    paid: &BTreeSet<NaiveDate>,
    reference: NaiveDate,
) -> BillingSnapshot {
    let mut cursor = enrollment.joined_on;
    let mut next_unpaid = None;
    let mut overdue = 0u32;
    let mut steps = 0usize;

    loop {
        let frozen = freezes.iter().any(|interval| interval.covers(cursor));
        if !frozen && !paid.contains(&cursor) {
            if next_unpaid.is_none() {
                next_unpaid = Some(cursor);
            }
            if cursor < reference {
                overdue += 1;
            }
        }
        if next_unpaid.is_some() && cursor >= reference {
            break;
        }
        steps += 1;
        if steps >= MAX_SCHEDULE_STEPS {
            tracing::warn!(
                enrollment_id = %enrollment.id,
                steps = MAX_SCHEDULE_STEPS,
                "billing scan exhausted its bound without resolving; check the enrollment's interval and freeze data"
            );
            return BillingSnapshot {
                next_unpaid: next_unpaid.unwrap_or(cursor),
                overdue,
                scan_exhausted: true,
            };
        }
        cursor = enrollment.interval.next_date(cursor);
    }

    BillingSnapshot {
        // The loop only breaks once a slot was found.
        next_unpaid: next_unpaid.unwrap_or(cursor),
        overdue,
        scan_exhausted: false,
    }
}

/// First unpaid, unfrozen period-start on or after the enrollment's join
/// date. Always >= `joined_on`.
pub fn next_unpaid_date(
    enrollment: &Enrollment,
    freezes: &[&FreezeInterval],
    paid: &BTreeSet<NaiveDate>,
    reference: NaiveDate,
) -> NaiveDate {
    billing_snapshot(enrollment, freezes, paid, reference).next_unpaid
}

/// Count of unpaid, unfrozen billing periods strictly before `reference`.
pub fn overdue_count(
    enrollment: &Enrollment,
    freezes: &[&FreezeInterval],
    paid: &BTreeSet<NaiveDate>,
    reference: NaiveDate,
) -> u32 {
    billing_snapshot(enrollment, freezes, paid, reference).overdue
}
