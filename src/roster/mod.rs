//! Roster domain models, calendar primitives, and schedule computation.

pub mod audit;
pub mod calendar;
pub mod enrollment;
pub mod freeze;
pub mod member;
pub mod payment;
#[allow(clippy::module_inception)]
pub mod roster;
pub mod schedule;

pub use audit::{AuditAction, AuditEntry};
pub use calendar::{days_between, days_in_month, shift_days, shift_months, BillingInterval};
pub use enrollment::Enrollment;
pub use freeze::{FreezeInterval, FreezePhase};
pub use member::{Member, MemberStatus};
pub use payment::{Payment, PaymentKind};
pub use roster::Roster;
pub use schedule::{
    billing_snapshot, next_unpaid_date, overdue_count, BillingSnapshot, MAX_SCHEDULE_STEPS,
};
