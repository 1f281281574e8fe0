use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calendar::BillingInterval;

/// A member's registration in one class, with its own billing cadence and
/// optional price override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Uuid,
    pub member_id: Uuid,
    pub class_id: Uuid,
    pub joined_on: NaiveDate,
    pub active: bool,
    #[serde(default)]
    pub interval: BillingInterval,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_price: Option<f64>,
    /// Stored convenience copy of the next due date, shifted by freeze
    /// closes and refreshed on payment. The schedule walk is authoritative.
    #[serde(default)]
    pub next_payment_due: Option<NaiveDate>,
}

impl Enrollment {
    pub fn new(member_id: Uuid, class_id: Uuid, joined_on: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            member_id,
            class_id,
            joined_on,
            active: true,
            interval: BillingInterval::default(),
            custom_price: None,
            next_payment_due: Some(joined_on),
        }
    }

    pub fn with_interval(mut self, interval: BillingInterval) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_custom_price(mut self, price: f64) -> Self {
        self.custom_price = Some(price);
        self
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}
