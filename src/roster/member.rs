use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    /// Denormalized status kept consistent with enrollments and freezes by
    /// the status synchronizer, which is its only derived writer.
    pub status: MemberStatus,
    pub joined_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Member {
    pub fn new(name: impl Into<String>, joined_on: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: MemberStatus::Active,
            joined_on,
            notes: None,
        }
    }

    pub fn is_archived(&self) -> bool {
        matches!(self.status, MemberStatus::Archived)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum MemberStatus {
    #[default]
    Active,
    Frozen,
    /// Terminal; set only by the explicit archive operation, never derived.
    Archived,
}
