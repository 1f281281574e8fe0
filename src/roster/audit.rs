use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Append-only record of a lifecycle transition. The metadata payload
/// captures the operation's inputs for later inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    pub member_id: Uuid,
    #[serde(default)]
    pub enrollment_id: Option<Uuid>,
    pub action: AuditAction,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub metadata: Value,
}

impl AuditEntry {
    pub fn new(
        member_id: Uuid,
        action: AuditAction,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            member_id,
            enrollment_id: None,
            action,
            date,
            description: description.into(),
            metadata: Value::Null,
        }
    }

    pub fn with_enrollment(mut self, enrollment_id: Uuid) -> Self {
        self.enrollment_id = Some(enrollment_id);
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AuditAction {
    Freeze,
    Unfreeze,
    CancelFreeze,
    Enroll,
    Terminate,
    Transfer,
    Archive,
    PaymentRecorded,
}
