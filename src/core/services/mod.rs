pub mod enrollment_service;
pub mod freeze_service;
pub mod payment_service;
pub mod status_service;

pub use enrollment_service::EnrollmentService;
pub use freeze_service::{FreezeService, FreezeTargets};
pub use payment_service::PaymentService;
pub use status_service::{EnrollmentDisplayStatus, StatusService, SyncReport};

use uuid::Uuid;

use crate::errors::RosterError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error("Member not found: {0}")]
    MemberNotFound(Uuid),
    #[error("Enrollment not found: {0}")]
    EnrollmentNotFound(Uuid),
    #[error("Freeze interval not found: {0}")]
    FreezeNotFound(Uuid),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Validation failed: {0}")]
    Validation(String),
}
