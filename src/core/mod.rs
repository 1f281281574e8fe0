//! Service layer: validated operations over the roster aggregate.

pub mod services;

pub use services::{
    EnrollmentDisplayStatus, EnrollmentService, FreezeService, FreezeTargets, PaymentService,
    ServiceError, ServiceResult, StatusService, SyncReport,
};
