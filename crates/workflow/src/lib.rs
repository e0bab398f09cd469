//! Chamber request-approval and voucher-disbursement workflow.
//!
//! [`services::Workflow`] exposes the boundary operations: request
//! submission, role-scoped listing and stage decisions, voucher preparation
//! with Finance and Executive Director decisions, the Finance/ED message
//! thread, the notification inbox and annual leave balances.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod services;

pub use error::WorkflowError;
pub use services::Workflow;
