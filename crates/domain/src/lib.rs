//! Domain layer for the chamber request-approval and voucher workflow.
//!
//! This crate contains:
//! - Domain models (Role, Request, Voucher, VoucherMessage, Notification, LeaveBalance)
//! - The approval state machine: visibility rules, transition planners, domain events
//! - Domain error types

pub mod errors;
pub mod models;
pub mod services;

pub use errors::DomainError;
