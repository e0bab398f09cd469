//! Domain error types.

use thiserror::Error;

use crate::models::{RequestType, Stage};

/// Errors raised by the approval state machine before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The acting role has no approval stage (or is not a known role).
    #[error("Role {0} cannot decide at any approval stage")]
    InvalidActor(i16),

    /// The actor's stage is skipped for this request type.
    #[error("The {stage} stage does not apply to {request_type} requests")]
    StageNotApplicable {
        stage: Stage,
        request_type: RequestType,
    },

    /// The request already left Pending; Approved and Rejected are final.
    #[error("Request is already {0} and accepts no further decisions")]
    RequestClosed(String),

    /// ED tried to decide a voucher Finance has not approved.
    #[error("Voucher has not been approved by Finance yet")]
    VoucherNotReady,

    /// Only Finance and the Executive Director exchange voucher messages.
    #[error("Role {0} may not exchange voucher messages")]
    MessagingNotAllowed(i16),

    /// The role is not allowed to perform this operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_display() {
        assert_eq!(
            DomainError::InvalidActor(7).to_string(),
            "Role 7 cannot decide at any approval stage"
        );
        assert_eq!(
            DomainError::StageNotApplicable {
                stage: Stage::Hod,
                request_type: RequestType::SalaryAdvance,
            }
            .to_string(),
            "The HOD stage does not apply to Salary advance requests"
        );
        assert_eq!(
            DomainError::RequestClosed("Rejected".into()).to_string(),
            "Request is already Rejected and accepts no further decisions"
        );
        assert_eq!(
            DomainError::MessagingNotAllowed(2).to_string(),
            "Role 2 may not exchange voucher messages"
        );
    }
}
