//! Who may exchange voucher messages with whom.

use crate::errors::DomainError;
use crate::models::{Actor, Role};

/// Role on the other side of a voucher conversation.
///
/// Finance and the Executive Director talk to each other; nobody else
/// takes part.
pub fn communication_recipient_role(role_id: i16) -> Result<Role, DomainError> {
    match Role::from_id(role_id) {
        Some(Role::Finance) => Ok(Role::ExecutiveDirector),
        Some(Role::ExecutiveDirector) => Ok(Role::Finance),
        _ => Err(DomainError::MessagingNotAllowed(role_id)),
    }
}

/// Checks the actor may send voucher messages and returns the recipient role.
pub fn ensure_can_message(actor: &Actor) -> Result<Role, DomainError> {
    communication_recipient_role(actor.role_id)
}
