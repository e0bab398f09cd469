//! Messages exchanged between Finance and the Executive Director about a voucher.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use shared::validation::validate_not_blank;

/// A message attached to a voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherMessage {
    pub id: Uuid,
    pub voucher_id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// A message about to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVoucherMessage {
    pub voucher_id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub message: String,
}

/// Input for sending a message manually.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct SendVoucherMessageInput {
    #[validate(length(min = 1, max = 2000, message = "Message must be between 1 and 2000 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub message: String,
}
