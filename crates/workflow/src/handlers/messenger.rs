//! System messages on the Finance/ED voucher thread.

use domain::models::{NewVoucherMessage, Role};
use domain::services::VoucherEvent;
use persistence::repositories::{UserRepository, VoucherMessageRepository};
use tracing::{debug, warn};

use crate::metrics::record_side_effect_failure;

/// Posts the readiness notice when Finance approves and carries ED's
/// rejection remark back to the preparer. Runs after commit; failures are
/// logged and counted.
#[derive(Clone)]
pub struct Messenger {
    messages: VoucherMessageRepository,
    users: UserRepository,
}

impl Messenger {
    pub fn new(messages: VoucherMessageRepository, users: UserRepository) -> Self {
        Self { messages, users }
    }

    /// Returns how many messages were stored.
    pub async fn on_voucher_events(&self, events: &[VoucherEvent]) -> usize {
        let mut delivered = 0;
        for event in events {
            let message = match event {
                VoucherEvent::FinanceApproved { .. } => {
                    match self.users.find_active_by_role(Role::ExecutiveDirector.id()).await {
                        Ok(Some(ed)) => event.ready_message(ed.id),
                        Ok(None) => {
                            debug!(voucher_id = %event.voucher_id(), "No active Executive Director; readiness message skipped");
                            None
                        }
                        Err(e) => {
                            warn!(voucher_id = %event.voucher_id(), error = %e, "Executive Director lookup failed");
                            record_side_effect_failure("voucher_message");
                            None
                        }
                    }
                }
                VoucherEvent::EdRejected { .. } => event.rejection_message(),
                VoucherEvent::FinanceRejected { .. } | VoucherEvent::EdApproved { .. } => None,
            };

            if let Some(message) = message {
                if self.post(&message).await {
                    delivered += 1;
                }
            }
        }
        delivered
    }

    async fn post(&self, message: &NewVoucherMessage) -> bool {
        match self.messages.create(message).await {
            Ok(stored) => {
                debug!(message_id = %stored.id, voucher_id = %stored.voucher_id, "Voucher message posted");
                true
            }
            Err(e) => {
                warn!(voucher_id = %message.voucher_id, error = %e, "Failed to post voucher message");
                record_side_effect_failure("voucher_message");
                false
            }
        }
    }
}
