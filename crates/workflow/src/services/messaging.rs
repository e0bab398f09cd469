//! Finance/ED message threads on vouchers.

use domain::models::{Actor, NewVoucherMessage, SendVoucherMessageInput, VoucherMessage};
use domain::services::ensure_can_message;
use persistence::repositories::{UserRepository, VoucherMessageRepository, VoucherRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::WorkflowError;

#[derive(Clone)]
pub struct MessagingService {
    messages: VoucherMessageRepository,
    vouchers: VoucherRepository,
    users: UserRepository,
}

impl MessagingService {
    pub fn new(
        messages: VoucherMessageRepository,
        vouchers: VoucherRepository,
        users: UserRepository,
    ) -> Self {
        Self {
            messages,
            vouchers,
            users,
        }
    }

    /// Send a message to the counterpart role's current occupant.
    pub async fn send_voucher_message(
        &self,
        actor: &Actor,
        voucher_id: Uuid,
        input: SendVoucherMessageInput,
    ) -> Result<VoucherMessage, WorkflowError> {
        let recipient_role = ensure_can_message(actor)?;
        input.validate()?;
        self.ensure_voucher(voucher_id).await?;

        let recipient = self
            .users
            .find_active_by_role(recipient_role.id())
            .await?
            .ok_or_else(|| WorkflowError::not_found("Active user with role", recipient_role))?;

        let message: VoucherMessage = self
            .messages
            .create(&NewVoucherMessage {
                voucher_id,
                sender_id: actor.user_id,
                recipient_id: recipient.id,
                message: input.message.trim().to_string(),
            })
            .await?
            .into();

        info!(voucher_id = %voucher_id, message_id = %message.id, recipient_id = %recipient.id, "Voucher message sent");
        Ok(message)
    }

    /// A voucher's thread, oldest first. Only Finance and ED may read it.
    pub async fn list_voucher_messages(
        &self,
        actor: &Actor,
        voucher_id: Uuid,
    ) -> Result<Vec<VoucherMessage>, WorkflowError> {
        ensure_can_message(actor)?;
        self.ensure_voucher(voucher_id).await?;
        Ok(self
            .messages
            .list_for_voucher(voucher_id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Mark the actor's incoming messages on a voucher read. Messages the
    /// actor sent are never touched. Returns how many rows flipped.
    pub async fn mark_voucher_messages_read(
        &self,
        actor: &Actor,
        voucher_id: Uuid,
    ) -> Result<u64, WorkflowError> {
        ensure_can_message(actor)?;
        Ok(self.messages.mark_read(voucher_id, actor.user_id).await?)
    }

    /// Unread messages addressed to a user across all vouchers.
    pub async fn unread_count_for_user(&self, user_id: Uuid) -> Result<i64, WorkflowError> {
        Ok(self.messages.count_unread(user_id).await?)
    }

    async fn ensure_voucher(&self, voucher_id: Uuid) -> Result<(), WorkflowError> {
        match self.vouchers.find_by_id(voucher_id).await? {
            Some(_) => Ok(()),
            None => Err(WorkflowError::not_found("Voucher", voucher_id)),
        }
    }
}
