//! Notification inbox.

use domain::models::Notification;
use persistence::repositories::NotificationRepository;
use uuid::Uuid;

use crate::error::WorkflowError;

const MAX_PAGE_SIZE: i64 = 100;

#[derive(Clone)]
pub struct NotificationService {
    notifications: NotificationRepository,
}

impl NotificationService {
    pub fn new(notifications: NotificationRepository) -> Self {
        Self { notifications }
    }

    /// A user's notifications, newest first. `limit` is capped at 100.
    pub async fn list_notifications(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, WorkflowError> {
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let offset = offset.max(0);
        Ok(self
            .notifications
            .list_for_user(user_id, limit, offset)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub async fn unread_notification_count(&self, user_id: Uuid) -> Result<i64, WorkflowError> {
        Ok(self.notifications.count_unread(user_id).await?)
    }

    /// Mark one of the user's notifications read.
    pub async fn mark_notification_read(
        &self,
        user_id: Uuid,
        notification_id: Uuid,
    ) -> Result<(), WorkflowError> {
        if self.notifications.mark_read(notification_id, user_id).await? {
            Ok(())
        } else {
            Err(WorkflowError::not_found("Notification", notification_id))
        }
    }

    pub async fn mark_all_notifications_read(&self, user_id: Uuid) -> Result<u64, WorkflowError> {
        Ok(self.notifications.mark_all_read(user_id).await?)
    }
}
