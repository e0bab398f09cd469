//! Notification delivery for request and voucher events.

use domain::models::{NewNotification, Role};
use domain::services::{RequestEvent, VoucherEvent};
use persistence::repositories::{NotificationRepository, UserRepository};
use tracing::{debug, warn};

use crate::metrics::record_side_effect_failure;

/// Appends notifications after a decision commits. Delivery failures are
/// logged and counted, never returned.
#[derive(Clone)]
pub struct Notifier {
    notifications: NotificationRepository,
    users: UserRepository,
}

impl Notifier {
    pub fn new(notifications: NotificationRepository, users: UserRepository) -> Self {
        Self {
            notifications,
            users,
        }
    }

    /// Notifies request owners of final approvals and rejections. Returns how
    /// many notifications were stored.
    pub async fn on_request_events(&self, events: &[RequestEvent]) -> usize {
        let mut delivered = 0;
        for notification in events.iter().filter_map(RequestEvent::owner_notification) {
            if self.deliver(&notification).await {
                delivered += 1;
            }
        }
        delivered
    }

    /// Tells the current Executive Director a voucher awaits final approval.
    pub async fn on_voucher_events(&self, events: &[VoucherEvent]) -> usize {
        let mut delivered = 0;
        for event in events {
            if !matches!(event, VoucherEvent::FinanceApproved { .. }) {
                continue;
            }
            let ed = match self.users.find_active_by_role(Role::ExecutiveDirector.id()).await {
                Ok(Some(ed)) => ed,
                Ok(None) => {
                    debug!(voucher_id = %event.voucher_id(), "No active Executive Director; voucher notification skipped");
                    continue;
                }
                Err(e) => {
                    warn!(voucher_id = %event.voucher_id(), error = %e, "Executive Director lookup failed");
                    record_side_effect_failure("notification");
                    continue;
                }
            };
            if let Some(notification) = event.ready_notification(ed.id) {
                if self.deliver(&notification).await {
                    delivered += 1;
                }
            }
        }
        delivered
    }

    async fn deliver(&self, notification: &NewNotification) -> bool {
        match self.notifications.create(notification).await {
            Ok(stored) => {
                debug!(notification_id = %stored.id, user_id = %stored.user_id, title = %stored.title, "Notification stored");
                true
            }
            Err(e) => {
                warn!(user_id = %notification.user_id, error = %e, "Failed to store notification");
                record_side_effect_failure("notification");
                false
            }
        }
    }
}
