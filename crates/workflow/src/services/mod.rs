//! Application services: the workflow's boundary operations.

pub mod messaging;
pub mod notification;
pub mod request;
pub mod user;
pub mod voucher;

pub use messaging::MessagingService;
pub use notification::NotificationService;
pub use request::RequestService;
pub use user::UserService;
pub use voucher::VoucherService;

use persistence::repositories::{
    LeaveBalanceRepository, NotificationRepository, RequestRepository, UserRepository,
    VoucherMessageRepository, VoucherRepository,
};
use sqlx::PgPool;

use crate::config::LeaveConfig;
use crate::handlers::{LeaveLedger, Messenger, Notifier};

/// Every service wired to one connection pool.
#[derive(Clone)]
pub struct Workflow {
    pub users: UserService,
    pub requests: RequestService,
    pub vouchers: VoucherService,
    pub messages: MessagingService,
    pub notifications: NotificationService,
}

impl Workflow {
    pub fn new(pool: PgPool, leave: &LeaveConfig) -> Self {
        let user_repo = UserRepository::new(pool.clone());
        let request_repo = RequestRepository::new(pool.clone());
        let voucher_repo = VoucherRepository::new(pool.clone());
        let message_repo = VoucherMessageRepository::new(pool.clone());
        let notification_repo = NotificationRepository::new(pool.clone());

        let ledger = LeaveLedger::new(
            LeaveBalanceRepository::new(pool.clone()),
            leave.default_annual_days,
        );
        let notifier = Notifier::new(notification_repo.clone(), user_repo.clone());
        let messenger = Messenger::new(message_repo.clone(), user_repo.clone());

        Self {
            users: UserService::new(user_repo.clone()),
            requests: RequestService::new(
                pool.clone(),
                request_repo.clone(),
                user_repo.clone(),
                ledger,
                notifier.clone(),
            ),
            vouchers: VoucherService::new(pool, voucher_repo.clone(), request_repo, notifier, messenger),
            messages: MessagingService::new(message_repo, voucher_repo, user_repo),
            notifications: NotificationService::new(notification_repo),
        }
    }
}
