//! Repository implementations for database operations.

pub mod leave_balance;
pub mod notification;
pub mod request;
pub mod user;
pub mod voucher;
pub mod voucher_message;

pub use leave_balance::{LeaveBalanceRepository, NewLeaveLogRow};
pub use notification::NotificationRepository;
pub use request::{NewRequestRow, RequestRepository};
pub use user::UserRepository;
pub use voucher::{NewVoucherRow, VoucherRepository};
pub use voucher_message::VoucherMessageRepository;
