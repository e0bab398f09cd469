//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod leave_balance;
pub mod notification;
pub mod request;
pub mod stage;
pub mod user;
pub mod voucher;

pub use leave_balance::{LeaveBalanceEntity, LeaveBalanceLogEntity};
pub use notification::NotificationEntity;
pub use request::{RequestEntity, RequestStatusEntity};
pub use stage::{StageStatusDb, VoucherTypeDb};
pub use user::UserEntity;
pub use voucher::{VoucherEntity, VoucherMessageEntity};
