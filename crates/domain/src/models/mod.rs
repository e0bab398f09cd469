//! Domain models for the chamber workflow.

pub mod leave_balance;
pub mod notification;
pub mod request;
pub mod role;
pub mod user;
pub mod voucher;
pub mod voucher_message;

pub use leave_balance::{LeaveBalance, LeaveBalanceLog, ANNUAL_LEAVE};
pub use notification::{NewNotification, Notification};
pub use request::{
    derive_status, AggregateStatus, CreateRequestInput, Decision, Request, RequestType, StageSet,
    StageState, StageStatus,
};
pub use role::{Actor, Role, RoleInfo, Stage, StageColumns, ROLE_REGISTRY, STAGE_TABLE};
pub use user::User;
pub use voucher::{CreateVoucherInput, Voucher, VoucherStage, VoucherType};
pub use voucher_message::{NewVoucherMessage, SendVoucherMessageInput, VoucherMessage};
