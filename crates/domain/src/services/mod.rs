//! Domain services for the chamber workflow.
//!
//! Pure decision logic: visibility, status transitions and the events they
//! emit. Persistence and delivery live in the workflow crate.

pub mod events;
pub mod leave;
pub mod messaging;
pub mod request_transition;
pub mod visibility;
pub mod voucher_transition;

pub use events::{RequestEvent, VoucherEvent};
pub use leave::{deduct, LeaveDeduction};
pub use messaging::{communication_recipient_role, ensure_can_message};
pub use request_transition::{normalize_remark, plan_decision, RequestTransition};
pub use visibility::{candidate_scope, CandidateScope};
pub use voucher_transition::{
    plan_ed_decision, plan_finance_decision, VoucherApprover, VoucherTransition,
};
