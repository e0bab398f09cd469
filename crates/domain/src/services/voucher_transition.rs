//! Voucher status transitions for the Finance and Executive Director approvers.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::DomainError;
use crate::models::{Actor, Decision, Role, StageStatus, Voucher, VoucherStage};
use crate::services::events::VoucherEvent;
use crate::services::request_transition::normalize_remark;

/// Which approver a voucher decision targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoucherApprover {
    Finance,
    Ed,
}

impl VoucherApprover {
    pub fn role(self) -> Role {
        match self {
            VoucherApprover::Finance => Role::Finance,
            VoucherApprover::Ed => Role::ExecutiveDirector,
        }
    }
}

impl std::fmt::Display for VoucherApprover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoucherApprover::Finance => write!(f, "finance"),
            VoucherApprover::Ed => write!(f, "ed"),
        }
    }
}

/// Outcome of a validated voucher decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherTransition {
    pub voucher_id: Uuid,
    pub approver: VoucherApprover,
    /// New Finance state, when Finance decided.
    pub finance: Option<VoucherStage>,
    /// New ED state: ED's own decision, or the reopened state after a Finance rejection.
    pub ed: Option<VoucherStage>,
    pub events: Vec<VoucherEvent>,
}

fn ensure_role(actor: &Actor, approver: VoucherApprover) -> Result<(), DomainError> {
    if actor.has_role(approver.role()) {
        Ok(())
    } else {
        Err(DomainError::Forbidden(format!(
            "only the {} may record this voucher decision",
            approver.role()
        )))
    }
}

/// Plans a Finance decision.
///
/// Approval readies the voucher for the Executive Director; repeating an
/// approval emits nothing. Rejection always
/// reopens ED's decision (pending, no remark), so a stale ED approval never
/// survives Finance rescinding its own.
pub fn plan_finance_decision(
    actor: &Actor,
    voucher: &Voucher,
    decision: Decision,
    remark: Option<&str>,
    now: DateTime<Utc>,
) -> Result<VoucherTransition, DomainError> {
    ensure_role(actor, VoucherApprover::Finance)?;

    let finance = VoucherStage {
        status: decision.into(),
        remark: normalize_remark(remark),
        decided_at: Some(now),
    };

    let (ed, events) = match decision {
        // Re-approving an approved voucher changes the remark only; ED was already told.
        Decision::Approved if voucher.finance.status == StageStatus::Approved => (None, Vec::new()),
        Decision::Approved => (
            None,
            vec![VoucherEvent::FinanceApproved {
                voucher_id: voucher.id,
                voucher_type: voucher.voucher_type,
                pv_no: voucher.pv_no.clone(),
                prepared_by: voucher.prepared_by,
            }],
        ),
        Decision::Rejected => (
            Some(VoucherStage::pending()),
            vec![VoucherEvent::FinanceRejected {
                voucher_id: voucher.id,
                previous_ed_status: voucher.ed.status,
            }],
        ),
    };

    Ok(VoucherTransition {
        voucher_id: voucher.id,
        approver: VoucherApprover::Finance,
        finance: Some(finance),
        ed,
        events,
    })
}

/// Plans an Executive Director decision. Requires a Finance-approved voucher.
pub fn plan_ed_decision(
    actor: &Actor,
    voucher: &Voucher,
    decision: Decision,
    remark: Option<&str>,
    now: DateTime<Utc>,
) -> Result<VoucherTransition, DomainError> {
    ensure_role(actor, VoucherApprover::Ed)?;
    if voucher.finance.status != StageStatus::Approved {
        return Err(DomainError::VoucherNotReady);
    }

    let remark = normalize_remark(remark);
    let ed = VoucherStage {
        status: decision.into(),
        remark: remark.clone(),
        decided_at: Some(now),
    };

    let event = match decision {
        Decision::Approved => VoucherEvent::EdApproved {
            voucher_id: voucher.id,
        },
        Decision::Rejected => VoucherEvent::EdRejected {
            voucher_id: voucher.id,
            pv_no: voucher.pv_no.clone(),
            prepared_by: voucher.prepared_by,
            decided_by: actor.user_id,
            remark,
        },
    };

    Ok(VoucherTransition {
        voucher_id: voucher.id,
        approver: VoucherApprover::Ed,
        finance: None,
        ed: Some(ed),
        events: vec![event],
    })
}

/// Applies a transition to an in-memory voucher.
pub fn apply(voucher: &mut Voucher, transition: &VoucherTransition) {
    if let Some(finance) = &transition.finance {
        voucher.finance = finance.clone();
    }
    if let Some(ed) = &transition.ed {
        voucher.ed = ed.clone();
    }
}
