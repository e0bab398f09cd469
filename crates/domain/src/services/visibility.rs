//! Request and voucher visibility: which items a role must act on next.
//!
//! These predicates encode the approval-chain topology. Repositories fetch a
//! coarse candidate set (see [`candidate_scope`]) and the predicates decide
//! whose turn it is.

use uuid::Uuid;

use crate::models::{
    Actor, AggregateStatus, Request, RequestType, Role, Stage, StageStatus, Voucher,
};

/// Coarse pre-filter a store can apply before the predicates run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateScope {
    /// Requests owned by this user, any status.
    Owner(Uuid),
    /// Every request.
    All,
    /// Requests whose aggregate status is still Pending.
    Pending,
    /// Nothing is visible.
    Nothing,
}

/// Pre-filter for the actor's role.
pub fn candidate_scope(actor: &Actor) -> CandidateScope {
    match actor.role() {
        Some(Role::Employee) => CandidateScope::Owner(actor.user_id),
        Some(Role::Admin) => CandidateScope::All,
        Some(_) => CandidateScope::Pending,
        None => CandidateScope::Nothing,
    }
}

/// Whether the request is listed for the actor.
pub fn is_actionable(actor: &Actor, request: &Request) -> bool {
    let Some(role) = actor.role() else {
        return false;
    };

    // A decided request never waits on a later stage.
    let open = request.status == AggregateStatus::Pending;
    let stages = &request.stages;
    let kind = &request.request_type;
    match role {
        Role::Employee => request.user_id == actor.user_id,
        Role::Admin => true,
        Role::Hod => {
            open && same_department(actor, request)
                && stages.is(Stage::Hod, StageStatus::Pending)
                && !kind.is_fast_tracked()
        }
        Role::Hrm => {
            open && stages.is(Stage::Hrm, StageStatus::Pending)
                && *kind != RequestType::Retirement
                && matches!(stages.status(Stage::Hod), None | Some(StageStatus::Approved))
        }
        Role::InternalAuditor => {
            open && stages.is(Stage::Auditor, StageStatus::Pending)
                && stages.is(Stage::Hrm, StageStatus::Approved)
                && !kind.is_fast_tracked()
        }
        Role::Finance => {
            open && stages.is(Stage::Finance, StageStatus::Pending)
                && (kind.is_fast_tracked() || stages.is(Stage::Auditor, StageStatus::Approved))
        }
        Role::ExecutiveDirector => {
            open && stages.is(Stage::Ed, StageStatus::Pending)
                && stages.is(Stage::Finance, StageStatus::Approved)
        }
    }
}

fn same_department(actor: &Actor, request: &Request) -> bool {
    match (actor.department.as_deref(), request.owner_department.as_deref()) {
        (Some(mine), Some(theirs)) => !mine.trim().is_empty() && mine.trim() == theirs.trim(),
        _ => false,
    }
}

/// Filters candidates down to the actor's actionable requests, newest first.
pub fn resolve(actor: &Actor, candidates: impl IntoIterator<Item = Request>) -> Vec<Request> {
    let mut visible: Vec<Request> = candidates
        .into_iter()
        .filter(|request| is_actionable(actor, request))
        .collect();
    visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    visible
}

/// Whether the voucher is listed for the actor.
///
/// Finance sees vouchers awaiting its decision, ED those Finance approved and
/// ED has not decided, Admin everything.
pub fn is_voucher_actionable(actor: &Actor, voucher: &Voucher) -> bool {
    match actor.role() {
        Some(Role::Finance) => voucher.finance.status == StageStatus::Pending,
        Some(Role::ExecutiveDirector) => {
            voucher.finance.status == StageStatus::Approved
                && voucher.ed.status == StageStatus::Pending
        }
        Some(Role::Admin) => true,
        _ => false,
    }
}

/// Filters vouchers down to the actor's actionable ones, newest first.
pub fn resolve_vouchers(actor: &Actor, candidates: impl IntoIterator<Item = Voucher>) -> Vec<Voucher> {
    let mut visible: Vec<Voucher> = candidates
        .into_iter()
        .filter(|voucher| is_voucher_actionable(actor, voucher))
        .collect();
    visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StageSet, StageState, VoucherStage, VoucherType};
    use chrono::{Duration, NaiveDate, Utc};
    use rust_decimal::Decimal;

    const DEPT: &str = "Trade Promotion";

    fn request(kind: RequestType) -> Request {
        let now = Utc::now();
        Request {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            stages: StageSet::for_type(&kind),
            request_type: kind,
            title: "Request".to_string(),
            description: None,
            amount: None,
            attachment_path: None,
            details: serde_json::Value::Null,
            status: AggregateStatus::Pending,
            owner_department: Some(DEPT.to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    fn mark(request: &mut Request, stage: Stage, status: StageStatus) {
        request.stages.set(
            stage,
            Some(StageState {
                status,
                remark: None,
                decided_at: Some(Utc::now()),
            }),
        );
    }

    fn actor(role: Role) -> Actor {
        Actor::new(Uuid::new_v4(), role.id()).with_department(DEPT)
    }

    fn roles_seeing(request: &Request) -> Vec<Role> {
        [
            Role::Hod,
            Role::Hrm,
            Role::InternalAuditor,
            Role::Finance,
            Role::ExecutiveDirector,
        ]
        .into_iter()
        .filter(|role| is_actionable(&actor(*role), request))
        .collect()
    }

    #[test]
    fn test_full_chain_hands_over_stage_by_stage() {
        let mut req = request(RequestType::Imprest);
        assert_eq!(roles_seeing(&req), vec![Role::Hod]);

        mark(&mut req, Stage::Hod, StageStatus::Approved);
        assert_eq!(roles_seeing(&req), vec![Role::Hrm]);

        mark(&mut req, Stage::Hrm, StageStatus::Approved);
        assert_eq!(roles_seeing(&req), vec![Role::InternalAuditor]);

        mark(&mut req, Stage::Auditor, StageStatus::Approved);
        assert_eq!(roles_seeing(&req), vec![Role::Finance]);

        mark(&mut req, Stage::Finance, StageStatus::Approved);
        assert_eq!(roles_seeing(&req), vec![Role::ExecutiveDirector]);

        mark(&mut req, Stage::Ed, StageStatus::Approved);
        req.status = AggregateStatus::Approved;
        assert!(roles_seeing(&req).is_empty());
    }

    #[test]
    fn test_hod_requires_same_department() {
        let req = request(RequestType::AnnualLeave);
        assert!(is_actionable(&actor(Role::Hod), &req));

        let other = Actor::new(Uuid::new_v4(), Role::Hod.id()).with_department("Finance");
        assert!(!is_actionable(&other, &req));

        let no_dept = Actor::new(Uuid::new_v4(), Role::Hod.id());
        assert!(!is_actionable(&no_dept, &req));
    }

    #[test]
    fn test_salary_advance_skips_hod_and_auditor() {
        let mut req = request(RequestType::SalaryAdvance);
        // HRM and Finance may both act straight away.
        assert_eq!(roles_seeing(&req), vec![Role::Hrm, Role::Finance]);

        mark(&mut req, Stage::Hrm, StageStatus::Approved);
        assert_eq!(roles_seeing(&req), vec![Role::Finance]);
    }

    #[test]
    fn test_retirement_goes_straight_to_finance() {
        let mut req = request(RequestType::Retirement);
        assert_eq!(roles_seeing(&req), vec![Role::Finance]);

        mark(&mut req, Stage::Finance, StageStatus::Approved);
        assert_eq!(roles_seeing(&req), vec![Role::ExecutiveDirector]);
    }

    #[test]
    fn test_fast_tracked_types_never_listed_for_skipped_roles() {
        for kind in [RequestType::SalaryAdvance, RequestType::Retirement] {
            let mut req = request(kind.clone());
            // Even with stale pending values the type filter excludes them.
            mark(&mut req, Stage::Hod, StageStatus::Pending);
            mark(&mut req, Stage::Auditor, StageStatus::Pending);
            mark(&mut req, Stage::Hrm, StageStatus::Approved);
            assert!(!is_actionable(&actor(Role::Hod), &req));
            assert!(!is_actionable(&actor(Role::InternalAuditor), &req));
        }
        let mut retirement = request(RequestType::Retirement);
        mark(&mut retirement, Stage::Hrm, StageStatus::Pending);
        assert!(!is_actionable(&actor(Role::Hrm), &retirement));
    }

    #[test]
    fn test_rejection_hides_request_from_later_stages() {
        let mut req = request(RequestType::SalaryAdvance);
        mark(&mut req, Stage::Hrm, StageStatus::Rejected);
        req.status = AggregateStatus::Rejected;
        assert!(roles_seeing(&req).is_empty());

        let mut req = request(RequestType::Reimbursement);
        mark(&mut req, Stage::Hod, StageStatus::Rejected);
        req.status = AggregateStatus::Rejected;
        assert!(roles_seeing(&req).is_empty());
    }

    #[test]
    fn test_employee_sees_own_requests_in_any_status() {
        let mut req = request(RequestType::AnnualLeave);
        req.status = AggregateStatus::Rejected;
        let owner = Actor::new(req.user_id, Role::Employee.id());
        assert!(is_actionable(&owner, &req));
        assert!(!is_actionable(&actor(Role::Employee), &req));
        assert_eq!(candidate_scope(&owner), CandidateScope::Owner(req.user_id));
    }

    #[test]
    fn test_admin_sees_everything_unknown_role_nothing() {
        let mut req = request(RequestType::Imprest);
        req.status = AggregateStatus::Approved;
        assert!(is_actionable(&actor(Role::Admin), &req));

        let stranger = Actor::new(Uuid::new_v4(), 12);
        assert!(!is_actionable(&stranger, &req));
        assert_eq!(candidate_scope(&stranger), CandidateScope::Nothing);
        assert_eq!(candidate_scope(&actor(Role::Admin)), CandidateScope::All);
        assert_eq!(candidate_scope(&actor(Role::Finance)), CandidateScope::Pending);
    }

    #[test]
    fn test_resolve_orders_newest_first_and_is_idempotent() {
        let mut older = request(RequestType::Imprest);
        older.created_at = Utc::now() - Duration::hours(2);
        let newer = request(RequestType::AnnualLeave);
        let hidden = request(RequestType::Retirement);

        let hod = actor(Role::Hod);
        let all = vec![older.clone(), hidden.clone(), newer.clone()];
        let first = resolve(&hod, all.clone());
        assert_eq!(
            first.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![newer.id, older.id]
        );
        let second = resolve(&hod, all);
        assert_eq!(first, second);
    }

    fn voucher(finance: StageStatus, ed: StageStatus) -> Voucher {
        let now = Utc::now();
        Voucher {
            id: Uuid::new_v4(),
            request_id: None,
            voucher_type: VoucherType::Payment,
            pv_no: "PV-1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            activity: None,
            payee_name: "Payee".to_string(),
            budget_code: None,
            particulars: None,
            amount: Decimal::new(1000, 0),
            total: Decimal::new(1000, 0),
            amount_words: "One Thousand Shillings Only".to_string(),
            prepared_by: Uuid::new_v4(),
            finance: VoucherStage {
                status: finance,
                remark: None,
                decided_at: None,
            },
            ed: VoucherStage {
                status: ed,
                remark: None,
                decided_at: None,
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_voucher_visibility_moves_from_finance_to_ed() {
        let finance = actor(Role::Finance);
        let ed = actor(Role::ExecutiveDirector);

        let fresh = voucher(StageStatus::Pending, StageStatus::Pending);
        assert!(is_voucher_actionable(&finance, &fresh));
        assert!(!is_voucher_actionable(&ed, &fresh));

        let ready = voucher(StageStatus::Approved, StageStatus::Pending);
        assert!(!is_voucher_actionable(&finance, &ready));
        assert!(is_voucher_actionable(&ed, &ready));

        let done = voucher(StageStatus::Approved, StageStatus::Approved);
        assert!(!is_voucher_actionable(&ed, &done));
        assert!(is_voucher_actionable(&actor(Role::Admin), &done));
        assert!(!is_voucher_actionable(&actor(Role::Hrm), &fresh));

        let listed = resolve_vouchers(&ed, vec![fresh, ready.clone(), done]);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, ready.id);
    }
}
