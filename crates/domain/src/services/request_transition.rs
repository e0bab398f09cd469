//! Request status transitions.
//!
//! [`plan_decision`] validates a decision against the request's current state
//! and returns the new stage value, the re-derived aggregate status and the
//! events the decision produces. Nothing is written here; the service layer
//! persists the plan inside one transaction.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::DomainError;
use crate::models::{derive_status, Actor, AggregateStatus, Decision, Request, Stage, StageState};
use crate::services::events::RequestEvent;

/// Outcome of a validated request decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTransition {
    pub request_id: Uuid,
    pub stage: Stage,
    pub stage_state: StageState,
    pub previous_status: AggregateStatus,
    pub status: AggregateStatus,
    pub events: Vec<RequestEvent>,
}

impl RequestTransition {
    /// The decision moved the request into its final approved state.
    pub fn is_final_approval(&self) -> bool {
        self.status == AggregateStatus::Approved && self.previous_status != AggregateStatus::Approved
    }
}

/// Trims a remark, treating blank text as no remark.
pub fn normalize_remark(remark: Option<&str>) -> Option<String> {
    remark
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
}

/// Plans the effect of `actor` deciding on `request`.
///
/// Fails with [`DomainError::InvalidActor`] when the actor's role has no
/// stage, [`DomainError::StageNotApplicable`] when the request type skips the
/// stage, and [`DomainError::RequestClosed`] once the request has left
/// Pending. Approved and Rejected are terminal. While the request is still
/// Pending a stage may be decided again and the later decision wins.
pub fn plan_decision(
    actor: &Actor,
    request: &Request,
    decision: Decision,
    remark: Option<&str>,
    now: DateTime<Utc>,
) -> Result<RequestTransition, DomainError> {
    let stage = actor
        .role()
        .and_then(|role| role.stage())
        .ok_or(DomainError::InvalidActor(actor.role_id))?;

    if request.stages.get(stage).is_none() {
        return Err(DomainError::StageNotApplicable {
            stage,
            request_type: request.request_type.clone(),
        });
    }

    if request.status != AggregateStatus::Pending {
        return Err(DomainError::RequestClosed(request.status.name().to_string()));
    }

    let remark = normalize_remark(remark);
    let stage_state = StageState {
        status: decision.into(),
        remark: remark.clone(),
        decided_at: Some(now),
    };

    let mut stages = request.stages.clone();
    stages.set(stage, Some(stage_state.clone()));
    let status = derive_status(&stages);
    let decided_by_role = stage.role();

    let mut events = vec![RequestEvent::Decided {
        request_id: request.id,
        stage,
        decision,
        decided_by: actor.user_id,
    }];

    match decision {
        Decision::Rejected => events.push(RequestEvent::Rejected {
            request_id: request.id,
            owner_id: request.user_id,
            request_type: request.request_type.clone(),
            title: request.title.clone(),
            stage,
            decided_by_role,
            remark,
        }),
        Decision::Approved if stage.is_final() && status == AggregateStatus::Approved => {
            events.push(RequestEvent::FinalApproved {
                request_id: request.id,
                owner_id: request.user_id,
                request_type: request.request_type.clone(),
                title: request.title.clone(),
                days_applied: request.days_applied(),
                decided_by_role,
                remark,
                decided_at: now,
            })
        }
        Decision::Approved => {}
    }

    Ok(RequestTransition {
        request_id: request.id,
        stage,
        stage_state,
        previous_status: request.status,
        status,
        events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RequestType, Role, StageSet, StageStatus};
    use serde_json::json;

    fn request(kind: RequestType) -> Request {
        let now = Utc::now();
        Request {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            stages: StageSet::for_type(&kind),
            request_type: kind,
            title: "Leave in December".to_string(),
            description: None,
            amount: None,
            attachment_path: None,
            details: json!({"days_applied": 5}),
            status: AggregateStatus::Pending,
            owner_department: Some("Membership".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    fn actor(role: Role) -> Actor {
        Actor::new(Uuid::new_v4(), role.id()).with_department("Membership")
    }

    /// Applies a plan to the in-memory request the way the store would.
    fn apply(request: &mut Request, plan: &RequestTransition) {
        request.stages.set(plan.stage, Some(plan.stage_state.clone()));
        request.status = plan.status;
    }

    fn decide(request: &mut Request, role: Role, decision: Decision) -> RequestTransition {
        let plan = plan_decision(&actor(role), request, decision, Some("ok"), Utc::now())
            .expect("decision should be accepted");
        apply(request, &plan);
        plan
    }

    fn has_final_approval(plan: &RequestTransition) -> bool {
        plan.events
            .iter()
            .any(|e| matches!(e, RequestEvent::FinalApproved { .. }))
    }

    #[test]
    fn test_unknown_and_non_approving_roles_are_invalid_actors() {
        let req = request(RequestType::Imprest);
        for role_id in [Role::Employee.id(), Role::Admin.id(), 0, 42] {
            let actor = Actor::new(Uuid::new_v4(), role_id);
            assert_eq!(
                plan_decision(&actor, &req, Decision::Approved, None, Utc::now()),
                Err(DomainError::InvalidActor(role_id))
            );
        }
    }

    #[test]
    fn test_skipped_stage_is_not_applicable() {
        let req = request(RequestType::SalaryAdvance);
        let err = plan_decision(&actor(Role::Hod), &req, Decision::Approved, None, Utc::now())
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::StageNotApplicable {
                stage: Stage::Hod,
                request_type: RequestType::SalaryAdvance,
            }
        );
    }

    #[test]
    fn test_intermediate_approval_keeps_pending_without_notification() {
        let mut req = request(RequestType::Imprest);
        let plan = decide(&mut req, Role::Hod, Decision::Approved);
        assert_eq!(plan.status, AggregateStatus::Pending);
        assert_eq!(plan.stage, Stage::Hod);
        assert_eq!(plan.stage_state.status, StageStatus::Approved);
        assert_eq!(plan.stage_state.remark.as_deref(), Some("ok"));
        assert!(plan.stage_state.decided_at.is_some());
        assert_eq!(plan.events.len(), 1);
        assert!(plan.events[0].owner_notification().is_none());
    }

    #[test]
    fn test_rejection_short_circuits_at_any_stage() {
        for stage_role in [
            Role::Hod,
            Role::Hrm,
            Role::InternalAuditor,
            Role::Finance,
            Role::ExecutiveDirector,
        ] {
            let mut req = request(RequestType::Reimbursement);
            for role in [
                Role::Hod,
                Role::Hrm,
                Role::InternalAuditor,
                Role::Finance,
                Role::ExecutiveDirector,
            ] {
                if role == stage_role {
                    let plan = decide(&mut req, role, Decision::Rejected);
                    assert_eq!(plan.status, AggregateStatus::Rejected);
                    let rejected = plan
                        .events
                        .iter()
                        .find_map(|e| e.owner_notification())
                        .expect("rejection notifies the owner");
                    assert_eq!(rejected.user_id, req.user_id);
                    break;
                }
                decide(&mut req, role, Decision::Approved);
            }
            assert_eq!(req.status, AggregateStatus::Rejected);
        }
    }

    #[test]
    fn test_ed_approval_is_final() {
        let mut req = request(RequestType::AnnualLeave);
        for role in [Role::Hod, Role::Hrm, Role::InternalAuditor, Role::Finance] {
            let plan = decide(&mut req, role, Decision::Approved);
            assert!(!has_final_approval(&plan));
        }
        let plan = decide(&mut req, Role::ExecutiveDirector, Decision::Approved);
        assert_eq!(plan.status, AggregateStatus::Approved);
        assert!(plan.is_final_approval());

        let final_event = plan
            .events
            .iter()
            .find(|e| matches!(e, RequestEvent::FinalApproved { .. }))
            .unwrap();
        match final_event {
            RequestEvent::FinalApproved {
                days_applied,
                decided_by_role,
                request_type,
                ..
            } => {
                assert_eq!(*days_applied, Some(5));
                assert_eq!(*decided_by_role, Role::ExecutiveDirector);
                assert_eq!(*request_type, RequestType::AnnualLeave);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_approved_request_refuses_repeated_ed_approval() {
        let mut req = request(RequestType::Retirement);
        decide(&mut req, Role::Finance, Decision::Approved);
        let first = decide(&mut req, Role::ExecutiveDirector, Decision::Approved);
        assert!(has_final_approval(&first));

        let err = plan_decision(
            &actor(Role::ExecutiveDirector),
            &req,
            Decision::Approved,
            None,
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, DomainError::RequestClosed("Approved".to_string()));
    }

    #[test]
    fn test_closed_request_refuses_undecided_stages() {
        let mut req = request(RequestType::Imprest);
        decide(&mut req, Role::Hod, Decision::Rejected);

        let err = plan_decision(&actor(Role::Hrm), &req, Decision::Approved, None, Utc::now())
            .unwrap_err();
        assert_eq!(err, DomainError::RequestClosed("Rejected".to_string()));
    }

    #[test]
    fn test_rejecting_stage_cannot_reopen_request() {
        let mut req = request(RequestType::Imprest);
        decide(&mut req, Role::Hod, Decision::Approved);
        decide(&mut req, Role::Hrm, Decision::Rejected);

        let err = plan_decision(&actor(Role::Hrm), &req, Decision::Approved, None, Utc::now())
            .unwrap_err();
        assert_eq!(err, DomainError::RequestClosed("Rejected".to_string()));
        assert_eq!(req.status, AggregateStatus::Rejected);
        assert_eq!(req.stages.status(Stage::Hrm), Some(StageStatus::Rejected));
    }

    #[test]
    fn test_earlier_stage_cannot_reverse_final_approval() {
        let mut req = request(RequestType::AnnualLeave);
        for role in [
            Role::Hod,
            Role::Hrm,
            Role::InternalAuditor,
            Role::Finance,
            Role::ExecutiveDirector,
        ] {
            decide(&mut req, role, Decision::Approved);
        }
        assert_eq!(req.status, AggregateStatus::Approved);

        for decision in [Decision::Rejected, Decision::Approved] {
            let err = plan_decision(&actor(Role::Hod), &req, decision, None, Utc::now())
                .unwrap_err();
            assert_eq!(err, DomainError::RequestClosed("Approved".to_string()));
        }
    }

    #[test]
    fn test_only_ed_stage_emits_final_approval() {
        let mut req = request(RequestType::Imprest);
        for role in [Role::Hod, Role::Hrm, Role::InternalAuditor, Role::Finance] {
            let plan = decide(&mut req, role, Decision::Approved);
            assert!(!has_final_approval(&plan));
            assert!(!plan.is_final_approval());
        }
        let plan = decide(&mut req, Role::ExecutiveDirector, Decision::Approved);
        let decided_by = plan.events.iter().find_map(|e| match e {
            RequestEvent::FinalApproved {
                decided_by_role, ..
            } => Some(*decided_by_role),
            _ => None,
        });
        assert_eq!(decided_by, Some(Role::ExecutiveDirector));
    }

    #[test]
    fn test_committed_stage_can_be_overwritten() {
        let mut req = request(RequestType::Imprest);
        decide(&mut req, Role::Hod, Decision::Approved);
        let plan = decide(&mut req, Role::Hod, Decision::Rejected);
        assert_eq!(plan.status, AggregateStatus::Rejected);
        assert_eq!(req.stages.status(Stage::Hod), Some(StageStatus::Rejected));
    }

    #[test]
    fn test_status_is_approved_iff_ed_approved() {
        let mut req = request(RequestType::SalaryAdvance);
        decide(&mut req, Role::Hrm, Decision::Approved);
        decide(&mut req, Role::Finance, Decision::Approved);
        assert_eq!(req.status, AggregateStatus::Pending);
        assert!(!req.stages.is(Stage::Ed, StageStatus::Approved));

        decide(&mut req, Role::ExecutiveDirector, Decision::Approved);
        assert_eq!(req.status, AggregateStatus::Approved);
        assert!(req.stages.is(Stage::Ed, StageStatus::Approved));
    }

    #[test]
    fn test_blank_remark_is_dropped() {
        assert_eq!(normalize_remark(Some("  ")), None);
        assert_eq!(normalize_remark(None), None);
        assert_eq!(
            normalize_remark(Some(" Looks fine ")),
            Some("Looks fine".to_string())
        );
    }
}
