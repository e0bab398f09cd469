//! Request submission, listing and decisions.

use chrono::Utc;
use domain::models::{
    Actor, AggregateStatus, CreateRequestInput, Decision, LeaveBalance, LeaveBalanceLog, Request,
    StageSet,
};
use domain::services::{candidate_scope, plan_decision, visibility, CandidateScope, RequestTransition};
use persistence::repositories::{NewRequestRow, RequestRepository, UserRepository};
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::error::WorkflowError;
use crate::handlers::{LeaveLedger, Notifier};
use crate::metrics::record_decision;

#[derive(Clone)]
pub struct RequestService {
    pool: PgPool,
    requests: RequestRepository,
    users: UserRepository,
    ledger: LeaveLedger,
    notifier: Notifier,
}

impl RequestService {
    pub fn new(
        pool: PgPool,
        requests: RequestRepository,
        users: UserRepository,
        ledger: LeaveLedger,
        notifier: Notifier,
    ) -> Self {
        Self {
            pool,
            requests,
            users,
            ledger,
            notifier,
        }
    }

    /// Submit a request for `user_id`. Every stage on the type's chain starts
    /// pending; stages the type skips are left empty.
    #[instrument(skip(self, input), fields(request_type = %input.request_type))]
    pub async fn create_request(
        &self,
        user_id: Uuid,
        input: CreateRequestInput,
    ) -> Result<Uuid, WorkflowError> {
        input.validate()?;
        input.validate_details()?;

        match self.users.find_by_id(user_id).await? {
            Some(user) if user.is_active => {}
            _ => return Err(WorkflowError::not_found("Active user", user_id)),
        }

        let stages = StageSet::for_type(&input.request_type);
        let id = self
            .requests
            .create(NewRequestRow {
                user_id,
                request_type: input.request_type.as_str(),
                title: input.title.trim(),
                description: input.description.as_deref(),
                amount: input.amount,
                attachment_path: input.attachment_path.as_deref(),
                details: &input.details,
                stages: &stages,
            })
            .await?;

        info!(request_id = %id, user_id = %user_id, "Request created");
        Ok(id)
    }

    pub async fn get_request(&self, id: Uuid) -> Result<Request, WorkflowError> {
        self.requests
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| WorkflowError::not_found("Request", id))
    }

    /// Requests the actor must act on next, newest first. Employees see their
    /// own requests, Admin sees all, unknown roles see nothing.
    pub async fn list_requests_for_role(&self, actor: &Actor) -> Result<Vec<Request>, WorkflowError> {
        let candidates = match candidate_scope(actor) {
            CandidateScope::Owner(user_id) => self.requests.list_for_owner(user_id).await?,
            CandidateScope::All => self.requests.list_all().await?,
            CandidateScope::Pending => {
                self.requests
                    .list_by_status(AggregateStatus::Pending.id())
                    .await?
            }
            CandidateScope::Nothing => return Ok(Vec::new()),
        };

        Ok(visibility::resolve(
            actor,
            candidates.into_iter().map(Request::from),
        ))
    }

    /// Record `actor`'s decision on its stage of a request.
    ///
    /// The stage write, the re-derived aggregate status and any leave
    /// deduction commit together. Owner notifications are sent after commit.
    #[instrument(skip(self, actor, remark), fields(user_id = %actor.user_id, role_id = actor.role_id))]
    pub async fn decide_request(
        &self,
        actor: &Actor,
        request_id: Uuid,
        decision: Decision,
        remark: Option<&str>,
    ) -> Result<RequestTransition, WorkflowError> {
        let mut tx = self.pool.begin().await?;

        let request: Request = self
            .requests
            .lock_for_update(&mut *tx, request_id)
            .await?
            .map(Into::into)
            .ok_or_else(|| WorkflowError::not_found("Request", request_id))?;

        let transition = plan_decision(actor, &request, decision, remark, Utc::now())?;

        self.requests
            .write_decision(
                &mut *tx,
                request_id,
                transition.stage,
                &transition.stage_state,
                transition.status.id(),
            )
            .await?;

        for event in &transition.events {
            self.ledger.apply(&mut *tx, event).await?;
        }

        tx.commit().await?;

        info!(
            request_id = %request_id,
            stage = %transition.stage,
            decision = %decision,
            status = %transition.status,
            "Request decision recorded"
        );
        record_decision("request", transition.stage.to_string(), decision.to_string());

        self.notifier.on_request_events(&transition.events).await;
        Ok(transition)
    }

    /// Lookup table of aggregate statuses as `(status_id, name)`.
    pub async fn list_request_statuses(&self) -> Result<Vec<(i16, String)>, WorkflowError> {
        Ok(self
            .requests
            .list_statuses()
            .await?
            .into_iter()
            .map(|row| (row.id, row.status_name))
            .collect())
    }

    pub async fn leave_balance(
        &self,
        user_id: Uuid,
        year: i32,
    ) -> Result<Option<LeaveBalance>, WorkflowError> {
        self.ledger.balance(user_id, year).await
    }

    pub async fn leave_history(
        &self,
        user_id: Uuid,
        year: i32,
    ) -> Result<Vec<LeaveBalanceLog>, WorkflowError> {
        self.ledger.history(user_id, year).await
    }
}
