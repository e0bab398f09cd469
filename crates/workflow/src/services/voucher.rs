//! Voucher preparation and the Finance/ED decisions.

use chrono::Utc;
use domain::models::{
    Actor, AggregateStatus, CreateVoucherInput, Decision, Request, Role, Voucher,
};
use domain::services::{
    plan_ed_decision, plan_finance_decision, visibility, voucher_transition, VoucherApprover,
    VoucherTransition,
};
use domain::DomainError;
use persistence::entities::StageStatusDb;
use persistence::repositories::{NewVoucherRow, RequestRepository, VoucherRepository};
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::error::WorkflowError;
use crate::handlers::{Messenger, Notifier};
use crate::metrics::record_decision;

#[derive(Clone)]
pub struct VoucherService {
    pool: PgPool,
    vouchers: VoucherRepository,
    requests: RequestRepository,
    notifier: Notifier,
    messenger: Messenger,
}

impl VoucherService {
    pub fn new(
        pool: PgPool,
        vouchers: VoucherRepository,
        requests: RequestRepository,
        notifier: Notifier,
        messenger: Messenger,
    ) -> Self {
        Self {
            pool,
            vouchers,
            requests,
            notifier,
            messenger,
        }
    }

    /// Prepare a voucher. Only Finance prepares vouchers; a linked request
    /// must exist and be approved. Both approvers start pending.
    #[instrument(skip(self, actor, input), fields(user_id = %actor.user_id, pv_no = %input.pv_no))]
    pub async fn create_voucher(
        &self,
        actor: &Actor,
        input: CreateVoucherInput,
    ) -> Result<Voucher, WorkflowError> {
        if !actor.has_role(Role::Finance) {
            return Err(DomainError::Forbidden("only Finance may prepare vouchers".into()).into());
        }
        input.validate()?;

        if let Some(request_id) = input.request_id {
            let request: Request = self
                .requests
                .find_by_id(request_id)
                .await?
                .map(Into::into)
                .ok_or_else(|| WorkflowError::not_found("Request", request_id))?;
            if request.status != AggregateStatus::Approved {
                return Err(DomainError::Validation(format!(
                    "linked request {request_id} is {} and cannot be paid yet",
                    request.status
                ))
                .into());
            }
        }

        let total = input.resolved_total();
        let amount_words = input.resolved_amount_words()?;
        let voucher: Voucher = self
            .vouchers
            .create(NewVoucherRow {
                request_id: input.request_id,
                voucher_type: input.voucher_type,
                pv_no: input.pv_no.trim(),
                date: input.date,
                activity: input.activity.as_deref(),
                payee_name: input.payee_name.trim(),
                budget_code: input.budget_code.as_deref(),
                particulars: input.particulars.as_deref(),
                amount: input.amount,
                total,
                amount_words: &amount_words,
                prepared_by: actor.user_id,
            })
            .await?
            .into();

        info!(voucher_id = %voucher.id, voucher_type = %voucher.voucher_type, "Voucher prepared");
        Ok(voucher)
    }

    pub async fn get_voucher(&self, id: Uuid) -> Result<Voucher, WorkflowError> {
        self.vouchers
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| WorkflowError::not_found("Voucher", id))
    }

    /// Vouchers awaiting the actor's decision, newest first.
    pub async fn list_vouchers_for_role(&self, actor: &Actor) -> Result<Vec<Voucher>, WorkflowError> {
        let candidates = match actor.role() {
            Some(Role::Finance) => {
                self.vouchers
                    .list_by_finance_status(StageStatusDb::Pending)
                    .await?
            }
            Some(Role::ExecutiveDirector) => {
                self.vouchers
                    .list_by_finance_status(StageStatusDb::Approved)
                    .await?
            }
            Some(Role::Admin) => self.vouchers.list_all().await?,
            _ => return Ok(Vec::new()),
        };

        Ok(visibility::resolve_vouchers(
            actor,
            candidates.into_iter().map(Voucher::from),
        ))
    }

    /// Record Finance's decision. A rejection reopens ED's decision in the
    /// same write.
    #[instrument(skip(self, actor, remark), fields(user_id = %actor.user_id))]
    pub async fn decide_voucher_finance(
        &self,
        actor: &Actor,
        voucher_id: Uuid,
        decision: Decision,
        remark: Option<&str>,
    ) -> Result<Voucher, WorkflowError> {
        self.decide(voucher_id, decision, |voucher| {
            plan_finance_decision(actor, voucher, decision, remark, Utc::now())
        })
        .await
    }

    /// Record the Executive Director's decision on a Finance-approved voucher.
    #[instrument(skip(self, actor, remark), fields(user_id = %actor.user_id))]
    pub async fn decide_voucher_ed(
        &self,
        actor: &Actor,
        voucher_id: Uuid,
        decision: Decision,
        remark: Option<&str>,
    ) -> Result<Voucher, WorkflowError> {
        self.decide(voucher_id, decision, |voucher| {
            plan_ed_decision(actor, voucher, decision, remark, Utc::now())
        })
        .await
    }

    async fn decide<F>(
        &self,
        voucher_id: Uuid,
        decision: Decision,
        plan: F,
    ) -> Result<Voucher, WorkflowError>
    where
        F: FnOnce(&Voucher) -> Result<VoucherTransition, DomainError>,
    {
        let mut tx = self.pool.begin().await?;

        let mut voucher: Voucher = self
            .vouchers
            .lock_for_update(&mut *tx, voucher_id)
            .await?
            .map(Into::into)
            .ok_or_else(|| WorkflowError::not_found("Voucher", voucher_id))?;

        let transition = plan(&voucher)?;
        voucher_transition::apply(&mut voucher, &transition);

        let voucher: Voucher = self
            .vouchers
            .write_stages(&mut *tx, voucher_id, &voucher.finance, &voucher.ed)
            .await?
            .into();

        tx.commit().await?;

        let ed_reopened = transition.approver == VoucherApprover::Finance && transition.ed.is_some();
        info!(
            voucher_id = %voucher_id,
            approver = %transition.approver,
            decision = %decision,
            ed_reopened,
            "Voucher decision recorded"
        );
        record_decision("voucher", transition.approver.to_string(), decision.to_string());

        self.notifier.on_voucher_events(&transition.events).await;
        self.messenger.on_voucher_events(&transition.events).await;
        Ok(voucher)
    }
}
