//! Request entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{
    derive_status, AggregateStatus, Request, RequestType, Stage, StageSet, StageState,
};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use super::StageStatusDb;

/// Database row mapping for the requests table, joined with the owner's department.
#[derive(Debug, Clone, FromRow)]
pub struct RequestEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub request_type: String,
    pub title: String,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub attachment_path: Option<String>,
    pub details: serde_json::Value,
    pub status_id: i16,
    pub hod_status: Option<StageStatusDb>,
    pub hod_remark: Option<String>,
    pub hod_approved_at: Option<DateTime<Utc>>,
    pub hrm_status: Option<StageStatusDb>,
    pub hrm_remark: Option<String>,
    pub hrm_approved_at: Option<DateTime<Utc>>,
    pub auditor_status: Option<StageStatusDb>,
    pub auditor_remark: Option<String>,
    pub auditor_approved_at: Option<DateTime<Utc>>,
    pub finance_status: Option<StageStatusDb>,
    pub finance_remark: Option<String>,
    pub finance_approved_at: Option<DateTime<Utc>>,
    pub ed_status: Option<StageStatusDb>,
    pub ed_remark: Option<String>,
    pub ed_approved_at: Option<DateTime<Utc>>,
    pub owner_department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn stage_state(
    status: Option<StageStatusDb>,
    remark: Option<String>,
    decided_at: Option<DateTime<Utc>>,
) -> Option<StageState> {
    status.map(|status| StageState {
        status: status.into(),
        remark,
        decided_at,
    })
}

impl From<RequestEntity> for Request {
    fn from(entity: RequestEntity) -> Self {
        let mut stages = StageSet::default();
        stages.set(
            Stage::Hod,
            stage_state(entity.hod_status, entity.hod_remark, entity.hod_approved_at),
        );
        stages.set(
            Stage::Hrm,
            stage_state(entity.hrm_status, entity.hrm_remark, entity.hrm_approved_at),
        );
        stages.set(
            Stage::Auditor,
            stage_state(
                entity.auditor_status,
                entity.auditor_remark,
                entity.auditor_approved_at,
            ),
        );
        stages.set(
            Stage::Finance,
            stage_state(
                entity.finance_status,
                entity.finance_remark,
                entity.finance_approved_at,
            ),
        );
        stages.set(
            Stage::Ed,
            stage_state(entity.ed_status, entity.ed_remark, entity.ed_approved_at),
        );

        // An unknown status id falls back to stage truth.
        let status =
            AggregateStatus::from_id(entity.status_id).unwrap_or_else(|| derive_status(&stages));

        Self {
            id: entity.id,
            user_id: entity.user_id,
            request_type: RequestType::from(entity.request_type),
            title: entity.title,
            description: entity.description,
            amount: entity.amount,
            attachment_path: entity.attachment_path,
            details: entity.details,
            status,
            stages,
            owner_department: entity.owner_department,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Row of the request_statuses lookup table.
#[derive(Debug, Clone, FromRow)]
pub struct RequestStatusEntity {
    pub id: i16,
    pub status_name: String,
}
