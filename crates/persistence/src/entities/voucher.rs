//! Voucher and voucher message entities (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::{Voucher, VoucherMessage, VoucherStage};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use super::{StageStatusDb, VoucherTypeDb};

/// Database row mapping for the vouchers table.
#[derive(Debug, Clone, FromRow)]
pub struct VoucherEntity {
    pub id: Uuid,
    pub request_id: Option<Uuid>,
    pub voucher_type: VoucherTypeDb,
    pub pv_no: String,
    pub voucher_date: NaiveDate,
    pub activity: Option<String>,
    pub payee_name: String,
    pub budget_code: Option<String>,
    pub particulars: Option<String>,
    pub amount: Decimal,
    pub total: Decimal,
    pub amount_words: String,
    pub prepared_by: Uuid,
    pub finance_status: StageStatusDb,
    pub finance_remark: Option<String>,
    pub finance_approved_at: Option<DateTime<Utc>>,
    pub ed_status: StageStatusDb,
    pub ed_remark: Option<String>,
    pub ed_approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<VoucherEntity> for Voucher {
    fn from(entity: VoucherEntity) -> Self {
        Self {
            id: entity.id,
            request_id: entity.request_id,
            voucher_type: entity.voucher_type.into(),
            pv_no: entity.pv_no,
            date: entity.voucher_date,
            activity: entity.activity,
            payee_name: entity.payee_name,
            budget_code: entity.budget_code,
            particulars: entity.particulars,
            amount: entity.amount,
            total: entity.total,
            amount_words: entity.amount_words,
            prepared_by: entity.prepared_by,
            finance: VoucherStage {
                status: entity.finance_status.into(),
                remark: entity.finance_remark,
                decided_at: entity.finance_approved_at,
            },
            ed: VoucherStage {
                status: entity.ed_status.into(),
                remark: entity.ed_remark,
                decided_at: entity.ed_approved_at,
            },
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the voucher_messages table.
#[derive(Debug, Clone, FromRow)]
pub struct VoucherMessageEntity {
    pub id: Uuid,
    pub voucher_id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<VoucherMessageEntity> for VoucherMessage {
    fn from(entity: VoucherMessageEntity) -> Self {
        Self {
            id: entity.id,
            voucher_id: entity.voucher_id,
            sender_id: entity.sender_id,
            recipient_id: entity.recipient_id,
            message: entity.message,
            is_read: entity.is_read,
            created_at: entity.created_at,
        }
    }
}
