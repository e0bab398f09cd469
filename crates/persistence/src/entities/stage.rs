//! Postgres enums shared by request and voucher rows.

use domain::models::{StageStatus, VoucherType};

/// Database enum for a stage decision (`stage_status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "stage_status", rename_all = "lowercase")]
pub enum StageStatusDb {
    Pending,
    Approved,
    Rejected,
}

impl From<StageStatusDb> for StageStatus {
    fn from(status: StageStatusDb) -> Self {
        match status {
            StageStatusDb::Pending => StageStatus::Pending,
            StageStatusDb::Approved => StageStatus::Approved,
            StageStatusDb::Rejected => StageStatus::Rejected,
        }
    }
}

impl From<StageStatus> for StageStatusDb {
    fn from(status: StageStatus) -> Self {
        match status {
            StageStatus::Pending => StageStatusDb::Pending,
            StageStatus::Approved => StageStatusDb::Approved,
            StageStatus::Rejected => StageStatusDb::Rejected,
        }
    }
}

/// Database enum for the voucher kind (`voucher_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "voucher_type", rename_all = "snake_case")]
pub enum VoucherTypeDb {
    Payment,
    PettyCash,
}

impl From<VoucherTypeDb> for VoucherType {
    fn from(kind: VoucherTypeDb) -> Self {
        match kind {
            VoucherTypeDb::Payment => VoucherType::Payment,
            VoucherTypeDb::PettyCash => VoucherType::PettyCash,
        }
    }
}

impl From<VoucherType> for VoucherTypeDb {
    fn from(kind: VoucherType) -> Self {
        match kind {
            VoucherType::Payment => VoucherTypeDb::Payment,
            VoucherType::PettyCash => VoucherTypeDb::PettyCash,
        }
    }
}
