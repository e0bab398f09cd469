//! Payment and petty-cash voucher domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::errors::DomainError;
use crate::models::request::StageStatus;
use shared::validation::{validate_amount, validate_not_blank, validate_positive_amount};
use shared::words::amount_in_words;

/// Kind of voucher Finance prepares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherType {
    Payment,
    PettyCash,
}

impl VoucherType {
    /// Label used in notification titles.
    pub fn label(self) -> &'static str {
        match self {
            VoucherType::Payment => "Payment",
            VoucherType::PettyCash => "Petty Cash",
        }
    }
}

impl std::fmt::Display for VoucherType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoucherType::Payment => write!(f, "payment"),
            VoucherType::PettyCash => write!(f, "petty_cash"),
        }
    }
}

/// Decision state of one voucher approver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherStage {
    pub status: StageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
}

impl VoucherStage {
    pub fn pending() -> Self {
        Self {
            status: StageStatus::Pending,
            remark: None,
            decided_at: None,
        }
    }
}

/// A payment or petty-cash voucher, optionally linked to a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    pub id: Uuid,
    pub request_id: Option<Uuid>,
    pub voucher_type: VoucherType,
    pub pv_no: String,
    pub date: NaiveDate,
    pub activity: Option<String>,
    pub payee_name: String,
    pub budget_code: Option<String>,
    pub particulars: Option<String>,
    pub amount: Decimal,
    pub total: Decimal,
    pub amount_words: String,
    /// Finance user who prepared the voucher.
    pub prepared_by: Uuid,
    pub finance: VoucherStage,
    pub ed: VoucherStage,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Voucher {
    /// Both Finance and ED approved.
    pub fn is_fully_approved(&self) -> bool {
        self.finance.status == StageStatus::Approved && self.ed.status == StageStatus::Approved
    }

    pub fn is_standalone(&self) -> bool {
        self.request_id.is_none()
    }
}

/// Input for preparing a new voucher.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateVoucherInput {
    pub request_id: Option<Uuid>,

    pub voucher_type: VoucherType,

    #[validate(length(min = 1, max = 50, message = "PV number must be between 1 and 50 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub pv_no: String,

    pub date: NaiveDate,

    #[validate(length(max = 200, message = "Activity must be at most 200 characters"))]
    pub activity: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Payee name must be between 1 and 200 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub payee_name: String,

    #[validate(length(max = 50, message = "Budget code must be at most 50 characters"))]
    pub budget_code: Option<String>,

    #[validate(length(max = 2000, message = "Particulars must be at most 2000 characters"))]
    pub particulars: Option<String>,

    #[validate(custom(function = "validate_positive_amount"))]
    pub amount: Decimal,

    #[validate(custom(function = "validate_amount"))]
    pub total: Option<Decimal>,

    #[validate(length(max = 500, message = "Amount in words must be at most 500 characters"))]
    pub amount_words: Option<String>,
}

impl CreateVoucherInput {
    /// Voucher total, defaulting to the amount.
    pub fn resolved_total(&self) -> Decimal {
        self.total.unwrap_or(self.amount)
    }

    /// Amount in words, spelled out from the total when not supplied.
    pub fn resolved_amount_words(&self) -> Result<String, DomainError> {
        match self.amount_words.as_deref().map(str::trim) {
            Some(words) if !words.is_empty() => Ok(words.to_string()),
            _ => amount_in_words(self.resolved_total())
                .map_err(|e| DomainError::Validation(e.to_string())),
        }
    }
}
