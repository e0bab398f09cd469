//! Request domain models: employee requests and their per-stage approval state.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::errors::DomainError;
use crate::models::role::Stage;
use shared::validation::{validate_amount, validate_leave_days, validate_not_blank};

/// Kind of request an employee can submit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestType {
    AnnualLeave,
    Imprest,
    Reimbursement,
    SalaryAdvance,
    Retirement,
    Other(String),
}

const FULL_CHAIN: &[Stage] = &[
    Stage::Hod,
    Stage::Hrm,
    Stage::Auditor,
    Stage::Finance,
    Stage::Ed,
];
const SALARY_ADVANCE_CHAIN: &[Stage] = &[Stage::Hrm, Stage::Finance, Stage::Ed];
const RETIREMENT_CHAIN: &[Stage] = &[Stage::Finance, Stage::Ed];

impl RequestType {
    pub fn as_str(&self) -> &str {
        match self {
            RequestType::AnnualLeave => "Annual leave",
            RequestType::Imprest => "Imprest request",
            RequestType::Reimbursement => "Reimbursement request",
            RequestType::SalaryAdvance => "Salary advance",
            RequestType::Retirement => "TCCIA retirement request",
            RequestType::Other(name) => name,
        }
    }

    /// Stages this request type passes through, in approval order.
    pub fn stages(&self) -> &'static [Stage] {
        match self {
            RequestType::SalaryAdvance => SALARY_ADVANCE_CHAIN,
            RequestType::Retirement => RETIREMENT_CHAIN,
            _ => FULL_CHAIN,
        }
    }

    pub fn includes(&self, stage: Stage) -> bool {
        self.stages().contains(&stage)
    }

    /// Salary advance and retirement go to Finance without HOD or Auditor sign-off.
    pub fn is_fast_tracked(&self) -> bool {
        matches!(self, RequestType::SalaryAdvance | RequestType::Retirement)
    }

    pub fn is_annual_leave(&self) -> bool {
        matches!(self, RequestType::AnnualLeave)
    }
}

impl From<&str> for RequestType {
    fn from(value: &str) -> Self {
        match value.trim() {
            "Annual leave" => RequestType::AnnualLeave,
            "Imprest request" => RequestType::Imprest,
            "Reimbursement request" => RequestType::Reimbursement,
            "Salary advance" => RequestType::SalaryAdvance,
            "TCCIA retirement request" => RequestType::Retirement,
            other => RequestType::Other(other.to_string()),
        }
    }
}

impl From<String> for RequestType {
    fn from(value: String) -> Self {
        RequestType::from(value.as_str())
    }
}

impl From<RequestType> for String {
    fn from(value: RequestType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tri-state status of a single approval stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for StageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageStatus::Pending => write!(f, "pending"),
            StageStatus::Approved => write!(f, "approved"),
            StageStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A decision an approver can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approved,
    Rejected,
}

impl From<Decision> for StageStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => StageStatus::Approved,
            Decision::Rejected => StageStatus::Rejected,
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&StageStatus::from(*self), f)
    }
}

/// Requester-facing status, persisted as `status_id` (see `request_statuses`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateStatus {
    Pending,
    Approved,
    Rejected,
}

impl AggregateStatus {
    pub fn id(self) -> i16 {
        match self {
            AggregateStatus::Pending => 1,
            AggregateStatus::Approved => 2,
            AggregateStatus::Rejected => 3,
        }
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(AggregateStatus::Pending),
            2 => Some(AggregateStatus::Approved),
            3 => Some(AggregateStatus::Rejected),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AggregateStatus::Pending => "Pending",
            AggregateStatus::Approved => "Approved",
            AggregateStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for AggregateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Recorded state of one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageState {
    pub status: StageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
}

impl StageState {
    pub fn pending() -> Self {
        Self {
            status: StageStatus::Pending,
            remark: None,
            decided_at: None,
        }
    }
}

/// Stage states of a request, indexed by [`Stage`]. `None` marks a stage the
/// request type skips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSet {
    stages: [Option<StageState>; 5],
}

impl StageSet {
    /// Fresh stage set for a new request: every stage on the chain pending.
    pub fn for_type(request_type: &RequestType) -> Self {
        let mut set = Self::default();
        for stage in request_type.stages() {
            set.stages[stage.index()] = Some(StageState::pending());
        }
        set
    }

    pub fn get(&self, stage: Stage) -> Option<&StageState> {
        self.stages[stage.index()].as_ref()
    }

    pub fn status(&self, stage: Stage) -> Option<StageStatus> {
        self.get(stage).map(|state| state.status)
    }

    pub fn is(&self, stage: Stage, status: StageStatus) -> bool {
        self.status(stage) == Some(status)
    }

    pub fn set(&mut self, stage: Stage, state: Option<StageState>) {
        self.stages[stage.index()] = state;
    }

    /// Iterates stages in approval order with their state.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, Option<&StageState>)> {
        Stage::ALL.into_iter().map(move |stage| (stage, self.get(stage)))
    }
}

/// Derives the aggregate status from stage truth.
///
/// Any rejected stage rejects the request; otherwise only an ED approval
/// approves it.
pub fn derive_status(stages: &StageSet) -> AggregateStatus {
    if stages
        .iter()
        .any(|(_, state)| matches!(state, Some(s) if s.status == StageStatus::Rejected))
    {
        AggregateStatus::Rejected
    } else if stages.is(Stage::Ed, StageStatus::Approved) {
        AggregateStatus::Approved
    } else {
        AggregateStatus::Pending
    }
}

/// An employee request and its approval state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: Uuid,
    pub user_id: Uuid,
    pub request_type: RequestType,
    pub title: String,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub attachment_path: Option<String>,
    pub details: serde_json::Value,
    pub status: AggregateStatus,
    pub stages: StageSet,
    /// Department of the requesting employee.
    pub owner_department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Request {
    /// Days applied for, from `details.days_applied`.
    pub fn days_applied(&self) -> Option<i64> {
        days_applied(&self.details)
    }
}

/// Reads `days_applied` from a request's free-form details. Accepts whole
/// numbers given either as JSON numbers or numeric strings.
pub fn days_applied(details: &serde_json::Value) -> Option<i64> {
    let value = details.get("days_applied")?;
    match value {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_days)),
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_days))
        }
        _ => None,
    }
}

fn whole_days(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 {
        Some(value as i64)
    } else {
        None
    }
}

/// Input for submitting a new request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateRequestInput {
    pub request_type: RequestType,

    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    #[validate(custom(function = "validate_not_blank"))]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_amount"))]
    pub amount: Option<Decimal>,

    #[validate(length(max = 500, message = "Attachment path must be at most 500 characters"))]
    pub attachment_path: Option<String>,

    #[serde(default)]
    pub details: serde_json::Value,
}

impl CreateRequestInput {
    /// Checks type-specific details. Annual leave must state the days applied for.
    pub fn validate_details(&self) -> Result<(), DomainError> {
        if !self.request_type.is_annual_leave() {
            return Ok(());
        }
        let days = days_applied(&self.details).ok_or_else(|| {
            DomainError::Validation("Annual leave requests must include days_applied".into())
        })?;
        validate_leave_days(days).map_err(|e| {
            DomainError::Validation(
                e.message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid days_applied".into()),
            )
        })
    }
}
