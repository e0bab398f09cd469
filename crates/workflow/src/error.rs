//! Errors returned by workflow operations.
//!
//! An `Err` from any operation means nothing was committed.

use domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl WorkflowError {
    pub fn not_found(what: &str, id: impl std::fmt::Display) -> Self {
        WorkflowError::NotFound(format!("{what} {id}"))
    }
}

impl From<sqlx::Error> for WorkflowError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => WorkflowError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some("23505") => WorkflowError::Conflict("Resource already exists".into()),
                Some("23503") => WorkflowError::NotFound("Referenced resource not found".into()),
                _ => {
                    tracing::error!(error = %db_err, "Database error");
                    WorkflowError::Persistence(db_err.to_string())
                }
            },
            other => {
                tracing::error!(error = %other, "Database error");
                WorkflowError::Persistence(other.to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for WorkflowError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();

        let message = if messages.len() == 1 {
            messages[0].clone()
        } else {
            format!("{} validation errors", messages.len())
        };

        WorkflowError::Validation(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::{CreateRequestInput, RequestType};
    use validator::Validate;

    #[test]
    fn test_display() {
        assert_eq!(
            WorkflowError::not_found("Request", "42").to_string(),
            "Not found: Request 42"
        );
        assert_eq!(
            WorkflowError::Conflict("PV number taken".into()).to_string(),
            "Conflict: PV number taken"
        );
        assert_eq!(
            WorkflowError::from(DomainError::VoucherNotReady).to_string(),
            DomainError::VoucherNotReady.to_string()
        );
    }

    #[test]
    fn test_from_sqlx_row_not_found() {
        let error: WorkflowError = sqlx::Error::RowNotFound.into();
        assert!(matches!(error, WorkflowError::NotFound(_)));
    }

    #[test]
    fn test_from_sqlx_other_is_persistence() {
        let error: WorkflowError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(error, WorkflowError::Persistence(_)));
    }

    #[test]
    fn test_from_validation_errors_single_message() {
        let input = CreateRequestInput {
            request_type: RequestType::Imprest,
            title: String::new(),
            description: None,
            amount: None,
            attachment_path: None,
            details: serde_json::Value::Null,
        };
        let error: WorkflowError = input.validate().unwrap_err().into();
        match error {
            WorkflowError::Validation(message) => assert!(!message.is_empty()),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
