//! Common validation utilities.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Longest leave a single request may apply for, in days.
pub const MAX_LEAVE_DAYS: i64 = 365;

/// Validates that a monetary amount is non-negative.
pub fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount < Decimal::ZERO {
        let mut err = ValidationError::new("amount_range");
        err.message = Some("Amount must be non-negative".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates that a monetary amount is strictly positive.
pub fn validate_positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount > Decimal::ZERO {
        Ok(())
    } else {
        let mut err = ValidationError::new("amount_positive");
        err.message = Some("Amount must be greater than zero".into());
        Err(err)
    }
}

/// Validates that a text field holds something other than whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates the number of days applied for in a leave request (1 to 365).
pub fn validate_leave_days(days: i64) -> Result<(), ValidationError> {
    if (1..=MAX_LEAVE_DAYS).contains(&days) {
        Ok(())
    } else {
        let mut err = ValidationError::new("leave_days_range");
        err.message = Some("Days applied must be between 1 and 365".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(&Decimal::ZERO).is_ok());
        assert!(validate_amount(&Decimal::new(150_000, 2)).is_ok());
        assert!(validate_amount(&Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn test_validate_amount_error_message() {
        let err = validate_amount(&Decimal::new(-500, 0)).unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Amount must be non-negative"
        );
    }

    #[test]
    fn test_validate_positive_amount() {
        assert!(validate_positive_amount(&Decimal::new(1, 2)).is_ok());
        assert!(validate_positive_amount(&Decimal::ZERO).is_err());
        assert!(validate_positive_amount(&Decimal::new(-10, 0)).is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Annual leave for December").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   \t").is_err());
    }

    #[test]
    fn test_validate_leave_days() {
        assert!(validate_leave_days(1).is_ok());
        assert!(validate_leave_days(28).is_ok());
        assert!(validate_leave_days(365).is_ok());
        assert!(validate_leave_days(0).is_err());
        assert!(validate_leave_days(-3).is_err());
        assert!(validate_leave_days(366).is_err());
    }
}
