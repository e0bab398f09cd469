//! Annual leave arithmetic.

/// Result of deducting approved leave from a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveDeduction {
    /// Applied change, never positive. Smaller in magnitude than the request
    /// when the balance would go negative.
    pub change_days: i32,
    pub balance_after: i32,
}

/// Deducts `days` from `balance`, flooring the result at zero.
pub fn deduct(balance: i32, days: i64) -> LeaveDeduction {
    let days = days.clamp(0, i64::from(i32::MAX));
    let balance_after = (i64::from(balance) - days).max(0) as i32;
    LeaveDeduction {
        change_days: balance_after - balance.max(0),
        balance_after,
    }
}
