//! Workflow business metrics.

use metrics::counter;

/// Count a committed decision.
///
/// `subject` is `request` or `voucher`; `stage` names the deciding stage.
pub fn record_decision(subject: &'static str, stage: String, decision: String) {
    counter!(
        "workflow_decisions_total",
        "subject" => subject,
        "stage" => stage,
        "decision" => decision
    )
    .increment(1);
}

/// Count a post-commit side effect that could not be delivered.
pub fn record_side_effect_failure(effect: &'static str) {
    counter!("workflow_side_effect_failures_total", "effect" => effect).increment(1);
}
