//! Domain events emitted by request and voucher transitions.
//!
//! Transitions only describe what happened; handlers in the service layer
//! decide how to deliver the consequences (leave deduction, notifications,
//! voucher messages).

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{
    Decision, NewNotification, NewVoucherMessage, RequestType, Role, Stage, StageStatus,
    VoucherType,
};

/// Events emitted by a request decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestEvent {
    /// A stage was decided. Emitted for every decision.
    Decided {
        request_id: Uuid,
        stage: Stage,
        decision: Decision,
        decided_by: Uuid,
    },
    /// The aggregate status moved into Approved.
    FinalApproved {
        request_id: Uuid,
        owner_id: Uuid,
        request_type: RequestType,
        title: String,
        days_applied: Option<i64>,
        decided_by_role: Role,
        remark: Option<String>,
        decided_at: DateTime<Utc>,
    },
    /// A stage rejected the request.
    Rejected {
        request_id: Uuid,
        owner_id: Uuid,
        request_type: RequestType,
        title: String,
        stage: Stage,
        decided_by_role: Role,
        remark: Option<String>,
    },
}

impl RequestEvent {
    pub fn request_id(&self) -> Uuid {
        match self {
            RequestEvent::Decided { request_id, .. }
            | RequestEvent::FinalApproved { request_id, .. }
            | RequestEvent::Rejected { request_id, .. } => *request_id,
        }
    }

    /// Notice for the request owner. Only final approval and rejection notify.
    pub fn owner_notification(&self) -> Option<NewNotification> {
        match self {
            RequestEvent::Decided { .. } => None,
            RequestEvent::FinalApproved {
                request_id,
                owner_id,
                request_type,
                title,
                decided_by_role,
                remark,
                ..
            } => Some(NewNotification::for_request(
                *owner_id,
                *request_id,
                "Request Approved",
                with_remark(
                    format!(
                        "Your {} \"{}\" has been approved by the {}.",
                        request_type, title, decided_by_role
                    ),
                    remark.as_deref(),
                ),
            )),
            RequestEvent::Rejected {
                request_id,
                owner_id,
                request_type,
                title,
                decided_by_role,
                remark,
                ..
            } => Some(NewNotification::for_request(
                *owner_id,
                *request_id,
                "Request Rejected",
                with_remark(
                    format!(
                        "Your {} \"{}\" has been rejected by the {}.",
                        request_type, title, decided_by_role
                    ),
                    remark.as_deref(),
                ),
            )),
        }
    }
}

fn with_remark(message: String, remark: Option<&str>) -> String {
    match remark {
        Some(remark) => format!("{message} Remark: {remark}"),
        None => message,
    }
}

/// Events emitted by a voucher decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoucherEvent {
    /// Finance approved; the voucher awaits the Executive Director.
    FinanceApproved {
        voucher_id: Uuid,
        voucher_type: VoucherType,
        pv_no: String,
        prepared_by: Uuid,
    },
    /// Finance rejected; ED's decision was reopened.
    FinanceRejected {
        voucher_id: Uuid,
        previous_ed_status: StageStatus,
    },
    EdApproved {
        voucher_id: Uuid,
    },
    EdRejected {
        voucher_id: Uuid,
        pv_no: String,
        prepared_by: Uuid,
        decided_by: Uuid,
        remark: Option<String>,
    },
}

impl VoucherEvent {
    pub fn voucher_id(&self) -> Uuid {
        match self {
            VoucherEvent::FinanceApproved { voucher_id, .. }
            | VoucherEvent::FinanceRejected { voucher_id, .. }
            | VoucherEvent::EdApproved { voucher_id }
            | VoucherEvent::EdRejected { voucher_id, .. } => *voucher_id,
        }
    }

    /// Notification telling the Executive Director a voucher awaits final approval.
    pub fn ready_notification(&self, ed_user_id: Uuid) -> Option<NewNotification> {
        match self {
            VoucherEvent::FinanceApproved {
                voucher_id,
                voucher_type,
                pv_no,
                ..
            } => Some(NewNotification::for_voucher(
                ed_user_id,
                *voucher_id,
                format!("{} Voucher Ready for Final Approval", voucher_type.label()),
                format!(
                    "{} voucher PV No. {} has been approved by Finance and awaits your final approval.",
                    voucher_type.label(),
                    pv_no
                ),
            )),
            _ => None,
        }
    }

    /// Message from the preparer to the Executive Director announcing readiness.
    pub fn ready_message(&self, ed_user_id: Uuid) -> Option<NewVoucherMessage> {
        match self {
            VoucherEvent::FinanceApproved {
                voucher_id,
                voucher_type,
                pv_no,
                prepared_by,
            } => Some(NewVoucherMessage {
                voucher_id: *voucher_id,
                sender_id: *prepared_by,
                recipient_id: ed_user_id,
                message: format!(
                    "{} voucher PV No. {} is ready for your final approval.",
                    voucher_type.label(),
                    pv_no
                ),
            }),
            _ => None,
        }
    }

    /// Message carrying ED's rejection remark back to the preparer. `None`
    /// unless ED rejected with a remark.
    pub fn rejection_message(&self) -> Option<NewVoucherMessage> {
        match self {
            VoucherEvent::EdRejected {
                voucher_id,
                pv_no,
                prepared_by,
                decided_by,
                remark: Some(remark),
            } => Some(NewVoucherMessage {
                voucher_id: *voucher_id,
                sender_id: *decided_by,
                recipient_id: *prepared_by,
                message: format!("Voucher PV No. {pv_no} was rejected: {remark}"),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn final_approved(remark: Option<&str>) -> RequestEvent {
        RequestEvent::FinalApproved {
            request_id: Uuid::nil(),
            owner_id: Uuid::nil(),
            request_type: RequestType::AnnualLeave,
            title: "December leave".to_string(),
            days_applied: Some(5),
            decided_by_role: Role::ExecutiveDirector,
            remark: remark.map(str::to_string),
            decided_at: Utc::now(),
        }
    }

    #[test]
    fn test_decided_does_not_notify() {
        let event = RequestEvent::Decided {
            request_id: Uuid::nil(),
            stage: Stage::Hod,
            decision: Decision::Approved,
            decided_by: Uuid::nil(),
        };
        assert!(event.owner_notification().is_none());
    }

    #[test]
    fn test_final_approval_notification_names_role_and_remark() {
        let notification = final_approved(Some("Enjoy your leave"))
            .owner_notification()
            .unwrap();
        assert_eq!(notification.title, "Request Approved");
        assert_eq!(
            notification.message,
            "Your Annual leave \"December leave\" has been approved by the Executive Director. Remark: Enjoy your leave"
        );
        assert_eq!(notification.request_id, Some(Uuid::nil()));
        assert!(notification.voucher_id.is_none());
    }

    #[test]
    fn test_rejection_notification_without_remark() {
        let event = RequestEvent::Rejected {
            request_id: Uuid::nil(),
            owner_id: Uuid::nil(),
            request_type: RequestType::Imprest,
            title: "Field visit".to_string(),
            stage: Stage::Auditor,
            decided_by_role: Role::InternalAuditor,
            remark: None,
        };
        let notification = event.owner_notification().unwrap();
        assert_eq!(notification.title, "Request Rejected");
        assert_eq!(
            notification.message,
            "Your Imprest request \"Field visit\" has been rejected by the Internal Auditor."
        );
    }

    #[test]
    fn test_finance_approved_voucher_side_effects() {
        let preparer = Uuid::new_v4();
        let ed = Uuid::new_v4();
        let event = VoucherEvent::FinanceApproved {
            voucher_id: Uuid::nil(),
            voucher_type: VoucherType::PettyCash,
            pv_no: "PC-19".to_string(),
            prepared_by: preparer,
        };

        let notification = event.ready_notification(ed).unwrap();
        assert_eq!(notification.user_id, ed);
        assert_eq!(notification.title, "Petty Cash Voucher Ready for Final Approval");
        assert!(notification.message.contains("PC-19"));

        let message = event.ready_message(ed).unwrap();
        assert_eq!(message.sender_id, preparer);
        assert_eq!(message.recipient_id, ed);
        assert!(event.rejection_message().is_none());
    }

    #[test]
    fn test_ed_rejection_message_requires_remark() {
        let preparer = Uuid::new_v4();
        let ed = Uuid::new_v4();
        let with_remark = VoucherEvent::EdRejected {
            voucher_id: Uuid::nil(),
            pv_no: "PV-7".to_string(),
            prepared_by: preparer,
            decided_by: ed,
            remark: Some("Budget line exhausted".to_string()),
        };
        let message = with_remark.rejection_message().unwrap();
        assert_eq!(message.sender_id, ed);
        assert_eq!(message.recipient_id, preparer);
        assert_eq!(message.message, "Voucher PV No. PV-7 was rejected: Budget line exhausted");

        let without_remark = VoucherEvent::EdRejected {
            voucher_id: Uuid::nil(),
            pv_no: "PV-7".to_string(),
            prepared_by: preparer,
            decided_by: ed,
            remark: None,
        };
        assert!(without_remark.rejection_message().is_none());
        assert!(without_remark.ready_notification(ed).is_none());
    }
}
