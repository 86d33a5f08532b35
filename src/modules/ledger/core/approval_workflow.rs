// Approval workflow for tenant-submitted payment proofs.
//
// Transitions
// - processing -> approved: terminal, produces a Payment with status `approved`.
// - processing -> rejected: terminal, the submission is discarded.
// - Anything else is refused. A rejected tenant submits a brand new approval.

use crate::modules::ledger::core::model::{
    Approval, ApprovalStatus, Payment, PaymentCategory, PaymentStatus,
};
use crate::shared::core::primitives::{approval_payment_id, round_currency};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalDecision {
    Approve,
    Reject,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApprovalOutcome {
    Approved(Payment),
    Rejected,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApprovalError {
    #[error("approval {approval_id} is already {status:?}")]
    AlreadyDecided {
        approval_id: String,
        status: ApprovalStatus,
    },
}

/// Normalises a fresh submission so it always enters the queue as processing.
pub fn submit(approval: Approval) -> Approval {
    Approval {
        status: ApprovalStatus::Processing,
        amount: round_currency(approval.amount),
        ..approval
    }
}

pub fn decide_approval(
    approval: &Approval,
    decision: ApprovalDecision,
) -> Result<ApprovalOutcome, ApprovalError> {
    if approval.status != ApprovalStatus::Processing {
        return Err(ApprovalError::AlreadyDecided {
            approval_id: approval.id.clone(),
            status: approval.status,
        });
    }
    match decision {
        ApprovalDecision::Approve => Ok(ApprovalOutcome::Approved(Payment {
            id: approval_payment_id(&approval.id),
            tenant_id: approval.tenant_id.clone(),
            amount: approval.amount,
            method: approval.method,
            date: approval.date,
            category: PaymentCategory::Rent,
            status: PaymentStatus::Approved,
            note: approval.note.clone(),
        })),
        ApprovalDecision::Reject => Ok(ApprovalOutcome::Rejected),
    }
}
