//! Order lifecycle state machine
//!
//! ```text
//! PENDING -> ACCEPTED -> PENDING_COLLECTION -> WASHING -> IRONING -> DONE
//! PENDING -> REJECTED   (terminal, alternate to ACCEPTED)
//! ```
//!
//! Strict forward-only: each state has at most one successor (PENDING has
//! the REJECTED branch as well). No skipping, no backward moves, no way out
//! of DONE or REJECTED.

use crate::models::OrderStatus;

/// The single forward successor of a status, if any.
pub fn successor(status: OrderStatus) -> Option<OrderStatus> {
    match status {
        OrderStatus::Pending => Some(OrderStatus::Accepted),
        OrderStatus::Accepted => Some(OrderStatus::PendingCollection),
        OrderStatus::PendingCollection => Some(OrderStatus::Washing),
        OrderStatus::Washing => Some(OrderStatus::Ironing),
        OrderStatus::Ironing => Some(OrderStatus::Done),
        OrderStatus::Done | OrderStatus::Rejected => None,
    }
}

/// Whether `current -> requested` is a legal transition.
pub fn is_valid_transition(current: OrderStatus, requested: OrderStatus) -> bool {
    if current == OrderStatus::Pending && requested == OrderStatus::Rejected {
        return true;
    }
    successor(current) == Some(requested)
}

/// DONE and REJECTED never transition again.
pub fn is_terminal(status: OrderStatus) -> bool {
    successor(status).is_none()
}
