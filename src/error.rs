//! Service error taxonomy
//!
//! Every state-changing operation validates fully before touching the order,
//! so a returned error guarantees no partial mutation is observable.

use crate::models::OrderStatus;

/// Errors returned by [`crate::service::OrderLifecycleService`].
///
/// All variants are terminal to the triggering call; the service never
/// retries on its own. Clients correct input (`Validation`), refresh state
/// (`InvalidTransition`), or give up (`NotFound`, `AlreadyRated`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// Malformed or missing input; correct and resubmit.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Operation not legal in the order's current state.
    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Unknown order/student/personnel id.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    /// Rating already present on the order.
    #[error("order {0} already rated")]
    AlreadyRated(u64),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ServiceError::Validation(msg.into())
    }

    pub fn order_not_found(id: u64) -> Self {
        ServiceError::NotFound { kind: "order", id }
    }

    pub fn student_not_found(id: u64) -> Self {
        ServiceError::NotFound { kind: "student", id }
    }

    pub fn personnel_not_found(id: u64) -> Self {
        ServiceError::NotFound { kind: "personnel", id }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
