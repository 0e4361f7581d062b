// models.rs - Core order types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Order lifecycle status
///
/// Forward-only: each non-terminal status has exactly one legal successor
/// (see [`crate::lifecycle`]), plus the `PENDING -> REJECTED` branch.
/// `DONE` and `REJECTED` are terminal; an order never leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Created by a student, waiting for personnel decision
    Pending,
    /// Personnel accepted the order
    Accepted,
    /// Waiting for laundry pickup from the hostel
    PendingCollection,
    /// In the wash
    Washing,
    /// Being ironed
    Ironing,
    /// Completed; the only state in which a rating may be attached
    Done,
    /// Rejected while PENDING (terminal, carries a reason)
    Rejected,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::PendingCollection => "PENDING_COLLECTION",
            OrderStatus::Washing => "WASHING",
            OrderStatus::Ironing => "IRONING",
            OrderStatus::Done => "DONE",
            OrderStatus::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Service type: drives the urgency surcharge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    /// Standard 3-day turnaround, no surcharge
    Normal,
    /// 1 or 2 day turnaround, surcharged
    Urgent,
}

/// One line of an order: item type, quantity, and the unit price that was
/// current in the catalog when the order was created.
///
/// `price_per_item` is frozen here so later catalog edits never change an
/// existing order's total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub item_type: String,
    pub quantity: u32,
    #[schema(value_type = String)]
    pub price_per_item: Decimal,
}

impl OrderItem {
    /// Line total: quantity x unit price
    pub fn item_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.price_per_item
    }
}

/// A laundry order. Append-only: created once, mutated only through the
/// lifecycle operations, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    pub student_id: u64,
    /// Assigned at creation (student pre-selects), re-bound by accept
    pub personnel_id: Option<u64>,
    /// Non-empty; set once at creation, immutable afterward
    pub items: Vec<OrderItem>,
    pub service_type: ServiceType,
    /// 1 or 2 for URGENT, 3 for NORMAL
    pub urgency_days: u8,
    /// Frozen at creation by the pricing rule; never recomputed
    #[schema(value_type = String)]
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub pickup_location: String,
    /// Present iff status == REJECTED
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Opaque reference to an externally stored photo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// 1..=5, settable exactly once, only when DONE
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_rating: Option<u8>,
    pub created_at: DateTime<Utc>,
    /// Bumped on every status transition
    pub updated_at: DateTime<Utc>,
    // Per-stage timestamps, stamped by the matching transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub washing_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ironing_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Chronological (status, timestamp) pairs for the client timeline view.
    /// A rejected order shows only its PENDING entry; the rejection itself
    /// is carried by `rejection_reason`.
    pub fn status_history(&self) -> Vec<(OrderStatus, DateTime<Utc>)> {
        let mut history = vec![(OrderStatus::Pending, self.created_at)];
        let stages = [
            (OrderStatus::Accepted, self.accepted_at),
            (OrderStatus::PendingCollection, self.collection_at),
            (OrderStatus::Washing, self.washing_at),
            (OrderStatus::Ironing, self.ironing_at),
            (OrderStatus::Done, self.completed_at),
        ];
        for (status, at) in stages {
            if let Some(ts) = at {
                history.push((status, ts));
            }
        }
        history
    }
}
