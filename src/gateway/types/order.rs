//! Request types and validation for the order API
//!
//! Deserialization-level checks (non-empty strings) live in serde; business
//! validation (catalog membership, urgency consistency, directory lookups)
//! happens in the service.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::{OrderStatus, ServiceType};
use crate::service::{DraftItem, OrderDraft};

/// Custom deserializer for non-empty strings
fn deserialize_non_empty_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.trim().is_empty() {
        return Err(serde::de::Error::custom("string cannot be empty"));
    }
    Ok(s)
}

/// One item line of a create request (unit price is resolved server-side).
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    /// Catalog item type (must not be empty)
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    #[schema(example = "Shirt")]
    pub item_type: String,
    #[schema(example = 2, minimum = 1)]
    pub quantity: u32,
}

/// Create order request body
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub student_id: u64,
    /// Personnel the student pre-selects for this order
    pub personnel_id: u64,
    pub items: Vec<OrderItemRequest>,
    /// "NORMAL" | "URGENT"
    pub service_type: ServiceType,
    /// 1 or 2 for URGENT; 3 for NORMAL
    #[schema(example = 3)]
    pub urgency_days: u8,
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    #[schema(example = "Hostel A, Room 101")]
    pub pickup_location: String,
    /// Opaque reference to an externally stored photo
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl From<CreateOrderRequest> for OrderDraft {
    fn from(req: CreateOrderRequest) -> Self {
        OrderDraft {
            student_id: req.student_id,
            personnel_id: req.personnel_id,
            items: req
                .items
                .into_iter()
                .map(|i| DraftItem {
                    item_type: i.item_type,
                    quantity: i.quantity,
                })
                .collect(),
            service_type: req.service_type,
            urgency_days: req.urgency_days,
            pickup_location: req.pickup_location,
            photo_url: req.photo_url,
        }
    }
}

/// Accept order request (identifies the accepting personnel)
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcceptOrderRequest {
    pub personnel_id: u64,
}

/// Reject order request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RejectOrderRequest {
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    #[schema(example = "machine breakdown")]
    pub reason: String,
}

/// Status advance request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    /// The single next stage (e.g. "WASHING")
    pub status: OrderStatus,
}

/// Rating submission
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingRequest {
    /// Must match the ordering student
    pub student_id: u64,
    #[schema(example = 5, minimum = 1, maximum = 5)]
    pub rating: u8,
}

/// Optional status filter for personnel order listings
#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusFilterQuery {
    pub status: Option<OrderStatus>,
}
