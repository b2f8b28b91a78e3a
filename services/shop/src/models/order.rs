//! Order model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status given to orders placed without one
pub const DEFAULT_STATUS: &str = "pending";

/// One line of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub quantity: i64,
}

/// Order record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub items: Vec<OrderItem>,
    pub user_id: String,
    pub total: f64,
    pub status: String,
    /// Seconds since the Unix epoch
    pub created_at: i64,
}

/// New order payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NewOrder {
    pub items: Vec<OrderItem>,
    pub user_id: String,
    pub total: f64,
    pub status: Option<String>,
    pub created_at: Option<i64>,
}

impl Order {
    /// Build a new order with a server-assigned identifier. `now` fills in a
    /// missing or zero creation time.
    pub fn new(order: NewOrder, now: i64) -> Self {
        let status = order
            .status
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STATUS.to_string());
        let created_at = order.created_at.filter(|t| *t != 0).unwrap_or(now);

        Self {
            id: Uuid::new_v4(),
            items: order.items,
            user_id: order.user_id,
            total: order.total,
            status,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_fills_defaults() {
        let order = Order::new(
            NewOrder {
                user_id: "u-1".to_string(),
                total: 12.5,
                status: Some("  ".to_string()),
                created_at: Some(0),
                ..Default::default()
            },
            1_700_000_000,
        );
        assert_eq!(order.status, DEFAULT_STATUS);
        assert_eq!(order.created_at, 1_700_000_000);
    }

    #[test]
    fn test_new_order_keeps_client_values() {
        let order = Order::new(
            NewOrder {
                status: Some("shipped".to_string()),
                created_at: Some(42),
                ..Default::default()
            },
            1_700_000_000,
        );
        assert_eq!(order.status, "shipped");
        assert_eq!(order.created_at, 42);
    }
}
