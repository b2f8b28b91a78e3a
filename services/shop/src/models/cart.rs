//! Cart model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product placed in the cart. The product id is not checked against the
/// product collection and the quantity is not range-checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i64,
}

/// New cart item payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NewCartItem {
    pub product_id: Uuid,
    pub quantity: i64,
}

impl CartItem {
    pub fn new(item: NewCartItem) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: item.product_id,
            quantity: item.quantity,
        }
    }
}
