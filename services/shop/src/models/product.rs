//! Product model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// Product fields accepted on create and update. Missing fields decode to
/// their zero values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl Product {
    /// Build a new product with a server-assigned identifier
    pub fn new(input: ProductInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            price: input.price,
        }
    }
}
