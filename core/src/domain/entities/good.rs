//! Good entity, a sellable catalog item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single unit of inventory listed by its owner
///
/// `is_sold` moves from `false` to `true` exactly once, when an order for the
/// good is placed, and never reverts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Good {
    pub id: u64,
    pub owner_id: u64,
    pub category_id: u64,
    pub name: String,
    pub description: String,
    pub picture: String,
    /// Price in minor currency units
    pub price: i64,
    pub is_sold: bool,
    pub created_at: DateTime<Utc>,
}

impl Good {
    /// Creates an unsold good with empty descriptive fields
    pub fn new(id: u64, owner_id: u64, price: i64) -> Self {
        Self {
            id,
            owner_id,
            category_id: 0,
            name: String::new(),
            description: String::new(),
            picture: String::new(),
            price,
            is_sold: false,
            created_at: Utc::now(),
        }
    }

    /// Whether the good can still be bought
    pub fn is_available(&self) -> bool {
        !self.is_sold
    }
}
