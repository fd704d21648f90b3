//! Order entity and the reservation request/outcome types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed purchase of a single good
///
/// Created exactly once per successfully reserved good and immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub good_id: u64,
    pub address_id: u64,
    pub buyer_id: u64,
    /// Amount paid, taken from the good's price at reservation time
    pub pay_money: i64,
    pub created_at: DateTime<Utc>,
}

/// Request to reserve a good and create its order in one atomic step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceOrder {
    pub good_id: u64,
    pub buyer_id: u64,
    pub address_id: u64,
}

/// Result of a conditional reservation against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceOrderOutcome {
    /// The sold flag was flipped and the order was created
    Placed(Order),
    /// The good was already sold when the conditional update ran
    AlreadySold,
    /// No good with the requested id exists
    GoodNotFound,
}
