//! Order repository trait covering goods lookup and atomic reservation.

use async_trait::async_trait;

use crate::domain::entities::good::Good;
use crate::domain::entities::order::{Order, PlaceOrder, PlaceOrderOutcome};
use crate::errors::DomainError;

/// Repository trait for goods and orders
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Find a good by id
    async fn find_good(&self, good_id: u64) -> Result<Option<Good>, DomainError>;

    /// Conditionally mark a good sold and create its order as one unit
    ///
    /// The sold flag must be flipped with a guard on its current value at
    /// write time, so that of any number of concurrent calls for the same
    /// good at most one returns [`PlaceOrderOutcome::Placed`]. The order's
    /// `pay_money` is the price read within the same unit. If the unit is
    /// abandoned part way (including the future being dropped) nothing is
    /// persisted.
    ///
    /// # Returns
    /// * `Ok(Placed(order))` - The good was reserved and the order created
    /// * `Ok(AlreadySold)` - The guard failed, the good was sold already
    /// * `Ok(GoodNotFound)` - No such good
    /// * `Err(DomainError::NotFound)` - Another referenced row is missing
    /// * `Err(DomainError)` - Any other store failure, nothing persisted
    async fn place_order(&self, request: PlaceOrder) -> Result<PlaceOrderOutcome, DomainError>;

    /// Find an order by id
    async fn find_order(&self, order_id: u64) -> Result<Option<Order>, DomainError>;
}
