//! Order service implementation

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::entities::order::{Order, PlaceOrder, PlaceOrderOutcome};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, OrderError};
use crate::repositories::OrderRepository;

/// Service creating and reading orders on behalf of an authenticated buyer
pub struct OrderService<O: OrderRepository> {
    repository: Arc<O>,
}

impl<O: OrderRepository> OrderService<O> {
    pub fn new(repository: Arc<O>) -> Self {
        Self { repository }
    }

    /// Reserves a good and creates its order
    ///
    /// The early sold check only saves a round trip. Exclusivity comes from
    /// the repository's conditional reservation, so a buyer that loses the
    /// race after passing the check still gets `AlreadySold`.
    ///
    /// # Errors
    ///
    /// * `OrderError::AlreadySold` - The good was sold before or during the call
    /// * `OrderError::InvalidReference` - The good or address does not exist
    /// * `OrderError::StoreUnavailable` - Any other store failure, not retried
    pub async fn create_order(
        &self,
        buyer: &User,
        good_id: u64,
        address_id: u64,
    ) -> Result<Order, OrderError> {
        let good = self
            .repository
            .find_good(good_id)
            .await
            .map_err(|e| store_failure("find_good", good_id, buyer.id, e))?
            .ok_or_else(|| invalid_reference(format!("good {}", good_id), buyer.id))?;

        if !good.is_available() {
            info!(good_id, buyer_id = buyer.id, "Good already sold");
            return Err(OrderError::AlreadySold);
        }

        let request = PlaceOrder {
            good_id,
            buyer_id: buyer.id,
            address_id,
        };

        match self.repository.place_order(request).await {
            Ok(PlaceOrderOutcome::Placed(order)) => {
                info!(
                    order_id = order.id,
                    good_id,
                    buyer_id = buyer.id,
                    pay_money = order.pay_money,
                    "Order placed"
                );
                Ok(order)
            }
            Ok(PlaceOrderOutcome::AlreadySold) => {
                warn!(good_id, buyer_id = buyer.id, "Lost reservation race");
                Err(OrderError::AlreadySold)
            }
            Ok(PlaceOrderOutcome::GoodNotFound) => {
                Err(invalid_reference(format!("good {}", good_id), buyer.id))
            }
            Err(DomainError::NotFound { resource }) => Err(invalid_reference(resource, buyer.id)),
            Err(e) => Err(store_failure("place_order", good_id, buyer.id, e)),
        }
    }

    /// Returns one of the buyer's own orders
    ///
    /// Orders belonging to other buyers are reported as not found.
    pub async fn get_order(&self, buyer: &User, order_id: u64) -> Result<Order, OrderError> {
        let order = self
            .repository
            .find_order(order_id)
            .await
            .map_err(|e| {
                error!(order_id, buyer_id = buyer.id, error = %e, "Failed to load order");
                OrderError::StoreUnavailable
            })?;

        match order {
            Some(order) if order.buyer_id == buyer.id => Ok(order),
            _ => Err(OrderError::NotFound),
        }
    }
}

fn invalid_reference(resource: String, buyer_id: u64) -> OrderError {
    info!(resource = %resource, buyer_id, "Order references a missing record");
    OrderError::InvalidReference { resource }
}

fn store_failure(operation: &str, good_id: u64, buyer_id: u64, err: DomainError) -> OrderError {
    error!(operation, good_id, buyer_id, error = %err, "Order store failure");
    OrderError::StoreUnavailable
}
