//! In-memory implementation of OrderRepository for tests and local runs

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::good::Good;
use crate::domain::entities::order::{Order, PlaceOrder, PlaceOrderOutcome};
use crate::errors::DomainError;

use super::trait_::OrderRepository;

#[derive(Default)]
struct OrderState {
    goods: HashMap<u64, Good>,
    orders: HashMap<u64, Order>,
    addresses: HashSet<u64>,
    next_order_id: u64,
}

/// Mock order repository
///
/// `place_order` performs its check-and-set under one write lock, which
/// gives it the same all-or-nothing contract as a store transaction.
/// `find_good` yields after reading so concurrent callers interleave
/// between the read and the reservation.
pub struct MockOrderRepository {
    state: Arc<RwLock<OrderState>>,
    find_good_calls: AtomicUsize,
    place_order_calls: AtomicUsize,
    unavailable: AtomicBool,
}

impl MockOrderRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(OrderState {
                next_order_id: 1,
                ..Default::default()
            })),
            find_good_calls: AtomicUsize::new(0),
            place_order_calls: AtomicUsize::new(0),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Insert or replace a good
    pub async fn insert_good(&self, good: Good) {
        self.state.write().await.goods.insert(good.id, good);
    }

    /// Register a deliverable address id
    pub async fn insert_address(&self, address_id: u64) {
        self.state.write().await.addresses.insert(address_id);
    }

    /// Current state of a good
    pub async fn good(&self, good_id: u64) -> Option<Good> {
        self.state.read().await.goods.get(&good_id).cloned()
    }

    /// All orders referencing a good
    pub async fn orders_for_good(&self, good_id: u64) -> Vec<Order> {
        self.state
            .read()
            .await
            .orders
            .values()
            .filter(|o| o.good_id == good_id)
            .cloned()
            .collect()
    }

    /// Number of `find_good` calls made so far
    pub fn find_good_calls(&self) -> usize {
        self.find_good_calls.load(Ordering::SeqCst)
    }

    /// Number of `place_order` calls made so far
    pub fn place_order_calls(&self) -> usize {
        self.place_order_calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent call fail with a database error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::Database {
                message: "order store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for MockOrderRepository {
    async fn find_good(&self, good_id: u64) -> Result<Option<Good>, DomainError> {
        self.find_good_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let good = self.state.read().await.goods.get(&good_id).cloned();
        tokio::task::yield_now().await;
        Ok(good)
    }

    async fn place_order(&self, request: PlaceOrder) -> Result<PlaceOrderOutcome, DomainError> {
        self.place_order_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let mut state = self.state.write().await;

        let price = match state.goods.get(&request.good_id) {
            None => return Ok(PlaceOrderOutcome::GoodNotFound),
            Some(good) if good.is_sold => return Ok(PlaceOrderOutcome::AlreadySold),
            Some(good) => good.price,
        };

        if !state.addresses.contains(&request.address_id) {
            return Err(DomainError::NotFound {
                resource: format!("address {}", request.address_id),
            });
        }

        let id = state.next_order_id;
        state.next_order_id += 1;

        let order = Order {
            id,
            good_id: request.good_id,
            address_id: request.address_id,
            buyer_id: request.buyer_id,
            pay_money: price,
            created_at: Utc::now(),
        };

        if let Some(good) = state.goods.get_mut(&request.good_id) {
            good.is_sold = true;
        }
        state.orders.insert(id, order.clone());

        Ok(PlaceOrderOutcome::Placed(order))
    }

    async fn find_order(&self, order_id: u64) -> Result<Option<Order>, DomainError> {
        self.check_available()?;
        Ok(self.state.read().await.orders.get(&order_id).cloned())
    }
}
