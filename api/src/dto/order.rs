use chrono::{DateTime, Utc};
use mp_core::domain::entities::order::Order;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Seconds a buyer has to pay for a freshly placed order
pub const PAYMENT_COUNTDOWN_SECS: &str = "1800";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(range(min = 1, message = "goodId must be positive"))]
    pub good_id: u64,

    #[validate(range(min = 1, message = "addressId must be positive"))]
    pub address_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub order_id: u64,
    pub good_id: u64,
    pub address_id: u64,
    pub pay_money: i64,
    pub countdown: String,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.id,
            good_id: order.good_id,
            address_id: order.address_id,
            pay_money: order.pay_money,
            countdown: PAYMENT_COUNTDOWN_SECS.to_string(),
            created_at: order.created_at,
        }
    }
}
