//! Request and response bodies of the HTTP API

pub mod auth;
pub mod order;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest, UserView};
pub use order::{CreateOrderRequest, CreateOrderResponse, OrderView};
