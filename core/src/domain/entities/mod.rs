//! Domain entities representing core business objects.

pub mod good;
pub mod order;
pub mod token;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use good::Good;
pub use order::{Order, PlaceOrder, PlaceOrderOutcome};
pub use token::Claims;
pub use user::{NewUser, User};
