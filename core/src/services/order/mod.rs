//! Order placement service
//!
//! The only place where correctness depends on concurrency: a good must
//! never be sold twice, no matter how many buyers race for it.

mod service;

#[cfg(test)]
mod tests;

pub use service::OrderService;
