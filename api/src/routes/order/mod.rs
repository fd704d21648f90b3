//! Order route handlers

pub mod create;
pub mod get;

pub use create::create_order;
pub use get::get_order;
