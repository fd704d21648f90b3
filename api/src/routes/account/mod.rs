//! Account route handlers

pub mod info;
pub mod login;
pub mod register;

pub use info::info;
pub use login::login;
pub use register::register;
