//! Cache layer abstraction used in front of the persistent store
//!
//! The cache is never authoritative. Callers treat every error from a
//! [`CacheStore`] as a miss or a skipped write.

mod memory;
mod traits;

#[cfg(test)]
mod tests;

pub use memory::MemoryCacheStore;
pub use traits::CacheStore;
