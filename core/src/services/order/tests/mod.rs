//! Tests for order service

mod concurrency_tests;
mod service_tests;
