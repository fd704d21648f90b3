//! Tests for error types

mod domain_error_tests;
