//! Tests for identity resolution
