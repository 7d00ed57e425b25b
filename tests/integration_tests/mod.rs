//! Integration tests module
//!
//! End-to-end tests for the collector:
//! - Multi-community collection into a single CSV
//! - Per-community failure isolation
//! - Output formatting

pub mod pipeline_test;
