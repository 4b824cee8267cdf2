//! End-to-End Integration Tests
//!
//! These tests drive the dummy federation provider through its factory
//! against the in-memory storage backends.

mod lookup;
mod migration;
mod provisioning;
