//! # kc-integration-tests
//!
//! End-to-end tests for the dummy migration federation provider.
//!
//! The tests live under `tests/` and run the provider against the
//! in-memory storage backends from `kc-storage`.

#![forbid(unsafe_code)]
