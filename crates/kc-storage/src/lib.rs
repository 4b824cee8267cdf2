//! # kc-storage
//!
//! Storage abstraction traits for Keycloak Rust.
//!
//! This crate defines the storage provider interfaces that concrete
//! storage backends implement, plus an in-memory backend used for
//! development and tests.
//!
//! ## Provider Traits
//!
//! - [`UserProvider`] - CRUD operations and role grants for users
//! - [`RoleProvider`] - CRUD operations for realm roles

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod memory;
pub mod role;
pub mod user;

pub use error::{StorageError, StorageResult};
pub use memory::{InMemoryRoleProvider, InMemoryUserProvider};
pub use role::RoleProvider;
pub use user::UserProvider;
